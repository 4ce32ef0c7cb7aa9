//! Carecheck Core
//!
//! Core types shared by every Carecheck crate.
//!
//! This crate contains:
//! - Domain types: pipeline context, time ranges, step outcomes and run reports
//! - DTOs: wire shapes of the scheduling API the pipeline drives

pub mod domain;
pub mod dto;
