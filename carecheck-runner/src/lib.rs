//! Carecheck Runner
//!
//! Drives a scheduling service through a linear pipeline of dependent
//! steps and reports, per step, whether the service behaved.
//!
//! Architecture:
//! - Configuration: connection, credential and request-shaping settings
//! - Services: credentials, bearer tokens, synthetic entities, run journal
//! - Steps: one remote operation plus its assertions each
//! - Pipeline: construction-time ordering checks and sequential execution

pub mod config;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod steps;

pub use config::Config;
pub use error::{AuthError, PipelineError};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineExecutor, PipelineOptions, RunVariant};
