//! Data Transfer Objects for the scheduling API
//!
//! Request and response shapes exchanged with the remote scheduling service.
//! Field names follow the service's JSON contract; conversion into domain
//! types happens here so steps only deal with domain values.

pub mod appointment;
pub mod auth;
pub mod availability;
pub mod envelope;
pub mod page;
pub mod patient;
pub mod provider;
pub mod slot;
