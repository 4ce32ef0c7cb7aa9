//! Core domain types
//!
//! These types describe one pipeline run: the context that carries resolved
//! identifiers between steps, the outcome each step produces and the report
//! assembled once the run is over. They are shared between the runner (which
//! produces them) and the CLI (which renders them).

pub mod context;
pub mod entity;
pub mod log;
pub mod run;
pub mod slot;
pub mod step;
