//! Pipeline definition and execution
//!
//! A pipeline is an ordered list of steps sharing one [`PipelineContext`].
//! Ordering is checked once when the pipeline is built; the executor then
//! runs the steps strictly in sequence, halting at the first fatal outcome.
//!
//! [`PipelineContext`]: carecheck_core::domain::context::PipelineContext

mod builder;
mod executor;
mod presets;

pub use builder::PipelineBuilder;
pub use executor::PipelineExecutor;
pub use presets::{PipelineOptions, RunVariant};

use crate::steps::Step;

/// A step together with its position-qualified label
pub struct PipelineStep {
    /// e.g. "08. Create Appointment"
    pub label: String,
    pub step: Box<dyn Step>,
}

/// A validated, linear sequence of steps
pub struct Pipeline {
    name: String,
    steps: Vec<PipelineStep>,
}

impl Pipeline {
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Step labels in execution order
    pub fn labels(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.label.as_str()).collect()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("steps", &self.labels())
            .finish()
    }
}
