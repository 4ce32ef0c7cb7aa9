//! Pipeline builder
//!
//! Rejects orderings in which a step would read a context field before any
//! earlier step writes it, and pipelines in which two steps write the same
//! field. A reordering mistake is therefore a construction error instead of
//! a confusing failure halfway through a run.

use carecheck_core::domain::context::ContextKey;
use std::collections::HashMap;

use crate::error::PipelineError;
use crate::pipeline::{Pipeline, PipelineStep};
use crate::steps::Step;

pub struct PipelineBuilder {
    name: String,
    steps: Vec<Box<dyn Step>>,
}

impl PipelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Appends a step; order of calls is execution order
    pub fn step<S: Step + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        if self.steps.is_empty() {
            return Err(PipelineError::Empty(self.name));
        }

        let mut writers: HashMap<ContextKey, String> = HashMap::new();
        let mut steps = Vec::with_capacity(self.steps.len());

        for (idx, step) in self.steps.into_iter().enumerate() {
            let label = format!("{:02}. {}", idx + 1, step.label());

            for key in step.reads() {
                if !writers.contains_key(key) {
                    return Err(PipelineError::UnsatisfiedInput {
                        step: label,
                        key: *key,
                    });
                }
            }

            for key in step.writes() {
                if let Some(writer) = writers.get(key) {
                    return Err(PipelineError::DuplicateOutput {
                        step: label,
                        key: *key,
                        writer: writer.clone(),
                    });
                }
                writers.insert(*key, label.clone());
            }

            steps.push(PipelineStep { label, step });
        }

        Ok(Pipeline {
            name: self.name,
            steps,
        })
    }
}
