//! Harness errors.

use sift_core::GraphError;
use thiserror::Error;

/// Errors raised while running a scenario.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Unknown vertex name: {0}")]
    UnknownVertex(String),

    #[error("Unknown edge name: {0}")]
    UnknownEdge(String),

    #[error("Unknown view name: {0}")]
    UnknownView(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Base graph refused edge {0}")]
    EdgeRefused(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<HarnessError>,
    },

    #[error("Assertion failed in step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    #[error("Invariant violated in view '{view}': {message}")]
    InvariantViolated { view: String, message: String },
}

impl HarnessError {
    pub fn step_failed(step: impl Into<String>, source: HarnessError) -> Self {
        Self::StepFailed {
            step: step.into(),
            source: Box::new(source),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn invariant_violated(view: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvariantViolated {
            view: view.into(),
            message: message.into(),
        }
    }
}

pub type HarnessResult<T> = Result<T, HarnessError>;
