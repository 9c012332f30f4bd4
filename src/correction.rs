//! Deferred remediation work produced by diffing desired against actual state.

use std::fmt;

use crate::error::BoxError;

/// Failure reported by a correction's action.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct CorrectionError(BoxError);

impl CorrectionError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        CorrectionError(error.into())
    }

    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

type Action = Box<dyn FnMut() -> Result<(), CorrectionError> + Send>;

/// A described unit of work that brings a provider in line with the
/// configuration.
///
/// Creating a correction never runs it. Whoever executes corrections owns
/// ordering, retries and dry runs, and may call [`Correction::run`] more than
/// once.
///
/// Corrections hold code, not data, so they are neither cloned nor copied
/// along with zone state.
pub struct Correction {
    message: String,
    action: Action,
}

impl Correction {
    pub fn new<F>(message: impl Into<String>, action: F) -> Self
    where
        F: FnMut() -> Result<(), CorrectionError> + Send + 'static,
    {
        Correction {
            message: message.into(),
            action: Box::new(action),
        }
    }

    /// Human-readable description of the change.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn run(&mut self) -> Result<(), CorrectionError> {
        tracing::debug!(correction = %self.message, "running correction");
        (self.action)().inspect_err(|error| {
            tracing::debug!(correction = %self.message, "correction failed: {error}");
        })
    }
}

impl fmt::Debug for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Correction")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
