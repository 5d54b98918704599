/*!
 * Per-source results.
 *
 * Every upstream source reports one [`SourceOutcome`]; the orchestrator
 * folds them into the response maps and records a [`SourceReport`] for each,
 * so degraded sources stay visible instead of disappearing silently.
 */

use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;

/// Result of consulting a single source
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<T> {
    /// The source produced a value
    Success(T),
    /// The source answered but had nothing for this reference
    Empty,
    /// The source could not be consulted
    Failed(String),
}

impl<T> SourceOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The value, if any
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    /// Status tag without the payload
    pub fn status(&self) -> SourceStatus {
        match self {
            Self::Success(_) => SourceStatus::Success,
            Self::Empty => SourceStatus::Empty,
            Self::Failed(_) => SourceStatus::Failed,
        }
    }

    /// Report line for this outcome under the given source name
    pub fn report(&self, source: impl Into<String>) -> SourceReport {
        SourceReport {
            source: source.into(),
            status: self.status(),
            detail: match self {
                Self::Failed(reason) => Some(reason.clone()),
                _ => None,
            },
        }
    }
}

impl<T> From<Result<T, ProviderError>> for SourceOutcome<T> {
    fn from(result: Result<T, ProviderError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(ProviderError::EmptyResponse(_)) => Self::Empty,
            Err(error) => Self::Failed(error.to_string()),
        }
    }
}

/// Outcome status without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Success,
    Empty,
    Failed,
}

/// Diagnostic line describing how one source fared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    /// Source name, e.g. "verse:kjv" or "commentary:stored"
    pub source: String,
    pub status: SourceStatus,
    /// Failure reason, when the source failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
