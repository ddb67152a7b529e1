use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::warn;

use crate::models::feasibility::{FeasibilityReport, Suggestion};
use crate::models::work_item::Allocation;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<JsonValue>,
    },

    #[error("scheduling conflict: {message}")]
    Conflict {
        message: String,
        conflicts: Vec<Allocation>,
    },

    #[error("schedule is infeasible: {message}")]
    Infeasible {
        message: String,
        report: FeasibilityReport,
        suggestions: Vec<Suggestion>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "engine::validation", %message, "validation error");
        EngineError::Validation {
            message,
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: JsonValue) -> Self {
        let message = message.into();
        warn!(target: "engine::validation", %message, details = %details, "validation error with details");
        EngineError::Validation {
            message,
            details: Some(details),
        }
    }

    pub fn conflict(message: impl Into<String>, conflicts: Vec<Allocation>) -> Self {
        let message = message.into();
        warn!(
            target: "engine::conflict",
            %message,
            conflict_count = conflicts.len(),
            "conflict error"
        );
        EngineError::Conflict { message, conflicts }
    }

    pub fn infeasible(
        message: impl Into<String>,
        report: FeasibilityReport,
        suggestions: Vec<Suggestion>,
    ) -> Self {
        let message = message.into();
        warn!(
            target: "engine::feasibility",
            %message,
            deficit_minutes = report.deficit_minutes,
            "infeasible schedule"
        );
        EngineError::Infeasible {
            message,
            report,
            suggestions,
        }
    }

    /// The allocations a `Conflict` error was raised against, if any.
    pub fn conflicting_allocations(&self) -> Option<&[Allocation]> {
        match self {
            EngineError::Conflict { conflicts, .. } => Some(conflicts),
            _ => None,
        }
    }

    pub fn feasibility_report(&self) -> Option<&FeasibilityReport> {
        match self {
            EngineError::Infeasible { report, .. } => Some(report),
            _ => None,
        }
    }
}
