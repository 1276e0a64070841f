//! Error types for timeline authoring.

use crate::ids::TimelineId;

/// Failures raised while building a timeline graph.
///
/// Both variants are authoring errors: the call that produced them left the
/// timeline exactly as it was before the call.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimelineError {
    /// The operation is not valid for this kind of timeline (e.g. keyframes on
    /// a procedural timeline).
    #[error("Invalid operation on timeline {id}: {reason}")]
    InvalidOperation { id: TimelineId, reason: String },

    /// Layering `child` into `parent` would make `parent` depend on itself.
    #[error("Cyclic dependency: timeline {child} already depends on timeline {parent}")]
    CyclicDependency {
        parent: TimelineId,
        child: TimelineId,
    },
}

impl TimelineError {
    /// Error category for log tagging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidOperation { .. } => "operation",
            Self::CyclicDependency { .. } => "composition",
        }
    }
}

/// Failures while loading or validating a [`crate::TimelineConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("timeline config json parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid timeline config: {reason}")]
    Invalid { reason: String },
}
