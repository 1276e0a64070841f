//! Error types for scene operations

use nelo_timeline_core::{ConfigError, TimelineError};

use crate::entity::Entity;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SceneError {
    /// The entity was never created in this scene, or has been destroyed.
    #[error("Unknown entity: {entity}")]
    UnknownEntity { entity: Entity },

    #[error("{entity} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("Invalid frame rate: {fps}")]
    InvalidFrameRate { fps: f64 },

    #[error("Scene config error: {reason}")]
    Config { reason: String },

    /// Authoring error from one of the component timelines.
    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

impl SceneError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownEntity { .. } | Self::MissingComponent { .. } => "entity",
            Self::InvalidFrameRate { .. } | Self::Config { .. } => "config",
            Self::Timeline(err) => err.category(),
        }
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}

impl From<ConfigError> for SceneError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nelo_timeline_core::TimelineId;

    #[test]
    fn timeline_errors_keep_their_category() {
        let err: SceneError = TimelineError::CyclicDependency {
            parent: TimelineId(1),
            child: TimelineId(2),
        }
        .into();
        assert_eq!(err.category(), "composition");
        assert_eq!(
            SceneError::UnknownEntity { entity: Entity(4) }.category(),
            "entity"
        );
    }
}
