//! The context every timeline is created from.

use std::sync::Arc;

use crate::capability::Animatable;
use crate::config::TimelineConfig;
use crate::error::ConfigError;
use crate::timeline::Timeline;
use crate::Time;

/// Owns the configuration shared by a family of timelines.
///
/// Timelines from different contexts may be layered together freely.
#[derive(Clone, Debug, Default)]
pub struct TimelineContext {
    config: Arc<TimelineConfig>,
}

impl TimelineContext {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Build a context from a JSON [`TimelineConfig`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(TimelineConfig::from_json(json)?))
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// A timeline anchored at `anchor`, ready for keyframes and layers.
    pub fn constant<T: Animatable>(&self, anchor: T) -> Timeline<T> {
        Timeline::new_constant(Arc::clone(&self.config), anchor)
    }

    /// A timeline defined entirely by `generator`. It accepts layers but never
    /// keyframes.
    pub fn procedural<T, F>(&self, generator: F) -> Timeline<T>
    where
        T: Animatable,
        F: Fn(Time) -> T + Send + Sync + 'static,
    {
        Timeline::new_procedural(Arc::clone(&self.config), Arc::new(generator))
    }
}
