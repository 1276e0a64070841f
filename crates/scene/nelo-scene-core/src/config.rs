//! Scene configuration.

use nelo_timeline_core::TimelineConfig;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub name: String,
    /// Frames per second used by `frame_times` and `play`.
    pub fps: f64,
    /// Configuration for every timeline created through the scene.
    pub timeline: TimelineConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "scene".into(),
            fps: 60.0,
            timeline: TimelineConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(SceneError::InvalidFrameRate { fps: self.fps });
        }
        self.timeline.validate()?;
        Ok(())
    }
}
