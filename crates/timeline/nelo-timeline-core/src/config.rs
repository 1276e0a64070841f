//! Configuration shared by every timeline created through one context.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How discrete keyframes are blended once the query time has been bracketed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeBlend {
    /// Every keyframe at or after the query time blends into the running state,
    /// all measured from the last keyframe before the query time.
    #[default]
    Cascade,
    /// Only the first keyframe at or after the query time is blended.
    Nearest,
}

/// Timeline behaviour knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Length reported by a timeline that has neither keyframes nor layers.
    /// One second matches the normalized domain of paths.
    pub fallback_length: f64,

    /// Keyframe blending strategy used by `sample`.
    pub keyframe_blend: KeyframeBlend,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            fallback_length: 1.0,
            keyframe_blend: KeyframeBlend::Cascade,
        }
    }
}

impl TimelineConfig {
    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fallback_length.is_finite() || self.fallback_length <= 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "fallback_length must be finite and positive, got {}",
                    self.fallback_length
                ),
            });
        }
        Ok(())
    }
}
