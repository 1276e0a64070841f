//! Nelo timeline core
//!
//! Generic time-varying values. A [`Timeline<T>`] produces a `T` for any
//! query time and is built from one of two sources:
//! - a constant anchor refined by ordered keyframes, or
//! - a procedural generator `Fn(Time) -> T`.
//!
//! Either kind can layer other timelines of the same payload on top, additively
//! or multiplicatively, starting at a time offset. Which operations a payload
//! supports is decided by the capability traits in [`capability`].
//!
//! ```
//! use nelo_timeline_core::{Easing, TimelineContext};
//!
//! let ctx = TimelineContext::default();
//! let x = ctx.constant(5.0);
//! let y = ctx.procedural(|t| t);
//! x.add_timeline(0.5, &y)?;
//! assert!((x.sample(1.5) - 6.0).abs() < 1e-9);
//! assert!(y.multiply_timeline(4.0, &x).is_err());
//!
//! let fade = ctx.constant(0.0);
//! fade.add_keyframe(1.0, 1.0, Easing::OutQuad)?;
//! # Ok::<(), nelo_timeline_core::TimelineError>(())
//! ```

pub mod capability;
pub mod config;
pub mod context;
pub mod easing;
pub mod error;
pub mod ids;
pub mod keyframe;
pub mod path;
pub mod timeline;
pub mod value;

pub use capability::{Add, Animatable, Interpolate, Multiply};
pub use config::{KeyframeBlend, TimelineConfig};
pub use context::TimelineContext;
pub use easing::{Easing, EasingFn};
pub use error::{ConfigError, TimelineError};
pub use ids::TimelineId;
pub use keyframe::Keyframe;
pub use path::{paths, Path, PathProperty};
pub use timeline::{Generator, LayerInfo, LayerMode, Timeline};
pub use value::{Color, Rotation, Vec2, Vec3, Vec4};

/// Scalar time in seconds.
pub type Time = f64;

/// Timeline result type
pub type Result<T> = core::result::Result<T, TimelineError>;
