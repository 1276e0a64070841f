//! Nelo scene core
//!
//! Entities carry components whose fields are [`nelo_timeline_core::Timeline`]s.
//! The scene holds a playhead; sampling a component at that time yields plain
//! values for a renderer.
//!
//! ```
//! use nelo_scene_core::{Circle, Scene, SceneConfig, Transform};
//! use nelo_timeline_core::{Easing, Vec3};
//!
//! let mut scene = Scene::new(SceneConfig::default())?;
//! let dot = scene.create_entity();
//! let transform = Transform::new(scene.timelines());
//! transform.position.add_keyframe(1.0, Vec3::new(2.0, 0.0, 0.0), Easing::Linear)?;
//! scene.add_component(dot, transform)?;
//! scene.add_component(dot, Circle::with_radius(scene.timelines(), 0.5))?;
//!
//! scene.set_time(0.5);
//! let placed = scene.sample::<Transform>(dot)?;
//! assert!((placed.position.x - 1.0).abs() < 1e-9);
//! # Ok::<(), nelo_scene_core::SceneError>(())
//! ```

pub mod collection;
pub mod components;
pub mod config;
pub mod entity;
pub mod error;
pub mod scene;

pub use collection::Collection;
pub use components::{
    Circle, CircleSample, Component, Curve, CurveSample, Transform, TransformSample, Visibility,
    VisibilitySample,
};
pub use config::SceneConfig;
pub use entity::{Entity, EntityAllocator};
pub use error::SceneError;
pub use scene::Scene;

/// Scene result type
pub type Result<T> = core::result::Result<T, SceneError>;
