//! Built-in components. Every field is a timeline, so a component is sampled
//! into a plain value struct at the current scene time.

use nalgebra::Matrix4;
use nelo_timeline_core::{Color, Path, PathProperty, Rotation, Time, Timeline, TimelineContext, Vec3};
use serde::Serialize;

/// A component that can be sampled at a point in time.
pub trait Component: Send + Sync + 'static {
    type Sample;

    fn sample(&self, time: Time) -> Self::Sample;
}

fn white() -> Color {
    Color::new(1.0, 1.0, 1.0, 1.0)
}

/// Placement of an entity.
#[derive(Clone, Debug)]
pub struct Transform {
    pub position: Timeline<Vec3>,
    pub rotation: Timeline<Rotation>,
    pub scale: Timeline<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransformSample {
    pub position: Vec3,
    pub rotation: Rotation,
    pub scale: f64,
}

impl Transform {
    /// Origin, no rotation, unit scale.
    pub fn new(ctx: &TimelineContext) -> Self {
        Self {
            position: ctx.constant(Vec3::zeros()),
            rotation: ctx.constant(Rotation::identity()),
            scale: ctx.constant(1.0),
        }
    }

    pub fn at(ctx: &TimelineContext, position: Vec3) -> Self {
        Self {
            position: ctx.constant(position),
            ..Self::new(ctx)
        }
    }
}

impl Component for Transform {
    type Sample = TransformSample;

    fn sample(&self, time: Time) -> TransformSample {
        TransformSample {
            position: self.position.sample(time),
            rotation: self.rotation.sample(time),
            scale: self.scale.sample(time),
        }
    }
}

impl TransformSample {
    /// Model matrix: translate, then rotate, then scale.
    pub fn to_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Matrix4::new_scaling(self.scale)
    }
}

#[derive(Clone, Debug)]
pub struct Circle {
    pub radius: Timeline<f64>,
    pub fill_color: Timeline<Color>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CircleSample {
    pub radius: f64,
    pub fill_color: Color,
}

impl Circle {
    /// Unit radius, opaque white.
    pub fn new(ctx: &TimelineContext) -> Self {
        Self::with_radius(ctx, 1.0)
    }

    pub fn with_radius(ctx: &TimelineContext, radius: f64) -> Self {
        Self {
            radius: ctx.constant(radius),
            fill_color: ctx.constant(white()),
        }
    }
}

impl Component for Circle {
    type Sample = CircleSample;

    fn sample(&self, time: Time) -> CircleSample {
        CircleSample {
            radius: self.radius.sample(time),
            fill_color: self.fill_color.sample(time),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Visibility {
    pub hidden: Timeline<bool>,
    pub opacity: Timeline<f64>,
    /// Draw order; higher is drawn later.
    pub z_index: Timeline<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisibilitySample {
    pub hidden: bool,
    pub opacity: f64,
    pub z_index: f64,
}

impl Visibility {
    pub fn new(ctx: &TimelineContext) -> Self {
        Self {
            hidden: ctx.constant(false),
            opacity: ctx.constant(1.0),
            z_index: ctx.constant(0.0),
        }
    }
}

impl Component for Visibility {
    type Sample = VisibilitySample;

    fn sample(&self, time: Time) -> VisibilitySample {
        VisibilitySample {
            hidden: self.hidden.sample(time),
            opacity: self.opacity.sample(time),
            z_index: self.z_index.sample(time),
        }
    }
}

impl VisibilitySample {
    pub fn is_visible(&self) -> bool {
        !self.hidden && self.opacity > 0.0
    }
}

/// A stroked curve along an animated path.
///
/// `start` and `end` select the drawn part of the path in its own parameter
/// space. An `end` below `start` draws the whole path.
#[derive(Clone, Debug)]
pub struct Curve {
    pub spline: Timeline<Path>,
    pub stroke: Timeline<PathProperty<Color>>,
    pub weight: Timeline<PathProperty<f64>>,
    pub start: Timeline<f64>,
    pub end: Timeline<f64>,
    /// Draw in the entity's transform space rather than world space.
    pub use_transform: Timeline<bool>,
    pub min_subdivisions: Timeline<f64>,
    pub max_subdivisions: Timeline<f64>,
    /// Flatness tolerance for adaptive subdivision.
    pub threshold: Timeline<f64>,
}

impl Curve {
    pub fn new(ctx: &TimelineContext, spline: Path) -> Self {
        Self {
            spline: ctx.constant(spline),
            stroke: ctx.constant(ctx.constant(white())),
            weight: ctx.constant(ctx.constant(0.1)),
            start: ctx.constant(0.0),
            end: ctx.constant(-1.0),
            use_transform: ctx.constant(false),
            min_subdivisions: ctx.constant(4.0),
            max_subdivisions: ctx.constant(10.0),
            threshold: ctx.constant(0.005),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CurveSample {
    pub path: Path,
    pub stroke: PathProperty<Color>,
    pub weight: PathProperty<f64>,
    pub start: f64,
    pub end: f64,
    pub use_transform: bool,
    pub min_subdivisions: u32,
    pub max_subdivisions: u32,
    pub threshold: f64,
}

impl Component for Curve {
    type Sample = CurveSample;

    fn sample(&self, time: Time) -> CurveSample {
        let min_subdivisions = self.min_subdivisions.sample(time).round().max(0.0) as u32;
        let max_subdivisions = self.max_subdivisions.sample(time).round().max(0.0) as u32;
        CurveSample {
            path: self.spline.sample(time),
            stroke: self.stroke.sample(time),
            weight: self.weight.sample(time),
            start: self.start.sample(time),
            end: self.end.sample(time),
            use_transform: self.use_transform.sample(time),
            min_subdivisions,
            max_subdivisions: max_subdivisions.max(min_subdivisions),
            threshold: self.threshold.sample(time),
        }
    }
}

impl CurveSample {
    /// Parameter range to draw.
    pub fn range(&self) -> (f64, f64) {
        if self.end < self.start {
            (0.0, self.path.length())
        } else {
            (self.start, self.end)
        }
    }

    /// `segments + 1` evenly spaced points across [`range`](Self::range).
    pub fn trace(&self, segments: usize) -> Vec<Vec3> {
        let (from, to) = self.range();
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| {
                let alpha = from + (to - from) * i as f64 / segments as f64;
                self.path.sample(alpha)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nelo_timeline_core::paths;

    #[test]
    fn defaults() {
        let ctx = TimelineContext::default();
        let t = Transform::new(&ctx).sample(3.0);
        assert_eq!(t.position, Vec3::zeros());
        assert_eq!(t.scale, 1.0);
        assert_relative_eq!(t.to_matrix(), Matrix4::identity());

        let v = Visibility::new(&ctx).sample(0.0);
        assert!(v.is_visible());

        let c = Circle::new(&ctx).sample(0.0);
        assert_eq!(c.radius, 1.0);
        assert_eq!(c.fill_color, white());
    }

    #[test]
    fn curve_defaults_draw_the_whole_path() {
        let ctx = TimelineContext::default();
        let curve = Curve::new(&ctx, ctx.path(paths::circle)).sample(0.0);
        assert_eq!(curve.range(), (0.0, 1.0));
        assert_eq!((curve.min_subdivisions, curve.max_subdivisions), (4, 10));
        assert_relative_eq!(curve.threshold, 0.005);
        assert!(!curve.use_transform);
        assert_relative_eq!(curve.weight.sample(0.5), 0.1);
        assert_eq!(curve.stroke.sample(0.5), white());

        let points = curve.trace(4);
        assert_eq!(points.len(), 5);
        assert_relative_eq!(points[1], Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(points[4], points[0], epsilon = 1e-12);
    }

    #[test]
    fn transform_matrix_applies_scale_then_translation() {
        let ctx = TimelineContext::default();
        let t = Transform::at(&ctx, Vec3::new(1.0, 2.0, 3.0));
        t.scale.add_keyframe(1.0, 2.0, Default::default()).unwrap();
        let m = t.sample(1.0).to_matrix();
        let p = m.transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(3.0, 2.0, 3.0));
    }
}
