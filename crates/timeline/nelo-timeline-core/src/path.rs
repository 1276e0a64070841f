//! Function-valued payloads: timelines of timelines.
//!
//! A [`Path`] is a timeline of positions sampled over the normalized domain
//! `[0, 1]`. When the payload of a timeline is itself a timeline, the
//! capabilities lift pointwise: combining two inner timelines yields a new
//! procedural timeline that samples both operands at the same parameter and
//! combines the results with the inner type's rule. Its length is pinned to
//! the shorter operand.
//!
//! Lifting allocates a fresh timeline per call, so sampling a
//! `Timeline<Path>` with keyframes or layers allocates every frame.

use std::f64::consts::TAU;

use crate::capability::{Add, Animatable, Interpolate, Multiply};
use crate::context::TimelineContext;
use crate::timeline::Timeline;
use crate::value::Vec3;
use crate::Time;

/// A property that varies along a path (stroke color, weight, ...).
pub type PathProperty<T> = Timeline<T>;

/// Positions over the normalized domain `[0, 1]`.
pub type Path = PathProperty<Vec3>;

fn lift<T, F>(a: &Timeline<T>, b: &Timeline<T>, combine: F) -> Timeline<T>
where
    T: Animatable,
    F: Fn(&T, &T) -> T + Send + Sync + 'static,
{
    let (left, right) = (a.clone(), b.clone());
    let lifted = Timeline::procedural_over(a, b, move |alpha| {
        combine(&left.sample(alpha), &right.sample(alpha))
    });
    lifted.set_length(a.length().min(b.length()));
    lifted
}

impl<T: Animatable + Interpolate> Interpolate for Timeline<T> {
    fn interpolate(&self, other: &Self, progress: f64) -> Self {
        lift(self, other, move |a, b| a.interpolate(b, progress))
    }
}

impl<T: Animatable + Add> Add for Timeline<T> {
    fn add(&self, other: &Self) -> Self {
        lift(self, other, |a, b| a.add(b))
    }
}

impl<T: Animatable + Multiply> Multiply for Timeline<T> {
    fn multiply(&self, other: &Self) -> Self {
        lift(self, other, |a, b| a.multiply(b))
    }
}

impl TimelineContext {
    /// A procedural path from a parametric function such as [`paths::circle`].
    pub fn path<F>(&self, generator: F) -> Path
    where
        F: Fn(Time) -> Vec3 + Send + Sync + 'static,
    {
        self.procedural(generator)
    }
}

/// Parametric shapes over `t` in `[0, 1]`, usable as path generators.
pub mod paths {
    use super::*;

    #[inline]
    pub fn lerp(begin: &Vec3, end: &Vec3, t: f64) -> Vec3 {
        begin.lerp(end, t)
    }

    /// Unit circle, counter clockwise from +x.
    pub fn circle(t: f64) -> Vec3 {
        let theta = t * TAU;
        Vec3::new(theta.cos(), theta.sin(), 0.0)
    }

    /// Unit square (side 2) traced counter clockwise from +x. The right side is
    /// split in two so the trace starts and ends on the x axis.
    pub fn square(t: f64) -> Vec3 {
        let right = Vec3::new(1.0, 0.0, 0.0);
        let top_right = Vec3::new(1.0, 1.0, 0.0);
        let top_left = Vec3::new(-1.0, 1.0, 0.0);
        let bottom_left = Vec3::new(-1.0, -1.0, 0.0);
        let bottom_right = Vec3::new(1.0, -1.0, 0.0);

        let t = t * 4.0;
        if t <= 0.5 {
            lerp(&right, &top_right, 2.0 * t)
        } else if t <= 1.5 {
            lerp(&top_right, &top_left, t - 0.5)
        } else if t <= 2.5 {
            lerp(&top_left, &bottom_left, t - 1.5)
        } else if t <= 3.5 {
            lerp(&bottom_left, &bottom_right, t - 2.5)
        } else {
            lerp(&bottom_right, &right, 2.0 * t - 7.0)
        }
    }
}
