//! Capability traits a timeline payload may opt into.
//!
//! A payload type implements any subset of [`Interpolate`], [`Add`] and
//! [`Multiply`]. Timeline operations are bounded on the capability they need:
//! keyframes need `Interpolate`, additive layers need `Add`, multiplicative
//! layers need `Multiply`. A type without the capability simply does not get
//! the method.
//!
//! Binary operations take `(delta, state)` when used for layering, so
//! implementations for non-commutative types must keep the argument order.
//!
//! Rotations have no additive form, so this does not build:
//!
//! ```compile_fail
//! use nelo_timeline_core::{Rotation, TimelineContext};
//!
//! let ctx = TimelineContext::default();
//! let spin = ctx.constant(Rotation::identity());
//! let wobble = ctx.constant(Rotation::identity());
//! spin.add_timeline(0.0, &wobble).unwrap();
//! ```

/// Values that can be carried by a timeline.
pub trait Animatable: Clone + Send + Sync + 'static {}

impl<T> Animatable for T where T: Clone + Send + Sync + 'static {}

/// Blend from `self` towards `other` by `progress` (0 at `self`, 1 at `other`).
pub trait Interpolate {
    fn interpolate(&self, other: &Self, progress: f64) -> Self;
}

/// Additive composition used by additive layers.
pub trait Add {
    fn add(&self, other: &Self) -> Self;
}

/// Multiplicative composition used by multiplicative layers.
pub trait Multiply {
    fn multiply(&self, other: &Self) -> Self;
}

#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(&self, other: &Self, progress: f64) -> Self {
        lerp_f64(*self, *other, progress)
    }
}

impl Add for f64 {
    #[inline]
    fn add(&self, other: &Self) -> Self {
        self + other
    }
}

impl Multiply for f64 {
    #[inline]
    fn multiply(&self, other: &Self) -> Self {
        self * other
    }
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, other: &Self, progress: f64) -> Self {
        lerp_f64(f64::from(*self), f64::from(*other), progress) as f32
    }
}

impl Add for f32 {
    #[inline]
    fn add(&self, other: &Self) -> Self {
        self + other
    }
}

impl Multiply for f32 {
    #[inline]
    fn multiply(&self, other: &Self) -> Self {
        self * other
    }
}

// Discrete payloads hold the left value. A keyframe on one of these takes
// effect once the query time has moved past it.

impl Interpolate for bool {
    #[inline]
    fn interpolate(&self, _other: &Self, _progress: f64) -> Self {
        *self
    }
}

impl Interpolate for String {
    #[inline]
    fn interpolate(&self, _other: &Self, _progress: f64) -> Self {
        self.clone()
    }
}
