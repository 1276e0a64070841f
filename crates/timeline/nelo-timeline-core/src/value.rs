//! Built-in vector, color and rotation payloads.
//!
//! Vectors combine component-wise. Rotations interpolate along the shortest
//! great arc and compose with the Hamilton product; they deliberately have no
//! additive form.

use nalgebra::{UnitQuaternion, Vector2, Vector3, Vector4};

use crate::capability::{Add, Interpolate, Multiply};

pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec4 = Vector4<f64>;

/// RGBA color. Shares the vector rules; a dedicated blend mode may follow.
pub type Color = Vector4<f64>;

/// Unit quaternion rotation.
pub type Rotation = UnitQuaternion<f64>;

macro_rules! impl_vector_capabilities {
    ($($ty:ident),*) => {$(
        impl Interpolate for $ty<f64> {
            #[inline]
            fn interpolate(&self, other: &Self, progress: f64) -> Self {
                self.lerp(other, progress)
            }
        }

        impl Add for $ty<f64> {
            #[inline]
            fn add(&self, other: &Self) -> Self {
                self + other
            }
        }

        impl Multiply for $ty<f64> {
            #[inline]
            fn multiply(&self, other: &Self) -> Self {
                self.component_mul(other)
            }
        }
    )*};
}

impl_vector_capabilities!(Vector2, Vector3, Vector4);

impl Interpolate for UnitQuaternion<f64> {
    fn interpolate(&self, other: &Self, progress: f64) -> Self {
        // `slerp` is undefined for antipodal inputs; fall back to a normalized
        // lerp, which is well defined there.
        self.try_slerp(other, progress, f64::EPSILON)
            .unwrap_or_else(|| self.nlerp(other, progress))
    }
}

impl Multiply for UnitQuaternion<f64> {
    #[inline]
    fn multiply(&self, other: &Self) -> Self {
        self * other
    }
}

/// Rotation about `axis` (need not be normalized) by `angle` radians.
pub fn rotation(axis: Vec3, angle: f64) -> Rotation {
    match nalgebra::Unit::try_new(axis, f64::EPSILON) {
        Some(axis) => UnitQuaternion::from_axis_angle(&axis, angle),
        None => UnitQuaternion::identity(),
    }
}
