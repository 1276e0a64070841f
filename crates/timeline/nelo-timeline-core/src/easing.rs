//! Easing functions mapping normalized progress to eased progress.
//!
//! Only keyframe blending consults an easing; layers and generators never do.

use std::fmt;
use std::sync::Arc;

/// Caller-defined easing.
pub type EasingFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

#[derive(Clone, Default)]
pub enum Easing {
    /// Always 0: hold the previous state until the keyframe time has passed.
    Step,
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    /// CSS-style timing curve with control points (x1, y1, x2, y2).
    CubicBezier([f64; 4]),
    Custom(EasingFn),
}

impl Easing {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Step => 0.0,
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::CubicBezier([x1, y1, x2, y2]) => bezier_ease(t, *x1, *y1, *x2, *y2),
            Self::Custom(f) => f(t),
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step => f.write_str("Step"),
            Self::Linear => f.write_str("Linear"),
            Self::InQuad => f.write_str("InQuad"),
            Self::OutQuad => f.write_str("OutQuad"),
            Self::InOutQuad => f.write_str("InOutQuad"),
            Self::InCubic => f.write_str("InCubic"),
            Self::OutCubic => f.write_str("OutCubic"),
            Self::InOutCubic => f.write_str("InOutCubic"),
            Self::CubicBezier(ctrl) => f.debug_tuple("CubicBezier").field(ctrl).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Invert the x curve by bisection, then evaluate y. Assumes x1, x2 in [0, 1]
/// so x is monotonic.
fn bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut mid = t;
    for _ in 0..48 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-9 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}
