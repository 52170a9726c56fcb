//! Pure easing functions mapping progress [0, 1] to eased progress [0, 1].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    Linear,
    /// Accelerate then decelerate; the navigation default
    #[default]
    CubicInOut,
    CubicOut,
    QuinticOut,
    ExpoOut,
}

impl EasingType {
    /// Apply the easing curve to a progress value. Input is clamped to
    /// [0, 1].
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::CubicInOut => cubic_in_out(t),
            EasingType::CubicOut => cubic_out(t),
            EasingType::QuinticOut => quintic_out(t),
            EasingType::ExpoOut => expo_out(t),
        }
    }
}

/// Cubic ease-in-out: f(t) = 4t³ for t < ½, else (t−1)(2t−2)² + 1
#[inline]
fn cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let back = 2.0 * t - 2.0;
        (t - 1.0) * back * back + 1.0
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn expo_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}
