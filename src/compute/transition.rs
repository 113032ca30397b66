//! SmoothLife transition function.
//!
//! The next value of a cell is a smooth indicator of whether the outer-ring
//! average lies inside an interval. The interval slides from the birth
//! interval to the survival interval as the inner-disk average rises:
//!
//! ```text
//! s(m, n) = σ₂(n, lerp(b₁, d₁, σ(m, ½)), lerp(b₂, d₂, σ(m, ½)))
//! ```
//!
//! with `m` the inner average, `n` the outer average, `σ` a logistic step of
//! width `alpha_inner` (for `m`) or `alpha_outer` (for `n`).

use crate::schema::TransitionParams;

/// Inner average at which the interval is halfway between birth and survival.
pub const INNER_MIDPOINT: f32 = 0.5;

/// Logistic step centred on `a`; width `alpha` covers roughly 0.12..0.88.
#[inline]
pub fn sigmoid(x: f32, a: f32, alpha: f32) -> f32 {
    1.0 / (1.0 + (-(x - a) * 4.0 / alpha).exp())
}

/// Smooth indicator of `a <= x <= b`.
#[inline]
pub fn sigmoid_interval(x: f32, a: f32, b: f32, alpha: f32) -> f32 {
    sigmoid(x, a, alpha) * (1.0 - sigmoid(x, b, alpha))
}

/// Blend `x` (sparse inner disk) into `y` (full inner disk).
#[inline]
pub fn sigmoid_mix(x: f32, y: f32, inner: f32, alpha: f32) -> f32 {
    let t = sigmoid(inner, INNER_MIDPOINT, alpha);
    x * (1.0 - t) + y * t
}

/// Next cell value from inner-disk and outer-ring averages. Output is in `[0, 1]`.
#[inline]
pub fn smooth_transition(inner_avg: f32, outer_avg: f32, params: &TransitionParams) -> f32 {
    let low = sigmoid_mix(params.birth_min, params.survive_min, inner_avg, params.alpha_inner);
    let high = sigmoid_mix(params.birth_max, params.survive_max, inner_avg, params.alpha_inner);
    let s = sigmoid_interval(outer_avg, low, high, params.alpha_outer);
    if s.is_nan() { 0.0 } else { s.clamp(0.0, 1.0) }
}
