//! Epsilon-aware scalar comparison.
//!
//! Every comparison in the geometry code goes through these predicates so that
//! values sitting exactly on a domain boundary (a cone apex at `v = 1.0`, a pole
//! at `v = PI`) are not rejected because of floating-point noise.

/// Default comparison epsilon shared by the kernel.
pub const EPSILON: f64 = Tolerance::DEFAULT_LINEAR;

/// `|a - b| < eps`.
#[inline]
pub fn equals(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

/// `a > b` or `a` equals `b` within `eps`.
#[inline]
pub fn greater_equal(a: f64, b: f64, eps: f64) -> bool {
    a > b || equals(a, b, eps)
}

/// `a > b` and not equal within `eps`.
#[inline]
pub fn greater_than(a: f64, b: f64, eps: f64) -> bool {
    a > b && !equals(a, b, eps)
}

/// `a < b` or `a` equals `b` within `eps`.
#[inline]
pub fn less_equal(a: f64, b: f64, eps: f64) -> bool {
    a < b || equals(a, b, eps)
}

/// `a < b` and not equal within `eps`.
#[inline]
pub fn less_than(a: f64, b: f64, eps: f64) -> bool {
    a < b && !equals(a, b, eps)
}

/// `|v| < eps`.
#[inline]
pub fn is_zero(v: f64, eps: f64) -> bool {
    v.abs() < eps
}

/// Comparison epsilons a host can load from its settings.
///
/// `linear` is in model units and feeds calls such as
/// `Surface::contains_point_eps`; `angular` is in radians.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub linear: f64,
    pub angular: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_ANGULAR: f64 = 1e-7;

    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LINEAR, Self::DEFAULT_ANGULAR)
    }
}
