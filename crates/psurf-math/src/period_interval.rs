//! Circular ranges for angular parameters.

use std::f64::consts::TAU;

use psurf_core::tolerance::{equals, greater_equal, less_equal, EPSILON};
use psurf_core::{KernelError, Result};
use serde::{Deserialize, Serialize};

use crate::Interval;

/// An arc on a circle of circumference `period`.
///
/// Endpoints live in `[0, period)`. `min > max` is the wraparound arc
/// `[min, period) ∪ [0, max]`. The full circle is stored as `[0, period]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodInterval {
    pub interval: Interval,
    pub period: f64,
}

impl PeriodInterval {
    /// Arc from `min` counter-clockwise to `max`. Both endpoints are reduced into
    /// `[0, period)`; an input spanning a full period or more becomes the full circle.
    pub fn new(min: f64, max: f64, period: f64) -> Result<Self> {
        if !(period > 0.0 && period.is_finite()) {
            return Err(KernelError::InvalidArgument(format!(
                "period must be positive and finite, got {period}"
            )));
        }
        let mut p = Self {
            interval: Interval::oriented(0.0, period),
            period,
        };
        p.set_angles(min, max);
        Ok(p)
    }

    /// Arc on the unit circle (`period = 2*PI`).
    pub fn angular(min: f64, max: f64) -> Self {
        let mut p = Self::full_circle();
        p.set_angles(min, max);
        p
    }

    pub fn full_circle() -> Self {
        Self {
            interval: Interval::oriented(0.0, TAU),
            period: TAU,
        }
    }

    pub fn min(&self) -> f64 {
        self.interval.min
    }

    pub fn max(&self) -> f64 {
        self.interval.max
    }

    /// Replace both endpoints, normalizing unless the input covers a full period.
    ///
    /// The arc always runs counter-clockwise from `min` to `max`, so `min > max`
    /// within one period is the wraparound arc. A difference of a full period
    /// or more in either direction, such as `(TAU, 0.0)`, is the full circle.
    pub fn set_angles(&mut self, min: f64, max: f64) -> &mut Self {
        if greater_equal((max - min).abs(), self.period, EPSILON) {
            self.interval.set(0.0, self.period);
        } else {
            let (a, b) = (self.normalize_angle(min), self.normalize_angle(max));
            self.interval.set(a, b);
        }
        self
    }

    /// Reduce any angle into `[0, period)`.
    pub fn normalize_angle(&self, angle: f64) -> f64 {
        let mut a = angle % self.period;
        if a < 0.0 {
            a += self.period;
        }
        if a >= self.period || equals(a, self.period, EPSILON) {
            a = 0.0;
        }
        a
    }

    pub fn is_full(&self) -> bool {
        equals(self.min(), 0.0, EPSILON) && equals(self.max(), self.period, EPSILON)
    }

    pub fn is_wrapping(&self) -> bool {
        self.min() > self.max()
    }

    /// Counter-clockwise arc length from `min` to `max`.
    pub fn span(&self) -> f64 {
        if self.is_wrapping() {
            self.period - self.min() + self.max()
        } else {
            self.max() - self.min()
        }
    }

    /// Angle at fraction `t` along the arc, unwrapped (may exceed `period`).
    pub fn lerp_angle(&self, t: f64) -> f64 {
        self.min() + self.span() * t
    }

    /// Counter-clockwise distance from `from` to `to`, in `[0, period)`.
    fn ccw_distance(&self, from: f64, to: f64) -> f64 {
        self.normalize_angle(to - from)
    }

    pub fn contains_angle(&self, angle: f64) -> bool {
        if self.is_full() {
            return true;
        }
        let a = self.normalize_angle(angle);
        if self.is_wrapping() {
            greater_equal(a, self.min(), EPSILON) || less_equal(a, self.max(), EPSILON)
        } else {
            (greater_equal(a, self.min(), EPSILON) && less_equal(a, self.max(), EPSILON))
                // an endpoint at 0 is also reachable as `period`
                || (equals(a, 0.0, EPSILON) && equals(self.max(), self.period, EPSILON))
                || (equals(self.max(), 0.0, EPSILON) && equals(a, self.period, EPSILON))
        }
    }

    /// Whether `other` lies entirely on this arc.
    pub fn contains_arc(&self, other: &Self) -> bool {
        if self.is_full() {
            return true;
        }
        if other.is_full() {
            return false;
        }
        self.contains_angle(other.min())
            && less_equal(
                self.ccw_distance(self.min(), other.min()) + other.span(),
                self.span(),
                EPSILON,
            )
    }

    pub fn overlaps_angle(&self, other: &Self) -> bool {
        self.is_full()
            || other.is_full()
            || self.contains_angle(other.min())
            || self.contains_angle(other.max())
            || other.contains_angle(self.min())
            || other.contains_angle(self.max())
    }

    /// Smallest arc covering both arcs; never more than one full period.
    pub fn union_angle(&self, other: &Self) -> Self {
        if self.contains_arc(other) {
            return *self;
        }
        if other.contains_arc(self) {
            return *other;
        }

        let self_then_other = self.contains_angle(other.min());
        let other_then_self = other.contains_angle(self.min());
        let mut out = *self;
        match (self_then_other, other_then_self) {
            // Overlap at both ends: together they go all the way round.
            (true, true) => {
                out.interval.set(0.0, self.period);
            }
            (true, false) => {
                out.interval.set(self.min(), other.max());
            }
            (false, true) => {
                out.interval.set(other.min(), self.max());
            }
            (false, false) => {
                // Disjoint: close whichever gap is shorter.
                let forward = self.ccw_distance(self.max(), other.min());
                let backward = self.ccw_distance(other.max(), self.min());
                if forward <= backward {
                    out.interval.set(self.min(), other.max());
                } else {
                    out.interval.set(other.min(), self.max());
                }
            }
        }
        out
    }

    /// Grow both ends by `amount`, saturating at the full circle.
    pub fn expand_angle(&mut self, amount: f64) -> &mut Self {
        if self.is_full() {
            return self;
        }
        let (min, max) = (self.min() - amount, self.min() + self.span() + amount);
        self.set_angles(min, max)
    }

    /// Shrink both ends by `amount`; over-contraction collapses to the midpoint.
    pub fn contract_angle(&mut self, amount: f64) -> &mut Self {
        if greater_equal(2.0 * amount, self.span(), EPSILON) {
            let mid = self.lerp_angle(0.5);
            return self.set_angles(mid, mid);
        }
        let (min, max) = (self.min() + amount, self.min() + self.span() - amount);
        self.set_angles(min, max)
    }

    /// Rotate the arc by `delta` radians.
    pub fn rotate_angle(&mut self, delta: f64) -> &mut Self {
        if self.is_full() {
            return self;
        }
        let (min, max) = (self.min() + delta, self.min() + self.span() + delta);
        self.set_angles(min, max)
    }

    pub fn dump(&self) -> serde_json::Value {
        crate::serial::dump(self)
    }

    pub fn load(value: &serde_json::Value) -> Result<Self> {
        crate::serial::load(value)
    }
}

impl Default for PeriodInterval {
    fn default() -> Self {
        Self::full_circle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_normalize_angle() {
        let p = PeriodInterval::full_circle();
        assert_abs_diff_eq!(p.normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(p.normalize_angle(5.0 * PI), PI, epsilon = 1e-12);
        assert_eq!(p.normalize_angle(TAU), 0.0);
        assert_eq!(p.normalize_angle(0.0), 0.0);
    }

    #[test]
    fn test_wraparound_contains() {
        let p = PeriodInterval::angular(3.0 * FRAC_PI_2, FRAC_PI_2);
        assert!(p.is_wrapping());
        assert!(p.contains_angle(0.0));
        assert!(p.contains_angle(TAU));
        assert!(p.contains_angle(-0.1));
        assert!(!p.contains_angle(PI));
        assert_abs_diff_eq!(p.span(), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_full_circle_input() {
        let p = PeriodInterval::angular(0.0, TAU);
        assert!(p.is_full());
        assert!(p.contains_angle(PI));
        assert_abs_diff_eq!(p.span(), TAU, epsilon = 1e-12);
        let q = PeriodInterval::angular(-1.0, 10.0);
        assert!(q.is_full());
    }

    #[test]
    fn test_reversed_input() {
        assert!(PeriodInterval::angular(TAU, 0.0).is_full());
        assert!(PeriodInterval::angular(10.0, -1.0).is_full());

        let p = PeriodInterval::angular(PI, FRAC_PI_2);
        assert!(p.is_wrapping());
        assert_abs_diff_eq!(p.span(), 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_period() {
        assert!(PeriodInterval::new(0.0, 1.0, 0.0).is_err());
        assert!(PeriodInterval::new(0.0, 1.0, f64::NAN).is_err());
        let p = PeriodInterval::new(350.0, 10.0, 360.0).unwrap();
        assert!(p.contains_angle(0.0));
        assert!(!p.contains_angle(180.0));
    }

    #[test]
    fn test_overlaps_across_seam() {
        let a = PeriodInterval::angular(3.0 * FRAC_PI_2, 0.25);
        let b = PeriodInterval::angular(0.1, 1.0);
        let c = PeriodInterval::angular(2.0, 3.0);
        assert!(a.overlaps_angle(&b));
        assert!(b.overlaps_angle(&a));
        assert!(!a.overlaps_angle(&c));
    }

    #[test]
    fn test_union_prefers_wraparound() {
        // Naively [0.5, 6.0] would cover most of the circle; the short way round wraps.
        let a = PeriodInterval::angular(6.0, 6.2);
        let b = PeriodInterval::angular(0.1, 0.5);
        let u = a.union_angle(&b);
        assert!(u.is_wrapping());
        assert_abs_diff_eq!(u.min(), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u.max(), 0.5, epsilon = 1e-12);
        assert!(u.span() < TAU);
    }

    #[test]
    fn test_union_overlapping_and_nested() {
        let a = PeriodInterval::angular(0.0, 2.0);
        let b = PeriodInterval::angular(1.0, 3.0);
        let u = a.union_angle(&b);
        assert_abs_diff_eq!(u.min(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u.max(), 3.0, epsilon = 1e-12);

        let inner = PeriodInterval::angular(0.5, 1.0);
        assert_eq!(a.union_angle(&inner), a);
    }

    #[test]
    fn test_union_covering_both_ends_is_full() {
        let a = PeriodInterval::angular(0.0, 4.0);
        let b = PeriodInterval::angular(3.0, 1.0);
        assert!(a.union_angle(&b).is_full());
    }

    #[test]
    fn test_expand_contract_rotate_renormalize() {
        let mut p = PeriodInterval::angular(0.1, 1.0);
        p.expand_angle(0.2);
        assert!(p.is_wrapping());
        assert_abs_diff_eq!(p.min(), TAU - 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(p.max(), 1.2, epsilon = 1e-12);

        p.contract_angle(0.2);
        assert_abs_diff_eq!(p.min(), 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(p.max(), 1.0, epsilon = 1e-12);

        p.rotate_angle(-0.5);
        assert_abs_diff_eq!(p.min(), TAU - 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(p.max(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p.span(), 0.9, epsilon = 1e-12);

        p.expand_angle(10.0);
        assert!(p.is_full());
    }

    #[test]
    fn test_contract_collapses_to_midpoint() {
        let mut p = PeriodInterval::angular(3.0 * FRAC_PI_2, FRAC_PI_2);
        p.contract_angle(4.0);
        assert_abs_diff_eq!(p.min(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.span(), 0.0, epsilon = 1e-12);
    }
}
