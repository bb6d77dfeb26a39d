//! One-dimensional parameter ranges.

use psurf_core::tolerance::{greater_equal, greater_than, less_equal, less_than, EPSILON};
use psurf_core::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A closed range `[min, max]`.
///
/// With `auto_reset` set, every [`set`](Interval::set) keeps `min <= max` by
/// swapping. Without it, `min > max` is stored as given and expresses an
/// explicit orientation; most operations still assume `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub min: f64,
    pub max: f64,
    pub auto_reset: bool,
}

impl Interval {
    /// Ordered interval; `min` and `max` are swapped if needed.
    pub fn new(min: f64, max: f64) -> Self {
        let mut i = Self {
            min,
            max,
            auto_reset: true,
        };
        i.set(min, max);
        i
    }

    /// Interval that keeps `min > max` when given that way.
    pub fn oriented(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            auto_reset: false,
        }
    }

    pub fn set(&mut self, min: f64, max: f64) -> &mut Self {
        if self.auto_reset && min > max {
            self.min = max;
            self.max = min;
        } else {
            self.min = min;
            self.max = max;
        }
        self
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    pub fn is_empty(&self) -> bool {
        psurf_core::tolerance::is_zero(self.length(), EPSILON)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.contains_eps(value, EPSILON)
    }

    pub fn contains_eps(&self, value: f64, eps: f64) -> bool {
        greater_equal(value, self.min, eps) && less_equal(value, self.max, eps)
    }

    pub fn contains_interval(&self, other: &Self) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Touching endpoints count as overlapping.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(less_than(other.max, self.min, EPSILON) || greater_than(other.min, self.max, EPSILON))
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            auto_reset: self.auto_reset,
        }
    }

    /// Common part of both ranges; disjoint ranges give the empty interval `[0, 0]`.
    pub fn intersection(&self, other: &Self) -> Self {
        if !self.overlaps(other) {
            return Self {
                min: 0.0,
                max: 0.0,
                auto_reset: self.auto_reset,
            };
        }
        Self {
            min: self.min.max(other.min),
            max: self.max.min(other.max).max(self.min.max(other.min)),
            auto_reset: self.auto_reset,
        }
    }

    /// Split at `value` into `[min, value]` and `[value, max]`.
    pub fn split(&self, value: f64) -> Result<(Self, Self)> {
        if !self.contains(value) {
            return Err(KernelError::OutOfRange(format!(
                "split point {value} outside interval [{}, {}]",
                self.min, self.max
            )));
        }
        Ok((
            Self {
                max: value,
                ..*self
            },
            Self {
                min: value,
                ..*self
            },
        ))
    }

    /// Split at `lerp(ratio)`; `ratio` must lie in `[0, 1]`.
    pub fn split_by_ratio(&self, ratio: f64) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(KernelError::OutOfRange(format!(
                "split ratio {ratio} outside [0, 1]"
            )));
        }
        self.split(self.lerp(ratio))
    }

    pub fn expand(&mut self, amount: f64) -> &mut Self {
        self.min -= amount;
        self.max += amount;
        self
    }

    /// Shrink both ends by `amount`; over-contraction collapses to the center.
    pub fn contract(&mut self, amount: f64) -> &mut Self {
        if greater_equal(2.0 * amount, self.length(), EPSILON) {
            let c = self.center();
            self.min = c;
            self.max = c;
        } else {
            self.min += amount;
            self.max -= amount;
        }
        self
    }

    pub fn translate(&mut self, offset: f64) -> &mut Self {
        self.min += offset;
        self.max += offset;
        self
    }

    /// Scale the length by `factor` about the center.
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        let c = self.center();
        let half = self.length() * 0.5 * factor;
        let (min, max) = (c - half, c + half);
        self.set(min, max)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn lerp(&self, t: f64) -> f64 {
        self.min + (self.max - self.min) * t
    }

    /// Inverse of [`lerp`](Interval::lerp); a zero-length interval maps everything to 0.
    pub fn relative_position(&self, value: f64) -> f64 {
        let len = self.length();
        if psurf_core::tolerance::is_zero(len, EPSILON) {
            return 0.0;
        }
        (value - self.min) / len
    }

    pub fn dump(&self) -> serde_json::Value {
        crate::serial::dump(self)
    }

    pub fn load(value: &serde_json::Value) -> Result<Self> {
        crate::serial::load(value)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}
