//! Parameter domains of a surface.

use psurf_math::{Interval, PeriodInterval, Vector2};
use serde::{Deserialize, Serialize};

/// The range of one surface parameter: a plain interval or an angular arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamRange {
    Bounded(Interval),
    Periodic(PeriodInterval),
}

impl ParamRange {
    pub fn bounded(min: f64, max: f64) -> Self {
        ParamRange::Bounded(Interval::new(min, max))
    }

    pub fn full_circle() -> Self {
        ParamRange::Periodic(PeriodInterval::full_circle())
    }

    /// First parameter value of the range.
    pub fn start(&self) -> f64 {
        match self {
            ParamRange::Bounded(i) => i.min,
            ParamRange::Periodic(p) => p.min(),
        }
    }

    pub fn span(&self) -> f64 {
        match self {
            ParamRange::Bounded(i) => i.length(),
            ParamRange::Periodic(p) => p.span(),
        }
    }

    /// Last parameter value, unwrapped for arcs crossing the seam.
    pub fn end(&self) -> f64 {
        self.start() + self.span()
    }

    /// Parameter at fraction `t` from start to end.
    pub fn at(&self, t: f64) -> f64 {
        self.start() + self.span() * t
    }

    pub fn contains(&self, value: f64) -> bool {
        match self {
            ParamRange::Bounded(i) => i.contains(value),
            ParamRange::Periodic(p) => p.contains_angle(value),
        }
    }

    /// Nearest parameter inside the range. Arcs clamp to the endpoint that is
    /// closer around the circle.
    pub fn clamp(&self, value: f64) -> f64 {
        match self {
            ParamRange::Bounded(i) => i.clamp(value),
            ParamRange::Periodic(p) => {
                if p.contains_angle(value) {
                    return value;
                }
                let past_max = p.normalize_angle(value - p.max());
                let before_min = p.normalize_angle(p.min() - value);
                if past_max <= before_min {
                    p.max()
                } else {
                    p.min()
                }
            }
        }
    }

    /// Position of `value` as a fraction of the range; a zero-length range gives 0.
    pub fn relative(&self, value: f64) -> f64 {
        match self {
            ParamRange::Bounded(i) => i.relative_position(value),
            ParamRange::Periodic(p) => {
                let span = p.span();
                if psurf_core::tolerance::is_zero(span, psurf_core::EPSILON) {
                    return 0.0;
                }
                let offset = p.normalize_angle(value - p.min());
                // The end of a full circle normalizes back onto its start.
                if p.is_full() && offset == 0.0 && value != p.min() {
                    return 1.0;
                }
                offset / span
            }
        }
    }

    /// The sub-range `[min, max]` of `self`, which acts as the outer bound.
    ///
    /// Bounded endpoints are clamped into `self`. Arc endpoints are
    /// renormalized; a request of a full period or more gives the whole circle.
    pub fn restricted(&self, min: f64, max: f64) -> Self {
        match self {
            ParamRange::Bounded(i) => ParamRange::Bounded(Interval::new(i.clamp(min), i.clamp(max))),
            ParamRange::Periodic(p) => {
                let mut arc = *p;
                arc.set_angles(min, max);
                if !p.is_full() && !p.contains_arc(&arc) {
                    let (a, b) = (self.clamp(arc.min()), self.clamp(arc.max()));
                    arc.set_angles(a, b);
                }
                ParamRange::Periodic(arc)
            }
        }
    }
}

/// The `(u, v)` parameter rectangle of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvDomain {
    pub u: ParamRange,
    pub v: ParamRange,
}

impl UvDomain {
    pub fn new(u: ParamRange, v: ParamRange) -> Self {
        Self { u, v }
    }

    /// Parameter at fractions `(s, t)` of the rectangle.
    pub fn at(&self, s: f64, t: f64) -> Vector2 {
        Vector2::new(self.u.at(s), self.v.at(t))
    }

    pub fn contains(&self, uv: &Vector2) -> bool {
        self.u.contains(uv.x) && self.v.contains(uv.y)
    }

    pub fn clamp(&self, uv: &Vector2) -> Vector2 {
        Vector2::new(self.u.clamp(uv.x), self.v.clamp(uv.y))
    }

    /// Map `uv` into `[0, 1]^2` over this domain.
    pub fn normalized(&self, uv: &Vector2) -> Vector2 {
        Vector2::new(self.u.relative(uv.x), self.v.relative(uv.y))
    }
}
