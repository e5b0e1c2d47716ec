//! Axis limits reported by plottables and aggregated by the plot.

/// Data extent of a plottable, in axis units.
///
/// A NaN slot means "no limit" on that side. Plottables that do not want to influence
/// auto-scaling on an axis report NaN for both of its slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    /// Left edge
    pub x_min: f64,
    /// Right edge
    pub x_max: f64,
    /// Bottom edge
    pub y_min: f64,
    /// Top edge
    pub y_max: f64,
}

impl Default for AxisLimits {
    fn default() -> Self {
        AxisLimits::NONE
    }
}

impl AxisLimits {
    /// No limit on any side
    pub const NONE: AxisLimits = AxisLimits {
        x_min: f64::NAN,
        x_max: f64::NAN,
        y_min: f64::NAN,
        y_max: f64::NAN,
    };

    /// Build limits from the four edges
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        AxisLimits {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Limits on the horizontal axis only
    pub const fn x_only(x_min: f64, x_max: f64) -> Self {
        AxisLimits::new(x_min, x_max, f64::NAN, f64::NAN)
    }

    /// Limits on the vertical axis only
    pub const fn y_only(y_min: f64, y_max: f64) -> Self {
        AxisLimits::new(f64::NAN, f64::NAN, y_min, y_max)
    }

    /// Bounding box of the given points, NaN slots for empty inputs
    pub fn from_points(xs: &[f64], ys: &[f64]) -> Self {
        let (x_min, x_max) = crate::data::bounds(xs.iter().copied()).unwrap_or((f64::NAN, f64::NAN));
        let (y_min, y_max) = crate::data::bounds(ys.iter().copied()).unwrap_or((f64::NAN, f64::NAN));
        AxisLimits::new(x_min, x_max, y_min, y_max)
    }

    /// Horizontal extent
    pub fn x_span(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent
    pub fn y_span(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Horizontal center
    pub fn x_center(&self) -> f64 {
        (self.x_min + self.x_max) / 2.0
    }

    /// Vertical center
    pub fn y_center(&self) -> f64 {
        (self.y_min + self.y_max) / 2.0
    }

    /// Whether both horizontal edges are finite
    pub fn has_x(&self) -> bool {
        self.x_min.is_finite() && self.x_max.is_finite()
    }

    /// Whether both vertical edges are finite
    pub fn has_y(&self) -> bool {
        self.y_min.is_finite() && self.y_max.is_finite()
    }

    /// Whether all four edges are finite
    pub fn is_real(&self) -> bool {
        self.has_x() && self.has_y()
    }

    /// Smallest limits containing both self and other. NaN slots of either side are ignored.
    pub fn expand(&self, other: &AxisLimits) -> AxisLimits {
        AxisLimits {
            x_min: merge(self.x_min, other.x_min, f64::min),
            x_max: merge(self.x_max, other.x_max, f64::max),
            y_min: merge(self.y_min, other.y_min, f64::min),
            y_max: merge(self.y_max, other.y_max, f64::max),
        }
    }

    /// Grow each axis by `span * margin / 2` on both sides
    pub fn with_margins(&self, h_margin: f64, v_margin: f64) -> AxisLimits {
        let dx = self.x_span() * h_margin / 2.0;
        let dy = self.y_span() * v_margin / 2.0;
        AxisLimits {
            x_min: self.x_min - dx,
            x_max: self.x_max + dx,
            y_min: self.y_min - dy,
            y_max: self.y_max + dy,
        }
    }

    /// Limits with X and Y exchanged
    pub fn swapped(&self) -> AxisLimits {
        AxisLimits::new(self.y_min, self.y_max, self.x_min, self.x_max)
    }
}

fn merge(a: f64, b: f64, pick: fn(f64, f64) -> f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (true, _) => b,
        (_, true) => a,
        _ => pick(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{Near, assert_near};

    #[test]
    fn expand_ignores_nan() {
        let a = AxisLimits::new(0.0, 1.0, f64::NAN, f64::NAN);
        let b = AxisLimits::new(-2.0, 0.5, 3.0, 4.0);
        let c = a.expand(&b);
        assert_eq!(c, AxisLimits::new(-2.0, 1.0, 3.0, 4.0));

        let d = AxisLimits::NONE.expand(&AxisLimits::NONE);
        assert!(!d.has_x() && !d.has_y());
    }

    #[test]
    fn margins() {
        let l = AxisLimits::new(0.0, 10.0, 0.0, 100.0).with_margins(0.1, 0.2);
        assert_near!(abs, l.x_min, -0.5);
        assert_near!(abs, l.x_max, 10.5);
        assert_near!(abs, l.y_min, -10.0);
        assert_near!(abs, l.y_max, 110.0);
    }

    #[test]
    fn from_points() {
        let l = AxisLimits::from_points(&[1.0, -1.0, 3.0], &[5.0, 2.0]);
        assert_eq!(l, AxisLimits::new(-1.0, 3.0, 2.0, 5.0));
        assert!(!AxisLimits::from_points(&[], &[]).is_real());
    }
}
