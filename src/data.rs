//! Plain data types shared by plottables.
//!
//! Data coordinates are `f64` in axis units. Pixel coordinates are `f32` measured from
//! the top-left corner of the figure.
use std::fmt;

/// A point in data space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinate {
    /// Horizontal position in axis units
    pub x: f64,
    /// Vertical position in axis units
    pub y: f64,
}

impl Coordinate {
    /// Build a coordinate
    pub const fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }

    /// Whether both components are finite
    pub fn is_real(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinate { x, y }
    }
}

/// A point in figure pixel space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pixel {
    /// Pixels from the left of the figure
    pub x: f32,
    /// Pixels from the top of the figure
    pub y: f32,
}

impl Pixel {
    /// Build a pixel position
    pub const fn new(x: f32, y: f32) -> Self {
        Pixel { x, y }
    }
}

impl From<Pixel> for crate::geom::Point {
    fn from(px: Pixel) -> Self {
        crate::geom::Point::from_xy(px.x, px.y)
    }
}

/// Open, high, low and close prices over a time range
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ohlc {
    /// Opening price
    pub open: f64,
    /// Maximum price
    pub high: f64,
    /// Minimum price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Transaction volume over the range
    pub volume: f64,
    /// Start of the range, in days since the axis epoch
    pub datetime: f64,
    /// Length of the range, in days
    pub timespan: f64,
}

impl Ohlc {
    /// Prices over a range starting at `datetime` lasting one day, with no volume
    pub fn new(open: f64, high: f64, low: f64, close: f64, datetime: f64) -> Self {
        Ohlc {
            open,
            high,
            low,
            close,
            volume: 0.0,
            datetime,
            timespan: 1.0,
        }
    }

    /// Set the range length, returning self for chaining
    pub fn with_timespan(self, timespan: f64) -> Self {
        Ohlc { timespan, ..self }
    }

    /// Set the volume, returning self for chaining
    pub fn with_volume(self, volume: f64) -> Self {
        Ohlc { volume, ..self }
    }

    /// Whether prices and volume are all finite
    pub fn is_valid(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl fmt::Display for Ohlc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OHLC: open={}, high={}, low={}, close={}, start={}, span={}, volume={}",
            self.open, self.high, self.low, self.close, self.datetime, self.timespan, self.volume
        )
    }
}

/// Minimum and maximum of the finite values, None if there is none
pub(crate) fn finite_bounds<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Minimum and maximum of all values, propagating NaN. None for an empty input.
pub(crate) fn bounds<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, _)) if min.is_nan() || v.is_nan() => Some((f64::NAN, f64::NAN)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ohlc_validity() {
        let ohlc = Ohlc::new(1.0, 2.0, 0.5, 1.5, 10.0);
        assert!(ohlc.is_valid());
        assert!(!ohlc.with_volume(f64::INFINITY).is_valid());
        assert!(!Ohlc::new(f64::NAN, 2.0, 0.5, 1.5, 10.0).is_valid());
    }

    #[test]
    fn bounds_propagate_nan() {
        assert_eq!(bounds([3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(bounds(Vec::<f64>::new()), None);
        let (min, max) = bounds([1.0, f64::NAN, 2.0]).unwrap();
        assert!(min.is_nan() && max.is_nan());
        assert_eq!(finite_bounds([1.0, f64::NAN, 2.0]), Some((1.0, 2.0)));
    }
}
