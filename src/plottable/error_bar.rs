//! Asymmetric error bars, without the data line.
use super::{
    DataError, LegendItem, LineProps, MarkerProps, Plottable, check_not_empty, check_real,
    check_same_len, plottable_common,
};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{LineStyle, MarkerShape};
use crate::{ColorU8, color, geom};

/// Positive and negative errors along one axis
#[derive(Debug, Clone, PartialEq)]
pub struct Errors {
    /// Error added to the value
    pub positive: Vec<f64>,
    /// Error subtracted from the value
    pub negative: Vec<f64>,
}

impl Errors {
    /// Asymmetric errors
    pub fn new(positive: Vec<f64>, negative: Vec<f64>) -> Self {
        Errors { positive, negative }
    }

    /// The same error on both sides
    pub fn symmetric(errors: Vec<f64>) -> Self {
        Errors {
            positive: errors.clone(),
            negative: errors,
        }
    }

    fn validate(&self, what: &'static str, len: usize, deep: bool) -> Result<(), DataError> {
        check_not_empty(what, &self.positive)?;
        check_not_empty(what, &self.negative)?;
        check_same_len(what, len, self.positive.len())?;
        check_same_len(what, len, self.negative.len())?;
        if deep {
            check_real(what, &self.positive)?;
            check_real(what, &self.negative)?;
        }
        Ok(())
    }

    fn range(&self, i: usize, value: f64) -> (f64, f64) {
        (value - self.negative[i], value + self.positive[i])
    }
}

/// Error bars around `(xs[i], ys[i])`
#[derive(Debug, Clone)]
pub struct ErrorBar {
    /// X of the points
    pub xs: Vec<f64>,
    /// Y of the points
    pub ys: Vec<f64>,
    /// Horizontal errors
    pub x_errors: Option<Errors>,
    /// Vertical errors
    pub y_errors: Option<Errors>,
    /// Half length of the caps in pixels
    pub cap_size: f32,
    /// Line width
    pub line_width: f32,
    /// Line style
    pub line_style: LineStyle,
    /// Line and marker color
    pub color: ColorU8,
    /// Marker drawn on the points
    pub marker_shape: MarkerShape,
    /// Marker size, 0 for no marker
    pub marker_size: f32,
    /// Outline width of open markers
    pub marker_line_width: f32,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl ErrorBar {
    /// Error bars around the given points
    pub fn new(
        xs: Vec<f64>,
        ys: Vec<f64>,
        x_errors: Option<Errors>,
        y_errors: Option<Errors>,
    ) -> Self {
        ErrorBar {
            xs,
            ys,
            x_errors,
            y_errors,
            cap_size: 3.0,
            line_width: 1.0,
            line_style: LineStyle::Solid,
            color: color::GRAY,
            marker_shape: MarkerShape::FilledCircle,
            marker_size: 0.0,
            marker_line_width: 1.0,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        }
    }

    fn render_errors(&self, canvas: &mut Canvas, dims: &PlotDimensions, errors: &Errors, on_x: bool) {
        let Some(stroke) = self.line_style.stroke(self.color, self.line_width) else {
            return;
        };
        let cap = self.cap_size;
        for (i, (x, y)) in self.xs.iter().zip(&self.ys).enumerate() {
            if on_x {
                let (x1, x2) = errors.range(i, *x);
                let (left, right) = (dims.point(x1, *y), dims.point(x2, *y));
                canvas.line(left, right, stroke);
                for p in [left, right] {
                    canvas.line(
                        geom::Point::from_xy(p.x, p.y - cap),
                        geom::Point::from_xy(p.x, p.y + cap),
                        stroke,
                    );
                }
            } else {
                let (y1, y2) = errors.range(i, *y);
                let (low, high) = (dims.point(*x, y1), dims.point(*x, y2));
                canvas.line(low, high, stroke);
                for p in [low, high] {
                    canvas.line(
                        geom::Point::from_xy(p.x - cap, p.y),
                        geom::Point::from_xy(p.x + cap, p.y),
                        stroke,
                    );
                }
            }
        }
    }
}

impl Plottable for ErrorBar {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        let mut limits = AxisLimits::from_points(&self.xs, &self.ys);
        if let Some(errors) = &self.x_errors {
            for (i, x) in self.xs.iter().enumerate() {
                let (x1, x2) = errors.range(i, *x);
                limits.x_min = limits.x_min.min(x1);
                limits.x_max = limits.x_max.max(x2);
            }
        }
        if let Some(errors) = &self.y_errors {
            for (i, y) in self.ys.iter().enumerate() {
                let (y1, y2) = errors.range(i, *y);
                limits.y_min = limits.y_min.min(y1);
                limits.y_max = limits.y_max.max(y2);
            }
        }
        Ok(limits)
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        Vec::new()
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        check_not_empty("xs", &self.xs)?;
        check_not_empty("ys", &self.ys)?;
        check_same_len("xs and ys", self.xs.len(), self.ys.len())?;
        if let Some(errors) = &self.x_errors {
            errors.validate("x errors", self.xs.len(), deep)?;
        }
        if let Some(errors) = &self.y_errors {
            errors.validate("y errors", self.xs.len(), deep)?;
        }
        if deep {
            check_real("xs", &self.xs)?;
            check_real("ys", &self.ys)?;
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        if let Some(errors) = &self.x_errors {
            self.render_errors(canvas, dims, errors, true);
        }
        if let Some(errors) = &self.y_errors {
            self.render_errors(canvas, dims, errors, false);
        }
        if self.marker_size > 0.0 && self.marker_shape != MarkerShape::None {
            let points: Vec<_> = self
                .xs
                .iter()
                .zip(&self.ys)
                .map(|(x, y)| dims.point(*x, *y))
                .collect();
            canvas.markers(
                &points,
                self.marker_shape,
                self.marker_size,
                self.color,
                self.marker_line_width,
            );
        }
    }

    fn line_props(&self) -> Option<LineProps> {
        Some(LineProps {
            color: self.color,
            width: self.line_width,
            style: self.line_style,
        })
    }

    fn marker_props(&self) -> Option<MarkerProps> {
        Some(MarkerProps {
            color: self.color,
            shape: self.marker_shape,
            size: self.marker_size,
            line_width: self.marker_line_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plottable::tests::record;

    fn bars() -> ErrorBar {
        ErrorBar::new(
            vec![1.0, 2.0],
            vec![5.0, 6.0],
            Some(Errors::new(vec![0.5, 0.5], vec![0.25, 1.5])),
            Some(Errors::symmetric(vec![1.0, 2.0])),
        )
    }

    #[test]
    fn limits_include_errors() {
        let l = bars().axis_limits().unwrap();
        assert_eq!(l, AxisLimits::new(0.5, 2.5, 4.0, 8.0));
        let plain = ErrorBar::new(vec![1.0], vec![2.0], None, None);
        assert_eq!(plain.axis_limits().unwrap(), AxisLimits::new(1.0, 1.0, 2.0, 2.0));
    }

    #[test]
    fn validation() {
        assert!(bars().validate(true).is_ok());
        let mut b = bars();
        b.y_errors = Some(Errors::symmetric(vec![1.0]));
        assert!(matches!(
            b.validate(false),
            Err(DataError::LengthMismatch { .. })
        ));
        b = bars();
        b.x_errors = Some(Errors::new(vec![f64::NAN, 0.0], vec![0.0, 0.0]));
        assert!(b.validate(false).is_ok());
        assert_eq!(b.validate(true), Err(DataError::NotReal("x errors")));
    }

    #[test]
    fn render_bars_and_caps() {
        let mut b = bars();
        // three segments per error bar, two bars on two axes
        assert_eq!(record(&b).paths.len(), 12);
        b.marker_size = 4.0;
        assert_eq!(record(&b).paths.len(), 14);
        assert!(b.legend_items().is_empty());
    }
}
