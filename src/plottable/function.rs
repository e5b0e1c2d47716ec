//! Plots of `y = f(x)`, sampled at the display resolution.
use std::fmt;

use super::{DataError, Highlightable, LegendItem, LineProps, Plottable, plottable_common};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{LineStyle, defaults};
use crate::{ColorU8, color};

/// Function evaluated by a [`FunctionPlot`]. `None` marks points outside its domain.
pub type Function = Box<dyn Fn(f64) -> Option<f64>>;

/// Half the X range sampled to compute the limits
const LIMITS_HALF_RANGE: f64 = 10.0;
/// X step between the samples used to compute the limits
const LIMITS_STEP: f64 = 0.1;

/// A line following a function over the whole visible X range
pub struct FunctionPlot {
    /// The plotted function
    pub function: Function,
    /// Line width, before highlighting
    pub line_width: f32,
    /// Line style
    pub line_style: LineStyle,
    /// Line color
    pub color: ColorU8,
    /// Legend label
    pub label: Option<String>,
    /// Whether the line is widened
    pub is_highlighted: bool,
    /// Line width factor when highlighted
    pub highlight_coefficient: f32,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl fmt::Debug for FunctionPlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionPlot")
            .field("color", &self.color)
            .field("line_width", &self.line_width)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl FunctionPlot {
    /// Plot `function`
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(f64) -> Option<f64> + 'static,
    {
        FunctionPlot {
            function: Box::new(function),
            line_width: defaults::LINE_WIDTH,
            line_style: LineStyle::Solid,
            color: color::BLACK,
            label: None,
            is_highlighted: false,
            highlight_coefficient: defaults::HIGHLIGHT_COEFFICIENT,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: ColorU8) -> Self {
        self.color = color;
        self
    }

    /// Set the legend label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Line width, highlighting included
    pub fn effective_line_width(&self) -> f32 {
        if self.is_highlighted {
            self.line_width * self.highlight_coefficient
        } else {
            self.line_width
        }
    }

    /// Evaluate the function, `None` outside its domain or for non finite results
    pub fn eval(&self, x: f64) -> Option<f64> {
        (self.function)(x).filter(|y| y.is_finite())
    }

    /// Samples at every pixel column of the data area
    pub(crate) fn samples(&self, dims: &PlotDimensions) -> Vec<(f64, f64)> {
        let columns = dims.data_width().max(0.0) as usize;
        (0..columns)
            .filter_map(|col| {
                let x = dims.x_min() + col as f64 * dims.units_per_px_x();
                match self.eval(x) {
                    Some(y) => Some((x, y)),
                    None => {
                        log::trace!("function undefined at x = {}", x);
                        None
                    }
                }
            })
            .collect()
    }
}

impl Plottable for FunctionPlot {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        let steps = (2.0 * LIMITS_HALF_RANGE / LIMITS_STEP).round() as usize;
        let ys = (0..=steps).filter_map(|i| self.eval(-LIMITS_HALF_RANGE + i as f64 * LIMITS_STEP));
        Ok(match crate::data::finite_bounds(ys) {
            Some((y_min, y_max)) => {
                AxisLimits::new(-LIMITS_HALF_RANGE, LIMITS_HALF_RANGE, y_min, y_max)
            }
            None => AxisLimits::x_only(-LIMITS_HALF_RANGE, LIMITS_HALF_RANGE),
        })
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let label = self.label.as_deref().unwrap_or_default();
        vec![LegendItem::from_parent(self, label, self.color)]
    }

    fn validate(&self, _deep: bool) -> Result<(), DataError> {
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let points: Vec<_> = self
            .samples(dims)
            .into_iter()
            .map(|(x, y)| dims.point(x, y))
            .collect();
        if points.len() < 2 {
            return;
        }
        if let Some(stroke) = self.line_style.stroke(self.color, self.effective_line_width()) {
            canvas.polyline(&points, stroke);
        }
    }

    fn line_props(&self) -> Option<LineProps> {
        Some(LineProps {
            color: self.color,
            width: self.effective_line_width(),
            style: self.line_style,
        })
    }

    fn as_highlightable_mut(&mut self) -> Option<&mut dyn Highlightable> {
        Some(self)
    }
}

impl Highlightable for FunctionPlot {
    fn is_highlighted(&self) -> bool {
        self.is_highlighted
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        self.is_highlighted = highlighted;
    }

    fn highlight_coefficient(&self) -> f32 {
        self.highlight_coefficient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plottable::tests::{dims, record};
    use crate::tests::{Near, assert_near};

    #[test]
    fn limits_sample_minus_ten_to_ten() {
        let f = FunctionPlot::new(|x| Some(x * x));
        let l = f.axis_limits().unwrap();
        assert_eq!((l.x_min, l.x_max), (-10.0, 10.0));
        assert_near!(abs, l.y_min, 0.0, 1e-9);
        assert_near!(abs, l.y_max, 100.0, 1e-9);
    }

    #[test]
    fn limits_without_defined_points() {
        let f = FunctionPlot::new(|_| None);
        let l = f.axis_limits().unwrap();
        assert!(l.has_x());
        assert!(!l.has_y());
    }

    #[test]
    fn one_sample_per_column() {
        let f = FunctionPlot::new(|x| if x < 5.0 { Some(x) } else { Some(f64::NAN) });
        let samples = f.samples(&dims());
        assert_eq!(samples.len(), 50);
        assert_eq!(samples[1], (0.1, 0.1));
        let log = FunctionPlot::new(|x: f64| (x > 0.0).then(|| x.ln()));
        assert_eq!(log.samples(&dims()).len(), 99);
    }

    #[test]
    fn render_single_line() {
        let f = FunctionPlot::new(|x| Some(x / 2.0)).with_color(color::RED);
        let rec = record(&f);
        assert_eq!(rec.paths.len(), 1);
        let (_, fill, stroke) = rec.paths[0];
        assert_eq!(fill, None);
        assert_eq!(stroke, Some(color::RED));
    }

    #[test]
    fn highlight_widens_the_line() {
        let mut f = FunctionPlot::new(|x| Some(x)).with_label("id");
        f.set_highlighted(true);
        assert_eq!(f.line_props().map(|l| l.width), Some(2.0));
        assert_eq!(f.legend_items()[0].label, "id");
    }
}
