//! Line series over ascending X values, decimated to one min/max pair per pixel column
//! when zoomed out.
use super::{
    DataError, LegendItem, LineProps, MarkerProps, Plottable, Selectable, check_not_empty,
    check_real, check_same_len, plottable_common, render_range,
};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{LineStyle, MarkerShape, defaults};
use crate::{ColorU8, color, geom};

/// A line series whose X values are sorted
#[derive(Debug, Clone)]
pub struct SignalPlotXY {
    xs: Vec<f64>,
    ys: Vec<f64>,
    min_render_index: usize,
    max_render_index: Option<usize>,
    /// Line and marker color
    pub color: ColorU8,
    /// Line width in pixels
    pub line_width: f32,
    /// Line style
    pub line_style: LineStyle,
    /// Marker shape, drawn when points are far enough apart
    pub marker_shape: MarkerShape,
    /// Marker size in pixels
    pub marker_size: f32,
    /// Legend label
    pub label: Option<String>,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl SignalPlotXY {
    /// A series through `(xs[i], ys[i])`, `xs` ascending
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, DataError> {
        check_same_len("xs and ys", xs.len(), ys.len())?;
        Ok(SignalPlotXY {
            xs,
            ys,
            min_render_index: 0,
            max_render_index: None,
            color: color::BLACK,
            line_width: defaults::LINE_WIDTH,
            line_style: LineStyle::Solid,
            marker_shape: MarkerShape::FilledCircle,
            marker_size: defaults::MARKER_SIZE,
            label: None,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        })
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

    /// X values
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y values
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of points
    pub fn point_count(&self) -> usize {
        self.xs.len()
    }

    /// Replace the data
    pub fn update(&mut self, xs: Vec<f64>, ys: Vec<f64>) -> Result<(), DataError> {
        check_same_len("xs and ys", xs.len(), ys.len())?;
        self.xs = xs;
        self.ys = ys;
        self.min_render_index = 0;
        self.max_render_index = None;
        Ok(())
    }

    /// Only render points from `index` on
    pub fn set_min_render_index(&mut self, index: usize) -> Result<(), DataError> {
        if index >= self.xs.len() {
            return Err(DataError::IndexOutOfRange {
                what: "min render index",
                index,
                len: self.xs.len(),
            });
        }
        self.min_render_index = index;
        Ok(())
    }

    /// Only render points up to `index` included
    pub fn set_max_render_index(&mut self, index: usize) -> Result<(), DataError> {
        if index >= self.xs.len() {
            return Err(DataError::IndexOutOfRange {
                what: "max render index",
                index,
                len: self.xs.len(),
            });
        }
        self.max_render_index = Some(index);
        Ok(())
    }

    fn render_range(&self) -> Option<(usize, usize)> {
        render_range(
            self.xs.len().min(self.ys.len()),
            Some(self.min_render_index),
            self.max_render_index,
        )
    }

    /// Index range `[first, last]` of the rendered points that are in view,
    /// extended by one point on both sides so lines reach the edges
    fn visible_range(&self, dims: &PlotDimensions) -> Option<(usize, usize)> {
        let (from, to) = self.render_range()?;
        let xs = &self.xs[from..=to];
        let first = xs.partition_point(|x| *x < dims.x_min()).saturating_sub(1);
        let last = (xs.partition_point(|x| *x <= dims.x_max()) + 1).min(xs.len()) - 1;
        (first <= last).then_some((from + first, from + last))
    }

    /// Pixels of the visible points, reduced to the lowest and highest point of each
    /// pixel column when there are more points than columns
    pub(crate) fn pixels(&self, dims: &PlotDimensions) -> Vec<geom::Point> {
        let Some((first, last)) = self.visible_range(dims) else {
            return Vec::new();
        };
        let columns = dims.data_width().max(1.0) as usize;
        let count = last - first + 1;
        if count <= columns {
            return (first..=last)
                .map(|i| dims.point(self.xs[i], self.ys[i]))
                .collect();
        }

        let mut points = Vec::with_capacity(2 * columns + 2);
        let mut i = first;
        // the off-view neighbours are kept as they are
        if self.xs[i] < dims.x_min() {
            points.push(dims.point(self.xs[i], self.ys[i]));
            i += 1;
        }
        while i <= last {
            let col = dims.pixel_x(self.xs[i]).floor();
            let mut min = self.ys[i];
            let mut max = self.ys[i];
            let mut j = i + 1;
            while j <= last && dims.pixel_x(self.xs[j]).floor() == col {
                min = min.min(self.ys[j]);
                max = max.max(self.ys[j]);
                j += 1;
            }
            if j - i == 1 {
                points.push(dims.point(self.xs[i], self.ys[i]));
            } else {
                points.push(geom::Point::from_xy(col, dims.pixel_y(min)));
                points.push(geom::Point::from_xy(col, dims.pixel_y(max)));
            }
            i = j;
        }
        points
    }
}

impl Plottable for SignalPlotXY {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        let Some((from, to)) = self.render_range() else {
            return Ok(AxisLimits::NONE);
        };
        let limits = AxisLimits::from_points(&self.xs[from..=to], &self.ys[from..=to]);
        if !limits.is_real() {
            return Err(DataError::NotReal("signal data"));
        }
        Ok(limits)
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let label = self.label.as_deref().unwrap_or_default();
        vec![LegendItem::from_parent(self, label, self.color)]
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        check_not_empty("xs", &self.xs)?;
        check_same_len("xs and ys", self.xs.len(), self.ys.len())?;
        if self.render_range().is_none() {
            return Err(DataError::IndexOutOfRange {
                what: "render range",
                index: self.min_render_index,
                len: self.xs.len(),
            });
        }
        // decimation bisects xs
        if let Some(i) = self.xs.windows(2).position(|w| w[1] < w[0]) {
            log::warn!("signal xs are not ascending at index {}", i + 1);
            return Err(DataError::NotAscending { index: i + 1 });
        }
        if deep {
            check_real("xs", &self.xs)?;
            check_real("ys", &self.ys)?;
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let points = self.pixels(dims);
        if points.len() > 1 {
            if let Some(stroke) = self.line_style.stroke(self.color, self.line_width) {
                canvas.polyline(&points, stroke);
            }
        }
        let spacing = dims.data_width() / points.len().max(1) as f32;
        if spacing > self.marker_size * 2.0 {
            canvas.markers(&points, self.marker_shape, self.marker_size, self.color, 1.0);
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
            line_width: 1.0,
        })
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }
}

impl Selectable for SignalPlotXY {
    fn is_under_mouse(&mut self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> bool {
        let Some((from, to)) = self.render_range() else {
            return false;
        };
        (from..=to).any(|i| (self.xs[i] - x).abs() <= snap_x && (self.ys[i] - y).abs() <= snap_y)
    }
}
