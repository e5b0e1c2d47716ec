//! Scatter series: points joined by a line, with optional error bars.
use super::{
    DataError, Draggable, Highlightable, LegendItem, LineProps, MarkerProps, Plottable,
    Selectable, check_not_empty, check_real, check_same_len, plottable_common,
};
use crate::collection::Signal;
use crate::data::{self, Coordinate};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{LineStyle, MarkerShape, defaults};
use crate::{ColorU8, color, geom};

/// A series of X/Y points
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    xs: Vec<f64>,
    ys: Vec<f64>,
    x_error: Option<Vec<f64>>,
    y_error: Option<Vec<f64>>,
    min_render_index: usize,
    max_render_index: Option<usize>,
    /// Added to every X value
    pub offset_x: f64,
    /// Added to every Y value
    pub offset_y: f64,
    /// Legend label
    pub label: Option<String>,
    /// Color of the line and error bars
    pub line_color: ColorU8,
    /// Color of the markers
    pub marker_color: ColorU8,
    /// Line style, [`LineStyle::None`] for markers only
    pub line_style: LineStyle,
    /// Line width in pixels
    pub line_width: f32,
    /// Width of the error bars
    pub error_line_width: f32,
    /// Half length of the error bar caps in pixels
    pub error_cap_size: f32,
    /// Marker shape, [`MarkerShape::None`] for a line only
    pub marker_shape: MarkerShape,
    /// Marker size in pixels
    pub marker_size: f32,
    /// Outline width of open markers
    pub marker_line_width: f32,
    /// Join points with horizontal then vertical segments
    pub step_display: bool,
    /// Emphasize the series
    pub is_highlighted: bool,
    /// Factor applied to widths and sizes when highlighted
    pub highlight_coefficient: f32,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl ScatterPlot {
    /// A black series of the given points. Both arrays must have the same length.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        ScatterPlot {
            xs,
            ys,
            x_error: None,
            y_error: None,
            min_render_index: 0,
            max_render_index: None,
            offset_x: 0.0,
            offset_y: 0.0,
            label: None,
            line_color: color::BLACK,
            marker_color: color::BLACK,
            line_style: LineStyle::Solid,
            line_width: defaults::LINE_WIDTH,
            error_line_width: defaults::LINE_WIDTH,
            error_cap_size: defaults::ERROR_CAP_SIZE,
            marker_shape: MarkerShape::FilledCircle,
            marker_size: defaults::MARKER_SIZE,
            marker_line_width: defaults::MARKER_LINE_WIDTH,
            step_display: false,
            is_highlighted: false,
            highlight_coefficient: defaults::HIGHLIGHT_COEFFICIENT,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        }
    }

    /// Set the error arrays
    pub fn with_errors(mut self, x_error: Option<Vec<f64>>, y_error: Option<Vec<f64>>) -> Self {
        self.x_error = x_error;
        self.y_error = y_error;
        self
    }

    /// Set the legend label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the line and marker colors
    pub fn with_color(mut self, color: ColorU8) -> Self {
        self.set_color(color);
        self
    }

    /// Set the line style
    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    /// Set the line width
    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Set the marker shape and size
    pub fn with_marker(mut self, shape: MarkerShape, size: f32) -> Self {
        self.marker_shape = shape;
        self.marker_size = size;
        self
    }

    /// Set both the line and marker colors
    pub fn set_color(&mut self, color: ColorU8) {
        self.line_color = color;
        self.marker_color = color;
    }

    /// X values
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y values
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Horizontal error of each point
    pub fn x_error(&self) -> Option<&[f64]> {
        self.x_error.as_deref()
    }

    /// Vertical error of each point
    pub fn y_error(&self) -> Option<&[f64]> {
        self.y_error.as_deref()
    }

    /// Number of points
    pub fn point_count(&self) -> usize {
        self.ys.len()
    }

    /// Replace all the points
    pub fn update(&mut self, xs: Vec<f64>, ys: Vec<f64>) -> Result<(), DataError> {
        check_same_len("xs and ys", xs.len(), ys.len())?;
        self.xs = xs;
        self.ys = ys;
        self.clamp_render_range();
        Ok(())
    }

    /// Replace the X values, keeping the count
    pub fn update_x(&mut self, xs: Vec<f64>) -> Result<(), DataError> {
        check_same_len("xs and ys", self.ys.len(), xs.len())?;
        self.xs = xs;
        Ok(())
    }

    /// Replace the Y values, keeping the count
    pub fn update_y(&mut self, ys: Vec<f64>) -> Result<(), DataError> {
        check_same_len("xs and ys", self.xs.len(), ys.len())?;
        self.ys = ys;
        Ok(())
    }

    /// First point drawn
    pub fn min_render_index(&self) -> usize {
        self.min_render_index
    }

    /// Last point drawn, None for the last point of the series
    pub fn max_render_index(&self) -> Option<usize> {
        self.max_render_index
    }

    /// Set the first point drawn
    pub fn set_min_render_index(&mut self, index: usize) -> Result<(), DataError> {
        self.check_render_index("min render index", index)?;
        self.min_render_index = index;
        Ok(())
    }

    /// Set the last point drawn
    pub fn set_max_render_index(&mut self, index: Option<usize>) -> Result<(), DataError> {
        if let Some(index) = index {
            self.check_render_index("max render index", index)?;
        }
        self.max_render_index = index;
        Ok(())
    }

    fn check_render_index(&self, what: &'static str, index: usize) -> Result<(), DataError> {
        if index >= self.point_count() {
            Err(DataError::IndexOutOfRange {
                what,
                index,
                len: self.point_count(),
            })
        } else {
            Ok(())
        }
    }

    fn clamp_render_range(&mut self) {
        let len = self.point_count();
        if self.max_render_index.is_some_and(|i| i >= len) {
            self.max_render_index = None;
        }
        if self.min_render_index >= len {
            self.min_render_index = 0;
        }
    }

    /// Inclusive range of the drawn points
    pub(crate) fn render_range(&self) -> Option<(usize, usize)> {
        if self.xs.len() != self.ys.len() {
            return None;
        }
        super::render_range(
            self.point_count(),
            Some(self.min_render_index),
            self.max_render_index,
        )
    }

    fn coef(&self) -> f32 {
        if self.is_highlighted {
            self.highlight_coefficient
        } else {
            1.0
        }
    }

    /// Rendered point `i`, offsets included
    fn point(&self, i: usize) -> (f64, f64) {
        (self.xs[i] + self.offset_x, self.ys[i] + self.offset_y)
    }

    /// The drawn point closest to `x` horizontally, as `(x, y, index)`
    pub fn point_nearest_x(&self, x: f64) -> Option<(f64, f64, usize)> {
        let (from, to) = self.render_range()?;
        let i = nearest_by(from, to, |i| (self.xs[i] - x).abs())?;
        Some((self.xs[i], self.ys[i], i))
    }

    /// The drawn point closest to `y` vertically, as `(x, y, index)`
    pub fn point_nearest_y(&self, y: f64) -> Option<(f64, f64, usize)> {
        let (from, to) = self.render_range()?;
        let i = nearest_by(from, to, |i| (self.ys[i] - y).abs())?;
        Some((self.xs[i], self.ys[i], i))
    }

    /// The drawn point closest to `(x, y)`, as `(x, y, index)`.
    /// `xy_ratio` is the ratio of the X and Y scales, applied to X distances.
    pub fn point_nearest(&self, x: f64, y: f64, xy_ratio: f64) -> Option<(f64, f64, usize)> {
        let (from, to) = self.render_range()?;
        let i = nearest_index(&self.xs, &self.ys, from, to, x, y, xy_ratio)?;
        Some((self.xs[i], self.ys[i], i))
    }

    /// Index of the first drawn point inside the snap box
    fn index_under_mouse(&self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> Option<usize> {
        let (from, to) = self.render_range()?;
        (from..=to).find(|&i| {
            let (px, py) = self.point(i);
            (px - x).abs() <= snap_x && (py - y).abs() <= snap_y
        })
    }

    fn render_error_bars(&self, canvas: &mut Canvas, dims: &PlotDimensions, from: usize, to: usize) {
        let width = self.error_line_width * self.coef();
        let Some(stroke) = LineStyle::Solid.stroke(self.line_color, width) else {
            return;
        };
        let cap = self.error_cap_size;
        if let Some(y_error) = &self.y_error {
            for (i, err) in (from..=to).zip(y_error.iter().skip(from)) {
                let (x, y) = self.point(i);
                let px = dims.pixel_x(x);
                let top = dims.pixel_y(y + err);
                let bot = dims.pixel_y(y - err);
                canvas.line(geom::Point::from_xy(px, bot), geom::Point::from_xy(px, top), stroke);
                for py in [bot, top] {
                    canvas.line(
                        geom::Point::from_xy(px - cap, py),
                        geom::Point::from_xy(px + cap, py),
                        stroke,
                    );
                }
            }
        }
        if let Some(x_error) = &self.x_error {
            for (i, err) in (from..=to).zip(x_error.iter().skip(from)) {
                let (x, y) = self.point(i);
                let py = dims.pixel_y(y);
                let left = dims.pixel_x(x - err);
                let right = dims.pixel_x(x + err);
                canvas.line(geom::Point::from_xy(left, py), geom::Point::from_xy(right, py), stroke);
                for px in [left, right] {
                    canvas.line(
                        geom::Point::from_xy(px, py - cap),
                        geom::Point::from_xy(px, py + cap),
                        stroke,
                    );
                }
            }
        }
    }
}

/// Index in `from..=to` minimizing `dist`. The first minimum wins.
fn nearest_by<F>(from: usize, to: usize, dist: F) -> Option<usize>
where
    F: Fn(usize) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for i in from..=to {
        let d = dist(i);
        if d.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Index in `from..=to` of the point closest to `(x, y)`, X distances weighted by `xy_ratio`
pub(crate) fn nearest_index(
    xs: &[f64],
    ys: &[f64],
    from: usize,
    to: usize,
    x: f64,
    y: f64,
    xy_ratio: f64,
) -> Option<usize> {
    let ratio2 = xy_ratio * xy_ratio;
    nearest_by(from, to, |i| {
        let dx = xs[i] - x;
        let dy = ys[i] - y;
        dx * dx * ratio2 + dy * dy
    })
}

/// Points of a step line through `points`: each point is joined to the next
/// by a horizontal then a vertical segment
pub(crate) fn step_points(points: &[geom::Point]) -> Vec<geom::Point> {
    let mut steps = Vec::with_capacity(points.len() * 2);
    for w in points.windows(2) {
        steps.push(w[0]);
        steps.push(geom::Point::from_xy(w[1].x, w[0].y));
    }
    if let Some(last) = points.last() {
        steps.push(*last);
    }
    steps
}

impl Plottable for ScatterPlot {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        let Some((from, to)) = self.render_range() else {
            return Ok(AxisLimits::NONE);
        };
        // errors missing past the end of a short error array count as zero
        let err = |e: &Option<Vec<f64>>, i: usize| {
            e.as_ref().and_then(|e| e.get(i)).copied().unwrap_or(0.0)
        };
        let x_err = |i: usize| err(&self.x_error, i);
        let y_err = |i: usize| err(&self.y_error, i);
        let xs = (from..=to).flat_map(|i| [self.xs[i] - x_err(i), self.xs[i] + x_err(i)]);
        let ys = (from..=to).flat_map(|i| [self.ys[i] - y_err(i), self.ys[i] + y_err(i)]);
        let (x_min, x_max) = data::bounds(xs).unwrap_or((f64::NAN, f64::NAN));
        let (y_min, y_max) = data::bounds(ys).unwrap_or((f64::NAN, f64::NAN));
        let limits = AxisLimits::new(
            x_min + self.offset_x,
            x_max + self.offset_x,
            y_min + self.offset_y,
            y_max + self.offset_y,
        );
        if limits.is_real() {
            Ok(limits)
        } else {
            Err(DataError::NotReal("axis limits"))
        }
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let label = self.label.as_deref().unwrap_or_default();
        vec![LegendItem::from_parent(self, label, self.line_color)]
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        check_not_empty("xs", &self.xs)?;
        check_not_empty("ys", &self.ys)?;
        check_same_len("xs and ys", self.xs.len(), self.ys.len())?;
        if let Some(max) = self.max_render_index {
            self.check_render_index("max render index", max)?;
        }
        self.check_render_index("min render index", self.min_render_index)?;
        if self.max_render_index.is_some_and(|max| self.min_render_index > max) {
            return Err(DataError::IndexOutOfRange {
                what: "min render index",
                index: self.min_render_index,
                len: self.point_count(),
            });
        }
        if let Some(e) = &self.x_error {
            check_same_len("xs and x errors", self.xs.len(), e.len())?;
        }
        if let Some(e) = &self.y_error {
            check_same_len("ys and y errors", self.ys.len(), e.len())?;
        }
        if deep {
            check_real("xs", &self.xs)?;
            check_real("ys", &self.ys)?;
            if let Some(e) = &self.x_error {
                check_real("x errors", e)?;
            }
            if let Some(e) = &self.y_error {
                check_real("y errors", e)?;
            }
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let Some((from, to)) = self.render_range() else {
            return;
        };
        let coef = self.coef();
        let points: Vec<geom::Point> = (from..=to)
            .map(|i| {
                let (x, y) = self.point(i);
                dims.point(x, y)
            })
            .collect();

        self.render_error_bars(canvas, dims, from, to);

        if points.len() > 1 {
            if let Some(stroke) = self.line_style.stroke(self.line_color, self.line_width * coef) {
                if self.step_display {
                    canvas.polyline(&step_points(&points), stroke);
                } else {
                    canvas.polyline(&points, stroke);
                }
            }
        }

        canvas.markers(
            &points,
            self.marker_shape,
            self.marker_size * coef,
            self.marker_color,
            self.marker_line_width * coef,
        );
    }

    fn line_props(&self) -> Option<LineProps> {
        Some(LineProps {
            color: self.line_color,
            width: self.line_width * self.coef(),
            style: self.line_style,
        })
    }

    fn marker_props(&self) -> Option<MarkerProps> {
        Some(MarkerProps {
            color: self.marker_color,
            shape: self.marker_shape,
            size: self.marker_size * self.coef(),
            line_width: self.marker_line_width * self.coef(),
        })
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }

    fn as_highlightable_mut(&mut self) -> Option<&mut dyn Highlightable> {
        Some(self)
    }
}

impl Selectable for ScatterPlot {
    fn is_under_mouse(&mut self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> bool {
        self.index_under_mouse(x, y, snap_x, snap_y).is_some()
    }
}

impl Highlightable for ScatterPlot {
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

/// A scatter series whose points can be dragged one at a time
#[derive(Debug)]
pub struct ScatterPlotDraggable {
    /// The series
    pub scatter: ScatterPlot,
    /// Index of the point grabbed last
    pub current_index: usize,
    /// Whether points can be dragged at all
    pub drag_enabled: bool,
    /// Whether dragging moves points horizontally
    pub drag_enabled_x: bool,
    /// Whether dragging moves points vertically
    pub drag_enabled_y: bool,
    /// Lowest X a point can be dragged to
    pub drag_x_limit_min: f64,
    /// Highest X a point can be dragged to
    pub drag_x_limit_max: f64,
    /// Lowest Y a point can be dragged to
    pub drag_y_limit_min: f64,
    /// Highest Y a point can be dragged to
    pub drag_y_limit_max: f64,
    dragged: Signal<Coordinate>,
}

impl ScatterPlotDraggable {
    /// Wrap a series. Dragging starts disabled.
    pub fn new(scatter: ScatterPlot) -> Self {
        ScatterPlotDraggable {
            scatter,
            current_index: 0,
            drag_enabled: false,
            drag_enabled_x: true,
            drag_enabled_y: true,
            drag_x_limit_min: f64::NEG_INFINITY,
            drag_x_limit_max: f64::INFINITY,
            drag_y_limit_min: f64::NEG_INFINITY,
            drag_y_limit_max: f64::INFINITY,
            dragged: Signal::new(),
        }
    }

    /// Enable or disable dragging
    pub fn with_drag_enabled(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }
}

impl Plottable for ScatterPlotDraggable {
    fn is_visible(&self) -> bool {
        self.scatter.is_visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.scatter.is_visible = visible;
    }

    fn axis_index(&self) -> (usize, usize) {
        self.scatter.axis_index()
    }

    fn set_axis_index(&mut self, x: usize, y: usize) {
        self.scatter.set_axis_index(x, y);
    }

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        self.scatter.axis_limits()
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        self.scatter.legend_items()
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        self.scatter.validate(deep)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        self.scatter.render(canvas, dims);
    }

    fn line_props(&self) -> Option<LineProps> {
        self.scatter.line_props()
    }

    fn marker_props(&self) -> Option<MarkerProps> {
        self.scatter.marker_props()
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        Some(self)
    }

    fn as_highlightable_mut(&mut self) -> Option<&mut dyn Highlightable> {
        Some(&mut self.scatter)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl Selectable for ScatterPlotDraggable {
    fn is_under_mouse(&mut self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> bool {
        match self.scatter.index_under_mouse(x, y, snap_x, snap_y) {
            Some(i) => {
                self.current_index = i;
                true
            }
            None => false,
        }
    }
}

impl Draggable for ScatterPlotDraggable {
    fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    fn drag_cursor(&self) -> super::Cursor {
        super::Cursor::Crosshair
    }

    fn drag_to(&mut self, x: f64, y: f64, _fixed_size: bool) {
        if !self.drag_enabled || self.current_index >= self.scatter.point_count() {
            return;
        }
        let x = x.max(self.drag_x_limit_min).min(self.drag_x_limit_max);
        let y = y.max(self.drag_y_limit_min).min(self.drag_y_limit_max);
        let i = self.current_index;
        if self.drag_enabled_x {
            self.scatter.xs[i] = x - self.scatter.offset_x;
        }
        if self.drag_enabled_y {
            self.scatter.ys[i] = y - self.scatter.offset_y;
        }
        self.dragged.emit(&Coordinate::new(x, y));
    }

    fn dragged(&mut self) -> &mut Signal<Coordinate> {
        &mut self.dragged
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::plottable::tests::record;
    use crate::tests::{Near, assert_near};

    fn scatter() -> ScatterPlot {
        ScatterPlot::new(vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 3.0, 8.0, 1.0])
    }

    #[test]
    fn limits_include_errors_and_offsets() {
        let mut s = scatter().with_errors(None, Some(vec![1.0, 1.0, 2.0, 0.5]));
        s.offset_x = 10.0;
        let l = s.axis_limits().unwrap();
        assert_near!(abs, l.x_min, 11.0);
        assert_near!(abs, l.x_max, 14.0);
        assert_near!(abs, l.y_min, 0.5);
        assert_near!(abs, l.y_max, 10.0);
    }

    #[test]
    fn limits_follow_render_range() {
        let mut s = scatter();
        s.set_min_render_index(1).unwrap();
        s.set_max_render_index(Some(2)).unwrap();
        let l = s.axis_limits().unwrap();
        assert_eq!((l.x_min, l.x_max, l.y_min, l.y_max), (2.0, 3.0, 3.0, 8.0));
    }

    #[test]
    fn limits_reject_nan() {
        let s = ScatterPlot::new(vec![1.0, f64::NAN], vec![1.0, 2.0]);
        assert_eq!(s.axis_limits(), Err(DataError::NotReal("axis limits")));
    }

    #[test]
    fn update_rejects_mismatch() {
        let mut s = scatter();
        assert!(matches!(
            s.update(vec![1.0], vec![1.0, 2.0]),
            Err(DataError::LengthMismatch { .. })
        ));
        assert!(s.update_y(vec![0.0; 3]).is_err());
        assert!(s.update_y(vec![0.0; 4]).is_ok());
    }

    #[test]
    fn render_index_setters_check_range() {
        let mut s = scatter();
        assert!(s.set_max_render_index(Some(4)).is_err());
        assert!(s.set_min_render_index(3).is_ok());
        s.update(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        assert_eq!(s.min_render_index(), 0);
    }

    #[test]
    fn validation() {
        assert!(scatter().validate(true).is_ok());
        let s = ScatterPlot::new(vec![], vec![]);
        assert_eq!(s.validate(false), Err(DataError::Empty("xs")));
        let s = scatter().with_errors(Some(vec![1.0]), None);
        assert!(matches!(s.validate(false), Err(DataError::LengthMismatch { .. })));
        let s = ScatterPlot::new(vec![1.0, 2.0], vec![1.0, f64::INFINITY]);
        assert!(s.validate(false).is_ok());
        assert_eq!(s.validate(true), Err(DataError::NotReal("ys")));
    }

    #[test]
    fn short_error_arrays_do_not_panic() {
        let s = scatter().with_errors(Some(vec![1.0]), Some(vec![0.5, 0.5]));
        assert!(s.validate(false).is_err());
        let l = s.axis_limits().unwrap();
        assert_near!(abs, l.x_min, 0.0);
        assert_near!(abs, l.x_max, 4.0);
        assert_near!(abs, l.y_min, 1.0);
        assert_near!(abs, l.y_max, 8.0);
        let rec = record(&s);
        assert!(!rec.paths.is_empty());
    }

    #[test]
    fn nearest_starts_at_render_range() {
        let mut s = ScatterPlot::new(vec![0.0, 5.0, 6.0], vec![0.0, 5.0, 6.0]);
        s.set_min_render_index(1).unwrap();
        assert_eq!(s.point_nearest(0.0, 0.0, 1.0), Some((5.0, 5.0, 1)));
        assert_eq!(s.point_nearest_x(5.9), Some((6.0, 6.0, 2)));
        assert_eq!(s.point_nearest_y(-3.0), Some((5.0, 5.0, 1)));
    }

    #[test]
    fn nearest_matches_brute_force() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let xs: Vec<f64> = (0..200).map(|_| rng.random_range(-50.0..50.0)).collect();
        let ys: Vec<f64> = (0..200).map(|_| rng.random_range(-5.0..5.0)).collect();
        let s = ScatterPlot::new(xs.clone(), ys.clone());
        for _ in 0..20 {
            let (x, y) = (rng.random_range(-50.0..50.0), rng.random_range(-5.0..5.0));
            let ratio = 0.1;
            let dist = |i: usize| ((xs[i] - x) * ratio).powi(2) + (ys[i] - y).powi(2);
            let (_, _, found) = s.point_nearest(x, y, ratio).unwrap();
            let best = (0..xs.len()).map(dist).fold(f64::INFINITY, f64::min);
            assert_near!(abs, dist(found), best);
        }
    }

    #[test]
    fn step_points_count() {
        let pts = [
            geom::Point::from_xy(0.0, 0.0),
            geom::Point::from_xy(1.0, 1.0),
            geom::Point::from_xy(2.0, 0.0),
        ];
        let steps = step_points(&pts);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[1], geom::Point::from_xy(1.0, 0.0));
        assert_eq!(steps[3], geom::Point::from_xy(2.0, 1.0));
    }

    #[test]
    fn render_line_then_markers() {
        let s = scatter().with_color(color::BLUE);
        let rec = record(&s);
        // one line, four markers
        assert_eq!(rec.paths.len(), 5);
        assert_eq!(rec.paths[0].2, Some(color::BLUE));
        let (marker, ..) = rec.paths[1];
        assert_near!(abs, marker.center_x(), 10.0, 1e-3);
        assert_near!(abs, marker.center_y(), 50.0, 1e-3);
    }

    #[test]
    fn render_highlighted_markers_grow() {
        let mut s = scatter().with_line_style(LineStyle::None);
        s.set_highlighted(true);
        let rec = record(&s);
        assert_eq!(rec.paths.len(), 4);
        assert_near!(abs, rec.paths[0].0.width(), 10.0, 1e-3);
    }

    #[test]
    fn hit_test_uses_snap_box() {
        let mut s = scatter();
        assert!(s.is_under_mouse(2.05, 3.1, 0.1, 0.2));
        assert!(!s.is_under_mouse(2.05, 3.3, 0.1, 0.2));
    }

    #[test]
    fn drag_clamps_each_axis_to_its_limits() {
        let mut d = ScatterPlotDraggable::new(scatter()).with_drag_enabled(true);
        d.drag_x_limit_max = 100.0;
        d.drag_y_limit_min = 2.0;
        assert!(d.is_under_mouse(3.0, 8.0, 0.1, 0.1));
        assert_eq!(d.current_index, 2);
        d.drag_to(50.0, -5.0, false);
        assert_eq!(d.scatter.xs()[2], 50.0);
        assert_eq!(d.scatter.ys()[2], 2.0);
    }

    #[test]
    fn drag_disabled_by_default() {
        let mut d = ScatterPlotDraggable::new(scatter());
        d.drag_to(50.0, 50.0, false);
        assert_eq!(d.scatter.xs()[0], 1.0);
        assert_eq!(d.drag_cursor(), crate::plottable::Cursor::Crosshair);
    }
}
