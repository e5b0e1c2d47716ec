//! Growable scatter series, for data that arrives point by point.
use std::fmt;

use super::{
    Cursor, DataError, Draggable, LegendItem, LineProps, MarkerProps, Plottable, Selectable,
    check_same_len, plottable_common,
};
use crate::collection::Signal;
use crate::data::{self, Coordinate};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{LineStyle, MarkerShape, defaults};
use crate::{ColorU8, color, geom};

/// Scatter series backed by growable vectors
#[derive(Debug, Clone)]
pub struct ScatterPlotList {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Legend label
    pub label: Option<String>,
    /// Line and marker color
    pub color: ColorU8,
    /// Line width
    pub line_width: f32,
    /// Line style
    pub line_style: LineStyle,
    /// Marker shape
    pub marker_shape: MarkerShape,
    /// Marker size
    pub marker_size: f32,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl Default for ScatterPlotList {
    fn default() -> Self {
        ScatterPlotList {
            xs: Vec::new(),
            ys: Vec::new(),
            label: None,
            color: color::BLACK,
            line_width: defaults::LINE_WIDTH,
            line_style: LineStyle::Solid,
            marker_shape: MarkerShape::FilledCircle,
            marker_size: 3.0,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        }
    }
}

impl ScatterPlotList {
    /// An empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point
    pub fn add(&mut self, x: f64, y: f64) {
        self.xs.push(x);
        self.ys.push(y);
    }

    /// Append several points
    pub fn add_range(&mut self, xs: &[f64], ys: &[f64]) -> Result<(), DataError> {
        check_same_len("xs and ys", xs.len(), ys.len())?;
        self.xs.extend_from_slice(xs);
        self.ys.extend_from_slice(ys);
        Ok(())
    }

    /// Remove every point
    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
    }

    /// Number of points
    pub fn count(&self) -> usize {
        self.xs.len()
    }

    /// X values
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y values
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    fn index_under_mouse(&self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> Option<usize> {
        self.xs
            .iter()
            .zip(&self.ys)
            .position(|(px, py)| (px - x).abs() <= snap_x && (py - y).abs() <= snap_y)
    }
}

impl Plottable for ScatterPlotList {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        let (Some((x_min, x_max)), Some((y_min, y_max))) = (
            data::bounds(self.xs.iter().copied()),
            data::bounds(self.ys.iter().copied()),
        ) else {
            return Ok(AxisLimits::NONE);
        };
        Ok(AxisLimits::new(x_min, x_max, y_min, y_max))
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let label = self.label.as_deref().unwrap_or_default();
        vec![LegendItem::from_parent(self, label, self.color)]
    }

    fn validate(&self, _deep: bool) -> Result<(), DataError> {
        check_same_len("xs and ys", self.xs.len(), self.ys.len())
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let points: Vec<geom::Point> = self
            .xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| dims.point(x, y))
            .collect();
        if points.len() > 1 {
            if let Some(stroke) = self.line_style.stroke(self.color, self.line_width) {
                canvas.polyline(&points, stroke);
            }
        }
        canvas.markers(
            &points,
            self.marker_shape,
            self.marker_size,
            self.color,
            defaults::MARKER_LINE_WIDTH,
        );
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
            line_width: defaults::MARKER_LINE_WIDTH,
        })
    }
}

/// Decides where a dragged point lands: `(xs, ys, index, requested) -> actual`
pub type MovePointFn = Box<dyn Fn(&[f64], &[f64], usize, Coordinate) -> Coordinate>;

/// A growable scatter series whose points can be dragged
pub struct ScatterPlotListDraggable {
    /// The series
    pub list: ScatterPlotList,
    /// Whether points can be dragged
    pub drag_enabled: bool,
    /// Constrains the dragged point. Defaults to the requested coordinate.
    pub move_point_func: MovePointFn,
    index_under_mouse: Option<usize>,
    dragged: Signal<Coordinate>,
}

impl fmt::Debug for ScatterPlotListDraggable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScatterPlotListDraggable")
            .field("list", &self.list)
            .field("drag_enabled", &self.drag_enabled)
            .field("index_under_mouse", &self.index_under_mouse)
            .finish_non_exhaustive()
    }
}

impl Default for ScatterPlotListDraggable {
    fn default() -> Self {
        ScatterPlotListDraggable {
            list: ScatterPlotList::default(),
            drag_enabled: true,
            move_point_func: Box::new(|_: &[f64], _: &[f64], _: usize, requested: Coordinate| {
                requested
            }),
            index_under_mouse: None,
            dragged: Signal::new(),
        }
    }
}

impl ScatterPlotListDraggable {
    /// An empty draggable series
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the function constraining dragged points
    pub fn with_move_point_func<F>(mut self, func: F) -> Self
    where
        F: Fn(&[f64], &[f64], usize, Coordinate) -> Coordinate + 'static,
    {
        self.move_point_func = Box::new(func);
        self
    }

    /// Index of the point found by the last hit test
    pub fn index_under_mouse(&self) -> Option<usize> {
        self.index_under_mouse
    }
}

impl Plottable for ScatterPlotListDraggable {
    fn is_visible(&self) -> bool {
        self.list.is_visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.list.is_visible = visible;
    }

    fn axis_index(&self) -> (usize, usize) {
        self.list.axis_index()
    }

    fn set_axis_index(&mut self, x: usize, y: usize) {
        self.list.set_axis_index(x, y);
    }

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        self.list.axis_limits()
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        self.list.legend_items()
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        self.list.validate(deep)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        self.list.render(canvas, dims);
    }

    fn line_props(&self) -> Option<LineProps> {
        self.list.line_props()
    }

    fn marker_props(&self) -> Option<MarkerProps> {
        self.list.marker_props()
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        Some(self)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl Selectable for ScatterPlotListDraggable {
    fn is_under_mouse(&mut self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> bool {
        self.index_under_mouse = self.list.index_under_mouse(x, y, snap_x, snap_y);
        self.index_under_mouse.is_some()
    }
}

impl Draggable for ScatterPlotListDraggable {
    fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    fn drag_cursor(&self) -> Cursor {
        Cursor::Hand
    }

    fn drag_to(&mut self, x: f64, y: f64, _fixed_size: bool) {
        if !self.drag_enabled {
            return;
        }
        let Some(index) = self.index_under_mouse.filter(|&i| i < self.list.count()) else {
            return;
        };
        let actual = (self.move_point_func)(
            &self.list.xs,
            &self.list.ys,
            index,
            Coordinate::new(x, y),
        );
        self.list.xs[index] = actual.x;
        self.list.ys[index] = actual.y;
        self.dragged.emit(&actual);
    }

    fn dragged(&mut self) -> &mut Signal<Coordinate> {
        &mut self.dragged
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::plottable::tests::record;

    #[test]
    fn empty_has_no_limits() {
        let list = ScatterPlotList::new();
        let l = list.axis_limits().unwrap();
        assert!(!l.has_x() && !l.has_y());
        assert_eq!(record(&list).paths.len(), 0);
    }

    #[test]
    fn add_and_limits() {
        let mut list = ScatterPlotList::new();
        list.add(1.0, 2.0);
        list.add_range(&[3.0, -1.0], &[0.0, 5.0]).unwrap();
        assert_eq!(list.count(), 3);
        assert_eq!(list.axis_limits().unwrap(), AxisLimits::new(-1.0, 3.0, 0.0, 5.0));
        assert!(list.add_range(&[1.0], &[]).is_err());
        assert_eq!(list.count(), 3);
        list.clear();
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn render_line_and_markers() {
        let mut list = ScatterPlotList::new();
        list.add_range(&[1.0, 2.0], &[1.0, 2.0]).unwrap();
        assert_eq!(record(&list).paths.len(), 3);
    }

    #[test]
    fn drag_goes_through_move_func() {
        let mut d = ScatterPlotListDraggable::new().with_move_point_func(|_, _, _, c| {
            Coordinate::new(c.x.round(), c.y)
        });
        d.list.add_range(&[0.0, 5.0], &[0.0, 5.0]).unwrap();
        let moves = Rc::new(Cell::new(0));
        let m = moves.clone();
        d.on_dragged(Box::new(move |_| m.set(m.get() + 1)));

        assert!(!d.is_under_mouse(2.0, 2.0, 0.5, 0.5));
        d.drag_to(1.0, 1.0, false);
        assert_eq!(moves.get(), 0);

        assert!(d.is_under_mouse(5.2, 4.9, 0.5, 0.5));
        assert_eq!(d.index_under_mouse(), Some(1));
        d.drag_to(7.4, 3.5, false);
        assert_eq!(d.list.xs(), &[0.0, 7.0]);
        assert_eq!(d.list.ys(), &[0.0, 3.5]);
        assert_eq!(moves.get(), 1);
        assert_eq!(d.drag_cursor(), Cursor::Hand);
    }
}
