//! Single markers, fixed or draggable.
use super::{
    Cursor, DataError, Draggable, Highlightable, LegendItem, MarkerProps, Plottable, Selectable,
    check_not_empty, check_real, check_real_value, check_same_len, plottable_common,
    scatter::nearest_index,
};
use crate::collection::Signal;
use crate::data::Coordinate;
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{Font, MarkerShape, defaults};
use crate::{ColorU8, color};

/// A marker at `(x, y)`, with an optional text next to it
#[derive(Debug, Clone)]
pub struct MarkerPlot {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Marker shape
    pub marker_shape: MarkerShape,
    /// Marker size in pixels, before highlighting
    pub marker_size: f32,
    /// Outline width of open markers, before highlighting
    pub marker_line_width: f32,
    /// Marker color
    pub color: ColorU8,
    /// Legend label
    pub label: Option<String>,
    /// Text drawn at the marker, following the font alignment and rotation
    pub text: String,
    /// Font of the text
    pub text_font: Font,
    /// Whether the marker is enlarged
    pub is_highlighted: bool,
    /// Size factor when highlighted
    pub highlight_coefficient: f32,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl MarkerPlot {
    /// A marker at `(x, y)`
    pub fn new(x: f64, y: f64) -> Self {
        MarkerPlot {
            x,
            y,
            marker_shape: MarkerShape::FilledCircle,
            marker_size: 10.0,
            marker_line_width: 1.0,
            color: color::BLACK,
            label: None,
            text: String::new(),
            text_font: Font::default(),
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

    /// Set the shape
    pub fn with_shape(mut self, shape: MarkerShape) -> Self {
        self.marker_shape = shape;
        self
    }

    /// Set the text drawn next to the marker
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the legend label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn coef(&self) -> f32 {
        if self.is_highlighted {
            self.highlight_coefficient
        } else {
            1.0
        }
    }
}

impl Plottable for MarkerPlot {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(AxisLimits::new(self.x, self.x, self.y, self.y))
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let label = self.label.as_deref().unwrap_or_default();
        vec![LegendItem::from_parent(self, label, self.color)]
    }

    fn validate(&self, _deep: bool) -> Result<(), DataError> {
        check_real_value("x", self.x)?;
        check_real_value("y", self.y)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let point = dims.point(self.x, self.y);
        let coef = self.coef();
        canvas.marker(
            point,
            self.marker_shape,
            self.marker_size * coef,
            self.color,
            self.marker_line_width * coef,
        );
        if !self.text.is_empty() {
            canvas.text(&self.text, &self.text_font, point.x, point.y);
        }
    }

    fn marker_props(&self) -> Option<MarkerProps> {
        let coef = self.coef();
        Some(MarkerProps {
            color: self.color,
            shape: self.marker_shape,
            size: self.marker_size * coef,
            line_width: self.marker_line_width * coef,
        })
    }

    fn as_highlightable_mut(&mut self) -> Option<&mut dyn Highlightable> {
        Some(self)
    }
}

impl Highlightable for MarkerPlot {
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

/// A marker that follows the mouse when dragged
#[derive(Debug)]
pub struct DraggableMarkerPlot {
    /// The marker
    pub marker: MarkerPlot,
    /// Whether the marker can be dragged
    pub drag_enabled: bool,
    /// Lowest X reachable by dragging
    pub drag_x_limit_min: f64,
    /// Highest X reachable by dragging
    pub drag_x_limit_max: f64,
    /// Lowest Y reachable by dragging
    pub drag_y_limit_min: f64,
    /// Highest Y reachable by dragging
    pub drag_y_limit_max: f64,
    dragged: Signal<Coordinate>,
}

impl DraggableMarkerPlot {
    /// A draggable marker at `(x, y)`
    pub fn new(x: f64, y: f64) -> Self {
        DraggableMarkerPlot {
            marker: MarkerPlot::new(x, y),
            drag_enabled: true,
            drag_x_limit_min: f64::NEG_INFINITY,
            drag_x_limit_max: f64::INFINITY,
            drag_y_limit_min: f64::NEG_INFINITY,
            drag_y_limit_max: f64::INFINITY,
            dragged: Signal::new(),
        }
    }
}

impl Plottable for DraggableMarkerPlot {
    fn is_visible(&self) -> bool {
        self.marker.is_visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.marker.is_visible = visible;
    }

    fn axis_index(&self) -> (usize, usize) {
        self.marker.axis_index()
    }

    fn set_axis_index(&mut self, x_axis_index: usize, y_axis_index: usize) {
        self.marker.set_axis_index(x_axis_index, y_axis_index);
    }

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        self.marker.axis_limits()
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        self.marker.legend_items()
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        self.marker.validate(deep)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        self.marker.render(canvas, dims);
    }

    fn marker_props(&self) -> Option<MarkerProps> {
        self.marker.marker_props()
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        Some(self)
    }

    fn as_highlightable_mut(&mut self) -> Option<&mut dyn Highlightable> {
        Some(&mut self.marker)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl Selectable for DraggableMarkerPlot {
    fn is_under_mouse(&mut self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> bool {
        (self.marker.x - x).abs() <= snap_x && (self.marker.y - y).abs() <= snap_y
    }
}

impl Draggable for DraggableMarkerPlot {
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
        self.marker.x = x.max(self.drag_x_limit_min).min(self.drag_x_limit_max);
        self.marker.y = y.max(self.drag_y_limit_min).min(self.drag_y_limit_max);
        self.dragged.emit(&Coordinate::new(self.marker.x, self.marker.y));
    }

    fn dragged(&mut self) -> &mut Signal<Coordinate> {
        &mut self.dragged
    }
}

/// A marker that can only sit on the points of a series.
/// Dragging moves it to the point nearest to the mouse.
#[derive(Debug)]
pub struct DraggableMarkerPlotInVector {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Index of the point the marker sits on
    pub current_index: usize,
    /// Marker shape
    pub marker_shape: MarkerShape,
    /// Marker size in pixels
    pub marker_size: f32,
    /// Outline width of open markers
    pub marker_line_width: f32,
    /// Marker color
    pub color: ColorU8,
    /// Legend label
    pub label: Option<String>,
    /// Whether the marker can be dragged
    pub drag_enabled: bool,
    /// Lowest X reachable by dragging
    pub drag_x_limit_min: f64,
    /// Highest X reachable by dragging
    pub drag_x_limit_max: f64,
    /// Lowest Y reachable by dragging
    pub drag_y_limit_min: f64,
    /// Highest Y reachable by dragging
    pub drag_y_limit_max: f64,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
    dragged: Signal<Coordinate>,
}

impl DraggableMarkerPlotInVector {
    /// A marker on the first point of `(xs, ys)`
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, DataError> {
        check_not_empty("xs", &xs)?;
        check_same_len("xs and ys", xs.len(), ys.len())?;
        Ok(DraggableMarkerPlotInVector {
            xs,
            ys,
            current_index: 0,
            marker_shape: MarkerShape::FilledCircle,
            marker_size: 10.0,
            marker_line_width: 1.0,
            color: color::BLACK,
            label: None,
            drag_enabled: true,
            drag_x_limit_min: f64::NEG_INFINITY,
            drag_x_limit_max: f64::INFINITY,
            drag_y_limit_min: f64::NEG_INFINITY,
            drag_y_limit_max: f64::INFINITY,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
            dragged: Signal::new(),
        })
    }

    /// X of the points
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y of the points
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of points
    pub fn point_count(&self) -> usize {
        self.xs.len()
    }

    /// Coordinates of the point the marker sits on
    pub fn current(&self) -> Option<Coordinate> {
        let x = self.xs.get(self.current_index)?;
        let y = self.ys.get(self.current_index)?;
        Some(Coordinate::new(*x, *y))
    }
}

impl Plottable for DraggableMarkerPlotInVector {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(AxisLimits::from_points(&self.xs, &self.ys))
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let label = self.label.as_deref().unwrap_or_default();
        vec![LegendItem::from_parent(self, label, self.color)]
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        check_not_empty("xs", &self.xs)?;
        check_not_empty("ys", &self.ys)?;
        check_same_len("xs and ys", self.xs.len(), self.ys.len())?;
        if self.current_index >= self.xs.len() {
            return Err(DataError::IndexOutOfRange {
                what: "current index",
                index: self.current_index,
                len: self.xs.len(),
            });
        }
        if deep {
            check_real("xs", &self.xs)?;
            check_real("ys", &self.ys)?;
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let Some(c) = self.current() else {
            return;
        };
        canvas.marker(
            dims.point(c.x, c.y),
            self.marker_shape,
            self.marker_size,
            self.color,
            self.marker_line_width,
        );
    }

    fn marker_props(&self) -> Option<MarkerProps> {
        Some(MarkerProps {
            color: self.color,
            shape: self.marker_shape,
            size: self.marker_size,
            line_width: self.marker_line_width,
        })
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        Some(self)
    }
}

impl Selectable for DraggableMarkerPlotInVector {
    fn is_under_mouse(&mut self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> bool {
        self.current()
            .is_some_and(|c| (c.x - x).abs() <= snap_x && (c.y - y).abs() <= snap_y)
    }
}

impl Draggable for DraggableMarkerPlotInVector {
    fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    fn drag_cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn drag_to(&mut self, x: f64, y: f64, _fixed_size: bool) {
        if !self.drag_enabled || self.xs.is_empty() {
            return;
        }
        let x = x.max(self.drag_x_limit_min).min(self.drag_x_limit_max);
        let y = y.max(self.drag_y_limit_min).min(self.drag_y_limit_max);
        let last = self.xs.len().min(self.ys.len()).saturating_sub(1);
        if let Some(i) = nearest_index(&self.xs, &self.ys, 0, last, x, y, 1.0) {
            self.current_index = i;
        }
        if let Some(c) = self.current() {
            self.dragged.emit(&c);
        }
    }

    fn dragged(&mut self) -> &mut Signal<Coordinate> {
        &mut self.dragged
    }
}
