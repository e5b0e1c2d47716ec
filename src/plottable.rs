//! Plottables: the chart elements drawn in the data area.
//!
//! Every plottable implements [`Plottable`]. Optional capabilities are exposed through the
//! `as_*_mut` downcasts of the trait:
//!  - [`Selectable`] plottables can be found under the mouse,
//!  - [`Draggable`] plottables can be moved with the mouse,
//!  - [`Highlightable`] plottables can be emphasized.
use std::any::Any;
use std::fmt;

use crate::collection::{Signal, SubscriptionId};
use crate::data::Coordinate;
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{Hatch, LineStyle, MarkerShape};
use crate::{ColorU8, color};

pub mod annotation;
pub mod axis_line;
pub mod axis_span;
pub mod bar;
pub mod coxcomb;
pub mod crosshair;
pub mod error_bar;
pub mod function;
pub mod marker;
pub mod pie;
pub mod polygon;
pub mod scale_bar;
pub mod scatter;
pub mod scatter_list;
pub mod signal_xy;
pub mod tooltip;
pub mod vector_field;

pub use annotation::Annotation;
pub use axis_line::{AxisLine, AxisLineVector};
pub use axis_span::AxisSpan;
pub use bar::{BarPlot, Orientation};
pub use coxcomb::{CoxcombAxis, CoxcombPlot};
pub use crosshair::Crosshair;
pub use error_bar::{ErrorBar, Errors};
pub use function::FunctionPlot;
pub use marker::{DraggableMarkerPlot, DraggableMarkerPlotInVector, MarkerPlot};
pub use pie::PiePlot;
pub use polygon::{Polygon, PolygonStyle, Polygons};
pub use scale_bar::ScaleBar;
pub use scatter::{ScatterPlot, ScatterPlotDraggable};
pub use scatter_list::{ScatterPlotList, ScatterPlotListDraggable};
pub use signal_xy::SignalPlotXY;
pub use tooltip::Tooltip;
pub use vector_field::{ArrowAnchor, ArrowStyle, Vector2, VectorField};

/// Errors raised by data validation and data updates
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// A required array is empty
    Empty(&'static str),
    /// Two arrays that must match have different lengths
    LengthMismatch {
        /// Names of the arrays
        what: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },
    /// A value is NaN or infinite
    NotReal(&'static str),
    /// An index does not designate a data point
    IndexOutOfRange {
        /// Name of the index
        what: &'static str,
        /// The index
        index: usize,
        /// Number of data points
        len: usize,
    },
    /// Not enough points to draw the shape
    TooFewPoints {
        /// Required number of points
        required: usize,
        /// Actual number of points
        actual: usize,
    },
    /// A label must not be blank
    EmptyLabel,
    /// Values that must be ascending decrease at `index`
    NotAscending {
        /// First index lower than its predecessor
        index: usize,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Empty(what) => write!(f, "{} must not be empty", what),
            DataError::LengthMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "{} must have the same length (expected {}, got {})",
                what, expected, actual
            ),
            DataError::NotReal(what) => write!(f, "{} must only contain real numbers", what),
            DataError::IndexOutOfRange { what, index, len } => {
                write!(f, "{} {} is out of range for {} points", what, index, len)
            }
            DataError::TooFewPoints { required, actual } => {
                write!(f, "at least {} points are required, got {}", required, actual)
            }
            DataError::EmptyLabel => write!(f, "label must not be empty"),
            DataError::NotAscending { index } => {
                write!(f, "values must be ascending, index {} is not", index)
            }
        }
    }
}

impl std::error::Error for DataError {}

pub(crate) fn check_not_empty(what: &'static str, values: &[f64]) -> Result<(), DataError> {
    if values.is_empty() {
        Err(DataError::Empty(what))
    } else {
        Ok(())
    }
}

pub(crate) fn check_same_len(
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), DataError> {
    if expected != actual {
        Err(DataError::LengthMismatch {
            what,
            expected,
            actual,
        })
    } else {
        Ok(())
    }
}

pub(crate) fn check_real(what: &'static str, values: &[f64]) -> Result<(), DataError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(DataError::NotReal(what))
    }
}

pub(crate) fn check_real_value(what: &'static str, value: f64) -> Result<(), DataError> {
    check_real(what, &[value])
}

/// Line properties of a plottable, used to derive legend items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProps {
    /// Line color
    pub color: ColorU8,
    /// Line width, highlighting included
    pub width: f32,
    /// Line style
    pub style: LineStyle,
}

/// Marker properties of a plottable, used to derive legend items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerProps {
    /// Marker color
    pub color: ColorU8,
    /// Marker shape
    pub shape: MarkerShape,
    /// Marker size, highlighting included
    pub size: f32,
    /// Width of the outline of open markers
    pub line_width: f32,
}

/// A drawable chart element
pub trait Plottable: Any + fmt::Debug {
    /// Whether the plottable is drawn and takes part in automatic scaling
    fn is_visible(&self) -> bool;

    /// Show or hide the plottable
    fn set_visible(&mut self, visible: bool);

    /// Indices of the horizontal and vertical axes the plottable is bound to
    fn axis_index(&self) -> (usize, usize);

    /// Bind the plottable to other axes
    fn set_axis_index(&mut self, x: usize, y: usize);

    /// Data extent. NaN slots don't take part in automatic scaling.
    fn axis_limits(&self) -> Result<AxisLimits, DataError>;

    /// Items to show in the legend
    fn legend_items(&self) -> Vec<LegendItem>;

    /// Check the data can be rendered. `deep` checks every value.
    fn validate(&self, deep: bool) -> Result<(), DataError>;

    /// Draw on the canvas. `dims` maps the axes of [`axis_index`](Plottable::axis_index).
    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions);

    /// Draw what lies outside the data area, such as position labels over the axes.
    /// Called without clipping once every plottable is rendered.
    fn render_overlay(&self, _canvas: &mut Canvas, _dims: &PlotDimensions) {}

    /// Line properties, for plottables drawn with a line
    fn line_props(&self) -> Option<LineProps> {
        None
    }

    /// Marker properties, for plottables drawn with markers
    fn marker_props(&self) -> Option<MarkerProps> {
        None
    }

    /// Whether the plottable fills an area
    fn has_area(&self) -> bool {
        false
    }

    /// The selectable capability
    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        None
    }

    /// The draggable capability
    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        None
    }

    /// The highlightable capability
    fn as_highlightable_mut(&mut self) -> Option<&mut dyn Highlightable> {
        None
    }

    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Upcast for downcasting to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Implements the plottable members backed by the `is_visible`, `x_axis_index`
/// and `y_axis_index` fields, and the `Any` upcasts.
macro_rules! plottable_common {
    () => {
        fn is_visible(&self) -> bool {
            self.is_visible
        }

        fn set_visible(&mut self, visible: bool) {
            self.is_visible = visible;
        }

        fn axis_index(&self) -> (usize, usize) {
            (self.x_axis_index, self.y_axis_index)
        }

        fn set_axis_index(&mut self, x: usize, y: usize) {
            self.x_axis_index = x;
            self.y_axis_index = y;
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}
pub(crate) use plottable_common;

/// A plottable that can be found under the mouse
pub trait Selectable {
    /// Whether the plottable is within the snap distance of the coordinate.
    /// Plottables made of several parts remember which one was hit, for dragging.
    fn is_under_mouse(&mut self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> bool;
}

/// Mouse cursor to show over a draggable plottable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cursor {
    /// Default arrow
    #[default]
    Arrow,
    /// Vertical resize
    NS,
    /// Horizontal resize
    WE,
    /// Hand
    Hand,
    /// Crosshair
    Crosshair,
}

/// A plottable that can be moved with the mouse
pub trait Draggable {
    /// Whether dragging is currently allowed
    fn drag_enabled(&self) -> bool;

    /// Cursor to show while hovering or dragging
    fn drag_cursor(&self) -> Cursor;

    /// Move to the given coordinate. With `fixed_size`, multi-part plottables keep their extent.
    fn drag_to(&mut self, x: f64, y: f64, fixed_size: bool);

    /// The signal emitted after each move
    fn dragged(&mut self) -> &mut Signal<Coordinate>;

    /// Subscribe to moves
    fn on_dragged(&mut self, callback: Box<dyn FnMut(&Coordinate)>) -> SubscriptionId {
        self.dragged().subscribe(callback)
    }
}

/// A plottable that can be emphasized
pub trait Highlightable {
    /// Whether the plottable is emphasized
    fn is_highlighted(&self) -> bool;

    /// Emphasize or not
    fn set_highlighted(&mut self, highlighted: bool);

    /// Factor applied to line widths and marker sizes when emphasized
    fn highlight_coefficient(&self) -> f32;
}

/// A legend entry
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    /// Text of the entry
    pub label: String,
    /// Main color
    pub color: ColorU8,
    /// Line color
    pub line_color: ColorU8,
    /// Line style
    pub line_style: LineStyle,
    /// Line width
    pub line_width: f32,
    /// Marker color
    pub marker_color: ColorU8,
    /// Marker shape
    pub marker_shape: MarkerShape,
    /// Marker size
    pub marker_size: f32,
    /// Marker outline width
    pub marker_line_width: f32,
    /// Hatch color
    pub hatch_color: ColorU8,
    /// Hatch pattern
    pub hatch_style: Hatch,
    /// Border color of rectangle symbols
    pub border_color: ColorU8,
    /// Border width of rectangle symbols
    pub border_width: f32,
    /// Border style of rectangle symbols
    pub border_style: LineStyle,
    /// Whether the plottable the item comes from fills an area
    pub parent_has_area: bool,
    /// Whether the plottable the item comes from is visible
    pub parent_visible: bool,
}

impl Default for LegendItem {
    fn default() -> Self {
        LegendItem {
            label: String::new(),
            color: color::BLACK,
            line_color: color::BLACK,
            line_style: LineStyle::Solid,
            line_width: 0.0,
            marker_color: color::BLACK,
            marker_shape: MarkerShape::None,
            marker_size: 0.0,
            marker_line_width: 0.0,
            hatch_color: color::BLACK,
            hatch_style: Hatch::None,
            border_color: color::TRANSPARENT,
            border_width: 0.0,
            border_style: LineStyle::Solid,
            parent_has_area: false,
            parent_visible: true,
        }
    }
}

impl LegendItem {
    /// An item deriving its line and marker styles from `parent`.
    ///
    /// The line width is capped to 10 and the marker line width to 3.
    /// Without marker, the marker line width is the line width.
    pub fn from_parent(parent: &dyn Plottable, label: &str, color: ColorU8) -> Self {
        let mut item = LegendItem {
            label: label.to_string(),
            color,
            line_color: color,
            marker_color: color,
            parent_has_area: parent.has_area(),
            parent_visible: parent.is_visible(),
            ..Default::default()
        };
        if let Some(line) = parent.line_props() {
            item.line_color = line.color;
            item.line_style = line.style;
            item.line_width = line.width.min(crate::style::defaults::LEGEND_RECT_LINE_WIDTH);
        }
        if let Some(marker) = parent.marker_props() {
            item.marker_color = marker.color;
            item.marker_shape = marker.shape;
            item.marker_size = marker.size;
            item.marker_line_width = marker
                .line_width
                .min(crate::style::defaults::LEGEND_MAX_MARKER_LINE_WIDTH);
        } else {
            item.marker_line_width = item.line_width;
        }
        item
    }

    /// Whether the symbol is a filled rectangle rather than a line
    pub fn show_as_rectangle(&self) -> bool {
        self.line_width >= crate::style::defaults::LEGEND_RECT_LINE_WIDTH || self.parent_has_area
    }

    /// Whether the label has visible characters
    pub fn has_label(&self) -> bool {
        !self.label.trim().is_empty()
    }
}

/// The render index range `[min, max]` of series with `len` points
pub(crate) fn render_range(
    len: usize,
    min: Option<usize>,
    max: Option<usize>,
) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let from = min.unwrap_or(0);
    let to = max.unwrap_or(len - 1).min(len - 1);
    if from > to { None } else { Some((from, to)) }
}
