//! Shaded band between two X (or two Y) positions.
use super::{
    Cursor, DataError, Draggable, LegendItem, Plottable, Selectable, check_real_value,
    plottable_common,
};
use crate::collection::Signal;
use crate::data::Coordinate;
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::render::Paint;
use crate::style::{Hatch, LineStyle, defaults};
use crate::{ColorU8, color, geom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanEdge {
    Edge1,
    Edge2,
}

/// A band spanning the data area between two positions
#[derive(Debug)]
pub struct AxisSpan {
    horizontal: bool,
    /// First edge
    pub position1: f64,
    /// Second edge, on either side of the first one
    pub position2: f64,
    /// Fill color
    pub color: ColorU8,
    /// Border color
    pub border_color: ColorU8,
    /// Border width
    pub border_line_width: f32,
    /// Border style
    pub border_line_style: LineStyle,
    /// Hatch color
    pub hatch_color: ColorU8,
    /// Hatch pattern drawn over the fill color
    pub hatch_style: Hatch,
    /// Exclude the span from automatic scaling
    pub ignore_axis_auto: bool,
    /// Legend label
    pub label: Option<String>,
    /// Whether edges can be dragged
    pub drag_enabled: bool,
    /// Whether dragging an edge moves the whole span
    pub drag_fixed_size: bool,
    /// Lowest position reachable by dragging
    pub drag_limit_min: f64,
    /// Highest position reachable by dragging
    pub drag_limit_max: f64,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
    edge_under_mouse: Option<SpanEdge>,
    dragged: Signal<Coordinate>,
}

impl AxisSpan {
    fn new(horizontal: bool, position1: f64, position2: f64) -> Self {
        AxisSpan {
            horizontal,
            position1,
            position2,
            color: defaults::SPAN_COLOR,
            border_color: color::TRANSPARENT,
            border_line_width: 0.0,
            border_line_style: LineStyle::None,
            hatch_color: color::TRANSPARENT,
            hatch_style: Hatch::None,
            ignore_axis_auto: false,
            label: None,
            drag_enabled: false,
            drag_fixed_size: false,
            drag_limit_min: f64::NEG_INFINITY,
            drag_limit_max: f64::INFINITY,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
            edge_under_mouse: None,
            dragged: Signal::new(),
        }
    }

    /// A band between `x1` and `x2`, spanning the data area vertically
    pub fn horizontal(x1: f64, x2: f64) -> Self {
        Self::new(true, x1, x2)
    }

    /// A band between `y1` and `y2`, spanning the data area horizontally
    pub fn vertical(y1: f64, y2: f64) -> Self {
        Self::new(false, y1, y2)
    }

    /// Whether the span extends along X
    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    /// Set the fill color
    pub fn with_color(mut self, color: ColorU8) -> Self {
        self.color = color;
        self
    }

    /// Set the legend label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Enable or disable dragging
    pub fn with_drag_enabled(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    /// Lower edge
    pub fn min(&self) -> f64 {
        self.position1.min(self.position2)
    }

    /// Upper edge
    pub fn max(&self) -> f64 {
        self.position1.max(self.position2)
    }

    /// Pixel rectangle of the span clipped to the data area, one pixel larger
    /// to cover the last row and column
    fn clipped_rect(&self, dims: &PlotDimensions) -> geom::Rect {
        let data = dims.data_rect();
        let px = |x: f64| dims.pixel_x(x.min(dims.x_max()).max(dims.x_min()));
        let py = |y: f64| dims.pixel_y(y.min(dims.y_max()).max(dims.y_min()));
        let (left, right, top, bottom) = if self.horizontal {
            (px(self.min()), px(self.max()), data.top(), data.bottom())
        } else {
            (data.left(), data.right(), py(self.max()), py(self.min()))
        };
        geom::Rect::from_xywh(left, top, right - left + 1.0, bottom - top + 1.0)
    }
}

impl Plottable for AxisSpan {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(match (self.ignore_axis_auto, self.horizontal) {
            (true, _) => AxisLimits::NONE,
            (false, true) => AxisLimits::x_only(self.min(), self.max()),
            (false, false) => AxisLimits::y_only(self.min(), self.max()),
        })
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let label = self.label.as_deref().unwrap_or_default();
        let mut item = LegendItem::from_parent(self, label, self.color);
        item.border_width = self.border_line_width.min(3.0);
        item.border_color = self.border_color;
        item.border_style = self.border_line_style;
        item.hatch_color = self.hatch_color;
        item.hatch_style = self.hatch_style;
        vec![item]
    }

    fn validate(&self, _deep: bool) -> Result<(), DataError> {
        check_real_value("position1", self.position1)?;
        check_real_value("position2", self.position2)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let rect = self.clipped_rect(dims);
        let fill = Paint::hatched(self.color, self.hatch_color, self.hatch_style);
        let stroke = if self.border_line_width > 0.0 {
            self.border_line_style
                .stroke(self.border_color, self.border_line_width)
        } else {
            None
        };
        canvas.rect(rect, Some(fill), stroke);
    }

    fn has_area(&self) -> bool {
        true
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        Some(self)
    }
}

impl Selectable for AxisSpan {
    fn is_under_mouse(&mut self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> bool {
        let (coord, snap) = if self.horizontal { (x, snap_x) } else { (y, snap_y) };
        self.edge_under_mouse = if (self.position1 - coord).abs() <= snap {
            Some(SpanEdge::Edge1)
        } else if (self.position2 - coord).abs() <= snap {
            Some(SpanEdge::Edge2)
        } else {
            None
        };
        self.edge_under_mouse.is_some()
    }
}

impl Draggable for AxisSpan {
    fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    fn drag_cursor(&self) -> Cursor {
        if self.horizontal { Cursor::WE } else { Cursor::NS }
    }

    fn drag_to(&mut self, x: f64, y: f64, fixed_size: bool) {
        if !self.drag_enabled {
            return;
        }
        let Some(edge) = self.edge_under_mouse else {
            log::debug!("span dragged without a selected edge");
            return;
        };
        let requested = if self.horizontal { x } else { y };
        let coord = requested.max(self.drag_limit_min).min(self.drag_limit_max);
        let size = self.position2 - self.position1;
        let fixed = fixed_size || self.drag_fixed_size;
        match edge {
            SpanEdge::Edge1 => {
                self.position1 = coord;
                if fixed {
                    self.position2 = coord + size;
                }
            }
            SpanEdge::Edge2 => {
                self.position2 = coord;
                if fixed {
                    self.position1 = coord - size;
                }
            }
        }

        // keep fixed size spans inside the limits
        let below = self.drag_limit_min - self.position1;
        if below > 0.0 {
            self.position1 += below;
            self.position2 += below;
        }
        let above = self.position2 - self.drag_limit_max;
        if above > 0.0 {
            self.position1 -= above;
            self.position2 -= above;
        }
        self.dragged.emit(&Coordinate::new(x, y));
    }

    fn dragged(&mut self) -> &mut Signal<Coordinate> {
        &mut self.dragged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plottable::tests::record;

    #[test]
    fn limits_are_ordered() {
        let s = AxisSpan::horizontal(4.0, 1.0);
        let l = s.axis_limits().unwrap();
        assert_eq!((l.x_min, l.x_max), (1.0, 4.0));
        assert!(!l.has_y());
        let s = AxisSpan::vertical(2.0, 3.0);
        assert_eq!(s.axis_limits().unwrap().y_max, 3.0);
    }

    #[test]
    fn edge_selection() {
        let mut s = AxisSpan::horizontal(1.0, 4.0).with_drag_enabled(true);
        assert!(s.is_under_mouse(4.05, 0.0, 0.1, 0.1));
        s.drag_to(6.0, 0.0, false);
        assert_eq!((s.position1, s.position2), (1.0, 6.0));

        assert!(!s.is_under_mouse(3.0, 0.0, 0.1, 0.1));
        s.drag_to(0.0, 0.0, false);
        assert_eq!((s.position1, s.position2), (1.0, 6.0));
    }

    #[test]
    fn fixed_size_drag_moves_both_edges() {
        let mut s = AxisSpan::vertical(1.0, 3.0).with_drag_enabled(true);
        assert!(s.is_under_mouse(0.0, 1.0, 0.1, 0.1));
        s.drag_to(0.0, 5.0, true);
        assert_eq!((s.position1, s.position2), (5.0, 7.0));
    }

    #[test]
    fn fixed_size_drag_stays_inside_limits() {
        let mut s = AxisSpan::horizontal(1.0, 3.0).with_drag_enabled(true);
        s.drag_fixed_size = true;
        s.drag_limit_max = 10.0;
        assert!(s.is_under_mouse(1.0, 0.0, 0.1, 0.1));
        s.drag_to(9.5, 0.0, false);
        assert_eq!((s.position1, s.position2), (8.0, 10.0));
    }

    #[test]
    fn render_clamps_to_data_area() {
        let s = AxisSpan::horizontal(-5.0, 2.0);
        let rec = record(&s);
        assert_eq!(rec.paths.len(), 1);
        let (r, fill, stroke) = rec.paths[0];
        assert_eq!((r.left(), r.right()), (0.0, 21.0));
        assert_eq!((r.top(), r.bottom()), (0.0, 101.0));
        assert_eq!(fill, Some(Paint::Solid(defaults::SPAN_COLOR)));
        assert_eq!(stroke, None);
    }

    #[test]
    fn legend_is_a_rectangle() {
        let mut s = AxisSpan::horizontal(0.0, 1.0).with_label("band");
        s.border_line_width = 5.0;
        let items = s.legend_items();
        assert_eq!(items[0].border_width, 3.0);
        assert!(items[0].show_as_rectangle());
    }
}
