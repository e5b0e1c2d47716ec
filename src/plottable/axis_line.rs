//! Horizontal and vertical lines spanning the data area.
use super::{
    Cursor, DataError, Draggable, LegendItem, LineProps, Plottable, Selectable, check_not_empty,
    check_real, check_real_value, plottable_common,
};
use crate::collection::Signal;
use crate::data::{self, Coordinate};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{Alignment, Font, LineStyle, defaults};
use crate::{ColorU8, color, geom};

/// Formats a line position with two decimals
pub fn format_position(position: f64) -> String {
    format!("{:.2}", position)
}

/// Label showing the position of a line over the axis it crosses
#[derive(Debug, Clone)]
pub struct PositionLabel {
    /// Whether the label is drawn
    pub is_visible: bool,
    /// Text font
    pub font: Font,
    /// Color of the rectangle behind the text
    pub background: ColorU8,
    /// Draw over the right (or top) axis instead of the left (or bottom) one
    pub opposite_axis: bool,
    /// Distance in pixels between the data area and the label,
    /// to place it over a secondary axis
    pub axis_offset: f32,
    /// Converts the position to text
    pub formatter: fn(f64) -> String,
}

impl Default for PositionLabel {
    fn default() -> Self {
        PositionLabel {
            is_visible: false,
            font: Font::default().with_color(color::WHITE).with_bold(true),
            background: color::BLACK,
            opposite_axis: false,
            axis_offset: 0.0,
            formatter: format_position,
        }
    }
}

impl PositionLabel {
    /// Draw the label of a line at `position`, unless the position is out of view
    pub(crate) fn render(
        &self,
        canvas: &mut Canvas,
        dims: &PlotDimensions,
        horizontal: bool,
        position: f64,
    ) {
        let (min, max) = if horizontal {
            (dims.y_min(), dims.y_max())
        } else {
            (dims.x_min(), dims.x_max())
        };
        if !self.is_visible || position < min || position > max {
            return;
        }
        let txt = (self.formatter)(position);
        let laid_out = canvas.layout_text(&txt, &self.font);
        let (w, h) = (laid_out.width(), laid_out.height());
        let data = dims.data_rect();
        if horizontal {
            let py = dims.pixel_y(position);
            let x = if self.opposite_axis {
                data.right() + self.axis_offset
            } else {
                data.left() - w - self.axis_offset
            };
            canvas.fill_rect(geom::Rect::from_xywh(x, py - h / 2.0, w, h), self.background);
            canvas.laid_out_text(&laid_out, self.font.color, x, py, Alignment::MiddleLeft, 0.0);
        } else {
            let px = dims.pixel_x(position);
            let y = if self.opposite_axis {
                data.top() - h - self.axis_offset
            } else {
                data.bottom() + self.axis_offset
            };
            canvas.fill_rect(geom::Rect::from_xywh(px - w / 2.0, y, w, h), self.background);
            canvas.laid_out_text(&laid_out, self.font.color, px, y, Alignment::UpperCenter, 0.0);
        }
    }
}

/// Draw a line at `position` across the view, restricted to `min..max`
fn render_line(
    canvas: &mut Canvas,
    dims: &PlotDimensions,
    horizontal: bool,
    position: f64,
    extent: (f64, f64),
    color: ColorU8,
    width: f32,
    style: LineStyle,
) {
    let (p1, p2) = if horizontal {
        let py = dims.pixel_y(position);
        let x1 = dims.pixel_x(extent.0.max(dims.x_min()));
        let x2 = dims.pixel_x(extent.1.min(dims.x_max()));
        (geom::Point::from_xy(x1, py), geom::Point::from_xy(x2, py))
    } else {
        let px = dims.pixel_x(position);
        let y1 = dims.pixel_y(extent.0.max(dims.y_min()));
        let y2 = dims.pixel_y(extent.1.min(dims.y_max()));
        (geom::Point::from_xy(px, y1), geom::Point::from_xy(px, y2))
    };
    canvas.styled_line(p1, p2, color, width, style);
}

fn cursor(horizontal: bool) -> Cursor {
    if horizontal { Cursor::NS } else { Cursor::WE }
}

/// A line at a fixed Y (horizontal) or X (vertical) position
#[derive(Debug)]
pub struct AxisLine {
    horizontal: bool,
    /// Y of a horizontal line, X of a vertical line
    pub position: f64,
    /// Label showing the position over the axis
    pub position_label: PositionLabel,
    /// Exclude the line from automatic scaling
    pub ignore_axis_auto: bool,
    /// Line style
    pub line_style: LineStyle,
    /// Line width
    pub line_width: f32,
    /// Line color
    pub color: ColorU8,
    /// Legend label
    pub label: Option<String>,
    /// Whether the line can be dragged
    pub drag_enabled: bool,
    /// Lowest position reachable by dragging
    pub drag_limit_min: f64,
    /// Highest position reachable by dragging
    pub drag_limit_max: f64,
    /// Where the line starts along its direction
    pub min: f64,
    /// Where the line ends along its direction
    pub max: f64,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
    dragged: Signal<Coordinate>,
}

impl AxisLine {
    fn new(horizontal: bool, position: f64) -> Self {
        AxisLine {
            horizontal,
            position,
            position_label: PositionLabel::default(),
            ignore_axis_auto: false,
            line_style: LineStyle::Solid,
            line_width: defaults::LINE_WIDTH,
            color: color::BLACK,
            label: None,
            drag_enabled: false,
            drag_limit_min: f64::NEG_INFINITY,
            drag_limit_max: f64::INFINITY,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
            dragged: Signal::new(),
        }
    }

    /// A horizontal line at `y`
    pub fn horizontal(y: f64) -> Self {
        Self::new(true, y)
    }

    /// A vertical line at `x`
    pub fn vertical(x: f64) -> Self {
        Self::new(false, x)
    }

    /// Whether the line is horizontal
    pub fn is_horizontal(&self) -> bool {
        self.horizontal
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

    /// Enable or disable dragging
    pub fn with_drag_enabled(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    /// Show or hide the position label
    pub fn with_position_label(mut self, visible: bool) -> Self {
        self.position_label.is_visible = visible;
        self
    }
}

impl Plottable for AxisLine {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(match (self.ignore_axis_auto, self.horizontal) {
            (true, _) => AxisLimits::NONE,
            (false, true) => AxisLimits::y_only(self.position, self.position),
            (false, false) => AxisLimits::x_only(self.position, self.position),
        })
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let label = self.label.as_deref().unwrap_or_default();
        vec![LegendItem::from_parent(self, label, self.color)]
    }

    fn validate(&self, _deep: bool) -> Result<(), DataError> {
        check_real_value("position", self.position)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        render_line(
            canvas,
            dims,
            self.horizontal,
            self.position,
            (self.min, self.max),
            self.color,
            self.line_width,
            self.line_style,
        );
    }

    fn render_overlay(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        self.position_label
            .render(canvas, dims, self.horizontal, self.position);
    }

    fn line_props(&self) -> Option<LineProps> {
        Some(LineProps {
            color: self.color,
            width: self.line_width,
            style: self.line_style,
        })
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        Some(self)
    }
}

impl Selectable for AxisLine {
    fn is_under_mouse(&mut self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> bool {
        if self.horizontal {
            (self.position - y).abs() <= snap_y
        } else {
            (self.position - x).abs() <= snap_x
        }
    }
}

impl Draggable for AxisLine {
    fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    fn drag_cursor(&self) -> Cursor {
        cursor(self.horizontal)
    }

    fn drag_to(&mut self, x: f64, y: f64, _fixed_size: bool) {
        if !self.drag_enabled {
            return;
        }
        let requested = if self.horizontal { y } else { x };
        self.position = requested.max(self.drag_limit_min).min(self.drag_limit_max);
        self.dragged.emit(&Coordinate::new(x, y));
    }

    fn dragged(&mut self) -> &mut Signal<Coordinate> {
        &mut self.dragged
    }
}

/// Several parallel lines sharing one style
#[derive(Debug)]
pub struct AxisLineVector {
    horizontal: bool,
    /// Y of horizontal lines, X of vertical lines
    pub positions: Vec<f64>,
    /// Index of the line grabbed last
    pub current_index: usize,
    /// Added to every position when drawing
    pub offset: i32,
    /// Labels showing the positions over the axis
    pub position_label: PositionLabel,
    /// Exclude the lines from automatic scaling
    pub ignore_axis_auto: bool,
    /// Line style
    pub line_style: LineStyle,
    /// Line width
    pub line_width: f32,
    /// Line color
    pub color: ColorU8,
    /// Legend label
    pub label: Option<String>,
    /// Whether lines can be dragged
    pub drag_enabled: bool,
    /// Lowest position reachable by dragging
    pub drag_limit_min: f64,
    /// Highest position reachable by dragging
    pub drag_limit_max: f64,
    /// Where the lines start along their direction
    pub min: f64,
    /// Where the lines end along their direction
    pub max: f64,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
    dragged: Signal<Coordinate>,
}

impl AxisLineVector {
    fn new(horizontal: bool, positions: Vec<f64>) -> Self {
        AxisLineVector {
            horizontal,
            positions,
            current_index: 0,
            offset: 0,
            position_label: PositionLabel::default(),
            ignore_axis_auto: false,
            line_style: LineStyle::Solid,
            line_width: defaults::LINE_WIDTH,
            color: color::BLACK,
            label: None,
            drag_enabled: false,
            drag_limit_min: f64::NEG_INFINITY,
            drag_limit_max: f64::INFINITY,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
            dragged: Signal::new(),
        }
    }

    /// Horizontal lines at `ys`
    pub fn horizontal(ys: Vec<f64>) -> Self {
        Self::new(true, ys)
    }

    /// Vertical lines at `xs`
    pub fn vertical(xs: Vec<f64>) -> Self {
        Self::new(false, xs)
    }

    /// Whether the lines are horizontal
    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    /// Enable or disable dragging
    pub fn with_drag_enabled(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    fn drawn_positions(&self) -> impl Iterator<Item = f64> + '_ {
        let offset = self.offset as f64;
        self.positions.iter().map(move |p| p + offset)
    }
}

impl Plottable for AxisLineVector {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        if self.ignore_axis_auto {
            return Ok(AxisLimits::NONE);
        }
        let Some((min, max)) = data::bounds(self.drawn_positions()) else {
            return Ok(AxisLimits::NONE);
        };
        Ok(if self.horizontal {
            AxisLimits::y_only(min, max)
        } else {
            AxisLimits::x_only(min, max)
        })
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let label = self.label.as_deref().unwrap_or_default();
        vec![LegendItem::from_parent(self, label, self.color)]
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        check_not_empty("positions", &self.positions)?;
        if deep {
            check_real("positions", &self.positions)?;
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        for position in self.drawn_positions() {
            render_line(
                canvas,
                dims,
                self.horizontal,
                position,
                (self.min, self.max),
                self.color,
                self.line_width,
                self.line_style,
            );
        }
    }

    fn render_overlay(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        for position in self.drawn_positions() {
            self.position_label
                .render(canvas, dims, self.horizontal, position);
        }
    }

    fn line_props(&self) -> Option<LineProps> {
        Some(LineProps {
            color: self.color,
            width: self.line_width,
            style: self.line_style,
        })
    }

    fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        Some(self)
    }
}

impl Selectable for AxisLineVector {
    fn is_under_mouse(&mut self, x: f64, y: f64, snap_x: f64, snap_y: f64) -> bool {
        let (coord, snap) = if self.horizontal { (y, snap_y) } else { (x, snap_x) };
        let hit = self.drawn_positions().position(|p| (p - coord).abs() <= snap);
        match hit {
            Some(i) => {
                self.current_index = i;
                true
            }
            None => false,
        }
    }
}

impl Draggable for AxisLineVector {
    fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    fn drag_cursor(&self) -> Cursor {
        cursor(self.horizontal)
    }

    fn drag_to(&mut self, x: f64, y: f64, _fixed_size: bool) {
        if !self.drag_enabled {
            return;
        }
        let requested = if self.horizontal { y } else { x };
        let drawn = requested.max(self.drag_limit_min).min(self.drag_limit_max);
        let offset = self.offset as f64;
        let Some(position) = self.positions.get_mut(self.current_index) else {
            return;
        };
        *position = drawn - offset;
        self.dragged.emit(&Coordinate::new(x, y));
    }

    fn dragged(&mut self) -> &mut Signal<Coordinate> {
        &mut self.dragged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plottable::tests::{dims, record};
    use crate::text;

    #[test]
    fn limits_per_orientation() {
        let h = AxisLine::horizontal(3.0);
        let l = h.axis_limits().unwrap();
        assert!(!l.has_x());
        assert_eq!((l.y_min, l.y_max), (3.0, 3.0));

        let mut v = AxisLine::vertical(-2.0);
        assert_eq!(v.axis_limits().unwrap().x_min, -2.0);
        v.ignore_axis_auto = true;
        let l = v.axis_limits().unwrap();
        assert!(!l.has_x() && !l.has_y());
    }

    #[test]
    fn validate_position() {
        assert!(AxisLine::vertical(1.0).validate(false).is_ok());
        assert_eq!(
            AxisLine::vertical(f64::NAN).validate(false),
            Err(DataError::NotReal("position"))
        );
    }

    #[test]
    fn render_clamps_extent() {
        let mut h = AxisLine::horizontal(5.0);
        h.min = 2.0;
        let rec = record(&h);
        assert_eq!(rec.paths.len(), 1);
        let (r, ..) = rec.paths[0];
        assert_eq!((r.left(), r.right()), (20.0, 100.0));
        assert_eq!(r.top(), 50.0);
    }

    #[test]
    fn position_label_out_of_view_is_skipped() {
        let fonts = text::FontDb::new();
        let mut rec = crate::drawing::tests::Recorder::default();
        let mut canvas = Canvas::new(&mut rec, &fonts);
        let h = AxisLine::horizontal(50.0).with_position_label(true);
        h.render_overlay(&mut canvas, &dims());
        assert!(rec.paths.is_empty());

        let mut canvas = Canvas::new(&mut rec, &fonts);
        let h = AxisLine::horizontal(5.0).with_position_label(true);
        h.render_overlay(&mut canvas, &dims());
        // background rectangle left of the data area, centered on the line
        let (r, fill, _) = rec.paths[0];
        assert_eq!(fill, Some(color::BLACK.into()));
        assert!(r.right() <= 0.0 + 1e-3);
        assert!((r.center_y() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn drag_clamps_and_notifies() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut v = AxisLine::vertical(1.0).with_drag_enabled(true);
        v.drag_limit_max = 4.0;
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        v.on_dragged(Box::new(move |c| s.borrow_mut().push(*c)));
        v.drag_to(6.0, 1.0, false);
        assert_eq!(v.position, 4.0);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(v.drag_cursor(), Cursor::WE);
        assert_eq!(AxisLine::horizontal(0.0).drag_cursor(), Cursor::NS);
    }

    #[test]
    fn drag_disabled_does_nothing() {
        let mut h = AxisLine::horizontal(1.0);
        h.drag_to(0.0, 3.0, false);
        assert_eq!(h.position, 1.0);
    }

    #[test]
    fn hit_test_uses_relevant_axis() {
        let mut h = AxisLine::horizontal(1.0);
        assert!(h.is_under_mouse(100.0, 1.05, 0.0, 0.1));
        assert!(!h.is_under_mouse(1.0, 1.2, 10.0, 0.1));
    }

    #[test]
    fn vector_drags_the_grabbed_line() {
        let mut v = AxisLineVector::vertical(vec![1.0, 4.0, 7.0]).with_drag_enabled(true);
        assert_eq!(v.axis_limits().unwrap().x_max, 7.0);
        assert!(v.is_under_mouse(4.1, 0.0, 0.2, 0.2));
        assert_eq!(v.current_index, 1);
        v.drag_to(5.0, 0.0, false);
        assert_eq!(v.positions, vec![1.0, 5.0, 7.0]);
        assert!(!v.is_under_mouse(3.0, 0.0, 0.2, 0.2));
    }

    #[test]
    fn vector_offset_moves_hit_and_drag() {
        let mut v = AxisLineVector::vertical(vec![1.0, 4.0]).with_drag_enabled(true);
        v.offset = 2;
        v.drag_limit_max = 9.0;
        assert_eq!(v.axis_limits().unwrap().x_min, 3.0);
        assert!(!v.is_under_mouse(4.0, 0.0, 0.2, 0.2));
        assert!(v.is_under_mouse(6.1, 0.0, 0.2, 0.2));
        assert_eq!(v.current_index, 1);
        v.drag_to(8.0, 0.0, false);
        assert_eq!(v.positions, vec![1.0, 6.0]);
        // the drag limits bound the drawn position
        v.drag_to(12.0, 0.0, false);
        assert_eq!(v.positions, vec![1.0, 7.0]);
    }

    #[test]
    fn vector_renders_with_offset() {
        let mut v = AxisLineVector::horizontal(vec![1.0, 2.0]);
        v.offset = 3;
        let rec = record(&v);
        assert_eq!(rec.paths.len(), 2);
        assert_eq!(rec.paths[0].0.top(), 60.0);
        assert_eq!(rec.paths[1].0.top(), 50.0);
        assert_eq!(
            AxisLineVector::horizontal(vec![]).validate(false),
            Err(DataError::Empty("positions"))
        );
    }
}
