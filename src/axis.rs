//! Axes: scales around the data area with their title, ticks, grid lines and spine.
//!
//! Each axis sits on an [`Edge`] of the data area. Several axes may share an edge, in which case
//! the plot layout stacks them outward using [`Axis::pixel_offset`].
use crate::drawing::Canvas;
use crate::style::{Alignment, Font, LineStyle, defaults};
use crate::{ColorU8, color, dims::PlotDimensions, geom, text};

/// Edge of the data area an axis is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Vertical axis left of the data area
    Left,
    /// Vertical axis right of the data area
    Right,
    /// Horizontal axis below the data area
    Bottom,
    /// Horizontal axis above the data area
    Top,
}

impl Edge {
    /// Whether axes on this edge map the X coordinate
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Edge::Bottom | Edge::Top)
    }

    /// Whether axes on this edge map the Y coordinate
    pub fn is_vertical(&self) -> bool {
        !self.is_horizontal()
    }
}

/// The current limits of an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisView {
    /// Lower limit
    pub min: f64,
    /// Upper limit
    pub max: f64,
    has_been_set: bool,
}

impl Default for AxisView {
    fn default() -> Self {
        AxisView {
            min: f64::NAN,
            max: f64::NAN,
            has_been_set: false,
        }
    }
}

impl AxisView {
    /// Whether the limits were set, explicitly or by automatic scaling
    pub fn has_been_set(&self) -> bool {
        self.has_been_set
    }

    /// Whether the limits are finite and ordered
    pub fn is_real(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    /// Distance between the limits
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Middle of the limits
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Set the limits
    pub fn set(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
        self.has_been_set = true;
    }

    /// Set the limits, but let the next automatic scaling override them
    pub fn reset_to(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
        self.has_been_set = false;
    }

    /// Shift both limits by `units`
    pub fn pan(&mut self, units: f64) {
        self.set(self.min + units, self.max + units);
    }

    /// Zoom by `frac` around `center`. A fraction above 1 zooms in.
    pub fn zoom(&mut self, frac: f64, center: f64) {
        if !(frac.is_finite() && frac > 0.0) {
            return;
        }
        let min = center - (center - self.min) / frac;
        let max = center + (self.max - center) / frac;
        self.set(min, max);
    }
}

/// Title of an axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    /// Title text
    pub label: Option<String>,
    /// Title font. Alignment and rotation are derived from the edge.
    pub font: Font,
    /// Space between the title and the outer side of the axis
    pub pixel_size_padding: f32,
    /// Whether the title is shown
    pub is_visible: bool,
}

impl Default for AxisLabel {
    fn default() -> Self {
        AxisLabel {
            label: None,
            font: Font::sized(defaults::AXIS_LABEL_FONT_SIZE),
            pixel_size_padding: defaults::AXIS_LABEL_PADDING,
            is_visible: true,
        }
    }
}

impl AxisLabel {
    fn text(&self) -> Option<&str> {
        match self.label.as_deref() {
            Some(l) if self.is_visible && !l.trim().is_empty() => Some(l),
            _ => None,
        }
    }
}

/// The line drawn along the data area edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    /// Whether the line is drawn
    pub is_visible: bool,
    /// Line color
    pub color: ColorU8,
    /// Line width
    pub width: f32,
}

impl Default for AxisLine {
    fn default() -> Self {
        AxisLine {
            is_visible: true,
            color: color::BLACK,
            width: defaults::SPINE_WIDTH,
        }
    }
}

/// Tick marks, tick labels and grid lines of an axis.
///
/// Tick positions are not computed: they are supplied with [`AxisTicks::set_major`] and
/// [`AxisTicks::set_minor`].
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicks {
    /// Whether ticks, tick labels and grid lines are drawn at all
    pub is_visible: bool,
    /// Whether tick labels are drawn
    pub tick_label_visible: bool,
    /// Clockwise rotation of tick labels, in degrees
    pub tick_label_rotation: f32,
    /// Tick label font
    pub tick_label_font: Font,
    /// Whether tick marks point away from the data area
    pub ticks_extend_outward: bool,

    /// Whether major tick marks are drawn
    pub major_tick_visible: bool,
    /// Major tick mark length
    pub major_tick_length: f32,
    /// Major tick mark color
    pub major_tick_color: ColorU8,
    /// Whether major grid lines are drawn
    pub major_grid_visible: bool,
    /// Major grid line color
    pub major_grid_color: ColorU8,
    /// Major grid line width
    pub major_grid_width: f32,
    /// Major grid line style
    pub major_grid_style: LineStyle,

    /// Whether minor tick marks are drawn
    pub minor_tick_visible: bool,
    /// Minor tick mark length
    pub minor_tick_length: f32,
    /// Minor tick mark color
    pub minor_tick_color: ColorU8,
    /// Whether minor grid lines are drawn
    pub minor_grid_visible: bool,
    /// Minor grid line color
    pub minor_grid_color: ColorU8,
    /// Minor grid line width
    pub minor_grid_width: f32,
    /// Minor grid line style
    pub minor_grid_style: LineStyle,

    /// Major tick marks four times longer
    pub ruler_mode: bool,
    /// Snap tick marks and grid lines to pixel centers
    pub snap_px: bool,

    major_positions: Vec<f64>,
    major_labels: Option<Vec<String>>,
    minor_positions: Vec<f64>,
}

impl Default for AxisTicks {
    fn default() -> Self {
        AxisTicks {
            is_visible: true,
            tick_label_visible: true,
            tick_label_rotation: 0.0,
            tick_label_font: Font::sized(defaults::TICK_LABEL_FONT_SIZE),
            ticks_extend_outward: true,
            major_tick_visible: true,
            major_tick_length: defaults::MAJOR_TICK_LENGTH,
            major_tick_color: color::BLACK,
            major_grid_visible: false,
            major_grid_color: defaults::GRID_COLOR,
            major_grid_width: defaults::GRID_WIDTH,
            major_grid_style: LineStyle::Solid,
            minor_tick_visible: true,
            minor_tick_length: defaults::MINOR_TICK_LENGTH,
            minor_tick_color: color::BLACK,
            minor_grid_visible: false,
            minor_grid_color: defaults::GRID_COLOR,
            minor_grid_width: defaults::GRID_WIDTH,
            minor_grid_style: LineStyle::Solid,
            ruler_mode: false,
            snap_px: true,
            major_positions: Vec::new(),
            major_labels: None,
            minor_positions: Vec::new(),
        }
    }
}

impl AxisTicks {
    /// Set the major tick positions, and optionally their labels.
    /// Labels are derived from the positions when None or when their count differs.
    pub fn set_major(&mut self, positions: Vec<f64>, labels: Option<Vec<String>>) {
        self.major_labels = labels.filter(|l| l.len() == positions.len());
        self.major_positions = positions;
    }

    /// Set the minor tick positions
    pub fn set_minor(&mut self, positions: Vec<f64>) {
        self.minor_positions = positions;
    }

    /// Major tick positions
    pub fn major_positions(&self) -> &[f64] {
        &self.major_positions
    }

    /// Minor tick positions
    pub fn minor_positions(&self) -> &[f64] {
        &self.minor_positions
    }

    /// Label of the major tick `index`
    pub fn major_label(&self, index: usize) -> Option<String> {
        if let Some(labels) = &self.major_labels {
            return labels.get(index).cloned();
        }
        self.major_positions.get(index).map(|p| format_tick(*p))
    }

    fn major_tick_length(&self) -> f32 {
        if self.ruler_mode {
            self.major_tick_length * defaults::RULER_TICK_MULTIPLIER
        } else {
            self.major_tick_length
        }
    }
}

/// Format a tick position without trailing zeros
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let s = format!("{:.6}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// An axis of the plot
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Edge of the data area
    pub edge: Edge,
    /// Index used by plottables to refer to this axis
    pub index: usize,
    /// Title
    pub label: AxisLabel,
    /// Ticks and grid lines
    pub ticks: AxisTicks,
    /// Spine
    pub line: AxisLine,
    /// Current limits
    pub view: AxisView,
    /// Whether the axis occupies space and is drawn
    pub is_visible: bool,
    /// Distance from the data area, set by the layout
    pub pixel_offset: f32,
    /// Thickness of the axis, set by [`Axis::measure`]
    pub pixel_size: f32,
}

impl Axis {
    /// A visible axis without title nor tick
    pub fn new(edge: Edge, index: usize) -> Self {
        Axis {
            edge,
            index,
            label: AxisLabel::default(),
            ticks: AxisTicks::default(),
            line: AxisLine::default(),
            view: AxisView::default(),
            is_visible: true,
            pixel_offset: 0.0,
            pixel_size: 0.0,
        }
    }

    /// Set the title, returning self for chaining
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.label.label = Some(title.into());
        self
    }

    /// Apply `color` to the title, tick labels, tick marks and spine
    pub fn set_color(&mut self, color: ColorU8) {
        self.label.font.color = color;
        self.ticks.tick_label_font.color = color;
        self.ticks.major_tick_color = color;
        self.ticks.minor_tick_color = color;
        self.line.color = color;
    }

    /// Compute and store the thickness of the axis
    pub fn measure(&mut self, fonts: &text::FontDb) -> f32 {
        self.pixel_size = if self.is_visible {
            self.thickness(fonts)
        } else {
            0.0
        };
        self.pixel_size
    }

    fn thickness(&self, fonts: &text::FontDb) -> f32 {
        let mut size = self.label.pixel_size_padding;

        if let Some(title) = self.label.text() {
            size += layout(title, &self.label.font, fonts).height();
        }

        let ticks = &self.ticks;
        if ticks.is_visible && ticks.tick_label_visible && !ticks.major_positions.is_empty() {
            let (sin, cos) = ticks.tick_label_rotation.to_radians().sin_cos();
            let extent = (0..ticks.major_positions.len())
                .filter_map(|i| ticks.major_label(i))
                .map(|l| {
                    let sz = layout(&l, &ticks.tick_label_font, fonts).size();
                    if self.edge.is_horizontal() {
                        (sz.width() * sin).abs() + (sz.height() * cos).abs()
                    } else {
                        (sz.width() * cos).abs() + (sz.height() * sin).abs()
                    }
                })
                .fold(0.0, f32::max);
            size += extent + defaults::TICK_LABEL_GAP;
        }

        if ticks.is_visible && ticks.major_tick_visible && ticks.ticks_extend_outward {
            size += ticks.major_tick_length();
        }
        size
    }

    /// Whether the pixel lies in the band the axis occupies outside of the data area
    pub fn is_under_mouse(&self, px: f32, py: f32, data_rect: &geom::Rect) -> bool {
        self.is_visible && self.pixel_size > 0.0 && self.band(data_rect).contains_point(&geom::Point::from_xy(px, py))
    }

    /// The band the axis occupies outside of the data area
    pub fn band(&self, data: &geom::Rect) -> geom::Rect {
        let (off, size) = (self.pixel_offset, self.pixel_size);
        match self.edge {
            Edge::Left => geom::Rect::from_trbl(
                data.top(),
                data.left() - off,
                data.bottom(),
                data.left() - off - size,
            ),
            Edge::Right => geom::Rect::from_trbl(
                data.top(),
                data.right() + off + size,
                data.bottom(),
                data.right() + off,
            ),
            Edge::Bottom => geom::Rect::from_trbl(
                data.bottom() + off,
                data.right(),
                data.bottom() + off + size,
                data.left(),
            ),
            Edge::Top => geom::Rect::from_trbl(
                data.top() - off - size,
                data.right(),
                data.top() - off,
                data.left(),
            ),
        }
    }

    fn pixel_of(&self, dims: &PlotDimensions, pos: f64) -> f32 {
        let px = if self.edge.is_horizontal() {
            dims.pixel_x(pos)
        } else {
            dims.pixel_y(pos)
        };
        if self.ticks.snap_px { px.floor() + 0.5 } else { px }
    }

    fn visible<'a>(&self, positions: &'a [f64], dims: &PlotDimensions) -> impl Iterator<Item = (usize, f64)> + 'a {
        let (min, max) = if self.edge.is_horizontal() {
            (dims.x_min(), dims.x_max())
        } else {
            (dims.y_min(), dims.y_max())
        };
        positions
            .iter()
            .copied()
            .enumerate()
            .filter(move |(_, p)| *p >= min && *p <= max)
    }

    /// Draw the grid lines across the data area.
    /// `dims` must map this axis' limits.
    pub fn render_grid(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let ticks = &self.ticks;
        if !self.is_visible || !ticks.is_visible {
            return;
        }
        if ticks.minor_grid_visible {
            self.grid_lines(
                canvas,
                dims,
                &ticks.minor_positions,
                ticks.minor_grid_color,
                ticks.minor_grid_width,
                ticks.minor_grid_style,
            );
        }
        if ticks.major_grid_visible {
            self.grid_lines(
                canvas,
                dims,
                &ticks.major_positions,
                ticks.major_grid_color,
                ticks.major_grid_width,
                ticks.major_grid_style,
            );
        }
    }

    fn grid_lines(
        &self,
        canvas: &mut Canvas,
        dims: &PlotDimensions,
        positions: &[f64],
        color: ColorU8,
        width: f32,
        style: LineStyle,
    ) {
        let data = dims.data_rect();
        for (_, pos) in self.visible(positions, dims) {
            let px = self.pixel_of(dims, pos);
            let (p1, p2) = if self.edge.is_horizontal() {
                (
                    geom::Point::from_xy(px, data.top()),
                    geom::Point::from_xy(px, data.bottom()),
                )
            } else {
                (
                    geom::Point::from_xy(data.left(), px),
                    geom::Point::from_xy(data.right(), px),
                )
            };
            canvas.styled_line(p1, p2, color, width, style);
        }
    }

    /// Position of the spine and the outward direction
    fn spine(&self, data: &geom::Rect) -> (f32, f32) {
        let off = self.pixel_offset;
        match self.edge {
            Edge::Left => (data.left() - off, -1.0),
            Edge::Right => (data.right() + off, 1.0),
            Edge::Bottom => (data.bottom() + off, 1.0),
            Edge::Top => (data.top() - off, -1.0),
        }
    }

    fn tick_segment(&self, along: f32, spine: f32, length: f32) -> (geom::Point, geom::Point) {
        if self.edge.is_horizontal() {
            (
                geom::Point::from_xy(along, spine),
                geom::Point::from_xy(along, spine + length),
            )
        } else {
            (
                geom::Point::from_xy(spine, along),
                geom::Point::from_xy(spine + length, along),
            )
        }
    }

    /// Draw tick marks, tick labels, spine and title.
    /// `dims` must map this axis' limits.
    pub fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        if !self.is_visible {
            return;
        }
        let data = dims.data_rect();
        let (spine, dir) = self.spine(&data);
        let ticks = &self.ticks;

        if ticks.is_visible {
            let outward = if ticks.ticks_extend_outward { dir } else { -dir };
            if ticks.minor_tick_visible {
                let len = ticks.minor_tick_length * outward;
                for (_, pos) in self.visible(&ticks.minor_positions, dims) {
                    let (p1, p2) = self.tick_segment(self.pixel_of(dims, pos), spine, len);
                    canvas.styled_line(p1, p2, ticks.minor_tick_color, 1.0, LineStyle::Solid);
                }
            }
            if ticks.major_tick_visible {
                let len = ticks.major_tick_length() * outward;
                for (_, pos) in self.visible(&ticks.major_positions, dims) {
                    let (p1, p2) = self.tick_segment(self.pixel_of(dims, pos), spine, len);
                    canvas.styled_line(p1, p2, ticks.major_tick_color, 1.0, LineStyle::Solid);
                }
            }
            if ticks.tick_label_visible {
                self.render_tick_labels(canvas, dims, spine, dir);
            }
        }

        if self.line.is_visible {
            let (p1, p2) = if self.edge.is_horizontal() {
                (
                    geom::Point::from_xy(data.left(), spine),
                    geom::Point::from_xy(data.right(), spine),
                )
            } else {
                (
                    geom::Point::from_xy(spine, data.top()),
                    geom::Point::from_xy(spine, data.bottom()),
                )
            };
            canvas.styled_line(p1, p2, self.line.color, self.line.width, LineStyle::Solid);
        }

        self.render_title(canvas, &data);
    }

    fn render_tick_labels(&self, canvas: &mut Canvas, dims: &PlotDimensions, spine: f32, dir: f32) {
        let ticks = &self.ticks;
        let mut dist = defaults::TICK_LABEL_GAP;
        if ticks.major_tick_visible && ticks.ticks_extend_outward {
            dist += ticks.major_tick_length();
        }
        let at = spine + dir * dist;
        let alignment = match self.edge {
            Edge::Left => Alignment::MiddleRight,
            Edge::Right => Alignment::MiddleLeft,
            Edge::Bottom => Alignment::UpperCenter,
            Edge::Top => Alignment::LowerCenter,
        };
        let font = Font {
            alignment,
            rotation: ticks.tick_label_rotation,
            ..ticks.tick_label_font.clone()
        };
        for (i, pos) in self.visible(&ticks.major_positions, dims) {
            let Some(label) = ticks.major_label(i) else {
                continue;
            };
            let along = self.pixel_of(dims, pos);
            if self.edge.is_horizontal() {
                canvas.text(&label, &font, along, at);
            } else {
                canvas.text(&label, &font, at, along);
            }
        }
    }

    fn render_title(&self, canvas: &mut Canvas, data: &geom::Rect) {
        let Some(title) = self.label.text() else {
            return;
        };
        let outer = self.pixel_offset + self.pixel_size - self.label.pixel_size_padding;
        let (x, y, alignment, rotation) = match self.edge {
            Edge::Left => (data.left() - outer, data.center_y(), Alignment::UpperCenter, -90.0),
            Edge::Right => (data.right() + outer, data.center_y(), Alignment::UpperCenter, 90.0),
            Edge::Bottom => (data.center_x(), data.bottom() + outer, Alignment::LowerCenter, 0.0),
            Edge::Top => (data.center_x(), data.top() - outer, Alignment::UpperCenter, 0.0),
        };
        let font = Font {
            alignment,
            rotation,
            ..self.label.font.clone()
        };
        canvas.text(title, &font, x, y);
    }
}

fn layout(txt: &str, font: &Font, fonts: &text::FontDb) -> text::Text {
    text::Text::layout(txt, &font.query(), font.size, font.alignment.text_align(), fonts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::tests::Recorder;
    use crate::limits::AxisLimits;
    use crate::tests::{Near, assert_near};

    #[test]
    fn view_zoom_and_pan() {
        let mut v = AxisView::default();
        assert!(!v.has_been_set());
        assert!(!v.is_real());
        v.reset_to(0.0, 10.0);
        assert!(!v.has_been_set());
        v.zoom(2.0, 5.0);
        assert!(v.has_been_set());
        assert_near!(abs, v.min, 2.5);
        assert_near!(abs, v.max, 7.5);
        v.pan(-2.5);
        assert_near!(abs, v.min, 0.0);
        assert_near!(abs, v.max, 5.0);
        v.zoom(0.0, 1.0);
        assert_near!(abs, v.span(), 5.0);
    }

    #[test]
    fn format_ticks() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(-2.5), "-2.5");
        assert_eq!(format_tick(0.125), "0.125");
    }

    #[test]
    fn measure_with_estimated_text() {
        let fonts = text::FontDb::new();
        let mut axis = Axis::new(Edge::Bottom, 0).with_title("X");
        axis.ticks.set_major(vec![0.0, 10.0], None);
        // padding 3 + title 16*1.2 + labels 11*1.2 + gap 3 + tick 5
        let size = axis.measure(&fonts);
        assert_near!(abs, size, 3.0 + 19.2 + 13.2 + 3.0 + 5.0, 1e-3);
        assert_near!(abs, axis.pixel_size, size);

        axis.is_visible = false;
        assert_eq!(axis.measure(&fonts), 0.0);
    }

    #[test]
    fn measure_vertical_uses_label_width() {
        let fonts = text::FontDb::new();
        let mut axis = Axis::new(Edge::Left, 0);
        axis.ticks.set_major(vec![0.0, 100.0], None);
        axis.ticks.major_tick_visible = false;
        let size = axis.measure(&fonts);
        // "100" is 3 chars of 0.6 * 11
        assert_near!(abs, size, 3.0 + 3.0 * 6.6 + 3.0, 1e-3);
    }

    #[test]
    fn labels_follow_positions() {
        let mut ticks = AxisTicks::default();
        ticks.set_major(vec![1.0, 2.0], Some(vec!["a".into()]));
        assert_eq!(ticks.major_label(0).as_deref(), Some("1"));
        ticks.set_major(vec![1.0, 2.0], Some(vec!["a".into(), "b".into()]));
        assert_eq!(ticks.major_label(1).as_deref(), Some("b"));
        assert_eq!(ticks.major_label(2), None);
    }

    #[test]
    fn hit_band() {
        let data = geom::Rect::from_xywh(50.0, 10.0, 200.0, 100.0);
        let mut left = Axis::new(Edge::Left, 0);
        left.pixel_size = 40.0;
        assert!(left.is_under_mouse(20.0, 50.0, &data));
        assert!(!left.is_under_mouse(60.0, 50.0, &data));
        assert!(!left.is_under_mouse(20.0, 130.0, &data));
        left.pixel_offset = 40.0;
        assert!(!left.is_under_mouse(20.0, 50.0, &data));

        let mut bottom = Axis::new(Edge::Bottom, 0);
        bottom.pixel_size = 30.0;
        assert!(bottom.is_under_mouse(100.0, 120.0, &data));
        assert!(!bottom.is_under_mouse(100.0, 100.0, &data));
    }

    #[test]
    fn grid_skips_ticks_outside_view() {
        let fonts = text::FontDb::new();
        let mut rec = Recorder::default();
        let dims = PlotDimensions::new(
            geom::Size::new(300.0, 200.0),
            geom::Rect::from_xywh(50.0, 10.0, 200.0, 100.0),
            AxisLimits::new(0.0, 10.0, 0.0, 1.0),
        );
        let mut axis = Axis::new(Edge::Bottom, 0);
        axis.ticks.major_grid_visible = true;
        axis.ticks.set_major(vec![-5.0, 0.0, 5.0, 10.0, 15.0], None);
        {
            let mut canvas = Canvas::new(&mut rec, &fonts);
            axis.render_grid(&mut canvas, &dims);
        }
        assert_eq!(rec.paths.len(), 3);
        let (r, _, stroke) = rec.paths[1];
        assert_near!(abs, r.x(), 150.5, 1e-4);
        assert_eq!(stroke, Some(defaults::GRID_COLOR));
    }
}
