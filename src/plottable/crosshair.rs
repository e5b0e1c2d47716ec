//! A pair of dashed lines crossing at a point, with their positions labelled on the axes.
use super::{AxisLine, DataError, LegendItem, LineProps, Plottable, plottable_common};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{Font, LineStyle, defaults};
use crate::ColorU8;

/// A horizontal and a vertical line crossing at `(x, y)`
#[derive(Debug)]
pub struct Crosshair {
    horizontal_line: AxisLine,
    vertical_line: AxisLine,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl Default for Crosshair {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Crosshair {
    /// A crosshair at `(x, y)`
    pub fn new(x: f64, y: f64) -> Self {
        let mut crosshair = Crosshair {
            horizontal_line: AxisLine::horizontal(y),
            vertical_line: AxisLine::vertical(x),
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        };
        crosshair.set_line_style(LineStyle::Dash);
        crosshair.set_line_width(1.0);
        crosshair.set_color(defaults::CROSSHAIR_COLOR);
        crosshair.set_position_label(true);
        crosshair
    }

    /// The horizontal line
    pub fn horizontal_line(&self) -> &AxisLine {
        &self.horizontal_line
    }

    /// The horizontal line, to style it alone
    pub fn horizontal_line_mut(&mut self) -> &mut AxisLine {
        &mut self.horizontal_line
    }

    /// The vertical line
    pub fn vertical_line(&self) -> &AxisLine {
        &self.vertical_line
    }

    /// The vertical line, to style it alone
    pub fn vertical_line_mut(&mut self) -> &mut AxisLine {
        &mut self.vertical_line
    }

    /// X of the vertical line
    pub fn x(&self) -> f64 {
        self.vertical_line.position
    }

    /// Y of the horizontal line
    pub fn y(&self) -> f64 {
        self.horizontal_line.position
    }

    /// Move the crossing point
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.vertical_line.position = x;
        self.horizontal_line.position = y;
    }

    /// Color of both lines
    pub fn color(&self) -> ColorU8 {
        self.horizontal_line.color
    }

    /// Set the color of both lines and of their label backgrounds
    pub fn set_color(&mut self, color: ColorU8) {
        for line in self.lines_mut() {
            line.color = color;
            line.position_label.background = color;
        }
    }

    /// Set the style of both lines
    pub fn set_line_style(&mut self, style: LineStyle) {
        for line in self.lines_mut() {
            line.line_style = style;
        }
    }

    /// Set the width of both lines
    pub fn set_line_width(&mut self, width: f32) {
        for line in self.lines_mut() {
            line.line_width = width;
        }
    }

    /// Set the font of both position labels
    pub fn set_label_font(&mut self, font: Font) {
        for line in self.lines_mut() {
            line.position_label.font = font.clone();
        }
    }

    /// Set the background of both position labels
    pub fn set_label_background(&mut self, color: ColorU8) {
        for line in self.lines_mut() {
            line.position_label.background = color;
        }
    }

    /// Show or hide both position labels
    pub fn set_position_label(&mut self, visible: bool) {
        for line in self.lines_mut() {
            line.position_label.is_visible = visible;
        }
    }

    fn lines_mut(&mut self) -> [&mut AxisLine; 2] {
        [&mut self.horizontal_line, &mut self.vertical_line]
    }
}

impl Plottable for Crosshair {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(AxisLimits::NONE)
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        Vec::new()
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        self.horizontal_line.validate(deep)?;
        self.vertical_line.validate(deep)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        self.horizontal_line.render(canvas, dims);
        self.vertical_line.render(canvas, dims);
    }

    fn render_overlay(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        self.horizontal_line.render_overlay(canvas, dims);
        self.vertical_line.render_overlay(canvas, dims);
    }

    fn line_props(&self) -> Option<LineProps> {
        self.horizontal_line.line_props()
    }
}
