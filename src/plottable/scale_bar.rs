//! L-shaped scale bar in the lower right corner of the data area.
use super::{DataError, LegendItem, Plottable, check_real_value, plottable_common};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{Alignment, Font, LineStyle};
use crate::{ColorU8, color, geom};

/// Bars of a given length in data units along X and Y, meeting at a corner
#[derive(Debug, Clone)]
pub struct ScaleBar {
    /// Length of the horizontal bar in X units, 0 for no bar
    pub width: f64,
    /// Length of the vertical bar in Y units, 0 for no bar
    pub height: f64,
    /// Distance in pixels from the data area edges
    pub padding: f32,
    /// Text under the horizontal bar
    pub horizontal_label: String,
    /// Text right of the vertical bar
    pub vertical_label: String,
    /// Bar width in pixels
    pub line_width: f32,
    /// Bar color
    pub line_color: ColorU8,
    /// Label font
    pub font: Font,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl ScaleBar {
    /// A scale bar of `width` X units and `height` Y units
    pub fn new(width: f64, height: f64) -> Self {
        ScaleBar {
            width,
            height,
            padding: 10.0,
            horizontal_label: String::new(),
            vertical_label: String::new(),
            line_width: 2.0,
            line_color: color::BLACK,
            font: Font::default(),
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        }
    }

    /// Set the labels of both bars
    pub fn with_labels(mut self, horizontal: impl Into<String>, vertical: impl Into<String>) -> Self {
        self.horizontal_label = horizontal.into();
        self.vertical_label = vertical.into();
        self
    }

    /// Pixel of the corner, leaving room for the vertical label
    fn corner(&self, dims: &PlotDimensions, vertical_label: geom::Size) -> geom::Point {
        geom::Point::from_xy(
            dims.pixel_x(dims.x_max()) - self.padding - vertical_label.width() * 1.2,
            dims.pixel_y(dims.y_min()) - self.padding - vertical_label.height(),
        )
    }
}

impl Plottable for ScaleBar {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(AxisLimits::NONE)
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        Vec::new()
    }

    fn validate(&self, _deep: bool) -> Result<(), DataError> {
        check_real_value("width", self.width)?;
        check_real_value("height", self.height)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let width_px = (self.width * dims.px_per_unit_x()) as f32;
        let height_px = (self.height * dims.px_per_unit_y()) as f32;
        let h_label = canvas.layout_text(&self.horizontal_label, &self.font);
        let v_label = canvas.layout_text(&self.vertical_label, &self.font);

        let corner = self.corner(dims, v_label.size());
        let horiz = geom::Point::from_xy(corner.x - width_px, corner.y);
        let vert = geom::Point::from_xy(corner.x, corner.y - height_px);

        if let Some(stroke) = LineStyle::Solid.stroke(self.line_color, self.line_width) {
            canvas.polyline(&[horiz, corner, vert], stroke);
        }
        canvas.laid_out_text(
            &h_label,
            self.font.color,
            (corner.x + horiz.x) / 2.0,
            corner.y,
            Alignment::UpperCenter,
            0.0,
        );
        canvas.laid_out_text(
            &v_label,
            self.font.color,
            corner.x,
            (corner.y + vert.y) / 2.0,
            Alignment::MiddleLeft,
            0.0,
        );
    }
}
