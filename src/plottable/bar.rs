//! Bar plots with optional error bars and value labels.
use super::{
    DataError, LegendItem, Plottable, check_not_empty, check_real, check_same_len,
    plottable_common,
};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{Alignment, Font, LineStyle, Palette};
use crate::{ColorU8, color, geom};

/// Direction bars grow in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Bars grow upward from the X axis
    #[default]
    Vertical,
    /// Bars grow rightward from the Y axis
    Horizontal,
}

/// Formats a value with the shortest representation
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

/// A series of bars
#[derive(Debug, Clone)]
pub struct BarPlot {
    positions: Vec<f64>,
    values: Vec<f64>,
    value_offsets: Vec<f64>,
    value_errors: Vec<f64>,
    /// Direction of the bars
    pub orientation: Orientation,
    /// Added to every position
    pub position_offset: f64,
    /// Write each value next to its bar
    pub show_values_above_bars: bool,
    /// Converts values to label text
    pub value_formatter: fn(f64) -> String,
    /// Value bars start from
    pub value_base: f64,
    /// Bar width in position units
    pub bar_width: f64,
    /// Error cap width as a fraction of the bar width
    pub error_cap_size: f64,
    /// Width of the error bars in pixels
    pub error_line_width: f32,
    /// Bar fill color
    pub fill_color: ColorU8,
    /// Bar outline color
    pub border_color: ColorU8,
    /// Bar outline width in pixels
    pub border_line_width: f32,
    /// Error bar color
    pub error_color: ColorU8,
    /// Font of the value labels
    pub font: Font,
    /// Legend label
    pub label: Option<String>,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl BarPlot {
    /// Bars of `values` at `positions`, without error nor offset
    pub fn new(positions: Vec<f64>, values: Vec<f64>) -> Result<Self, DataError> {
        let mut bar = BarPlot {
            positions: Vec::new(),
            values: Vec::new(),
            value_offsets: Vec::new(),
            value_errors: Vec::new(),
            orientation: Orientation::Vertical,
            position_offset: 0.0,
            show_values_above_bars: false,
            value_formatter: format_value,
            value_base: 0.0,
            bar_width: 0.8,
            error_cap_size: 0.4,
            error_line_width: 1.0,
            fill_color: Palette::default().get(0),
            border_color: color::BLACK,
            border_line_width: 1.0,
            error_color: color::BLACK,
            font: Font::default(),
            label: None,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        };
        bar.replace(positions, values)?;
        Ok(bar)
    }

    /// Replace positions and values. Errors and offsets are reset to zero.
    pub fn replace(&mut self, positions: Vec<f64>, values: Vec<f64>) -> Result<(), DataError> {
        check_same_len("positions and values", positions.len(), values.len())?;
        self.value_errors = vec![0.0; values.len()];
        self.value_offsets = vec![0.0; values.len()];
        self.positions = positions;
        self.values = values;
        Ok(())
    }

    /// Set the error of each bar
    pub fn set_value_errors(&mut self, errors: Vec<f64>) -> Result<(), DataError> {
        check_same_len("values and errors", self.values.len(), errors.len())?;
        self.value_errors = errors;
        Ok(())
    }

    /// Set the offset each bar starts from, for stacked bars
    pub fn set_value_offsets(&mut self, offsets: Vec<f64>) -> Result<(), DataError> {
        check_same_len("values and offsets", self.values.len(), offsets.len())?;
        self.value_offsets = offsets;
        Ok(())
    }

    /// Set the orientation
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the fill color
    pub fn with_fill_color(mut self, color: ColorU8) -> Self {
        self.fill_color = color;
        self
    }

    /// Set the legend label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Bar positions
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Bar values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Bar errors
    pub fn value_errors(&self) -> &[f64] {
        &self.value_errors
    }

    /// Bar offsets
    pub fn value_offsets(&self) -> &[f64] {
        &self.value_offsets
    }

    fn vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// Pixel of a (position, value) pair
    fn point(&self, dims: &PlotDimensions, position: f64, value: f64) -> geom::Point {
        if self.vertical() {
            dims.point(position, value)
        } else {
            dims.point(value, position)
        }
    }

    fn render_bar(&self, canvas: &mut Canvas, dims: &PlotDimensions, i: usize) {
        let position = self.positions[i] + self.position_offset;
        let value = self.values[i];
        let offset = self.value_offsets[i];
        let error = self.value_errors[i].abs();
        let half = self.bar_width / 2.0;

        let value1 = self.value_base.min(value) + offset;
        let value2 = self.value_base.max(value) + offset;
        let rect = geom::Rect::from_corners(
            self.point(dims, position - half, value1),
            self.point(dims, position + half, value2),
        );
        let stroke = LineStyle::Solid.stroke(self.border_color, self.border_line_width);
        canvas.rect(rect, Some(self.fill_color.into()), stroke);

        if self.error_line_width > 0.0 && error > 0.0 {
            let tip = if value > 0.0 { value2 } else { value1 };
            let (e1, e2) = (tip - error, tip + error);
            let cap = self.error_cap_size * half;
            canvas.styled_line(
                self.point(dims, position, e1),
                self.point(dims, position, e2),
                self.error_color,
                self.error_line_width,
                LineStyle::Solid,
            );
            for e in [e1, e2] {
                canvas.styled_line(
                    self.point(dims, position - cap, e),
                    self.point(dims, position + cap, e),
                    self.error_color,
                    self.error_line_width,
                    LineStyle::Solid,
                );
            }
        }

        if self.show_values_above_bars {
            let txt = (self.value_formatter)(value);
            let anchor = self.point(dims, position, value2);
            let alignment = if self.vertical() {
                Alignment::LowerCenter
            } else {
                Alignment::MiddleLeft
            };
            let font = self.font.clone().with_alignment(alignment);
            canvas.text(&txt, &font, anchor.x, anchor.y);
        }
    }
}

impl Plottable for BarPlot {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        let mut value_min = f64::INFINITY;
        let mut value_max = f64::NEG_INFINITY;
        let mut position_min = f64::INFINITY;
        let mut position_max = f64::NEG_INFINITY;
        for i in 0..self.positions.len() {
            value_min = value_min.min(self.value_offsets[i] - self.value_errors[i]);
            value_max =
                value_max.max(self.value_offsets[i] + self.value_errors[i] + self.values[i]);
            position_min = position_min.min(self.positions[i]);
            position_max = position_max.max(self.positions[i]);
        }
        value_min = value_min.min(self.value_base);
        value_max = value_max.max(self.value_base);
        if self.show_values_above_bars {
            value_max += (value_max - value_min) * 0.1;
        }
        let half = self.bar_width / 2.0;
        position_min += self.position_offset - half;
        position_max += self.position_offset + half;

        let limits = AxisLimits::new(position_min, position_max, value_min, value_max);
        Ok(if self.vertical() { limits } else { limits.swapped() })
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let label = self.label.as_deref().unwrap_or_default();
        let mut item = LegendItem::from_parent(self, label, self.fill_color);
        item.border_color = self.border_color;
        item.border_width = self.border_line_width;
        vec![item]
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        check_not_empty("values", &self.values)?;
        check_same_len("positions and values", self.values.len(), self.positions.len())?;
        if deep {
            check_real("positions", &self.positions)?;
            check_real("values", &self.values)?;
            check_real("value errors", &self.value_errors)?;
            check_real("value offsets", &self.value_offsets)?;
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        for i in 0..self.positions.len() {
            self.render_bar(canvas, dims, i);
        }
    }

    fn has_area(&self) -> bool {
        true
    }
}
