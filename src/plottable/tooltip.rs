//! Speech bubble pointing at a data point.
use super::{DataError, LegendItem, Plottable, check_real_value, plottable_common};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{Alignment, Font, LineStyle};
use crate::{ColorU8, color, geom};

/// A label in a bubble whose arrow points at `(x, y)`
#[derive(Debug, Clone)]
pub struct Tooltip {
    /// Text of the bubble
    pub label: String,
    /// X of the pointed location
    pub x: f64,
    /// Y of the pointed location
    pub y: f64,
    /// Outline width
    pub border_width: f32,
    /// Outline color
    pub border_color: ColorU8,
    /// Bubble color
    pub fill_color: ColorU8,
    /// Text font
    pub font: Font,
    /// Size of the arrow in pixels
    pub arrow_size: f32,
    /// Space between the text and the outline in pixels
    pub label_padding: f32,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl Tooltip {
    /// A tooltip reading `label` pointing at `(x, y)`
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Tooltip {
            label: label.into(),
            x,
            y,
            border_width: 2.0,
            border_color: color::BLACK,
            fill_color: color::WHITE,
            font: Font::default(),
            arrow_size: 5.0,
            label_padding: 10.0,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        }
    }

    /// Outline of the bubble, and the top-left corner of its text.
    /// The outline ends on its second point again so thick borders join cleanly.
    fn bubble(&self, dims: &PlotDimensions, label: geom::Size) -> ([geom::Point; 9], geom::Point) {
        let tip = dims.point(self.x, self.y);
        let on_right = dims.data_rect().right() - tip.x - label.width() > 0.0;
        let sign = if on_right { 1.0 } else { -1.0 };
        let pad = self.label_padding;

        let inside_x = tip.x + sign * self.arrow_size;
        let upper = geom::Point::from_xy(inside_x, tip.y - self.arrow_size);
        let lower = geom::Point::from_xy(inside_x, tip.y + self.arrow_size);
        let top = upper.y - pad;
        let bottom = (top + label.height()).max(lower.y) + 2.0 * pad;
        let outside_x = inside_x + sign * (label.width() + pad);

        let points = [
            tip,
            upper,
            geom::Point::from_xy(inside_x, top),
            geom::Point::from_xy(outside_x, top),
            geom::Point::from_xy(outside_x, bottom),
            geom::Point::from_xy(inside_x, bottom),
            lower,
            tip,
            upper,
        ];
        let text_x = inside_x + if on_right { 0.0 } else { -label.width() } + sign * pad / 2.0;
        (points, geom::Point::from_xy(text_x, upper.y))
    }
}

impl Plottable for Tooltip {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(AxisLimits::NONE)
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        Vec::new()
    }

    fn validate(&self, _deep: bool) -> Result<(), DataError> {
        if self.label.trim().is_empty() {
            return Err(DataError::EmptyLabel);
        }
        check_real_value("x", self.x)?;
        check_real_value("y", self.y)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let laid_out = canvas.layout_text(&self.label, &self.font);
        let (points, text_at) = self.bubble(dims, laid_out.size());
        if let Some(path) = geom::polyline(&points, false) {
            let stroke = LineStyle::Solid.stroke(self.border_color, self.border_width);
            canvas.path(&path, Some(self.fill_color.into()), stroke, None);
        }
        canvas.laid_out_text(
            &laid_out,
            self.font.color,
            text_at.x,
            text_at.y,
            Alignment::UpperLeft,
            0.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plottable::tests::{dims, record};

    // 12 px font without face: 7.2 px per char, 14.4 px per line
    const LABEL: geom::Size = geom::Size::new(21.6, 14.4);

    #[test]
    fn bubble_on_the_right() {
        let t = Tooltip::new("abc", 2.0, 5.0);
        let (points, text_at) = t.bubble(&dims(), LABEL);
        assert_eq!(points.len(), 9);
        assert_eq!((points[0].x, points[0].y), (20.0, 50.0));
        assert_eq!((points[1].x, points[1].y), (25.0, 45.0));
        assert!((points[3].x - (25.0 + 21.6 + 10.0)).abs() < 1e-3);
        assert_eq!(points[4].y, 75.0);
        assert_eq!(points[7], points[0]);
        assert_eq!(points[8], points[1]);
        assert!((text_at.x - 30.0).abs() < 1e-3);
    }

    #[test]
    fn bubble_flips_near_the_right_edge() {
        let t = Tooltip::new("abc", 9.0, 5.0);
        let (points, text_at) = t.bubble(&dims(), LABEL);
        assert_eq!(points[1].x, 85.0);
        assert!(points[3].x < points[1].x);
        assert!((text_at.x - (85.0 - 21.6 - 5.0)).abs() < 1e-3);
    }

    #[test]
    fn validation() {
        assert_eq!(
            Tooltip::new("  ", 0.0, 0.0).validate(false),
            Err(DataError::EmptyLabel)
        );
        assert!(Tooltip::new("a", f64::INFINITY, 0.0).validate(false).is_err());
        assert!(Tooltip::new("a", 1.0, 0.0).validate(true).is_ok());
    }

    #[test]
    fn render_bubble() {
        let rec = record(&Tooltip::new("abc", 2.0, 5.0));
        assert_eq!(rec.paths.len(), 1);
        let (_, fill, stroke) = rec.paths[0];
        assert_eq!(fill, Some(color::WHITE.into()));
        assert_eq!(stroke, Some(color::BLACK));
    }
}
