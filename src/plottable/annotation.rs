//! Text boxes placed in pixel units over the data area.
use super::{DataError, LegendItem, Plottable, check_real_value, plottable_common};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{Alignment, Font, LineStyle, defaults};
use crate::{ColorU8, color, geom, render};

/// Distance in pixels between the box and its shadow
const SHADOW_OFFSET: f32 = 5.0;

/// A label at a fixed pixel position of the data area.
///
/// Positive `x` and `y` are measured from the left and top edges of the data area,
/// negative ones from the right and bottom edges.
#[derive(Debug, Clone)]
pub struct Annotation {
    /// Horizontal position in pixels
    pub x: f64,
    /// Vertical position in pixels
    pub y: f64,
    /// Text to display
    pub label: String,
    /// Text font
    pub font: Font,
    /// Draw a box behind the text
    pub background: bool,
    /// Color of the box
    pub background_color: ColorU8,
    /// Draw a shadow under the box
    pub shadow: bool,
    /// Color of the shadow
    pub shadow_color: ColorU8,
    /// Outline the box
    pub border: bool,
    /// Outline width
    pub border_width: f32,
    /// Outline color
    pub border_color: ColorU8,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl Annotation {
    /// An annotation reading `label` at pixel `(x, y)`
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Annotation {
            x,
            y,
            label: label.into(),
            font: Font::default(),
            background: true,
            background_color: color::YELLOW,
            shadow: true,
            shadow_color: defaults::SHADOW_COLOR,
            border: true,
            border_width: 1.0,
            border_color: color::BLACK,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        }
    }

    /// Set the font
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Figure pixel rectangle of a box of `size`
    fn location(&self, dims: &PlotDimensions, size: geom::Size) -> geom::Rect {
        let x = if self.x >= 0.0 {
            self.x as f32
        } else {
            dims.data_width() + self.x as f32 - size.width()
        };
        let y = if self.y >= 0.0 {
            self.y as f32
        } else {
            dims.data_height() + self.y as f32 - size.height()
        };
        geom::Rect::from_xywh(
            x + dims.data_offset_x(),
            y + dims.data_offset_y(),
            size.width(),
            size.height(),
        )
    }
}

impl Plottable for Annotation {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(AxisLimits::NONE)
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        Vec::new()
    }

    fn validate(&self, _deep: bool) -> Result<(), DataError> {
        check_real_value("x", self.x)?;
        check_real_value("y", self.y)
    }

    fn render(&self, _canvas: &mut Canvas, _dims: &PlotDimensions) {}

    fn render_overlay(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let laid_out = canvas.layout_text(&self.label, &self.font);
        let rect = self.location(dims, laid_out.size());

        if self.background && self.shadow {
            canvas.fill_rect(rect.translate(SHADOW_OFFSET, SHADOW_OFFSET), self.shadow_color);
        }
        let fill = self
            .background
            .then_some(render::Paint::Solid(self.background_color));
        let stroke = if self.border {
            LineStyle::Solid.stroke(self.border_color, self.border_width)
        } else {
            None
        };
        canvas.rect(rect, fill, stroke);
        canvas.laid_out_text(
            &laid_out,
            self.font.color,
            rect.left(),
            rect.top(),
            Alignment::UpperLeft,
            0.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::tests::Recorder;
    use crate::plottable::tests::dims;
    use crate::render::Paint;
    use crate::text;

    fn overlay(a: &Annotation) -> Recorder {
        let fonts = text::FontDb::new();
        let mut rec = Recorder::default();
        let mut canvas = Canvas::new(&mut rec, &fonts);
        a.render(&mut canvas, &dims());
        a.render_overlay(&mut canvas, &dims());
        rec
    }

    #[test]
    fn shadow_then_box() {
        let rec = overlay(&Annotation::new("abc", 10.0, 20.0));
        assert_eq!(rec.paths.len(), 2);
        let (shadow, fill, _) = rec.paths[0];
        assert_eq!(fill, Some(Paint::Solid(defaults::SHADOW_COLOR)));
        assert_eq!((shadow.left(), shadow.top()), (15.0, 25.0));
        let (bx, fill, stroke) = rec.paths[1];
        assert_eq!(fill, Some(Paint::Solid(color::YELLOW)));
        assert_eq!(stroke, Some(color::BLACK));
        assert_eq!((bx.left(), bx.top()), (10.0, 20.0));
    }

    #[test]
    fn negative_positions_anchor_bottom_right() {
        let mut a = Annotation::new("abc", -10.0, -10.0);
        a.shadow = false;
        let rec = overlay(&a);
        assert_eq!(rec.paths.len(), 1);
        let (bx, ..) = rec.paths[0];
        assert!((bx.right() - 90.0).abs() < 1e-3);
        assert!((bx.bottom() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn no_limits_no_legend() {
        let a = Annotation::new("abc", 1.0, 1.0);
        assert!(!a.axis_limits().unwrap().has_x());
        assert!(a.legend_items().is_empty());
        assert!(Annotation::new("abc", f64::NAN, 1.0).validate(false).is_err());
    }
}
