//! The legend: a boxed key listing the labels and symbols of the plottables.
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::plottable::{LegendItem, Plottable};
use crate::style::{Alignment, Font, LineStyle, MarkerShape, defaults};
use crate::{ColorU8, color, geom, render, text};

/// The legend of a plot.
///
/// Items are collected by [`update_items`](Legend::update_items), which the plot
/// calls before every render.
#[derive(Debug, Clone)]
pub struct Legend {
    /// Where the legend sits in the data area
    pub location: Alignment,
    /// Draw every line symbol 1 px wide
    pub fixed_line_width: bool,
    /// List the items last to first
    pub reverse_order: bool,
    /// Whether the legend is drawn
    pub is_visible: bool,
    /// Font of the labels
    pub font: Font,
    /// Background color
    pub fill_color: ColorU8,
    /// Border color
    pub outline_color: ColorU8,
    /// Shadow color
    pub shadow_color: ColorU8,
    /// Horizontal shadow offset in pixels
    pub shadow_offset_x: f32,
    /// Vertical shadow offset in pixels
    pub shadow_offset_y: f32,
    /// Distance from the edges of the data area in pixels
    pub padding: f32,
    items: Vec<LegendItem>,
}

impl Default for Legend {
    fn default() -> Self {
        Legend {
            location: Alignment::LowerRight,
            fixed_line_width: false,
            reverse_order: false,
            is_visible: false,
            font: Font::default(),
            fill_color: color::WHITE,
            outline_color: color::BLACK,
            shadow_color: defaults::LEGEND_SHADOW_COLOR,
            shadow_offset_x: defaults::LEGEND_SHADOW_OFFSET,
            shadow_offset_y: defaults::LEGEND_SHADOW_OFFSET,
            padding: defaults::LEGEND_PADDING,
            items: Vec::new(),
        }
    }
}

/// Measured layout of the legend box
#[derive(Debug, Clone, Copy, PartialEq)]
struct Metrics {
    row_height: f32,
    size: geom::Size,
}

impl Legend {
    /// An invisible legend in the lower right corner
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the items with a label from the visible plottables,
    /// or from all of them with `include_hidden`
    pub fn update_items(&mut self, plottables: &[Box<dyn Plottable>], include_hidden: bool) {
        self.items = plottables
            .iter()
            .filter(|p| p.is_visible() || include_hidden)
            .flat_map(|p| p.legend_items())
            .filter(LegendItem::has_label)
            .collect();
        if self.reverse_order {
            self.items.reverse();
        }
        log::trace!("legend updated with {} items", self.items.len());
    }

    /// Items collected at the last update
    pub fn items(&self) -> &[LegendItem] {
        &self.items
    }

    /// Number of items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether there is anything to show
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Width reserved for the symbols, text included
    pub fn symbol_width(&self) -> f32 {
        defaults::LEGEND_SYMBOL_WIDTH * self.font.size / defaults::FONT_SIZE
    }

    /// Margin around the symbols
    pub fn symbol_pad(&self) -> f32 {
        self.font.size / 3.0
    }

    fn label_font(&self) -> Font {
        Font {
            alignment: Alignment::UpperLeft,
            rotation: 0.0,
            ..self.font.clone()
        }
    }

    fn metrics(&self, fonts: &text::FontDb) -> Metrics {
        let font = self.label_font();
        let query = font.query();
        let (w, h) = self
            .items
            .iter()
            .map(|item| {
                text::Text::layout(&item.label, &query, font.size, font.alignment.text_align(), fonts)
                    .size()
            })
            .fold((0.0f32, 0.0f32), |(w, h), sz| (w.max(sz.width()), h.max(sz.height())));
        Metrics {
            row_height: h,
            size: geom::Size::new(
                self.symbol_width() + w + self.symbol_pad(),
                h * self.items.len() as f32,
            ),
        }
    }

    /// Size of the legend box, shadow excluded
    pub fn size(&self, fonts: &text::FontDb) -> geom::Size {
        self.metrics(fonts).size
    }

    /// Top left corner of a legend box of `size` placed in the data area
    pub fn location_px(&self, dims: &PlotDimensions, size: geom::Size) -> geom::Point {
        let data = dims.data_rect();
        let left = data.left() + self.padding;
        let right = data.right() - self.padding - size.width();
        let center_x = data.center_x() - size.width() / 2.0;
        let top = data.top() + self.padding;
        let bottom = data.bottom() - self.padding - size.height();
        let center_y = data.center_y() - size.height() / 2.0;
        let (x, y) = match self.location {
            Alignment::UpperLeft => (left, top),
            Alignment::UpperCenter => (center_x, top),
            Alignment::UpperRight => (right, top),
            Alignment::MiddleLeft => (left, center_y),
            Alignment::MiddleCenter => (center_x, center_y),
            Alignment::MiddleRight => (right, center_y),
            Alignment::LowerLeft => (left, bottom),
            Alignment::LowerCenter => (center_x, bottom),
            Alignment::LowerRight => (right, bottom),
        };
        geom::Point::from_xy(x, y)
    }

    /// Draw the legend in the data area of `dims`
    pub fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        if !self.is_visible || self.items.is_empty() {
            return;
        }
        let metrics = self.metrics(canvas.fonts());
        let origin = self.location_px(dims, metrics.size);
        self.render_at(canvas, origin, metrics);
    }

    /// Draw the legend alone, with its top left corner at the canvas origin.
    /// Returns the size of the legend box, or None without items.
    pub fn render_standalone(&self, canvas: &mut Canvas) -> Option<geom::Size> {
        if self.items.is_empty() {
            return None;
        }
        let metrics = self.metrics(canvas.fonts());
        self.render_at(canvas, geom::Point::from_xy(0.0, 0.0), metrics);
        Some(metrics.size)
    }

    fn render_at(&self, canvas: &mut Canvas, origin: geom::Point, metrics: Metrics) {
        let (x, y) = (origin.x, origin.y);
        let frame = geom::Rect::from_ps(origin, metrics.size);

        if !self.shadow_color.is_transparent() {
            canvas.fill_rect(
                frame.translate(self.shadow_offset_x, self.shadow_offset_y),
                self.shadow_color,
            );
        }
        canvas.rect(
            frame,
            Some(render::Paint::Solid(self.fill_color)),
            LineStyle::Solid.stroke(self.outline_color, 1.0),
        );

        let font = self.label_font();
        let row_height = metrics.row_height;
        let symbol_width = self.symbol_width();
        let pad = self.symbol_pad();
        let hidden = self.fill_color.with_alpha(defaults::LEGEND_HIDDEN_ALPHA);

        for (i, item) in self.items.iter().enumerate() {
            let row_y = y + i as f32 * row_height;
            canvas.text(&item.label, &font, x + symbol_width, row_y);

            let line_y = row_y + row_height / 2.0;
            let x1 = x + pad;
            let x2 = x1 + symbol_width - 2.0 * pad;

            if item.show_as_rectangle() {
                let h = defaults::LEGEND_SYMBOL_HEIGHT;
                let rect = geom::Rect::from_xywh(x1, line_y - h / 2.0, x2 - x1, h);
                canvas.rect(
                    rect,
                    Some(render::Paint::hatched(item.color, item.hatch_color, item.hatch_style)),
                    item.border_style.stroke(item.border_color, item.border_width),
                );
            } else {
                let width = if self.fixed_line_width { 1.0 } else { item.line_width };
                canvas.styled_line(
                    geom::Point::from_xy(x1, line_y),
                    geom::Point::from_xy(x2, line_y),
                    item.line_color,
                    width,
                    item.line_style,
                );
                if item.marker_shape != MarkerShape::None && item.marker_size > 0.0 {
                    canvas.marker(
                        geom::Point::from_xy((x1 + x2) / 2.0, line_y),
                        item.marker_shape,
                        item.marker_size,
                        item.marker_color,
                        item.marker_line_width,
                    );
                }
            }

            if !item.parent_visible {
                canvas.fill_rect(
                    geom::Rect::from_xywh(x1, row_y, metrics.size.width(), row_height),
                    hidden,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::tests::Recorder;
    use crate::limits::AxisLimits;
    use crate::plottable::tests::{Dummy, dims};
    use crate::plottable::{LineProps, MarkerProps};
    use crate::tests::{Near, assert_near};

    fn lined(visible: bool) -> Box<dyn Plottable> {
        let mut d = Dummy::new(AxisLimits::NONE);
        d.is_visible = visible;
        d.line = Some(LineProps {
            color: color::BLUE,
            width: 2.0,
            style: LineStyle::Solid,
        });
        Box::new(d)
    }

    fn render(legend: &Legend) -> Recorder {
        let fonts = text::FontDb::new();
        let mut rec = Recorder::default();
        let mut canvas = Canvas::new(&mut rec, &fonts);
        legend.render(&mut canvas, &dims());
        rec
    }

    #[test]
    fn items_from_visible_plottables() {
        let plottables = vec![lined(true), lined(false), lined(true)];
        let mut legend = Legend::new();
        legend.update_items(&plottables, false);
        assert_eq!(legend.count(), 2);
        legend.update_items(&plottables, true);
        assert_eq!(legend.count(), 3);
        assert!(!legend.items()[1].parent_visible);
    }

    #[test]
    fn reverse_order() {
        let mut d = Dummy::new(AxisLimits::NONE);
        d.area = true;
        let plottables: Vec<Box<dyn Plottable>> = vec![Box::new(d), lined(true)];
        let mut legend = Legend {
            reverse_order: true,
            ..Legend::default()
        };
        legend.update_items(&plottables, false);
        assert!(!legend.items()[0].parent_has_area);
        assert!(legend.items()[1].parent_has_area);
    }

    #[test]
    fn size_and_location() {
        let mut legend = Legend::new();
        legend.update_items(&[lined(true), lined(true)], false);
        // estimated metrics: "dummy" is 5 × 12 × 0.6 wide and 12 × 1.2 high
        let size = legend.size(&text::FontDb::new());
        assert_near!(abs, size.width(), 40.0 + 36.0 + 4.0, 1e-3);
        assert_near!(abs, size.height(), 28.8, 1e-3);

        let p = legend.location_px(&dims(), size);
        assert_near!(abs, p.x, 15.0, 1e-3);
        assert_near!(abs, p.y, 66.2, 1e-3);

        legend.location = Alignment::UpperLeft;
        let p = legend.location_px(&dims(), size);
        assert_eq!((p.x, p.y), (5.0, 5.0));
        legend.location = Alignment::MiddleCenter;
        let p = legend.location_px(&dims(), size);
        assert_near!(abs, p.x, 10.0, 1e-3);
    }

    #[test]
    fn hidden_legend_draws_nothing() {
        let mut legend = Legend::new();
        legend.update_items(&[lined(true)], false);
        assert!(render(&legend).paths.is_empty());
        legend.is_visible = true;
        legend.update_items(&[], false);
        assert!(render(&legend).paths.is_empty());
    }

    #[test]
    fn render_symbols() {
        let mut legend = Legend {
            is_visible: true,
            ..Legend::default()
        };
        let mut marked = Dummy::new(AxisLimits::NONE);
        marked.marker = Some(MarkerProps {
            color: color::GREEN,
            shape: MarkerShape::FilledSquare,
            size: 6.0,
            line_width: 1.0,
        });
        let mut area = Dummy::new(AxisLimits::NONE);
        area.area = true;
        legend.update_items(&[lined(true), Box::new(marked), Box::new(area)], false);

        let rec = render(&legend);
        // shadow, box, line, marker, rectangle
        assert_eq!(rec.paths.len(), 5);
        assert_eq!(rec.paths[0].1, Some(render::Paint::Solid(legend.shadow_color)));
        assert_eq!(rec.paths[1].2, Some(color::BLACK));
        assert_eq!(rec.paths[2].2, Some(color::BLUE));
        assert_eq!(rec.paths[3].1, Some(render::Paint::Solid(color::GREEN)));
        let (rect, fill, _) = rec.paths[4];
        assert_near!(abs, rect.height(), 10.0, 1e-3);
        assert_eq!(fill, Some(render::Paint::Solid(color::RED)));
    }

    #[test]
    fn hidden_items_are_veiled() {
        let mut legend = Legend {
            is_visible: true,
            shadow_color: color::TRANSPARENT,
            ..Legend::default()
        };
        legend.update_items(&[lined(false)], true);
        let rec = render(&legend);
        // box, line, veil
        assert_eq!(rec.paths.len(), 3);
        let veil = color::WHITE.with_alpha(defaults::LEGEND_HIDDEN_ALPHA);
        assert_eq!(rec.paths[2].1, Some(render::Paint::Solid(veil)));
    }

    #[test]
    fn standalone_starts_at_origin() {
        let mut legend = Legend::new();
        legend.update_items(&[lined(true)], false);
        let fonts = text::FontDb::new();
        let mut rec = Recorder::default();
        let mut canvas = Canvas::new(&mut rec, &fonts);
        let size = legend.render_standalone(&mut canvas).unwrap();
        assert_near!(abs, size.height(), 14.4, 1e-3);
        let (frame, _, _) = rec.paths[1];
        assert_near!(abs, frame.left(), 0.0, 1e-3);
        assert_near!(abs, frame.top(), 0.0, 1e-3);
    }
}
