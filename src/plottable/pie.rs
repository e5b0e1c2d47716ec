//! Pie and donut charts.
use super::{DataError, LegendItem, Plottable, check_real, plottable_common};
use crate::dims::PlotDimensions;
use crate::drawing::{Canvas, sector_path};
use crate::limits::AxisLimits;
use crate::render;
use crate::style::{Alignment, Font, LineStyle, defaults};
use crate::{ColorU8, color, geom};

/// Pixel distance exploded slices are moved out
const EXPLODE_SHIFT: f32 = 3.0;
/// Width of the ring drawn around exploded pies
const EXPLODE_RING_WIDTH: f32 = 20.0;

/// A pie chart centered on the data origin
#[derive(Debug, Clone)]
pub struct PiePlot {
    /// Slice values
    pub values: Vec<f64>,
    /// Slice names, for labels and legend
    pub slice_labels: Option<Vec<String>>,
    /// Slice fill colors
    pub slice_fill_colors: Vec<ColorU8>,
    /// Slice label colors, used when there is one per slice
    pub slice_label_colors: Option<Vec<ColorU8>>,
    /// Color separating exploded slices
    pub background_color: ColorU8,
    /// Separate the slices
    pub explode: bool,
    /// Write values on slices
    pub show_values: bool,
    /// Write percentages on slices
    pub show_percentages: bool,
    /// Write names on slices
    pub show_labels: bool,
    /// Diameter of the hole as a fraction of the pie diameter
    pub donut_size: f64,
    /// Text in the center
    pub donut_label: Option<String>,
    /// Font of the center text
    pub center_font: Font,
    /// Font of slice labels
    pub slice_font: Font,
    /// Outline width, 0 for no outline
    pub outline_size: f32,
    /// Outline color
    pub outline_color: ColorU8,
    /// Label of the whole pie
    pub label: Option<String>,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl PiePlot {
    /// A pie of `values` with one fill color per slice
    pub fn new(values: Vec<f64>, slice_labels: Option<Vec<String>>, colors: Vec<ColorU8>) -> Self {
        PiePlot {
            values,
            slice_labels,
            slice_fill_colors: colors,
            slice_label_colors: None,
            background_color: color::WHITE,
            explode: false,
            show_values: false,
            show_percentages: false,
            show_labels: false,
            donut_size: 0.0,
            donut_label: None,
            center_font: Font::sized(48.0)
                .with_bold(true)
                .with_alignment(Alignment::MiddleCenter),
            slice_font: Font::sized(18.0)
                .with_bold(true)
                .with_color(color::WHITE)
                .with_alignment(Alignment::MiddleCenter),
            outline_size: 0.0,
            outline_color: color::BLACK,
            label: None,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        }
    }

    /// Fraction of the total of each value
    pub fn proportions(&self) -> Vec<f64> {
        let sum: f64 = self.values.iter().sum();
        self.values.iter().map(|v| v / sum).collect()
    }

    fn fill_color(&self, i: usize) -> ColorU8 {
        if self.slice_fill_colors.is_empty() {
            return color::BLACK;
        }
        self.slice_fill_colors[i % self.slice_fill_colors.len()]
    }

    /// Text written on slice `i`
    fn slice_text(&self, i: usize, proportion: f64) -> String {
        let value = if self.show_values {
            format!("{}", self.values[i])
        } else {
            String::new()
        };
        let percent = if self.show_percentages {
            format!("{:.1}%", proportion * 100.0)
        } else {
            String::new()
        };
        let name = match (&self.slice_labels, self.show_labels) {
            (Some(labels), true) => labels.get(i).cloned().unwrap_or_default(),
            _ => String::new(),
        };
        format!("{}\n{}\n{}", value, percent, name)
            .trim()
            .to_string()
    }
}

impl Plottable for PiePlot {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(AxisLimits::new(-0.5, 0.5, -1.0, 1.0))
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let Some(labels) = &self.slice_labels else {
            return Vec::new();
        };
        labels
            .iter()
            .take(self.values.len())
            .enumerate()
            .map(|(i, label)| {
                let mut item = LegendItem::from_parent(self, label, self.fill_color(i));
                item.line_width = defaults::LEGEND_RECT_LINE_WIDTH;
                item
            })
            .collect()
    }

    fn validate(&self, _deep: bool) -> Result<(), DataError> {
        if self.values.is_empty() {
            return Err(DataError::Empty("values"));
        }
        if self.slice_fill_colors.is_empty() {
            return Err(DataError::Empty("colors"));
        }
        check_real("values", &self.values)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let center = dims.point(0.0, 0.0);
        let diameter = 0.9 * dims.data_width().min(dims.data_height());
        let radius = diameter / 2.0;
        let hole = if self.donut_size > 0.0 {
            self.donut_size as f32 * radius
        } else {
            0.0
        };
        let proportions = self.proportions();
        let background = LineStyle::Solid.stroke(self.background_color, 1.0);

        let mut labels = Vec::with_capacity(self.values.len());
        let mut start = -90.0f32;
        for (i, proportion) in proportions.iter().enumerate() {
            let sweep = *proportion as f32 * 360.0;
            let mid = (start + sweep / 2.0).to_radians();
            let (dx, dy) = if self.explode {
                (EXPLODE_SHIFT * mid.cos(), EXPLODE_SHIFT * mid.sin())
            } else {
                (0.0, 0.0)
            };
            let trim = if self.explode { 1.0 } else { 0.0 };
            let slice_center = geom::Point::from_xy(center.x + dx, center.y + dy);
            if let Some(path) = sector_path(slice_center, radius, hole, start, sweep - trim) {
                let stroke = if self.explode { background } else { None };
                canvas.path(&path, Some(self.fill_color(i).into()), stroke, None);
            }

            let label_r = 0.35 * diameter;
            labels.push((
                slice_center.x + mid.cos() * label_r,
                slice_center.y + mid.sin() * label_r,
                self.slice_text(i, *proportion),
            ));
            start += sweep;
        }

        let label_colors = self
            .slice_label_colors
            .as_ref()
            .filter(|c| c.len() == self.values.len());
        for (i, (x, y, txt)) in labels.iter().enumerate() {
            if txt.trim().is_empty() {
                continue;
            }
            let color = label_colors.map_or(self.slice_font.color, |c| c[i]);
            let laid_out = canvas.layout_text(txt, &self.slice_font);
            canvas.laid_out_text(&laid_out, color, *x, *y, Alignment::MiddleCenter, 0.0);
        }

        if self.outline_size > 0.0 {
            if let Some(circle) = geom::PathBuilder::from_circle(center.x, center.y, radius) {
                let stroke = LineStyle::Solid.stroke(self.outline_color, self.outline_size);
                canvas.path(&circle, None, stroke, None);
            }
        }

        if let Some(donut_label) = &self.donut_label {
            canvas.text(donut_label, &self.center_font, center.x, center.y);
        }

        if self.explode {
            if let Some(circle) = geom::PathBuilder::from_circle(center.x, center.y, radius) {
                let stroke = render::Stroke {
                    color: self.background_color,
                    width: EXPLODE_RING_WIDTH,
                    pattern: render::LinePattern::Solid,
                };
                canvas.path(&circle, None, Some(stroke), None);
            }
        }
    }

    fn has_area(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::tests::Recorder;
    use crate::tests::{Near, assert_near};
    use crate::text;

    fn pie() -> PiePlot {
        PiePlot::new(
            vec![1.0, 3.0],
            Some(vec!["a".to_string(), "b".to_string()]),
            vec![color::RED, color::BLUE],
        )
    }

    #[test]
    fn fixed_limits() {
        assert_eq!(pie().axis_limits().unwrap(), AxisLimits::new(-0.5, 0.5, -1.0, 1.0));
    }

    #[test]
    fn legend_per_slice() {
        let items = pie().legend_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].label, "b");
        assert_eq!(items[1].color, color::BLUE);
        assert_eq!(items[1].line_width, 10.0);
        let mut p = pie();
        p.slice_labels = None;
        assert!(p.legend_items().is_empty());
    }

    #[test]
    fn validation() {
        assert!(pie().validate(true).is_ok());
        let mut p = pie();
        p.slice_fill_colors.clear();
        assert_eq!(p.validate(false), Err(DataError::Empty("colors")));
        p = pie();
        p.values[0] = f64::NAN;
        assert_eq!(p.validate(false), Err(DataError::NotReal("values")));
    }

    #[test]
    fn slice_text_lines() {
        let mut p = pie();
        p.show_percentages = true;
        assert_eq!(p.slice_text(0, 0.25), "25.0%");
        p.show_values = true;
        p.show_labels = true;
        assert_eq!(p.slice_text(1, 0.75), "3\n75.0%\nb");
    }

    #[test]
    fn slices_fill_the_circle() {
        let fonts = text::FontDb::new();
        let mut rec = Recorder::default();
        let mut canvas = Canvas::new(&mut rec, &fonts);
        let dims = PlotDimensions::new(
            geom::Size::new(100.0, 100.0),
            geom::Rect::from_xywh(0.0, 0.0, 100.0, 100.0),
            pie().axis_limits().unwrap(),
        );
        pie().render(&mut canvas, &dims);
        assert_eq!(rec.paths.len(), 2);
        // the second slice sweeps 270° starting from the top: it reaches every side
        let (r, fill, _) = rec.paths[1];
        assert_eq!(fill, Some(color::BLUE.into()));
        assert_near!(abs, r.left(), 5.0, 1e-3);
        assert_near!(abs, r.bottom(), 95.0, 1e-3);
        let (first, ..) = rec.paths[0];
        assert_near!(abs, first.left(), 50.0, 1e-3);
        assert_near!(abs, first.top(), 5.0, 1e-3);
    }
}
