//! Coxcomb charts: equal angle sectors whose radius follows the value.
use super::{DataError, LegendItem, Plottable, check_not_empty, check_real, plottable_common};
use crate::dims::PlotDimensions;
use crate::drawing::{Canvas, sector_path};
use crate::limits::AxisLimits;
use crate::style::{Alignment, Font, LineStyle, defaults};
use crate::{ColorU8, color, geom};

/// Fractions of the largest value where the web is drawn
const WEB_TICKS: [f64; 3] = [0.25, 0.5, 1.0];

/// Shape of the web drawn under the sectors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoxcombAxis {
    /// Concentric circles
    #[default]
    Circle,
    /// Concentric polygons with one corner per category
    Polygon,
}

/// A polar area chart
#[derive(Debug, Clone)]
pub struct CoxcombPlot {
    values: Vec<f64>,
    normalized: Vec<f64>,
    /// One fill color per category
    pub fill_colors: Vec<ColorU8>,
    /// Color of the web
    pub web_color: ColorU8,
    /// Shape of the web
    pub axis_type: CoxcombAxis,
    /// Write the value of each web level
    pub show_axis_values: bool,
    /// Category names, for the legend
    pub slice_labels: Option<Vec<String>>,
    /// Font of the web values
    pub font: Font,
    /// Label of the whole chart
    pub label: Option<String>,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

fn normalize(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / max).collect()
}

impl CoxcombPlot {
    /// A chart of `values` with one fill color per category
    pub fn new(values: Vec<f64>, fill_colors: Vec<ColorU8>) -> Self {
        CoxcombPlot {
            normalized: normalize(&values),
            values,
            fill_colors,
            web_color: color::GRAY,
            axis_type: CoxcombAxis::Circle,
            show_axis_values: true,
            slice_labels: None,
            font: Font::sized(defaults::TICK_LABEL_FONT_SIZE).with_color(color::GRAY),
            label: None,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        }
    }

    /// Set the category names
    pub fn with_slice_labels(mut self, labels: Vec<String>) -> Self {
        self.slice_labels = Some(labels);
        self
    }

    /// Set the web shape
    pub fn with_axis_type(mut self, axis_type: CoxcombAxis) -> Self {
        self.axis_type = axis_type;
        self
    }

    /// Category values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values divided by the largest one
    pub fn normalized(&self) -> &[f64] {
        &self.normalized
    }

    /// Replace the values
    pub fn set_values(&mut self, values: Vec<f64>) {
        self.normalized = normalize(&values);
        self.values = values;
    }

    fn fill_color(&self, i: usize) -> ColorU8 {
        if self.fill_colors.is_empty() {
            return color::BLACK;
        }
        self.fill_colors[i % self.fill_colors.len()]
    }

    fn render_web(&self, canvas: &mut Canvas, center: geom::Point, max_radius: f32) {
        let Some(stroke) = LineStyle::Solid.stroke(self.web_color, 1.0) else {
            return;
        };
        let n = self.values.len();
        let max_value = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let corner = |r: f32, i: usize| {
            let a = (-90.0 + 360.0 * i as f32 / n as f32).to_radians();
            geom::Point::from_xy(center.x + r * a.cos(), center.y + r * a.sin())
        };

        for tick in WEB_TICKS {
            let r = max_radius * tick as f32;
            match self.axis_type {
                CoxcombAxis::Circle => {
                    if let Some(circle) = geom::PathBuilder::from_circle(center.x, center.y, r) {
                        canvas.path(&circle, None, Some(stroke), None);
                    }
                }
                CoxcombAxis::Polygon => {
                    let points: Vec<_> = (0..n).map(|i| corner(r, i)).collect();
                    canvas.polygon(&points, None, Some(stroke));
                }
            }
            if self.show_axis_values {
                let txt = format!("{:.2}", tick * max_value);
                let font = self.font.clone().with_alignment(Alignment::LowerLeft);
                canvas.text(&txt, &font, center.x, center.y - r);
            }
        }

        for i in 0..n {
            canvas.line(center, corner(max_radius, i), stroke);
        }
    }
}

impl Plottable for CoxcombPlot {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(AxisLimits::new(-2.5, 2.5, -2.5, 2.5))
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
        check_not_empty("values", &self.values)?;
        if self.fill_colors.is_empty() {
            return Err(DataError::Empty("fill colors"));
        }
        check_real("values", &self.values)
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let n = self.normalized.len();
        if n == 0 {
            return;
        }
        let center = dims.point(0.0, 0.0);
        let max_radius = dims.px_per_unit_x() as f32;
        self.render_web(canvas, center, max_radius);

        let sweep = 360.0 / n as f32;
        let mut start = -90.0f32;
        for (i, value) in self.normalized.iter().enumerate() {
            let radius = max_radius * *value as f32;
            if let Some(path) = sector_path(center, radius, 0.0, start, sweep) {
                canvas.path(&path, Some(self.fill_color(i).into()), None, None);
            }
            start += sweep;
        }
    }

    fn has_area(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plottable::tests::record;
    use crate::render::Paint;

    #[test]
    fn values_are_normalized() {
        let c = CoxcombPlot::new(vec![1.0, 4.0, 2.0], vec![color::RED]);
        assert_eq!(c.normalized(), &[0.25, 1.0, 0.5]);
        let z = CoxcombPlot::new(vec![0.0, 0.0], vec![color::RED]);
        assert_eq!(z.normalized(), &[0.0, 0.0]);
    }

    #[test]
    fn legend_per_category() {
        let c = CoxcombPlot::new(vec![1.0, 2.0], vec![color::RED, color::BLUE])
            .with_slice_labels(vec!["a".into(), "b".into()]);
        let items = c.legend_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].color, color::BLUE);
        assert!(items[0].show_as_rectangle());
        assert!(CoxcombPlot::new(vec![1.0], vec![]).validate(false).is_err());
    }

    #[test]
    fn sectors_follow_values() {
        let mut c = CoxcombPlot::new(vec![1.0, 2.0], vec![color::RED, color::BLUE]);
        c.show_axis_values = false;
        let rec = record(&c);
        let sectors: Vec<_> = rec
            .paths
            .iter()
            .filter(|(_, fill, _)| matches!(fill, Some(Paint::Solid(c)) if *c != color::GRAY))
            .collect();
        assert_eq!(sectors.len(), 2);
        // the largest value reaches one data unit, 10 px from the origin
        let (blue, ..) = sectors[1];
        assert!((blue.height() - 20.0).abs() < 1e-3);
        let (red, ..) = sectors[0];
        assert!((red.height() - 10.0).abs() < 1e-3);
    }
}
