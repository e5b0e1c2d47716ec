//! Filled polygons, alone or by the thousand.
use super::{
    DataError, Highlightable, LegendItem, LineProps, Plottable, check_not_empty, check_real,
    check_same_len, plottable_common,
};
use crate::data::Coordinate;
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::render::Paint;
use crate::style::{Hatch, LineStyle, MarkerShape, defaults};
use crate::{ColorU8, color, geom};

/// Outline and fill shared by [`Polygon`] and [`Polygons`]
#[derive(Debug, Clone)]
pub struct PolygonStyle {
    /// Outline width, before highlighting
    pub line_width: f32,
    /// Outline color
    pub line_color: ColorU8,
    /// Whether the inside is painted
    pub fill: bool,
    /// Inside color
    pub fill_color: ColorU8,
    /// Hatch color
    pub hatch_color: ColorU8,
    /// Hatch pattern drawn over the fill color
    pub hatch_style: Hatch,
    /// Whether the outline is widened
    pub is_highlighted: bool,
    /// Outline width factor when highlighted
    pub highlight_coefficient: f32,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        PolygonStyle {
            line_width: 1.0,
            line_color: color::BLACK,
            fill: true,
            fill_color: color::GRAY,
            hatch_color: color::TRANSPARENT,
            hatch_style: Hatch::None,
            is_highlighted: false,
            highlight_coefficient: defaults::HIGHLIGHT_COEFFICIENT,
        }
    }
}

impl PolygonStyle {
    /// Outline width, highlighting included
    pub fn effective_line_width(&self) -> f32 {
        if self.is_highlighted {
            self.line_width * self.highlight_coefficient
        } else {
            self.line_width
        }
    }

    fn fill_paint(&self) -> Option<Paint> {
        self.fill
            .then(|| Paint::hatched(self.fill_color, self.hatch_color, self.hatch_style))
    }

    fn render(&self, canvas: &mut Canvas, points: &[geom::Point]) {
        let stroke = LineStyle::Solid.stroke(self.line_color, self.effective_line_width());
        canvas.polygon(points, self.fill_paint(), stroke);
    }

    fn legend_item(&self, parent: &dyn Plottable, label: Option<&str>) -> LegendItem {
        let color = if self.fill {
            self.fill_color
        } else {
            self.line_color
        };
        let mut item = LegendItem::from_parent(parent, label.unwrap_or_default(), color);
        item.line_width = if self.fill {
            defaults::LEGEND_RECT_LINE_WIDTH
        } else {
            self.effective_line_width()
        };
        item.marker_shape = MarkerShape::None;
        item.hatch_color = self.hatch_color;
        item.hatch_style = self.hatch_style;
        item
    }

    fn line_props(&self) -> LineProps {
        LineProps {
            color: self.line_color,
            width: self.effective_line_width(),
            style: LineStyle::Solid,
        }
    }
}

/// A closed shape
#[derive(Debug, Clone)]
pub struct Polygon {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Outline and fill
    pub style: PolygonStyle,
    /// Legend label
    pub label: Option<String>,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl Polygon {
    /// A polygon through the points `(xs[i], ys[i])`
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, DataError> {
        check_same_len("xs and ys", xs.len(), ys.len())?;
        Ok(Polygon {
            xs,
            ys,
            style: PolygonStyle::default(),
            label: None,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        })
    }

    /// Set the fill color
    pub fn with_fill_color(mut self, color: ColorU8) -> Self {
        self.style.fill_color = color;
        self
    }

    /// Set the legend label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Vertex X coordinates
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Vertex Y coordinates
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of vertices
    pub fn point_count(&self) -> usize {
        self.xs.len()
    }
}

impl Plottable for Polygon {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        Ok(AxisLimits::from_points(&self.xs, &self.ys))
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        vec![self.style.legend_item(self, self.label.as_deref())]
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        check_not_empty("xs", &self.xs)?;
        check_not_empty("ys", &self.ys)?;
        check_same_len("xs and ys", self.xs.len(), self.ys.len())?;
        if self.xs.len() < 3 {
            return Err(DataError::TooFewPoints {
                required: 3,
                actual: self.xs.len(),
            });
        }
        if deep {
            check_real("xs", &self.xs)?;
            check_real("ys", &self.ys)?;
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let points: Vec<_> = self
            .xs
            .iter()
            .zip(&self.ys)
            .map(|(x, y)| dims.point(*x, *y))
            .collect();
        self.style.render(canvas, &points);
    }

    fn line_props(&self) -> Option<LineProps> {
        Some(self.style.line_props())
    }

    fn has_area(&self) -> bool {
        self.style.fill
    }

    fn as_highlightable_mut(&mut self) -> Option<&mut dyn Highlightable> {
        Some(self)
    }
}

impl Highlightable for Polygon {
    fn is_highlighted(&self) -> bool {
        self.style.is_highlighted
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        self.style.is_highlighted = highlighted;
    }

    fn highlight_coefficient(&self) -> f32 {
        self.style.highlight_coefficient
    }
}

/// Whether a polygon spans more than half a pixel along X or Y
fn bigger_than_pixel(poly: &[Coordinate], units_per_px_x: f64, units_per_px_y: f64) -> bool {
    let xs = crate::data::finite_bounds(poly.iter().map(|c| c.x));
    let ys = crate::data::finite_bounds(poly.iter().map(|c| c.y));
    let span = |b: Option<(f64, f64)>| b.map_or(0.0, |(min, max)| max - min);
    span(xs) > 0.5 * units_per_px_x || span(ys) > 0.5 * units_per_px_y
}

/// Many polygons drawn with one style
#[derive(Debug, Clone)]
pub struct Polygons {
    /// The polygons, as lists of vertices
    pub polys: Vec<Vec<Coordinate>>,
    /// Outline and fill
    pub style: PolygonStyle,
    /// Skip polygons without any vertex in view
    pub skip_off_screen_polygons: bool,
    /// Draw polygons smaller than a pixel as a single pixel
    pub render_small_polygons_as_single_pixels: bool,
    /// Legend label
    pub label: Option<String>,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl Polygons {
    /// Wrap a list of polygons
    pub fn new(polys: Vec<Vec<Coordinate>>) -> Self {
        Polygons {
            polys,
            style: PolygonStyle::default(),
            skip_off_screen_polygons: true,
            render_small_polygons_as_single_pixels: true,
            label: None,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        }
    }

    /// Set the legend label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Number of polygons
    pub fn polygon_count(&self) -> usize {
        self.polys.len()
    }

    fn render_poly(&self, canvas: &mut Canvas, dims: &PlotDimensions, poly: &[Coordinate]) {
        let Some(first) = poly.first() else {
            return;
        };
        if self.skip_off_screen_polygons {
            let limits = dims.limits();
            let in_view = poly.iter().any(|c| {
                c.x >= limits.x_min && c.x <= limits.x_max && c.y >= limits.y_min && c.y <= limits.y_max
            });
            if !in_view {
                return;
            }
        }
        if self.render_small_polygons_as_single_pixels
            && !bigger_than_pixel(poly, dims.units_per_px_x(), dims.units_per_px_y())
        {
            let p = dims.point(first.x, first.y);
            let pixel = geom::Rect::from_xywh(p.x, p.y, 1.0, 1.0);
            if let Some(fill) = self.style.fill_paint() {
                canvas.fill_rect(pixel, fill);
            } else {
                let stroke = LineStyle::Solid.stroke(
                    self.style.line_color,
                    self.style.effective_line_width(),
                );
                canvas.rect(pixel, None, stroke);
            }
            return;
        }
        let points: Vec<_> = poly.iter().map(|c| dims.point(c.x, c.y)).collect();
        self.style.render(canvas, &points);
    }
}

impl Plottable for Polygons {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        let points = self.polys.iter().flatten();
        let xs = crate::data::bounds(points.clone().map(|c| c.x));
        let ys = crate::data::bounds(points.map(|c| c.y));
        match (xs, ys) {
            (Some((x_min, x_max)), Some((y_min, y_max))) => {
                Ok(AxisLimits::new(x_min, x_max, y_min, y_max))
            }
            _ => Ok(AxisLimits::NONE),
        }
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        vec![self.style.legend_item(self, self.label.as_deref())]
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        if !deep {
            return Ok(());
        }
        let all_real = self
            .polys
            .iter()
            .flatten()
            .all(|c| c.x.is_finite() && c.y.is_finite());
        if all_real {
            Ok(())
        } else {
            Err(DataError::NotReal("polygon points"))
        }
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        for poly in &self.polys {
            self.render_poly(canvas, dims, poly);
        }
    }

    fn line_props(&self) -> Option<LineProps> {
        Some(self.style.line_props())
    }

    fn has_area(&self) -> bool {
        self.style.fill
    }

    fn as_highlightable_mut(&mut self) -> Option<&mut dyn Highlightable> {
        Some(self)
    }
}

impl Highlightable for Polygons {
    fn is_highlighted(&self) -> bool {
        self.style.is_highlighted
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        self.style.is_highlighted = highlighted;
    }

    fn highlight_coefficient(&self) -> f32 {
        self.style.highlight_coefficient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plottable::tests::record;

    fn triangle() -> Polygon {
        Polygon::new(vec![1.0, 3.0, 2.0], vec![1.0, 1.0, 4.0]).unwrap()
    }

    fn square(x: f64, y: f64, size: f64) -> Vec<Coordinate> {
        vec![
            Coordinate::new(x, y),
            Coordinate::new(x + size, y),
            Coordinate::new(x + size, y + size),
            Coordinate::new(x, y + size),
        ]
    }

    #[test]
    fn polygon_limits_and_validation() {
        let p = triangle();
        assert_eq!(p.axis_limits().unwrap(), AxisLimits::new(1.0, 3.0, 1.0, 4.0));
        assert!(p.validate(true).is_ok());
        let two = Polygon::new(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
        assert_eq!(
            two.validate(false),
            Err(DataError::TooFewPoints { required: 3, actual: 2 })
        );
        assert!(Polygon::new(vec![1.0], vec![]).is_err());
    }

    #[test]
    fn legend_depends_on_fill() {
        let mut p = triangle().with_fill_color(color::BLUE).with_label("tri");
        let item = &p.legend_items()[0];
        assert_eq!(item.color, color::BLUE);
        assert_eq!(item.line_width, 10.0);
        p.style.fill = false;
        p.set_highlighted(true);
        let item = &p.legend_items()[0];
        assert_eq!(item.color, color::BLACK);
        assert_eq!(item.line_width, 2.0);
        assert!(!p.has_area());
    }

    #[test]
    fn render_polygon() {
        let rec = record(&triangle());
        assert_eq!(rec.paths.len(), 1);
        let (r, fill, stroke) = rec.paths[0];
        assert_eq!((r.left(), r.right()), (10.0, 30.0));
        assert_eq!(fill, Some(Paint::Solid(color::GRAY)));
        assert_eq!(stroke, Some(color::BLACK));
    }

    #[test]
    fn off_screen_polygons_are_skipped() {
        let polys = Polygons::new(vec![square(1.0, 1.0, 1.0), square(20.0, 20.0, 1.0)]);
        assert_eq!(record(&polys).paths.len(), 1);
        assert_eq!(polys.axis_limits().unwrap(), AxisLimits::new(1.0, 21.0, 1.0, 21.0));
    }

    #[test]
    fn small_polygons_become_pixels() {
        // 0.01 units is a tenth of a pixel
        let polys = Polygons::new(vec![square(5.0, 5.0, 0.01)]);
        let rec = record(&polys);
        assert_eq!(rec.paths.len(), 1);
        let (r, ..) = rec.paths[0];
        assert!((r.width() - 1.0).abs() < 1e-3);
        assert!((r.height() - 1.0).abs() < 1e-3);

        // tall but thin polygons are not small
        let thin = vec![
            Coordinate::new(5.0, 1.0),
            Coordinate::new(5.001, 1.0),
            Coordinate::new(5.0, 3.0),
        ];
        assert!(bigger_than_pixel(&thin, 0.1, 0.1));
    }

    #[test]
    fn deep_validation_of_polygons() {
        let mut polys = Polygons::new(vec![square(0.0, 0.0, 1.0)]);
        assert!(polys.validate(true).is_ok());
        polys.polys[0][1].y = f64::NAN;
        assert!(polys.validate(false).is_ok());
        assert_eq!(polys.validate(true), Err(DataError::NotReal("polygon points")));
        assert_eq!(polys.polygon_count(), 1);
    }
}
