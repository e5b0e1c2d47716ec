//! Arrows on a regular grid.
use super::{DataError, LegendItem, Plottable, check_not_empty, check_real, plottable_common};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::limits::AxisLimits;
use crate::style::{Colormap, LineStyle, MarkerShape, defaults};
use crate::{ColorU8, geom};

/// A 2D vector in axis units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vector2 {
    /// Build a vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    fn scaled(&self, factor: f64) -> Self {
        Vector2::new(self.x * factor, self.y * factor)
    }
}

/// Part of an arrow placed on its grid point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArrowAnchor {
    /// The arrow starts at the grid point
    Base,
    /// The arrow is centered on the grid point
    #[default]
    Center,
    /// The arrow points at the grid point
    Tip,
}

/// How the arrows of a [`VectorField`] are drawn
#[derive(Debug, Clone)]
pub struct ArrowStyle {
    /// Part of the arrow on the grid point
    pub anchor: ArrowAnchor,
    /// Size arrowheads relative to the arrow length instead of the line width
    pub scaled_arrowheads: bool,
    /// Half width of scaled arrowheads, as a fraction of the arrow length
    pub scaled_arrowhead_width: f64,
    /// Length of scaled arrowheads, as a fraction of the arrow length
    pub scaled_arrowhead_length: f64,
    /// Width of fixed arrowheads, in line widths
    pub arrowhead_width: f32,
    /// Length of fixed arrowheads, in line widths
    pub arrowhead_length: f32,
    /// Shaft width in pixels
    pub line_width: f32,
    /// Marker drawn on each grid point
    pub marker_shape: MarkerShape,
    /// Marker size in pixels
    pub marker_size: f32,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        ArrowStyle {
            anchor: ArrowAnchor::Center,
            scaled_arrowheads: false,
            scaled_arrowhead_width: 0.15,
            scaled_arrowhead_length: 0.5,
            arrowhead_width: 2.0,
            arrowhead_length: 2.0,
            line_width: defaults::LINE_WIDTH,
            marker_shape: MarkerShape::None,
            marker_size: 0.0,
        }
    }
}

impl ArrowStyle {
    /// Draw an arrow for the pixel vector `(dx, dy)` anchored on `at`
    fn render(&self, canvas: &mut Canvas, at: geom::Point, dx: f32, dy: f32, color: ColorU8) {
        let (base, tip) = match self.anchor {
            ArrowAnchor::Base => (at, geom::Point::from_xy(at.x + dx, at.y + dy)),
            ArrowAnchor::Center => (
                geom::Point::from_xy(at.x - dx / 2.0, at.y - dy / 2.0),
                geom::Point::from_xy(at.x + dx / 2.0, at.y + dy / 2.0),
            ),
            ArrowAnchor::Tip => (geom::Point::from_xy(at.x - dx, at.y - dy), at),
        };
        let len = dx.hypot(dy);
        if len > 0.0 {
            if let Some(stroke) = LineStyle::Solid.stroke(color, self.line_width) {
                // unit vector along the arrow and its normal
                let (ux, uy) = (dx / len, dy / len);
                let (nx, ny) = (-uy, ux);
                if self.scaled_arrowheads {
                    let head_len = self.scaled_arrowhead_length as f32 * len;
                    let head_w = self.scaled_arrowhead_width as f32 * len;
                    let back = geom::Point::from_xy(tip.x - ux * head_len, tip.y - uy * head_len);
                    let left = geom::Point::from_xy(back.x + nx * head_w, back.y + ny * head_w);
                    let right = geom::Point::from_xy(back.x - nx * head_w, back.y - ny * head_w);
                    canvas.line(base, tip, stroke);
                    canvas.polyline(&[left, tip, right], stroke);
                } else {
                    let head_len = self.arrowhead_length * self.line_width;
                    let head_w = self.arrowhead_width * self.line_width / 2.0;
                    let back = geom::Point::from_xy(tip.x - ux * head_len, tip.y - uy * head_len);
                    let left = geom::Point::from_xy(back.x + nx * head_w, back.y + ny * head_w);
                    let right = geom::Point::from_xy(back.x - nx * head_w, back.y - ny * head_w);
                    canvas.line(base, back, stroke);
                    canvas.polygon(&[left, tip, right], Some(color.into()), None);
                }
            }
        }
        if self.marker_shape != MarkerShape::None && self.marker_size > 0.0 {
            canvas.marker(at, self.marker_shape, self.marker_size, color, self.line_width);
        }
    }
}

/// Arrows at every point of the grid `xs × ys`.
///
/// Vectors are given in X-major order: the vector at `(xs[i], ys[j])` is at index
/// `i * ys.len() + j`.
#[derive(Debug, Clone)]
pub struct VectorField {
    xs: Vec<f64>,
    ys: Vec<f64>,
    vectors: Vec<Vector2>,
    colors: Vec<ColorU8>,
    /// Arrow drawing style
    pub arrow_style: ArrowStyle,
    /// Legend label
    pub label: Option<String>,
    /// Visibility
    pub is_visible: bool,
    /// Index of the horizontal axis
    pub x_axis_index: usize,
    /// Index of the vertical axis
    pub y_axis_index: usize,
}

impl VectorField {
    /// Build a field, scaling the vectors so the longest one spans `scale_factor / 1.2` units.
    /// Arrows are colored by magnitude through `colormap`, or all in `default_color`.
    pub fn new(
        vectors: Vec<Vector2>,
        xs: Vec<f64>,
        ys: Vec<f64>,
        colormap: Option<Colormap>,
        scale_factor: f64,
        default_color: ColorU8,
    ) -> Result<Self, DataError> {
        check_not_empty("xs", &xs)?;
        check_not_empty("ys", &ys)?;
        super::check_same_len("vectors", xs.len() * ys.len(), vectors.len())?;

        let magnitudes: Vec<f64> = vectors.iter().map(Vector2::length).collect();
        check_real("vector magnitudes", &magnitudes)?;
        let min = magnitudes.iter().copied().fold(f64::INFINITY, f64::min);
        let max = magnitudes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let colors = match colormap {
            Some(colormap) => magnitudes
                .iter()
                .map(|m| {
                    let fraction = if max > min { (m - min) / (max - min) } else { 0.0 };
                    colormap.get(fraction)
                })
                .collect(),
            None => vec![default_color; vectors.len()],
        };
        let scale = if max > 0.0 { scale_factor / (max * 1.2) } else { 0.0 };
        let vectors = vectors.iter().map(|v| v.scaled(scale)).collect();

        Ok(VectorField {
            xs,
            ys,
            vectors,
            colors,
            arrow_style: ArrowStyle::default(),
            label: None,
            is_visible: true,
            x_axis_index: 0,
            y_axis_index: 0,
        })
    }

    /// Set the arrow anchor
    pub fn with_anchor(mut self, anchor: ArrowAnchor) -> Self {
        self.arrow_style.anchor = anchor;
        self
    }

    /// Set the legend label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Grid X positions
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Grid Y positions
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Scaled vectors, in X-major order
    pub fn vectors(&self) -> &[Vector2] {
        &self.vectors
    }

    /// Color of each arrow
    pub fn colors(&self) -> &[ColorU8] {
        &self.colors
    }

    /// Number of arrows
    pub fn point_count(&self) -> usize {
        self.vectors.len()
    }
}

impl Plottable for VectorField {
    plottable_common!();

    fn axis_limits(&self) -> Result<AxisLimits, DataError> {
        let limits = AxisLimits::from_points(&self.xs, &self.ys);
        Ok(AxisLimits::new(
            limits.x_min - 1.0,
            limits.x_max + 1.0,
            limits.y_min - 1.0,
            limits.y_max + 1.0,
        ))
    }

    fn legend_items(&self) -> Vec<LegendItem> {
        let Some(color) = self.colors.first().copied() else {
            return Vec::new();
        };
        let label = self.label.as_deref().unwrap_or_default();
        let mut item = LegendItem::from_parent(self, label, color);
        item.line_width = defaults::LEGEND_RECT_LINE_WIDTH;
        item.marker_shape = MarkerShape::None;
        vec![item]
    }

    fn validate(&self, deep: bool) -> Result<(), DataError> {
        check_not_empty("xs", &self.xs)?;
        check_not_empty("ys", &self.ys)?;
        if deep {
            check_real("xs", &self.xs)?;
            check_real("ys", &self.ys)?;
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas, dims: &PlotDimensions) {
        let (ppx, ppy) = (dims.px_per_unit_x(), dims.px_per_unit_y());
        for (i, x) in self.xs.iter().enumerate() {
            for (j, y) in self.ys.iter().enumerate() {
                let k = i * self.ys.len() + j;
                let v = self.vectors[k];
                let at = dims.point(*x, *y);
                let (dx, dy) = ((v.x * ppx) as f32, (-v.y * ppy) as f32);
                self.arrow_style.render(canvas, at, dx, dy, self.colors[k]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::plottable::tests::record;
    use crate::tests::{Near, assert_near};

    fn field(colormap: Option<Colormap>) -> VectorField {
        let vectors = vec![
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 2.0),
            Vector2::new(0.0, 0.0),
            Vector2::new(-1.0, 0.0),
        ];
        VectorField::new(vectors, vec![2.0, 4.0], vec![3.0, 5.0], colormap, 1.2, color::RED)
            .unwrap()
    }

    #[test]
    fn grid_size_is_checked() {
        let r = VectorField::new(vec![Vector2::default()], vec![1.0, 2.0], vec![1.0], None, 1.0, color::RED);
        assert!(matches!(r, Err(DataError::LengthMismatch { .. })));
    }

    #[test]
    fn longest_vector_is_scaled() {
        let f = field(None);
        // scale = 1.2 / (2 * 1.2)
        assert_near!(abs, f.vectors()[1].y, 1.0);
        assert_near!(abs, f.vectors()[0].x, 0.5);
        assert!(f.colors().iter().all(|c| *c == color::RED));
    }

    #[test]
    fn colors_follow_magnitude() {
        let f = field(Some(Colormap::Grayscale));
        assert_eq!(f.colors()[2], color::BLACK);
        assert_eq!(f.colors()[1], color::WHITE);
    }

    #[test]
    fn limits_pad_the_grid() {
        let l = field(None).axis_limits().unwrap();
        assert_eq!(l, AxisLimits::new(1.0, 5.0, 2.0, 6.0));
    }

    #[test]
    fn legend_uses_first_color() {
        let items = field(Some(Colormap::Grayscale)).with_label("wind").legend_items();
        assert_eq!(items.len(), 1);
        assert!(items[0].show_as_rectangle());
    }

    #[test]
    fn render_skips_null_vectors() {
        let rec = record(&field(None).with_anchor(ArrowAnchor::Base));
        // shaft and head for the three non null vectors
        assert_eq!(rec.paths.len(), 6);
        let (shaft, ..) = rec.paths[0];
        assert_near!(abs, shaft.left(), 20.0, 1e-3);
    }
}
