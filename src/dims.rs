//! Conversion between data coordinates and figure pixels.
use crate::data::{Coordinate, Pixel};
use crate::geom;
use crate::limits::AxisLimits;

/// Layout and view state needed to map one pair of axes onto the figure.
///
/// The data area is the rectangle of the figure in which the plottables are drawn.
/// X grows rightward in both spaces, while Y data grows upward and Y pixels grow downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotDimensions {
    figure_size: geom::Size,
    data_rect: geom::Rect,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    px_per_unit_x: f64,
    px_per_unit_y: f64,
}

impl PlotDimensions {
    /// Build dimensions from the figure size, the data area and the view limits.
    ///
    /// `limits` must be real with positive spans for the mapping to be meaningful.
    pub fn new(figure_size: geom::Size, data_rect: geom::Rect, limits: AxisLimits) -> Self {
        PlotDimensions {
            figure_size,
            data_rect,
            x_min: limits.x_min,
            x_max: limits.x_max,
            y_min: limits.y_min,
            y_max: limits.y_max,
            px_per_unit_x: data_rect.width() as f64 / limits.x_span(),
            px_per_unit_y: data_rect.height() as f64 / limits.y_span(),
        }
    }

    /// Horizontal pixel of a data X value
    pub fn pixel_x(&self, x: f64) -> f32 {
        (self.data_rect.x() as f64 + (x - self.x_min) * self.px_per_unit_x) as f32
    }

    /// Vertical pixel of a data Y value
    pub fn pixel_y(&self, y: f64) -> f32 {
        (self.data_rect.y() as f64 + (self.y_max - y) * self.px_per_unit_y) as f32
    }

    /// Pixel of a data coordinate
    pub fn pixel(&self, coord: Coordinate) -> Pixel {
        Pixel::new(self.pixel_x(coord.x), self.pixel_y(coord.y))
    }

    /// Point of a data coordinate, for path building
    pub fn point(&self, x: f64, y: f64) -> geom::Point {
        geom::Point::from_xy(self.pixel_x(x), self.pixel_y(y))
    }

    /// Data X value of a horizontal pixel
    pub fn coordinate_x(&self, px: f32) -> f64 {
        (px as f64 - self.data_rect.x() as f64) / self.px_per_unit_x + self.x_min
    }

    /// Data Y value of a vertical pixel
    pub fn coordinate_y(&self, py: f32) -> f64 {
        self.y_max - (py as f64 - self.data_rect.y() as f64) / self.px_per_unit_y
    }

    /// Data coordinate of a pixel
    pub fn coordinate(&self, pixel: Pixel) -> Coordinate {
        Coordinate::new(self.coordinate_x(pixel.x), self.coordinate_y(pixel.y))
    }

    /// Size of the whole figure
    pub fn figure_size(&self) -> geom::Size {
        self.figure_size
    }

    /// Area of the figure where data is drawn
    pub fn data_rect(&self) -> geom::Rect {
        self.data_rect
    }

    /// Left of the data area
    pub fn data_offset_x(&self) -> f32 {
        self.data_rect.x()
    }

    /// Top of the data area
    pub fn data_offset_y(&self) -> f32 {
        self.data_rect.y()
    }

    /// Width of the data area
    pub fn data_width(&self) -> f32 {
        self.data_rect.width()
    }

    /// Height of the data area
    pub fn data_height(&self) -> f32 {
        self.data_rect.height()
    }

    /// Left view limit
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Right view limit
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Bottom view limit
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Top view limit
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// View limits
    pub fn limits(&self) -> AxisLimits {
        AxisLimits::new(self.x_min, self.x_max, self.y_min, self.y_max)
    }

    /// Horizontal view span
    pub fn x_span(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical view span
    pub fn y_span(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Horizontal center of the view
    pub fn x_center(&self) -> f64 {
        (self.x_min + self.x_max) / 2.0
    }

    /// Vertical center of the view
    pub fn y_center(&self) -> f64 {
        (self.y_min + self.y_max) / 2.0
    }

    /// Pixels per horizontal data unit
    pub fn px_per_unit_x(&self) -> f64 {
        self.px_per_unit_x
    }

    /// Pixels per vertical data unit
    pub fn px_per_unit_y(&self) -> f64 {
        self.px_per_unit_y
    }

    /// Horizontal data units per pixel
    pub fn units_per_px_x(&self) -> f64 {
        1.0 / self.px_per_unit_x
    }

    /// Vertical data units per pixel
    pub fn units_per_px_y(&self) -> f64 {
        1.0 / self.px_per_unit_y
    }

    /// Whether the data area can hold anything
    pub fn is_drawable(&self) -> bool {
        !self.data_rect.is_empty()
            && self.px_per_unit_x.is_finite()
            && self.px_per_unit_y.is_finite()
            && self.px_per_unit_x > 0.0
            && self.px_per_unit_y > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{Near, assert_near};

    fn dims() -> PlotDimensions {
        PlotDimensions::new(
            geom::Size::new(400.0, 300.0),
            geom::Rect::from_xywh(50.0, 20.0, 300.0, 200.0),
            AxisLimits::new(-10.0, 20.0, 0.0, 100.0),
        )
    }

    #[test]
    fn pixel_mapping() {
        let d = dims();
        assert_near!(abs, d.px_per_unit_x(), 10.0);
        assert_near!(abs, d.px_per_unit_y(), 2.0);
        assert_near!(abs, d.pixel_x(-10.0), 50.0, 1e-4);
        assert_near!(abs, d.pixel_x(20.0), 350.0, 1e-4);
        assert_near!(abs, d.pixel_y(100.0), 20.0, 1e-4);
        assert_near!(abs, d.pixel_y(0.0), 220.0, 1e-4);
        assert_near!(abs, d.pixel_y(50.0), 120.0, 1e-4);
    }

    #[test]
    fn inverse_mapping() {
        let d = dims();
        let c = Coordinate::new(3.5, 42.0);
        let back = d.coordinate(d.pixel(c));
        assert_near!(abs, back.x, c.x, 1e-4);
        assert_near!(abs, back.y, c.y, 1e-4);
        assert_near!(abs, d.units_per_px_x(), 0.1);
        assert_near!(abs, d.units_per_px_y(), 0.5);
    }

    #[test]
    fn degenerate_is_not_drawable() {
        let d = PlotDimensions::new(
            geom::Size::new(100.0, 100.0),
            geom::Rect::from_xywh(0.0, 0.0, 100.0, 100.0),
            AxisLimits::new(1.0, 1.0, 0.0, 1.0),
        );
        assert!(!d.is_drawable());
        assert!(dims().is_drawable());
    }
}
