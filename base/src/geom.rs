/*!
 * Geometric primitives in pixel space.
 *
 * Paths and transforms are publicly imported from tiny-skia-path.
 *
 * The origin is the top-left corner of the figure and Y grows downward.
 */

pub use tiny_skia_path::{Path, PathBuilder, PathSegment, PathVerb, Point, Transform};

/// A size in 2D space represented by width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    w: f32,
    h: f32,
}

impl Size {
    /// Build a size from width and height
    pub const fn new(w: f32, h: f32) -> Self {
        Size { w, h }
    }

    /// The width
    pub const fn width(&self) -> f32 {
        self.w
    }

    /// The height
    pub const fn height(&self) -> f32 {
        self.h
    }

    /// Expand width and height by dw and dh
    pub const fn expand(&self, dw: f32, dh: f32) -> Size {
        Size {
            w: self.w + dw,
            h: self.h + dh,
        }
    }

    /// Whether either dimension is zero (or negative)
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[inline]
fn extent(v: f32) -> f32 {
    finite_or_zero(v).max(0.0)
}

/// A rectangle in pixel space represented by x, y, width and height.
///
/// Width and height are never negative: inverted extents collapse to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Rect {
    /// A zero sized rectangle at origin
    pub const fn null() -> Self {
        Rect {
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
        }
    }

    /// Build a rectangle from x, y, width and height
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect {
            x: finite_or_zero(x),
            y: finite_or_zero(y),
            w: extent(w),
            h: extent(h),
        }
    }

    /// Build a rectangle from top, right, bottom and left
    pub fn from_trbl(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Rect::from_xywh(left, top, right - left, bottom - top)
    }

    /// Build a rectangle from top left point and size
    pub fn from_ps(top_left: Point, size: Size) -> Self {
        Rect::from_xywh(top_left.x, top_left.y, size.w, size.h)
    }

    /// Build a rectangle from two corner points, in any order
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Rect::from_trbl(
            p1.y.min(p2.y),
            p1.x.max(p2.x),
            p1.y.max(p2.y),
            p1.x.min(p2.x),
        )
    }

    /// Pad the rectangle, removing padding from 4 sides
    pub fn pad(&self, padding: &Padding) -> Self {
        Rect::from_xywh(
            self.x + padding.left(),
            self.y + padding.top(),
            self.w - padding.sum_hor(),
            self.h - padding.sum_ver(),
        )
    }

    /// The top-left point of the rectangle
    pub const fn top_left(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// The bottom-right point of the rectangle
    pub const fn bottom_right(&self) -> Point {
        Point {
            x: self.right(),
            y: self.bottom(),
        }
    }

    /// The size of the rectangle
    pub const fn size(&self) -> Size {
        Size {
            w: self.w,
            h: self.h,
        }
    }

    /// The X coordinate of the left side
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// The Y coordinate of the top side
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// The center point of the rectangle
    pub const fn center(&self) -> Point {
        Point {
            x: self.center_x(),
            y: self.center_y(),
        }
    }

    /// The horizontal center X coordinate
    pub const fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// The vertical center Y coordinate
    pub const fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// The width of the rectangle
    pub const fn width(&self) -> f32 {
        self.w
    }

    /// The height of the rectangle
    pub const fn height(&self) -> f32 {
        self.h
    }

    /// The top Y coordinate
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// The right X coordinate
    pub const fn right(&self) -> f32 {
        self.x + self.w
    }

    /// The bottom Y coordinate
    pub const fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// The left X coordinate
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Whether the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Build a copy of the rect with a new top side, keeping the bottom side
    pub fn with_top(self, top: f32) -> Rect {
        Rect::from_trbl(top, self.right(), self.bottom(), self.left())
    }

    /// Build a copy of the rect with a new right side, keeping the left side
    pub fn with_right(self, right: f32) -> Rect {
        Rect::from_trbl(self.top(), right, self.bottom(), self.left())
    }

    /// Build a copy of the rect with a new bottom side, keeping the top side
    pub fn with_bottom(self, bottom: f32) -> Rect {
        Rect::from_trbl(self.top(), self.right(), bottom, self.left())
    }

    /// Build a copy of the rect with a new left side, keeping the right side
    pub fn with_left(self, left: f32) -> Rect {
        Rect::from_trbl(self.top(), self.right(), self.bottom(), left)
    }

    /// Unite two rectangles into one that contains both
    pub fn unite(r1: &Rect, r2: &Rect) -> Rect {
        Rect::from_trbl(
            r1.top().min(r2.top()),
            r1.right().max(r2.right()),
            r1.bottom().max(r2.bottom()),
            r1.left().min(r2.left()),
        )
    }

    /// The overlapping area of two rectangles, or None when they are disjoint
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left > right || top > bottom {
            None
        } else {
            Some(Rect::from_trbl(top, right, bottom, left))
        }
    }

    /// Translate the rectangle by dx and dy
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::from_xywh(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Test if the rectangle contains a point (edges included)
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Build a path from the rectangle.
    /// Returns None for a rectangle that tiny-skia cannot represent.
    pub fn to_path(&self) -> Option<Path> {
        tiny_skia_path::Rect::from_xywh(self.x, self.y, self.w, self.h).map(PathBuilder::from_rect)
    }
}

/// Padding within a graphical element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Padding {
    /// Uniform padding in all directions
    Even(f32),
    /// Vertical and horizontal padding
    Center {
        /// Vertical padding
        v: f32,
        /// Horizontal padding
        h: f32,
    },
    /// Top, right, bottom and left padding
    Custom {
        /// Top padding
        t: f32,
        /// Right padding
        r: f32,
        /// Bottom padding
        b: f32,
        /// Left padding
        l: f32,
    },
}

impl Padding {
    /// The top padding
    pub const fn top(&self) -> f32 {
        match self {
            Padding::Even(p) => *p,
            Padding::Center { v, .. } => *v,
            Padding::Custom { t, .. } => *t,
        }
    }

    /// The right padding
    pub const fn right(&self) -> f32 {
        match self {
            Padding::Even(p) => *p,
            Padding::Center { h, .. } => *h,
            Padding::Custom { r, .. } => *r,
        }
    }

    /// The bottom padding
    pub const fn bottom(&self) -> f32 {
        match self {
            Padding::Even(p) => *p,
            Padding::Center { v, .. } => *v,
            Padding::Custom { b, .. } => *b,
        }
    }

    /// The left padding
    pub const fn left(&self) -> f32 {
        match self {
            Padding::Even(p) => *p,
            Padding::Center { h, .. } => *h,
            Padding::Custom { l, .. } => *l,
        }
    }

    /// The total vertical padding
    pub const fn sum_ver(&self) -> f32 {
        self.top() + self.bottom()
    }

    /// The total horizontal padding
    pub const fn sum_hor(&self) -> f32 {
        self.left() + self.right()
    }
}

impl From<f32> for Padding {
    fn from(value: f32) -> Self {
        Padding::Even(value)
    }
}

impl From<(f32, f32)> for Padding {
    fn from((v, h): (f32, f32)) -> Self {
        Padding::Center { v, h }
    }
}

impl From<(f32, f32, f32, f32)> for Padding {
    fn from((t, r, b, l): (f32, f32, f32, f32)) -> Self {
        Padding::Custom { t, r, b, l }
    }
}

/// Build a polyline path through the given points.
/// Returns None when fewer than two points are given.
pub fn polyline(points: &[Point], close: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut pb = PathBuilder::with_capacity(points.len() + 1, points.len() + 1);
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_clamps_negative_extent() {
        let r = Rect::from_trbl(10.0, 0.0, 0.0, 10.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 0.0);
        assert!(r.is_empty());
    }

    #[test]
    fn rect_intersect() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::from_xywh(5.0, 5.0, 5.0, 5.0)));

        let c = Rect::from_xywh(20.0, 20.0, 1.0, 1.0);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn rect_pad() {
        let r = Rect::from_xywh(0.0, 0.0, 100.0, 50.0).pad(&(1.0, 2.0, 3.0, 4.0).into());
        assert_eq!(r, Rect::from_xywh(4.0, 1.0, 94.0, 46.0));
    }

    #[test]
    fn polyline_needs_two_points() {
        assert!(polyline(&[Point::from_xy(0.0, 0.0)], false).is_none());
        let path = polyline(&[Point::from_xy(0.0, 0.0), Point::from_xy(3.0, 4.0)], false);
        assert!(path.is_some());
    }
}
