//! Drawing module
//!
//! [`Canvas`] is what plottables and renderables draw on. It bridges the high level
//! styles of the [`style`](crate::style) module and the rendering primitives of the
//! [`render`] module: lines, markers and text are turned into paths and issued to the surface.
use crate::style::{self, Alignment, LineStyle, MarkerShape};
use crate::{ColorU8, geom, render, text};

mod marker;

pub use marker::marker_path;

/// A rendering surface together with the fonts used to shape text
pub struct Canvas<'a> {
    surface: &'a mut dyn render::Surface,
    fonts: &'a text::FontDb,
}

impl std::fmt::Debug for Canvas<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas").field("fonts", self.fonts).finish()
    }
}

impl<'a> Canvas<'a> {
    /// Wrap a surface
    pub fn new(surface: &'a mut dyn render::Surface, fonts: &'a text::FontDb) -> Self {
        Canvas { surface, fonts }
    }

    /// The font database
    pub fn fonts(&self) -> &text::FontDb {
        self.fonts
    }

    /// Direct access to the surface
    pub fn surface(&mut self) -> &mut dyn render::Surface {
        &mut *self.surface
    }

    /// Run `f` with drawing clipped to `rect`
    pub fn clipped<F>(&mut self, rect: &geom::Rect, f: F)
    where
        F: FnOnce(&mut Canvas<'a>),
    {
        self.surface.push_clip(&render::Clip {
            rect,
            transform: None,
        });
        f(self);
        self.surface.pop_clip();
    }

    /// Fill and/or stroke a rectangle
    pub fn rect(
        &mut self,
        rect: geom::Rect,
        fill: Option<render::Paint>,
        stroke: Option<render::Stroke<'_>>,
    ) {
        if fill.is_none() && stroke.is_none() {
            return;
        }
        self.surface.draw_rect(&render::Rect {
            rect,
            fill,
            stroke,
            transform: None,
        });
    }

    /// Fill a rectangle
    pub fn fill_rect(&mut self, rect: geom::Rect, paint: impl Into<render::Paint>) {
        self.rect(rect, Some(paint.into()), None);
    }

    /// Fill and/or stroke a path
    pub fn path(
        &mut self,
        path: &geom::Path,
        fill: Option<render::Paint>,
        stroke: Option<render::Stroke<'_>>,
        transform: Option<&geom::Transform>,
    ) {
        if fill.is_none() && stroke.is_none() {
            return;
        }
        self.surface.draw_path(&render::Path {
            path,
            fill,
            stroke,
            transform,
        });
    }

    /// Stroke a segment
    pub fn line(&mut self, p1: geom::Point, p2: geom::Point, stroke: render::Stroke<'_>) {
        self.polyline(&[p1, p2], stroke);
    }

    /// Stroke a styled segment. Nothing is drawn for `LineStyle::None` or a null width.
    pub fn styled_line(
        &mut self,
        p1: geom::Point,
        p2: geom::Point,
        color: ColorU8,
        width: f32,
        line_style: LineStyle,
    ) {
        if let Some(stroke) = line_style.stroke(color, width) {
            self.line(p1, p2, stroke);
        }
    }

    /// Stroke an open polyline. Non finite points break the line.
    pub fn polyline(&mut self, points: &[geom::Point], stroke: render::Stroke<'_>) {
        for run in points.split(|p| !p.x.is_finite() || !p.y.is_finite()) {
            if let Some(path) = geom::polyline(run, false) {
                self.path(&path, None, Some(stroke), None);
            }
        }
    }

    /// Fill and/or stroke a closed polygon
    pub fn polygon(
        &mut self,
        points: &[geom::Point],
        fill: Option<render::Paint>,
        stroke: Option<render::Stroke<'_>>,
    ) {
        if let Some(path) = geom::polyline(points, true) {
            self.path(&path, fill, stroke, None);
        }
    }

    /// Draw one marker centered on `center`
    pub fn marker(
        &mut self,
        center: geom::Point,
        shape: MarkerShape,
        size: f32,
        color: ColorU8,
        line_width: f32,
    ) {
        self.markers(&[center], shape, size, color, line_width);
    }

    /// Draw the same marker at every point. Non finite points are skipped.
    pub fn markers(
        &mut self,
        centers: &[geom::Point],
        shape: MarkerShape,
        size: f32,
        color: ColorU8,
        line_width: f32,
    ) {
        let Some(path) = marker_path(shape, size) else {
            return;
        };
        let (fill, stroke) = if shape.is_filled() {
            (Some(render::Paint::Solid(color)), None)
        } else {
            (None, LineStyle::Solid.stroke(color, line_width))
        };
        for c in centers {
            if !c.x.is_finite() || !c.y.is_finite() {
                continue;
            }
            let transform = geom::Transform::from_translate(c.x, c.y);
            self.path(&path, fill, stroke, Some(&transform));
        }
    }

    /// Shape text with the given font
    pub fn layout_text(&self, txt: &str, font: &style::Font) -> text::Text {
        text::Text::layout(
            txt,
            &font.query(),
            font.size,
            font.alignment.text_align(),
            self.fonts,
        )
    }

    /// Size of text drawn with the given font, before rotation
    pub fn measure_text(&self, txt: &str, font: &style::Font) -> geom::Size {
        self.layout_text(txt, font).size()
    }

    /// Draw text anchored on `(x, y)` following the font alignment and rotation
    pub fn text(&mut self, txt: &str, font: &style::Font, x: f32, y: f32) {
        let laid_out = self.layout_text(txt, font);
        self.laid_out_text(&laid_out, font.color, x, y, font.alignment, font.rotation);
    }

    /// Draw text that was shaped already.
    /// `alignment` places the block relative to `(x, y)`, then the block is rotated
    /// clockwise by `rotation` degrees around `(x, y)`.
    pub fn laid_out_text(
        &mut self,
        laid_out: &text::Text,
        color: ColorU8,
        x: f32,
        y: f32,
        alignment: Alignment,
        rotation: f32,
    ) {
        let Some(path) = laid_out.path() else {
            return;
        };
        if color.is_transparent() {
            return;
        }
        let dx = laid_out.width() * alignment.x_fraction();
        let dy = laid_out.height() * alignment.y_fraction();
        let transform = geom::Transform::from_translate(x, y)
            .pre_rotate(rotation)
            .pre_translate(-dx, -dy);
        self.path(path, Some(color.into()), None, Some(&transform));
    }
}

/// Path of a pie slice centered on `center`, or of a ring sector when `inner_radius` is positive.
/// Angles are in degrees, clockwise from the positive X axis as seen on screen.
pub fn sector_path(
    center: geom::Point,
    radius: f32,
    inner_radius: f32,
    start: f32,
    sweep: f32,
) -> Option<geom::Path> {
    if radius <= 0.0 || sweep == 0.0 || !sweep.is_finite() {
        return None;
    }
    let steps = ((sweep.abs() / 3.0).ceil() as usize).max(2);
    let at = |r: f32, i: usize| {
        let a = (start + sweep * i as f32 / steps as f32).to_radians();
        geom::Point::from_xy(center.x + r * a.cos(), center.y + r * a.sin())
    };
    let mut points = Vec::with_capacity(2 * steps + 2);
    if inner_radius > 0.0 {
        points.extend((0..=steps).rev().map(|i| at(inner_radius, i)));
    } else {
        points.push(center);
    }
    points.extend((0..=steps).map(|i| at(radius, i)));
    geom::polyline(&points, true)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::render::Surface;

    /// Surface recording the calls, for unit tests
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub paths: Vec<(geom::Rect, Option<render::Paint>, Option<ColorU8>)>,
        pub clips: usize,
        pub max_clips: usize,
    }

    impl Surface for Recorder {
        fn prepare(&mut self, _size: geom::Size) {}

        fn fill(&mut self, _fill: render::Paint) {}

        fn draw_path(&mut self, path: &render::Path) {
            let p = match path.transform {
                Some(t) => path.path.clone().transform(*t),
                None => Some(path.path.clone()),
            };
            if let Some(p) = p {
                let b = p.bounds();
                self.paths.push((
                    geom::Rect::from_trbl(b.top(), b.right(), b.bottom(), b.left()),
                    path.fill,
                    path.stroke.map(|s| s.color),
                ));
            }
        }

        fn push_clip(&mut self, _clip: &render::Clip) {
            self.clips += 1;
            self.max_clips = self.max_clips.max(self.clips);
        }

        fn pop_clip(&mut self) {
            self.clips -= 1;
        }
    }

    #[test]
    fn markers_skip_non_finite() {
        let fonts = text::FontDb::new();
        let mut rec = Recorder::default();
        let mut canvas = Canvas::new(&mut rec, &fonts);
        canvas.markers(
            &[
                geom::Point::from_xy(10.0, 10.0),
                geom::Point::from_xy(f32::NAN, 3.0),
            ],
            MarkerShape::FilledSquare,
            4.0,
            crate::color::RED,
            1.0,
        );
        assert_eq!(rec.paths.len(), 1);
        let (r, fill, stroke) = rec.paths[0];
        assert_eq!(r, geom::Rect::from_xywh(8.0, 8.0, 4.0, 4.0));
        assert_eq!(fill, Some(render::Paint::Solid(crate::color::RED)));
        assert_eq!(stroke, None);
    }

    #[test]
    fn polyline_breaks_on_nan() {
        let fonts = text::FontDb::new();
        let mut rec = Recorder::default();
        let mut canvas = Canvas::new(&mut rec, &fonts);
        let pts = [
            geom::Point::from_xy(0.0, 0.0),
            geom::Point::from_xy(1.0, 1.0),
            geom::Point::from_xy(f32::NAN, 1.0),
            geom::Point::from_xy(2.0, 2.0),
            geom::Point::from_xy(3.0, 2.0),
        ];
        canvas.polyline(&pts, (crate::color::BLACK, 1.0).into());
        assert_eq!(rec.paths.len(), 2);
    }

    #[test]
    fn clipped_balances_clips() {
        let fonts = text::FontDb::new();
        let mut rec = Recorder::default();
        let mut canvas = Canvas::new(&mut rec, &fonts);
        canvas.clipped(&geom::Rect::from_xywh(0.0, 0.0, 5.0, 5.0), |c| {
            c.fill_rect(geom::Rect::from_xywh(0.0, 0.0, 10.0, 10.0), crate::color::RED);
        });
        assert_eq!(rec.clips, 0);
        assert_eq!(rec.max_clips, 1);
    }

    #[test]
    fn quarter_sector_bounds() {
        let c = geom::Point::from_xy(50.0, 50.0);
        let path = sector_path(c, 10.0, 0.0, 0.0, 90.0).unwrap();
        let b = path.bounds();
        assert!((b.left() - 50.0).abs() < 1e-3);
        assert!((b.top() - 50.0).abs() < 1e-3);
        assert!((b.right() - 60.0).abs() < 1e-3);
        assert!((b.bottom() - 60.0).abs() < 1e-3);

        let ring = sector_path(c, 10.0, 5.0, 0.0, 90.0).unwrap();
        assert!((ring.bounds().left() - 50.0).abs() < 1e-3);
        assert!(sector_path(c, 10.0, 0.0, 0.0, 0.0).is_none());
    }
}
