//! Raster rendering surface for quickplot, based on [`tiny_skia`].
//!
//! [`PxlSurface`] owns its pixmap, [`PxlSurfaceRef`] draws into pixels owned by someone else,
//! typically the frame buffer of a GUI toolkit.
//! [`render_plot`] and [`render_legend`] are shortcuts to rasterize a whole plot or its legend.

// Quickplot is released under the MIT License with the following copyright:
// Copyright (c) 2025-2026 Quickplot contributors

use std::{fmt, io, path};

use quickplot::drawing::Canvas;
use quickplot::text::FontDb;
use quickplot::{ColorU8, Legend, Plot, geom, render};
use tiny_skia::{self, FillRule, Mask, Pixmap, PixmapMut};

/// Errors raised while rasterizing
#[derive(Debug)]
pub enum Error {
    /// The pixmap could not be allocated (zero or too large dimensions)
    InvalidSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// PNG encoding or writing failed
    Png(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSize { width, height } => {
                write!(f, "Can't allocate a pixmap of {}x{} pixels", width, height)
            }
            Error::Png(err) => write!(f, "PNG error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Png(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Png(err)
    }
}

/// A surface drawing into its own pixmap
#[derive(Debug, Clone)]
pub struct PxlSurface {
    pixmap: Pixmap,
    state: State,
}

impl PxlSurface {
    /// A transparent surface of `width`×`height` pixels
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        let pixmap = Pixmap::new(width, height).ok_or(Error::InvalidSize { width, height })?;
        let state = State::new(width, height);
        Ok(Self { pixmap, state })
    }

    /// The pixels drawn so far
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Write the pixels to a PNG file
    pub fn save_png<P: AsRef<path::Path>>(&self, path: P) -> Result<(), Error> {
        self.pixmap.save_png(path).map_err(io::Error::from)?;
        Ok(())
    }

    /// Encode the pixels as PNG data
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        Ok(self.pixmap.encode_png().map_err(io::Error::from)?)
    }

    /// Release the pixmap
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

/// A surface drawing into borrowed RGBA pixels
#[derive(Debug)]
pub struct PxlSurfaceRef<'a> {
    pixmap: PixmapMut<'a>,
    state: State,
}

impl<'a> PxlSurfaceRef<'a> {
    /// Draw into an existing pixmap
    pub fn from_pixmap_mut(pixmap: PixmapMut<'a>) -> Self {
        let state = State::new(pixmap.width(), pixmap.height());
        Self { pixmap, state }
    }

    /// Draw into premultiplied RGBA bytes
    pub fn from_bytes(bytes: &'a mut [u8], width: u32, height: u32) -> Result<Self, Error> {
        let pixmap =
            PixmapMut::from_bytes(bytes, width, height).ok_or(Error::InvalidSize { width, height })?;
        Ok(Self::from_pixmap_mut(pixmap))
    }
}

/// Render `plot` on a new pixmap of `width`×`height` pixels
pub fn render_plot(plot: &mut Plot, width: u32, height: u32) -> Result<Pixmap, Error> {
    let mut surface = PxlSurface::new(width, height)?;
    plot.render(&mut surface, geom::Size::new(width as f32, height as f32));
    Ok(surface.into_pixmap())
}

/// Render the legend alone on a pixmap fitting it and its shadow.
///
/// The legend items must be up to date (see [`Legend::update_items`]).
/// Returns `None` if the legend has no item.
pub fn render_legend(legend: &Legend, fonts: &FontDb) -> Result<Option<Pixmap>, Error> {
    if !legend.has_items() {
        return Ok(None);
    }
    let size = legend.size(fonts);
    let width = (size.width() + legend.shadow_offset_x.max(0.0)).ceil() as u32;
    let height = (size.height() + legend.shadow_offset_y.max(0.0)).ceil() as u32;
    let mut surface = PxlSurface::new(width, height)?;
    {
        render::Surface::prepare(
            &mut surface,
            geom::Size::new(width as f32, height as f32),
        );
        let mut canvas = Canvas::new(&mut surface, fonts);
        legend.render_standalone(&mut canvas);
    }
    Ok(Some(surface.into_pixmap()))
}

#[derive(Debug, Clone)]
struct State {
    width: u32,
    height: u32,
    transform: tiny_skia::Transform,
    // one entry per pushed clip, `None` when the mask could not be allocated
    clips: Vec<Option<Mask>>,
}

impl State {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transform: tiny_skia::Transform::identity(),
            clips: Vec::new(),
        }
    }

    fn clip(&self) -> Option<&Mask> {
        self.clips.iter().rev().flatten().next()
    }

    fn full_transform(&self, transform: Option<&geom::Transform>) -> tiny_skia::Transform {
        transform
            .map(|t| t.post_concat(self.transform))
            .unwrap_or(self.transform)
    }

    fn prepare(&mut self, size: geom::Size) {
        if size.width() > 0.0 && size.height() > 0.0 {
            let sx = self.width as f32 / size.width();
            let sy = self.height as f32 / size.height();
            self.transform = tiny_skia::Transform::from_scale(sx, sy);
        } else {
            log::warn!("preparing a raster surface for an empty figure");
            self.transform = tiny_skia::Transform::identity();
        }
        self.clips.clear();
    }

    fn fill(&mut self, px: &mut PixmapMut<'_>, fill: render::Paint) {
        match fill {
            render::Paint::Solid(color) => px.fill(ts_color(color)),
            render::Paint::Hatch { .. } => {
                let rect = tiny_skia::Rect::from_xywh(0.0, 0.0, px.width() as f32, px.height() as f32);
                if let Some(rect) = rect {
                    let path = tiny_skia::PathBuilder::from_rect(rect);
                    fill_path(px, &path, fill, tiny_skia::Transform::identity(), None);
                }
            }
        }
    }

    fn draw_path(&mut self, px: &mut PixmapMut<'_>, path: &render::Path) {
        let transform = self.full_transform(path.transform);
        let clip = self.clip();

        if let Some(fill) = path.fill {
            fill_path(px, path.path, fill, transform, clip);
        }
        if let Some(stroke) = path.stroke {
            let mut paint = tiny_skia::Paint::default();
            let stroke = ts_stroke(stroke, &mut paint);
            px.stroke_path(path.path, &paint, &stroke, transform, clip);
        }
    }

    fn push_clip(&mut self, clip: &render::Clip) {
        let transform = self.full_transform(clip.transform);
        let mask = match (clip.rect.to_path(), self.clip()) {
            (Some(path), Some(current)) => {
                let mut mask = current.clone();
                mask.intersect_path(&path, FillRule::Winding, false, transform);
                Some(mask)
            }
            (Some(path), None) => Mask::new(self.width, self.height).map(|mut mask| {
                mask.fill_path(&path, FillRule::Winding, false, transform);
                mask
            }),
            // empty clip: nothing gets through
            (None, _) => Mask::new(self.width, self.height),
        };
        if mask.is_none() {
            log::warn!("could not allocate a clip mask");
        }
        self.clips.push(mask);
    }

    fn pop_clip(&mut self) {
        if self.clips.pop().is_none() {
            log::warn!("pop_clip without matching push_clip");
        }
    }
}

impl render::Surface for PxlSurface {
    fn prepare(&mut self, size: geom::Size) {
        self.state.prepare(size)
    }

    fn fill(&mut self, fill: render::Paint) {
        let mut px = self.pixmap.as_mut();
        self.state.fill(&mut px, fill)
    }

    fn draw_path(&mut self, path: &render::Path) {
        let mut px = self.pixmap.as_mut();
        self.state.draw_path(&mut px, path)
    }

    fn push_clip(&mut self, clip: &render::Clip) {
        self.state.push_clip(clip)
    }

    fn pop_clip(&mut self) {
        self.state.pop_clip()
    }
}

impl render::Surface for PxlSurfaceRef<'_> {
    fn prepare(&mut self, size: geom::Size) {
        self.state.prepare(size)
    }

    fn fill(&mut self, fill: render::Paint) {
        self.state.fill(&mut self.pixmap, fill)
    }

    fn draw_path(&mut self, path: &render::Path) {
        self.state.draw_path(&mut self.pixmap, path)
    }

    fn push_clip(&mut self, clip: &render::Clip) {
        self.state.push_clip(clip)
    }

    fn pop_clip(&mut self) {
        self.state.pop_clip()
    }
}

fn fill_path(
    px: &mut PixmapMut<'_>,
    path: &tiny_skia::Path,
    fill: render::Paint,
    transform: tiny_skia::Transform,
    clip: Option<&Mask>,
) {
    let mut paint = tiny_skia::Paint::default();
    paint.force_hq_pipeline = true;
    match fill {
        render::Paint::Solid(color) => {
            paint.set_color(ts_color(color));
            px.fill_path(path, &paint, FillRule::Winding, transform, clip);
        }
        render::Paint::Hatch { fore, back, hatch } => {
            let Some(tile) = hatch_tile(fore, back, hatch) else {
                return;
            };
            paint.shader = tiny_skia::Pattern::new(
                tile.as_ref(),
                tiny_skia::SpreadMode::Repeat,
                tiny_skia::FilterQuality::Nearest,
                1.0,
                tiny_skia::Transform::identity(),
            );
            px.fill_path(path, &paint, FillRule::Winding, transform, clip);
        }
    }
}

/// The repeating tile of a hatch pattern
fn hatch_tile(fore: ColorU8, back: ColorU8, hatch: render::Hatch) -> Option<Pixmap> {
    use render::Hatch;

    let size: u32 = match hatch {
        Hatch::LargeCheckerBoard | Hatch::LargeGrid => 16,
        _ => 8,
    };
    let is_fore = |x: u32, y: u32| match hatch {
        Hatch::None => false,
        Hatch::StripedUpwardDiagonal => (x + y) % size == size - 1,
        Hatch::StripedDownwardDiagonal => x == y,
        Hatch::SmallCheckerBoard | Hatch::LargeCheckerBoard => (x < size / 2) != (y < size / 2),
        Hatch::SmallGrid | Hatch::LargeGrid => x == 0 || y == 0,
    };

    let mut tile = Pixmap::new(size, size)?;
    let fore = ts_color(fore).premultiply().to_color_u8();
    let back = ts_color(back).premultiply().to_color_u8();
    for (i, px) in tile.pixels_mut().iter_mut().enumerate() {
        let (x, y) = (i as u32 % size, i as u32 / size);
        *px = if is_fore(x, y) { fore } else { back };
    }
    Some(tile)
}

fn ts_color(color: ColorU8) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red(), color.green(), color.blue(), color.alpha())
}

fn ts_stroke(stroke: render::Stroke, paint: &mut tiny_skia::Paint) -> tiny_skia::Stroke {
    paint.force_hq_pipeline = true;
    paint.set_color(ts_color(stroke.color));

    let mut ts = tiny_skia::Stroke {
        width: stroke.width,
        ..Default::default()
    };

    match stroke.pattern {
        render::LinePattern::Solid => (),
        render::LinePattern::Dash(dash) => {
            let array = dash.iter().map(|d| d * stroke.width).collect();
            ts.dash = tiny_skia::StrokeDash::new(array, 0.0);
        }
    }
    ts
}

#[cfg(test)]
mod tests {
    use quickplot::color;
    use quickplot::render::Surface;

    use super::*;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    fn fill_rect(surface: &mut PxlSurface, rect: geom::Rect, color: ColorU8) {
        surface.draw_rect(&render::Rect {
            rect,
            fill: Some(color.into()),
            stroke: None,
            transform: None,
        });
    }

    #[test]
    fn invalid_size() {
        assert!(matches!(
            PxlSurface::new(0, 10),
            Err(Error::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn prepare_scales_the_figure() {
        let mut surface = PxlSurface::new(20, 20).unwrap();
        surface.prepare(geom::Size::new(10.0, 10.0));
        surface.fill(color::WHITE.into());
        fill_rect(&mut surface, geom::Rect::from_xywh(5.0, 5.0, 5.0, 5.0), color::RED);
        assert_eq!(pixel(surface.pixmap(), 15, 15), [255, 0, 0, 255]);
        assert_eq!(pixel(surface.pixmap(), 5, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn nested_clips_intersect() {
        let mut surface = PxlSurface::new(20, 20).unwrap();
        surface.prepare(geom::Size::new(20.0, 20.0));
        surface.push_clip(&render::Clip {
            rect: &geom::Rect::from_xywh(0.0, 0.0, 10.0, 20.0),
            transform: None,
        });
        surface.push_clip(&render::Clip {
            rect: &geom::Rect::from_xywh(0.0, 0.0, 20.0, 10.0),
            transform: None,
        });
        fill_rect(&mut surface, geom::Rect::from_xywh(0.0, 0.0, 20.0, 20.0), color::BLUE);
        assert_eq!(pixel(surface.pixmap(), 5, 5)[3], 255);
        assert_eq!(pixel(surface.pixmap(), 15, 5)[3], 0);
        assert_eq!(pixel(surface.pixmap(), 5, 15)[3], 0);

        surface.pop_clip();
        fill_rect(&mut surface, geom::Rect::from_xywh(0.0, 0.0, 20.0, 20.0), color::BLUE);
        assert_eq!(pixel(surface.pixmap(), 5, 15)[3], 255);
        assert_eq!(pixel(surface.pixmap(), 15, 15)[3], 0);

        surface.pop_clip();
        fill_rect(&mut surface, geom::Rect::from_xywh(0.0, 0.0, 20.0, 20.0), color::BLUE);
        assert_eq!(pixel(surface.pixmap(), 15, 15)[3], 255);
    }

    #[test]
    fn hatch_uses_both_colors() {
        let mut surface = PxlSurface::new(16, 16).unwrap();
        surface.prepare(geom::Size::new(16.0, 16.0));
        surface.fill(render::Paint::Hatch {
            fore: color::BLACK,
            back: color::WHITE,
            hatch: render::Hatch::SmallGrid,
        });
        assert_eq!(pixel(surface.pixmap(), 0, 0), [0, 0, 0, 255]);
        assert_eq!(pixel(surface.pixmap(), 3, 3), [255, 255, 255, 255]);
        assert_eq!(pixel(surface.pixmap(), 8, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn borrowed_pixels() {
        let mut bytes = vec![0u8; 4 * 4 * 4];
        {
            let mut surface = PxlSurfaceRef::from_bytes(&mut bytes, 4, 4).unwrap();
            surface.prepare(geom::Size::new(4.0, 4.0));
            surface.fill(color::GREEN.into());
        }
        assert_eq!(&bytes[0..4], &[0, 128, 0, 255]);
        assert!(PxlSurfaceRef::from_bytes(&mut bytes, 5, 5).is_err());
    }
}
