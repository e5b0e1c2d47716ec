//! Render module: abstraction over rendering surfaces.
//!
//! Plottables never talk to a graphics API directly: they issue rectangles and paths
//! to a [`Surface`]. Text reaches the surface already converted to paths.
//! See the `quickplot-pxl` crate for the raster implementation.

use crate::{ColorU8, geom};

/// Surface trait: defines the rendering surface API
pub trait Surface {
    /// Prepare the surface for drawing a figure of the given size in pixels
    fn prepare(&mut self, size: geom::Size);

    /// Fill the entire surface, ignoring any clip
    fn fill(&mut self, fill: Paint);

    /// Draw a rectangle
    ///
    /// Default implementation converts the rectangle to a path and call [`draw_path`](Surface::draw_path)
    fn draw_rect(&mut self, rect: &Rect) {
        let Some(path) = rect.rect.to_path() else {
            return;
        };
        self.draw_path(&Path {
            path: &path,
            fill: rect.fill,
            stroke: rect.stroke,
            transform: rect.transform,
        });
    }

    /// Draw a path
    fn draw_path(&mut self, path: &Path);

    /// Push a clipping rect.
    /// The new clip is intersected with the current one, and stays active
    /// until the matching [`pop_clip`](Surface::pop_clip).
    fn push_clip(&mut self, clip: &Clip);

    /// Pop the clipping rect pushed last
    fn pop_clip(&mut self);
}

/// Hatch pattern drawn over a background color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Hatch {
    /// No hatching, the background color fills the area
    #[default]
    None,
    /// Diagonal stripes going up to the right
    StripedUpwardDiagonal,
    /// Diagonal stripes going down to the right
    StripedDownwardDiagonal,
    /// Checker board with small squares
    SmallCheckerBoard,
    /// Checker board with large squares
    LargeCheckerBoard,
    /// Thin grid with small cells
    SmallGrid,
    /// Thin grid with large cells
    LargeGrid,
}

/// Paint pattern, used for fill operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Solid color fill
    Solid(ColorU8),
    /// Hatch pattern in `fore` color over `back` color
    Hatch {
        /// Color of the pattern
        fore: ColorU8,
        /// Color behind the pattern
        back: ColorU8,
        /// The pattern
        hatch: Hatch,
    },
}

impl Paint {
    /// A solid paint for `Hatch::None`, a hatch paint otherwise
    pub fn hatched(back: ColorU8, fore: ColorU8, hatch: Hatch) -> Paint {
        match hatch {
            Hatch::None => Paint::Solid(back),
            hatch => Paint::Hatch { fore, back, hatch },
        }
    }
}

impl From<ColorU8> for Paint {
    fn from(value: ColorU8) -> Self {
        Paint::Solid(value)
    }
}

/// Line pattern defines how the line is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LinePattern<'a> {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line. The pattern is relative to the line width.
    Dash(&'a [f32]),
}

/// Stroke style definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    /// Line color
    pub color: ColorU8,
    /// Line width in pixels
    pub width: f32,
    /// Line pattern
    pub pattern: LinePattern<'a>,
}

impl From<(ColorU8, f32)> for Stroke<'_> {
    fn from((color, width): (ColorU8, f32)) -> Self {
        Stroke {
            color,
            width,
            pattern: LinePattern::Solid,
        }
    }
}

/// Rectangle to draw
#[derive(Debug, Clone)]
pub struct Rect<'a> {
    /// Rectangle geometry
    pub rect: geom::Rect,
    /// Fill style
    pub fill: Option<Paint>,
    /// Stroke style
    pub stroke: Option<Stroke<'a>>,
    /// Optional transform to apply to the rectangle
    pub transform: Option<&'a geom::Transform>,
}

/// Path to draw
#[derive(Debug, Clone)]
pub struct Path<'a> {
    /// Path geometry
    pub path: &'a geom::Path,
    /// Fill style
    pub fill: Option<Paint>,
    /// Stroke style
    pub stroke: Option<Stroke<'a>>,
    /// Optional transform to apply to the path
    pub transform: Option<&'a geom::Transform>,
}

/// Clipping rectangle
#[derive(Debug, Clone)]
pub struct Clip<'a> {
    /// Clipping rectangle
    pub rect: &'a geom::Rect,
    /// Optional transform to apply to the clipping rectangle
    pub transform: Option<&'a geom::Transform>,
}
