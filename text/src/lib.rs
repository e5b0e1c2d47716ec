//! Text shaping and outlining for quickplot.
//!
//! Text is shaped with rustybuzz and every glyph is outlined with ttf-parser,
//! so that rendering surfaces only ever receive paths.
//! When no font face matches a query, the layout falls back to estimated metrics
//! and produces no outline, which keeps figure layout working on systems without fonts.
use std::fmt;

use quickplot_base::geom;
use ttf_parser as ttf;

pub mod font;
pub mod layout;

pub use font::{Family, Font, FontDb};
pub use layout::{Align, Text};

/// Errors raised while loading or parsing fonts
#[derive(Debug, Clone)]
pub enum Error {
    /// The font data could not be parsed
    FaceParsing(ttf::FaceParsingError),
    /// The font data contained no face
    NoFace,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FaceParsing(err) => write!(f, "Font parsing error: {}", err),
            Error::NoFace => write!(f, "No font face found in data"),
        }
    }
}

impl From<ttf::FaceParsingError> for Error {
    fn from(err: ttf::FaceParsingError) -> Self {
        Error::FaceParsing(err)
    }
}

impl std::error::Error for Error {}

struct Outliner<'a>(&'a mut geom::PathBuilder);

impl ttf::OutlineBuilder for Outliner<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}
