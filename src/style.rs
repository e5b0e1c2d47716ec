//! Style definitions for lines, markers, fonts, palettes and colormaps.
pub mod colormap;
pub(crate) mod defaults;
pub mod palette;

pub use colormap::Colormap;
pub use palette::Palette;
pub use crate::render::Hatch;

use crate::{ColorU8, color, render, text};

const DASH: &[f32] = &[5.0, 5.0];
const DOT: &[f32] = &[1.0, 2.0];
const DASH_DOT: &[f32] = &[5.0, 3.0, 1.0, 3.0];
const DASH_DOT_DOT: &[f32] = &[5.0, 3.0, 1.0, 3.0, 1.0, 3.0];

/// How a line is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineStyle {
    /// The line is not drawn
    None,
    /// Solid line
    #[default]
    Solid,
    /// Dashed line
    Dash,
    /// Alternating dashes and dots
    DashDot,
    /// A dash followed by two dots
    DashDotDot,
    /// Dotted line
    Dot,
}

impl LineStyle {
    /// The render pattern of this style, None for [`LineStyle::None`]
    pub fn pattern(&self) -> Option<render::LinePattern<'static>> {
        match self {
            LineStyle::None => None,
            LineStyle::Solid => Some(render::LinePattern::Solid),
            LineStyle::Dash => Some(render::LinePattern::Dash(DASH)),
            LineStyle::DashDot => Some(render::LinePattern::Dash(DASH_DOT)),
            LineStyle::DashDotDot => Some(render::LinePattern::Dash(DASH_DOT_DOT)),
            LineStyle::Dot => Some(render::LinePattern::Dash(DOT)),
        }
    }

    /// A stroke in this style, or None when nothing would be visible
    pub fn stroke(&self, color: ColorU8, width: f32) -> Option<render::Stroke<'static>> {
        if width <= 0.0 || color.is_transparent() {
            return None;
        }
        self.pattern().map(|pattern| render::Stroke {
            color,
            width,
            pattern,
        })
    }
}

/// Shape of the markers drawn at data points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkerShape {
    /// No marker
    None,
    /// Filled circle (the default)
    #[default]
    FilledCircle,
    /// Circle outline
    OpenCircle,
    /// Filled square
    FilledSquare,
    /// Square outline
    OpenSquare,
    /// Filled diamond
    FilledDiamond,
    /// Diamond outline
    OpenDiamond,
    /// Filled triangle pointing up
    FilledTriangleUp,
    /// Triangle outline pointing up
    OpenTriangleUp,
    /// Filled triangle pointing down
    FilledTriangleDown,
    /// Triangle outline pointing down
    OpenTriangleDown,
    /// Plus sign
    Cross,
    /// X sign
    Eks,
    /// Plus and X signs combined
    Asterisk,
    /// Vertical bar
    VerticalBar,
}

impl MarkerShape {
    /// Whether the shape is drawn by filling its path
    pub fn is_filled(&self) -> bool {
        matches!(
            self,
            MarkerShape::FilledCircle
                | MarkerShape::FilledSquare
                | MarkerShape::FilledDiamond
                | MarkerShape::FilledTriangleUp
                | MarkerShape::FilledTriangleDown
        )
    }
}

/// Position of an element relative to an anchor, or within an area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Top left
    #[default]
    UpperLeft,
    /// Top center
    UpperCenter,
    /// Top right
    UpperRight,
    /// Middle left
    MiddleLeft,
    /// Middle center
    MiddleCenter,
    /// Middle right
    MiddleRight,
    /// Bottom left
    LowerLeft,
    /// Bottom center
    LowerCenter,
    /// Bottom right
    LowerRight,
}

impl Alignment {
    /// Horizontal fraction of the element's width that lies left of the anchor
    pub fn x_fraction(&self) -> f32 {
        match self {
            Alignment::UpperLeft | Alignment::MiddleLeft | Alignment::LowerLeft => 0.0,
            Alignment::UpperCenter | Alignment::MiddleCenter | Alignment::LowerCenter => 0.5,
            Alignment::UpperRight | Alignment::MiddleRight | Alignment::LowerRight => 1.0,
        }
    }

    /// Vertical fraction of the element's height that lies above the anchor
    pub fn y_fraction(&self) -> f32 {
        match self {
            Alignment::UpperLeft | Alignment::UpperCenter | Alignment::UpperRight => 0.0,
            Alignment::MiddleLeft | Alignment::MiddleCenter | Alignment::MiddleRight => 0.5,
            Alignment::LowerLeft | Alignment::LowerCenter | Alignment::LowerRight => 1.0,
        }
    }

    /// The horizontal alignment of text lines matching this alignment
    pub fn text_align(&self) -> text::Align {
        match self.x_fraction() {
            f if f < 0.25 => text::Align::Left,
            f if f > 0.75 => text::Align::Right,
            _ => text::Align::Center,
        }
    }
}

/// Font used to draw text
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Family name, the database's sans-serif family when None
    pub name: Option<String>,
    /// Size in pixels
    pub size: f32,
    /// Text color
    pub color: ColorU8,
    /// Bold weight
    pub bold: bool,
    /// Position of the text relative to its anchor point
    pub alignment: Alignment,
    /// Clockwise rotation in degrees around the anchor point
    pub rotation: f32,
}

impl Default for Font {
    fn default() -> Self {
        Font {
            name: None,
            size: defaults::FONT_SIZE,
            color: color::BLACK,
            bold: false,
            alignment: Alignment::UpperLeft,
            rotation: 0.0,
        }
    }
}

impl Font {
    /// Font of the given size, other properties default
    pub fn sized(size: f32) -> Self {
        Font {
            size,
            ..Default::default()
        }
    }

    /// Set the size, returning self for chaining
    pub fn with_size(self, size: f32) -> Self {
        Font { size, ..self }
    }

    /// Set the color, returning self for chaining
    pub fn with_color(self, color: ColorU8) -> Self {
        Font { color, ..self }
    }

    /// Set the bold weight, returning self for chaining
    pub fn with_bold(self, bold: bool) -> Self {
        Font { bold, ..self }
    }

    /// Set the alignment, returning self for chaining
    pub fn with_alignment(self, alignment: Alignment) -> Self {
        Font { alignment, ..self }
    }

    /// Set the rotation, returning self for chaining
    pub fn with_rotation(self, rotation: f32) -> Self {
        Font { rotation, ..self }
    }

    /// Set the family name, returning self for chaining
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Font {
            name: Some(name.into()),
            ..self
        }
    }

    /// The font database query for this font
    pub fn query(&self) -> text::Font {
        text::Font::from_name(self.name.as_deref(), self.bold)
    }
}
