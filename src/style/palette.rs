/*!
 * Palettes assign colors to plottables in the order they are added.
 */
use crate::ColorU8;

/// A cycling list of colors
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Palette {
    /// The ten colors of the category10 scheme
    #[default]
    Category10,
    /// Black only
    Black,
    /// User supplied colors
    Custom(Vec<ColorU8>),
}

impl Palette {
    fn colors(&self) -> &[ColorU8] {
        match self {
            Palette::Category10 => CATEGORY10,
            Palette::Black => BLACK,
            Palette::Custom(colors) => colors,
        }
    }

    /// Number of colors before the palette repeats
    pub fn len(&self) -> usize {
        self.colors().len()
    }

    /// Whether the palette has no color. `get` then returns black.
    pub fn is_empty(&self) -> bool {
        self.colors().is_empty()
    }

    /// The color at `index`, wrapping around the palette length
    pub fn get(&self, index: usize) -> ColorU8 {
        let colors = self.colors();
        if colors.is_empty() {
            return crate::color::BLACK;
        }
        colors[index % colors.len()]
    }
}

const BLACK: &[ColorU8] = &[ColorU8::from_html(b"#000000")];

const CATEGORY10: &[ColorU8] = &[
    ColorU8::from_html(b"#1f77b4"), // blue
    ColorU8::from_html(b"#ff7f0e"), // orange
    ColorU8::from_html(b"#2ca02c"), // green
    ColorU8::from_html(b"#d62728"), // red
    ColorU8::from_html(b"#9467bd"), // purple
    ColorU8::from_html(b"#8c564b"), // brown
    ColorU8::from_html(b"#e377c2"), // pink
    ColorU8::from_html(b"#7f7f7f"), // gray
    ColorU8::from_html(b"#bcbd22"), // olive
    ColorU8::from_html(b"#17becf"), // cyan
];
