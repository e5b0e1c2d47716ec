//! Colormaps convert a fraction in [0, 1] into a color.
use crate::ColorU8;

/// A continuous color scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Colormap {
    /// Perceptually uniform, dark purple to yellow
    #[default]
    Viridis,
    /// Black to white
    Grayscale,
    /// Blue through cyan, yellow and red
    Jet,
}

const VIRIDIS: &[ColorU8] = &[
    ColorU8::from_html(b"#440154"),
    ColorU8::from_html(b"#482878"),
    ColorU8::from_html(b"#3e4989"),
    ColorU8::from_html(b"#31688e"),
    ColorU8::from_html(b"#26828e"),
    ColorU8::from_html(b"#1f9e89"),
    ColorU8::from_html(b"#35b779"),
    ColorU8::from_html(b"#6ece58"),
    ColorU8::from_html(b"#b5de2b"),
    ColorU8::from_html(b"#fde725"),
];

const JET: &[ColorU8] = &[
    ColorU8::from_html(b"#00007f"),
    ColorU8::from_html(b"#0000ff"),
    ColorU8::from_html(b"#007fff"),
    ColorU8::from_html(b"#00ffff"),
    ColorU8::from_html(b"#7fff7f"),
    ColorU8::from_html(b"#ffff00"),
    ColorU8::from_html(b"#ff7f00"),
    ColorU8::from_html(b"#ff0000"),
    ColorU8::from_html(b"#7f0000"),
];

const GRAYSCALE: &[ColorU8] = &[
    ColorU8::from_html(b"#000000"),
    ColorU8::from_html(b"#ffffff"),
];

impl Colormap {
    fn anchors(&self) -> &'static [ColorU8] {
        match self {
            Colormap::Viridis => VIRIDIS,
            Colormap::Grayscale => GRAYSCALE,
            Colormap::Jet => JET,
        }
    }

    /// The color at `fraction`, clamped to [0, 1]. NaN maps to the first color.
    pub fn get(&self, fraction: f64) -> ColorU8 {
        let anchors = self.anchors();
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let pos = fraction * (anchors.len() - 1) as f64;
        let idx = (pos.floor() as usize).min(anchors.len() - 2);
        let t = (pos - idx as f64) as f32;
        anchors[idx].lerp(anchors[idx + 1], t)
    }
}
