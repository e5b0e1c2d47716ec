//! Colors, named color constants and CSS-like color parsing.

use std::str::FromStr;
use std::{error, fmt};

mod named;

pub use named::*;

/// An 8-bit per channel RGBA color, not premultiplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorU8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Default for ColorU8 {
    fn default() -> Self {
        BLACK
    }
}

impl ColorU8 {
    /// Opaque color from its components
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        ColorU8 { r, g, b, a: 255 }
    }

    /// Color from its components and alpha
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8 { r, g, b, a }
    }

    /// Opaque color from a `#rrggbb` literal, usable in const contexts.
    ///
    /// # Panics
    /// Panics if `html` is not a `#` followed by six hex digits.
    /// Use [`str::parse`] for runtime strings.
    pub const fn from_html(html: &[u8]) -> Self {
        assert!(html.len() == 7 && html[0] == b'#', "expected #rrggbb");
        const fn digit(c: u8) -> u8 {
            match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hex digit"),
            }
        }
        ColorU8 {
            r: digit(html[1]) << 4 | digit(html[2]),
            g: digit(html[3]) << 4 | digit(html[4]),
            b: digit(html[5]) << 4 | digit(html[6]),
            a: 255,
        }
    }

    /// Copy of `base` with the given alpha
    pub const fn from_argb(a: u8, base: ColorU8) -> Self {
        ColorU8 { a, ..base }
    }

    /// Opaque color from float components in [0, 1]
    pub fn from_rgb_f32(r: f32, g: f32, b: f32) -> Self {
        ColorU8 {
            r: unit_to_u8(r),
            g: unit_to_u8(g),
            b: unit_to_u8(b),
            a: 255,
        }
    }

    /// Components as an array
    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Red component
    pub const fn red(&self) -> u8 {
        self.r
    }

    /// Green component
    pub const fn green(&self) -> u8 {
        self.g
    }

    /// Blue component
    pub const fn blue(&self) -> u8 {
        self.b
    }

    /// Alpha component
    pub const fn alpha(&self) -> u8 {
        self.a
    }

    /// Whether the color is fully transparent
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// The `#rrggbb` or `#rrggbbaa` form of the color
    pub fn html(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Copy with the given alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        ColorU8 { a, ..self }
    }

    /// Copy with the alpha scaled by `opacity`, clamped to [0, 1]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        ColorU8 {
            a: (self.a as f32 * opacity).round() as u8,
            ..self
        }
    }

    /// Linear interpolation between two colors, `t` in [0, 1]
    pub fn lerp(self, other: ColorU8, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        ColorU8 {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Error returned when a color string cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The string is not in any supported format
    InvalidFormat,
    /// A color component is out of range or not a number
    InvalidComponent,
    /// The alpha component is out of range or not a number
    InvalidAlphaComponent,
    /// A hex color has the wrong length or a non-hex digit
    InvalidHex,
    /// No color has this name
    UnknownName,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidFormat => write!(f, "invalid color format"),
            ParseError::InvalidComponent => write!(f, "invalid color component"),
            ParseError::InvalidAlphaComponent => write!(f, "invalid alpha component"),
            ParseError::InvalidHex => write!(f, "invalid hex color"),
            ParseError::UnknownName => write!(f, "unknown color name"),
        }
    }
}

impl error::Error for ParseError {}

fn hex_digit(c: u8) -> Result<u8, ParseError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ParseError::InvalidHex),
    }
}

fn parse_hex(digits: &[u8]) -> Result<ColorU8, ParseError> {
    let short = |i: usize| hex_digit(digits[i]).map(|d| d << 4 | d);
    let long = |i: usize| -> Result<u8, ParseError> {
        Ok(hex_digit(digits[i])? << 4 | hex_digit(digits[i + 1])?)
    };
    match digits.len() {
        3 => Ok(ColorU8::from_rgb(short(0)?, short(1)?, short(2)?)),
        4 => Ok(ColorU8::from_rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Ok(ColorU8::from_rgb(long(0)?, long(2)?, long(4)?)),
        8 => Ok(ColorU8::from_rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
        _ => Err(ParseError::InvalidHex),
    }
}

fn parse_percent(s: &str) -> Option<Result<f32, ()>> {
    let s = s.strip_suffix('%')?;
    Some(match s.trim().parse::<f32>() {
        Ok(v) if (0.0..=100.0).contains(&v) => Ok(v / 100.0),
        _ => Err(()),
    })
}

fn parse_component(s: &str) -> Result<u8, ParseError> {
    let s = s.trim();
    if let Some(pct) = parse_percent(s) {
        return pct
            .map(unit_to_u8)
            .map_err(|_| ParseError::InvalidComponent);
    }
    s.parse::<u8>().map_err(|_| ParseError::InvalidComponent)
}

fn parse_alpha(s: &str) -> Result<u8, ParseError> {
    let s = s.trim();
    if let Some(pct) = parse_percent(s) {
        return pct
            .map(unit_to_u8)
            .map_err(|_| ParseError::InvalidAlphaComponent);
    }
    match s.parse::<f32>() {
        Ok(f) if (0.0..=1.0).contains(&f) => Ok(unit_to_u8(f)),
        _ => Err(ParseError::InvalidAlphaComponent),
    }
}

fn function_args<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    let lower = raw.get(..name.len() + 1)?.to_ascii_lowercase();
    if lower != format!("{name}(") {
        return None;
    }
    raw[name.len() + 1..].strip_suffix(')')
}

impl FromStr for ColorU8 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ParseError::InvalidFormat);
        }

        if let Some(hex) = raw.strip_prefix('#') {
            return parse_hex(hex.as_bytes());
        }

        if let Some(args) = function_args(raw, "rgba") {
            let parts: Vec<&str> = args.split(',').collect();
            let [r, g, b, a] = parts.as_slice() else {
                return Err(ParseError::InvalidFormat);
            };
            return Ok(ColorU8::from_rgba(
                parse_component(r)?,
                parse_component(g)?,
                parse_component(b)?,
                parse_alpha(a)?,
            ));
        }

        if let Some(args) = function_args(raw, "rgb") {
            let parts: Vec<&str> = args.split(',').collect();
            let [r, g, b] = parts.as_slice() else {
                return Err(ParseError::InvalidFormat);
            };
            return Ok(ColorU8::from_rgb(
                parse_component(r)?,
                parse_component(g)?,
                parse_component(b)?,
            ));
        }

        named::lookup_name(raw).ok_or(ParseError::UnknownName)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_forms() {
        assert_eq!("#ff0000".parse::<ColorU8>().unwrap(), RED);
        assert_eq!("#f00".parse::<ColorU8>().unwrap(), RED);
        assert_eq!(
            "#ff000080".parse::<ColorU8>().unwrap().rgba(),
            [255, 0, 0, 128]
        );
        assert_eq!("#efefef".parse::<ColorU8>().unwrap().rgba(), [239, 239, 239, 255]);
    }

    #[test]
    fn parse_functions() {
        assert_eq!("rgb(255, 0, 0)".parse::<ColorU8>().unwrap(), RED);
        assert_eq!("RGB(100%,0%,0%)".parse::<ColorU8>().unwrap(), RED);
        assert_eq!(
            "rgba(255,0,0,0.5)".parse::<ColorU8>().unwrap().rgba(),
            [255, 0, 0, 128]
        );
        assert_eq!(
            "rgba(255,0,0,50%)".parse::<ColorU8>().unwrap().rgba(),
            [255, 0, 0, 128]
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!("magenta".parse::<ColorU8>().unwrap(), MAGENTA);
        assert_eq!("DarkGray".parse::<ColorU8>().unwrap(), DARKGRAY);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<ColorU8>(), Err(ParseError::InvalidFormat));
        assert_eq!("#12345".parse::<ColorU8>(), Err(ParseError::InvalidHex));
        assert_eq!("#gg0000".parse::<ColorU8>(), Err(ParseError::InvalidHex));
        assert_eq!(
            "rgb(300,0,0)".parse::<ColorU8>(),
            Err(ParseError::InvalidComponent)
        );
        assert_eq!(
            "rgba(255,0,0,2.0)".parse::<ColorU8>(),
            Err(ParseError::InvalidAlphaComponent)
        );
        assert_eq!("rgb(1,2)".parse::<ColorU8>(), Err(ParseError::InvalidFormat));
        assert_eq!("notacolor".parse::<ColorU8>(), Err(ParseError::UnknownName));
    }

    #[test]
    fn argb_and_opacity() {
        let c = ColorU8::from_argb(128, MAGENTA);
        assert_eq!(c.rgba(), [255, 0, 255, 128]);
        assert_eq!(BLACK.with_opacity(0.5).alpha(), 128);
        assert!(TRANSPARENT.is_transparent());
        assert_eq!(c.html(), "#ff00ff80");
    }

    #[test]
    fn lerp_midpoint() {
        let c = BLACK.lerp(WHITE, 0.5);
        assert_eq!(c.rgba(), [128, 128, 128, 255]);
    }
}
