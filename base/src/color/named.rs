use super::ColorU8;

pub const TRANSPARENT: ColorU8 = ColorU8::from_rgba(0, 0, 0, 0);
pub const BLACK: ColorU8 = ColorU8::from_rgb(0, 0, 0);
pub const WHITE: ColorU8 = ColorU8::from_rgb(255, 255, 255);
pub const RED: ColorU8 = ColorU8::from_rgb(255, 0, 0);
pub const GREEN: ColorU8 = ColorU8::from_rgb(0, 128, 0);
pub const LIME: ColorU8 = ColorU8::from_rgb(0, 255, 0);
pub const BLUE: ColorU8 = ColorU8::from_rgb(0, 0, 255);
pub const YELLOW: ColorU8 = ColorU8::from_rgb(255, 255, 0);
pub const CYAN: ColorU8 = ColorU8::from_rgb(0, 255, 255);
pub const MAGENTA: ColorU8 = ColorU8::from_rgb(255, 0, 255);
pub const GRAY: ColorU8 = ColorU8::from_rgb(128, 128, 128);
pub const DARKGRAY: ColorU8 = ColorU8::from_rgb(169, 169, 169);
pub const LIGHTGRAY: ColorU8 = ColorU8::from_rgb(211, 211, 211);
pub const SILVER: ColorU8 = ColorU8::from_rgb(192, 192, 192);
pub const WHITESMOKE: ColorU8 = ColorU8::from_rgb(245, 245, 245);
pub const ORANGE: ColorU8 = ColorU8::from_rgb(255, 165, 0);
pub const PURPLE: ColorU8 = ColorU8::from_rgb(128, 0, 128);
pub const NAVY: ColorU8 = ColorU8::from_rgb(0, 0, 128);
pub const TEAL: ColorU8 = ColorU8::from_rgb(0, 128, 128);
pub const MAROON: ColorU8 = ColorU8::from_rgb(128, 0, 0);
pub const OLIVE: ColorU8 = ColorU8::from_rgb(128, 128, 0);
pub const BROWN: ColorU8 = ColorU8::from_rgb(165, 42, 42);
pub const PINK: ColorU8 = ColorU8::from_rgb(255, 192, 203);
pub const GOLD: ColorU8 = ColorU8::from_rgb(255, 215, 0);
pub const STEELBLUE: ColorU8 = ColorU8::from_rgb(70, 130, 180);
pub const DODGERBLUE: ColorU8 = ColorU8::from_rgb(30, 144, 255);
pub const FORESTGREEN: ColorU8 = ColorU8::from_rgb(34, 139, 34);
pub const CRIMSON: ColorU8 = ColorU8::from_rgb(220, 20, 60);
pub const SLATEGRAY: ColorU8 = ColorU8::from_rgb(112, 128, 144);

const NAMES: &[(&str, ColorU8)] = &[
    ("transparent", TRANSPARENT),
    ("black", BLACK),
    ("white", WHITE),
    ("red", RED),
    ("green", GREEN),
    ("lime", LIME),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("cyan", CYAN),
    ("aqua", CYAN),
    ("magenta", MAGENTA),
    ("fuchsia", MAGENTA),
    ("gray", GRAY),
    ("grey", GRAY),
    ("darkgray", DARKGRAY),
    ("darkgrey", DARKGRAY),
    ("lightgray", LIGHTGRAY),
    ("lightgrey", LIGHTGRAY),
    ("silver", SILVER),
    ("whitesmoke", WHITESMOKE),
    ("orange", ORANGE),
    ("purple", PURPLE),
    ("navy", NAVY),
    ("teal", TEAL),
    ("maroon", MAROON),
    ("olive", OLIVE),
    ("brown", BROWN),
    ("pink", PINK),
    ("gold", GOLD),
    ("steelblue", STEELBLUE),
    ("dodgerblue", DODGERBLUE),
    ("forestgreen", FORESTGREEN),
    ("crimson", CRIMSON),
    ("slategray", SLATEGRAY),
    ("slategrey", SLATEGRAY),
];

/// Look up a color by its CSS name, ignoring case
pub fn lookup_name(name: &str) -> Option<ColorU8> {
    NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| *c)
}
