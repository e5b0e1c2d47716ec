use crate::{ColorU8, color};

pub const FONT_SIZE: f32 = 12.0;

pub const AXIS_LABEL_FONT_SIZE: f32 = 16.0;
pub const AXIS_LABEL_PADDING: f32 = 3.0;
pub const TICK_LABEL_FONT_SIZE: f32 = 11.0;
pub const TICK_LABEL_GAP: f32 = 3.0;
pub const MAJOR_TICK_LENGTH: f32 = 5.0;
pub const MINOR_TICK_LENGTH: f32 = 2.0;
pub const RULER_TICK_MULTIPLIER: f32 = 4.0;
pub const GRID_COLOR: ColorU8 = ColorU8::from_html(b"#efefef");
pub const GRID_WIDTH: f32 = 1.0;
pub const SPINE_WIDTH: f32 = 1.0;

pub const LINE_WIDTH: f32 = 1.0;
pub const MARKER_SIZE: f32 = 5.0;
pub const MARKER_LINE_WIDTH: f32 = 1.0;
pub const ERROR_CAP_SIZE: f32 = 3.0;
pub const HIGHLIGHT_COEFFICIENT: f32 = 2.0;

pub const SPAN_COLOR: ColorU8 = ColorU8::from_argb(128, color::MAGENTA);
pub const CROSSHAIR_COLOR: ColorU8 = ColorU8::from_argb(200, color::RED);
pub const SHADOW_COLOR: ColorU8 = ColorU8::from_argb(25, color::BLACK);

pub const LEGEND_SYMBOL_WIDTH: f32 = 40.0;
pub const LEGEND_PADDING: f32 = 5.0;
pub const LEGEND_SHADOW_COLOR: ColorU8 = ColorU8::from_argb(50, color::BLACK);
pub const LEGEND_SHADOW_OFFSET: f32 = 2.0;
pub const LEGEND_SYMBOL_HEIGHT: f32 = 10.0;
pub const LEGEND_HIDDEN_ALPHA: u8 = 100;
pub const LEGEND_RECT_LINE_WIDTH: f32 = 10.0;
pub const LEGEND_MAX_MARKER_LINE_WIDTH: f32 = 3.0;

pub const AXIS_AUTO_MARGIN_H: f64 = 0.05;
pub const AXIS_AUTO_MARGIN_V: f64 = 0.1;
pub const AXIS_NO_DATA_MIN: f64 = -10.0;
pub const AXIS_NO_DATA_MAX: f64 = 10.0;

pub const MOUSE_CAPTURE_DISTANCE: f32 = 5.0;
pub const FIGURE_PADDING: f32 = 10.0;
