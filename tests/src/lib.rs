#![cfg(test)]

use quickplot::{AxisLimits, ColorU8, Plot, geom};
use tiny_skia::Pixmap;

mod tests;

/// Width and height of the rendered figures
const SIZE: u32 = 100;

/// A plot without visible axes nor margins: the data area covers the whole figure
/// and shows 0..10 on the primary axes and 0..100 on the secondary ones.
/// Data coordinates map to pixels by a factor 10 (resp. 1).
fn bare_plot() -> Plot {
    let mut plot = Plot::default();
    plot.margins = geom::Padding::Even(0.0);
    for pos in 0..plot.axes().len() {
        if let Some(mut axis) = plot.axes_mut().get_mut(pos) {
            axis.is_visible = false;
        }
    }
    plot.layout(geom::Size::new(SIZE as f32, SIZE as f32));
    plot.set_axis_limits(0, 0, AxisLimits::new(0.0, 10.0, 0.0, 10.0));
    plot.set_axis_limits(1, 1, AxisLimits::new(0.0, 100.0, 0.0, 100.0));
    plot
}

fn render(plot: &mut Plot) -> Pixmap {
    quickplot_pxl::render_plot(plot, SIZE, SIZE).unwrap()
}

fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> ColorU8 {
    let c = pixmap.pixel(x, y).unwrap().demultiply();
    ColorU8::from_rgba(c.red(), c.green(), c.blue(), c.alpha())
}

/// Number of pixels that differ between two renderings of the same size
fn diff_count(actual: &Pixmap, expected: &Pixmap) -> usize {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "pixmap sizes differ"
    );
    actual
        .pixels()
        .iter()
        .zip(expected.pixels())
        .filter(|(a, e)| a != e)
        .count()
}

macro_rules! assert_pixel {
    ($pixmap:expr, ($x:expr, $y:expr), $color:expr) => {
        let actual = $crate::pixel(&$pixmap, $x, $y);
        assert_eq!(
            actual, $color,
            "pixel ({}, {}) is {:?}, expected {:?}",
            $x, $y, actual, $color
        );
    };
}

pub(crate) use assert_pixel;
