use quickplot::plottable::{AxisLine, AxisSpan, BarPlot, MarkerPlot};
use quickplot::render::Hatch;
use quickplot::style::MarkerShape;
use quickplot::{Plottable, color};

use crate::*;

#[test]
fn bar_from_its_base() {
    let mut plot = bare_plot();
    let bar = BarPlot::new(vec![5.0], vec![5.0])
        .unwrap()
        .with_fill_color(color::BLUE);
    plot.add(bar);
    let pm = render(&mut plot);

    // 0.8 wide around x = 5, from y = 0 up to 5
    assert_pixel!(pm, (50, 75), color::BLUE);
    assert_pixel!(pm, (47, 95), color::BLUE);
    assert_pixel!(pm, (50, 25), color::WHITE);
    assert_pixel!(pm, (30, 75), color::WHITE);
}

#[test]
fn thick_axis_line() {
    let mut plot = bare_plot();
    let mut line = AxisLine::vertical(5.0).with_color(color::RED);
    line.line_width = 4.0;
    plot.add(line);
    let pm = render(&mut plot);

    for y in [5, 50, 95] {
        assert_pixel!(pm, (49, y), color::RED);
        assert_pixel!(pm, (50, y), color::RED);
    }
    assert_pixel!(pm, (45, 50), color::WHITE);
    assert_pixel!(pm, (54, 50), color::WHITE);
}

#[test]
fn marker_at_its_coordinates() {
    let mut plot = bare_plot();
    plot.add(
        MarkerPlot::new(2.0, 8.0)
            .with_color(color::GREEN)
            .with_shape(MarkerShape::FilledSquare),
    );
    let pm = render(&mut plot);

    assert_pixel!(pm, (20, 20), color::GREEN);
    assert_pixel!(pm, (17, 23), color::GREEN);
    assert_pixel!(pm, (30, 30), color::WHITE);
    assert_pixel!(pm, (80, 80), color::WHITE);
}

#[test]
fn secondary_axes_have_their_own_scale() {
    let mut plot = bare_plot();
    let mut marker = MarkerPlot::new(80.0, 80.0)
        .with_color(color::GREEN)
        .with_shape(MarkerShape::FilledSquare);
    marker.set_axis_index(1, 1);
    plot.add(marker);
    let pm = render(&mut plot);

    assert_pixel!(pm, (80, 20), color::GREEN);
    assert_pixel!(pm, (50, 50), color::WHITE);
}

#[test]
fn hatched_span() {
    let mut plot = bare_plot();
    let mut span = AxisSpan::vertical(2.0, 8.0).with_color(color::WHITE);
    span.hatch_color = color::BLACK;
    span.hatch_style = Hatch::LargeGrid;
    plot.add(span);
    let pm = render(&mut plot);

    // grid lines every 16 px
    assert_pixel!(pm, (32, 41), color::BLACK);
    assert_pixel!(pm, (41, 48), color::BLACK);
    assert_pixel!(pm, (33, 41), color::WHITE);

    let dark = (20..80)
        .flat_map(|y| (0..100).map(move |x| (x, y)))
        .filter(|&(x, y)| pixel(&pm, x, y) == color::BLACK)
        .count();
    assert!(dark > 0);
    assert!(dark < 60 * 100 / 4);
    // nothing outside of the span
    assert_pixel!(pm, (32, 10), color::WHITE);
}
