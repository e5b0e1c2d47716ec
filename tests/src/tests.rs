use quickplot::plottable::AxisSpan;
use quickplot::{Plottable, color};

use crate::*;

mod interact;
mod legend;
mod plottables;

fn red_band(x1: f64, x2: f64) -> AxisSpan {
    AxisSpan::horizontal(x1, x2).with_color(color::RED)
}

#[test]
fn backgrounds() {
    let mut plot = bare_plot();
    plot.margins = geom::Padding::Even(10.0);
    plot.figure_background = color::GRAY;
    plot.data_background = color::WHITE;
    let pm = render(&mut plot);

    assert_pixel!(pm, (5, 5), color::GRAY);
    assert_pixel!(pm, (95, 50), color::GRAY);
    assert_pixel!(pm, (50, 50), color::WHITE);
    assert_pixel!(pm, (11, 88), color::WHITE);
}

#[test]
fn plottables_are_clipped_to_the_data_area() {
    let mut plot = bare_plot();
    plot.margins = geom::Padding::Even(10.0);
    plot.figure_background = color::GRAY;
    plot.add(red_band(-100.0, 5.0));
    let pm = render(&mut plot);

    // x = 5 is the middle of the 80 px data area starting at 10
    assert_pixel!(pm, (5, 50), color::GRAY);
    assert_pixel!(pm, (30, 50), color::RED);
    assert_pixel!(pm, (30, 5), color::GRAY);
    assert_pixel!(pm, (70, 50), color::WHITE);
}

#[test]
fn hidden_plottables_draw_nothing() {
    let mut plot = bare_plot();
    let before = render(&mut plot);
    let mut band = red_band(2.0, 8.0);
    band.is_visible = false;
    plot.add(band);
    let after = render(&mut plot);
    assert_eq!(diff_count(&after, &before), 0);
}

#[test]
fn invalid_plottables_are_skipped() {
    let mut plot = bare_plot();
    plot.add(red_band(2.0, 8.0));
    let expected = render(&mut plot);

    let empty = quickplot::plottable::SignalPlotXY::new(vec![], vec![]).unwrap();
    plot.add(empty);
    let unsorted = quickplot::plottable::SignalPlotXY::new(vec![9.0, 1.0, 5.0], vec![5.0; 3])
        .unwrap()
        .with_color(color::BLUE);
    plot.add(unsorted);
    let actual = render(&mut plot);
    assert_eq!(diff_count(&actual, &expected), 0);
}

#[test]
fn pan_back_and_forth() {
    let mut plot = bare_plot();
    plot.add(red_band(2.0, 4.0));
    let initial = render(&mut plot);

    plot.pan(10.0, 0.0);
    let panned = render(&mut plot);
    assert!(diff_count(&panned, &initial) > 0);
    // one data unit to the right
    assert_pixel!(panned, (45, 50), color::RED);
    assert_pixel!(panned, (25, 50), color::WHITE);

    plot.pan(-10.0, 0.0);
    let back = render(&mut plot);
    assert_eq!(diff_count(&back, &initial), 0);
}

#[test]
fn render_request_lifecycle() {
    let mut plot = bare_plot();
    assert!(plot.needs_render());
    render(&mut plot);
    assert!(!plot.needs_render());

    plot.add(red_band(2.0, 4.0));
    assert!(plot.needs_render());
    render(&mut plot);
    assert!(!plot.needs_render());

    if let Some(mut band) = plot.plottables_mut().get_mut(0) {
        band.set_visible(false);
    }
    assert!(plot.needs_render());
}

#[test]
fn unset_axes_are_scaled_on_render() {
    let mut plot = quickplot::Plot::default();
    plot.add(red_band(2.0, 4.0));
    plot.add(quickplot::plottable::MarkerPlot::new(3.0, 1.0));
    render(&mut plot);
    let limits = plot.axis_limits(0, 0);
    assert!(limits.is_real());
    assert!(limits.x_min < 2.0 && limits.x_max > 4.0);
}

#[test]
fn png_output() {
    let mut plot = bare_plot();
    plot.add(red_band(2.0, 4.0));
    let mut surface = quickplot_pxl::PxlSurface::new(SIZE, SIZE).unwrap();
    plot.render(&mut surface, geom::Size::new(SIZE as f32, SIZE as f32));
    let png = surface.encode_png().unwrap();
    assert_eq!(&png[..4], b"\x89PNG");

    let decoded = Pixmap::decode_png(&png).unwrap();
    assert_eq!(diff_count(&decoded, surface.pixmap()), 0);
}
