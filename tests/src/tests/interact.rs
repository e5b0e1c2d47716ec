use quickplot::plottable::{AxisLine, Cursor, MarkerPlot};
use quickplot::style::MarkerShape;
use quickplot::{Selection, color};

use crate::*;

#[test]
fn dragged_line_moves_on_screen() {
    let mut plot = bare_plot();
    let mut line = AxisLine::vertical(5.0)
        .with_color(color::RED)
        .with_drag_enabled(true);
    line.line_width = 4.0;
    plot.add(line);
    let before = render(&mut plot);
    assert_pixel!(before, (50, 50), color::RED);

    assert_eq!(plot.object_under_mouse(52.0, 30.0), Some(Selection::Plottable(0)));
    assert_eq!(plot.mouse_down(52.0, 30.0), Cursor::WE);
    plot.mouse_move(72.0, 60.0, false);
    plot.mouse_up();
    assert!(plot.needs_render());

    let after = render(&mut plot);
    assert_pixel!(after, (50, 50), color::WHITE);
    assert_pixel!(after, (72, 50), color::RED);
    assert_pixel!(after, (71, 10), color::RED);
}

#[test]
fn dragging_empty_space_pans() {
    let mut plot = bare_plot();
    plot.add(
        MarkerPlot::new(5.0, 5.0)
            .with_color(color::GREEN)
            .with_shape(MarkerShape::FilledSquare),
    );
    let before = render(&mut plot);
    assert_pixel!(before, (50, 50), color::GREEN);

    assert_eq!(plot.mouse_down(20.0, 20.0), Cursor::Hand);
    assert_eq!(plot.mouse_move(30.0, 20.0, false), Cursor::Hand);
    assert_eq!(plot.mouse_move(30.0, 10.0, false), Cursor::Hand);
    plot.mouse_up();

    // 10 px right and 10 px up
    let after = render(&mut plot);
    assert_pixel!(after, (60, 40), color::GREEN);
    assert_pixel!(after, (47, 50), color::WHITE);
    assert_pixel!(after, (60, 53), color::WHITE);
}

#[test]
fn zoom_keeps_the_center() {
    let mut plot = bare_plot();
    plot.add(
        MarkerPlot::new(5.0, 5.0)
            .with_color(color::GREEN)
            .with_shape(MarkerShape::FilledSquare),
    );
    plot.zoom_rect(geom::Rect::from_xywh(25.0, 25.0, 50.0, 50.0));
    let pm = render(&mut plot);

    // the marker keeps its pixel size
    assert_pixel!(pm, (50, 50), color::GREEN);
    assert_pixel!(pm, (53, 53), color::GREEN);
    assert_pixel!(pm, (57, 57), color::WHITE);
    let l = plot.axis_limits(0, 0);
    assert!((l.x_min - 2.5).abs() < 1e-9);
    assert!((l.y_max - 7.5).abs() < 1e-9);
}
