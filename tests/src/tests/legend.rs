use quickplot::plottable::{BarPlot, ScatterPlot};
use quickplot::style::Alignment;
use quickplot::text::FontDb;
use quickplot::{Legend, Plottable, color};

use crate::*;

fn bar(label: &str) -> BarPlot {
    BarPlot::new(vec![1.0], vec![9.0])
        .unwrap()
        .with_fill_color(color::BLUE)
        .with_label(label)
}

#[test]
fn legend_in_the_lower_right_corner() {
    let mut plot = bare_plot();
    plot.add(bar("b"));
    plot.legend.fill_color = color::YELLOW;
    let hidden = render(&mut plot);

    plot.legend.is_visible = true;
    let pm = render(&mut plot);
    assert!(diff_count(&pm, &hidden) > 0);
    assert_eq!(plot.legend.count(), 1);

    // box 5 px away from the data area corner, shadow 2 px below and right
    assert_pixel!(pm, (93, 93), color::YELLOW);
    let shadow = pixel(&pm, 96, 96);
    assert_eq!(shadow.alpha(), 255);
    assert!(shadow.red() < 255);
    assert_pixel!(pm, (98, 98), color::WHITE);
    // the bar is left untouched
    assert_pixel!(pm, (10, 50), color::BLUE);
}

#[test]
fn legend_follows_its_location() {
    let mut plot = bare_plot();
    plot.add(bar("b"));
    plot.legend.is_visible = true;
    plot.legend.fill_color = color::YELLOW;
    plot.legend.location = Alignment::UpperRight;
    let pm = render(&mut plot);

    assert_pixel!(pm, (93, 7), color::YELLOW);
    assert_pixel!(pm, (93, 93), color::WHITE);
}

#[test]
fn standalone_legend() {
    let fonts = FontDb::new();
    let plottables: Vec<Box<dyn Plottable>> = vec![Box::new(bar("bars"))];
    let mut legend = Legend::default();
    legend.update_items(&plottables, false);

    let size = legend.size(&fonts);
    let pm = quickplot_pxl::render_legend(&legend, &fonts).unwrap().unwrap();
    assert_eq!(pm.width(), (size.width() + legend.shadow_offset_x).ceil() as u32);
    assert_eq!(pm.height(), (size.height() + legend.shadow_offset_y).ceil() as u32);

    // rectangle symbol in the middle of the row
    let row_middle = (size.height() / 2.0) as u32;
    assert_pixel!(pm, (20, row_middle), color::BLUE);
    // box fill right of the symbol, where the label would be drawn
    assert_pixel!(pm, ((legend.symbol_width() + 2.0) as u32, row_middle), color::WHITE);
    // shadow below the box, over a transparent background
    let below = (size.height() + 1.0) as u32;
    assert_pixel!(pm, (20, below), legend.shadow_color);
}

#[test]
fn no_standalone_legend_without_items() {
    let fonts = FontDb::new();
    let plottables: Vec<Box<dyn Plottable>> = vec![Box::new(ScatterPlot::new(
        vec![1.0, 2.0],
        vec![1.0, 2.0],
    ))];
    let mut legend = Legend::default();
    legend.update_items(&plottables, true);
    assert!(quickplot_pxl::render_legend(&legend, &fonts).unwrap().is_none());
}
