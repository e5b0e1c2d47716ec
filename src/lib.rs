#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
/*!
 * # quickplot
 * _interactive charts_. A 2D charting library written in Rust
 *
 * Quickplot composites "plottables" (scatter series, bars, pies, axis lines and spans,
 * annotations, vector fields...) onto a raster surface, framed by pan/zoom axes and a legend.
 * Plottables and axes live in observable collections, so that a GUI can react to every change
 * and re-render only when needed.
 *
 * ## Supported plottables
 *  - Scatter plots, with error bars, optionally draggable point by point
 *  - Bar plots, pie charts and coxcomb charts
 *  - Horizontal and vertical lines and spans, draggable
 *  - Markers, annotations, tooltips, crosshairs and scale bars
 *  - Polygons, function plots, vector fields and sorted XY signals
 *
 * ## Get started
 *
 * ```no_run
 * use quickplot::{Plot, geom, plottable};
 *
 * let xs: Vec<f64> = (0..100).map(|i| i as f64 / 10.0).collect();
 * let ys = xs.iter().map(|x| x.sin()).collect();
 *
 * let mut plot = Plot::new(quickplot::text::FontDb::system());
 * plot.add(
 *     plottable::ScatterPlot::new(xs, ys)
 *         .with_color(plot.next_color())
 *         .with_label("sin(x)"),
 * );
 * plot.add(plottable::AxisLine::horizontal(0.0).with_drag_enabled(true));
 * plot.legend.is_visible = true;
 *
 * // Any `render::Surface` will do. `quickplot-pxl` renders to PNG files.
 * # struct Sink;
 * # impl quickplot::render::Surface for Sink {
 * #     fn prepare(&mut self, _: geom::Size) {}
 * #     fn fill(&mut self, _: quickplot::render::Paint) {}
 * #     fn draw_path(&mut self, _: &quickplot::render::Path) {}
 * #     fn push_clip(&mut self, _: &quickplot::render::Clip) {}
 * #     fn pop_clip(&mut self) {}
 * # }
 * let mut surface = Sink;
 * plot.render(&mut surface, geom::Size::new(800.0, 600.0));
 * ```
 *
 * ## Crate features
 *
 *  - `utils`: enables data generation helpers such as `linspace` and `arange` (See `utils`)
 *
 * ## Notes about quickplot's design
 *
 * Plottables implement the [`Plottable`] trait: they report their data limits and legend items,
 * and draw themselves on a [`drawing::Canvas`] through a [`PlotDimensions`] mapping data
 * coordinates to pixels. Optional capabilities ([`plottable::Selectable`],
 * [`plottable::Draggable`], [`plottable::Highlightable`]) are discovered at runtime.
 *
 * The rendering surfaces implement the [`render::Surface`] trait and live in separate crates.
 * They only know about rectangles and paths: text is converted to paths before reaching them.
 *
 * [`Plot`] ties everything together: layout, automatic scaling, rendering and
 * mouse interaction (see [`interact`]).
 */
// Quickplot is released under the MIT License with the following copyright:
// Copyright (c) 2025-2026 Quickplot contributors

pub mod axis;
pub mod collection;
pub mod data;
pub mod dims;
pub mod drawing;
pub mod interact;
pub mod legend;
pub mod limits;
pub mod plot;
pub mod plottable;
pub mod render;
pub mod style;

pub use axis::{Axis, Edge};
pub use collection::{AxisCollection, Change, ObservableCollection, PlottableCollection};
pub use data::{Coordinate, Pixel};
pub use dims::PlotDimensions;
pub use interact::Selection;
pub use legend::Legend;
pub use limits::AxisLimits;
pub use plot::Plot;
pub use plottable::{DataError, LegendItem, Plottable};

/// Rexports of [`quickplot_base::color`] items
pub mod color {
    pub use quickplot_base::color::*;
}
pub use color::ColorU8;

/// Rexports of [`quickplot_base::geom`] items
pub mod geom {
    pub use quickplot_base::geom::*;
}

/// Rexports of [`quickplot_text`] items
pub mod text {
    pub use quickplot_text::*;
}

#[cfg(feature = "utils")]
pub mod utils {
    //! Utility functions for data generation

    /// Create a linearly spaced vector of `num` elements between `start` and `end`
    pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
        if num < 2 {
            return vec![start; num];
        }
        let step = (end - start) / (num as f64 - 1.0);
        (0..num).map(|i| start + i as f64 * step).collect()
    }

    /// Values from `start` up to `end` excluded, every `step`
    pub fn arange(start: f64, end: f64, step: f64) -> Vec<f64> {
        if !(step.is_finite() && step != 0.0) {
            return Vec::new();
        }
        let count = ((end - start) / step).ceil();
        if !(count.is_finite() && count > 0.0) {
            return Vec::new();
        }
        (0..count as usize).map(|i| start + i as f64 * step).collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn spaced_values() {
            assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
            assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
            assert_eq!(arange(0.0, 1.0, 0.25), vec![0.0, 0.25, 0.5, 0.75]);
            assert_eq!(arange(1.0, 0.0, -0.5), vec![1.0, 0.5]);
            assert!(arange(0.0, 1.0, -1.0).is_empty());
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    pub trait Near {
        fn near_abs(&self, other: &Self, tol: f64) -> bool;
        fn near_rel(&self, other: &Self, err: f64) -> bool;
    }

    impl Near for f64 {
        fn near_abs(&self, other: &Self, tol: f64) -> bool {
            (self - other).abs() <= tol
        }

        fn near_rel(&self, other: &Self, err: f64) -> bool {
            let diff = (self - other).abs();
            let largest = self.abs().max(other.abs());
            diff <= largest * err
        }
    }

    impl Near for f32 {
        fn near_abs(&self, other: &Self, tol: f64) -> bool {
            (self - other).abs() as f64 <= tol
        }

        fn near_rel(&self, other: &Self, err: f64) -> bool {
            let diff = (self - other).abs() as f64;
            let largest = self.abs().max(other.abs()) as f64;
            diff <= largest * err
        }
    }

    macro_rules! assert_near {
        (abs, $a:expr, $b:expr, $tol:expr) => {
            assert!($a.near_abs(&$b, $tol), "Assertion failed: Values are not close enough.\nValue 1: {:?}\nValue 2: {:?}\nTolerance: {}", $a, $b, $tol);
        };
        (abs, $a:expr, $b:expr) => {
            assert_near!(abs, $a, $b, 1e-8);
        };
        (rel, $a:expr, $b:expr, $err:expr) => {
            assert!($a.near_rel(&$b, $err), "Assertion failed: Values are not close enough.\nValue 1: {:?}\nValue 2: {:?}\nRelative error: {}", $a, $b, $err);
        };
        (rel, $a:expr, $b:expr) => {
            assert_near!(rel, $a, $b, 1e-8);
        };
    }

    pub(crate) use assert_near;

    #[test]
    fn test_close_to() {
        let a = 1.0;
        let b = 1.0 + 1e-9;
        assert_near!(abs, a, b);
        assert!(!a.near_abs(&b, 1e-10));
        assert_near!(rel, a, b);
        assert!(!a.near_rel(&b, 1e-10));
    }
}
