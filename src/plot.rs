//! The plot: plottables and axes composited onto a surface.
//!
//! [`Plot`] owns the observable collections of plottables and axes, lays the axes out
//! around the data area, scales the axes to the data and renders everything in order:
//! backgrounds, grid, plottables clipped to the data area, overlays, axes and legend.
//!
//! Any change made through the collections flags the plot for rendering,
//! so that a host UI only redraws when [`Plot::needs_render`] is set.
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::axis::{Axis, Edge};
use crate::collection::{AxisCollection, CollectionError, PlottableCollection};
use crate::dims::PlotDimensions;
use crate::drawing::Canvas;
use crate::interact::DragSession;
use crate::legend::Legend;
use crate::limits::AxisLimits;
use crate::plottable::{DataError, Plottable, ScatterPlot};
use crate::style::{Palette, defaults};
use crate::{ColorU8, color, geom, render, text};

/// Errors of plot operations
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid data given to the plot
    Data(DataError),
    /// Invalid collection operation
    Collection(CollectionError),
    /// A plottable of the collection has invalid data
    Plottable {
        /// Position of the plottable in the collection
        index: usize,
        /// What is wrong with it
        error: DataError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Data(err) => err.fmt(f),
            Error::Collection(err) => err.fmt(f),
            Error::Plottable { index, error } => write!(f, "plottable {}: {}", index, error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Data(err) => Some(err),
            Error::Collection(err) => Some(err),
            Error::Plottable { error, .. } => Some(error),
        }
    }
}

impl From<DataError> for Error {
    fn from(err: DataError) -> Self {
        Error::Data(err)
    }
}

impl From<CollectionError> for Error {
    fn from(err: CollectionError) -> Self {
        Error::Collection(err)
    }
}

/// A plot: plottables drawn over a data area framed by axes
#[derive(Debug)]
pub struct Plot {
    plottables: PlottableCollection,
    axes: AxisCollection,
    fonts: text::FontDb,
    needs_render: Rc<Cell<bool>>,
    figure_size: geom::Size,
    data_rect: geom::Rect,
    pub(crate) drag: Option<DragSession>,
    /// The legend
    pub legend: Legend,
    /// Color of the whole figure
    pub figure_background: ColorU8,
    /// Color of the data area
    pub data_background: ColorU8,
    /// Colors given to the plottables added through the plot
    pub palette: Palette,
    /// Space between the figure edges and the outermost axes
    pub margins: geom::Padding,
}

impl Default for Plot {
    fn default() -> Self {
        Plot::new(text::FontDb::new())
    }
}

impl Plot {
    /// An empty plot with the four default axes, shaping text with `fonts`
    pub fn new(fonts: text::FontDb) -> Self {
        let needs_render = Rc::new(Cell::new(true));

        let mut plottables = PlottableCollection::new();
        let flag = needs_render.clone();
        plottables.subscribe(move |_| flag.set(true));

        let mut axes = AxisCollection::new();
        let flag = needs_render.clone();
        axes.subscribe(move |_| flag.set(true));

        Plot {
            plottables,
            axes,
            fonts,
            needs_render,
            figure_size: geom::Size::new(0.0, 0.0),
            data_rect: geom::Rect::null(),
            drag: None,
            legend: Legend::new(),
            figure_background: color::WHITE,
            data_background: color::WHITE,
            palette: Palette::default(),
            margins: geom::Padding::Even(defaults::FIGURE_PADDING),
        }
    }

    /// The plottables, in render order
    pub fn plottables(&self) -> &PlottableCollection {
        &self.plottables
    }

    /// Mutable access to the plottables. Changes flag the plot for rendering.
    pub fn plottables_mut(&mut self) -> &mut PlottableCollection {
        &mut self.plottables
    }

    /// The axes
    pub fn axes(&self) -> &AxisCollection {
        &self.axes
    }

    /// Mutable access to the axes. Changes flag the plot for rendering.
    pub fn axes_mut(&mut self) -> &mut AxisCollection {
        &mut self.axes
    }

    /// The font database
    pub fn fonts(&self) -> &text::FontDb {
        &self.fonts
    }

    /// Size of the figure at the last layout
    pub fn figure_size(&self) -> geom::Size {
        self.figure_size
    }

    /// The data area at the last layout
    pub fn data_rect(&self) -> geom::Rect {
        self.data_rect
    }

    /// Whether something changed since the last render
    pub fn needs_render(&self) -> bool {
        self.needs_render.get()
    }

    /// Flag the plot for rendering
    pub fn request_render(&self) {
        self.needs_render.set(true);
    }

    /// Acknowledge the pending render request
    pub fn clear_render_request(&self) {
        self.needs_render.set(false);
    }

    /// Append a plottable, returning its index
    pub fn add<P: Plottable>(&mut self, plottable: P) -> usize {
        self.plottables.push(Box::new(plottable))
    }

    /// Append a boxed plottable, returning its index
    pub fn add_boxed(&mut self, plottable: Box<dyn Plottable>) -> usize {
        self.plottables.push(plottable)
    }

    /// Append a scatter plot colored with the next palette color
    pub fn add_scatter(&mut self, xs: Vec<f64>, ys: Vec<f64>) -> Result<usize, Error> {
        let scatter = ScatterPlot::new(xs, ys).with_color(self.next_color());
        scatter.validate(false)?;
        Ok(self.add(scatter))
    }

    /// Remove the plottable at `index`
    pub fn remove(&mut self, index: usize) -> Result<Box<dyn Plottable>, Error> {
        Ok(self.plottables.remove(index)?)
    }

    /// Move a plottable to another position in the render order
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), Error> {
        Ok(self.plottables.move_item(from, to)?)
    }

    /// Remove every plottable
    pub fn clear(&mut self) {
        self.plottables.clear();
    }

    /// The palette color for the next plottable
    pub fn next_color(&self) -> ColorU8 {
        self.palette.get(self.plottables.len())
    }

    /// Validate every plottable, reporting the first failure
    pub fn validate(&self, deep: bool) -> Result<(), Error> {
        for (index, p) in self.plottables.iter().enumerate() {
            p.validate(deep)
                .map_err(|error| Error::Plottable { index, error })?;
        }
        Ok(())
    }

    /// Index of the axis an `axis_index` designates, the primary axis when there is none
    fn resolve_index(&self, horizontal: bool, index: usize) -> usize {
        let exists = if horizontal {
            self.axes.horizontal(index).is_some()
        } else {
            self.axes.vertical(index).is_some()
        };
        if exists { index } else { 0 }
    }

    /// Data range of the visible plottables bound to the axis, NaN without data
    fn data_range(&self, horizontal: bool, index: usize) -> (f64, f64) {
        let mut limits = AxisLimits::NONE;
        for (i, p) in self.plottables.iter().enumerate() {
            if !p.is_visible() {
                continue;
            }
            let (xi, yi) = p.axis_index();
            let bound = if horizontal { xi } else { yi };
            if self.resolve_index(horizontal, bound) != index {
                continue;
            }
            if let Err(err) = p.validate(false) {
                log::debug!("plottable {} ignored by auto scaling: {}", i, err);
                continue;
            }
            match p.axis_limits() {
                Ok(l) => limits = limits.expand(&l),
                Err(err) => log::debug!("plottable {} has no limits: {}", i, err),
            }
        }
        if horizontal {
            (limits.x_min, limits.x_max)
        } else {
            (limits.y_min, limits.y_max)
        }
    }

    fn auto_scale(&mut self, h_margin: f64, v_margin: f64, only_unset: bool) {
        for pos in 0..self.axes.len() {
            let Some(axis) = self.axes.get(pos) else {
                continue;
            };
            if only_unset && axis.view.has_been_set() {
                continue;
            }
            let horizontal = axis.edge.is_horizontal();
            let margin = if horizontal { h_margin } else { v_margin };
            let (min, max) = self.data_range(horizontal, axis.index);
            let (min, max) = auto_range(min, max, margin);
            log::debug!(
                "auto scaling {:?} axis {} to [{}, {}]",
                axis.edge,
                axis.index,
                min,
                max
            );
            if let Some(axis) = self.axes.get_mut_quiet(pos) {
                axis.view.set(min, max);
            }
        }
        self.request_render();
    }

    /// Fit every axis to the data of the visible plottables bound to it.
    ///
    /// Margins are fractions of the data span, split evenly on both sides.
    pub fn axis_auto(&mut self, h_margin: f64, v_margin: f64) {
        self.auto_scale(h_margin, v_margin, false);
    }

    /// Fit the axes whose limits were never set, with the default margins
    pub fn axis_auto_if_unset(&mut self) {
        if self.axes.iter().all(|a| a.view.has_been_set()) {
            return;
        }
        self.auto_scale(
            defaults::AXIS_AUTO_MARGIN_H,
            defaults::AXIS_AUTO_MARGIN_V,
            true,
        );
    }

    /// Set the limits of the given axes. NaN slots leave the limit untouched,
    /// and an axis with both slots NaN stays eligible for automatic scaling.
    pub fn set_axis_limits(&mut self, x_index: usize, y_index: usize, limits: AxisLimits) {
        let x_pos = self.axes.position_or_primary(true, x_index);
        let y_pos = self.axes.position_or_primary(false, y_index);
        let has_x = !(limits.x_min.is_nan() && limits.x_max.is_nan());
        let has_y = !(limits.y_min.is_nan() && limits.y_max.is_nan());
        if let Some(axis) = self.axes.get_mut_quiet(x_pos).filter(|_| has_x) {
            let v = axis.view;
            axis.view.set(
                if limits.x_min.is_nan() { v.min } else { limits.x_min },
                if limits.x_max.is_nan() { v.max } else { limits.x_max },
            );
        }
        if let Some(axis) = self.axes.get_mut_quiet(y_pos).filter(|_| has_y) {
            let v = axis.view;
            axis.view.set(
                if limits.y_min.is_nan() { v.min } else { limits.y_min },
                if limits.y_max.is_nan() { v.max } else { limits.y_max },
            );
        }
        self.request_render();
    }

    /// Current limits of the given axes
    pub fn axis_limits(&self, x_index: usize, y_index: usize) -> AxisLimits {
        let view = |horizontal, index| {
            self.axes
                .get(self.axes.position_or_primary(horizontal, index))
                .map(|a| (a.view.min, a.view.max))
                .unwrap_or((f64::NAN, f64::NAN))
        };
        let (x_min, x_max) = view(true, x_index);
        let (y_min, y_max) = view(false, y_index);
        AxisLimits::new(x_min, x_max, y_min, y_max)
    }

    /// Measure the axes, stack those sharing an edge and derive the data area
    pub fn layout(&mut self, size: geom::Size) {
        // left, right, bottom, top
        let mut stacked = [0.0f32; 4];
        for axis in self.axes.iter_mut_quiet() {
            let thickness = axis.measure(&self.fonts);
            let slot = &mut stacked[edge_slot(axis.edge)];
            axis.pixel_offset = *slot;
            *slot += thickness;
        }
        let [left, right, bottom, top] = stacked;
        let m = &self.margins;
        self.figure_size = size;
        self.data_rect = geom::Rect::from_trbl(
            m.top() + top,
            size.width() - m.right() - right,
            size.height() - m.bottom() - bottom,
            m.left() + left,
        );
        log::debug!(
            "layout of {}x{} figure: data area {:?}",
            size.width(),
            size.height(),
            self.data_rect
        );
    }

    /// Dimensions mapping the given axes onto the data area of the last layout
    pub fn dimensions(&self, x_index: usize, y_index: usize) -> PlotDimensions {
        PlotDimensions::new(
            self.figure_size,
            self.data_rect,
            self.axis_limits(x_index, y_index),
        )
    }

    /// Dimensions mapping `axis` along its direction, paired with the primary axis
    fn axis_dimensions(&self, axis: &Axis) -> PlotDimensions {
        if axis.edge.is_horizontal() {
            self.dimensions(axis.index, 0)
        } else {
            self.dimensions(0, axis.index)
        }
    }

    /// Lay out, auto scale the unset axes and draw the whole plot on `surface`
    pub fn render(&mut self, surface: &mut dyn render::Surface, size: geom::Size) {
        self.layout(size);
        self.axis_auto_if_unset();
        self.legend.update_items(self.plottables.as_slice(), false);

        let valid: Vec<bool> = self
            .plottables
            .iter()
            .enumerate()
            .map(|(i, p)| match p.validate(false) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("plottable {} skipped: {}", i, err);
                    false
                }
            })
            .collect();

        surface.prepare(size);
        surface.fill(self.figure_background.into());

        let this = &*self;
        let mut canvas = Canvas::new(surface, &this.fonts);
        canvas.fill_rect(this.data_rect, this.data_background);

        for axis in this.axes.iter() {
            axis.render_grid(&mut canvas, &this.axis_dimensions(axis));
        }

        let drawn = || {
            this.plottables
                .iter()
                .zip(&valid)
                .filter(|(p, ok)| **ok && p.is_visible())
                .map(|(p, _)| {
                    let (x, y) = p.axis_index();
                    (p, this.dimensions(x, y))
                })
                .filter(|(_, dims)| dims.is_drawable())
        };
        canvas.clipped(&this.data_rect, |canvas| {
            for (p, dims) in drawn() {
                p.render(canvas, &dims);
            }
        });
        for (p, dims) in drawn() {
            p.render_overlay(&mut canvas, &dims);
        }

        for axis in this.axes.iter() {
            axis.render(&mut canvas, &this.axis_dimensions(axis));
        }
        this.legend.render(&mut canvas, &this.dimensions(0, 0));

        self.clear_render_request();
    }

    /// Shift every axis by a mouse move of `(dx, dy)` pixels
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let (w, h) = (self.data_rect.width() as f64, self.data_rect.height() as f64);
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        for axis in self.axes.iter_mut_quiet() {
            if !axis.view.is_real() {
                continue;
            }
            let span = axis.view.span();
            if axis.edge.is_horizontal() {
                axis.view.pan(-dx as f64 * span / w);
            } else {
                axis.view.pan(dy as f64 * span / h);
            }
        }
        self.request_render();
    }

    /// Zoom every axis around the pixel `center`. Fractions above 1 zoom in.
    pub fn zoom(&mut self, frac_x: f64, frac_y: f64, center: geom::Point) {
        let data = self.data_rect;
        for axis in self.axes.iter_mut_quiet() {
            if !axis.view.is_real() {
                continue;
            }
            let (frac, at) = if axis.edge.is_horizontal() {
                (frac_x, axis_coordinate(axis, &data, center.x))
            } else {
                (frac_y, axis_coordinate(axis, &data, center.y))
            };
            axis.view.zoom(frac, at);
        }
        self.request_render();
    }

    /// Zoom every axis onto a rectangle of the figure, in pixels
    pub fn zoom_rect(&mut self, rect: geom::Rect) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let data = self.data_rect;
        for axis in self.axes.iter_mut_quiet() {
            if !axis.view.is_real() {
                continue;
            }
            let (min, max) = if axis.edge.is_horizontal() {
                (
                    axis_coordinate(axis, &data, rect.left()),
                    axis_coordinate(axis, &data, rect.right()),
                )
            } else {
                (
                    axis_coordinate(axis, &data, rect.bottom()),
                    axis_coordinate(axis, &data, rect.top()),
                )
            };
            axis.view.set(min, max);
        }
        self.request_render();
    }
}

fn edge_slot(edge: Edge) -> usize {
    match edge {
        Edge::Left => 0,
        Edge::Right => 1,
        Edge::Bottom => 2,
        Edge::Top => 3,
    }
}

/// Coordinate of a pixel along the direction of `axis`
fn axis_coordinate(axis: &Axis, data: &geom::Rect, px: f32) -> f64 {
    let view = &axis.view;
    if axis.edge.is_horizontal() {
        view.min + (px - data.left()) as f64 / data.width() as f64 * view.span()
    } else {
        view.max - (px - data.top()) as f64 / data.height() as f64 * view.span()
    }
}

/// Limits fitting `[min, max]` with a margin fraction of the span.
///
/// Without data the range is `[-10, 10]`. A null span grows by 10 % of the value
/// on both sides, or by 1 around zero.
fn auto_range(min: f64, max: f64, margin: f64) -> (f64, f64) {
    if min.is_nan() || max.is_nan() {
        return (defaults::AXIS_NO_DATA_MIN, defaults::AXIS_NO_DATA_MAX);
    }
    if min == max {
        let d = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        return (min - d, max + d);
    }
    let d = (max - min) * margin / 2.0;
    (min - d, max + d)
}
