//! Mouse interaction: hit testing, dragging and panning.
//!
//! Pixels are figure pixels, as given to [`Plot::layout`]. A drag session starts with
//! [`Plot::mouse_down`]: it grabs the draggable plottable under the mouse, or pans the
//! axes when there is none.
use crate::dims::PlotDimensions;
use crate::geom;
use crate::plot::Plot;
use crate::plottable::Cursor;
use crate::style::defaults;

/// An object found under the mouse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The axis at this position of the axis collection
    Axis(usize),
    /// The plottable at this position of the plottable collection
    Plottable(usize),
}

/// The drag in progress between a mouse down and a mouse up
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DragSession {
    /// Moving a draggable plottable
    Plottable(usize),
    /// Panning the axes from the last mouse position
    Pan(geom::Point),
}

impl Plot {
    /// Visible plottables with the dimensions of their axes,
    /// those bound to the primary axes first
    fn hit_candidates(&self) -> Vec<(usize, PlotDimensions)> {
        let (primary, others): (Vec<_>, Vec<_>) = self
            .plottables()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_visible())
            .map(|(i, p)| (i, p.axis_index()))
            .partition(|(_, axes)| *axes == (0, 0));
        primary
            .into_iter()
            .chain(others)
            .map(|(i, (x, y))| (i, self.dimensions(x, y)))
            .filter(|(_, dims)| dims.is_drawable())
            .collect()
    }

    fn plottable_under_mouse(&mut self, px: f32, py: f32, draggable_only: bool) -> Option<usize> {
        let capture = defaults::MOUSE_CAPTURE_DISTANCE as f64;
        for (i, dims) in self.hit_candidates() {
            let x = dims.coordinate_x(px);
            let y = dims.coordinate_y(py);
            let snap_x = dims.units_per_px_x() * capture;
            let snap_y = dims.units_per_px_y() * capture;
            let Some(p) = self.plottables_mut().get_mut_quiet(i) else {
                continue;
            };
            if draggable_only && !p.as_draggable_mut().is_some_and(|d| d.drag_enabled()) {
                continue;
            }
            if p
                .as_selectable_mut()
                .is_some_and(|s| s.is_under_mouse(x, y, snap_x, snap_y))
            {
                return Some(i);
            }
        }
        None
    }

    /// The object under the pixel: axes take precedence over plottables.
    ///
    /// Plottables are tested within a capture distance of 5 pixels,
    /// those bound to the primary axes first.
    pub fn object_under_mouse(&mut self, px: f32, py: f32) -> Option<Selection> {
        let data = self.data_rect();
        if let Some(pos) = self
            .axes()
            .iter()
            .position(|a| a.is_under_mouse(px, py, &data))
        {
            return Some(Selection::Axis(pos));
        }
        self.plottable_under_mouse(px, py, false)
            .map(Selection::Plottable)
    }

    /// Index of the draggable plottable under the pixel, if dragging it is enabled
    pub fn draggable_under_mouse(&mut self, px: f32, py: f32) -> Option<usize> {
        self.plottable_under_mouse(px, py, true)
    }

    /// Whether a drag session is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn cursor_of(&mut self, index: usize) -> Cursor {
        self.plottables_mut()
            .get_mut_quiet(index)
            .and_then(|p| p.as_draggable_mut())
            .map_or(Cursor::Arrow, |d| d.drag_cursor())
    }

    /// Start a drag session: grab the draggable under the mouse, or start panning
    pub fn mouse_down(&mut self, px: f32, py: f32) -> Cursor {
        match self.draggable_under_mouse(px, py) {
            Some(index) => {
                log::debug!("dragging plottable {}", index);
                self.drag = Some(DragSession::Plottable(index));
                self.cursor_of(index)
            }
            None => {
                self.drag = Some(DragSession::Pan(geom::Point::from_xy(px, py)));
                Cursor::Hand
            }
        }
    }

    /// Follow the mouse. Returns the cursor to show.
    ///
    /// During a drag session, the grabbed plottable moves to the mouse in the units of its
    /// axes, keeping its extent with `fixed_size`. Otherwise the axes pan.
    /// Without session, the cursor of the draggable under the mouse is reported.
    pub fn mouse_move(&mut self, px: f32, py: f32, fixed_size: bool) -> Cursor {
        match self.drag {
            Some(DragSession::Plottable(index)) => {
                let Some((x_axis, y_axis)) = self.plottables().get(index).map(|p| p.axis_index())
                else {
                    self.drag = None;
                    return Cursor::Arrow;
                };
                let dims = self.dimensions(x_axis, y_axis);
                let (x, y) = (dims.coordinate_x(px), dims.coordinate_y(py));
                // notifies the change when the guard drops
                let Some(mut item) = self.plottables_mut().get_mut(index) else {
                    return Cursor::Arrow;
                };
                match item.as_draggable_mut() {
                    Some(d) => {
                        d.drag_to(x, y, fixed_size);
                        d.drag_cursor()
                    }
                    None => Cursor::Arrow,
                }
            }
            Some(DragSession::Pan(last)) => {
                self.pan(px - last.x, py - last.y);
                self.drag = Some(DragSession::Pan(geom::Point::from_xy(px, py)));
                Cursor::Hand
            }
            None => match self.draggable_under_mouse(px, py) {
                Some(index) => self.cursor_of(index),
                None => Cursor::Arrow,
            },
        }
    }

    /// End the drag session
    pub fn mouse_up(&mut self) {
        if let Some(DragSession::Plottable(index)) = self.drag.take() {
            log::debug!("released plottable {}", index);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::limits::AxisLimits;
    use crate::plottable::{
        AxisLine, AxisLineVector, Draggable, DraggableMarkerPlot, MarkerPlot, Plottable,
    };
    use crate::tests::{Near, assert_near};

    /// Axes hidden, data area of 100×100 px at the origin showing 0..10
    fn plot() -> Plot {
        let mut plot = Plot::default();
        plot.margins = geom::Padding::Even(0.0);
        for axis in plot.axes_mut().iter_mut_quiet() {
            axis.is_visible = false;
        }
        plot.layout(geom::Size::new(100.0, 100.0));
        plot.set_axis_limits(0, 0, AxisLimits::new(0.0, 10.0, 0.0, 10.0));
        plot.set_axis_limits(1, 1, AxisLimits::new(0.0, 100.0, 0.0, 100.0));
        plot
    }

    fn line_position(plot: &Plot, index: usize) -> f64 {
        plot.plottables()
            .by_type::<AxisLine>()
            .find(|(i, _)| *i == index)
            .map(|(_, l)| l.position)
            .unwrap()
    }

    #[test]
    fn axes_come_first() {
        let mut plot = Plot::default();
        plot.add(AxisLine::vertical(0.0));
        plot.layout(geom::Size::new(200.0, 150.0));
        plot.set_axis_limits(0, 0, AxisLimits::new(0.0, 10.0, 0.0, 10.0));
        let data = plot.data_rect();
        let band = plot.axes().get(0).unwrap().band(&data);
        assert!(band.width() > 0.0);
        assert_eq!(
            plot.object_under_mouse(band.center_x(), band.center_y()),
            Some(Selection::Axis(0))
        );
        // the line is at the left edge of the data area
        assert_eq!(
            plot.object_under_mouse(data.left() + 2.0, data.center_y()),
            Some(Selection::Plottable(0))
        );
    }

    #[test]
    fn capture_distance_in_pixels() {
        let mut plot = plot();
        plot.add(AxisLine::vertical(5.0));
        assert_eq!(plot.object_under_mouse(54.0, 10.0), Some(Selection::Plottable(0)));
        assert_eq!(plot.object_under_mouse(56.0, 10.0), None);
    }

    #[test]
    fn secondary_axes_use_their_own_units() {
        let mut plot = plot();
        let mut line = AxisLine::vertical(50.0);
        line.set_axis_index(1, 1);
        plot.add(line);
        // x = 50 on the top axis is 50 px, x = 5 on the bottom one too
        assert_eq!(plot.object_under_mouse(52.0, 10.0), Some(Selection::Plottable(0)));
        assert_eq!(plot.object_under_mouse(20.0, 10.0), None);
    }

    #[test]
    fn primary_axes_are_tested_first() {
        let mut plot = plot();
        let mut secondary = AxisLine::vertical(50.0);
        secondary.set_axis_index(1, 1);
        plot.add(secondary);
        plot.add(AxisLine::vertical(5.0));
        assert_eq!(plot.object_under_mouse(50.0, 10.0), Some(Selection::Plottable(1)));
    }

    #[test]
    fn only_enabled_draggables() {
        let mut plot = plot();
        plot.add(AxisLine::vertical(5.0));
        assert_eq!(plot.draggable_under_mouse(50.0, 50.0), None);
        plot.add(AxisLine::horizontal(5.0).with_drag_enabled(true));
        assert_eq!(plot.draggable_under_mouse(50.0, 50.0), Some(1));
        assert_eq!(plot.mouse_move(50.0, 50.0, false), Cursor::NS);
        assert_eq!(plot.mouse_move(10.0, 10.0, false), Cursor::Arrow);
    }

    #[test]
    fn drag_session_moves_the_plottable() {
        let mut plot = plot();
        plot.add(AxisLine::vertical(5.0).with_drag_enabled(true));
        let moves = Rc::new(RefCell::new(Vec::new()));
        let sink = moves.clone();
        plot.plottables_mut()
            .get_mut_quiet(0)
            .and_then(|p| p.as_draggable_mut())
            .unwrap()
            .on_dragged(Box::new(move |c| sink.borrow_mut().push(c.x)));

        assert_eq!(plot.mouse_down(50.0, 50.0), Cursor::WE);
        assert!(plot.is_dragging());
        plot.clear_render_request();
        assert_eq!(plot.mouse_move(72.0, 40.0, false), Cursor::WE);
        assert!(plot.needs_render());
        assert_near!(abs, line_position(&plot, 0), 7.2, 1e-6);
        assert_eq!(moves.borrow().len(), 1);
        plot.mouse_up();
        assert!(!plot.is_dragging());

        // limits stay untouched by a plottable drag
        assert_eq!(plot.axis_limits(0, 0), AxisLimits::new(0.0, 10.0, 0.0, 10.0));
    }

    #[test]
    fn offset_lines_are_grabbed_where_drawn() {
        let mut plot = plot();
        let mut lines = AxisLineVector::vertical(vec![5.0]).with_drag_enabled(true);
        lines.offset = 2;
        plot.add(lines);
        // drawn at x = 7
        assert_eq!(plot.draggable_under_mouse(50.0, 50.0), None);
        assert_eq!(plot.draggable_under_mouse(70.0, 50.0), Some(0));

        assert_eq!(plot.mouse_down(70.0, 50.0), Cursor::WE);
        plot.mouse_move(80.0, 50.0, false);
        plot.mouse_up();
        let (_, v) = plot.plottables().by_type::<AxisLineVector>().next().unwrap();
        assert_near!(abs, v.positions[0], 6.0, 1e-6);
        assert_eq!(plot.draggable_under_mouse(80.0, 50.0), Some(0));
    }

    #[test]
    fn drag_in_secondary_units() {
        let mut plot = plot();
        let mut marker = DraggableMarkerPlot::new(50.0, 50.0);
        marker.set_axis_index(1, 1);
        plot.add(marker);
        assert_eq!(plot.mouse_down(50.0, 50.0), Cursor::Hand);
        plot.mouse_move(30.0, 20.0, false);
        plot.mouse_up();
        let (_, m) = plot.plottables().by_type::<DraggableMarkerPlot>().next().unwrap();
        assert_near!(abs, m.marker.x, 30.0, 1e-6);
        assert_near!(abs, m.marker.y, 80.0, 1e-6);
    }

    #[test]
    fn empty_space_pans() {
        let mut plot = plot();
        plot.add(MarkerPlot::new(5.0, 5.0));
        // markers are not draggable
        assert_eq!(plot.mouse_down(50.0, 50.0), Cursor::Hand);
        plot.mouse_move(60.0, 50.0, false);
        plot.mouse_move(70.0, 30.0, false);
        plot.mouse_up();
        let l = plot.axis_limits(0, 0);
        assert_near!(abs, l.x_min, -2.0);
        assert_near!(abs, l.y_min, -2.0);
        assert!(!plot.is_dragging());
    }
}
