use crate::geom;
use crate::style::MarkerShape;

const SQRT2: f32 = std::f32::consts::SQRT_2;

/// Path of a marker centered on the origin, None for `MarkerShape::None` or a null size
pub fn marker_path(shape: MarkerShape, size: f32) -> Option<geom::Path> {
    if size <= 0.0 || !size.is_finite() {
        return None;
    }
    let half = size / 2.0;
    let mut builder = geom::PathBuilder::new();
    match shape {
        MarkerShape::None => return None,
        MarkerShape::FilledCircle | MarkerShape::OpenCircle => {
            return geom::PathBuilder::from_circle(0.0, 0.0, half);
        }
        MarkerShape::FilledSquare | MarkerShape::OpenSquare => {
            builder.move_to(-half, -half);
            builder.line_to(half, -half);
            builder.line_to(half, half);
            builder.line_to(-half, half);
            builder.close();
        }
        MarkerShape::FilledDiamond | MarkerShape::OpenDiamond => {
            let half = size / SQRT2;
            builder.move_to(0.0, -half);
            builder.line_to(half, 0.0);
            builder.line_to(0.0, half);
            builder.line_to(-half, 0.0);
            builder.close();
        }
        MarkerShape::FilledTriangleUp | MarkerShape::OpenTriangleUp => {
            let half_h = size * SQRT2 / 2.0;
            builder.move_to(0.0, -half_h);
            builder.line_to(half, half_h);
            builder.line_to(-half, half_h);
            builder.close();
        }
        MarkerShape::FilledTriangleDown | MarkerShape::OpenTriangleDown => {
            let half_h = size * SQRT2 / 2.0;
            builder.move_to(0.0, half_h);
            builder.line_to(half, -half_h);
            builder.line_to(-half, -half_h);
            builder.close();
        }
        MarkerShape::Cross => {
            plus(&mut builder, half);
        }
        MarkerShape::Eks => {
            eks(&mut builder, half);
        }
        MarkerShape::Asterisk => {
            plus(&mut builder, half);
            eks(&mut builder, half / SQRT2 * 1.2);
        }
        MarkerShape::VerticalBar => {
            builder.move_to(0.0, -half);
            builder.line_to(0.0, half);
        }
    }
    builder.finish()
}

// open shapes are not closed
fn plus(builder: &mut geom::PathBuilder, half: f32) {
    builder.move_to(0.0, -half);
    builder.line_to(0.0, half);
    builder.move_to(-half, 0.0);
    builder.line_to(half, 0.0);
}

fn eks(builder: &mut geom::PathBuilder, half: f32) {
    builder.move_to(-half, -half);
    builder.line_to(half, half);
    builder.move_to(half, -half);
    builder.line_to(-half, half);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_visible_shape_has_a_path() {
        let shapes = [
            MarkerShape::FilledCircle,
            MarkerShape::OpenCircle,
            MarkerShape::FilledSquare,
            MarkerShape::OpenSquare,
            MarkerShape::FilledDiamond,
            MarkerShape::OpenDiamond,
            MarkerShape::FilledTriangleUp,
            MarkerShape::OpenTriangleUp,
            MarkerShape::FilledTriangleDown,
            MarkerShape::OpenTriangleDown,
            MarkerShape::Cross,
            MarkerShape::Eks,
            MarkerShape::Asterisk,
            MarkerShape::VerticalBar,
        ];
        for shape in shapes {
            assert!(marker_path(shape, 6.0).is_some(), "{shape:?}");
        }
        assert!(marker_path(MarkerShape::None, 6.0).is_none());
        assert!(marker_path(MarkerShape::FilledCircle, 0.0).is_none());
    }

    #[test]
    fn square_bounds() {
        let path = marker_path(MarkerShape::FilledSquare, 10.0).unwrap();
        let b = path.bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (-5.0, -5.0, 5.0, 5.0));
    }
}
