//! Orthogonal connector routing between symbol ports.
//!
//! Routes are produced by a fixed decision table over the (exit side,
//! entry side) pair, not by a search. The table gives stable, predictable
//! pipes: the same ports always yield the same polyline, and no route
//! depends on what else is on the diagram.

use crate::geometry::{Point, Polyline, Side};

/// How far a route runs straight out of a port before its first turn.
pub const ELBOW_OFFSET: f64 = 40.0;

/// Minimum clearance between the two elbow stubs of an opposing-sides
/// route; below this the route falls back to a single midpoint channel.
pub const MIN_GAP: f64 = 20.0;

/// Route an axis-aligned connector from `source` (leaving via
/// `source_side`) to `target` (arriving via `target_side`).
///
/// - Opposing horizontal sides (right -> left or left -> right): leave both
///   ports by [`ELBOW_OFFSET`], join the stubs through the vertical
///   midline. When the stubs would overlap (gap under [`MIN_GAP`]), route
///   through a single vertical channel at the horizontal midpoint instead.
/// - Opposing vertical sides: the same shape transposed.
/// - Perpendicular sides: one L corner, first leg along the exit axis.
/// - Anything else (same-side pairs): a midpoint channel across the
///   dominant axis of the displacement.
///
/// Consecutive duplicate vertices collapse, so aligned ports yield straight
/// or three-point routes rather than degenerate zigzags.
pub fn route_orthogonal(
    source: Point,
    source_side: Side,
    target: Point,
    target_side: Side,
) -> Polyline {
    let mid_x = (source.x + target.x) / 2.0;
    let mid_y = (source.y + target.y) / 2.0;

    match (source_side, target_side) {
        (Side::Right, Side::Left) => {
            let x1 = source.x + ELBOW_OFFSET;
            let x2 = target.x - ELBOW_OFFSET;
            if x2 - x1 >= MIN_GAP {
                Polyline::from_points([
                    source,
                    Point::new(x1, source.y),
                    Point::new(x1, mid_y),
                    Point::new(x2, mid_y),
                    Point::new(x2, target.y),
                    target,
                ])
            } else {
                vertical_channel(source, target, mid_x)
            }
        }
        (Side::Left, Side::Right) => {
            let x1 = source.x - ELBOW_OFFSET;
            let x2 = target.x + ELBOW_OFFSET;
            if x1 - x2 >= MIN_GAP {
                Polyline::from_points([
                    source,
                    Point::new(x1, source.y),
                    Point::new(x1, mid_y),
                    Point::new(x2, mid_y),
                    Point::new(x2, target.y),
                    target,
                ])
            } else {
                vertical_channel(source, target, mid_x)
            }
        }
        (Side::Bottom, Side::Top) => {
            let y1 = source.y + ELBOW_OFFSET;
            let y2 = target.y - ELBOW_OFFSET;
            if y2 - y1 >= MIN_GAP {
                Polyline::from_points([
                    source,
                    Point::new(source.x, y1),
                    Point::new(mid_x, y1),
                    Point::new(mid_x, y2),
                    Point::new(target.x, y2),
                    target,
                ])
            } else {
                horizontal_channel(source, target, mid_y)
            }
        }
        (Side::Top, Side::Bottom) => {
            let y1 = source.y - ELBOW_OFFSET;
            let y2 = target.y + ELBOW_OFFSET;
            if y1 - y2 >= MIN_GAP {
                Polyline::from_points([
                    source,
                    Point::new(source.x, y1),
                    Point::new(mid_x, y1),
                    Point::new(mid_x, y2),
                    Point::new(target.x, y2),
                    target,
                ])
            } else {
                horizontal_channel(source, target, mid_y)
            }
        }
        (s, t) if s.is_horizontal() && !t.is_horizontal() => {
            // One corner: horizontal leg out of the source, vertical into
            // the target.
            Polyline::from_points([source, Point::new(target.x, source.y), target])
        }
        (s, t) if !s.is_horizontal() && t.is_horizontal() => {
            Polyline::from_points([source, Point::new(source.x, target.y), target])
        }
        _ => {
            // Same-side pairs: cut across the dominant displacement axis.
            let dx = target.x - source.x;
            let dy = target.y - source.y;
            if dx.abs() >= dy.abs() {
                vertical_channel(source, target, mid_x)
            } else {
                horizontal_channel(source, target, mid_y)
            }
        }
    }
}

/// The route as SVG path data, for direct embedding in a diagram.
pub fn route_orthogonal_path(
    source: Point,
    source_side: Side,
    target: Point,
    target_side: Side,
) -> String {
    route_orthogonal(source, source_side, target, target_side).to_svg_path()
}

fn vertical_channel(source: Point, target: Point, x: f64) -> Polyline {
    Polyline::from_points([
        source,
        Point::new(x, source.y),
        Point::new(x, target.y),
        target,
    ])
}

fn horizontal_channel(source: Point, target: Point, y: f64) -> Polyline {
    Polyline::from_points([
        source,
        Point::new(source.x, y),
        Point::new(target.x, y),
        target,
    ])
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthogonal(line: &Polyline) {
        for pair in line.points().windows(2) {
            let same_x = pair[0].x == pair[1].x;
            let same_y = pair[0].y == pair[1].y;
            assert!(
                same_x || same_y,
                "diagonal segment {:?} -> {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn opposing_sides_with_room_use_two_elbows() {
        let line = route_orthogonal(
            Point::new(0.0, 0.0),
            Side::Right,
            Point::new(200.0, 100.0),
            Side::Left,
        );
        assert_eq!(line.len(), 6);
        assert_orthogonal(&line);
        // First leg leaves the source horizontally by the elbow offset.
        assert_eq!(line.points()[1], Point::new(ELBOW_OFFSET, 0.0));
        // Last leg enters the target from its left.
        assert_eq!(line.points()[4], Point::new(200.0 - ELBOW_OFFSET, 100.0));
    }

    #[test]
    fn opposing_sides_too_close_fall_back_to_midpoint_channel() {
        // 60 apart: the two 40-unit stubs would cross.
        let line = route_orthogonal(
            Point::new(0.0, 0.0),
            Side::Right,
            Point::new(60.0, 100.0),
            Side::Left,
        );
        assert_eq!(line.len(), 4);
        assert_orthogonal(&line);
        assert_eq!(line.points()[1], Point::new(30.0, 0.0));
        assert_eq!(line.points()[2], Point::new(30.0, 100.0));
    }

    #[test]
    fn vertical_opposing_sides_transpose_the_shape() {
        let line = route_orthogonal(
            Point::new(0.0, 0.0),
            Side::Bottom,
            Point::new(100.0, 200.0),
            Side::Top,
        );
        assert_eq!(line.len(), 6);
        assert_orthogonal(&line);
        assert_eq!(line.points()[1], Point::new(0.0, ELBOW_OFFSET));
        assert_eq!(line.points()[4], Point::new(100.0, 200.0 - ELBOW_OFFSET));
    }

    #[test]
    fn perpendicular_sides_route_one_corner() {
        let line = route_orthogonal(
            Point::new(0.0, 0.0),
            Side::Right,
            Point::new(100.0, 80.0),
            Side::Top,
        );
        assert_eq!(line.points(), &[
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 80.0),
        ]);

        let line = route_orthogonal(
            Point::new(0.0, 0.0),
            Side::Bottom,
            Point::new(100.0, 80.0),
            Side::Left,
        );
        assert_eq!(line.points(), &[
            Point::new(0.0, 0.0),
            Point::new(0.0, 80.0),
            Point::new(100.0, 80.0),
        ]);
    }

    #[test]
    fn same_side_pairs_cut_the_dominant_axis() {
        // Mostly horizontal displacement: vertical channel at the midpoint.
        let line = route_orthogonal(
            Point::new(0.0, 0.0),
            Side::Right,
            Point::new(200.0, 50.0),
            Side::Right,
        );
        assert_eq!(line.len(), 4);
        assert_eq!(line.points()[1], Point::new(100.0, 0.0));

        // Mostly vertical displacement: horizontal channel.
        let line = route_orthogonal(
            Point::new(0.0, 0.0),
            Side::Top,
            Point::new(50.0, 200.0),
            Side::Top,
        );
        assert_orthogonal(&line);
        assert_eq!(line.points()[1], Point::new(0.0, 100.0));
    }

    #[test]
    fn aligned_opposing_ports_collapse_to_a_straight_line() {
        // Same y: the two-elbow shape degenerates, duplicates collapse.
        let line = route_orthogonal(
            Point::new(0.0, 50.0),
            Side::Right,
            Point::new(300.0, 50.0),
            Side::Left,
        );
        assert_orthogonal(&line);
        assert_eq!(line.points().first(), Some(&Point::new(0.0, 50.0)));
        assert_eq!(line.points().last(), Some(&Point::new(300.0, 50.0)));
        // Every vertex stays on the shared row.
        assert!(line.points().iter().all(|p| p.y == 50.0));
    }

    #[test]
    fn identical_ports_and_routes_are_deterministic() {
        let a = route_orthogonal(
            Point::new(3.0, 7.0),
            Side::Right,
            Point::new(90.0, 40.0),
            Side::Left,
        );
        let b = route_orthogonal(
            Point::new(3.0, 7.0),
            Side::Right,
            Point::new(90.0, 40.0),
            Side::Left,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn svg_path_starts_at_the_source() {
        let path = route_orthogonal_path(
            Point::new(0.0, 0.0),
            Side::Right,
            Point::new(200.0, 100.0),
            Side::Left,
        );
        assert!(path.starts_with("M 0 0 L "), "{path}");
    }
}
