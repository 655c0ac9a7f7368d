//! Plain 2D geometry shared by the column planner and the connector router.

use serde::{Deserialize, Serialize};

/// A point in diagram coordinates. Y grows downward, as on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which side of a symbol a connector leaves from or arrives at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Left and right exits travel horizontally first.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// An axis-aligned open polyline, kept free of consecutive duplicate
/// vertices so degenerate routes collapse instead of stuttering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex, dropping it if it repeats the previous one.
    pub fn push(&mut self, point: Point) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut line = Self::new();
        for p in points {
            line.push(p);
        }
        line
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// SVG path data: `"M x y L x y ..."`. Empty string for an empty line.
    pub fn to_svg_path(&self) -> String {
        let mut path = String::new();
        for (i, p) in self.points.iter().enumerate() {
            if i == 0 {
                path.push_str(&format!("M {} {}", p.x, p.y));
            } else {
                path.push_str(&format!(" L {} {}", p.x, p.y));
            }
        }
        path
    }
}
