use derive_more::Display;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Relative offsets of the eight neighbours, in link slot order:
/// the row above, left and right, then the row below.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Integer grid coordinates. Signed so that out-of-range queries stay representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[display("({x}, {y})")]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// All eight surrounding coordinates in slot order, bounds not checked
    pub fn neighbors(self) -> [GridCoord; 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }

    /// Euclidean distance (heuristic for A*)
    pub fn distance(self, other: GridCoord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// True for the eight surrounding cells, false for self and anything further
    pub fn is_adjacent(self, other: GridCoord) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }

    /// Check if these coordinates fall inside a `width` x `height` grid
    pub fn is_within(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as i64) < width as i64 && (self.y as i64) < height as i64
    }

    /// World position: X = grid x, Y = elevation, Z = -grid y
    pub fn to_world(self, height: f32) -> Vec3 {
        Vec3::new(self.x as f32, height, -(self.y as f32))
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_slot_order() {
        let n = GridCoord::new(5, 5).neighbors();
        assert_eq!(n[0], GridCoord::new(4, 4));
        assert_eq!(n[4], GridCoord::new(6, 5));
        assert_eq!(n[7], GridCoord::new(6, 6));
    }

    #[test]
    fn test_euclidean_distance() {
        let a = GridCoord::new(0, 0);
        let b = GridCoord::new(3, 4);
        assert!((a.distance(b) - 5.0).abs() < f32::EPSILON);
        assert!((b.distance(a) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_adjacency() {
        let c = GridCoord::new(2, 2);
        assert!(c.is_adjacent(GridCoord::new(3, 3)));
        assert!(c.is_adjacent(GridCoord::new(2, 1)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(GridCoord::new(4, 2)));
    }

    #[test]
    fn test_bounds() {
        assert!(GridCoord::new(0, 0).is_within(4, 4));
        assert!(GridCoord::new(3, 3).is_within(4, 4));
        assert!(!GridCoord::new(4, 0).is_within(4, 4));
        assert!(!GridCoord::new(-1, 0).is_within(4, 4));
        assert!(!GridCoord::new(0, 0).is_within(0, 0));
    }

    #[test]
    fn test_world_mapping() {
        assert_eq!(GridCoord::new(3, 7).to_world(2.5), Vec3::new(3.0, 2.5, -7.0));
        assert_eq!(format!("{}", GridCoord::new(1, -2)), "(1, -2)");
    }
}
