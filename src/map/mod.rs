use crate::terrain::coordinates::GridCoord;
use glam::Vec3;
use serde::{Deserialize, Serialize};

pub mod persistence;

pub use persistence::{CellRecord, MapFile};

/// Category of a placed object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Tree,
    Stone,
    /// Any other persisted type id, kept verbatim
    Other(i32),
}

impl ObjectKind {
    pub fn as_i32(self) -> i32 {
        match self {
            ObjectKind::Tree => 0,
            ObjectKind::Stone => 1,
            ObjectKind::Other(id) => id,
        }
    }

    pub fn from_i32(id: i32) -> Self {
        match id {
            0 => ObjectKind::Tree,
            1 => ObjectKind::Stone,
            other => ObjectKind::Other(other),
        }
    }
}

/// Render transform of a placed object. Opaque to the grid and path search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    pub position: Vec3,
    pub rotation: Vec3, // Euler angles in radians
    pub scale: Vec3,
}

impl ObjectTransform {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Transform with default rotation and scale
    pub fn simple(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO, Vec3::ONE)
    }
}

/// Decorative or obstructing object occupying one tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub kind: ObjectKind,
    pub map_pos: GridCoord,
    pub transform: ObjectTransform,
}

impl MapObject {
    pub fn new(kind: ObjectKind, map_pos: GridCoord, transform: ObjectTransform) -> Self {
        Self {
            kind,
            map_pos,
            transform,
        }
    }

    /// Object standing on ground level at its tile, untransformed
    pub fn at(kind: ObjectKind, map_pos: GridCoord) -> Self {
        Self::new(kind, map_pos, ObjectTransform::simple(map_pos.to_world(0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_kind_ids() {
        assert_eq!(ObjectKind::Tree.as_i32(), 0);
        assert_eq!(ObjectKind::Stone.as_i32(), 1);
        assert_eq!(ObjectKind::from_i32(1), ObjectKind::Stone);
        assert_eq!(ObjectKind::from_i32(7), ObjectKind::Other(7));
        assert_eq!(ObjectKind::from_i32(7).as_i32(), 7);
    }

    #[test]
    fn test_map_object_creation() {
        let obj = MapObject::at(ObjectKind::Tree, GridCoord::new(2, 3));
        assert_eq!(obj.kind, ObjectKind::Tree);
        assert_eq!(obj.map_pos, GridCoord::new(2, 3));
        assert_eq!(obj.transform.position, Vec3::new(2.0, 0.0, -3.0));
        assert_eq!(obj.transform.rotation, Vec3::ZERO);
        assert_eq!(obj.transform.scale, Vec3::ONE);
    }
}
