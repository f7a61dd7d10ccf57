use crate::terrain::constants::{GRASS_HEIGHT_LIMIT, STONE_HEIGHT_LIMIT};
use crate::terrain::coordinates::GridCoord;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Surface material, derived from elevation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum SurfaceType {
    #[default]
    Grass,
    Stone,
    Snow,
}

impl SurfaceType {
    pub const ALL: [SurfaceType; 3] = [SurfaceType::Grass, SurfaceType::Stone, SurfaceType::Snow];

    pub fn from_height(height: f32) -> Self {
        if height < GRASS_HEIGHT_LIMIT {
            SurfaceType::Grass
        } else if height < STONE_HEIGHT_LIMIT {
            SurfaceType::Stone
        } else {
            SurfaceType::Snow
        }
    }

    /// Persisted type id
    pub fn as_i32(self) -> i32 {
        match self {
            SurfaceType::Grass => 0,
            SurfaceType::Stone => 1,
            SurfaceType::Snow => 2,
        }
    }

    pub fn from_i32(id: i32) -> Option<Self> {
        match id {
            0 => Some(SurfaceType::Grass),
            1 => Some(SurfaceType::Stone),
            2 => Some(SurfaceType::Snow),
            _ => None,
        }
    }
}

/// Derived terrain state of one grid cell.
///
/// Tiles are only mutated through [`TileGrid`](crate::terrain::grid::TileGrid);
/// neighbour links are indices into the grid's tile array.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub(crate) coord: GridCoord,
    pub(crate) height: f32,
    pub(crate) surface: SurfaceType,
    pub(crate) cost: f32,
    pub(crate) walkable: bool,
    pub(crate) neighbors: [Option<usize>; 8],
    pub(crate) set_id: usize,
}

impl Tile {
    pub(crate) fn new(coord: GridCoord, height: f32) -> Self {
        Self {
            coord,
            height,
            surface: SurfaceType::from_height(height),
            cost: 0.0,
            walkable: false,
            neighbors: [None; 8],
            set_id: 0,
        }
    }

    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn surface(&self) -> SurfaceType {
        self.surface
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// Connected set id; only meaningful for walkable tiles
    pub fn set_id(&self) -> usize {
        self.set_id
    }

    /// Link slots, one per entry of `NEIGHBOR_OFFSETS`
    pub fn neighbor_slots(&self) -> &[Option<usize>; 8] {
        &self.neighbors
    }

    /// Indices of linked neighbours in slot order
    pub fn neighbor_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.iter().flatten().copied()
    }
}
