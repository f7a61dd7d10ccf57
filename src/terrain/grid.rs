//! Tile grid: heights, surface classes, costs, walkability and neighbour links.

use crate::map::MapObject;
use crate::terrain::constants::*;
use crate::terrain::coordinates::GridCoord;
use crate::terrain::tile::{SurfaceType, Tile};
use crate::terrain_generation::HeightSource;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Summary counts over a built grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridStats {
    pub width: u32,
    pub height: u32,
    pub walkable: usize,
    pub grass: usize,
    pub stone: usize,
    pub snow: usize,
    /// Number of distinct connected sets among walkable tiles
    pub sets: usize,
    /// Tile count of the largest connected set
    pub largest_set: usize,
}

/// Row-major array of tiles, `index = y * width + x`.
///
/// Every lookup goes through [`TileGrid::index_of`], so out-of-range
/// coordinates yield `None` instead of touching the array.
#[derive(Debug, Clone, Default)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Unallocated grid; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Allocate `width` x `height` tiles and read their heights.
    ///
    /// Heights the source cannot provide (or non-finite ones) become zero.
    /// A tile count over [`MAX_GRID_CELLS`] or a failed allocation produces
    /// an empty grid; the shape of the grid does not matter.
    pub fn build<S: HeightSource + ?Sized>(width: u32, height: u32, source: &S) -> Self {
        let total = match (width as usize).checked_mul(height as usize) {
            Some(total) if total <= MAX_GRID_CELLS => total,
            _ => {
                warn!("Grid {width}x{height} exceeds the {MAX_GRID_CELLS} tile limit");
                return Self::empty();
            }
        };
        let mut tiles = Vec::new();
        if let Err(e) = tiles.try_reserve_exact(total) {
            warn!("Failed to allocate {total} tiles: {e}");
            return Self::empty();
        }

        for y in 0..height {
            for x in 0..width {
                let elevation = source
                    .height_at(x, y)
                    .filter(|h| h.is_finite())
                    .unwrap_or(0.0);
                tiles.push(Tile::new(GridCoord::new(x as i32, y as i32), elevation));
            }
        }

        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Array index of a coordinate, `None` when out of bounds or unallocated
    pub fn index_of(&self, coord: GridCoord) -> Option<usize> {
        if !coord.is_within(self.width, self.height) {
            return None;
        }
        let index = coord.y as usize * self.width as usize + coord.x as usize;
        (index < self.tiles.len()).then_some(index)
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.tile(GridCoord::new(x, y))
    }

    pub fn tile(&self, coord: GridCoord) -> Option<&Tile> {
        self.index_of(coord).and_then(|index| self.tiles.get(index))
    }

    pub fn tile_at(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Set each tile's cost from the height variance against its in-bounds
    /// neighbours and derive walkability from it.
    pub fn classify_costs(&mut self) {
        let costs: Vec<f32> = self.tiles.iter().map(|tile| self.local_cost(tile)).collect();

        for (tile, cost) in self.tiles.iter_mut().zip(costs) {
            tile.cost = cost;
            tile.walkable = cost < WALKABLE_COST_LIMIT;
        }
    }

    fn local_cost(&self, tile: &Tile) -> f32 {
        let (sum, count) = tile
            .coord
            .neighbors()
            .into_iter()
            .filter_map(|coord| self.tile(coord))
            .fold((0.0f32, 0u32), |(sum, count), neighbor| {
                let diff = neighbor.height - tile.height;
                (sum + diff * diff, count + 1)
            });

        // Divisor is the real neighbour count; a 1x1 grid has none
        let variance = if count > 0 { sum / count as f32 } else { 0.0 };
        (variance + BASE_TILE_COST).min(MAX_TILE_COST)
    }

    /// Block every tile holding an object. Returns how many objects landed on the grid.
    pub fn apply_obstacles(&mut self, objects: &[MapObject]) -> usize {
        let mut applied = 0;
        for object in objects {
            let Some(index) = self.index_of(object.map_pos) else {
                debug!("Object {:?} at {} is outside the grid", object.kind, object.map_pos);
                continue;
            };
            if let Some(tile) = self.tiles.get_mut(index) {
                tile.walkable = false;
                tile.cost = OBSTACLE_COST;
                applied += 1;
            }
        }
        applied
    }

    /// Relink every tile: a walkable tile links each in-bounds walkable
    /// neighbour, a blocked tile keeps no links.
    pub fn build_neighbor_links(&mut self) {
        let links: Vec<[Option<usize>; 8]> = self
            .tiles
            .iter()
            .map(|tile| {
                let mut slots = [None; 8];
                if tile.walkable {
                    for (slot, coord) in slots.iter_mut().zip(tile.coord.neighbors()) {
                        *slot = self
                            .index_of(coord)
                            .filter(|&index| self.tiles.get(index).is_some_and(|n| n.walkable));
                    }
                }
                slots
            })
            .collect();

        for (tile, slots) in self.tiles.iter_mut().zip(links) {
            tile.neighbors = slots;
        }
    }

    pub(crate) fn set_set_id(&mut self, index: usize, set_id: usize) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.set_id = set_id;
        }
    }

    /// Cheap reachability check: both walkable and in the same connected set
    pub fn same_set(&self, a: GridCoord, b: GridCoord) -> bool {
        match (self.tile(a), self.tile(b)) {
            (Some(a), Some(b)) => a.walkable && b.walkable && a.set_id == b.set_id,
            _ => false,
        }
    }

    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats {
            width: self.width,
            height: self.height,
            ..Default::default()
        };
        let mut set_sizes: HashMap<usize, usize> = HashMap::new();

        for tile in &self.tiles {
            match tile.surface {
                SurfaceType::Grass => stats.grass += 1,
                SurfaceType::Stone => stats.stone += 1,
                SurfaceType::Snow => stats.snow += 1,
            }
            if tile.walkable {
                stats.walkable += 1;
                *set_sizes.entry(tile.set_id).or_insert(0) += 1;
            }
        }

        stats.sets = set_sizes.len();
        stats.largest_set = set_sizes.values().copied().max().unwrap_or(0);
        stats
    }
}
