//! Terrain ownership and the build pipeline.
//!
//! A [`Terrain`] always holds a query-ready grid: heights and surface
//! classes, costs, obstacles, neighbour links and connected sets are all
//! derived before a new grid replaces the old one.

use crate::config::GenerationConfig;
use crate::errors::{TerrainError, TerrainResult};
use crate::map::{CellRecord, MapFile, MapObject};
use crate::pathfinding::{self, PathFinder, PathfindingConfig};
use crate::terrain_generation::{HeightMap, HeightSource, TerrainGenerator};
use glam::Vec3;
use std::path::Path;
use tracing::{debug, info};

pub mod constants;
pub mod coordinates;
pub mod grid;
pub mod object_placer;
pub mod tile;

use coordinates::GridCoord;
use grid::TileGrid;
use object_placer::ObjectPlacer;
use tile::Tile;

#[derive(Debug, Clone, Default)]
pub struct Terrain {
    grid: TileGrid,
    objects: Vec<MapObject>,
    pathfinding: PathfindingConfig,
}

impl Terrain {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Generate heights and objects from a config and build the grid
    pub fn generate(config: &GenerationConfig) -> Self {
        let generator = TerrainGenerator::new(config);
        let heights = generator.generate_heights();
        let noise = generator.generate_object_noise();

        let placer = ObjectPlacer::new(config.placement.clone(), generator.seeds.placement);
        let objects = placer.place(config.width, config.height, &heights, &noise);

        let mut terrain = Self::from_heights(&heights, config.width, config.height, objects);
        terrain.pathfinding = config.pathfinding_config();
        terrain
    }

    /// Build a query-ready terrain from any height source and a set of placed objects
    pub fn from_heights<S: HeightSource + ?Sized>(
        source: &S,
        width: u32,
        height: u32,
        objects: Vec<MapObject>,
    ) -> Self {
        let mut grid = TileGrid::build(width, height, source);
        if grid.is_empty() {
            debug!("Terrain {width}x{height} has no tiles");
        }

        grid.classify_costs();
        let blocked = grid.apply_obstacles(&objects);
        grid.build_neighbor_links();
        let passes = pathfinding::label_connected_sets(&mut grid);

        let stats = grid.stats();
        info!(
            "Built {}x{} terrain: {} walkable tiles in {} sets ({} labeling passes), {} of {} objects on the grid",
            stats.width,
            stats.height,
            stats.walkable,
            stats.sets,
            passes,
            blocked,
            objects.len()
        );

        Self {
            grid,
            objects,
            pathfinding: PathfindingConfig::default(),
        }
    }

    /// Replace this terrain with a freshly generated one
    pub fn regenerate(&mut self, config: &GenerationConfig) {
        *self = Self::generate(config);
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn pathfinding_config(&self) -> &PathfindingConfig {
        &self.pathfinding
    }

    pub fn set_pathfinding_config(&mut self, config: PathfindingConfig) {
        self.pathfinding = config;
    }

    pub fn tile(&self, coord: GridCoord) -> Option<&Tile> {
        self.grid.tile(coord)
    }

    /// Tile height for the given cell, `None` outside the grid
    pub fn height_at(&self, coord: GridCoord) -> Option<f32> {
        self.grid.tile(coord).map(Tile::height)
    }

    /// World position of a cell: `(x, height, -y)`; the origin for cells outside the grid
    pub fn world_pos(&self, coord: GridCoord) -> Vec3 {
        match self.grid.tile(coord) {
            Some(tile) => coord.to_world(tile.height()),
            None => Vec3::ZERO,
        }
    }

    pub fn find_path(&self, start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
        self.find_path_with(start, goal, self.pathfinding.clone())
    }

    pub fn find_path_with(
        &self,
        start: GridCoord,
        goal: GridCoord,
        config: PathfindingConfig,
    ) -> Vec<GridCoord> {
        PathFinder::with_config(&self.grid, config).find_path(start, goal)
    }

    /// Persisted fields only: dimensions, per-cell surface and height, objects
    pub fn to_map_file(&self) -> MapFile {
        MapFile {
            width: self.grid.width() as i32,
            height: self.grid.height() as i32,
            cells: self
                .grid
                .tiles()
                .map(|tile| CellRecord {
                    surface: tile.surface().as_i32(),
                    height: tile.height(),
                })
                .collect(),
            objects: self.objects.clone(),
            complete: true,
        }
    }

    /// Rebuild from file contents. Cells missing from a partial file get height zero;
    /// surface classes are derived from the heights again.
    pub fn from_map_file(map: MapFile) -> Self {
        let width = map.width.max(0) as u32;
        let height = map.height.max(0) as u32;

        let mut heights: Vec<f32> = map.cells.iter().map(|cell| cell.height).collect();
        heights.resize(map.cell_count(), 0.0);
        let source = match HeightMap::from_heights(width, height, heights) {
            Ok(source) => source,
            Err(e) => {
                debug!("Unusable map heights: {e}");
                HeightMap::new(0, 0, 0.0)
            }
        };

        Self::from_heights(&source, source.width(), source.height(), map.objects)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> TerrainResult<()> {
        let path = path.as_ref();
        self.to_map_file().save_to_file(path)?;
        info!(
            "Saved {}x{} terrain with {} objects to {}",
            self.width(),
            self.height(),
            self.objects.len(),
            path.display()
        );
        Ok(())
    }

    /// Load a terrain file. Missing files and I/O failures are errors;
    /// truncated contents produce a terrain built from what was read.
    pub fn load<P: AsRef<Path>>(path: P) -> TerrainResult<Self> {
        let path = path.as_ref();
        let map = MapFile::load_from_file(path)?;
        info!("Loaded terrain from {}", path.display());
        Ok(Self::from_map_file(map))
    }

    /// Like [`Terrain::load`], but a file that ends early is rejected
    pub fn load_strict<P: AsRef<Path>>(path: P) -> TerrainResult<Self> {
        let path = path.as_ref();
        let map = MapFile::load_from_file(path)?;
        if !map.complete {
            return Err(TerrainError::CorruptedMapFile {
                reason: format!(
                    "{} ended after {} of {} cells and {} objects",
                    path.display(),
                    map.cells.len(),
                    map.cell_count(),
                    map.objects.len()
                ),
            });
        }
        Ok(Self::from_map_file(map))
    }
}
