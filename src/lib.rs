pub mod config;
pub mod errors;
pub mod map;
pub mod pathfinding;
pub mod terrain;
pub mod terrain_generation;

// Selective re-exports for external consumers

// Errors
pub use errors::{TerrainError, TerrainResult};

// Config - the mapgen binary loads and saves it
pub use config::{GenerationConfig, NoiseLayer, PlacementRule};

// Map - persisted objects and file contents
pub use map::{MapFile, MapObject, ObjectKind, ObjectTransform};

// Terrain - grid model and the owning pipeline
pub use terrain::Terrain;
pub use terrain::coordinates::GridCoord;
pub use terrain::grid::{GridStats, TileGrid};
pub use terrain::tile::{SurfaceType, Tile};

// Search
pub use pathfinding::{PathFinder, PathfindingConfig, find_path, label_connected_sets};

// Height fields
pub use terrain_generation::{HeightMap, HeightSource};
