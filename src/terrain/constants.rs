/// Constants for terrain classification and path search

/// Surface thresholds: below the first is grass, below the second stone, else snow
pub const GRASS_HEIGHT_LIMIT: f32 = 0.3;
pub const STONE_HEIGHT_LIMIT: f32 = 7.0;

/// Tile cost bounds; cost = mean squared neighbour height difference + base
pub const BASE_TILE_COST: f32 = 0.1;
pub const MAX_TILE_COST: f32 = 1.0;
/// Tiles at or above this cost are not walkable
pub const WALKABLE_COST_LIMIT: f32 = 0.5;

/// Cost forced onto tiles holding an object
pub const OBSTACLE_COST: f32 = 1.0;

/// Path search step cost and default terrain-cost weight
pub const STEP_COST: f32 = 1.0;
pub const DEFAULT_COST_WEIGHT: f32 = 5.0;

/// Largest grid side a generation config or the CLI accepts
pub const MAX_GRID_DIMENSION: u32 = 2048;

/// Largest tile count a grid build or a map file may ask for
pub const MAX_GRID_CELLS: usize = 2048 * 2048;
