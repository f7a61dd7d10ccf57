use crate::terrain::constants::{DEFAULT_COST_WEIGHT, STEP_COST};
use crate::terrain::coordinates::GridCoord;
use crate::terrain::grid::TileGrid;
use tracing::{debug, warn};

pub mod connectivity;

pub use connectivity::label_connected_sets;

/// Configuration for path queries
#[derive(Debug, Clone, PartialEq)]
pub struct PathfindingConfig {
    /// Weight of the destination tile's cost in the evaluation score -
    /// higher values steer harder around rough terrain
    pub cost_weight: f32,
    /// Node-expansion budget; `None` searches until the open set is exhausted
    pub max_expansions: Option<usize>,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            cost_weight: DEFAULT_COST_WEIGHT,
            max_expansions: None,
        }
    }
}

/// Distance estimate to the goal (Euclidean)
pub fn heuristic(a: GridCoord, b: GridCoord) -> f32 {
    a.distance(b)
}

/// Per-tile search bookkeeping for one query
#[derive(Debug, Clone, Copy, PartialEq)]
struct SearchRecord {
    f: f32,
    g: f32,
    parent: Option<usize>,
    open: bool,
    closed: bool,
}

impl Default for SearchRecord {
    fn default() -> Self {
        Self {
            f: f32::INFINITY,
            g: f32::INFINITY,
            parent: None,
            open: false,
            closed: false,
        }
    }
}

/// Side table of search records indexed like the grid's tiles. Every query
/// owns a fresh one, so queries never share state.
struct SearchState {
    records: Vec<SearchRecord>,
}

impl SearchState {
    fn new(len: usize) -> Self {
        Self {
            records: vec![SearchRecord::default(); len],
        }
    }

    fn get(&self, index: usize) -> SearchRecord {
        self.records.get(index).copied().unwrap_or_default()
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut SearchRecord> {
        self.records.get_mut(index)
    }
}

/// A* search over a grid's walkable neighbour links.
///
/// The search borrows the grid immutably; any number of finders may query
/// the same stable grid at once.
pub struct PathFinder<'a> {
    grid: &'a TileGrid,
    config: PathfindingConfig,
}

impl<'a> PathFinder<'a> {
    pub fn new(grid: &'a TileGrid) -> Self {
        Self::with_config(grid, PathfindingConfig::default())
    }

    pub fn with_config(grid: &'a TileGrid, config: PathfindingConfig) -> Self {
        Self { grid, config }
    }

    /// Path from `start` to `goal`, excluding `start` and including `goal`.
    ///
    /// Returns an empty path when either end is out of bounds or not
    /// walkable, when `start == goal`, when the ends lie in different
    /// connected sets, or when the expansion budget runs out.
    pub fn find_path(&self, start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
        let grid = self.grid;
        let (Some(start_index), Some(goal_index)) = (grid.index_of(start), grid.index_of(goal))
        else {
            return Vec::new();
        };
        if start == goal {
            return Vec::new();
        }
        if !grid.same_set(start, goal) {
            debug!("No path: {start} and {goal} are not connected");
            return Vec::new();
        }

        match self.search(start, goal, start_index, goal_index) {
            Some(state) => self.reconstruct(&state, start_index, goal_index),
            None => Vec::new(),
        }
    }

    /// Run the search loop. Returns the search records once `goal` is
    /// selected, `None` when the open set or the budget runs out.
    fn search(
        &self,
        start: GridCoord,
        goal: GridCoord,
        start_index: usize,
        goal_index: usize,
    ) -> Option<SearchState> {
        let grid = self.grid;
        let mut state = SearchState::new(grid.len());
        let mut open: Vec<usize> = Vec::new();
        if let Some(record) = state.get_mut(start_index) {
            record.g = 0.0;
            record.f = heuristic(start, goal);
            record.open = true;
        }
        open.push(start_index);

        let mut expansions = 0usize;
        while !open.is_empty() {
            // Linear scan; the first tile with the lowest f wins ties
            let mut best_place = 0;
            for place in 1..open.len() {
                if state.get(open[place]).f < state.get(open[best_place]).f {
                    best_place = place;
                }
            }
            let best = open.remove(best_place);
            if let Some(record) = state.get_mut(best) {
                record.open = false;
            }

            if best == goal_index {
                return Some(state);
            }

            expansions += 1;
            if self.config.max_expansions.is_some_and(|budget| expansions > budget) {
                debug!("Search from {start} to {goal} hit its budget of {expansions} expansions");
                return None;
            }

            let Some(best_tile) = grid.tile_at(best) else {
                continue;
            };
            let best_g = state.get(best).g;

            for neighbor in best_tile.neighbor_indices() {
                let Some(neighbor_tile) = grid.tile_at(neighbor) else {
                    continue;
                };
                let step = heuristic(best_tile.coord(), neighbor_tile.coord());
                let new_g = best_g + STEP_COST;
                let new_f = new_g
                    + heuristic(neighbor_tile.coord(), goal)
                    + neighbor_tile.cost() * self.config.cost_weight * step;

                let Some(record) = state.get_mut(neighbor) else {
                    continue;
                };
                if record.open || record.closed {
                    // Closed tiles are updated in place but never reopened
                    if new_f < record.f {
                        record.g = new_g;
                        record.f = new_f;
                        record.parent = Some(best);
                    }
                } else {
                    record.g = new_g;
                    record.f = new_f;
                    record.parent = Some(best);
                    record.open = true;
                    open.push(neighbor);
                }
            }

            if let Some(record) = state.get_mut(best) {
                record.closed = true;
            }
        }

        None
    }

    fn reconstruct(&self, state: &SearchState, start: usize, goal: usize) -> Vec<GridCoord> {
        let mut path = Vec::new();
        let mut current = goal;

        while current != start {
            // Parent chains are acyclic for walkable costs; the bound guards odd weights
            if path.len() > self.grid.len() {
                warn!("Parent chain does not lead back to the start; dropping path");
                return Vec::new();
            }
            let Some(tile) = self.grid.tile_at(current) else {
                return Vec::new();
            };
            path.push(tile.coord());
            match state.get(current).parent {
                Some(parent) => current = parent,
                None => return Vec::new(),
            }
        }

        path.reverse();
        path
    }
}

/// Find a path with the default configuration
pub fn find_path(grid: &TileGrid, start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
    PathFinder::new(grid).find_path(start, goal)
}
