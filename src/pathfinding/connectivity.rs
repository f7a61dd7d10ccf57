//! Connected-set labelling of walkable tiles.

use crate::terrain::grid::TileGrid;
use tracing::debug;

/// Label every walkable tile with the id of its connected set.
///
/// Each tile starts with its own index as set id; passes over the grid let
/// every walkable tile adopt the smallest id among its linked neighbours
/// until a full pass changes nothing. Afterwards two walkable tiles are
/// mutually reachable iff their set ids are equal. Non-walkable tiles keep
/// their index, which no query reads.
///
/// Returns the number of passes, including the final unchanged one.
pub fn label_connected_sets(grid: &mut TileGrid) -> usize {
    for index in 0..grid.len() {
        grid.set_set_id(index, index);
    }

    let mut passes = 0;
    let mut changed = true;
    while changed {
        changed = false;
        passes += 1;

        for index in 0..grid.len() {
            let Some(tile) = grid.tile_at(index) else {
                continue;
            };
            if !tile.is_walkable() {
                continue;
            }

            let current = tile.set_id();
            let lowest = tile
                .neighbor_indices()
                .filter_map(|neighbor| grid.tile_at(neighbor))
                .filter(|neighbor| neighbor.is_walkable())
                .map(|neighbor| neighbor.set_id())
                .min();

            if let Some(lowest) = lowest.filter(|&lowest| lowest < current) {
                grid.set_set_id(index, lowest);
                changed = true;
            }
        }
    }

    debug!("Connected sets converged after {passes} passes");
    passes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapObject, ObjectKind};
    use crate::terrain::coordinates::GridCoord;
    use crate::terrain_generation::HeightMap;

    fn linked_flat_grid(width: u32, height: u32, blocked: &[(i32, i32)]) -> TileGrid {
        let source = HeightMap::flat(width, height, 0.0);
        let mut grid = TileGrid::build(width, height, &source);
        grid.classify_costs();
        let objects: Vec<MapObject> = blocked
            .iter()
            .map(|&(x, y)| MapObject::at(ObjectKind::Stone, GridCoord::new(x, y)))
            .collect();
        grid.apply_obstacles(&objects);
        grid.build_neighbor_links();
        grid
    }

    #[test]
    fn test_open_grid_is_one_set() {
        let mut grid = linked_flat_grid(5, 5, &[]);
        label_connected_sets(&mut grid);
        assert!(grid.tiles().all(|t| t.set_id() == 0));
        assert_eq!(grid.stats().sets, 1);
    }

    #[test]
    fn test_blocked_row_splits_sets() {
        let mut grid = linked_flat_grid(2, 5, &[(0, 2), (1, 2)]);
        label_connected_sets(&mut grid);

        let top = grid.get_tile(0, 0).unwrap().set_id();
        let bottom = grid.get_tile(0, 3).unwrap().set_id();
        assert_ne!(top, bottom);
        assert_eq!(grid.get_tile(1, 1).unwrap().set_id(), top);
        assert_eq!(grid.get_tile(1, 4).unwrap().set_id(), bottom);
        assert!(!grid.same_set(GridCoord::new(0, 0), GridCoord::new(1, 4)));
        assert_eq!(grid.stats().sets, 2);
    }

    #[test]
    fn test_diagonal_gap_stays_connected() {
        // Wall with a one-tile gap at (2, 2)
        let mut grid = linked_flat_grid(5, 5, &[(0, 2), (1, 2), (3, 2), (4, 2)]);
        label_connected_sets(&mut grid);
        assert!(grid.same_set(GridCoord::new(0, 0), GridCoord::new(4, 4)));
    }

    #[test]
    fn test_isolated_tile_keeps_own_set() {
        let mut grid = linked_flat_grid(3, 3, &[(1, 0), (0, 1), (1, 1)]);
        label_connected_sets(&mut grid);
        let corner = grid.get_tile(0, 0).unwrap();
        assert!(corner.is_walkable());
        assert_eq!(corner.set_id(), 0);
        assert!(!grid.same_set(GridCoord::new(0, 0), GridCoord::new(2, 2)));
    }

    #[test]
    fn test_propagation_needs_multiple_passes() {
        // A snake corridor forces ids to travel against scan order
        let mut grid = linked_flat_grid(3, 5, &[(1, 1), (2, 1), (0, 3), (1, 3)]);
        let passes = label_connected_sets(&mut grid);
        assert!(passes >= 2);
        assert!(grid.same_set(GridCoord::new(0, 0), GridCoord::new(2, 4)));
    }

    #[test]
    fn test_empty_grid() {
        let mut grid = TileGrid::empty();
        assert_eq!(label_connected_sets(&mut grid), 1);
    }
}
