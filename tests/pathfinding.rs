use terranav::{
    GridCoord, HeightMap, MapObject, ObjectKind, PathfindingConfig, Terrain, find_path,
};

fn c(x: i32, y: i32) -> GridCoord {
    GridCoord::new(x, y)
}

fn flat(width: u32, height: u32, blocked: &[(i32, i32)]) -> Terrain {
    let objects = blocked
        .iter()
        .map(|&(x, y)| MapObject::at(ObjectKind::Stone, c(x, y)))
        .collect();
    Terrain::from_heights(&HeightMap::flat(width, height, 0.0), width, height, objects)
}

fn assert_steps(terrain: &Terrain, start: GridCoord, goal: GridCoord, path: &[GridCoord]) {
    assert_eq!(path.last(), Some(&goal));
    assert!(!path.contains(&start));
    let mut previous = start;
    for &step in path {
        assert!(previous.is_adjacent(step));
        assert!(terrain.tile(step).unwrap().is_walkable());
        previous = step;
    }
}

#[test]
fn flat_grid_takes_the_diagonal() {
    let terrain = flat(4, 4, &[]);
    assert_eq!(
        terrain.find_path(c(0, 0), c(3, 3)),
        vec![c(1, 1), c(2, 2), c(3, 3)]
    );
}

#[test]
fn blocked_tile_is_avoided() {
    let terrain = flat(4, 4, &[(1, 1)]);
    let path = terrain.find_path(c(0, 0), c(3, 3));
    assert!(!path.contains(&c(1, 1)));
    assert_steps(&terrain, c(0, 0), c(3, 3), &path);
}

#[test]
fn wall_separates_halves() {
    let terrain = flat(2, 5, &[(0, 2), (1, 2)]);
    assert!(terrain.find_path(c(0, 0), c(1, 4)).is_empty());
    assert!(terrain.find_path(c(1, 4), c(0, 0)).is_empty());

    let top = terrain.tile(c(0, 0)).unwrap().set_id();
    let bottom = terrain.tile(c(1, 4)).unwrap().set_id();
    assert_ne!(top, bottom);
    assert_eq!(terrain.grid().stats().sets, 2);
}

#[test]
fn wall_with_gap_is_crossed_through_the_gap() {
    let terrain = flat(7, 5, &[(0, 2), (1, 2), (2, 2), (4, 2), (5, 2), (6, 2)]);
    let path = terrain.find_path(c(0, 0), c(6, 4));
    assert!(path.contains(&c(3, 2)));
    assert_steps(&terrain, c(0, 0), c(6, 4), &path);
}

#[test]
fn no_path_conditions() {
    let terrain = flat(5, 5, &[(2, 2)]);
    assert!(terrain.find_path(c(1, 1), c(1, 1)).is_empty());
    assert!(terrain.find_path(c(2, 2), c(4, 4)).is_empty());
    assert!(terrain.find_path(c(0, 0), c(2, 2)).is_empty());
    assert!(terrain.find_path(c(0, 0), c(5, 0)).is_empty());
    assert!(terrain.find_path(c(0, -1), c(4, 4)).is_empty());
}

#[test]
fn raised_tile_is_routed_around_when_weighted() {
    // Flat floor with one raised tile on the diagonal; it stays walkable
    // but costs more than the one-step detour around it
    let mut heights = vec![0.0; 36];
    heights[4 * 6 + 4] = 0.5;
    let source = HeightMap::from_heights(6, 6, heights).unwrap();
    let terrain = Terrain::from_heights(&source, 6, 6, Vec::new());
    assert!(terrain.tile(c(4, 4)).unwrap().is_walkable());

    let unweighted = terrain.find_path_with(
        c(0, 0),
        c(5, 5),
        PathfindingConfig {
            cost_weight: 0.0,
            ..Default::default()
        },
    );
    let weighted = terrain.find_path(c(0, 0), c(5, 5));

    assert_steps(&terrain, c(0, 0), c(5, 5), &unweighted);
    assert_steps(&terrain, c(0, 0), c(5, 5), &weighted);
    assert_eq!(unweighted.len(), 5);
    assert!(unweighted.contains(&c(4, 4)));
    assert_eq!(weighted.len(), 6);
    assert!(!weighted.contains(&c(4, 4)));
}

#[test]
fn long_thin_strip_builds_and_paths() {
    let terrain = flat(4096, 1, &[]);
    assert_eq!(terrain.grid().len(), 4096);
    assert_eq!(terrain.grid().stats().sets, 1);

    let path = terrain.find_path(c(0, 0), c(3000, 0));
    assert_eq!(path.len(), 3000);
    assert_steps(&terrain, c(0, 0), c(3000, 0), &path);
}

#[test]
fn generated_terrain_paths_are_valid() {
    let terrain = Terrain::generate(&terranav::GenerationConfig {
        width: 64,
        height: 64,
        seed: 5150,
        ..Default::default()
    });
    let grid = terrain.grid();
    let walkable: Vec<GridCoord> = grid
        .tiles()
        .filter(|t| t.is_walkable())
        .map(|t| t.coord())
        .collect();
    assert!(!walkable.is_empty());

    for &start in walkable.iter().step_by(211) {
        // Farthest-listed tile sharing the start's set
        let Some(&goal) = walkable.iter().rev().find(|&&g| grid.same_set(start, g)) else {
            continue;
        };
        let path = find_path(grid, start, goal);
        if start == goal {
            assert!(path.is_empty());
        } else {
            assert_steps(&terrain, start, goal, &path);
        }
    }

    let other_set = walkable
        .iter()
        .copied()
        .find(|&g| !grid.same_set(walkable[0], g));
    if let Some(goal) = other_set {
        assert!(find_path(grid, walkable[0], goal).is_empty());
    }
}

#[test]
fn budget_exhaustion_yields_no_path() {
    let terrain = flat(20, 20, &[]);
    let config = PathfindingConfig {
        cost_weight: 5.0,
        max_expansions: Some(3),
    };
    assert!(terrain.find_path_with(c(0, 0), c(19, 19), config).is_empty());
    assert_eq!(terrain.find_path(c(0, 0), c(19, 19)).len(), 19);
}
