//! Seeded scattering of obstructing objects over a height field.

use crate::config::PlacementRule;
use crate::map::{MapObject, ObjectKind, ObjectTransform};
use crate::terrain::coordinates::GridCoord;
use crate::terrain_generation::HeightSource;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::collections::HashMap;
use tracing::info;

pub struct ObjectPlacer {
    rules: Vec<PlacementRule>,
    seed: u64,
}

impl ObjectPlacer {
    pub fn new(rules: Vec<PlacementRule>, seed: u64) -> Self {
        Self { rules, seed }
    }

    /// Visit every cell of a `width` x `height` grid in row-major order and
    /// place at most one object per cell.
    ///
    /// Rules are tried in order; the random accept draw only happens for a
    /// rule whose predicate holds, and a rejected draw falls through to the
    /// next rule.
    pub fn place<H, N>(&self, width: u32, height: u32, heights: &H, noise: &N) -> Vec<MapObject>
    where
        H: HeightSource + ?Sized,
        N: HeightSource + ?Sized,
    {
        let mut rng = Pcg64::seed_from_u64(self.seed);
        let mut objects = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let elevation = heights.height_at(x, y).unwrap_or(0.0);
                let noise_value = noise.height_at(x, y).unwrap_or(0.0);

                let accepted = self.rules.iter().find(|rule| {
                    rule.matches(elevation, noise_value) && Self::accept(&mut rng, rule.accept_one_in)
                });

                if let Some(rule) = accepted {
                    let map_pos = GridCoord::new(x as i32, y as i32);
                    let transform = Self::random_transform(&mut rng, map_pos.to_world(elevation));
                    objects.push(MapObject::new(rule.kind, map_pos, transform));
                }
            }
        }

        let mut type_counts: HashMap<ObjectKind, usize> = HashMap::new();
        for obj in &objects {
            *type_counts.entry(obj.kind).or_insert(0) += 1;
        }
        info!("Placed {} objects: {type_counts:?}", objects.len());

        objects
    }

    fn accept(rng: &mut Pcg64, one_in: u32) -> bool {
        one_in > 0 && rng.gen_range(0..one_in) == 0
    }

    /// Slight tilt, free yaw, and a non-uniform scale
    fn random_transform(rng: &mut Pcg64, position: Vec3) -> ObjectTransform {
        let rotation = Vec3::new(
            rng.r#gen::<f32>() * 0.13,
            rng.r#gen::<f32>() * 3.0,
            rng.r#gen::<f32>() * 0.13,
        );
        let scale_xz = rng.r#gen::<f32>() * 0.5 + 0.5;
        let scale_y = rng.r#gen::<f32>() + 0.5;

        ObjectTransform::new(position, rotation, Vec3::new(scale_xz, scale_y, scale_xz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain_generation::HeightMap;

    fn rule(kind: ObjectKind, min_height: f32, min_noise: f32, accept_one_in: u32) -> PlacementRule {
        PlacementRule {
            kind,
            min_height,
            max_height: None,
            min_noise,
            accept_one_in,
        }
    }

    #[test]
    fn test_placement_is_deterministic() {
        let heights = HeightMap::flat(20, 20, 0.0);
        let noise = HeightMap::flat(20, 20, 1.0);
        let placer = ObjectPlacer::new(vec![rule(ObjectKind::Tree, 0.0, 0.5, 3)], 99);

        let first = placer.place(20, 20, &heights, &noise);
        let second = placer.place(20, 20, &heights, &noise);
        assert_eq!(first, second);
        assert!(!first.is_empty());
        assert!(first.len() < 400);
    }

    #[test]
    fn test_predicates_gate_placement() {
        let heights = HeightMap::from_heights(2, 1, vec![0.0, 5.0]).unwrap();
        let noise = HeightMap::flat(2, 1, 1.0);
        let placer = ObjectPlacer::new(vec![rule(ObjectKind::Stone, 1.0, 0.5, 1)], 1);

        let objects = placer.place(2, 1, &heights, &noise);
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].kind, ObjectKind::Stone);
        assert_eq!(objects[0].map_pos, GridCoord::new(1, 0));
        assert_eq!(objects[0].transform.position, Vec3::new(1.0, 5.0, 0.0));
    }

    #[test]
    fn test_rejected_draw_falls_through() {
        let heights = HeightMap::flat(4, 4, 2.0);
        let noise = HeightMap::flat(4, 4, 1.0);
        // First rule never accepts, second always does
        let placer = ObjectPlacer::new(
            vec![
                rule(ObjectKind::Tree, 0.0, 0.0, 0),
                rule(ObjectKind::Stone, 0.0, 0.0, 1),
            ],
            5,
        );

        let objects = placer.place(4, 4, &heights, &noise);
        assert_eq!(objects.len(), 16);
        assert!(objects.iter().all(|o| o.kind == ObjectKind::Stone));
    }

    #[test]
    fn test_transform_ranges() {
        let heights = HeightMap::flat(10, 10, 0.0);
        let noise = HeightMap::flat(10, 10, 1.0);
        let placer = ObjectPlacer::new(vec![rule(ObjectKind::Tree, 0.0, 0.0, 1)], 3);

        for obj in placer.place(10, 10, &heights, &noise) {
            let t = obj.transform;
            assert!((0.0..0.13).contains(&t.rotation.x));
            assert!((0.0..3.0).contains(&t.rotation.y));
            assert!((0.5..1.0).contains(&t.scale.x));
            assert_eq!(t.scale.x, t.scale.z);
            assert!((0.5..1.5).contains(&t.scale.y));
        }
    }
}
