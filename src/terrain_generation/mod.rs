use crate::config::{GenerationConfig, NoiseLayer};
use crate::errors::{TerrainError, TerrainResult};
use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::ops::MulAssign;
use tracing::debug;

/// Anything that can report an elevation per grid cell
pub trait HeightSource {
    /// Height at `(x, y)`, `None` outside the source's extent
    fn height_at(&self, x: u32, y: u32) -> Option<f32>;
}

/// Row-major height field with a nominal ceiling
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    width: u32,
    height: u32,
    max_height: f32,
    heights: Vec<f32>,
}

impl HeightMap {
    /// All-zero field with the given ceiling
    pub fn new(width: u32, height: u32, max_height: f32) -> Self {
        Self {
            width,
            height,
            max_height,
            heights: vec![0.0; width as usize * height as usize],
        }
    }

    /// Create flat terrain for testing
    pub fn flat(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            max_height: value.max(0.0),
            heights: vec![value; width as usize * height as usize],
        }
    }

    pub fn from_heights(width: u32, height: u32, heights: Vec<f32>) -> TerrainResult<Self> {
        let expected_size = width as usize * height as usize;
        if heights.len() != expected_size {
            return Err(TerrainError::InvalidMapData {
                reason: format!(
                    "Heights array size {} does not match dimensions {}x{} (expected {})",
                    heights.len(),
                    width,
                    height,
                    expected_size
                ),
            });
        }

        let max_height = heights.iter().copied().fold(0.0f32, f32::max);
        Ok(Self {
            width,
            height,
            max_height,
            heights,
        })
    }

    /// Fresh field of the given size filled from a noise layer
    pub fn from_layer(width: u32, height: u32, layer: &NoiseLayer, seed: u32) -> Self {
        let mut map = Self::new(width, height, layer.max_height.get());
        map.generate(
            seed,
            layer.noise_size.get(),
            layer.persistence.get(),
            layer.octaves,
        );
        map
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Fill with fractal Perlin noise normalised to `[0, max_height]`.
    ///
    /// `noise_size` is how many noise units span the whole grid; octave `i`
    /// samples at frequency `2^i` with amplitude `persistence^i`.
    pub fn generate(&mut self, seed: u32, noise_size: f32, persistence: f32, octaves: u32) {
        let perlin = Perlin::new(seed);
        let noise_size = noise_size as f64;
        let persistence = persistence as f64;

        let mut index = 0;
        for y in 0..self.height {
            let world_y = y as f64 / self.height as f64 * noise_size;
            for x in 0..self.width {
                let world_x = x as f64 / self.width as f64 * noise_size;

                let mut noise_value = 0.0;
                let mut amplitude = 1.0;
                let mut frequency = 1.0;
                for _ in 0..octaves {
                    noise_value += perlin.get([world_x * frequency, world_y * frequency]) * amplitude;
                    amplitude *= persistence;
                    frequency *= 2.0;
                }

                self.heights[index] = noise_value as f32;
                index += 1;
            }
        }

        self.normalize();
        debug!(
            "Generated {}x{} height field (seed {seed}, {octaves} octaves)",
            self.width, self.height
        );
    }

    fn normalize(&mut self) {
        let (min, max) = self
            .heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            });
        let range = max - min;

        if !range.is_finite() || range <= f32::EPSILON {
            self.heights.fill(0.0);
            return;
        }
        for h in &mut self.heights {
            *h = (*h - min) / range * self.max_height;
        }
    }

    /// Scale every height by the other field's height relative to its ceiling.
    ///
    /// Cells the other field does not cover are left unchanged.
    pub fn combine_multiply(&mut self, other: &HeightMap) {
        let mut index = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let factor = match other.height_at(x, y) {
                    Some(h) if other.max_height > 0.0 => h / other.max_height,
                    Some(_) => 0.0,
                    None => 1.0,
                };
                self.heights[index] *= factor;
                index += 1;
            }
        }
    }

    /// Lower the field by `value`, flooring at zero. The ceiling drops with it.
    pub fn cap(&mut self, value: f32) {
        for h in &mut self.heights {
            *h = (*h - value).max(0.0);
        }
        self.max_height = (self.max_height - value).max(0.0);
    }
}

impl MulAssign<&HeightMap> for HeightMap {
    fn mul_assign(&mut self, rhs: &HeightMap) {
        self.combine_multiply(rhs);
    }
}

impl HeightSource for HeightMap {
    fn height_at(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.heights.get(index).copied()
    }
}

/// Per-stage seeds, all derived from one generation seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSeeds {
    pub base: u32,
    pub detail: u32,
    pub objects: u32,
    pub placement: u64,
}

impl LayerSeeds {
    pub fn derive(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        Self {
            base: rng.r#gen(),
            detail: rng.r#gen(),
            objects: rng.r#gen(),
            placement: rng.r#gen(),
        }
    }
}

/// Builds the terrain height field and the object noise field from a config
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    pub width: u32,
    pub height: u32,
    pub seeds: LayerSeeds,
    config: GenerationConfig,
}

impl TerrainGenerator {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            seeds: LayerSeeds::derive(config.seed),
            config: config.clone(),
        }
    }

    /// Base layer multiplied by the capped detail layer
    pub fn generate_heights(&self) -> HeightMap {
        let mut heights =
            HeightMap::from_layer(self.width, self.height, &self.config.base_layer, self.seeds.base);
        let mut detail = HeightMap::from_layer(
            self.width,
            self.height,
            &self.config.detail_layer,
            self.seeds.detail,
        );

        detail.cap(detail.max_height() * self.config.detail_cap.get());
        heights *= &detail;
        heights
    }

    /// Independent field consulted by object placement
    pub fn generate_object_noise(&self) -> HeightMap {
        HeightMap::from_layer(
            self.width,
            self.height,
            &self.config.object_layer,
            self.seeds.objects,
        )
    }
}
