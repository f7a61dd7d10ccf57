use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A height-field ceiling constrained to [0.0, 1000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct MaxHeight(f32);

impl MaxHeight {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1000.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for MaxHeight {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// Noise sampling extent across the whole grid, constrained to [0.01, 64.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct NoiseScale(f32);

impl NoiseScale {
    const MIN: f32 = 0.01;
    const MAX: f32 = 64.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for NoiseScale {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Octave amplitude falloff constrained to [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct Persistence(f32);

impl Persistence {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Persistence {
    fn default() -> Self {
        Self::new(0.7)
    }
}

/// Fraction of a layer's ceiling removed by capping, constrained to [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct CapFraction(f32);

impl CapFraction {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for CapFraction {
    fn default() -> Self {
        Self::new(0.4)
    }
}

/// Terrain cost multiplier for path scoring, constrained to [0.0, 100.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct CostWeight(f32);

impl CostWeight {
    const MIN: f32 = 0.0;
    const MAX: f32 = 100.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for CostWeight {
    fn default() -> Self {
        Self::new(5.0)
    }
}
