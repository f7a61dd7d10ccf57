use terranav::{GenerationConfig, TerrainResult};

/// Layers command-line overrides on top of a base generation config
pub struct ConfigBuilder {
    base: GenerationConfig,
    size: Option<(u32, u32)>,
    seed: Option<u64>,
    max_expansions: Option<usize>,
}

impl ConfigBuilder {
    pub fn new(base: GenerationConfig) -> Self {
        Self {
            base,
            size: None,
            seed: None,
            max_expansions: None,
        }
    }

    pub fn size(mut self, size: Option<(u32, u32)>) -> Self {
        self.size = size;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn max_expansions(mut self, max_expansions: Option<usize>) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    /// Apply overrides and validate; a missing seed falls back to a random one
    pub fn build(self) -> TerrainResult<GenerationConfig> {
        let mut config = self.base;
        if let Some((width, height)) = self.size {
            config.width = width;
            config.height = height;
        }
        config.seed = self.seed.unwrap_or_else(rand::random);
        if self.max_expansions.is_some() {
            config.max_expansions = self.max_expansions;
        }
        config.validated()
    }
}
