//! Generation settings and their on-disk TOML home.

pub mod range_types;

use crate::errors::{TerrainError, TerrainResult};
use crate::map::ObjectKind;
use crate::pathfinding::PathfindingConfig;
use range_types::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Parameters for one fractal noise height layer
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct NoiseLayer {
    pub max_height: MaxHeight,
    pub noise_size: NoiseScale,
    pub persistence: Persistence,
    pub octaves: u32,
}

impl NoiseLayer {
    pub fn new(max_height: f32, noise_size: f32, persistence: f32, octaves: u32) -> Self {
        Self {
            max_height: MaxHeight::new(max_height),
            noise_size: NoiseScale::new(noise_size),
            persistence: Persistence::new(persistence),
            octaves,
        }
    }
}

/// Height/noise predicate plus accept rate for one object category.
///
/// A cell qualifies when `min_height <= height <= max_height` (no upper
/// bound when `max_height` is absent) and `noise > min_noise`. A qualifying
/// cell is accepted with probability `1 / accept_one_in`; zero disables the
/// category.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlacementRule {
    pub kind: ObjectKind,
    pub min_height: f32,
    pub max_height: Option<f32>,
    pub min_noise: f32,
    pub accept_one_in: u32,
}

impl PlacementRule {
    pub fn matches(&self, height: f32, noise: f32) -> bool {
        height >= self.min_height
            && self.max_height.is_none_or(|max| height <= max)
            && noise > self.min_noise
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Validate)]
#[serde(default)]
// NOTE: scalar fields must stay ahead of the table fields for TOML output
pub struct GenerationConfig {
    #[validate(range(min = 1, max = 2048))]
    pub width: u32,
    #[validate(range(min = 1, max = 2048))]
    pub height: u32,
    pub seed: u64,
    pub detail_cap: CapFraction,
    pub cost_weight: CostWeight,
    pub max_expansions: Option<usize>,

    pub base_layer: NoiseLayer,
    pub detail_layer: NoiseLayer,
    pub object_layer: NoiseLayer,
    pub placement: Vec<PlacementRule>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            seed: 0,
            detail_cap: CapFraction::new(0.4),
            cost_weight: CostWeight::new(5.0),
            max_expansions: None,

            base_layer: NoiseLayer::new(10.0, 1.0, 0.7, 8),
            detail_layer: NoiseLayer::new(2.0, 2.5, 0.8, 3),
            object_layer: NoiseLayer::new(1.0, 5.5, 0.9, 7),
            placement: vec![
                // Trees only on the flattened lowlands
                PlacementRule {
                    kind: ObjectKind::Tree,
                    min_height: 0.0,
                    max_height: Some(0.0),
                    min_noise: 0.7,
                    accept_one_in: 6,
                },
                PlacementRule {
                    kind: ObjectKind::Stone,
                    min_height: 1.0,
                    max_height: None,
                    min_noise: 0.9,
                    accept_one_in: 20,
                },
            ],
        }
    }
}

impl GenerationConfig {
    /// Check dimension bounds, reporting every offending field
    pub fn validated(self) -> TerrainResult<Self> {
        self.validate().map_err(|validation_errors| {
            let reason = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");
            TerrainError::ValidationFailed { reason }
        })?;
        Ok(self)
    }

    pub fn pathfinding_config(&self) -> PathfindingConfig {
        PathfindingConfig {
            cost_weight: self.cost_weight.get(),
            max_expansions: self.max_expansions,
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().and_then(|mut path| {
        path.push("terranav");
        fs::create_dir_all(&path).ok()?;
        path.push("config.toml");
        Some(path)
    })
}

/// Load the user config, falling back to defaults when absent or unreadable
pub fn load_config() -> GenerationConfig {
    if let Some(config_path) = get_config_path() {
        match load_config_from(&config_path) {
            Ok(config) => return config,
            Err(e) if config_path.exists() => {
                tracing::warn!("Ignoring config at {}: {e}", config_path.display());
            }
            Err(_) => {}
        }
    }
    GenerationConfig::default()
}

pub fn load_config_from(path: &Path) -> TerrainResult<GenerationConfig> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str::<GenerationConfig>(&contents)?;
    config.validated()
}

pub fn save_config(config: &GenerationConfig) -> TerrainResult<PathBuf> {
    let config_path = get_config_path().ok_or(TerrainError::ConfigDirNotFound)?;
    save_config_to(&config_path, config)?;
    Ok(config_path)
}

pub fn save_config_to(path: &Path, config: &GenerationConfig) -> TerrainResult<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}
