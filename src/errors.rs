use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    #[error("Config validation failed: {reason}")]
    ValidationFailed { reason: String },

    // Map-related errors
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Invalid map data: {reason}")]
    InvalidMapData { reason: String },

    #[error("Map file not found at path: {path}")]
    MapFileNotFound { path: PathBuf },

    #[error("Corrupted map file: {reason}")]
    CorruptedMapFile { reason: String },
}

/// Result type alias for all fallible operations
pub type TerrainResult<T> = Result<T, TerrainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_error_display() {
        let err = TerrainError::InvalidDimensions {
            width: 0,
            height: 64,
        };
        assert_eq!(err.to_string(), "Invalid grid dimensions 0x64");

        let err = TerrainError::ConfigDirNotFound;
        assert_eq!(err.to_string(), "Failed to get config directory");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TerrainError = io.into();
        assert!(matches!(err, TerrainError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }
}
