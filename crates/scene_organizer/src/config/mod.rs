//! Configuration system
//!
//! Settings types implement [`Config`] to gain file loading and saving in
//! TOML or RON, so hosts can persist user-adjusted tolerances between
//! sessions instead of relying on ambient process-wide state.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::overlap::OverlapConfig;

    #[test]
    fn test_toml_roundtrip() {
        let dir = std::env::temp_dir().join("scene_organizer_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("overlap.toml");
        let path = path.to_str().unwrap();

        let config = OverlapConfig::default().with_origin_tolerance(0.25);
        config.save_to_file(path).unwrap();

        let loaded = OverlapConfig::load_from_file(path).unwrap();
        assert!((loaded.origin_tolerance - 0.25).abs() < f32::EPSILON);
        assert!((loaded.vertex_tolerance - config.vertex_tolerance).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(OverlapConfig::load_from_file("tolerances.yaml").is_err());
    }
}
