//! Configuration system
//!
//! Config types are plain serde structs. The [`Config`] trait gives them
//! file loading and saving in TOML or RON, picked by file extension.

pub use serde::{Serialize, Deserialize};

mod collision;

pub use collision::CollisionConfig;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Parse configuration from a TOML document
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse configuration from a RON document
    fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            Self::from_toml_str(&contents)
        } else if path.ends_with(".ron") {
            Self::from_ron_str(&contents)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
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

    /// A value parsed fine but is not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let result = CollisionConfig::default().save_to_file("collision.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_save_and_load_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "arcade_core_collision_{}.toml",
            std::process::id()
        ));
        let path = path.to_string_lossy().into_owned();

        let mut config = CollisionConfig::default();
        config.cell_size = 64.0;
        config.save_to_file(&path).unwrap();

        let loaded = CollisionConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CollisionConfig::load_from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
