//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from storyteller.toml)
//! - ~/.config/storyteller/storyteller.toml
//! - ./storyteller.toml, or an explicit file
//! - `STORYTELLER__SECTION__KEY` environment variables

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyteller_core::StoryConfig;
use storyteller_error::{ConfigError, StorytellerError, StorytellerResult};
use storyteller_models::{GeminiConfig, SpeechConfig};
use storyteller_server::ServerConfig;
use storyteller_storage::StorageConfig;
use tracing::debug;

const DEFAULT_CONFIG: &str = include_str!("../../../storyteller.toml");

/// Everything the service needs to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct StorytellerConfig {
    /// Pipeline tuning
    story: StoryConfig,
    /// Story text and illustration model
    gemini: GeminiConfig,
    /// Narration
    speech: SpeechConfig,
    /// Where generated media is published
    storage: StorageConfig,
    /// HTTP listener
    server: ServerConfig,
}

impl StorytellerConfig {
    /// Load configuration from every layer.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// values fail validation.
    pub fn load() -> StorytellerResult<Self> {
        Self::load_with(None)
    }

    /// Load configuration, reading `explicit` in place of `./storyteller.toml`
    /// when given. Unlike the implicit files, an explicit file must exist.
    pub fn load_with(explicit: Option<&Path>) -> StorytellerResult<Self> {
        Self::from_layers(explicit, Environment::with_prefix("STORYTELLER"))
    }

    /// Load a single file over the built-in defaults, ignoring every other layer.
    pub fn from_file(path: impl AsRef<Path>) -> StorytellerResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path))
            .build()
            .map_err(|e| {
                StorytellerError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.display(),
                    e
                )))
            })?;
        Self::finish(config)
    }

    fn from_layers(explicit: Option<&Path>, environment: Environment) -> StorytellerResult<Self> {
        debug!("Loading configuration with precedence: environment > local > home > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyteller/storyteller.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match explicit {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("storyteller").required(false)),
        };

        let config = builder
            .add_source(
                environment
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                StorytellerError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?;
        Self::finish(config)
    }

    fn finish(config: Config) -> StorytellerResult<Self> {
        let loaded: Self = config.try_deserialize().map_err(|e| {
            StorytellerError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> StorytellerResult<()> {
        self.story.validate()?;
        if *self.server.max_topic_chars() == 0 {
            return Err(ConfigError::new("server.max_topic_chars must be at least 1").into());
        }
        Ok(())
    }

    /// Replace the storage backend.
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Replace the listener settings.
    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("STORYTELLER").source(Some(source))
    }

    #[test]
    fn test_bundled_defaults_match_code_defaults() {
        let bundled: StorytellerConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .and_then(Config::try_deserialize)
            .expect("bundled defaults parse");
        assert_eq!(bundled, StorytellerConfig::default());
    }

    #[test]
    fn test_environment_overrides() {
        let dir = std::env::temp_dir();
        let missing = dir.join("storyteller-no-such-dir").join("absent.toml");
        assert!(StorytellerConfig::from_layers(Some(&missing), env(&[])).is_err());

        let config = StorytellerConfig::from_layers(
            None,
            env(&[
                ("STORYTELLER__STORY__MAX_PAGES", "5"),
                ("STORYTELLER__STORY__DEFAULT_LANGUAGE", "en"),
                ("STORYTELLER__SERVER__PORT", "9090"),
                ("STORYTELLER__STORAGE__PATH", "/srv/story-media"),
            ]),
        )
        .expect("layers load");

        assert_eq!(*config.story().max_pages(), 5);
        assert_eq!(config.story().default_language(), "en");
        assert_eq!(*config.server().port(), 9090);
        assert_eq!(
            *config.storage(),
            StorageConfig::Filesystem {
                path: "/srv/story-media".into(),
                base_url: None,
            }
        );
    }

    #[test]
    fn test_invalid_environment_rejected() {
        let err = StorytellerConfig::from_layers(
            None,
            env(&[("STORYTELLER__STORY__ADVANCE_WAIT_MS", "120000")]),
        )
        .expect_err("wait longer than timeout");
        assert!(err.to_string().contains("advance_wait"));
    }
}
