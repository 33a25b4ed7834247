use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::labels::{LabelConfig, Locale};
use crate::scoring::{
    ActionWeights, AudienceNetwork, EstimatorConfig, TierThresholds, VerifiedBoostConfig,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Process-wide scoring configuration. Built once at startup and handed to
/// [`Scorer::new`](crate::scoring::Scorer::new) by reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ActionWeights,
    pub boost: VerifiedBoostConfig,
    pub estimator: EstimatorConfig,
    pub tiers: TierThresholds,
    pub labels: LabelConfig,
}

impl ScoringConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                ScoringConfig::default()
            }
            None => ScoringConfig::default(),
        };

        config.apply_env_overrides();
        config.warn_unknown_labels();
        Ok((config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn warn_unknown_labels(&self) {
        for key in self.labels.unknown_override_keys() {
            tracing::warn!(key, "label override does not name an action");
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(floor) = env::var("XSCORE_BASELINE_FLOOR") {
            match floor.trim().parse::<u64>() {
                Ok(value) => self.estimator.baseline_floor = value,
                Err(err) => tracing::warn!(value = %floor, %err, "ignoring XSCORE_BASELINE_FLOOR"),
            }
        }
        if let Ok(network) = env::var("XSCORE_ASSUMED_NETWORK") {
            match AudienceNetwork::from_str(&network) {
                Some(value) => self.boost.assumed_network = value,
                None => tracing::warn!(value = %network, "ignoring XSCORE_ASSUMED_NETWORK"),
            }
        }
        if let Ok(locale) = env::var("XSCORE_LOCALE") {
            match Locale::from_str(&locale) {
                Some(value) => self.labels.locale = value,
                None => tracing::warn!(value = %locale, "ignoring XSCORE_LOCALE"),
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("XSCORE_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/scoring.toml")))
}
