//! Optional TOML configuration.
//!
//! ```toml
//! max_iterations = 512
//! log_level = "debug"
//! ```

use directories::ProjectDirs;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Evaluator pass budget
    pub max_iterations: Option<usize>,
    /// One of off, error, warn, info, debug, trace
    pub log_level: Option<String>,
}

impl Config {
    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.log_level.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

pub(crate) fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load the config file. Problems become warnings and fall back to defaults;
/// an explicitly requested file that is missing is also a warning.
pub fn load_config(config_file: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let Some(path) = config_file.map(Path::to_path_buf).or_else(default_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let config = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match parse_config(&content) {
                Ok(config) => Some(config),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    let config = config.unwrap_or_default();
    if config.log_level.is_some() && config.level_filter().is_none() {
        warnings.push(format!(
            "Unknown log_level in {}: {}",
            path.display(),
            config.log_level.as_deref().unwrap_or_default()
        ));
    }
    (config, warnings)
}

pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}
