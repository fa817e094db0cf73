//! Reading `mvs.toml` from disk or from a string.

use crate::error::ConfigError;
use crate::types::MvsConfig;
use mvs_common::WORD_BITS;
use std::path::Path;

/// File name looked up inside a project directory.
pub const CONFIG_FILE_NAME: &str = "mvs.toml";

/// Loads `<dir>/mvs.toml`.
///
/// A missing file yields the default configuration; any other I/O failure
/// is an error.
pub fn load_config(dir: &Path) -> Result<MvsConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    match std::fs::read_to_string(&path) {
        Ok(content) => load_config_from_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(MvsConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<MvsConfig, ConfigError> {
    let config: MvsConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &MvsConfig) -> Result<(), ConfigError> {
    let width = config.simulation.default_width;
    if width == 0 || width > WORD_BITS {
        return Err(ConfigError::ValidationError(format!(
            "simulation.default_width must be in 1..={WORD_BITS}, got {width}"
        )));
    }
    if let Some(name) = config.inputs.keys().find(|name| name.is_empty()) {
        return Err(ConfigError::ValidationError(format!(
            "input name must not be empty (got {name:?})"
        )));
    }
    Ok(())
}
