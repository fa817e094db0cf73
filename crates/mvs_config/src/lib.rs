//! Loading and validation of `mvs.toml` simulation settings.
//!
//! The file is optional. When present it tunes the simulator
//! ([`SimulationSettings`]) and may supply input stimulus (`[inputs]`), which
//! [`resolve_inputs`] turns into plain signal values.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::resolve_inputs;
pub use types::*;
