//! Turning `[inputs]` into signal values.

use crate::error::ConfigError;
use crate::types::{InputValue, MvsConfig};
use mvs_common::{parse_number_literal, Value};
use std::collections::BTreeMap;

/// Resolves every `[inputs]` entry to a [`Value`].
///
/// String entries are parsed with the same rules as source literals.
pub fn resolve_inputs(config: &MvsConfig) -> Result<BTreeMap<String, Value>, ConfigError> {
    config
        .inputs
        .iter()
        .map(|(name, input)| {
            let value = match input {
                InputValue::Int(v) => *v,
                InputValue::Literal(text) => parse_number_literal(text.trim())
                    .map_err(|source| ConfigError::InvalidInput {
                        name: name.clone(),
                        source,
                    })?
                    .value,
            };
            Ok((name.clone(), value))
        })
        .collect()
}
