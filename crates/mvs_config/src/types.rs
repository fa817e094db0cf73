//! Types deserialized from `mvs.toml`.

use mvs_common::{Value, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole configuration file. Every section is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct MvsConfig {
    /// Simulator tuning.
    #[serde(default)]
    pub simulation: SimulationSettings,
    /// Input stimulus keyed by port name.
    #[serde(default)]
    pub inputs: BTreeMap<String, InputValue>,
}

/// The `[simulation]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    /// Upper bound on assignment evaluations per run; `0` disables the bound.
    pub max_evaluations: u64,
    /// Reject combinational cycles before relaxing.
    pub cycle_check: bool,
    /// Order in which pending assignments are taken from the worklist.
    pub schedule: Schedule,
    /// Width of identifiers that have no port or wire declaration.
    pub default_width: u32,
}

impl SimulationSettings {
    /// Evaluation budget used when the file does not set one.
    pub const DEFAULT_MAX_EVALUATIONS: u64 = 1_000_000;
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            max_evaluations: Self::DEFAULT_MAX_EVALUATIONS,
            cycle_check: true,
            schedule: Schedule::default(),
            default_width: DEFAULT_WIDTH,
        }
    }
}

/// Worklist discipline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    /// Most recently scheduled assignment first.
    #[default]
    Lifo,
    /// Assignments in the order they were scheduled.
    Fifo,
}

/// An `[inputs]` entry: either a TOML integer or a literal string such as
/// `"8'hFF"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum InputValue {
    /// `a = 5`
    Int(Value),
    /// `a = "4'b0101"`
    Literal(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    #[test]
    fn defaults() {
        let s = SimulationSettings::default();
        assert_eq!(s.max_evaluations, 1_000_000);
        assert!(s.cycle_check);
        assert_eq!(s.schedule, Schedule::Lifo);
        assert_eq!(s.default_width, 32);
    }

    #[test]
    fn schedule_variants() {
        for (text, expected) in [("lifo", Schedule::Lifo), ("fifo", Schedule::Fifo)] {
            let config =
                load_config_from_str(&format!("[simulation]\nschedule = \"{text}\"\n")).unwrap();
            assert_eq!(config.simulation.schedule, expected);
        }
    }

    #[test]
    fn input_value_shapes() {
        let config = load_config_from_str(
            r#"
[inputs]
a = 3
b = "4'b1010"
"#,
        )
        .unwrap();
        assert_eq!(config.inputs["a"], InputValue::Int(3));
        assert_eq!(config.inputs["b"], InputValue::Literal("4'b1010".into()));
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let config = load_config_from_str("[simulation]\ncycle_check = false\n").unwrap();
        assert!(!config.simulation.cycle_check);
        assert_eq!(config.simulation.max_evaluations, 1_000_000);
    }
}
