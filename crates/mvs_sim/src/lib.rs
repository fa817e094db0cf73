//! Fixed-point simulator for combinational module descriptions.
//!
//! This crate takes a parsed [`Module`](mvs_parser::Module) and repeatedly evaluates its
//! continuous assignments until no signal changes. Values are 64-bit words
//! truncated to the declared width of each signal.
//!
//! # Architecture
//!
//! The dependency graph (signal to reading assignments) is built once when a
//! [`CircuitSimulator`] is constructed. Each [`simulate`](CircuitSimulator::simulate)
//! call starts from a fresh symbol table, seeds a worklist with every
//! assignment, and re-queues the readers of each signal that changes. A
//! static loop check and an evaluation budget keep feedback from spinning
//! forever.
//!
//! # Usage
//!
//! ```ignore
//! use mvs_sim::CircuitSimulator;
//!
//! let mut sim = CircuitSimulator::new(module);
//! sim.set_input("a", 1)?;
//! sim.simulate()?;
//! println!("y = {:?}", sim.value("y"));
//! ```
//!
//! # Modules
//!
//! - `error`: simulation error types
//! - `symbol_table`: signal name to value map
//! - `evaluator`: expression evaluation
//! - `deps`: identifier finder, dependency graph, loop detection
//! - `kernel`: the worklist relaxation loop
//! - `batch`: independent runs in parallel

#![warn(missing_docs)]

pub mod batch;
pub mod deps;
pub mod error;
pub mod evaluator;
pub mod kernel;
pub mod symbol_table;

pub use batch::{simulate_batch, simulate_once, SimJob, SimOutcome};
pub use deps::{find_combinational_cycle, find_identifiers, DependencyGraph};
pub use error::SimError;
pub use evaluator::evaluate;
pub use kernel::{CircuitSimulator, SimStats};
pub use symbol_table::SymbolTable;

use mvs_common::DEFAULT_WIDTH;
use mvs_config::{Schedule, SimulationSettings};

/// Configuration for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Evaluation budget per run. `0` means unlimited.
    pub max_evaluations: u64,
    /// Reject combinational loops before relaxing.
    pub cycle_check: bool,
    /// Order in which pending assignments are taken.
    pub schedule: Schedule,
    /// Width of signals with no declaration.
    pub default_width: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_evaluations: SimulationSettings::DEFAULT_MAX_EVALUATIONS,
            cycle_check: true,
            schedule: Schedule::Lifo,
            default_width: DEFAULT_WIDTH,
        }
    }
}

impl From<&SimulationSettings> for SimConfig {
    fn from(settings: &SimulationSettings) -> Self {
        Self {
            max_evaluations: settings.max_evaluations,
            cycle_check: settings.cycle_check,
            schedule: settings.schedule,
            default_width: settings.default_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_settings_default() {
        let settings = SimulationSettings::default();
        assert_eq!(SimConfig::from(&settings), SimConfig::default());
    }

    #[test]
    fn config_from_settings() {
        let settings = SimulationSettings {
            max_evaluations: 7,
            cycle_check: false,
            schedule: Schedule::Fifo,
            default_width: 16,
        };
        let config = SimConfig::from(&settings);
        assert_eq!(config.max_evaluations, 7);
        assert!(!config.cycle_check);
        assert_eq!(config.schedule, Schedule::Fifo);
        assert_eq!(config.default_width, 16);
    }

    #[test]
    fn stats_serialize() {
        let stats = SimStats {
            evaluations: 3,
            updates: 2,
        };
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            r#"{"evaluations":3,"updates":2}"#
        );
    }
}
