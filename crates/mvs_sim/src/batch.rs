//! Independent simulations of many stimulus sets.
//!
//! Each job owns its simulator, so jobs share nothing and run on the rayon
//! pool. Results come back in job order.

use crate::error::SimError;
use crate::kernel::{CircuitSimulator, SimStats};
use crate::symbol_table::SymbolTable;
use crate::SimConfig;
use mvs_common::Value;
use mvs_parser::Module;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// One module plus the inputs to drive it with.
#[derive(Debug, Clone)]
pub struct SimJob {
    /// The module to simulate.
    pub module: Module,
    /// Input port values.
    pub inputs: BTreeMap<String, Value>,
}

/// Final state of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimOutcome {
    /// Every signal value at the fixed point.
    pub symbols: SymbolTable,
    /// Evaluation counters.
    pub stats: SimStats,
}

/// Runs one simulation from scratch.
pub fn simulate_once(
    module: Module,
    inputs: &BTreeMap<String, Value>,
    config: &SimConfig,
) -> Result<SimOutcome, SimError> {
    let mut sim = CircuitSimulator::with_config(module, *config);
    sim.set_inputs(inputs.iter().map(|(name, &value)| (name.as_str(), value)))?;
    let stats = sim.simulate()?;
    Ok(SimOutcome {
        symbols: sim.symbols().clone(),
        stats,
    })
}

/// Runs every job in parallel and returns one result per job, in order.
pub fn simulate_batch(jobs: &[SimJob], config: &SimConfig) -> Vec<Result<SimOutcome, SimError>> {
    jobs.par_iter()
        .map(|job| simulate_once(job.module.clone(), &job.inputs, config))
        .collect()
}
