//! The fixed-point relaxation kernel.
//!
//! Every assignment starts pending. The kernel repeatedly takes one pending
//! assignment, evaluates its right-hand side, commits the result to the
//! target (full or sliced), and if the target changed schedules every
//! assignment that reads it. The run ends when nothing is pending.

use crate::deps::{find_combinational_cycle, DependencyGraph};
use crate::error::SimError;
use crate::evaluator::{checked_slice, evaluate};
use crate::symbol_table::SymbolTable;
use crate::SimConfig;
use mvs_common::bits::truncate;
use mvs_common::Value;
use mvs_config::Schedule;
use mvs_parser::{Assign, Direction, Module};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// Counters from one call to [`CircuitSimulator::simulate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    /// Right-hand sides evaluated.
    pub evaluations: u64,
    /// Evaluations that changed their target.
    pub updates: u64,
}

/// Pending assignments plus a membership flag per assignment so that an
/// assignment is never queued twice.
struct Worklist {
    queue: VecDeque<usize>,
    pending: Vec<bool>,
    schedule: Schedule,
}

impl Worklist {
    fn seeded(len: usize, schedule: Schedule) -> Self {
        Self {
            queue: (0..len).collect(),
            pending: vec![true; len],
            schedule,
        }
    }

    fn push(&mut self, idx: usize) {
        if !self.pending[idx] {
            self.pending[idx] = true;
            self.queue.push_back(idx);
        }
    }

    fn pop(&mut self) -> Option<usize> {
        let idx = match self.schedule {
            Schedule::Lifo => self.queue.pop_back(),
            Schedule::Fifo => self.queue.pop_front(),
        }?;
        self.pending[idx] = false;
        Some(idx)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Simulates one [`Module`] to a stable state.
pub struct CircuitSimulator {
    module: Module,
    config: SimConfig,
    widths: HashMap<String, u32>,
    graph: DependencyGraph,
    inputs: BTreeMap<String, Value>,
    symbols: SymbolTable,
}

impl CircuitSimulator {
    /// Creates a simulator with the default configuration.
    pub fn new(module: Module) -> Self {
        Self::with_config(module, SimConfig::default())
    }

    /// Creates a simulator with an explicit configuration.
    pub fn with_config(module: Module, config: SimConfig) -> Self {
        let mut widths = HashMap::new();
        for port in &module.ports {
            widths.insert(port.name.clone(), port.width);
        }
        for wire in &module.wires {
            widths.insert(wire.name.clone(), wire.width);
        }
        let graph = DependencyGraph::build(&module);
        Self {
            module,
            config,
            widths,
            graph,
            inputs: BTreeMap::new(),
            symbols: SymbolTable::new(),
        }
    }

    /// The simulated module.
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// The active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Signal name to reading assignments, built once from the module.
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Declared width of `name`, or the configured default width for names
    /// without a declaration.
    pub fn width(&self, name: &str) -> u32 {
        self.widths
            .get(name)
            .copied()
            .unwrap_or(self.config.default_width)
    }

    /// Sets an `input` or `inout` port. The value is truncated to the port
    /// width and takes effect at the next [`simulate`](Self::simulate).
    pub fn set_input(&mut self, name: &str, value: Value) -> Result<(), SimError> {
        let drivable = self
            .module
            .port(name)
            .is_some_and(|p| p.direction.is_drivable());
        if !drivable {
            return Err(SimError::UnknownInput {
                name: name.to_string(),
            });
        }
        let width = self.width(name);
        self.inputs.insert(name.to_string(), truncate(value, width));
        Ok(())
    }

    /// Sets several inputs, stopping at the first rejected name.
    pub fn set_inputs<'a>(
        &mut self,
        inputs: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<(), SimError> {
        inputs
            .into_iter()
            .try_for_each(|(name, value)| self.set_input(name, value))
    }

    /// The table produced by the last successful [`simulate`](Self::simulate);
    /// empty before the first one.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Value of `name` after the last successful run.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.symbols.lookup(name)
    }

    /// Relaxes the module to a fixed point.
    ///
    /// Starts from a fresh table: the inputs set so far, and zero for every
    /// other port and every wire. An input that was never set stays
    /// undefined and fails on first read. On error the previous table is
    /// kept unchanged.
    pub fn simulate(&mut self) -> Result<SimStats, SimError> {
        if self.config.cycle_check {
            if let Some(signals) = find_combinational_cycle(&self.module) {
                return Err(SimError::CombinationalCycle { signals });
            }
        }

        let mut symbols = self.initial_symbols();
        let mut worklist = Worklist::seeded(self.module.assigns.len(), self.config.schedule);
        let mut stats = SimStats::default();
        let limit = self.config.max_evaluations;

        while !worklist.is_empty() {
            if limit != 0 && stats.evaluations >= limit {
                return Err(self.limit_error(limit, &worklist));
            }
            let Some(idx) = worklist.pop() else {
                break;
            };
            let assign = &self.module.assigns[idx];
            stats.evaluations += 1;

            let value = evaluate(&assign.rhs, &symbols)?;
            let next = self.commit(assign, value, &symbols)?;
            if symbols.lookup(&assign.target) == Some(next) {
                continue;
            }
            symbols.set(assign.target.as_str(), next);
            stats.updates += 1;
            for &dep in self.graph.dependents(&assign.target) {
                worklist.push(dep);
            }
        }

        self.symbols = symbols;
        Ok(stats)
    }

    fn initial_symbols(&self) -> SymbolTable {
        let mut symbols = SymbolTable::new();
        for port in &self.module.ports {
            if port.direction != Direction::Input {
                symbols.set(port.name.as_str(), 0);
            }
        }
        for wire in &self.module.wires {
            symbols.set(wire.name.as_str(), 0);
        }
        for (name, &value) in &self.inputs {
            symbols.set(name.as_str(), value);
        }
        symbols
    }

    /// Computes the target's new full value.
    fn commit(
        &self,
        assign: &Assign,
        value: Value,
        symbols: &SymbolTable,
    ) -> Result<Value, SimError> {
        match assign.target_bits {
            Some(bits) => {
                let bits = checked_slice(&assign.target, bits)?;
                let current = symbols.lookup(&assign.target).unwrap_or(0);
                Ok(bits.insert(current, value))
            }
            None => Ok(truncate(value, self.width(&assign.target))),
        }
    }

    fn limit_error(&self, limit: u64, worklist: &Worklist) -> SimError {
        let pending: BTreeSet<&str> = worklist
            .queue
            .iter()
            .map(|&idx| self.module.assigns[idx].target.as_str())
            .collect();
        SimError::EvaluationLimit {
            limit,
            pending: pending.into_iter().map(str::to_string).collect(),
        }
    }
}
