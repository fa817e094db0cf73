//! Conformance test helpers for the mvs simulator.
//!
//! Provides pipeline functions that take module source text through the
//! whole stack (lex → parse → simulate) and return structured results for
//! assertion in integration tests. Front-end and simulation failures become
//! diagnostics instead of early returns.

#![warn(missing_docs)]

use mvs_common::Value;
use mvs_config::{load_config, resolve_inputs, ConfigError, MvsConfig};
use mvs_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use mvs_parser::Module;
use mvs_sim::{CircuitSimulator, SimConfig, SimStats, SymbolTable};
use mvs_source::{FileId, SourceDb};
use std::path::Path;

/// Name under which in-memory sources are registered.
pub const INLINE_SOURCE_NAME: &str = "input.v";

/// Result of running the full pipeline.
pub struct PipelineResult {
    /// The source database, kept for rendering diagnostics.
    pub source_db: SourceDb,
    /// The parsed module, if the front end succeeded.
    pub module: Option<Module>,
    /// The stable symbol table, if simulation succeeded.
    pub symbols: Option<SymbolTable>,
    /// Simulation counters, if simulation succeeded.
    pub stats: Option<SimStats>,
    /// All diagnostics emitted during the pipeline.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl PipelineResult {
    /// Final value of `name`, if simulation succeeded and defined it.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.symbols.as_ref()?.lookup(name)
    }

    /// Renders every diagnostic without color.
    pub fn render(&self) -> String {
        TerminalRenderer::new(false).render_all(&self.diagnostics, &self.source_db)
    }
}

/// Runs the pipeline on in-memory source with explicit inputs.
pub fn run_pipeline(source: &str, inputs: &[(&str, Value)], config: &SimConfig) -> PipelineResult {
    let mut source_db = SourceDb::new();
    let file = source_db.add_source(INLINE_SOURCE_NAME, source.to_string());
    run_file(source_db, file, inputs.iter().copied(), config)
}

/// Runs the pipeline on in-memory source, taking settings and inputs from
/// a parsed `mvs.toml`.
pub fn run_with_config(source: &str, config: &MvsConfig) -> Result<PipelineResult, ConfigError> {
    let inputs = resolve_inputs(config)?;
    let sim_config = SimConfig::from(&config.simulation);
    let mut source_db = SourceDb::new();
    let file = source_db.add_source(INLINE_SOURCE_NAME, source.to_string());
    Ok(run_file(
        source_db,
        file,
        inputs.iter().map(|(name, &value)| (name.as_str(), value)),
        &sim_config,
    ))
}

/// Runs the pipeline on `dir/source_name`, reading `dir/mvs.toml` if present.
pub fn run_project(dir: &Path, source_name: &str) -> Result<PipelineResult, ConfigError> {
    let config = load_config(dir)?;
    let inputs = resolve_inputs(&config)?;
    let sim_config = SimConfig::from(&config.simulation);
    let mut source_db = SourceDb::new();
    let file = source_db.load_file(&dir.join(source_name))?;
    Ok(run_file(
        source_db,
        file,
        inputs.iter().map(|(name, &value)| (name.as_str(), value)),
        &sim_config,
    ))
}

fn run_file<'a>(
    source_db: SourceDb,
    file: FileId,
    inputs: impl IntoIterator<Item = (&'a str, Value)>,
    config: &SimConfig,
) -> PipelineResult {
    let sink = DiagnosticSink::new();
    let module = mvs_parser::parse_source(file, &source_db, &sink).ok();

    let mut symbols = None;
    let mut stats = None;
    if let Some(module) = &module {
        let mut sim = CircuitSimulator::with_config(module.clone(), *config);
        let outcome = sim.set_inputs(inputs).and_then(|()| sim.simulate());
        match outcome {
            Ok(run) => {
                stats = Some(run);
                symbols = Some(sim.symbols().clone());
            }
            Err(err) => sink.emit(err.to_diagnostic(module.span)),
        }
    }

    let has_errors = sink.has_errors();
    let error_count = sink.error_count();
    let warning_count = sink.warning_count();
    PipelineResult {
        source_db,
        module,
        symbols,
        stats,
        diagnostics: sink.take_all(),
        has_errors,
        error_count,
        warning_count,
    }
}

/// Runs the structural header check on in-memory source.
pub fn check_stub(source: &str) -> bool {
    let mut source_db = SourceDb::new();
    let file = source_db.add_source(INLINE_SOURCE_NAME, source.to_string());
    let sink = DiagnosticSink::new();
    mvs_parser::check_source_stub(file, &source_db, &sink)
}
