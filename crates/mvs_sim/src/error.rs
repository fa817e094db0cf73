//! Simulation error types.
//!
//! Every failure during evaluation or relaxation is a [`SimError`]. None is
//! recovered internally; `simulate` stops at the first one.

use mvs_diagnostics::code::{Category, DiagnosticCode};
use mvs_diagnostics::Diagnostic;
use mvs_source::Span;

/// Errors raised while preparing or running a simulation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A signal was read before anything defined it.
    #[error("undefined symbol '{name}'")]
    UndefinedSymbol {
        /// The signal name.
        name: String,
    },

    /// The right operand of `/` evaluated to zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A read or write slice reaches past the machine word.
    #[error("slice {name}[{msb}:{lsb}] is outside the 64-bit word")]
    SliceOutOfRange {
        /// The sliced signal.
        name: String,
        /// Most significant bit of the slice.
        msb: u32,
        /// Least significant bit of the slice.
        lsb: u32,
    },

    /// `set_input` named something that is not an `input` or `inout` port.
    #[error("'{name}' is not an input port")]
    UnknownInput {
        /// The rejected name.
        name: String,
    },

    /// The assignments form a combinational feedback loop.
    #[error("combinational cycle through {}", .signals.join(", "))]
    CombinationalCycle {
        /// Targets of the assignments on the loop, sorted.
        signals: Vec<String>,
    },

    /// Relaxation used up its evaluation budget without settling.
    #[error("no fixed point after {limit} evaluations (still pending: {})", .pending.join(", "))]
    EvaluationLimit {
        /// The configured budget.
        limit: u64,
        /// Targets of assignments still waiting to run, sorted.
        pending: Vec<String>,
    },
}

impl SimError {
    /// Stable diagnostic code for this error.
    pub fn code(&self) -> DiagnosticCode {
        let number = match self {
            SimError::UndefinedSymbol { .. } => 1,
            SimError::DivisionByZero => 2,
            SimError::SliceOutOfRange { .. } => 3,
            SimError::UnknownInput { .. } => 4,
            SimError::CombinationalCycle { .. } => 5,
            SimError::EvaluationLimit { .. } => 6,
        };
        DiagnosticCode::new(Category::Simulation, number)
    }

    /// Converts the error into a diagnostic at `span`.
    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string(), span);
        match self {
            SimError::UndefinedSymbol { .. } => {
                diag.with_help("set every input before simulating")
            }
            SimError::EvaluationLimit { .. } => diag
                .with_note("the assignments may oscillate")
                .with_help("raise simulation.max_evaluations or break the feedback path"),
            _ => diag,
        }
    }
}
