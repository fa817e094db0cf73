//! Structured, non-fatal reporting for the front end and simulator.
//!
//! Components never print. They push [`Diagnostic`] values into a shared
//! [`DiagnosticSink`], and callers render them afterwards with a
//! [`DiagnosticRenderer`] such as [`TerminalRenderer`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
