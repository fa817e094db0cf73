//! Text rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::label::{Label, LabelStyle};
use crate::severity::Severity;
use mvs_source::SourceDb;
use std::fmt::Write;

/// Turns a diagnostic into display text.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic, resolving spans against `source_db`.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;

    /// Renders several diagnostics separated by blank lines.
    fn render_all(&self, diags: &[Diagnostic], source_db: &SourceDb) -> String {
        diags
            .iter()
            .map(|d| self.render(d, source_db))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// rustc-style output:
///
/// ```text
/// error[E101]: expected ';', found 'endmodule'
///   --> top.v:3:1
///    |
///  3 | endmodule
///    | ^^^^^^^^^
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalRenderer {
    /// Emit ANSI colors for the header.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let tag = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return format!("{tag}: {}", diag.message);
        }
        let color = match diag.severity {
            Severity::Error => "\x1b[1;31m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Note => "\x1b[1;36m",
        };
        format!("{color}{tag}\x1b[0m\x1b[1m: {}\x1b[0m", diag.message)
    }

    fn snippet(&self, out: &mut String, label: &Label, source_db: &SourceDb) {
        let Some(file) = source_db.get_file(label.span.file) else {
            return;
        };
        let (line, col) = file.line_col(label.span.start);
        let Some(text) = file.line_text(line) else {
            return;
        };
        let gutter = line.to_string();
        let pad = " ".repeat(gutter.len());
        let width = label.span.len().max(1) as usize;
        let mark = match label.style {
            LabelStyle::Primary => "^",
            LabelStyle::Secondary => "-",
        };
        let _ = writeln!(out, "{pad} |");
        let _ = writeln!(out, "{gutter} | {text}");
        let _ = write!(
            out,
            "{pad} | {}{}",
            " ".repeat(col.saturating_sub(1) as usize),
            mark.repeat(width)
        );
        if !label.message.is_empty() {
            let _ = write!(out, " {}", label.message);
        }
        out.push('\n');
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = self.header(diag);
        out.push('\n');

        if let Some(resolved) = source_db.resolve_span(diag.primary_span) {
            let _ = writeln!(out, "  --> {resolved}");
            let has_primary = diag
                .labels
                .iter()
                .any(|l| l.style == LabelStyle::Primary);
            if !has_primary {
                let bare = Label::primary(diag.primary_span, "");
                self.snippet(&mut out, &bare, source_db);
            }
        }
        for label in &diag.labels {
            self.snippet(&mut out, label, source_db);
        }

        for note in &diag.notes {
            let _ = writeln!(out, "   = note: {note}");
        }
        for help in &diag.help {
            let _ = writeln!(out, "   = help: {help}");
        }
        out
    }
}
