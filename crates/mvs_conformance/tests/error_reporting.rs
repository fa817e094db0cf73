//! Tests for how failures surface: every front-end or simulation problem
//! becomes a diagnostic with a stable code, and rendering points at source.

use mvs_conformance::run_pipeline;
use mvs_diagnostics::Severity;
use mvs_sim::SimConfig;

#[test]
fn syntax_error_points_at_token() {
    let src = "module m(input a, output y);\n    assign y = a &;\nendmodule\n";
    let result = run_pipeline(src, &[("a", 1)], &SimConfig::default());
    assert!(result.module.is_none());
    assert_eq!(result.error_count, 1);
    let out = result.render();
    assert!(out.starts_with("error[E101]: expected expression, found ';'\n"), "{out}");
    assert!(out.contains("  --> input.v:2:19\n"), "{out}");
    assert!(out.contains("2 |     assign y = a &;\n"), "{out}");
    assert!(out.contains("^ here"), "{out}");
}

#[test]
fn malformed_literal_is_fatal() {
    let src = "module m(output [7:0] y); assign y = 8'hZZ; endmodule";
    let result = run_pipeline(src, &[], &SimConfig::default());
    assert!(result.module.is_none());
    assert!(result.has_errors);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.code.to_string(), "E100");
    assert_eq!(
        diag.message,
        "invalid hexadecimal digit 'Z' in number literal \"8'hZZ\""
    );
}

#[test]
fn zero_width_literal_is_fatal() {
    let src = "module m(output y); assign y = 0'b1; endmodule";
    let result = run_pipeline(src, &[], &SimConfig::default());
    assert!(result.module.is_none());
    assert_eq!(result.diagnostics[0].code.to_string(), "E100");
}

#[test]
fn unrecognized_character_is_skipped_with_warning() {
    let src = "module m(input a, output y); assign y = a $; endmodule";
    let result = run_pipeline(src, &[("a", 1)], &SimConfig::default());
    assert!(!result.has_errors);
    assert_eq!(result.warning_count, 1);
    assert_eq!(result.diagnostics[0].code.to_string(), "W001");
    assert_eq!(result.value("y"), Some(1));
}

#[test]
fn duplicate_declaration_warns() {
    let src = "module m(input a, output [3:0] y);
        wire [3:0] y;
        assign y = a;
    endmodule";
    let result = run_pipeline(src, &[("a", 1)], &SimConfig::default());
    assert!(!result.has_errors);
    assert_eq!(result.warning_count, 1);
    let out = result.render();
    assert!(out.contains("warning[W002]: 'y' is declared more than once"), "{out}");
    assert!(out.contains("first declared here"), "{out}");
}

#[test]
fn combinational_cycle_is_reported() {
    let src = "module loop(input a);
        wire p, q;
        assign p = q & a;
        assign q = p | a;
    endmodule";
    let result = run_pipeline(src, &[("a", 1)], &SimConfig::default());
    assert!(result.module.is_some());
    assert!(result.symbols.is_none());
    let diag = &result.diagnostics[0];
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.code.to_string(), "S005");
    assert_eq!(diag.message, "combinational cycle through p, q");
}

#[test]
fn oscillation_without_cycle_check_hits_budget() {
    let config = SimConfig {
        cycle_check: false,
        max_evaluations: 100,
        ..SimConfig::default()
    };
    let src = "module osc(); wire q; assign q = ~q; endmodule";
    let result = run_pipeline(src, &[], &config);
    assert_eq!(result.error_count, 1);
    let out = result.render();
    assert!(
        out.contains("error[S006]: no fixed point after 100 evaluations (still pending: q)"),
        "{out}"
    );
    assert!(out.contains("   = help: raise simulation.max_evaluations"), "{out}");
}

#[test]
fn missing_input_is_undefined_symbol() {
    let src = "module m(input a, input b, output y); assign y = a & b; endmodule";
    let result = run_pipeline(src, &[("a", 1)], &SimConfig::default());
    let diag = &result.diagnostics[0];
    assert_eq!(diag.code.to_string(), "S001");
    assert_eq!(diag.message, "undefined symbol 'b'");
    assert_eq!(diag.help, ["set every input before simulating"]);
}

#[test]
fn driving_an_output_is_rejected() {
    let src = "module m(input a, output y); assign y = a; endmodule";
    let result = run_pipeline(src, &[("a", 1), ("y", 0)], &SimConfig::default());
    assert_eq!(result.diagnostics[0].code.to_string(), "S004");
    assert_eq!(result.diagnostics[0].message, "'y' is not an input port");
}

#[test]
fn oversized_slice_is_reported() {
    let src = "module m(input a); wire w; assign w[80:79] = a; endmodule";
    let result = run_pipeline(src, &[("a", 1)], &SimConfig::default());
    assert_eq!(result.diagnostics[0].code.to_string(), "S003");
}
