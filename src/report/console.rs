use crate::report::report_model::{TestSuiteReport, failure_lines, secs};

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a suite report for terminal output.
///
/// Produces output like:
/// ```text
/// === Test Suite: Tray menu ===
///
/// ✓ PASS  show_type_list (5 steps, 5 checks)
/// ✗ FAIL  show_about_dialog (4 steps, 3 checks)
///     [FAIL] Step 3: DialogShown: Timed out after 120s waiting for dialog 'バージョン情報'
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &TestSuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Test Suite: {} ===\n\n", report.suite_name));

    for result in &report.test_results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} checks)\n",
            marker,
            result.scenario_name,
            result.steps_run,
            result.check_results.len()
        ));

        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        if !result.passed {
            for line in failure_lines(result) {
                out.push_str(&format!("    [FAIL] {}\n", line));
            }
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if report.failed_checks > 0 || report.errored > 0 {
        out.push_str(&format!(
            ", {} failed check(s), {} error(s)",
            report.failed_checks, report.errored
        ));
    }

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {:.1}s", secs(ms)));
    }

    out.push_str(" ===\n");

    out
}
