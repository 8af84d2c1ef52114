use crate::report::report_model::{TestSuiteReport, failure_lines, secs};

// ============================================================================
// HTML reporter: self-contained page, inline CSS
// ============================================================================

/// Generate a self-contained HTML report: a green/red header with counts,
/// one section per scenario, failed checks listed in red.
pub fn generate_html_report(report: &TestSuiteReport) -> String {
    let header_color = if report.all_passed() {
        "#4CAF50"
    } else {
        "#f44336"
    };

    let status_text = if report.all_passed() {
        "ALL SCENARIOS PASSED"
    } else {
        "SOME SCENARIOS FAILED"
    };

    let duration_text = report
        .duration_ms
        .map(|ms| format!(" in {:.1}s", secs(ms)))
        .unwrap_or_default();

    let mut cases = String::new();
    for result in &report.test_results {
        let case_class = if result.passed { "pass" } else { "fail" };
        let case_marker = if result.passed { "\u{2713}" } else { "\u{2717}" };

        cases.push_str(&format!(
            r#"<div class="test-case {class}">
<h3>{marker} {name}</h3>
<p>Steps: {steps} | Checks: {checks} | {dur:.1}s</p>
"#,
            class = case_class,
            marker = case_marker,
            name = escape_html(&result.scenario_name),
            steps = result.steps_run,
            checks = result.check_results.len(),
            dur = secs(result.duration_ms),
        ));

        if let Some(ref error) = result.error {
            cases.push_str(&format!(
                "<p class=\"error\">Error: {}</p>\n",
                escape_html(error)
            ));
        }

        let failed = failure_lines(result);
        if !failed.is_empty() {
            cases.push_str("<ul class=\"failures\">\n");
            for line in failed {
                cases.push_str(&format!("<li>{}</li>\n", escape_html(&line)));
            }
            cases.push_str("</ul>\n");
        }

        cases.push_str("</div>\n");
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{suite_name} - Functional Test Report</title>
<style>
body {{ font-family: "Segoe UI", "Yu Gothic UI", Meiryo, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }}
.header {{ background: {header_color}; color: white; padding: 20px 30px; }}
.header h1 {{ margin: 0 0 8px 0; font-size: 24px; }}
.header p {{ margin: 0; font-size: 16px; opacity: 0.9; }}
.content {{ max-width: 900px; margin: 20px auto; padding: 0 20px; }}
.test-case {{ background: white; border-radius: 6px; padding: 16px 20px; margin-bottom: 12px; border-left: 4px solid #ccc; }}
.test-case.pass {{ border-left-color: #4CAF50; }}
.test-case.fail {{ border-left-color: #f44336; }}
.test-case h3 {{ margin: 0 0 8px 0; font-size: 16px; }}
.test-case p {{ margin: 4px 0; color: #666; font-size: 14px; }}
.test-case .error {{ color: #f44336; font-weight: bold; }}
.failures {{ margin: 8px 0 0 0; padding-left: 20px; }}
.failures li {{ color: #c62828; font-size: 13px; margin-bottom: 4px; }}
</style>
</head>
<body>
<div class="header">
<h1>{status_text}</h1>
<p>{suite_name}: {passed} passed, {failed} failed ({total} total){duration}</p>
</div>
<div class="content">
{cases}
</div>
</body>
</html>"##,
        suite_name = escape_html(&report.suite_name),
        header_color = header_color,
        status_text = status_text,
        passed = report.passed,
        failed = report.failed,
        total = report.total,
        duration = duration_text,
        cases = cases,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
