use crate::report::report_model::{TestSuiteReport, failure_lines, secs};

const CLASSNAME: &str = "sakura-functests";

// ============================================================================
// JUnit XML reporter for CI
// ============================================================================

/// Generate a JUnit XML report.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuite name="..." tests="3" failures="1" time="41.200">
///   <testcase name="show_type_list" classname="sakura-functests" time="12.000" />
///   <testcase name="show_about_dialog" classname="sakura-functests" time="120.500">
///     <failure message="1 check(s) failed" type="CheckFailure">
///       Step 3: DialogShown: Timed out ...
///     </failure>
///   </testcase>
/// </testsuite>
/// ```
pub fn generate_junit_xml(report: &TestSuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", secs(ms)))
        .unwrap_or_default();

    let mut cases = String::new();
    for result in &report.test_results {
        let name = escape_xml(&result.scenario_name);
        let time = secs(result.duration_ms);

        if result.passed {
            cases.push_str(&format!(
                "  <testcase name=\"{}\" classname=\"{}\" time=\"{:.3}\" />\n",
                name, CLASSNAME, time
            ));
            continue;
        }

        let mut body_parts = failure_lines(result);
        let failure_count = body_parts.len();

        if let Some(e) = &result.error {
            body_parts.push(format!("Error: {}", e));
        }

        let (message, kind) = if failure_count > 0 {
            (format!("{} check(s) failed", failure_count), "CheckFailure")
        } else {
            ("execution error".to_string(), "ExecutionError")
        };

        cases.push_str(&format!(
            "  <testcase name=\"{name}\" classname=\"{class}\" time=\"{time:.3}\">\n    <failure message=\"{message}\" type=\"{kind}\">{body}</failure>\n  </testcase>\n",
            name = name,
            class = CLASSNAME,
            time = time,
            message = escape_xml(&message),
            kind = kind,
            body = escape_xml(&body_parts.join("\n")),
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        time = time_attr,
        cases = cases,
    )
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
