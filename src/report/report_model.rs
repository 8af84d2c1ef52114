use serde::{Deserialize, Serialize};

use crate::scenario::scenario_model::{CheckResult, TestResult};

// ============================================================================
// Test suite report: aggregates multiple TestResult instances
// ============================================================================

/// Aggregated report for a run of tray-menu scenarios.
///
/// Built from a `Vec<TestResult>` via `from_results()`. Consumed by the
/// console, HTML and JUnit reporters, which share the failure wording
/// produced by [`failure_lines`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteReport {
    /// Name of the suite, e.g. `Tray menu`
    pub suite_name: String,

    /// Number of scenarios run
    pub total: usize,

    /// Scenarios with every step run and every check passed
    pub passed: usize,

    /// Scenarios that stopped on a failed check or an error
    pub failed: usize,

    /// Failed checks across all scenarios
    #[serde(default)]
    pub failed_checks: usize,

    /// Scenarios that stopped on an execution error rather than a check
    #[serde(default)]
    pub errored: usize,

    /// Total execution duration in milliseconds, fixture setup included (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    /// Per-scenario results, in execution order
    pub test_results: Vec<TestResult>,
}

impl TestSuiteReport {
    /// Build a suite report from a list of scenario results.
    ///
    /// Computes scenario, failed-check and error counts.
    pub fn from_results(suite_name: &str, results: Vec<TestResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed_checks = results.iter().map(|r| failed_checks(r).count()).sum();
        let errored = results.iter().filter(|r| r.error.is_some()).count();
        Self {
            suite_name: suite_name.to_string(),
            total,
            passed,
            failed: total - passed,
            failed_checks,
            errored,
            duration_ms: None,
            test_results: results,
        }
    }

    /// Set the total execution duration.
    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Whether every scenario in the suite passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Checks of `result` that did not hold.
pub fn failed_checks(result: &TestResult) -> impl Iterator<Item = &CheckResult> {
    result.check_results.iter().filter(|c| !c.passed)
}

/// One line per failed check: `Step 3: DialogShown: Timed out ...`.
pub fn failure_lines(result: &TestResult) -> Vec<String> {
    failed_checks(result)
        .map(|cr| {
            let msg = cr.message.as_deref().unwrap_or("check failed");
            format!("Step {}: {}: {}", cr.step_index, cr.check.kind(), msg)
        })
        .collect()
}

/// Milliseconds as fractional seconds, for display.
pub fn secs(ms: u128) -> f64 {
    ms as f64 / 1000.0
}
