use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Passed,
    /// A check did not hold (timeout, missing element)
    Failed,
    /// The step could not be executed
    Error,
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepOutcome::Passed => "passed",
            StepOutcome::Failed => "failed",
            StepOutcome::Error => "error",
        };
        f.write_str(s)
    }
}

/// One line of the JSONL step trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub scenario: String,
    pub step: usize,
    pub label: String,

    pub outcome: Option<StepOutcome>,
    pub duration_ms: Option<u128>,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(scenario: &str, step: usize, label: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            scenario: scenario.to_string(),
            step,
            label: label.to_string(),
            outcome: None,
            duration_ms: None,
            detail: None,
        }
    }

    pub fn with_outcome(mut self, outcome: StepOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
