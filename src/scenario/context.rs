use crate::appium::protocol::Element;
use crate::error::{FuncTestError, Result};
use crate::scenario::scenario_model::CheckResult;

/// Tracks the execution state and results of a running scenario.
#[derive(Debug, Clone, Default)]
pub struct TestContext {
    /// Current step index (0-based)
    pub current_step: usize,

    /// Tray button located by the last `focus_tray_icon`
    pub tray_icon: Option<Element>,

    /// Dialog located by the last `wait_for_dialog`
    pub dialog: Option<Element>,

    pub check_results: Vec<CheckResult>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: CheckResult) {
        self.check_results.push(result);
    }

    pub fn tray_icon(&self) -> Result<&Element> {
        self.tray_icon.as_ref().ok_or_else(|| {
            FuncTestError::MissingState("tray icon not located; add a focus_tray_icon step".into())
        })
    }

    /// Hand out the current dialog; it is consumed by dismissing it.
    pub fn take_dialog(&mut self) -> Result<Element> {
        self.dialog.take().ok_or_else(|| {
            FuncTestError::MissingState("no dialog open; add a wait_for_dialog step".into())
        })
    }

    pub fn all_passed(&self) -> bool {
        self.check_results.iter().all(|r| r.passed)
    }

    pub fn pass_count(&self) -> usize {
        self.check_results.iter().filter(|r| r.passed).count()
    }

    pub fn fail_count(&self) -> usize {
        self.check_results.iter().filter(|r| !r.passed).count()
    }
}
