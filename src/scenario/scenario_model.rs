use std::fmt;

use serde::{Deserialize, Serialize};

/// A tray-menu acceptance scenario. Built in code (see `builtin`) or
/// deserialized from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Human-readable name for this scenario
    pub name: String,

    /// Ordered list of steps to execute
    pub steps: Vec<Step>,
}

/// A single step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Bring up the notification area and locate the application's tray button
    FocusTrayIcon {
        /// Overrides the configured tray icon name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon_name: Option<String>,
    },

    /// Right-click the located tray button to open its context menu
    ContextClickTrayIcon,

    /// Click the context-menu item bound to a command id and wait for the menu to close
    ClickMenuItem { command_id: String },

    /// Wait for a dialog to appear
    WaitForDialog { dialog: DialogMatch },

    /// Dismiss the current dialog via Cancel
    CancelDialog,

    /// Sleep for a fixed time
    Wait { duration_ms: u64 },
}

impl Step {
    pub fn label(&self) -> String {
        match self {
            Step::FocusTrayIcon { .. } => "focus tray icon".into(),
            Step::ContextClickTrayIcon => "context click tray icon".into(),
            Step::ClickMenuItem { command_id } => format!("click menu item {}", command_id),
            Step::WaitForDialog { dialog } => format!("wait for dialog {}", dialog),
            Step::CancelDialog => "cancel dialog".into(),
            Step::Wait { duration_ms } => format!("wait {}ms", duration_ms),
        }
    }
}

/// How a dialog is recognised.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum DialogMatch {
    /// Any window of this Win32 class
    ClassName { class_name: String },

    /// A window with exactly this title
    Title { title: String },
}

impl fmt::Display for DialogMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogMatch::ClassName { class_name } => write!(f, "class '{}'", class_name),
            DialogMatch::Title { title } => write!(f, "titled '{}'", title),
        }
    }
}

/// An observable outcome a step verifies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    TrayIconVisible { icon_name: String },
    MenuItemShown { command_id: String },
    /// The context menu left the accessibility tree after its item was clicked
    MenuClosed { command_id: String },
    DialogShown { dialog: DialogMatch },
    DialogDismissed,
}

impl Check {
    pub fn kind(&self) -> &'static str {
        match self {
            Check::TrayIconVisible { .. } => "TrayIconVisible",
            Check::MenuItemShown { .. } => "MenuItemShown",
            Check::MenuClosed { .. } => "MenuClosed",
            Check::DialogShown { .. } => "DialogShown",
            Check::DialogDismissed => "DialogDismissed",
        }
    }
}

/// Result of evaluating a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckResult {
    /// Which step this check belongs to (0-indexed)
    pub step_index: usize,

    pub check: Check,

    pub passed: bool,

    /// What was observed (element id, coordinates, ...)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

impl CheckResult {
    pub fn pass(step_index: usize, check: Check, actual: impl Into<String>) -> Self {
        Self {
            step_index,
            check,
            passed: true,
            actual: Some(actual.into()),
            message: None,
        }
    }

    pub fn fail(step_index: usize, check: Check, message: impl Into<String>) -> Self {
        Self {
            step_index,
            check,
            passed: false,
            actual: None,
            message: Some(message.into()),
        }
    }
}

/// Result of running a complete scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub scenario_name: String,

    /// Whether all steps and checks passed
    pub passed: bool,

    /// Number of steps that were executed
    pub steps_run: usize,

    pub check_results: Vec<CheckResult>,

    /// Error message if the scenario stopped on an error (not a failed check)
    pub error: Option<String>,

    #[serde(default)]
    pub duration_ms: u128,
}
