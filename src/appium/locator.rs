use std::fmt;

use serde::{Deserialize, Serialize};

/// Element location strategies understood by the Windows driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "using", content = "value", rename_all = "snake_case")]
pub enum By {
    /// Win32 window class, e.g. `#32770` for dialogs
    ClassName(String),
    /// Runtime id; the same string the driver uses as element id
    Id(String),
    /// UIA Name property
    Name(String),
    /// UIA AutomationId
    AccessibilityId(String),
    XPath(String),
    /// UIA control type, e.g. `Button`
    TagName(String),
}

impl By {
    pub fn class_name(v: impl Into<String>) -> Self {
        By::ClassName(v.into())
    }

    pub fn id(v: impl Into<String>) -> Self {
        By::Id(v.into())
    }

    pub fn name(v: impl Into<String>) -> Self {
        By::Name(v.into())
    }

    pub fn accessibility_id(v: impl Into<String>) -> Self {
        By::AccessibilityId(v.into())
    }

    pub fn xpath(v: impl Into<String>) -> Self {
        By::XPath(v.into())
    }

    /// The WebDriver `using` string.
    pub fn strategy(&self) -> &'static str {
        match self {
            By::ClassName(_) => "class name",
            By::Id(_) => "id",
            By::Name(_) => "name",
            By::AccessibilityId(_) => "accessibility id",
            By::XPath(_) => "xpath",
            By::TagName(_) => "tag name",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            By::ClassName(v)
            | By::Id(v)
            | By::Name(v)
            | By::AccessibilityId(v)
            | By::XPath(v)
            | By::TagName(v) => v,
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?}", self.strategy(), self.value())
    }
}

/// Quote a string for use inside an XPath expression. XPath 1.0 has no
/// escape syntax, so strings holding both quote kinds go through `concat()`.
pub fn xpath_literal(s: &str) -> String {
    if !s.contains('"') {
        format!("\"{}\"", s)
    } else if !s.contains('\'') {
        format!("'{}'", s)
    } else {
        let parts: Vec<String> = s.split('"').map(|p| format!("\"{}\"", p)).collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}
