use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// W3C element reference key.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Pre-W3C (JSONWP) element reference key, still emitted by some WinAppDriver builds.
pub const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// Capabilities for a Windows driver session.
///
/// `app` is either an executable path or `Root`, which attaches to the whole
/// desktop instead of launching anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    pub app: String,
    pub automation_name: String,
    pub extra: Map<String, Value>,
}

impl Capabilities {
    pub fn windows(app: &str) -> Self {
        Self {
            app: app.to_string(),
            automation_name: "Windows".to_string(),
            extra: Map::new(),
        }
    }

    /// Add a vendor capability; the `appium:` prefix is added when missing.
    pub fn with(mut self, name: &str, value: Value) -> Self {
        let key = if name.contains(':') {
            name.to_string()
        } else {
            format!("appium:{}", name)
        };
        self.extra.insert(key, value);
        self
    }

    /// Body for `POST /session`.
    pub fn to_new_session_body(&self) -> Value {
        let mut always_match = Map::new();
        always_match.insert("platformName".into(), json!("Windows"));
        always_match.insert("appium:automationName".into(), json!(self.automation_name));
        always_match.insert("appium:app".into(), json!(self.app));
        for (k, v) in &self.extra {
            always_match.insert(k.clone(), v.clone());
        }
        json!({ "capabilities": { "alwaysMatch": Value::Object(always_match) } })
    }
}

/// Every WebDriver response wraps its payload in `value`.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub value: Value,
}

/// Error payload carried in `value` on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorValue {
    pub error: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct NewSessionValue {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub capabilities: Value,
}

/// A handle into the remote accessibility tree. Valid only for the session
/// that returned it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    pub id: String,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Extract an element reference from a response value.
    pub fn from_value(value: &Value) -> Option<Self> {
        value
            .get(ELEMENT_KEY)
            .or_else(|| value.get(LEGACY_ELEMENT_KEY))
            .and_then(Value::as_str)
            .map(Element::new)
    }
}

/// Element rectangle in screen pixels, as reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Arguments of the `windows: click` extension command.
#[derive(Debug, Clone, Serialize)]
pub struct WindowsClick {
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
}
