use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::appium::locator::By;
use crate::appium::protocol::{
    Capabilities, Element, Envelope, ErrorValue, MouseButton, NewSessionValue, Rect, WindowsClick,
};
use crate::error::{FuncTestError, Result};

/// Per-request HTTP timeout. Commands are short; waiting happens client-side.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Build the blocking HTTP client shared by the session and the service status checks.
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| FuncTestError::Http {
            url: "<client builder>".into(),
            source: e,
        })
}

/// Send one WebDriver command and unwrap its `value`.
pub(crate) fn call(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<&Value>,
    command: &str,
) -> Result<Value> {
    debug!(command, %method, url, "webdriver command");

    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(body);
    }

    let response = request.send().map_err(|e| FuncTestError::Http {
        url: url.to_string(),
        source: e,
    })?;
    let status = response.status();
    let text = response.text().map_err(|e| FuncTestError::Http {
        url: url.to_string(),
        source: e,
    })?;

    let parsed = if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Envelope>(&text).map(|env| env.value)
    };

    if !status.is_success() {
        let err = parsed
            .ok()
            .and_then(|v| serde_json::from_value::<ErrorValue>(v).ok())
            .unwrap_or_else(|| ErrorValue {
                error: format!("http {}", status.as_u16()),
                message: text.trim().to_string(),
            });
        return Err(FuncTestError::WebDriver {
            command: command.to_string(),
            error: err.error,
            message: err.message,
        });
    }

    parsed.map_err(|e| FuncTestError::JsonParse {
        context: format!("{} response", command),
        source: e,
    })
}

/// Some driver builds report fractional coordinates.
#[derive(Deserialize)]
struct RawRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// An open session against a Windows driver.
///
/// Every method is one blocking round trip. The session is closed on
/// [`WindowsSession::quit`] or, best-effort, on drop.
pub struct WindowsSession {
    client: Client,
    base_url: String,
    session_id: String,
    closed: bool,
}

impl WindowsSession {
    /// Open a new session (`POST /session`).
    pub fn open(base_url: &str, capabilities: &Capabilities) -> Result<Self> {
        let client = http_client(COMMAND_TIMEOUT)?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let url = format!("{}/session", base_url);
        let body = capabilities.to_new_session_body();

        let value = call(&client, Method::POST, &url, Some(&body), "new session")?;
        let created: NewSessionValue =
            serde_json::from_value(value).map_err(|e| FuncTestError::JsonParse {
                context: "new session response".into(),
                source: e,
            })?;

        info!(session_id = %created.session_id, app = %capabilities.app, "session opened");

        Ok(Self {
            client,
            base_url,
            session_id: created.session_id,
            closed: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.session_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/session/{}{}", self.base_url, self.session_id, path)
    }

    fn get(&self, path: &str, command: &str) -> Result<Value> {
        call(&self.client, Method::GET, &self.url(path), None, command)
    }

    fn post(&self, path: &str, body: &Value, command: &str) -> Result<Value> {
        call(&self.client, Method::POST, &self.url(path), Some(body), command)
    }

    fn find_one(&self, path: &str, by: &By, command: &str) -> Result<Element> {
        let body = json!({ "using": by.strategy(), "value": by.value() });
        let value = self.post(path, &body, command)?;
        Element::from_value(&value).ok_or_else(|| FuncTestError::MalformedResponse {
            command: command.into(),
            detail: format!("no element reference for {}", by),
        })
    }

    fn find_many(&self, path: &str, by: &By, command: &str) -> Result<Vec<Element>> {
        let body = json!({ "using": by.strategy(), "value": by.value() });
        let value = self.post(path, &body, command)?;
        let items = value
            .as_array()
            .ok_or_else(|| FuncTestError::MalformedResponse {
                command: command.into(),
                detail: "expected an array of element references".into(),
            })?;
        Ok(items.iter().filter_map(Element::from_value).collect())
    }

    /// Find the first element matching `by` anywhere under the session root.
    pub fn find_element(&self, by: &By) -> Result<Element> {
        self.find_one("/element", by, "find element")
    }

    pub fn find_elements(&self, by: &By) -> Result<Vec<Element>> {
        self.find_many("/elements", by, "find elements")
    }

    /// Find the first element matching `by` below `parent`.
    pub fn find_element_from(&self, parent: &Element, by: &By) -> Result<Element> {
        self.find_one(
            &format!("/element/{}/element", parent.id),
            by,
            "find element from element",
        )
    }

    pub fn find_elements_from(&self, parent: &Element, by: &By) -> Result<Vec<Element>> {
        self.find_many(
            &format!("/element/{}/elements", parent.id),
            by,
            "find elements from element",
        )
    }

    pub fn rect(&self, element: &Element) -> Result<Rect> {
        let value = self.get(&format!("/element/{}/rect", element.id), "get element rect")?;
        let raw: RawRect = serde_json::from_value(value).map_err(|e| FuncTestError::JsonParse {
            context: "element rect".into(),
            source: e,
        })?;
        Ok(Rect {
            x: raw.x.round() as i32,
            y: raw.y.round() as i32,
            width: raw.width.round() as i32,
            height: raw.height.round() as i32,
        })
    }

    pub fn is_displayed(&self, element: &Element) -> Result<bool> {
        let value = self.get(
            &format!("/element/{}/displayed", element.id),
            "is element displayed",
        )?;
        value.as_bool().ok_or_else(|| FuncTestError::MalformedResponse {
            command: "is element displayed".into(),
            detail: format!("expected boolean, got {}", value),
        })
    }

    /// Read a UIA property, e.g. `Name` or `AutomationId`.
    pub fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
        let value = self.get(
            &format!("/element/{}/attribute/{}", element.id, name),
            "get element attribute",
        )?;
        Ok(match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    pub fn text(&self, element: &Element) -> Result<String> {
        let value = self.get(&format!("/element/{}/text", element.id), "get element text")?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub fn click(&self, element: &Element) -> Result<()> {
        self.post(
            &format!("/element/{}/click", element.id),
            &json!({}),
            "element click",
        )?;
        Ok(())
    }

    /// Type into an element. Key code points from [`crate::appium::keys`] may be mixed in.
    pub fn send_keys(&self, element: &Element, text: &str) -> Result<()> {
        let chars: Vec<String> = text.chars().map(String::from).collect();
        self.post(
            &format!("/element/{}/value", element.id),
            &json!({ "text": text, "value": chars }),
            "element send keys",
        )?;
        Ok(())
    }

    /// Run a driver script or extension command such as `windows: click`.
    pub fn execute_script(&self, script: &str, args: Value) -> Result<Value> {
        self.post(
            "/execute/sync",
            &json!({ "script": script, "args": [args] }),
            "execute script",
        )
    }

    /// Synthesize a mouse click at absolute screen coordinates.
    pub fn windows_click(&self, x: i32, y: i32, button: MouseButton) -> Result<()> {
        let args = serde_json::to_value(WindowsClick { x, y, button }).map_err(|e| {
            FuncTestError::JsonParse {
                context: "windows: click arguments".into(),
                source: e,
            }
        })?;
        self.execute_script("windows: click", args)?;
        Ok(())
    }

    /// Close the session (`DELETE /session/{id}`). Calling it twice is a no-op.
    pub fn quit(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        call(
            &self.client,
            Method::DELETE,
            &self.url(""),
            None,
            "delete session",
        )?;
        info!(session_id = %self.session_id, "session closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for WindowsSession {
    fn drop(&mut self) {
        if let Err(e) = self.quit() {
            warn!(error = %e, "failed to close session on drop");
        }
    }
}
