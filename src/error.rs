use std::time::Duration;

use thiserror::Error;

/// W3C error codes that mean "the element isn't there (any more)".
const MISSING_ELEMENT_CODES: [&str; 2] = ["no such element", "stale element reference"];

#[derive(Debug, Error)]
pub enum FuncTestError {
    /// The automation server process failed to spawn
    #[error("Failed to spawn {executable} (is Appium installed?): {source}")]
    ServiceSpawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// The automation server never answered /status within the startup timeout
    #[error("Appium server at {url} not ready after {timeout:?}")]
    ServiceStartup { url: String, timeout: Duration },

    /// HTTP transport failure talking to the automation server
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered a command with a WebDriver error payload
    #[error("WebDriver command '{command}' failed ({error}): {message}")]
    WebDriver {
        command: String,
        error: String,
        message: String,
    },

    /// Response did not have the expected shape
    #[error("Malformed response to '{command}': {detail}")]
    MalformedResponse { command: String, detail: String },

    /// JSON parsing failed
    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Bounded wait ran out
    #[error("Timed out after {timeout:?} waiting for {waiting_for}")]
    Timeout {
        waiting_for: String,
        timeout: Duration,
    },

    /// A step needed an element an earlier step should have located
    #[error("Missing state: {0}")]
    MissingState(String),

    /// Scenario or config YAML could not be parsed
    #[error("YAML error ({context}): {source}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("I/O error ({context}): {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl FuncTestError {
    /// True for protocol errors that mean the element is absent or stale.
    /// Waits treat these as "condition not met yet".
    pub fn is_no_such_element(&self) -> bool {
        match self {
            FuncTestError::WebDriver { error, .. } => {
                MISSING_ELEMENT_CODES.contains(&error.as_str())
            }
            _ => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FuncTestError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, FuncTestError>;
