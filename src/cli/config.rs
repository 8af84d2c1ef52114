use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::appium::service::{ServiceConfig, server_url};
use crate::desktop::screen::{FixedOrigin, Point, ScreenMetrics, SystemMetrics};
use crate::wait::Wait;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "functests.yaml";

pub const ENV_APPIUM_HOST: &str = "APPIUM_HOST";
pub const ENV_APPIUM_PORT: &str = "APPIUM_PORT";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "sakura-functests",
    version,
    about = "Functional UI tests for the Sakura Editor tray menu over Appium"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: functests.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Appium server host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Appium server port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Use an already running Appium server instead of spawning one
    #[arg(long, global = true)]
    pub external_server: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against the desktop
    Run {
        /// Scenario YAML file or directory (default: built-in tray menu scenarios)
        #[arg(long)]
        scenarios: Option<String>,

        /// Only run scenarios with these names (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Output format: console, html, junit
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List scenario names and their steps
    List {
        /// Scenario YAML file or directory (default: built-in scenarios)
        #[arg(long)]
        scenarios: Option<String>,
    },

    /// Write the built-in scenarios as YAML files
    Export {
        #[arg(short, long, default_value = "scenarios")]
        output_dir: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `functests.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub appium: AppiumConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub wait: WaitConfig,
    #[serde(default)]
    pub tray: TrayConfig,
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppiumConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub base_path: String,

    #[serde(default = "default_executable")]
    pub executable: String,

    #[serde(default = "default_startup_timeout_ms")]
    pub startup_timeout_ms: u64,

    /// Spawn and stop the server ourselves
    #[serde(default = "default_true")]
    pub manage_service: bool,
}

impl Default for AppiumConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: String::new(),
            executable: default_executable(),
            startup_timeout_ms: default_startup_timeout_ms(),
            manage_service: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Top-level window to attach to; `Root` is the whole desktop
    #[serde(default = "default_app")]
    pub app: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { app: default_app() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrayConfig {
    /// Substring of the tray button's accessible name
    #[serde(default = "default_icon_name")]
    pub icon_name: String,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            icon_name: default_icon_name(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Overrides the OS-reported virtual screen origin
    pub virtual_origin: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub output: Option<String>,

    #[serde(default = "default_trace_file")]
    pub trace_file: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            format: default_console(),
            output: None,
            trace_file: default_trace_file(),
        }
    }
}

// Serde default helpers
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 4723 }
fn default_executable() -> String { "appium".to_string() }
fn default_startup_timeout_ms() -> u64 { 20_000 }
fn default_true() -> bool { true }
fn default_app() -> String { "Root".to_string() }
fn default_timeout_secs() -> u64 { 120 }
fn default_poll_interval_ms() -> u64 { 500 }
fn default_icon_name() -> String { "サクラエディタ".to_string() }
fn default_console() -> String { "console".to_string() }
fn default_trace_file() -> Option<String> { Some("functests_trace.jsonl".to_string()) }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

impl AppConfig {
    /// Apply `APPIUM_HOST` / `APPIUM_PORT` from `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_APPIUM_HOST).filter(|h| !h.is_empty()) {
            self.appium.host = host;
        }
        if let Some(port) = lookup(ENV_APPIUM_PORT) {
            match port.parse() {
                Ok(p) => self.appium.port = p,
                Err(_) => warn!(value = %port, "ignoring invalid {}", ENV_APPIUM_PORT),
            }
        }
    }

    /// Apply command-line overrides, which win over file and environment.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.appium.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.appium.port = port;
        }
        if cli.external_server {
            self.appium.manage_service = false;
        }
    }

    /// Base URL of the automation server.
    pub fn appium_url(&self) -> String {
        server_url(&self.appium.host, self.appium.port, &self.appium.base_path)
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            executable: self.appium.executable.clone(),
            host: self.appium.host.clone(),
            port: self.appium.port,
            base_path: self.appium.base_path.clone(),
            startup_timeout: Duration::from_millis(self.appium.startup_timeout_ms),
        }
    }

    pub fn wait(&self) -> Wait {
        Wait::new(Duration::from_secs(self.wait.timeout_secs))
            .poll_interval(Duration::from_millis(self.wait.poll_interval_ms))
    }

    pub fn screen_metrics(&self) -> Box<dyn ScreenMetrics> {
        match self.screen.virtual_origin {
            Some(origin) => Box::new(FixedOrigin(origin)),
            None => Box::new(SystemMetrics::new()),
        }
    }
}

/// Resolve the effective config: file, then environment, then CLI flags.
pub fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = load_config(cli.config.as_deref());
    config.apply_env(|k| std::env::var(k).ok());
    config.apply_cli(cli);
    config
}
