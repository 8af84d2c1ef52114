use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use reqwest::Method;
use tracing::{debug, info, warn};

use crate::appium::session::{call, http_client};
use crate::error::{FuncTestError, Result};

/// How often `/status` is polled while the server boots.
const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Everything needed to launch and reach an Appium server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub executable: String,
    pub host: String,
    pub port: u16,
    /// Path prefix the server is mounted at (`""` for Appium 2, `/wd/hub` for 1.x).
    pub base_path: String,
    pub startup_timeout: Duration,
}

impl ServiceConfig {
    pub fn url(&self) -> String {
        server_url(&self.host, self.port, &self.base_path)
    }

    /// Command-line arguments passed to the server executable.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "--address".to_string(),
            self.host.clone(),
            "--port".to_string(),
            self.port.to_string(),
        ];
        if !self.base_path.is_empty() {
            args.push("--base-path".to_string());
            args.push(self.base_path.clone());
        }
        args
    }
}

/// `http://{host}:{port}{base_path}` with the base path normalized to a leading slash.
pub fn server_url(host: &str, port: u16, base_path: &str) -> String {
    let path = base_path.trim_matches('/');
    if path.is_empty() {
        format!("http://{}:{}", host, port)
    } else {
        format!("http://{}:{}/{}", host, port, path)
    }
}

/// Poll `GET {url}/status` until the server answers 200 or `timeout` passes.
pub fn wait_until_ready(url: &str, timeout: Duration, poll: Duration) -> Result<()> {
    let client = http_client(poll.max(Duration::from_secs(2)))?;
    let status_url = format!("{}/status", url.trim_end_matches('/'));
    let deadline = Instant::now() + timeout;

    loop {
        match call(&client, Method::GET, &status_url, None, "status") {
            Ok(_) => return Ok(()),
            Err(e) => debug!(error = %e, "appium not ready yet"),
        }
        if Instant::now() >= deadline {
            return Err(FuncTestError::ServiceStartup {
                url: url.to_string(),
                timeout,
            });
        }
        thread::sleep(poll);
    }
}

/// A locally spawned Appium server. Killed on [`AppiumService::stop`] or drop.
pub struct AppiumService {
    child: Option<Child>,
    url: String,
}

impl AppiumService {
    /// Spawn the server and block until it reports ready.
    pub fn start(config: &ServiceConfig) -> Result<Self> {
        let url = config.url();
        info!(executable = %config.executable, %url, "starting appium server");

        let child = Command::new(&config.executable)
            .args(config.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| FuncTestError::ServiceSpawn {
                executable: config.executable.clone(),
                source: e,
            })?;

        let mut service = AppiumService {
            child: Some(child),
            url,
        };

        if let Err(e) = wait_until_ready(&service.url, config.startup_timeout, STATUS_POLL_INTERVAL) {
            service.stop();
            return Err(e);
        }

        info!(url = %service.url, "appium server ready");
        Ok(service)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Kill and reap the server process. Calling it twice is a no-op.
    pub fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        if let Err(e) = child.kill() {
            warn!(error = %e, "failed to kill appium server");
        }
        if let Err(e) = child.wait() {
            warn!(error = %e, "failed to reap appium server");
        }
        info!(url = %self.url, "appium server stopped");
    }
}

impl Drop for AppiumService {
    fn drop(&mut self) {
        self.stop();
    }
}
