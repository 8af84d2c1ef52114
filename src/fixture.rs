use tracing::{info, warn};

use crate::appium::protocol::{Capabilities, Element};
use crate::appium::service::AppiumService;
use crate::appium::session::WindowsSession;
use crate::cli::config::AppConfig;
use crate::desktop::helpers::find_desktop;
use crate::desktop::screen::ScreenMetrics;
use crate::error::Result;
use crate::wait::Wait;

/// What a scenario step needs: the open session, the desktop root and the
/// knobs that shape waiting and clicking.
pub struct Harness {
    pub session: WindowsSession,
    pub desktop: Element,
    pub metrics: Box<dyn ScreenMetrics>,
    pub wait: Wait,
    /// Substring of the tray button's accessible name
    pub tray_icon_name: String,
}

impl Harness {
    /// Open a session against a server that is already running.
    pub fn attach(
        url: &str,
        app: &str,
        wait: Wait,
        tray_icon_name: &str,
        metrics: Box<dyn ScreenMetrics>,
    ) -> Result<Self> {
        let session = WindowsSession::open(url, &Capabilities::windows(app))?;
        let desktop = find_desktop(&session)?;
        Ok(Self {
            session,
            desktop,
            metrics,
            wait,
            tray_icon_name: tray_icon_name.to_string(),
        })
    }
}

/// Session-scoped setup shared by every scenario in a run.
///
/// Fields drop in declaration order, so the session is closed before the
/// server it talks to is stopped.
pub struct Fixture {
    pub harness: Harness,
    service: Option<AppiumService>,
}

impl Fixture {
    pub fn start(config: &AppConfig) -> Result<Self> {
        let service = if config.appium.manage_service {
            Some(AppiumService::start(&config.service_config())?)
        } else {
            info!(url = %config.appium_url(), "using external appium server");
            None
        };

        let harness = Harness::attach(
            &config.appium_url(),
            &config.session.app,
            config.wait(),
            &config.tray.icon_name,
            config.screen_metrics(),
        )?;

        Ok(Self { harness, service })
    }

    pub fn manages_service(&self) -> bool {
        self.service.is_some()
    }

    /// Close the session, then stop the server.
    pub fn shutdown(mut self) -> Result<()> {
        let quit = self.harness.session.quit();
        if let Some(mut service) = self.service.take() {
            service.stop();
        }
        if let Err(ref e) = quit {
            warn!(error = %e, "session did not close cleanly");
        }
        quit
    }
}
