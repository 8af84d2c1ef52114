use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::appium::locator::By;
use crate::appium::protocol::Element;
use crate::appium::session::WindowsSession;
use crate::error::{FuncTestError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Bounded polling against remote UI state.
///
/// Conditions are re-evaluated every `poll_interval` until they hold or
/// `timeout` elapses. "No such element" and "stale element" errors count as
/// "not yet"; any other error aborts the wait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wait {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for Wait {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Wait {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Poll until `condition` yields `Some`.
    pub fn until<T, F>(&self, waiting_for: &str, mut condition: F) -> Result<T>
    where
        F: FnMut() -> Result<Option<T>>,
    {
        let deadline = Instant::now() + self.timeout;
        loop {
            match condition() {
                Ok(Some(value)) => return Ok(value),
                Ok(None) => {}
                Err(e) if e.is_no_such_element() => {}
                Err(e) => return Err(e),
            }
            if Instant::now() >= deadline {
                return Err(self.timed_out(waiting_for));
            }
            trace!(waiting_for, "condition not met, polling again");
            thread::sleep(self.poll_interval);
        }
    }

    /// Poll until `condition` yields `false`. A vanished element counts as `false`.
    pub fn until_not<F>(&self, waiting_for: &str, mut condition: F) -> Result<()>
    where
        F: FnMut() -> Result<bool>,
    {
        let deadline = Instant::now() + self.timeout;
        loop {
            match condition() {
                Ok(false) => return Ok(()),
                Ok(true) => {}
                Err(e) if e.is_no_such_element() => return Ok(()),
                Err(e) => return Err(e),
            }
            if Instant::now() >= deadline {
                return Err(self.timed_out(waiting_for));
            }
            trace!(waiting_for, "condition still holds, polling again");
            thread::sleep(self.poll_interval);
        }
    }

    fn timed_out(&self, waiting_for: &str) -> FuncTestError {
        FuncTestError::Timeout {
            waiting_for: waiting_for.to_string(),
            timeout: self.timeout,
        }
    }
}

/// Find `by` at the session root or below `scope`.
fn locate(session: &WindowsSession, scope: Option<&Element>, by: &By) -> Result<Element> {
    match scope {
        Some(parent) => session.find_element_from(parent, by),
        None => session.find_element(by),
    }
}

/// Condition: an element matching `by` exists.
pub fn presence_of<'a>(
    session: &'a WindowsSession,
    scope: Option<&'a Element>,
    by: &'a By,
) -> impl FnMut() -> Result<Option<Element>> + 'a {
    move || locate(session, scope, by).map(Some)
}

/// Condition: an element matching `by` exists and is displayed.
pub fn visibility_of<'a>(
    session: &'a WindowsSession,
    scope: Option<&'a Element>,
    by: &'a By,
) -> impl FnMut() -> Result<Option<Element>> + 'a {
    move || {
        let element = locate(session, scope, by)?;
        Ok(session.is_displayed(&element)?.then_some(element))
    }
}

/// Condition for [`Wait::until_not`]: an element matching `by` is displayed.
pub fn is_visible<'a>(
    session: &'a WindowsSession,
    scope: Option<&'a Element>,
    by: &'a By,
) -> impl FnMut() -> Result<bool> + 'a {
    move || {
        let element = locate(session, scope, by)?;
        session.is_displayed(&element)
    }
}
