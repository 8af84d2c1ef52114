//! Functional UI tests for the Sakura Editor tray menu.
//!
//! Tests drive the Windows desktop through an Appium server speaking the
//! W3C WebDriver protocol: open the tray icon's context menu, pick an entry,
//! wait for the dialog it opens and cancel it.

pub mod appium;
pub mod cli;
pub mod desktop;
pub mod error;
pub mod fixture;
pub mod report;
pub mod scenario;
pub mod trace;
pub mod wait;

pub use error::{FuncTestError, Result};
