//! Element-location helpers shared by the tray-menu scenarios.
//!
//! Every helper is a thin sequence of driver commands. Waiting goes
//! through [`Wait`] so timeouts are uniform across steps.

use tracing::{debug, info};

use crate::appium::keys;
use crate::appium::locator::{By, xpath_literal};
use crate::appium::protocol::{Element, MouseButton};
use crate::appium::session::WindowsSession;
use crate::desktop::screen::{Point, ScreenMetrics, click_point};
use crate::error::Result;
use crate::wait::{Wait, is_visible, presence_of, visibility_of};

/// Window class of the desktop root element.
pub const DESKTOP_CLASS: &str = "#32769";

/// Window class shared by standard Win32 dialogs.
pub const DIALOG_CLASS: &str = "#32770";

/// Control id of a dialog's Cancel button (IDCANCEL).
pub const CANCEL_AUTOMATION_ID: &str = "2";

pub fn tray_button_locator(icon_name: &str) -> By {
    By::xpath(format!(
        "//Button[contains(@Name, {})]",
        xpath_literal(icon_name)
    ))
}

/// Menu items expose their command id through AutomationId
/// (`31110` or `Item 31110` depending on the OS build).
pub fn menu_item_locator(command_id: &str) -> By {
    By::xpath(format!(
        "//MenuItem[contains(@AutomationId, {})]",
        xpath_literal(command_id)
    ))
}

pub fn dialog_title_locator(title: &str) -> By {
    By::xpath(format!("//Window[@Name={}]", xpath_literal(title)))
}

/// Locate the desktop root element.
pub fn find_desktop(session: &WindowsSession) -> Result<Element> {
    session.find_element(&By::class_name(DESKTOP_CLASS))
}

/// Focus the notification area (Win+B), expand it (Enter) and wait for the
/// application's tray button to become visible.
pub fn open_tray_icon(
    session: &WindowsSession,
    desktop: &Element,
    icon_name: &str,
    wait: &Wait,
) -> Result<Element> {
    session.send_keys(desktop, &keys::chord(&[keys::COMMAND], "b"))?;
    session.send_keys(desktop, &keys::ENTER.to_string())?;

    let by = tray_button_locator(icon_name);
    let icon = wait.until(
        &format!("tray icon {}", by),
        visibility_of(session, Some(desktop), &by),
    )?;
    debug!(element = %icon.id, "tray icon visible");
    Ok(icon)
}

/// Right-click the center of `element` by absolute screen coordinates.
///
/// Tray buttons ignore element-level clicks for the context menu, so the
/// click is synthesized at the OS level.
pub fn context_click(
    session: &WindowsSession,
    element: &Element,
    metrics: &dyn ScreenMetrics,
) -> Result<Point> {
    let rect = session.rect(element)?;
    let point = click_point(&rect, metrics.virtual_origin());
    session.windows_click(point.x, point.y, MouseButton::Right)?;
    info!(x = point.x, y = point.y, "context click");
    Ok(point)
}

/// Wait for the context-menu item bound to `command_id`.
pub fn wait_for_context_menu(
    session: &WindowsSession,
    desktop: &Element,
    command_id: &str,
    wait: &Wait,
) -> Result<Element> {
    let by = menu_item_locator(command_id);
    wait.until(
        &format!("menu item {}", command_id),
        visibility_of(session, Some(desktop), &by),
    )
}

/// Wait until `element` is no longer visible under `desktop`.
pub fn wait_until_gone(
    session: &WindowsSession,
    desktop: &Element,
    element: &Element,
    wait: &Wait,
) -> Result<()> {
    let by = By::id(element.id.clone());
    wait.until_not(
        &format!("element {} to disappear", element.id),
        is_visible(session, Some(desktop), &by),
    )
}

/// Wait for a visible top-level window titled `title`.
pub fn wait_for_dialog(
    session: &WindowsSession,
    desktop: &Element,
    title: &str,
    wait: &Wait,
) -> Result<Element> {
    let by = dialog_title_locator(title);
    wait.until(
        &format!("dialog '{}'", title),
        visibility_of(session, Some(desktop), &by),
    )
}

/// Wait for any element of window class `class_name` under the session root.
pub fn wait_for_dialog_class(
    session: &WindowsSession,
    class_name: &str,
    wait: &Wait,
) -> Result<Element> {
    let by = By::class_name(class_name);
    wait.until(
        &format!("window of class {}", class_name),
        presence_of(session, None, &by),
    )
}

/// Dismiss `dialog` through its Cancel button, or Escape if it has none,
/// then wait for it to close.
pub fn cancel_element(
    session: &WindowsSession,
    desktop: &Element,
    dialog: &Element,
    wait: &Wait,
) -> Result<()> {
    let buttons =
        session.find_elements_from(dialog, &By::accessibility_id(CANCEL_AUTOMATION_ID))?;
    match buttons.first() {
        Some(cancel) => session.click(cancel)?,
        None => {
            debug!(dialog = %dialog.id, "no cancel button, sending escape");
            session.send_keys(dialog, &keys::ESCAPE.to_string())?;
        }
    }
    wait_until_gone(session, desktop, dialog, wait)
}
