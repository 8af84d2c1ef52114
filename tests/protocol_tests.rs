use serde_json::json;

use sakura_functests::appium::keys;
use sakura_functests::appium::locator::{By, xpath_literal};
use sakura_functests::appium::protocol::{Capabilities, Element, MouseButton, WindowsClick};
use sakura_functests::desktop::helpers::{
    dialog_title_locator, menu_item_locator, tray_button_locator,
};

// ============================================================================
// Locators
// ============================================================================

#[test]
fn by_strategies_use_w3c_names() {
    assert_eq!(By::class_name("#32770").strategy(), "class name");
    assert_eq!(By::accessibility_id("2").strategy(), "accessibility id");
    assert_eq!(By::xpath("//Button").strategy(), "xpath");
    assert_eq!(By::id("42.1").value(), "42.1");
    assert_eq!(By::name("OK").to_string(), "name=\"OK\"");
}

#[test]
fn xpath_literal_picks_quotes() {
    assert_eq!(xpath_literal("サクラエディタ"), "\"サクラエディタ\"");
    assert_eq!(xpath_literal("say \"hi\""), "'say \"hi\"'");
    assert_eq!(
        xpath_literal("it's \"x\""),
        "concat(\"it's \", '\"', \"x\", '\"', \"\")"
    );
}

#[test]
fn tray_locators() {
    assert_eq!(
        tray_button_locator("サクラエディタ").value(),
        "//Button[contains(@Name, \"サクラエディタ\")]"
    );
    assert_eq!(
        menu_item_locator("31455").value(),
        "//MenuItem[contains(@AutomationId, \"31455\")]"
    );
    assert_eq!(
        dialog_title_locator("共通設定").value(),
        "//Window[@Name=\"共通設定\"]"
    );
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn chord_releases_modifiers_with_null() {
    assert_eq!(keys::chord(&[keys::COMMAND], "b"), "\u{E03D}b\u{E000}");
    assert_eq!(keys::chord(&[], "x"), "x\u{E000}");
}

// ============================================================================
// Capabilities and payloads
// ============================================================================

#[test]
fn new_session_body_for_desktop_root() {
    let body = Capabilities::windows("Root")
        .with("newCommandTimeout", json!(300))
        .with("ms:waitForAppLaunch", json!(5))
        .to_new_session_body();

    assert_eq!(
        body,
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "platformName": "Windows",
                    "appium:automationName": "Windows",
                    "appium:app": "Root",
                    "appium:newCommandTimeout": 300,
                    "ms:waitForAppLaunch": 5
                }
            }
        })
    );
}

#[test]
fn element_from_value_accepts_both_keys() {
    let w3c = json!({ "element-6066-11e4-a52e-4f735466cecf": "a" });
    let legacy = json!({ "ELEMENT": "b" });
    assert_eq!(Element::from_value(&w3c), Some(Element::new("a")));
    assert_eq!(Element::from_value(&legacy), Some(Element::new("b")));
    assert_eq!(Element::from_value(&json!({ "other": "c" })), None);
    assert_eq!(Element::from_value(&json!(null)), None);
}

#[test]
fn windows_click_serializes_lowercase_button() {
    let click = WindowsClick {
        x: -10,
        y: 20,
        button: MouseButton::Right,
    };
    assert_eq!(
        serde_json::to_value(click).unwrap(),
        json!({ "x": -10, "y": 20, "button": "right" })
    );
}
