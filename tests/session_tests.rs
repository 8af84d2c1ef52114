mod common;

use mockito::Matcher;
use serde_json::json;

use common::*;
use sakura_functests::appium::keys;
use sakura_functests::appium::locator::By;
use sakura_functests::appium::protocol::{Capabilities, Element, MouseButton, Rect};
use sakura_functests::appium::session::WindowsSession;
use sakura_functests::error::FuncTestError;

fn open(server: &mut mockito::ServerGuard) -> WindowsSession {
    let _mock = mock_new_session(server);
    WindowsSession::open(&server.url(), &Capabilities::windows("Root")).expect("session opens")
}

// =========================================================================
// Session lifecycle
// =========================================================================

#[test]
fn open_sends_windows_capabilities() {
    let mut server = mockito::Server::new();
    let create = server
        .mock("POST", "/session")
        .match_body(Matcher::PartialJson(json!({
            "capabilities": {
                "alwaysMatch": {
                    "platformName": "Windows",
                    "appium:automationName": "Windows",
                    "appium:app": "Root"
                }
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!({ "sessionId": "abc", "capabilities": {} })))
        .create();

    let session = WindowsSession::open(&server.url(), &Capabilities::windows("Root")).unwrap();

    create.assert();
    assert_eq!(session.id(), "abc");
    assert!(!session.is_closed());
}

#[test]
fn open_trims_trailing_slash_from_base_url() {
    let mut server = mockito::Server::new();
    let _mock = mock_new_session(&mut server);

    let url = format!("{}/", server.url());
    let session = WindowsSession::open(&url, &Capabilities::windows("Root")).unwrap();

    assert_eq!(session.base_url(), server.url());
}

#[test]
fn open_reports_session_not_created() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/session")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!({
            "error": "session not created",
            "message": "Failed to locate opened application window"
        })))
        .create();

    let err = WindowsSession::open(&server.url(), &Capabilities::windows("Root"))
        .err()
        .expect("open must fail");

    match err {
        FuncTestError::WebDriver { command, error, message } => {
            assert_eq!(command, "new session");
            assert_eq!(error, "session not created");
            assert!(message.contains("application window"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn quit_deletes_session_once() {
    let mut server = mockito::Server::new();
    let mut session = open(&mut server);
    let delete = server
        .mock("DELETE", session_path("").as_str())
        .with_status(200)
        .with_body(value_json(json!(null)))
        .expect(1)
        .create();

    session.quit().unwrap();
    session.quit().unwrap();
    drop(session);

    delete.assert();
}

#[test]
fn drop_closes_open_session() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let delete = server
        .mock("DELETE", session_path("").as_str())
        .with_status(200)
        .with_body(value_json(json!(null)))
        .expect(1)
        .create();

    drop(session);

    delete.assert();
}

// =========================================================================
// Element queries
// =========================================================================

#[test]
fn find_element_uses_strategy_and_value() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let find = mock_find(&mut server, "/element", "class name", "#32769", "desk");

    let desktop = session.find_element(&By::class_name("#32769")).unwrap();

    find.assert();
    assert_eq!(desktop, Element::new("desk"));
}

#[test]
fn find_element_accepts_legacy_reference_key() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let _mock = server
        .mock("POST", session_path("/element").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!({ "ELEMENT": "42.1.2" })))
        .create();

    let element = session.find_element(&By::name("OK")).unwrap();

    assert_eq!(element.id, "42.1.2");
}

#[test]
fn find_element_from_scopes_to_parent() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let find = mock_find(&mut server, "/element/desk/element", "accessibility id", "2", "cancel");

    let cancel = session
        .find_element_from(&Element::new("desk"), &By::accessibility_id("2"))
        .unwrap();

    find.assert();
    assert_eq!(cancel.id, "cancel");
}

#[test]
fn missing_element_is_classified() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let _mock = mock_find_missing(&mut server, "/element", "xpath", "//Nothing");

    let err = session.find_element(&By::xpath("//Nothing")).unwrap_err();

    assert!(err.is_no_such_element());
    assert!(!err.is_timeout());
}

#[test]
fn find_elements_returns_empty_vec_when_none_match() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let _mock = server
        .mock("POST", session_path("/element/dlg/elements").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!([])))
        .create();

    let found = session
        .find_elements_from(&Element::new("dlg"), &By::accessibility_id("2"))
        .unwrap();

    assert!(found.is_empty());
}

#[test]
fn find_elements_collects_every_reference() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let find = server
        .mock("POST", session_path("/elements").as_str())
        .match_body(Matcher::Json(json!({
            "using": "xpath",
            "value": "//MenuItem"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!([
            { ELEMENT_KEY: "m1" },
            { "ELEMENT": "m2" },
            { "unexpected": "m3" }
        ])))
        .create();

    let found = session.find_elements(&By::xpath("//MenuItem")).unwrap();

    find.assert();
    let ids: Vec<_> = found.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["m1", "m2"]);
}

#[test]
fn find_elements_rejects_non_array_value() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let _mock = server
        .mock("POST", session_path("/elements").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!({ ELEMENT_KEY: "m1" })))
        .create();

    let err = session.find_elements(&By::xpath("//MenuItem")).unwrap_err();

    assert!(matches!(err, FuncTestError::MalformedResponse { .. }));
}

#[test]
fn text_reads_element_text() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let _mock = server
        .mock("GET", session_path("/element/item/text").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!("共通設定")))
        .create();
    let _mock = server
        .mock("GET", session_path("/element/blank/text").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!(null)))
        .create();

    assert_eq!(session.text(&Element::new("item")).unwrap(), "共通設定");
    assert_eq!(session.text(&Element::new("blank")).unwrap(), "");
}

#[test]
fn rect_rounds_fractional_coordinates() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let _mock = server
        .mock("GET", session_path("/element/tray/rect").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!({ "x": 100.0, "y": 199.6, "width": 40, "height": 30.2 })))
        .create();

    let rect = session.rect(&Element::new("tray")).unwrap();

    assert_eq!(
        rect,
        Rect {
            x: 100,
            y: 200,
            width: 40,
            height: 30
        }
    );
}

#[test]
fn is_displayed_rejects_non_boolean() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let _mock = server
        .mock("GET", session_path("/element/x/displayed").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!("yes")))
        .create();

    let err = session.is_displayed(&Element::new("x")).unwrap_err();

    assert!(matches!(err, FuncTestError::MalformedResponse { .. }));
}

#[test]
fn attribute_null_is_none() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let _mock = server
        .mock("GET", session_path("/element/x/attribute/HelpText").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!(null)))
        .create();
    let _mock = server
        .mock("GET", session_path("/element/x/attribute/Name").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!("共通設定")))
        .create();

    let x = Element::new("x");
    assert_eq!(session.attribute(&x, "HelpText").unwrap(), None);
    assert_eq!(session.attribute(&x, "Name").unwrap().as_deref(), Some("共通設定"));
}

// =========================================================================
// Input
// =========================================================================

#[test]
fn send_keys_posts_text_and_value_array() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let typed = keys::chord(&[keys::COMMAND], "b");
    let value = server
        .mock("POST", session_path("/element/desk/value").as_str())
        .match_body(Matcher::PartialJson(json!({
            "text": typed,
            "value": ["\u{E03D}", "b", "\u{E000}"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!(null)))
        .create();

    session.send_keys(&Element::new("desk"), &typed).unwrap();

    value.assert();
}

#[test]
fn windows_click_executes_extension_command() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let click = server
        .mock("POST", session_path("/execute/sync").as_str())
        .match_body(Matcher::Json(json!({
            "script": "windows: click",
            "args": [{ "x": 120, "y": 215, "button": "right" }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!(null)))
        .create();

    session.windows_click(120, 215, MouseButton::Right).unwrap();

    click.assert();
}

#[test]
fn non_json_error_body_keeps_http_status() {
    let mut server = mockito::Server::new();
    let session = open(&mut server);
    let _mock = server
        .mock("POST", session_path("/element/x/click").as_str())
        .with_status(502)
        .with_body("Bad Gateway")
        .create();

    let err = session.click(&Element::new("x")).unwrap_err();

    match err {
        FuncTestError::WebDriver { error, message, .. } => {
            assert_eq!(error, "http 502");
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("unexpected error: {other}"),
    }
}
