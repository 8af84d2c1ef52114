#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{Value, json};

pub const SESSION_ID: &str = "s1";
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

pub fn element_json(id: &str) -> String {
    json!({ "value": { ELEMENT_KEY: id } }).to_string()
}

pub fn value_json(value: Value) -> String {
    json!({ "value": value }).to_string()
}

pub fn no_such_element_json() -> String {
    json!({
        "value": {
            "error": "no such element",
            "message": "An element could not be located on the page using the given search parameters."
        }
    })
    .to_string()
}

pub fn session_path(path: &str) -> String {
    format!("/session/{}{}", SESSION_ID, path)
}

/// `POST /session` answering with session `s1`.
pub fn mock_new_session(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/session")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!({
            "sessionId": SESSION_ID,
            "capabilities": { "platformName": "Windows" }
        })))
        .create()
}

/// `POST /session/s1/element` for the desktop root, answering `desk`.
pub fn mock_desktop(server: &mut ServerGuard) -> Mock {
    mock_find(server, "/element", "class name", "#32769", "desk")
}

/// A find-element mock that only matches one strategy/value pair.
pub fn mock_find(
    server: &mut ServerGuard,
    path: &str,
    using: &str,
    value: &str,
    element_id: &str,
) -> Mock {
    server
        .mock("POST", session_path(path).as_str())
        .match_body(Matcher::PartialJson(json!({ "using": using, "value": value })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(element_json(element_id))
        .create()
}

/// A find-element mock answering 404 "no such element".
pub fn mock_find_missing(server: &mut ServerGuard, path: &str, using: &str, value: &str) -> Mock {
    server
        .mock("POST", session_path(path).as_str())
        .match_body(Matcher::PartialJson(json!({ "using": using, "value": value })))
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(no_such_element_json())
        .create()
}

pub fn mock_displayed(server: &mut ServerGuard, element_id: &str, displayed: bool) -> Mock {
    server
        .mock(
            "GET",
            session_path(&format!("/element/{}/displayed", element_id)).as_str(),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(json!(displayed)))
        .create()
}

/// Any POST answering `{"value": null}`.
pub fn mock_post_ok(server: &mut ServerGuard, path: &str) -> Mock {
    server
        .mock("POST", session_path(path).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(Value::Null))
        .create()
}

pub fn mock_delete_session(server: &mut ServerGuard) -> Mock {
    server
        .mock("DELETE", session_path("").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(value_json(Value::Null))
        .create()
}
