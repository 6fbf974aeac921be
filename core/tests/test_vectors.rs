//! Drive the typed wrappers against JSON test vectors stored in `test-vectors/`.
//!
//! Each case names an endpoint action and its parameters, the request the
//! client must build, a simulated HTTP response, and either the expected
//! projection (as JSON) or the expected error. Projections are compared as
//! `serde_json::Value` so field order never matters.

use std::cell::RefCell;
use std::rc::Rc;

use docsvault_core::{
    ApiError, DocsvaultClient, Endpoint, ErrorKind, HttpMethod, HttpRequest, HttpResponse, Transport,
    TransportError,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

type Reply = Result<HttpResponse, TransportError>;

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

/// Client that answers with `response` and records the request it was sent.
fn canned_client(response: HttpResponse) -> (DocsvaultClient<impl Transport>, Rc<RefCell<Option<HttpRequest>>>) {
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let client = DocsvaultClient::with_transport(BASE_URL, move |req: &HttpRequest| -> Reply {
        *sink.borrow_mut() = Some(req.clone());
        Ok(response.clone())
    });
    (client, seen)
}

fn to_json<T: serde::Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap()
}

fn param<'a>(params: &'a Value, name: &str) -> &'a str {
    params[name].as_str().unwrap_or_default()
}

/// Call the typed wrapper for `endpoint` and serialize what it returns.
fn dispatch<T: Transport>(
    client: &DocsvaultClient<T>,
    endpoint: Endpoint,
    params: &Value,
) -> Result<Value, ApiError> {
    let p = |name: &str| param(params, name);
    let token = p("TokenID");
    Ok(match endpoint {
        Endpoint::Login => to_json(client.login(p("UserName"), p("Password"))?),
        Endpoint::LoginPost => to_json(client.login_post(p("UserName"), p("Password"))?),
        Endpoint::Logout => to_json(client.logout(token, p("UserName"))?),
        Endpoint::GetLoginUserId => to_json(client.get_login_user_id(token)?),
        Endpoint::GetUserDetailsByName => to_json(client.get_user_details_by_name(token, p("UserName"))?),
        Endpoint::GetUserDetailsById => to_json(client.get_user_details_by_id(token, p("UserID"))?),
        Endpoint::GetUserDetailsByEmail => to_json(client.get_user_details_by_email(token, p("EmailID"))?),
        Endpoint::GetReadonlyUsers => to_json(client.get_readonly_users(token)?),
        Endpoint::GetWebAccessUsers => to_json(client.get_webaccess_users(token)?),
        Endpoint::GetUserGroups => to_json(client.get_user_groups(token, p("UserID"))?),
        Endpoint::GetConnectedUsers => to_json(client.get_connected_users(token)?),
        Endpoint::GetFileDetailsById => to_json(client.get_file_details(token, p("FileID"))?),
        Endpoint::GetFileDetailsByLocation => to_json(client.get_file_details_by_location(token, p("Location"))?),
        Endpoint::GetFileProfile => to_json(client.get_file_profile(token, p("FileID"))?),
        Endpoint::GetCheckedOutFilesByUser => to_json(client.get_checked_out_files_by_user(token, p("UserID"))?),
        Endpoint::GetFileVersions => to_json(client.get_file_versions(token, p("FileID"))?),
        Endpoint::GetFileRelations => to_json(client.get_file_relations(token, p("FileID"))?),
        Endpoint::GetFolderDetailsById => to_json(client.get_folder_details_by_id(token, p("FolderID"))?),
        Endpoint::GetFolderDetailsByLocation => {
            to_json(client.get_folder_details_by_location(token, p("Location"))?)
        }
        Endpoint::GetFolderProfile => to_json(client.get_folder_profile(token, p("FolderID"))?),
        Endpoint::GetFolderRelations => to_json(client.get_folder_relations(token, p("FolderID"))?),
    })
}

fn run_vectors(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let action = case["operation"].as_str().unwrap();
        let endpoint = Endpoint::from_action(action).unwrap_or_else(|| panic!("{name}: unknown action {action}"));

        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let (client, seen) = canned_client(response);

        let outcome = dispatch(&client, endpoint, &case["params"]);

        // Verify build
        let req = seen.borrow().clone().unwrap_or_else(|| panic!("{name}: no request sent"));
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        for (key, value) in expected_req["query"].as_object().unwrap() {
            assert_eq!(req.param(key), value.as_str(), "{name}: query {key}");
        }
        assert_eq!(req.query.len(), expected_req["query"].as_object().unwrap().len(), "{name}: query size");

        // Verify parse
        match (outcome, case.get("expected_error")) {
            (Ok(actual), None) => assert_eq!(actual, case["expected_result"], "{name}: result"),
            (Err(err), Some(expected)) => {
                let kind = match err.kind() {
                    ErrorKind::Transport => "transport",
                    ErrorKind::Application => "application",
                };
                assert_eq!(kind, expected["kind"].as_str().unwrap(), "{name}: error kind");
                assert_eq!(err.to_string(), expected["message"].as_str().unwrap(), "{name}: error message");
            }
            (Ok(actual), Some(_)) => panic!("{name}: expected an error, got {actual}"),
            (Err(err), None) => panic!("{name}: unexpected error: {err}"),
        }
    }
}

#[test]
fn session_test_vectors() {
    run_vectors(include_str!("../../test-vectors/session.json"));
}

#[test]
fn user_test_vectors() {
    run_vectors(include_str!("../../test-vectors/users.json"));
}

#[test]
fn file_test_vectors() {
    run_vectors(include_str!("../../test-vectors/files.json"));
}

#[test]
fn folder_test_vectors() {
    run_vectors(include_str!("../../test-vectors/folders.json"));
}
