//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use errand_core::{ApiError, Errand, ErrandClient, ErrandPatch, HttpMethod, HttpRequest, HttpResponse, NewErrand};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ErrandClient {
    ErrandClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn load(raw: &str) -> Vec<serde_json::Value> {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Compare method, URL and (when present) headers and JSON body.
fn check_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let pair = h.as_array().unwrap();
                (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let actual: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

/// Check an error against `{"kind": ..., "message"?: ..., "status"?: ...}`.
fn check_error(name: &str, err: ApiError, expected: &serde_json::Value) {
    match (expected["kind"].as_str().unwrap(), err) {
        ("Rejected", ApiError::Rejected { message, .. }) => {
            assert_eq!(message.as_deref(), expected["message"].as_str(), "{name}: message");
        }
        ("MissingData", ApiError::MissingData) => {}
        ("Http", ApiError::Http { status, .. }) => {
            assert_eq!(u64::from(status), expected["status"].as_u64().unwrap(), "{name}: status");
        }
        (kind, other) => panic!("{name}: expected {kind}, got {other:?}"),
    }
}

fn check_errand(name: &str, result: Result<Errand, ApiError>, case: &serde_json::Value) {
    match case.get("expected_error") {
        Some(expected) => check_error(name, result.unwrap_err(), expected),
        None => {
            let expected: Errand = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        check_request(name, &c.build_list_errands(), &case["expected_request"]);

        let result = c.parse_list_errands(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Vec<Errand> = serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        check_request(name, &c.build_get_errand(id).unwrap(), &case["expected_request"]);
        check_errand(name, c.parse_get_errand(simulated(&case)), &case);
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: NewErrand = serde_json::from_value(case["input"].clone()).unwrap();
        check_request(name, &c.build_create_errand(&input).unwrap(), &case["expected_request"]);
        check_errand(name, c.parse_create_errand(simulated(&case)), &case);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let patch: ErrandPatch = serde_json::from_value(case["input"].clone()).unwrap();
        check_request(name, &c.build_update_errand(id, &patch).unwrap(), &case["expected_request"]);
        check_errand(name, c.parse_update_errand(simulated(&case)), &case);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        check_request(name, &c.build_delete_errand(id).unwrap(), &case["expected_request"]);

        let result = c.parse_delete_errand(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}
