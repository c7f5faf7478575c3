//! Contract tests for the login request and response wire formats.

use login_contract::models::credentials::{
    LoginCredentials, APP_ID_HEADER, APP_KEY_HEADER, JSON_CONTENT_TYPE,
};
use login_contract::models::login::LoginResponse;
use login_contract::LoginError;
use serde_json::json;

#[test]
fn header_names_are_lowercase_kii_headers() {
    assert_eq!(APP_ID_HEADER, "x-kii-appid");
    assert_eq!(APP_KEY_HEADER, "x-kii-appkey");
    assert_eq!(JSON_CONTENT_TYPE, "application/json");
}

#[test]
fn request_body_has_only_username_and_password() {
    let creds = LoginCredentials::new("app", "key", "pass1234", "1234");

    let body = serde_json::to_value(creds.body()).expect("encodes");

    assert_eq!(body, json!({ "username": "pass1234", "password": "1234" }));
}

#[test]
fn response_maps_underscore_wire_names() {
    let body = br#"{"id":"u1","access_token":"tok","expires_in":3600,"token_type":"Bearer"}"#;

    let login = LoginResponse::from_body(body).expect("valid");

    assert_eq!(login.id, "u1");
    assert_eq!(login.access_token, "tok");
    assert!((login.expires_in - 3600.0).abs() < f64::EPSILON);
    assert_eq!(login.token_type, "Bearer");
}

#[test]
fn camel_case_wire_names_are_not_accepted() {
    let body = br#"{"id":"u1","accessToken":"tok","expiresIn":3600,"tokenType":"Bearer"}"#;

    let err = LoginResponse::from_body(body).expect_err("camelCase is not the wire form");

    assert_eq!(err.violated_field(), Some("accessToken"));
}

#[test]
fn fractional_expiry_is_accepted() {
    let body = br#"{"id":"u1","access_token":"tok","expires_in":0.5,"token_type":"Bearer"}"#;

    assert!(LoginResponse::from_body(body).is_ok());
}

#[test]
fn extra_fields_are_ignored() {
    let body = br#"{"id":"u1","access_token":"tok","expires_in":10,"token_type":"Bearer","refresh_token":"r"}"#;

    assert!(LoginResponse::from_body(body).is_ok());
}

#[test]
fn empty_id_is_violation() {
    let body = br#"{"id":"","access_token":"tok","expires_in":10,"token_type":"Bearer"}"#;

    let err = LoginResponse::from_body(body).expect_err("empty id");

    assert_eq!(err.violated_field(), Some("id"));
}

#[test]
fn json_string_is_malformed() {
    let err = LoginResponse::from_body(br#""token""#).expect_err("not an object");

    assert!(matches!(err, LoginError::MalformedBody(_)));
}

#[test]
fn empty_body_is_malformed() {
    let err = LoginResponse::from_body(b"").expect_err("empty");

    assert!(matches!(err, LoginError::MalformedBody(_)));
}

#[test]
fn null_access_token_is_violation() {
    let body = br#"{"id":"x","access_token":null,"expires_in":10,"token_type":"Bearer"}"#;

    let err = LoginResponse::from_body(body).expect_err("null token");

    assert_eq!(err.violated_field(), Some("accessToken"));
}

#[test]
fn null_fields_are_reported_in_field_order() {
    let cases: [(&[u8], &str); 3] = [
        (
            br#"{"id":null,"access_token":"t","expires_in":10,"token_type":"Bearer"}"#,
            "id",
        ),
        (
            br#"{"id":"x","access_token":"t","expires_in":null,"token_type":"Bearer"}"#,
            "expiresIn",
        ),
        (
            br#"{"id":"x","access_token":"t","expires_in":10,"token_type":null}"#,
            "tokenType",
        ),
    ];

    for (body, field) in cases {
        let err = LoginResponse::from_body(body).expect_err("null field");
        assert_eq!(err.violated_field(), Some(field), "body: {}", String::from_utf8_lossy(body));
    }
}
