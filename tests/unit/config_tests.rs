use std::io::Write as _;

use login_contract::config::GlobalConfig;
use login_contract::AppError;

fn sample_toml() -> String {
    r#"
login_url = "http://localhost:12345/api/oauth2/token"

[credentials]
app_id = "9ab34d8b"
app_key = "7a950d78956ed39f3b0815f0f001b43b"
username = "pass1234"
password = "1234"

[mock]
admin_url = "http://localhost:12345/expectation"
id = "user-1"
access_token = "tok"
expires_in = 60
token_type = "Bearer"
"#
    .to_owned()
}

fn minimal_toml() -> String {
    r#"
login_url = "https://api-jp.kii.com/api/oauth2/token"

[credentials]
app_id = "9ab34d8b"
username = "pass1234"
"#
    .to_owned()
}

fn assert_config_err(raw: &str, needle: &str) {
    match GlobalConfig::from_toml_str(raw) {
        Err(AppError::Config(msg)) => assert!(msg.contains(needle), "got: {msg}"),
        other => panic!("expected config error containing {needle:?}, got {other:?}"),
    }
}

#[test]
fn parses_valid_config() {
    let config = GlobalConfig::from_toml_str(&sample_toml()).expect("config parses");

    assert_eq!(config.login_url, "http://localhost:12345/api/oauth2/token");
    assert_eq!(config.credentials.app_id, "9ab34d8b");
    let mock = config.mock.as_ref().expect("mock section");
    assert_eq!(mock.admin_url, "http://localhost:12345/expectation");
    assert_eq!(mock.canned_login().id, "user-1");
    assert_eq!(mock.canned_login().expires_in, 60);
}

#[test]
fn minimal_config_has_no_mock_and_no_secrets() {
    let config = GlobalConfig::from_toml_str(&minimal_toml()).expect("config parses");

    assert!(config.mock.is_none());
    assert!(config.credentials.app_key.is_empty());
    assert!(config.credentials.password.is_empty());
}

#[test]
fn mock_canned_fields_default() {
    let raw = format!("{}\n[mock]\nadmin_url = \"http://localhost:1/expectation\"\n", minimal_toml());

    let config = GlobalConfig::from_toml_str(&raw).expect("config parses");
    let canned = config.mock.expect("mock").canned_login();

    assert_eq!(canned.id, "dummyID");
    assert_eq!(canned.access_token, "dummyToken");
    assert_eq!(canned.expires_in, 86_400);
    assert_eq!(canned.token_type, "Bearer");
}

#[test]
fn credentials_require_loaded_secrets() {
    let config = GlobalConfig::from_toml_str(&minimal_toml()).expect("config parses");

    let err = config.credentials().expect_err("secrets missing");

    assert!(err.to_string().contains("app_key"), "got: {err}");
}

#[test]
fn credentials_from_file_values() {
    let config = GlobalConfig::from_toml_str(&sample_toml()).expect("config parses");

    let creds = config.credentials().expect("complete");

    assert_eq!(creds.app_key, "7a950d78956ed39f3b0815f0f001b43b");
    assert_eq!(creds.password, "1234");
}

#[test]
fn login_endpoint_is_parsed() {
    let config = GlobalConfig::from_toml_str(&sample_toml()).expect("config parses");

    let url = config.login_endpoint().expect("url");

    assert_eq!(url.path(), "/api/oauth2/token");
    assert_eq!(url.port(), Some(12345));
}

#[test]
fn rejects_relative_login_url() {
    let raw = minimal_toml().replace("https://api-jp.kii.com/api/oauth2/token", "/api/oauth2/token");
    assert_config_err(&raw, "login_url");
}

#[test]
fn rejects_non_http_login_url() {
    let raw = minimal_toml().replace("https://", "ftp://");
    assert_config_err(&raw, "http or https");
}

#[test]
fn rejects_login_url_with_query() {
    let raw = minimal_toml().replace("/oauth2/token", "/oauth2/token?x=1");
    assert_config_err(&raw, "query string");
}

#[test]
fn rejects_empty_app_id() {
    let raw = minimal_toml().replace("app_id = \"9ab34d8b\"", "app_id = \"\"");
    assert_config_err(&raw, "app_id");
}

#[test]
fn rejects_empty_username() {
    let raw = minimal_toml().replace("username = \"pass1234\"", "username = \"\"");
    assert_config_err(&raw, "username");
}

#[test]
fn rejects_zero_mock_expiry() {
    let raw = sample_toml().replace("expires_in = 60", "expires_in = 0");
    assert_config_err(&raw, "expires_in");
}

#[test]
fn rejects_bad_admin_url() {
    let raw = sample_toml().replace("http://localhost:12345/expectation", "not a url");
    assert_config_err(&raw, "mock.admin_url");
}

#[test]
fn rejects_missing_credentials_section() {
    let raw = "login_url = \"https://api-jp.kii.com/api/oauth2/token\"\n";
    assert_config_err(raw, "invalid config");
}

#[test]
fn load_from_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(sample_toml().as_bytes()).expect("write");

    let config = GlobalConfig::load_from_path(file.path()).expect("loads");

    assert!(config.mock.is_some());
}

#[test]
fn load_from_missing_path_is_config_error() {
    let temp = tempfile::tempdir().expect("tempdir");

    let err = GlobalConfig::load_from_path(temp.path().join("absent.toml"))
        .expect_err("file does not exist");

    assert!(err.to_string().starts_with("config: failed to read config"));
}
