//! Tests for the auth module

use super::*;

#[test]
fn test_no_auth() {
    let client = reqwest::Client::new();
    let req = AuthConfig::None.apply(client.post("https://example.com/v1/projects/p:runQuery"));

    let built = req.build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
    assert!(built.url().query().is_none());
}

#[test]
fn test_bearer_auth() {
    let client = reqwest::Client::new();
    let req = AuthConfig::bearer("ya29.token").apply(client.post("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer ya29.token"
    );
}

#[test]
fn test_api_key_query() {
    let client = reqwest::Client::new();
    let req = AuthConfig::api_key("secret123").apply(client.post("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(built.url().query(), Some("key=secret123"));
}

#[test]
fn test_auth_config_deserialize() {
    let auth: AuthConfig = serde_yaml::from_str("type: bearer\ntoken: abc").unwrap();
    assert_eq!(auth, AuthConfig::bearer("abc"));

    let auth: AuthConfig = serde_yaml::from_str("type: api_key\nkey: k").unwrap();
    assert_eq!(auth, AuthConfig::api_key("k"));

    let auth: AuthConfig = serde_yaml::from_str("type: none").unwrap();
    assert_eq!(auth, AuthConfig::None);
}

#[test]
fn test_auth_kind_hides_secret() {
    assert_eq!(AuthConfig::bearer("secret").kind(), "bearer");
    assert_eq!(AuthConfig::default().kind(), "none");
}
