use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("MERCATO_API_URL", "https://shop.example.com");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "MERCATO_ENV"));
}

#[test]
fn build_app_config_fails_without_api_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "MERCATO_API_URL"),
        "expected MissingEnvVar(MERCATO_API_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_url_as_missing() {
    let mut map = full_env();
    map.insert("MERCATO_API_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_rejects_non_http_api_url() {
    let mut map = full_env();
    map.insert("MERCATO_API_URL", "ftp://shop.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MERCATO_API_URL"),
        "expected InvalidEnvVar(MERCATO_API_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.api_url, "https://shop.example.com");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.api_token.is_none());
    assert_eq!(cfg.login_route, "/login");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "mercato/0.1 (storefront)");
    assert_eq!(cfg.page_size, 12);
}

#[test]
fn build_app_config_strips_trailing_slash_from_api_url() {
    let mut map = full_env();
    map.insert("MERCATO_API_URL", "https://shop.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_url, "https://shop.example.com");
}

#[test]
fn build_app_config_reads_api_token() {
    let mut map = full_env();
    map.insert("MERCATO_API_TOKEN", "secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_token.as_deref(), Some("secret-token"));
}

#[test]
fn build_app_config_ignores_blank_api_token() {
    let mut map = full_env();
    map.insert("MERCATO_API_TOKEN", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.api_token.is_none());
}

#[test]
fn debug_output_redacts_api_token() {
    let mut map = full_env();
    map.insert("MERCATO_API_TOKEN", "secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("MERCATO_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("MERCATO_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MERCATO_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(MERCATO_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn page_size_override() {
    let mut map = full_env();
    map.insert("MERCATO_PAGE_SIZE", "24");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.page_size, 24);
}

#[test]
fn page_size_zero_is_rejected() {
    let mut map = full_env();
    map.insert("MERCATO_PAGE_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MERCATO_PAGE_SIZE"),
        "expected InvalidEnvVar(MERCATO_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn login_route_and_user_agent_overrides() {
    let mut map = full_env();
    map.insert("MERCATO_LOGIN_ROUTE", "/pos/login");
    map.insert("MERCATO_USER_AGENT", "mercato-pos/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.login_route, "/pos/login");
    assert_eq!(cfg.user_agent, "mercato-pos/2.0");
}

#[test]
fn load_app_config_reads_the_same_environment_as_from_env() {
    let loaded = load_app_config();
    let from_env = load_app_config_from_env();
    match (loaded, from_env) {
        (Ok(a), Ok(b)) => assert_eq!(a.api_url, b.api_url),
        (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
        (a, b) => panic!("loaders disagree: {a:?} vs {b:?}"),
    }
}
