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

/// Returns a map with all required env vars populated with valid values.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SHOPIFY_SHOP", "acme");
    m.insert("SHOPIFY_ADMIN_TOKEN", "shpat_test");
    m.insert("SHOPIFY_API_VERSION", "2024-10");
    m
}

#[test]
fn build_import_config_reports_every_missing_var() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_import_config(lookup_from_map(&map));
    match result {
        Err(ConfigError::MissingEnvVars(vars)) => assert_eq!(
            vars,
            vec!["SHOPIFY_SHOP", "SHOPIFY_ADMIN_TOKEN", "SHOPIFY_API_VERSION"]
        ),
        other => panic!("expected MissingEnvVars, got: {other:?}"),
    }
}

#[test]
fn build_import_config_treats_blank_value_as_missing() {
    let mut map = full_env();
    map.insert("SHOPIFY_ADMIN_TOKEN", "   ");
    let result = build_import_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVars(ref v)) if v == &["SHOPIFY_ADMIN_TOKEN"]),
        "expected MissingEnvVars(SHOPIFY_ADMIN_TOKEN), got: {result:?}"
    );
}

#[test]
fn missing_env_vars_message_names_all_vars() {
    let err = ConfigError::MissingEnvVars(vec!["SHOPIFY_SHOP".into(), "SHOPIFY_API_VERSION".into()]);
    assert_eq!(
        err.to_string(),
        "missing env vars: SHOPIFY_SHOP, SHOPIFY_API_VERSION"
    );
}

#[test]
fn build_import_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_import_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.shop, "acme");
    assert_eq!(cfg.access_token, "shpat_test");
    assert_eq!(cfg.api_version, "2024-10");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "shopload/0.1 (catalog-import)");
    assert_eq!(cfg.max_attempts, 5);
    assert_eq!(cfg.backoff_base_secs, 1);
    assert_eq!(cfg.backoff_cap_secs, 16);
}

#[test]
fn build_import_config_trims_required_values() {
    let mut map = full_env();
    map.insert("SHOPIFY_SHOP", "  acme \n");
    let cfg = build_import_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.shop, "acme");
}

#[test]
fn build_import_config_applies_overrides() {
    let mut map = full_env();
    map.insert("SHOPLOAD_LOG_LEVEL", "debug");
    map.insert("SHOPLOAD_MAX_ATTEMPTS", "3");
    map.insert("SHOPLOAD_BACKOFF_CAP_SECS", "8");
    let cfg = build_import_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.max_attempts, 3);
    assert_eq!(cfg.backoff_cap_secs, 8);
}

#[test]
fn build_import_config_rejects_non_numeric_timeout() {
    let mut map = full_env();
    map.insert("SHOPLOAD_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_import_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPLOAD_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SHOPLOAD_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_import_config_rejects_zero_attempts() {
    let mut map = full_env();
    map.insert("SHOPLOAD_MAX_ATTEMPTS", "0");
    let result = build_import_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPLOAD_MAX_ATTEMPTS"),
        "expected InvalidEnvVar(SHOPLOAD_MAX_ATTEMPTS), got: {result:?}"
    );
}
