//! Configuration module unit tests

use redactor::config::settings::{ClientSettings, ProviderKind, Settings};
use std::collections::HashMap;
use std::env;

/// Minimal valid provider environment plus `overrides`
fn lookup_with(overrides: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    let mut vars: HashMap<&'static str, &'static str> = [
        ("AZURE_OPENAI_ENDPOINT", "https://prensa.openai.azure.com"),
        ("AZURE_OPENAI_KEY", "0123456789abcdef"),
        ("AZURE_OPENAI_DEPLOYMENT", "gpt-4o-prensa"),
    ]
    .into_iter()
    .collect();

    for &(key, value) in overrides {
        vars.insert(key, value);
    }

    move |key: &str| vars.get(key).map(|v| v.to_string())
}

#[test]
fn test_default_values() {
    let settings = Settings::from_lookup(lookup_with(&[])).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 3001);
    assert_eq!(settings.provider.kind, ProviderKind::Azure);
    assert_eq!(settings.provider.endpoint, "https://prensa.openai.azure.com");
    assert_eq!(settings.provider.deployment, "gpt-4o-prensa");
    assert_eq!(settings.provider.api_version, "2024-06-01");
    assert_eq!(settings.provider.timeout, 60);
    assert_eq!(settings.generation.temperature, 0.7);
    assert_eq!(settings.generation.max_tokens, 800);
    assert_eq!(settings.request.max_request_size, 1048576);
    assert_eq!(settings.security.allowed_origins, vec!["*".to_string()]);
    assert!(settings.security.cors_enabled);
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.format, "text");
    assert_eq!(settings.listen_addr(), "0.0.0.0:3001");
}

#[test]
fn test_overrides_are_applied() {
    let settings = Settings::from_lookup(lookup_with(&[
        ("SERVER_HOST", "127.0.0.1"),
        ("PORT", "8080"),
        ("PROVIDER_KIND", "openai"),
        ("AZURE_OPENAI_ENDPOINT", "http://localhost:11434/v1"),
        ("GENERATION_TEMPERATURE", "0.2"),
        ("GENERATION_MAX_TOKENS", "1200"),
        ("ALLOWED_ORIGINS", "http://localhost:5173, https://prensa.gob.ar"),
        ("LOG_FORMAT", "json"),
    ]))
    .unwrap();

    assert_eq!(settings.listen_addr(), "127.0.0.1:8080");
    assert_eq!(settings.provider.kind, ProviderKind::OpenAi);
    assert_eq!(settings.generation.temperature, 0.2);
    assert_eq!(settings.generation.max_tokens, 1200);
    assert_eq!(
        settings.security.allowed_origins,
        vec!["http://localhost:5173".to_string(), "https://prensa.gob.ar".to_string()]
    );
    assert_eq!(settings.logging.format, "json");
}

#[test]
fn test_missing_provider_values_fail() {
    for key in ["AZURE_OPENAI_ENDPOINT", "AZURE_OPENAI_KEY", "AZURE_OPENAI_DEPLOYMENT"] {
        let base = lookup_with(&[]);
        let lookup = move |k: &str| if k == key { None } else { base(k) };

        let error = Settings::from_lookup(lookup).unwrap_err();
        assert!(error.to_string().contains(key), "unexpected error: {}", error);
    }
}

#[test]
fn test_blank_provider_value_fails() {
    let error = Settings::from_lookup(lookup_with(&[("AZURE_OPENAI_KEY", "   ")])).unwrap_err();
    assert!(error.to_string().contains("AZURE_OPENAI_KEY"));
}

#[test]
fn test_settings_validation_invalid_port() {
    let error = Settings::from_lookup(lookup_with(&[("PORT", "0")])).unwrap_err();
    assert!(error.to_string().contains("Port number cannot be 0"));
}

#[test]
fn test_settings_validation_invalid_endpoint() {
    let error =
        Settings::from_lookup(lookup_with(&[("AZURE_OPENAI_ENDPOINT", "prensa.openai.azure.com")]))
            .unwrap_err();
    assert!(error.to_string().contains("Invalid provider endpoint format"));
}

#[test]
fn test_settings_validation_invalid_temperature() {
    let error =
        Settings::from_lookup(lookup_with(&[("GENERATION_TEMPERATURE", "3.5")])).unwrap_err();
    assert!(error.to_string().contains("temperature"));
}

#[test]
fn test_settings_validation_invalid_log_level() {
    let error = Settings::from_lookup(lookup_with(&[("RUST_LOG", "redactor=loud")])).unwrap_err();
    assert!(error.to_string().contains("Invalid log level"));
}

#[test]
fn test_log_level_accepts_filter_directives() {
    let settings = Settings::from_lookup(lookup_with(&[(
        "RUST_LOG",
        "redactor=debug,tower_http=info",
    )]))
    .unwrap();
    assert_eq!(settings.logging.level, "redactor=debug,tower_http=info");

    let settings = Settings::from_lookup(lookup_with(&[("RUST_LOG", "warn")])).unwrap();
    assert_eq!(settings.logging.level, "warn");
}

#[test]
fn test_parse_errors() {
    let error = Settings::from_lookup(lookup_with(&[("PORT", "invalid")])).unwrap_err();
    assert!(error.to_string().contains("Invalid port number"));

    let error = Settings::from_lookup(lookup_with(&[("REQUEST_TIMEOUT", "soon")])).unwrap_err();
    assert!(error.to_string().contains("Invalid timeout"));

    let error = Settings::from_lookup(lookup_with(&[("MAX_REQUEST_SIZE", "big")])).unwrap_err();
    assert!(error.to_string().contains("Invalid maximum request size"));

    let error = Settings::from_lookup(lookup_with(&[("PROVIDER_KIND", "bedrock")])).unwrap_err();
    assert!(error.to_string().contains("Unknown provider kind"));
}

#[test]
fn test_provider_kind_parsing() {
    assert_eq!("Azure".parse::<ProviderKind>().unwrap(), ProviderKind::Azure);
    assert_eq!(" openai ".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
    assert_eq!(ProviderKind::OpenAi.to_string(), "openai");
}

#[test]
fn test_client_url_joining() {
    let settings = ClientSettings::new("http://localhost:3001/");
    assert_eq!(settings.timeout, 120);
    assert_eq!(settings.url("/api/generar"), "http://localhost:3001/api/generar");
    assert_eq!(settings.url("api/generar"), "http://localhost:3001/api/generar");

    let settings = ClientSettings::new("https://prensa.gob.ar/redactor");
    assert_eq!(
        settings.url("/api/transcribir"),
        "https://prensa.gob.ar/redactor/api/transcribir"
    );
}

#[test]
fn test_client_settings_from_env() {
    env::set_var("REDACTOR_API_URL", "http://10.0.0.5:3001");
    env::set_var("REDACTOR_CLIENT_TIMEOUT", "30");

    let settings = ClientSettings::from_env().unwrap();
    assert_eq!(settings.base_url, "http://10.0.0.5:3001");
    assert_eq!(settings.timeout, 30);

    env::set_var("REDACTOR_API_URL", "ftp://10.0.0.5");
    assert!(ClientSettings::from_env().is_err());

    env::remove_var("REDACTOR_API_URL");
    env::remove_var("REDACTOR_CLIENT_TIMEOUT");
}
