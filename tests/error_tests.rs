//! Error handling module unit tests

use axum::http::StatusCode;
use axum::response::IntoResponse;
use redactor::client::{ClientError, ErrorReport, CONNECTIVITY_MESSAGE};
use redactor::utils::error::*;
use serde_json::{json, Value};

#[test]
fn test_app_error_status_codes() {
    let test_cases = vec![
        (AppError::Validation("test".to_string()), StatusCode::BAD_REQUEST),
        (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
        (AppError::Upstream("test".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected_status) in test_cases {
        assert_eq!(error.status_code(), expected_status);
    }
}

#[test]
fn test_provider_errors_share_one_message() {
    let errors = vec![
        AppError::Upstream("429 rate limited on deployment gpt-prensa".to_string()),
        AppError::Upstream("Failed to parse completion response".to_string()),
        AppError::Upstream("401 invalid api-key".to_string()),
    ];

    for error in errors {
        let body = error.to_error_body();
        assert_eq!(body.error.as_deref(), Some(GENERATION_FAILED));
        assert!(body.detail.is_none());
        assert!(body.message.is_none());
    }
}

#[test]
fn test_validation_error_carries_detail() {
    let body = AppError::Validation("La audiencia es obligatoria".to_string()).to_error_body();

    assert_eq!(body.error.as_deref(), Some(INVALID_REQUEST));
    assert_eq!(body.detail.as_deref(), Some("La audiencia es obligatoria"));
}

#[tokio::test]
async fn test_into_response_body() {
    let response = AppError::Upstream("timeout after 60s".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "error": "Error al generar contenido" }));
}

#[test]
fn test_upstream_context_keeps_cause() {
    let result: Result<(), anyhow::Error> =
        Err(anyhow::anyhow!("connection reset").context("Failed to send request"));

    match result.upstream_context("Completion request failed") {
        Err(AppError::Upstream(msg)) => {
            assert!(msg.contains("Completion request failed"));
            assert!(msg.contains("Failed to send request"));
            assert!(msg.contains("connection reset"));
        }
        other => panic!("Expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_payload_too_large_response_body() {
    let response = AppError::PayloadTooLarge.into_response();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Solicitud inválida");
    assert!(body["detail"].is_string());
}

#[test]
fn test_client_error_messages() {
    let cases = vec![
        (
            ClientError::Http(ErrorReport {
                http_status: 500,
                detail: Some("quota exceeded".to_string()),
            }),
            "Error del servidor (500): quota exceeded",
        ),
        (
            ClientError::Http(ErrorReport {
                http_status: 404,
                detail: None,
            }),
            "Error del servidor (404): Not Found",
        ),
        (ClientError::Network, CONNECTIVITY_MESSAGE),
        (
            ClientError::Validation("Ingresá una URL válida.".to_string()),
            "Ingresá una URL válida.",
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.user_message(), expected);
    }
}

#[test]
fn test_unknown_status_without_reason() {
    let report = ErrorReport {
        http_status: 599,
        detail: None,
    };
    assert_eq!(report.detail_or_status(), "Respuesta no válida");
}

#[tokio::test]
async fn test_refused_connection_maps_to_network() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let reqwest_error = reqwest::Client::new().get(url).send().await.unwrap_err();
    let error: ClientError = reqwest_error.into();

    assert_eq!(error, ClientError::Network);
    assert_eq!(error.user_message(), CONNECTIVITY_MESSAGE);
}
