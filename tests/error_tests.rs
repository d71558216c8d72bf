//! Tests for the error system.

use memoh::capability::ActionKind;
use memoh::error::unified::*;
use memoh::error::*;

#[test]
fn error_api_creation() {
    let err = MemohError::api(404, "Not found");
    assert!(matches!(&err, MemohError::Api { status: 404, .. }));
    assert_eq!(err.to_string(), "API error (status 404): Not found");
}

#[test]
fn remote_error_displays_only_its_message() {
    let err = MemohError::Remote("rate limited".into());
    assert_eq!(err.to_string(), "rate limited");
    assert_eq!(err.category(), ErrorCategory::Stream);
}

#[test]
fn error_helper_mappings_are_stable_for_major_variants() {
    struct Case {
        error: MemohError,
        expected_category: ErrorCategory,
        expected_retryable: bool,
        expected_recovery: RecoverySuggestion,
    }

    let network_error = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .unwrap_err();
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "disk");
    let serde_error = serde_json::from_str::<serde_json::Value>("{not-json}").unwrap_err();

    let cases = vec![
        Case {
            error: MemohError::Authentication("Not logged in".to_string()),
            expected_category: ErrorCategory::Authentication,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::Login,
        },
        Case {
            error: MemohError::Configuration("bad-config".to_string()),
            expected_category: ErrorCategory::Configuration,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckConfiguration,
        },
        Case {
            error: MemohError::Network(network_error),
            expected_category: ErrorCategory::Network,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::RetryWithBackoff,
        },
        Case {
            error: MemohError::Serialization(serde_error),
            expected_category: ErrorCategory::Serialization,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: MemohError::api(401, "Unauthorized"),
            expected_category: ErrorCategory::Authentication,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::Login,
        },
        Case {
            error: MemohError::api(429, "Rate limited"),
            expected_category: ErrorCategory::RateLimit,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::RetryWithBackoff,
        },
        Case {
            error: MemohError::api(503, "Server unavailable"),
            expected_category: ErrorCategory::Server,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::RetryWithBackoff,
        },
        Case {
            error: MemohError::api(418, "Teapot"),
            expected_category: ErrorCategory::Api,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: MemohError::ActionNotAllowed(ActionKind::Schedule),
            expected_category: ErrorCategory::Permission,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::RequestCapability,
        },
        Case {
            error: MemohError::Storage("disk full".to_string()),
            expected_category: ErrorCategory::Collaborator,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: MemohError::Dispatch {
                platform: "telegram".to_string(),
                message: "offline".to_string(),
            },
            expected_category: ErrorCategory::Collaborator,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: MemohError::ToolExecution {
                tool_name: "tool-a".to_string(),
                message: "failed".to_string(),
            },
            expected_category: ErrorCategory::ToolExecution,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckToolImplementation,
        },
        Case {
            error: MemohError::Subagent("no messages".to_string()),
            expected_category: ErrorCategory::ToolExecution,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckToolImplementation,
        },
        Case {
            error: MemohError::Stream("stream-error".to_string()),
            expected_category: ErrorCategory::Stream,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: MemohError::Io(io_error),
            expected_category: ErrorCategory::Unknown,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: MemohError::InvalidArgument("bad-arg".to_string()),
            expected_category: ErrorCategory::Unknown,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
    ];

    for case in cases {
        assert_eq!(case.error.category(), case.expected_category);
        assert_eq!(case.error.is_retryable(), case.expected_retryable);
        assert_eq!(case.error.recovery_suggestion(), case.expected_recovery);
    }
}

#[test]
fn status_mapping_uses_typed_error_body() {
    match status_to_error(403, r#"{"error":"forbidden for this user"}"#) {
        MemohError::Authentication(message) => assert_eq!(message, "forbidden for this user"),
        other => panic!("expected authentication error, got {other:?}"),
    }

    match status_to_error(500, r#"{"detail":"not the expected shape"}"#) {
        MemohError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, DEFAULT_FAILURE_MESSAGE);
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[test]
fn blank_error_body_falls_back_to_default_message() {
    let body = ErrorBody::parse(r#"{"error":"   "}"#);
    assert_eq!(body.message(), "Chat failed");
}
