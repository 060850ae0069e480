//! End-to-end dispatch tests against a scripted upstream
//!
//! No network or Telegram credentials are needed: every read goes through
//! [`FakeSource`], which records connects, fetches and closes.

mod common;

use common::{args, dispatcher, naive_message, utc_message, FakeSource};
use serde_json::json;
use telegram_mcp::types::{DispatchError, UpstreamError};
use telegram_mcp::InvocationResult;

// ============================================================================
// list_sources
// ============================================================================

#[tokio::test]
async fn test_list_sources_preserves_order_and_duplicates() {
    let upstream = FakeSource::with_messages(Vec::new());
    let dispatcher = dispatcher(" beta, alpha ,,beta", &upstream);

    let result = dispatcher.dispatch("list_sources", &args(json!({}))).await.unwrap();

    assert_eq!(
        result,
        InvocationResult::Success(json!({ "sources": ["beta", "alpha", "beta"] }))
    );
    assert_eq!(upstream.connects(), 0);
}

#[tokio::test]
async fn test_list_sources_open_policy_is_empty() {
    let upstream = FakeSource::with_messages(Vec::new());
    let result = dispatcher("", &upstream)
        .dispatch("list_sources", &args(json!({})))
        .await
        .unwrap();

    assert_eq!(result, InvocationResult::Success(json!({ "sources": [] })));
}

// ============================================================================
// read_messages
// ============================================================================

#[tokio::test]
async fn test_read_messages_normalizes_fetch() {
    let upstream = FakeSource::with_messages(vec![
        utc_message(3, 12, Some("c")),
        utc_message(2, 11, Some("")),
        utc_message(1, 10, Some("a")),
    ]);
    let dispatcher = dispatcher("alpha,beta", &upstream);

    let result = dispatcher
        .dispatch("read_messages", &args(json!({ "source": "alpha", "limit": 3 })))
        .await
        .unwrap();

    assert_eq!(
        result,
        InvocationResult::Success(json!({
            "source": "alpha",
            "messages": [
                { "id": 1, "ts": "2024-05-01T10:00:00+00:00", "text": "a" },
                { "id": 3, "ts": "2024-05-01T12:00:00+00:00", "text": "c" }
            ]
        }))
    );
    assert_eq!(upstream.fetches(), vec![("alpha".to_string(), 3)]);
    assert_eq!(upstream.connects(), 1);
    assert_eq!(upstream.closes(), 1);
}

#[tokio::test]
async fn test_read_messages_default_limit() {
    let upstream = FakeSource::with_messages(Vec::new());
    dispatcher("alpha", &upstream)
        .dispatch("read_messages", &args(json!({ "source": "alpha" })))
        .await
        .unwrap();

    assert_eq!(upstream.fetches(), vec![("alpha".to_string(), 50)]);
}

#[tokio::test]
async fn test_read_messages_trims_source() {
    let upstream = FakeSource::with_messages(vec![naive_message(7, 8, "hi")]);
    let result = dispatcher("alpha", &upstream)
        .dispatch("read_messages", &args(json!({ "source": "  alpha  ", "limit": 2 })))
        .await
        .unwrap();

    assert_eq!(
        result,
        InvocationResult::Success(json!({
            "source": "alpha",
            "messages": [{ "id": 7, "ts": "2024-05-01T08:00:00+00:00", "text": "hi" }]
        }))
    );
    assert_eq!(upstream.fetches(), vec![("alpha".to_string(), 2)]);
}

#[tokio::test]
async fn test_denied_source_never_reaches_upstream() {
    let upstream = FakeSource::with_messages(vec![utc_message(1, 10, Some("a"))]);
    let result = dispatcher("alpha,beta", &upstream)
        .dispatch("read_messages", &args(json!({ "source": "gamma", "limit": 10 })))
        .await
        .unwrap();

    assert_eq!(
        result,
        InvocationResult::Error("Source is not allowlisted. Add it to ALLOWLIST_SOURCES.".to_string())
    );
    assert_eq!(upstream.connects(), 0);
}

#[tokio::test]
async fn test_allowlist_is_case_sensitive() {
    let upstream = FakeSource::with_messages(Vec::new());
    let result = dispatcher("Alpha", &upstream)
        .dispatch("read_messages", &args(json!({ "source": "alpha" })))
        .await
        .unwrap();

    assert!(result.is_error());
    assert_eq!(upstream.connects(), 0);
}

#[tokio::test]
async fn test_open_policy_reads_any_source() {
    let upstream = FakeSource::with_messages(vec![utc_message(1, 10, Some("a"))]);
    let result = dispatcher("", &upstream)
        .dispatch("read_messages", &args(json!({ "source": "anything" })))
        .await
        .unwrap();

    assert!(!result.is_error());
    assert_eq!(upstream.connects(), 1);
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_upstream() {
    let upstream = FakeSource::with_messages(Vec::new());
    let dispatcher = dispatcher("alpha", &upstream);

    let cases = [
        (json!({ "source": "alpha", "limit": 0 }), "limit must be between 1 and 500"),
        (json!({ "source": "alpha", "limit": 501 }), "limit must be between 1 and 500"),
        (json!({ "source": "alpha", "limit": "ten" }), "limit must be an integer"),
        (json!({ "source": "alpha", "limit": "10" }), "limit must be an integer"),
        (json!({ "source": "   " }), "Missing required argument: source"),
        (json!({}), "Missing required argument: source"),
        (json!({ "source": 5 }), "source must be a string"),
        (json!({ "source": "alpha", "since": 1 }), "Unexpected argument: since"),
    ];

    for (arguments, expected) in cases {
        let result = dispatcher
            .dispatch("read_messages", &args(arguments.clone()))
            .await
            .unwrap();
        assert_eq!(
            result,
            InvocationResult::Error(expected.to_string()),
            "arguments: {}",
            arguments
        );
    }
    assert_eq!(upstream.connects(), 0);
}

#[tokio::test]
async fn test_upstream_failure_closes_session() {
    let upstream = FakeSource::failing(UpstreamError::UnresolvedSource("alpha".to_string()));
    let result = dispatcher("alpha", &upstream)
        .dispatch("read_messages", &args(json!({ "source": "alpha" })))
        .await
        .unwrap();

    assert_eq!(
        result,
        InvocationResult::Error("Cannot resolve source: alpha".to_string())
    );
    assert_eq!(upstream.connects(), 1);
    assert_eq!(upstream.closes(), 1);
}

// ============================================================================
// get_checkpoint
// ============================================================================

#[tokio::test]
async fn test_get_checkpoint_is_always_null() {
    let upstream = FakeSource::with_messages(vec![utc_message(9, 10, Some("x"))]);
    let dispatcher = dispatcher("alpha", &upstream);

    // Unlisted sources are fine: checkpoints are not a read.
    for source in ["alpha", "gamma"] {
        let result = dispatcher
            .dispatch("get_checkpoint", &args(json!({ "source": source })))
            .await
            .unwrap();
        assert_eq!(
            result,
            InvocationResult::Success(json!({ "source": source, "last_message_id": null }))
        );
    }
    assert_eq!(upstream.connects(), 0);
}

#[tokio::test]
async fn test_get_checkpoint_requires_source() {
    let upstream = FakeSource::with_messages(Vec::new());
    let result = dispatcher("", &upstream)
        .dispatch("get_checkpoint", &args(json!({ "source": "" })))
        .await
        .unwrap();

    assert_eq!(
        result,
        InvocationResult::Error("Missing required argument: source".to_string())
    );
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_unknown_tool_is_rejected() {
    let upstream = FakeSource::with_messages(Vec::new());
    let err = dispatcher("alpha", &upstream)
        .dispatch("unknown_tool", &args(json!({})))
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::UnknownTool(ref name) if name == "unknown_tool"));
    assert_eq!(err.to_string(), "Unknown tool: unknown_tool");
    assert_eq!(upstream.connects(), 0);
}
