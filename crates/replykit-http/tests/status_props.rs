// Rust guideline compliant 2026-10-16

//! Property-based tests for status handling in the HTTP adapter.

use proptest::prelude::*;
use replykit_core::config::{RuntimeConfig, RuntimeMode};
use replykit_core::{MemoryLogger, RawError, Replykit, RequestContext};
use replykit_http::{BufferedReply, HttpResponder};
use serde_json::json;
use std::sync::Arc;

fn kit() -> Replykit {
    let config = RuntimeConfig::for_mode(RuntimeMode::Production);
    Replykit::new(config, Arc::new(MemoryLogger::new())).expect("valid config")
}

proptest! {
    /// Codes below 400 succeed with data; the rest fail with an error.
    #[test]
    fn prop_respond_success_follows_status(status in 100u16..600) {
        let kit = kit();
        let mut responder = HttpResponder::new(&kit, BufferedReply::new(), RequestContext::new());
        responder.respond(status, json!({"k": 1}), None).unwrap();
        let reply = responder.into_reply();
        let body = reply.body().cloned().unwrap();

        prop_assert_eq!(reply.status(), Some(status));
        prop_assert_eq!(body["success"].as_bool(), Some(status < 400));
        prop_assert_eq!(body.get("data").is_some(), status < 400);
        prop_assert_eq!(body.get("error").is_some(), status >= 400);
    }

    /// A 5xx error message never reaches the body in production.
    #[test]
    fn prop_server_errors_never_leak(status in 500u16..600, secret in "[a-z]{12,20}") {
        let kit = kit();
        let mut responder = HttpResponder::new(&kit, BufferedReply::new(), RequestContext::new());
        responder.error(RawError::new(secret.clone()), Some(status)).unwrap();
        let reply = responder.into_reply();
        let body = reply.body().cloned().unwrap();

        prop_assert_eq!(reply.status(), Some(status));
        prop_assert!(!body.to_string().contains(&secret));
    }

    /// An internal error handed to a client-error method never leaks either.
    #[test]
    fn prop_client_errors_never_leak_internal(
        secret in "[a-z]{12,20}",
        status in proptest::option::of(500u16..600),
        name in prop::sample::select(vec!["Error", "TypeError", "ReferenceError"]),
    ) {
        prop_assume!(status.is_some() || name != "Error");
        let mut error = RawError::new(secret.clone()).with_name(name);
        if let Some(status) = status {
            error = error.with_status(status);
        }

        let kit = kit();
        let mut responder = HttpResponder::new(&kit, BufferedReply::new(), RequestContext::new());
        responder.bad_request(Some(error), None).unwrap();
        let reply = responder.into_reply();
        let body = reply.body().cloned().unwrap();

        prop_assert_eq!(reply.status(), Some(400));
        prop_assert_eq!(&body["message"], &json!("Bad request"));
        prop_assert!(!body.to_string().contains(&secret));
    }
}
