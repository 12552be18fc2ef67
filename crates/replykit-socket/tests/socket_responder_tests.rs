// Rust guideline compliant 2026-10-16

//! Integration tests for the socket response adapter.

use replykit_core::config::{RuntimeConfig, RuntimeMode};
use replykit_core::{
    Error, LogLevel, MemoryLogger, RawError, Replykit, RequestContext, Result,
    GENERIC_INTERNAL_MESSAGE,
};
use replykit_socket::{
    wrapper, Destination, MemoryChannel, SocketChannel, SocketResponder, WrapOutcome,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn quiet_production() -> RuntimeConfig {
    let mut config = RuntimeConfig::for_mode(RuntimeMode::Production);
    config.response.include_timestamp = false;
    config.response.include_request_id = false;
    config
}

fn setup(config: RuntimeConfig) -> (SocketResponder, Arc<MemoryChannel>, Arc<MemoryLogger>) {
    let logger = Arc::new(MemoryLogger::new());
    let kit = Replykit::new(config, logger.clone()).expect("valid config");
    let channel = Arc::new(MemoryChannel::new("sock-1"));
    let ctx = RequestContext::generated().socket("sock-1", "chat:send");
    let responder = SocketResponder::new(&kit, channel.clone(), ctx);
    (responder, channel, logger)
}

/// Channel whose every emission fails.
struct ClosedChannel;

impl SocketChannel for ClosedChannel {
    fn id(&self) -> &str {
        "closed"
    }

    fn emit(&self, _event: &str, _payload: &Value) -> Result<()> {
        Err(Error::Transport("socket closed".to_string()))
    }

    fn emit_to_room(&self, _room: &str, _event: &str, _payload: &Value) -> Result<()> {
        Err(Error::Transport("socket closed".to_string()))
    }

    fn emit_to_peer(&self, _peer: &str, _event: &str, _payload: &Value) -> Result<()> {
        Err(Error::Transport("socket closed".to_string()))
    }
}

#[test]
fn test_ok_emits_to_origin_with_status_code() {
    let (responder, channel, _) = setup(quiet_production());
    responder.ok(json!({"text": "hi"}), None).unwrap();

    let emissions = channel.emissions();
    assert_eq!(emissions.len(), 1);
    assert_eq!(emissions[0].destination, Destination::Origin);
    assert_eq!(emissions[0].event, "response");
    assert_eq!(
        emissions[0].payload,
        json!({
            "success": true,
            "data": {"text": "hi"},
            "message": "Success",
            "statusCode": 200
        })
    );
}

#[test]
fn test_created_uses_default_message() {
    let (responder, channel, _) = setup(quiet_production());
    responder.created(json!({"id": 9}), None).unwrap();

    let payload = &channel.emissions()[0].payload;
    assert_eq!(payload["statusCode"], json!(201));
    assert_eq!(payload["message"], json!("Created successfully"));
}

#[test]
fn test_peer_beats_room() {
    let (responder, channel, _) = setup(quiet_production());

    responder.to_room("lobby").to_socket("peer-9").ok("x", None).unwrap();
    responder.to_socket("peer-9").to_room("lobby").ok("y", None).unwrap();

    let destinations: Vec<_> = channel
        .emissions()
        .into_iter()
        .map(|emission| emission.destination)
        .collect();
    assert_eq!(
        destinations,
        vec![
            Destination::Peer("peer-9".into()),
            Destination::Peer("peer-9".into())
        ]
    );
}

#[test]
fn test_targeting_does_not_mutate_original() {
    let (responder, channel, _) = setup(quiet_production());

    let room = responder.to_room("lobby");
    room.ok("to room", None).unwrap();
    responder.ok("to self", None).unwrap();
    room.to_socket("peer-2").ok("to peer", None).unwrap();
    room.ok("room again", None).unwrap();

    let emissions = channel.emissions();
    assert_eq!(emissions.len(), 4);
    assert_eq!(emissions[0].destination, Destination::Room("lobby".into()));
    assert_eq!(emissions[1].destination, Destination::Origin);
    assert_eq!(emissions[2].destination, Destination::Peer("peer-2".into()));
    assert_eq!(emissions[3].destination, Destination::Room("lobby".into()));
    assert_eq!(responder.destination(), Destination::Origin);
}

#[test]
fn test_client_errors_keep_message() {
    let (responder, channel, _) = setup(quiet_production());

    responder.bad_request(None, Some("bad payload")).unwrap();
    responder.unauthorized(None, None).unwrap();
    responder.forbidden(None, None).unwrap();
    responder
        .not_found(Some(RawError::new("room gone")), None)
        .unwrap();

    let payloads: Vec<_> = channel
        .emissions()
        .into_iter()
        .map(|emission| emission.payload)
        .collect();
    assert_eq!(payloads[0]["statusCode"], json!(400));
    assert_eq!(payloads[0]["error"]["message"], json!("bad payload"));
    assert_eq!(payloads[1]["message"], json!("Unauthorized"));
    assert_eq!(payloads[2]["statusCode"], json!(403));
    assert_eq!(payloads[3]["message"], json!("room gone"));
    assert_eq!(payloads[3]["error"], json!({ "message": "room gone", "type": "Error" }));
    assert!(payloads.iter().all(|payload| payload["success"] == json!(false)));
}

#[test]
fn test_client_error_never_leaks_internal_message() {
    let (responder, channel, _) = setup(quiet_production());

    responder
        .bad_request(
            Some(RawError::new("pg: password auth failed for admin").with_name("TypeError")),
            None,
        )
        .unwrap();
    responder
        .bad_request(
            Some(RawError::new("pg: password auth failed for admin").with_status(500)),
            None,
        )
        .unwrap();

    let emissions = channel.emissions();
    assert_eq!(emissions.len(), 2);
    for emission in emissions {
        assert_eq!(emission.payload["statusCode"], json!(400));
        assert_eq!(emission.payload["message"], json!("Bad request"));
        assert_eq!(emission.payload["error"]["message"], json!(GENERIC_INTERNAL_MESSAGE));
        assert!(!emission.payload.to_string().contains("password"));
    }
}

#[test]
fn test_error_redacts_internal_in_production() {
    let (responder, channel, logger) = setup(quiet_production());
    let raw = RawError::new("db password rejected")
        .with_name("InternalError")
        .with_details(json!({"host": "db-1"}));

    responder.to_room("ops").error(raw, None).unwrap();

    let emission = &channel.emissions()[0];
    assert_eq!(emission.destination, Destination::Room("ops".into()));
    assert_eq!(emission.payload["statusCode"], json!(500));
    assert_eq!(emission.payload["error"]["message"], json!(GENERIC_INTERNAL_MESSAGE));
    assert!(emission.payload["error"].get("details").is_none());
    assert!(!emission.payload.to_string().contains("db password"));

    let errors = logger.records_at(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    let meta = errors[0].meta.as_ref().expect("error meta");
    assert_eq!(meta["destination"], json!("room:ops"));
    assert_eq!(meta["socketId"], json!("sock-1"));
}

#[test]
fn test_error_status_from_error_code() {
    let (responder, channel, _) = setup(quiet_production());
    responder
        .error(RawError::new("slow down").with_code(429_u16), None)
        .unwrap();
    responder
        .error(RawError::new("teapot").with_status(418), Some(409))
        .unwrap();

    let emissions = channel.emissions();
    assert_eq!(emissions[0].payload["statusCode"], json!(429));
    assert_eq!(emissions[1].payload["statusCode"], json!(409));
}

#[test]
fn test_error_logging_can_be_disabled() {
    let mut config = quiet_production();
    config.errors.log_errors = false;
    let (responder, _, logger) = setup(config);

    responder.error(RawError::new("boom"), None).unwrap();

    assert!(logger.records_at(LogLevel::Error).is_empty());
}

#[test]
fn test_emit_custom_event() {
    let (responder, channel, _) = setup(quiet_production());

    responder.emit("typing", json!({"user": "ada"}), None).unwrap();
    responder.emit("kicked", Value::Null, Some(403)).unwrap();

    let emissions = channel.emissions();
    assert_eq!(emissions[0].event, "typing");
    assert_eq!(emissions[0].payload["data"], json!({"user": "ada"}));
    assert_eq!(emissions[0].payload["statusCode"], json!(200));
    assert_eq!(emissions[1].event, "kicked");
    assert_eq!(emissions[1].payload["success"], json!(false));
    assert_eq!(emissions[1].payload["message"], json!("Forbidden"));
    assert!(emissions[1].payload["error"].get("code").is_none());
    assert_eq!(responder.event(), "response");
}

#[test]
fn test_with_event_renames_family_methods() {
    let (responder, channel, _) = setup(quiet_production());
    responder.with_event("chat:ack").ok(true, None).unwrap();

    assert_eq!(channel.emissions()[0].event, "chat:ack");
}

#[test]
fn test_request_id_in_payload_meta() {
    let mut config = quiet_production();
    config.response.include_request_id = true;
    let (responder, channel, _) = setup(config);

    responder.ok(1, None).unwrap();

    let payload = &channel.emissions()[0].payload;
    assert_eq!(
        payload["meta"]["requestId"].as_str(),
        responder.context().correlation_id()
    );
}

#[test]
fn test_events_carry_destination() {
    let (responder, _, logger) = setup(quiet_production());
    responder.to_socket("peer-3").ok("x", None).unwrap();

    let events = logger.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].destination.as_deref(), Some("peer:peer-3"));
    assert_eq!(events[0].status_code, 200);
}

#[test]
fn test_transport_failure_propagates() {
    let logger = Arc::new(MemoryLogger::new());
    let kit = Replykit::new(quiet_production(), logger).expect("valid config");
    let responder = SocketResponder::new(&kit, Arc::new(ClosedChannel), RequestContext::new());

    let err = responder.ok(1, None).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_wrapper_passes_through_success() {
    let (responder, channel, _) = setup(quiet_production());
    let handler = wrapper(|res: SocketResponder, payload: Value| async move {
        res.ok(payload, Some("echo"))?;
        Ok::<(), anyhow::Error>(())
    });

    let outcome = handler.call(responder, json!({"n": 1})).await;

    assert!(outcome.is_completed());
    let emissions = channel.emissions();
    assert_eq!(emissions.len(), 1);
    assert_eq!(emissions[0].payload["data"], json!({"n": 1}));
}

#[tokio::test]
async fn test_wrapper_converts_returned_error() {
    let (responder, channel, logger) = setup(quiet_production());
    let handler = wrapper(|_res: SocketResponder, _payload: ()| async move {
        let failed: anyhow::Result<()> =
            Err(RawError::new("no such room").with_status(404).into());
        failed
    });

    let outcome = handler.call(responder, ()).await;

    assert!(matches!(outcome, WrapOutcome::Recovered(_)));
    let emissions = channel.emissions();
    assert_eq!(emissions.len(), 1);
    assert_eq!(emissions[0].payload["statusCode"], json!(404));
    assert_eq!(emissions[0].payload["error"]["message"], json!("no such room"));
    assert!(!logger.records_at(LogLevel::Error).is_empty());
}

#[tokio::test]
async fn test_wrapper_catches_panic_in_future() {
    let (responder, channel, _) = setup(quiet_production());
    let handler = wrapper(|_res: SocketResponder, flag: bool| async move {
        if flag {
            panic!("secret stack detail");
        }
        Ok::<(), anyhow::Error>(())
    });

    let outcome = handler.call(responder, true).await;

    assert!(matches!(outcome, WrapOutcome::Recovered(_)));
    let emissions = channel.emissions();
    assert_eq!(emissions.len(), 1);
    assert_eq!(emissions[0].payload["success"], json!(false));
    assert_eq!(emissions[0].payload["statusCode"], json!(500));
    assert_eq!(
        emissions[0].payload["error"]["message"],
        json!(GENERIC_INTERNAL_MESSAGE)
    );
}

#[tokio::test]
async fn test_wrapper_catches_synchronous_panic() {
    let (responder, channel, _) = setup(quiet_production());
    let handler = wrapper(
        |_res: SocketResponder, _payload: ()| -> std::future::Ready<anyhow::Result<()>> {
            panic!("failed before the future existed")
        },
    );

    let outcome = handler.call(responder, ()).await;

    assert!(matches!(outcome, WrapOutcome::Recovered(_)));
    assert_eq!(channel.emissions().len(), 1);
}

#[tokio::test]
async fn test_wrapper_reports_undelivered_error() {
    let logger = Arc::new(MemoryLogger::new());
    let kit = Replykit::new(quiet_production(), logger.clone()).expect("valid config");
    let responder = SocketResponder::new(&kit, Arc::new(ClosedChannel), RequestContext::new());
    let handler = wrapper(|_res: SocketResponder, _payload: ()| async move {
        let failed: anyhow::Result<()> = Err(anyhow::anyhow!("handler failed"));
        failed
    });

    let outcome = handler.call(responder, ()).await;

    assert!(matches!(outcome, WrapOutcome::Undelivered(_, Error::Transport(_))));
    assert!(logger
        .records_at(LogLevel::Error)
        .iter()
        .any(|record| record.message == "failed to emit handler error"));
}
