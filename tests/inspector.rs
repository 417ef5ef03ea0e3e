use std::sync::Arc;
use std::thread;

use futures::channel::mpsc::UnboundedReceiver;
use serde_json::json;

use hermoxide::{CallId, ErrorCode, InspectorSession, Message, Request, Response};

fn drain(rx: &mut UnboundedReceiver<Message>) -> Vec<Message> {
    let mut out = Vec::new();
    while let Ok(Some(msg)) = rx.try_next() {
        out.push(msg);
    }
    out
}

fn responses(messages: &[Message]) -> Vec<&Response> {
    messages
        .iter()
        .filter_map(|msg| match msg {
            Message::Response(resp) => Some(resp),
            Message::Notification(_) => None,
        })
        .collect()
}

fn request(id: usize, method: &'static str) -> Request {
    Request::new(CallId::new(id), method)
}

#[test]
fn enable_then_disable_succeeds_and_ends_disabled() {
    let (session, mut rx) = InspectorSession::with_queue();

    session.handle(&request(1, "Runtime.enable"));
    session.handle(&request(2, "Runtime.disable"));

    let messages = drain(&mut rx);
    let resps = responses(&messages);
    assert_eq!(resps.len(), 2);
    assert!(resps.iter().all(|resp| !resp.is_error()));

    // Ends disabled: another disable is rejected.
    session.handle(&request(3, "Runtime.disable"));
    let messages = drain(&mut rx);
    assert!(responses(&messages)[0].is_error());
}

#[test]
fn enable_response_precedes_context_created_notification() {
    let (session, mut rx) = InspectorSession::with_queue();

    session.handle(&request(1, "Runtime.enable"));

    let messages = drain(&mut rx);
    assert_eq!(
        serde_json::to_value(&messages).unwrap(),
        json!([
            {"id": 1, "result": {}},
            {
                "method": "Runtime.executionContextCreated",
                "params": {"context": {"id": 1, "name": "hermes"}}
            }
        ])
    );
}

#[test]
fn double_enable_is_invalid_request_without_notification() {
    let (session, mut rx) = InspectorSession::with_queue();

    session.handle(&request(1, "Runtime.enable"));
    drain(&mut rx);

    session.handle(&request(2, "Runtime.enable"));
    let messages = drain(&mut rx);
    assert_eq!(
        serde_json::to_value(&messages).unwrap(),
        json!([{
            "id": 2,
            "error": {"code": -32600, "message": "Runtime domain already enabled"}
        }])
    );
}

#[test]
fn disable_while_disabled_is_invalid_request() {
    let (session, mut rx) = InspectorSession::with_queue();

    session.handle(&request(3, "Runtime.disable"));
    let messages = drain(&mut rx);
    assert_eq!(
        serde_json::to_value(&messages).unwrap(),
        json!([{
            "id": 3,
            "error": {"code": -32600, "message": "Runtime domain not enabled"}
        }])
    );
}

#[test]
fn every_response_echoes_its_request_id() {
    let (session, mut rx) = InspectorSession::with_queue();

    for (id, method) in [
        (10, "Runtime.enable"),
        (11, "Runtime.enable"),
        (12, "Runtime.disable"),
        (13, "Debugger.enable"),
        (14, "Runtime.bogus"),
    ] {
        session.handle(&request(id, method));
    }

    let messages = drain(&mut rx);
    let ids: Vec<_> = responses(&messages)
        .iter()
        .map(|resp| resp.id.inner())
        .collect();
    assert_eq!(ids, vec![10, 11, 12, 13, 14]);
}

#[test]
fn unroutable_methods_get_exactly_one_method_not_found() {
    let (session, mut rx) = InspectorSession::with_queue();

    session.handle(&request(1, "Profiler.start"));
    session.handle(&request(2, "noDomainSeparator"));

    let messages = drain(&mut rx);
    let responses = responses(&messages);
    assert_eq!(responses.len(), 2);
    for resp in responses {
        assert_eq!(
            resp.error.as_ref().map(|err| err.code),
            Some(ErrorCode::MethodNotFound)
        );
    }
}

#[test]
fn malformed_json_surfaces_to_the_transport() {
    let (session, mut rx) = InspectorSession::with_queue();

    assert!(session.handle_json("{not json").is_err());
    assert!(drain(&mut rx).is_empty(), "nothing reaches the agents");

    session
        .handle_json(r#"{"id": 5, "method": "Runtime.enable"}"#)
        .unwrap();
    assert_eq!(drain(&mut rx).len(), 2);
}

#[test]
fn racing_enables_produce_one_winner() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let (session, mut rx) = InspectorSession::with_queue();
    let session = Arc::new(session);

    let handles: Vec<_> = [1usize, 2]
        .into_iter()
        .map(|id| {
            let session = Arc::clone(&session);
            thread::spawn(move || session.handle(&request(id, "Runtime.enable")))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let messages = drain(&mut rx);
    let resps = responses(&messages);
    assert_eq!(resps.len(), 2);
    assert_eq!(resps.iter().filter(|resp| !resp.is_error()).count(), 1);

    let loser = resps.iter().find(|resp| resp.is_error()).unwrap();
    assert_eq!(
        loser.error.as_ref().unwrap().message,
        "Runtime domain already enabled"
    );

    let notifications = messages.len() - resps.len();
    assert_eq!(notifications, 1, "exactly one context announcement");

    // The announcement never precedes the winning response.
    let success_at = messages
        .iter()
        .position(|msg| matches!(msg, Message::Response(resp) if !resp.is_error()))
        .unwrap();
    let note_at = messages
        .iter()
        .position(|msg| matches!(msg, Message::Notification(_)))
        .unwrap();
    assert!(success_at < note_at);

    // The domain ended up enabled.
    session.handle(&request(3, "Runtime.disable"));
    let messages = drain(&mut rx);
    assert!(!responses(&messages)[0].is_error());
}
