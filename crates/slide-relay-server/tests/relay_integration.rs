//! End-to-end tests for the relay over real WebSocket connections.
//!
//! # Purpose
//!
//! Each test binds a relay on `127.0.0.1:0`, backed by a recording
//! `MockKeyInjector`, and talks to it with a `tokio-tungstenite` client the
//! same way a phone remote would.  They verify:
//!
//! - The reply text for each kind of request (known, unknown, malformed).
//! - That every request gets exactly one reply, in request order.
//! - That sessions are independent: a failing key press or a misbehaving
//!   client on one session does not affect another.
//! - That shutdown closes every session with a close frame and frees the port.
//!
//! ```text
//! test client ──ws──▶ RelayServer ──▶ CommandDispatcher ──▶ MockKeyInjector
//!             ◀─text─                                        (records keys)
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use slide_relay_core::keymap::KeyName;
use slide_relay_server::application::CommandDispatcher;
use slide_relay_server::domain::RelayConfig;
use slide_relay_server::infrastructure::{MockKeyInjector, RelayServer, ServerHandle};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

// ── Helpers ───────────────────────────────────────────────────────────────────

async fn start_relay(injector: Arc<MockKeyInjector>) -> ServerHandle {
    let dispatcher = Arc::new(CommandDispatcher::with_builtin_table(injector));
    let config = RelayConfig::new("127.0.0.1".parse().unwrap(), 0)
        .with_shutdown_grace(Duration::from_secs(2));
    RelayServer::bind(&config, dispatcher)
        .await
        .expect("bind loopback")
        .spawn()
}

async fn connect(addr: SocketAddr) -> Client {
    let (client, _response) = connect_async(format!("ws://{addr}"))
        .await
        .expect("WebSocket handshake");
    client
}

/// Sends `payload` as a text frame and returns the text reply.
async fn request(client: &mut Client, payload: &str) -> String {
    client
        .send(Message::Text(payload.to_string()))
        .await
        .expect("send request");
    next_text(client).await
}

async fn next_text(client: &mut Client) -> String {
    loop {
        let frame = timeout(REPLY_TIMEOUT, client.next())
            .await
            .expect("reply within timeout")
            .expect("stream still open")
            .expect("valid frame");
        match frame {
            Message::Text(text) => return text,
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("expected a text reply, got {other:?}"),
        }
    }
}

fn command(name: &str) -> String {
    serde_json::json!({ "command": name }).to_string()
}

// ── Request / reply ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_next_slide_presses_right_and_replies() {
    // Arrange
    let injector = Arc::new(MockKeyInjector::new());
    let relay = start_relay(Arc::clone(&injector)).await;
    let mut client = connect(relay.local_addr()).await;

    // Act
    let reply = request(&mut client, r#"{"command": "next_slide"}"#).await;

    // Assert
    assert_eq!(reply, "Action performed: Next Slide");
    assert_eq!(injector.pressed(), vec![KeyName::Right]);

    relay.shutdown();
    relay.join().await.unwrap();
}

#[tokio::test]
async fn test_every_builtin_command_round_trips() {
    let injector = Arc::new(MockKeyInjector::new());
    let relay = start_relay(Arc::clone(&injector)).await;
    let mut client = connect(relay.local_addr()).await;

    let cases = [
        ("start_slide", "Start Slide Show (Full Screen)", KeyName::F5),
        ("next_slide", "Next Slide", KeyName::Right),
        ("previous_slide", "Previous Slide", KeyName::Left),
        ("stop_slide", "Stop Slide Show / Exit Full Screen", KeyName::Esc),
        ("pause_slide", "Pause Slide", KeyName::Space),
        ("end_slide", "End Slide Show", KeyName::Esc),
        ("blackout", "Blackout Screen", KeyName::B),
    ];

    for (name, description, _) in cases {
        let reply = request(&mut client, &command(name)).await;
        assert_eq!(reply, format!("Action performed: {description}"));
    }

    let expected: Vec<KeyName> = cases.iter().map(|(_, _, key)| *key).collect();
    assert_eq!(injector.pressed(), expected);

    relay.shutdown();
    relay.join().await.unwrap();
}

#[tokio::test]
async fn test_unknown_command_is_rejected_without_key_press() {
    let injector = Arc::new(MockKeyInjector::new());
    let relay = start_relay(Arc::clone(&injector)).await;
    let mut client = connect(relay.local_addr()).await;

    let reply = request(&mut client, r#"{"command": "unknown_cmd"}"#).await;

    assert_eq!(reply, "Unknown command: unknown_cmd");
    assert_eq!(injector.attempts(), 0);

    relay.shutdown();
    relay.join().await.unwrap();
}

#[tokio::test]
async fn test_malformed_requests_reply_invalid_format_and_keep_session() {
    let injector = Arc::new(MockKeyInjector::new());
    let relay = start_relay(Arc::clone(&injector)).await;
    let mut client = connect(relay.local_addr()).await;

    let payloads = [
        "not valid json",
        "{}",
        r#"{"command": ""}"#,
        r#"{"command": 7}"#,
        r#"{"command": true}"#,
        "[]",
    ];
    for payload in payloads {
        let reply = request(&mut client, payload).await;
        assert_eq!(reply, "Invalid command format", "payload {payload:?}");
    }

    // The session is still usable afterwards.
    let reply = request(&mut client, &command("previous_slide")).await;
    assert_eq!(reply, "Action performed: Previous Slide");
    assert_eq!(injector.pressed(), vec![KeyName::Left]);

    relay.shutdown();
    relay.join().await.unwrap();
}

#[tokio::test]
async fn test_repeated_command_presses_twice() {
    let injector = Arc::new(MockKeyInjector::new());
    let relay = start_relay(Arc::clone(&injector)).await;
    let mut client = connect(relay.local_addr()).await;

    let first = request(&mut client, &command("next_slide")).await;
    let second = request(&mut client, &command("next_slide")).await;

    assert_eq!(first, "Action performed: Next Slide");
    assert_eq!(second, first);
    assert_eq!(injector.pressed(), vec![KeyName::Right, KeyName::Right]);

    relay.shutdown();
    relay.join().await.unwrap();
}

#[tokio::test]
async fn test_binary_frame_is_decoded_as_json() {
    let injector = Arc::new(MockKeyInjector::new());
    let relay = start_relay(Arc::clone(&injector)).await;
    let mut client = connect(relay.local_addr()).await;

    client
        .send(Message::Binary(command("blackout").into_bytes()))
        .await
        .unwrap();
    let reply = next_text(&mut client).await;

    assert_eq!(reply, "Action performed: Blackout Screen");

    relay.shutdown();
    relay.join().await.unwrap();
}

#[tokio::test]
async fn test_pipelined_requests_are_answered_in_order() {
    // Send everything first, then read: replies must come back in order.
    let injector = Arc::new(MockKeyInjector::new());
    let relay = start_relay(Arc::clone(&injector)).await;
    let mut client = connect(relay.local_addr()).await;

    let requests = ["next_slide", "bogus", "previous_slide", "blackout"];
    for name in requests {
        client.send(Message::Text(command(name))).await.unwrap();
    }

    let mut replies = Vec::new();
    for _ in requests {
        replies.push(next_text(&mut client).await);
    }

    assert_eq!(
        replies,
        vec![
            "Action performed: Next Slide",
            "Unknown command: bogus",
            "Action performed: Previous Slide",
            "Action performed: Blackout Screen",
        ]
    );

    relay.shutdown();
    relay.join().await.unwrap();
}

// ── Session independence ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_concurrent_sessions_each_get_their_own_ordered_replies() {
    const SESSIONS: usize = 8;
    const ROUNDS: usize = 5;

    let injector = Arc::new(MockKeyInjector::new());
    let relay = start_relay(Arc::clone(&injector)).await;
    let addr = relay.local_addr();

    let mut clients = Vec::new();
    for i in 0..SESSIONS {
        clients.push(tokio::spawn(async move {
            let mut client = connect(addr).await;
            // Even sessions alternate next/previous, odd ones send unknowns.
            for round in 0..ROUNDS {
                let (name, expected) = match (i % 2, round % 2) {
                    (0, 0) => ("next_slide".to_string(), "Action performed: Next Slide".to_string()),
                    (0, _) => (
                        "previous_slide".to_string(),
                        "Action performed: Previous Slide".to_string(),
                    ),
                    _ => {
                        let name = format!("cmd_{i}_{round}");
                        let expected = format!("Unknown command: {name}");
                        (name, expected)
                    }
                };
                let reply = request(&mut client, &command(&name)).await;
                assert_eq!(reply, expected, "session {i} round {round}");
            }
            client.close(None).await.ok();
        }));
    }

    for client in clients {
        client.await.expect("client task");
    }

    // Only the even sessions press keys.
    assert_eq!(injector.attempts(), (SESSIONS / 2) * ROUNDS);

    relay.shutdown();
    let report = relay.join().await.unwrap();
    assert_eq!(report.sessions_accepted, SESSIONS as u64);
}

#[tokio::test]
async fn test_injection_failure_on_one_session_does_not_affect_another() {
    let injector = Arc::new(MockKeyInjector::failing_on([KeyName::B]));
    let relay = start_relay(Arc::clone(&injector)).await;
    let mut failing = connect(relay.local_addr()).await;
    let mut healthy = connect(relay.local_addr()).await;

    let failed = request(&mut failing, &command("blackout")).await;
    let ok = request(&mut healthy, &command("next_slide")).await;
    let after = request(&mut failing, &command("next_slide")).await;

    assert_eq!(
        failed,
        "Error performing Blackout Screen: platform error: mock failure"
    );
    assert_eq!(ok, "Action performed: Next Slide");
    assert_eq!(after, "Action performed: Next Slide");
    assert_eq!(injector.pressed(), vec![KeyName::Right, KeyName::Right]);

    relay.shutdown();
    relay.join().await.unwrap();
}

#[tokio::test]
async fn test_abrupt_disconnect_does_not_affect_other_sessions() {
    let injector = Arc::new(MockKeyInjector::new());
    let relay = start_relay(Arc::clone(&injector)).await;
    let mut survivor = connect(relay.local_addr()).await;

    {
        let mut doomed = connect(relay.local_addr()).await;
        request(&mut doomed, &command("next_slide")).await;
        // Dropped without a close handshake.
    }

    let reply = request(&mut survivor, &command("previous_slide")).await;
    assert_eq!(reply, "Action performed: Previous Slide");

    relay.shutdown();
    relay.join().await.unwrap();
}

// ── Shutdown ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_shutdown_closes_all_sessions_and_releases_port() {
    // Arrange: three idle sessions
    let injector = Arc::new(MockKeyInjector::new());
    let relay = start_relay(Arc::clone(&injector)).await;
    let addr = relay.local_addr();
    let mut clients = Vec::new();
    for _ in 0..3 {
        let mut client = connect(addr).await;
        request(&mut client, &command("pause_slide")).await;
        clients.push(client);
    }

    // Act
    relay.shutdown();
    let report = timeout(Duration::from_secs(5), relay.join())
        .await
        .expect("shutdown completes within the grace period")
        .unwrap();

    // Assert: every client saw a going-away close frame
    for client in &mut clients {
        let frame = timeout(REPLY_TIMEOUT, client.next())
            .await
            .expect("close frame within timeout");
        match frame {
            Some(Ok(Message::Close(Some(close)))) => assert_eq!(close.code, CloseCode::Away),
            other => panic!("expected a close frame, got {other:?}"),
        }
    }
    assert_eq!(report.sessions_accepted, 3);
    assert_eq!(report.sessions_aborted, 0);

    // The port can be bound again straight away.
    let dispatcher = Arc::new(CommandDispatcher::with_builtin_table(injector));
    let rebound = RelayServer::bind(&RelayConfig::new(addr.ip(), addr.port()), dispatcher).await;
    assert!(rebound.is_ok(), "port {} still held", addr.port());
}

#[tokio::test]
async fn test_shutdown_twice_is_harmless() {
    let relay = start_relay(Arc::new(MockKeyInjector::new())).await;
    let token = relay.shutdown_token();

    relay.shutdown();
    token.cancel();
    relay.shutdown();

    let report = relay.join().await.unwrap();
    assert_eq!(report.sessions_aborted, 0);
}

#[tokio::test]
async fn test_new_connections_refused_after_shutdown() {
    let relay = start_relay(Arc::new(MockKeyInjector::new())).await;
    let addr = relay.local_addr();

    relay.shutdown();
    relay.join().await.unwrap();

    assert!(connect_async(format!("ws://{addr}")).await.is_err());
}
