//! End-to-end room synchronization tests.
//!
//! These tests wire the full use case graph against the real in-memory
//! repositories and WebSocket pusher, with channel-backed connections standing
//! in for sockets. Each test drives a complete collaboration scenario and
//! asserts the exact frames every participant observes.

use std::sync::Arc;

use tokio::sync::mpsc;

use codescribe_server::common::time::FixedClock;
use codescribe_server::domain::{
    Access, AccessClaims, ConnectionId, MessagePusher, MessageText, RoomId, RoomRegistry,
};
use codescribe_server::infrastructure::message_pusher::WebSocketMessagePusher;
use codescribe_server::infrastructure::repository::{InMemoryChatHistory, InMemoryRoomRegistry};
use codescribe_server::infrastructure::token::AccessTokenCodec;
use codescribe_server::usecase::{
    ChangeLanguageUseCase, CreateRoomUseCase, DisconnectUseCase, JoinRoomUseCase, PresenceTracker,
    SendMessageUseCase, UpdateCodeUseCase,
};

const NOW: i64 = 1_700_000_000_000;

struct TestApp {
    registry: Arc<InMemoryRoomRegistry>,
    pusher: Arc<WebSocketMessagePusher>,
    create_room: CreateRoomUseCase,
    join_room: JoinRoomUseCase,
    update_code: UpdateCodeUseCase,
    change_language: ChangeLanguageUseCase,
    send_message: SendMessageUseCase,
    disconnect: DisconnectUseCase,
}

impl TestApp {
    fn new() -> Self {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let chat_history = Arc::new(InMemoryChatHistory::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let clock = Arc::new(FixedClock::new(NOW));
        let presence = Arc::new(PresenceTracker::new(pusher.clone()));
        Self {
            registry: registry.clone(),
            pusher: pusher.clone(),
            create_room: CreateRoomUseCase::new(registry.clone(), clock.clone()),
            join_room: JoinRoomUseCase::new(
                registry.clone(),
                chat_history.clone(),
                pusher.clone(),
                presence.clone(),
            ),
            update_code: UpdateCodeUseCase::new(registry.clone(), pusher.clone()),
            change_language: ChangeLanguageUseCase::new(registry.clone(), pusher.clone()),
            send_message: SendMessageUseCase::new(
                registry.clone(),
                chat_history.clone(),
                pusher.clone(),
                clock,
            ),
            disconnect: DisconnectUseCase::new(registry, chat_history, pusher, presence),
        }
    }

    /// Register a channel-backed connection, as the WebSocket handler does on
    /// upgrade.
    async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ConnectionId::generate();
        self.pusher.register_connection(id, tx).await;
        (id, rx)
    }
}

fn room_id(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}

#[tokio::test]
async fn test_join_replays_full_room_snapshot_in_order() {
    // given: a room with edited code, a changed language and one chat message
    let app = TestApp::new();
    app.create_room
        .execute(
            room_id("abcd12"),
            None,
            "print(1)".to_string(),
            "python".to_string(),
        )
        .await
        .unwrap();
    let (editor, mut editor_rx) = app.connect().await;
    app.join_room
        .execute(room_id("abcd12"), editor)
        .await
        .unwrap();
    app.send_message
        .execute(
            room_id("abcd12"),
            "alice".to_string(),
            MessageText::new("hi".to_string()).unwrap(),
        )
        .await
        .unwrap();
    drain(&mut editor_rx);

    // when: a second participant joins
    let (joiner, mut joiner_rx) = app.connect().await;
    app.join_room
        .execute(room_id("abcd12"), joiner)
        .await
        .unwrap();

    // then: the joiner sees ack, code, language, history, then the count
    let frames = drain(&mut joiner_rx);
    assert_eq!(
        frames,
        vec![
            r#"{"event":"roomJoined","roomId":"abcd12"}"#.to_string(),
            r#"{"event":"updatedCode","roomId":"abcd12","code":"print(1)","senderId":"server"}"#
                .to_string(),
            r#"{"event":"languageChange","roomId":"abcd12","language":"python"}"#.to_string(),
            format!(
                r#"{{"event":"chatHistory","messages":[{{"sender":"alice","text":"hi","timestamp":{NOW}}}]}}"#
            ),
            r#"{"event":"roomMembers","count":2}"#.to_string(),
        ]
    );
    // and: the existing member only sees the membership update
    assert_eq!(
        drain(&mut editor_rx),
        vec![r#"{"event":"roomMembers","count":2}"#.to_string()]
    );
}

#[tokio::test]
async fn test_joining_an_unknown_room_is_rejected() {
    // given:
    let app = TestApp::new();
    let (conn, mut rx) = app.connect().await;

    // when:
    let result = app.join_room.execute(room_id("nope99"), conn).await;

    // then: no room was created as a side effect, nothing was pushed
    assert!(result.is_err());
    assert!(!app.registry.exists(&room_id("nope99")).await);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_code_edits_reach_peers_but_never_echo_to_the_editor() {
    // given: two members of the same room
    let app = TestApp::new();
    app.create_room
        .execute(room_id("abcd12"), None, String::new(), "java".to_string())
        .await
        .unwrap();
    let (alice, mut alice_rx) = app.connect().await;
    let (bob, mut bob_rx) = app.connect().await;
    app.join_room
        .execute(room_id("abcd12"), alice)
        .await
        .unwrap();
    app.join_room.execute(room_id("abcd12"), bob).await.unwrap();
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    // when: alice pushes two successive edits
    app.update_code
        .execute(
            room_id("abcd12"),
            "v1".to_string(),
            "tab-alice".to_string(),
            alice,
        )
        .await
        .unwrap();
    app.update_code
        .execute(
            room_id("abcd12"),
            "v2".to_string(),
            "tab-alice".to_string(),
            alice,
        )
        .await
        .unwrap();

    // then: bob receives both edits in order, with the sender id relayed
    assert_eq!(
        drain(&mut bob_rx),
        vec![
            r#"{"event":"updatedCode","roomId":"abcd12","code":"v1","senderId":"tab-alice"}"#
                .to_string(),
            r#"{"event":"updatedCode","roomId":"abcd12","code":"v2","senderId":"tab-alice"}"#
                .to_string(),
        ]
    );
    // and: alice never hears her own edits back
    assert!(drain(&mut alice_rx).is_empty());
    // and: the registry holds the last write
    let room = app.registry.get(&room_id("abcd12")).await.unwrap();
    assert_eq!(room.code, "v2");
}

#[tokio::test]
async fn test_language_changes_reach_every_member_including_the_changer() {
    // given:
    let app = TestApp::new();
    app.create_room
        .execute(room_id("abcd12"), None, String::new(), "java".to_string())
        .await
        .unwrap();
    let (alice, mut alice_rx) = app.connect().await;
    let (bob, mut bob_rx) = app.connect().await;
    app.join_room
        .execute(room_id("abcd12"), alice)
        .await
        .unwrap();
    app.join_room.execute(room_id("abcd12"), bob).await.unwrap();
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    // when:
    app.change_language
        .execute(room_id("abcd12"), "rust".to_string())
        .await
        .unwrap();

    // then: both members converge on the new language
    let expected = r#"{"event":"languageChange","roomId":"abcd12","language":"rust"}"#;
    assert_eq!(drain(&mut alice_rx), vec![expected.to_string()]);
    assert_eq!(drain(&mut bob_rx), vec![expected.to_string()]);
    let room = app.registry.get(&room_id("abcd12")).await.unwrap();
    assert_eq!(room.language, "rust");
}

#[tokio::test]
async fn test_chat_messages_fan_out_to_all_members_with_server_timestamps() {
    // given:
    let app = TestApp::new();
    app.create_room
        .execute(room_id("abcd12"), None, String::new(), "java".to_string())
        .await
        .unwrap();
    let (alice, mut alice_rx) = app.connect().await;
    let (bob, mut bob_rx) = app.connect().await;
    app.join_room
        .execute(room_id("abcd12"), alice)
        .await
        .unwrap();
    app.join_room.execute(room_id("abcd12"), bob).await.unwrap();
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    // when:
    app.send_message
        .execute(
            room_id("abcd12"),
            "alice".to_string(),
            MessageText::new("hello".to_string()).unwrap(),
        )
        .await
        .unwrap();

    // then: sender included, timestamp assigned by the server clock
    let expected = format!(
        r#"{{"event":"receiveMessage","sender":"alice","text":"hello","timestamp":{NOW}}}"#
    );
    assert_eq!(drain(&mut alice_rx), vec![expected.clone()]);
    assert_eq!(drain(&mut bob_rx), vec![expected]);
}

#[tokio::test]
async fn test_departures_decrement_presence_and_empty_rooms_are_torn_down() {
    // given: two members
    let app = TestApp::new();
    app.create_room
        .execute(room_id("abcd12"), None, String::new(), "java".to_string())
        .await
        .unwrap();
    let (alice, mut alice_rx) = app.connect().await;
    let (bob, _bob_rx) = app.connect().await;
    app.join_room
        .execute(room_id("abcd12"), alice)
        .await
        .unwrap();
    app.join_room.execute(room_id("abcd12"), bob).await.unwrap();
    drain(&mut alice_rx);

    // when: bob disconnects
    app.disconnect.execute(bob).await;

    // then: alice sees the decremented count and the room survives
    assert_eq!(
        drain(&mut alice_rx),
        vec![r#"{"event":"roomMembers","count":1}"#.to_string()]
    );
    assert!(app.registry.exists(&room_id("abcd12")).await);

    // when: the last member disconnects too
    app.disconnect.execute(alice).await;

    // then: the room is gone and cannot be rejoined
    assert!(!app.registry.exists(&room_id("abcd12")).await);
    let (late, mut late_rx) = app.connect().await;
    assert!(app.join_room.execute(room_id("abcd12"), late).await.is_err());
    assert!(drain(&mut late_rx).is_empty());
}

#[tokio::test]
async fn test_chat_history_does_not_survive_room_teardown() {
    // given: a room whose only member chats and leaves
    let app = TestApp::new();
    app.create_room
        .execute(room_id("abcd12"), None, String::new(), "java".to_string())
        .await
        .unwrap();
    let (alice, _alice_rx) = app.connect().await;
    app.join_room
        .execute(room_id("abcd12"), alice)
        .await
        .unwrap();
    app.send_message
        .execute(
            room_id("abcd12"),
            "alice".to_string(),
            MessageText::new("ghost".to_string()).unwrap(),
        )
        .await
        .unwrap();
    app.disconnect.execute(alice).await;

    // when: the room is recreated under the same id and someone joins
    app.create_room
        .execute(room_id("abcd12"), None, String::new(), "java".to_string())
        .await
        .unwrap();
    let (bob, mut bob_rx) = app.connect().await;
    app.join_room.execute(room_id("abcd12"), bob).await.unwrap();

    // then: the replayed history is empty
    let frames = drain(&mut bob_rx);
    assert!(frames.contains(&r#"{"event":"chatHistory","messages":[]}"#.to_string()));
}

#[tokio::test]
async fn test_traffic_is_isolated_between_rooms() {
    // given: two rooms with one member each
    let app = TestApp::new();
    app.create_room
        .execute(room_id("room-a"), None, String::new(), "java".to_string())
        .await
        .unwrap();
    app.create_room
        .execute(room_id("room-b"), None, String::new(), "java".to_string())
        .await
        .unwrap();
    let (alice, mut alice_rx) = app.connect().await;
    let (bob, mut bob_rx) = app.connect().await;
    app.join_room
        .execute(room_id("room-a"), alice)
        .await
        .unwrap();
    app.join_room.execute(room_id("room-b"), bob).await.unwrap();
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    // when: activity happens in room-a only
    app.change_language
        .execute(room_id("room-a"), "go".to_string())
        .await
        .unwrap();
    app.send_message
        .execute(
            room_id("room-a"),
            "alice".to_string(),
            MessageText::new("only here".to_string()).unwrap(),
        )
        .await
        .unwrap();

    // then: bob observes none of it
    assert_eq!(drain(&mut alice_rx).len(), 2);
    assert!(drain(&mut bob_rx).is_empty());
}

#[tokio::test]
async fn test_duplicate_room_creation_is_rejected_without_clobbering_state() {
    // given: a room with an edit already applied
    let app = TestApp::new();
    app.create_room
        .execute(
            room_id("abcd12"),
            Some("owner1".to_string()),
            "original".to_string(),
            "python".to_string(),
        )
        .await
        .unwrap();

    // when: a second creation under the same id
    let result = app
        .create_room
        .execute(room_id("abcd12"), None, String::new(), "java".to_string())
        .await;

    // then: rejected, original snapshot intact
    assert!(result.is_err());
    let room = app.registry.get(&room_id("abcd12")).await.unwrap();
    assert_eq!(room.code, "original");
    assert_eq!(room.language, "python");
    assert_eq!(room.owner, "owner1");
}

#[test]
fn test_access_token_round_trip_and_owner_upgrade() {
    // given: a codec and a read-level token for the room owner
    let codec = AccessTokenCodec::new("secret");
    let claims = AccessClaims::with_default_expiry(
        "abcd12".to_string(),
        "owner1".to_string(),
        Access::Read,
        NOW,
    );

    // when:
    let token = codec.encode(&claims);
    let decoded = codec.decode(&token).unwrap();

    // then: claims survive the trip and the owner is upgraded to write
    assert_eq!(decoded, claims);
    assert!(!decoded.is_expired(NOW));
    assert_eq!(decoded.effective_access("owner1"), Access::Write);
    assert_eq!(decoded.effective_access("someone-else"), Access::Read);
}

#[test]
fn test_tampered_access_token_is_rejected() {
    // given:
    let codec = AccessTokenCodec::new("secret");
    let claims = AccessClaims::with_default_expiry(
        "abcd12".to_string(),
        "u1".to_string(),
        Access::Read,
        NOW,
    );
    let token = codec.encode(&claims);

    // when: the payload half is swapped for one claiming write access
    let forged_claims = AccessClaims {
        access: Access::Write,
        ..claims
    };
    let forged = format!(
        "{}.{}",
        codec.encode(&forged_claims).split('.').next().unwrap(),
        token.split('.').nth(1).unwrap()
    );

    // then:
    assert!(codec.decode(&forged).is_none());
    assert!(codec.decode(&token).is_some());
}
