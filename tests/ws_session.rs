//! End-to-end checks over a real WebSocket connection.

use axum::{routing::get, Router};
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use drawparty_rs::{config::GameConfig, websocket, AppState};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server() -> String {
    let state = AppState::new(GameConfig::financial());
    let app = Router::new()
        .route("/ws", get(websocket::handler::ws_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("ws://{}/ws", addr)
}

async fn connect(url: &str) -> WsClient {
    let (client, _) = connect_async(url).await.unwrap();
    client
}

async fn send(client: &mut WsClient, command: Value) {
    client
        .send(Message::Text(command.to_string()))
        .await
        .unwrap();
}

async fn next_event(client: &mut WsClient) -> Value {
    loop {
        let msg = client
            .next()
            .await
            .expect("connection closed")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).expect("invalid event json");
        }
    }
}

async fn next_event_named(client: &mut WsClient, name: &str) -> Value {
    loop {
        let event = next_event(client).await;
        if event["event"] == name {
            return event;
        }
    }
}

#[tokio::test]
async fn test_create_join_and_team_assignment() {
    let url = spawn_server().await;

    let mut host = connect(&url).await;
    send(&mut host, json!({"action": "createRoom"})).await;
    let created = next_event_named(&mut host, "roomCreated").await;
    assert_eq!(created["isHost"], true);
    let code = created["roomCode"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);

    let mut guests = Vec::new();
    for name in ["Ana", "Ben", "Cleo", "Dee", "Eli"] {
        let mut guest = connect(&url).await;
        send(
            &mut guest,
            json!({"action": "joinRoom", "roomCode": code, "playerName": name}),
        )
        .await;
        let joined = next_event_named(&mut guest, "joined").await;
        assert_eq!(joined["isHost"], false);
        guests.push(guest);
    }

    send(&mut host, json!({"action": "assignTeams", "roomCode": code})).await;
    let update = loop {
        let update = next_event_named(&mut host, "roomUpdate").await;
        if !update["teams"].as_array().unwrap().is_empty() {
            break update;
        }
    };

    let teams = update["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 2);
    let mut sizes: Vec<usize> = teams
        .iter()
        .map(|t| t["players"].as_array().unwrap().len())
        .collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![2, 3]);
    assert!(update["players"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| !p["teamId"].is_null()));
}

#[tokio::test]
async fn test_join_with_unknown_code_is_rejected() {
    let url = spawn_server().await;

    let mut client = connect(&url).await;
    send(
        &mut client,
        json!({"action": "joinRoom", "roomCode": "NOSUCH", "playerName": "Ana"}),
    )
    .await;
    let error = next_event_named(&mut client, "error").await;
    assert_eq!(error["message"], "Room not found");
}

#[tokio::test]
async fn test_round_flow_over_the_wire() {
    let url = spawn_server().await;

    let mut host = connect(&url).await;
    send(&mut host, json!({"action": "createRoom"})).await;
    let created = next_event_named(&mut host, "roomCreated").await;
    let code = created["roomCode"].as_str().unwrap().to_string();

    let mut ana = connect(&url).await;
    send(
        &mut ana,
        json!({"action": "joinRoom", "roomCode": code, "playerName": "Ana"}),
    )
    .await;
    next_event_named(&mut ana, "joined").await;

    let mut ben = connect(&url).await;
    send(
        &mut ben,
        json!({"action": "joinRoom", "roomCode": code, "playerName": "Ben"}),
    )
    .await;
    next_event_named(&mut ben, "joined").await;

    send(&mut host, json!({"action": "assignTeams", "roomCode": code})).await;
    send(&mut host, json!({"action": "startGame", "roomCode": code})).await;

    // Everyone hears the round start; only the host gets the word
    let started = next_event_named(&mut ana, "roundStarted").await;
    assert_eq!(started["currentRound"], 1);
    assert_eq!(started["totalRounds"], 3);
    let word_event = next_event_named(&mut host, "wordToDraw").await;
    let word = word_event["word"].as_str().unwrap().to_string();
    assert_eq!(started["wordLength"], word.chars().count());

    // A correct guess is acknowledged privately and scores both ledgers
    send(
        &mut ana,
        json!({"action": "guess", "roomCode": code, "guess": word.to_uppercase()}),
    )
    .await;
    let ack = next_event_named(&mut ana, "correctGuess").await;
    assert_eq!(ack["word"], word);
    assert!(ack["points"].as_u64().unwrap() >= 100);

    // Once Ben answers too, the round break is forced immediately
    send(
        &mut ben,
        json!({"action": "guess", "roomCode": code, "guess": format!("  {word} ")}),
    )
    .await;
    let round_break = next_event_named(&mut ben, "roundBreak").await;
    assert_eq!(round_break["word"], word);
    assert_eq!(round_break["currentRound"], 1);

    // The host hands out a bonus during the break
    send(
        &mut host,
        json!({"action": "awardBonus", "roomCode": code, "teamId": 0, "points": 500}),
    )
    .await;
    let bonus = next_event_named(&mut ana, "bonusAwarded").await;
    assert_eq!(bonus["points"], 500);
}

#[tokio::test]
async fn test_host_disconnect_notifies_players() {
    let url = spawn_server().await;

    let mut host = connect(&url).await;
    send(&mut host, json!({"action": "createRoom"})).await;
    let created = next_event_named(&mut host, "roomCreated").await;
    let code = created["roomCode"].as_str().unwrap().to_string();

    let mut ana = connect(&url).await;
    send(
        &mut ana,
        json!({"action": "joinRoom", "roomCode": code, "playerName": "Ana"}),
    )
    .await;
    next_event_named(&mut ana, "joined").await;

    host.close(None).await.unwrap();
    next_event_named(&mut ana, "hostDisconnected").await;

    // The room is gone now
    let mut late = connect(&url).await;
    send(
        &mut late,
        json!({"action": "joinRoom", "roomCode": code, "playerName": "Late"}),
    )
    .await;
    let error = next_event_named(&mut late, "error").await;
    assert_eq!(error["message"], "Room not found");
}
