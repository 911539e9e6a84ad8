use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedSender};
use uuid::Uuid;

use crate::error::GameError;
use crate::game::{reveal, RoundOutcome};
use crate::websocket::message::{ClientMessage, ServerMessage, Stroke};
use crate::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection from upgrade to disconnect
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    // The connection id is the player identity for its lifetime
    let conn_id = Uuid::new_v4();
    tracing::info!("connection {} opened", conn_id);

    // Forward queued messages to the socket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_text_message(&state, conn_id, &tx, &text).await;
            }
            Ok(Message::Close(_)) => {
                tracing::info!("connection {} sent close frame", conn_id);
                break;
            }
            Ok(_) => {
                // Ignore binary, ping and pong
            }
            Err(e) => {
                tracing::warn!("WebSocket error for {}: {}", conn_id, e);
                break;
            }
        }
    }

    // Cleanup runs before the connection is forgotten
    handle_disconnect(&state, conn_id).await;

    send_task.abort();
    tracing::info!("connection {} closed", conn_id);
}

/// Decode a command and route it to the room it addresses
async fn handle_text_message(
    state: &AppState,
    conn_id: Uuid,
    tx: &UnboundedSender<Message>,
    text: &str,
) {
    let command = match serde_json::from_str::<ClientMessage>(text) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("invalid message from {}: {}", conn_id, e);
            return;
        }
    };

    match command {
        ClientMessage::CreateRoom => create_room(state, conn_id, tx).await,
        ClientMessage::JoinRoom {
            room_code,
            player_name,
        } => join_room(state, conn_id, tx, &room_code, player_name).await,
        ClientMessage::AssignTeams { room_code } => {
            assign_teams(state, conn_id, tx, &room_code).await
        }
        ClientMessage::StartGame { room_code } => start_game(state, conn_id, &room_code).await,
        ClientMessage::Draw { room_code, drawing } => {
            draw(state, conn_id, &room_code, drawing).await
        }
        ClientMessage::Guess { room_code, guess } => {
            handle_guess(state, conn_id, &room_code, &guess).await
        }
        ClientMessage::AwardBonus {
            room_code,
            team_id,
            points,
        } => award_bonus(state, conn_id, &room_code, team_id, points).await,
        ClientMessage::NextRound { room_code } => next_round(state, conn_id, &room_code).await,
    }
}

async fn create_room(state: &AppState, conn_id: Uuid, tx: &UnboundedSender<Message>) {
    let mut rooms = state.rooms.write().await;
    let room = rooms.create(conn_id, tx.clone());
    let room_code = room.code().to_string();
    tracing::info!("room {} created by {}", room_code, conn_id);

    let _ = tx.send(
        ServerMessage::RoomCreated {
            room_code,
            is_host: true,
        }
        .to_ws_message(),
    );
}

async fn join_room(
    state: &AppState,
    conn_id: Uuid,
    tx: &UnboundedSender<Message>,
    code: &str,
    name: String,
) {
    let mut rooms = state.rooms.write().await;
    let Some(room) = rooms.get_mut(code) else {
        send_error(tx, GameError::RoomNotFound);
        return;
    };

    match room.add_player(conn_id, name, tx.clone()) {
        Ok(()) => {
            let _ = tx.send(
                ServerMessage::Joined {
                    room_code: code.to_string(),
                    is_host: room.is_host(conn_id),
                }
                .to_ws_message(),
            );
            room.broadcast_update();
        }
        Err(e) => send_error(tx, e),
    }
}

async fn assign_teams(state: &AppState, conn_id: Uuid, tx: &UnboundedSender<Message>, code: &str) {
    let mut rooms = state.rooms.write().await;
    let Some(room) = rooms.get_mut(code) else {
        return;
    };

    match room.assign_teams(conn_id) {
        Ok(()) => room.broadcast_update(),
        Err(e @ GameError::InsufficientPlayers) => send_error(tx, e),
        Err(e) => tracing::debug!("assignTeams from {} ignored: {}", conn_id, e),
    }
}

async fn start_game(state: &AppState, conn_id: Uuid, code: &str) {
    let started = {
        let mut rooms = state.rooms.write().await;
        let Some(room) = rooms.get_mut(code) else {
            return;
        };
        room.start_game(conn_id, &state.config)
    };

    match started {
        Ok(round) => reveal::arm(state.clone(), code.to_string(), round),
        Err(e) => tracing::debug!("startGame from {} ignored: {}", conn_id, e),
    }
}

async fn draw(state: &AppState, conn_id: Uuid, code: &str, drawing: Vec<Stroke>) {
    let mut rooms = state.rooms.write().await;
    let Some(room) = rooms.get_mut(code) else {
        return;
    };

    if let Err(e) = room.update_drawing(conn_id, drawing) {
        tracing::debug!("draw from {} ignored: {}", conn_id, e);
    }
}

async fn handle_guess(state: &AppState, conn_id: Uuid, code: &str, guess: &str) {
    let mut rooms = state.rooms.write().await;
    let Some(room) = rooms.get_mut(code) else {
        return;
    };

    if let Err(e) = room.handle_guess(&state.config, conn_id, guess) {
        tracing::debug!("guess from {} ignored: {}", conn_id, e);
    }
}

async fn award_bonus(state: &AppState, conn_id: Uuid, code: &str, team_id: usize, points: u32) {
    let mut rooms = state.rooms.write().await;
    let Some(room) = rooms.get_mut(code) else {
        return;
    };

    if let Err(e) = room.award_bonus(conn_id, team_id, points) {
        tracing::debug!("awardBonus from {} ignored: {}", conn_id, e);
    }
}

async fn next_round(state: &AppState, conn_id: Uuid, code: &str) {
    let outcome = {
        let mut rooms = state.rooms.write().await;
        let Some(room) = rooms.get_mut(code) else {
            return;
        };
        room.next_round(conn_id, &state.config)
    };

    match outcome {
        Ok(RoundOutcome::Started(round)) => {
            reveal::arm(state.clone(), code.to_string(), round)
        }
        Ok(RoundOutcome::Ended) => {}
        Err(e) => tracing::debug!("nextRound from {} ignored: {}", conn_id, e),
    }
}

/// Remove a departed connection from its room.
///
/// A departing player is dropped and the room told; a departing host
/// takes the whole room with them.
async fn handle_disconnect(state: &AppState, conn_id: Uuid) {
    let mut rooms = state.rooms.write().await;
    for code in rooms.rooms_for_connection(conn_id) {
        let is_host = rooms
            .get(&code)
            .map(|room| room.is_host(conn_id))
            .unwrap_or(false);

        if is_host {
            if let Some(room) = rooms.remove(&code) {
                room.broadcast(&ServerMessage::HostDisconnected);
                tracing::info!("room {} closed, host {} disconnected", code, conn_id);
            }
        } else if let Some(room) = rooms.get_mut(&code) {
            if room.remove_player(conn_id).is_some() {
                room.broadcast_update();
                tracing::info!("player {} left room {}", conn_id, code);
            }
        }
    }
}

fn send_error(tx: &UnboundedSender<Message>, error: GameError) {
    let _ = tx.send(
        ServerMessage::Error {
            message: error.to_string(),
        }
        .to_ws_message(),
    );
}
