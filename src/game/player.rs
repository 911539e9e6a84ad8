use axum::extract::ws::Message;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// A guessing participant in a room.
///
/// The connection id doubles as the player identity; the sender is the
/// outbound half of the player's WebSocket channel and is skipped when
/// the player appears in a state snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub team_id: Option<usize>,
    pub score: u32,
    #[serde(skip_serializing)]
    pub sender: UnboundedSender<Message>,
}

impl Player {
    pub fn new(id: Uuid, name: String, sender: UnboundedSender<Message>) -> Self {
        Self {
            id,
            name,
            team_id: None,
            score: 0,
            sender,
        }
    }

    /// Send a message to this player.
    /// Returns false if the channel is closed.
    pub fn send(&self, message: Message) -> bool {
        self.sender.send(message).is_ok()
    }
}
