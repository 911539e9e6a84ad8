use std::collections::HashMap;

use axum::extract::ws::Message;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::game::{names, Room};

/// Owner of every live room, keyed by room code.
///
/// Handlers reach it through the shared lock in `AppState`; creating
/// and removing rooms happens under that lock, so codes stay unique
/// among live rooms.
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Create a fresh waiting room with a code no live room uses
    pub fn create(&mut self, host: Uuid, host_sender: UnboundedSender<Message>) -> &mut Room {
        let code = loop {
            let candidate = names::generate_room_code();
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
        };
        let room = Room::new(code.clone(), host, host_sender);
        self.rooms.entry(code).or_insert(room)
    }

    pub fn get(&self, code: &str) -> Option<&Room> {
        self.rooms.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    pub fn remove(&mut self, code: &str) -> Option<Room> {
        self.rooms.remove(code)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Codes of every room a connection belongs to, as host or player
    pub fn rooms_for_connection(&self, id: Uuid) -> Vec<String> {
        self.rooms
            .values()
            .filter(|room| room.is_host(id) || room.contains_player(id))
            .map(|room| room.code().to_string())
            .collect()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
