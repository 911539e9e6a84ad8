pub mod config;
pub mod error;
pub mod game;
pub mod websocket;

use std::sync::Arc;
use tokio::sync::RwLock;

use config::GameConfig;
use game::RoomRegistry;

/// Application state shared across all connections
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RwLock<RoomRegistry>>,
    pub config: Arc<GameConfig>,
}

impl AppState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(RoomRegistry::new())),
            config: Arc::new(config),
        }
    }
}
