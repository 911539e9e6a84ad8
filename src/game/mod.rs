pub mod names;
pub mod player;
pub mod registry;
pub mod reveal;
pub mod room;
pub mod scoring;
pub mod team;

pub use player::Player;
pub use registry::RoomRegistry;
pub use room::{GamePhase, RevealedLetter, Room, RoundOutcome};
pub use team::Team;
