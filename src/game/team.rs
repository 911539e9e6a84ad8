use serde::Serialize;
use uuid::Uuid;

/// A team of players competing in a room.
///
/// The team score accrues on its own: correct guesses add to both the
/// guesser and their team, while host bonuses are team-only, so the
/// team total can exceed the sum of its members' scores.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: usize,
    pub name: String,
    pub players: Vec<Uuid>,
    pub score: u32,
}

impl Team {
    pub fn new(id: usize, name: String) -> Self {
        Self {
            id,
            name,
            players: Vec::new(),
            score: 0,
        }
    }
}
