use axum::extract::ws::Message;
use serde::{Deserialize, Serialize};

use crate::config::RoundConfig;
use crate::game::{GamePhase, Player, RevealedLetter, Team};

/// One sampled point of a stroke path. Color and size ride along with
/// every point; the server relays them untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: f64,
}

/// An ordered stroke path as drawn by the host
pub type Stroke = Vec<StrokePoint>;

/// Commands sent from a client to the server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    CreateRoom,
    JoinRoom {
        room_code: String,
        player_name: String,
    },
    AssignTeams {
        room_code: String,
    },
    StartGame {
        room_code: String,
    },
    Draw {
        room_code: String,
        drawing: Vec<Stroke>,
    },
    Guess {
        room_code: String,
        guess: String,
    },
    AwardBonus {
        room_code: String,
        team_id: usize,
        points: u32,
    },
    NextRound {
        room_code: String,
    },
}

/// Events sent from the server to room members
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    RoomCreated {
        room_code: String,
        is_host: bool,
    },
    Joined {
        room_code: String,
        is_host: bool,
    },
    Error {
        message: String,
    },
    RoomUpdate {
        teams: Vec<Team>,
        players: Vec<Player>,
        game_state: GamePhase,
        current_round: u32,
    },
    RoundStarted {
        current_round: u32,
        word_length: usize,
        round_config: RoundConfig,
        total_rounds: u32,
        space_positions: Vec<usize>,
    },
    /// Host-only: the secret word for the round
    WordToDraw {
        word: String,
        definition: String,
    },
    DrawingUpdate {
        drawing: Vec<Stroke>,
    },
    /// Carries the full revealed set so late deliveries stay consistent
    LetterRevealed {
        revealed_letters: Vec<RevealedLetter>,
    },
    /// Targeted at the player who guessed correctly
    CorrectGuess {
        player_name: String,
        team_name: String,
        word: String,
        points: u32,
    },
    BonusAwarded {
        team_name: String,
        points: u32,
    },
    RoundBreak {
        word: String,
        definition: String,
        current_round: u32,
    },
    GameEnded {
        ranked_teams: Vec<Team>,
        players: Vec<Player>,
    },
    HostDisconnected,
}

impl ServerMessage {
    pub fn to_ws_message(&self) -> Message {
        match serde_json::to_string(self) {
            Ok(json) => Message::Text(json),
            Err(e) => {
                tracing::error!("failed to encode server message: {}", e);
                Message::Text(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_create_room() {
        let msg: ClientMessage = serde_json::from_str(r#"{"action":"createRoom"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::CreateRoom));
    }

    #[test]
    fn test_parse_join_room() {
        let text = r#"{"action":"joinRoom","roomCode":"AB12CD","playerName":"Ana"}"#;
        let msg: ClientMessage = serde_json::from_str(text).unwrap();
        match msg {
            ClientMessage::JoinRoom {
                room_code,
                player_name,
            } => {
                assert_eq!(room_code, "AB12CD");
                assert_eq!(player_name, "Ana");
            }
            other => panic!("expected JoinRoom, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_award_bonus() {
        let text = r#"{"action":"awardBonus","roomCode":"AB12CD","teamId":1,"points":500}"#;
        let msg: ClientMessage = serde_json::from_str(text).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::AwardBonus {
                team_id: 1,
                points: 500,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_draw_with_stroke_points() {
        let text = json!({
            "action": "draw",
            "roomCode": "AB12CD",
            "drawing": [[
                {"x": 1.0, "y": 2.0, "color": "#ff0000", "size": 3.0},
                {"x": 4.0, "y": 5.0, "color": "#ff0000", "size": 3.0}
            ]],
        })
        .to_string();

        let msg: ClientMessage = serde_json::from_str(&text).unwrap();
        match msg {
            ClientMessage::Draw { drawing, .. } => {
                assert_eq!(drawing.len(), 1);
                assert_eq!(drawing[0].len(), 2);
                assert_eq!(drawing[0][0].color, "#ff0000");
            }
            other => panic!("expected Draw, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_action_fails() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"action":"selfDestruct"}"#).is_err());
    }

    #[test]
    fn test_serialize_error_event() {
        let msg = ServerMessage::Error {
            message: "Room not found".to_string(),
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
        assert_eq!(json["event"], "error");
        assert_eq!(json["message"], "Room not found");
    }

    #[test]
    fn test_serialize_round_started_event() {
        let config = crate::config::GameConfig::financial();
        let msg = ServerMessage::RoundStarted {
            current_round: 1,
            word_length: 11,
            round_config: config.round(1).unwrap().clone(),
            total_rounds: config.total_rounds(),
            space_positions: vec![6],
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
        assert_eq!(json["event"], "roundStarted");
        assert_eq!(json["currentRound"], 1);
        assert_eq!(json["wordLength"], 11);
        assert_eq!(json["totalRounds"], 3);
        assert_eq!(json["spacePositions"], json!([6]));
        assert_eq!(json["roundConfig"]["timeLimit"], 90);
        assert_eq!(json["roundConfig"]["maxPoints"], 1000);
        assert_eq!(json["roundConfig"]["difficulty"], "basic");
    }

    #[test]
    fn test_serialize_host_disconnected_event() {
        let json: serde_json::Value = serde_json::from_str(
            &serde_json::to_string(&ServerMessage::HostDisconnected).unwrap(),
        )
        .unwrap();
        assert_eq!(json["event"], "hostDisconnected");
    }
}
