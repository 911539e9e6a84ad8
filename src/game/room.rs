use std::collections::HashSet;
use std::time::{Duration, Instant};

use axum::extract::ws::Message;
use rand::seq::SliceRandom;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{names, scoring, Player, Team};
use crate::websocket::message::{ServerMessage, Stroke};

/// Lifecycle of a room, terminal at `Ended`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    Waiting,
    Playing,
    RoundBreak,
    Ended,
}

/// One disclosed letter of the secret word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedLetter {
    pub position: usize,
    pub letter: char,
}

/// What a `nextRound` command led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Started(u32),
    Ended,
}

/// One game session and everything it owns: players, teams and the
/// transient state of the round in progress.
///
/// All mutation happens through the registry lock, so methods can
/// update several fields without further synchronization.
pub struct Room {
    code: String,
    host: Uuid,
    host_sender: UnboundedSender<Message>,
    players: Vec<Player>,
    teams: Vec<Team>,
    phase: GamePhase,
    current_round: u32,
    current_word: Option<String>,
    drawing: Vec<Stroke>,
    round_started: Option<Instant>,
    revealed: Vec<RevealedLetter>,
    answered: HashSet<Uuid>,
    used_team_names: HashSet<String>,
}

impl Room {
    pub fn new(code: String, host: Uuid, host_sender: UnboundedSender<Message>) -> Self {
        Self {
            code,
            host,
            host_sender,
            players: Vec::new(),
            teams: Vec::new(),
            phase: GamePhase::Waiting,
            current_round: 0,
            current_word: None,
            drawing: Vec::new(),
            round_started: None,
            revealed: Vec::new(),
            answered: HashSet::new(),
            used_team_names: HashSet::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn host(&self) -> Uuid {
        self.host
    }

    pub fn is_host(&self, id: Uuid) -> bool {
        self.host == id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn revealed(&self) -> &[RevealedLetter] {
        &self.revealed
    }

    pub fn drawing(&self) -> &[Stroke] {
        &self.drawing
    }

    pub fn contains_player(&self, id: Uuid) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    /// Add a joining player. Only possible before the game starts.
    pub fn add_player(
        &mut self,
        id: Uuid,
        name: String,
        sender: UnboundedSender<Message>,
    ) -> Result<(), GameError> {
        if self.phase != GamePhase::Waiting {
            return Err(GameError::GameInProgress);
        }
        tracing::info!("{} joined room {}", name, self.code);
        self.players.push(Player::new(id, name, sender));
        Ok(())
    }

    /// Remove a player, detaching them from their team and from the
    /// answered set for the round in progress.
    pub fn remove_player(&mut self, id: Uuid) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == id)?;
        let player = self.players.remove(index);
        if let Some(team_id) = player.team_id {
            if let Some(team) = self.teams.iter_mut().find(|t| t.id == team_id) {
                team.players.retain(|member| *member != id);
            }
        }
        self.answered.remove(&id);
        Some(player)
    }

    /// Shuffle all players into fresh teams.
    ///
    /// Re-invoking reshuffles everyone and discards prior team scores;
    /// player scores are untouched. Team sizes never differ by more
    /// than one because players are dealt round-robin.
    pub fn assign_teams(&mut self, caller: Uuid) -> Result<(), GameError> {
        if caller != self.host {
            return Err(GameError::NotHost);
        }
        if self.players.len() < 2 {
            return Err(GameError::InsufficientPlayers);
        }

        let mut order: Vec<usize> = (0..self.players.len()).collect();
        order.shuffle(&mut rand::thread_rng());

        let team_count = (self.players.len() / 2).clamp(2, 4);
        self.teams.clear();
        for id in 0..team_count {
            let name = names::pick_team_name(&self.used_team_names);
            self.used_team_names.insert(name.clone());
            self.teams.push(Team::new(id, name));
        }

        for (slot, &player_index) in order.iter().enumerate() {
            let team_id = slot % team_count;
            let player = &mut self.players[player_index];
            player.team_id = Some(team_id);
            self.teams[team_id].players.push(player.id);
        }

        Ok(())
    }

    /// Start the game from the waiting room. Host only.
    pub fn start_game(&mut self, caller: Uuid, config: &GameConfig) -> Result<u32, GameError> {
        if caller != self.host {
            return Err(GameError::NotHost);
        }
        if self.phase != GamePhase::Waiting {
            return Err(GameError::GameInProgress);
        }
        self.start_round(1, config)?;
        Ok(1)
    }

    /// Advance past a round break: either start the next round or end
    /// the game after the last one. Host only.
    pub fn next_round(
        &mut self,
        caller: Uuid,
        config: &GameConfig,
    ) -> Result<RoundOutcome, GameError> {
        if caller != self.host {
            return Err(GameError::NotHost);
        }
        if self.current_round >= config.total_rounds() {
            self.end_game();
            return Ok(RoundOutcome::Ended);
        }
        let round = self.current_round + 1;
        self.start_round(round, config)?;
        Ok(RoundOutcome::Started(round))
    }

    fn start_round(&mut self, round: u32, config: &GameConfig) -> Result<(), GameError> {
        let round_config = config.round(round).ok_or(GameError::RoundNotActive)?.clone();
        let word = config
            .pick_word(round)
            .ok_or(GameError::RoundNotActive)?
            .to_string();

        self.phase = GamePhase::Playing;
        self.current_round = round;
        self.drawing.clear();
        self.revealed.clear();
        self.answered.clear();
        self.round_started = Some(Instant::now());

        // Spaces are disclosed structurally and never count as reveals
        let space_positions: Vec<usize> = word
            .chars()
            .enumerate()
            .filter(|(_, c)| c.is_whitespace())
            .map(|(i, _)| i)
            .collect();
        let word_length = word.chars().count();
        self.current_word = Some(word.clone());

        tracing::info!("room {}: round {} started", self.code, round);

        self.broadcast(&ServerMessage::RoundStarted {
            current_round: round,
            word_length,
            round_config,
            total_rounds: config.total_rounds(),
            space_positions,
        });

        let definition = config.definition(&word).to_string();
        self.send_to_host(&ServerMessage::WordToDraw { word, definition });

        Ok(())
    }

    /// Replace the drawing snapshot and relay it to the whole room.
    /// Host only, and only while a round is running.
    pub fn update_drawing(&mut self, caller: Uuid, drawing: Vec<Stroke>) -> Result<(), GameError> {
        if caller != self.host {
            return Err(GameError::NotHost);
        }
        if self.phase != GamePhase::Playing {
            return Err(GameError::RoundNotActive);
        }
        self.drawing = drawing.clone();
        self.broadcast(&ServerMessage::DrawingUpdate { drawing });
        Ok(())
    }

    /// Adjudicate a guess from a player.
    ///
    /// A wrong guess is not an error; the caller learns nothing until
    /// they get it right. Scoring updates the player and their team in
    /// the same step, and once every guessing player has answered the
    /// round break starts without waiting for the timer.
    pub fn handle_guess(
        &mut self,
        config: &GameConfig,
        player_id: Uuid,
        guess: &str,
    ) -> Result<(), GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::RoundNotActive);
        }
        // The host draws; their guesses are not adjudicated
        if player_id == self.host {
            return Err(GameError::UnresolvedTeam);
        }
        if self.answered.contains(&player_id) {
            return Err(GameError::AlreadyAnswered);
        }
        let player_index = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(GameError::UnresolvedTeam)?;
        let team_id = self.players[player_index]
            .team_id
            .ok_or(GameError::UnresolvedTeam)?;
        let team_index = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(GameError::UnresolvedTeam)?;
        let word = self
            .current_word
            .clone()
            .ok_or(GameError::RoundNotActive)?;

        if guess.trim().to_lowercase() != word.to_lowercase() {
            return Ok(());
        }

        let round_config = config
            .round(self.current_round)
            .ok_or(GameError::RoundNotActive)?;
        let points = scoring::guess_points(self.round_elapsed(), round_config);

        self.players[player_index].score += points;
        self.teams[team_index].score += points;
        self.answered.insert(player_id);

        let player_name = self.players[player_index].name.clone();
        let team_name = self.teams[team_index].name.clone();
        tracing::info!(
            "room {}: {} guessed the word for {} points",
            self.code,
            player_name,
            points
        );

        self.send_to(
            player_id,
            &ServerMessage::CorrectGuess {
                player_name,
                team_name,
                word,
                points,
            },
        );
        self.broadcast_update();

        if self.all_guessers_answered() {
            self.begin_round_break(config);
        }

        Ok(())
    }

    /// Team-only bonus points, awarded by the host during the break
    pub fn award_bonus(
        &mut self,
        caller: Uuid,
        team_id: usize,
        points: u32,
    ) -> Result<(), GameError> {
        if caller != self.host {
            return Err(GameError::NotHost);
        }
        let team_index = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(GameError::UnresolvedTeam)?;
        self.teams[team_index].score += points;
        let team_name = self.teams[team_index].name.clone();

        self.broadcast(&ServerMessage::BonusAwarded { team_name, points });
        self.broadcast_update();
        Ok(())
    }

    /// Disclose one random unrevealed, non-space letter and broadcast
    /// the full revealed set. Returns `None` once nothing is left.
    pub fn reveal_random_letter(&mut self) -> Option<RevealedLetter> {
        let word = self.current_word.as_ref()?;
        let chars: Vec<char> = word.chars().collect();
        let taken: HashSet<usize> = self.revealed.iter().map(|r| r.position).collect();

        let mut unrevealed = Vec::new();
        for (position, c) in chars.iter().enumerate() {
            if !c.is_whitespace() && !taken.contains(&position) {
                unrevealed.push(position);
            }
        }

        let position = *unrevealed.choose(&mut rand::thread_rng())?;
        let entry = RevealedLetter {
            position,
            letter: chars[position],
        };
        self.revealed.push(entry.clone());

        self.broadcast(&ServerMessage::LetterRevealed {
            revealed_letters: self.revealed.clone(),
        });
        Some(entry)
    }

    /// End the running round and open the break
    pub fn begin_round_break(&mut self, config: &GameConfig) {
        self.phase = GamePhase::RoundBreak;
        let word = self.current_word.clone().unwrap_or_default();
        let definition = config.definition(&word).to_string();
        tracing::info!("room {}: round {} over", self.code, self.current_round);
        self.broadcast(&ServerMessage::RoundBreak {
            word,
            definition,
            current_round: self.current_round,
        });
    }

    /// Final standings: teams ranked by score, players as-is
    pub fn end_game(&mut self) {
        self.phase = GamePhase::Ended;
        let mut ranked_teams = self.teams.clone();
        ranked_teams.sort_by(|a, b| b.score.cmp(&a.score));
        tracing::info!("room {}: game over", self.code);
        self.broadcast(&ServerMessage::GameEnded {
            ranked_teams,
            players: self.players.clone(),
        });
    }

    pub fn round_elapsed(&self) -> Duration {
        self.round_started
            .map(|started| started.elapsed())
            .unwrap_or_default()
    }

    pub fn time_limit_reached(&self, config: &GameConfig) -> bool {
        match config.round(self.current_round) {
            Some(round_config) => {
                self.round_elapsed() >= Duration::from_secs(round_config.time_limit)
            }
            None => false,
        }
    }

    fn all_guessers_answered(&self) -> bool {
        let guessers = self.players.iter().filter(|p| p.id != self.host).count();
        guessers > 0 && self.answered.len() >= guessers
    }

    /// Fan a message out to the host and every player. The host is
    /// deduplicated in case they also joined as a player.
    pub fn broadcast(&self, message: &ServerMessage) {
        let ws_message = message.to_ws_message();
        let _ = self.host_sender.send(ws_message.clone());
        for player in &self.players {
            if player.id != self.host {
                player.send(ws_message.clone());
            }
        }
    }

    /// Broadcast the current room snapshot
    pub fn broadcast_update(&self) {
        self.broadcast(&ServerMessage::RoomUpdate {
            teams: self.teams.clone(),
            players: self.players.clone(),
            game_state: self.phase,
            current_round: self.current_round,
        });
    }

    pub fn send_to_host(&self, message: &ServerMessage) {
        let _ = self.host_sender.send(message.to_ws_message());
    }

    pub fn send_to(&self, player_id: Uuid, message: &ServerMessage) {
        if let Some(player) = self.players.iter().find(|p| p.id == player_id) {
            player.send(message.to_ws_message());
        }
    }
}
