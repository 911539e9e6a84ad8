use std::time::Duration;

use tokio::time::interval;

use crate::game::GamePhase;
use crate::AppState;

/// Arm the letter-reveal scheduler for one round of a room.
///
/// The spawned task paces reveals so the whole word would be disclosed
/// across the round's time limit, and ends the round once that limit
/// has elapsed. Every tick re-validates that the round it was armed
/// for is still running, so a task left over from an earlier round can
/// never touch a later one; there is nothing to cancel explicitly.
pub fn arm(state: AppState, code: String, round: u32) {
    tokio::spawn(run(state, code, round));
}

async fn run(state: AppState, code: String, round: u32) {
    let period = {
        let rooms = state.rooms.read().await;
        let Some(room) = rooms.get(&code) else { return };
        let Some(round_config) = state.config.round(round) else {
            return;
        };
        let Some(word_length) = room.current_word().map(|w| w.chars().count()) else {
            return;
        };
        if word_length == 0 {
            return;
        }
        Duration::from_millis(round_config.time_limit * 1000 / word_length as u64)
    };

    let mut ticker = interval(period);
    // The first tick completes immediately; reveals start one period in
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let mut rooms = state.rooms.write().await;
        let Some(room) = rooms.get_mut(&code) else {
            tracing::debug!("reveal timer stopped, room {} is gone", code);
            break;
        };
        if room.phase() != GamePhase::Playing || room.current_round() != round {
            tracing::debug!("reveal timer stopped, room {} moved on", code);
            break;
        }

        room.reveal_random_letter();

        if room.time_limit_reached(&state.config) {
            room.begin_round_break(&state.config);
            break;
        }
    }
}
