use std::time::Duration;

use crate::config::RoundConfig;

/// Minimum award for any correct guess made within the time limit
const MIN_POINTS: u32 = 100;

/// Points for a correct guess after `elapsed` time in a round.
///
/// Decreases linearly from `max_points` at the start of the round
/// toward zero at the time limit, floored at [`MIN_POINTS`]. A guess
/// after the time limit is worth nothing.
pub fn guess_points(elapsed: Duration, config: &RoundConfig) -> u32 {
    let elapsed_secs = elapsed.as_millis() as f64 / 1000.0;
    let time_limit = config.time_limit as f64;

    if elapsed_secs > time_limit {
        return 0;
    }

    let points_per_second = config.max_points as f64 / time_limit;
    let points = (config.max_points as f64 - elapsed_secs * points_per_second).round() as i64;

    points.max(MIN_POINTS as i64) as u32
}
