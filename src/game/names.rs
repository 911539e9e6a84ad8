use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

/// Characters a room code is built from
pub const ROOM_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a room code
pub const ROOM_CODE_LEN: usize = 6;

/// Alliterative finance-themed team names
const TEAM_NAMES: [&str; 30] = [
    "Budget Bandits",
    "Cash Crusaders",
    "Dividend Dynamos",
    "Equity Eagles",
    "Finance Falcons",
    "Growth Gurus",
    "Investment Interns",
    "Penny Pinchers",
    "Savings Savants",
    "Trading Titans",
    "Wealth Wizards",
    "Asset Avengers",
    "Capital Commanders",
    "Debt Destroyers",
    "Market Mavericks",
    "Portfolio Pirates",
    "Revenue Rangers",
    "Stock Sharks",
    "Tax Tacticians",
    "Value Victors",
    "Bullish Buffalos",
    "Compound Crusaders",
    "Diversified Dragons",
    "Economic Experts",
    "Fiscal Falcons",
    "Hedge Heroes",
    "Liquidity Legends",
    "Money Makers",
    "Net Worth Ninjas",
    "Profit Prophets",
];

/// Generate a random room code
pub fn generate_room_code() -> String {
    let mut rng = rand::thread_rng();
    (0..ROOM_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..ROOM_CODE_CHARSET.len());
            ROOM_CODE_CHARSET[idx] as char
        })
        .collect()
}

/// Pick a team name not yet used in the room.
///
/// Falls back to numbered names once the table is exhausted, so a name
/// is never repeated within one room.
pub fn pick_team_name(used: &HashSet<String>) -> String {
    let available: Vec<&str> = TEAM_NAMES
        .iter()
        .copied()
        .filter(|name| !used.contains(*name))
        .collect();

    if let Some(name) = available.choose(&mut rand::thread_rng()) {
        return (*name).to_string();
    }

    let mut n = TEAM_NAMES.len() + 1;
    loop {
        let candidate = format!("Team {n}");
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
