use std::collections::HashMap;

use rand::seq::SliceRandom;
use serde::Serialize;

/// Shown when a word has no entry in the definition table
const FALLBACK_DEFINITION: &str = "A financial term";

/// Word pool tier, one per round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

/// Static per-round settings, looked up by 1-based round number
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundConfig {
    /// Round length in seconds
    pub time_limit: u64,
    /// Points awarded for an instant correct guess
    pub max_points: u32,
    pub difficulty: Difficulty,
    pub description: &'static str,
}

/// Static game content: round settings, word pools and definitions.
///
/// Supplied to the engine at startup; never mutated at runtime.
pub struct GameConfig {
    rounds: Vec<RoundConfig>,
    pools: HashMap<Difficulty, Vec<&'static str>>,
    definitions: HashMap<&'static str, &'static str>,
}

impl GameConfig {
    /// The built-in financial vocabulary game: three rounds of
    /// increasing difficulty with shrinking time limits.
    pub fn financial() -> Self {
        let rounds = vec![
            RoundConfig {
                time_limit: 90,
                max_points: 1000,
                difficulty: Difficulty::Basic,
                description: "Basic Terms - 90 seconds",
            },
            RoundConfig {
                time_limit: 75,
                max_points: 1500,
                difficulty: Difficulty::Intermediate,
                description: "Intermediate Terms - 75 seconds",
            },
            RoundConfig {
                time_limit: 60,
                max_points: 2000,
                difficulty: Difficulty::Advanced,
                description: "Advanced Terms - 60 seconds",
            },
        ];

        let mut pools = HashMap::new();
        pools.insert(
            Difficulty::Basic,
            vec![
                "budget",
                "debt",
                "credit card",
                "savings",
                "income",
                "expense",
                "loan",
                "interest",
                "bank",
                "cash",
                "wallet",
                "payment",
                "bill",
                "coin",
                "check",
            ],
        );
        pools.insert(
            Difficulty::Intermediate,
            vec![
                "stock market",
                "emergency fund",
                "credit score",
                "mortgage",
                "investment",
                "inflation",
                "dividend",
                "retirement",
                "insurance",
                "tax",
                "401k",
                "pension",
                "bond",
                "deposit",
                "withdrawal",
            ],
        );
        pools.insert(
            Difficulty::Advanced,
            vec![
                "diversification",
                "compound interest",
                "asset allocation",
                "capital gains",
                "liquidity",
                "depreciation",
                "equity",
                "portfolio",
                "mutual fund",
                "volatility",
                "amortization",
                "appreciation",
                "net worth",
                "fiscal policy",
                "bull market",
            ],
        );

        let definitions = HashMap::from([
            ("budget", "A plan for managing income and expenses"),
            ("debt", "Money owed to another person or organization"),
            ("credit card", "A card allowing purchases on borrowed money"),
            ("savings", "Money set aside for future use"),
            ("income", "Money received from work or investments"),
            ("expense", "Money spent on goods or services"),
            ("loan", "Money borrowed that must be repaid with interest"),
            ("interest", "The cost of borrowing money"),
            ("bank", "A financial institution that holds and lends money"),
            ("cash", "Physical money in bills and coins"),
            (
                "stock market",
                "A marketplace for buying and selling company shares",
            ),
            ("emergency fund", "Savings reserved for unexpected expenses"),
            ("credit score", "A number representing creditworthiness"),
            ("mortgage", "A loan specifically for purchasing property"),
            ("investment", "Putting money into assets to generate returns"),
            ("inflation", "The rate at which prices increase over time"),
            (
                "dividend",
                "A portion of company profits paid to shareholders",
            ),
            ("retirement", "The period after ending one's career"),
            ("insurance", "Protection against financial loss"),
            ("tax", "Government-required payment on income or purchases"),
            (
                "diversification",
                "Spreading investments across different assets",
            ),
            (
                "compound interest",
                "Interest calculated on initial principal and accumulated interest",
            ),
            (
                "asset allocation",
                "Dividing investments among different asset categories",
            ),
            (
                "capital gains",
                "Profit from selling an asset at a higher price",
            ),
            (
                "liquidity",
                "How easily an asset can be converted to cash",
            ),
            (
                "depreciation",
                "The decrease in value of an asset over time",
            ),
            ("equity", "Ownership value in an asset after debts"),
            ("portfolio", "A collection of financial investments"),
            (
                "mutual fund",
                "An investment pooling money from many investors",
            ),
            (
                "volatility",
                "The degree of variation in investment prices",
            ),
        ]);

        Self {
            rounds,
            pools,
            definitions,
        }
    }

    /// Total number of rounds in a game
    pub fn total_rounds(&self) -> u32 {
        self.rounds.len() as u32
    }

    /// Settings for the given 1-based round number
    pub fn round(&self, round: u32) -> Option<&RoundConfig> {
        if round == 0 {
            return None;
        }
        self.rounds.get(round as usize - 1)
    }

    /// Draw a uniform random word from the pool for the given round
    pub fn pick_word(&self, round: u32) -> Option<&'static str> {
        let config = self.round(round)?;
        let pool = self.pools.get(&config.difficulty)?;
        pool.choose(&mut rand::thread_rng()).copied()
    }

    /// Definition for a word, keyed case-insensitively
    pub fn definition(&self, word: &str) -> &'static str {
        self.definitions
            .get(word.to_lowercase().as_str())
            .copied()
            .unwrap_or(FALLBACK_DEFINITION)
    }
}
