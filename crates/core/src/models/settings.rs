use serde::{Deserialize, Serialize};

use super::activity::DEFAULT_ACTIVITY_CAPACITY;

/// Balance under which a withdrawal raises a low-balance notice.
pub const DEFAULT_LOW_BALANCE_THRESHOLD: f64 = 15.0;

/// Upper bound accepted for the activity feed capacity.
pub const MAX_ACTIVITY_CAPACITY: usize = 100;

/// User-configurable settings, stored inside the encrypted ledger file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Symbol prefixed to every displayed amount (e.g., "$", "€", "zł").
    pub currency_symbol: String,

    /// A withdrawal leaving the balance below this adds a low-balance notice.
    pub low_balance_threshold: f64,

    /// Maximum number of entries kept in the recent-activity feed.
    pub activity_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            low_balance_threshold: DEFAULT_LOW_BALANCE_THRESHOLD,
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
        }
    }
}
