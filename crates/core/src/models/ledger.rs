use serde::{Deserialize, Serialize};

use super::activity::ActivityLog;
use super::settings::Settings;
use super::summary::AccountSummary;
use super::transaction::Transaction;

/// The main data container. Everything in here gets serialized,
/// encrypted, and saved to the portable .cflw file.
///
/// Contains: the running summary, the full transaction history
/// (oldest first, unbounded), the capped activity feed and user settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    /// Running statistics
    pub summary: AccountSummary,

    /// Every transaction ever recorded, ordered by timestamp
    pub history: Vec<Transaction>,

    /// Recent-activity feed
    pub activity: ActivityLog,

    /// User settings (currency symbol, thresholds, feed size)
    pub settings: Settings,

    /// Set once a low-balance notice is issued; cleared when the balance
    /// climbs back above the threshold.
    #[serde(default)]
    pub low_balance_alerted: bool,
}

impl Default for Ledger {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            summary: AccountSummary::default(),
            history: Vec::new(),
            activity: ActivityLog::with_capacity(settings.activity_capacity),
            settings,
            low_balance_alerted: false,
        }
    }
}
