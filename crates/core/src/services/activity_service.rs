use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::errors::CoreError;
use crate::fmt::money;
use crate::models::activity::{ActivityEntry, ActivityLog};
use crate::models::settings::Settings;

/// Feed texts produced by one transaction, plus the updated low-balance latch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notices {
    pub texts: Vec<String>,
    pub low_balance_alerted: bool,
}

/// Writes the recent-activity feed.
pub struct ActivityService;

impl ActivityService {
    pub fn new() -> Self {
        Self
    }

    /// Append a feed entry stamped `at`, evicting the oldest one if the log is full.
    ///
    /// Empty (or whitespace-only) text is rejected and the log is left as is.
    /// Returns the evicted entry, if any.
    pub fn append(
        &self,
        log: &mut ActivityLog,
        text: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<ActivityEntry>, CoreError> {
        Self::validate_text(text)?;
        let evicted = log.append(ActivityEntry::new(text, at));
        if let Some(old) = &evicted {
            debug!("Evicted activity entry from {}: {}", old.timestamp, old.text);
        }
        Ok(evicted)
    }

    /// Feed texts for a transaction of `value` that left the account at `balance`.
    ///
    /// Always yields "Added: …" or "Subtracted: …". A withdrawal that drops the
    /// balance under the threshold adds a low-balance notice once; the latch
    /// re-arms when a later transaction lifts the balance above the threshold.
    pub fn transaction_notices(
        &self,
        value: f64,
        balance: f64,
        settings: &Settings,
        low_balance_alerted: bool,
    ) -> Notices {
        let mut texts = vec![Self::transaction_text(value, &settings.currency_symbol)];
        let threshold = settings.low_balance_threshold;
        let mut alerted = low_balance_alerted;

        if value < 0.0 && balance < threshold && !alerted {
            warn!("Balance {balance} fell under low-balance threshold {threshold}");
            texts.push(Self::low_balance_text(threshold, &settings.currency_symbol));
            alerted = true;
        } else if balance > threshold {
            alerted = false;
        }

        Notices {
            texts,
            low_balance_alerted: alerted,
        }
    }

    /// "Added: $50.00" / "Subtracted: $10.00" (magnitude only).
    pub fn transaction_text(value: f64, symbol: &str) -> String {
        let verb = if value > 0.0 { "Added" } else { "Subtracted" };
        format!("{verb}: {}", money(value.abs(), symbol))
    }

    /// "Low Balance: Under $15.00"
    pub fn low_balance_text(threshold: f64, symbol: &str) -> String {
        format!("Low Balance: Under {}", money(threshold, symbol))
    }

    fn validate_text(text: &str) -> Result<(), CoreError> {
        if text.trim().is_empty() {
            return Err(CoreError::InvalidActivityText);
        }
        Ok(())
    }
}

impl Default for ActivityService {
    fn default() -> Self {
        Self::new()
    }
}
