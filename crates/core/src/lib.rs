pub mod calendar;
pub mod errors;
pub mod fmt;
pub mod models;
pub mod services;
pub mod storage;

use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use models::{
    activity::ActivityEntry,
    chart::{BucketSeries, ChartData, TimeWindow, TransactionKind},
    ledger::Ledger,
    settings::{Settings, MAX_ACTIVITY_CAPACITY},
    summary::{AccountSummary, QuickFacts},
    transaction::{Direction, Transaction},
};
use services::{
    activity_service::ActivityService, chart_service::ChartService,
    stats_service::StatsService, transaction_service::TransactionReceipt,
};
use storage::{manager::StorageManager, store::MemoryStore};

use errors::CoreError;

/// Main entry point for the CashFlow core library.
/// Holds the ledger and the services that operate on it.
///
/// All mutation goes through `&mut self`, so a tracker is its own
/// single writer. For shared, request-driven access wrap the ledger in a
/// [`MemoryStore`] and use [`services::transaction_service::TransactionService`].
#[must_use]
pub struct CashFlowTracker {
    ledger: Ledger,
    stats_service: StatsService,
    activity_service: ActivityService,
    chart_service: ChartService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for CashFlowTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CashFlowTracker")
            .field("balance", &self.ledger.summary.balance)
            .field("transactions", &self.ledger.history.len())
            .field("activity", &self.ledger.activity.len())
            .field("settings", &self.ledger.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl CashFlowTracker {
    /// Create a brand new all-zero ledger with default settings.
    pub fn create_new() -> Self {
        Self::build(Ledger::default())
    }

    /// Wrap an existing ledger (e.g. one taken out of a [`MemoryStore`]).
    pub fn from_ledger(ledger: Ledger) -> Self {
        Self::build(ledger)
    }

    /// Load an existing ledger from encrypted bytes (password required).
    pub fn load_from_bytes(encrypted: &[u8], password: &str) -> Result<Self, CoreError> {
        let ledger = StorageManager::load_from_bytes(encrypted, password)?;
        Ok(Self::build(ledger))
    }

    /// Save the ledger to encrypted bytes. Clears the unsaved-changes flag.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.ledger, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from an encrypted file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Self, CoreError> {
        let ledger = StorageManager::load_from_file(path, password)?;
        Ok(Self::build(ledger))
    }

    /// Save to an encrypted file on disk (native only, not WASM).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str, password: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.ledger, path, password)?;
        self.dirty = false;
        Ok(())
    }

    /// Re-encrypt under a new password after proving knowledge of the current
    /// one against `last_saved_bytes`.
    pub fn change_password(
        &mut self,
        last_saved_bytes: &[u8],
        current_password: &str,
        new_password: &str,
    ) -> Result<Vec<u8>, CoreError> {
        StorageManager::load_from_bytes(last_saved_bytes, current_password)?;
        self.save_to_bytes(new_password)
    }

    /// Hand the ledger over to a [`MemoryStore`] for shared async access.
    pub fn into_memory_store(self) -> MemoryStore {
        MemoryStore::from_ledger(self.ledger)
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a signed transaction stamped with the current time.
    pub fn record_transaction(&mut self, value: f64) -> Result<TransactionReceipt, CoreError> {
        self.record_transaction_at(value, Utc::now())
    }

    /// Record a signed transaction stamped `at`.
    ///
    /// Statistics are folded in application order; the history stays sorted by
    /// timestamp. Nothing changes if the value is rejected.
    pub fn record_transaction_at(
        &mut self,
        value: f64,
        at: DateTime<Utc>,
    ) -> Result<TransactionReceipt, CoreError> {
        let summary = self.stats_service.apply(&self.ledger.summary, value)?;
        let notices = self.activity_service.transaction_notices(
            value,
            summary.balance,
            &self.ledger.settings,
            self.ledger.low_balance_alerted,
        );

        let transaction = Transaction::new(value, at);
        Self::insert_ordered(&mut self.ledger.history, transaction.clone());
        self.ledger.summary = summary;
        self.ledger.low_balance_alerted = notices.low_balance_alerted;
        for text in &notices.texts {
            self.activity_service
                .append(&mut self.ledger.activity, text, at)?;
        }
        self.dirty = true;

        Ok(TransactionReceipt {
            transaction,
            summary,
            notices: notices.texts,
            overdrawn: value < 0.0 && summary.balance < 0.0,
        })
    }

    /// Parse a user-entered amount and record it in the given direction.
    pub fn record_input(
        &mut self,
        text: &str,
        direction: Direction,
    ) -> Result<TransactionReceipt, CoreError> {
        let value = self.stats_service.parse_amount(text, direction)?;
        self.record_transaction(value)
    }

    /// Post a free-form entry to the activity feed.
    pub fn add_activity(&mut self, text: &str) -> Result<Option<ActivityEntry>, CoreError> {
        let evicted = self
            .activity_service
            .append(&mut self.ledger.activity, text, Utc::now())?;
        self.dirty = true;
        Ok(evicted)
    }

    // ── Queries ─────────────────────────────────────────────────────

    #[must_use]
    pub fn summary(&self) -> &AccountSummary {
        &self.ledger.summary
    }

    #[must_use]
    pub fn quick_facts(&self) -> QuickFacts {
        QuickFacts::from_summary(&self.ledger.summary, &self.ledger.settings.currency_symbol)
    }

    /// Full history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Transaction] {
        &self.ledger.history
    }

    /// Activity feed, most recent first.
    #[must_use]
    pub fn recent_activity(&self) -> Vec<&ActivityEntry> {
        self.ledger.activity.newest_first()
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.history.len()
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Bucketed amounts for the given window and kind as of `now`.
    #[must_use]
    pub fn histogram<Tz: TimeZone>(
        &self,
        window: TimeWindow,
        kind: TransactionKind,
        now: &DateTime<Tz>,
    ) -> BucketSeries {
        self.chart_service
            .build_histogram(&self.ledger.history, window, kind, now)
    }

    /// Histogram with title and axis caption.
    #[must_use]
    pub fn chart<Tz: TimeZone>(
        &self,
        window: TimeWindow,
        kind: TransactionKind,
        now: &DateTime<Tz>,
    ) -> ChartData {
        self.chart_service
            .chart(&self.ledger.history, window, kind, now)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.ledger.settings
    }

    /// Set the symbol shown before amounts. 1–3 characters.
    pub fn set_currency_symbol(&mut self, symbol: &str) -> Result<(), CoreError> {
        let trimmed = symbol.trim();
        let len = trimmed.chars().count();
        if len == 0 || len > 3 {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency symbol '{symbol}': must be 1 to 3 characters"
            )));
        }
        self.ledger.settings.currency_symbol = trimmed.to_string();
        self.dirty = true;
        Ok(())
    }

    /// Set the balance under which withdrawals raise a low-balance notice.
    pub fn set_low_balance_threshold(&mut self, threshold: f64) -> Result<(), CoreError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Low-balance threshold must be a non-negative number, got {threshold}"
            )));
        }
        self.ledger.settings.low_balance_threshold = threshold;
        self.dirty = true;
        Ok(())
    }

    /// Resize the activity feed; shrinking drops the oldest entries.
    /// Returns how many entries were dropped.
    pub fn set_activity_capacity(&mut self, capacity: usize) -> Result<usize, CoreError> {
        if !(1..=MAX_ACTIVITY_CAPACITY).contains(&capacity) {
            return Err(CoreError::ValidationError(format!(
                "Activity capacity must be between 1 and {MAX_ACTIVITY_CAPACITY}, got {capacity}"
            )));
        }
        self.ledger.settings.activity_capacity = capacity;
        let dropped = self.ledger.activity.set_capacity(capacity);
        self.dirty = true;
        Ok(dropped)
    }

    /// Returns `true` if the ledger has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the history as a JSON array.
    pub fn export_history_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger.history)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize history to JSON: {e}")))
    }

    /// Export the history as CSV. Columns: id, timestamp (RFC 3339), value
    #[must_use]
    pub fn export_history_to_csv(&self) -> String {
        let mut csv = String::from("id,timestamp,value\n");
        for tx in &self.ledger.history {
            csv.push_str(&format!("{},{},{}\n", tx.id, tx.timestamp.to_rfc3339(), tx.value));
        }
        csv
    }

    /// Import transactions from a JSON array, replaying them through the
    /// statistics in timestamp order. All-or-nothing: if any value is invalid
    /// or any id is already present, nothing is imported.
    /// Returns the number of transactions imported.
    pub fn import_history_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let mut incoming: Vec<Transaction> = serde_json::from_str(json)?;
        incoming.sort_by_key(|tx| tx.timestamp);

        let mut seen: std::collections::HashSet<uuid::Uuid> =
            self.ledger.history.iter().map(|tx| tx.id).collect();
        for tx in &incoming {
            if !seen.insert(tx.id) {
                return Err(CoreError::ValidationError(format!(
                    "Transaction {} is already in the history",
                    tx.id
                )));
            }
        }

        let summary = self
            .stats_service
            .apply_all(&self.ledger.summary, incoming.iter().map(|tx| tx.value))?;

        let count = incoming.len();
        for tx in incoming {
            Self::insert_ordered(&mut self.ledger.history, tx);
        }
        self.ledger.summary = summary;
        self.dirty = true;
        debug!("Imported {count} transactions");
        Ok(count)
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Insert keeping timestamp order; equal timestamps keep insertion order.
    fn insert_ordered(history: &mut Vec<Transaction>, tx: Transaction) {
        let pos = history.partition_point(|t| t.timestamp <= tx.timestamp);
        history.insert(pos, tx);
    }

    fn build(ledger: Ledger) -> Self {
        Self {
            ledger,
            stats_service: StatsService::new(),
            activity_service: ActivityService::new(),
            chart_service: ChartService::new(),
            dirty: false,
        }
    }
}
