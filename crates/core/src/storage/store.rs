use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::errors::CoreError;
use crate::models::activity::{ActivityEntry, ActivityLog};
use crate::models::ledger::Ledger;
use crate::models::summary::AccountSummary;
use crate::models::transaction::Transaction;
use crate::services::activity_service::ActivityService;

/// Persistence boundary for a single account.
///
/// Holds one summary record, the unbounded transaction history and the
/// capped activity feed. Implementations stamp new history and activity
/// entries with their own clock at insertion time.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AccountStore: Send + Sync {
    /// Current summary; all-zero if nothing has been stored yet.
    async fn read_summary(&self) -> Result<AccountSummary, CoreError>;

    /// Replace the stored summary with `summary` (full record, not a patch).
    async fn persist_summary(&self, summary: AccountSummary) -> Result<(), CoreError>;

    /// Replace the stored summary only if it still equals `expected`.
    ///
    /// Fails with `CoreError::ConcurrentUpdateConflict` when another writer
    /// got there first.
    async fn replace_summary_if(
        &self,
        expected: &AccountSummary,
        next: AccountSummary,
    ) -> Result<(), CoreError>;

    /// Full history, oldest first.
    async fn read_history(&self) -> Result<Vec<Transaction>, CoreError>;

    /// Record a transaction of `value`, stamped now.
    async fn append_history(&self, value: f64) -> Result<Transaction, CoreError>;

    /// Activity feed in storage order (oldest first).
    async fn read_activity(&self) -> Result<Vec<ActivityEntry>, CoreError>;

    /// Add a feed entry stamped now, evicting the oldest one past capacity.
    /// Returns the evicted entry, if any.
    async fn append_activity(&self, text: &str) -> Result<Option<ActivityEntry>, CoreError>;

    /// Whether a low-balance notice has been issued and not yet re-armed.
    async fn read_low_balance_alerted(&self) -> Result<bool, CoreError>;

    async fn set_low_balance_alerted(&self, alerted: bool) -> Result<(), CoreError>;
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// In-process store backed by a [`Ledger`].
///
/// Useful as the backing store of a single-process server and in tests;
/// the ledger can be taken out and saved with `StorageManager`.
pub struct MemoryStore {
    ledger: RwLock<Ledger>,
    clock: Clock,
    activity_service: ActivityService,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_ledger(Ledger::default())
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self::with_clock(ledger, Utc::now)
    }

    /// Use `clock` instead of the system time for insertion timestamps.
    pub fn with_clock(
        ledger: Ledger,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        Self {
            ledger: RwLock::new(ledger),
            clock: Box::new(clock),
            activity_service: ActivityService::new(),
        }
    }

    /// Copy of the whole ledger, e.g. for saving to disk.
    pub async fn snapshot(&self) -> Ledger {
        self.ledger.read().await.clone()
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger.into_inner()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AccountStore for MemoryStore {
    async fn read_summary(&self) -> Result<AccountSummary, CoreError> {
        Ok(self.ledger.read().await.summary)
    }

    async fn persist_summary(&self, summary: AccountSummary) -> Result<(), CoreError> {
        self.ledger.write().await.summary = summary;
        Ok(())
    }

    async fn replace_summary_if(
        &self,
        expected: &AccountSummary,
        next: AccountSummary,
    ) -> Result<(), CoreError> {
        let mut ledger = self.ledger.write().await;
        if ledger.summary != *expected {
            return Err(CoreError::ConcurrentUpdateConflict(format!(
                "summary changed underneath writer ({} transactions stored, {} expected)",
                ledger.summary.transaction_count(),
                expected.transaction_count()
            )));
        }
        ledger.summary = next;
        Ok(())
    }

    async fn read_history(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(self.ledger.read().await.history.clone())
    }

    async fn append_history(&self, value: f64) -> Result<Transaction, CoreError> {
        let transaction = Transaction::new(value, (self.clock)());
        self.ledger.write().await.history.push(transaction.clone());
        Ok(transaction)
    }

    async fn read_activity(&self) -> Result<Vec<ActivityEntry>, CoreError> {
        Ok(self.ledger.read().await.activity.iter().cloned().collect())
    }

    async fn append_activity(&self, text: &str) -> Result<Option<ActivityEntry>, CoreError> {
        let now = (self.clock)();
        let mut ledger = self.ledger.write().await;
        let log: &mut ActivityLog = &mut ledger.activity;
        self.activity_service.append(log, text, now)
    }

    async fn read_low_balance_alerted(&self) -> Result<bool, CoreError> {
        Ok(self.ledger.read().await.low_balance_alerted)
    }

    async fn set_low_balance_alerted(&self, alerted: bool) -> Result<(), CoreError> {
        self.ledger.write().await.low_balance_alerted = alerted;
        Ok(())
    }
}
