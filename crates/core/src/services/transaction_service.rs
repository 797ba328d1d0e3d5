use chrono::{DateTime, TimeZone};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::CoreError;
use crate::models::activity::ActivityEntry;
use crate::models::chart::{ChartData, TimeWindow, TransactionKind};
use crate::models::settings::Settings;
use crate::models::summary::{AccountSummary, QuickFacts};
use crate::models::transaction::{Direction, Transaction};
use crate::services::activity_service::ActivityService;
use crate::services::chart_service::ChartService;
use crate::services::stats_service::StatsService;
use crate::storage::store::AccountStore;

/// Attempts at the read-apply-replace cycle before giving up on a contended summary.
const MAX_SUMMARY_ATTEMPTS: usize = 16;

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// The history entry as stored
    pub transaction: Transaction,

    /// Summary after applying the transaction
    pub summary: AccountSummary,

    /// Feed texts appended for this transaction
    pub notices: Vec<String>,

    /// True when a withdrawal left the balance below zero
    pub overdrawn: bool,
}

/// Request-facing entry point over an [`AccountStore`].
///
/// Submissions for the account are serialized through a write gate, and
/// the summary is replaced with compare-and-swap, so overlapping requests
/// can neither lose a statistical contribution nor race an eviction.
/// Chart queries read a history snapshot without taking the gate.
pub struct TransactionService<S: AccountStore> {
    store: Arc<S>,
    settings: Settings,
    stats_service: StatsService,
    activity_service: ActivityService,
    chart_service: ChartService,
    write_gate: Mutex<()>,
}

impl<S: AccountStore> TransactionService<S> {
    pub fn new(store: Arc<S>, settings: Settings) -> Self {
        Self {
            store,
            settings,
            stats_service: StatsService::new(),
            activity_service: ActivityService::new(),
            chart_service: ChartService::new(),
            write_gate: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Record a signed transaction: update the summary, append it to the
    /// history and post the matching activity entries.
    ///
    /// Invalid values are rejected before anything is read or written.
    pub async fn submit(&self, value: f64) -> Result<TransactionReceipt, CoreError> {
        StatsService::validate_value(value)?;

        let _gate = self.write_gate.lock().await;

        let (previous, summary) = self.commit_summary(value).await?;
        let transaction = match self.store.append_history(value).await {
            Ok(transaction) => transaction,
            Err(e) => {
                self.roll_back_summary(&summary, previous).await;
                return Err(e);
            }
        };

        let alerted = self.store.read_low_balance_alerted().await?;
        let notices = self.activity_service.transaction_notices(
            value,
            summary.balance,
            &self.settings,
            alerted,
        );
        for text in &notices.texts {
            self.store.append_activity(text).await?;
        }
        if notices.low_balance_alerted != alerted {
            self.store
                .set_low_balance_alerted(notices.low_balance_alerted)
                .await?;
        }

        let overdrawn = value < 0.0 && summary.balance < 0.0;
        if overdrawn {
            warn!("Account overdrawn: balance {}", summary.balance);
        }

        Ok(TransactionReceipt {
            transaction,
            summary,
            notices: notices.texts,
            overdrawn,
        })
    }

    /// Parse user input ("12.50") and submit it in the given direction.
    pub async fn submit_text(
        &self,
        text: &str,
        direction: Direction,
    ) -> Result<TransactionReceipt, CoreError> {
        let value = self.stats_service.parse_amount(text, direction)?;
        self.submit(value).await
    }

    pub async fn summary(&self) -> Result<AccountSummary, CoreError> {
        self.store.read_summary().await
    }

    pub async fn quick_facts(&self) -> Result<QuickFacts, CoreError> {
        let summary = self.store.read_summary().await?;
        Ok(QuickFacts::from_summary(&summary, &self.settings.currency_symbol))
    }

    /// Activity feed, most recent first.
    pub async fn recent_activity(&self) -> Result<Vec<ActivityEntry>, CoreError> {
        let mut entries = self.store.read_activity().await?;
        entries.reverse();
        Ok(entries)
    }

    pub async fn history(&self) -> Result<Vec<Transaction>, CoreError> {
        self.store.read_history().await
    }

    /// Chart of the stored history as of `now`.
    pub async fn chart<Tz: TimeZone>(
        &self,
        window: TimeWindow,
        kind: TransactionKind,
        now: &DateTime<Tz>,
    ) -> Result<ChartData, CoreError> {
        let history = self.store.read_history().await?;
        Ok(self.chart_service.chart(&history, window, kind, now))
    }

    /// Read-apply-replace with retry when another writer on the same store
    /// (outside this service's gate) changes the summary in between.
    /// Returns the summary before and after the update.
    async fn commit_summary(
        &self,
        value: f64,
    ) -> Result<(AccountSummary, AccountSummary), CoreError> {
        let mut last_conflict = None;
        for attempt in 1..=MAX_SUMMARY_ATTEMPTS {
            let current = self.store.read_summary().await?;
            let next = self.stats_service.apply(&current, value)?;
            match self.store.replace_summary_if(&current, next).await {
                Ok(()) => return Ok((current, next)),
                Err(CoreError::ConcurrentUpdateConflict(msg)) => {
                    debug!("Summary update conflict on attempt {attempt}: {msg}");
                    last_conflict = Some(msg);
                }
                Err(e) => return Err(e),
            }
        }
        Err(CoreError::ConcurrentUpdateConflict(last_conflict.unwrap_or_else(|| {
            format!("gave up after {MAX_SUMMARY_ATTEMPTS} attempts")
        })))
    }

    /// Undo a committed summary whose history entry could not be stored.
    /// Fails only if another writer already built on top of `committed`.
    async fn roll_back_summary(&self, committed: &AccountSummary, previous: AccountSummary) {
        if let Err(e) = self.store.replace_summary_if(committed, previous).await {
            warn!("Could not roll back summary after failed history append: {e}");
        }
    }
}
