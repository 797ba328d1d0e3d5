use serde::{Deserialize, Serialize};

use crate::fmt::money;

/// Running statistics for the account, updated one transaction at a time.
///
/// Starts all-zero. `balance` always equals the sum of every applied value;
/// `avg_input`/`avg_expense` are the means of the positive/negative values seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Sum of all applied transaction values
    pub balance: f64,

    /// Value of the most recently applied transaction
    pub last_transaction: f64,

    /// Largest deposit seen (≥ 0)
    pub max_input: f64,

    /// Largest withdrawal seen, as a negative value (≤ 0)
    pub max_expense: f64,

    /// Mean of all deposits
    pub avg_input: f64,

    /// Number of deposits applied
    pub num_input: u64,

    /// Mean of all withdrawals (negative)
    pub avg_expense: f64,

    /// Number of withdrawals applied
    pub num_expense: u64,
}

impl AccountSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of transactions that contributed to these statistics.
    pub fn transaction_count(&self) -> u64 {
        self.num_input + self.num_expense
    }
}

/// Display-ready strings for the sidebar "quick facts".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickFacts {
    pub balance: String,
    pub last_transaction: String,
    pub max_input: String,
    pub max_expense: String,
    pub avg_input: String,
    pub avg_expense: String,
}

impl QuickFacts {
    pub fn from_summary(summary: &AccountSummary, symbol: &str) -> Self {
        Self {
            balance: money(summary.balance, symbol),
            last_transaction: money(summary.last_transaction, symbol),
            max_input: money(summary.max_input, symbol),
            max_expense: money(summary.max_expense, symbol),
            avg_input: money(summary.avg_input, symbol),
            avg_expense: money(summary.avg_expense, symbol),
        }
    }
}
