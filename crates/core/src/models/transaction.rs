use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction chosen by the user when entering an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Money in (positive value)
    Deposit,
    /// Money out (negative value)
    Withdrawal,
}

impl Direction {
    /// Apply this direction's sign to a positive magnitude.
    pub fn signed(self, magnitude: f64) -> f64 {
        match self {
            Direction::Deposit => magnitude,
            Direction::Withdrawal => -magnitude,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Deposit => write!(f, "Deposit"),
            Direction::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// A single recorded deposit or withdrawal.
///
/// Sign convention: positive = deposit, negative = withdrawal.
/// Transactions are append-only; once in the history they are never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Signed amount
    pub value: f64,

    /// When the transaction was recorded
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            value,
            timestamp,
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.value > 0.0
    }

    pub fn is_withdrawal(&self) -> bool {
        self.value < 0.0
    }
}
