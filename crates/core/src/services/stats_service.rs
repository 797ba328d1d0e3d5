use log::debug;

use crate::errors::CoreError;
use crate::models::summary::AccountSummary;
use crate::models::transaction::Direction;

/// Maintains the running account statistics.
///
/// Pure business logic: no I/O and no clock. Each call folds exactly one
/// transaction into a summary and hands back the new value; persisting it
/// (under a single-writer discipline) is the caller's job.
pub struct StatsService;

impl StatsService {
    pub fn new() -> Self {
        Self
    }

    /// Fold one signed transaction value into `summary`.
    ///
    /// Rejects zero and non-finite values without touching anything.
    pub fn apply(&self, summary: &AccountSummary, delta: f64) -> Result<AccountSummary, CoreError> {
        Self::validate_value(delta)?;

        let mut next = *summary;
        next.balance += delta;
        next.last_transaction = delta;

        // Extrema compare against the pre-update values
        if delta > summary.max_input {
            next.max_input = delta;
        }
        if delta < summary.max_expense {
            next.max_expense = delta;
        }

        if delta > 0.0 {
            next.avg_input = Self::running_mean(summary.avg_input, summary.num_input, delta);
            next.num_input += 1;
        } else {
            next.avg_expense = Self::running_mean(summary.avg_expense, summary.num_expense, delta);
            next.num_expense += 1;
        }

        debug!(
            "Applied transaction {delta}: balance {} -> {}",
            summary.balance, next.balance
        );
        Ok(next)
    }

    /// Fold a whole sequence of values, all-or-nothing.
    pub fn apply_all(
        &self,
        summary: &AccountSummary,
        deltas: impl IntoIterator<Item = f64>,
    ) -> Result<AccountSummary, CoreError> {
        deltas
            .into_iter()
            .try_fold(*summary, |acc, delta| self.apply(&acc, delta))
    }

    /// Parse a user-entered magnitude and sign it by `direction`.
    ///
    /// Accepts any finite number strictly greater than zero; surrounding
    /// whitespace is ignored.
    pub fn parse_amount(&self, text: &str, direction: Direction) -> Result<f64, CoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidTransactionValue("no value specified".into()));
        }
        let magnitude: f64 = trimmed.parse().map_err(|_| {
            CoreError::InvalidTransactionValue(format!("'{trimmed}' is not a number"))
        })?;
        if !magnitude.is_finite() || magnitude <= 0.0 {
            return Err(CoreError::InvalidTransactionValue(format!(
                "amount must be a positive number, got {trimmed}"
            )));
        }
        Ok(direction.signed(magnitude))
    }

    /// A transaction value must be finite and non-zero.
    pub fn validate_value(delta: f64) -> Result<(), CoreError> {
        if !delta.is_finite() {
            return Err(CoreError::InvalidTransactionValue(format!(
                "value must be finite, got {delta}"
            )));
        }
        if delta == 0.0 {
            return Err(CoreError::InvalidTransactionValue(
                "value must not be zero".into(),
            ));
        }
        Ok(())
    }

    /// Mean after adding one sample, given the mean and count before it.
    fn running_mean(mean: f64, count: u64, sample: f64) -> f64 {
        let n = count as f64;
        (mean * n + sample) / (n + 1.0)
    }
}

impl Default for StatsService {
    fn default() -> Self {
        Self::new()
    }
}
