use serde::{Deserialize, Serialize};

/// Time scope a chart covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    /// Every transaction, one bucket per hour since the first one
    All,
    /// The current calendar day, one bucket per hour
    Day,
    /// The current calendar month, one bucket per day
    Month,
}

impl TimeWindow {
    /// X-axis caption for this window.
    pub fn axis_label(&self) -> &'static str {
        match self {
            TimeWindow::All => "Hours Since First Transaction",
            TimeWindow::Day => "Hours",
            TimeWindow::Month => "Day of Month",
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeWindow::All => write!(f, "All"),
            TimeWindow::Day => write!(f, "Day"),
            TimeWindow::Month => write!(f, "Month"),
        }
    }
}

/// Which transactions a chart includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Deposits and withdrawals summed together
    Net,
    /// Only positive values
    Deposit,
    /// Only negative values, shown as positive bars
    Withdrawal,
}

impl TransactionKind {
    /// Whether a transaction with this signed value belongs in the chart.
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            TransactionKind::Net => true,
            TransactionKind::Deposit => value >= 0.0,
            TransactionKind::Withdrawal => value <= 0.0,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Net => write!(f, "Net"),
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// Histogram ready for a bar chart.
///
/// `labels[i]` is the axis position of `amounts[i]`: hour of day (Day),
/// hour offset (All) or day of month starting at 1 (Month).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketSeries {
    pub labels: Vec<u32>,

    /// Per-bucket sums, rounded to cents
    pub amounts: Vec<f64>,

    /// Transactions whose bucket index fell outside the window and was clamped
    pub clamped: usize,
}

impl BucketSeries {
    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when there was no history to chart.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of all bucket amounts.
    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }
}

/// A histogram with the captions a chart widget needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// e.g. "Today (3/14): Net Transactions"
    pub title: String,

    /// X-axis caption
    pub x_axis_label: String,

    pub series: BucketSeries,
}
