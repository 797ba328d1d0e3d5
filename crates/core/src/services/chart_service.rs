use chrono::{DateTime, Datelike, TimeZone, Timelike};
use log::warn;

use crate::calendar::{days_in_month, hours_between};
use crate::fmt::round_cents;
use crate::models::chart::{BucketSeries, ChartData, TimeWindow, TransactionKind};
use crate::models::transaction::Transaction;

const HOURS_PER_DAY: usize = 24;

/// Turns the transaction history into chart-ready histograms.
///
/// The core computes all the numbers; the frontend only renders.
/// Everything here is a pure function of its inputs; "now" is always passed
/// in, and calendar fields are read in `now`'s time zone.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Bucket `history` (oldest first) for the given window and kind.
    ///
    /// - Day: 24 hourly buckets for `now`'s calendar day, labelled 0..=23
    /// - Month: one bucket per day of `now`'s month, labelled 1..=N
    /// - All: one bucket per hour since the first transaction, newest last,
    ///   labelled 0..N
    ///
    /// Withdrawal charts are negated so bars are positive. Amounts are
    /// rounded to cents after all summing is done.
    pub fn build_histogram<Tz: TimeZone>(
        &self,
        history: &[Transaction],
        window: TimeWindow,
        kind: TransactionKind,
        now: &DateTime<Tz>,
    ) -> BucketSeries {
        let Some(first) = history.first() else {
            return BucketSeries::default();
        };

        let bucket_count = Self::bucket_count(first, window, now);
        let mut sums = vec![0.0_f64; bucket_count];
        let mut clamped = 0usize;
        let tz = now.timezone();

        for tx in history {
            let local = tx.timestamp.with_timezone(&tz);
            let in_window = match window {
                TimeWindow::All => true,
                TimeWindow::Day => local.date_naive() == now.date_naive(),
                TimeWindow::Month => local.year() == now.year() && local.month() == now.month(),
            };
            if !in_window || !kind.accepts(tx.value) {
                continue;
            }

            let index = match window {
                TimeWindow::Day => local.hour() as usize,
                TimeWindow::Month => local.day0() as usize,
                TimeWindow::All => {
                    let hours_ago = hours_between(&tx.timestamp, now).floor();
                    let raw = bucket_count as f64 - hours_ago - 1.0;
                    if raw < 0.0 || raw > (bucket_count - 1) as f64 {
                        clamped += 1;
                    }
                    raw.clamp(0.0, (bucket_count - 1) as f64) as usize
                }
            };
            sums[index] += tx.value;
        }

        if clamped > 0 {
            warn!(
                "{clamped} transaction(s) fell outside the {bucket_count}-hour chart range \
                 (timestamps after now or clock drift); clamped to the nearest bucket"
            );
        }

        let labels = match window {
            TimeWindow::Month => (1..=bucket_count as u32).collect(),
            TimeWindow::Day | TimeWindow::All => (0..bucket_count as u32).collect(),
        };
        let amounts = sums
            .into_iter()
            .map(|sum| match kind {
                TransactionKind::Withdrawal => round_cents(-sum),
                TransactionKind::Net | TransactionKind::Deposit => round_cents(sum),
            })
            .collect();

        BucketSeries {
            labels,
            amounts,
            clamped,
        }
    }

    /// Histogram plus the title and axis caption a chart widget needs.
    pub fn chart<Tz: TimeZone>(
        &self,
        history: &[Transaction],
        window: TimeWindow,
        kind: TransactionKind,
        now: &DateTime<Tz>,
    ) -> ChartData {
        ChartData {
            title: self.title(window, kind, now),
            x_axis_label: window.axis_label().to_string(),
            series: self.build_histogram(history, window, kind, now),
        }
    }

    /// e.g. "Today (3/14): Net Transactions",
    /// "This Month (2/1 – 2/29): Withdrawal Transactions".
    pub fn title<Tz: TimeZone>(
        &self,
        window: TimeWindow,
        kind: TransactionKind,
        now: &DateTime<Tz>,
    ) -> String {
        let month = now.month();
        let scope = match window {
            TimeWindow::All => "All Time".to_string(),
            TimeWindow::Day => format!("Today ({month}/{})", now.day()),
            TimeWindow::Month => format!(
                "This Month ({month}/1 – {month}/{})",
                days_in_month(month, now.year())
            ),
        };
        format!("{scope}: {kind} Transactions")
    }

    fn bucket_count<Tz: TimeZone>(first: &Transaction, window: TimeWindow, now: &DateTime<Tz>) -> usize {
        match window {
            TimeWindow::Day => HOURS_PER_DAY,
            TimeWindow::Month => days_in_month(now.month(), now.year()) as usize,
            TimeWindow::All => {
                // floor + 1 so the first transaction always lands in bucket 0,
                // including when it is a whole number of hours before now
                let hours = hours_between(&first.timestamp, now).floor() + 1.0;
                if hours >= 1.0 {
                    hours as usize
                } else {
                    1
                }
            }
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
