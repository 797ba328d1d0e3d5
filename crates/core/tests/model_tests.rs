// ═══════════════════════════════════════════════════════════════════
// Model Tests — Transaction, AccountSummary, ActivityLog, chart types,
// Settings, Ledger
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, TimeZone, Utc};

use cashflow_core::fmt::{money, round_cents};
use cashflow_core::models::activity::{
    ActivityEntry, ActivityKind, ActivityLog, DEFAULT_ACTIVITY_CAPACITY,
};
use cashflow_core::models::chart::{BucketSeries, TimeWindow, TransactionKind};
use cashflow_core::models::ledger::Ledger;
use cashflow_core::models::settings::Settings;
use cashflow_core::models::summary::{AccountSummary, QuickFacts};
use cashflow_core::models::transaction::{Direction, Transaction};

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, h, m, 0).unwrap()
}

fn entry(text: &str, minute: u32) -> ActivityEntry {
    ActivityEntry::new(text, at(12, minute))
}

// ═══════════════════════════════════════════════════════════════════
// Transaction & Direction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn new_assigns_unique_ids() {
        let a = Transaction::new(10.0, at(8, 0));
        let b = Transaction::new(10.0, at(8, 0));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn sign_helpers() {
        assert!(Transaction::new(5.0, at(8, 0)).is_deposit());
        assert!(Transaction::new(-5.0, at(8, 0)).is_withdrawal());
        assert!(!Transaction::new(-5.0, at(8, 0)).is_deposit());
    }

    #[test]
    fn direction_signs_magnitude() {
        assert_eq!(Direction::Deposit.signed(12.5), 12.5);
        assert_eq!(Direction::Withdrawal.signed(12.5), -12.5);
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Deposit.to_string(), "Deposit");
        assert_eq!(Direction::Withdrawal.to_string(), "Withdrawal");
    }

    #[test]
    fn json_round_trip_keeps_id_and_timestamp() {
        let tx = Transaction::new(-42.25, at(9, 30));
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}

// ═══════════════════════════════════════════════════════════════════
// AccountSummary & QuickFacts
// ═══════════════════════════════════════════════════════════════════

mod summary {
    use super::*;

    #[test]
    fn default_is_all_zero() {
        let s = AccountSummary::new();
        assert_eq!(s.balance, 0.0);
        assert_eq!(s.last_transaction, 0.0);
        assert_eq!(s.max_input, 0.0);
        assert_eq!(s.max_expense, 0.0);
        assert_eq!(s.avg_input, 0.0);
        assert_eq!(s.avg_expense, 0.0);
        assert_eq!(s.num_input, 0);
        assert_eq!(s.num_expense, 0);
        assert_eq!(s.transaction_count(), 0);
    }

    #[test]
    fn quick_facts_format_two_decimals() {
        let s = AccountSummary {
            balance: 70.0,
            last_transaction: -30.0,
            max_input: 100.0,
            max_expense: -30.0,
            avg_input: 100.0,
            num_input: 1,
            avg_expense: -30.0,
            num_expense: 1,
        };
        let facts = QuickFacts::from_summary(&s, "$");
        assert_eq!(facts.balance, "$70.00");
        assert_eq!(facts.last_transaction, "-$30.00");
        assert_eq!(facts.max_input, "$100.00");
        assert_eq!(facts.max_expense, "-$30.00");
        assert_eq!(facts.avg_input, "$100.00");
        assert_eq!(facts.avg_expense, "-$30.00");
    }

    #[test]
    fn quick_facts_rounds_running_means() {
        let s = AccountSummary {
            avg_input: 33.333_333,
            ..AccountSummary::default()
        };
        assert_eq!(QuickFacts::from_summary(&s, "€").avg_input, "€33.33");
    }
}

// ═══════════════════════════════════════════════════════════════════
// ActivityLog
// ═══════════════════════════════════════════════════════════════════

mod activity_log {
    use super::*;

    #[test]
    fn default_capacity_is_five() {
        let log = ActivityLog::new();
        assert_eq!(log.capacity(), DEFAULT_ACTIVITY_CAPACITY);
        assert_eq!(log.capacity(), 5);
        assert!(log.is_empty());
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        assert_eq!(ActivityLog::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn length_is_min_of_appends_and_capacity() {
        for n in 0..12 {
            let mut log = ActivityLog::new();
            for i in 0..n {
                log.append(entry(&format!("Added: ${i}.00"), i));
            }
            assert_eq!(log.len(), n.min(5) as usize);
        }
    }

    #[test]
    fn six_appends_evict_the_first() {
        let mut log = ActivityLog::new();
        let mut evicted = Vec::new();
        for i in 1..=6 {
            if let Some(old) = log.append(entry(&format!("entry {i}"), i)) {
                evicted.push(old);
            }
        }
        assert_eq!(log.len(), 5);
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].text, "entry 1");

        let texts: Vec<&str> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["entry 2", "entry 3", "entry 4", "entry 5", "entry 6"]);
    }

    #[test]
    fn eviction_follows_insertion_order_not_content() {
        let mut log = ActivityLog::with_capacity(2);
        log.append(entry("same", 0));
        log.append(entry("same", 0));
        let evicted = log.append(entry("other", 0)).unwrap();
        assert_eq!(evicted.text, "same");
        let texts: Vec<&str> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["same", "other"]);
    }

    #[test]
    fn newest_first_reverses_storage_order() {
        let mut log = ActivityLog::new();
        log.append(entry("first", 1));
        log.append(entry("second", 2));
        log.append(entry("third", 3));
        let newest = log.newest_first();
        let texts: Vec<&str> = newest.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["third", "second", "first"]);
    }

    #[test]
    fn shrinking_capacity_drops_oldest() {
        let mut log = ActivityLog::new();
        for i in 1..=5 {
            log.append(entry(&format!("e{i}"), i));
        }
        assert_eq!(log.set_capacity(2), 3);
        let texts: Vec<&str> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["e4", "e5"]);
    }

    #[test]
    fn growing_capacity_keeps_everything() {
        let mut log = ActivityLog::with_capacity(2);
        log.append(entry("a", 1));
        log.append(entry("b", 2));
        assert_eq!(log.set_capacity(10), 0);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn kind_classification() {
        assert_eq!(ActivityKind::classify("Added: $5.00"), ActivityKind::Deposit);
        assert_eq!(ActivityKind::classify("Subtracted: $5.00"), ActivityKind::Withdrawal);
        assert_eq!(
            ActivityKind::classify("Low Balance: Under $15.00"),
            ActivityKind::LowBalance
        );
        assert_eq!(entry("Added: $1.00", 0).kind(), ActivityKind::Deposit);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Chart types
// ═══════════════════════════════════════════════════════════════════

mod chart_types {
    use super::*;

    #[test]
    fn axis_labels() {
        assert_eq!(TimeWindow::All.axis_label(), "Hours Since First Transaction");
        assert_eq!(TimeWindow::Day.axis_label(), "Hours");
        assert_eq!(TimeWindow::Month.axis_label(), "Day of Month");
    }

    #[test]
    fn kind_filter() {
        assert!(TransactionKind::Net.accepts(-3.0));
        assert!(TransactionKind::Net.accepts(3.0));
        assert!(TransactionKind::Deposit.accepts(3.0));
        assert!(!TransactionKind::Deposit.accepts(-3.0));
        assert!(TransactionKind::Withdrawal.accepts(-3.0));
        assert!(!TransactionKind::Withdrawal.accepts(3.0));
    }

    #[test]
    fn display_names() {
        assert_eq!(TransactionKind::Withdrawal.to_string(), "Withdrawal");
        assert_eq!(TimeWindow::Month.to_string(), "Month");
    }

    #[test]
    fn empty_series() {
        let s = BucketSeries::default();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert_eq!(s.total(), 0.0);
        assert_eq!(s.clamped, 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Money formatting
// ═══════════════════════════════════════════════════════════════════

mod money_format {
    use super::*;

    #[test]
    fn two_decimals_with_symbol() {
        assert_eq!(money(12.5, "$"), "$12.50");
        assert_eq!(money(-5.0, "$"), "-$5.00");
        assert_eq!(money(0.0, "$"), "$0.00");
        assert_eq!(money(-0.001, "$"), "$0.00");
        assert_eq!(money(1.005, "€"), "€1.00");
    }

    #[test]
    fn round_cents_half_away_from_zero() {
        assert_eq!(round_cents(2.345), 2.35);
        assert_eq!(round_cents(-2.5), -2.5);
        assert_eq!(round_cents(0.125), 0.13);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings & Ledger
// ═══════════════════════════════════════════════════════════════════

mod settings_and_ledger {
    use super::*;

    #[test]
    fn settings_defaults() {
        let s = Settings::default();
        assert_eq!(s.currency_symbol, "$");
        assert_eq!(s.low_balance_threshold, 15.0);
        assert_eq!(s.activity_capacity, 5);
    }

    #[test]
    fn ledger_default_matches_settings() {
        let ledger = Ledger::default();
        assert_eq!(ledger.summary, AccountSummary::default());
        assert!(ledger.history.is_empty());
        assert_eq!(ledger.activity.capacity(), ledger.settings.activity_capacity);
        assert!(!ledger.low_balance_alerted);
    }

    #[test]
    fn ledger_bincode_round_trip() {
        let mut ledger = Ledger::default();
        ledger.history.push(Transaction::new(20.0, at(10, 0)));
        ledger.activity.append(entry("Added: $20.00", 0));
        ledger.summary.balance = 20.0;

        let bytes = bincode::serialize(&ledger).unwrap();
        let back: Ledger = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back.history, ledger.history);
        assert_eq!(back.activity, ledger.activity);
        assert_eq!(back.summary, ledger.summary);
        assert_eq!(back.settings, ledger.settings);
    }
}
