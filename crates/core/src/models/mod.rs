pub mod activity;
pub mod chart;
pub mod ledger;
pub mod settings;
pub mod summary;
pub mod transaction;
