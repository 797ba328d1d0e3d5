pub mod activity_service;
pub mod chart_service;
pub mod stats_service;
pub mod transaction_service;
