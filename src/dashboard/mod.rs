//! Dashboard module
//!
//! Provides the monthly overview page: summary cards, charts and the
//! itemised records for the selected month.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod lists;

pub use handlers::get_dashboard_page;
