//! The history screen: entries grouped by month, each month a card that can be opened.
//!
//!  - [aggregator::group_by_month] builds the ordered month buckets.
//!  - [view_state::HistoryViewState] tracks which months are open.
//!  - [view_storage::ViewStateStorage] keeps that between runs.

pub mod aggregator;
pub mod view_state;
pub mod view_storage;
