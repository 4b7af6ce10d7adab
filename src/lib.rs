//! Daily self-reflection journal. Each day answers "Did I try today?" with a short note, and the
//! history shows those notes grouped by month. Entries are kept by a remote service, this crate
//! holds the client side logic and a terminal front-end for it.

pub mod cli;
pub mod config;
pub mod gate;
pub mod history;
pub mod store;
pub mod utils;
