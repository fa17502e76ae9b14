//! interdb-core: turns the EPha drug-interaction CSV into a per-locale
//! SQLite lookup database.
//!
//! PIPELINE (linear, single-threaded):
//!   1. source  : read + group records by ATC1 key
//!   2. render  : build one HTML fragment per interaction pair
//!   3. store   : create schema, batch-insert rows, VACUUM
//!   4. pipeline: drive the above and produce a RunReport

pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod risk;
pub mod source;
pub mod store;
pub mod types;
