//! bandwork - Resistance band workout tracker
//!
//! Records workout sessions per exercise group and suggests the band
//! to use next from how hard recent sets felt.

pub mod analysis;
pub mod bands;
pub mod catalog;
pub mod db;
pub mod export;
pub mod report;
pub mod tui;
pub mod workout;

pub use bands::Band;
pub use db::Database;
