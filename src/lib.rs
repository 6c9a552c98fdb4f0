//! `pulse` library crate.
//!
//! Scores a fixed table of market indicators into a composite market-health
//! reading. The binary (`pulse`) is a thin wrapper around this library so that
//! the scoring pipeline is testable without spawning processes.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod scoring;
pub mod tui;
