//! `percentile-curves` library crate.
//!
//! The binary (`pctl`) is a thin wrapper around this library so that:
//!
//! - the fitting core is testable without spawning processes or sockets
//! - the CLI and the web front-end share one prediction pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod web;
