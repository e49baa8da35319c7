//! Operator CLI for the boundary catalog.
//!
//! `main.rs` parses arguments and dispatches; everything it needs lives here
//! so handlers can be exercised from tests.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, DEFAULT_DATABASE_PATH, bootstrap, bootstrap_with};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
