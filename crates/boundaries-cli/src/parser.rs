//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Command-line interface for the boundary catalog.
///
/// Global options configure storage and limits; subcommands act on the
/// catalog.
#[derive(Parser)]
#[command(name = "boundaries")]
#[command(about = "Inspect and load geographic boundary sets")]
#[command(version)]
pub struct Cli {
    /// Path to the SQLite catalog database
    #[arg(long, global = true, env = "BOUNDARIES_DATABASE")]
    pub database: Option<PathBuf>,

    /// Maximum number of boundaries a geo-filtered query may match
    #[arg(long = "max-geo-results", global = true, env = "BOUNDARIES_MAX_GEO_RESULTS")]
    pub max_geo_results: Option<u32>,

    /// Prefix prepended to every generated URL (e.g. "/api")
    #[arg(long = "url-prefix", global = true, default_value = "")]
    pub url_prefix: String,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
