//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use clap::Subcommand;
use std::path::PathBuf;

/// Available commands for the boundary catalog.
#[derive(Subcommand)]
pub enum Commands {
    /// Create the catalog database if it doesn't exist
    Init,

    /// List all boundary sets
    Sets,

    /// Show one boundary set
    Set {
        /// Slug of the set (e.g. "community-areas")
        slug: String,
    },

    /// Update fields of a boundary set (its slug never changes)
    UpdateSet {
        /// Slug of the set
        slug: String,
        /// New plural name
        #[arg(long)]
        name: Option<String>,
        /// New singular name
        #[arg(long)]
        singular: Option<String>,
        /// Whether the singular name precedes boundary names
        #[arg(long = "kind-first")]
        kind_first: Option<bool>,
        /// New authority
        #[arg(long)]
        authority: Option<String>,
        /// New geographic domain (e.g. "Chicago, IL")
        #[arg(long)]
        domain: Option<String>,
        /// Level of government: F, P, M or O ("" clears it)
        #[arg(long)]
        hierarchy: Option<String>,
        /// New source data date (YYYY-MM-DD)
        #[arg(long = "last-updated")]
        last_updated: Option<String>,
        /// Source data URL ("" clears it)
        #[arg(long)]
        href: Option<String>,
        /// New loading notes ("" clears them)
        #[arg(long)]
        notes: Option<String>,
        /// Declared number of features in the source data
        #[arg(long)]
        count: Option<i64>,
        /// Pipe-delimited source field names, e.g. "WARD|ALDERMAN"
        #[arg(long = "metadata-fields")]
        metadata_fields: Option<String>,
    },

    /// Delete a boundary set and all of its boundaries
    DeleteSet {
        /// Slug of the set
        slug: String,
    },

    /// Compare a set's declared feature count with the boundaries loaded
    Completeness {
        /// Slug of the set
        slug: String,
    },

    /// List boundaries, optionally within one set
    Boundaries {
        /// Only boundaries of this set
        set_slug: Option<String>,
        /// Only boundaries with exactly this name
        #[arg(long)]
        name: Option<String>,
        /// Only boundaries with this external identifier
        #[arg(long = "external-id")]
        external_id: Option<String>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one boundary (without geometry)
    Boundary {
        /// Slug of the owning set
        set_slug: String,
        /// Slug of the boundary
        slug: String,
    },

    /// Show the geometry of one boundary
    Shape {
        /// Slug of the owning set
        set_slug: String,
        /// Slug of the boundary
        slug: String,
    },

    /// Delete one boundary
    DeleteBoundary {
        /// Slug of the owning set
        set_slug: String,
        /// Slug of the boundary
        slug: String,
    },

    /// Load a boundary set and its boundaries from a JSON file
    Load {
        /// JSON file with a "set" object and a "boundaries" array
        file: PathBuf,
        /// Replace the set if it is already loaded
        #[arg(long)]
        replace: bool,
    },
}
