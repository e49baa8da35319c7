//! Boundary command handlers.

use anyhow::Result;
use boundaries_core::BoundaryFilter;

use super::print_json;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the boundaries command: list matching boundaries.
pub async fn list(ctx: &CliContext, filter: &BoundaryFilter) -> Result<()> {
    let entries = ctx
        .catalog()
        .list_boundaries(filter)
        .await
        .map_err(CliError::from)?;
    print_json(&entries)
}

/// Execute the boundary command: show one boundary without geometry.
pub async fn show(ctx: &CliContext, set_slug: &str, slug: &str) -> Result<()> {
    let detail = ctx
        .catalog()
        .boundary_detail(set_slug, slug)
        .await
        .map_err(CliError::from)?;
    print_json(&detail)
}

/// Execute the shape command: show one boundary's geometry.
pub async fn shape(ctx: &CliContext, set_slug: &str, slug: &str) -> Result<()> {
    let shape = ctx
        .catalog()
        .boundary_shape(set_slug, slug)
        .await
        .map_err(CliError::from)?;
    print_json(&shape)
}

/// Execute the delete-boundary command.
pub async fn delete(ctx: &CliContext, set_slug: &str, slug: &str) -> Result<()> {
    ctx.catalog()
        .delete_boundary(set_slug, slug)
        .await
        .map_err(CliError::from)?;
    eprintln!("Deleted boundary '{set_slug}/{slug}'.");
    Ok(())
}
