//! CLI entry point - the composition root.
//!
//! Parses arguments, initializes logging, bootstraps the catalog and
//! dispatches to handlers.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use boundaries_cli::error::exit_code_for;
use boundaries_cli::handlers::{self, sets::SetChanges};
use boundaries_cli::{Cli, CliConfig, Commands, bootstrap};
use boundaries_core::BoundaryFilter;

/// Initialize tracing on stderr so stdout stays parseable JSON.
///
/// `RUST_LOG` wins when set; otherwise `-v` selects `debug`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::from_cli(&cli)?;
    let ctx = bootstrap(config).await?;

    match command {
        Commands::Init => {
            eprintln!("Catalog ready.");
        }
        Commands::Sets => handlers::sets::list(&ctx).await?,
        Commands::Set { slug } => handlers::sets::show(&ctx, slug).await?,
        Commands::UpdateSet {
            slug,
            name,
            singular,
            kind_first,
            authority,
            domain,
            hierarchy,
            last_updated,
            href,
            notes,
            count,
            metadata_fields,
        } => {
            let changes = SetChanges {
                name: name.clone(),
                singular: singular.clone(),
                kind_first: *kind_first,
                authority: authority.clone(),
                domain: domain.clone(),
                hierarchy: hierarchy.clone(),
                last_updated: last_updated.clone(),
                href: href.clone(),
                notes: notes.clone(),
                count: *count,
                metadata_fields: metadata_fields.clone(),
            };
            handlers::sets::update(&ctx, slug, changes).await?;
        }
        Commands::DeleteSet { slug } => handlers::sets::delete(&ctx, slug).await?,
        Commands::Completeness { slug } => handlers::sets::completeness(&ctx, slug).await?,
        Commands::Boundaries {
            set_slug,
            name,
            external_id,
            limit,
        } => {
            let filter = BoundaryFilter {
                set_slug: set_slug.clone(),
                name: name.clone(),
                external_id: external_id.clone(),
                limit: *limit,
            };
            handlers::boundaries::list(&ctx, &filter).await?;
        }
        Commands::Boundary { set_slug, slug } => {
            handlers::boundaries::show(&ctx, set_slug, slug).await?;
        }
        Commands::Shape { set_slug, slug } => {
            handlers::boundaries::shape(&ctx, set_slug, slug).await?;
        }
        Commands::DeleteBoundary { set_slug, slug } => {
            handlers::boundaries::delete(&ctx, set_slug, slug).await?;
        }
        Commands::Load { file, replace } => {
            handlers::load::execute(&ctx, file, *replace).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code_for(&err));
    }
}
