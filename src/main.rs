//! # Merchant Views Entry Point
//!
//! Applies migrations, loads the reference exports and materializes the
//! views for the configured merchant and ads customer.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use merchant_views::{
    config::{AppConfig, ConfigLoader},
    db,
    materializer::{Materializer, ViewKind},
    seeds::seed_reference_tables,
    telemetry::init_tracing,
};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "merchant-views", version, about = "Merchant-center view materializer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Replace the geo-target and language reference tables from CSV exports.
    LoadReference {
        #[arg(long, value_name = "CSV")]
        geo_targets: PathBuf,
        #[arg(long, value_name = "CSV")]
        language_codes: PathBuf,
    },
    /// Rebuild one or both views.
    Materialize {
        #[arg(value_enum, default_value_t = ViewSelection::All)]
        view: ViewSelection,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ViewSelection {
    Inventory,
    BestSellers,
    All,
}

impl ViewSelection {
    fn views(self) -> Vec<ViewKind> {
        match self {
            Self::Inventory => vec![ViewKind::Inventory],
            Self::BestSellers => vec![ViewKind::BestSellers],
            Self::All => ViewKind::ALL.to_vec(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "merchant-views failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::new().load().context("loading configuration")?;
    match &cli.command {
        Command::Materialize { .. } => config.validate(),
        _ => config.validate_runtime(),
    }
    .context("validating configuration")?;

    init_tracing(&config).context("initializing tracing")?;
    info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted) = config.redacted_json() {
        tracing::debug!(config = %redacted, "Effective configuration");
    }

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;

    match cli.command {
        Command::Migrate => {
            db::run_migrations(&db).await.context("running migrations")?;
            info!("Migrations applied");
        }
        Command::LoadReference {
            geo_targets,
            language_codes,
        } => {
            let summary = seed_reference_tables(&db, &geo_targets, &language_codes)
                .await
                .context("loading reference tables")?;
            info!(
                geo_targets = summary.geo_targets,
                language_codes = summary.language_codes,
                "Reference tables replaced"
            );
        }
        Command::Materialize { view } => materialize(&config, db, view).await?,
    }

    Ok(())
}

async fn materialize(
    config: &AppConfig,
    db: sea_orm::DatabaseConnection,
    selection: ViewSelection,
) -> Result<()> {
    let namespace = config.namespace().context("resolving source namespace")?;
    let materializer = Materializer::new(Arc::new(db), namespace, config.run_scope());

    let reports = materializer.run(&selection.views()).await?;
    for report in reports {
        info!(
            view = %report.view,
            rows_written = report.rows_written,
            "Materialized view"
        );
    }
    Ok(())
}
