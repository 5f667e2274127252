//! catalog-ingest: fill the `vehicle_catalog` table from CSV files or the NHTSA vPIC API.

use std::path::PathBuf;
use std::time::Duration;

use backend::logging::pii::Redacted;
use backend::{connect_db, DbSettings};
use catalog_ingest::harvest::{parse_makes, HarvestOptions, Harvester};
use catalog_ingest::retry::RetryPolicy;
use catalog_ingest::sinks::{CatalogSink, CsvSink, DbSink};
use catalog_ingest::vpic::{VpicClient, DEFAULT_BASE_URL};
use catalog_ingest::{csv_to_sql, IngestError, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "catalog-ingest")]
#[command(about = "Populate the vehicle catalog from CSV files or the NHTSA vPIC API")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a catalog CSV into batched INSERT statements
    CsvToSql {
        /// CSV with year, make, model and optional trim, engine, transmission columns
        #[arg(long)]
        input: PathBuf,

        /// SQL file to write
        #[arg(long)]
        output: PathBuf,

        /// Rows per INSERT statement
        #[arg(long, default_value = "1000")]
        batch_size: usize,
    },

    /// Harvest makes and models from vPIC
    Harvest {
        /// Oldest model year
        #[arg(long)]
        from_year: i32,

        /// Newest model year
        #[arg(long)]
        to_year: i32,

        /// Comma-separated manufacturers; defaults to every passenger-car make
        #[arg(long)]
        makes: Option<String>,

        /// CSV file to append to; resumes from rows already present
        #[arg(long)]
        output: Option<PathBuf>,

        /// Insert rows into this database as well
        #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
        database_url: Option<String>,

        /// Pause between requests
        #[arg(long, default_value = "250")]
        delay_ms: u64,

        /// Retries for transient failures
        #[arg(long, default_value = "3")]
        max_retries: u32,

        /// vPIC API root
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::CsvToSql {
            input,
            output,
            batch_size,
        } => {
            csv_to_sql::run(&input, &output, batch_size)?;
        }
        Command::Harvest {
            from_year,
            to_year,
            makes,
            output,
            database_url,
            delay_ms,
            max_retries,
            base_url,
        } => {
            let options = HarvestOptions {
                from_year,
                to_year,
                makes: makes.as_deref().map(parse_makes),
                delay: Duration::from_millis(delay_ms),
                retry: RetryPolicy::new(max_retries, Duration::from_millis(500)),
            };
            options.validate()?;

            let mut sinks: Vec<Box<dyn CatalogSink>> = Vec::new();
            if let Some(path) = &output {
                sinks.push(Box::new(CsvSink::open(path)?));
            }
            if let Some(url) = &database_url {
                info!(database_url = %Redacted(url), "harvest=connect");
                let db = connect_db(&DbSettings::for_url(url.as_str())?).await?;
                sinks.push(Box::new(DbSink::new(db)));
            }
            if sinks.is_empty() {
                return Err(IngestError::InvalidArgs(
                    "harvest needs --output and/or --database-url".into(),
                ));
            }

            let client = VpicClient::new(&base_url)?;
            let mut harvester = Harvester::new(&client, sinks, options);
            harvester.load_existing().await?;
            harvester.run().await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        "catalog_ingest=debug,backend=info,sqlx=warn"
    } else {
        "catalog_ingest=info,sqlx=warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(args.command).await {
        error!(error = %e, "catalog-ingest failed");
        std::process::exit(1);
    }
}
