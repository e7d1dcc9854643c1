use anyhow::{Context, Result};
use clap::Parser;
use nextwatch_cli::populate::{self, PopulateOptions, DEFAULT_COLUMN, DEFAULT_TABLE};
use nextwatch_cli::{init_tracing, log_app_error};
use nextwatch_core::{load_dotenv, EtlConfig, Protocol, StorageBackend};

#[derive(Parser, Debug)]
#[command(name = "populate_db_with_users")]
#[command(about = "Load distinct user ids from the ratings dataset into the database")]
struct Args {
    /// Backend the ratings dataset is read from
    #[arg(long, default_value = "object-store")]
    storage: StorageBackend,

    /// Object store protocol
    #[arg(long, default_value = "s3a")]
    scheme: Protocol,

    /// Backend whose root holds the .env file
    #[arg(long, default_value = "container")]
    env_storage: StorageBackend,

    /// Explicit dataset location, overriding the resolved default
    #[arg(long, value_name = "LOCATION")]
    dataset: Option<String>,

    /// Target table (replaced on every run)
    #[arg(long, default_value = DEFAULT_TABLE)]
    table: String,

    /// Column to deduplicate and write
    #[arg(long, default_value = DEFAULT_COLUMN)]
    column: String,

    /// Read and deduplicate without writing to the database
    #[arg(long)]
    dry_run: bool,

    /// Output format: json or text (default: text)
    #[arg(long, default_value = "text")]
    format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    load_dotenv(args.env_storage).context("Failed to load environment file")?;
    let config = EtlConfig::from_env().context("Invalid database or storage configuration")?;

    let options = PopulateOptions {
        storage: args.storage,
        scheme: args.scheme,
        dataset_location: args.dataset,
        table: args.table,
        column: args.column,
        dry_run: args.dry_run,
    };

    let summary = match populate::run(&config, &options).await {
        Ok(summary) => summary,
        Err(err) => {
            log_app_error(&err);
            return Err(err.into());
        }
    };

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            println!("{}", summary.to_text());
        }
    }

    Ok(())
}
