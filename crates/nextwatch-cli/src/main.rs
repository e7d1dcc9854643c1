//! Next Watch CLI — path resolution for project files across storage backends.

use clap::{Parser, Subcommand};
use nextwatch_cli::init_tracing;
use nextwatch_core::{resolve, Protocol, ResolveOptions, StorageBackend};

#[derive(Parser)]
#[command(name = "nextwatch", about = "Next Watch data tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve path segments to a location on a storage backend
    Resolve {
        /// Path segments, in order (e.g. data/01-external movielens ratings)
        segments: Vec<String>,
        /// Replacement extension for the last segment, with leading dot
        #[arg(long, default_value = "")]
        suffix: String,
        /// Render as a string (adds the scheme on the object store)
        #[arg(long)]
        as_string: bool,
        /// Storage backend: container, object-store or local
        #[arg(long, default_value = "container")]
        storage: StorageBackend,
        /// Object store protocol
        #[arg(long, default_value = "s3a")]
        scheme: Protocol,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            segments,
            suffix,
            as_string,
            storage,
            scheme,
        } => {
            let options = ResolveOptions::new(storage)
                .with_suffix(suffix)
                .as_string(as_string)
                .with_scheme(scheme);
            let location = resolve(&segments, &options)?;
            tracing::debug!(?location, "Resolved");
            println!("{}", location);
        }
    }

    Ok(())
}
