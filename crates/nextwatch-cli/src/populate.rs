//! populate-users job
//!
//! Reads the MovieLens ratings dataset, keeps the distinct user ids and
//! overwrites the users table with them.

use nextwatch_core::catalog::{Dataset, DatasetType, FileFormat, Source};
use nextwatch_core::paths::{DATA_01_EXTERNAL, DATA_01_RAW};
use nextwatch_core::{
    resolve_string, AppError, EtlConfig, PathError, Protocol, ResolveOptions, StorageBackend,
};
use nextwatch_db::{quote_ident, UserRepository};
use nextwatch_storage::{create_storage, Storage};
use serde::Serialize;

use crate::ingest::{distinct_column, DistinctColumn};

pub const DEFAULT_TABLE: &str = "users";
pub const DEFAULT_COLUMN: &str = "userId";

#[derive(Debug, Clone)]
pub struct PopulateOptions {
    pub storage: StorageBackend,
    pub scheme: Protocol,
    /// Overrides the default ratings location for `storage`.
    pub dataset_location: Option<String>,
    pub table: String,
    pub column: String,
    /// Extract and report without touching the database.
    pub dry_run: bool,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            storage: StorageBackend::ObjectStore,
            scheme: Protocol::default(),
            dataset_location: None,
            table: DEFAULT_TABLE.to_string(),
            column: DEFAULT_COLUMN.to_string(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PopulateSummary {
    pub location: String,
    pub backend: StorageBackend,
    pub table: String,
    pub column: String,
    pub rows_read: u64,
    pub nulls_skipped: u64,
    pub distinct_values: usize,
    /// `None` on a dry run.
    pub rows_written: Option<u64>,
}

impl PopulateSummary {
    /// Human-readable report, one field per line.
    pub fn to_text(&self) -> String {
        let written = match self.rows_written {
            Some(rows) => format!("Written to {}:  {} rows", self.table, rows),
            None => format!("Dry run: {} left untouched", self.table),
        };
        format!(
            "Source:          {} ({})\n\
             Column:          {}\n\
             Rows read:       {}\n\
             Empty skipped:   {}\n\
             Distinct values: {}\n\
             {}",
            self.location,
            self.backend,
            self.column,
            self.rows_read,
            self.nulls_skipped,
            self.distinct_values,
            written
        )
    }
}

/// Where the ratings CSV lives on `storage`.
///
/// The object store holds the production copy in the raw zone; container and
/// local checkouts read the external download.
pub fn default_dataset_location(
    storage: StorageBackend,
    scheme: Protocol,
) -> Result<String, PathError> {
    let options = ResolveOptions::new(storage)
        .with_suffix(FileFormat::Csv.suffix())
        .with_scheme(scheme);

    match storage {
        StorageBackend::ObjectStore => resolve_string(
            [
                DATA_01_RAW,
                Source::MovieLens.as_str(),
                DatasetType::Production.as_str(),
                Dataset::Ratings.as_str(),
            ],
            &options,
        ),
        StorageBackend::Container | StorageBackend::Local => resolve_string(
            [
                DATA_01_EXTERNAL,
                Source::MovieLens.as_str(),
                Dataset::Ratings.as_str(),
            ],
            &options,
        ),
    }
}

/// Read `location` from `storage` and collect the distinct values of `column`.
pub async fn extract_distinct(
    storage: &dyn Storage,
    location: &str,
    column: &str,
) -> Result<DistinctColumn, AppError> {
    let data = storage.read(location).await?;
    distinct_column(&data, column)
}

/// Run the job end to end.
pub async fn run(config: &EtlConfig, options: &PopulateOptions) -> Result<PopulateSummary, AppError> {
    // Fail on bad identifiers before any I/O.
    quote_ident(&options.table)?;
    quote_ident(&options.column)?;

    let location = match &options.dataset_location {
        Some(location) => location.clone(),
        None => default_dataset_location(options.storage, options.scheme)?,
    };

    tracing::info!(
        backend = %options.storage,
        location = %location,
        table = %options.table,
        dry_run = options.dry_run,
        "Populating users"
    );

    let storage = create_storage(options.storage, &config.object_store)?;
    let extracted = extract_distinct(storage.as_ref(), &location, &options.column).await?;

    let rows_written = if options.dry_run {
        tracing::info!(distinct = extracted.values.len(), "Dry run, skipping database write");
        None
    } else {
        let pool = nextwatch_db::connect(&config.database).await?;
        let repository = UserRepository::new(pool, &options.table, &options.column)?;
        Some(repository.overwrite(&extracted.values).await?)
    };

    Ok(PopulateSummary {
        location,
        backend: options.storage,
        table: options.table.clone(),
        column: extracted.column,
        rows_read: extracted.rows_read,
        nulls_skipped: extracted.nulls_skipped,
        distinct_values: extracted.values.len(),
        rows_written,
    })
}
