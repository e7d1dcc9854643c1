//! CSV extraction for ETL jobs.

use std::collections::BTreeSet;

use csv::{ReaderBuilder, Trim};
use nextwatch_core::AppError;
use serde::Serialize;

/// Distinct integer values of one CSV column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistinctColumn {
    pub column: String,
    /// Ascending, without duplicates.
    pub values: Vec<i64>,
    /// Data rows read, excluding the header.
    pub rows_read: u64,
    /// Rows whose cell was empty.
    pub nulls_skipped: u64,
}

/// Read CSV `data` with a header row and collect the distinct values of `column`.
///
/// Empty cells are treated as nulls and skipped. Any other value that is not
/// an integer fails the whole extraction.
pub fn distinct_column(data: &[u8], column: &str) -> Result<DistinctColumn, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| AppError::Dataset(format!("Failed to read CSV header: {}", e)))?
        .clone();

    let index = headers.iter().position(|h| h == column).ok_or_else(|| {
        AppError::Dataset(format!(
            "Column {:?} not found; available columns: {}",
            column,
            headers.iter().collect::<Vec<_>>().join(", ")
        ))
    })?;

    let mut values = BTreeSet::new();
    let mut rows_read = 0u64;
    let mut nulls_skipped = 0u64;

    for record in reader.records() {
        rows_read += 1;
        let record = record
            .map_err(|e| AppError::Dataset(format!("Malformed CSV row {}: {}", rows_read, e)))?;

        match record.get(index) {
            None | Some("") => nulls_skipped += 1,
            Some(raw) => {
                let value = raw.parse::<i64>().map_err(|_| {
                    AppError::Dataset(format!(
                        "Row {}: {:?} value {:?} is not an integer",
                        rows_read, column, raw
                    ))
                })?;
                values.insert(value);
            }
        }
    }

    if nulls_skipped > 0 {
        tracing::warn!(column, nulls_skipped, "Skipped empty values");
    }
    tracing::debug!(column, rows_read, distinct = values.len(), "Extracted column");

    Ok(DistinctColumn {
        column: column.to_string(),
        values: values.into_iter().collect(),
        rows_read,
        nulls_skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATINGS: &str = "userId,movieId,rating,timestamp\n\
        1,31,2.5,1260759144\n\
        1,1029,3.0,1260759179\n\
        7,1061,3.0,1260759182\n\
        3,1129,2.0,1260759185\n\
        7,1172,4.0,1260759205\n";

    #[test]
    fn deduplicates_and_sorts() {
        let result = distinct_column(RATINGS.as_bytes(), "userId").unwrap();
        assert_eq!(result.values, vec![1, 3, 7]);
        assert_eq!(result.rows_read, 5);
        assert_eq!(result.nulls_skipped, 0);
    }

    #[test]
    fn picks_requested_column() {
        let result = distinct_column(RATINGS.as_bytes(), "movieId").unwrap();
        assert_eq!(result.values, vec![31, 1029, 1061, 1129, 1172]);
    }

    #[test]
    fn empty_cells_are_skipped() {
        let data = "userId,rating\n4,1.0\n,2.0\n 4 ,3.0\n";
        let result = distinct_column(data.as_bytes(), "userId").unwrap();
        assert_eq!(result.values, vec![4]);
        assert_eq!(result.nulls_skipped, 1);
        assert_eq!(result.rows_read, 3);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = distinct_column(RATINGS.as_bytes(), "user_id").unwrap_err();
        assert!(matches!(err, AppError::Dataset(_)));
        assert!(err.to_string().contains("userId, movieId"));
    }

    #[test]
    fn non_integer_value_fails_with_row() {
        let err = distinct_column(RATINGS.as_bytes(), "rating").unwrap_err();
        assert!(err.to_string().contains("Row 1"));
    }

    #[test]
    fn header_only_yields_nothing() {
        let result = distinct_column(b"userId\n", "userId").unwrap();
        assert!(result.values.is_empty());
        assert_eq!(result.rows_read, 0);
    }
}
