//! Dataset catalog
//!
//! Typed tokens naming data sources, datasets and file formats. Segment tokens
//! implement `AsRef<Path>` so they can be handed straight to the resolver.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;

macro_rules! segment_token {
    ($ty:ident) => {
        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl AsRef<Path> for $ty {
            fn as_ref(&self) -> &Path {
                Path::new(self.as_str())
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Upstream data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    MovieLens,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::MovieLens => "movielens",
        }
    }
}

segment_token!(Source);

/// Tables shipped by a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Ratings,
    Movies,
    Tags,
    Links,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Ratings => "ratings",
            Dataset::Movies => "movies",
            Dataset::Tags => "tags",
            Dataset::Links => "links",
        }
    }
}

segment_token!(Dataset);

impl FromStr for Dataset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ratings" => Ok(Dataset::Ratings),
            "movies" => Ok(Dataset::Movies),
            "tags" => Ok(Dataset::Tags),
            "links" => Ok(Dataset::Links),
            _ => Err(anyhow::anyhow!("Unknown dataset: {}", s)),
        }
    }
}

/// Which copy of a dataset a raw-zone path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetType {
    Production,
    Sample,
}

impl DatasetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetType::Production => "production",
            DatasetType::Sample => "sample",
        }
    }
}

segment_token!(DatasetType);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Parquet,
    Json,
}

impl FileFormat {
    /// Extension with its leading dot, as accepted by `ResolveOptions::with_suffix`.
    pub fn suffix(&self) -> &'static str {
        match self {
            FileFormat::Csv => ".csv",
            FileFormat::Parquet => ".parquet",
            FileFormat::Json => ".json",
        }
    }

    /// Bare format name (`csv`).
    pub fn name(&self) -> &'static str {
        &self.suffix()[1..]
    }
}

impl Display for FileFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_render_as_segments() {
        let source = Source::MovieLens;
        let path: &Path = source.as_ref();
        assert_eq!(path, Path::new("movielens"));
        assert_eq!(Dataset::Ratings.to_string(), "ratings");
        assert_eq!(DatasetType::Production.to_string(), "production");
    }

    #[test]
    fn file_format_names() {
        assert_eq!(FileFormat::Csv.suffix(), ".csv");
        assert_eq!(FileFormat::Csv.name(), "csv");
        assert_eq!(FileFormat::Parquet.name(), "parquet");
    }

    #[test]
    fn dataset_parses_case_insensitively() {
        assert_eq!("Ratings".parse::<Dataset>().unwrap(), Dataset::Ratings);
        assert!("users".parse::<Dataset>().is_err());
    }
}
