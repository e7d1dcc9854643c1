//! Path resolution
//!
//! Builds fully-qualified locations for project files across storage backends.
//! A location is assembled from a backend root followed by ordered segments:
//!
//! - **Container**: `/app/{segments}`
//! - **ObjectStore**: `{segments}`, rendered as `{scheme}://{segments}` in string form
//! - **Local**: `{workspace root}/{segments}`
//!
//! Resolution is pure; the only ambient input is the workspace root, which is
//! fixed at compile time.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use crate::storage_types::{Protocol, StorageBackend};

/// Root directory of the application inside the deployed container.
pub const CONTAINER_ROOT: &str = "/app";

pub const SRC: &str = "src";
pub const DATA: &str = "data";
pub const DATA_01_EXTERNAL: &str = "data/01-external";
pub const DATA_01_RAW: &str = "data/01-raw";
pub const DATA_02_PROCESSED: &str = "data/02-processed";
pub const DATA_03_TRAIN: &str = "data/03-train";
pub const DATA_04_MONITORING: &str = "data/04-monitoring";
pub const LOGS: &str = "logs";
pub const ENV: &str = ".env";
pub const ASSETS: &str = "assets";
pub const SPARKML_TMP_DIR: &str = "docker/sparktmp";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Invalid suffix {0:?}: must start with '.' and name an extension")]
    InvalidSuffix(String),

    #[error("Cannot apply suffix {suffix:?} to {path:?}: path has an empty name")]
    EmptyName { path: PathBuf, suffix: String },
}

/// Options controlling how segments are turned into a location.
///
/// Defaults: no suffix, structured path output, [`StorageBackend::Container`],
/// [`Protocol::S3a`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Replacement extension for the final component, including the leading dot.
    /// Empty leaves the final component untouched.
    pub suffix: String,
    /// Render the location as a string instead of a path.
    pub as_string: bool,
    pub storage: StorageBackend,
    /// Only consulted for [`StorageBackend::ObjectStore`] string output.
    pub scheme: Protocol,
}

impl ResolveOptions {
    pub fn new(storage: StorageBackend) -> Self {
        Self {
            storage,
            ..Self::default()
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn as_string(mut self, as_string: bool) -> Self {
        self.as_string = as_string;
        self
    }

    pub fn with_storage(mut self, storage: StorageBackend) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_scheme(mut self, scheme: Protocol) -> Self {
        self.scheme = scheme;
        self
    }
}

/// A resolved location: a structured path, or its rendered string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Path(PathBuf),
    Text(String),
}

impl Location {
    /// The structured path, if this location was not rendered as a string.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::Path(path) => Some(path),
            Location::Text(_) => None,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Location::Path(path) => path.display().to_string(),
            Location::Text(text) => text,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Text(text) => f.write_str(text),
        }
    }
}

/// Workspace root, two levels above this crate's manifest (`crates/nextwatch-core`).
pub fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Root prefix that every location on `storage` starts from.
pub fn storage_root(storage: StorageBackend) -> PathBuf {
    match storage {
        StorageBackend::Container => PathBuf::from(CONTAINER_ROOT),
        StorageBackend::ObjectStore => PathBuf::new(),
        StorageBackend::Local => project_root(),
    }
}

/// Resolve `segments` against the root of `options.storage`.
///
/// Segments are appended in order with `PathBuf::push` semantics, so an
/// absolute segment replaces everything before it. The joined path is then
/// normalized lexically: empty and `.` components, repeated separators and
/// trailing separators are dropped, while `..` is kept as written. A non-empty
/// suffix replaces the last extension of the final component.
pub fn resolve<I, S>(segments: I, options: &ResolveOptions) -> Result<Location, PathError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut joined = storage_root(options.storage);
    for segment in segments {
        joined.push(segment);
    }
    let mut path: PathBuf = joined
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();

    if !options.suffix.is_empty() {
        apply_suffix(&mut path, &options.suffix)?;
    }

    if !options.as_string {
        return Ok(Location::Path(path));
    }

    let rendered = path.display().to_string();
    Ok(Location::Text(if options.storage.is_remote() {
        format!("{}://{}", options.scheme, rendered)
    } else {
        rendered
    }))
}

/// Shorthand for [`resolve`] with structured output.
pub fn resolve_path<I, S>(segments: I, options: &ResolveOptions) -> Result<PathBuf, PathError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let options = options.clone().as_string(false);
    match resolve(segments, &options)? {
        Location::Path(path) => Ok(path),
        Location::Text(text) => Ok(PathBuf::from(text)),
    }
}

/// Shorthand for [`resolve`] with string output.
pub fn resolve_string<I, S>(segments: I, options: &ResolveOptions) -> Result<String, PathError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let options = options.clone().as_string(true);
    resolve(segments, &options).map(Location::into_string)
}

fn apply_suffix(path: &mut PathBuf, suffix: &str) -> Result<(), PathError> {
    let extension = suffix
        .strip_prefix('.')
        .filter(|ext| !ext.is_empty() && !ext.contains(['/', MAIN_SEPARATOR]))
        .ok_or_else(|| PathError::InvalidSuffix(suffix.to_string()))?;

    if !path.set_extension(extension) {
        return Err(PathError::EmptyName {
            path: path.clone(),
            suffix: suffix.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_root_prefixes_segments() {
        let location = resolve(["data", "raw"], &ResolveOptions::default()).unwrap();
        assert_eq!(location, Location::Path(PathBuf::from("/app/data/raw")));
    }

    #[test]
    fn zero_segments_yields_root() {
        let location = resolve(Vec::<&str>::new(), &ResolveOptions::default()).unwrap();
        assert_eq!(location.as_path(), Some(Path::new(CONTAINER_ROOT)));
    }

    #[test]
    fn multi_component_segment_is_expanded() {
        let path = resolve_path([DATA_01_EXTERNAL, "movielens"], &ResolveOptions::default())
            .unwrap();
        assert_eq!(path, PathBuf::from("/app/data/01-external/movielens"));
    }

    #[test]
    fn suffix_replaces_only_last_extension() {
        let options = ResolveOptions::default().with_suffix(".csv");
        let path = resolve_path(["a", "b.tar.gz"], &options).unwrap();
        assert_eq!(path, PathBuf::from("/app/a/b.tar.csv"));
    }

    #[test]
    fn suffix_on_dotfile_is_appended() {
        let options = ResolveOptions::default().with_suffix(".bak");
        let path = resolve_path([ENV], &options).unwrap();
        assert_eq!(path, PathBuf::from("/app/.env.bak"));
    }

    #[test]
    fn invalid_suffixes_are_rejected() {
        for suffix in ["csv", ".", "./x", ".a/b"] {
            let options = ResolveOptions::default().with_suffix(suffix);
            let err = resolve(["a"], &options).unwrap_err();
            assert_eq!(err, PathError::InvalidSuffix(suffix.to_string()));
        }
    }

    #[test]
    fn suffix_on_empty_object_store_path_fails() {
        let options = ResolveOptions::new(StorageBackend::ObjectStore).with_suffix(".csv");
        let err = resolve(Vec::<&str>::new(), &options).unwrap_err();
        assert!(matches!(err, PathError::EmptyName { .. }));
    }

    #[test]
    fn object_store_string_carries_scheme() {
        let options = ResolveOptions::new(StorageBackend::ObjectStore)
            .with_scheme(Protocol::S3)
            .as_string(true);
        let location = resolve(["bucket", "key.csv"], &options).unwrap();
        assert_eq!(location, Location::Text("s3://bucket/key.csv".to_string()));
    }

    #[test]
    fn object_store_path_has_no_scheme() {
        let options = ResolveOptions::new(StorageBackend::ObjectStore);
        let location = resolve(["bucket", "key.csv"], &options).unwrap();
        assert_eq!(location.to_string(), "bucket/key.csv");
    }

    #[test]
    fn scheme_ignored_off_object_store() {
        let options = ResolveOptions::new(StorageBackend::Container)
            .with_scheme(Protocol::S3n)
            .as_string(true);
        assert_eq!(resolve_string(["x"], &options).unwrap(), "/app/x");
    }

    #[test]
    fn local_root_is_workspace() {
        let root = project_root();
        assert!(root.is_absolute());
        assert!(root.join("crates").join("nextwatch-core").exists());

        let path = resolve_path([SRC], &ResolveOptions::new(StorageBackend::Local)).unwrap();
        assert_eq!(path, root.join("src"));
    }

    #[test]
    fn redundant_separators_and_dots_are_dropped() {
        let options = ResolveOptions::default();
        for (segments, expected) in [
            (vec!["a", ""], "/app/a"),
            (vec!["a", "."], "/app/a"),
            (vec!["a/"], "/app/a"),
            (vec!["data//01-raw", "x"], "/app/data/01-raw/x"),
            (vec!["a", "./b"], "/app/a/b"),
        ] {
            assert_eq!(resolve_string(&segments, &options).unwrap(), expected, "{segments:?}");
        }
    }

    #[test]
    fn object_store_location_is_normalized() {
        let options = ResolveOptions::new(StorageBackend::ObjectStore);
        assert_eq!(resolve_string(["data/"], &options).unwrap(), "s3a://data");
        assert_eq!(resolve_string(["./data", "x"], &options).unwrap(), "s3a://data/x");
        assert_eq!(resolve_string(Vec::<&str>::new(), &options).unwrap(), "s3a://");
    }

    #[test]
    fn parent_components_are_kept() {
        let path = resolve_path(["data", "..", "logs"], &ResolveOptions::default()).unwrap();
        assert_eq!(path, PathBuf::from("/app/data/../logs"));
    }

    #[test]
    fn absolute_segment_replaces_root() {
        let path = resolve_path(["data", "/etc/hosts"], &ResolveOptions::default()).unwrap();
        assert_eq!(path, PathBuf::from("/etc/hosts"));
    }
}
