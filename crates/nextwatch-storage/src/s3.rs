use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use nextwatch_core::{ObjectStoreConfig, Protocol};
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, Result as ObjectResult};

/// A parsed `scheme://bucket/key` object location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUri {
    pub scheme: Protocol,
    pub bucket: String,
    pub key: String,
}

impl ObjectUri {
    /// Split an object-store location. The first path segment is the bucket.
    pub fn parse(location: &str) -> StorageResult<Self> {
        let (scheme, rest) = location.split_once("://").ok_or_else(|| {
            StorageError::InvalidLocation(format!("Missing scheme in {}", location))
        })?;
        let scheme: Protocol = scheme
            .parse()
            .map_err(|e| StorageError::InvalidLocation(format!("{}", e)))?;

        let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
        let key = key.trim_start_matches('/');
        if bucket.is_empty() || key.is_empty() {
            return Err(StorageError::InvalidLocation(format!(
                "Expected {}://<bucket>/<key>, got {}",
                scheme, location
            )));
        }
        if key.split('/').any(|segment| segment == "..") {
            return Err(StorageError::InvalidLocation(format!(
                "Location contains '..': {}",
                location
            )));
        }

        Ok(ObjectUri {
            scheme,
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

/// S3 reader
///
/// Buckets are taken from each location, so one reader serves every bucket in
/// the configured region.
#[derive(Clone, Debug)]
pub struct S3Storage {
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(region: String, endpoint_url: Option<String>) -> Self {
        S3Storage {
            region,
            endpoint_url,
        }
    }

    pub fn from_config(config: &ObjectStoreConfig) -> Self {
        Self::new(config.region.clone(), config.endpoint.clone())
    }

    /// Build an AmazonS3 store for `bucket` from environment credentials and
    /// explicit settings.
    fn store_for(&self, bucket: &str) -> StorageResult<AmazonS3> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(self.region.clone())
            .with_bucket_name(bucket.to_string());

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn read(&self, location: &str) -> StorageResult<Bytes> {
        let start = std::time::Instant::now();
        let uri = ObjectUri::parse(location)?;
        let store = self.store_for(&uri.bucket)?;
        let path = Path::from(uri.key.clone());

        let result: ObjectResult<_> = store.get(&path).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(location.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %uri.bucket,
                    key = %uri.key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 read failed"
                );
                StorageError::ReadFailed(other.to_string())
            }
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %uri.bucket,
            key = %uri.key,
            size_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 read successful"
        );

        Ok(bytes)
    }

    async fn exists(&self, location: &str) -> StorageResult<bool> {
        let uri = ObjectUri::parse(location)?;
        let store = self.store_for(&uri.bucket)?;
        let path = Path::from(uri.key);
        match store.head(&path).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::ObjectStore
    }
}
