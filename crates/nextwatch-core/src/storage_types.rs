use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
///
/// Decides which root a resolved path hangs off and whether it is rendered
/// as a URI. Defined in core because both the resolver and the storage
/// readers branch on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    /// Inside the deployed container, rooted at `/app`.
    #[default]
    Container,
    /// Remote object store; bucket and key are relative, rendered as `scheme://...`.
    ObjectStore,
    /// Checkout on the local machine, rooted at the workspace directory.
    Local,
}

impl StorageBackend {
    /// All backends, in declaration order.
    pub const ALL: [StorageBackend; 3] = [
        StorageBackend::Container,
        StorageBackend::ObjectStore,
        StorageBackend::Local,
    ];

    /// Whether resolved locations on this backend carry a protocol scheme.
    pub fn is_remote(&self) -> bool {
        matches!(self, StorageBackend::ObjectStore)
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "container" | "docker" => Ok(StorageBackend::Container),
            "object-store" | "object_store" | "objectstore" | "s3" => {
                Ok(StorageBackend::ObjectStore)
            }
            "local" | "project" => Ok(StorageBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Container => write!(f, "container"),
            StorageBackend::ObjectStore => write!(f, "object-store"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// Object-store access protocol, prepended as `{protocol}://` to remote locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    S3,
    #[default]
    S3a,
    S3n,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::S3 => "s3",
            Protocol::S3a => "s3a",
            Protocol::S3n => "s3n",
        }
    }
}

impl FromStr for Protocol {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s3" => Ok(Protocol::S3),
            "s3a" => Ok(Protocol::S3a),
            "s3n" => Ok(Protocol::S3n),
            _ => Err(anyhow::anyhow!("Invalid object store protocol: {}", s)),
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_aliases() {
        assert_eq!("docker".parse::<StorageBackend>().unwrap(), StorageBackend::Container);
        assert_eq!("S3".parse::<StorageBackend>().unwrap(), StorageBackend::ObjectStore);
        assert_eq!(" local ".parse::<StorageBackend>().unwrap(), StorageBackend::Local);
    }

    #[test]
    fn backend_rejects_unknown() {
        assert!("nfs".parse::<StorageBackend>().is_err());
        assert!("".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn backend_display_round_trips() {
        for backend in StorageBackend::ALL {
            assert_eq!(backend.to_string().parse::<StorageBackend>().unwrap(), backend);
        }
    }

    #[test]
    fn backend_serde_names() {
        let json = serde_json::to_string(&StorageBackend::ObjectStore).unwrap();
        assert_eq!(json, "\"object-store\"");
    }

    #[test]
    fn protocol_defaults_to_s3a() {
        assert_eq!(Protocol::default(), Protocol::S3a);
        assert_eq!(Protocol::default().to_string(), "s3a");
        assert!("gs".parse::<Protocol>().is_err());
    }
}
