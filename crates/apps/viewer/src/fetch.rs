use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Resource access seam: the engine asks for resources by name and never
/// touches the filesystem or network itself, so hosts own where data comes
/// from and when fetches run.
pub trait ResourceFetcher {
    fn fetch(&self, resource: &str) -> Result<String, FetchError>;
}

#[derive(Debug)]
pub enum FetchError {
    Io {
        resource: String,
        source: std::io::Error,
    },
    NotFound {
        resource: String,
    },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Io { resource, source } => {
                write!(f, "failed to read {resource}: {source}")
            }
            FetchError::NotFound { resource } => write!(f, "no such resource: {resource}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Reads resources from a directory root.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceFetcher for DirFetcher {
    fn fetch(&self, resource: &str) -> Result<String, FetchError> {
        let path = self.root.join(resource);
        fs::read_to_string(&path).map_err(|source| FetchError::Io {
            resource: resource.to_string(),
            source,
        })
    }
}

/// In-memory resources, for tests and embedders.
#[derive(Debug, Default, Clone)]
pub struct MemoryFetcher {
    resources: BTreeMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: impl Into<String>, payload: impl Into<String>) {
        self.resources.insert(resource.into(), payload.into());
    }
}

impl ResourceFetcher for MemoryFetcher {
    fn fetch(&self, resource: &str) -> Result<String, FetchError> {
        self.resources
            .get(resource)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                resource: resource.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchError, MemoryFetcher, ResourceFetcher};

    #[test]
    fn memory_fetcher_round_trip() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert("cities.csv", "City,Longitude,Latitude,Year\n");
        assert!(fetcher.fetch("cities.csv").is_ok());
        assert!(matches!(
            fetcher.fetch("battles.csv"),
            Err(FetchError::NotFound { .. })
        ));
    }
}
