use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Something with a name whose whole contents can be read at once.
#[async_trait]
pub trait TextFile: Send + Sync {
    /// Reported as the `source` of the load.
    fn name(&self) -> &str;

    async fn read_bytes(&self) -> io::Result<Vec<u8>>;
}

/// A file on the local filesystem, read with `tokio::fs`.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        Self { path, name }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TextFile for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_bytes(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// Bytes already in memory, e.g. an upload or stdin.
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    name: String,
    bytes: Vec<u8>,
}

impl InMemoryFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl TextFile for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
