//! Storage sinks that receive rendered tables

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ExportError;

/// Logical location of an exported object: `{namespace}/{league_id}/{file_name}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectPath {
    pub namespace: String,
    pub league_id: String,
    pub file_name: String,
}

impl ObjectPath {
    pub fn new(
        namespace: impl Into<String>,
        league_id: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            league_id: league_id.into(),
            file_name: file_name.into(),
        }
    }

    /// The path resolved below a local root directory
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.namespace)
            .join(&self.league_id)
            .join(&self.file_name)
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.namespace, self.league_id, self.file_name)
    }
}

/// Destination for exported objects.
///
/// An implementation must either store the whole body or return an error;
/// the exporter does not retry.
pub trait StorageSink {
    fn put(&mut self, path: &ObjectPath, content_type: &str, body: &[u8])
    -> Result<(), ExportError>;
}

/// Writes objects as files under a root directory.
#[derive(Debug, Clone)]
pub struct LocalDirSink {
    root: PathBuf,
}

impl LocalDirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl StorageSink for LocalDirSink {
    fn put(&mut self, path: &ObjectPath, content_type: &str, body: &[u8]) -> Result<(), ExportError> {
        let target = path.under(&self.root);
        let write_error = |source: std::io::Error| ExportError::Write {
            path: target.display().to_string(),
            source,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&target, body).map_err(write_error)?;

        info!(
            "Wrote {} bytes ({content_type}) to {}",
            body.len(),
            target.display()
        );
        Ok(())
    }
}

/// Prints each object to a writer behind a `# {path}` banner.
pub struct StdoutSink<W: Write = std::io::Stdout> {
    out: W,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StorageSink for StdoutSink<W> {
    fn put(&mut self, path: &ObjectPath, _content_type: &str, body: &[u8]) -> Result<(), ExportError> {
        let write_error = |source: std::io::Error| ExportError::Write {
            path: path.to_string(),
            source,
        };

        writeln!(self.out, "# {path}").map_err(write_error)?;
        self.out.write_all(body).map_err(write_error)?;
        self.out.flush().map_err(write_error)?;
        debug!("Printed {path} ({} bytes)", body.len());
        Ok(())
    }
}

/// A stored object as kept by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Keeps objects in memory, keyed by their logical path.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    objects: BTreeMap<String, StoredObject>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&StoredObject> {
        self.objects.get(path)
    }

    /// Body of a stored object as UTF-8 text
    pub fn text(&self, path: &str) -> Option<String> {
        self.get(path)
            .map(|object| String::from_utf8_lossy(&object.body).into_owned())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl StorageSink for MemorySink {
    fn put(&mut self, path: &ObjectPath, content_type: &str, body: &[u8]) -> Result<(), ExportError> {
        self.objects.insert(
            path.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                body: body.to_vec(),
            },
        );
        Ok(())
    }
}
