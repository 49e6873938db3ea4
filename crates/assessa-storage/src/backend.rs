use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Where the serialized document lives.
///
/// A backend holds exactly one document and replaces it whole on every
/// write. There is no partial update and no locking: one writer at a time.
pub trait DocumentStore {
    /// Raw bytes of the stored document, or `None` if nothing was stored yet.
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the stored document in a single step.
    fn write(&mut self, body: &[u8]) -> Result<(), StorageError>;

    /// Human-readable location, for logs and error messages.
    fn location(&self) -> String;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read()
    }

    fn write(&mut self, body: &[u8]) -> Result<(), StorageError> {
        (**self).write(body)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// In-process store, used in tests and for throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    body: Option<Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing contents, as if a previous session had saved them.
    pub fn with_contents(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: Some(body.into()),
            writes: 0,
        }
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.body.clone())
    }

    fn write(&mut self, body: &[u8]) -> Result<(), StorageError> {
        self.body = Some(body.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// A JSON file on local disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Write {
            location: self.location(),
            source,
        }
    }
}

impl DocumentStore for FileStore {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                location: self.location(),
                source,
            }),
        }
    }

    /// Write to a sibling temp file then rename over the target, so a crash
    /// mid-write leaves the previous document intact.
    fn write(&mut self, body: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, body).map_err(|e| self.write_error(e))?;

        // Owner read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| self.write_error(e))?;
        }

        std::fs::rename(&tmp_path, &self.path).map_err(|e| self.write_error(e))?;

        tracing::debug!(path = %self.path.display(), bytes = body.len(), "document written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
