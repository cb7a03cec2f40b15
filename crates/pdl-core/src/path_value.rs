//! File references that can carry the referenced file's bytes along.

use std::fs;
use std::path::{Path, PathBuf};

use crate::TreeError;

/// Directory below an unpack root that receives embedded files.
pub const EMBEDDED_DIR: &str = "embedded";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathValue {
    path: PathBuf,
    content: Option<Vec<u8>>,
}

impl PathValue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content: None,
        }
    }

    pub(crate) fn with_content(path: impl Into<PathBuf>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content: Some(content),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Points at another file. Embedded bytes belong to the old file and are
    /// dropped unless the path is unchanged.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if path != self.path {
            self.content = None;
            self.path = path;
        }
    }

    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    pub fn is_packed(&self) -> bool {
        self.content.is_some()
    }

    /// Non-empty and either present on disk or embedded.
    pub fn is_valid(&self) -> bool {
        !self.path.as_os_str().is_empty() && (self.path.exists() || self.is_packed())
    }

    /// Reads the referenced file into memory. A path that does not name a
    /// regular file is left unpacked.
    pub fn pack(&mut self) -> Result<(), TreeError> {
        if !self.path.is_file() {
            tracing::warn!(path = %self.path.display(), "not a regular file, skipping pack");
            return Ok(());
        }
        let bytes = fs::read(&self.path).map_err(|e| TreeError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "packed file");
        self.content = Some(bytes);
        Ok(())
    }

    pub fn remove_packed_data(&mut self) {
        self.content = None;
    }

    /// Where [`PathValue::unpack`] materializes the embedded bytes below `dir`.
    ///
    /// Files from different source directories get separate subdirectories,
    /// keyed by a checksum of the original parent path.
    pub fn unpack_path(&self, dir: &Path) -> PathBuf {
        let parent = self
            .path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let key = crc32fast::hash(parent.as_bytes());
        let mut target = dir.join(EMBEDDED_DIR).join(format!("{key:08x}"));
        if let Some(name) = self.path.file_name() {
            target.push(name);
        }
        target
    }

    /// Writes embedded bytes below `dir` and returns the written file, or
    /// `None` when nothing is embedded.
    pub fn unpack(&self, dir: &Path) -> Result<Option<PathBuf>, TreeError> {
        let Some(content) = &self.content else {
            return Ok(None);
        };
        if !dir.is_dir() {
            return Err(TreeError::io(
                dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "unpack directory does not exist"),
            ));
        }
        let target = self.unpack_path(dir);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| TreeError::io(parent, e))?;
        }
        fs::write(&target, content).map_err(|e| TreeError::io(&target, e))?;
        tracing::debug!(path = %target.display(), "unpacked embedded file");
        Ok(Some(target))
    }

    /// Path to read the file from: the unpacked copy when embedded, the
    /// stored path otherwise.
    pub fn file_path(&self, dir: &Path) -> Result<PathBuf, TreeError> {
        Ok(self.unpack(dir)?.unwrap_or_else(|| self.path.clone()))
    }
}
