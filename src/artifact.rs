//! JSON artifact loading and writing
//!
//! Loading is strict: a box description missing a field, or a field that is
//! not numeric, is a [`ParityError::MalformedInput`] rather than a silent zero.

use crate::document::CapturedDocument;
use crate::error::ParityError;
use crate::extractor::BoxDescription;
use crate::infra::{FileSystem, RealFileSystem};
use crate::snapshot::SnapshotRecord;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::Path;

/// Reads and writes artifacts through a [`FileSystem`]
#[derive(Debug, Clone, Copy)]
pub struct ArtifactStore<FS: FileSystem = RealFileSystem> {
    fs: FS,
}

impl Default for ArtifactStore<RealFileSystem> {
    fn default() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl ArtifactStore<RealFileSystem> {
    /// Store backed by the real filesystem
    pub fn new() -> Self {
        Self::default()
    }
}

impl<FS: FileSystem> ArtifactStore<FS> {
    /// Store backed by a custom filesystem
    pub fn with_fs(fs: FS) -> Self {
        Self { fs }
    }

    /// Read a text file
    pub fn read_text(&self, path: &Path) -> Result<String, ParityError> {
        self.fs
            .read_to_string(path)
            .map_err(|source| ParityError::Io {
                context: format!("reading {}", path.display()),
                source,
            })
    }

    fn load_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, ParityError> {
        let contents = self.read_text(path)?;
        serde_json::from_str(&contents).map_err(|source| ParityError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a persisted `*_box.json` description
    pub fn load_box(&self, path: &Path) -> Result<BoxDescription, ParityError> {
        debug!("loading box description from {}", path.display());
        self.load_json(path)
    }

    /// Load a snapshot array (`element-rects.json` or
    /// `computed-styles-structured.json`)
    pub fn load_snapshot(&self, path: &Path) -> Result<Vec<SnapshotRecord>, ParityError> {
        debug!("loading snapshot from {}", path.display());
        self.load_json(path)
    }

    /// Load a captured document
    pub fn load_document(&self, path: &Path) -> Result<CapturedDocument, ParityError> {
        debug!("loading captured document from {}", path.display());
        let contents = self.read_text(path)?;
        CapturedDocument::from_json(&contents).map_err(|source| ParityError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write `value` as pretty-printed JSON, creating parent directories
    pub fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), ParityError> {
        let io_error = |source: io::Error| ParityError::Io {
            context: format!("writing {}", path.display()),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.fs.exists(parent) {
                self.fs.create_dir_all(parent).map_err(io_error)?;
            }
        }

        let json = serde_json::to_string_pretty(value).map_err(|e| io_error(e.into()))?;
        self.fs.write(path, json).map_err(io_error)
    }
}
