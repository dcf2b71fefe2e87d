// src/store.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PatchError;

/// The catalog as an opaque UTF-8 text resource. The engine never sees the
/// filesystem; this is the only boundary that does.
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<String, PatchError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    /// Full replacement. Callers only get here after the engine succeeded,
    /// so a failed run never touches the file.
    pub fn write(&self, text: &str) -> Result<(), PatchError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}
