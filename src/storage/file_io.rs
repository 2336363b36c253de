//! Typed JSON document files
//!
//! Each store owns one [`JsonFile`] naming its file and the shape stored in
//! it. Saves serialize fully before touching the disk, then replace the file
//! through a sibling temp file and a rename.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// A JSON file holding one `T`
#[derive(Debug, Clone)]
pub struct JsonFile<T> {
    path: PathBuf,
    shape: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            shape: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn error(&self, action: &str, cause: impl Display) -> LedgerError {
        LedgerError::Storage(format!(
            "Failed to {} {}: {}",
            action,
            self.path.display(),
            cause
        ))
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl<T: DeserializeOwned> JsonFile<T> {
    /// Parse the file; a missing file is an error
    pub fn load_existing(&self) -> LedgerResult<T> {
        let contents = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                LedgerError::Storage(format!("File not found: {}", self.path.display()))
            }
            _ => self.error("read", e),
        })?;
        serde_json::from_str(&contents).map_err(|e| self.error("parse", e))
    }
}

impl<T: DeserializeOwned + Default> JsonFile<T> {
    /// Parse the file, or the empty document if it was never written
    pub fn load(&self) -> LedgerResult<T> {
        if !self.exists() {
            return Ok(T::default());
        }
        self.load_existing()
    }
}

impl<T: Serialize> JsonFile<T> {
    /// Replace the file contents with `data`
    pub fn save(&self, data: &T) -> LedgerResult<()> {
        let bytes = serde_json::to_vec_pretty(data).map_err(|e| self.error("serialize", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.error("create directory for", e))?;
        }

        let temp_path = self.temp_path();
        let written = File::create(&temp_path).and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(self.error("write temp file for", e));
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.error("replace", e)
        })?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "saved document file");
        Ok(())
    }
}
