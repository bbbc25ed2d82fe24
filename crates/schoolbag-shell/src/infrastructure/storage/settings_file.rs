//! JSON settings file loader.
//!
//! Implements [`SettingsSource`] on top of the local file system. A load runs
//! four steps and stops at the first failure:
//!
//! 1. **exists**   – the path names an existing regular file, else `FileNotFound`.
//! 2. **read**     – the whole file is read into memory, else `ReadError`
//!    (or `FileNotFound` if the file vanished after step 1).
//! 3. **parse**    – the bytes are a UTF-8 JSON object, else `MalformedConfig`.
//! 4. **validate** – the object holds a valid height, weight and birthday,
//!    else `MissingField` / `InvalidFieldValue`.
//!
//! The loader keeps no state between calls.

use std::fs;
use std::io;
use std::path::Path;

use schoolbag_core::{SettingsDocument, SettingsModel};
use tracing::{debug, info};

use crate::application::load_settings::{SettingsError, SettingsSource};

/// Loads settings from a JSON file on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsFileLoader;

impl SettingsFileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl SettingsSource for SettingsFileLoader {
    fn load(&self, path: &Path) -> Result<SettingsModel, SettingsError> {
        // Step 1: existence check.
        if path.as_os_str().is_empty() {
            return Err(SettingsError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(SettingsError::FileNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(io_error(path, e)),
        }
        debug!(path = %path.display(), "settings file exists");

        // Step 2: read.
        let content = fs::read(path).map_err(|e| io_error(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "settings file read");

        // Step 3: parse. Invalid UTF-8 is a content problem, not an I/O one.
        let document = SettingsDocument::from_json_slice(&content).map_err(|source| {
            SettingsError::MalformedConfig {
                path: path.to_path_buf(),
                source,
            }
        })?;

        // Step 4: field validation.
        let model = SettingsModel::try_from(document)
            .map_err(|e| SettingsError::from_field_error(path.to_path_buf(), e))?;

        info!(
            height = model.height(),
            weight = model.weight(),
            birthday = %model.birthday(),
            "settings decoded from {}",
            path.display()
        );
        Ok(model)
    }
}

/// Maps an I/O failure to `FileNotFound` or `ReadError`.
fn io_error(path: &Path, e: io::Error) -> SettingsError {
    if e.kind() == io::ErrorKind::NotFound {
        SettingsError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        SettingsError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
