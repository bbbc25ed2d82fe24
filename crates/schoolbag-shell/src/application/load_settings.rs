//! Settings loading seam and failure taxonomy.
//!
//! The bootstrap never touches the file system directly. It asks a
//! [`SettingsSource`] for a [`SettingsModel`] and receives either the model or
//! a [`SettingsError`] that says exactly which step failed. Whether that
//! failure is fatal is decided by the bootstrap, not here.

use std::fmt;
use std::path::{Path, PathBuf};

use schoolbag_core::{FieldError, SettingsField, SettingsModel};
use thiserror::Error;

/// Classification of every startup failure, as reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The settings path argument was empty or did not name a regular file.
    InvalidArgument,
    FileNotFound,
    ReadError,
    MalformedConfig,
    MissingField,
    InvalidFieldValue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid argument",
            Self::FileNotFound => "file not found",
            Self::ReadError => "read error",
            Self::MalformedConfig => "malformed config",
            Self::MissingField => "missing field",
            Self::InvalidFieldValue => "invalid field value",
        };
        f.write_str(name)
    }
}

/// Error returned by [`SettingsSource::load`].
///
/// Every variant carries the path that was being loaded.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The path does not refer to an existing regular file.
    #[error("settings file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be opened or read.
    #[error("failed to read settings file {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not a well-formed UTF-8 JSON object.
    #[error("malformed settings file {}: {source}", .path.display())]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required field is absent.
    #[error("settings file {}: missing required field `{field}`", .path.display())]
    MissingField { path: PathBuf, field: SettingsField },

    /// A field is present but cannot be used.
    #[error("settings file {}: invalid value for field `{field}`: {reason}", .path.display())]
    InvalidFieldValue {
        path: PathBuf,
        field: SettingsField,
        reason: String,
    },
}

impl SettingsError {
    /// Attaches a path to a domain-level field error.
    pub fn from_field_error(path: PathBuf, err: FieldError) -> Self {
        match err {
            FieldError::Missing(field) => Self::MissingField { path, field },
            FieldError::Invalid { field, reason } => Self::InvalidFieldValue {
                path,
                field,
                reason,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::ReadError { .. } => ErrorKind::ReadError,
            Self::MalformedConfig { .. } => ErrorKind::MalformedConfig,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::InvalidFieldValue { .. } => ErrorKind::InvalidFieldValue,
        }
    }

    /// Returns the settings path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::FileNotFound { path }
            | Self::ReadError { path, .. }
            | Self::MalformedConfig { path, .. }
            | Self::MissingField { path, .. }
            | Self::InvalidFieldValue { path, .. } => path,
        }
    }

    /// Returns the offending field for field-level failures.
    pub fn field(&self) -> Option<SettingsField> {
        match self {
            Self::MissingField { field, .. } | Self::InvalidFieldValue { field, .. } => {
                Some(*field)
            }
            _ => None,
        }
    }
}

/// Trait abstracting where settings come from.
///
/// The production implementation reads a JSON file
/// (`infrastructure::storage::settings_file::SettingsFileLoader`); unit tests
/// use the generated `MockSettingsSource`.
///
/// Implementations must not keep state between calls: loading two different
/// paths in a row must behave as two independent loads.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsSource {
    /// Turns `path` into a validated model or a classified failure.
    fn load(&self, path: &Path) -> Result<SettingsModel, SettingsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_field_error_keeps_field_and_path() {
        // Arrange
        let path = PathBuf::from("/tmp/settings.json");

        // Act
        let err = SettingsError::from_field_error(
            path.clone(),
            FieldError::Missing(SettingsField::Height),
        );

        // Assert
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.field(), Some(SettingsField::Height));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_invalid_field_error_maps_to_invalid_field_value() {
        let err = SettingsError::from_field_error(
            PathBuf::from("s.json"),
            FieldError::Invalid {
                field: SettingsField::Weight,
                reason: "must not be negative, got -1".to_string(),
            },
        );

        assert_eq!(err.kind(), ErrorKind::InvalidFieldValue);
        assert!(err.to_string().contains("`weight`"));
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_file_not_found_message_names_path() {
        let err = SettingsError::FileNotFound {
            path: PathBuf::from("/missing/settings.json"),
        };

        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains("/missing/settings.json"));
    }

    #[test]
    fn test_error_kind_display_is_human_readable() {
        assert_eq!(ErrorKind::InvalidArgument.to_string(), "invalid argument");
        assert_eq!(ErrorKind::MalformedConfig.to_string(), "malformed config");
    }
}
