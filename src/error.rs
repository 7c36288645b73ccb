//! Error taxonomy shared by list definitions, scanning and generation.

use std::io;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single resource list generation.
///
/// Every variant names the list it belongs to so that an orchestrator running several lists
/// can report each failure on its own without aborting the others.
#[derive(Debug, Error)]
pub enum Error {
  /// A required setting is missing, blank or cannot be resolved.
  #[error("resource list '{name}' is misconfigured: {message}")]
  Configuration {
    /// Name of the affected list definition.
    name: String,
    /// Human readable description of the problem.
    message: String,
  },
  /// Deleting, creating or writing the artifact failed.
  #[error("file operation for {name} failed ({source})")]
  FileOperation {
    /// Name of the affected list definition.
    name: String,
    /// Underlying I/O failure.
    #[source]
    source: io::Error,
  },
  /// An include or exclude pattern is not a valid glob.
  #[error("resource list '{name}' has an invalid pattern '{pattern}': {source}")]
  InvalidPattern {
    /// Name of the affected list definition.
    name: String,
    /// The offending pattern as configured.
    pattern: String,
    /// Parser error reported by the glob engine.
    #[source]
    source: globset::Error,
  },
}

impl Error {
  pub(crate) fn configuration(name: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Configuration {
      name: name.into(),
      message: message.into(),
    }
  }

  pub(crate) fn file_operation(name: impl Into<String>, source: io::Error) -> Self {
    Self::FileOperation {
      name: name.into(),
      source,
    }
  }

  /// Name of the list definition the error belongs to.
  pub fn list_name(&self) -> &str {
    match self {
      Self::Configuration { name, .. }
      | Self::FileOperation { name, .. }
      | Self::InvalidPattern { name, .. } => name,
    }
  }

  /// Returns `true` for errors detected before any file was touched.
  pub fn is_configuration(&self) -> bool {
    matches!(self, Self::Configuration { .. } | Self::InvalidPattern { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_operation_keeps_cause_message() {
    let err = Error::file_operation("orm", io::Error::other("disk full"));
    assert_eq!(err.to_string(), "file operation for orm failed (disk full)");
    assert_eq!(err.list_name(), "orm");
    assert!(!err.is_configuration());
  }

  #[test]
  fn configuration_names_the_list() {
    let err = Error::configuration("pipelets", "file extension is not set");
    assert!(err.to_string().contains("'pipelets'"));
    assert!(err.to_string().ends_with("file extension is not set"));
    assert!(err.is_configuration());
  }
}
