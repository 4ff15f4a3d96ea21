use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write settings file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("settings file {} is malformed: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

impl SettingsError {
    /// The file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SettingsError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }
}
