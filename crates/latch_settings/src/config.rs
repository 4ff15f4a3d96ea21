//! Store configuration

use std::ffi::OsString;
use std::path::PathBuf;

pub const SETTINGS_FILE_NAME: &str = "game_settings.cfg";

/// Overrides the settings file location when set.
pub const PATH_ENV_VAR: &str = "LATCH_SETTINGS_PATH";

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub path: PathBuf,
    /// Save after every individual setting change.
    pub auto_save: bool,
    /// `ready` loads the file instead of applying the configured values.
    pub load_on_ready: bool,
}

impl StoreConfig {
    /// `<config dir>/latch/game_settings.cfg`, or the working directory when
    /// the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("latch")
            .join(SETTINGS_FILE_NAME)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Default config, with the path taken from `LATCH_SETTINGS_PATH` when
    /// that is set and non-empty.
    pub fn from_env() -> Self {
        Self::with_path_override(std::env::var_os(PATH_ENV_VAR))
    }

    fn with_path_override(path: Option<OsString>) -> Self {
        match path {
            Some(path) if !path.is_empty() => Self::at(path),
            _ => Self::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            auto_save: true,
            load_on_ready: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_with_file_name() {
        let path = StoreConfig::default_path();
        assert!(path.ends_with("latch/game_settings.cfg"));
    }

    #[test]
    fn explicit_path_keeps_default_flags() {
        let config = StoreConfig::at("/tmp/settings.cfg");
        assert_eq!(config.path, PathBuf::from("/tmp/settings.cfg"));
        assert!(config.auto_save);
        assert!(config.load_on_ready);
    }

    #[test]
    fn path_override_replaces_default_path() {
        let config = StoreConfig::with_path_override(Some(OsString::from("/srv/game/custom.cfg")));
        assert_eq!(config.path, PathBuf::from("/srv/game/custom.cfg"));
        assert!(config.auto_save);
        assert!(config.load_on_ready);
    }

    #[test]
    fn empty_or_missing_override_uses_default_path() {
        let default = StoreConfig::default_path();
        assert_eq!(StoreConfig::with_path_override(None).path, default);
        assert_eq!(StoreConfig::with_path_override(Some(OsString::new())).path, default);
    }

    #[test]
    fn from_env_reads_override_variable() {
        std::env::set_var(PATH_ENV_VAR, "/srv/game/from_env.cfg");
        let config = StoreConfig::from_env();
        std::env::remove_var(PATH_ENV_VAR);

        assert_eq!(config.path, PathBuf::from("/srv/game/from_env.cfg"));
    }
}
