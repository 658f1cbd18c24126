use crate::calendar::WeekStart;
use crate::formats::DEFAULT_FORMAT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Name of the config file in the user's home directory
const CONFIG_FILE_NAME: &str = ".datepick";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub(crate) struct DisplayConfig {
    pub(crate) date_format: String,
    pub(crate) months_before: i64,
    pub(crate) months_after: i64,
    pub(crate) week_starts_monday: bool,
    pub(crate) highlight_weekends: bool,
    pub(crate) colors: ColorAssignments,
}

impl DisplayConfig {
    pub(crate) fn week_start(&self) -> WeekStart {
        WeekStart::from_monday_flag(self.week_starts_monday)
    }
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        DisplayConfig {
            date_format: String::from(DEFAULT_FORMAT),
            months_before: 1,
            months_after: 1,
            week_starts_monday: true,
            highlight_weekends: true,
            colors: ColorAssignments::default(),
        }
    }
}

/// 256-color palette indices for each screen role
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub(crate) struct ColorAssignments {
    pub(crate) year: u8,
    pub(crate) month: u8,
    pub(crate) day: u8,
    pub(crate) selected: u8,
    pub(crate) today: u8,
    pub(crate) weekend: u8,
}

impl Default for ColorAssignments {
    fn default() -> ColorAssignments {
        ColorAssignments {
            year: 14,
            month: 10,
            day: 15,
            selected: 11,
            today: 13,
            weekend: 9,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("cannot determine home directory")]
    NoHome,
    #[error("failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to serialize configuration")]
    Serialize(#[from] serde_json::Error),
}

/// Where the display configuration lives between runs
pub(crate) trait ConfigStore {
    /// Never fails: anything missing or unreadable yields the defaults.
    fn load(&self) -> DisplayConfig;

    fn save(&self, config: &DisplayConfig) -> Result<(), ConfigError>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) fn new(path: PathBuf) -> FileStore {
        FileStore { path }
    }

    pub(crate) fn in_home() -> Result<FileStore, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(FileStore::new(home.join(CONFIG_FILE_NAME)))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileStore {
    fn load(&self) -> DisplayConfig {
        let src = match fs::read_to_string(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no config file; using defaults");
                return DisplayConfig::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read config; using defaults");
                return DisplayConfig::default();
            }
        };
        match serde_json::from_str(&src) {
            Ok(config) => {
                tracing::debug!(path = %self.path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "malformed config; using defaults");
                DisplayConfig::default()
            }
        }
    }

    fn save(&self, config: &DisplayConfig) -> Result<(), ConfigError> {
        let write_err = |source: io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_err)?;
        let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
        serde_json::to_writer_pretty(&mut temp, config)?;
        temp.write_all(b"\n").map_err(write_err)?;
        temp.flush().map_err(write_err)?;
        temp.persist(&self.path).map_err(|e| write_err(e.error))?;
        tracing::info!(path = %self.path.display(), "saved config");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// In-memory store that records every save
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        pub(crate) saved: RefCell<Vec<DisplayConfig>>,
    }

    impl ConfigStore for MemoryStore {
        fn load(&self) -> DisplayConfig {
            self.saved.borrow().last().cloned().unwrap_or_default()
        }

        fn save(&self, config: &DisplayConfig) -> Result<(), ConfigError> {
            self.saved.borrow_mut().push(config.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nope"));
        assert_eq!(store.load(), DisplayConfig::default());
    }

    #[test]
    fn test_corrupt_file_is_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("datepick.json");
        fs::write(&path, "{\"date_format\": \"%d.%m.%Y\", \"months_before\": ").unwrap();
        assert_eq!(FileStore::new(path).load(), DisplayConfig::default());
    }

    #[test]
    fn test_wrong_types_are_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("datepick.json");
        fs::write(&path, r#"{"months_after": "three", "colors": {"day": 300}}"#).unwrap();
        assert_eq!(FileStore::new(path).load(), DisplayConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("datepick.json");
        fs::write(
            &path,
            r#"{"date_format": "%d.%m.%Y", "months_before": -2, "colors": {"today": 200}}"#,
        )
        .unwrap();
        let config = FileStore::new(path).load();
        assert_eq!(
            config,
            DisplayConfig {
                date_format: String::from("%d.%m.%Y"),
                months_before: -2,
                colors: ColorAssignments {
                    today: 200,
                    ..ColorAssignments::default()
                },
                ..DisplayConfig::default()
            }
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("sub").join("datepick.json"));
        let config = DisplayConfig {
            date_format: String::from("%A, %B %d, %Y"),
            months_before: 0,
            months_after: 5,
            week_starts_monday: false,
            ..DisplayConfig::default()
        };
        store.save(&config).unwrap();
        assert_eq!(store.load(), config);
        let entries = fs::read_dir(dir.path().join("sub")).unwrap().count();
        assert_eq!(entries, 1, "temporary file should have been renamed");
    }

    #[test]
    fn test_reads_legacy_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".datepick");
        fs::write(
            &path,
            r#"{
  "date_format": "%m/%d/%Y",
  "months_before": 1,
  "months_after": 2,
  "week_starts_monday": false,
  "highlight_weekends": true,
  "colors": {"year": 14, "month": 10, "day": 15, "selected": 11, "today": 13, "weekend": 9}
}"#,
        )
        .unwrap();
        let config = FileStore::new(path).load();
        assert_eq!(config.date_format, "%m/%d/%Y");
        assert_eq!(config.months_after, 2);
        assert_eq!(config.week_start(), WeekStart::Sunday);
        assert_eq!(config.colors, ColorAssignments::default());
    }
}
