//! Configuration loading and merging.
//!
//! Defaults, then an optional TOML file (explicit path or `<root>/config.toml`),
//! then `ROSTER_*` environment overrides. Later layers win.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Which persistence backend to operate against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Flat CSV file, one record per line.
    Text,
    /// Embedded SQLite database with ciphered grades.
    Sqlite,
}

impl Backend {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "csv" | "file" => Ok(Self::Text),
            "sqlite" | "db" => Ok(Self::Sqlite),
            other => Err(RosterError::Config(format!(
                "unknown backend {other:?} (expected \"text\" or \"sqlite\")"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cipher: CipherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend used when the CLI does not override it.
    pub backend: Backend,
    /// CSV file location; relative paths resolve under the roster root.
    pub csv_path: PathBuf,
    /// SQLite database location; relative paths resolve under the roster root.
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Text,
            csv_path: PathBuf::from("students.txt"),
            db_path: PathBuf::from("students.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherConfig {
    /// Key for the grade cipher. Fixed, in-memory, not a secret in any
    /// meaningful sense.
    pub key: String,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            key: "mySecretKey".to_string(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("ROSTER_CONFIG").ok().map(PathBuf::from));

        let path = explicit.unwrap_or_else(|| root.join("config.toml"));
        if let Some(patch) = Self::load_patch(&path)? {
            config.merge_patch(patch);
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| RosterError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| RosterError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(storage) = patch.storage {
            if let Some(backend) = storage.backend {
                self.storage.backend = backend;
            }
            if let Some(csv_path) = storage.csv_path {
                self.storage.csv_path = csv_path;
            }
            if let Some(db_path) = storage.db_path {
                self.storage.db_path = db_path;
            }
        }
        if let Some(cipher) = patch.cipher {
            if let Some(key) = cipher.key {
                self.cipher.key = key;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(backend) = std::env::var("ROSTER_BACKEND") {
            self.storage.backend = Backend::parse(&backend)?;
        }
        if let Ok(path) = std::env::var("ROSTER_CSV_PATH") {
            self.storage.csv_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("ROSTER_DB_PATH") {
            self.storage.db_path = PathBuf::from(path);
        }
        if let Ok(key) = std::env::var("ROSTER_CIPHER_KEY") {
            self.cipher.key = key;
        }
        Ok(())
    }
}

/// Partial config as parsed from a TOML file; every field optional so a
/// file only needs to mention what it changes.
#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    storage: Option<StoragePatch>,
    cipher: Option<CipherPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    backend: Option<Backend>,
    csv_path: Option<PathBuf>,
    db_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct CipherPatch {
    key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.backend, Backend::Text);
        assert_eq!(config.storage.csv_path, PathBuf::from("students.txt"));
        assert_eq!(config.cipher.key, "mySecretKey");
    }

    #[test]
    fn test_partial_file_patch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nbackend = \"sqlite\"\n").unwrap();

        let config = Config::load(Some(&path), dir.path()).unwrap();
        assert_eq!(config.storage.backend, Backend::Sqlite);
        // Untouched fields keep their defaults.
        assert_eq!(config.storage.db_path, PathBuf::from("students.db"));
        assert_eq!(config.cipher.key, "mySecretKey");
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml")), dir.path()).unwrap();
        assert_eq!(config.storage.backend, Backend::Text);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage = not toml").unwrap();
        assert!(matches!(
            Config::load(Some(&path), dir.path()),
            Err(RosterError::Config(_))
        ));
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!(Backend::parse("text").unwrap(), Backend::Text);
        assert_eq!(Backend::parse("SQLite").unwrap(), Backend::Sqlite);
        assert!(Backend::parse("postgres").is_err());
    }
}
