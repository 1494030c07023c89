//! Application context shared by all commands.

use std::path::{Path, PathBuf};

use crate::cipher::XorCipher;
use crate::config::{Backend, Config};
use crate::error::{Result, RosterError};
use crate::store::{Database, StudentStore, TextStore};

pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub backend: Backend,
    pub robot_mode: bool,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        std::fs::create_dir_all(&root)?;
        let config = Config::load(cli.config.as_deref(), &root)?;
        let backend = match &cli.backend {
            Some(raw) => Backend::parse(raw)?,
            None => config.storage.backend,
        };

        Ok(Self {
            root,
            config,
            backend,
            robot_mode: cli.robot,
            verbosity: cli.verbose,
        })
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("ROSTER_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| RosterError::Config("data directory not found".to_string()))?;
        Ok(data_dir.join("roster"))
    }

    /// Open the selected backend. Each call returns an independent store;
    /// the concurrent read demo relies on that.
    pub fn open_store(&self) -> Result<Box<dyn StudentStore>> {
        match self.backend {
            Backend::Text => Ok(Box::new(TextStore::open(self.csv_path())?)),
            Backend::Sqlite => {
                let cipher = XorCipher::new(self.config.cipher.key.as_str())?;
                Ok(Box::new(Database::open(self.db_path(), cipher)?))
            }
        }
    }

    pub fn csv_path(&self) -> PathBuf {
        resolve(&self.root, &self.config.storage.csv_path)
    }

    pub fn db_path(&self) -> PathBuf {
        resolve(&self.root, &self.config.storage.db_path)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_under_root() {
        let root = Path::new("/data/roster");
        assert_eq!(
            resolve(root, Path::new("students.txt")),
            PathBuf::from("/data/roster/students.txt")
        );
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        let root = Path::new("/data/roster");
        assert_eq!(
            resolve(root, Path::new("/tmp/s.db")),
            PathBuf::from("/tmp/s.db")
        );
    }
}
