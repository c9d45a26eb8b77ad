// ⚙️ Configuration - where the store lives and where reports go
//
// Resolution order for each path: CLI flag, environment variable, default.

use std::env;
use std::path::PathBuf;

pub const STORE_ENV: &str = "MOVIE_LOG_STORE";
pub const REPORT_DIR_ENV: &str = "MOVIE_LOG_DIR";

pub const DEFAULT_STORE: &str = "movies.csv";
pub const DEFAULT_REPORT_DIR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Append-only CSV store
    pub store_path: PathBuf,
    /// Directory receiving movies_<year>.md and overview.md
    pub report_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_path: PathBuf::from(DEFAULT_STORE),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
        }
    }
}

impl Config {
    pub fn resolve(store_flag: Option<PathBuf>, dir_flag: Option<PathBuf>) -> Self {
        Self::resolve_with(store_flag, dir_flag, |key| env::var(key).ok())
    }

    pub fn resolve_with<F>(store_flag: Option<PathBuf>, dir_flag: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        let defaults = Config::default();
        Config {
            store_path: store_flag
                .or_else(|| from_env(STORE_ENV))
                .unwrap_or(defaults.store_path),
            report_dir: dir_flag
                .or_else(|| from_env(REPORT_DIR_ENV))
                .unwrap_or(defaults.report_dir),
        }
    }
}

/// Load `.env` from the working directory if there is one
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => log::warn!("ignoring unreadable .env: {}", err),
    }
}
