use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use dirs_next as dirs;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Every Annexfour API token starts with this literal.
pub const TOKEN_PREFIX: &str = "anx_";

/// Container-side environment variable naming the remote API.
pub const API_URL_ENV: &str = "ANNEXFOUR_API_URL";

const CONFIG_DIR_NAME: &str = "ai-act-check";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub token: String,
}

/// Check that a token carries the Annexfour prefix. The token is never altered.
pub fn validate_token(token: &str) -> Result<(), AppError> {
    if token.starts_with(TOKEN_PREFIX) { Ok(()) } else { Err(AppError::InvalidToken(TOKEN_PREFIX)) }
}

/// Location of the token file shared with the scanner container.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Resolve `<home>/.config/ai-act-check`.
    pub fn locate() -> Result<Self, AppError> {
        let home = dirs::home_dir().ok_or_else(|| {
            AppError::config("Unable to determine the home directory for this user")
        })?;
        let store = Self::at(home.join(".config").join(CONFIG_DIR_NAME));
        debug!("config file: {}", store.file_path().display());
        Ok(store)
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Whether a token file is present; its contents are not inspected.
    pub fn exists(&self) -> bool {
        self.file_path().exists()
    }

    pub fn load(&self) -> Result<Option<Config>, AppError> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(Some(config))
    }

    /// Persist `token`, replacing any previous file.
    pub fn save(&self, token: &str) -> Result<PathBuf, AppError> {
        validate_token(token)?;
        let config = Config { token: token.to_string() };
        let contents = serde_json::to_string_pretty(&config)?;

        let path = self.file_path();
        fs::create_dir_all(&self.dir).map_err(|err| AppError::save(err.to_string()))?;
        let mut file = fs::File::create(&path).map_err(|err| AppError::save(err.to_string()))?;
        file.write_all(contents.as_bytes()).map_err(|err| AppError::save(err.to_string()))?;
        debug!("wrote token to {}", path.display());
        Ok(path)
    }
}

/// Process-wide settings, gathered once at startup and handed to each command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store: ConfigStore,
    pub api_url: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        let api_url = std::env::var(API_URL_ENV).ok();
        if let Some(url) = &api_url {
            debug!("{API_URL_ENV}={url}");
        }
        Ok(Self { store: ConfigStore::locate()?, api_url })
    }
}
