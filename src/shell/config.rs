// Runtime configuration read from the environment (`.env` is loaded first by the binary).
//
// BOOKMARKS_STORAGE   file | memory   (default file)
// BOOKMARKS_DATA_DIR  directory used by the file store (default ./data)
// BOOKMARKS_ADDR      socket address to listen on (default 0.0.0.0:8080)

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const STORAGE_VAR: &str = "BOOKMARKS_STORAGE";
pub const DATA_DIR_VAR: &str = "BOOKMARKS_DATA_DIR";
pub const ADDR_VAR: &str = "BOOKMARKS_ADDR";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage: StorageKind,
    pub data_dir: PathBuf,
    pub addr: SocketAddr,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be `file` or `memory`, got `{value}`")]
    InvalidStorage { var: &'static str, value: String },

    #[error("{var} is not a socket address: `{value}`")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same rules as `from_env`, over any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = match lookup(STORAGE_VAR).as_deref().map(str::trim) {
            None | Some("") => StorageKind::File,
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "file" => StorageKind::File,
                "memory" => StorageKind::Memory,
                _ => {
                    return Err(ConfigError::InvalidStorage {
                        var: STORAGE_VAR,
                        value: value.to_string(),
                    });
                }
            },
        };

        let data_dir = match lookup(DATA_DIR_VAR) {
            None => PathBuf::from(DEFAULT_DATA_DIR),
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::Empty { var: DATA_DIR_VAR });
            }
            Some(value) => PathBuf::from(value.trim()),
        };

        let raw_addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = raw_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value: raw_addr.clone(),
            })?;

        Ok(Self {
            storage,
            data_dir,
            addr,
        })
    }
}
