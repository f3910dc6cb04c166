use std::fs;
use std::io::ErrorKind;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::password::PasswordRequest;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// When unset, the built-in default length clamped into the bounds.
    pub length: Option<usize>,
    pub lowercase: bool,
    pub uppercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub min_length: usize,
    pub max_length: usize,
    pub copy: bool,
}

impl Default for Config {
    fn default() -> Self {
        let request = PasswordRequest::default();

        Self {
            length: None,
            lowercase: request.lowercase,
            uppercase: request.uppercase,
            numbers: request.numbers,
            symbols: request.symbols,
            min_length: 4,
            max_length: 16,
            copy: false,
        }
    }
}

impl Config {
    const FILE_NAME: &str = "config.json";
    const APP_DIR: &str = "oktogen";

    /// Loads the config from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing file at the default location yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => {
                    log::debug!("no config directory on this platform, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        log::info!("loading config from {}", path.display());
        Self::parse(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
            other => other,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;

        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join(Self::FILE_NAME))
    }

    pub fn bounds(&self) -> RangeInclusive<usize> {
        self.min_length..=self.max_length
    }

    /// The length is not checked against the bounds; `Session` does that.
    pub fn request(&self) -> PasswordRequest {
        let length = self.length.unwrap_or_else(|| {
            PasswordRequest::default()
                .length
                .clamp(self.min_length, self.max_length)
        });

        PasswordRequest {
            length,
            lowercase: self.lowercase,
            uppercase: self.uppercase,
            numbers: self.numbers,
            symbols: self.symbols,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length > self.max_length {
            return Err(ConfigError::InvalidBounds {
                min: self.min_length,
                max: self.max_length,
            });
        }

        Ok(())
    }
}
