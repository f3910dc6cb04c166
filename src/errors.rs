use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("cannot generate {length} characters: no character class is enabled")]
    EmptyAlphabet { length: usize },

    #[error("invalid password length {length}: must be between {min} and {max}")]
    InvalidLength { length: usize, min: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid length bounds in config: min {min} is greater than max {max}")]
    InvalidBounds { min: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("no clipboard provider available")]
    Unavailable,

    #[error("could not write to clipboard: {0}")]
    Write(String),
}
