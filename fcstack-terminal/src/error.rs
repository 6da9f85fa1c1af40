/// Error type for the terminal viewer.
use std::{io, path::PathBuf};

use fcstack_core::InvalidSpec;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read config {}: {source}", .path.display())]
    ReadConfig { path: PathBuf, source: io::Error },

    #[error("failed to parse config {}: {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Spec(#[from] InvalidSpec),
}
