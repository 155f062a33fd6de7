//! Error types for Tally
//!
//! The engine functions themselves never fail; these cover the edges that
//! touch the outside world (catalog files, rule files).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
