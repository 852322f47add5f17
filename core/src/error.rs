use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid catalog data: {0}")]
    InvalidCatalog(String),
    #[error("Unknown sort mode {0:?}")]
    UnknownSortMode(String),
}

pub type CatalogResult<T> = core::result::Result<T, CatalogError>;
