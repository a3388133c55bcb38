use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("postgres error: {0}")]
    Postgres(#[from] postgres::Error),
    #[error("invalid database name: {0}")]
    InvalidDatabaseName(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Postgres,
    InvalidDatabaseName,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Postgres(_) => StoreErrorKind::Postgres,
            StoreError::InvalidDatabaseName(_) => StoreErrorKind::InvalidDatabaseName,
        }
    }
}
