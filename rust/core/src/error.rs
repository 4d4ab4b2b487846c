use thiserror::Error;

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur on the provider side of an import
#[derive(Error, Debug)]
pub enum Error {
    #[error("Provider initialization failed: {0}")]
    Init(String),
}
