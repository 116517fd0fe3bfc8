use thiserror::Error;

/// Errors raised at the configuration and CLI edges.
///
/// The checkout engine itself never fails: amounts and methods are coerced.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid merchant config: {0}")]
    InvalidConfig(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output error: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, Error>;
