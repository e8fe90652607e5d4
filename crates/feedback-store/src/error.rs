use feedback_types::ConfigError;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    MissingConfig(#[from] ConfigError),
    /// Store processed the request and refused it, message comes from the store
    #[error("{message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid table name: {0}")]
    InvalidTable(String),
    #[error("Invalid store URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
