#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Store credentials missing: {0}")]
    MissingStoreConfig(&'static str),
}
