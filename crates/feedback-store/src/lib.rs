use std::sync::Arc;

use feedback_types::{config::StoreCredentials, Submission};
use futures::future::BoxFuture;

pub mod error;
pub mod rest;

pub use error::{StoreError, StoreResult};
pub use rest::{RestConnector, RestStore};

const MAX_TABLE_NAME_LEN: usize = 63;

pub(crate) fn validate_table(table: &str) -> StoreResult<()> {
    let valid = !table.is_empty()
        && table.len() <= MAX_TABLE_NAME_LEN
        && !table.starts_with(|c: char| c.is_ascii_digit())
        && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTable(table.to_string()))
    }
}

/// Write access to the external feedback store.
pub trait Store: Send + Sync {
    /// Inserts all rows as one batch, the store applies it atomically.
    fn insert<'a>(
        &'a self,
        table: &'a str,
        rows: &'a [Submission],
    ) -> BoxFuture<'a, StoreResult<()>>;
}

/// Creates store clients from credentials.
pub trait Connector: Send + Sync {
    fn connect(&self, credentials: &StoreCredentials) -> StoreResult<Arc<dyn Store>>;
}
