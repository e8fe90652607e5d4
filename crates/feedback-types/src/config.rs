use std::fmt;

use clap::Args;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_TABLE: &str = "feedback";

/// Connection settings of the external feedback store.
///
/// Both url and key are optional on the command line, so that their absence
/// can be reported by the component which actually needs them.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    #[arg(
        long,
        env = "FEEDBACK_STORE_URL",
        help = "Base URL of the hosted store, e.g. https://project.supabase.co"
    )]
    pub store_url: Option<Url>,

    #[arg(
        long,
        env = "FEEDBACK_STORE_KEY",
        hide_env_values = true,
        help = "Access key of the hosted store"
    )]
    pub store_key: Option<String>,

    #[arg(
        long,
        env = "FEEDBACK_STORE_TABLE",
        default_value = DEFAULT_TABLE,
        help = "Table where feedback rows are inserted"
    )]
    pub store_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_url: None,
            store_key: None,
            store_table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new(url: Url, key: impl Into<String>) -> Self {
        StoreConfig {
            store_url: Some(url),
            store_key: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn credentials(&self) -> Result<StoreCredentials, ConfigError> {
        let key = self.store_key.as_deref().filter(|k| !k.is_empty());
        match (&self.store_url, key) {
            (Some(url), Some(key)) => Ok(StoreCredentials {
                url: url.clone(),
                key: key.to_string(),
            }),
            (None, Some(_)) => Err(ConfigError::MissingStoreConfig("store url")),
            (Some(_), None) => Err(ConfigError::MissingStoreConfig("store key")),
            (None, None) => Err(ConfigError::MissingStoreConfig("store url and key")),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct StoreCredentials {
    pub url: Url,
    pub key: String,
}

impl fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("url", &self.url.as_str())
            .field("key", &"***")
            .finish()
    }
}
