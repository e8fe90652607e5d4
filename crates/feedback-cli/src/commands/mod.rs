use clap::Args;
use feedback_form::{HttpTransport, Transport, TransportError};
use feedback_store::{RestStore, StoreError};
use feedback_types::{config::StoreConfig, Submission};
use tracing::debug;
use url::Url;

pub mod interactive;
pub mod submit;

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self) -> anyhow::Result<()>;
}

/// Where the feedback goes
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    #[arg(
        long,
        env = "FEEDBACK_SERVER_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the feedback server"
    )]
    pub server_url: Url,

    #[arg(
        long,
        help = "Insert directly into the store instead of posting to the server, requires store url and key"
    )]
    pub direct: bool,

    #[command(flatten)]
    pub store: StoreConfig,
}

impl TargetArgs {
    pub fn transport(&self) -> anyhow::Result<CliTransport> {
        if self.direct {
            let store = RestStore::connect(&self.store)?;
            debug!("Submitting directly to store");
            Ok(CliTransport::Store {
                store,
                table: self.store.store_table.clone(),
            })
        } else {
            let transport = HttpTransport::new(reqwest::Client::new(), &self.server_url)?;
            debug!("Submitting to {}", transport.endpoint());
            Ok(CliTransport::Http(transport))
        }
    }
}

pub enum CliTransport {
    Http(HttpTransport),
    Store { store: RestStore, table: String },
}

fn store_failure(e: StoreError) -> TransportError {
    match e {
        StoreError::Rejected {
            status, message, ..
        } => TransportError::Rejected {
            status,
            message: Some(message),
        },
        other => TransportError::Network(Box::new(other)),
    }
}

impl Transport for CliTransport {
    async fn send(&self, submission: &Submission) -> Result<(), TransportError> {
        match self {
            CliTransport::Http(http) => http.send(submission).await,
            CliTransport::Store { store, table } => store
                .insert_rows(table, std::slice::from_ref(submission))
                .await
                .map_err(store_failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use feedback_types::ConfigError;

    use super::*;

    fn target(direct: bool) -> TargetArgs {
        TargetArgs {
            server_url: Url::parse("http://localhost:3000").unwrap(),
            direct,
            store: StoreConfig::default(),
        }
    }

    #[test]
    fn test_direct_requires_store_config() {
        let err = target(true).transport().err().unwrap();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::MissingConfig(ConfigError::MissingStoreConfig(_)))
        ));
        assert!(matches!(
            target(false).transport(),
            Ok(CliTransport::Http(_))
        ));
    }

    #[test]
    fn test_store_failure_mapping() {
        let err = store_failure(StoreError::Rejected {
            status: 409,
            code: None,
            message: "duplicate key".into(),
        });
        assert!(matches!(
            err,
            TransportError::Rejected { status: 409, message: Some(ref m) } if m == "duplicate key"
        ));

        let err = store_failure(StoreError::InvalidTable("x y".into()));
        assert!(matches!(err, TransportError::Network(_)));
    }
}
