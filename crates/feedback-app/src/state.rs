use std::sync::Arc;

use feedback_store::Connector;
use feedback_types::config::StoreConfig;
use url::Url;

use crate::error::Result;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(app_config: AppConfig, connector: Arc<dyn Connector>) -> Self {
        AppState {
            state: Arc::new(AppStateInner {
                app_config,
                connector,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.app_config
    }

    pub fn connector(&self) -> &dyn Connector {
        self.state.connector.as_ref()
    }

    pub fn build_url(&self, relative_url: &str) -> Result<Url> {
        let url = self.config().base_url.join(relative_url)?;
        Ok(url)
    }
}

struct AppStateInner {
    app_config: AppConfig,
    connector: Arc<dyn Connector>,
}

pub struct AppConfig {
    pub base_url: Url,
    pub store: StoreConfig,
}
