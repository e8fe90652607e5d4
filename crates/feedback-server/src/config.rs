use crate::error::Result;
pub use clap::Parser;
use feedback_types::config::StoreConfig;
use url::Url;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Feedback form endpoint server")]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "FEEDBACK_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "FEEDBACK_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "FEEDBACK_BASE_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the server, as visible to users"
    )]
    pub base_url: Url,

    #[arg(long, env = "FEEDBACK_CORS", help = "Enable permissive CORS")]
    pub cors: bool,

    #[command(flatten)]
    pub store: StoreConfig,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let config = ServerConfig::try_parse_from([
            "feedback-server",
            "--port",
            "3333",
            "--store-url",
            "https://abc.supabase.co",
            "--store-key",
            "anon-key",
        ])
        .unwrap();
        assert_eq!(config.port, 3333);
        assert_eq!(config.listen_address, "127.0.0.1");
        assert_eq!(config.store.store_table, "feedback");
        assert!(config.store.credentials().is_ok());
        assert!(!config.cors);
    }
}
