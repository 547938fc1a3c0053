pub mod elasticsearch;

use async_trait::async_trait;
use serde_json::{ Map, Value };
use std::sync::Arc;
use log::info;

use crate::error::ClientError;

/// Capability the extractor needs from a search cluster: list index definitions.
///
/// The returned map is keyed by index name and keeps the order the cluster sent,
/// each value being the raw index definition (`mappings`, `settings`, ...).
#[async_trait]
pub trait IndexClient: Send + Sync {
    async fn get_indices(&self, pattern: &str) -> Result<Map<String, Value>, ClientError>;
}

#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub host: String,
    pub api_key: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
}

pub fn create_index_client(config: ClientConfig) -> Result<Arc<dyn IndexClient>, ClientError> {
    if config.host.trim().is_empty() {
        return Err(ClientError::config("Elasticsearch client requires a host."));
    }
    info!("Creating Elasticsearch index client for host: {}", config.host);
    let client = elasticsearch::ElasticsearchClient::new(
        &config.host,
        config.api_key.as_deref(),
        config.user.as_deref(),
        config.pass.as_deref()
    );
    Ok(Arc::new(client))
}
