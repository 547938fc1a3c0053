pub mod es_index;

use async_trait::async_trait;
use std::sync::Arc;

use crate::client::IndexClient;
use crate::error::ExtractorError;

pub use es_index::ElasticsearchIndexExtractor;

/// Configuration key of the search client handle.
pub const CLIENT_CONFIG_KEY: &str = "client";
/// Configuration key of the cluster label.
pub const CLUSTER_CONFIG_KEY: &str = "cluster";
/// Configuration key of the schema label.
pub const SCHEMA_CONFIG_KEY: &str = "schema";

/// Everything an extractor is initialized with.
///
/// The client handle is shared with whoever built the config; the extractor
/// never tears it down.
#[derive(Clone)]
pub struct ExtractorConfig {
    pub client: Arc<dyn IndexClient>,
    pub cluster: String,
    pub schema: String,
}

impl ExtractorConfig {
    pub fn new(
        client: Arc<dyn IndexClient>,
        cluster: impl Into<String>,
        schema: impl Into<String>
    ) -> Self {
        Self {
            client,
            cluster: cluster.into(),
            schema: schema.into(),
        }
    }
}

impl std::fmt::Debug for ExtractorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorConfig")
            .field(CLIENT_CONFIG_KEY, &"<dyn IndexClient>")
            .field(CLUSTER_CONFIG_KEY, &self.cluster)
            .field(SCHEMA_CONFIG_KEY, &self.schema)
            .finish()
    }
}

/// Pull-based source of catalog records.
///
/// `init` binds configuration and prepares a fresh sequence; `extract` hands out
/// one record per call and `Ok(None)` once the sequence is exhausted.
#[async_trait]
pub trait Extractor: Send {
    type Record: Send;

    async fn init(&mut self, conf: ExtractorConfig) -> Result<(), ExtractorError>;

    fn extract(&mut self) -> Result<Option<Self::Record>, ExtractorError>;

    /// Label used by the pipeline to scope this extractor's settings and logs.
    fn get_scope(&self) -> &'static str;

    /// Drains the remaining records as an iterator.
    fn records(&mut self) -> Records<'_, Self> where Self: Sized {
        Records { extractor: self, done: false }
    }
}

/// Iterator over an extractor's remaining records. Stops after the first error.
pub struct Records<'a, E: Extractor> {
    extractor: &'a mut E,
    done: bool,
}

impl<'a, E: Extractor> Iterator for Records<'a, E> {
    type Item = Result<E::Record, ExtractorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.extractor.extract() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ create_index_client, ClientConfig };

    #[test]
    fn test_config_debug_lists_every_key() {
        let client = create_index_client(ClientConfig {
            host: "http://localhost:9200".to_string(),
            ..Default::default()
        }).unwrap();
        let conf = ExtractorConfig::new(client, "es-prod", "default");

        assert_eq!(
            format!("{:?}", conf),
            r#"ExtractorConfig { client: "<dyn IndexClient>", cluster: "es-prod", schema: "default" }"#
        );
    }
}
