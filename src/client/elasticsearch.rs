use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ ACCEPT, AUTHORIZATION };
use serde_json::{ Map, Value };
use log::{ debug, error, info, warn };
use base64::{ engine::general_purpose::STANDARD, Engine as _ };

use super::IndexClient;
use crate::error::ClientError;

pub struct ElasticsearchClient {
    client: Client,
    host: String,
    api_key: Option<String>,
    user: Option<String>,
    pass: Option<String>,
}

impl ElasticsearchClient {
    pub fn new(
        host: &str,
        api_key: Option<&str>,
        user: Option<&str>,
        pass: Option<&str>
    ) -> Self {
        info!("Initializing Elasticsearch client for host: {}", host);

        Self {
            client: Client::new(),
            host: host.trim_end_matches('/').to_string(),
            api_key: api_key.map(String::from),
            user: user.map(String::from),
            pass: pass.map(String::from),
        }
    }

    fn indices_url(&self, pattern: &str) -> String {
        format!("{}/{}", self.host, pattern)
    }

    fn auth_header(&self) -> Option<String> {
        if let (Some(user), Some(pass)) = (&self.user, &self.pass) {
            if !user.is_empty() && !pass.is_empty() {
                let encoded = STANDARD.encode(format!("{}:{}", user, pass));
                return Some(format!("Basic {}", encoded));
            }
            warn!("Elasticsearch Basic Auth user or pass provided but empty.");
        }
        match &self.api_key {
            Some(key) if !key.is_empty() => Some(format!("ApiKey {}", key)),
            Some(_) => {
                warn!("Elasticsearch API key provided but empty.");
                None
            }
            None => None,
        }
    }

    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(auth) = self.auth_header() {
            builder = builder.header(AUTHORIZATION, auth);
        }
        builder
    }
}

/// Parses a `GET /{pattern}` body, keeping the index order of the document.
pub(crate) fn parse_indices_response(text: &str) -> Result<Map<String, Value>, ClientError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ClientError::parse(format!("expected a JSON object, got: {}", other))),
        Err(e) => Err(ClientError::parse(format!("invalid JSON: {}", e))),
    }
}

#[async_trait]
impl IndexClient for ElasticsearchClient {
    async fn get_indices(&self, pattern: &str) -> Result<Map<String, Value>, ClientError> {
        let url = self.indices_url(pattern);
        debug!("Listing Elasticsearch indices via {}", url);

        let response = self.build_request(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("Failed to list Elasticsearch indices (Status: {}): {}", status, text);
            return Err(ClientError::Status { status: status.as_u16(), body: text });
        }

        let indices = parse_indices_response(&text).map_err(|e| {
            error!("Failed to parse Elasticsearch indices response: {}", e);
            e
        })?;
        debug!("Elasticsearch returned {} indices for pattern '{}'", indices.len(), pattern);
        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_trailing_slash_trimmed() {
        let client = ElasticsearchClient::new("http://localhost:9200/", None, None, None);
        assert_eq!(client.indices_url("*"), "http://localhost:9200/*");
    }

    #[test]
    fn test_basic_auth_preferred_over_api_key() {
        let client = ElasticsearchClient::new(
            "http://es:9200",
            Some("key"),
            Some("elastic"),
            Some("changeme")
        );
        assert_eq!(client.auth_header(), Some("Basic ZWxhc3RpYzpjaGFuZ2VtZQ==".to_string()));
    }

    #[test]
    fn test_api_key_auth() {
        let client = ElasticsearchClient::new("http://es:9200", Some("abc123"), None, None);
        assert_eq!(client.auth_header(), Some("ApiKey abc123".to_string()));
    }

    #[test]
    fn test_empty_credentials_ignored() {
        let client = ElasticsearchClient::new("http://es:9200", Some(""), Some(""), Some(""));
        assert_eq!(client.auth_header(), None);
    }

    #[test]
    fn test_parse_preserves_index_order() {
        let body = r#"{"zeta": {}, "alpha": {}, ".kibana": {}}"#;
        let map = parse_indices_response(body).unwrap();
        let names: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", ".kibana"]);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(parse_indices_response("[]"), Err(ClientError::Parse(_))));
        assert!(matches!(parse_indices_response("not json"), Err(ClientError::Parse(_))));
    }
}
