pub mod client;
pub mod error;
pub mod extractor;
pub mod schema;
pub use client::{ IndexClient, ClientConfig, create_index_client };
pub use error::{ ClientError, ExtractorError };
pub use extractor::{ Extractor, ExtractorConfig, ElasticsearchIndexExtractor };
pub use schema::{ TableMetadata, ColumnMetadata };
