use async_trait::async_trait;
use serde_json::{ Map, Value };
use log::{ debug, info, warn };

use super::{ Extractor, ExtractorConfig };
use crate::client::IndexClient;
use crate::error::ExtractorError;
use crate::schema::{ ColumnMetadata, TableMetadata };

const SCOPE: &str = "extractor.es_indexes";
const DATABASE: &str = "elasticsearch";
const ALL_INDEXES: &str = "*";
const SYSTEM_INDEX_PREFIX: char = '.';
/// Doc type looked up when an index has no mappings; never present, so no columns.
const NO_DOC_TYPE: &str = "-1";

/// Extracts one [`TableMetadata`] per user index of an Elasticsearch cluster.
///
/// Discovery runs once per `init`; indexes are then translated one at a time as
/// `extract` is called. A failed discovery yields an empty sequence, while a
/// malformed index definition is returned as an error from `extract`.
///
/// The doc type of an index is the first key of its `mappings`, in the order
/// the cluster returned them. This is only well defined for indexes with a
/// single mapping type.
#[derive(Default)]
pub struct ElasticsearchIndexExtractor {
    state: Option<ReadyState>,
}

struct ReadyState {
    conf: ExtractorConfig,
    pending: std::vec::IntoIter<(String, Value)>,
}

impl ElasticsearchIndexExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database(&self) -> &'static str {
        DATABASE
    }

    pub fn cluster(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.conf.cluster.as_str())
    }

    pub fn schema(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.conf.schema.as_str())
    }

    async fn get_indexes(client: &dyn IndexClient) -> Vec<(String, Value)> {
        let indexes = match client.get_indices(ALL_INDEXES).await {
            Ok(indexes) => indexes,
            Err(e) => {
                warn!("Failed to list Elasticsearch indexes, extracting nothing: {}", e);
                return Vec::new();
            }
        };

        let total = indexes.len();
        let retained: Vec<(String, Value)> = indexes
            .into_iter()
            .filter(|(name, _)| {
                let system = name.starts_with(SYSTEM_INDEX_PREFIX);
                if system {
                    debug!("Skipping system index '{}'", name);
                }
                !system
            })
            .collect();

        info!(
            "Found {} Elasticsearch indexes, {} after filtering system indexes.",
            total,
            retained.len()
        );
        retained
    }
}

#[async_trait]
impl Extractor for ElasticsearchIndexExtractor {
    type Record = TableMetadata;

    async fn init(&mut self, conf: ExtractorConfig) -> Result<(), ExtractorError> {
        self.state = None;
        info!("Initializing Elasticsearch index extractor for {:?}", conf);
        let indexes = Self::get_indexes(conf.client.as_ref()).await;
        self.state = Some(ReadyState {
            conf,
            pending: indexes.into_iter(),
        });
        Ok(())
    }

    fn extract(&mut self) -> Result<Option<TableMetadata>, ExtractorError> {
        let state = self.state.as_mut().ok_or(ExtractorError::Uninitialized)?;
        let (name, definition) = match state.pending.next() {
            Some(next) => next,
            None => {
                return Ok(None);
            }
        };
        match to_table_metadata(&state.conf, name, &definition) {
            Ok(table) => Ok(Some(table)),
            Err(e) => {
                // A malformed index ends the pass.
                state.pending = Vec::new().into_iter();
                Err(e)
            }
        }
    }

    fn get_scope(&self) -> &'static str {
        SCOPE
    }
}

fn to_table_metadata(
    conf: &ExtractorConfig,
    index: String,
    definition: &Value
) -> Result<TableMetadata, ExtractorError> {
    let definition = definition
        .as_object()
        .ok_or_else(|| ExtractorError::malformed(&index, "index definition is not an object"))?;

    let mappings = match definition.get("mappings") {
        None => None,
        Some(Value::Object(mappings)) => Some(mappings),
        Some(_) => {
            return Err(ExtractorError::malformed(&index, "mappings is not an object"));
        }
    };

    let doc_type = mappings
        .and_then(|m| m.keys().next())
        .map(String::as_str)
        .unwrap_or(NO_DOC_TYPE);

    let doc_mapping = match mappings.and_then(|m| m.get(doc_type)) {
        None => None,
        Some(Value::Object(doc_mapping)) => Some(doc_mapping),
        Some(_) => {
            return Err(
                ExtractorError::malformed(&index, format!("mapping '{}' is not an object", doc_type))
            );
        }
    };

    let properties = properties_of(&index, doc_mapping)?;
    debug!(
        "Index '{}' uses doc type '{}' with {} fields",
        index,
        doc_type,
        properties.map_or(0, |p| p.len())
    );

    let columns = properties
        .into_iter()
        .flatten()
        .map(|(field, field_def)| to_column(&index, field, field_def))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TableMetadata {
        database: DATABASE.to_string(),
        cluster: conf.cluster.clone(),
        schema: conf.schema.clone(),
        name: index,
        description: String::new(),
        columns,
        is_view: false,
        tags: None,
        description_source: None,
    })
}

/// Absent and falsy `properties` both mean "no columns".
fn properties_of<'a>(
    index: &str,
    doc_mapping: Option<&'a Map<String, Value>>
) -> Result<Option<&'a Map<String, Value>>, ExtractorError> {
    match doc_mapping.and_then(|d| d.get("properties")) {
        None => Ok(None),
        Some(value) if is_falsy(value) => Ok(None),
        Some(Value::Object(properties)) => Ok(Some(properties)),
        Some(_) => Err(ExtractorError::malformed(index, "properties is not an object")),
    }
}

fn to_column(index: &str, field: &str, field_def: &Value) -> Result<ColumnMetadata, ExtractorError> {
    let field_def = field_def
        .as_object()
        .ok_or_else(|| {
            ExtractorError::malformed(index, format!("field '{}' definition is not an object", field))
        })?;

    let col_type = match field_def.get("type") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(col_type)) => col_type.clone(),
        Some(other) => other.to_string(),
    };

    // No ordering exists in mappings, every column shares sort order 0.
    Ok(ColumnMetadata::new(field, col_type, 0))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
