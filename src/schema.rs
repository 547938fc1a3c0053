use serde::{ Deserialize, Serialize };

/// A single column (field) of an extracted table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColumnMetadata {
    /// The field name as declared in the index mapping.
    pub name: String,
    pub description: String,
    /// The declared field type (e.g. `keyword`, `long`), or empty when undeclared.
    pub col_type: String,
    pub sort_order: i32,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, col_type: impl Into<String>, sort_order: i32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            col_type: col_type.into(),
            sort_order,
        }
    }
}

/// Represents one table (an index, for search sources) as understood by the catalog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TableMetadata {
    /// Identifies the source type (e.g. `elasticsearch`).
    pub database: String,
    pub cluster: String,
    pub schema: String,
    /// The table name; for search sources this is the index name.
    pub name: String,
    pub description: String,
    /// Columns in the order the source reported them.
    pub columns: Vec<ColumnMetadata>,
    pub is_view: bool,
    pub tags: Option<Vec<String>>,
    pub description_source: Option<String>,
}

impl TableMetadata {
    /// Catalog key of the table: `database://cluster.schema/name`.
    pub fn key(&self) -> String {
        format!("{}://{}.{}/{}", self.database, self.cluster, self.schema, self.name)
    }

    pub fn column_key(&self, column: &ColumnMetadata) -> String {
        format!("{}/{}", self.key(), column.name)
    }
}
