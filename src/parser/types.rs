//! Shared types for lineage parsing.
//!
//! This module defines the row record produced by the CSV loader and the
//! column mapping that tells the loader which headers carry the five
//! semantic fields of a lineage edge.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Names of the header columns that carry the semantic lineage fields.
///
/// Any row schema is valid as long as it contains these five columns;
/// every other column is preserved in [`LineageRow::extra`].
///
/// # Example
///
/// ```
/// use lineagescope::parser::ColumnMapping;
///
/// let mapping = ColumnMapping::default();
/// assert_eq!(mapping.child_name, "childTableName");
/// assert_eq!(mapping.required().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Column holding the child node id.
    pub child_name: String,

    /// Column holding the child node type.
    pub child_type: String,

    /// Column holding the relationship label.
    pub relationship: String,

    /// Column holding the parent node id.
    pub parent_name: String,

    /// Column holding the parent node type.
    pub parent_type: String,

    /// Field delimiter of the input file.
    pub delimiter: char,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            child_name: "childTableName".to_string(),
            child_type: "childTableType".to_string(),
            relationship: "relationship".to_string(),
            parent_name: "parentTableName".to_string(),
            parent_type: "parentTableType".to_string(),
            delimiter: ',',
        }
    }
}

impl ColumnMapping {
    /// Returns the five required column names in canonical order.
    pub fn required(&self) -> [&str; 5] {
        [
            &self.child_name,
            &self.child_type,
            &self.relationship,
            &self.parent_name,
            &self.parent_type,
        ]
    }

    /// Looks up the value a row carries for the named column.
    ///
    /// Required columns resolve to the typed fields, anything else is
    /// looked up in the row's extra columns.
    pub fn value<'r>(&self, row: &'r LineageRow, column: &str) -> Option<&'r str> {
        if column == self.child_name {
            Some(&row.child_name)
        } else if column == self.child_type {
            Some(&row.child_type)
        } else if column == self.relationship {
            Some(&row.relationship)
        } else if column == self.parent_name {
            Some(&row.parent_name)
        } else if column == self.parent_type {
            Some(&row.parent_type)
        } else {
            row.extra.get(column).map(String::as_str)
        }
    }
}

/// One admitted input row: a single directed `parent -> child` edge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineageRow {
    /// Child node id.
    pub child_name: String,

    /// Child node type (e.g. "Table", "View").
    pub child_type: String,

    /// Relationship label of the edge.
    pub relationship: String,

    /// Parent node id.
    pub parent_name: String,

    /// Parent node type.
    pub parent_type: String,

    /// Any columns beyond the five semantic ones, keyed by header name.
    pub extra: BTreeMap<String, String>,
}

impl LineageRow {
    /// Creates a row with no extra columns.
    pub fn new(
        child_name: impl Into<String>,
        child_type: impl Into<String>,
        relationship: impl Into<String>,
        parent_name: impl Into<String>,
        parent_type: impl Into<String>,
    ) -> Self {
        Self {
            child_name: child_name.into(),
            child_type: child_type.into(),
            relationship: relationship.into(),
            parent_name: parent_name.into(),
            parent_type: parent_type.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Shorthand used all over the tests: `parent -[relationship]-> child`
    /// with both endpoints of the same type.
    pub fn edge(
        parent: impl Into<String>,
        relationship: impl Into<String>,
        child: impl Into<String>,
        node_type: &str,
    ) -> Self {
        Self::new(child, node_type, relationship, parent, node_type)
    }

    /// Adds an extra column value.
    pub fn with_extra(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(column.into(), value.into());
        self
    }
}

impl fmt::Display for LineageRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) -[{}]-> {} ({})",
            self.parent_name, self.parent_type, self.relationship, self.child_name, self.child_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping_names() {
        let mapping = ColumnMapping::default();
        assert_eq!(
            mapping.required(),
            [
                "childTableName",
                "childTableType",
                "relationship",
                "parentTableName",
                "parentTableType"
            ]
        );
        assert_eq!(mapping.delimiter, ',');
    }

    #[test]
    fn test_mapping_value_lookup() {
        let mapping = ColumnMapping::default();
        let row = LineageRow::new("orders_v", "View", "reads", "orders", "Table")
            .with_extra("owner", "finance");

        assert_eq!(mapping.value(&row, "childTableName"), Some("orders_v"));
        assert_eq!(mapping.value(&row, "parentTableType"), Some("Table"));
        assert_eq!(mapping.value(&row, "relationship"), Some("reads"));
        assert_eq!(mapping.value(&row, "owner"), Some("finance"));
        assert_eq!(mapping.value(&row, "missing"), None);
    }

    #[test]
    fn test_mapping_deserialize_partial() {
        let mapping: ColumnMapping = toml::from_str(r#"child_name = "dst""#).unwrap();
        assert_eq!(mapping.child_name, "dst");
        assert_eq!(mapping.parent_name, "parentTableName");
    }

    #[test]
    fn test_edge_shorthand() {
        let row = LineageRow::edge("A", "owns", "B", "T");
        assert_eq!(row.parent_name, "A");
        assert_eq!(row.child_name, "B");
        assert_eq!(row.parent_type, "T");
        assert_eq!(row.child_type, "T");
    }

    #[test]
    fn test_row_display() {
        let row = LineageRow::new("b", "View", "reads", "a", "Table");
        assert_eq!(format!("{}", row), "a (Table) -[reads]-> b (View)");
    }
}
