//! Column schema a dataset must satisfy at load time.

use serde::{Deserialize, Serialize};

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Parsed as `f64`. A cell that does not parse is a load error.
    Number,
    /// Kept as a text label.
    Category,
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: ColumnType,
}

/// The fixed set of columns a deployment expects.
///
/// Source files may carry extra columns; only the ones listed here are
/// loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric column.
    pub fn number(self, name: impl Into<String>) -> Self {
        self.with(name, ColumnType::Number)
    }

    /// Add a category column.
    pub fn category(self, name: impl Into<String>) -> Self {
        self.with(name, ColumnType::Category)
    }

    fn with(mut self, name: impl Into<String>, ty: ColumnType) -> Self {
        self.columns.push(ColumnSpec {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_declaration_order() {
        let schema = Schema::new().category("site").number("payload");
        let names: Vec<_> = schema.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["site", "payload"]);
        assert_eq!(schema.column("payload").map(|c| c.ty), Some(ColumnType::Number));
        assert!(schema.column("missing").is_none());
    }
}
