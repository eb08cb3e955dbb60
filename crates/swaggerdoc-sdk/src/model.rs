//! Documentation records consumed by the generator and verifier.

use serde::{Deserialize, Serialize};

/// One API type and the descriptions of its fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocumentationRecord {
    /// Go type name (e.g., `PodSpec`). Must be a valid Go identifier.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Type-level description, rendered under the `""` key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field descriptions keyed by the serialized (JSON) field name.
    #[serde(default)]
    pub fields: Vec<FieldDoc>,
}

/// A single field description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldDoc {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    /// Skip this field in the completeness check.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exempt: bool,
}

impl DocumentationRecord {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Builder-style type description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder-style field append.
    pub fn with_field(mut self, name: impl Into<String>, doc: impl Into<String>) -> Self {
        self.fields.push(FieldDoc::new(name, doc));
        self
    }

    /// The type description, treating an absent one as empty.
    pub fn type_doc(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

impl FieldDoc {
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
            exempt: false,
        }
    }

    /// Mark the field as exempt from the completeness check.
    pub fn exempt(mut self) -> Self {
        self.exempt = true;
        self
    }
}

/// A documentation table as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocTable {
    /// Go package name; the CLI flag takes precedence when both are given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default)]
    pub types: Vec<DocumentationRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_field_order() {
        let record = DocumentationRecord::new("Pod")
            .with_field("metadata", "standard object metadata")
            .with_field("spec", "desired state")
            .with_field("status", "");

        let names: Vec<&str> = record.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["metadata", "spec", "status"]);
        assert_eq!(record.type_doc(), "");
    }

    #[test]
    fn test_deserialize_uses_type_key() {
        let json = r#"{"type": "Pod", "description": "a pod", "fields": [{"name": "spec"}]}"#;
        let record: DocumentationRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.type_name, "Pod");
        assert_eq!(record.type_doc(), "a pod");
        assert_eq!(record.fields[0].doc, "");
        assert!(!record.fields[0].exempt);
    }
}
