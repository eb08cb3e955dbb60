//! Per-record Go code rendering.
//!
//! Each documented type becomes a `map_<Type>` variable holding its field
//! descriptions and a `SwaggerDoc()` method returning that map. The type-level
//! description is keyed by `""`. Entries with empty descriptions are omitted,
//! and a record with nothing documented renders to the empty string.

use askama::Template;

use crate::golang;
use crate::model::DocumentationRecord;

/// Error rendering a single record.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("'{0}' is not a valid Go type name")]
    InvalidTypeName(String),
    #[error("template rendering failed: {0}")]
    Template(String),
}

/// Turns one documentation record into Go source text.
///
/// Implementations must be deterministic: the verifier compares their output
/// byte for byte against a previously generated file.
pub trait DocRenderer {
    fn render_record(&self, record: &DocumentationRecord) -> Result<String, RenderError>;
}

/// A quoted key/value pair ready for the template.
#[derive(Debug)]
struct DocEntry {
    key: String,
    value: String,
}

#[derive(Template, Debug)]
#[template(path = "swagger_doc_func.go.txt", escape = "none")]
struct SwaggerDocFuncTemplate<'a> {
    type_name: &'a str,
    entries: &'a [DocEntry],
}

/// Default renderer producing `SwaggerDoc()` methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaggerDocRenderer;

impl DocRenderer for SwaggerDocRenderer {
    fn render_record(&self, record: &DocumentationRecord) -> Result<String, RenderError> {
        if !golang::is_identifier(&record.type_name) {
            return Err(RenderError::InvalidTypeName(record.type_name.clone()));
        }

        let entries = documented_entries(record);
        if entries.is_empty() {
            tracing::debug!(type_name = %record.type_name, "Skipping type with no documentation");
            return Ok(String::new());
        }

        let template = SwaggerDocFuncTemplate {
            type_name: &record.type_name,
            entries: &entries,
        };
        template
            .render()
            .map_err(|e| RenderError::Template(e.to_string()))
    }
}

fn documented_entries(record: &DocumentationRecord) -> Vec<DocEntry> {
    let type_doc = std::iter::once(("", record.type_doc()));
    let fields = record
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.doc.as_str()));

    type_doc
        .chain(fields)
        .filter(|(_, doc)| !doc.trim().is_empty())
        .map(|(key, doc)| DocEntry {
            key: golang::quote(key),
            value: golang::quote(doc),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_map_and_method() {
        let record = DocumentationRecord::new("Pod")
            .with_description("Pod is a collection of containers.")
            .with_field("spec", "desired state");

        let output = SwaggerDocRenderer.render_record(&record).unwrap();

        assert!(output.starts_with("var map_Pod = map[string]string{\n"));
        assert!(output.contains("\t\"\": \"Pod is a collection of containers.\",\n"));
        assert!(output.contains("\t\"spec\": \"desired state\",\n"));
        assert!(output.contains("func (Pod) SwaggerDoc() map[string]string {"));
        assert!(output.contains("\treturn map_Pod\n"));
    }

    #[test]
    fn test_omits_empty_entries() {
        let record = DocumentationRecord::new("Pod")
            .with_field("spec", "desired state")
            .with_field("status", "");

        let output = SwaggerDocRenderer.render_record(&record).unwrap();

        assert!(!output.contains("\"\":"));
        assert!(!output.contains("\"status\""));
    }

    #[test]
    fn test_undocumented_type_renders_nothing() {
        let record = DocumentationRecord::new("Empty").with_field("a", "");
        assert_eq!(SwaggerDocRenderer.render_record(&record).unwrap(), "");
    }

    #[test]
    fn test_docs_are_quoted() {
        let record = DocumentationRecord::new("Pod").with_field("spec", "the \"spec\"\nsecond line");
        let output = SwaggerDocRenderer.render_record(&record).unwrap();
        assert!(output.contains(r#""the \"spec\"\nsecond line""#));
    }

    #[test]
    fn test_rejects_invalid_type_name() {
        let record = DocumentationRecord::new("pod-spec").with_field("a", "b");
        let err = SwaggerDocRenderer.render_record(&record).unwrap_err();
        assert!(matches!(err, RenderError::InvalidTypeName(name) if name == "pod-spec"));
    }
}
