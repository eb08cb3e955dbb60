//! Documentation table loading.
//!
//! Tables are plain data files listing each type and its field descriptions.
//! The format is picked from the file extension.
//!
//! ```yaml
//! package: v1
//! types:
//!   - type: Pod
//!     description: Pod is a collection of containers.
//!     fields:
//!       - name: spec
//!         doc: Specification of the desired behavior of the pod.
//!       - name: status
//!         doc: ""
//!         exempt: true
//! ```

use std::path::Path;

use crate::model::DocTable;

/// On-disk table encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Yaml,
    Json,
    Toml,
}

impl TableFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(TableFormat::Yaml),
            "json" => Some(TableFormat::Json),
            "toml" => Some(TableFormat::Toml),
            _ => None,
        }
    }
}

/// Error loading a documentation table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read documentation table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML documentation table: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON documentation table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML documentation table: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported documentation table format: '{0}' (expected .yaml, .yml, .json or .toml)")]
    UnsupportedFormat(String),
}

/// Read and parse the table at `path`.
pub fn load_table(path: &Path) -> Result<DocTable, TableError> {
    let format = TableFormat::from_path(path)
        .ok_or_else(|| TableError::UnsupportedFormat(path.display().to_string()))?;
    let contents = std::fs::read_to_string(path)?;
    let table = parse_table(&contents, format)?;

    tracing::debug!(
        path = %path.display(),
        types = table.types.len(),
        "Loaded documentation table"
    );
    Ok(table)
}

/// Parse a table from a string in the given format.
pub fn parse_table(contents: &str, format: TableFormat) -> Result<DocTable, TableError> {
    let table = match format {
        TableFormat::Yaml => serde_yaml::from_str(contents)?,
        TableFormat::Json => serde_json::from_str(contents)?,
        TableFormat::Toml => toml::from_str(contents)?,
    };
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            TableFormat::from_path(&PathBuf::from("docs.yaml")),
            Some(TableFormat::Yaml)
        );
        assert_eq!(
            TableFormat::from_path(&PathBuf::from("a/b/docs.YML")),
            Some(TableFormat::Yaml)
        );
        assert_eq!(
            TableFormat::from_path(&PathBuf::from("docs.json")),
            Some(TableFormat::Json)
        );
        assert_eq!(
            TableFormat::from_path(&PathBuf::from("docs.toml")),
            Some(TableFormat::Toml)
        );
        assert_eq!(TableFormat::from_path(&PathBuf::from("docs.go")), None);
        assert_eq!(TableFormat::from_path(&PathBuf::from("docs")), None);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
package: v1
types:
  - type: Pod
    description: a pod
    fields:
      - name: spec
        doc: desired state
      - name: status
        exempt: true
"#;
        let table = parse_table(yaml, TableFormat::Yaml).unwrap();
        assert_eq!(table.package.as_deref(), Some("v1"));
        assert_eq!(table.types.len(), 1);
        assert_eq!(table.types[0].fields[1].doc, "");
        assert!(table.types[0].fields[1].exempt);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"types": [{"type": "Node", "fields": [{"name": "spec", "doc": "node spec"}]}]}"#;
        let table = parse_table(json, TableFormat::Json).unwrap();
        assert!(table.package.is_none());
        assert_eq!(table.types[0].type_name, "Node");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
package = "apps"

[[types]]
type = "Deployment"
description = "a deployment"

[[types.fields]]
name = "replicas"
doc = "number of desired pods"
"#;
        let table = parse_table(toml_str, TableFormat::Toml).unwrap();
        assert_eq!(table.package.as_deref(), Some("apps"));
        assert_eq!(table.types[0].fields[0].name, "replicas");
    }

    #[test]
    fn test_parse_error_is_typed() {
        let err = parse_table("types: [", TableFormat::Yaml).unwrap_err();
        assert!(matches!(err, TableError::Yaml(_)));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let err = load_table(&PathBuf::from("docs.txt")).unwrap_err();
        assert!(matches!(err, TableError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        std::fs::write(&path, r#"{"package": "v1", "types": []}"#).unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.package.as_deref(), Some("v1"));
        assert!(table.types.is_empty());
    }
}
