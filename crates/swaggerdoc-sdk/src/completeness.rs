//! Documentation completeness checking.
//!
//! Reports every field (and optionally every type) whose description is empty.
//! The check only borrows the records; nothing is annotated or rewritten, so
//! it can run before or after generation without changing the artifact.

use std::fmt;

use serde::Deserialize;

use crate::model::DocumentationRecord;

/// Patterns naming fields or types that may be left undocumented.
///
/// Accepted forms: `Type.field`, `Type.*`, `*.field`, and a bare `Type`
/// (which exempts the type-level description).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Exemptions(Vec<String>);

impl Exemptions {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(patterns.into_iter().map(Into::into).collect())
    }

    /// Whether the type-level description of `type_name` is exempt.
    pub fn covers_type(&self, type_name: &str) -> bool {
        self.0.iter().any(|p| p == type_name)
    }

    /// Whether `type_name.field` is exempt.
    pub fn covers_field(&self, type_name: &str, field: &str) -> bool {
        self.0.iter().any(|pattern| {
            let Some((ty, name)) = pattern.split_once('.') else {
                return false;
            };
            (ty == "*" || ty == type_name) && (name == "*" || name == field)
        })
    }
}

/// Knobs for the completeness check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletenessPolicy {
    /// Count an empty type-level description as missing.
    pub require_type_docs: bool,
    pub exemptions: Exemptions,
}

/// A single undocumented entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDoc {
    pub type_name: String,
    /// `None` when the type-level description is missing.
    pub field: Option<String>,
}

impl fmt::Display for MissingDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(
                f,
                "In struct: {}, field documentation is missing: {}",
                self.type_name, field
            ),
            None => write!(f, "Missing type documentation for struct: {}", self.type_name),
        }
    }
}

/// Result of [`check`]: undocumented entries in record order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletenessReport {
    pub missing: Vec<MissingDoc>,
}

impl CompletenessReport {
    pub fn count(&self) -> usize {
        self.missing.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Human-readable listing, one line per missing entry.
    pub fn listing(&self) -> String {
        self.missing
            .iter()
            .map(|m| format!("{m}\n"))
            .collect::<String>()
    }
}

/// Check `records` for empty descriptions under `policy`.
pub fn check(policy: &CompletenessPolicy, records: &[DocumentationRecord]) -> CompletenessReport {
    let mut missing = Vec::new();

    for record in records {
        if policy.require_type_docs
            && record.type_doc().trim().is_empty()
            && !policy.exemptions.covers_type(&record.type_name)
        {
            missing.push(MissingDoc {
                type_name: record.type_name.clone(),
                field: None,
            });
        }

        for field in &record.fields {
            if !field.doc.trim().is_empty() || field.exempt {
                continue;
            }
            if policy
                .exemptions
                .covers_field(&record.type_name, &field.name)
            {
                continue;
            }
            missing.push(MissingDoc {
                type_name: record.type_name.clone(),
                field: Some(field.name.clone()),
            });
        }
    }

    tracing::debug!(
        records = records.len(),
        missing = missing.len(),
        "Checked documentation completeness"
    );

    CompletenessReport { missing }
}
