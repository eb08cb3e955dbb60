//! Artifact assembly.
//!
//! ```text
//! package <name>          ┐
//! <header block>          │ Boilerplate
//! <start marker>          ┘
//! <rendered record>...      DocRenderer, one per record
//! <end marker>              Boilerplate
//!          │
//!          └──► SourceFormatter ──► artifact bytes
//! ```

use crate::boilerplate::Boilerplate;
use crate::error::{Result, SwaggerDocsError};
use crate::format::{CanonicalFormatter, SourceFormatter};
use crate::model::DocumentationRecord;
use crate::render::{DocRenderer, SwaggerDocRenderer};

/// Produces formatted swagger doc artifacts from documentation records.
///
/// The renderer and formatter are injected so tests (and callers targeting a
/// real Go toolchain) can substitute their own.
#[derive(Debug, Clone, Default)]
pub struct Generator<R = SwaggerDocRenderer, F = CanonicalFormatter> {
    boilerplate: Boilerplate,
    renderer: R,
    formatter: F,
}

impl Generator {
    /// Generator with the built-in renderer and formatter.
    pub fn builtin(boilerplate: Boilerplate) -> Self {
        Self::new(boilerplate, SwaggerDocRenderer, CanonicalFormatter)
    }
}

impl<R: DocRenderer, F: SourceFormatter> Generator<R, F> {
    pub fn new(boilerplate: Boilerplate, renderer: R, formatter: F) -> Self {
        Self {
            boilerplate,
            renderer,
            formatter,
        }
    }

    pub fn boilerplate(&self) -> &Boilerplate {
        &self.boilerplate
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Generate the complete, formatted artifact for `package_name`.
    ///
    /// Records are rendered in the order given. The result depends only on
    /// the inputs, the boilerplate, and the (deterministic) renderer and
    /// formatter.
    pub fn generate(&self, package_name: &str, records: &[DocumentationRecord]) -> Result<Vec<u8>> {
        let mut buf = format!("package {package_name}\n");
        buf.push_str(&self.boilerplate.preamble());

        for record in records {
            let rendered =
                self.renderer
                    .render_record(record)
                    .map_err(|source| SwaggerDocsError::Render {
                        type_name: record.type_name.clone(),
                        source,
                    })?;
            if rendered.is_empty() {
                continue;
            }
            buf.push('\n');
            buf.push_str(&rendered);
            buf.push('\n');
        }

        buf.push('\n');
        buf.push_str(&self.boilerplate.postamble());

        let formatted = self.formatter.format(&buf)?;

        tracing::debug!(
            package = package_name,
            records = records.len(),
            bytes = formatted.len(),
            "Generated swagger docs"
        );

        Ok(formatted.into_bytes())
    }
}
