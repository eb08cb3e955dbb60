//! Errors surfaced by generation and verification.

use std::path::PathBuf;

use crate::format::FormatError;
use crate::render::RenderError;

/// Failure of a generate or verify run.
///
/// Verification reports the first failure in pipeline order: missing docs,
/// unreadable baseline, render/format failure, then staleness.
#[derive(Debug, thiserror::Error)]
pub enum SwaggerDocsError {
    #[error("missing swagger docs for the following {count} fields:\n{listing}")]
    MissingDocs { count: usize, listing: String },

    #[error("error reading existing swagger docs file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error generating swagger docs for type '{type_name}': {source}")]
    Render {
        type_name: String,
        source: RenderError,
    },

    #[error("could not format output data: {0}")]
    Format(#[from] FormatError),

    #[error(
        "swagger docs in '{}' are out of date (first difference on line {line}), please regenerate the swagger docs",
        path.display()
    )]
    Stale { path: PathBuf, line: usize },
}

pub type Result<T> = std::result::Result<T, SwaggerDocsError>;
