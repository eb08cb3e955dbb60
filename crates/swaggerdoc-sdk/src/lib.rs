//! Swagger documentation generation and verification for Go API packages.
//!
//! This crate turns documentation tables (one record per API type, ordered
//! field descriptions) into a formatted `zz_generated.swagger_doc_generated.go`
//! file, and verifies a checked-in copy of that file is up to date. It is
//! consumed by `swaggerdoc-ctl`, which owns all file writes.
//!
//! # Modules
//!
//! - [`model`]: Documentation records and the on-disk table shape
//! - [`table`]: YAML/JSON/TOML documentation table loading
//! - [`completeness`]: Missing-description detection with exemptions
//! - [`render`]: Askama-based per-record Go code rendering
//! - [`format`]: Canonical source formatting (built-in or `gofmt`)
//! - [`boilerplate`]: Header, markers, and default output file name
//! - [`generate`]: Artifact assembly
//! - [`verify`]: Completeness gate + regenerate + byte comparison
//! - [`golang`]: Go lexical helpers (string quoting, identifiers)

pub mod boilerplate;
pub mod completeness;
pub mod error;
pub mod format;
pub mod generate;
pub mod golang;
pub mod model;
pub mod render;
pub mod table;
pub mod verify;

pub use boilerplate::Boilerplate;
pub use completeness::{CompletenessPolicy, CompletenessReport, Exemptions, MissingDoc};
pub use error::SwaggerDocsError;
pub use format::{CanonicalFormatter, FormatError, GofmtFormatter, SourceFormatter};
pub use generate::Generator;
pub use model::{DocTable, DocumentationRecord, FieldDoc};
pub use render::{DocRenderer, RenderError, SwaggerDocRenderer};
pub use table::{load_table, parse_table, TableError, TableFormat};
pub use verify::{VerifyOutcome, Verifier};
