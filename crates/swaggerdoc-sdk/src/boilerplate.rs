//! Fixed text surrounding the generated documentation maps.
//!
//! All values default to the named constants below and may be overridden from
//! the `[boilerplate]` table of `.swaggerdoc.toml`.

use serde::Deserialize;

/// Provenance comment block placed after the package clause.
pub const HEADER_CONTENT: &str = "\
// This file contains a collection of methods that can be used from go-restful to
// generate Swagger API documentation for its models. Please read this PR for more
// information on the implementation: https://github.com/emicklei/go-restful/pull/215
//
// Documentation is sourced from the package's swagger doc table.
// Regenerate this file with `swaggerdoc-ctl generate`; verify it with
// `swaggerdoc-ctl verify`. Do not edit by hand.
";

/// Marker opening the generated region.
pub const START_MARKER: &str = "// AUTO-GENERATED FUNCTIONS START HERE";

/// Marker closing the generated region.
pub const END_MARKER: &str = "// AUTO-GENERATED FUNCTIONS END HERE";

/// File name used when callers do not name the artifact explicitly.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "zz_generated.swagger_doc_generated.go";

fn default_header() -> String {
    HEADER_CONTENT.to_string()
}

fn default_start_marker() -> String {
    START_MARKER.to_string()
}

fn default_end_marker() -> String {
    END_MARKER.to_string()
}

fn default_output_file_name() -> String {
    DEFAULT_OUTPUT_FILE_NAME.to_string()
}

/// Header, markers, and output file name for generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Boilerplate {
    #[serde(default = "default_header")]
    pub header: String,
    #[serde(default = "default_start_marker")]
    pub start_marker: String,
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,
}

impl Default for Boilerplate {
    fn default() -> Self {
        Self {
            header: default_header(),
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
            output_file_name: default_output_file_name(),
        }
    }
}

impl Boilerplate {
    /// Text written between the package clause and the first rendered record.
    pub(crate) fn preamble(&self) -> String {
        let mut out = String::with_capacity(self.header.len() + self.start_marker.len() + 2);
        out.push_str(self.header.trim_end_matches('\n'));
        out.push_str("\n\n");
        out.push_str(&self.start_marker);
        out.push('\n');
        out
    }

    /// Text written after the last rendered record.
    pub(crate) fn postamble(&self) -> String {
        format!("{}\n", self.end_marker)
    }
}
