//! Verification of a checked-in swagger docs file.
//!
//! Linear pipeline; each stage either proceeds or ends the run:
//!
//! 1. completeness check (fatal only when comments are enforced)
//! 2. read the baseline file
//! 3. regenerate the artifact
//! 4. byte-compare baseline and artifact
//!
//! Nothing is written. Repairing a stale file is the caller's job.

use std::path::Path;

use crate::completeness::{self, CompletenessPolicy};
use crate::error::{Result, SwaggerDocsError};
use crate::format::{CanonicalFormatter, SourceFormatter};
use crate::generate::Generator;
use crate::model::DocumentationRecord;
use crate::render::{DocRenderer, SwaggerDocRenderer};

/// Summary of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Undocumented entries that were tolerated (only nonzero when comments
    /// are not enforced).
    pub missing_docs: usize,
    /// Size of the verified file.
    pub bytes: usize,
}

/// Checks baseline files against freshly generated artifacts.
#[derive(Debug, Clone, Default)]
pub struct Verifier<R = SwaggerDocRenderer, F = CanonicalFormatter> {
    generator: Generator<R, F>,
    policy: CompletenessPolicy,
}

impl<R: DocRenderer, F: SourceFormatter> Verifier<R, F> {
    pub fn new(generator: Generator<R, F>, policy: CompletenessPolicy) -> Self {
        Self { generator, policy }
    }

    pub fn generator(&self) -> &Generator<R, F> {
        &self.generator
    }

    pub fn policy(&self) -> &CompletenessPolicy {
        &self.policy
    }

    /// Verify that `file_path` holds exactly what [`Generator::generate`]
    /// produces for `package_name` and `records`.
    pub fn verify(
        &self,
        package_name: &str,
        file_path: &Path,
        records: &[DocumentationRecord],
        enforce_comments: bool,
    ) -> Result<VerifyOutcome> {
        let report = completeness::check(&self.policy, records);
        if !report.is_complete() {
            if enforce_comments {
                return Err(SwaggerDocsError::MissingDocs {
                    count: report.count(),
                    listing: report.listing(),
                });
            }
            tracing::warn!(
                package = package_name,
                "Existing swagger docs are missing {} entries:\n{}",
                report.count(),
                report.listing()
            );
        }

        let existing = std::fs::read(file_path).map_err(|source| SwaggerDocsError::Read {
            path: file_path.to_path_buf(),
            source,
        })?;

        let generated = self.generator.generate(package_name, records)?;

        if existing != generated {
            let line = first_difference_line(&existing, &generated);
            tracing::debug!(path = %file_path.display(), line, "Swagger docs differ");
            return Err(SwaggerDocsError::Stale {
                path: file_path.to_path_buf(),
                line,
            });
        }

        tracing::debug!(path = %file_path.display(), "Swagger docs are up to date");
        Ok(VerifyOutcome {
            missing_docs: report.count(),
            bytes: existing.len(),
        })
    }
}

/// 1-based line of the first byte where `a` and `b` differ.
///
/// When one is a prefix of the other, the line just past the shorter one.
fn first_difference_line(a: &[u8], b: &[u8]) -> usize {
    let common = a
        .iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .count();
    a[..common].iter().filter(|&&byte| byte == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_difference_line() {
        assert_eq!(first_difference_line(b"a\nb\nc\n", b"a\nb\nx\n"), 3);
        assert_eq!(first_difference_line(b"abc", b"xbc"), 1);
        assert_eq!(first_difference_line(b"a\n", b"a\nb\n"), 2);
    }
}
