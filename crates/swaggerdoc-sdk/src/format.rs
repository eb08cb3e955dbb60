//! Canonical source formatting.
//!
//! The generator assembles text from several pieces and then hands it to a
//! [`SourceFormatter`], which is the only place whitespace is normalized. Two
//! implementations are provided:
//!
//! - [`CanonicalFormatter`]: built in; lexes the Go subset the generator
//!   emits, rejects malformed text, and normalizes layout.
//! - [`GofmtFormatter`]: pipes the text through an external `gofmt`.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::golang;

/// Literal or comment kinds that can be left unterminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    RawString,
    Rune,
    BlockComment,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::String => write!(f, "string literal"),
            LiteralKind::RawString => write!(f, "raw string literal"),
            LiteralKind::Rune => write!(f, "rune literal"),
            LiteralKind::BlockComment => write!(f, "block comment"),
        }
    }
}

/// Error formatting source text.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("source does not begin with a package clause")]
    MissingPackageClause,
    #[error("'{0}' is not a valid package name")]
    InvalidPackageName(String),
    #[error("unterminated {kind} starting on line {line}")]
    UnterminatedLiteral { kind: LiteralKind, line: usize },
    #[error("line {line}: expected '{expected}' but found '{found}'")]
    MismatchedDelimiter {
        line: usize,
        expected: char,
        found: char,
    },
    #[error("line {line}: unexpected '{found}'")]
    UnexpectedCloser { line: usize, found: char },
    #[error("'{open}' opened on line {line} is never closed")]
    UnclosedDelimiter { line: usize, open: char },
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("'{program}' rejected the source: {stderr}")]
    External { program: String, stderr: String },
}

/// Normalizes assembled source text into its canonical form.
///
/// Implementations must be deterministic and must reject text that is not
/// syntactically valid source.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

impl<T: SourceFormatter + ?Sized> SourceFormatter for Box<T> {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        (**self).format(source)
    }
}

// =========================================================================
// Built-in formatter
// =========================================================================

/// Built-in formatter for generated documentation files.
///
/// Layout rules:
/// - one tab of indentation per open `{`, `(` or `[`
/// - trailing whitespace removed, runs of blank lines collapsed to one
/// - no blank lines at the start of the file, after an opening line, or
///   before a closing line
/// - consecutive `"key": value` lines at the same depth have their values
///   aligned into one column
/// - exactly one trailing newline
///
/// Lines inside a multi-line raw string or block comment are kept verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalFormatter;

impl SourceFormatter for CanonicalFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let lines = scan(source)?;
        check_package_clause(&lines)?;
        Ok(emit(&lines))
    }
}

#[derive(Debug, Clone, Copy)]
enum Carry {
    RawString(usize),
    BlockComment(usize),
}

#[derive(Debug)]
enum Line<'a> {
    Blank,
    Verbatim(&'a str),
    Code(CodeLine<'a>),
}

#[derive(Debug)]
struct CodeLine<'a> {
    indent: usize,
    text: &'a str,
    /// Byte offset just past the `:` of a leading `"key":`.
    key_end: Option<usize>,
    closes_first: bool,
    opens_last: bool,
}

impl CodeLine<'_> {
    fn key_value(&self) -> Option<(&str, &str)> {
        let end = self.key_end?;
        let value = self.text[end..].trim_start();
        if value.is_empty() {
            return None;
        }
        Some((&self.text[..end], value))
    }

    fn is_comment(&self) -> bool {
        self.text.starts_with("//") || self.text.starts_with("/*")
    }
}

#[derive(Debug, Default)]
struct Scanner {
    stack: Vec<(u8, usize)>,
    carry: Option<Carry>,
}

#[derive(Debug, Default)]
struct LineFacts {
    leading_closers: usize,
    key_end: Option<usize>,
    last: Option<u8>,
}

fn scan(source: &str) -> Result<Vec<Line<'_>>, FormatError> {
    let mut scanner = Scanner::default();
    let mut lines = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;

        if scanner.carry.is_some() {
            scanner.scan_line(raw.as_bytes(), line_no)?;
            lines.push(Line::Verbatim(raw));
            continue;
        }

        let text = raw.trim_start();
        if text.trim_end().is_empty() {
            lines.push(Line::Blank);
            continue;
        }

        let depth = scanner.stack.len();
        let facts = scanner.scan_line(text.as_bytes(), line_no)?;

        // Trailing whitespace belongs to the literal when a raw string stays open.
        let text = match scanner.carry {
            Some(Carry::RawString(_)) => text,
            _ => text.trim_end(),
        };

        lines.push(Line::Code(CodeLine {
            indent: depth - facts.leading_closers,
            text,
            key_end: facts.key_end,
            closes_first: facts.leading_closers > 0,
            opens_last: matches!(facts.last, Some(b'{' | b'(' | b'[')),
        }));
    }

    if let Some(carry) = scanner.carry {
        let (kind, line) = match carry {
            Carry::RawString(line) => (LiteralKind::RawString, line),
            Carry::BlockComment(line) => (LiteralKind::BlockComment, line),
        };
        return Err(FormatError::UnterminatedLiteral { kind, line });
    }
    if let Some(&(open, line)) = scanner.stack.last() {
        return Err(FormatError::UnclosedDelimiter {
            line,
            open: open as char,
        });
    }

    Ok(lines)
}

impl Scanner {
    /// Scan one line, updating the delimiter stack and multi-line state.
    ///
    /// Byte-wise scanning is safe because every delimiter is ASCII and UTF-8
    /// continuation bytes never collide with ASCII.
    fn scan_line(&mut self, bytes: &[u8], line: usize) -> Result<LineFacts, FormatError> {
        let mut facts = LineFacts::default();
        let mut i = 0;
        let mut seen_token = false;

        match self.carry {
            Some(Carry::RawString(_)) => match find(bytes, 0, b"`") {
                Some(j) => {
                    i = j + 1;
                    self.carry = None;
                    seen_token = true;
                }
                None => return Ok(facts),
            },
            Some(Carry::BlockComment(_)) => match find(bytes, 0, b"*/") {
                Some(j) => {
                    i = j + 2;
                    self.carry = None;
                }
                None => return Ok(facts),
            },
            None => {}
        }

        while i < bytes.len() {
            let b = bytes[i];
            match b {
                b' ' | b'\t' | b'\r' => i += 1,
                b'/' if bytes.get(i + 1) == Some(&b'/') => break,
                b'/' if bytes.get(i + 1) == Some(&b'*') => match find(bytes, i + 2, b"*/") {
                    Some(j) => i = j + 2,
                    None => {
                        self.carry = Some(Carry::BlockComment(line));
                        break;
                    }
                },
                b'"' | b'\'' => {
                    let kind = if b == b'"' {
                        LiteralKind::String
                    } else {
                        LiteralKind::Rune
                    };
                    let end = scan_quoted(bytes, i, b)
                        .ok_or(FormatError::UnterminatedLiteral { kind, line })?;
                    if !seen_token
                        && facts.leading_closers == 0
                        && b == b'"'
                        && bytes.get(end) == Some(&b':')
                    {
                        facts.key_end = Some(end + 1);
                    }
                    seen_token = true;
                    facts.last = Some(b);
                    i = end;
                }
                b'`' => {
                    seen_token = true;
                    facts.last = Some(b);
                    match find(bytes, i + 1, b"`") {
                        Some(j) => i = j + 1,
                        None => {
                            self.carry = Some(Carry::RawString(line));
                            break;
                        }
                    }
                }
                b'{' | b'(' | b'[' => {
                    self.stack.push((b, line));
                    seen_token = true;
                    facts.last = Some(b);
                    i += 1;
                }
                b'}' | b')' | b']' => {
                    let expected = opener_for(b);
                    match self.stack.pop() {
                        Some((open, _)) if open == expected => {}
                        Some((open, _)) => {
                            return Err(FormatError::MismatchedDelimiter {
                                line,
                                expected: closer_for(open) as char,
                                found: b as char,
                            });
                        }
                        None => {
                            return Err(FormatError::UnexpectedCloser {
                                line,
                                found: b as char,
                            });
                        }
                    }
                    if !seen_token {
                        facts.leading_closers += 1;
                    }
                    facts.last = Some(b);
                    i += 1;
                }
                _ => {
                    seen_token = true;
                    facts.last = Some(b);
                    i += 1;
                }
            }
        }

        Ok(facts)
    }
}

/// Index just past the closing quote, or `None` if the line ends first.
fn scan_quoted(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from > bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

fn opener_for(closer: u8) -> u8 {
    match closer {
        b'}' => b'{',
        b')' => b'(',
        _ => b'[',
    }
}

fn closer_for(opener: u8) -> u8 {
    match opener {
        b'{' => b'}',
        b'(' => b')',
        _ => b']',
    }
}

fn check_package_clause(lines: &[Line<'_>]) -> Result<(), FormatError> {
    let first = lines
        .iter()
        .find_map(|line| match line {
            Line::Code(code) if !code.is_comment() => Some(code.text),
            _ => None,
        })
        .ok_or(FormatError::MissingPackageClause)?;

    let rest = first
        .strip_prefix("package")
        .filter(|rest| rest.starts_with([' ', '\t']))
        .ok_or(FormatError::MissingPackageClause)?;

    let name = rest.split("//").next().unwrap_or_default().trim();
    if name == "_" || !golang::is_identifier(name) {
        return Err(FormatError::InvalidPackageName(name.to_string()));
    }
    Ok(())
}

fn emit(lines: &[Line<'_>]) -> String {
    let widths = key_widths(lines);
    let mut out = String::new();
    let mut pending_blank = false;
    let mut after_opener = true;

    for (idx, line) in lines.iter().enumerate() {
        match line {
            Line::Blank => {
                if !after_opener {
                    pending_blank = true;
                }
            }
            Line::Verbatim(text) => {
                out.push_str(text);
                out.push('\n');
                after_opener = false;
            }
            Line::Code(code) => {
                if pending_blank && !code.closes_first {
                    out.push('\n');
                }
                pending_blank = false;

                for _ in 0..code.indent {
                    out.push('\t');
                }
                match (code.key_value(), widths[idx]) {
                    (Some((key, value)), Some(width)) => {
                        out.push_str(key);
                        let pad = width - key.chars().count() + 1;
                        out.extend(std::iter::repeat(' ').take(pad));
                        out.push_str(value);
                    }
                    _ => out.push_str(code.text),
                }
                out.push('\n');
                after_opener = code.opens_last;
            }
        }
    }

    out
}

/// Alignment width for each `"key": value` line, shared across its section.
///
/// A section is a run of key/value lines at one depth, further split where
/// gofmt would start a new one (see [`KeySizes`]).
fn key_widths(lines: &[Line<'_>]) -> Vec<Option<usize>> {
    let mut widths = vec![None; lines.len()];
    let mut idx = 0;

    while idx < lines.len() {
        let Some(indent) = kv_indent(&lines[idx]) else {
            idx += 1;
            continue;
        };

        let mut sizes = KeySizes::default();
        let mut start = idx;
        let mut width = 0;
        while idx < lines.len() && kv_indent(&lines[idx]) == Some(indent) {
            if let Line::Code(code) = &lines[idx] {
                if let Some((key, _)) = code.key_value() {
                    // The key slice ends with its ':'.
                    if sizes.starts_section(key.len() - 1) {
                        widths[start..idx].fill(Some(width));
                        start = idx;
                        width = 0;
                    }
                    width = width.max(key.chars().count());
                }
            }
            idx += 1;
        }
        widths[start..idx].fill(Some(width));
    }

    widths
}

/// Key sizes below this never break alignment.
const SMALL_KEY_SIZE: usize = 40;
/// Ratio to the running geometric mean beyond which a key breaks alignment.
const KEY_SIZE_RATIO: f64 = 2.5;

/// Running key-size statistics for one block of key/value lines.
///
/// Mirrors go/printer: when the previous or the current key is larger than
/// [`SMALL_KEY_SIZE`] bytes and the current key differs from the geometric
/// mean of all earlier keys in the block by a factor of [`KEY_SIZE_RATIO`]
/// or more, the current line starts a new alignment section. The statistics
/// carry across such breaks and reset only at blank lines.
#[derive(Debug, Default)]
struct KeySizes {
    prev: usize,
    ln_sum: f64,
    count: usize,
}

impl KeySizes {
    /// Record the next key's byte size and report whether it starts a new
    /// alignment section.
    fn starts_section(&mut self, size: usize) -> bool {
        let breaks = if self.count == 0 || (self.prev <= SMALL_KEY_SIZE && size <= SMALL_KEY_SIZE)
        {
            false
        } else {
            let geomean = (self.ln_sum / self.count as f64).exp();
            let ratio = size as f64 / geomean;
            KEY_SIZE_RATIO * ratio <= 1.0 || KEY_SIZE_RATIO <= ratio
        };

        self.ln_sum += (size as f64).ln();
        self.count += 1;
        self.prev = size;
        breaks
    }
}

fn kv_indent(line: &Line<'_>) -> Option<usize> {
    match line {
        Line::Code(code) if code.key_value().is_some() => Some(code.indent),
        _ => None,
    }
}

// =========================================================================
// External gofmt
// =========================================================================

/// Formats source by piping it through an external `gofmt` binary.
#[derive(Debug, Clone)]
pub struct GofmtFormatter {
    program: PathBuf,
}

impl Default for GofmtFormatter {
    fn default() -> Self {
        Self::new("gofmt")
    }
}

impl GofmtFormatter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl SourceFormatter for GofmtFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let spawn_error = |source| FormatError::Spawn {
            program: self.program_name(),
            source,
        };

        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| spawn_error(std::io::Error::other("stdin was not captured")))?;

        // Feed stdin from a helper thread so a large output cannot fill the
        // stdout pipe while we are still writing.
        let input = source.as_bytes().to_vec();
        let writer = std::thread::spawn(move || stdin.write_all(&input));

        let output = child.wait_with_output().map_err(spawn_error)?;
        if let Ok(Err(e)) = writer.join() {
            tracing::debug!(error = %e, "gofmt closed stdin early");
        }

        if !output.status.success() {
            return Err(FormatError::External {
                program: self.program_name(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| FormatError::External {
            program: self.program_name(),
            stderr: format!("output is not UTF-8: {e}"),
        })
    }
}
