//! INI line classifier and parser state machine
//!
//! This module turns raw text into edits on a [`Document`]. Each line is
//! comment-stripped, classified as blank, entry, section header or malformed,
//! and then applied to the section the parser is currently in.

use crate::document::Document;
use crate::error::{Diagnostic, IniError, MalformedReason};
use crate::text;
use log::{debug, trace};

/// Behavior when a non-blank line is neither an entry nor a section header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedLinePolicy {
    /// Ignore the line
    #[default]
    Skip,
    /// Ignore the line but record a [`Diagnostic`] on the document
    CollectDiagnostic,
    /// Stop parsing and return the malformed line as an error
    Abort,
}

/// Configuration options for the parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Discard all sections, entries and diagnostics before each parse
    pub wipe_on_parse: bool,
    /// Behavior when a malformed line is encountered
    pub on_malformed_line: MalformedLinePolicy,
    /// Remove a leading byte order mark before splitting lines
    pub strip_bom: bool,
    /// Maximum number of diagnostics kept on a document
    pub max_diagnostics: usize,
}

impl ParserConfig {
    /// Creates a new parser configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether a parse replaces or merges into the existing document
    pub fn with_wipe_on_parse(mut self, wipe: bool) -> Self {
        self.wipe_on_parse = wipe;
        self
    }

    /// Sets the malformed line behavior
    pub fn with_malformed_line_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.on_malformed_line = policy;
        self
    }

    /// Sets whether a leading byte order mark is removed
    pub fn with_strip_bom(mut self, strip: bool) -> Self {
        self.strip_bom = strip;
        self
    }

    /// Sets the maximum number of stored diagnostics
    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = max;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            wipe_on_parse: true,
            on_malformed_line: MalformedLinePolicy::Skip,
            strip_bom: true,
            max_diagnostics: 1024,
        }
    }
}

/// Classification of a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Empty, whitespace-only or comment-only
    Blank,
    /// `[name]`
    Section(String),
    /// `key = value`
    Entry { key: String, value: String },
    /// Anything else
    Malformed(MalformedReason),
}

/// Classifies one raw line
///
/// Key-value detection runs first, so a line that could be read both ways is
/// always an entry.
pub fn classify_line(raw: &str) -> Line {
    let line = text::strip_comment(raw);
    if line.trim().is_empty() {
        return Line::Blank;
    }

    let entry = parse_entry(line);
    if let Some(Ok((key, value))) = entry {
        return Line::Entry { key, value };
    }

    match (parse_section_header(line), entry) {
        (Some(Ok(name)), _) => Line::Section(name),
        (_, Some(Err(reason))) => Line::Malformed(reason),
        (Some(Err(reason)), _) => Line::Malformed(reason),
        _ => Line::Malformed(MalformedReason::Unrecognized),
    }
}

/// Splits `key = value` on the first unescaped `=`
///
/// Returns `None` when the line has no separator.
fn parse_entry(line: &str) -> Option<Result<(String, String), MalformedReason>> {
    let separator = text::find_unescaped(line, '=')?;

    let key = text::unescape(text::trim(&line[..separator], ' '), '=');
    let value = text::unquote(text::trim(&line[separator + 1..], ' '));

    if key.is_empty() {
        return Some(Err(MalformedReason::EmptyKey));
    }
    if value.is_empty() {
        return Some(Err(MalformedReason::EmptyValue));
    }

    Some(Ok((key, value.to_string())))
}

/// Reads `[name]`, where `\]` inside the name does not close the header
///
/// Returns `None` when the line does not start with `[`.
fn parse_section_header(line: &str) -> Option<Result<String, MalformedReason>> {
    let inner = text::trim(line, ' ').strip_prefix('[')?;

    let Some(close) = text::find_unescaped(inner, ']') else {
        return Some(Err(MalformedReason::UnterminatedSection));
    };

    let name = text::unescape(&inner[..close], ']');
    if name.is_empty() {
        return Some(Err(MalformedReason::EmptySectionName));
    }

    Some(Ok(name))
}

/// Which section incoming entries belong to
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParserState {
    AwaitingLine,
    InDefaultSection,
    InNamedSection(String),
}

/// An on-going parse into a document
pub struct IniParser<'d> {
    document: &'d mut Document,
    state: ParserState,
}

impl<'d> IniParser<'d> {
    /// Starts a parse, wiping the document first if its configuration asks for it
    pub fn new(document: &'d mut Document) -> Self {
        if document.config().wipe_on_parse {
            document.clear();
        }

        Self {
            document,
            state: ParserState::AwaitingLine,
        }
    }

    /// Parses a complete document text
    pub fn parse_str(mut self, input: &str) -> Result<(), IniError> {
        let input = if self.document.config().strip_bom {
            text::strip_bom(input)
        } else {
            input
        };

        for (index, raw) in text::split_lines(input).into_iter().enumerate() {
            self.process_line(index + 1, raw)?;
        }

        Ok(())
    }

    fn process_line(&mut self, number: usize, raw: &str) -> Result<(), IniError> {
        if self.state == ParserState::AwaitingLine {
            self.state = ParserState::InDefaultSection;
        }

        let line = classify_line(raw);
        trace!("line {number}: {line:?}");

        match line {
            Line::Blank => {}
            Line::Entry { key, value } => {
                let section = match &self.state {
                    ParserState::InNamedSection(name) => self.document.ensure_section(name),
                    _ => self.document.root_section_mut(),
                };
                section.insert_raw(key, value);
            }
            Line::Section(name) => {
                debug!("entering section '{name}' at line {number}");
                self.document.ensure_section(&name);
                self.state = ParserState::InNamedSection(name);
            }
            Line::Malformed(reason) => {
                let diagnostic = Diagnostic {
                    line: number,
                    content: text::strip_comment(raw).to_string(),
                    reason,
                };
                self.handle_malformed(diagnostic)?;
            }
        }

        Ok(())
    }

    fn handle_malformed(&mut self, diagnostic: Diagnostic) -> Result<(), IniError> {
        match self.document.config().on_malformed_line {
            MalformedLinePolicy::Skip => {
                debug!("skipping malformed {diagnostic}");
                Ok(())
            }
            MalformedLinePolicy::CollectDiagnostic => {
                debug!("recording malformed {diagnostic}");
                self.document.record_diagnostic(diagnostic);
                Ok(())
            }
            MalformedLinePolicy::Abort => Err(IniError::Parse(diagnostic.into_error())),
        }
    }
}
