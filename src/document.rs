//! In-memory INI document model
//!
//! A [`Document`] owns a root section for entries that precede any header and
//! a map of named [`Section`]s. Every [`Value`] stores one canonical string;
//! typed access converts it on each call.

use crate::convert::{FromValue, ToValue};
use crate::error::{ConversionError, Diagnostic, IniError, InvalidFileReason};
use crate::parser::{IniParser, ParserConfig};
use crate::text;
use indexmap::IndexMap;
use log::warn;
use smallvec::SmallVec;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Diagnostics stored inline for the common case of a handful of bad lines
pub type Diagnostics = SmallVec<[Diagnostic; 4]>;

/// A single value in its canonical string form
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Value {
    raw: String,
}

impl Value {
    /// Creates a value from anything the registry can format
    pub fn new<T: ToValue>(value: T) -> Self {
        Self {
            raw: value.to_value_string(),
        }
    }

    /// Borrows the canonical string without copying
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Converts the canonical string to `T`
    pub fn get<T: FromValue>(&self) -> Result<T, ConversionError> {
        T::parse(&self.raw)
    }

    /// Returns true if the canonical string converts to `T`
    pub fn is<T: FromValue>(&self) -> bool {
        T::is_convertible(&self.raw)
    }

    /// Overwrites the canonical string with the formatted `value`
    pub fn set<T: ToValue>(&mut self, value: T) {
        self.raw = value.to_value_string();
    }

    /// Consumes the value, returning the canonical string
    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for Value {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

/// A group of key-value entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: IndexMap<String, Value>,
}

impl Section {
    /// Creates an empty section
    pub fn new() -> Self {
        Self::default()
    }

    /// Formats `value` through the registry and inserts it, overwriting any
    /// existing entry with the same key
    pub fn add<T: ToValue>(&mut self, key: impl Into<String>, value: T) -> &mut Value {
        self.insert_raw(key.into(), value.to_value_string())
    }

    pub(crate) fn insert_raw(&mut self, key: String, raw: String) -> &mut Value {
        let slot = self.entries.entry(key).or_default();
        slot.raw = raw;
        slot
    }

    /// Removes an entry; returns false if the key did not exist
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    /// Removes every entry, keeping the section itself
    pub fn remove_all(&mut self) {
        self.entries.clear();
    }

    /// Returns true if the key exists
    pub fn has_value(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Looks up a value
    pub fn get(&self, key: &str) -> Result<&Value, IniError> {
        self.entries.get(key).ok_or_else(|| IniError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Looks up a value for editing
    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value, IniError> {
        self.entries.get_mut(key).ok_or_else(|| IniError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Looks up a value and converts it to `T`
    pub fn get_as<T: FromValue>(&self, key: &str) -> Result<T, IniError> {
        Ok(self.get(key)?.get::<T>()?)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the section has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over entries with mutable values
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.entries
            .iter_mut()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Renders the entries as `key=value` lines
    pub fn stringify(&self) -> String {
        let mut output = String::new();
        self.write_entries(&mut output);
        output
    }

    fn write_entries(&self, output: &mut String) {
        for (key, value) in &self.entries {
            output.push_str(&text::escape(key, '='));
            output.push('=');
            output.push_str(&text::quote(value.as_str()));
            output.push('\n');
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A parsed INI document
#[derive(Debug, Clone, Default)]
pub struct Document {
    root: Section,
    sections: IndexMap<String, Section>,
    config: ParserConfig,
    diagnostics: Diagnostics,
    dropped_diagnostics: usize,
}

impl Document {
    /// Creates an empty document with the default parser configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document with a custom parser configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Parses a file into a new document
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IniError> {
        let mut document = Self::new();
        document.parse_file(path)?;
        Ok(document)
    }

    /// Returns the parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Replaces the parser configuration used by later parses
    pub fn set_config(&mut self, config: ParserConfig) {
        self.config = config;
    }

    /// Parses INI text into this document
    pub fn parse_str(&mut self, input: &str) -> Result<(), IniError> {
        IniParser::new(self).parse_str(input)
    }

    /// Parses everything readable from `reader`; invalid UTF-8 is replaced
    pub fn parse_reader<R: Read>(&mut self, mut reader: R) -> Result<(), IniError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let input = String::from_utf8_lossy(&bytes);
        self.parse_str(&input)
    }

    /// Parses a file, rejecting missing paths and non-regular files up front
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), IniError> {
        let path = path.as_ref();
        check_valid_file(path)?;
        let file = std::fs::File::open(path)?;
        self.parse_reader(file)
    }

    /// Inserts an empty section, replacing any section with the same name
    pub fn add_section(&mut self, name: impl Into<String>) -> &mut Section {
        let (index, _) = self.sections.insert_full(name.into(), Section::new());
        &mut self.sections[index]
    }

    pub(crate) fn ensure_section(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    /// Returns true if the section exists
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Removes a section; returns false if it did not exist
    pub fn remove_section(&mut self, name: &str) -> bool {
        self.sections.shift_remove(name).is_some()
    }

    /// Looks up a section
    pub fn section(&self, name: &str) -> Result<&Section, IniError> {
        self.sections
            .get(name)
            .ok_or_else(|| IniError::SectionNotFound {
                name: name.to_string(),
            })
    }

    /// Looks up a section for editing
    pub fn section_mut(&mut self, name: &str) -> Result<&mut Section, IniError> {
        self.sections
            .get_mut(name)
            .ok_or_else(|| IniError::SectionNotFound {
                name: name.to_string(),
            })
    }

    /// The section holding entries that precede any header
    pub fn root_section(&self) -> &Section {
        &self.root
    }

    /// The root section, for editing
    pub fn root_section_mut(&mut self) -> &mut Section {
        &mut self.root
    }

    /// Number of named sections
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Iterates over named sections
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections
            .iter()
            .map(|(name, section)| (name.as_str(), section))
    }

    pub(crate) fn section_map(&self) -> &IndexMap<String, Section> {
        &self.sections
    }

    /// Iterates over named sections for editing
    pub fn sections_mut(&mut self) -> impl Iterator<Item = (&str, &mut Section)> {
        self.sections
            .iter_mut()
            .map(|(name, section)| (name.as_str(), section))
    }

    /// Diagnostics recorded under [`MalformedLinePolicy::CollectDiagnostic`]
    ///
    /// [`MalformedLinePolicy::CollectDiagnostic`]: crate::MalformedLinePolicy::CollectDiagnostic
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of diagnostics discarded after reaching the configured maximum
    pub fn dropped_diagnostics(&self) -> usize {
        self.dropped_diagnostics
    }

    pub(crate) fn record_diagnostic(&mut self, diagnostic: Diagnostic) {
        if self.diagnostics.len() < self.config.max_diagnostics {
            self.diagnostics.push(diagnostic);
        } else {
            if self.dropped_diagnostics == 0 {
                warn!(
                    "diagnostic limit of {} reached, further malformed lines are only counted",
                    self.config.max_diagnostics
                );
            }
            self.dropped_diagnostics += 1;
        }
    }

    /// Discards all sections, root entries and diagnostics
    pub fn clear(&mut self) {
        self.root.remove_all();
        self.sections.clear();
        self.diagnostics.clear();
        self.dropped_diagnostics = 0;
    }

    /// Renders the document as INI text
    ///
    /// Root entries come first, then each named section as a `[name]` header
    /// followed by its entries. Sections are separated by blank lines.
    pub fn stringify(&self) -> String {
        let mut output = String::new();
        self.root.write_entries(&mut output);

        for (name, section) in &self.sections {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push('[');
            output.push_str(&text::escape(name, ']'));
            output.push_str("]\n");
            section.write_entries(&mut output);
        }

        output
    }
}

impl PartialEq for Document {
    /// Documents are equal when their content is equal, regardless of
    /// configuration, diagnostics or ordering
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.sections == other.sections
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl FromStr for Document {
    type Err = IniError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut document = Self::new();
        document.parse_str(s)?;
        Ok(document)
    }
}

fn check_valid_file(path: &Path) -> Result<(), IniError> {
    let reason = match std::fs::metadata(path) {
        Err(_) => Some(InvalidFileReason::NotFound),
        Ok(metadata) if !metadata.is_file() => Some(InvalidFileReason::NotRegularFile),
        Ok(_) => None,
    };

    match reason {
        Some(reason) => Err(IniError::InvalidFile {
            path: path.to_path_buf(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_views() {
        let mut value = Value::new(1234);
        assert_eq!(value.as_str(), "1234");
        assert!(value.is::<i32>());
        assert!(!value.is::<i8>());
        assert_eq!(value.get::<u16>(), Ok(1234));

        value.set("hello");
        assert_eq!(value.get::<String>(), Ok("hello".to_string()));
        assert!(value.get::<i32>().is_err());
        assert_eq!(value.to_string(), "hello");
    }

    #[test]
    fn test_section_crud() {
        let mut section = Section::new();
        section.add("num", 4);
        section.add("num", 1234);
        section.add("str", "hello");

        assert_eq!(section.len(), 2);
        assert_eq!(section.get_as::<i32>("num").unwrap(), 1234);
        assert_eq!(section.get("str").unwrap().as_str(), "hello");

        section.get_mut("str").unwrap().set(true);
        assert!(section.get_as::<bool>("str").unwrap());

        assert!(section.remove("num"));
        assert!(!section.remove("num"));
        assert!(!section.has_value("num"));

        section.remove_all();
        assert!(section.is_empty());
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let section = Section::new();
        let err = section.get("missing").unwrap_err();
        assert!(matches!(err, IniError::KeyNotFound { ref key } if key == "missing"));
        assert!(section.get_as::<i32>("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_typed_read_failure_is_conversion_error() {
        let mut section = Section::new();
        section.add("flag", "maybe");
        let err = section.get_as::<bool>("flag").unwrap_err();
        assert!(matches!(err, IniError::Conversion(ref e) if e.target == "bool"));
    }

    #[test]
    fn test_add_section_overwrites() {
        let mut document = Document::new();
        document.add_section("s").add("k", "v");
        assert!(document.section("s").unwrap().has_value("k"));

        document.add_section("s");
        assert!(document.has_section("s"));
        assert!(document.section("s").unwrap().is_empty());
        assert_eq!(document.section_count(), 1);
    }

    #[test]
    fn test_remove_section() {
        let mut document = Document::new();
        document.add_section("s");
        assert!(document.remove_section("s"));
        assert!(!document.remove_section("s"));
        assert!(document.section("s").unwrap_err().is_not_found());
    }

    #[test]
    fn test_stringify_layout() {
        let mut document = Document::new();
        document.root_section_mut().add("top", "1");
        document.add_section("a").add("x", "2");
        document.add_section("b").add("y", "3");

        assert_eq!(document.stringify(), "top=1\n\n[a]\nx=2\n\n[b]\ny=3\n");
    }

    #[test]
    fn test_stringify_without_root_entries() {
        let mut document = Document::new();
        document.add_section("only").add("k", "v");
        assert_eq!(document.stringify(), "[only]\nk=v\n");
    }

    #[test]
    fn test_stringify_escapes() {
        let mut document = Document::new();
        document.add_section("a]b").add("k=1", "v");
        assert_eq!(document.stringify(), "[a\\]b]\nk\\=1=v\n");

        let reparsed: Document = document.stringify().parse().unwrap();
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_stringify_escapes_backslashes() {
        let mut document = Document::new();
        document.add_section("C:\\").add("dir\\", "v");
        assert_eq!(document.stringify(), "[C:\\\\]\ndir\\\\=v\n");

        let reparsed: Document = document.stringify().parse().unwrap();
        assert!(reparsed.root_section().is_empty());
        assert_eq!(
            reparsed.section("C:\\").unwrap().get("dir\\").unwrap().as_str(),
            "v"
        );
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_stringify_quotes_values_that_would_change() {
        let mut document = Document::new();
        let section = document.add_section("s");
        section.add("quoted", "\"quoted\"");
        section.add("padded", "  padded ");
        section.add("inner", "a \"b\" c");
        assert_eq!(
            document.stringify(),
            "[s]\nquoted=\"\"quoted\"\"\npadded=\"  padded \"\ninner=a \"b\" c\n"
        );

        let reparsed: Document = document.stringify().parse().unwrap();
        assert_eq!(
            reparsed.section("s").unwrap().get("quoted").unwrap().as_str(),
            "\"quoted\""
        );
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_wipe_and_merge() {
        let mut document = Document::new();
        document.parse_str("[a]\nx = 1").unwrap();
        document.parse_str("[b]\ny = 2").unwrap();
        assert!(!document.has_section("a"));
        assert!(document.has_section("b"));

        let mut document = Document::with_config(ParserConfig::new().with_wipe_on_parse(false));
        document.parse_str("[a]\nx = 1").unwrap();
        document.parse_str("[a]\nz = 3\n[b]\ny = 2").unwrap();
        let a = document.section("a").unwrap();
        assert!(a.has_value("x"));
        assert!(a.has_value("z"));
        assert!(document.has_section("b"));
    }

    #[test]
    fn test_diagnostic_cap() {
        let config = ParserConfig::new()
            .with_malformed_line_policy(crate::MalformedLinePolicy::CollectDiagnostic)
            .with_max_diagnostics(2);
        let mut document = Document::with_config(config);
        document.parse_str("a\nb\nc\nd").unwrap();

        assert_eq!(document.diagnostics().len(), 2);
        assert_eq!(document.dropped_diagnostics(), 2);

        document.parse_str("ok = 1").unwrap();
        assert!(document.diagnostics().is_empty());
        assert_eq!(document.dropped_diagnostics(), 0);
    }

    #[test]
    fn test_parse_reader_replaces_invalid_utf8() {
        let bytes: &[u8] = b"key = caf\xE9\n";
        let mut document = Document::new();
        document.parse_reader(bytes).unwrap();
        assert_eq!(
            document.root_section().get("key").unwrap().as_str(),
            "caf\u{FFFD}"
        );
    }

    #[test]
    fn test_parse_missing_file() {
        let mut document = Document::new();
        let err = document.parse_file("does-not-exist.ini").unwrap_err();
        assert!(matches!(
            err,
            IniError::InvalidFile {
                reason: InvalidFileReason::NotFound,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_directory_is_rejected() {
        let mut document = Document::new();
        let err = document.parse_file(std::env::temp_dir()).unwrap_err();
        assert!(matches!(
            err,
            IniError::InvalidFile {
                reason: InvalidFileReason::NotRegularFile,
                ..
            }
        ));
    }
}
