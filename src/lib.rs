//! # INI Rust Reader
//!
//! An INI reader and writer with typed value conversion and serde integration.
//!
//! ## Overview
//!
//! A [`Document`] holds an unnamed root section plus any number of named
//! [`Section`]s, each mapping case-sensitive keys to string [`Value`]s. Values
//! are stored as text and converted on demand to booleans, integers, floats or
//! UTF-16/UTF-32 views through the [`FromValue`] and [`ToValue`] traits.
//!
//! ## Key Features
//!
//! - **Lenient Parsing**: Malformed lines are skipped by default, or collected as diagnostics
//! - **Inline Comments**: `;` and `#` start a comment when preceded by a space
//! - **Typed Access**: `get::<i32>()`, `get::<bool>()`, hex integers, `yes`/`on`/`off` booleans
//! - **Editing**: Add, remove and rewrite sections and values, then serialize back
//! - **Serde Integration**: Use `#[derive(Deserialize)]` with INI files
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ini-rust-reader = "0.1"
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use ini_reader::Document;
//!
//! let text = "
//! name = demo ; trailing comment
//! [server]
//! port = 0x1F90
//! debug = on
//! ";
//!
//! let document: Document = text.parse()?;
//! let server = document.section("server")?;
//! assert_eq!(server.get_as::<u16>("port")?, 8080);
//! assert!(server.get_as::<bool>("debug")?);
//! assert_eq!(document.root_section().get("name")?.as_str(), "demo");
//! # Ok::<(), ini_reader::IniError>(())
//! ```
//!
//! ## Editing
//!
//! ```rust
//! use ini_reader::Document;
//!
//! let mut document = Document::new();
//! document.root_section_mut().add("version", 3);
//! let section = document.add_section("paths");
//! section.add("home", "/srv");
//! section.get_mut("home")?.set("/var/lib");
//!
//! assert_eq!(document.stringify(), "version=3\n\n[paths]\nhome=/var/lib\n");
//! # Ok::<(), ini_reader::IniError>(())
//! ```
//!
//! ## Serde
//!
//! ```rust
//! use serde::Deserialize;
//! use ini_reader::from_str;
//!
//! #[derive(Debug, Deserialize)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct Config {
//!     name: String,
//!     server: Server,
//! }
//!
//! let config: Config = from_str("name = app\n[server]\nhost = localhost\nport = 8080")?;
//! assert_eq!(config.server.port, 8080);
//! # Ok::<(), ini_reader::IniError>(())
//! ```
//!
//! ## Parser Configuration
//!
//! ```rust
//! use ini_reader::{Document, MalformedLinePolicy, ParserConfig};
//!
//! let config = ParserConfig::default()
//!     .with_malformed_line_policy(MalformedLinePolicy::CollectDiagnostic);
//! let mut document = Document::with_config(config);
//! document.parse_str("[ok]\nbroken line\nkey = value")?;
//!
//! assert_eq!(document.diagnostics().len(), 1);
//! assert_eq!(document.diagnostics()[0].line, 2);
//! # Ok::<(), ini_reader::IniError>(())
//! ```

pub mod convert;
pub mod deserializer;
pub mod document;
pub mod error;
pub mod parser;
pub mod text;

// Re-export main types and functions
pub use deserializer::{
    DocumentDeserializer, SectionDeserializer, from_document, from_file, from_section, from_str,
};
pub use document::{Diagnostics, Document, Section, Value};
pub use error::{
    ConversionError, Diagnostic, IniError, InvalidFileReason, MalformedReason, ParseError,
};
pub use parser::{IniParser, Line, MalformedLinePolicy, ParserConfig, classify_line};

// Re-export conversion traits
pub use convert::{FromValue, ToValue};
