//! # kconfig-doc
//!
//! A recursive-descent parser for Kconfig trees that renders the options it
//! finds as a cross-linked HTML document.
//!
//! The parser walks the root `Kconfig` file and every file reached through
//! `source` directives in a single depth-first pass. Menus, choices and `if`
//! blocks are tracked as it goes, and every visible `config` entry is
//! rendered into two streams at once: a table of contents and a body. The
//! streams are joined only when the walk is over so that the table of
//! contents comes first.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kconfig_doc::{Banner, DocOptions, Generator, PathResolver};
//!
//! let resolver = PathResolver::new("nuttx", "../apps");
//! let doc = Generator::new(resolver, DocOptions::default()).generate().unwrap();
//!
//! let banner = Banner::new("NuttX Configuration Variables", "January 01, 2025");
//! let mut out = std::io::stdout();
//! doc.write_to(&mut out, &banner).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`reader`] - Normalized line reader with one line of push-back
//! - [`token`] - Keyword classification and quote scanning
//! - [`entry`] - `config` entry extraction
//! - [`state`] - Nesting and dependency state
//! - [`parser`] - Recursive-descent walk over a Kconfig tree
//! - [`resolve`] - `source` path resolution
//! - [`render`] - HTML table of contents and body
//! - [`error`] - Error types and result definitions

/// Error types and result definitions.
pub mod error;

/// Normalized line reader and push-back cursor.
pub mod reader;

/// Keyword classification and quote scanning.
pub mod token;

/// `config` entry data model and extraction.
pub mod entry;

/// Paragraph numbering and dependency tracking.
pub mod state;

/// Recursive-descent parser over a Kconfig tree.
pub mod parser;

/// Resolution of `source` directives to Kconfig directories.
pub mod resolve;

/// HTML rendering of the table of contents and the body.
pub mod render;

pub use entry::{ConfigEntry, ValueType};
pub use error::{KconfigError, Location, Result};
pub use parser::{DocOptions, Generator};
pub use render::{Banner, HtmlDocument};
pub use resolve::{APPSDIR_PLACEHOLDER, DEFAULT_APPS_DIR, KCONFIG_FILE_NAME, PathResolver};
pub use state::Limits;

/// Title used for the banner and the root heading when none is configured.
pub const DEFAULT_TITLE: &str = "NuttX Configuration Variables";
