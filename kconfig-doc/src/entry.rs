//! `config` entry data model and extraction.

use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    error::Result,
    reader::LineCursor,
    token::{Keyword, Statement, Token, quoted_string},
};

/// Declared type of a configuration option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueType {
    /// No type line has been seen.
    #[default]
    None,
    Bool,
    Int,
    Hex,
    String,
}

impl ValueType {
    /// Human-readable label, `None` when the type is unknown.
    pub fn label(self) -> Option<&'static str> {
        match self {
            ValueType::None => None,
            ValueType::Bool => Some("Boolean"),
            ValueType::Int => Some("Integer"),
            ValueType::Hex => Some("Hexadecimal"),
            ValueType::String => Some("String"),
        }
    }

    fn from_keyword(keyword: Keyword) -> Self {
        match keyword {
            Keyword::Bool => ValueType::Bool,
            Keyword::Int => ValueType::Int,
            Keyword::Hex => ValueType::Hex,
            Keyword::String => ValueType::String,
            _ => ValueType::None,
        }
    }
}

/// One configuration option, as declared by a `config` block.
///
/// Entries are built, rendered once and dropped; the walk never keeps them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Option name without the `CONFIG_` prefix.
    pub name: String,
    pub value_type: ValueType,
    /// Prompt text following the type keyword.
    pub description: Option<String>,
    /// Default value, verbatim and unvalidated.
    pub default: Option<String>,
    /// Whether a `help` block follows. The help text itself is not kept.
    pub has_help: bool,
    /// `if` conditions in force where the entry was declared.
    pub dependencies: Vec<String>,
    /// Kconfig file that declares the entry.
    pub kconfig_file: PathBuf,
}

impl ConfigEntry {
    pub fn new(
        name: impl Into<String>,
        dependencies: &[String],
        kconfig_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::None,
            description: None,
            default: None,
            has_help: false,
            dependencies: dependencies.to_vec(),
            kconfig_file: kconfig_file.into(),
        }
    }

    /// Builds the entry for `config <name>` from the lines that follow it.
    ///
    /// Scanning stops at the first line whose leading word is not a type,
    /// `default` or `help`. That line is pushed back onto `cursor` so the
    /// caller dispatches it next.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from `cursor` fails.
    pub fn extract<R: BufRead>(
        name: &str,
        cursor: &mut LineCursor<R>,
        dependencies: &[String],
        kconfig_file: &Path,
    ) -> Result<Self> {
        let mut entry = Self::new(name, dependencies, kconfig_file);

        while let Some(line) = cursor.next_line()? {
            let stmt = Statement::parse(&line.text);
            match stmt.token {
                Token::Reserved(Keyword::Default) => {
                    entry.default = (!stmt.rest.is_empty()).then(|| stmt.rest.to_string());
                }
                Token::Reserved(Keyword::Help) => {
                    entry.has_help = true;
                }
                Token::Reserved(
                    keyword @ (Keyword::Bool | Keyword::Int | Keyword::Hex | Keyword::String),
                ) => {
                    entry.value_type = ValueType::from_keyword(keyword);
                    if let Some(desc) = quoted_string(stmt.rest).filter(|d| !d.is_empty()) {
                        entry.description = Some(desc.to_string());
                    }
                }
                _ => {
                    debug!("Unhandled token: {}", stmt.word);
                    cursor.push_back(line);
                    break;
                }
            }
        }

        Ok(entry)
    }

    /// Whether the entry is documented at all.
    pub fn is_visible(&self, show_internal: bool) -> bool {
        self.description.is_some() || show_internal
    }

    /// An entry with neither prompt nor help cannot be set by the user.
    pub fn is_hidden(&self) -> bool {
        !self.has_help && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn extract(input: &str, deps: &[String]) -> (ConfigEntry, Option<String>) {
        let mut cursor = LineCursor::new(Cursor::new(input.to_string()), "Kconfig");
        let entry = ConfigEntry::extract("FOO", &mut cursor, deps, Path::new("./Kconfig")).unwrap();
        let next = cursor.next_line().unwrap().map(|l| l.text);
        (entry, next)
    }

    #[test]
    fn test_extract_bool_with_default() {
        let (entry, next) = extract("bool \"Enable Foo\"\ndefault y\n", &[]);
        assert_eq!(entry.name, "FOO");
        assert_eq!(entry.value_type, ValueType::Bool);
        assert_eq!(entry.description.as_deref(), Some("Enable Foo"));
        assert_eq!(entry.default.as_deref(), Some("y"));
        assert!(!entry.has_help);
        assert_eq!(next, None);
    }

    #[test]
    fn test_stops_at_foreign_line_without_consuming_it() {
        let (entry, next) = extract(
            "int \"Buffer size\"\ndefault 64\ndepends on BAR\ndefault 128\n",
            &[],
        );
        assert_eq!(entry.value_type, ValueType::Int);
        assert_eq!(entry.default.as_deref(), Some("64"));
        assert_eq!(next.as_deref(), Some("depends on BAR"));
    }

    #[test]
    fn test_next_config_is_lookahead() {
        let (entry, next) = extract("hex\nconfig BAR\n", &[]);
        assert_eq!(entry.value_type, ValueType::Hex);
        assert_eq!(entry.description, None);
        assert_eq!(next.as_deref(), Some("config BAR"));
    }

    #[test]
    fn test_help_flag_and_text_left_for_caller() {
        let (entry, next) = extract("string \"Path\"\n---help---\n\tThe path to use.\n", &[]);
        assert!(entry.has_help);
        assert_eq!(entry.value_type, ValueType::String);
        assert_eq!(next.as_deref(), Some("The path to use."));
    }

    #[test]
    fn test_default_is_verbatim() {
        let (entry, _) = extract("string\ndefault \"a b\" if FOO\n", &[]);
        assert_eq!(entry.default.as_deref(), Some("\"a b\" if FOO"));
    }

    #[test]
    fn test_dependencies_snapshot() {
        let deps = vec!["ARCH_ARM".to_string(), "!DISABLE_FOO".to_string()];
        let (entry, _) = extract("bool \"x\"\n", &deps);
        assert_eq!(entry.dependencies, deps);
    }

    #[test]
    fn test_visibility() {
        let (entry, _) = extract("bool\n", &[]);
        assert!(entry.is_hidden());
        assert!(!entry.is_visible(false));
        assert!(entry.is_visible(true));

        let (entry, _) = extract("bool \"\"\nhelp\n", &[]);
        assert_eq!(entry.description, None);
        assert!(!entry.is_hidden());
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(ValueType::Bool.label(), Some("Boolean"));
        assert_eq!(ValueType::Hex.label(), Some("Hexadecimal"));
        assert_eq!(ValueType::None.label(), None);
    }
}
