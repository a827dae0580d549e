//! Keyword classification and quote scanning.
//!
//! Only the first word of a line is classified. Everything after it is handed
//! to the handler of that keyword untouched, so a value that happens to spell
//! a keyword (`default menu`) is never misread, while a line that *starts*
//! with one (a help text line beginning with `if`) is.

/// Reserved words recognized at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Config,
    Bool,
    Int,
    Hex,
    String,
    Default,
    Help,
    Menu,
    EndMenu,
    Choice,
    EndChoice,
    Source,
    If,
    EndIf,
}

impl Keyword {
    /// Looks up a word in the reserved set.
    pub fn from_word(word: &str) -> Option<Self> {
        let keyword = match word {
            "config" => Keyword::Config,
            "bool" => Keyword::Bool,
            "int" => Keyword::Int,
            "hex" => Keyword::Hex,
            "string" => Keyword::String,
            "default" => Keyword::Default,
            "help" | "---help---" => Keyword::Help,
            "menu" => Keyword::Menu,
            "endmenu" => Keyword::EndMenu,
            "choice" => Keyword::Choice,
            "endchoice" => Keyword::EndChoice,
            "source" => Keyword::Source,
            "if" => Keyword::If,
            "endif" => Keyword::EndIf,
            _ => return None,
        };
        Some(keyword)
    }
}

/// Classification of the leading word of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Reserved(Keyword),
    NotReserved,
}

impl Token {
    pub fn classify(word: &str) -> Self {
        Keyword::from_word(word).map_or(Token::NotReserved, Token::Reserved)
    }
}

/// A normalized line split into its leading word and the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    pub token: Token,
    /// The leading word as written.
    pub word: &'a str,
    /// Everything after the leading word, without the separating space.
    pub rest: &'a str,
}

impl<'a> Statement<'a> {
    pub fn parse(line: &'a str) -> Self {
        let (word, rest) = split_word(line);
        Self {
            token: Token::classify(word),
            word,
            rest,
        }
    }
}

/// Splits off the first space-delimited word.
pub fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start_matches(' ');
    match text.split_once(' ') {
        Some((word, rest)) => (word, rest.trim_start_matches(' ')),
        None => (text, ""),
    }
}

/// Byte offset of the first occurrence of `ch` not preceded by a backslash
/// escape.
pub fn find_unescaped(text: &str, ch: char) -> Option<usize> {
    let mut escaped = false;
    for (idx, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ch {
            return Some(idx);
        }
    }
    None
}

/// Extracts the first double-quoted string of `text`.
///
/// The string runs to the next unescaped quote, or to the end of `text` if it
/// is never closed. Escapes are kept as written.
pub fn quoted_string(text: &str) -> Option<&str> {
    let start = find_unescaped(text, '"')? + 1;
    let tail = &text[start..];
    match find_unescaped(tail, '"') {
        Some(end) => Some(&tail[..end]),
        None => Some(tail),
    }
}

/// Strips one trailing and one leading quote; `None` if nothing is left.
pub fn dequote(text: &str) -> Option<&str> {
    let text = text.strip_suffix('"').unwrap_or(text);
    let text = text.strip_prefix('"').unwrap_or(text);
    if text.is_empty() { None } else { Some(text) }
}
