//! Normalized line reading.
//!
//! [`LineReader`] turns a byte stream into the lines the parser cares about:
//! whitespace runs are collapsed to single spaces, and blank or comment-only
//! lines are dropped. [`LineCursor`] wraps it with one line of push-back so a
//! handler can stop at a line that belongs to the next construct without
//! consuming it.
//!
//! # Line length
//!
//! Physical lines are read in pieces of at most [`MAX_LINE_LEN`] bytes. A
//! longer line is not an error: its tail is delivered as a separate line, so
//! a keyword that happens to start the tail is dispatched like any other.

use std::{
    collections::VecDeque,
    io::BufRead,
    path::{Path, PathBuf},
};

use crate::error::{KconfigError, Location, Result};

/// Longest piece of a physical line delivered as one line.
pub const MAX_LINE_LEN: usize = 1023;

/// A normalized, non-empty, non-comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line text with whitespace runs collapsed to single spaces.
    pub text: String,
    /// 1-based physical line number.
    pub number: usize,
}

/// Lazy iterator over the candidate lines of a Kconfig source.
pub struct LineReader<R> {
    inner: R,
    number: usize,
    pending: VecDeque<String>,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            number: 0,
            pending: VecDeque::new(),
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = std::io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(piece) = self.pending.pop_front() {
                if let Some(text) = normalize(&piece) {
                    return Some(Ok(Line {
                        text,
                        number: self.number,
                    }));
                }
            }

            self.buf.clear();
            match self.inner.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.number += 1;
                    let raw = String::from_utf8_lossy(&self.buf);
                    self.pending.extend(split_physical(&raw));
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Splits a physical line into pieces of at most [`MAX_LINE_LEN`] bytes.
fn split_physical(raw: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = raw;
    while rest.len() > MAX_LINE_LEN {
        let mut cut = MAX_LINE_LEN;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        let (head, tail) = rest.split_at(cut);
        pieces.push(head.to_string());
        rest = tail;
    }
    pieces.push(rest.to_string());
    pieces
}

/// Collapses whitespace; `None` for blank and comment lines.
fn normalize(piece: &str) -> Option<String> {
    let text = piece.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() || text.starts_with('#') {
        return None;
    }
    Some(text)
}

/// Line source for one open Kconfig file, with one line of push-back.
pub struct LineCursor<R> {
    lines: LineReader<R>,
    path: PathBuf,
    pushed: Option<Line>,
}

impl<R: BufRead> LineCursor<R> {
    /// Creates a cursor over `reader`; `path` is used for error locations.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            lines: LineReader::new(reader),
            path: path.into(),
            pushed: None,
        }
    }

    /// Returns the next line, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`KconfigError::Read`] if the underlying reader fails.
    pub fn next_line(&mut self) -> Result<Option<Line>> {
        if let Some(line) = self.pushed.take() {
            return Ok(Some(line));
        }
        match self.lines.next() {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(source)) => Err(KconfigError::Read {
                path: self.path.clone(),
                source,
            }),
            None => Ok(None),
        }
    }

    /// Returns `line` to the cursor; the next [`next_line`](Self::next_line)
    /// yields it again.
    pub fn push_back(&mut self, line: Line) {
        debug_assert!(self.pushed.is_none(), "only one line of push-back");
        self.pushed = Some(line);
    }

    /// Path of the file this cursor reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of `line` within this file.
    pub fn location(&self, line: &Line) -> Location {
        Location::new(&self.path, line.number)
    }
}
