//! Recursive-descent walk over a Kconfig tree.
//!
//! [`Generator`] owns all state of one run: paragraph numbering, the `if`
//! dependency stack, the files currently open through `source`, and the
//! document being rendered. Each `menu` and `choice` recurses on the same
//! line cursor until its closer is seen; each `source` recurses on a new
//! cursor for the included file and then resumes the including one.
//!
//! Lines whose leading word is not handled are skipped. A block that is not
//! closed before end of file simply ends there.

use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    DEFAULT_TITLE,
    entry::ConfigEntry,
    error::{KconfigError, Location, Result},
    reader::LineCursor,
    render::HtmlDocument,
    resolve::PathResolver,
    state::{DependencyStack, Limits, NestingState},
    token::{Keyword, Statement, Token, quoted_string, split_word},
};

/// Options controlling what is documented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocOptions {
    /// Document options without a prompt as well.
    pub show_internal: bool,
    /// Title of the root heading.
    pub title: String,
    pub limits: Limits,
}

impl Default for DocOptions {
    fn default() -> Self {
        Self {
            show_internal: false,
            title: DEFAULT_TITLE.to_string(),
            limits: Limits::default(),
        }
    }
}

/// Walks a Kconfig tree and renders it.
pub struct Generator {
    resolver: PathResolver,
    options: DocOptions,
    nesting: NestingState,
    deps: DependencyStack,
    doc: HtmlDocument,
    active: Vec<PathBuf>,
}

impl Generator {
    pub fn new(resolver: PathResolver, options: DocOptions) -> Self {
        Self {
            nesting: NestingState::new(options.limits.max_nesting),
            deps: DependencyStack::new(options.limits.max_dependencies),
            doc: HtmlDocument::new(),
            active: Vec::new(),
            resolver,
            options,
        }
    }

    /// Walks the tree from the root Kconfig file and returns the document.
    ///
    /// # Errors
    ///
    /// Returns an error if a Kconfig file cannot be read or the tree violates
    /// a structural limit.
    pub fn generate(mut self) -> Result<HtmlDocument> {
        self.run()?;
        Ok(self.finish())
    }

    /// Walks the tree from the root Kconfig file.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub fn run(&mut self) -> Result<()> {
        let root = self.resolver.root().to_path_buf();
        self.begin(&PathResolver::kconfig_path(&root))?;
        self.process_dir(&root)
    }

    /// Parses an already open Kconfig source as the root of the tree.
    ///
    /// `source` directives inside it are still resolved against the
    /// resolver's root. `kconfig_file` is the name shown for its entries.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub fn run_reader<R: BufRead>(
        &mut self,
        reader: R,
        kconfig_file: impl Into<PathBuf>,
    ) -> Result<()> {
        let mut cursor = LineCursor::new(reader, kconfig_file);
        self.begin(cursor.path())?;
        self.parse_block(&mut cursor)
    }

    /// Number of `menu`/`choice` blocks still open.
    pub fn open_blocks(&self) -> usize {
        self.nesting.depth().saturating_sub(1)
    }

    /// Number of `if` blocks still open.
    pub fn open_dependencies(&self) -> usize {
        self.deps.depth()
    }

    /// Ends the run and hands over the document.
    pub fn finish(self) -> HtmlDocument {
        if self.open_blocks() > 0 {
            warn!(
                "{} menu/choice block(s) not closed at end of input",
                self.open_blocks()
            );
        }
        if self.open_dependencies() > 0 {
            warn!(
                "{} if block(s) not closed at end of input",
                self.open_dependencies()
            );
        }
        self.doc
    }

    /// Opens the root level and emits its heading, once per run.
    fn begin(&mut self, root_file: &Path) -> Result<()> {
        if self.nesting.depth() > 0 {
            return Ok(());
        }
        self.nesting.enter(&Location::new(root_file, 1))?;
        let anchor = self.nesting.next_menu_anchor();
        let paranum = self.nesting.paragraph();
        self.doc.root(anchor, &paranum, &self.options.title);
        Ok(())
    }

    fn process_dir(&mut self, dir: &Path) -> Result<()> {
        let path = PathResolver::kconfig_path(dir);
        debug!(
            "Parsing {} (dir {}, level {})",
            path.display(),
            dir.display(),
            self.nesting.depth()
        );

        let file = File::open(&path).map_err(|source| KconfigError::Open {
            path: path.clone(),
            source,
        })?;
        self.active
            .push(fs::canonicalize(&path).unwrap_or_else(|_| path.clone()));

        let mut cursor = LineCursor::new(BufReader::new(file), &path);
        let result = self.parse_block(&mut cursor);
        self.active.pop();
        result
    }

    /// Dispatches lines until the block's closer or end of input.
    fn parse_block<R: BufRead>(&mut self, cursor: &mut LineCursor<R>) -> Result<()> {
        while let Some(line) = cursor.next_line()? {
            let stmt = Statement::parse(&line.text);
            let Token::Reserved(keyword) = stmt.token else {
                debug!("Unhandled token: {}", stmt.word);
                continue;
            };

            match keyword {
                Keyword::Source => {
                    let location = cursor.location(&line);
                    self.source(stmt.rest, &location)?;
                }
                Keyword::Config => {
                    let (name, _) = split_word(stmt.rest);
                    if name.is_empty() {
                        warn!("{}: config without a name", cursor.location(&line));
                        continue;
                    }
                    let file = cursor.path().to_path_buf();
                    let entry = ConfigEntry::extract(name, cursor, self.deps.as_slice(), &file)?;
                    self.render_entry(&entry);
                }
                Keyword::Menu => {
                    let location = cursor.location(&line);
                    let title = quoted_string(stmt.rest).filter(|t| !t.is_empty());
                    let paranum = self.nesting.paragraph();
                    let anchor = self.nesting.next_menu_anchor();
                    self.doc.open_menu(anchor, &paranum, title);
                    self.nesting.enter(&location)?;

                    debug!(
                        "{}: entering menu, level {}",
                        location,
                        self.nesting.depth()
                    );
                    self.parse_block(cursor)?;
                }
                Keyword::EndMenu => {
                    self.doc.close_menu();
                    self.nesting.leave(&cursor.location(&line))?;
                    return Ok(());
                }
                Keyword::Choice => {
                    let location = cursor.location(&line);
                    let paranum = self.nesting.paragraph();
                    let anchor = self.nesting.next_choice_anchor();
                    self.doc.open_choice(anchor, &paranum);
                    self.nesting.enter(&location)?;
                    self.nesting.enter_choice();

                    debug!(
                        "{}: entering choice, level {}",
                        location,
                        self.nesting.depth()
                    );
                    self.parse_block(cursor)?;
                }
                Keyword::EndChoice => {
                    self.doc.close_choice();
                    self.nesting.leave_choice();
                    self.nesting.leave(&cursor.location(&line))?;
                    return Ok(());
                }
                Keyword::If => {
                    self.deps.push(stmt.rest, &cursor.location(&line))?;
                }
                Keyword::EndIf => {
                    self.deps.pop(&cursor.location(&line))?;
                }
                Keyword::Bool
                | Keyword::Int
                | Keyword::Hex
                | Keyword::String
                | Keyword::Default
                | Keyword::Help => {
                    debug!("Unhandled token: {}", stmt.word);
                }
            }
        }
        Ok(())
    }

    fn source(&mut self, argument: &str, location: &Location) -> Result<()> {
        let (relpath, _) = split_word(argument);
        let Some(dir) = self.resolver.resolve(relpath) else {
            debug!("{location}: source without a path");
            return Ok(());
        };

        debug!("{location}: source {relpath} -> {}", dir.display());

        let path = PathResolver::kconfig_path(&dir);
        if let Ok(canonical) = fs::canonicalize(&path)
            && self.active.contains(&canonical)
        {
            return Err(KconfigError::RecursiveSource {
                location: location.clone(),
                path,
            });
        }
        self.process_dir(&dir)
    }

    fn render_entry(&mut self, entry: &ConfigEntry) {
        if !entry.is_visible(self.options.show_internal) {
            debug!("Skipping internal variable {}", entry.name);
            return;
        }
        if self.nesting.in_choice() {
            self.doc.entry(entry, None);
        } else {
            let paranum = self.nesting.paragraph();
            self.doc.entry(entry, Some(&paranum));
            self.nesting.advance();
        }
    }
}
