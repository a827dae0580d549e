//! Resolved settings and the generation run.
//!
//! [`AppContext`] merges the command line with the optional settings file
//! and drives a single run: open the output, walk the tree, then write the
//! header, the table of contents and the staged body in that order.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use kconfig_doc::{
    Banner, DEFAULT_APPS_DIR, DEFAULT_TITLE, DocOptions, Generator, Limits, PathResolver,
};

use crate::{cli::Cli, config::DocConfig, exit::AppError};

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    /// Directory containing the root Kconfig file.
    pub root: PathBuf,
    /// Text substituted for `$APPSDIR`.
    pub apps_dir: String,
    /// Output file; stdout when unset.
    pub output: Option<PathBuf>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            apps_dir: DEFAULT_APPS_DIR.to_string(),
            output: None,
        }
    }
}

impl PathConfig {
    /// Name of the output for messages.
    pub fn output_name(&self) -> String {
        match &self.output {
            Some(path) => path.display().to_string(),
            None => "stdout".to_string(),
        }
    }
}

/// Everything a run needs, with defaults applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppContext {
    pub paths: PathConfig,
    pub options: DocOptions,
}

impl AppContext {
    /// Builds the context from parsed arguments.
    ///
    /// Command-line flags win over the settings file, which wins over the
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::TooManyArguments`] for more than one root and
    /// [`AppError::ConfigLoad`] if the settings file is unusable.
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        if cli.roots.len() > 1 {
            return Err(AppError::TooManyArguments {
                extra: cli.roots[1..]
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            });
        }

        let config = match &cli.config {
            Some(path) => {
                debug!("Loading settings from {}", path.display());
                DocConfig::load(path).map_err(|cause| AppError::ConfigLoad {
                    path: path.clone(),
                    cause,
                })?
            }
            None => DocConfig::default(),
        };

        Ok(Self::merge(cli, config))
    }

    fn merge(cli: &Cli, config: DocConfig) -> Self {
        let defaults = Limits::default();
        let limits = Limits {
            max_nesting: config
                .limits
                .max_nesting
                .unwrap_or(defaults.max_nesting),
            max_dependencies: config
                .limits
                .max_dependencies
                .unwrap_or(defaults.max_dependencies),
        };

        let paths = PathConfig {
            root: cli.roots.first().cloned().unwrap_or_else(|| PathBuf::from(".")),
            apps_dir: cli
                .apps_dir
                .clone()
                .or(config.apps_dir)
                .unwrap_or_else(|| DEFAULT_APPS_DIR.to_string()),
            output: cli.output.clone(),
        };

        let options = DocOptions {
            show_internal: cli.internal || config.show_internal.unwrap_or(false),
            title: config.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            limits,
        };

        Self { paths, options }
    }

    /// Generates the document.
    ///
    /// The output is opened before the walk starts. Nothing is written to it
    /// unless the whole tree parsed without error.
    ///
    /// # Errors
    ///
    /// Returns the first output or Kconfig error encountered.
    pub fn generate(&self) -> Result<(), AppError> {
        debug!("Kconfig root: {}", self.paths.root.display());
        debug!("Application directory: {}", self.paths.apps_dir);
        debug!("Output: {}", self.paths.output_name());

        let mut out: Box<dyn Write> = match &self.paths.output {
            Some(path) => {
                let file = File::create(path).map_err(|source| AppError::OutputOpen {
                    path: path.clone(),
                    source,
                })?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout().lock()),
        };

        let resolver = PathResolver::new(&self.paths.root, &self.paths.apps_dir);
        let doc = Generator::new(resolver, self.options.clone()).generate()?;

        let banner = Banner::new(&self.options.title, last_updated());
        doc.write_head(&mut out, &banner)
            .map_err(|source| AppError::OutputWrite {
                target: self.paths.output_name(),
                source,
            })?;
        doc.write_body(&mut out)
            .map_err(|source| AppError::Staging {
                target: self.paths.output_name(),
                source,
            })?;

        info!("Documentation written to {}", self.paths.output_name());
        Ok(())
    }
}

/// Generation date as shown in the page header, e.g. `March 05, 2025`.
pub fn last_updated() -> String {
    chrono::Local::now().format("%B %d, %Y").to_string()
}
