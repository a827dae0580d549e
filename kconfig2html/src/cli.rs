//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Generate an HTML reference of the options in a Kconfig tree.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "kconfig2html", version, about)]
pub struct Cli {
    /// Enable debug output.
    #[arg(short, long)]
    pub debug: bool,

    /// Show hidden, internal configuration variables.
    #[arg(short, long)]
    pub internal: bool,

    /// Relative path to the apps/ directory, from the Kconfig root [default: ../apps].
    #[arg(short, long, value_name = "DIR")]
    pub apps_dir: Option<String>,

    /// Send output to FILE [default: stdout].
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Read settings from a TOML file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory containing the root Kconfig file [default: .].
    #[arg(value_name = "KCONFIG_ROOT")]
    pub roots: Vec<PathBuf>,
}
