//! # kconfig2html
//!
//! Generates a cross-linked HTML reference of every configuration option in
//! a Kconfig tree.
//!
//! The walk itself lives in [`kconfig_doc`]; this crate is the command-line
//! front end around it.
//!
//! ## Features
//!
//! - **Table of contents**: nested list of menus, choices and options, each
//!   linking to its section
//! - **Option sections**: type, default value, `if` dependencies and the
//!   Kconfig file declaring the option
//! - **Application tree**: `$APPSDIR` in `source` paths is mapped to a
//!   configurable directory
//! - **Settings file**: title, application tree and limits from TOML
//!
//! ## Modules
//!
//! - [`cli`] - Command-line arguments
//! - [`config`] - TOML settings file
//! - [`ctx`] - Resolved settings and the generation run
//! - [`exit`] - Application errors and process exit codes
//!
//! ## Example
//!
//! ```bash
//! kconfig2html -a ../apps -o Documentation/NuttXConfigVariables.html nuttx
//! ```

/// Command-line arguments.
pub mod cli;

/// TOML settings file.
pub mod config;

/// Resolved settings and the generation run.
pub mod ctx;

/// Application errors and process exit codes.
pub mod exit;

#[macro_use]
extern crate log;
