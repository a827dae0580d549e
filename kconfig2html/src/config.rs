//! TOML settings file.
//!
//! Every key is optional; command-line flags take precedence over the file.
//!
//! # Configuration File Format
//!
//! ```toml
//! title = "NuttX Configuration Variables"
//! apps_dir = "../apps"
//! show_internal = false
//!
//! [limits]
//! max_nesting = 100
//! max_dependencies = 100
//! ```

use std::{fs, path::Path};

use anyhow::{Context, bail};
use kconfig_doc::Limits;
use serde::Deserialize;

/// Settings read from a TOML file.
#[derive(Default, Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DocConfig {
    /// Title of the page and of the root heading.
    pub title: Option<String>,
    /// Text substituted for `$APPSDIR` in `source` paths.
    pub apps_dir: Option<String>,
    /// Document options without a prompt as well.
    pub show_internal: Option<bool>,
    /// Structural limits of the walk.
    pub limits: LimitsConfig,
}

/// Overrides for the walk's structural limits.
#[derive(Default, Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum `menu`/`choice` depth, the root level included.
    pub max_nesting: Option<usize>,
    /// Maximum number of nested `if` blocks.
    pub max_dependencies: Option<usize>,
}

impl DocConfig {
    /// Loads settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// sets `max_nesting` outside `1..=`[`Limits::NESTING_CEILING`].
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("can not open config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: DocConfig = toml::from_str(content).context("invalid settings")?;
        match config.limits.max_nesting {
            Some(0) => bail!("limits.max_nesting must be at least 1"),
            Some(n) if n > Limits::NESTING_CEILING => bail!(
                "limits.max_nesting must not exceed {}, got {n}",
                Limits::NESTING_CEILING
            ),
            _ => {}
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        assert_eq!(DocConfig::from_toml("").unwrap(), DocConfig::default());
    }

    #[test]
    fn test_full_file() {
        let config = DocConfig::from_toml(
            r#"
            title = "My RTOS Options"
            apps_dir = "../my-apps"
            show_internal = true

            [limits]
            max_nesting = 8
            max_dependencies = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.title.as_deref(), Some("My RTOS Options"));
        assert_eq!(config.apps_dir.as_deref(), Some("../my-apps"));
        assert_eq!(config.show_internal, Some(true));
        assert_eq!(config.limits.max_nesting, Some(8));
        assert_eq!(config.limits.max_dependencies, Some(4));
    }

    #[test]
    fn test_rejects_unknown_keys_and_zero_nesting() {
        assert!(DocConfig::from_toml("titel = \"typo\"").is_err());

        let err = DocConfig::from_toml("[limits]\nmax_nesting = 0").unwrap_err();
        assert!(err.to_string().contains("max_nesting"));
    }

    #[test]
    fn test_nesting_ceiling() {
        let config = DocConfig::from_toml(&format!(
            "[limits]\nmax_nesting = {}",
            Limits::NESTING_CEILING
        ))
        .unwrap();
        assert_eq!(config.limits.max_nesting, Some(Limits::NESTING_CEILING));

        let err = DocConfig::from_toml("[limits]\nmax_nesting = 1000000").unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn test_missing_file() {
        let err = DocConfig::load(Path::new("/nonexistent/kconfig2html.toml")).unwrap_err();
        assert!(err.to_string().starts_with("can not open config file"));
    }
}
