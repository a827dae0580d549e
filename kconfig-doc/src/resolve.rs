//! Resolution of `source` directives.
//!
//! Every Kconfig file in the tree has the same name, so a `source` argument
//! only contributes its directory part. Directories are taken relative to the
//! configuration root rather than to the including file. The application
//! tree lives outside the root and is referenced through the
//! [`APPSDIR_PLACEHOLDER`] token.

use std::path::{Path, PathBuf};

use crate::token::dequote;

/// Name shared by every Kconfig file in the tree.
pub const KCONFIG_FILE_NAME: &str = "Kconfig";

/// Token standing for the external application tree in `source` paths.
pub const APPSDIR_PLACEHOLDER: &str = "$APPSDIR";

/// Application tree location, relative to the configuration root.
pub const DEFAULT_APPS_DIR: &str = "../apps";

/// Maps `source` arguments to Kconfig directories.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    apps_dir: String,
}

impl PathResolver {
    /// Creates a resolver for the tree rooted at `root`.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory holding the root Kconfig file.
    /// * `apps_dir` - Text substituted for [`APPSDIR_PLACEHOLDER`].
    pub fn new(root: impl Into<PathBuf>, apps_dir: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            apps_dir: apps_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a `source` argument to the directory whose Kconfig file it
    /// names.
    ///
    /// Returns `None` when the argument is empty after dequoting.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kconfig_doc::PathResolver;
    /// use std::path::PathBuf;
    ///
    /// let resolver = PathResolver::new("nuttx", "../apps");
    /// assert_eq!(
    ///     resolver.resolve("\"drivers/serial/Kconfig\""),
    ///     Some(PathBuf::from("nuttx/drivers/serial"))
    /// );
    /// assert_eq!(
    ///     resolver.resolve("\"$APPSDIR/Kconfig\""),
    ///     Some(PathBuf::from("nuttx/../apps"))
    /// );
    /// ```
    pub fn resolve(&self, argument: &str) -> Option<PathBuf> {
        let relpath = dequote(argument)?;
        let subdir = dirname(relpath);
        let root = self.root.to_string_lossy();

        let dir = match subdir.split_once(APPSDIR_PLACEHOLDER) {
            Some((prefix, suffix)) => format!("{root}/{prefix}{}{suffix}", self.apps_dir),
            None => format!("{root}/{subdir}"),
        };
        Some(PathBuf::from(dir))
    }

    /// Path of the Kconfig file inside `dir`.
    pub fn kconfig_path(dir: &Path) -> PathBuf {
        dir.join(KCONFIG_FILE_NAME)
    }
}

/// Directory part of a `/`-separated path, following POSIX `dirname`.
fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    match trimmed.rfind('/') {
        None => ".",
        Some(idx) => {
            let parent = trimmed[..idx].trim_end_matches('/');
            if parent.is_empty() { "/" } else { parent }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("drivers/Kconfig"), "drivers");
        assert_eq!(dirname("arch/arm/src/Kconfig"), "arch/arm/src");
        assert_eq!(dirname("Kconfig"), ".");
        assert_eq!(dirname("drivers//Kconfig"), "drivers");
        assert_eq!(dirname("drivers/"), ".");
        assert_eq!(dirname("/Kconfig"), "/");
        assert_eq!(dirname("/"), "/");
        assert_eq!(dirname(""), ".");
    }

    #[test]
    fn test_resolve_relative_to_root() {
        let resolver = PathResolver::new(".", DEFAULT_APPS_DIR);
        assert_eq!(
            resolver.resolve("\"drivers/Kconfig\""),
            Some(PathBuf::from("./drivers"))
        );
        assert_eq!(
            resolver.resolve("sched/Kconfig"),
            Some(PathBuf::from("./sched"))
        );
    }

    #[test]
    fn test_resolve_apps_placeholder() {
        let resolver = PathResolver::new("/src/nuttx", "../my-apps");
        assert_eq!(
            resolver.resolve("\"$APPSDIR/examples/Kconfig\""),
            Some(PathBuf::from("/src/nuttx/../my-apps/examples"))
        );
        assert_eq!(
            resolver.resolve("\"$APPSDIR/Kconfig\""),
            Some(PathBuf::from("/src/nuttx/../my-apps"))
        );
    }

    #[test]
    fn test_resolve_empty_argument() {
        let resolver = PathResolver::new(".", DEFAULT_APPS_DIR);
        assert_eq!(resolver.resolve("\"\""), None);
        assert_eq!(resolver.resolve(""), None);
    }

    #[test]
    fn test_kconfig_path() {
        assert_eq!(
            PathResolver::kconfig_path(Path::new("./drivers")),
            PathBuf::from("./drivers/Kconfig")
        );
    }
}
