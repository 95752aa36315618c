//! Validated, immutable configuration for a synchronization run
//!
//! Defaults mirror the usual layout of a module with a front-end build
//! living one level below the module root:
//!
//! ```text
//! modules/widget/                 <- module root, name "widget"
//! modules/widget/widget.libraries.yml
//! modules/widget/frontend/        <- working directory
//! modules/widget/frontend/dist/   <- build output
//! ```

use crate::errors::ConfigError;
use crate::options::SyncOptions;
use std::path::{Path, PathBuf};

/// Output directory used when none is configured, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Suffix of the library manifest file derived from the module name
pub const MANIFEST_SUFFIX: &str = ".libraries.yml";

/// Configuration for one synchronization run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    output_path: PathBuf,
    manifest_file: PathBuf,
    module_token: String,
    hash_delimiter: String,
    library: Option<String>,
    asset_prefix: String,
    css_group: Option<String>,
}

impl SyncConfig {
    /// Validate `options` and fill in defaults computed from `cwd`
    pub fn from_options(options: &SyncOptions, cwd: &Path) -> Result<Self, ConfigError> {
        let output_path = non_empty(options.output_path.as_deref(), "output-path")?;
        let manifest_file = non_empty(options.manifest_file.as_deref(), "manifest-file")?;
        let module_token = non_empty(options.module_token.as_deref(), "module-token")?;
        let hash_delimiter = non_empty(options.hash_delimiter.as_deref(), "hash-delimiter")?;
        let library = non_empty(options.library.as_deref(), "library")?;
        let asset_prefix = non_empty(options.asset_prefix.as_deref(), "asset-prefix")?;
        let css_group = non_empty(options.css_group.as_deref(), "css-group")?;

        let module_token = match module_token {
            Some(token) => token.to_string(),
            None => module_name(cwd, "module-token")?,
        };

        let manifest_file = match manifest_file {
            Some(path) => cwd.join(path),
            None => default_manifest_file(cwd)?,
        };

        let configured_output = output_path.unwrap_or(DEFAULT_OUTPUT_DIR);
        let asset_prefix = normalize_prefix(asset_prefix.unwrap_or(configured_output));

        Ok(SyncConfig {
            output_path: cwd.join(configured_output),
            manifest_file,
            hash_delimiter: hash_delimiter.map_or_else(|| module_token.clone(), str::to_string),
            module_token,
            library: library.map(str::to_string),
            asset_prefix,
            css_group: css_group.map(str::to_string),
        })
    }

    /// Directory scanned for build artifacts
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Library manifest rewritten by the run
    pub fn manifest_file(&self) -> &Path {
        &self.manifest_file
    }

    pub fn module_token(&self) -> &str {
        &self.module_token
    }

    /// Token separating the logical asset name from the build hash
    pub fn hash_delimiter(&self) -> &str {
        &self.hash_delimiter
    }

    /// Explicit manifest entry to update; `None` means the first entry
    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }

    /// Prefix joined to every derived asset key. Defaults to the output path
    /// exactly as configured, not the resolved [`SyncConfig::output_path`].
    pub fn asset_prefix(&self) -> &str {
        &self.asset_prefix
    }

    pub fn css_group(&self) -> Option<&str> {
        self.css_group.as_deref()
    }

    /// Key/value pairs for display, in a stable order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("output-path", self.output_path.display().to_string()),
            ("manifest-file", self.manifest_file.display().to_string()),
            ("module-token", self.module_token.clone()),
            ("hash-delimiter", self.hash_delimiter.clone()),
            (
                "library",
                self.library
                    .clone()
                    .unwrap_or_else(|| "(first entry)".to_string()),
            ),
            ("asset-prefix", self.asset_prefix.clone()),
            (
                "css-group",
                self.css_group.clone().unwrap_or_else(|| "(none)".to_string()),
            ),
        ]
    }
}

fn non_empty<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<Option<&'a str>, ConfigError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ConfigError::EmptyValue(field)),
        other => Ok(other),
    }
}

/// Name of the directory above `cwd`, i.e. the module the build belongs to
fn module_name(cwd: &Path, field: &'static str) -> Result<String, ConfigError> {
    cwd.parent()
        .and_then(|parent| parent.file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::NoParentName {
            field,
            cwd: cwd.to_path_buf(),
        })
}

fn default_manifest_file(cwd: &Path) -> Result<PathBuf, ConfigError> {
    let name = module_name(cwd, "manifest-file")?;
    let module_root = cwd.parent().unwrap_or(cwd);
    Ok(module_root.join(format!("{}{}", name, MANIFEST_SUFFIX)))
}

fn normalize_prefix(prefix: &str) -> String {
    let prefix = prefix.replace('\\', "/");
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() && prefix.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_cwd() -> PathBuf {
        PathBuf::from("/srv/site/modules/widget/frontend")
    }

    #[test]
    fn test_defaults_from_parent_directory() {
        let config = SyncConfig::from_options(&SyncOptions::default(), &module_cwd());
        assert!(config.is_ok(), "Failed to build default config");
        let Ok(config) = config else {
            return;
        };

        assert_eq!(
            config.output_path(),
            Path::new("/srv/site/modules/widget/frontend/dist")
        );
        assert_eq!(
            config.manifest_file(),
            Path::new("/srv/site/modules/widget/widget.libraries.yml")
        );
        assert_eq!(config.module_token(), "widget");
        assert_eq!(config.hash_delimiter(), "widget");
        assert_eq!(config.asset_prefix(), "dist");
        assert!(config.library().is_none());
        assert!(config.css_group().is_none());
    }

    #[test]
    fn test_hash_delimiter_separate_from_module_token() {
        let options = SyncOptions {
            module_token: Some("widget".to_string()),
            hash_delimiter: Some(".".to_string()),
            ..Default::default()
        };
        let config = SyncConfig::from_options(&options, &module_cwd());
        assert!(config.is_ok_and(|c| c.module_token() == "widget" && c.hash_delimiter() == "."));
    }

    #[test]
    fn test_explicit_paths_resolve_against_cwd() {
        let options = SyncOptions {
            output_path: Some("build/assets/".to_string()),
            manifest_file: Some("../custom.libraries.yml".to_string()),
            ..Default::default()
        };
        let Ok(config) = SyncConfig::from_options(&options, &module_cwd()) else {
            panic!("config should resolve");
        };
        assert_eq!(
            config.output_path(),
            Path::new("/srv/site/modules/widget/frontend/build/assets/")
        );
        assert_eq!(
            config.manifest_file(),
            Path::new("/srv/site/modules/widget/frontend/../custom.libraries.yml")
        );
        assert_eq!(config.asset_prefix(), "build/assets");
    }

    #[test]
    fn test_empty_values_rejected() {
        for options in [
            SyncOptions {
                output_path: Some(String::new()),
                ..Default::default()
            },
            SyncOptions {
                module_token: Some("  ".to_string()),
                ..Default::default()
            },
            SyncOptions {
                library: Some(String::new()),
                ..Default::default()
            },
        ] {
            let result = SyncConfig::from_options(&options, &module_cwd());
            assert!(matches!(result, Err(ConfigError::EmptyValue(_))));
        }
    }

    #[test]
    fn test_root_cwd_needs_explicit_values() {
        let result = SyncConfig::from_options(&SyncOptions::default(), Path::new("/"));
        assert!(matches!(result, Err(ConfigError::NoParentName { .. })));

        let options = SyncOptions {
            manifest_file: Some("site.libraries.yml".to_string()),
            module_token: Some("site".to_string()),
            ..Default::default()
        };
        assert!(SyncConfig::from_options(&options, Path::new("/")).is_ok());
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("dist/"), "dist");
        assert_eq!(normalize_prefix("build\\js"), "build/js");
        assert_eq!(normalize_prefix("/"), "/");
        assert_eq!(normalize_prefix("/var/www/dist//"), "/var/www/dist");
    }
}
