//! Site configuration.
//!
//! A single optional `config.toml` at the content root, loaded over stock
//! defaults. Config files are sparse — override just the values you want —
//! and unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! mode = "serve"                      # "build" rebuilds the manifest, "serve" only reads it
//! base_url = ""                       # Absolute site URL used for asset-path rewriting
//! templates_dir = "snippet-templates" # Template directory under the content root
//! manifest_file = "snippets.json"     # Manifest filename under the content root
//! ```
//!
//! The `mode` value is the environment signal: only build mode scans the
//! template directory and rewrites the manifest; every other mode consumes
//! the persisted manifest as-is, with no rebuild-on-change. The CLI can
//! override the file's mode per invocation.
//!
//! Components never read ambient globals — the loaded [`SiteConfig`] is
//! injected explicitly into the scanner, the registry, and the styleguide
//! renderer.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build-vs-serve environment switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Rescan the template directory and rewrite the manifest before use.
    Build,
    /// Consume the persisted manifest as-is; never rebuild.
    #[default]
    Serve,
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Environment mode; the CLI `--mode` flag overrides this.
    pub mode: Mode,
    /// Absolute site URL prefixed onto rewritten asset paths.
    pub base_url: String,
    /// Template directory name under the content root.
    pub templates_dir: String,
    /// Manifest filename under the content root.
    pub manifest_file: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Serve,
            base_url: String::new(),
            templates_dir: "snippet-templates".to_string(),
            manifest_file: "snippets.json".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.templates_dir.is_empty() {
            return Err(ConfigError::Validation(
                "templates_dir must not be empty".into(),
            ));
        }
        if self.manifest_file.is_empty() {
            return Err(ConfigError::Validation(
                "manifest_file must not be empty".into(),
            ));
        }
        if self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_url must not end with '/' (it is joined with /wp-content/...)".into(),
            ));
        }
        Ok(())
    }

    /// Template directory under the content root.
    pub fn templates_path(&self, content_root: &Path) -> PathBuf {
        content_root.join(&self.templates_dir)
    }

    /// Manifest path under the content root. Writers and readers must agree
    /// on this exact path; both derive it from here.
    pub fn manifest_path(&self, content_root: &Path) -> PathBuf {
        content_root.join(&self.manifest_file)
    }
}

/// Load `config.toml` from the content root, or defaults when absent.
pub fn load_config(content_root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = content_root.join("config.toml");
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_toml() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.mode, Mode::Serve);
        assert_eq!(config.templates_dir, "snippet-templates");
        assert_eq!(config.manifest_file, "snippets.json");
        assert!(config.base_url.is_empty());
    }

    #[test]
    fn sparse_override_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "base_url = \"https://site.test\"\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.base_url, "https://site.test");
        assert_eq!(config.templates_dir, "snippet-templates");
    }

    #[test]
    fn mode_parses_lowercase() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "mode = \"build\"\n").unwrap();
        assert_eq!(load_config(tmp.path()).unwrap().mode, Mode::Build);
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "base_urll = \"typo\"\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn trailing_slash_base_url_rejected() {
        let config = SiteConfig {
            base_url: "https://site.test/".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn empty_templates_dir_rejected() {
        let config = SiteConfig {
            templates_dir: String::new(),
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn paths_join_content_root() {
        let config = SiteConfig::default();
        let root = Path::new("/srv/site");
        assert_eq!(
            config.templates_path(root),
            Path::new("/srv/site/snippet-templates")
        );
        assert_eq!(
            config.manifest_path(root),
            Path::new("/srv/site/snippets.json")
        );
    }
}
