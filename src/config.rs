//! Shell configuration.
//!
//! Loaded once at startup from a TOML file; every field has a default so a
//! missing file, or a partial one, is fine.
//!
//! ```toml
//! [advisory]
//! enabled = true
//! url = "http://localhost:11434/api/generate"
//! model = "phi3:mini"
//! timeout_ms = 3000
//! on_unavailable = "allow"   # or "block"
//!
//! [shell]
//! identity = "architect@kael-os"
//! history_file = "~/.kaelic_shell_history"
//!
//! [aliases]
//! update = "paru"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::security::UnavailablePolicy;
use crate::shell::{AliasTable, DEFAULT_INTERPRETER};

pub const DEFAULT_ADVISORY_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "phi3:mini";
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub advisory: AdvisoryConfig,
    pub shell: ShellConfig,
    /// First-token substitutions. `None` means the built-in defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    pub enabled: bool,
    pub url: String,
    pub model: String,
    pub timeout_ms: u64,
    pub on_unavailable: UnavailablePolicy,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_ADVISORY_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            on_unavailable: UnavailablePolicy::Allow,
        }
    }
}

impl AdvisoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Shown before the path in the prompt.
    pub identity: String,
    pub history_file: String,
    /// Words offered when completing the first token.
    pub completions: Vec<String>,
    pub interpreter: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            identity: "architect@kael-os".to_string(),
            history_file: "~/.kaelic_shell_history".to_string(),
            completions: ["ls", "cd", "pwd", "paru", "git", "docker", "systemctl", "journalctl"]
                .into_iter()
                .map(String::from)
                .collect(),
            interpreter: DEFAULT_INTERPRETER.to_string(),
        }
    }
}

impl ShellConfig {
    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.history_file).into_owned())
    }
}

impl Config {
    /// Default location: `<config dir>/kaelic-shell/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "kaelic-shell")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from an explicit path, or from the default location if present.
    ///
    /// A missing default file yields defaults; a missing explicit file is an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn alias_table(&self) -> AliasTable {
        match &self.aliases {
            Some(aliases) => aliases.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect(),
            None => AliasTable::with_defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.advisory.enabled);
        assert_eq!(config.advisory.url, "http://localhost:11434/api/generate");
        assert_eq!(config.advisory.model, "phi3:mini");
        assert_eq!(config.advisory.timeout(), Duration::from_secs(3));
        assert_eq!(config.advisory.on_unavailable, UnavailablePolicy::Allow);
        assert_eq!(config.alias_table(), AliasTable::with_defaults());
        assert_eq!(config.shell.interpreter, "/bin/sh");
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml(
            r#"
            [advisory]
            model = "llama3"
            on_unavailable = "block"
            "#,
        )
        .unwrap();

        assert_eq!(config.advisory.model, "llama3");
        assert_eq!(config.advisory.on_unavailable, UnavailablePolicy::Block);
        assert_eq!(config.advisory.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.shell, ShellConfig::default());
    }

    #[test]
    fn test_aliases_replace_defaults() {
        let config = Config::from_toml(
            r#"
            [aliases]
            ll = "ls -l"
            "#,
        )
        .unwrap();

        let aliases = config.alias_table();
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases.normalize("ll /tmp"), "ls -l /tmp");
        assert_eq!(aliases.normalize("update"), "update");
    }

    #[test]
    fn test_empty_alias_table_disables_aliases() {
        let config = Config::from_toml("[aliases]\n").unwrap();
        assert!(config.alias_table().is_empty());
    }

    #[test]
    fn test_rejects_bad_policy() {
        assert!(Config::from_toml("[advisory]\non_unavailable = \"maybe\"\n").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[advisory]\nenabled = false\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.advisory.enabled);

        let missing = dir.path().join("missing.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_history_path_absolute() {
        let shell = ShellConfig {
            history_file: "/tmp/history".to_string(),
            ..ShellConfig::default()
        };
        assert_eq!(shell.history_path(), PathBuf::from("/tmp/history"));
    }
}
