//! Command-line flags. They override the config file for a single run.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::security::UnavailablePolicy;

#[derive(Parser, Debug, Default)]
#[command(
    name = "kaelic-shell",
    version,
    about = "Interactive shell that asks a local model to review every command before it runs"
)]
pub struct Cli {
    /// Config file (default: <config dir>/kaelic-shell/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run commands without the advisory review
    #[arg(long)]
    pub no_review: bool,

    /// Refuse to run commands when the advisory service cannot answer
    #[arg(long)]
    pub fail_closed: bool,

    /// Model name sent to the advisory service
    #[arg(long)]
    pub model: Option<String>,

    /// Advisory endpoint, e.g. http://localhost:11434/api/generate
    #[arg(long, value_name = "URL")]
    pub advisory_url: Option<String>,

    /// Advisory timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Directory for log files
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Apply flag overrides on top of a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if self.no_review {
            config.advisory.enabled = false;
        }
        if self.fail_closed {
            config.advisory.on_unavailable = UnavailablePolicy::Block;
        }
        if let Some(model) = &self.model {
            config.advisory.model = model.clone();
        }
        if let Some(url) = &self.advisory_url {
            config.advisory.url = url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.advisory.timeout_ms = timeout_ms;
        }
    }
}
