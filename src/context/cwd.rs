//! Current working directory tracking.
//!
//! The shell never calls `std::env::set_current_dir`. The working directory
//! lives here as explicit state, is updated by the `cd` built-in, and is
//! handed to every child process.

use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentDir {
    path: PathBuf,
    previous: Option<PathBuf>,
    home: Option<PathBuf>,
}

impl CurrentDir {
    pub fn new(path: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            previous: None,
            home,
        }
    }

    /// Capture the working directory and home directory of the process.
    pub fn capture() -> Option<Self> {
        let path = env::current_dir().ok()?;
        let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        Some(Self::new(path, home))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn previous(&self) -> Option<&Path> {
        self.previous.as_deref()
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Move to `new_path`, remembering where we came from for `cd -`.
    pub fn update(&mut self, new_path: PathBuf) {
        let old = std::mem::replace(&mut self.path, new_path);
        if old != self.path {
            self.previous = Some(old);
        }
    }

    /// Expand `~` against the home directory and anchor relative paths at
    /// the tracked directory. Nothing is checked against the filesystem.
    pub fn resolve(&self, target: &str) -> PathBuf {
        let home = || self.home.as_deref().and_then(Path::to_str);
        let expanded = shellexpand::tilde_with_context(target, home);
        let expanded = Path::new(&*expanded);
        if expanded.is_absolute() {
            expanded.to_path_buf()
        } else {
            self.path.join(expanded)
        }
    }

    /// Path for the prompt: `~` for home, `~/rest` below it.
    pub fn display(&self) -> Cow<'_, str> {
        if let Some(home) = self.home.as_deref() {
            if self.path == home {
                return Cow::Borrowed("~");
            }
            if let Ok(rest) = self.path.strip_prefix(home) {
                return Cow::Owned(format!("~/{}", rest.display()));
            }
        }
        self.path.to_string_lossy()
    }
}
