//! Commands the shell interprets itself instead of handing to `sh`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::context::CurrentDir;

/// A recognised built-in, borrowed from the normalized command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin<'a> {
    /// `cd [path]`; `None` means home.
    Cd(Option<&'a str>),
    Exit,
}

#[derive(Debug, Error)]
pub enum BuiltinError {
    #[error("cd: {}: No such file or directory", .0.display())]
    NotFound(PathBuf),
    #[error("cd: {}: Not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("cd: HOME not set")]
    NoHome,
    #[error("cd: OLDPWD not set")]
    NoPrevious,
    #[error("cd: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl<'a> Builtin<'a> {
    /// Recognise a built-in from the first token of a normalized command.
    pub fn parse(command: &'a str) -> Option<Self> {
        let command = command.trim();
        let (head, rest) = match command.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (command, ""),
        };

        match head {
            "cd" => Some(Self::Cd((!rest.is_empty()).then_some(rest))),
            _ if head.eq_ignore_ascii_case("exit") && rest.is_empty() => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run `cd` against the tracked directory.
///
/// On failure `cwd` is left untouched.
pub fn change_directory(cwd: &mut CurrentDir, target: Option<&str>) -> Result<PathBuf, BuiltinError> {
    let requested = match target {
        None => cwd.home().map(PathBuf::from).ok_or(BuiltinError::NoHome)?,
        Some("-") => cwd
            .previous()
            .map(PathBuf::from)
            .ok_or(BuiltinError::NoPrevious)?,
        Some(target) => cwd.resolve(target),
    };

    let resolved = std::fs::canonicalize(&requested).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => BuiltinError::NotFound(requested.clone()),
        _ => BuiltinError::Io {
            path: requested.clone(),
            source,
        },
    })?;
    if !resolved.is_dir() {
        return Err(BuiltinError::NotADirectory(requested));
    }

    cwd.update(resolved.clone());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse() {
        assert_eq!(Builtin::parse("cd"), Some(Builtin::Cd(None)));
        assert_eq!(Builtin::parse("cd /tmp"), Some(Builtin::Cd(Some("/tmp"))));
        assert_eq!(Builtin::parse("cd My Documents"), Some(Builtin::Cd(Some("My Documents"))));
        assert_eq!(Builtin::parse("exit"), Some(Builtin::Exit));
        assert_eq!(Builtin::parse("EXIT"), Some(Builtin::Exit));
        assert_eq!(Builtin::parse("exit 1"), None);
        assert_eq!(Builtin::parse("cdrecord"), None);
        assert_eq!(Builtin::parse("echo cd"), None);
        assert_eq!(Builtin::parse(""), None);
    }

    fn fixture() -> (tempfile::TempDir, CurrentDir) {
        let home = tempfile::tempdir().unwrap();
        let home_path = home.path().canonicalize().unwrap();
        std::fs::create_dir(home_path.join("projects")).unwrap();
        std::fs::write(home_path.join("notes.txt"), "x").unwrap();
        let cwd = CurrentDir::new(home_path.clone(), Some(home_path));
        (home, cwd)
    }

    #[test]
    fn test_cd_home_relative() {
        let (_home, mut cwd) = fixture();
        let home = cwd.home().unwrap().to_path_buf();

        let moved = change_directory(&mut cwd, Some("~/projects")).unwrap();
        assert_eq!(moved, home.join("projects"));
        assert_eq!(cwd.path(), home.join("projects"));

        change_directory(&mut cwd, None).unwrap();
        assert_eq!(cwd.path(), home);
    }

    #[test]
    fn test_cd_relative_and_parent() {
        let (_home, mut cwd) = fixture();
        let home = cwd.home().unwrap().to_path_buf();

        change_directory(&mut cwd, Some("projects")).unwrap();
        assert_eq!(cwd.path(), home.join("projects"));

        change_directory(&mut cwd, Some("..")).unwrap();
        assert_eq!(cwd.path(), home);
    }

    #[test]
    fn test_cd_missing_leaves_cwd_unchanged() {
        let (_home, mut cwd) = fixture();
        let before = cwd.clone();

        let err = change_directory(&mut cwd, Some("/does/not/exist")).unwrap_err();
        assert!(matches!(err, BuiltinError::NotFound(ref p) if p == Path::new("/does/not/exist")));
        assert!(err.to_string().contains("No such file or directory"));
        assert_eq!(cwd, before);
    }

    #[test]
    fn test_cd_into_file() {
        let (_home, mut cwd) = fixture();
        let before = cwd.clone();

        let err = change_directory(&mut cwd, Some("notes.txt")).unwrap_err();
        assert!(matches!(err, BuiltinError::NotADirectory(_)));
        assert_eq!(cwd, before);
    }

    #[test]
    fn test_cd_dash_returns_to_previous() {
        let (_home, mut cwd) = fixture();
        let home = cwd.home().unwrap().to_path_buf();

        assert!(matches!(
            change_directory(&mut cwd, Some("-")),
            Err(BuiltinError::NoPrevious)
        ));

        change_directory(&mut cwd, Some("projects")).unwrap();
        change_directory(&mut cwd, Some("-")).unwrap();
        assert_eq!(cwd.path(), home);
    }

    #[test]
    fn test_cd_without_home() {
        let mut cwd = CurrentDir::new("/", None);
        assert!(matches!(change_directory(&mut cwd, None), Err(BuiltinError::NoHome)));
    }
}
