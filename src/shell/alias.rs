//! First-token alias expansion.
//!
//! The normalizer is deliberately not a shell parser: a line is split on
//! whitespace, the first token is looked up in the alias table, and the
//! tokens are joined back with single spaces. The resulting string is the
//! one that gets reviewed and, if approved, executed.

use std::collections::HashMap;

/// Static mapping from a literal first token to its replacement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    /// Aliases the shell ships with when the config file has none.
    pub fn with_defaults() -> Self {
        [
            ("update", "paru"),
            ("yay", "paru"),
            ("ls", "ls --color=auto"),
            ("grep", "grep --color=auto"),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, replacement: impl Into<String>) {
        self.aliases.insert(name.into(), replacement.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Expand the first token of `line` and collapse whitespace.
    ///
    /// Returns an empty string for empty or all-whitespace input; callers
    /// treat that as "no command".
    pub fn normalize(&self, line: &str) -> String {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return String::new();
        };

        let mut parts: Vec<&str> = Vec::new();
        match self.get(first) {
            // A replacement may itself carry several tokens.
            Some(replacement) => parts.extend(replacement.split_whitespace()),
            None => parts.push(first),
        }
        parts.extend(tokens);
        parts.join(" ")
    }
}

impl<K, V> FromIterator<(K, V)> for AliasTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, replacement) in iter {
            table.insert(name, replacement);
        }
        table
    }
}
