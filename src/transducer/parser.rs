//! Rule-file parsing.

use std::io;
use std::path::Path;

use thiserror::Error;

use super::types::{Rule, RuleSet};

/// Errors raised while loading a rewrite-rule file.
///
/// Any of these is fatal for the rule set being loaded: a source depending
/// on the file cannot be transduced until the file is fixed.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The line uses context groups or directives, which belong to a richer
    /// profile syntax this crate does not support.
    #[error("{file}:{line}: context groups and directives are not supported")]
    UnsupportedSyntax {
        /// Rule file name.
        file: String,
        /// One-based line number.
        line: usize,
    },

    /// The line did not split into exactly one pattern and one replacement.
    #[error("{file}:{line}: expected `pattern<TAB>replacement`")]
    MalformedRule {
        /// Rule file name.
        file: String,
        /// One-based line number.
        line: usize,
    },

    /// The rule's pattern is empty, which would stall the rewrite cursor.
    #[error("{file}:{line}: rule pattern is empty")]
    EmptyPattern {
        /// Rule file name.
        file: String,
        /// One-based line number.
        line: usize,
    },

    /// The rule file could not be read.
    #[error("failed to read rule file {file}")]
    Read {
        /// Rule file name.
        file: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A specialized `Result` type for rule-file loading.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Parse rule-file text into a [`RuleSet`].
///
/// One rule per line, `pattern<TAB>replacement`. `//` begins a trailing
/// comment; lines blank after comment stripping are skipped. Pattern and
/// replacement are taken verbatim - leading and trailing spaces are
/// significant.
pub fn parse_rules(name: &str, text: &str) -> Result<RuleSet> {
    let mut rules = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.strip_suffix('\r').unwrap_or(raw);
        let content = match content.find("//") {
            Some(at) => &content[..at],
            None => content,
        };
        if content.trim().is_empty() {
            continue;
        }
        if content.contains('[') || content.contains("#def") {
            return Err(ConfigurationError::UnsupportedSyntax {
                file: name.to_string(),
                line,
            });
        }
        let mut fields = content.split('\t');
        let (pattern, replacement) = match (fields.next(), fields.next(), fields.next()) {
            (Some(pattern), Some(replacement), None) => (pattern, replacement),
            _ => {
                return Err(ConfigurationError::MalformedRule {
                    file: name.to_string(),
                    line,
                })
            }
        };
        if pattern.is_empty() {
            return Err(ConfigurationError::EmptyPattern {
                file: name.to_string(),
                line,
            });
        }
        rules.push(Rule::new(pattern, replacement));
    }
    Ok(RuleSet::new(name, rules))
}

/// Read and parse a rule file from disk.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    let name = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
        file: name.clone(),
        source,
    })?;
    parse_rules(&name, &text)
}
