//! Rewrite-rule transducers for orthography-to-phonetic conversion.
//!
//! A source's orthography is described by one or more plain-text rule files.
//! Each file parses into an ordered [`RuleSet`] of literal
//! pattern/replacement pairs; a source's [`TranscriptionProfile`] chains one
//! or more rule sets, applied in sequence.
//!
//! # Rule Application Order
//!
//! Application is *cascading* and *first-match-wins*: at every cursor
//! position the rules are tried in file order, and the first rule whose
//! pattern is an exact prefix of the remaining input fires. Rule order
//! matters more than pattern length - a short rule early in the file shades
//! a longer rule later in the file. See [`RuleSet::apply`] for the worked
//! example.
//!
//! # Rule File Format
//!
//! One rule per line, `pattern<TAB>replacement`. `//` begins a trailing
//! comment; blank lines are skipped. Context groups (`[`) and directives
//! (`#def`) belong to a richer profile syntax this crate does not support
//! and fail the whole file with [`ConfigurationError::UnsupportedSyntax`].

pub mod application;
pub mod parser;
pub mod types;

pub use parser::{load_rules, parse_rules, ConfigurationError, Result};
pub use types::{Rule, RuleSet, TranscriptionProfile};
