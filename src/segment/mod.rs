//! Phonetic segments, inventories, and tokenization.
//!
//! A phonetic form is tokenized into [`Segment`]s against an injected
//! [`Inventory`] of known graphemes. Tokenization is longest-match and
//! total: every character of the input ends up in exactly one segment, with
//! single-character unknown segments as the fallback, so diagnostics can
//! point at the exact offending substring.

pub mod inventory;
pub mod tokenizer;

pub use inventory::{Inventory, SymbolInventory};
pub use tokenizer::{longest_match, tokenize_strict, SegmentError};

use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A tokenized phonetic unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Segment {
    /// A grapheme present in the inventory.
    Known(String),
    /// A grapheme absent from the inventory, kept verbatim for diagnostics.
    Unknown(String),
}

impl Segment {
    /// The segment's text.
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Known(s) | Segment::Unknown(s) => s,
        }
    }

    /// Whether the inventory recognizes this segment.
    pub fn is_known(&self) -> bool {
        matches!(self, Segment::Known(_))
    }

    /// Consume the segment, returning its text.
    pub fn into_string(self) -> String {
        match self {
            Segment::Known(s) | Segment::Unknown(s) => s,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Morpheme-boundary markers collapsed by [`clean_segments`].
pub const BOUNDARY_MARKS: &[&str] = &["_", "#", "◦", "+", "→", "←"];

/// Drop unknown-sound markers and collapse morpheme boundaries.
///
/// Removes empty tokens and `"0"` markers, strips boundary markers from both
/// ends, and collapses each internal run of boundary markers down to the
/// run's last marker. Used to tidy segmentations before they are handed to
/// downstream alignment tooling, which cannot represent empty morphemes.
pub fn clean_segments<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    let is_boundary = |s: &str| BOUNDARY_MARKS.contains(&s);
    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() || segment == "0" {
            continue;
        }
        if is_boundary(segment) {
            match out.last() {
                // leading boundary
                None => continue,
                // run of boundaries: the later marker survives
                Some(last) if is_boundary(last) => {
                    out.pop();
                }
                Some(_) => {}
            }
        }
        out.push(segment.to_string());
    }
    while out.last().is_some_and(|s| is_boundary(s)) {
        out.pop();
    }
    out
}
