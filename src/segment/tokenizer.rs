//! Longest-match tokenization.

use smallvec::SmallVec;
use thiserror::Error;

use super::{Inventory, Segment};

/// Errors raised by strict tokenization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// The input contains a grapheme absent from the inventory.
    #[error("\"{0}\" is not a recognized phonetic segment")]
    UnknownSegment(String),
}

/// Tokenize a form into the longest graphemes the inventory recognizes.
///
/// At each position, the longest remaining slice recognized by the
/// inventory becomes the next segment; the window shrinks one character at a
/// time until something matches. When not even the single character at the
/// position is known, that character becomes an [`Segment::Unknown`] and the
/// scan continues behind it. The whole input is always consumed, so the
/// concatenation of the produced segments reproduces the input exactly.
pub fn longest_match<I: Inventory + ?Sized>(inventory: &I, form: &str) -> Vec<Segment> {
    // byte offsets of every char boundary, end offset included
    let bounds: SmallVec<[usize; 32]> = form
        .char_indices()
        .map(|(at, _)| at)
        .chain(std::iter::once(form.len()))
        .collect();
    let chars = bounds.len() - 1;

    let mut segments = Vec::new();
    let mut start = 0;
    while start < chars {
        let matched = (start + 1..=chars).rev().find_map(|end| {
            let slice = &form[bounds[start]..bounds[end]];
            inventory.contains(slice).then_some((slice, end))
        });
        match matched {
            Some((slice, end)) => {
                segments.push(Segment::Known(slice.to_string()));
                start = end;
            }
            None => {
                let single = &form[bounds[start]..bounds[start + 1]];
                segments.push(Segment::Unknown(single.to_string()));
                start += 1;
            }
        }
    }
    segments
}

/// Longest-match tokenization that fails on the first unknown grapheme.
pub fn tokenize_strict<I: Inventory + ?Sized>(
    inventory: &I,
    form: &str,
) -> Result<Vec<Segment>, SegmentError> {
    let segments = longest_match(inventory, form);
    if let Some(unknown) = segments.iter().find(|segment| !segment.is_known()) {
        return Err(SegmentError::UnknownSegment(unknown.as_str().to_string()));
    }
    Ok(segments)
}
