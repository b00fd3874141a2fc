//! Comparison-domain normalization.
//!
//! Recorded forms are compared against derived forms modulo two orthographic
//! conventions: optional material in parentheses ([`expand_brackets`]) and
//! prosodic stress marks ([`StressPolicy`]). Both transforms exist only to
//! decide equivalence - stored values are never rewritten through them.

pub mod brackets;
pub mod stress;

pub use brackets::{expand_brackets, JOINER};
pub use stress::{StressPolicy, STRESS_MARKS};
