//! # orthophon
//!
//! Orthography-to-phonetic normalization and consistency checking for
//! lexical word lists.
//!
//! Raw word-list entries arrive as source-specific orthography. This crate
//! rewrites them into phonetic transcriptions via cascading rewrite-rule
//! transducers, reconciles them with previously recorded forms (resolving
//! optional bracket groups and stress-mark differences), validates their
//! segmentation against a fixed phonetic inventory, and reports every
//! inconsistency through an injected diagnostic sink. A general affine-gap
//! pairwise alignment primitive is provided alongside for comparing symbol
//! sequences.
//!
//! ## Example
//!
//! ```rust,ignore
//! use orthophon::prelude::*;
//!
//! let mut profiles = MemoryProfiles::new();
//! profiles.set_rules("latin.rules", "c\tk\nqu\tkw\n");
//! profiles.set_profile("smith1968", ["latin.rules"]);
//!
//! let inventory = SymbolInventory::new(["a", "e", "k", "w", "kw"]);
//! let mut warnings: Vec<String> = Vec::new();
//!
//! let mut checker = ConsistencyChecker::new(
//!     profiles, inventory, &mut warnings, FixedDecision(false),
//! );
//! let output = checker.check_all(&records)?;
//! ```
//!
//! ## Modules
//!
//! - [`transducer`] - rewrite-rule files and first-match-wins cascading
//! - [`normalize`] - bracket-variant expansion and stress normalization
//! - [`segment`] - phonetic inventories and longest-match tokenization
//! - [`alignment`] - affine-gap pairwise sequence alignment
//! - [`checker`] - run-grouped consistency checking and override policy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alignment;
pub mod checker;
pub mod normalize;
pub mod segment;
pub mod transducer;

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::alignment::{
        align, align_chars, Alignment, AlignmentMode, AlignmentParams, GapModel,
    };
    pub use crate::checker::{
        ConsistencyChecker, DecisionProvider, DiagnosticSink, DirectoryProfiles, FixedDecision,
        MemoryProfiles, OverrideMode, ProfileSource, Record, RecordId, RecordTable,
        TranscriptionCatalog, WriterSink,
    };
    pub use crate::normalize::{expand_brackets, StressPolicy};
    pub use crate::segment::{clean_segments, Inventory, Segment, SymbolInventory};
    pub use crate::transducer::{
        parse_rules, ConfigurationError, Rule, RuleSet, TranscriptionProfile,
    };
}
