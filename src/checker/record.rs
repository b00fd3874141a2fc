//! Word-list records and the table capability they live in.

use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Placeholder marking a value the source does not attest.
pub const PLACEHOLDER_VALUE: &str = "-";

/// A record identifier, numeric or textual.
///
/// Word lists mix plain counters with composite textual ids. The variant is
/// resolved once, when the raw identifier is parsed, so downstream code
/// never inspects the spelling again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum RecordId {
    /// A purely numeric identifier.
    Numeric(u64),
    /// Any other identifier spelling.
    Text(String),
}

impl RecordId {
    /// Resolve a raw identifier string into its tagged representation.
    ///
    /// Only spellings that round-trip exactly (non-empty, all ASCII digits,
    /// in range) become [`RecordId::Numeric`]; everything else stays
    /// textual.
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<u64>() {
                // reject spellings with leading zeros: they would not
                // round-trip through Display
                if n.to_string() == raw {
                    return RecordId::Numeric(n);
                }
            }
        }
        RecordId::Text(raw.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Numeric(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Numeric(n)
    }
}

impl From<&str> for RecordId {
    fn from(raw: &str) -> Self {
        RecordId::parse(raw)
    }
}

/// One word-list entry.
///
/// Records are owned by the caller; the checker clones and rewrites fields
/// but never invents or destroys records.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Record {
    /// Identifier of this record.
    pub id: RecordId,
    /// Main source reference, if any.
    pub source: Option<String>,
    /// Orthographic value as given by the source. Empty or
    /// [`PLACEHOLDER_VALUE`] means the entry is not attested.
    pub value: String,
    /// Recorded phonetic form, if any.
    pub form: Option<String>,
    /// Recorded segmentation of the form.
    pub segments: Vec<String>,
}

impl Record {
    /// Create a record with no recorded form or segmentation.
    pub fn new(
        id: impl Into<RecordId>,
        source: Option<&str>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.map(str::to_string),
            value: value.into(),
            form: None,
            segments: Vec::new(),
        }
    }

    /// Attach a recorded phonetic form.
    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }

    /// Attach a recorded segmentation.
    pub fn with_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the source gives no usable value for this record.
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty() || self.value == PLACEHOLDER_VALUE
    }

    /// The recorded form, treating an empty string as absent.
    pub fn given_form(&self) -> Option<&str> {
        self.form.as_deref().filter(|form| !form.is_empty())
    }
}

/// Ordered record storage with bulk replacement.
///
/// The checker reads the records in table order and, when its override mode
/// persists changes, replaces the whole table exactly once after all
/// records have been processed.
pub trait RecordTable {
    /// The records, in table order.
    fn records(&self) -> &[Record];

    /// Replace the table contents with a new ordered list.
    fn replace(&mut self, records: Vec<Record>);
}

impl RecordTable for Vec<Record> {
    fn records(&self) -> &[Record] {
        self
    }

    fn replace(&mut self, records: Vec<Record>) {
        *self = records;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_are_tagged_at_parse_time() {
        assert_eq!(RecordId::parse("42"), RecordId::Numeric(42));
        assert_eq!(RecordId::parse("abui1241-4"), RecordId::Text("abui1241-4".into()));
    }

    #[test]
    fn non_round_tripping_spellings_stay_textual() {
        assert_eq!(RecordId::parse("007"), RecordId::Text("007".into()));
        assert_eq!(RecordId::parse("+7"), RecordId::Text("+7".into()));
        assert_eq!(RecordId::parse(""), RecordId::Text("".into()));
    }

    #[test]
    fn display_round_trips_the_original_spelling() {
        for raw in ["42", "007", "lexeme-9a"] {
            assert_eq!(RecordId::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn placeholder_detection() {
        assert!(Record::new(1u64, None, "").is_placeholder());
        assert!(Record::new(1u64, None, "-").is_placeholder());
        assert!(!Record::new(1u64, None, "balu").is_placeholder());
    }

    #[test]
    fn empty_recorded_form_counts_as_absent() {
        let record = Record::new(1u64, None, "balu").with_form("");
        assert_eq!(record.given_form(), None);
    }

    #[test]
    fn vec_implements_the_table_capability() {
        let mut table: Vec<Record> = vec![Record::new(1u64, None, "a")];
        let replacement = vec![Record::new(2u64, None, "b")];
        table.replace(replacement.clone());
        assert_eq!(table.records(), &replacement[..]);
    }
}
