//! Rewrite-rule types.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A single literal rewrite rule.
///
/// Both sides are plain strings with no wildcard or context syntax. The
/// pattern is never empty (enforced at parse time); the replacement may be
/// empty, which deletes the matched text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Rule {
    /// Literal text matched against the remaining input.
    pub pattern: String,
    /// Literal text emitted in place of the pattern.
    pub replacement: String,
}

impl Rule {
    /// Create a rule from a pattern/replacement pair.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.pattern, self.replacement)
    }
}

/// An ordered rewrite-rule set parsed from one rule file.
///
/// Rule order is significant: [`RuleSet::apply`] tries rules in this order
/// and the first match wins, regardless of pattern length. A rule set is
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    name: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set from already-parsed rules.
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// The rule file this set was parsed from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rules, in file order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set contains no rules.
    ///
    /// An empty set is a valid transducer: it copies its input unchanged.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

/// An ordered chain of rule sets applied in sequence.
///
/// Sources reference their orthographic profile as a list of rule files;
/// each stage consumes the previous stage's output. An empty chain is legal
/// and distinct from a source having no profile at all: the empty chain
/// means "the value is already phonetic, rewrite nothing", while a missing
/// profile means a phonetic form must be supplied explicitly.
#[derive(Debug, Clone, Default)]
pub struct TranscriptionProfile {
    stages: Vec<Arc<RuleSet>>,
}

impl TranscriptionProfile {
    /// Build a profile from its ordered stages.
    pub fn new(stages: Vec<Arc<RuleSet>>) -> Self {
        Self { stages }
    }

    /// The chained rule sets, in application order.
    pub fn stages(&self) -> &[Arc<RuleSet>] {
        &self.stages
    }

    /// Run the full chain over the input.
    pub fn apply(&self, text: &str) -> String {
        self.stages
            .iter()
            .fold(text.to_string(), |acc, stage| stage.apply(&acc))
    }
}

impl fmt::Display for TranscriptionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_rules_in_order() {
        let set = RuleSet::new(
            "t.rules",
            vec![Rule::new("qq", "a"), Rule::new("aq", "b")],
        );
        assert_eq!(set.to_string(), "qq → a / aq → b");
    }

    #[test]
    fn empty_profile_is_identity() {
        let profile = TranscriptionProfile::default();
        assert_eq!(profile.apply("ˈtɛst"), "ˈtɛst");
    }

    #[test]
    fn chain_applies_stages_in_order() {
        let first = Arc::new(RuleSet::new("1", vec![Rule::new("a", "b")]));
        let second = Arc::new(RuleSet::new("2", vec![Rule::new("b", "c")]));
        let profile = TranscriptionProfile::new(vec![first, second]);
        // "a" becomes "b" in stage one, then "c" in stage two.
        assert_eq!(profile.apply("a"), "c");
    }
}
