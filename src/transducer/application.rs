//! Cascading rule application.
//!
//! The transducer walks its input left to right. At each cursor position it
//! tries the rules in file order and fires the first one whose pattern is an
//! exact prefix of the remaining input; the replacement goes to the output
//! and the cursor jumps past the matched text. When no rule matches, the
//! single character at the cursor is copied literally. Every step consumes
//! at least one character, so application terminates on every input.

use super::types::RuleSet;

impl RuleSet {
    /// Apply the rules to `text`, left to right, first match wins.
    ///
    /// Match order is determined by rule list order, not by pattern length:
    /// a shorter rule earlier in the list wins over a longer rule later in
    /// the list even where both would match. This is different from applying
    /// each rule globally in turn:
    ///
    /// ```
    /// use orthophon::transducer::{Rule, RuleSet};
    ///
    /// let set = RuleSet::new("demo", vec![
    ///     Rule::new("qq", "a"),
    ///     Rule::new("aq", "b"),
    /// ]);
    /// assert_eq!(set.apply("qaqqqqq"), "qbaa");
    /// ```
    pub fn apply(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut rest = text;
        'cursor: while !rest.is_empty() {
            for rule in self.rules() {
                if rest.starts_with(&rule.pattern) {
                    output.push_str(&rule.replacement);
                    rest = &rest[rule.pattern.len()..];
                    continue 'cursor;
                }
            }
            // no rule matched here: copy one character literally
            if let Some(ch) = rest.chars().next() {
                output.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
        output
    }
}
