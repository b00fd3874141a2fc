//! Phonetic inventory abstractions for pluggable grapheme sets.

use std::collections::HashSet;
use std::hash::BuildHasher;

use rustc_hash::FxHashSet;

use super::tokenizer;
use super::Segment;

/// Membership and tokenization capability over a fixed phonetic inventory.
///
/// The inventory decides which graphemes count as known segments. The
/// default [`tokenize`](Inventory::tokenize) consumes the whole input with
/// longest-match semantics; implementations may override it to normalize
/// their input first.
pub trait Inventory {
    /// Whether the inventory recognizes this grapheme.
    fn contains(&self, grapheme: &str) -> bool;

    /// Tokenize a form into the longest matching graphemes.
    fn tokenize(&self, form: &str) -> Vec<Segment> {
        tokenizer::longest_match(self, form)
    }
}

impl<T: Inventory + ?Sized> Inventory for &T {
    fn contains(&self, grapheme: &str) -> bool {
        (**self).contains(grapheme)
    }

    fn tokenize(&self, form: &str) -> Vec<Segment> {
        (**self).tokenize(form)
    }
}

impl<S: BuildHasher> Inventory for HashSet<String, S> {
    fn contains(&self, grapheme: &str) -> bool {
        HashSet::contains(self, grapheme)
    }
}

/// A set-backed inventory with an ordered alias table.
///
/// Aliases are plain substring replacements applied before tokenization, in
/// table order, to canonicalize look-alike glyphs: length marks written as
/// colons, precomposed accented vowels, alternative glottal-stop letters and
/// the like. The replacement side of an alias should itself tokenize
/// cleanly.
#[derive(Debug, Clone, Default)]
pub struct SymbolInventory {
    symbols: FxHashSet<String>,
    aliases: Vec<(String, String)>,
}

impl SymbolInventory {
    /// Build an inventory from its known graphemes.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            aliases: Vec::new(),
        }
    }

    /// Attach an ordered alias table.
    pub fn with_aliases<I, A, B>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        self.aliases = aliases
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .collect();
        self
    }

    /// Add one grapheme to the inventory.
    pub fn insert(&mut self, symbol: impl Into<String>) {
        self.symbols.insert(symbol.into());
    }

    /// Apply the alias table to a form.
    pub fn canonicalize(&self, form: &str) -> String {
        let mut out = form.to_string();
        for (from, to) in &self.aliases {
            out = out.replace(from.as_str(), to);
        }
        out
    }

    /// Number of known graphemes.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Inventory for SymbolInventory {
    fn contains(&self, grapheme: &str) -> bool {
        self.symbols.contains(grapheme)
    }

    /// Canonicalizes through the alias table, then longest-match tokenizes.
    fn tokenize(&self, form: &str) -> Vec<Segment> {
        let canonical = self.canonicalize(form);
        tokenizer::longest_match(self, &canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_apply_in_order_before_tokenization() {
        let inventory = SymbolInventory::new(["b", "aː"])
            .with_aliases([(":", "ː"), ("ä", "a")]);
        let segments = inventory.tokenize("ba:");
        assert_eq!(segments, vec![
            Segment::Known("b".into()),
            Segment::Known("aː".into()),
        ]);
    }

    #[test]
    fn hashset_can_serve_as_inventory() {
        let set: HashSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();
        assert!(set.tokenize("ab").iter().all(Segment::is_known));
    }
}
