//! Property-based tests for the rewrite transducer, bracket expansion, and
//! tokenization.
//!
//! These pin the structural guarantees the checker relies on:
//!
//! 1. **Determinism**: identical (text, rules) yield identical output
//! 2. **Totality**: application terminates and consumes the whole input
//! 3. **Identity**: an empty rule set copies its input unchanged
//! 4. **Tokenizer totality**: no characters are dropped or invented

use orthophon::normalize::{expand_brackets, StressPolicy};
use orthophon::segment::{longest_match, Segment, SymbolInventory};
use orthophon::transducer::{parse_rules, Rule, RuleSet};
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-qˈˌ ]{0,24}").unwrap()
}

fn arb_rules() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (
            prop::string::string_regex("[a-q]{1,3}").unwrap(),
            prop::string::string_regex("[a-q]{0,3}").unwrap(),
        ),
        0..6,
    )
}

fn rule_set(rules: &[(String, String)]) -> RuleSet {
    RuleSet::new(
        "prop.rules",
        rules
            .iter()
            .map(|(pattern, replacement)| Rule::new(pattern.clone(), replacement.clone()))
            .collect(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn transduction_is_deterministic(text in arb_text(), rules in arb_rules()) {
        let set = rule_set(&rules);
        prop_assert_eq!(set.apply(&text), set.apply(&text));
    }

    #[test]
    fn empty_rule_set_is_the_identity(text in arb_text()) {
        let set = RuleSet::new("empty.rules", Vec::new());
        prop_assert_eq!(set.apply(&text), text);
    }

    #[test]
    fn non_matching_rules_copy_the_input(text in "[a-f]{0,16}") {
        // patterns drawn from a disjoint alphabet can never fire
        let set = rule_set(&[("xy".to_string(), "z".to_string())]);
        prop_assert_eq!(set.apply(&text), text);
    }

    #[test]
    fn deletion_rules_terminate(text in "[ab]{0,20}") {
        // every "a" is deleted, every "b" copied; output only shrinks
        let set = rule_set(&[("a".to_string(), String::new())]);
        let out = set.apply(&text);
        prop_assert!(out.chars().all(|c| c == 'b'));
    }

    #[test]
    fn round_trip_through_parser(rules in arb_rules()) {
        let text: String = rules
            .iter()
            .map(|(pattern, replacement)| format!("{pattern}\t{replacement}\n"))
            .collect();
        let parsed = parse_rules("prop.rules", &text).unwrap();
        let expected = rule_set(&rules);
        prop_assert_eq!(parsed.rules(), expected.rules());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn bracket_variant_count_is_bounded(body in "[ab]{0,3}", groups in 0usize..4) {
        let mut input = body.clone();
        for _ in 0..groups {
            input.push_str("(ab)");
        }
        let variants = expand_brackets(&input);
        prop_assert_eq!(variants.len(), 1 << groups);
    }

    #[test]
    fn bracket_free_inputs_expand_to_themselves(text in "[a-z _]{0,16}") {
        prop_assert_eq!(expand_brackets(&text), vec![text]);
    }

    #[test]
    fn stress_normalization_is_idempotent(text in arb_text()) {
        let once = StressPolicy::Ignore.normalize(&text).into_owned();
        let twice = StressPolicy::Ignore.normalize(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn stress_check_policy_is_the_identity(text in arb_text()) {
        let checked = StressPolicy::Check.normalize(&text);
        prop_assert_eq!(checked.as_ref(), text.as_str());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn tokenization_consumes_the_entire_input(text in "[abckʷː9%]{0,20}") {
        let inventory = SymbolInventory::new(["a", "b", "c", "kʷ", "aː"]);
        let segments = longest_match(&inventory, &text);
        let rebuilt: String = segments.iter().map(Segment::as_str).collect();
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn unknown_segments_are_exactly_the_out_of_inventory_tokens(
        text in "[ab9%]{0,20}",
    ) {
        let inventory = SymbolInventory::new(["a", "b"]);
        for segment in longest_match(&inventory, &text) {
            match segment {
                Segment::Known(s) => prop_assert!(s == "a" || s == "b"),
                Segment::Unknown(s) => prop_assert!(s == "9" || s == "%"),
            }
        }
    }
}
