//! Property-based tests for the compiler and runner.
//!
//! Three properties hold for every compilable pattern:
//!
//! 1. **Wildcard priority**: in the compiled automaton, wildcard
//!    transitions are ordered strictly last within their state.
//! 2. **Determinism**: running the same pattern over the same input twice
//!    yields identical results; no state leaks between runs.
//! 3. **Literal round-trip**: a pattern spelled from a transcript's own
//!    base glyphs matches that transcript in full.

#[cfg(test)]
mod tests {
    use crate::ipa::parse_transcript;
    use crate::phonex::pattern::PhonexPattern;
    use proptest::prelude::*;

    /// Lowercase base glyphs that are safe in both patterns and
    /// transcripts ('c', 'v', 'g', 'w', 's' are avoided so generated
    /// text never collides with class escapes when patterns are built
    /// from it).
    fn arb_glyph() -> impl Strategy<Value = char> {
        prop::sample::select(vec!['p', 't', 'k', 'b', 'd', 'm', 'n', 'l', 'r', 'a', 'e', 'i', 'o', 'u'])
    }

    fn arb_word() -> impl Strategy<Value = String> {
        prop::collection::vec(arb_glyph(), 1..8).prop_map(|cs| cs.into_iter().collect())
    }

    /// Small pattern grammar: literals, '.', alternation, quantifiers.
    fn arb_pattern() -> impl Strategy<Value = String> {
        let atom = prop_oneof![
            arb_glyph().prop_map(|c| c.to_string()),
            Just(".".to_string()),
        ];
        let quantified = (atom, prop_oneof![
            Just(""),
            Just("?"),
            Just("*"),
            Just("+"),
        ])
            .prop_map(|(a, q)| format!("{}{}", a, q));
        prop::collection::vec(quantified, 1..5).prop_map(|parts| parts.join(""))
    }

    proptest! {
        #[test]
        fn prop_wildcards_ordered_last(pattern in arb_pattern()) {
            let compiled = PhonexPattern::compile(&pattern).unwrap();
            prop_assert!(compiled.automaton().wildcards_ordered_last());
        }

        #[test]
        fn prop_matching_is_deterministic(pattern in arb_pattern(), word in arb_word()) {
            let compiled = PhonexPattern::compile(&pattern).unwrap();
            let input = parse_transcript(&word).unwrap();

            let collect = || {
                let mut matcher = compiled.matcher(&input);
                let mut spans = Vec::new();
                while matcher.find() {
                    spans.push((matcher.start().unwrap(), matcher.end().unwrap()));
                }
                spans
            };
            prop_assert_eq!(collect(), collect());
        }

        #[test]
        fn prop_literal_pattern_round_trips(word in arb_word()) {
            let compiled = PhonexPattern::compile(&word).unwrap();
            let input = parse_transcript(&word).unwrap();

            let mut matcher = compiled.matcher(&input);
            prop_assert!(matcher.matches());
            prop_assert_eq!(matcher.start(), Some(0));
            prop_assert_eq!(matcher.end(), Some(input.len()));
        }

        #[test]
        fn prop_find_spans_are_in_bounds_and_ordered(
            pattern in arb_pattern(),
            word in arb_word(),
        ) {
            let compiled = PhonexPattern::compile(&pattern).unwrap();
            let input = parse_transcript(&word).unwrap();

            let mut matcher = compiled.matcher(&input);
            let mut previous_end = 0;
            while matcher.find() {
                let (start, end) = (matcher.start().unwrap(), matcher.end().unwrap());
                prop_assert!(start < end, "find must not report empty spans");
                prop_assert!(end <= input.len());
                prop_assert!(start >= previous_end, "matches must not overlap");
                previous_end = end;
            }
        }
    }
}
