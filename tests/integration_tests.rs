//! End-to-end matching scenarios through the public API.

use phonex::ipa::Phone;
use phonex::prelude::*;

#[test]
fn test_single_literal_matches_at_offset_zero() {
    let pattern = PhonexPattern::compile("p").unwrap();
    let input = parse_transcript("pat").unwrap();

    let mut matcher = pattern.matcher(&input);
    assert!(matcher.find());
    assert_eq!(matcher.start(), Some(0));
    assert_eq!(matcher.end(), Some(1));
    assert!(!matcher.find());
}

#[test]
fn test_literal_chain_covers_whole_sequence() {
    let pattern = PhonexPattern::compile("pat").unwrap();
    let input = parse_transcript("pat").unwrap();

    let mut matcher = pattern.matcher(&input);
    assert!(matcher.matches());
    assert_eq!(matcher.start(), Some(0));
    assert_eq!(matcher.end(), Some(3));
}

#[test]
fn test_diphthong_plugin_defaults_to_true() {
    // Element 1 is flagged as a diphthong member, the others are not.
    let mut input = vec![
        IpaElement::phone(Phone::new('t')),
        IpaElement::phone(Phone::new('a')),
        IpaElement::phone(Phone::new('p')),
    ];
    input[0]
        .attach(SyllabificationInfo::new(SyllableConstituentType::Onset))
        .unwrap();
    input[1]
        .attach(SyllabificationInfo::diphthong_nucleus())
        .unwrap();
    input[2]
        .attach(SyllabificationInfo::new(SyllableConstituentType::Coda))
        .unwrap();

    let defaulted = PhonexPattern::compile("diphthong()").unwrap();
    let mut matcher = defaulted.matcher(&input);
    assert!(matcher.find());
    assert_eq!((matcher.start(), matcher.end()), (Some(1), Some(2)));
    assert!(!matcher.find());

    // Explicit 'true' behaves identically.
    let explicit = PhonexPattern::compile("diphthong(true)").unwrap();
    let mut matcher = explicit.matcher(&input);
    assert!(matcher.find());
    assert_eq!((matcher.start(), matcher.end()), (Some(1), Some(2)));
}

#[test]
fn test_suffix_plugin_matches_only_the_marked_element() {
    // Element 2 carries suffix diacritic 'h'; no other element does.
    let input = vec![
        IpaElement::phone(Phone::new('p')),
        IpaElement::phone(Phone::new('a')),
        IpaElement::phone(Phone::with_diacritics('t', &[], Some('h'))),
    ];

    let pattern = PhonexPattern::compile("suffix(h)").unwrap();
    let mut matcher = pattern.matcher(&input);
    assert!(matcher.find());
    assert_eq!((matcher.start(), matcher.end()), (Some(2), Some(3)));
    assert!(!matcher.find());
}

#[test]
fn test_wildcard_yields_to_specific_via_alternation() {
    // 'a' and '.' compete; the literal branch must win on 'a' so the
    // capture group reflects the literal path.
    let pattern = PhonexPattern::compile("(lit=a)|(any=.)").unwrap();
    let input = parse_transcript("a").unwrap();

    let mut matcher = pattern.matcher(&input);
    assert!(matcher.find());
    assert!(matcher.named_group("lit").is_some());
    assert!(matcher.named_group("any").is_none());
}

#[test]
fn test_quantifiers_are_greedy() {
    let pattern = PhonexPattern::compile("a+").unwrap();
    let input = parse_transcript("taaat").unwrap();

    let mut matcher = pattern.matcher(&input);
    assert!(matcher.find());
    assert_eq!((matcher.start(), matcher.end()), (Some(1), Some(4)));
}

#[test]
fn test_bounded_repetition() {
    let pattern = PhonexPattern::compile("a{2,3}").unwrap();

    let two = parse_transcript("aa").unwrap();
    assert!(pattern.matcher(&two).matches());

    let three = parse_transcript("aaa").unwrap();
    assert!(pattern.matcher(&three).matches());

    let one = parse_transcript("a").unwrap();
    assert!(!pattern.matcher(&one).matches());
}

#[test]
fn test_anchors() {
    let start_anchored = PhonexPattern::compile("^p").unwrap();
    let input = parse_transcript("ppa").unwrap();
    let mut matcher = start_anchored.matcher(&input);
    assert!(matcher.find());
    assert_eq!(matcher.start(), Some(0));
    // only the first 'p' is at the input start
    assert!(!matcher.find());

    let end_anchored = PhonexPattern::compile("t$").unwrap();
    let input = parse_transcript("tat").unwrap();
    let mut matcher = end_anchored.matcher(&input);
    assert!(matcher.find());
    assert_eq!((matcher.start(), matcher.end()), (Some(2), Some(3)));
}

#[test]
fn test_alternation_and_classes() {
    let pattern = PhonexPattern::compile("\\c\\v|\\v\\c").unwrap();
    let input = parse_transcript("ap").unwrap();
    assert!(pattern.matcher(&input).matches());
    let input = parse_transcript("pa").unwrap();
    assert!(pattern.matcher(&input).matches());
    let input = parse_transcript("pt").unwrap();
    assert!(!pattern.matcher(&input).matches());
}

#[test]
fn test_glyph_set_negation() {
    let pattern = PhonexPattern::compile("[^pt]").unwrap();
    let input = parse_transcript("pta").unwrap();
    let mut matcher = pattern.matcher(&input);
    assert!(matcher.find());
    assert_eq!(matcher.start(), Some(2));
}

#[test]
fn test_determinism_across_runs() {
    let pattern = PhonexPattern::compile("\\c+\\v").unwrap();
    let input = parse_transcript("strata").unwrap();

    let collect = || {
        let mut matcher = pattern.matcher(&input);
        let mut spans = Vec::new();
        while matcher.find() {
            spans.push((matcher.start().unwrap(), matcher.end().unwrap()));
        }
        spans
    };
    assert_eq!(collect(), collect());
}

#[test]
fn test_matching_annotated_input_does_not_mutate_it() {
    // Annotations are read-only during matching, so repeated runs over
    // the same annotated sequence see identical input.
    let mut input = parse_transcript("pata").unwrap();
    SonoritySyllabifier::new().annotate(&mut input).unwrap();

    let onset = PhonexPattern::compile("\\c:O").unwrap();
    let collect = || {
        let mut m = onset.matcher(&input);
        let mut starts = Vec::new();
        while m.find() {
            starts.push(m.start().unwrap());
        }
        starts
    };
    let first = collect();
    assert_eq!(first, vec![0, 2]);
    assert_eq!(first, collect());
}

#[test]
fn test_compile_error_reports_offset() {
    let err = PhonexPattern::compile("pa[qq").unwrap_err();
    match err {
        PhonexError::Syntax { offset, .. } => assert_eq!(offset, 2),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_no_partial_automaton_on_late_error() {
    // The error sits at the end of the pattern; compilation still fails
    // as a whole.
    assert!(PhonexPattern::compile("pata)").is_err());
    assert!(PhonexPattern::compile("pat nasal()").is_err());
}
