//! Property-based tests for recognition and construction.
//!
//! These use proptest to generate inputs over small alphabets so that the
//! grammars see plenty of partial matches and backtracking.

mod common;

use common::lambda_parser;
use pegrat::{Cursor, FullMemo, NoMemo, ParseConfig, Parser, Rule};
use proptest::prelude::*;

fn lambda_input() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('λ'),
            Just('.'),
            Just('('),
            Just(')'),
            Just('x'),
            Just('y'),
            Just('z'),
        ],
        0..16,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn sample_rules() -> Vec<Rule> {
    let letter = Rule::predicate("[a-z]", |c| c.is_ascii_lowercase());
    let digit = Rule::predicate("[0-9]", |c| c.is_ascii_digit());
    vec![
        Rule::literal("ab"),
        letter.plus(),
        letter.then(&digit.star()),
        Rule::choice([digit.clone(), Rule::literal("a")]).unwrap_or(digit),
    ]
}

proptest! {
    #[test]
    fn test_memoization_is_transparent(input in lambda_input()) {
        let exp = lambda_parser();
        let full = exp.parse_located_with(&input, &ParseConfig::default());
        let none = exp.parse_located_with(&input, &ParseConfig::without_memoization());

        match (full, none) {
            (Ok(full), Ok(none)) => {
                prop_assert_eq!(full.value, none.value);
                prop_assert_eq!(full.location.end(), none.location.end());
            }
            (Err(full), Err(none)) => prop_assert_eq!(full, none),
            (full, none) => prop_assert!(false, "outcomes differ: {:?} vs {:?}", full, none),
        }
    }

    #[test]
    fn test_star_never_fails(input in "[a-z]{0,8}[0-9]{0,4}") {
        let digits = Parser::character("[0-9]", |c| c.is_ascii_digit()).star();
        let parsed = digits.parse_located(&input);

        prop_assert!(parsed.is_ok());
        if let Ok(parsed) = parsed {
            if input.starts_with(|c: char| c.is_ascii_lowercase()) {
                prop_assert!(parsed.value.is_empty());
                prop_assert_eq!(parsed.location.end(), 0);
            }
        }
    }

    #[test]
    fn test_lookahead_never_consumes(input in "[a-z0-9]{0,8}", offset in 0usize..9) {
        let length = input.chars().count();
        let start = offset.min(length);

        for rule in sample_rules() {
            for lookahead in [rule.and(), rule.not()] {
                let mut cursor = Cursor::new(&input);
                cursor.jump(start).unwrap();
                lookahead.accept(&mut cursor, &mut FullMemo::new());
                prop_assert_eq!(cursor.position(), start);

                cursor.jump(start).unwrap();
                lookahead.accept(&mut cursor, &mut NoMemo);
                prop_assert_eq!(cursor.position(), start);
            }
        }
    }

    #[test]
    fn test_location_text_matches_consumed(input in "[ a-z]{0,16}") {
        let word = Parser::characters("[a-z]", |c| c.is_ascii_lowercase());
        let spaces = Parser::characters("' '", |c| c == ' ').option().to_void();
        let located = spaces.ignore_then(&word.with_location());

        if let Ok((text, location)) = located.parse(&input) {
            prop_assert_eq!(location.text(), text);
            let expected: String = input
                .chars()
                .skip(location.start())
                .take(location.len())
                .collect();
            prop_assert_eq!(location.text(), expected);
        }
    }

    #[test]
    fn test_recognize_agrees_with_parse(input in lambda_input()) {
        let exp = lambda_parser();
        let recognized = exp.rule().recognize(&input, &ParseConfig::default());
        let parsed = exp.parse_located(&input).ok().map(|parsed| parsed.location.end());

        prop_assert_eq!(recognized, parsed);
    }
}
