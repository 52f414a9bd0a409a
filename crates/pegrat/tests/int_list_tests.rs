//! Integer list grammar: values, spans and rejection.

mod common;

use common::IntList;
use pegrat::{parse, ParseConfig, ParseError};

#[test]
fn test_int_list_round_trip() {
    let grammar = IntList::new();
    let expected = vec![1, 2, 3];

    assert_eq!(
        grammar.list.parse(&format!("{expected:?}")),
        Ok(Ok(expected))
    );
}

#[test]
fn test_digits_alone() {
    let grammar = IntList::new();
    let parsed = grammar.int.parse_located("42").unwrap();

    assert_eq!(parsed.value, Ok(42));
    assert_eq!(parsed.location.start(), 0);
    assert_eq!(parsed.location.end(), 2);
}

#[test]
fn test_int_list_variants() {
    let grammar = IntList::new();

    assert_eq!(grammar.list.parse("[42]"), Ok(Ok(vec![42])));
    assert_eq!(
        grammar.list.parse("[10, 200, 3000]"),
        Ok(Ok(vec![10, 200, 3000]))
    );
    assert_eq!(parse(&grammar.list, "[]"), Err(ParseError::Rejected));
    assert_eq!(parse(&grammar.list, "[1,2]"), Err(ParseError::Rejected));
    assert_eq!(parse(&grammar.list, "[1, 2"), Err(ParseError::Rejected));
}

#[test]
fn test_overflowing_literal_is_reported() {
    let grammar = IntList::new();

    // The text matches the grammar; only the value is out of range.
    let parsed = grammar.list.parse_located("[1, 99999999999]").unwrap();
    assert!(parsed.value.is_err());
    assert_eq!(parsed.location.end(), 16);

    assert!(grammar.int.parse("4294967296").unwrap().is_err());
    assert_eq!(grammar.int.parse("4294967295").unwrap(), Ok(u32::MAX));
}

#[test]
fn test_separator_does_not_consume_on_failure() {
    let grammar = IntList::new();
    let parsed = grammar.separated.star().parse_located(", 1, 2,3").unwrap();

    assert_eq!(parsed.value, vec![Ok(1), Ok(2)]);
    assert_eq!(parsed.location.end(), 6);
    assert_eq!(parsed.location.text(), ", 1, 2");
}

#[test]
fn test_int_list_without_memo() {
    let grammar = IntList::new();
    let config = ParseConfig::without_memoization();

    assert_eq!(
        grammar.list.parse_with("[7, 8, 9]", &config),
        Ok(Ok(vec![7, 8, 9]))
    );
}

#[test]
fn test_located_items() {
    let grammar = IntList::new();
    let located = grammar.int.with_location().star();
    let spaced = pegrat::VoidParser::literal(" ").option().to_void();
    let items = spaced.ignore_then(&located);

    let parsed = items.parse("  12").unwrap();
    assert!(parsed.is_empty());

    let parsed = items.parse(" 12").unwrap();
    assert_eq!(parsed.len(), 1);
    let (value, location) = &parsed[0];
    assert_eq!(*value, Ok(12));
    assert_eq!((location.start(), location.end()), (1, 3));
    assert_eq!(location.line(), 1);
}

#[cfg(feature = "parallel")]
#[test]
fn test_int_lists_in_parallel() {
    let grammar = IntList::new();
    let inputs: Vec<String> = (0..32).map(|n| format!("[{n}, {}]", n * 2)).collect();

    let results = grammar.list.parse_batch(&inputs);
    for (n, result) in (0u32..).zip(results) {
        assert_eq!(result, Ok(Ok(vec![n, n * 2])));
    }
}
