//! Integer list parser
//!
//! Parses `[1, 2, 3]` into a `Vec<u32>` and prints the grammar it was built
//! from.
//!
//! Run with: `cargo run --example int_list -- "[4, 5, 6]"`

use pegrat::{Parser, RuleAnalyzer, VoidParser};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // <int> ::= [0-9]+
    // The text may match while its value overflows u32, so the value is a Result.
    let int = Parser::characters("[0-9]", |c| c.is_ascii_digit())
        .map(|digits| digits.parse::<u32>());

    // <separated> ::= ", " <int>
    let separated = VoidParser::literal(", ").ignore_then(&int);

    // <items> ::= <int> <separated>*
    let items = int.then(&separated.star(), |first, rest| {
        std::iter::once(first)
            .chain(rest)
            .collect::<Result<Vec<_>, _>>()
    });

    // <list> ::= "[" <items> "]"
    let list = VoidParser::literal("[").ignore_then(&items).then_literal("]");

    let input = std::env::args().nth(1).unwrap_or_else(|| "[1, 2, 3]".to_string());
    let parsed = list.parse_located(&input)?;
    let values = parsed.value?;
    println!("input  = {input}");
    println!("parsed = {values:?} (span {})", parsed.location);

    let mut analyzer = RuleAnalyzer::new();
    analyzer.set_name(&list, "list");
    analyzer.set_name(&separated, "separated");
    println!();
    print!("{}", analyzer.analyze(&list));

    Ok(())
}
