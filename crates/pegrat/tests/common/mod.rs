//! Grammars shared by the integration tests.

#![allow(dead_code)]

use std::num::ParseIntError;

use pegrat::{Alt, Forward, Parser, Rule, VoidParser};

/// Recognition-only lambda calculus:
///
/// ```text
/// exp     ::= app / rhs
/// rhs     ::= id / abs / "(" exp ")"
/// app     ::= rhs rhs+
/// abs     ::= "λ" id+ "." exp
/// id      ::= [a-z]
/// ```
pub struct LambdaRules {
    pub exp: Rule,
    pub rhs: Rule,
    pub in_paren: Rule,
    pub id: Rule,
    pub app: Rule,
    pub abs: Rule,
}

impl LambdaRules {
    pub fn new() -> Self {
        let app_slot: Forward<Rule> = Forward::named("app");
        let rhs_slot: Forward<Rule> = Forward::named("rhs");
        let abs_slot: Forward<Rule> = Forward::named("abs");

        let exp = Rule::choice([Alt::from(&app_slot), Alt::from(&rhs_slot)]).unwrap();
        let in_paren =
            Rule::sequence([Rule::literal("("), exp.clone(), Rule::literal(")")]).unwrap();
        let id = Rule::predicate("[a-z]", |c| c.is_ascii_lowercase());
        let rhs = Rule::choice([
            Alt::ready(id.clone()),
            Alt::from(&abs_slot),
            Alt::ready(in_paren.clone()),
        ])
        .unwrap();
        let app = rhs.then(&rhs.plus());
        let abs = Rule::sequence([
            Rule::literal("λ"),
            id.plus(),
            Rule::literal("."),
            exp.clone(),
        ])
        .unwrap();

        app_slot.define(app.clone()).unwrap();
        rhs_slot.define(rhs.clone()).unwrap();
        abs_slot.define(abs.clone()).unwrap();

        Self {
            exp,
            rhs,
            in_paren,
            id,
            app,
            abs,
        }
    }
}

/// Lambda term built by [`lambda_parser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Var(char),
    Abs(Vec<char>, Box<Term>),
    App(Vec<Term>),
}

pub fn var(name: char) -> Term {
    Term::Var(name)
}

pub fn abs(params: &str, body: Term) -> Term {
    Term::Abs(params.chars().collect(), Box::new(body))
}

pub fn app(terms: impl IntoIterator<Item = Term>) -> Term {
    Term::App(terms.into_iter().collect())
}

/// The lambda grammar with a construction step for every rule.
pub fn lambda_parser() -> Parser<Term> {
    let app_slot: Forward<Parser<Term>> = Forward::named("app");
    let rhs_slot: Forward<Parser<Term>> = Forward::named("rhs");
    let abs_slot: Forward<Parser<Term>> = Forward::named("abs");

    let exp = Parser::or([Alt::from(&app_slot), Alt::from(&rhs_slot)]).unwrap();
    let in_paren = VoidParser::literal("(")
        .ignore_then(&exp)
        .then_literal(")");
    let id = Parser::character("[a-z]", |c| c.is_ascii_lowercase());
    let rhs = Parser::or([
        Alt::ready(id.map(Term::Var)),
        Alt::from(&abs_slot),
        Alt::ready(in_paren),
    ])
    .unwrap();
    let application = rhs.then(&rhs.plus(), |head, tail| {
        Term::App(std::iter::once(head).chain(tail).collect())
    });
    let abstraction = VoidParser::literal("λ")
        .ignore_then(&id.plus())
        .then_literal(".")
        .then(&exp, |params, body| Term::Abs(params, Box::new(body)));

    app_slot.define(application).unwrap();
    rhs_slot.define(rhs).unwrap();
    abs_slot.define(abstraction).unwrap();

    exp
}

/// Value of one integer literal; literals that overflow `u32` are kept as errors.
pub type Number = Result<u32, ParseIntError>;

/// `"[" int (", " int)* "]"` producing the integers.
pub struct IntList {
    pub int: Parser<Number>,
    pub separated: Parser<Number>,
    pub list: Parser<Result<Vec<u32>, ParseIntError>>,
}

impl IntList {
    pub fn new() -> Self {
        let int = Parser::characters("[0-9]", |c| c.is_ascii_digit())
            .map(|digits| digits.parse::<u32>());
        let separated = VoidParser::literal(", ").ignore_then(&int);
        let items = int.then(&separated.star(), |first, rest| {
            std::iter::once(first).chain(rest).collect()
        });
        let list = VoidParser::literal("[")
            .ignore_then(&items)
            .then_literal("]");

        Self {
            int,
            separated,
            list,
        }
    }
}
