//! Lambda calculus parser
//!
//! Builds terms for inputs like `λxyz.xy(yz)` using forward declarations for
//! the mutually recursive rules, then compares the work done with and
//! without packrat memoization.
//!
//! Run with: `cargo run --example lambda_calculus -- "(λf.ff)x"`

use std::fmt;

use pegrat::{
    Alt, Cursor, Forward, FullMemo, GrammarError, Memo, MemoEntry, NoMemo, Parser, RuleId,
    VoidParser,
};

#[derive(Debug, Clone)]
enum Term {
    Var(char),
    Abs(Vec<char>, Box<Term>),
    App(Vec<Term>),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => write!(f, "{name}"),
            Self::Abs(params, body) => {
                write!(f, "(λ")?;
                for param in params {
                    write!(f, "{param}")?;
                }
                write!(f, ". {body})")
            }
            Self::App(terms) => {
                write!(f, "(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{term}")?;
                }
                write!(f, ")")
            }
        }
    }
}

fn grammar() -> Result<Parser<Term>, GrammarError> {
    let app_slot: Forward<Parser<Term>> = Forward::named("app");
    let rhs_slot: Forward<Parser<Term>> = Forward::named("rhs");
    let abs_slot: Forward<Parser<Term>> = Forward::named("abs");

    // exp ::= app / rhs
    let exp = Parser::or([Alt::from(&app_slot), Alt::from(&rhs_slot)])?;
    let id = Parser::character("[a-z]", |c| c.is_ascii_lowercase());
    // rhs ::= id / abs / "(" exp ")"
    let rhs = Parser::or([
        Alt::ready(id.map(Term::Var)),
        Alt::from(&abs_slot),
        Alt::ready(VoidParser::literal("(").ignore_then(&exp).then_literal(")")),
    ])?;

    // app ::= rhs rhs+
    app_slot.define(rhs.then(&rhs.plus(), |head, tail| {
        Term::App(std::iter::once(head).chain(tail).collect())
    }))?;
    // abs ::= "λ" id+ "." exp
    abs_slot.define(
        VoidParser::literal("λ")
            .ignore_then(&id.plus())
            .then_literal(".")
            .then(&exp, |params, body| Term::Abs(params, Box::new(body))),
    )?;
    rhs_slot.define(rhs)?;

    Ok(exp)
}

/// Counts rule evaluations on top of another memo table.
struct Counting<M> {
    inner: M,
    evaluations: usize,
}

impl<M: Memo> Memo for Counting<M> {
    fn lookup(&mut self, rule: RuleId, start: usize) -> MemoEntry {
        self.inner.lookup(rule, start)
    }

    fn record_accept(&mut self, rule: RuleId, start: usize, end: usize) {
        self.evaluations += 1;
        self.inner.record_accept(rule, start, end);
    }

    fn record_reject(&mut self, rule: RuleId, start: usize) {
        self.evaluations += 1;
        self.inner.record_reject(rule, start);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let exp = grammar()?;
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "(λx.(λy.(λz.((x)(y))((y)(z)))))".to_string());

    let mut full = Counting { inner: FullMemo::new(), evaluations: 0 };
    let term = exp.parse_at(&mut Cursor::new(&input), &mut full)?;

    let mut none = Counting { inner: NoMemo, evaluations: 0 };
    exp.parse_at(&mut Cursor::new(&input), &mut none)?;

    println!("input: {input}");
    println!("term:  {term}");
    println!("rule evaluations with packrat memo: {}", full.evaluations);
    println!("rule evaluations without memo:      {}", none.evaluations);

    Ok(())
}
