//! Bundled sample grammars
//!
//! Each sample renders its parsed value as a string so the CLI can treat
//! them uniformly, and carries an analyzer with the interesting rules named.

use std::fmt;
use std::num::ParseIntError;

use pegrat::{Alt, Forward, GrammarError, Parser, RuleAnalyzer, VoidParser};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrammarChoice {
    IntList,
    Lambda,
}

impl std::str::FromStr for GrammarChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int-list" | "intlist" | "ints" => Ok(Self::IntList),
            "lambda" | "lambda-calculus" => Ok(Self::Lambda),
            _ => Err(format!("Unknown grammar: {s}. Supported: int-list, lambda")),
        }
    }
}

impl fmt::Display for GrammarChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IntList => "int-list",
            Self::Lambda => "lambda",
        })
    }
}

impl GrammarChoice {
    /// Build the selected grammar.
    ///
    /// # Errors
    ///
    /// Propagates grammar assembly errors.
    pub fn build(self) -> Result<Sample, GrammarError> {
        match self {
            Self::IntList => Ok(int_list()),
            Self::Lambda => lambda(),
        }
    }
}

/// A ready-to-run grammar with its display names.
pub struct Sample {
    pub choice: GrammarChoice,
    pub root: Parser<String>,
    pub analyzer: RuleAnalyzer,
}

/// `[1, 2, 3]`-style integer lists.
///
/// A literal that overflows `u64` still matches; the rendered value then
/// reports the overflow instead of a list.
#[must_use]
pub fn int_list() -> Sample {
    let int = Parser::characters("[0-9]", |c| c.is_ascii_digit())
        .map(|digits| digits.parse::<u64>());
    let separated = VoidParser::literal(", ").ignore_then(&int);
    let items = int.then(&separated.star(), |first, rest| {
        std::iter::once(first)
            .chain(rest)
            .collect::<Result<Vec<_>, ParseIntError>>()
    });
    let list = VoidParser::literal("[").ignore_then(&items).then_literal("]");

    let mut analyzer = RuleAnalyzer::new();
    analyzer.set_name(&list, "intList");
    analyzer.set_name(&separated, "separated");

    Sample {
        choice: GrammarChoice::IntList,
        root: list.map(|items| match items {
            Ok(items) => format!("{items:?}"),
            Err(err) => format!("invalid integer: {err}"),
        }),
        analyzer,
    }
}

/// Untyped lambda calculus term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Var(char),
    Abs(Vec<char>, Box<Term>),
    App(Vec<Term>),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => write!(f, "{name}"),
            Self::Abs(params, body) => {
                f.write_str("(λ")?;
                for param in params {
                    write!(f, "{param}")?;
                }
                write!(f, ".{body})")
            }
            Self::App(terms) => {
                f.write_str("(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{term}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Parser for lambda terms:
///
/// ```text
/// exp ::= app / rhs
/// rhs ::= id / abs / "(" exp ")"
/// app ::= rhs rhs+
/// abs ::= "λ" id+ "." exp
/// ```
///
/// # Errors
///
/// Propagates grammar assembly errors.
pub fn lambda_term() -> Result<(Parser<Term>, RuleAnalyzer), GrammarError> {
    let app_slot: Forward<Parser<Term>> = Forward::named("app");
    let rhs_slot: Forward<Parser<Term>> = Forward::named("rhs");
    let abs_slot: Forward<Parser<Term>> = Forward::named("abs");

    let exp = Parser::or([Alt::from(&app_slot), Alt::from(&rhs_slot)])?;
    let id = Parser::character("[a-z]", |c| c.is_ascii_lowercase());
    let in_paren = VoidParser::literal("(").ignore_then(&exp).then_literal(")");
    let rhs = Parser::or([
        Alt::ready(id.map(Term::Var)),
        Alt::from(&abs_slot),
        Alt::ready(in_paren.clone()),
    ])?;
    let app = rhs.then(&rhs.plus(), |head, tail| {
        Term::App(std::iter::once(head).chain(tail).collect())
    });
    let abs = VoidParser::literal("λ")
        .ignore_then(&id.plus())
        .then_literal(".")
        .then(&exp, |params, body| Term::Abs(params, Box::new(body)));

    let mut analyzer = RuleAnalyzer::new();
    analyzer.set_name(&exp, "exp");
    analyzer.set_name(&rhs, "rhs");
    analyzer.set_name(&app, "app");
    analyzer.set_name(&abs, "abs");
    analyzer.set_name(&id, "id");
    analyzer.set_name(&in_paren, "paren");

    app_slot.define(app)?;
    rhs_slot.define(rhs)?;
    abs_slot.define(abs)?;

    Ok((exp, analyzer))
}

/// [`lambda_term`] rendering its terms as strings.
///
/// # Errors
///
/// Propagates grammar assembly errors.
pub fn lambda() -> Result<Sample, GrammarError> {
    let (exp, analyzer) = lambda_term()?;
    Ok(Sample {
        choice: GrammarChoice::Lambda,
        root: exp.map(|term| term.to_string()),
        analyzer,
    })
}
