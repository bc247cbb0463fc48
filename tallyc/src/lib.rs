use thiserror::Error;

use crate::ast::Forest;
use crate::eval::EvalError;
use crate::lexer::{LexNotice, Lexed, Lexer};
use crate::parser::{ParseError, ParseResult, Parser};
use crate::token::Token;

pub mod ast;
pub mod buffer;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;

pub use crate::eval::evaluate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("{0}")]
    Parse(ParseError),
    #[error("{0}")]
    Eval(EvalError),
}

impl From<ParseError> for CalcError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<EvalError> for CalcError {
    fn from(value: EvalError) -> Self {
        Self::Eval(value)
    }
}

/// Scans `text` into tokens. Unusable characters come back as notices.
#[must_use]
pub fn tokenize(text: &str) -> Lexed<'_> {
    Lexer::new(text).lex_all()
}

pub fn parse(tokens: Vec<Token<'_>>) -> ParseResult<Forest<'_>> {
    Parser::new(tokens).parse_all()
}

/// A finished pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// `None` when the text held no expression.
    pub value:   Option<f64>,
    /// Characters the lexer skipped on the way.
    pub notices: Vec<LexNotice>,
}

/// Runs the whole pipeline. Every notice is also logged at `warn`.
pub fn calculate(text: &str) -> Result<Calculation, CalcError> {
    let Lexed { tokens, notices } = tokenize(text);
    for notice in &notices {
        tracing::warn!(offset = notice.span.lo(), "{notice}");
    }
    let forest = parse(tokens)?;
    let value = evaluate(&forest)?;
    Ok(Calculation { value, notices })
}
