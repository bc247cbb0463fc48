use tallyspan::{Span, Spand};
use thiserror::Error;

use crate::ast::{Expr, ExprKind, Forest, InfixOp};
use crate::token::{Token, TokenKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected closing parenthesis")]
    UnclosedGroup,
    #[error("expected a number or '(' but found end of input")]
    UnexpectedEnd,
    #[error("expected a number or '(' but found '{0}'")]
    ExpectedAtom(String),
}

pub type ParseError = Spand<ParseErrorKind>;
pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive descent over a fully scanned token list.
///
/// ```text
/// forest         := expression*
/// expression     := additive
/// additive       := multiplicative (('+' | '-') multiplicative)*
/// multiplicative := atom (('*' | '/') atom)*
/// atom           := '(' expression ')'
///                 | NUMBER ['(' expression ')']
/// ```
pub struct Parser<'a> {
    tokens:  Vec<Token<'a>>,
    current: usize,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub const fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens, current: 0 }
    }

    const fn finished(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn end_span(&self) -> Span {
        self.tokens
            .last()
            .map(|tk| Span::empty_at(tk.span.hi()))
            .unwrap_or_default()
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.current).copied()
    }

    const fn eat(&mut self) {
        self.current += 1;
    }

    fn next_if(&mut self, pred: impl FnOnce(TokenKind<'a>) -> bool) -> Option<Token<'a>> {
        let tk = self.peek().filter(|tk| pred(tk.kind))?;
        self.eat();
        Some(tk)
    }

    fn next_if_kind(&mut self, kind: TokenKind<'static>) -> Option<Span> {
        self.next_if(|tk| tk == kind).map(|tk| tk.span)
    }

    /// Parses the whole token list, stopping at the first error.
    pub fn parse_all(&mut self) -> ParseResult<Forest<'a>> {
        let forest = self.by_ref().collect::<ParseResult<Forest<'a>>>()?;
        tracing::debug!(nodes = forest.len(), "parsed forest");
        Ok(forest)
    }

    pub fn parse_expr(&mut self) -> ParseResult<Expr<'a>> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> ParseResult<Expr<'a>> {
        let mut lhs = self.parse_multiplicative()?;
        while let Some(op) = self.next_infix(TokenKind::is_additive) {
            let rhs = self.parse_multiplicative()?;
            lhs = Self::binary(lhs, op, rhs);
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr<'a>> {
        let mut lhs = self.parse_atom()?;
        while let Some(op) = self.next_infix(TokenKind::is_multiplicative) {
            let rhs = self.parse_atom()?;
            lhs = Self::binary(lhs, op, rhs);
        }
        Ok(lhs)
    }

    fn next_infix(&mut self, class: fn(&TokenKind<'a>) -> bool) -> Option<Spand<InfixOp>> {
        let tk = self.next_if(|kind| class(&kind))?;
        InfixOp::from_token(tk.kind).map(|op| Spand::new(op, tk.span))
    }

    fn parse_atom(&mut self) -> ParseResult<Expr<'a>> {
        let Some(Token { kind, span }) = self.peek() else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedEnd,
                self.end_span(),
            ));
        };

        match kind {
            TokenKind::LParen => {
                self.eat();
                self.parse_group(span)
            }
            TokenKind::Number(lit) => {
                self.eat();
                let number = Expr::new(ExprKind::Number(lit), span);
                match self.next_if_kind(TokenKind::LParen) {
                    // `2(3)` reads as `2 * (3)`
                    Some(open) => {
                        let group = self.parse_group(open)?;
                        let op = Spand::new(InfixOp::Mul, Span::empty_at(open.lo()));
                        Ok(Self::binary(number, op, group))
                    }
                    None => Ok(number),
                }
            }
            _ => Err(ParseError::new(
                ParseErrorKind::ExpectedAtom(kind.lexeme().to_owned()),
                span,
            )),
        }
    }

    /// Rest of a group whose `(` at `open` was already consumed.
    fn parse_group(&mut self, open: Span) -> ParseResult<Expr<'a>> {
        let inner = self.parse_expr()?;
        let close = self
            .next_if_kind(TokenKind::RParen)
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnclosedGroup, open))?;
        let kind = ExprKind::Grouping(Box::new(inner));
        Ok(Expr::new(kind, open.join(close)))
    }

    fn binary(lhs: Expr<'a>, op: Spand<InfixOp>, rhs: Expr<'a>) -> Expr<'a> {
        let span = lhs.span.join(rhs.span);
        let kind = ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
        Expr::new(kind, span)
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = ParseResult<Expr<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished() {
            None
        } else {
            Some(self.parse_expr())
        }
    }
}
