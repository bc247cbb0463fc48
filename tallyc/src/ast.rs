use std::fmt::Display;

use tallyspan::Spand;

use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl InfixOp {
    #[must_use]
    pub const fn from_token(kind: TokenKind<'_>) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            TokenKind::Star => Some(Self::Mul),
            TokenKind::Slash => Some(Self::Div),
            _ => None,
        }
    }

    #[must_use]
    pub const fn token(self) -> TokenKind<'static> {
        match self {
            Self::Add => TokenKind::Plus,
            Self::Sub => TokenKind::Minus,
            Self::Mul => TokenKind::Star,
            Self::Div => TokenKind::Slash,
        }
    }

    /// Plain IEEE-754 arithmetic: dividing by zero gives an infinity or NaN.
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }
}

impl Display for InfixOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.token(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind<'a> {
    /// Numeric lexeme, converted to `f64` only when evaluated.
    Number(&'a str),

    Binary {
        op:  Spand<InfixOp>,
        lhs: Box<Expr<'a>>,
        rhs: Box<Expr<'a>>,
    },

    /// A parenthesized expression. Kept as its own node so the tree still
    /// mirrors the source.
    Grouping(Box<Expr<'a>>),
}

pub type Expr<'a> = Spand<ExprKind<'a>>;

/// Top-level expressions in source order. Neighbours multiply.
pub type Forest<'a> = Vec<Expr<'a>>;

impl Display for ExprKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(lit) => write!(f, "{lit}"),
            Self::Binary { op, lhs, rhs } => write!(f, "({} {lhs} {rhs})", op.kind),
            Self::Grouping(inner) => write!(f, "(group {inner})"),
        }
    }
}
