use std::fmt::Display;

use tallyspan::Spand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Run of digits and dots, kept as written.
    Number(&'a str),

    Plus,
    Minus,
    Star,
    Slash,

    LParen,
    RParen,
}

pub type Token<'a> = Spand<TokenKind<'a>>;

impl<'a> TokenKind<'a> {
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::LParen),
            ')' => Some(Self::RParen),
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Star),
            '/' => Some(Self::Slash),
            _ => None,
        }
    }

    /// The source text this token was scanned from.
    #[must_use]
    pub const fn lexeme(&self) -> &'a str {
        match self {
            Self::Number(lit) => *lit,
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::LParen => "(",
            Self::RParen => ")",
        }
    }

    #[must_use]
    pub const fn is_additive(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }

    #[must_use]
    pub const fn is_multiplicative(&self) -> bool {
        matches!(self, Self::Star | Self::Slash)
    }
}

impl Display for TokenKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}
