use std::str::Chars;

use tallyspan::{Span, Spand};
use thiserror::Error;

use crate::token::{Token, TokenKind};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexNoticeKind {
    #[error("skipped invalid character '{0}'")]
    InvalidChar(char),
}

/// A character the lexer could not use. Scanning carries on past it.
pub type LexNotice = Spand<LexNoticeKind>;

pub struct Lexer<'a> {
    input: &'a str,
    chars: Chars<'a>,

    /// start byte position of current token
    byte_start: u32,

    /// byte position of cursor
    byte: u32,
}

const EOF: char = '\0';

/// Everything a full scan produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexed<'a> {
    pub tokens:  Vec<Token<'a>>,
    pub notices: Vec<LexNotice>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        assert!(u32::try_from(input.len()).is_ok());

        Self {
            input,
            chars: input.chars(),
            byte_start: 0,
            byte: 0,
        }
    }

    #[must_use]
    pub fn lex_all(self) -> Lexed<'a> {
        let mut lexed = Lexed::default();

        for item in self {
            match item {
                Ok(token) => lexed.tokens.push(token),
                Err(notice) => lexed.notices.push(notice),
            }
        }

        lexed
    }

    fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF)
    }

    fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    fn bump(&mut self) -> Option<char> {
        #[allow(clippy::cast_possible_truncation)]
        self.chars
            .next()
            .inspect(|c| self.byte += c.len_utf8() as u32)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while !self.is_eof() && pred(self.first()) {
            self.bump();
        }
    }

    const fn make_span(&self) -> Span {
        Span::new(self.byte_start, self.byte)
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(|c| c.is_ascii_whitespace());
    }

    fn view(&self) -> &'a str {
        &self.input[self.byte_start as usize..self.byte as usize]
    }

    // Any run of digits and dots. A second dot is kept out by the input buffer.
    fn number(&mut self) -> Token<'a> {
        self.eat_while(|c| c.is_ascii_digit() || c == '.');
        Token::new(TokenKind::Number(self.view()), self.make_span())
    }

    pub fn next_token(&mut self) -> Option<Result<Token<'a>, LexNotice>> {
        // whitespace only separates tokens and never yields a notice
        self.skip_whitespace();

        self.byte_start = self.byte;
        let c = self.bump()?;

        if let Some(kind) = TokenKind::from_char(c) {
            return Some(Ok(Token::new(kind, self.make_span())));
        }

        match c {
            '0'..='9' => Some(Ok(self.number())),
            _ => {
                let span = self.make_span();
                tracing::debug!(character = %c.escape_debug(), offset = span.lo(), "skipping invalid character");
                Some(Err(LexNotice::new(LexNoticeKind::InvalidChar(c), span)))
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexNotice>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.next_token();
        if let Some(Ok(token)) = &item {
            tracing::trace!(token = %token.kind, lo = token.span.lo(), "token");
        }
        item
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind<'_>> {
        Lexer::new(input)
            .lex_all()
            .tokens
            .into_iter()
            .map(|tk| tk.kind)
            .collect()
    }

    #[test]
    fn empty_input() {
        let lexed = Lexer::new("").lex_all();
        assert!(lexed.tokens.is_empty());
        assert!(lexed.notices.is_empty());
    }

    #[test]
    fn operators_and_parens() {
        use crate::token::TokenKind::{LParen, Minus, Number, Plus, RParen, Slash, Star};

        assert_eq!(
            kinds("(1+2)-3*4/5"),
            vec![
                LParen,
                Number("1"),
                Plus,
                Number("2"),
                RParen,
                Minus,
                Number("3"),
                Star,
                Number("4"),
                Slash,
                Number("5"),
            ]
        );
    }

    #[test]
    fn number_run_is_greedy() {
        assert_eq!(kinds("12.50"), vec![TokenKind::Number("12.50")]);
        assert_eq!(kinds("3."), vec![TokenKind::Number("3.")]);
        // not validated here
        assert_eq!(kinds("1.2.3"), vec![TokenKind::Number("1.2.3")]);
    }

    #[test]
    fn number_spans() {
        let tokens = Lexer::new("10+255").lex_all().tokens;
        let spans: Vec<_> = tokens.iter().map(|tk| tk.span).collect();
        assert_eq!(
            spans,
            vec![Span::new(0, 2), Span::new(2, 3), Span::new(3, 6)]
        );
    }

    #[test]
    fn invalid_chars_are_skipped() {
        let lexed = Lexer::new("2x+é3").lex_all();
        let kinds: Vec<_> = lexed.tokens.iter().map(|tk| tk.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Number("2"), TokenKind::Plus, TokenKind::Number("3")]
        );
        assert_eq!(
            lexed.notices,
            vec![
                LexNotice::new(LexNoticeKind::InvalidChar('x'), Span::new(1, 2)),
                LexNotice::new(LexNoticeKind::InvalidChar('é'), Span::new(3, 5)),
            ]
        );
    }

    #[test]
    fn leading_dot_is_not_a_number() {
        let lexed = Lexer::new(".5").lex_all();
        assert_eq!(
            lexed.tokens.iter().map(|tk| tk.kind).collect::<Vec<_>>(),
            vec![TokenKind::Number("5")]
        );
        assert_eq!(lexed.notices.len(), 1);
    }

    #[test]
    fn whitespace_is_silent() {
        let lexed = Lexer::new(" 1 +\t2 ").lex_all();
        assert_eq!(lexed.tokens.len(), 3);
        assert!(lexed.notices.is_empty());
    }
}
