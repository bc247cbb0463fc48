use codespan_reporting::diagnostic::{Diagnostic, Label};
use tallyc::CalcError;
use tallyc::eval::EvalError;
use tallyc::lexer::LexNotice;
use tallyc::parser::{ParseError, ParseErrorKind};

pub trait Report {
    fn diagnose(&self) -> Diagnostic<()>;

    /// Same diagnostic with every label moved `offset` bytes to the right,
    /// for input that was cut out of a larger file.
    fn diagnose_at(&self, offset: usize) -> Diagnostic<()> {
        let mut diagnostic = self.diagnose();
        for label in &mut diagnostic.labels {
            label.range = label.range.start + offset..label.range.end + offset;
        }
        diagnostic
    }
}

pub struct SimpleReport {
    message: String,
}

impl SimpleReport {
    #[must_use]
    pub const fn new(message: String) -> Self {
        Self { message }
    }
}

impl Report for SimpleReport {
    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::error().with_message(&self.message)
    }
}

impl Report for LexNotice {
    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::warning()
            .with_message(self.kind())
            .with_label(Label::primary((), self.span).with_message("ignored"))
    }
}

impl Report for ParseError {
    fn diagnose(&self) -> Diagnostic<()> {
        let label = Label::primary((), self.span);
        let label = match self.kind() {
            ParseErrorKind::UnclosedGroup => label.with_message("this parenthesis is never closed"),
            ParseErrorKind::UnexpectedEnd | ParseErrorKind::ExpectedAtom(_) => label,
        };
        Diagnostic::error()
            .with_message(self.kind())
            .with_label(label)
    }
}

impl Report for EvalError {
    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::error()
            .with_message(self.kind())
            .with_label(Label::primary((), self.span))
    }
}

impl Report for CalcError {
    fn diagnose(&self) -> Diagnostic<()> {
        match self {
            Self::Parse(err) => err.diagnose(),
            Self::Eval(err) => err.diagnose(),
        }
    }
}

#[cfg(test)]
mod test {
    use codespan_reporting::diagnostic::Severity;
    use tallyc::lexer::LexNoticeKind;
    use tallyspan::Span;

    use super::*;

    #[test]
    fn notices_are_warnings() {
        let notice = LexNotice::new(LexNoticeKind::InvalidChar('x'), Span::new(1, 2));
        let diagnostic = notice.diagnose();
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.message, "skipped invalid character 'x'");
        assert_eq!(diagnostic.labels[0].range, 1..2);
    }

    #[test]
    fn errors_shift_with_offset() {
        let err = tallyc::calculate("(1").unwrap_err();
        let diagnostic = err.diagnose_at(10);
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.message, "expected closing parenthesis");
        assert_eq!(diagnostic.labels[0].range, 10..11);
    }
}
