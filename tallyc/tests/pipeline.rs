#![allow(clippy::float_cmp)]

use pretty_assertions::assert_eq;
use tallyc::lexer::{LexNoticeKind, Lexed};
use tallyc::parser::ParseErrorKind;
use tallyc::{CalcError, evaluate, parse, tokenize};

fn run(input: &str) -> f64 {
    let Lexed { tokens, notices } = tokenize(input);
    assert!(notices.is_empty(), "unexpected notices for {input:?}: {notices:?}");
    let forest = parse(tokens).unwrap_or_else(|e| panic!("{input:?} failed to parse: {e}"));
    evaluate(&forest)
        .unwrap_or_else(|e| panic!("{input:?} failed to evaluate: {e}"))
        .unwrap_or_else(|| panic!("{input:?} had no value"))
}

#[test]
fn lexemes_cover_valid_input() {
    let inputs = ["", "1", "2+3*4", "(10.5-2)/3", "2(3+4)", "((1))(2)", "1.2.3*)("];
    for input in inputs {
        let Lexed { tokens, notices } = tokenize(input);
        assert!(notices.is_empty());
        let joined: String = tokens.iter().map(|tk| tk.kind.lexeme()).collect();
        assert_eq!(joined, input);
        for tk in &tokens {
            assert_eq!(tk.span.slice(input), Some(tk.kind.lexeme()));
        }
    }
}

#[test]
fn invalid_characters_only_produce_notices() {
    let Lexed { tokens, notices } = tokenize("4a2");
    assert_eq!(tokens.len(), 2);
    assert_eq!(
        notices.iter().map(|n| n.kind).collect::<Vec<_>>(),
        vec![LexNoticeKind::InvalidChar('a')]
    );
    // the two numbers sit side by side and multiply
    assert_eq!(evaluate(&parse(tokens).unwrap()), Ok(Some(8.0)));
}

#[test]
fn precedence() {
    assert_eq!(run("2+3*4"), 14.0);
    assert_eq!(run("2*3+4*5"), 26.0);
    assert_eq!(run("20/4-1"), 4.0);
}

#[test]
fn grouping() {
    assert_eq!(run("(2+3)*4"), 20.0);
    assert_eq!(run("((2+3))*(4-1)"), 15.0);
    assert_eq!(run("2*(3+(4-1)*2)"), 18.0);
}

#[test]
fn implicit_multiplication() {
    assert_eq!(run("2(3+4)"), 14.0);
    assert_eq!(run("0.5(10)"), 5.0);
    assert_eq!(run("1+2(3)"), 7.0);
}

#[test]
fn juxtaposed_groups() {
    assert_eq!(run("(2)(3)"), 6.0);
    assert_eq!(run("(1+1)(2+2)(3)"), 24.0);
    assert_eq!(run("2(3)4(5)"), 120.0);
}

#[test]
fn left_associativity() {
    assert_eq!(run("10-2-3"), 5.0);
    assert_eq!(run("100/10/5"), 2.0);
    assert_eq!(run("1-2+3"), 2.0);
}

#[test]
fn floating_point() {
    assert_eq!(run("0.1+0.2"), 0.1 + 0.2);
    assert_eq!(run("1/0"), f64::INFINITY);
    assert!(run("0/0").is_nan());
}

#[test]
fn unterminated_group_fails() {
    let err = parse(tokenize("(2+3").tokens).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnclosedGroup);
    assert_eq!(err.to_string(), "expected closing parenthesis");

    let err = parse(tokenize("2((3)").tokens).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnclosedGroup);
}

#[test]
fn missing_operand_fails() {
    assert_eq!(
        parse(tokenize("3*").tokens).unwrap_err().kind,
        ParseErrorKind::UnexpectedEnd
    );
    assert_eq!(
        parse(tokenize("-1").tokens).unwrap_err().kind,
        ParseErrorKind::ExpectedAtom("-".to_owned())
    );
}

#[test]
fn empty_input() {
    let forest = parse(tokenize("").tokens).unwrap();
    assert!(forest.is_empty());
    assert_eq!(evaluate(&forest), Ok(None));
}

#[test]
fn evaluation_is_repeatable() {
    let forest = parse(tokenize("(1.5+2.5)(2)").tokens).unwrap();
    let first = evaluate(&forest);
    let second = evaluate(&forest);
    assert_eq!(first, second);
    assert_eq!(first, Ok(Some(8.0)));
}

#[test]
fn calculate_chains_errors() {
    assert!(matches!(tallyc::calculate(")"), Err(CalcError::Parse(_))));
    assert!(matches!(tallyc::calculate("2.2.2"), Err(CalcError::Eval(_))));
    assert_eq!(tallyc::calculate("7").map(|c| c.value), Ok(Some(7.0)));

    let calculation = tallyc::calculate("1?+1").unwrap();
    assert_eq!(calculation.value, Some(2.0));
    assert_eq!(
        calculation.notices.iter().map(|n| n.kind).collect::<Vec<_>>(),
        vec![LexNoticeKind::InvalidChar('?')]
    );
}
