use tallyspan::Spand;
use thiserror::Error;

use crate::ast::{Expr, ExprKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalErrorKind {
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

pub type EvalError = Spand<EvalErrorKind>;
pub type EvalResult<T> = Result<T, EvalError>;

/// Multiplies the top-level expressions together.
///
/// Returns `None` for an empty forest: there was nothing to evaluate.
pub fn evaluate(forest: &[Expr<'_>]) -> EvalResult<Option<f64>> {
    if forest.is_empty() {
        return Ok(None);
    }

    let value = forest
        .iter()
        .try_fold(1.0, |acc, expr| eval_expr(expr).map(|value| acc * value))?;
    tracing::debug!(nodes = forest.len(), value, "evaluated forest");
    Ok(Some(value))
}

pub fn eval_expr(expr: &Expr<'_>) -> EvalResult<f64> {
    match &expr.kind {
        ExprKind::Number(lit) => lit.parse().map_err(|_| {
            EvalError::new(EvalErrorKind::InvalidNumber((*lit).to_owned()), expr.span)
        }),
        ExprKind::Grouping(inner) => eval_expr(inner),
        ExprKind::Binary { op, lhs, rhs } => {
            let lhs = eval_expr(lhs)?;
            let rhs = eval_expr(rhs)?;
            Ok(op.kind.apply(lhs, rhs))
        }
    }
}
