//! PSC operation evaluator.
//!
//! Merges a classified token line into an expression tree and evaluates it
//! against a [`Runtime`]. [`Environment`] is the reference runtime: scoped
//! variables plus a table of native functions.

pub mod env;
pub mod error;
pub mod evaluator;
pub mod operator;
pub mod runtime;

pub use env::{Environment, NativeFn};
pub use error::{EvalError, EvalResult};
pub use evaluator::{evaluate, Evaluator};
pub use operator::perform;
pub use runtime::Runtime;

use psc_parser::Merger;
use psc_tokens::Token;
use psc_types::{Diagnostics, Limits, Result};
use psc_value::Value;

/// Merge and evaluate one token line under the default limits.
pub fn evaluate_line<R: Runtime + ?Sized>(tokens: &[Token], runtime: &mut R) -> Result<Value> {
    evaluate_line_with(tokens, runtime, Limits::default())
}

/// Merge and evaluate one token line.
pub fn evaluate_line_with<R: Runtime + ?Sized>(
    tokens: &[Token],
    runtime: &mut R,
    limits: Limits,
) -> Result<Value> {
    let expr = Merger::new(tokens, limits).merge_line()?;
    let value = evaluate(&expr, runtime)?;
    tracing::debug!(line = expr.span.line, value = %value, "evaluated line");
    Ok(value)
}

/// Outcome of evaluating several lines.
#[derive(Debug, Clone, Default)]
pub struct LineReport {
    /// One entry per line, `None` where the line failed.
    pub values: Vec<Option<Value>>,
    pub diagnostics: Diagnostics,
}

/// Evaluate every line in order, collecting failures instead of stopping at
/// the first one.
pub fn evaluate_lines<R: Runtime + ?Sized>(
    lines: &[Vec<Token>],
    runtime: &mut R,
    limits: Limits,
) -> LineReport {
    let mut report = LineReport::default();
    for tokens in lines {
        match evaluate_line_with(tokens, runtime, limits) {
            Ok(value) => report.values.push(Some(value)),
            Err(err) => {
                tracing::debug!(code = %err.code, line = err.line(), "line failed");
                report.diagnostics.push_error(err);
                report.values.push(None);
            }
        }
    }
    report
}
