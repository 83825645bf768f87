//! Value-level error types.

use psc_types::{DataType, ErrorCode, PscError, Span};
use thiserror::Error;

use crate::number::MAX_DIGITS;

/// Errors raised while coercing or combining values.
///
/// These carry no source location; the evaluator attaches one with
/// [`ValueError::into_diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The value cannot be coerced to the requested type.
    #[error("{from} cannot be casted to {to}")]
    Casting { from: DataType, to: DataType },

    /// Array casts require equal dimensions.
    #[error("cannot cast {from} to {to}: the arrays have different dimensions")]
    InvalidDimension { from: DataType, to: DataType },

    /// A numerator, denominator or integer would exceed the digit ceiling.
    #[error("numbers cannot exceed {MAX_DIGITS} digits")]
    DigitLimit,

    /// A root degree too large to be computed.
    #[error("root degree {0} is too large")]
    RootDegree(String),

    /// Array or text repetition with an unusable count.
    #[error("cannot repeat a value {0} times")]
    InvalidRepetition(String),

    /// Array access outside of `0..len`.
    #[error("index {index} is out of bounds for an array of length {len}")]
    IndexOutOfBounds { index: String, len: usize },

    /// The operand is of the right type but outside the operation's domain.
    #[error("{0}")]
    InvalidOperand(String),
}

impl ValueError {
    /// The diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValueError::Casting { .. } | ValueError::InvalidRepetition(_) => ErrorCode::CASTING,
            ValueError::InvalidDimension { .. } => ErrorCode::INVALID_DIMENSION,
            ValueError::DigitLimit | ValueError::RootDegree(_) => ErrorCode::DIGIT_LIMIT_EXCEEDED,
            ValueError::IndexOutOfBounds { .. } => ErrorCode::INDEX_OUT_OF_BOUNDS,
            ValueError::InvalidOperand(_) => ErrorCode::INVALID_OPERAND,
        }
    }

    /// Attach a source location.
    pub fn into_diagnostic(self, span: Span) -> PscError {
        PscError::new(self.code(), self.to_string(), span)
    }
}

/// Result alias for value operations.
pub type ValueResult<T> = Result<T, ValueError>;
