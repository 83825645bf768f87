//! Runtime error types for the PSC evaluator.

use psc_tokens::InfixOpType;
use psc_types::{DataType, ErrorCode, PscError, Span};
use psc_value::ValueError;
use thiserror::Error;

/// Evaluation error: failed coercions, overflows and unresolved references.
///
/// Like [`ValueError`] these carry no location. The evaluator attaches the
/// span of the failing node through [`EvalError::into_diagnostic`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A value-level failure outside of an operator, e.g. an explicit cast.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// An infix operator rejected its operands.
    #[error("'{op}' cannot be applied to {left} and {right}: {source}")]
    Infix {
        op: InfixOpType,
        left: DataType,
        right: DataType,
        #[source]
        source: ValueError,
    },

    /// A prefix or postfix operator rejected its operand.
    #[error("'{op}' cannot be applied to {operand}: {source}")]
    Unary {
        op: String,
        operand: DataType,
        #[source]
        source: ValueError,
    },

    /// An infix operator with a multi-call on both sides.
    #[error("'{0}' cannot take a multi-call on both sides")]
    MultiCallPair(InfixOpType),

    /// Unknown variable
    #[error("variable '{0}' is not defined")]
    UndefinedVariable(String),

    /// Unknown function
    #[error("function '{0}' is not defined")]
    UndefinedFunction(String),

    /// A call with the wrong number of arguments.
    #[error("'{name}' takes {expected} argument(s), {found} given")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

impl EvalError {
    /// The diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::Value(source)
            | EvalError::Infix { source, .. }
            | EvalError::Unary { source, .. } => source.code(),
            EvalError::MultiCallPair(_) => ErrorCode::INVALID_OPERAND,
            EvalError::UndefinedVariable(_) => ErrorCode::VARIABLE_NOT_FOUND,
            EvalError::UndefinedFunction(_) => ErrorCode::DEFINITION_NOT_FOUND,
            EvalError::ArityMismatch { .. } => ErrorCode::WRONG_ARG_COUNT,
        }
    }

    /// Attach a source location.
    pub fn into_diagnostic(self, span: Span) -> PscError {
        PscError::new(self.code(), self.to_string(), span)
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use psc_types::ErrorCategory;

    #[test]
    fn test_infix_message_names_operator_and_operands() {
        let err = EvalError::Infix {
            op: InfixOpType::And,
            left: DataType::INT,
            right: DataType::TEXT,
            source: ValueError::Casting {
                from: DataType::INT,
                to: DataType::BOOL,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("'and'"), "{msg}");
        assert!(msg.contains("int and text"), "{msg}");
        assert_eq!(err.code(), ErrorCode::CASTING);
    }

    #[test]
    fn test_reference_errors_keep_their_category() {
        let diag = EvalError::UndefinedVariable("x".into()).into_diagnostic(Span::point(4, 2));
        assert_eq!(diag.category, ErrorCategory::UndefinedReference);
        assert_eq!(diag.line(), 4);

        let diag = EvalError::ArityMismatch {
            name: "f".into(),
            expected: 2,
            found: 1,
        }
        .into_diagnostic(Span::point(1, 1));
        assert_eq!(diag.category, ErrorCategory::ArityMismatch);
    }
}
