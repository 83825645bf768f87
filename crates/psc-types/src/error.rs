use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of errors kept by a [`Diagnostics`] collector.
pub const MAX_ERRORS: usize = 20;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Merge time: illegal token order, unmatched delimiters, limits.
    StructuralFormat,
    /// Evaluation time: an operand cannot be coerced.
    Casting,
    /// Evaluation time: the digit ceiling was exceeded.
    ArithmeticOverflow,
    /// Raised by the name-resolution collaborator.
    UndefinedReference,
    /// Raised by the call-dispatch collaborator.
    ArityMismatch,
}

/// Numeric error code (E100–E599).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Structural errors (E100–E199) ──
    pub const ILLEGAL_CODE_FORMAT: Self = Self(100);
    pub const UNCLOSED_BRACKET: Self = Self(101);
    pub const UNCLOSED_ARRAY: Self = Self(102);
    pub const MISSING_OPERAND: Self = Self(103);
    pub const UNEXPECTED_END: Self = Self(104);
    pub const STRUCTURAL_LIMIT_EXCEEDED: Self = Self(105);

    // ── Casting errors (E200–E299) ──
    pub const CASTING: Self = Self(200);
    pub const INVALID_DIMENSION: Self = Self(201);
    pub const INDEX_OUT_OF_BOUNDS: Self = Self(202);
    pub const INVALID_OPERAND: Self = Self(203);

    // ── Arithmetic errors (E300–E399) ──
    pub const DIGIT_LIMIT_EXCEEDED: Self = Self(300);

    // ── Undefined references (E400–E499) ──
    pub const VARIABLE_NOT_FOUND: Self = Self(400);
    pub const DEFINITION_NOT_FOUND: Self = Self(401);

    // ── Arity errors (E500–E599) ──
    pub const WRONG_ARG_COUNT: Self = Self(500);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::StructuralFormat,
            200..=299 => ErrorCategory::Casting,
            300..=399 => ErrorCategory::ArithmeticOverflow,
            400..=499 => ErrorCategory::UndefinedReference,
            500..=599 => ErrorCategory::ArityMismatch,
            _ => ErrorCategory::StructuralFormat, // fallback
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A structured error produced anywhere in the expression core.
///
/// Carries the category tag, the originating line (inside the span) and a
/// human-readable message. The driver decides whether to halt or continue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PscError {
    /// Error code (e.g., E200).
    pub code: ErrorCode,
    /// Error category (derived from code).
    pub category: ErrorCategory,
    /// Human-readable error message.
    pub message: String,
    /// Source location.
    #[serde(flatten)]
    pub span: Span,
    /// Optional fix suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl PscError {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            category: code.category(),
            message: message.into(),
            span,
            suggestion: None,
        }
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// The source line this error originates from.
    pub fn line(&self) -> u32 {
        self.span.line
    }
}

impl fmt::Display for PscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.span, self.code, self.category, self.message
        )
    }
}

impl std::error::Error for PscError {}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructuralFormat => write!(f, "structural"),
            Self::Casting => write!(f, "casting"),
            Self::ArithmeticOverflow => write!(f, "arithmetic overflow"),
            Self::UndefinedReference => write!(f, "undefined reference"),
            Self::ArityMismatch => write!(f, "arity mismatch"),
        }
    }
}

/// Errors collected by a report-and-continue driver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<PscError>,
    pub total_errors: usize,
}

impl Diagnostics {
    /// Create an empty collector.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Add an error, respecting the MAX_ERRORS limit.
    pub fn push_error(&mut self, error: PscError) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    /// Serialize the collected errors as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::ILLEGAL_CODE_FORMAT.category(),
            ErrorCategory::StructuralFormat
        );
        assert_eq!(ErrorCode::CASTING.category(), ErrorCategory::Casting);
        assert_eq!(
            ErrorCode::DIGIT_LIMIT_EXCEEDED.category(),
            ErrorCategory::ArithmeticOverflow
        );
        assert_eq!(
            ErrorCode::VARIABLE_NOT_FOUND.category(),
            ErrorCategory::UndefinedReference
        );
        assert_eq!(
            ErrorCode::WRONG_ARG_COUNT.category(),
            ErrorCategory::ArityMismatch
        );
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::CASTING), "E200");
        assert_eq!(format!("{}", ErrorCode::ILLEGAL_CODE_FORMAT), "E100");
    }

    #[test]
    fn test_psc_error_creation() {
        let err = PscError::new(
            ErrorCode::CASTING,
            "bool cannot be casted to an int",
            Span::new(12, 5, 22),
        );
        assert_eq!(err.category, ErrorCategory::Casting);
        assert_eq!(err.line(), 12);
        assert_eq!(
            err.to_string(),
            "12:5: E200 [casting] bool cannot be casted to an int"
        );
    }

    #[test]
    fn test_psc_error_with_suggestion() {
        let err = PscError::new(ErrorCode::UNCLOSED_BRACKET, "missing ')'", Span::point(1, 1))
            .with_suggestion("close the bracket opened here");
        assert_eq!(
            err.suggestion.as_deref(),
            Some("close the bracket opened here")
        );
    }

    #[test]
    fn test_psc_error_json_round_trip() {
        let err = PscError::new(
            ErrorCode::DIGIT_LIMIT_EXCEEDED,
            "numbers cannot exceed 100 digits",
            Span::new(3, 1, 9),
        );
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"category\":\"arithmetic_overflow\""));
        assert!(json.contains("\"line\":3"));
        assert!(!json.contains("\"suggestion\""));

        let back: PscError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_diagnostics_max_limit() {
        let mut diags = Diagnostics::empty();
        for i in 0..25 {
            diags.push_error(PscError::new(
                ErrorCode::ILLEGAL_CODE_FORMAT,
                format!("Error {i}"),
                Span::point(i as u32 + 1, 1),
            ));
        }
        assert_eq!(diags.errors.len(), 20);
        assert_eq!(diags.total_errors, 25);
        assert!(diags.has_errors());
    }

    #[test]
    fn test_diagnostics_json_output() {
        let mut diags = Diagnostics::empty();
        assert!(!diags.has_errors());
        diags.push_error(PscError::new(
            ErrorCode::VARIABLE_NOT_FOUND,
            "variable 'x' not found",
            Span::point(1, 1),
        ));
        let json = diags.to_json().unwrap();
        assert!(json.contains("\"total_errors\":1"));
        assert!(json.contains("\"undefined_reference\""));
    }
}
