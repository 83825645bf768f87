//! Shared types for the PSC expression core.
//!
//! This crate defines source spans, the data-type names shared by the
//! token taxonomy and the value lattice, the structured error type every stage
//! reports through, and the structural limits applied while merging.

mod data_type;
mod error;
mod limits;
mod span;

pub use data_type::{DataType, SingleType};
pub use error::{Diagnostics, ErrorCategory, ErrorCode, PscError, MAX_ERRORS};
pub use limits::Limits;
pub use span::Span;

/// Result type used throughout the PSC expression core.
pub type Result<T> = std::result::Result<T, PscError>;
