//! Runtime values of the PSC language.
//!
//! A [`Value`] is a closed tagged union. Numbers are exact: arbitrary
//! precision integers, reduced fractions and the conceptual values NaN and
//! ±Infinity. The cast lattice, cross-kind arithmetic and comparisons live
//! here as methods on [`Value`].

mod arith;
mod cast;
mod compare;
pub mod error;
pub mod number;
pub mod value;

pub use arith::MAX_REPEAT_LEN;
pub use error::{ValueError, ValueResult};
pub use number::{Conceptual, Fraction, Number, MAX_DIGITS, MAX_ROOT_DEGREE, ROOT_PRECISION};
pub use value::{common_type, ArrayValue, Value};
