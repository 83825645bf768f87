//! Equality, ordering and membership.

use std::cmp::Ordering;

use psc_types::DataType;

use crate::error::{ValueError, ValueResult};
use crate::value::Value;

impl Value {
    /// Language equality.
    ///
    /// Numbers compare numerically and NaN equals nothing. Text and chars
    /// compare by their text. Arrays compare element-wise regardless of their
    /// declared types. Any other pairing of kinds is unequal.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.num_eq(b),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(_) | Value::Char(_), Value::Text(_) | Value::Char(_)) => {
                self.as_text() == other.as_text()
            }
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && a
                        .elements()
                        .iter()
                        .zip(b.elements())
                        .all(|(x, y)| x.equals(y))
            }
            _ => false,
        }
    }

    /// Numeric ordering through [`Value::as_number`]; `None` whenever either
    /// side is NaN.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        self.as_number().compare(&other.as_number())
    }

    /// `element in self`: membership in an array, or a substring of text.
    pub fn contains(&self, element: &Value) -> ValueResult<bool> {
        match self {
            Value::Array(a) => Ok(a.elements().iter().any(|v| v.equals(element))),
            Value::Text(s) => Ok(s.contains(element.as_text().as_str())),
            _ => Err(ValueError::Casting {
                from: self.data_type(),
                to: DataType::VAR_ARRAY,
            }),
        }
    }
}
