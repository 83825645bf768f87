//! Arithmetic across value kinds.
//!
//! Only `+` and `*` look at the operand kinds; every other operator works on
//! [`Value::as_number`], so non-numeric operands quietly become NaN.

use num_traits::{Signed, ToPrimitive};

use crate::error::{ValueError, ValueResult};
use crate::number::Number;
use crate::value::Value;

/// Largest array or text a repetition may produce.
pub const MAX_REPEAT_LEN: usize = 1 << 20;

impl Value {
    /// In order of priority: array concatenation, numeric sum, append,
    /// prepend and finally text concatenation.
    pub fn add(&self, other: &Value) -> ValueResult<Value> {
        Ok(match (self, other) {
            (Value::Array(a), Value::Array(b)) => Value::Array(a.concat(b)),
            (Value::Number(a), Value::Number(b)) => Value::Number(a.add(b)?),
            (Value::Array(a), v) => Value::Array(a.append(v.clone())),
            (v, Value::Array(b)) => Value::Array(b.prepend(v.clone())),
            (a, b) => Value::Text(format!("{}{}", a.as_text(), b.as_text())),
        })
    }

    pub fn sub(&self, other: &Value) -> ValueResult<Value> {
        self.as_number().sub(&other.as_number()).map(Value::Number)
    }

    /// Array and text repetition by an integer count from either side,
    /// numeric product otherwise.
    pub fn mult(&self, other: &Value) -> ValueResult<Value> {
        match (self, other) {
            (Value::Array(a), Value::Number(Number::Int(n)))
            | (Value::Number(Number::Int(n)), Value::Array(a)) => {
                Ok(Value::Array(a.repeat(repetitions(n, a.len())?)))
            }
            (Value::Text(s), Value::Number(Number::Int(n)))
            | (Value::Number(Number::Int(n)), Value::Text(s)) => {
                Ok(Value::Text(s.repeat(repetitions(n, s.len())?)))
            }
            _ => self.as_number().mult(&other.as_number()).map(Value::Number),
        }
    }

    pub fn div(&self, other: &Value) -> ValueResult<Value> {
        self.as_number().div(&other.as_number()).map(Value::Number)
    }

    pub fn rem(&self, other: &Value) -> ValueResult<Value> {
        self.as_number().rem(&other.as_number()).map(Value::Number)
    }

    pub fn pow(&self, other: &Value) -> ValueResult<Value> {
        self.as_number().pow(&other.as_number()).map(Value::Number)
    }

    /// `self` is the degree, `other` the radicand: `2 root 9` is 3.
    pub fn root(&self, other: &Value) -> ValueResult<Value> {
        self.as_number().root(&other.as_number()).map(Value::Number)
    }

    pub fn neg(&self) -> Value {
        Value::Number(self.as_number().neg())
    }

    pub fn factorial(&self) -> ValueResult<Value> {
        self.as_number().factorial().map(Value::Number)
    }
}

/// The count `n` for repeating something of length `len`.
///
/// An empty operand repeats to an empty result for any non-negative count.
fn repetitions(n: &num_bigint::BigInt, len: usize) -> ValueResult<usize> {
    let reject = || {
        tracing::warn!(count = %n, len, "repetition rejected");
        ValueError::InvalidRepetition(n.to_string())
    };
    if n.is_negative() {
        return Err(reject());
    }
    if len == 0 {
        return Ok(0);
    }
    n.to_usize()
        .filter(|c| c.checked_mul(len).is_some_and(|total| total <= MAX_REPEAT_LEN))
        .ok_or_else(reject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ArrayValue;

    fn arr(values: &[i64]) -> Value {
        Value::Array(ArrayValue::of(values.iter().map(|v| Value::int(*v)).collect()))
    }

    #[test]
    fn test_add_priority() {
        assert_eq!(arr(&[1, 2]).add(&Value::int(3)).unwrap(), arr(&[1, 2, 3]));
        assert_eq!(Value::int(3).add(&arr(&[1, 2])).unwrap(), arr(&[3, 1, 2]));
        assert_eq!(arr(&[1]).add(&arr(&[2])).unwrap(), arr(&[1, 2]));
        assert_eq!(
            Value::text("a").add(&Value::int(1)).unwrap(),
            Value::text("a1")
        );
        assert_eq!(Value::int(1).add(&Value::int(2)).unwrap(), Value::int(3));
        assert_eq!(
            Value::Bool(true).add(&Value::Char('!')).unwrap(),
            Value::text("true!")
        );
    }

    #[test]
    fn test_mult_repetition() {
        assert_eq!(
            arr(&[1, 2]).mult(&Value::int(3)).unwrap(),
            arr(&[1, 2, 1, 2, 1, 2])
        );
        assert_eq!(arr(&[]).mult(&Value::int(0)).unwrap(), arr(&[]));
        assert_eq!(
            Value::int(2).mult(&Value::text("ab")).unwrap(),
            Value::text("abab")
        );
        assert!(matches!(
            arr(&[1]).mult(&Value::int(-1)),
            Err(ValueError::InvalidRepetition(_))
        ));
        assert!(Value::text("ab").mult(&Value::int(1 << 40)).is_err());
    }

    #[test]
    fn test_empty_repetition_ignores_count() {
        assert_eq!(arr(&[]).mult(&Value::int(100_000_000_000)).unwrap(), arr(&[]));
        assert_eq!(
            Value::int(i64::MAX).mult(&Value::text("")).unwrap(),
            Value::text("")
        );
        assert!(matches!(
            arr(&[]).mult(&Value::int(-1)),
            Err(ValueError::InvalidRepetition(_))
        ));
    }

    #[test]
    fn test_numeric_only_operators_propagate_nan() {
        let text = Value::text("x");
        for result in [
            text.sub(&Value::int(1)),
            Value::int(1).div(&text),
            text.rem(&Value::int(2)),
            text.pow(&Value::int(2)),
            Value::int(2).root(&text),
        ] {
            assert!(result.unwrap().is_nan());
        }
    }

    #[test]
    fn test_root_operand_order() {
        assert_eq!(Value::int(2).root(&Value::int(9)).unwrap(), Value::int(3));
        assert_eq!(Value::int(3).root(&Value::int(8)).unwrap(), Value::int(2));
    }
}
