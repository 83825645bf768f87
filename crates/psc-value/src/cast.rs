//! Coercions and explicit casts.
//!
//! | from \ to | bool | nr | int | text | char | arrays |
//! |---|---|---|---|---|---|---|
//! | bool | self | NaN | - | `true`/`false` | - | - |
//! | int | 0, 1 | self | self | digits | single digit | `int[]` of digits |
//! | decimal | - | self | truncated | expansion | - | - |
//! | conceptual | - | self | - | name | - | - |
//! | text | `true`/`false` | NaN | parsed | self | length one | `char[]`, `text[]` |
//! | char | - | NaN | digit | itself | self | - |
//! | array | - | NaN | - | `[a, b]` | - | same dimensions |
//!
//! `-` is a casting error. Casting to `var` or to the value's own type is the
//! identity.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use psc_types::{DataType, SingleType};

use crate::error::{ValueError, ValueResult};
use crate::number::Number;
use crate::value::{ArrayValue, Value};

impl Value {
    fn casting(&self, to: DataType) -> ValueError {
        ValueError::Casting {
            from: self.data_type(),
            to,
        }
    }

    pub fn as_bool(&self) -> ValueResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Number(Number::Int(n)) if n.is_zero() => Ok(false),
            Value::Number(Number::Int(n)) if n.is_one() => Ok(true),
            Value::Text(s) if s == "true" => Ok(true),
            Value::Text(s) if s == "false" => Ok(false),
            _ => Err(self.casting(DataType::BOOL)),
        }
    }

    /// Numbers are themselves, everything else is NaN.
    pub fn as_number(&self) -> Number {
        match self {
            Value::Number(n) => n.clone(),
            _ => Number::NAN,
        }
    }

    pub fn as_int(&self) -> ValueResult<Number> {
        let fail = || self.casting(DataType::INT);
        match self {
            Value::Number(n) => n.trunc().map(Number::Int).ok_or_else(fail),
            Value::Text(s) => {
                let body = s.strip_prefix('-').unwrap_or(s);
                if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(fail());
                }
                let n: BigInt = s.parse().map_err(|_| fail())?;
                Number::int(n)
            }
            Value::Char(c) => c
                .to_digit(10)
                .map(|d| Number::from(i64::from(d)))
                .ok_or_else(fail),
            Value::Bool(_) | Value::Array(_) => Err(fail()),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn as_char(&self) -> ValueResult<char> {
        match self {
            Value::Char(c) => Ok(*c),
            Value::Text(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(self.casting(DataType::CHAR)),
                }
            }
            Value::Number(Number::Int(n)) if !n.is_negative() && n < &BigInt::from(10u8) => {
                let digit = n.to_string();
                digit.chars().next().ok_or_else(|| self.casting(DataType::CHAR))
            }
            _ => Err(self.casting(DataType::CHAR)),
        }
    }

    /// Convert to `target`.
    pub fn cast(&self, target: DataType) -> ValueResult<Value> {
        if target == self.data_type() || target == DataType::VAR {
            return Ok(self.clone());
        }
        if target.is_array() {
            return self.cast_to_array(target);
        }
        match target.base {
            SingleType::Var => Ok(self.clone()),
            SingleType::Bool => self.as_bool().map(Value::Bool),
            SingleType::Nr => Ok(Value::Number(self.as_number())),
            SingleType::Int => self.as_int().map(Value::Number),
            SingleType::Text => Ok(Value::Text(self.as_text())),
            SingleType::Char => self.as_char().map(Value::Char),
        }
    }

    /// Returns `true` if [`Value::cast`] to `target` would succeed.
    pub fn can_cast_to(&self, target: DataType) -> bool {
        self.cast(target).is_ok()
    }

    fn cast_to_array(&self, target: DataType) -> ValueResult<Value> {
        let element_type = target.element_type().unwrap_or(DataType::VAR);
        let parts: Vec<Value> = match self {
            Value::Array(a) => {
                if a.declared_type().dims != target.dims {
                    return Err(ValueError::InvalidDimension {
                        from: a.declared_type(),
                        to: target,
                    });
                }
                a.elements().to_vec()
            }
            Value::Number(Number::Int(n)) if !n.is_negative() && target.dims == 1 => n
                .to_string()
                .chars()
                .filter_map(|c| c.to_digit(10))
                .map(|d| Value::int(i64::from(d)))
                .collect(),
            Value::Text(s) if target.dims == 1 => s.chars().map(Value::Char).collect(),
            _ => return Err(self.casting(target)),
        };
        let elements = parts
            .iter()
            .map(|v| v.cast(element_type))
            .collect::<ValueResult<Vec<_>>>()
            .map_err(|_| self.casting(target))?;
        Ok(Value::Array(ArrayValue::new(target, elements)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr(values: Vec<Value>) -> Value {
        Value::Array(ArrayValue::of(values))
    }

    fn half() -> Value {
        Value::Number(Number::ratio(1, 2).unwrap())
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(Value::int(0).as_bool(), Ok(false));
        assert_eq!(Value::int(1).as_bool(), Ok(true));
        assert!(Value::int(2).as_bool().is_err());
        assert_eq!(Value::text("true").as_bool(), Ok(true));
        assert!(Value::text("yes").as_bool().is_err());
        assert!(half().as_bool().is_err());
    }

    #[test]
    fn test_as_number_defaults_to_nan() {
        assert!(Value::text("5").as_number().is_nan());
        assert!(Value::Bool(true).as_number().is_nan());
        assert_eq!(Value::int(5).as_number(), Number::from(5));
    }

    #[test]
    fn test_as_int() {
        assert_eq!(half().as_int(), Ok(Number::from(0)));
        assert_eq!(
            Value::Number(Number::ratio(-7, 2).unwrap()).as_int(),
            Ok(Number::from(-3))
        );
        assert_eq!(Value::text("-42").as_int(), Ok(Number::from(-42)));
        assert!(Value::text("4x").as_int().is_err());
        assert_eq!(Value::Char('7').as_int(), Ok(Number::from(7)));
        assert!(Value::Number(Number::NAN).as_int().is_err());
        assert_eq!(
            Value::Bool(true).as_int(),
            Err(ValueError::Casting {
                from: DataType::BOOL,
                to: DataType::INT
            })
        );
    }

    #[test]
    fn test_as_char() {
        assert_eq!(Value::text("x").as_char(), Ok('x'));
        assert!(Value::text("xy").as_char().is_err());
        assert_eq!(Value::int(4).as_char(), Ok('4'));
        assert!(Value::int(12).as_char().is_err());
    }

    #[test]
    fn test_cast_to_var_is_identity() {
        for v in [Value::Bool(false), half(), Value::text("t"), arr(vec![])] {
            assert_eq!(v.cast(DataType::VAR).unwrap(), v);
        }
    }

    #[test]
    fn test_cast_int_to_digit_array() {
        let digits = Value::int(305)
            .cast(DataType::array(SingleType::Int, 1))
            .unwrap();
        assert_eq!(digits.to_string(), "[3, 0, 5]");
        assert!(Value::int(-5)
            .cast(DataType::array(SingleType::Int, 1))
            .is_err());
    }

    #[test]
    fn test_cast_text_to_char_array() {
        let chars = Value::text("ab")
            .cast(DataType::array(SingleType::Char, 1))
            .unwrap();
        match chars {
            Value::Array(a) => {
                assert_eq!(a.elements(), &[Value::Char('a'), Value::Char('b')]);
                assert_eq!(a.declared_type(), DataType::array(SingleType::Char, 1));
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_array_cast_rechecks_elements() {
        let ints = arr(vec![Value::int(1), Value::int(2)]);
        let texts = ints.cast(DataType::array(SingleType::Text, 1)).unwrap();
        assert_eq!(texts.data_type(), DataType::array(SingleType::Text, 1));

        let words = arr(vec![Value::text("a")]);
        assert!(words.cast(DataType::array(SingleType::Int, 1)).is_err());
    }

    #[test]
    fn test_array_cast_requires_equal_dimensions() {
        let ints = arr(vec![Value::int(1)]);
        assert!(matches!(
            ints.cast(DataType::array(SingleType::Int, 2)),
            Err(ValueError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_var_target_does_not_relax_dimensions() {
        let ints = arr(vec![Value::int(12), Value::int(3)]);
        assert!(matches!(
            ints.cast(DataType::array(SingleType::Var, 2)),
            Err(ValueError::InvalidDimension { .. })
        ));
        let widened = ints.cast(DataType::VAR_ARRAY).unwrap();
        assert_eq!(widened.to_string(), "[12, 3]");
        assert_eq!(widened.data_type(), DataType::VAR_ARRAY);
    }

    #[test]
    fn test_scalar_to_array_fails() {
        assert!(Value::Bool(true).cast(DataType::VAR_ARRAY).is_err());
        assert!(!half().can_cast_to(DataType::VAR_ARRAY));
        assert!(Value::text("ab").can_cast_to(DataType::array(SingleType::Text, 1)));
    }
}
