//! Value lattice tests: canonical fractions, text rendering, cross-kind
//! arithmetic, NaN propagation, casting and the digit ceiling.

use num_bigint::BigInt;
use psc_types::{DataType, SingleType};
use psc_value::{ArrayValue, Number, Value, ValueError, MAX_DIGITS};
use proptest::prelude::*;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn q(n: i64, d: i64) -> Number {
    Number::ratio(n, d).expect("fraction within the digit ceiling")
}

fn nr(n: i64, d: i64) -> Value {
    Value::Number(q(n, d))
}

fn ints(values: &[i64]) -> Value {
    Value::Array(ArrayValue::of(values.iter().map(|v| Value::int(*v)).collect()))
}

fn every_kind() -> Vec<Value> {
    vec![
        Value::Bool(true),
        Value::int(-12),
        nr(7, 3),
        Value::Number(Number::NAN),
        Value::Number(Number::NEG_INF),
        Value::text("hello"),
        Value::Char('x'),
        ints(&[1, 2, 3]),
        Value::Array(ArrayValue::new(DataType::VAR_ARRAY, vec![Value::text("a")])),
        Value::Array(ArrayValue::of(vec![ints(&[1]), ints(&[2, 3])])),
    ]
}

// ─────────────────────────────────────────────────────────────────────
// Canonical fractions
// ─────────────────────────────────────────────────────────────────────

proptest! {
    /// Scaling numerator and denominator by the same factor never changes
    /// the canonical value.
    #[test]
    fn fraction_scaling_is_canonical(
        n in -10_000i64..10_000,
        d in -10_000i64..10_000,
        k in -1_000i64..1_000,
    ) {
        prop_assume!(d != 0 && k != 0);
        let plain = Number::ratio(n, d).unwrap();
        let scaled = Number::ratio(n * k, d * k).unwrap();
        prop_assert_eq!(&plain, &scaled);
        match plain {
            Number::Decimal(f) => {
                prop_assert!(f.denom() > &BigInt::from(1));
                prop_assert!(f.numer() != &BigInt::from(0));
            }
            Number::Int(_) => prop_assert_eq!((n % d), 0),
            Number::Conceptual(_) => prop_assert!(false, "finite ratio became conceptual"),
        }
    }

    /// Addition and subtraction are inverse on exact fractions.
    #[test]
    fn add_then_sub_is_identity(
        a in -1_000i64..1_000, b in 1i64..1_000,
        c in -1_000i64..1_000, d in 1i64..1_000,
    ) {
        let x = q(a, b);
        let y = q(c, d);
        prop_assert_eq!(x.add(&y).unwrap().sub(&y).unwrap(), x);
    }
}

#[test]
fn zero_numerator_collapses_to_int_zero() {
    assert_eq!(q(0, 7), Number::zero());
    assert_eq!(q(0, -7), Number::zero());
}

#[test]
fn zero_denominator_is_nan() {
    assert_eq!(q(3, 0), Number::NAN);
}

// ─────────────────────────────────────────────────────────────────────
// Text
// ─────────────────────────────────────────────────────────────────────

#[test]
fn decimal_text_round_trips() {
    assert_eq!(nr(1, 3).as_text(), "0.(3)");
    assert_eq!(nr(1, 2).as_text(), "0.5");
    assert_eq!(Value::int(7).as_text(), "7");
    assert_eq!(nr(5, 12).as_text(), "0.41(6)");
}

#[test]
fn conceptual_text() {
    assert_eq!(Value::Number(Number::NAN).as_text(), "NaN");
    assert_eq!(Value::Number(Number::POS_INF).as_text(), "Infinity");
    assert_eq!(Value::Number(Number::NEG_INF).as_text(), "-Infinity");
}

#[test]
fn every_value_renders_text() {
    for v in every_kind() {
        assert_eq!(v.cast(DataType::TEXT).unwrap(), Value::text(v.as_text()));
    }
}

// ─────────────────────────────────────────────────────────────────────
// Cross-kind arithmetic
// ─────────────────────────────────────────────────────────────────────

#[test]
fn cross_kind_add() {
    assert_eq!(ints(&[1, 2]).add(&Value::int(3)).unwrap(), ints(&[1, 2, 3]));
    assert_eq!(Value::int(3).add(&ints(&[1, 2])).unwrap(), ints(&[3, 1, 2]));
    assert_eq!(ints(&[1]).add(&ints(&[2])).unwrap(), ints(&[1, 2]));
    assert_eq!(
        Value::text("a").add(&Value::int(1)).unwrap(),
        Value::text("a1")
    );
    assert_eq!(
        Value::Char('a').add(&Value::Char('b')).unwrap(),
        Value::text("ab")
    );
    assert_eq!(nr(1, 2).add(&nr(1, 3)).unwrap(), nr(5, 6));
}

#[test]
fn array_repetition() {
    assert_eq!(
        ints(&[1, 2]).mult(&Value::int(3)).unwrap(),
        ints(&[1, 2, 1, 2, 1, 2])
    );
    assert_eq!(ints(&[]).mult(&Value::int(0)).unwrap(), ints(&[]));
    assert_eq!(ints(&[4]).mult(&Value::int(0)).unwrap().to_string(), "[]");
    assert!(Value::int(-2).mult(&ints(&[1])).is_err());
}

#[test]
fn nan_propagates_through_arithmetic() {
    let nan = Value::Number(Number::NAN);
    let operands = [Value::int(2), nr(1, 2), Value::Number(Number::POS_INF), nan.clone()];
    for other in &operands {
        for result in [
            nan.add(other),
            other.add(&nan),
            nan.sub(other),
            other.sub(&nan),
            nan.mult(other),
            other.mult(&nan),
            nan.div(other),
            other.div(&nan),
            nan.rem(other),
            other.rem(&nan),
            nan.pow(other),
            other.pow(&nan),
            nan.root(other),
            other.root(&nan),
        ] {
            assert!(result.unwrap().is_nan(), "operand {other}");
        }
    }
}

#[test]
fn nan_is_not_equal_to_itself() {
    let nan = Value::Number(Number::NAN);
    assert!(!nan.equals(&nan));
    assert!(nan.compare(&nan).is_none());
}

#[test]
fn division_by_zero_or_infinity_is_nan() {
    assert!(Value::int(1).div(&Value::int(0)).unwrap().is_nan());
    assert!(Value::int(1).rem(&Value::int(0)).unwrap().is_nan());
    assert!(Value::int(1)
        .div(&Value::Number(Number::NEG_INF))
        .unwrap()
        .is_nan());
}

// ─────────────────────────────────────────────────────────────────────
// Casting
// ─────────────────────────────────────────────────────────────────────

#[test]
fn identity_cast_for_every_kind() {
    for v in every_kind() {
        let t = v.data_type();
        assert_eq!(v.cast(t).unwrap(), v, "casting {v} to {t}");
        assert!(v.can_cast_to(t));
    }
}

#[test]
fn var_accepts_everything() {
    for v in every_kind() {
        assert_eq!(v.cast(DataType::VAR).unwrap(), v);
    }
}

#[test]
fn bool_cannot_become_int() {
    assert_eq!(
        Value::Bool(true).cast(DataType::INT),
        Err(ValueError::Casting {
            from: DataType::BOOL,
            to: DataType::INT
        })
    );
}

#[test]
fn narrowing_an_array_revalidates_elements() {
    let generic = Value::Array(ArrayValue::new(
        DataType::VAR_ARRAY,
        vec![Value::int(1), Value::text("2")],
    ));
    let as_ints = generic.cast(DataType::array(SingleType::Int, 1)).unwrap();
    assert_eq!(as_ints, ints(&[1, 2]));

    let bad = Value::Array(ArrayValue::new(DataType::VAR_ARRAY, vec![Value::Bool(true)]));
    assert!(bad.cast(DataType::array(SingleType::Int, 1)).is_err());
}

// ─────────────────────────────────────────────────────────────────────
// Digit ceiling
// ─────────────────────────────────────────────────────────────────────

#[test]
fn digit_ceiling_raises_instead_of_truncating() {
    let max = "9".repeat(MAX_DIGITS);
    let big = Number::parse(&max).unwrap();
    assert_eq!(big.add(&Number::one()), Err(ValueError::DigitLimit));
    assert_eq!(Number::ratio(1, big.trunc().unwrap() + 2), Err(ValueError::DigitLimit));
}

#[test]
fn digit_ceiling_maps_to_arithmetic_overflow() {
    use psc_types::{ErrorCategory, Span};
    let err = ValueError::DigitLimit.into_diagnostic(Span::point(4, 2));
    assert_eq!(err.category, ErrorCategory::ArithmeticOverflow);
    assert_eq!(err.line(), 4);
}

#[test]
fn arithmetic_determinism_100_iterations() {
    let first = nr(1, 7).add(&nr(2, 9)).unwrap().pow(&Value::int(3)).unwrap();
    for i in 0..100 {
        let again = nr(1, 7).add(&nr(2, 9)).unwrap().pow(&Value::int(3)).unwrap();
        assert_eq!(first, again, "Determinism failure at iteration {i}");
    }
}
