//! Exact numbers: arbitrary precision integers, reduced fractions and the
//! conceptual values NaN, +Infinity and -Infinity.
//!
//! Every constructor and every arithmetic operation goes through
//! [`Number::ratio`] (or [`Number::int`]), which keeps the representation
//! canonical:
//!
//! - a zero denominator becomes NaN,
//! - fractions are reduced and carry their sign on the numerator,
//! - a denominator of one demotes to an integer,
//! - no component may exceed [`MAX_DIGITS`] digits.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{ValueError, ValueResult};

/// Maximum number of decimal digits of an integer, numerator or denominator.
pub const MAX_DIGITS: usize = 100;

/// Decimal places kept when a root has no exact rational value.
pub const ROOT_PRECISION: u32 = 40;

/// Largest root degree that is computed.
pub const MAX_ROOT_DEGREE: u32 = 256;

/// Every integer below `2^SAFE_BITS` has at most [`MAX_DIGITS`] digits.
const SAFE_BITS: u64 = 332;

/// Every integer of at least `2^UNSAFE_BITS` has more than [`MAX_DIGITS`] digits.
const UNSAFE_BITS: u64 = 333;

/// Number of decimal digits in `n`, ignoring the sign.
pub fn digit_count(n: &BigInt) -> usize {
    n.magnitude().to_str_radix(10).len()
}

fn check_digits(n: &BigInt) -> ValueResult<()> {
    if n.bits() <= SAFE_BITS || digit_count(n) <= MAX_DIGITS {
        Ok(())
    } else {
        tracing::warn!(max = MAX_DIGITS, "digit limit hit");
        Err(ValueError::DigitLimit)
    }
}

/// The non-finite numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conceptual {
    NaN,
    PosInf,
    NegInf,
}

impl fmt::Display for Conceptual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conceptual::NaN => f.write_str("NaN"),
            Conceptual::PosInf => f.write_str("Infinity"),
            Conceptual::NegInf => f.write_str("-Infinity"),
        }
    }
}

/// A reduced fraction that is not an integer.
///
/// Only constructible through [`Number::ratio`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: BigInt,
    denom: BigInt,
}

impl Fraction {
    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    /// Always greater than one.
    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    /// `n/d` notation.
    pub fn as_rational(&self) -> String {
        format!("{}/{}", self.num, self.denom)
    }

    /// Truncate toward zero.
    pub fn trunc(&self) -> BigInt {
        &self.num / &self.denom
    }
}

/// Renders the decimal expansion with the repeating block in parentheses,
/// e.g. `0.(3)` for one third and `0.1(6)` for one sixth.
///
/// Expansions longer than [`MAX_DIGITS`] characters are cut off.
impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        if self.num.is_negative() {
            out.push('-');
        }
        let num = self.num.abs();
        let (int_part, mut rem) = num.div_rem(&self.denom);
        out.push_str(&int_part.to_string());
        out.push('.');

        let mut seen: HashMap<BigInt, usize> = HashMap::new();
        let mut cut_off = false;
        while !rem.is_zero() {
            if let Some(&start) = seen.get(&rem) {
                out.insert(start, '(');
                out.push(')');
                break;
            }
            if out.len() >= MAX_DIGITS {
                cut_off = true;
                break;
            }
            seen.insert(rem.clone(), out.len());
            rem *= 10u8;
            let (digit, next) = rem.div_rem(&self.denom);
            out.push_str(&digit.to_string());
            rem = next;
        }
        if cut_off {
            let trimmed = out.trim_end_matches('0');
            return f.write_str(trimmed.strip_suffix('.').unwrap_or(trimmed));
        }
        f.write_str(&out)
    }
}

/// An exact number.
///
/// Equality is structural, which the canonical form makes numeric for finite
/// values. Language equality, where NaN equals nothing, is
/// [`Number::num_eq`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Number {
    Int(BigInt),
    Decimal(Fraction),
    Conceptual(Conceptual),
}

impl Number {
    pub const NAN: Number = Number::Conceptual(Conceptual::NaN);
    pub const POS_INF: Number = Number::Conceptual(Conceptual::PosInf);
    pub const NEG_INF: Number = Number::Conceptual(Conceptual::NegInf);

    pub fn zero() -> Number {
        Number::Int(BigInt::zero())
    }

    pub fn one() -> Number {
        Number::Int(BigInt::one())
    }

    /// An integer, checked against the digit ceiling.
    pub fn int(n: impl Into<BigInt>) -> ValueResult<Number> {
        let n = n.into();
        check_digits(&n)?;
        Ok(Number::Int(n))
    }

    /// The canonical form of `num / denom`.
    pub fn ratio(num: impl Into<BigInt>, denom: impl Into<BigInt>) -> ValueResult<Number> {
        let (mut num, mut denom) = (num.into(), denom.into());
        if denom.is_zero() {
            return Ok(Number::NAN);
        }
        if num.is_zero() {
            return Ok(Number::zero());
        }
        let gcd = num.gcd(&denom);
        if !gcd.is_one() {
            num /= &gcd;
            denom /= &gcd;
        }
        if denom.is_negative() {
            num = -num;
            denom = -denom;
        }
        if denom.is_one() {
            return Number::int(num);
        }
        check_digits(&num)?;
        check_digits(&denom)?;
        Ok(Number::Decimal(Fraction { num, denom }))
    }

    /// Parse a numeric literal: `NaN`, `Infinity`, `-Infinity`, digits with an
    /// optional sign and an optional fractional part.
    pub fn parse(s: &str) -> ValueResult<Number> {
        match s {
            "NaN" => return Ok(Number::NAN),
            "Infinity" => return Ok(Number::POS_INF),
            "-Infinity" => return Ok(Number::NEG_INF),
            _ => {}
        }
        let malformed = || ValueError::InvalidOperand(format!("'{s}' is not a number"));
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty()
            || !all_digits(int_part)
            || !all_digits(frac_part)
            || (body.contains('.') && frac_part.is_empty())
        {
            return Err(malformed());
        }
        let digits = format!("{int_part}{frac_part}");
        let mut num: BigInt = digits.parse().map_err(|_| malformed())?;
        if negative {
            num = -num;
        }
        let frac_len = u32::try_from(frac_part.len()).map_err(|_| ValueError::DigitLimit)?;
        Number::ratio(num, BigInt::from(10u8).pow(frac_len))
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Number::Conceptual(Conceptual::NaN))
    }

    pub fn is_infinite(&self) -> bool {
        matches!(
            self,
            Number::Conceptual(Conceptual::PosInf | Conceptual::NegInf)
        )
    }

    pub fn is_finite(&self) -> bool {
        !matches!(self, Number::Conceptual(_))
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Number::Int(n) if n.is_zero())
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// `-1`, `0` or `1`; `None` for NaN.
    pub fn signum(&self) -> Option<i8> {
        match self {
            Number::Int(n) => Some(sign_of(n)),
            Number::Decimal(f) => Some(sign_of(&f.num)),
            Number::Conceptual(Conceptual::PosInf) => Some(1),
            Number::Conceptual(Conceptual::NegInf) => Some(-1),
            Number::Conceptual(Conceptual::NaN) => None,
        }
    }

    fn is_positive(&self) -> bool {
        self.signum() == Some(1)
    }

    fn is_negative(&self) -> bool {
        self.signum() == Some(-1)
    }

    /// `(numerator, denominator)` of a finite number.
    fn parts(&self) -> Option<(BigInt, BigInt)> {
        match self {
            Number::Int(n) => Some((n.clone(), BigInt::one())),
            Number::Decimal(f) => Some((f.num.clone(), f.denom.clone())),
            Number::Conceptual(_) => None,
        }
    }

    fn infinity(sign: i8) -> Number {
        if sign < 0 {
            Number::NEG_INF
        } else {
            Number::POS_INF
        }
    }

    /// Rounds toward zero; `None` for conceptual values.
    pub fn trunc(&self) -> Option<BigInt> {
        match self {
            Number::Int(n) => Some(n.clone()),
            Number::Decimal(f) => Some(f.trunc()),
            Number::Conceptual(_) => None,
        }
    }

    /// `n/d` notation for decimals, plain text otherwise.
    pub fn as_rational(&self) -> String {
        match self {
            Number::Decimal(f) => f.as_rational(),
            other => other.to_string(),
        }
    }

    pub fn neg(&self) -> Number {
        match self {
            Number::Int(n) => Number::Int(-n),
            Number::Decimal(f) => Number::Decimal(Fraction {
                num: -&f.num,
                denom: f.denom.clone(),
            }),
            Number::Conceptual(Conceptual::PosInf) => Number::NEG_INF,
            Number::Conceptual(Conceptual::NegInf) => Number::POS_INF,
            Number::Conceptual(Conceptual::NaN) => Number::NAN,
        }
    }

    pub fn add(&self, other: &Number) -> ValueResult<Number> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Number::int(a + b),
            (Number::Decimal(a), Number::Decimal(b)) if a.denom == b.denom => {
                Number::ratio(&a.num + &b.num, a.denom.clone())
            }
            (Number::Conceptual(Conceptual::NaN), _) | (_, Number::Conceptual(Conceptual::NaN)) => {
                Ok(Number::NAN)
            }
            (Number::Conceptual(a), Number::Conceptual(b)) => {
                Ok(if a == b { self.clone() } else { Number::NAN })
            }
            (Number::Conceptual(_), _) => Ok(self.clone()),
            (_, Number::Conceptual(_)) => Ok(other.clone()),
            _ => {
                let (an, ad) = self.parts().unwrap_or_default();
                let (bn, bd) = other.parts().unwrap_or_default();
                Number::ratio(an * &bd + bn * &ad, ad * bd)
            }
        }
    }

    pub fn sub(&self, other: &Number) -> ValueResult<Number> {
        self.add(&other.neg())
    }

    pub fn mult(&self, other: &Number) -> ValueResult<Number> {
        if self.is_nan() || other.is_nan() {
            return Ok(Number::NAN);
        }
        if self.is_infinite() || other.is_infinite() {
            return Ok(match (self.signum(), other.signum()) {
                (Some(a), Some(b)) if a != 0 && b != 0 => Number::infinity(a * b),
                _ => Number::NAN,
            });
        }
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Number::int(a * b),
            _ => {
                let (an, ad) = self.parts().unwrap_or_default();
                let (bn, bd) = other.parts().unwrap_or_default();
                Number::ratio(an * bn, ad * bd)
            }
        }
    }

    pub fn div(&self, other: &Number) -> ValueResult<Number> {
        if self.is_nan() || !other.is_finite() || other.is_zero() {
            return Ok(Number::NAN);
        }
        if self.is_infinite() {
            let sign = self.signum().unwrap_or(0) * other.signum().unwrap_or(0);
            return Ok(Number::infinity(sign));
        }
        let (an, ad) = self.parts().unwrap_or_default();
        let (bn, bd) = other.parts().unwrap_or_default();
        Number::ratio(an * bd, ad * bn)
    }

    /// Remainder of truncating division; the result has the sign of `self`.
    pub fn rem(&self, other: &Number) -> ValueResult<Number> {
        if !self.is_finite() || !other.is_finite() || other.is_zero() {
            return Ok(Number::NAN);
        }
        if let (Number::Int(a), Number::Int(b)) = (self, other) {
            return Number::int(a % b);
        }
        let (an, ad) = self.parts().unwrap_or_default();
        let (bn, bd) = other.parts().unwrap_or_default();
        let quotient = (&an * &bd) / (&ad * &bn);
        Number::ratio(an * &bd - quotient * bn * &ad, ad * bd)
    }

    /// `self` raised to `exp`.
    ///
    /// NaN in, NaN out. `0^0` is NaN, `x^0` is one otherwise. Zero to a
    /// positive power is zero, to a negative power NaN. A finite base to
    /// `+Infinity` is `+Infinity` above one, zero at zero and NaN otherwise;
    /// anything to `-Infinity` is NaN. Infinite bases follow the sign of the
    /// exponent, with `-Infinity` keeping its sign for odd integer exponents.
    pub fn pow(&self, exp: &Number) -> ValueResult<Number> {
        if self.is_nan() || exp.is_nan() || *exp == Number::NEG_INF {
            return Ok(Number::NAN);
        }
        if exp.is_zero() {
            return Ok(if self.is_zero() {
                Number::NAN
            } else {
                Number::one()
            });
        }
        if self.is_zero() {
            return Ok(if exp.is_positive() {
                Number::zero()
            } else {
                Number::NAN
            });
        }
        if *exp == Number::POS_INF {
            return Ok(match self.compare(&Number::one()) {
                Some(Ordering::Greater) => Number::POS_INF,
                _ => Number::NAN,
            });
        }
        match self {
            Number::Conceptual(Conceptual::PosInf) => Ok(if exp.is_positive() {
                Number::POS_INF
            } else {
                Number::zero()
            }),
            Number::Conceptual(_) => Ok(match exp {
                Number::Int(e) if e.is_negative() => Number::zero(),
                Number::Int(e) if e.is_odd() => Number::NEG_INF,
                Number::Int(_) => Number::POS_INF,
                _ => Number::NAN,
            }),
            _ => match exp {
                Number::Int(e) => self.pow_int(e),
                Number::Decimal(f) => self.pow_int(&f.num)?.root_int(root_degree(&f.denom)?),
                Number::Conceptual(_) => Ok(Number::NAN),
            },
        }
    }

    /// `self` is a finite nonzero base.
    fn pow_int(&self, e: &BigInt) -> ValueResult<Number> {
        let (mut num, mut denom) = self.parts().unwrap_or_default();
        if e.is_negative() {
            std::mem::swap(&mut num, &mut denom);
        }
        let e = e.abs();
        Number::ratio(pow_component(&num, &e)?, pow_component(&denom, &e)?)
    }

    /// The `degree`-th root of a finite nonzero number.
    fn root_int(&self, degree: u32) -> ValueResult<Number> {
        if degree == 1 {
            return Ok(self.clone());
        }
        if self.is_negative() {
            if degree % 2 == 0 {
                return Ok(Number::NAN);
            }
            return Ok(self.neg().root_int(degree)?.neg());
        }
        let (num, denom) = self.parts().unwrap_or_default();
        let (num_root, denom_root) = (num.nth_root(degree), denom.nth_root(degree));
        if num_root.pow(degree) == num && denom_root.pow(degree) == denom {
            return Number::ratio(num_root, denom_root);
        }
        tracing::trace!(degree, "root has no exact value, approximating");
        let scale = BigInt::from(10u8).pow(ROOT_PRECISION);
        let scaled = num * scale.pow(degree) / denom;
        Number::ratio(scaled.nth_root(degree), scale)
    }

    /// The `self`-th root of `x`.
    ///
    /// `root(n, 0)` is zero. NaN or infinite operands and a zero degree give
    /// NaN. A negative degree inverts the result and a fractional degree
    /// `p/q` raises `x` to `q/p`.
    pub fn root(&self, x: &Number) -> ValueResult<Number> {
        if !self.is_finite() || !x.is_finite() {
            return Ok(Number::NAN);
        }
        if x.is_zero() {
            return Ok(Number::zero());
        }
        match self {
            Number::Int(n) if n.is_zero() => Ok(Number::NAN),
            Number::Int(n) if n.is_negative() => Number::one().div(&self.neg().root(x)?),
            Number::Int(n) => x.root_int(root_degree(n)?),
            Number::Decimal(f) => x.pow(&Number::ratio(f.denom.clone(), f.num.clone())?),
            Number::Conceptual(_) => Ok(Number::NAN),
        }
    }

    /// `n!` for a non-negative integer `n`.
    pub fn factorial(&self) -> ValueResult<Number> {
        match self {
            Number::Int(n) if !n.is_negative() => {
                let mut acc = BigInt::one();
                let mut i = BigInt::from(2u8);
                while &i <= n {
                    acc *= &i;
                    check_digits(&acc)?;
                    i += 1u8;
                }
                Ok(Number::Int(acc))
            }
            Number::Conceptual(Conceptual::NaN) => Ok(Number::NAN),
            Number::Conceptual(Conceptual::PosInf) => Ok(Number::POS_INF),
            _ => Err(ValueError::InvalidOperand(format!(
                "factorial is only defined for non-negative integers, not {self}"
            ))),
        }
    }

    /// Numeric ordering; `None` if either side is NaN.
    pub fn compare(&self, other: &Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Conceptual(Conceptual::NaN), _) | (_, Number::Conceptual(Conceptual::NaN)) => {
                None
            }
            (Number::Conceptual(_), _) | (_, Number::Conceptual(_)) => {
                Some(infinite_rank(self).cmp(&infinite_rank(other)))
            }
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(b)),
            _ => {
                let (an, ad) = self.parts()?;
                let (bn, bd) = other.parts()?;
                Some((an * bd).cmp(&(bn * ad)))
            }
        }
    }

    /// Numeric equality; NaN equals nothing, itself included.
    pub fn num_eq(&self, other: &Number) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

fn sign_of(n: &BigInt) -> i8 {
    if n.is_negative() {
        -1
    } else if n.is_zero() {
        0
    } else {
        1
    }
}

/// Orders infinities around every finite number.
fn infinite_rank(n: &Number) -> i8 {
    match n {
        Number::Conceptual(Conceptual::NegInf) => -1,
        Number::Conceptual(Conceptual::PosInf) => 1,
        _ => 0,
    }
}

fn root_degree(n: &BigInt) -> ValueResult<u32> {
    n.to_u32()
        .filter(|d| *d <= MAX_ROOT_DEGREE)
        .ok_or_else(|| ValueError::RootDegree(n.to_string()))
}

/// `c^e` for a nonzero component, refusing before computing anything that
/// would exceed the digit ceiling.
fn pow_component(c: &BigInt, e: &BigInt) -> ValueResult<BigInt> {
    if c.magnitude().is_one() {
        return Ok(if c.is_negative() && e.is_odd() {
            -BigInt::one()
        } else {
            BigInt::one()
        });
    }
    // |c| >= 2, so c^e has at least (bits(c) - 1) * e + 1 bits.
    let e = e
        .to_u64()
        .filter(|e| (c.bits() - 1).saturating_mul(*e) < UNSAFE_BITS)
        .ok_or(ValueError::DigitLimit)?;
    let e = u32::try_from(e).map_err(|_| ValueError::DigitLimit)?;
    Ok(c.pow(e))
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(BigInt::from(n))
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Int(BigInt::from(n))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Decimal(frac) => write!(f, "{frac}"),
            Number::Conceptual(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Number {
        Number::ratio(n, d).unwrap()
    }

    fn n(v: i64) -> Number {
        Number::from(v)
    }

    #[test]
    fn test_ratio_canonical_form() {
        assert_eq!(q(2, 4), q(1, 2));
        assert_eq!(q(3, -6), q(-1, 2));
        assert_eq!(q(6, 3), n(2));
        assert_eq!(q(0, 5), n(0));
        assert_eq!(q(1, 0), Number::NAN);
        match q(-4, 6) {
            Number::Decimal(f) => {
                assert_eq!(f.numer(), &BigInt::from(-2));
                assert_eq!(f.denom(), &BigInt::from(3));
            }
            other => panic!("expected decimal, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(Number::parse("42").unwrap(), n(42));
        assert_eq!(Number::parse("3.25").unwrap(), q(13, 4));
        assert_eq!(Number::parse("2.50").unwrap(), q(5, 2));
        assert_eq!(Number::parse("-0.5").unwrap(), q(-1, 2));
        assert_eq!(Number::parse("4.0").unwrap(), n(4));
        assert_eq!(Number::parse("Infinity").unwrap(), Number::POS_INF);
        assert!(Number::parse("1.").is_err());
        assert!(Number::parse("abc").is_err());
    }

    #[test]
    fn test_decimal_text() {
        assert_eq!(q(1, 3).to_string(), "0.(3)");
        assert_eq!(q(1, 2).to_string(), "0.5");
        assert_eq!(q(1, 6).to_string(), "0.1(6)");
        assert_eq!(q(-7, 4).to_string(), "-1.75");
        assert_eq!(q(22, 7).to_string(), "3.(142857)");
        assert_eq!(n(7).to_string(), "7");
        assert_eq!(Number::NEG_INF.to_string(), "-Infinity");
    }

    #[test]
    fn test_long_period_is_cut_off() {
        // 1/983 has a period far longer than the expansion cap.
        let text = q(1, 983).to_string();
        assert!(text.len() <= MAX_DIGITS);
        assert!(!text.contains('('));
        assert!(!text.ends_with('0'));
    }

    #[test]
    fn test_as_rational() {
        assert_eq!(q(-2, 3).as_rational(), "-2/3");
        assert_eq!(n(5).as_rational(), "5");
    }

    #[test]
    fn test_add_and_sub() {
        assert_eq!(q(1, 3).add(&q(1, 3)).unwrap(), q(2, 3));
        assert_eq!(q(1, 2).add(&q(1, 2)).unwrap(), n(1));
        assert_eq!(q(1, 2).add(&q(1, 3)).unwrap(), q(5, 6));
        assert_eq!(n(1).sub(&q(1, 4)).unwrap(), q(3, 4));
        assert_eq!(Number::POS_INF.add(&n(5)).unwrap(), Number::POS_INF);
        assert_eq!(n(5).add(&Number::NEG_INF).unwrap(), Number::NEG_INF);
        assert_eq!(Number::POS_INF.add(&Number::NEG_INF).unwrap(), Number::NAN);
        assert_eq!(Number::POS_INF.sub(&Number::POS_INF).unwrap(), Number::NAN);
    }

    #[test]
    fn test_mult_and_div() {
        assert_eq!(q(2, 3).mult(&q(3, 2)).unwrap(), n(1));
        assert_eq!(n(0).mult(&Number::POS_INF).unwrap(), Number::NAN);
        assert_eq!(n(-2).mult(&Number::POS_INF).unwrap(), Number::NEG_INF);
        assert_eq!(n(1).div(&n(3)).unwrap(), q(1, 3));
        assert_eq!(n(1).div(&n(0)).unwrap(), Number::NAN);
        assert_eq!(n(1).div(&Number::POS_INF).unwrap(), Number::NAN);
        assert_eq!(Number::POS_INF.div(&n(-2)).unwrap(), Number::NEG_INF);
    }

    #[test]
    fn test_rem() {
        assert_eq!(n(7).rem(&n(3)).unwrap(), n(1));
        assert_eq!(n(-7).rem(&n(3)).unwrap(), n(-1));
        assert_eq!(q(7, 2).rem(&n(2)).unwrap(), q(3, 2));
        assert_eq!(n(7).rem(&n(0)).unwrap(), Number::NAN);
        assert_eq!(Number::POS_INF.rem(&n(2)).unwrap(), Number::NAN);
    }

    #[test]
    fn test_pow_finite() {
        assert_eq!(n(2).pow(&n(10)).unwrap(), n(1024));
        assert_eq!(n(2).pow(&n(-2)).unwrap(), q(1, 4));
        assert_eq!(q(2, 3).pow(&n(2)).unwrap(), q(4, 9));
        assert_eq!(n(-1).pow(&n(1_000_001)).unwrap(), n(-1));
        assert_eq!(n(4).pow(&q(1, 2)).unwrap(), n(2));
        assert_eq!(n(8).pow(&q(2, 3)).unwrap(), n(4));
        assert_eq!(n(-8).pow(&q(1, 3)).unwrap(), n(-2));
        assert_eq!(n(-4).pow(&q(1, 2)).unwrap(), Number::NAN);
    }

    #[test]
    fn test_pow_conceptual() {
        assert_eq!(n(0).pow(&n(0)).unwrap(), Number::NAN);
        assert_eq!(n(5).pow(&n(0)).unwrap(), n(1));
        assert_eq!(Number::POS_INF.pow(&n(0)).unwrap(), n(1));
        assert_eq!(n(0).pow(&n(3)).unwrap(), n(0));
        assert_eq!(n(0).pow(&n(-3)).unwrap(), Number::NAN);
        assert_eq!(n(2).pow(&Number::POS_INF).unwrap(), Number::POS_INF);
        assert_eq!(q(1, 2).pow(&Number::POS_INF).unwrap(), Number::NAN);
        assert_eq!(n(1).pow(&Number::POS_INF).unwrap(), Number::NAN);
        assert_eq!(n(0).pow(&Number::POS_INF).unwrap(), n(0));
        assert_eq!(n(2).pow(&Number::NEG_INF).unwrap(), Number::NAN);
        assert_eq!(Number::POS_INF.pow(&n(-1)).unwrap(), n(0));
        assert_eq!(Number::NEG_INF.pow(&n(3)).unwrap(), Number::NEG_INF);
        assert_eq!(Number::NEG_INF.pow(&n(2)).unwrap(), Number::POS_INF);
        assert_eq!(Number::NEG_INF.pow(&q(1, 2)).unwrap(), Number::NAN);
        assert_eq!(Number::NAN.pow(&n(0)).unwrap(), Number::NAN);
    }

    #[test]
    fn test_pow_overflow_is_refused() {
        assert_eq!(n(10).pow(&n(99)).unwrap().to_string().len(), 100);
        assert_eq!(n(10).pow(&n(100)), Err(ValueError::DigitLimit));
        assert_eq!(n(2).pow(&n(1_000_000_000)), Err(ValueError::DigitLimit));
    }

    #[test]
    fn test_root() {
        assert_eq!(n(2).root(&n(9)).unwrap(), n(3));
        assert_eq!(n(3).root(&n(-27)).unwrap(), n(-3));
        assert_eq!(n(2).root(&n(-4)).unwrap(), Number::NAN);
        assert_eq!(n(2).root(&q(4, 9)).unwrap(), q(2, 3));
        assert_eq!(n(-2).root(&n(4)).unwrap(), q(1, 2));
        assert_eq!(n(5).root(&n(0)).unwrap(), n(0));
        assert_eq!(n(0).root(&n(5)).unwrap(), Number::NAN);
        assert_eq!(n(2).root(&Number::POS_INF).unwrap(), Number::NAN);
        assert_eq!(n(2).root(&Number::NAN).unwrap(), Number::NAN);
        assert_eq!(q(1, 2).root(&n(3)).unwrap(), n(9));
    }

    #[test]
    fn test_irrational_root_is_approximated() {
        let sqrt2 = n(2).root(&n(2)).unwrap();
        assert_eq!(
            sqrt2.to_string(),
            "1.4142135623730950488016887242096980785696"
        );
    }

    #[test]
    fn test_root_degree_limit() {
        assert!(matches!(
            n(1000).root(&n(2)),
            Err(ValueError::RootDegree(_))
        ));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(n(0).factorial().unwrap(), n(1));
        assert_eq!(n(5).factorial().unwrap(), n(120));
        assert_eq!(n(70).factorial(), Err(ValueError::DigitLimit));
        assert!(matches!(
            n(-1).factorial(),
            Err(ValueError::InvalidOperand(_))
        ));
        assert!(q(1, 2).factorial().is_err());
    }

    #[test]
    fn test_compare_and_num_eq() {
        assert_eq!(q(1, 3).compare(&q(1, 2)), Some(Ordering::Less));
        assert_eq!(n(2).compare(&q(3, 2)), Some(Ordering::Greater));
        assert_eq!(Number::NEG_INF.compare(&n(-1000)), Some(Ordering::Less));
        assert_eq!(Number::NAN.compare(&n(0)), None);
        assert!(!Number::NAN.num_eq(&Number::NAN));
        assert!(Number::POS_INF.num_eq(&Number::POS_INF));
    }

    #[test]
    fn test_digit_ceiling() {
        let hundred = "9".repeat(100);
        assert!(Number::parse(&hundred).is_ok());
        let too_long = "9".repeat(101);
        assert_eq!(Number::parse(&too_long), Err(ValueError::DigitLimit));
        let tiny = format!("0.{}1", "0".repeat(100));
        assert_eq!(Number::parse(&tiny), Err(ValueError::DigitLimit));
    }
}
