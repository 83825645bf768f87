//! Infix operator semantics.
//!
//! Arithmetic is delegated to the value lattice. Ordering is numeric and a
//! NaN on either side makes every ordering test false. Logic operators are
//! eager and cast both operands to `bool`.

use std::cmp::Ordering;

use psc_tokens::InfixOpType;
use psc_value::{Value, ValueResult};

use crate::error::{EvalError, EvalResult};

/// Apply `op` to two resolved operands.
pub fn perform(op: InfixOpType, left: &Value, right: &Value) -> EvalResult<Value> {
    use InfixOpType as Op;
    let result = match op {
        Op::Add => left.add(right),
        Op::Sub => left.sub(right),
        Op::Mult => left.mult(right),
        Op::Div => left.div(right),
        Op::Mod => left.rem(right),
        Op::Pow => left.pow(right),
        Op::Root => left.root(right),
        Op::Equals => Ok(Value::Bool(left.equals(right))),
        Op::NotEquals => Ok(Value::Bool(!left.equals(right))),
        Op::Greater => Ok(ordered(left, right, Ordering::is_gt)),
        Op::GreaterEq => Ok(ordered(left, right, Ordering::is_ge)),
        Op::Less => Ok(ordered(left, right, Ordering::is_lt)),
        Op::LessEq => Ok(ordered(left, right, Ordering::is_le)),
        Op::And => logic(left, right, |a, b| a && b),
        Op::Or => logic(left, right, |a, b| a || b),
        Op::Nand => logic(left, right, |a, b| !(a && b)),
        Op::Nor => logic(left, right, |a, b| !(a || b)),
        Op::Xor => logic(left, right, |a, b| a != b),
        Op::In => right.contains(left).map(Value::Bool),
    };
    tracing::trace!(%op, ok = result.is_ok(), "applied operator");
    result.map_err(|source| EvalError::Infix {
        op,
        left: left.data_type(),
        right: right.data_type(),
        source,
    })
}

fn ordered(left: &Value, right: &Value, test: fn(Ordering) -> bool) -> Value {
    Value::Bool(left.compare(right).is_some_and(test))
}

fn logic(left: &Value, right: &Value, combine: fn(bool, bool) -> bool) -> ValueResult<Value> {
    Ok(Value::Bool(combine(left.as_bool()?, right.as_bool()?)))
}
