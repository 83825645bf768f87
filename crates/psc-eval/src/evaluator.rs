//! Tree-walking evaluation of merged expressions.

use psc_parser::ast::{Expr, ExprKind, Ident, Operation, Operator};
use psc_tokens::{AssignmentType, Associativity, PostfixOpType, PrefixOpType};
use psc_types::{DataType, Result, Span};
use psc_value::{ArrayValue, Number, Value, ValueError, ValueResult};

use crate::error::{EvalError, EvalResult};
use crate::operator::perform;
use crate::runtime::Runtime;

/// Evaluates expressions against a [`Runtime`].
///
/// Every failure leaves as a [`PscError`](psc_types::PscError) carrying the
/// span of the node that raised it. Errors from nested nodes pass through
/// untouched.
pub struct Evaluator<'r, R: Runtime + ?Sized> {
    runtime: &'r mut R,
}

impl<'r, R: Runtime + ?Sized> Evaluator<'r, R> {
    pub fn new(runtime: &'r mut R) -> Self {
        Self { runtime }
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Expression evaluation
    // ══════════════════════════════════════════════════════════════════════════

    pub fn eval(&mut self, expr: &Expr) -> Result<Value> {
        match &expr.kind {
            ExprKind::Literal(value) => Ok(value.clone()),
            ExprKind::Name(name) => self
                .runtime
                .get_value(name)
                .map_err(|e| e.into_diagnostic(expr.span)),
            ExprKind::Call { name, args } => self.eval_call(name, args, expr.span),
            ExprKind::ArrayLiteral(elements) | ExprKind::MultiCall(elements) => {
                let values = self.eval_all(elements)?;
                Ok(Value::Array(ArrayValue::generic(values)))
            }
            ExprKind::ArrayAccess { name, indices } => self.eval_access(name, indices),
            ExprKind::Operation(operation) => self.eval_operation(operation),
            ExprKind::Prefix { op, operand } => self.eval_prefix(*op, operand, expr.span),
            ExprKind::Postfix { op, operand } => self.eval_postfix(*op, operand, expr.span),
            ExprKind::Bracketed(inner) => self.eval(inner),
            ExprKind::Cast { target, operand } => {
                let value = self.eval(operand)?;
                value
                    .cast(*target)
                    .map_err(|e| EvalError::from(e).into_diagnostic(expr.span))
            }
            ExprKind::Is { operand, target } => {
                let value = self.eval(operand)?;
                Ok(Value::Bool(value.data_type() == *target))
            }
            ExprKind::Assignment { target, op, value } => {
                self.eval_assignment(target, *op, value, expr.span)
            }
        }
    }

    fn eval_all(&mut self, exprs: &[Expr]) -> Result<Vec<Value>> {
        exprs.iter().map(|e| self.eval(e)).collect()
    }

    fn eval_call(&mut self, name: &Ident, args: &[Expr], span: Span) -> Result<Value> {
        let args = self.eval_all(args)?;
        tracing::trace!(name = %name, args = args.len(), "call");
        self.runtime
            .invoke(&name.name, args)
            .map_err(|e| e.into_diagnostic(span))
    }

    /// `a[i][j]`: index the resolved array once per bracket.
    fn eval_access(&mut self, name: &Ident, indices: &[Expr]) -> Result<Value> {
        let mut current = self
            .runtime
            .get_value(&name.name)
            .map_err(|e| e.into_diagnostic(name.span))?;
        for index in indices {
            let i = self.eval(index)?;
            current = match &current {
                Value::Array(array) => array.get(&i).cloned(),
                other => Err(ValueError::Casting {
                    from: other.data_type(),
                    to: DataType::VAR_ARRAY,
                }),
            }
            .map_err(|e| EvalError::from(e).into_diagnostic(index.span))?;
        }
        Ok(current)
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Operations
    // ══════════════════════════════════════════════════════════════════════════

    /// Resolve every operand left to right, then group by precedence.
    fn eval_operation(&mut self, operation: &Operation) -> Result<Value> {
        let head = self.eval_operand(&operation.head)?;
        let tail = operation
            .tail
            .iter()
            .map(|(op, operand)| self.eval_operand(operand).map(|v| (*op, v)))
            .collect::<Result<Vec<_>>>()?;
        Ok(climb(head, tail)?.into_value())
    }

    fn eval_operand(&mut self, expr: &Expr) -> Result<Operand> {
        match &expr.kind {
            ExprKind::MultiCall(values) => Ok(Operand::Spread(self.eval_all(values)?)),
            _ => self.eval(expr).map(Operand::Single),
        }
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Unary operators
    // ══════════════════════════════════════════════════════════════════════════

    fn eval_prefix(&mut self, op: PrefixOpType, operand: &Expr, span: Span) -> Result<Value> {
        let value = self.eval(operand)?;
        let fail = |source: ValueError| {
            EvalError::Unary {
                op: op.to_string(),
                operand: value.data_type(),
                source,
            }
            .into_diagnostic(span)
        };
        match op {
            PrefixOpType::Not => value.as_bool().map(|b| Value::Bool(!b)).map_err(fail),
            PrefixOpType::Neg => Ok(value.neg()),
            PrefixOpType::Inc | PrefixOpType::Dec => {
                let stepped = step(&value, op == PrefixOpType::Inc).map_err(fail)?;
                self.write_back(operand, stepped.clone())?;
                Ok(stepped)
            }
        }
    }

    /// `x++` and `x--` yield the value from before the step.
    fn eval_postfix(&mut self, op: PostfixOpType, operand: &Expr, span: Span) -> Result<Value> {
        let value = self.eval(operand)?;
        let fail = |source: ValueError| {
            EvalError::Unary {
                op: op.to_string(),
                operand: value.data_type(),
                source,
            }
            .into_diagnostic(span)
        };
        match op {
            PostfixOpType::Fac => value.factorial().map_err(fail),
            PostfixOpType::Inc | PostfixOpType::Dec => {
                let stepped = step(&value, op == PostfixOpType::Inc).map_err(fail)?;
                self.write_back(operand, stepped)?;
                Ok(value)
            }
        }
    }

    /// Store a stepped value when the operand is a variable.
    fn write_back(&mut self, operand: &Expr, value: Value) -> Result<()> {
        if let ExprKind::Name(name) = &operand.kind {
            self.runtime
                .set_value(name, value)
                .map_err(|e| e.into_diagnostic(operand.span))?;
        }
        Ok(())
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Assignment
    // ══════════════════════════════════════════════════════════════════════════

    fn eval_assignment(
        &mut self,
        target: &Ident,
        op: AssignmentType,
        value: &Expr,
        span: Span,
    ) -> Result<Value> {
        let rhs = self.eval(value)?;
        let stored = match op.op() {
            None => rhs,
            Some(infix) => {
                let current = self
                    .runtime
                    .get_value(&target.name)
                    .map_err(|e| e.into_diagnostic(target.span))?;
                perform(infix, &current, &rhs).map_err(|e| e.into_diagnostic(span))?
            }
        };
        self.runtime
            .set_value(&target.name, stored.clone())
            .map_err(|e| e.into_diagnostic(target.span))?;
        tracing::trace!(name = %target, op = %op, "assigned");
        Ok(stored)
    }
}

/// A resolved operand of an operation.
enum Operand {
    Single(Value),
    /// The values of a multi-call, each taking the adjacent operator in turn.
    Spread(Vec<Value>),
}

impl Operand {
    fn into_value(self) -> Value {
        match self {
            Operand::Single(value) => value,
            Operand::Spread(values) => Value::Array(ArrayValue::generic(values)),
        }
    }
}

/// Precedence climbing over a flat operation, with an explicit stack.
///
/// Each stack entry is a left operand waiting for its operator's right
/// operand. Before `op` is pushed, every waiting operator that `op` does not
/// bind tighter than is applied, so a run binding tighter than `op` (or
/// equally tight when `op` is right associative) is folded into `op`'s right
/// operand first. Native stack use does not grow with the operator count.
fn climb(head: Operand, tail: Vec<(Operator, Operand)>) -> Result<Operand> {
    let mut pending: Vec<(Operand, Operator)> = Vec::with_capacity(tail.len());
    let mut acc = head;
    for (op, operand) in tail {
        while pending
            .last()
            .is_some_and(|(_, waiting)| !binds_tighter(&op, waiting))
        {
            if let Some((lhs, waiting)) = pending.pop() {
                acc = apply(waiting, lhs, acc)?;
            }
        }
        pending.push((std::mem::replace(&mut acc, operand), op));
    }
    while let Some((lhs, waiting)) = pending.pop() {
        acc = apply(waiting, lhs, acc)?;
    }
    Ok(acc)
}

/// Apply `op`, once per value when one side is a multi-call.
fn apply(op: Operator, lhs: Operand, rhs: Operand) -> Result<Operand> {
    let value = match (lhs, rhs) {
        (Operand::Single(a), Operand::Single(b)) => perform(op.kind, &a, &b),
        (Operand::Spread(values), Operand::Single(b)) => values
            .iter()
            .map(|a| perform(op.kind, a, &b))
            .collect::<EvalResult<Vec<_>>>()
            .map(|results| Value::Array(ArrayValue::of(results))),
        (Operand::Single(a), Operand::Spread(values)) => values
            .iter()
            .map(|b| perform(op.kind, &a, b))
            .collect::<EvalResult<Vec<_>>>()
            .map(|results| Value::Array(ArrayValue::of(results))),
        (Operand::Spread(_), Operand::Spread(_)) => Err(EvalError::MultiCallPair(op.kind)),
    };
    value
        .map(Operand::Single)
        .map_err(|e| e.into_diagnostic(op.span))
}

/// Whether `ahead` takes the right operand of `op` away from it.
fn binds_tighter(ahead: &Operator, op: &Operator) -> bool {
    ahead.rank() > op.rank()
        || (ahead.rank() == op.rank() && op.associativity() == Associativity::Right)
}

/// `value ± 1` through its numeric reading.
fn step(value: &Value, up: bool) -> ValueResult<Value> {
    let n = value.as_number();
    let stepped = if up {
        n.add(&Number::one())
    } else {
        n.sub(&Number::one())
    };
    stepped.map(Value::Number)
}

/// Evaluate one expression against `runtime`.
pub fn evaluate<R: Runtime + ?Sized>(expr: &Expr, runtime: &mut R) -> Result<Value> {
    Evaluator::new(runtime).eval(expr)
}
