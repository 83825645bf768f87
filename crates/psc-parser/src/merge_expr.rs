//! Value merging.
//!
//! Dispatch on the group of the first remaining token, with one token of
//! look-ahead for names and brackets:
//!
//! - literal → [`ExprKind::Literal`]
//! - name → call, array access, assignment or plain name
//! - `[` → array literal (folded into a literal when every element is constant)
//! - `(` → cast when it encloses only a data type, bracketed value otherwise
//! - `|` → multi-call, closed by the next `|`
//! - prefix operator → prefix application to the next operand
//!
//! After an operand, postfix operators and `is <type>` wrap it. Infix
//! operators then collect a flat operation; anything else ends the value and
//! is left for the caller.

use std::sync::Arc;

use psc_tokens::{
    AssignmentType, BuilderType, KeywordType, PrefixOpType, SpecificType, Token, VALUE_START,
};
use psc_types::{ErrorCode, PscError, Result, SingleType};
use psc_value::{ArrayValue, Number, Value};

use crate::ast::{Expr, ExprKind, Ident, Operation, Operator};
use crate::merger::Merger;

impl<'t> Merger<'t> {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Merge one value: an operand optionally followed by a run of infix
    /// operators and operands.
    pub fn merge_value(&mut self) -> Result<Expr> {
        let head = self.merge_operand()?;
        let mut tail = Vec::new();
        while let Some(SpecificType::Infix(kind)) = self.peek_kind() {
            let op = self.advance()?;
            let operand = self.merge_operand()?;
            tail.push((Operator::new(kind, op.span), Arc::new(operand)));
        }
        if tail.is_empty() {
            return Ok(head);
        }
        let operation = crate::chain::rewrite_comparison_chains(Operation {
            head: Arc::new(head),
            tail,
        });
        tracing::trace!(operators = operation.len(), "merged operation");
        let span = operation.span();
        Ok(Expr::new(ExprKind::Operation(operation), span))
    }

    /// Merge one operand with its postfix operators and `is` tests.
    pub(crate) fn merge_operand(&mut self) -> Result<Expr> {
        self.enter()?;
        let result = self.merge_operand_inner();
        self.leave();
        result
    }

    fn merge_operand_inner(&mut self) -> Result<Expr> {
        let mut expr = self.merge_primary()?;
        loop {
            match self.peek_kind() {
                Some(SpecificType::Postfix(op)) => {
                    let token = self.advance()?;
                    let span = expr.span.merge(token.span);
                    expr = Expr::new(
                        ExprKind::Postfix {
                            op,
                            operand: Box::new(expr),
                        },
                        span,
                    );
                }
                Some(SpecificType::Keyword(KeywordType::Is)) => {
                    expr = self.merge_is(expr)?;
                }
                _ => return Ok(expr),
            }
        }
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Primaries
    // ══════════════════════════════════════════════════════════════════════════

    fn merge_primary(&mut self) -> Result<Expr> {
        let Some(token) = self.peek() else {
            return Err(self.missing_operand());
        };
        // `-`, `++` and `--` read as prefix operators in operand position.
        let kind = match token.kind {
            SpecificType::Infix(_) | SpecificType::Postfix(_) => {
                token.kind.as_prefix().unwrap_or(token.kind)
            }
            other => other,
        };
        match kind {
            SpecificType::Literal => {
                let token = self.advance()?;
                let value = literal_value(token)?;
                tracing::trace!(text = %token.text, "merged literal");
                Ok(Expr::new(ExprKind::Literal(value), token.span))
            }
            SpecificType::Name => self.merge_name(),
            SpecificType::Builder(BuilderType::ArrayStart) => self.merge_array(),
            SpecificType::Builder(BuilderType::OpenBracket) => self.merge_bracket(),
            SpecificType::Builder(BuilderType::MultiCall) => self.merge_multi_call(),
            SpecificType::Prefix(op) => {
                let token = self.advance_as(kind)?;
                let operand = self.merge_operand()?;
                Ok(prefix(op, operand, token))
            }
            _ => Err(self.unexpected(token, VALUE_START)),
        }
    }

    /// A name, call, array access or assignment.
    fn merge_name(&mut self) -> Result<Expr> {
        let token = self.advance()?;
        let name = Ident::new(token.text.clone(), token.span);
        match self.peek_kind() {
            Some(SpecificType::Builder(BuilderType::OpenBracket)) => self.merge_call(name),
            Some(SpecificType::Builder(BuilderType::ArrayStart)) => self.merge_access(name),
            Some(SpecificType::Assignment(op)) => self.merge_assignment(name, op),
            _ => {
                tracing::trace!(name = %name, "merged name");
                Ok(Expr::new(ExprKind::Name(name.name), name.span))
            }
        }
    }

    /// `name(arg, ...)`
    fn merge_call(&mut self, name: Ident) -> Result<Expr> {
        let open = self.advance()?;
        let mut args = Vec::new();
        if !self.check_builder(BuilderType::CloseBracket) {
            loop {
                args.push(self.merge_value()?);
                if self.check_builder(BuilderType::Comma) {
                    self.advance()?;
                } else {
                    break;
                }
            }
        }
        let close =
            self.expect_builder(BuilderType::CloseBracket, ErrorCode::UNCLOSED_BRACKET, open.span)?;
        tracing::trace!(name = %name, args = args.len(), "merged call");
        let span = name.span.merge(close.span);
        Ok(Expr::new(ExprKind::Call { name, args }, span))
    }

    /// `name[i]`, `name[i][j]`, ...
    fn merge_access(&mut self, name: Ident) -> Result<Expr> {
        let mut indices = Vec::new();
        let mut span = name.span;
        while self.check_builder(BuilderType::ArrayStart) {
            let open = self.advance()?;
            indices.push(self.merge_value()?);
            let close =
                self.expect_builder(BuilderType::ArrayEnd, ErrorCode::UNCLOSED_ARRAY, open.span)?;
            span = span.merge(close.span);
        }
        tracing::trace!(name = %name, depth = indices.len(), "merged array access");
        Ok(Expr::new(ExprKind::ArrayAccess { name, indices }, span))
    }

    /// `name = value`, `name += value`, ...
    fn merge_assignment(&mut self, target: Ident, op: AssignmentType) -> Result<Expr> {
        self.advance()?;
        let value = self.merge_value()?;
        let span = target.span.merge(value.span);
        tracing::trace!(name = %target, op = %op, "merged assignment");
        Ok(Expr::new(
            ExprKind::Assignment {
                target,
                op,
                value: Box::new(value),
            },
            span,
        ))
    }

    /// `[a, b, ...]`
    fn merge_array(&mut self) -> Result<Expr> {
        let open = self.advance()?;
        let mut elements = Vec::new();
        if !self.check_builder(BuilderType::ArrayEnd) {
            loop {
                elements.push(self.merge_value()?);
                if self.check_builder(BuilderType::Comma) {
                    self.advance()?;
                } else {
                    break;
                }
            }
        }
        let close = self.expect_builder(BuilderType::ArrayEnd, ErrorCode::UNCLOSED_ARRAY, open.span)?;
        let span = open.span.merge(close.span);
        tracing::trace!(elements = elements.len(), "merged array literal");
        if elements.iter().all(Expr::is_literal) {
            return Ok(Expr::new(ExprKind::Literal(fold_array(elements)), span));
        }
        Ok(Expr::new(ExprKind::ArrayLiteral(elements), span))
    }

    /// `|a, b, ...|`
    fn merge_multi_call(&mut self) -> Result<Expr> {
        let open = self.advance()?;
        if self.check_builder(BuilderType::MultiCall) {
            return Err(PscError::new(
                ErrorCode::MISSING_OPERAND,
                format!("a multi-call needs at least one value on line {}", open.line()),
                open.span,
            ));
        }
        let mut values = Vec::new();
        loop {
            values.push(self.merge_value()?);
            if self.check_builder(BuilderType::Comma) {
                self.advance()?;
            } else {
                break;
            }
        }
        let close =
            self.expect_builder(BuilderType::MultiCall, ErrorCode::UNCLOSED_BRACKET, open.span)?;
        tracing::trace!(values = values.len(), "merged multi-call");
        Ok(Expr::new(ExprKind::MultiCall(values), open.span.merge(close.span)))
    }

    /// `(type) operand` or `(value)`.
    fn merge_bracket(&mut self) -> Result<Expr> {
        if let (Some(SpecificType::DataType(target)), Some(SpecificType::Builder(BuilderType::CloseBracket))) =
            (self.look_ahead(1), self.look_ahead(2))
        {
            let open = self.advance()?;
            self.advance()?;
            self.advance()?;
            let operand = self.merge_operand()?;
            let span = open.span.merge(operand.span);
            tracing::trace!(target = %target, "merged cast");
            return Ok(Expr::new(
                ExprKind::Cast {
                    target,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        let open = self.advance()?;
        let inner = self.merge_value()?;
        let close =
            self.expect_builder(BuilderType::CloseBracket, ErrorCode::UNCLOSED_BRACKET, open.span)?;
        Ok(Expr::new(
            ExprKind::Bracketed(Box::new(inner)),
            open.span.merge(close.span),
        ))
    }

    /// `operand is type`
    fn merge_is(&mut self, operand: Expr) -> Result<Expr> {
        let is = self.advance()?;
        let Some(token) = self.peek() else {
            return Err(self.missing_operand());
        };
        let SpecificType::DataType(target) = token.kind else {
            return Err(self.unexpected(token, psc_tokens::allowed_followers(is.kind)));
        };
        if target.base == SingleType::Var {
            return Err(PscError::new(
                ErrorCode::ILLEGAL_CODE_FORMAT,
                format!(
                    "'{}' cannot be tested with 'is' on line {}, every value is a {target}",
                    token.text,
                    token.line()
                ),
                token.span,
            ));
        }
        let token = self.advance()?;
        let span = operand.span.merge(token.span);
        Ok(Expr::new(
            ExprKind::Is {
                operand: Box::new(operand),
                target,
            },
            span,
        ))
    }
}

/// The constant a literal token denotes.
fn literal_value(token: &Token) -> Result<Value> {
    let text = token.text.as_str();
    if text == "true" || text == "false" {
        return Ok(Value::Bool(text == "true"));
    }
    if let Some(inner) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        return Ok(Value::text(inner));
    }
    if let Some(inner) = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
        let mut chars = inner.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Value::Char(c));
        }
    }
    Number::parse(text)
        .map(Value::Number)
        .map_err(|e| e.into_diagnostic(token.span))
}

/// Apply a prefix operator, folding negated number literals.
fn prefix(op: PrefixOpType, operand: Expr, token: &Token) -> Expr {
    let span = token.span.merge(operand.span);
    if op == PrefixOpType::Neg {
        if let ExprKind::Literal(Value::Number(n)) = &operand.kind {
            return Expr::new(ExprKind::Literal(Value::Number(n.neg())), span);
        }
    }
    Expr::new(
        ExprKind::Prefix {
            op,
            operand: Box::new(operand),
        },
        span,
    )
}

/// Fold constant elements into one array value.
fn fold_array(elements: Vec<Expr>) -> Value {
    let values = elements
        .into_iter()
        .filter_map(|e| match e.kind {
            ExprKind::Literal(v) => Some(v),
            _ => None,
        })
        .collect();
    Value::Array(ArrayValue::generic(values))
}
