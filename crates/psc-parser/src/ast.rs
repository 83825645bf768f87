//! Expression tree produced by the merger.
//!
//! Nodes are immutable once merged and evaluated as often as the line runs.
//! Operation operands are shared through [`Arc`] so a chained comparison can
//! reference its middle operand twice.

use std::fmt;
use std::sync::Arc;

use psc_tokens::{
    AssignmentType, Associativity, InfixOpType, PostfixOpType, PrefixOpType,
};
use psc_types::{DataType, Span};
use psc_value::Value;

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns `true` for a constant.
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Literal(_))
    }
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `12`, `0.5`, `"text"`, `'c'`, `true`, `NaN`, or a folded array of
    /// constants.
    Literal(Value),
    /// An unresolved variable reference.
    Name(String),
    /// `f(a, b)`. Arity is checked by the runtime.
    Call { name: Ident, args: Vec<Expr> },
    /// `[a, b + 1]` with at least one non-constant element.
    ArrayLiteral(Vec<Expr>),
    /// `|a, b|`. Next to an infix operator the operator is applied to each
    /// value in turn.
    MultiCall(Vec<Expr>),
    /// `arr[i]`, `grid[i][j]`.
    ArrayAccess { name: Ident, indices: Vec<Expr> },
    /// A run of infix operators.
    Operation(Operation),
    /// `not x`, `-x`, `++x`, `--x`.
    Prefix {
        op: PrefixOpType,
        operand: Box<Expr>,
    },
    /// `x++`, `x--`, `n!`.
    Postfix {
        op: PostfixOpType,
        operand: Box<Expr>,
    },
    /// `(x)`.
    Bracketed(Box<Expr>),
    /// `(int) x`.
    Cast {
        target: DataType,
        operand: Box<Expr>,
    },
    /// `x is int`.
    Is {
        operand: Box<Expr>,
        target: DataType,
    },
    /// `x = v`, `x += v`.
    Assignment {
        target: Ident,
        op: AssignmentType,
        value: Box<Expr>,
    },
}

/// A name with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Operations
// ══════════════════════════════════════════════════════════════════════════════

/// An infix operator occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    pub kind: InfixOpType,
    pub span: Span,
}

impl Operator {
    pub fn new(kind: InfixOpType, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn rank(&self) -> u8 {
        self.kind.rank()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// `head op1 operand1 op2 operand2 ...` with at least one operator.
///
/// The sequence is flat: grouping is decided while evaluating, from the
/// operators' ranks and associativity.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub head: Arc<Expr>,
    pub tail: Vec<(Operator, Arc<Expr>)>,
}

impl Operation {
    /// Number of operators.
    pub fn len(&self) -> usize {
        self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tail.is_empty()
    }

    /// The span from the head to the last operand.
    pub fn span(&self) -> Span {
        match self.tail.last() {
            Some((_, last)) => self.head.span.merge(last.span),
            None => self.head.span,
        }
    }

    pub fn operators(&self) -> impl Iterator<Item = InfixOpType> + '_ {
        self.tail.iter().map(|(op, _)| op.kind)
    }

    /// All operands in order, the head first.
    pub fn operands(&self) -> impl Iterator<Item = &Arc<Expr>> + '_ {
        std::iter::once(&self.head).chain(self.tail.iter().map(|(_, e)| e))
    }
}
