//! Chained comparisons.
//!
//! `a < b <= c` means `a < b and b <= c`. The rewrite inserts an `and` and a
//! second reference to the shared middle operand. When operators binding
//! tighter than a comparison sit between two comparisons (`a < b + 1 < c`),
//! the whole tighter run becomes the shared middle operand.

use std::sync::Arc;

use psc_tokens::InfixOpType;

use crate::ast::{Expr, ExprKind, Operation, Operator};

/// Rank of the comparison operators.
const COMPARISON_RANK: u8 = 3;

pub(crate) fn rewrite_comparison_chains(operation: Operation) -> Operation {
    let Operation { head, tail } = operation;
    if tail.iter().filter(|(op, _)| op.kind.is_comparison()).count() < 2 {
        return Operation { head, tail };
    }

    let mut out: Vec<(Operator, Arc<Expr>)> = Vec::with_capacity(tail.len() + 2);
    let mut i = 0;
    while i < tail.len() {
        let (op, operand) = &tail[i];
        // The run of tighter-binding operators right after `op`.
        let mut j = i + 1;
        while j < tail.len() && tail[j].0.rank() > COMPARISON_RANK {
            j += 1;
        }
        let chained = op.kind.is_comparison() && j < tail.len() && tail[j].0.kind.is_comparison();
        if !chained {
            out.extend(tail[i..j].iter().cloned());
            i = j;
            continue;
        }
        let middle = if j == i + 1 {
            Arc::clone(operand)
        } else {
            let group = Operation {
                head: Arc::clone(operand),
                tail: tail[i + 1..j].to_vec(),
            };
            let span = group.span();
            Arc::new(Expr::new(ExprKind::Operation(group), span))
        };
        tracing::trace!(op = %op, next = %tail[j].0, "chained comparison");
        out.push((*op, Arc::clone(&middle)));
        out.push((Operator::new(InfixOpType::And, tail[j].0.span), middle));
        i = j;
    }
    Operation { head, tail: out }
}
