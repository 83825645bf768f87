//! PSC expression merger: turns one classified token line into an
//! expression tree.

pub mod ast;
mod chain;
mod merge_expr;
mod merger;

pub use merger::Merger;
