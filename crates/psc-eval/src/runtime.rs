//! The evaluator's view of variable storage and function dispatch.

use psc_value::Value;

use crate::error::EvalResult;

/// Storage and call capabilities the evaluator relies on.
///
/// Failures are returned as [`EvalError`](crate::EvalError)s and reach the
/// caller unchanged apart from the span of the node that triggered them.
pub trait Runtime {
    /// Resolve a variable.
    fn get_value(&self, name: &str) -> EvalResult<Value>;

    /// Store a variable, creating it if it does not exist yet.
    fn set_value(&mut self, name: &str, value: Value) -> EvalResult<()>;

    /// Call a function with already evaluated arguments.
    fn invoke(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Value>;
}
