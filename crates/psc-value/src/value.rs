//! Runtime values.

use std::fmt;

use num_traits::ToPrimitive;
use psc_types::{DataType, SingleType};

use crate::error::{ValueError, ValueResult};
use crate::number::Number;

/// A runtime value.
///
/// Values are created fresh by every evaluation and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(Number),
    Text(String),
    Char(char),
    Array(ArrayValue),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Value {
        Value::Text(s.into())
    }

    pub fn int(n: i64) -> Value {
        Value::Number(Number::from(n))
    }

    /// The type tag of this value. Arrays report their declared type.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Bool(_) => DataType::BOOL,
            Value::Number(Number::Int(_)) => DataType::INT,
            Value::Number(_) => DataType::NR,
            Value::Text(_) => DataType::TEXT,
            Value::Char(_) => DataType::CHAR,
            Value::Array(a) => a.declared,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ArrayValue> for Value {
    fn from(a: ArrayValue) -> Self {
        Value::Array(a)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Char(c) => write!(f, "{c}"),
            Value::Array(a) => write!(f, "{a}"),
        }
    }
}

/// An ordered sequence of values tagged with a declared array type.
///
/// The declared type may be wider than the element types (`var[]` holding
/// integers); casting the array re-validates every element.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    declared: DataType,
    elements: Vec<Value>,
}

impl ArrayValue {
    /// An array with an explicit declared type. Single types are wrapped into
    /// one array dimension.
    pub fn new(declared: DataType, elements: Vec<Value>) -> Self {
        let declared = if declared.is_array() {
            declared
        } else {
            declared.wrapped()
        };
        Self { declared, elements }
    }

    /// An array typed by the most specific type shared by all elements.
    pub fn of(elements: Vec<Value>) -> Self {
        let element_type = common_element_type(elements.iter().map(Value::data_type));
        Self::new(element_type.wrapped(), elements)
    }

    /// An array typed `var` with one dimension more than its shallowest
    /// element, the type of an array literal.
    pub fn generic(elements: Vec<Value>) -> Self {
        let inner_dims = elements
            .iter()
            .map(|v| match v {
                Value::Array(a) => a.declared.dims,
                _ => 0,
            })
            .min()
            .unwrap_or(0);
        Self::new(
            DataType::array(SingleType::Var, inner_dims.saturating_add(1)),
            elements,
        )
    }

    pub fn declared_type(&self) -> DataType {
        self.declared
    }

    /// The declared type of one element.
    pub fn element_type(&self) -> DataType {
        self.declared.element_type().unwrap_or(DataType::VAR)
    }

    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Value> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element at `index`, which must be an integer in `0..len`.
    pub fn get(&self, index: &Value) -> ValueResult<&Value> {
        let Value::Number(Number::Int(i)) = index else {
            return Err(ValueError::Casting {
                from: index.data_type(),
                to: DataType::INT,
            });
        };
        i.to_usize()
            .and_then(|i| self.elements.get(i))
            .ok_or_else(|| ValueError::IndexOutOfBounds {
                index: i.to_string(),
                len: self.len(),
            })
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &ArrayValue) -> ArrayValue {
        let element_type = common_type(self.element_type(), other.element_type());
        let mut elements = self.elements.clone();
        elements.extend(other.elements.iter().cloned());
        ArrayValue::new(element_type.wrapped(), elements)
    }

    /// `self` with `value` appended.
    pub fn append(&self, value: Value) -> ArrayValue {
        let element_type = common_type(self.element_type(), value.data_type());
        let mut elements = self.elements.clone();
        elements.push(value);
        ArrayValue::new(element_type.wrapped(), elements)
    }

    /// `self` with `value` inserted at the front.
    pub fn prepend(&self, value: Value) -> ArrayValue {
        let element_type = common_type(value.data_type(), self.element_type());
        let mut elements = Vec::with_capacity(self.len() + 1);
        elements.push(value);
        elements.extend(self.elements.iter().cloned());
        ArrayValue::new(element_type.wrapped(), elements)
    }

    /// `count` copies of the elements, concatenated.
    pub fn repeat(&self, count: usize) -> ArrayValue {
        let total = self.len().saturating_mul(count);
        let elements = self.elements.iter().cloned().cycle().take(total).collect();
        ArrayValue::new(self.declared, elements)
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

/// The narrowest type both `a` and `b` are.
pub fn common_type(a: DataType, b: DataType) -> DataType {
    if a == b {
        return a;
    }
    if a.dims != b.dims {
        return DataType::VAR;
    }
    let base = match (a.base, b.base) {
        (x, y) if x.is(y) => y,
        (x, y) if y.is(x) => x,
        _ => SingleType::Var,
    };
    DataType::array(base, a.dims)
}

fn common_element_type(mut types: impl Iterator<Item = DataType>) -> DataType {
    match types.next() {
        Some(first) => types.fold(first, common_type),
        None => DataType::VAR,
    }
}
