use serde::{Deserialize, Serialize};
use std::fmt;

/// The base of every [`DataType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingleType {
    Var,
    Text,
    Char,
    Bool,
    Nr,
    Int,
}

impl SingleType {
    pub const ALL: [SingleType; 6] = [
        SingleType::Var,
        SingleType::Text,
        SingleType::Char,
        SingleType::Bool,
        SingleType::Nr,
        SingleType::Int,
    ];

    /// The keyword used in source code.
    pub fn name(self) -> &'static str {
        match self {
            SingleType::Var => "var",
            SingleType::Text => "text",
            SingleType::Char => "char",
            SingleType::Bool => "bool",
            SingleType::Nr => "nr",
            SingleType::Int => "int",
        }
    }

    /// Returns `true` if this is equal to `other` or a constraint of it,
    /// like `int` for `nr` or `char` for `text`. Everything is a `var`.
    pub fn is(self, other: SingleType) -> bool {
        self == other
            || other == SingleType::Var
            || (self == SingleType::Int && other == SingleType::Nr)
            || (self == SingleType::Char && other == SingleType::Text)
    }

    fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == s)
    }
}

/// A single type with an optional number of array dimensions.
///
/// `int` has zero dimensions, `int[]` one, `var[][]` two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    pub base: SingleType,
    pub dims: u8,
}

impl DataType {
    pub const VAR: Self = Self::single(SingleType::Var);
    pub const TEXT: Self = Self::single(SingleType::Text);
    pub const CHAR: Self = Self::single(SingleType::Char);
    pub const BOOL: Self = Self::single(SingleType::Bool);
    pub const NR: Self = Self::single(SingleType::Nr);
    pub const INT: Self = Self::single(SingleType::Int);
    pub const VAR_ARRAY: Self = Self::array(SingleType::Var, 1);

    pub const fn single(base: SingleType) -> Self {
        Self { base, dims: 0 }
    }

    pub const fn array(base: SingleType, dims: u8) -> Self {
        Self { base, dims }
    }

    pub fn is_array(self) -> bool {
        self.dims > 0
    }

    /// The type of one element of this array type, `None` for single types.
    pub fn element_type(self) -> Option<DataType> {
        self.dims.checked_sub(1).map(|dims| Self::array(self.base, dims))
    }

    /// Wrap this type into one more array dimension.
    pub fn wrapped(self) -> DataType {
        Self::array(self.base, self.dims.saturating_add(1))
    }

    /// Parse a type name such as `nr` or `text[][]`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut rest = s;
        let mut dims: u8 = 0;
        while let Some(stripped) = rest.strip_suffix("[]") {
            rest = stripped;
            dims = dims.checked_add(1)?;
        }
        SingleType::from_name(rest).map(|base| Self::array(base, dims))
    }
}

impl From<SingleType> for DataType {
    fn from(base: SingleType) -> Self {
        Self::single(base)
    }
}

impl fmt::Display for SingleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.name())?;
        for _ in 0..self.dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}
