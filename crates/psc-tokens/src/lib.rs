//! PSC token taxonomy: classified units and the followers table.

pub mod classifier;
pub mod token;

pub use classifier::{allowed_followers, matches, may_follow, AFTER_VALUE, LINE_START, VALUE_START};
pub use token::{
    AssignmentType, Associativity, BuilderType, FlagType, GroupKind, GroupSet, InfixOpType,
    KeywordType, PostfixOpType, PrefixOpType, SpecificType, Token,
};
