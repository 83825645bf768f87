//! The followers table: which groups may legally follow each specific type.
//!
//! The table is total (every specific type has an entry, possibly empty) and
//! purely static. Lookups never fail; turning a mismatch into a structural
//! error is the caller's job.

use crate::token::{BuilderType, GroupKind, GroupSet, KeywordType, SpecificType, Token};

use GroupKind as G;

/// Groups that can start a value: literals, names, brackets/arrays and
/// prefix operators.
pub const VALUE_START: GroupSet =
    GroupSet::of(&[G::Literal, G::Name, G::Builder, G::PrefixOperator]);

/// Groups that can follow a complete value: operators, separators and
/// binding keywords.
pub const AFTER_VALUE: GroupSet = GroupSet::of(&[
    G::InfixOperator,
    G::PostfixOperator,
    G::Keyword,
    G::Builder,
]);

/// Groups that can open a line.
pub const LINE_START: GroupSet = VALUE_START.union(GroupSet::of(&[G::Keyword, G::Flag, G::DataType]));

/// Returns the set of groups a token following `kind` may belong to.
pub fn allowed_followers(kind: SpecificType) -> GroupSet {
    match kind {
        SpecificType::Keyword(k) => match k {
            KeywordType::If
            | KeywordType::Elif
            | KeywordType::Any
            | KeywordType::While
            | KeywordType::Until
            | KeywordType::Repeat
            | KeywordType::From
            | KeywordType::Return => VALUE_START,
            KeywordType::Else => GroupSet::of(&[G::Keyword, G::Builder]),
            KeywordType::For | KeywordType::Func | KeywordType::Import => GroupSet::of(&[G::Name]),
            KeywordType::Main => GroupSet::of(&[G::Builder]),
            KeywordType::Is => GroupSet::of(&[G::DataType]),
        },
        SpecificType::Flag(_) => {
            GroupSet::of(&[G::Flag, G::DataType, G::Keyword, G::Name, G::Builder])
        }
        SpecificType::Builder(b) => match b {
            BuilderType::ArrayStart | BuilderType::Comma => VALUE_START,
            BuilderType::ArrayEnd => AFTER_VALUE.union(GroupSet::of(&[G::Assignment, G::Name])),
            BuilderType::OpenBracket => VALUE_START.union(GroupSet::of(&[G::DataType])),
            BuilderType::CloseBracket | BuilderType::MultiCall => VALUE_START.union(AFTER_VALUE),
            BuilderType::To | BuilderType::Step => VALUE_START,
            BuilderType::Range => GroupSet::of(&[G::Literal]),
            BuilderType::ArrowR => GroupSet::of(&[G::DataType]),
            BuilderType::As => GroupSet::of(&[G::Name]),
            BuilderType::OpenBlock | BuilderType::CloseBlock | BuilderType::MultiCloseScope => {
                GroupSet::EMPTY
            }
        },
        SpecificType::Prefix(_) | SpecificType::Infix(_) | SpecificType::Assignment(_) => {
            VALUE_START
        }
        SpecificType::Postfix(_) | SpecificType::Literal => AFTER_VALUE,
        SpecificType::DataType(_) => AFTER_VALUE.union(GroupSet::of(&[G::Name, G::Assignment])),
        SpecificType::Name => AFTER_VALUE.union(GroupSet::of(&[G::Assignment])),
    }
}

/// Returns `true` if `token` belongs to one of the `expected` groups.
pub fn matches(token: &Token, expected: GroupSet) -> bool {
    expected.contains(token.group())
}

/// Returns `true` if `next` may directly follow `prev` on a line.
pub fn may_follow(prev: SpecificType, next: SpecificType) -> bool {
    allowed_followers(prev).contains(next.group())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{InfixOpType, PostfixOpType, PrefixOpType};
    use psc_types::{DataType, Span};

    fn tok(text: &str) -> Token {
        Token::classify(text, Span::point(1, 1)).expect("classifiable")
    }

    #[test]
    fn test_operand_after_infix() {
        let plus = SpecificType::Infix(InfixOpType::Add);
        assert!(may_follow(plus, SpecificType::Literal));
        assert!(may_follow(plus, SpecificType::Name));
        assert!(may_follow(plus, SpecificType::Prefix(PrefixOpType::Neg)));
        assert!(!may_follow(plus, SpecificType::Infix(InfixOpType::Mult)));
        assert!(!may_follow(plus, SpecificType::Postfix(PostfixOpType::Fac)));
    }

    #[test]
    fn test_literal_cannot_follow_literal() {
        assert!(!may_follow(SpecificType::Literal, SpecificType::Literal));
        assert!(!may_follow(SpecificType::Literal, SpecificType::Name));
    }

    #[test]
    fn test_is_expects_data_type() {
        let is = SpecificType::Keyword(KeywordType::Is);
        assert!(may_follow(is, SpecificType::DataType(DataType::INT)));
        assert!(!may_follow(is, SpecificType::Literal));
    }

    #[test]
    fn test_cast_bracket_accepts_data_type() {
        let open = SpecificType::Builder(BuilderType::OpenBracket);
        assert!(may_follow(open, SpecificType::DataType(DataType::TEXT)));
        let close = SpecificType::Builder(BuilderType::CloseBracket);
        assert!(may_follow(close, SpecificType::Literal));
    }

    #[test]
    fn test_blocks_end_the_line() {
        assert!(allowed_followers(SpecificType::Builder(BuilderType::OpenBlock)).is_empty());
    }

    #[test]
    fn test_matches() {
        assert!(matches(&tok("42"), VALUE_START));
        assert!(matches(&tok("x"), VALUE_START));
        assert!(!matches(&tok("*"), VALUE_START));
        assert!(matches(&tok("*"), AFTER_VALUE));
        assert!(matches(&tok("if"), LINE_START));
    }

    #[test]
    fn test_table_is_total() {
        // Every representative kind has an entry and postfix/literal/name
        // accept at least an infix operator afterwards.
        for text in ["x", "1", "!", "]", ")"] {
            let followers = allowed_followers(tok(text).kind);
            assert!(
                followers.contains(G::InfixOperator),
                "{text} should accept an infix follower, got {followers}"
            );
        }
    }

    #[test]
    fn test_group_set_display() {
        let set = GroupSet::of(&[G::Name, G::Literal]);
        assert_eq!(set.to_string(), "{name, literal}");
    }
}
