//! Token types for the PSC expression core.
//!
//! Defines the closed two-level taxonomy: every [`SpecificType`] belongs to
//! exactly one [`GroupKind`]. [`Token`] pairs a specific type with its source
//! text and [`Span`].

use psc_types::{DataType, Span};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single classified unit of a source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: SpecificType,
    /// The source text of the token.
    pub text: String,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: SpecificType, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Classify a single word with [`SpecificType::from_symbol`].
    ///
    /// Returns `None` for text that is neither reserved nor a valid literal or
    /// name.
    pub fn classify(text: &str, span: Span) -> Option<Self> {
        SpecificType::from_symbol(text).map(|kind| Self::new(kind, text, span))
    }

    /// The group this token belongs to.
    pub fn group(&self) -> GroupKind {
        self.kind.group()
    }

    /// Returns `true` if this token has exactly the given kind.
    pub fn is(&self, kind: SpecificType) -> bool {
        self.kind == kind
    }

    /// The source line this token was read from.
    pub fn line(&self) -> u32 {
        self.span.line
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Groups
// ─────────────────────────────────────────────────────────────────────

/// The first level of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Keyword,
    Flag,
    Builder,
    PrefixOperator,
    InfixOperator,
    PostfixOperator,
    Assignment,
    DataType,
    Name,
    Literal,
}

impl GroupKind {
    pub const ALL: [GroupKind; 10] = [
        GroupKind::Keyword,
        GroupKind::Flag,
        GroupKind::Builder,
        GroupKind::PrefixOperator,
        GroupKind::InfixOperator,
        GroupKind::PostfixOperator,
        GroupKind::Assignment,
        GroupKind::DataType,
        GroupKind::Name,
        GroupKind::Literal,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GroupKind::Keyword => "keyword",
            GroupKind::Flag => "flag",
            GroupKind::Builder => "builder",
            GroupKind::PrefixOperator => "prefix operator",
            GroupKind::InfixOperator => "infix operator",
            GroupKind::PostfixOperator => "postfix operator",
            GroupKind::Assignment => "assignment",
            GroupKind::DataType => "data type",
            GroupKind::Name => "name",
            GroupKind::Literal => "literal",
        })
    }
}

/// An immutable set of [`GroupKind`]s, usable in `const` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GroupSet(u16);

impl GroupSet {
    pub const EMPTY: GroupSet = GroupSet(0);

    pub const fn of(groups: &[GroupKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < groups.len() {
            bits |= groups[i].bit();
            i += 1;
        }
        GroupSet(bits)
    }

    pub const fn union(self, other: GroupSet) -> Self {
        GroupSet(self.0 | other.0)
    }

    pub const fn contains(self, group: GroupKind) -> bool {
        self.0 & group.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = GroupKind> {
        GroupKind::ALL.into_iter().filter(move |g| self.contains(*g))
    }
}

impl fmt::Display for GroupSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|g| g.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Specific types
// ─────────────────────────────────────────────────────────────────────

/// The second level of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecificType {
    Keyword(KeywordType),
    Flag(FlagType),
    Builder(BuilderType),
    Prefix(PrefixOpType),
    Infix(InfixOpType),
    Postfix(PostfixOpType),
    Assignment(AssignmentType),
    DataType(DataType),
    Name,
    Literal,
}

impl SpecificType {
    /// The group this specific type belongs to.
    pub fn group(self) -> GroupKind {
        match self {
            SpecificType::Keyword(_) => GroupKind::Keyword,
            SpecificType::Flag(_) => GroupKind::Flag,
            SpecificType::Builder(_) => GroupKind::Builder,
            SpecificType::Prefix(_) => GroupKind::PrefixOperator,
            SpecificType::Infix(_) => GroupKind::InfixOperator,
            SpecificType::Postfix(_) => GroupKind::PostfixOperator,
            SpecificType::Assignment(_) => GroupKind::Assignment,
            SpecificType::DataType(_) => GroupKind::DataType,
            SpecificType::Name => GroupKind::Name,
            SpecificType::Literal => GroupKind::Literal,
        }
    }

    /// Look up a word. Reserved words and symbols map to their specific
    /// type, number/text/char/bool/conceptual literals to [`Self::Literal`],
    /// identifiers to [`Self::Name`].
    ///
    /// Symbols with more than one meaning resolve to the infix or postfix
    /// reading (`-` is `SUB`, `++` is postfix `INC`); use [`Self::as_prefix`]
    /// for the prefix reading.
    pub fn from_symbol(s: &str) -> Option<SpecificType> {
        use SpecificType as S;
        Some(match s {
            // Keywords
            "if" => S::Keyword(KeywordType::If),
            "elif" => S::Keyword(KeywordType::Elif),
            "any" => S::Keyword(KeywordType::Any),
            "else" => S::Keyword(KeywordType::Else),
            "for" => S::Keyword(KeywordType::For),
            "repeat" => S::Keyword(KeywordType::Repeat),
            "from" => S::Keyword(KeywordType::From),
            "while" => S::Keyword(KeywordType::While),
            "until" => S::Keyword(KeywordType::Until),
            "return" => S::Keyword(KeywordType::Return),
            "func" => S::Keyword(KeywordType::Func),
            "main" => S::Keyword(KeywordType::Main),
            "is" => S::Keyword(KeywordType::Is),
            "import" => S::Keyword(KeywordType::Import),
            // Flags
            "constant" => S::Flag(FlagType::Constant),
            "final" => S::Flag(FlagType::Final),
            "native" => S::Flag(FlagType::Native),
            // Builders
            "[" => S::Builder(BuilderType::ArrayStart),
            "]" => S::Builder(BuilderType::ArrayEnd),
            "(" => S::Builder(BuilderType::OpenBracket),
            ")" => S::Builder(BuilderType::CloseBracket),
            "{" => S::Builder(BuilderType::OpenBlock),
            "}" => S::Builder(BuilderType::CloseBlock),
            "->" => S::Builder(BuilderType::ArrowR),
            "," => S::Builder(BuilderType::Comma),
            ".." => S::Builder(BuilderType::Range),
            "to" => S::Builder(BuilderType::To),
            "step" => S::Builder(BuilderType::Step),
            "as" => S::Builder(BuilderType::As),
            ";" => S::Builder(BuilderType::MultiCloseScope),
            "|" => S::Builder(BuilderType::MultiCall),
            // Prefix-only operators
            "not" => S::Prefix(PrefixOpType::Not),
            // Infix operators
            "+" => S::Infix(InfixOpType::Add),
            "-" => S::Infix(InfixOpType::Sub),
            "*" => S::Infix(InfixOpType::Mult),
            "/" => S::Infix(InfixOpType::Div),
            "%" => S::Infix(InfixOpType::Mod),
            "^" => S::Infix(InfixOpType::Pow),
            "root" => S::Infix(InfixOpType::Root),
            "==" => S::Infix(InfixOpType::Equals),
            "!=" => S::Infix(InfixOpType::NotEquals),
            ">" => S::Infix(InfixOpType::Greater),
            ">=" => S::Infix(InfixOpType::GreaterEq),
            "<" => S::Infix(InfixOpType::Less),
            "<=" => S::Infix(InfixOpType::LessEq),
            "and" => S::Infix(InfixOpType::And),
            "or" => S::Infix(InfixOpType::Or),
            "nand" => S::Infix(InfixOpType::Nand),
            "nor" => S::Infix(InfixOpType::Nor),
            "xor" => S::Infix(InfixOpType::Xor),
            "in" => S::Infix(InfixOpType::In),
            // Postfix operators
            "++" => S::Postfix(PostfixOpType::Inc),
            "--" => S::Postfix(PostfixOpType::Dec),
            "!" => S::Postfix(PostfixOpType::Fac),
            // Assignments
            "=" => S::Assignment(AssignmentType::Normal),
            "+=" => S::Assignment(AssignmentType::Addi),
            "-=" => S::Assignment(AssignmentType::Subi),
            "*=" => S::Assignment(AssignmentType::Multi),
            "/=" => S::Assignment(AssignmentType::Divi),
            "^=" => S::Assignment(AssignmentType::Powi),
            "%=" => S::Assignment(AssignmentType::Modi),
            // Literals with a reserved spelling
            "true" | "false" | "NaN" | "Infinity" => S::Literal,
            _ => {
                if let Some(t) = DataType::parse(s) {
                    S::DataType(t)
                } else if is_literal(s) {
                    S::Literal
                } else if is_name(s) {
                    S::Name
                } else {
                    return None;
                }
            }
        })
    }

    /// The prefix reading of an ambiguous operator symbol.
    pub fn as_prefix(self) -> Option<SpecificType> {
        match self {
            SpecificType::Prefix(_) => Some(self),
            SpecificType::Infix(InfixOpType::Sub) => Some(SpecificType::Prefix(PrefixOpType::Neg)),
            SpecificType::Postfix(PostfixOpType::Inc) => {
                Some(SpecificType::Prefix(PrefixOpType::Inc))
            }
            SpecificType::Postfix(PostfixOpType::Dec) => {
                Some(SpecificType::Prefix(PrefixOpType::Dec))
            }
            _ => None,
        }
    }
}

/// Number (`12`, `0.25`), text (`"abc"`) or char (`'a'`) literal.
fn is_literal(s: &str) -> bool {
    is_number_literal(s)
        || (s.len() >= 2 && s.starts_with('"') && s.ends_with('"'))
        || (s.starts_with('\'') && s.ends_with('\'') && s.chars().count() == 3)
}

fn is_number_literal(s: &str) -> bool {
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    !int.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.is_none_or(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
}

fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl fmt::Display for SpecificType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecificType::Keyword(k) => write!(f, "{k}"),
            SpecificType::Flag(k) => write!(f, "{k}"),
            SpecificType::Builder(k) => write!(f, "{k}"),
            SpecificType::Prefix(k) => write!(f, "{k}"),
            SpecificType::Infix(k) => write!(f, "{k}"),
            SpecificType::Postfix(k) => write!(f, "{k}"),
            SpecificType::Assignment(k) => write!(f, "{k}"),
            SpecificType::DataType(t) => write!(f, "{t}"),
            SpecificType::Name => f.write_str("name"),
            SpecificType::Literal => f.write_str("literal"),
        }
    }
}

// ── Keywords ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordType {
    If,
    Elif,
    Any,
    Else,
    For,
    Repeat,
    From,
    While,
    Until,
    Return,
    Func,
    Main,
    Is,
    Import,
}

impl fmt::Display for KeywordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeywordType::If => "if",
            KeywordType::Elif => "elif",
            KeywordType::Any => "any",
            KeywordType::Else => "else",
            KeywordType::For => "for",
            KeywordType::Repeat => "repeat",
            KeywordType::From => "from",
            KeywordType::While => "while",
            KeywordType::Until => "until",
            KeywordType::Return => "return",
            KeywordType::Func => "func",
            KeywordType::Main => "main",
            KeywordType::Is => "is",
            KeywordType::Import => "import",
        })
    }
}

// ── Flags ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagType {
    Constant,
    Final,
    Native,
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlagType::Constant => "constant",
            FlagType::Final => "final",
            FlagType::Native => "native",
        })
    }
}

// ── Builders ─────────────────────────────────────────────────────────

/// Punctuation and the structural words of loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderType {
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `(`
    OpenBracket,
    /// `)`
    CloseBracket,
    /// `{`
    OpenBlock,
    /// `}`
    CloseBlock,
    /// `->` before a return type.
    ArrowR,
    /// `,`
    Comma,
    /// `..` integer range.
    Range,
    /// `to` in `from a to b`.
    To,
    /// `step` in `from a to b step c`.
    Step,
    /// `as` in `for x in xs as i`.
    As,
    /// `;` closes several scopes on one line.
    MultiCloseScope,
    /// `|` opens and closes a multi-call, as in `|a, b| * 2`.
    MultiCall,
}

impl fmt::Display for BuilderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuilderType::ArrayStart => "[",
            BuilderType::ArrayEnd => "]",
            BuilderType::OpenBracket => "(",
            BuilderType::CloseBracket => ")",
            BuilderType::OpenBlock => "{",
            BuilderType::CloseBlock => "}",
            BuilderType::ArrowR => "->",
            BuilderType::Comma => ",",
            BuilderType::Range => "..",
            BuilderType::To => "to",
            BuilderType::Step => "step",
            BuilderType::As => "as",
            BuilderType::MultiCloseScope => ";",
            BuilderType::MultiCall => "|",
        })
    }
}

// ── Operators ────────────────────────────────────────────────────────

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOpType {
    /// `not`
    Not,
    /// `-`
    Neg,
    /// `++`
    Inc,
    /// `--`
    Dec,
}

impl fmt::Display for PrefixOpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrefixOpType::Not => "not",
            PrefixOpType::Neg => "-",
            PrefixOpType::Inc => "++",
            PrefixOpType::Dec => "--",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOpType {
    // Arithmetic
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    Pow,
    Root,
    // Comparison
    Equals,
    NotEquals,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    // Logic
    And,
    Or,
    Nand,
    Nor,
    Xor,
    // Membership
    In,
}

impl InfixOpType {
    /// Precedence rank; higher binds tighter.
    pub fn rank(self) -> u8 {
        match self {
            InfixOpType::Pow | InfixOpType::Root => 7,
            InfixOpType::Mult | InfixOpType::Div | InfixOpType::Mod => 6,
            InfixOpType::Add | InfixOpType::Sub => 5,
            InfixOpType::In => 4,
            InfixOpType::Equals
            | InfixOpType::NotEquals
            | InfixOpType::Greater
            | InfixOpType::GreaterEq
            | InfixOpType::Less
            | InfixOpType::LessEq => 3,
            InfixOpType::And | InfixOpType::Nand => 2,
            InfixOpType::Or | InfixOpType::Nor | InfixOpType::Xor => 1,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            InfixOpType::Pow | InfixOpType::Root => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn is_comparison(self) -> bool {
        self.rank() == 3
    }

    pub fn is_arithmetic(self) -> bool {
        self.rank() >= 5
    }

    pub fn is_logical(self) -> bool {
        self.rank() <= 2
    }
}

impl fmt::Display for InfixOpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InfixOpType::Add => "+",
            InfixOpType::Sub => "-",
            InfixOpType::Mult => "*",
            InfixOpType::Div => "/",
            InfixOpType::Mod => "%",
            InfixOpType::Pow => "^",
            InfixOpType::Root => "root",
            InfixOpType::Equals => "==",
            InfixOpType::NotEquals => "!=",
            InfixOpType::Greater => ">",
            InfixOpType::GreaterEq => ">=",
            InfixOpType::Less => "<",
            InfixOpType::LessEq => "<=",
            InfixOpType::And => "and",
            InfixOpType::Or => "or",
            InfixOpType::Nand => "nand",
            InfixOpType::Nor => "nor",
            InfixOpType::Xor => "xor",
            InfixOpType::In => "in",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixOpType {
    /// `++`
    Inc,
    /// `--`
    Dec,
    /// `!` (factorial)
    Fac,
}

impl fmt::Display for PostfixOpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PostfixOpType::Inc => "++",
            PostfixOpType::Dec => "--",
            PostfixOpType::Fac => "!",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentType {
    Normal,
    Addi,
    Subi,
    Multi,
    Divi,
    Powi,
    Modi,
}

impl AssignmentType {
    /// The infix operator combined into the target, `None` for `=`.
    pub fn op(self) -> Option<InfixOpType> {
        match self {
            AssignmentType::Normal => None,
            AssignmentType::Addi => Some(InfixOpType::Add),
            AssignmentType::Subi => Some(InfixOpType::Sub),
            AssignmentType::Multi => Some(InfixOpType::Mult),
            AssignmentType::Divi => Some(InfixOpType::Div),
            AssignmentType::Powi => Some(InfixOpType::Pow),
            AssignmentType::Modi => Some(InfixOpType::Mod),
        }
    }
}

impl fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssignmentType::Normal => "=",
            AssignmentType::Addi => "+=",
            AssignmentType::Subi => "-=",
            AssignmentType::Multi => "*=",
            AssignmentType::Divi => "/=",
            AssignmentType::Powi => "^=",
            AssignmentType::Modi => "%=",
        })
    }
}
