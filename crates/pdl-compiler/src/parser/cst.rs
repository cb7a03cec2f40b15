//! Syntax kinds for PDL.
//!
//! `SyntaxKind` serves both as token kind (from the lexer) and node kind (from
//! the parser). Logos derives token recognition; node kinds carry no
//! token/regex attributes. Type keywords are plain identifiers here: the parser
//! resolves them through a [`KeywordTable`](super::KeywordTable).

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then the `__LAST` sentinel.
/// `#[repr(u16)]` enables the transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("::")]
    DoubleColon,

    #[token("=")]
    Equals,

    #[token("*")]
    Star,

    /// Strings have no escapes and may span lines.
    #[regex(r#""[^"]*""#)]
    #[doc(hidden)]
    StringLiteral, // Lexer-internal only

    DoubleQuote,
    /// String content between quotes
    StrVal,

    /// Matrix dimensions, `3x3`. Longest match wins over `Number`.
    #[regex(r"[0-9]+x[0-9]+")]
    Dims,

    #[regex(r"[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Id,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    #[regex(r"#[^\n]*", allow_greedy = true)]
    LineComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    Inherits,
    TypePath,
    Entry,
    Description,
    Flag,
    Str,
    Block,
    SelectionItems,
    Alternative,
    BoolType,
    IntType,
    DoubleType,
    VectorType,
    StringType,
    PathType,
    SelectionType,
    SetType,
    IncludedSetType,
    SelectableType,
    ArrayType,
    MatrixType,
    DoubleRangeType,
    /// Keyword not found in the keyword table.
    UnknownType,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage | UnknownType)
    }

    /// Node kinds produced for a parameter declaration.
    #[inline]
    pub fn is_data(self) -> bool {
        matches!(
            self,
            BoolType
                | IntType
                | DoubleType
                | VectorType
                | StringType
                | PathType
                | SelectionType
                | SetType
                | IncludedSetType
                | SelectableType
                | ArrayType
                | MatrixType
                | DoubleRangeType
                | UnknownType
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PdlLang {}

impl Language for PdlLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<PdlLang>;
pub type SyntaxToken = rowan::SyntaxToken<PdlLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                // SAFETY: bounds checked against __LAST above
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// Top level has no closing brace to stop at.
    pub const ROOT_RECOVERY: TokenSet = TokenSet::new(&[Id]);

    /// Where a broken entry gives up and the next entry may start.
    pub const ENTRY_RECOVERY: TokenSet = TokenSet::new(&[Id, BraceClose]);
}
