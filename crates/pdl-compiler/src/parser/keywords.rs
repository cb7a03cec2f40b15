//! Type keywords.
//!
//! Keywords are ordinary identifiers to the lexer. Which identifiers introduce
//! a parameter type is decided by a table handed to the parser, so tools can
//! accept legacy spellings without touching the grammar.

use std::collections::HashMap;

use super::cst::SyntaxKind;

/// Declaration form introduced by a type keyword.
///
/// Mostly one per runtime kind; `includedset` declares a subset whose
/// entries come from another schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Bool,
    Int,
    Double,
    Vector,
    String,
    Path,
    Selection,
    Set,
    IncludedSet,
    SelectableSubset,
    Array,
    Matrix,
    DoubleRange,
}

impl Keyword {
    pub(super) fn node_kind(self) -> SyntaxKind {
        match self {
            Keyword::Bool => SyntaxKind::BoolType,
            Keyword::Int => SyntaxKind::IntType,
            Keyword::Double => SyntaxKind::DoubleType,
            Keyword::Vector => SyntaxKind::VectorType,
            Keyword::String => SyntaxKind::StringType,
            Keyword::Path => SyntaxKind::PathType,
            Keyword::Selection => SyntaxKind::SelectionType,
            Keyword::Set => SyntaxKind::SetType,
            Keyword::IncludedSet => SyntaxKind::IncludedSetType,
            Keyword::SelectableSubset => SyntaxKind::SelectableType,
            Keyword::Array => SyntaxKind::ArrayType,
            Keyword::Matrix => SyntaxKind::MatrixType,
            Keyword::DoubleRange => SyntaxKind::DoubleRangeType,
        }
    }

    pub(super) fn from_node_kind(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::BoolType => Keyword::Bool,
            SyntaxKind::IntType => Keyword::Int,
            SyntaxKind::DoubleType => Keyword::Double,
            SyntaxKind::VectorType => Keyword::Vector,
            SyntaxKind::StringType => Keyword::String,
            SyntaxKind::PathType => Keyword::Path,
            SyntaxKind::SelectionType => Keyword::Selection,
            SyntaxKind::SetType => Keyword::Set,
            SyntaxKind::IncludedSetType => Keyword::IncludedSet,
            SyntaxKind::SelectableType => Keyword::SelectableSubset,
            SyntaxKind::ArrayType => Keyword::Array,
            SyntaxKind::MatrixType => Keyword::Matrix,
            SyntaxKind::DoubleRangeType => Keyword::DoubleRange,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct KeywordTable {
    keywords: HashMap<String, Keyword>,
}

impl KeywordTable {
    /// Empty table: every type keyword is unknown.
    pub fn empty() -> Self {
        Self {
            keywords: HashMap::new(),
        }
    }

    /// The keywords of the language.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table
            .register("bool", Keyword::Bool)
            .register("int", Keyword::Int)
            .register("double", Keyword::Double)
            .register("vector", Keyword::Vector)
            .register("string", Keyword::String)
            .register("path", Keyword::Path)
            .register("selection", Keyword::Selection)
            .register("set", Keyword::Set)
            .register("includedset", Keyword::IncludedSet)
            .register("selectablesubset", Keyword::SelectableSubset)
            .register("array", Keyword::Array)
            .register("matrix", Keyword::Matrix)
            .register("doubleRange", Keyword::DoubleRange);
        table
    }

    /// Adds `keyword` (or replaces its meaning).
    pub fn register(&mut self, keyword: impl Into<String>, meaning: Keyword) -> &mut Self {
        self.keywords.insert(keyword.into(), meaning);
        self
    }

    pub fn lookup(&self, keyword: &str) -> Option<Keyword> {
        self.keywords.get(keyword).copied()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::standard()
    }
}
