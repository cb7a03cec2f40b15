//! Runtime parameter kinds and their document type tags.

use std::fmt;

/// Closed set of runtime parameter kinds.
///
/// The tag string is what documents store in the `type` attribute of every
/// node, so it must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Bool,
    Int,
    Double,
    Vector,
    String,
    Path,
    Selection,
    Subset,
    SelectableSubset,
    Array,
    Matrix,
    DoubleRange,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 12] = [
        ParameterKind::Bool,
        ParameterKind::Int,
        ParameterKind::Double,
        ParameterKind::Vector,
        ParameterKind::String,
        ParameterKind::Path,
        ParameterKind::Selection,
        ParameterKind::Subset,
        ParameterKind::SelectableSubset,
        ParameterKind::Array,
        ParameterKind::Matrix,
        ParameterKind::DoubleRange,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ParameterKind::Bool => "bool",
            ParameterKind::Int => "int",
            ParameterKind::Double => "double",
            ParameterKind::Vector => "vector",
            ParameterKind::String => "string",
            ParameterKind::Path => "path",
            ParameterKind::Selection => "selection",
            ParameterKind::Subset => "subset",
            ParameterKind::SelectableSubset => "selectableSubset",
            ParameterKind::Array => "array",
            ParameterKind::Matrix => "matrix",
            ParameterKind::DoubleRange => "doubleRange",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Kinds that own child parameters.
    pub fn is_composite(self) -> bool {
        matches!(
            self,
            ParameterKind::Subset | ParameterKind::SelectableSubset | ParameterKind::Array
        )
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
