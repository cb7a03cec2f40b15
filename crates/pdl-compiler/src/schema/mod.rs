//! Schema model: what a PDL file declares, independent of syntax.
//!
//! Lowering turns the AST into a [`Schema`]; the code generator and the
//! default-tree interpreter both walk it.

mod instantiate;
mod lower;
mod printer;

#[cfg(test)]
mod instantiate_tests;
#[cfg(test)]
mod printer_tests;

use std::fmt;

use pdl_core::{ParameterFlags, ParameterKind, Vector3};
use rowan::TextRange;

pub use instantiate::{Includes, instantiate, instantiate_with};
pub use lower::lower;
pub use printer::{Colors, SchemaPrinter};

/// Ordered top-level entries plus the optional base schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub base: Option<SchemaPath>,
    pub entries: Vec<Descriptor>,
}

/// `a::b::Name`, as named by `inherits` and `includedset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPath {
    pub segments: Vec<String>,
}

impl SchemaPath {
    /// Last segment: the schema's own name.
    pub fn name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub name: String,
    pub description: String,
    pub flags: ParameterFlags,
    pub kind: DescriptorKind,
    pub span: TextRange,
}

/// Kind-specific payload: default value or nested declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptorKind {
    Bool(bool),
    Int(i64),
    Double(f64),
    Vector(Vector3),
    String(String),
    Path(String),
    Selection {
        items: Vec<String>,
        default: usize,
    },
    Subset(Vec<Descriptor>),
    SelectableSubset {
        alternatives: Vec<Alternative>,
        default: usize,
    },
    Array {
        element: Box<Descriptor>,
        len: usize,
    },
    Matrix {
        rows: usize,
        cols: usize,
    },
    /// Subset whose entries are another schema's tree.
    IncludedSet(SchemaPath),
    DoubleRange(Vec<f64>),
}

/// A named alternative of a selectable subset.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub tag: String,
    pub description: String,
    pub entries: Vec<Descriptor>,
    pub span: TextRange,
}

impl Descriptor {
    pub fn parameter_kind(&self) -> ParameterKind {
        self.kind.parameter_kind()
    }

    pub fn is_composite(&self) -> bool {
        self.kind.is_composite()
    }
}

impl DescriptorKind {
    pub fn parameter_kind(&self) -> ParameterKind {
        match self {
            DescriptorKind::Bool(_) => ParameterKind::Bool,
            DescriptorKind::Int(_) => ParameterKind::Int,
            DescriptorKind::Double(_) => ParameterKind::Double,
            DescriptorKind::Vector(_) => ParameterKind::Vector,
            DescriptorKind::String(_) => ParameterKind::String,
            DescriptorKind::Path(_) => ParameterKind::Path,
            DescriptorKind::Selection { .. } => ParameterKind::Selection,
            DescriptorKind::Subset(_) => ParameterKind::Subset,
            DescriptorKind::SelectableSubset { .. } => ParameterKind::SelectableSubset,
            DescriptorKind::Array { .. } => ParameterKind::Array,
            DescriptorKind::Matrix { .. } => ParameterKind::Matrix,
            DescriptorKind::IncludedSet(_) => ParameterKind::Subset,
            DescriptorKind::DoubleRange(_) => ParameterKind::DoubleRange,
        }
    }

    /// Kinds whose generated type is declared by the generator itself.
    ///
    /// These have no default literal; their record default comes from the
    /// declared type's `Default` impl. An included set is typed by the
    /// included schema, so it is not one of them.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            DescriptorKind::Selection { .. }
                | DescriptorKind::Subset(_)
                | DescriptorKind::SelectableSubset { .. }
        )
    }
}
