//! A single typed node of the parameter tree.

use std::path::PathBuf;

use crate::{
    Array, DoubleRange, Matrix, ParameterKind, ParameterSet, PathValue, SelectableSubset, Selection, TreeError,
};

pub type Vector3 = [f64; 3];

/// Presentation hints carried over from the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParameterFlags {
    pub hidden: bool,
    pub expert: bool,
    pub necessary: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    Vector(Vector3),
    String(String),
    Path(PathValue),
    Selection(Selection),
    Subset(ParameterSet),
    SelectableSubset(SelectableSubset),
    Array(Array),
    Matrix(Matrix),
    DoubleRange(DoubleRange),
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Bool(_) => ParameterKind::Bool,
            ParameterValue::Int(_) => ParameterKind::Int,
            ParameterValue::Double(_) => ParameterKind::Double,
            ParameterValue::Vector(_) => ParameterKind::Vector,
            ParameterValue::String(_) => ParameterKind::String,
            ParameterValue::Path(_) => ParameterKind::Path,
            ParameterValue::Selection(_) => ParameterKind::Selection,
            ParameterValue::Subset(_) => ParameterKind::Subset,
            ParameterValue::SelectableSubset(_) => ParameterKind::SelectableSubset,
            ParameterValue::Array(_) => ParameterKind::Array,
            ParameterValue::Matrix(_) => ParameterKind::Matrix,
            ParameterValue::DoubleRange(_) => ParameterKind::DoubleRange,
        }
    }

    /// Child reached by one path segment: a subset entry, an entry of the
    /// active alternative, or an array element by index.
    pub(crate) fn child(&self, segment: &str) -> Option<&Parameter> {
        match self {
            ParameterValue::Subset(set) => set.entry(segment),
            ParameterValue::SelectableSubset(sel) => sel.active().entry(segment),
            ParameterValue::Array(array) => array.element(segment.parse().ok()?),
            _ => None,
        }
    }

    pub(crate) fn child_mut(&mut self, segment: &str) -> Option<&mut Parameter> {
        match self {
            ParameterValue::Subset(set) => set.entry_mut(segment),
            ParameterValue::SelectableSubset(sel) => sel.active_mut().entry_mut(segment),
            ParameterValue::Array(array) => array.element_mut(segment.parse().ok()?),
            _ => None,
        }
    }

    /// Visits every path value below this node, in tree order.
    pub(crate) fn try_for_each_path<F>(&mut self, f: &mut F) -> Result<(), TreeError>
    where
        F: FnMut(&mut PathValue) -> Result<(), TreeError>,
    {
        match self {
            ParameterValue::Path(path) => f(path),
            ParameterValue::Subset(set) => set.try_for_each_path(f),
            ParameterValue::SelectableSubset(sel) => sel.active_mut().try_for_each_path(f),
            ParameterValue::Array(array) => array
                .iter_mut()
                .try_for_each(|element| element.value.try_for_each_path(f)),
            ParameterValue::Bool(_)
            | ParameterValue::Int(_)
            | ParameterValue::Double(_)
            | ParameterValue::Vector(_)
            | ParameterValue::String(_)
            | ParameterValue::Selection(_)
            | ParameterValue::Matrix(_)
            | ParameterValue::DoubleRange(_) => Ok(()),
        }
    }
}

/// Typed, described node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub(crate) value: ParameterValue,
    description: String,
    flags: ParameterFlags,
}

impl Parameter {
    pub fn new(value: ParameterValue, description: impl Into<String>) -> Self {
        Self {
            value,
            description: description.into(),
            flags: ParameterFlags::default(),
        }
    }

    pub fn bool(value: bool, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::Bool(value), description)
    }

    pub fn int(value: i64, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::Int(value), description)
    }

    pub fn double(value: f64, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::Double(value), description)
    }

    pub fn vector(value: Vector3, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::Vector(value), description)
    }

    pub fn string(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::String(value.into()), description)
    }

    pub fn path(value: impl Into<PathBuf>, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::Path(PathValue::new(value)), description)
    }

    pub fn selection(value: Selection, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::Selection(value), description)
    }

    pub fn subset(value: ParameterSet, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::Subset(value), description)
    }

    pub fn selectable_subset(value: SelectableSubset, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::SelectableSubset(value), description)
    }

    pub fn array(value: Array, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::Array(value), description)
    }

    pub fn matrix(value: Matrix, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::Matrix(value), description)
    }

    pub fn double_range(value: DoubleRange, description: impl Into<String>) -> Self {
        Self::new(ParameterValue::DoubleRange(value), description)
    }

    pub fn hidden(mut self) -> Self {
        self.flags.hidden = true;
        self
    }

    pub fn expert(mut self) -> Self {
        self.flags.expert = true;
        self
    }

    pub fn necessary(mut self) -> Self {
        self.flags.necessary = true;
        self
    }

    pub fn with_flags(mut self, flags: ParameterFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn kind(&self) -> ParameterKind {
        self.value.kind()
    }

    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut ParameterValue {
        &mut self.value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn flags(&self) -> ParameterFlags {
        self.flags
    }

    /// Typed view of this node's value.
    ///
    /// A mismatch carries an empty path; anchor it with [`TreeError::at`].
    pub fn value_as<T: ParameterType>(&self) -> Result<&T, TreeError> {
        T::from_value(&self.value).ok_or_else(|| self.mismatch::<T>())
    }

    pub fn value_as_mut<T: ParameterType>(&mut self) -> Result<&mut T, TreeError> {
        let actual = self.kind();
        T::from_value_mut(&mut self.value).ok_or(TreeError::TypeMismatch {
            path: String::new(),
            expected: T::KIND,
            actual,
        })
    }

    fn mismatch<T: ParameterType>(&self) -> TreeError {
        TreeError::TypeMismatch {
            path: String::new(),
            expected: T::KIND,
            actual: self.kind(),
        }
    }
}

/// Rust types that can be borrowed out of a [`ParameterValue`].
pub trait ParameterType {
    const KIND: ParameterKind;

    fn from_value(value: &ParameterValue) -> Option<&Self>;
    fn from_value_mut(value: &mut ParameterValue) -> Option<&mut Self>;
}

macro_rules! parameter_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ParameterType for $ty {
                const KIND: ParameterKind = ParameterKind::$variant;

                fn from_value(value: &ParameterValue) -> Option<&Self> {
                    match value {
                        ParameterValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_value_mut(value: &mut ParameterValue) -> Option<&mut Self> {
                    match value {
                        ParameterValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for ParameterValue {
                fn from(value: $ty) -> Self {
                    ParameterValue::$variant(value)
                }
            }
        )*
    };
}

parameter_type! {
    bool => Bool,
    i64 => Int,
    f64 => Double,
    Vector3 => Vector,
    String => String,
    PathValue => Path,
    Selection => Selection,
    ParameterSet => Subset,
    SelectableSubset => SelectableSubset,
    Array => Array,
    Matrix => Matrix,
    DoubleRange => DoubleRange,
}
