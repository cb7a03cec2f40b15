//! Runtime parameter tree for PDL-generated bindings.
//!
//! # Example
//!
//! ```
//! use pdl_core::{Parameter, ParameterSet};
//!
//! let mut mesh = ParameterSet::new();
//! mesh.insert("cells", Parameter::int(10, "cells per direction"));
//!
//! let mut tree = ParameterSet::new();
//! tree.insert("mesh", Parameter::subset(mesh, ""));
//! tree.set_int("mesh/cells", 20).unwrap();
//!
//! assert_eq!(tree.get_int("mesh/cells").unwrap(), 20);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod array;
mod document;
mod double_range;
mod error;
mod kind;
mod matrix;
mod parameter;
mod path_value;
mod registry;
mod selectable;
mod selection;
mod set;

#[cfg(test)]
mod document_tests;
#[cfg(test)]
mod selectable_tests;

pub use array::Array;
pub use document::read_schema_name;
pub use double_range::DoubleRange;
pub use error::TreeError;
pub use kind::ParameterKind;
pub use matrix::Matrix;
pub use parameter::{Parameter, ParameterFlags, ParameterType, ParameterValue, Vector3};
pub use path_value::{EMBEDDED_DIR, PathValue};
pub use registry::{DefaultFactory, SchemaRegistry};
pub use selectable::SelectableSubset;
pub use selection::Selection;
pub use set::ParameterSet;
