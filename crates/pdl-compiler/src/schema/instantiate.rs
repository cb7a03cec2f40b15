//! Default-tree interpreter.
//!
//! Builds the same tree the generated `make_default()` builds, straight from
//! the schema. Tools use it to show defaults without compiling Rust.

use pdl_core::{
    Array, DoubleRange, Matrix, Parameter, ParameterSet, SelectableSubset, Selection,
};

use super::{Descriptor, DescriptorKind, Schema, SchemaPath};

/// Looks up the default tree of an included schema.
pub type Includes<'a> = dyn FnMut(&SchemaPath) -> Option<ParameterSet> + 'a;

/// Default tree of `schema`, layered over `base` when the schema inherits.
///
/// Subsets already present in `base` are merged, everything else replaces
/// the base entry of the same name. Included sets stay empty; see
/// [`instantiate_with`].
pub fn instantiate(schema: &Schema, base: Option<ParameterSet>) -> ParameterSet {
    instantiate_with(schema, base, &mut |_| None)
}

/// Like [`instantiate`], filling each `includedset` from `includes`.
/// An include it cannot resolve is left as an empty subset.
pub fn instantiate_with(
    schema: &Schema,
    base: Option<ParameterSet>,
    includes: &mut Includes<'_>,
) -> ParameterSet {
    let mut set = base.unwrap_or_default();
    insert_entries(&mut set, &schema.entries, includes);
    set
}

fn insert_entries(set: &mut ParameterSet, entries: &[Descriptor], includes: &mut Includes<'_>) {
    for descriptor in entries {
        descriptor.insert_with(set, includes);
    }
}

fn build_set(entries: &[Descriptor], includes: &mut Includes<'_>) -> ParameterSet {
    let mut set = ParameterSet::new();
    insert_entries(&mut set, entries, includes);
    set
}

impl Descriptor {
    /// Runtime parameter holding this declaration's default.
    pub fn create(&self) -> Parameter {
        self.create_with(&mut |_| None)
    }

    pub fn create_with(&self, includes: &mut Includes<'_>) -> Parameter {
        let parameter = match &self.kind {
            DescriptorKind::Bool(value) => Parameter::bool(*value, &self.description),
            DescriptorKind::Int(value) => Parameter::int(*value, &self.description),
            DescriptorKind::Double(value) => Parameter::double(*value, &self.description),
            DescriptorKind::Vector(value) => Parameter::vector(*value, &self.description),
            DescriptorKind::String(value) => Parameter::string(value, &self.description),
            DescriptorKind::Path(value) => Parameter::path(value, &self.description),
            DescriptorKind::Selection { items, default } => {
                Parameter::selection(Selection::new(items, *default), &self.description)
            }
            DescriptorKind::Subset(entries) => {
                Parameter::subset(build_set(entries, includes), &self.description)
            }
            DescriptorKind::SelectableSubset {
                alternatives,
                default,
            } => {
                let sets: Vec<_> = alternatives
                    .iter()
                    .map(|alt| (alt.tag.as_str(), build_set(&alt.entries, includes)))
                    .collect();
                Parameter::selectable_subset(SelectableSubset::new(sets, *default), &self.description)
            }
            DescriptorKind::Array { element, len } => Parameter::array(
                Array::new(element.create_with(includes), *len),
                &self.description,
            ),
            DescriptorKind::Matrix { rows, cols } => {
                Parameter::matrix(Matrix::zeros(*rows, *cols), &self.description)
            }
            DescriptorKind::IncludedSet(path) => {
                let set = includes(path).unwrap_or_else(|| {
                    tracing::warn!(
                        parameter = %self.name,
                        schema = %path,
                        "included schema not found; its entries are missing"
                    );
                    ParameterSet::new()
                });
                Parameter::subset(set, &self.description)
            }
            DescriptorKind::DoubleRange(values) => Parameter::double_range(
                DoubleRange::new(values.iter().copied()),
                &self.description,
            ),
        };
        parameter.with_flags(self.flags)
    }

    /// Inserts the default parameter into `set`. A subset merges into an
    /// existing subset of the same name.
    pub fn insert_into(&self, set: &mut ParameterSet) {
        self.insert_with(set, &mut |_| None);
    }

    fn insert_with(&self, set: &mut ParameterSet, includes: &mut Includes<'_>) {
        let parameter = self.create_with(includes);
        match self.kind {
            DescriptorKind::Subset(_) | DescriptorKind::IncludedSet(_) => {
                set.insert_or_merge(&self.name, parameter)
            }
            _ => {
                set.insert(&self.name, parameter);
            }
        }
    }
}
