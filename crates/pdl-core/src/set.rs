//! Ordered, path-addressable collection of named parameters.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::{
    Array, DoubleRange, Matrix, Parameter, ParameterType, ParameterValue, PathValue, SelectableSubset,
    Selection, TreeError, Vector3,
};

/// Ordered mapping from name to owned [`Parameter`].
///
/// Paths are `/`-separated. A segment names an entry of a subset, an entry of
/// the active alternative of a selectable subset, or an array index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: IndexMap<String, Parameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Parameter> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Direct child `name`, without path resolution.
    pub fn entry(&self, name: &str) -> Option<&Parameter> {
        self.entries.get(name)
    }

    pub fn entry_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.entries.get_mut(name)
    }

    /// Inserts or replaces `name`, keeping the position of a replaced entry.
    pub fn insert(&mut self, name: impl Into<String>, parameter: Parameter) -> Option<Parameter> {
        self.entries.insert(name.into(), parameter)
    }

    /// Like [`ParameterSet::insert`], except that a subset landing on an
    /// existing subset is merged into it.
    pub fn insert_or_merge(&mut self, name: impl Into<String>, parameter: Parameter) {
        let name = name.into();
        if let (Some(existing), ParameterValue::Subset(children)) =
            (self.subset_mut(&name), &parameter.value)
        {
            existing.merge(children);
            return;
        }
        self.entries.insert(name, parameter);
    }

    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        self.entries.shift_remove(name)
    }

    /// Direct child subset `name`.
    pub fn subset_mut(&mut self, name: &str) -> Option<&mut ParameterSet> {
        match &mut self.entries.get_mut(name)?.value {
            ParameterValue::Subset(set) => Some(set),
            _ => None,
        }
    }

    pub fn parameter(&self, path: &str) -> Result<&Parameter, TreeError> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next().unwrap_or_default();
        let mut current = self
            .entries
            .get(first)
            .ok_or_else(|| not_found(path, first))?;
        for segment in segments {
            current = current
                .value
                .child(segment)
                .ok_or_else(|| not_found(path, segment))?;
        }
        Ok(current)
    }

    pub fn parameter_mut(&mut self, path: &str) -> Result<&mut Parameter, TreeError> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next().unwrap_or_default();
        let mut current = self
            .entries
            .get_mut(first)
            .ok_or_else(|| not_found(path, first))?;
        for segment in segments {
            current = current
                .value
                .child_mut(segment)
                .ok_or_else(|| not_found(path, segment))?;
        }
        Ok(current)
    }

    pub fn get<T: ParameterType>(&self, path: &str) -> Result<&T, TreeError> {
        self.parameter(path)?.value_as().map_err(|e| e.at(path))
    }

    pub fn get_mut<T: ParameterType>(&mut self, path: &str) -> Result<&mut T, TreeError> {
        self.parameter_mut(path)?.value_as_mut().map_err(|e| e.at(path))
    }

    pub fn get_bool(&self, path: &str) -> Result<bool, TreeError> {
        self.get::<bool>(path).copied()
    }

    pub fn get_int(&self, path: &str) -> Result<i64, TreeError> {
        self.get::<i64>(path).copied()
    }

    pub fn get_double(&self, path: &str) -> Result<f64, TreeError> {
        self.get::<f64>(path).copied()
    }

    pub fn get_vector(&self, path: &str) -> Result<Vector3, TreeError> {
        self.get::<Vector3>(path).copied()
    }

    pub fn get_string(&self, path: &str) -> Result<&str, TreeError> {
        self.get::<String>(path).map(String::as_str)
    }

    pub fn get_path(&self, path: &str) -> Result<&PathValue, TreeError> {
        self.get(path)
    }

    pub fn get_selection(&self, path: &str) -> Result<&Selection, TreeError> {
        self.get(path)
    }

    pub fn get_matrix(&self, path: &str) -> Result<&Matrix, TreeError> {
        self.get(path)
    }

    pub fn get_subset(&self, path: &str) -> Result<&ParameterSet, TreeError> {
        self.get(path)
    }

    pub fn get_subset_mut(&mut self, path: &str) -> Result<&mut ParameterSet, TreeError> {
        self.get_mut(path)
    }

    pub fn get_selectable_subset(&self, path: &str) -> Result<&SelectableSubset, TreeError> {
        self.get(path)
    }

    pub fn get_selectable_subset_mut(
        &mut self,
        path: &str,
    ) -> Result<&mut SelectableSubset, TreeError> {
        self.get_mut(path)
    }

    pub fn get_array(&self, path: &str) -> Result<&Array, TreeError> {
        self.get(path)
    }

    pub fn get_array_mut(&mut self, path: &str) -> Result<&mut Array, TreeError> {
        self.get_mut(path)
    }

    pub fn get_matrix_mut(&mut self, path: &str) -> Result<&mut Matrix, TreeError> {
        self.get_mut(path)
    }

    pub fn get_double_range(&self, path: &str) -> Result<&DoubleRange, TreeError> {
        self.get(path)
    }

    pub fn get_double_range_mut(&mut self, path: &str) -> Result<&mut DoubleRange, TreeError> {
        self.get_mut(path)
    }

    pub fn set_bool(&mut self, path: &str, value: bool) -> Result<(), TreeError> {
        *self.get_mut::<bool>(path)? = value;
        Ok(())
    }

    pub fn set_int(&mut self, path: &str, value: i64) -> Result<(), TreeError> {
        *self.get_mut::<i64>(path)? = value;
        Ok(())
    }

    pub fn set_double(&mut self, path: &str, value: f64) -> Result<(), TreeError> {
        *self.get_mut::<f64>(path)? = value;
        Ok(())
    }

    pub fn set_vector(&mut self, path: &str, value: Vector3) -> Result<(), TreeError> {
        *self.get_mut::<Vector3>(path)? = value;
        Ok(())
    }

    pub fn set_string(&mut self, path: &str, value: impl Into<String>) -> Result<(), TreeError> {
        *self.get_mut::<String>(path)? = value.into();
        Ok(())
    }

    pub fn set_path(&mut self, path: &str, value: impl Into<PathBuf>) -> Result<(), TreeError> {
        self.get_mut::<PathValue>(path)?.set_path(value);
        Ok(())
    }

    /// Selects `key` in the selection or selectable subset at `path`.
    pub fn select(&mut self, path: &str, key: &str) -> Result<(), TreeError> {
        let parameter = self.parameter_mut(path)?;
        let result = match &mut parameter.value {
            ParameterValue::Selection(selection) => selection.select(key),
            ParameterValue::SelectableSubset(sel) => sel.set_selection(key),
            other => Err(TreeError::TypeMismatch {
                path: path.to_owned(),
                expected: crate::ParameterKind::Selection,
                actual: other.kind(),
            }),
        };
        result.map_err(|e| e.at(path))
    }

    /// Adds the entries of `other` whose names are missing here, recursing
    /// into subsets present on both sides. Existing values are never touched.
    pub fn extend(&mut self, other: &ParameterSet) -> &mut Self {
        for (name, theirs) in &other.entries {
            match self.entries.get_mut(name) {
                None => {
                    self.entries.insert(name.clone(), theirs.clone());
                }
                Some(ours) => {
                    if let (ParameterValue::Subset(ours), ParameterValue::Subset(theirs)) =
                        (&mut ours.value, &theirs.value)
                    {
                        ours.extend(theirs);
                    }
                }
            }
        }
        self
    }

    /// Copies every entry of `other` over this set, merging subsets present
    /// on both sides instead of replacing them.
    pub fn merge(&mut self, other: &ParameterSet) -> &mut Self {
        for (name, theirs) in &other.entries {
            if let Some(ours) = self.entries.get_mut(name)
                && let (ParameterValue::Subset(ours), ParameterValue::Subset(theirs)) =
                    (&mut ours.value, &theirs.value)
            {
                ours.merge(theirs);
                continue;
            }
            self.entries.insert(name.clone(), theirs.clone());
        }
        self
    }

    /// Embeds the bytes of every file referenced by a path parameter.
    pub fn pack_external_files(&mut self) -> Result<(), TreeError> {
        self.try_for_each_path(&mut PathValue::pack)
    }

    /// Drops every embedded payload, keeping the paths.
    pub fn remove_packed_data(&mut self) {
        let _ = self.try_for_each_path(&mut |path: &mut PathValue| {
            path.remove_packed_data();
            Ok(())
        });
    }

    pub fn has_packed_data(&self) -> bool {
        self.entries.values().any(|p| value_has_packed_data(&p.value))
    }

    pub(crate) fn try_for_each_path<F>(&mut self, f: &mut F) -> Result<(), TreeError>
    where
        F: FnMut(&mut PathValue) -> Result<(), TreeError>,
    {
        self.entries
            .values_mut()
            .try_for_each(|p| p.value.try_for_each_path(f))
    }
}

fn value_has_packed_data(value: &ParameterValue) -> bool {
    match value {
        ParameterValue::Path(path) => path.is_packed(),
        ParameterValue::Subset(set) => set.has_packed_data(),
        ParameterValue::SelectableSubset(sel) => sel.active().has_packed_data(),
        ParameterValue::Array(array) => array.iter().any(|e| value_has_packed_data(&e.value)),
        _ => false,
    }
}

fn not_found(path: &str, segment: &str) -> TreeError {
    TreeError::NotFound {
        path: path.to_owned(),
        segment: segment.to_owned(),
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a Parameter);
    type IntoIter = indexmap::map::Iter<'a, String, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, Parameter)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, Parameter)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_set(f, self, 0)
    }
}

fn write_set(f: &mut fmt::Formatter<'_>, set: &ParameterSet, depth: usize) -> fmt::Result {
    for (name, parameter) in set {
        write_parameter(f, name, parameter, depth)?;
    }
    Ok(())
}

fn write_parameter(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    parameter: &Parameter,
    depth: usize,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match &parameter.value {
        ParameterValue::Bool(v) => writeln!(f, "{indent}{name} = {v}"),
        ParameterValue::Int(v) => writeln!(f, "{indent}{name} = {v}"),
        ParameterValue::Double(v) => writeln!(f, "{indent}{name} = {v}"),
        ParameterValue::Vector([x, y, z]) => writeln!(f, "{indent}{name} = ({x} {y} {z})"),
        ParameterValue::String(v) => writeln!(f, "{indent}{name} = {v:?}"),
        ParameterValue::Path(v) => {
            let packed = if v.is_packed() { " [packed]" } else { "" };
            writeln!(f, "{indent}{name} = {}{packed}", v.path().display())
        }
        ParameterValue::Selection(v) => writeln!(f, "{indent}{name} = {}", v.selected()),
        ParameterValue::Matrix(v) => writeln!(f, "{indent}{name} = {v}"),
        ParameterValue::DoubleRange(v) => writeln!(f, "{indent}{name} = {v}"),
        ParameterValue::Subset(set) => {
            writeln!(f, "{indent}{name}:")?;
            write_set(f, set, depth + 1)
        }
        ParameterValue::SelectableSubset(sel) => {
            writeln!(f, "{indent}{name} = {}:", sel.selected())?;
            write_set(f, sel.active(), depth + 1)
        }
        ParameterValue::Array(array) => {
            writeln!(f, "{indent}{name}[{}]:", array.len())?;
            for (i, element) in array.iter().enumerate() {
                write_parameter(f, &i.to_string(), element, depth + 1)?;
            }
            Ok(())
        }
    }
}
