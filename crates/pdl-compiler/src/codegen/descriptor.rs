//! Per-kind code generation operations.
//!
//! Every operation is an exhaustive match over [`DescriptorKind`]; composite
//! kinds delegate to their children, threading the module scope that
//! qualifies nested type names.

use std::collections::BTreeSet;

use super::naming::{field_ident, type_ident};
use super::writer::{Writer, indent_tail};
use super::{CodegenError, Emitter};
use crate::schema::{Descriptor, DescriptorKind, SchemaPath};

impl Descriptor {
    /// Rust type of the record field, with nested types qualified by `scope`.
    pub fn type_name(&self, scope: &str) -> String {
        match &self.kind {
            DescriptorKind::Bool(_) => "bool".to_string(),
            DescriptorKind::Int(_) => "i64".to_string(),
            DescriptorKind::Double(_) => "f64".to_string(),
            DescriptorKind::Vector(_) => "[f64; 3]".to_string(),
            DescriptorKind::String(_) => "String".to_string(),
            DescriptorKind::Path(_) => "PathBuf".to_string(),
            DescriptorKind::Selection { .. }
            | DescriptorKind::Subset(_)
            | DescriptorKind::SelectableSubset { .. } => {
                format!("{scope}::{}", type_ident(&self.name))
            }
            DescriptorKind::Array { element, .. } => format!("Vec<{}>", element.type_name(scope)),
            DescriptorKind::Matrix { .. } => "Matrix".to_string(),
            DescriptorKind::IncludedSet(path) => schema_type(path),
            DescriptorKind::DoubleRange(_) => "DoubleRange".to_string(),
        }
    }

    /// Runtime value type the field is transferred from and to.
    pub fn runtime_type(&self, rt: &str) -> String {
        match &self.kind {
            DescriptorKind::Bool(_) => "bool".to_string(),
            DescriptorKind::Int(_) => "i64".to_string(),
            DescriptorKind::Double(_) => "f64".to_string(),
            DescriptorKind::Vector(_) => format!("{rt}::Vector3"),
            DescriptorKind::String(_) => "String".to_string(),
            DescriptorKind::Path(_) => format!("{rt}::PathValue"),
            DescriptorKind::Selection { .. } => format!("{rt}::Selection"),
            DescriptorKind::Subset(_) | DescriptorKind::IncludedSet(_) => {
                format!("{rt}::ParameterSet")
            }
            DescriptorKind::SelectableSubset { .. } => format!("{rt}::SelectableSubset"),
            DescriptorKind::Array { .. } => format!("{rt}::Array"),
            DescriptorKind::Matrix { .. } => format!("{rt}::Matrix"),
            DescriptorKind::DoubleRange(_) => format!("{rt}::DoubleRange"),
        }
    }

    /// Declares the types [`Descriptor::type_name`] refers to. Called inside
    /// the module named by the scope.
    pub(crate) fn type_decl(&self, emitter: &Emitter, w: &mut Writer) -> Result<(), CodegenError> {
        match &self.kind {
            DescriptorKind::Selection { items, default } => {
                emitter.emit_selection(w, self, items, *default);
                Ok(())
            }
            DescriptorKind::Subset(entries) => emitter.emit_record(
                w,
                &type_ident(&self.name),
                &field_ident(&self.name),
                entries,
                None,
                &self.description,
            ),
            DescriptorKind::SelectableSubset {
                alternatives,
                default,
            } => emitter.emit_selectable(w, self, alternatives, *default),
            DescriptorKind::Array { element, .. } => element.type_decl(emitter, w),
            DescriptorKind::Bool(_)
            | DescriptorKind::Int(_)
            | DescriptorKind::Double(_)
            | DescriptorKind::Vector(_)
            | DescriptorKind::String(_)
            | DescriptorKind::Path(_)
            | DescriptorKind::Matrix { .. }
            | DescriptorKind::IncludedSet(_)
            | DescriptorKind::DoubleRange(_) => Ok(()),
        }
    }

    /// Whether [`Descriptor::type_decl`] emits anything.
    pub fn declares_types(&self) -> bool {
        match &self.kind {
            DescriptorKind::Array { element, .. } => element.declares_types(),
            kind => kind.is_composite(),
        }
    }

    /// Expression for the field's default value.
    ///
    /// Generated types have no literal; callers use `Default::default()` for
    /// those and check [`Descriptor::is_composite`] first.
    pub fn default_literal(&self, rt: &str) -> Result<String, CodegenError> {
        Ok(match &self.kind {
            DescriptorKind::Bool(value) => value.to_string(),
            DescriptorKind::Int(value) => value.to_string(),
            DescriptorKind::Double(value) => format!("{value:?}"),
            DescriptorKind::Vector([x, y, z]) => format!("[{x:?}, {y:?}, {z:?}]"),
            DescriptorKind::String(value) => format!("String::from({value:?})"),
            DescriptorKind::Path(value) => format!("PathBuf::from({value:?})"),
            DescriptorKind::Array { element, len } => {
                let element = if element.is_composite() {
                    "Default::default()".to_string()
                } else {
                    element.default_literal(rt)?
                };
                format!("vec![{element}; {len}]")
            }
            DescriptorKind::Matrix { rows, cols } => format!("{rt}::Matrix::zeros({rows}, {cols})"),
            DescriptorKind::IncludedSet(path) => format!("{}::default()", schema_type(path)),
            DescriptorKind::DoubleRange(values) if values.is_empty() => {
                format!("{rt}::DoubleRange::default()")
            }
            DescriptorKind::DoubleRange(values) => {
                format!("{rt}::DoubleRange::new({})", float_list(values))
            }
            DescriptorKind::Selection { .. }
            | DescriptorKind::Subset(_)
            | DescriptorKind::SelectableSubset { .. } => {
                return Err(CodegenError::NoDefaultLiteral {
                    name: self.name.clone(),
                    kind: self.parameter_kind(),
                });
            }
        })
    }

    /// Expression creating the runtime parameter with default, description
    /// and flags.
    pub fn emit_create(&self, rt: &str) -> String {
        let desc = format!("{:?}", self.description);
        let mut expr = match &self.kind {
            DescriptorKind::Bool(value) => format!("{rt}::Parameter::bool({value}, {desc})"),
            DescriptorKind::Int(value) => format!("{rt}::Parameter::int({value}, {desc})"),
            DescriptorKind::Double(value) => format!("{rt}::Parameter::double({value:?}, {desc})"),
            DescriptorKind::Vector([x, y, z]) => {
                format!("{rt}::Parameter::vector([{x:?}, {y:?}, {z:?}], {desc})")
            }
            DescriptorKind::String(value) => format!("{rt}::Parameter::string({value:?}, {desc})"),
            DescriptorKind::Path(value) => format!("{rt}::Parameter::path({value:?}, {desc})"),
            DescriptorKind::Selection { items, default } => {
                let items: Vec<String> = items.iter().map(|i| format!("{i:?}")).collect();
                format!(
                    "{rt}::Parameter::selection({rt}::Selection::new([{}], {default}), {desc})",
                    items.join(", ")
                )
            }
            DescriptorKind::Subset(entries) => format!(
                "{rt}::Parameter::subset(\n    {},\n    {desc},\n)",
                indent_tail(&emit_set(entries, rt))
            ),
            DescriptorKind::SelectableSubset {
                alternatives,
                default,
            } => {
                let mut sets = String::new();
                for alt in alternatives {
                    let set = emit_set(&alt.entries, rt);
                    sets.push_str(&format!(
                        "\n        ({:?}, {}),",
                        alt.tag,
                        indent_tail(&indent_tail(&set))
                    ));
                }
                format!(
                    "{rt}::Parameter::selectable_subset(\n    {rt}::SelectableSubset::new(\n        [{sets}\n        ],\n        {default},\n    ),\n    {desc},\n)"
                )
            }
            DescriptorKind::Array { element, len } => format!(
                "{rt}::Parameter::array(\n    {rt}::Array::new({}, {len}),\n    {desc},\n)",
                indent_tail(&element.emit_create(rt))
            ),
            DescriptorKind::Matrix { rows, cols } => format!(
                "{rt}::Parameter::matrix({rt}::Matrix::zeros({rows}, {cols}), {desc})"
            ),
            DescriptorKind::IncludedSet(path) => format!(
                "{rt}::Parameter::subset({}::make_default(), {desc})",
                schema_type(path)
            ),
            DescriptorKind::DoubleRange(values) => format!(
                "{rt}::Parameter::double_range({rt}::DoubleRange::new({}), {desc})",
                float_list(values)
            ),
        };

        if self.flags.necessary {
            expr.push_str(".necessary()");
        }
        if self.flags.expert {
            expr.push_str(".expert()");
        }
        if self.flags.hidden {
            expr.push_str(".hidden()");
        }
        expr
    }

    /// Statement adding the created parameter to the set named `target`.
    /// Subsets merge into an existing subset of the same name.
    pub fn emit_insert(&self, target: &str, rt: &str) -> String {
        let method = match self.kind {
            DescriptorKind::Subset(_) | DescriptorKind::IncludedSet(_) => "insert_or_merge",
            _ => "insert",
        };
        format!("{target}.{method}({:?}, {});", self.name, self.emit_create(rt))
    }

    /// Expression converting the runtime value `acc` (a `&T` of
    /// [`Descriptor::runtime_type`]) into the field type.
    ///
    /// `path` is a `format!` string naming the value in errors; array
    /// elements extend it with their index variable.
    pub fn emit_transfer_from_tree(
        &self,
        scope: &str,
        acc: &str,
        path: &str,
        rt: &str,
        depth: usize,
    ) -> String {
        match &self.kind {
            DescriptorKind::Bool(_)
            | DescriptorKind::Int(_)
            | DescriptorKind::Double(_)
            | DescriptorKind::Vector(_) => format!("*{acc}"),
            DescriptorKind::String(_)
            | DescriptorKind::Matrix { .. }
            | DescriptorKind::DoubleRange(_) => format!("{acc}.clone()"),
            DescriptorKind::Path(_) => format!("{acc}.path().to_path_buf()"),
            DescriptorKind::Selection { .. } => {
                format!("{}::from_key({acc}.selected())?", self.type_name(scope))
            }
            DescriptorKind::Subset(_)
            | DescriptorKind::SelectableSubset { .. }
            | DescriptorKind::IncludedSet(_) => {
                format!("{}::from_tree({acc})?", self.type_name(scope))
            }
            DescriptorKind::Array { element, .. } => {
                let (e, i) = (format!("e{depth}"), format!("i{depth}"));
                let path = format!("{path}/{{{i}}}");
                let element_acc = format!(
                    "{e}\n    .value_as::<{}>()\n    .map_err(|err| err.at(&format!({path:?})))?",
                    element.runtime_type(rt)
                );
                let read = element.emit_transfer_from_tree(scope, &element_acc, &path, rt, depth + 1);
                format!(
                    "{acc}\n    .iter()\n    .enumerate()\n    .map(|({i}, {e})| -> ::std::result::Result<_, {rt}::TreeError> {{\n        Ok({})\n    }})\n    .collect::<::std::result::Result<Vec<_>, {rt}::TreeError>>()?",
                    indent_tail(&indent_tail(&read))
                )
            }
        }
    }

    /// Statements copying `value` (a `&` of the field type) into `node` (a
    /// `&mut` of [`Descriptor::runtime_type`]). `path` is as for
    /// [`Descriptor::emit_transfer_from_tree`].
    pub fn emit_transfer_to_tree(&self, path: &str, rt: &str, depth: usize) -> String {
        match &self.kind {
            DescriptorKind::Bool(_)
            | DescriptorKind::Int(_)
            | DescriptorKind::Double(_)
            | DescriptorKind::Vector(_) => "*node = *value;".to_string(),
            DescriptorKind::String(_)
            | DescriptorKind::Matrix { .. }
            | DescriptorKind::DoubleRange(_) => "node.clone_from(value);".to_string(),
            DescriptorKind::Path(_) => "node.set_path(value.clone());".to_string(),
            DescriptorKind::Selection { .. } => "node.select(value.as_str())?;".to_string(),
            DescriptorKind::Subset(_)
            | DescriptorKind::SelectableSubset { .. }
            | DescriptorKind::IncludedSet(_) => "value.to_tree(node)?;".to_string(),
            DescriptorKind::Array { element, .. } => {
                let (e, i) = (format!("e{depth}"), format!("i{depth}"));
                let path = format!("{path}/{{{i}}}");
                let write = element.emit_transfer_to_tree(&path, rt, depth + 1);
                format!(
                    "node.resize(value.len());\nfor ({i}, ({e}, value)) in node.iter_mut().zip(value.iter()).enumerate() {{\n    let node = {e}\n        .value_as_mut::<{}>()\n        .map_err(|err| err.at(&format!({path:?})))?;\n    {}\n}}",
                    element.runtime_type(rt),
                    indent_tail(&write)
                )
            }
        }
    }

    /// `use` items the emitted field type needs.
    pub fn collect_dependencies(&self, rt: &str, deps: &mut BTreeSet<String>) {
        match &self.kind {
            DescriptorKind::Path(_) => {
                deps.insert("use ::std::path::PathBuf;".to_string());
            }
            DescriptorKind::Matrix { .. } => {
                deps.insert(format!("use {rt}::Matrix;"));
            }
            DescriptorKind::DoubleRange(_) => {
                deps.insert(format!("use {rt}::DoubleRange;"));
            }
            DescriptorKind::Subset(entries) => {
                for entry in entries {
                    entry.collect_dependencies(rt, deps);
                }
            }
            DescriptorKind::SelectableSubset { alternatives, .. } => {
                for entry in alternatives.iter().flat_map(|alt| &alt.entries) {
                    entry.collect_dependencies(rt, deps);
                }
            }
            DescriptorKind::Array { element, .. } => element.collect_dependencies(rt, deps),
            DescriptorKind::Bool(_)
            | DescriptorKind::Int(_)
            | DescriptorKind::Double(_)
            | DescriptorKind::Vector(_)
            | DescriptorKind::String(_)
            | DescriptorKind::Selection { .. }
            | DescriptorKind::IncludedSet(_) => {}
        }
    }
}

/// Rust path of the record generated for the schema at `path`.
pub(super) fn schema_type(path: &SchemaPath) -> String {
    let mut segments = path.segments.clone();
    if let Some(last) = segments.last_mut() {
        *last = type_ident(last);
    }
    segments.join("::")
}

/// `[a, b, ...]` with each value written as a float literal.
fn float_list(values: &[f64]) -> String {
    let values: Vec<String> = values.iter().map(|v| format!("{v:?}")).collect();
    format!("[{}]", values.join(", "))
}

/// Block expression building a fresh set from `entries`.
pub(super) fn emit_set(entries: &[Descriptor], rt: &str) -> String {
    if entries.is_empty() {
        return format!("{rt}::ParameterSet::new()");
    }
    let mut w = Writer::new();
    w.open("{");
    w.line(format!("let mut p = {rt}::ParameterSet::new();"));
    for entry in entries {
        w.line(entry.emit_insert("p", rt));
    }
    w.line("p");
    w.close("}");
    w.finish().trim_end().to_string()
}
