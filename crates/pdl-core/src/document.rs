//! JSON persistence of parameter trees.
//!
//! A document records the schema it was saved from and the root subset:
//!
//! ```json
//! { "schema": "Mesh", "root": { "type": "subset", "children": [
//!     { "name": "cells", "type": "int", "value": 10 }
//! ] } }
//! ```
//!
//! Reading is driven by the tree being read into: every node of the tree looks
//! up its counterpart by name, and nodes missing from the document keep their
//! current value.
//!
//! Path values are stored relative to the directory of the document file and
//! resolved against it again on reading. Non-finite doubles are stored as the
//! strings `"inf"`, `"-inf"` and `"nan"`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::error::join_path;
use crate::{
    DoubleRange, Matrix, Parameter, ParameterKind, ParameterSet, ParameterValue, PathValue,
    TreeError,
};

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    schema: Option<String>,
    root: Value,
}

/// Schema name recorded in the document at `path`.
pub fn read_schema_name(path: impl AsRef<Path>) -> Result<Option<String>, TreeError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TreeError::io(path, e))?;
    let document: Document = serde_json::from_reader(BufReader::new(file))?;
    Ok(document.schema)
}

impl ParameterSet {
    /// Appends one node per entry to `children`.
    ///
    /// Path values are written relative to `base_dir` when given.
    pub fn append_to_node(&self, children: &mut Vec<Value>, base_dir: Option<&Path>) {
        for (name, parameter) in self {
            parameter.append_to_node(name, children, base_dir);
        }
    }

    /// Reads the `children` of a subset node into this set.
    ///
    /// Relative path values are resolved against `base_dir` when given.
    pub fn read_from_node(&mut self, node: &Value, base_dir: Option<&Path>) -> Result<(), TreeError> {
        read_children(self, node, base_dir, "")
    }

    /// Document with path values written as they are held.
    pub fn to_document(&self, schema: Option<&str>) -> Value {
        self.document(schema, None)
    }

    fn document(&self, schema: Option<&str>, base_dir: Option<&Path>) -> Value {
        let mut children = Vec::new();
        self.append_to_node(&mut children, base_dir);
        json!({
            "schema": schema,
            "root": { "type": ParameterKind::Subset.tag(), "children": children },
        })
    }

    /// Writes the document; path values become relative to `base_dir` when
    /// given.
    pub fn save_to_writer<W: Write>(
        &self,
        writer: W,
        schema: Option<&str>,
        base_dir: Option<&Path>,
    ) -> Result<(), TreeError> {
        serde_json::to_writer_pretty(writer, &self.document(schema, base_dir))?;
        Ok(())
    }

    /// Like [`ParameterSet::save_to_writer`], relative to the directory that
    /// will contain `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>, schema: Option<&str>) -> Result<(), TreeError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TreeError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.save_to_writer(&mut writer, schema, path.parent())?;
        writer.flush().map_err(|e| TreeError::io(path, e))?;
        tracing::debug!(path = %path.display(), "saved parameter document");
        Ok(())
    }

    /// Reads a document into this tree and returns its schema name.
    pub fn read_from_reader<R: Read>(
        &mut self,
        reader: R,
        base_dir: Option<&Path>,
    ) -> Result<Option<String>, TreeError> {
        let document: Document = serde_json::from_reader(reader)?;
        self.read_from_node(&document.root, base_dir)?;
        Ok(document.schema)
    }

    /// Like [`ParameterSet::read_from_reader`]; relative paths in the document
    /// resolve against the directory containing `path`.
    pub fn read_from_file(&mut self, path: impl AsRef<Path>) -> Result<Option<String>, TreeError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TreeError::io(path, e))?;
        let base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(path = %path.display(), "reading parameter document");
        self.read_from_reader(BufReader::new(file), base_dir.as_deref())
    }
}

impl Parameter {
    /// Appends this parameter as a node called `name`.
    pub fn append_to_node(&self, name: &str, children: &mut Vec<Value>, base_dir: Option<&Path>) {
        let mut node = Map::new();
        node.insert("name".into(), name.into());
        write_value(&self.value, &mut node, base_dir);
        children.push(Value::Object(node));
    }

    pub fn read_from_node(&mut self, node: &Value, base_dir: Option<&Path>) -> Result<(), TreeError> {
        read_value(&mut self.value, node, base_dir, "")
    }
}

fn write_value(value: &ParameterValue, node: &mut Map<String, Value>, base_dir: Option<&Path>) {
    node.insert("type".into(), value.kind().tag().into());
    match value {
        ParameterValue::Bool(v) => {
            node.insert("value".into(), (*v).into());
        }
        ParameterValue::Int(v) => {
            node.insert("value".into(), (*v).into());
        }
        ParameterValue::Double(v) => {
            node.insert("value".into(), number_value(*v));
        }
        ParameterValue::Vector(v) => {
            node.insert("value".into(), number_array(v));
        }
        ParameterValue::String(v) => {
            node.insert("value".into(), v.as_str().into());
        }
        ParameterValue::Path(v) => {
            let stored = match base_dir {
                Some(dir) if !v.path().as_os_str().is_empty() => {
                    relative_to(&absolute(v.path()), &absolute(dir))
                }
                _ => v.path().to_path_buf(),
            };
            node.insert("value".into(), stored.to_string_lossy().into());
            if let Some(content) = v.content() {
                node.insert("content".into(), BASE64.encode(content).into());
            }
        }
        ParameterValue::Selection(v) => {
            node.insert("value".into(), v.selected().into());
        }
        ParameterValue::Subset(set) => {
            let mut children = Vec::new();
            set.append_to_node(&mut children, base_dir);
            node.insert("children".into(), children.into());
        }
        ParameterValue::SelectableSubset(sel) => {
            let mut children = Vec::new();
            sel.active().append_to_node(&mut children, base_dir);
            node.insert("value".into(), sel.selected().into());
            node.insert("children".into(), children.into());
        }
        ParameterValue::Array(array) => {
            let elements = array
                .iter()
                .map(|element| {
                    let mut node = Map::new();
                    write_value(&element.value, &mut node, base_dir);
                    Value::Object(node)
                })
                .collect::<Vec<_>>();
            node.insert("elements".into(), elements.into());
        }
        ParameterValue::Matrix(m) => {
            node.insert("rows".into(), m.rows().into());
            node.insert("cols".into(), m.cols().into());
            node.insert("values".into(), number_array(m.values()));
        }
        ParameterValue::DoubleRange(range) => {
            node.insert("values".into(), number_array(range.values()));
        }
    }
}

fn read_children(
    set: &mut ParameterSet,
    node: &Value,
    base_dir: Option<&Path>,
    path: &str,
) -> Result<(), TreeError> {
    let children = attribute(node, "children", path)?
        .as_array()
        .ok_or_else(|| invalid(path, "children", "expected an array"))?;
    for name in set.names().map(str::to_owned).collect::<Vec<_>>() {
        let child_path = join_path(path, &name);
        let found = children
            .iter()
            .find(|child| child.get("name").and_then(Value::as_str) == Some(name.as_str()));
        let Some(child) = found else {
            tracing::warn!(path = %child_path, "no node in document, keeping default value");
            continue;
        };
        if let Some(parameter) = set.entry_mut(&name) {
            read_value(&mut parameter.value, child, base_dir, &child_path)?;
        }
    }
    Ok(())
}

fn read_value(
    value: &mut ParameterValue,
    node: &Value,
    base_dir: Option<&Path>,
    path: &str,
) -> Result<(), TreeError> {
    let tag = attribute(node, "type", path)?
        .as_str()
        .ok_or_else(|| invalid(path, "type", "expected a string"))?;
    if tag != value.kind().tag() {
        return Err(invalid(
            path,
            "type",
            format!("expected `{}`, found `{tag}`", value.kind()),
        ));
    }

    match value {
        ParameterValue::Bool(v) => {
            *v = attribute(node, "value", path)?
                .as_bool()
                .ok_or_else(|| invalid(path, "value", "expected a boolean"))?;
        }
        ParameterValue::Int(v) => {
            *v = attribute(node, "value", path)?
                .as_i64()
                .ok_or_else(|| invalid(path, "value", "expected an integer"))?;
        }
        ParameterValue::Double(v) => {
            *v = as_number(attribute(node, "value", path)?)
                .ok_or_else(|| invalid(path, "value", "expected a number"))?;
        }
        ParameterValue::Vector(v) => {
            let numbers = number_list(attribute(node, "value", path)?, "value", path)?;
            *v = numbers
                .try_into()
                .map_err(|_| invalid(path, "value", "expected three components"))?;
        }
        ParameterValue::String(v) => {
            *v = string_attribute(node, "value", path)?.to_owned();
        }
        ParameterValue::Path(v) => {
            let stored = PathBuf::from(string_attribute(node, "value", path)?);
            let resolved = match base_dir {
                Some(dir) if stored.is_relative() && !stored.as_os_str().is_empty() => {
                    normalize(&absolute(dir).join(stored))
                }
                _ => stored,
            };
            *v = match node.get("content").and_then(Value::as_str) {
                Some(encoded) => {
                    let content = BASE64
                        .decode(encoded)
                        .map_err(|source| TreeError::EmbeddedContent {
                            path: path.to_owned(),
                            source,
                        })?;
                    PathValue::with_content(resolved, content)
                }
                None => PathValue::new(resolved),
            };
        }
        ParameterValue::Selection(v) => {
            let key = string_attribute(node, "value", path)?;
            v.select(key).map_err(|e| e.at(path))?;
        }
        ParameterValue::Subset(set) => read_children(set, node, base_dir, path)?,
        ParameterValue::SelectableSubset(sel) => {
            let key = string_attribute(node, "value", path)?;
            if key != sel.selected() {
                sel.set_selection(key).map_err(|e| e.at(path))?;
            }
            read_children(sel.active_mut(), node, base_dir, path)?;
        }
        ParameterValue::Array(array) => {
            let elements = attribute(node, "elements", path)?
                .as_array()
                .ok_or_else(|| invalid(path, "elements", "expected an array"))?;
            array.resize(elements.len());
            for (i, (element, node)) in array.iter_mut().zip(elements).enumerate() {
                read_value(&mut element.value, node, base_dir, &join_path(path, &i.to_string()))?;
            }
        }
        ParameterValue::Matrix(m) => {
            let rows = dimension(node, "rows", path)?;
            let cols = dimension(node, "cols", path)?;
            let len = Matrix::len_for(rows, cols)
                .ok_or_else(|| invalid(path, "rows", format!("{rows}x{cols} matrix is too large")))?;
            let values = number_list(attribute(node, "values", path)?, "values", path)?;
            *m = Matrix::from_row_major(rows, cols, values)
                .ok_or_else(|| invalid(path, "values", format!("expected {len} entries")))?;
        }
        ParameterValue::DoubleRange(range) => {
            let values = number_list(attribute(node, "values", path)?, "values", path)?;
            *range = DoubleRange::new(values);
        }
    }
    Ok(())
}

fn attribute<'a>(node: &'a Value, attribute: &'static str, path: &str) -> Result<&'a Value, TreeError> {
    node.get(attribute).ok_or_else(|| TreeError::MissingAttribute {
        path: path.to_owned(),
        attribute,
    })
}

fn string_attribute<'a>(
    node: &'a Value,
    name: &'static str,
    path: &str,
) -> Result<&'a str, TreeError> {
    attribute(node, name, path)?
        .as_str()
        .ok_or_else(|| invalid(path, name, "expected a string"))
}

fn dimension(node: &Value, name: &'static str, path: &str) -> Result<usize, TreeError> {
    attribute(node, name, path)?
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid(path, name, "expected a non-negative integer"))
}

fn number_list(value: &Value, name: &'static str, path: &str) -> Result<Vec<f64>, TreeError> {
    value
        .as_array()
        .and_then(|items| items.iter().map(as_number).collect::<Option<Vec<_>>>())
        .ok_or_else(|| invalid(path, name, "expected an array of numbers"))
}

fn invalid(path: &str, attribute: &'static str, message: impl Into<String>) -> TreeError {
    TreeError::InvalidAttribute {
        path: path.to_owned(),
        attribute,
        message: message.into(),
    }
}

fn number_value(v: f64) -> Value {
    if v.is_nan() {
        Value::from("nan")
    } else if v == f64::INFINITY {
        Value::from("inf")
    } else if v == f64::NEG_INFINITY {
        Value::from("-inf")
    } else {
        Value::from(v)
    }
}

fn number_array(values: &[f64]) -> Value {
    values.iter().copied().map(number_value).collect()
}

fn as_number(value: &Value) -> Option<f64> {
    match value.as_str() {
        Some("inf") => Some(f64::INFINITY),
        Some("-inf") => Some(f64::NEG_INFINITY),
        Some("nan") => Some(f64::NAN),
        Some(_) => None,
        None => value.as_f64(),
    }
}

/// `path` made absolute against the working directory and normalized.
fn absolute(path: &Path) -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(path)),
        Err(_) => normalize(path),
    }
}

/// Drops `.` and folds `name/..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// `path` relative to `base`, both absolute and normalized. Paths on
/// another root stay absolute.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    if path.components().next() != base.components().next() {
        return path.to_path_buf();
    }
    let mut rest = path.components().peekable();
    let mut up = base.components().peekable();
    while let (Some(a), Some(b)) = (rest.peek(), up.peek()) {
        if a != b {
            break;
        }
        rest.next();
        up.next();
    }
    let mut out: PathBuf = up.map(|_| Component::ParentDir).collect();
    out.extend(rest);
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
