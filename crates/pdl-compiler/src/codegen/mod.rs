//! Rust binding generation from a lowered schema.
//!
//! For a schema `Name` the generator emits a record struct `Name` with one
//! field per entry, the nested types it needs in a module `name`, transfers
//! between the record and a runtime `ParameterSet`, and a `make_default()`
//! factory. A second file holds the `use` items the emitted code expects in
//! scope.
//!
//! # Example
//!
//! ```
//! use pdl_compiler::codegen::{self, Config};
//! use pdl_compiler::Compilation;
//!
//! let compilation = Compilation::new("flag = bool false").unwrap();
//! let schema = compilation.into_schema().unwrap();
//! let generated = codegen::generate(&schema, "Example", &Config::new()).unwrap();
//! assert!(generated.code.contains("pub struct Example"));
//! ```

mod descriptor;
pub mod naming;
mod writer;


use std::collections::BTreeSet;

use pdl_core::ParameterKind;

use crate::schema::{Alternative, Descriptor, Schema};
use descriptor::schema_type;
use naming::{field_ident, type_ident};
use writer::Writer;

/// Runtime crate path used when none is configured.
pub const DEFAULT_RUNTIME_PATH: &str = "::pdl_core";

const DEFAULT_HEADER: &str = "Generated by pdlc. Do not edit.";

const RECORD_DERIVES: &[&str] = &["Debug", "Clone", "PartialEq"];
const SELECTION_DERIVES: &[&str] = &["Debug", "Clone", "Copy", "PartialEq", "Eq", "Hash", "Default"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    /// Selections, subsets and selectable subsets get their default from
    /// their generated type instead.
    #[error("`{name}` is a {kind}, which has no default literal")]
    NoDefaultLiteral { name: String, kind: ParameterKind },
}

/// Emission options.
#[derive(Clone, Debug)]
pub struct Config {
    /// Extra derives on every generated type.
    derives: Vec<String>,
    /// Path of the runtime crate in generated code.
    runtime: String,
    /// Comment placed on top of both generated files.
    header: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            derives: Vec::new(),
            runtime: DEFAULT_RUNTIME_PATH.to_string(),
            header: Some(DEFAULT_HEADER.to_string()),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime = path.into();
        self
    }

    /// `None` drops the header comment.
    pub fn header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }
}

/// The two emitted files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Record type, nested types and transfers (`<stem>.rs`).
    pub code: String,
    /// `use` items the code needs (`<stem>_deps.rs`).
    pub deps: String,
}

/// Generates bindings for `schema` under the schema name `name`.
pub fn generate(schema: &Schema, name: &str, config: &Config) -> Result<Generated, CodegenError> {
    let emitter = Emitter { config };
    Ok(Generated {
        code: emitter.emit_schema(schema, name)?,
        deps: emitter.emit_deps(schema),
    })
}

/// Shared emission state: the configuration.
pub(crate) struct Emitter<'c> {
    config: &'c Config,
}

impl Emitter<'_> {
    fn rt(&self) -> &str {
        &self.config.runtime
    }

    fn derives(&self, base: &[&str]) -> String {
        let mut all: Vec<&str> = base.to_vec();
        for extra in &self.config.derives {
            if !all.contains(&extra.as_str()) {
                all.push(extra);
            }
        }
        format!("#[derive({})]", all.join(", "))
    }

    fn emit_header(&self, w: &mut Writer) {
        if let Some(header) = &self.config.header {
            for line in header.lines() {
                w.line(format!("// {line}"));
            }
            w.blank();
        }
    }

    fn emit_deps(&self, schema: &Schema) -> String {
        let mut deps = BTreeSet::new();
        for entry in &schema.entries {
            entry.collect_dependencies(self.rt(), &mut deps);
        }

        let mut w = Writer::new();
        self.emit_header(&mut w);
        for dep in deps {
            w.line(dep);
        }
        w.finish()
    }

    fn emit_schema(&self, schema: &Schema, name: &str) -> Result<String, CodegenError> {
        let rt = self.rt();
        let type_name = type_ident(name);
        let child = field_ident(name);
        let base = schema.base.as_ref().map(schema_type);

        let mut w = Writer::new();
        self.emit_header(&mut w);
        self.emit_record(&mut w, &type_name, &child, &schema.entries, base.as_deref(), "")?;

        w.blank();
        w.open(format!("impl {type_name} {{"));
        w.line(format!("pub const SCHEMA_NAME: &'static str = {name:?};"));
        w.blank();
        w.open(format!("pub fn make_default() -> {rt}::ParameterSet {{"));
        if schema.entries.is_empty() {
            w.line(match &base {
                Some(base) => format!("{base}::make_default()"),
                None => format!("{rt}::ParameterSet::new()"),
            });
        } else {
            w.line(match &base {
                Some(base) => format!("let mut p = {base}::make_default();"),
                None => format!("let mut p = {rt}::ParameterSet::new();"),
            });
            for entry in &schema.entries {
                w.line(entry.emit_insert("p", rt));
            }
            w.line("p");
        }
        w.close("}");
        w.blank();
        w.open(format!(
            "pub fn to_parameter_set(&self) -> ::std::result::Result<{rt}::ParameterSet, {rt}::TreeError> {{"
        ));
        w.line("let mut p = Self::make_default();");
        w.line("self.to_tree(&mut p)?;");
        w.line("Ok(p)");
        w.close("}");

        for entry in &schema.entries {
            let field = field_ident(&entry.name);
            let setter = format!("set_{}", field.trim_start_matches("r#"));
            w.blank();
            w.open(format!(
                "pub fn {setter}(&mut self, value: {}) -> &mut Self {{",
                entry.type_name(&child)
            ));
            w.line(format!("self.{field} = value;"));
            w.line("self");
            w.close("}");
        }
        w.close("}");

        w.blank();
        w.open(format!(
            "impl ::std::convert::TryFrom<&{rt}::ParameterSet> for {type_name} {{"
        ));
        w.line(format!("type Error = {rt}::TreeError;"));
        w.blank();
        w.open(format!(
            "fn try_from(p: &{rt}::ParameterSet) -> ::std::result::Result<Self, Self::Error> {{"
        ));
        w.line("Self::from_tree(p)");
        w.close("}");
        w.close("}");

        w.blank();
        w.open(format!(
            "impl ::std::convert::TryFrom<&{type_name}> for {rt}::ParameterSet {{"
        ));
        w.line(format!("type Error = {rt}::TreeError;"));
        w.blank();
        w.open(format!(
            "fn try_from(record: &{type_name}) -> ::std::result::Result<Self, Self::Error> {{"
        ));
        w.line("record.to_parameter_set()");
        w.close("}");
        w.close("}");

        if let Some(base) = &base {
            w.blank();
            w.open(format!("impl ::std::ops::Deref for {type_name} {{"));
            w.line(format!("type Target = {base};"));
            w.blank();
            w.open(format!("fn deref(&self) -> &{base} {{"));
            w.line("&self.base");
            w.close("}");
            w.close("}");
            w.blank();
            w.open(format!("impl ::std::ops::DerefMut for {type_name} {{"));
            w.open(format!("fn deref_mut(&mut self) -> &mut {base} {{"));
            w.line("&mut self.base");
            w.close("}");
            w.close("}");
        }

        Ok(w.finish())
    }

    /// Struct `type_name` for `entries`, its `Default`, its transfers and the
    /// module `child` holding its nested types.
    fn emit_record(
        &self,
        w: &mut Writer,
        type_name: &str,
        child: &str,
        entries: &[Descriptor],
        base: Option<&str>,
        description: &str,
    ) -> Result<(), CodegenError> {
        let rt = self.rt();

        emit_doc(w, description);
        w.line(self.derives(RECORD_DERIVES));
        w.open(format!("pub struct {type_name} {{"));
        if let Some(base) = base {
            w.line(format!("pub base: {base},"));
        }
        for entry in entries {
            emit_doc(w, &entry.description);
            w.line(format!(
                "pub {}: {},",
                field_ident(&entry.name),
                entry.type_name(child)
            ));
        }
        w.close("}");

        w.blank();
        w.open(format!("impl Default for {type_name} {{"));
        w.open("fn default() -> Self {");
        w.open("Self {");
        if base.is_some() {
            w.line("base: Default::default(),");
        }
        for entry in entries {
            let value = if entry.is_composite() {
                "Default::default()".to_string()
            } else {
                entry.default_literal(rt)?
            };
            w.line(format!("{}: {value},", field_ident(&entry.name)));
        }
        w.close("}");
        w.close("}");
        w.close("}");

        w.blank();
        w.open(format!("impl {type_name} {{"));
        w.open(format!(
            "pub fn from_tree(p: &{rt}::ParameterSet) -> ::std::result::Result<Self, {rt}::TreeError> {{"
        ));
        if base.is_none() && entries.is_empty() {
            w.line("let _ = p;");
        }
        w.open("Ok(Self {");
        if let Some(base) = base {
            w.line(format!("base: {base}::from_tree(p)?,"));
        }
        for entry in entries {
            let acc = format!("p.get::<{}>({:?})?", entry.runtime_type(rt), entry.name);
            w.line(format!(
                "{}: {},",
                field_ident(&entry.name),
                entry.emit_transfer_from_tree(child, &acc, &entry.name, rt, 0)
            ));
        }
        w.close("})");
        w.close("}");

        w.blank();
        w.open(format!(
            "pub fn read_tree(&mut self, p: &{rt}::ParameterSet) -> ::std::result::Result<(), {rt}::TreeError> {{"
        ));
        w.line("*self = Self::from_tree(p)?;");
        w.line("Ok(())");
        w.close("}");

        w.blank();
        w.open(format!(
            "pub fn to_tree(&self, p: &mut {rt}::ParameterSet) -> ::std::result::Result<(), {rt}::TreeError> {{"
        ));
        if base.is_some() {
            w.line("self.base.to_tree(p)?;");
        } else if entries.is_empty() {
            w.line("let _ = p;");
        }
        for entry in entries {
            w.open("{");
            w.line(format!(
                "let node = p.get_mut::<{}>({:?})?;",
                entry.runtime_type(rt),
                entry.name
            ));
            w.line(format!("let value = &self.{};", field_ident(&entry.name)));
            w.line(entry.emit_transfer_to_tree(&entry.name, rt, 0));
            w.close("}");
        }
        w.line("Ok(())");
        w.close("}");
        w.close("}");

        if entries.iter().any(Descriptor::declares_types) {
            w.blank();
            w.open(format!("pub mod {child} {{"));
            w.line("#[allow(unused_imports)]");
            w.line("use super::*;");
            for entry in entries.iter().filter(|e| e.declares_types()) {
                w.blank();
                entry.type_decl(self, w)?;
            }
            w.close("}");
        }

        Ok(())
    }

    /// Enum with one variant per item, defaulting to item `default`.
    fn emit_selection(&self, w: &mut Writer, descriptor: &Descriptor, items: &[String], default: usize) {
        let rt = self.rt();
        let type_name = type_ident(&descriptor.name);
        let variants: Vec<String> = items.iter().map(|item| type_ident(item)).collect();

        emit_doc(w, &descriptor.description);
        w.line(self.derives(SELECTION_DERIVES));
        w.open(format!("pub enum {type_name} {{"));
        for (index, variant) in variants.iter().enumerate() {
            if index == default {
                w.line("#[default]");
            }
            w.line(format!("{variant},"));
        }
        w.close("}");

        w.blank();
        w.open(format!("impl {type_name} {{"));
        let keys: Vec<String> = items.iter().map(|item| format!("{item:?}")).collect();
        w.line(format!(
            "pub const KEYS: [&'static str; {}] = [{}];",
            items.len(),
            keys.join(", ")
        ));
        w.blank();
        w.open("pub fn as_str(&self) -> &'static str {");
        w.open("match self {");
        for (variant, key) in variants.iter().zip(&keys) {
            w.line(format!("Self::{variant} => {key},"));
        }
        w.close("}");
        w.close("}");
        w.blank();
        w.open(format!(
            "pub fn from_key(key: &str) -> ::std::result::Result<Self, {rt}::TreeError> {{"
        ));
        w.open("match key {");
        for (variant, key) in variants.iter().zip(&keys) {
            w.line(format!("{key} => Ok(Self::{variant}),"));
        }
        w.line(format!(
            "_ => Err({rt}::TreeError::unknown_selection(key, &Self::KEYS)),"
        ));
        w.close("}");
        w.close("}");
        w.close("}");
    }

    /// Enum over one struct per alternative, the structs living in a module
    /// named after the field.
    fn emit_selectable(
        &self,
        w: &mut Writer,
        descriptor: &Descriptor,
        alternatives: &[Alternative],
        default: usize,
    ) -> Result<(), CodegenError> {
        let rt = self.rt();
        let type_name = type_ident(&descriptor.name);
        let child = field_ident(&descriptor.name);
        let variants: Vec<String> = alternatives.iter().map(|alt| type_ident(&alt.tag)).collect();
        let keys: Vec<String> = alternatives.iter().map(|alt| format!("{:?}", alt.tag)).collect();

        emit_doc(w, &descriptor.description);
        w.line(self.derives(RECORD_DERIVES));
        w.open(format!("pub enum {type_name} {{"));
        for variant in &variants {
            w.line(format!("{variant}({child}::{variant}),"));
        }
        w.close("}");

        w.blank();
        w.open(format!("impl Default for {type_name} {{"));
        w.open("fn default() -> Self {");
        w.line(format!("Self::{}(Default::default())", variants[default]));
        w.close("}");
        w.close("}");

        w.blank();
        w.open(format!("impl {type_name} {{"));
        w.line(format!(
            "pub const KEYS: [&'static str; {}] = [{}];",
            keys.len(),
            keys.join(", ")
        ));
        w.blank();
        w.open("pub fn tag(&self) -> &'static str {");
        w.open("match self {");
        for (variant, key) in variants.iter().zip(&keys) {
            w.line(format!("Self::{variant}(_) => {key},"));
        }
        w.close("}");
        w.close("}");
        w.blank();
        w.open(format!(
            "pub fn from_tree(s: &{rt}::SelectableSubset) -> ::std::result::Result<Self, {rt}::TreeError> {{"
        ));
        w.open("match s.selected() {");
        for (variant, key) in variants.iter().zip(&keys) {
            w.line(format!(
                "{key} => Ok(Self::{variant}({child}::{variant}::from_tree(s.active())?)),"
            ));
        }
        w.line(format!(
            "other => Err({rt}::TreeError::unknown_selection(other, &Self::KEYS)),"
        ));
        w.close("}");
        w.close("}");
        w.blank();
        w.open(format!(
            "pub fn to_tree(&self, s: &mut {rt}::SelectableSubset) -> ::std::result::Result<(), {rt}::TreeError> {{"
        ));
        w.open("if s.selected() != self.tag() {");
        w.line("s.set_selection(self.tag())?;");
        w.close("}");
        w.open("match self {");
        for variant in &variants {
            w.line(format!("Self::{variant}(v) => v.to_tree(s.active_mut()),"));
        }
        w.close("}");
        w.close("}");
        w.close("}");

        w.blank();
        w.open(format!("pub mod {child} {{"));
        w.line("#[allow(unused_imports)]");
        w.line("use super::*;");
        for (alt, variant) in alternatives.iter().zip(&variants) {
            w.blank();
            self.emit_record(
                w,
                variant,
                &field_ident(&alt.tag),
                &alt.entries,
                None,
                &alt.description,
            )?;
        }
        w.close("}");
        Ok(())
    }
}

fn emit_doc(w: &mut Writer, description: &str) {
    for line in description.lines() {
        if line.trim().is_empty() {
            w.line("///");
        } else {
            w.line(format!("/// {}", line.trim_end()));
        }
    }
}
