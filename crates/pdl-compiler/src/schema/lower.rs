//! AST to schema lowering and validation.
//!
//! Syntax errors are already reported by the parser; incomplete declarations
//! are skipped here without further diagnostics. Everything else a schema
//! must satisfy is checked while lowering: unique identifiers per level,
//! generated names that do not collide, known default tags, valid literals.

use std::collections::HashMap;

use pdl_core::{Matrix, ParameterFlags, Vector3};
use rowan::TextRange;

use super::{Alternative, Descriptor, DescriptorKind, Schema, SchemaPath};
use crate::codegen::naming::{element_name, field_ident, is_identifier, type_ident};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::{Keyword, SyntaxToken, ast};

/// Field holding the inherited schema in generated records.
const BASE_FIELD: &str = "base";

pub fn lower(root: &ast::Root, diagnostics: &mut Diagnostics) -> Schema {
    let base = root
        .inherits()
        .and_then(|inherits| inherits.path())
        .map(|path| SchemaPath {
            segments: path.segments().map(|t| t.text().to_string()).collect(),
        })
        .filter(|path| !path.segments.is_empty());

    let mut lowering = Lowering { diagnostics };
    let entries = lowering.entries(root.entries(), base.is_some());
    Schema { base, entries }
}

struct Lowering<'d> {
    diagnostics: &'d mut Diagnostics,
}

/// Names declared at one nesting level.
#[derive(Default)]
struct Scope {
    names: HashMap<String, TextRange>,
    /// Generated identifier -> declared name.
    idents: HashMap<String, (String, TextRange)>,
    /// Generated nested types and modules -> declared name.
    types: HashMap<String, (String, TextRange)>,
}

impl Lowering<'_> {
    fn entries(
        &mut self,
        entries: impl Iterator<Item = ast::Entry>,
        has_base: bool,
    ) -> Vec<Descriptor> {
        let mut scope = Scope::default();
        let mut lowered = Vec::new();

        for entry in entries {
            let (Some(name), Some(data)) = (entry.name(), entry.data()) else {
                continue;
            };
            if has_base && field_ident(name.text()) == BASE_FIELD {
                self.diagnostics
                    .report(DiagnosticKind::DuplicateIdentifier, name.text_range())
                    .message(name.text())
                    .hint("the inherited schema is stored in field `base`")
                    .emit();
                continue;
            }
            if !self.declare(&mut scope, &name) {
                continue;
            }
            let Some(descriptor) = self.data(name.text(), &data, entry.as_cst().text_range())
            else {
                continue;
            };
            self.declare_types(&mut scope, &descriptor, name.text_range());
            lowered.push(descriptor);
        }

        lowered
    }

    fn declare(&mut self, scope: &mut Scope, name: &SyntaxToken) -> bool {
        let text = name.text();
        let range = name.text_range();

        if let Some(&first) = scope.names.get(text) {
            self.diagnostics
                .report(DiagnosticKind::DuplicateIdentifier, range)
                .message(text)
                .related_to("first defined here", first)
                .emit();
            return false;
        }

        let ident = field_ident(text);
        if let Some((other, first)) = scope.idents.get(&ident) {
            self.diagnostics
                .report(DiagnosticKind::DuplicateFieldName, range)
                .message(format!("`{other}` and `{text}` both become `{ident}`"))
                .related_to("first defined here", *first)
                .emit();
            return false;
        }

        scope.names.insert(text.to_string(), range);
        scope.idents.insert(ident, (text.to_string(), range));
        true
    }

    fn declare_types(&mut self, scope: &mut Scope, descriptor: &Descriptor, range: TextRange) {
        for generated in declared_types(descriptor) {
            if let Some((other, first)) = scope.types.get(&generated) {
                self.diagnostics
                    .report(DiagnosticKind::DuplicateFieldName, range)
                    .message(format!(
                        "`{other}` and `{}` both declare `{}`",
                        descriptor.name,
                        generated.trim_start_matches("mod ")
                    ))
                    .related_to("first defined here", *first)
                    .emit();
                continue;
            }
            scope
                .types
                .insert(generated, (descriptor.name.clone(), range));
        }
    }

    fn data(&mut self, name: &str, data: &ast::Data, span: TextRange) -> Option<Descriptor> {
        let description = data
            .description()
            .map(|d| d.text())
            .unwrap_or_default();
        let flags = self.flags(data);

        let kind = match data.kind()? {
            Keyword::Bool => match data.word()?.text() {
                "true" => DescriptorKind::Bool(true),
                "false" => DescriptorKind::Bool(false),
                _ => return None,
            },
            Keyword::Int => DescriptorKind::Int(self.integer(&data.numbers().next()?)?),
            Keyword::Double => DescriptorKind::Double(self.number(&data.numbers().next()?)?),
            Keyword::Vector => DescriptorKind::Vector(self.vector(data)?),
            Keyword::String => DescriptorKind::String(data.str()?.value()),
            Keyword::Path => DescriptorKind::Path(data.str()?.value()),
            Keyword::Selection => self.selection(data)?,
            Keyword::Set => {
                DescriptorKind::Subset(self.entries(data.block()?.entries(), false))
            }
            Keyword::IncludedSet => DescriptorKind::IncludedSet(self.schema_path(&data.str()?)?),
            Keyword::SelectableSubset => self.selectable(data)?,
            Keyword::Array => {
                let element = data.element()?;
                let element_span = element.as_cst().text_range();
                let element = self.data(&element_name(name), &element, element_span)?;
                let len = self.count(&data.numbers().next()?)?;
                DescriptorKind::Array {
                    element: Box::new(element),
                    len,
                }
            }
            Keyword::Matrix => self.matrix(&data.dims()?)?,
            Keyword::DoubleRange => DescriptorKind::DoubleRange(
                data.numbers()
                    .map(|token| self.number(&token))
                    .collect::<Option<_>>()?,
            ),
        };

        Some(Descriptor {
            name: name.to_string(),
            description,
            flags,
            kind,
            span,
        })
    }

    fn flags(&mut self, data: &ast::Data) -> ParameterFlags {
        let mut flags = ParameterFlags::default();
        let mut seen: HashMap<String, TextRange> = HashMap::new();

        for flag in data.flags() {
            let Some(token) = flag.name() else {
                continue;
            };
            let slot = match token.text() {
                "hidden" => &mut flags.hidden,
                "expert" => &mut flags.expert,
                "necessary" => &mut flags.necessary,
                _ => continue,
            };
            *slot = true;

            let range = flag.as_cst().text_range();
            if let Some(&first) = seen.get(token.text()) {
                self.diagnostics
                    .report(DiagnosticKind::DuplicateFlag, range)
                    .message(token.text())
                    .related_to("first given here", first)
                    .emit();
            } else {
                seen.insert(token.text().to_string(), range);
            }
        }

        flags
    }

    fn integer(&mut self, token: &SyntaxToken) -> Option<i64> {
        match token.text().parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                self.diagnostics
                    .report(DiagnosticKind::InvalidInteger, token.text_range())
                    .message(format!("`{}`", token.text()))
                    .emit();
                None
            }
        }
    }

    fn count(&mut self, token: &SyntaxToken) -> Option<usize> {
        match token.text().parse::<usize>() {
            Ok(value) => Some(value),
            Err(_) => {
                self.diagnostics
                    .report(DiagnosticKind::InvalidInteger, token.text_range())
                    .message(format!("`{}` is not an element count", token.text()))
                    .emit();
                None
            }
        }
    }

    fn number(&mut self, token: &SyntaxToken) -> Option<f64> {
        match token.text().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                self.diagnostics
                    .report(DiagnosticKind::InvalidNumber, token.text_range())
                    .message(format!("`{}` is out of range", token.text()))
                    .emit();
                None
            }
        }
    }

    fn vector(&mut self, data: &ast::Data) -> Option<Vector3> {
        let numbers: Vec<SyntaxToken> = data.numbers().collect();
        if numbers.len() != 3 {
            self.diagnostics
                .report(DiagnosticKind::ExpectedValue, data.as_cst().text_range())
                .message(format!("a vector has 3 components, found {}", numbers.len()))
                .emit();
            return None;
        }

        let mut vector = [0.0; 3];
        for (slot, token) in vector.iter_mut().zip(&numbers) {
            *slot = self.number(token)?;
        }
        Some(vector)
    }

    fn selection(&mut self, data: &ast::Data) -> Option<DescriptorKind> {
        let node = data.selection_items()?;
        let tokens: Vec<SyntaxToken> = node.items().collect();
        if tokens.is_empty() {
            self.diagnostics
                .report(DiagnosticKind::EmptySelection, node.as_cst().text_range())
                .emit();
            return None;
        }

        let mut seen: HashMap<String, TextRange> = HashMap::new();
        let mut variants: HashMap<String, (String, TextRange)> = HashMap::new();
        let mut valid = true;
        for token in &tokens {
            let (text, range) = (token.text(), token.text_range());
            if let Some(&first) = seen.get(text) {
                self.diagnostics
                    .report(DiagnosticKind::DuplicateSelectionItem, range)
                    .message(text)
                    .related_to("first listed here", first)
                    .emit();
                valid = false;
                continue;
            }
            let variant = type_ident(text);
            if let Some((other, first)) = variants.get(&variant) {
                self.diagnostics
                    .report(DiagnosticKind::DuplicateFieldName, range)
                    .message(format!("`{other}` and `{text}` both become variant `{variant}`"))
                    .related_to("first listed here", *first)
                    .emit();
                valid = false;
                continue;
            }
            seen.insert(text.to_string(), range);
            variants.insert(variant, (text.to_string(), range));
        }

        let items: Vec<String> = tokens.iter().map(|t| t.text().to_string()).collect();
        let default = self.default_tag(data, &items)?;
        valid.then_some(DescriptorKind::Selection { items, default })
    }

    fn selectable(&mut self, data: &ast::Data) -> Option<DescriptorKind> {
        let nodes: Vec<ast::Alternative> = data.alternatives().collect();
        if nodes.is_empty() {
            let range = data
                .keyword()
                .map_or_else(|| data.as_cst().text_range(), |k| k.text_range());
            self.diagnostics
                .report(DiagnosticKind::EmptyAlternatives, range)
                .emit();
            return None;
        }

        let mut scope = Scope::default();
        let mut alternatives = Vec::with_capacity(nodes.len());
        let mut valid = true;
        for node in &nodes {
            let (Some(tag), Some(block)) = (node.tag(), node.block()) else {
                valid = false;
                continue;
            };
            if !self.declare_alternative(&mut scope, &tag) {
                valid = false;
                continue;
            }
            alternatives.push(Alternative {
                tag: tag.text().to_string(),
                description: node.description().map(|d| d.text()).unwrap_or_default(),
                entries: self.entries(block.entries(), false),
                span: node.as_cst().text_range(),
            });
        }

        let tags: Vec<String> = alternatives.iter().map(|a| a.tag.clone()).collect();
        let default = self.default_tag(data, &tags)?;
        valid.then_some(DescriptorKind::SelectableSubset {
            alternatives,
            default,
        })
    }

    /// Alternative tags become both a struct and a module in the same scope.
    fn declare_alternative(&mut self, scope: &mut Scope, tag: &SyntaxToken) -> bool {
        if !self.declare(scope, tag) {
            return false;
        }
        let variant = type_ident(tag.text());
        if let Some((other, first)) = scope.types.get(&variant) {
            self.diagnostics
                .report(DiagnosticKind::DuplicateFieldName, tag.text_range())
                .message(format!(
                    "`{other}` and `{}` both become variant `{variant}`",
                    tag.text()
                ))
                .related_to("first defined here", *first)
                .emit();
            return false;
        }
        scope
            .types
            .insert(variant, (tag.text().to_string(), tag.text_range()));
        true
    }

    fn default_tag(&mut self, data: &ast::Data, options: &[String]) -> Option<usize> {
        let token = data.word()?;
        let position = options.iter().position(|o| o == token.text());
        if position.is_none() {
            self.diagnostics
                .report(DiagnosticKind::UnknownDefault, token.text_range())
                .message(token.text())
                .hint(format!("options are: {}", options.join(", ")))
                .emit();
        }
        position
    }

    fn schema_path(&mut self, value: &ast::Str) -> Option<SchemaPath> {
        let text = value.value();
        let segments: Vec<String> = text.split("::").map(str::to_string).collect();
        if !segments.iter().all(|s| is_identifier(s)) {
            self.diagnostics
                .report(DiagnosticKind::InvalidSchemaPath, value.as_cst().text_range())
                .message(&text)
                .emit();
            return None;
        }
        Some(SchemaPath { segments })
    }

    fn matrix(&mut self, dims: &SyntaxToken) -> Option<DescriptorKind> {
        let (rows, cols) = dims.text().split_once('x')?;
        let (Ok(rows), Ok(cols)) = (rows.parse::<usize>(), cols.parse::<usize>()) else {
            self.diagnostics
                .report(DiagnosticKind::InvalidInteger, dims.text_range())
                .message(format!("`{}` is not a matrix size", dims.text()))
                .emit();
            return None;
        };
        if rows == 0 || cols == 0 {
            self.diagnostics
                .report(DiagnosticKind::ZeroDimension, dims.text_range())
                .emit();
            return None;
        }
        if Matrix::len_for(rows, cols).is_none() {
            self.diagnostics
                .report(DiagnosticKind::InvalidInteger, dims.text_range())
                .message(format!("`{}` has too many entries", dims.text()))
                .emit();
            return None;
        }
        Some(DescriptorKind::Matrix { rows, cols })
    }
}

/// Types and modules a declaration adds to its enclosing scope.
fn declared_types(descriptor: &Descriptor) -> Vec<String> {
    match &descriptor.kind {
        DescriptorKind::Selection { .. } => vec![type_ident(&descriptor.name)],
        DescriptorKind::Subset(_) | DescriptorKind::SelectableSubset { .. } => vec![
            type_ident(&descriptor.name),
            format!("mod {}", field_ident(&descriptor.name)),
        ],
        DescriptorKind::Array { element, .. } => declared_types(element),
        _ => Vec::new(),
    }
}
