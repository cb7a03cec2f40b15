//! Parse and lower one PDL source.
//!
//! Stages: parse → lower. Each stage collects diagnostics into the same
//! [`Diagnostics`]; use [`Compilation::is_valid`] to check for errors.

use std::fmt::Write;

use rowan::NodeOrToken;

use crate::diagnostics::Diagnostics;
use crate::parser::lexer::lex;
use crate::parser::{KeywordTable, Parse, Parser, Root, SyntaxNode, parse_with_parser};
use crate::schema::{Colors, Schema, SchemaPrinter, lower};
use crate::{Error, Result};

/// Configures and runs a compilation.
///
/// Fuel limits default to the parser's; `None` disables a limit.
pub struct CompilationBuilder<'a> {
    source: &'a str,
    keywords: KeywordTable,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
}

impl<'a> CompilationBuilder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            keywords: KeywordTable::standard(),
            exec_fuel: Some(crate::parser::DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(crate::parser::DEFAULT_RECURSION_FUEL),
        }
    }

    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    /// Execution fuel never replenishes. It bounds the work spent on large inputs.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// Recursion fuel restores when a nested set closes. It bounds nesting depth.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    /// Runs all stages. `Err` only on fuel exhaustion.
    pub fn compile(self) -> Result<Compilation<'a>> {
        let parser = Parser::new(self.source, lex(self.source), &self.keywords)
            .with_exec_fuel(self.exec_fuel)
            .with_recursion_fuel(self.recursion_fuel);
        let (parse, mut diagnostics) = parse_with_parser(parser)?;
        let schema = lower(&parse.root(), &mut diagnostics);

        Ok(Compilation {
            source: self.source,
            parse,
            schema,
            diagnostics,
        })
    }
}

/// A parsed and lowered PDL source.
#[derive(Debug, Clone)]
pub struct Compilation<'a> {
    source: &'a str,
    parse: Parse,
    schema: Schema,
    diagnostics: Diagnostics,
}

impl<'a> Compilation<'a> {
    /// Compiles `source` with the standard keywords and default fuel.
    pub fn new(source: &'a str) -> Result<Self> {
        CompilationBuilder::new(source).compile()
    }

    pub fn builder(source: &'a str) -> CompilationBuilder<'a> {
        CompilationBuilder::new(source)
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn root(&self) -> Root {
        self.parse.root()
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// No error diagnostics. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    /// The lowered schema. Incomplete declarations are missing from it when
    /// the source has errors.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn into_schema(self) -> Result<Schema> {
        if !self.is_valid() {
            return Err(Error::ParseFailed(self.diagnostics));
        }
        Ok(self.schema)
    }

    pub fn dump_cst(&self) -> String {
        self.format_cst(false)
    }

    pub fn dump_cst_full(&self) -> String {
        self.format_cst(true)
    }

    pub fn dump_outline(&self) -> String {
        SchemaPrinter::new(&self.schema).dump()
    }

    pub fn dump_outline_colored(&self, colors: Colors) -> String {
        SchemaPrinter::new(&self.schema).colors(colors).dump()
    }

    pub fn dump_diagnostics(&self) -> String {
        self.diagnostics.render_filtered(self.source)
    }

    pub fn dump_diagnostics_raw(&self) -> String {
        self.diagnostics.render(self.source)
    }

    fn format_cst(&self, trivia: bool) -> String {
        let mut out = String::new();
        format_node(&self.syntax(), 0, trivia, &mut out).expect("String write never fails");
        out
    }
}

fn format_node(
    node: &SyntaxNode,
    indent: usize,
    trivia: bool,
    w: &mut impl Write,
) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    writeln!(w, "{}{:?}", prefix, node.kind())?;

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(n) => format_node(&n, indent + 1, trivia, w)?,
            NodeOrToken::Token(t) => {
                if trivia || !t.kind().is_trivia() {
                    let child_prefix = "  ".repeat(indent + 1);
                    writeln!(w, "{}{:?} {:?}", child_prefix, t.kind(), t.text())?;
                }
            }
        }
    }
    Ok(())
}
