//! Parser infrastructure for PDL.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green
//! tree builder:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Lazy trivia: whitespace and comments are skipped on lookahead and written
//!   just before the next token, or before a node opens
//! - Type keywords resolved through a [`KeywordTable`] passed in by the caller
//!
//! # Recovery Strategy
//!
//! The parser is resilient and always produces a tree:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Broken entries skip ahead to the next identifier or closing brace
//!
//! Fuel exhaustion (exec fuel, recursion fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod keywords;

#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{Alternative, Block, Data, Description, Entry, Flag, Inherits, Root, Str, TypePath};

pub use core::{DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL, Parser};
pub use grammar::FLAGS;
pub use keywords::{Keyword, KeywordTable};

use crate::PassResult;
use lexer::lex;

/// Parse result containing the green tree.
///
/// The tree is always complete; diagnostics are returned separately.
/// Error nodes in the tree represent recovery points.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.cst
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn root(&self) -> Root {
        Root::cast(self.syntax()).expect("parser always produces a Root node")
    }
}

/// Main entry point. Returns Err on fuel exhaustion.
pub fn parse(source: &str, keywords: &KeywordTable) -> PassResult<Parse> {
    parse_with_parser(Parser::new(source, lex(source), keywords))
}

/// Parse with a pre-configured parser (for custom fuel limits).
pub(crate) fn parse_with_parser(mut parser: Parser) -> PassResult<Parse> {
    parser.parse_root();
    let (cst, diagnostics) = parser.finish()?;
    Ok((Parse { cst }, diagnostics))
}
