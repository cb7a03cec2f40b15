//! Token cursor and tree builder behind the grammar.
//!
//! The grammar never sees trivia. The cursor steps over it on lookahead, and
//! it is written lazily: in front of the next consumed token, or in front of a
//! node being opened so that it stays in the enclosing node.

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use super::keywords::{Keyword, KeywordTable};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Default limit on consumed tokens.
pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
/// Default limit on nesting of sets, alternatives and arrays.
pub const DEFAULT_RECURSION_FUEL: u32 = 256;

#[derive(Debug, Clone, Copy)]
struct Fuel {
    /// Tokens left to consume; `None` is unlimited.
    tokens: Option<u32>,
    max_depth: Option<u32>,
    depth: u32,
}

pub struct Parser<'src, 'k> {
    source: &'src str,
    keywords: &'k KeywordTable,
    tokens: Vec<Token>,
    /// Next unconsumed token, trivia included.
    cursor: usize,
    /// Tokens before this index are already in the tree.
    written: usize,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    fuel: Fuel,
    /// Opening delimiters around the cursor, innermost last.
    open: Vec<TextRange>,
    reported_at: Option<TextSize>,
    fatal: Option<Error>,
}

impl<'src, 'k> Parser<'src, 'k> {
    pub fn new(source: &'src str, tokens: Vec<Token>, keywords: &'k KeywordTable) -> Self {
        Self {
            source,
            keywords,
            tokens,
            cursor: 0,
            written: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            fuel: Fuel {
                tokens: Some(DEFAULT_EXEC_FUEL),
                max_depth: Some(DEFAULT_RECURSION_FUEL),
                depth: 0,
            },
            open: Vec::new(),
            reported_at: None,
            fatal: None,
        }
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.fuel.tokens = limit;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.fuel.max_depth = limit;
        self
    }

    pub(super) fn finish(self) -> Result<(GreenNode, Diagnostics), Error> {
        match self.fatal {
            Some(err) => Err(err),
            None => Ok((self.builder.finish(), self.diagnostics)),
        }
    }

    fn skip_trivia(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(|t| t.kind.is_trivia()) {
            self.cursor += 1;
        }
    }

    fn token(&mut self) -> Option<Token> {
        self.skip_trivia();
        self.tokens.get(self.cursor).copied()
    }

    fn end(&self) -> TextSize {
        TextSize::of(self.source)
    }

    /// Kind of the current token; `Error` at end of input.
    pub(super) fn current(&mut self) -> SyntaxKind {
        self.token().map_or(SyntaxKind::Error, |t| t.kind)
    }

    /// Kind of the `n`-th token after the current one, trivia skipped.
    pub(super) fn nth(&mut self, n: usize) -> SyntaxKind {
        self.skip_trivia();
        self.tokens[self.cursor..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_any(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Current token is the identifier `word`.
    pub(super) fn at_word(&mut self, word: &str) -> bool {
        self.at(SyntaxKind::Id) && self.text() == word
    }

    /// Two touching `kind` tokens, as the `{{` and `}}` of a selectable subset.
    pub(super) fn at_pair(&mut self, kind: SyntaxKind) -> bool {
        self.skip_trivia();
        match self.tokens.get(self.cursor..self.cursor + 2) {
            Some([a, b]) => a.kind == kind && b.kind == kind && a.span.end() == b.span.start(),
            _ => false,
        }
    }

    /// `name =` starts the next entry.
    pub(super) fn at_entry_start(&mut self) -> bool {
        self.at(SyntaxKind::Id) && self.nth(1) == SyntaxKind::Equals
    }

    /// Meaning of the current identifier in the keyword table.
    pub(super) fn keyword(&mut self) -> Option<Keyword> {
        if !self.at(SyntaxKind::Id) {
            return None;
        }
        let text = self.text();
        self.keywords.lookup(text)
    }

    /// Text of the current token, empty at end of input.
    pub(super) fn text(&mut self) -> &'src str {
        match self.token() {
            Some(token) => token_text(self.source, &token),
            None => "",
        }
    }

    pub(super) fn span(&mut self) -> TextRange {
        match self.token() {
            Some(token) => token.span,
            None => TextRange::empty(self.end()),
        }
    }

    /// End of input, or a fatal error stopped the parse.
    pub(super) fn done(&mut self) -> bool {
        self.token().is_none() || self.fatal.is_some()
    }

    /// Writes the trivia the cursor has stepped over into the open node.
    fn flush_trivia(&mut self) {
        for token in &self.tokens[self.written..self.cursor] {
            self.builder
                .token(token.kind.into(), token_text(self.source, token));
        }
        self.written = self.cursor;
    }

    /// Writes whatever trivia is left before the end of input.
    pub(super) fn flush_trailing_trivia(&mut self) {
        self.skip_trivia();
        self.flush_trivia();
    }

    pub(super) fn open_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn close_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn bump(&mut self) {
        let Some(token) = self.token() else {
            debug_assert!(false, "bump at end of input");
            return;
        };
        match self.fuel.tokens {
            Some(0) => self.stop(Error::ExecFuelExhausted),
            Some(left) => self.fuel.tokens = Some(left - 1),
            None => {}
        }
        self.flush_trivia();
        self.builder
            .token(token.kind.into(), token_text(self.source, &token));
        self.cursor += 1;
        self.written = self.cursor;
    }

    /// Consumes `{{` or `}}`.
    pub(super) fn bump_pair(&mut self) {
        self.bump();
        self.bump();
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.bump();
        true
    }

    /// Reports `diagnostic` without consuming when the current token is not `kind`.
    pub(super) fn expect(&mut self, kind: SyntaxKind, diagnostic: DiagnosticKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(diagnostic);
        false
    }

    /// Keeps the first fatal error.
    fn stop(&mut self, err: Error) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
    }

    /// First report at an offset wins.
    fn first_at(&mut self, offset: TextSize) -> bool {
        self.reported_at.replace(offset) != Some(offset)
    }

    fn report(&mut self, kind: DiagnosticKind, message: Option<String>) {
        let range = self.span();
        if !self.first_at(range.start()) {
            return;
        }
        let suppression = match self.open.last() {
            Some(open) => TextRange::new(open.start(), self.end()),
            None => range,
        };
        let mut report = self
            .diagnostics
            .report(kind, range)
            .suppression_range(suppression);
        if let Some(message) = message {
            report = report.message(message);
        }
        report.emit();
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        self.report(kind, None);
    }

    pub(super) fn error_with(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.report(kind, Some(message.into()));
    }

    /// Reports, then consumes the current token inside an `Error` node.
    pub(super) fn error_bump(&mut self, kind: DiagnosticKind) {
        self.error(kind);
        if self.token().is_some() {
            self.open_node(SyntaxKind::Error);
            self.bump();
            self.close_node();
        }
    }

    /// Reports, then skips to the next token in `recovery`. Skipped tokens
    /// go into one `Error` node.
    pub(super) fn recover(&mut self, kind: DiagnosticKind, recovery: TokenSet) {
        if self.at_any(recovery) || self.done() {
            self.error(kind);
            return;
        }
        self.open_node(SyntaxKind::Error);
        self.error(kind);
        while !self.at_any(recovery) && !self.done() {
            self.bump();
        }
        self.close_node();
    }

    /// Enters one level of nesting. Past the depth limit the parse stops with
    /// [`Error::RecursionLimitExceeded`].
    pub(super) fn nest(&mut self) -> bool {
        if self.fuel.max_depth.is_some_and(|max| self.fuel.depth >= max) {
            self.stop(Error::RecursionLimitExceeded);
            return false;
        }
        self.fuel.depth += 1;
        true
    }

    pub(super) fn unnest(&mut self) {
        self.fuel.depth = self.fuel.depth.saturating_sub(1);
    }

    /// Consumes an opening delimiter and returns its span. Diagnostics inside
    /// are suppressed from here to the end of input until it is closed.
    pub(super) fn open_delimiter(&mut self) -> TextRange {
        let span = self.span();
        self.open.push(span);
        self.bump();
        span
    }

    pub(super) fn close_delimiter(&mut self) {
        self.open.pop();
    }

    /// Delimiter opened at `open` never closed; reported over everything
    /// from `open` to the current token.
    pub(super) fn unclosed(&mut self, kind: DiagnosticKind, note: &str, open: TextRange) {
        let current = self.span();
        if !self.first_at(current.start()) {
            return;
        }
        self.diagnostics
            .report(kind, TextRange::new(open.start(), current.end()))
            .related_to(note, open)
            .emit();
    }
}
