//! Grammar productions for PDL.
//!
//! All `parse_*` methods are an extension of `Parser`. Productions never fail:
//! missing pieces are reported and left out of the tree, unexpected tokens are
//! wrapped in `Error` nodes.

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{ENTRY_RECOVERY, ROOT_RECOVERY};
use super::keywords::Keyword;
use crate::diagnostics::DiagnosticKind;

/// Flag names accepted after `*`.
pub const FLAGS: [&str; 3] = ["necessary", "expert", "hidden"];

const INHERITS: &str = "inherits";

impl Parser<'_, '_> {
    pub fn parse_root(&mut self) {
        self.open_node(SyntaxKind::Root);

        if self.at_inherits() {
            self.parse_inherits();
        }

        while !self.done() {
            if self.at_inherits() {
                self.error(DiagnosticKind::InheritsNotFirst);
                self.parse_inherits();
            } else if self.at(SyntaxKind::Id) {
                self.parse_entry();
            } else {
                self.recover(DiagnosticKind::ExpectedIdentifier, ROOT_RECOVERY);
            }
        }

        self.flush_trailing_trivia();
        self.close_node();
    }

    /// `inherits` followed by anything but `=`, which would make it an entry name.
    fn at_inherits(&mut self) -> bool {
        self.at_word(INHERITS) && self.nth(1) != SyntaxKind::Equals
    }

    fn parse_inherits(&mut self) {
        self.open_node(SyntaxKind::Inherits);
        self.bump();

        self.open_node(SyntaxKind::TypePath);
        self.expect(SyntaxKind::Id, DiagnosticKind::ExpectedIdentifier);
        while self.eat(SyntaxKind::DoubleColon) {
            self.expect(SyntaxKind::Id, DiagnosticKind::ExpectedIdentifier);
        }
        self.close_node();

        self.close_node();
    }

    fn parse_entry(&mut self) {
        self.open_node(SyntaxKind::Entry);
        self.bump();
        self.expect(SyntaxKind::Equals, DiagnosticKind::ExpectedEquals);
        self.parse_data();
        self.close_node();
    }

    /// `keyword args [description] flag*`
    fn parse_data(&mut self) {
        if !self.at(SyntaxKind::Id) || self.at_entry_start() {
            self.error(DiagnosticKind::ExpectedType);
            return;
        }
        if !self.nest() {
            return;
        }

        match self.keyword() {
            None => {
                let word = self.text();
                self.open_node(SyntaxKind::UnknownType);
                self.error_with(DiagnosticKind::UnknownKeyword, word);
                self.bump();
                self.close_node();
            }
            Some(keyword) => {
                self.open_node(keyword.node_kind());
                self.bump();
                self.parse_args(keyword);
                self.parse_trailer();
                self.close_node();
            }
        }

        self.unnest();
    }

    fn parse_args(&mut self, keyword: Keyword) {
        match keyword {
            Keyword::Bool => self.parse_bool(),
            Keyword::Int | Keyword::Double => {
                self.expect(SyntaxKind::Number, DiagnosticKind::ExpectedValue);
            }
            Keyword::Vector => self.parse_numbers("`(x y z)`", "vector started here"),
            Keyword::DoubleRange => {
                self.parse_numbers("`(` followed by the values", "values started here")
            }
            // `includedset` takes the schema path; its description follows
            // as a second string.
            Keyword::String | Keyword::Path | Keyword::IncludedSet => self.parse_str(),
            Keyword::Selection => self.parse_selection(),
            Keyword::Set => self.parse_block(),
            Keyword::SelectableSubset => self.parse_selectable(),
            Keyword::Array => self.parse_array(),
            Keyword::Matrix => {
                self.expect(SyntaxKind::Dims, DiagnosticKind::ExpectedDimensions);
            }
        }
    }

    fn parse_bool(&mut self) {
        if self.at_word("true") || self.at_word("false") {
            self.bump();
        } else if self.at(SyntaxKind::Id) && !self.at_entry_start() {
            self.error_bump(DiagnosticKind::InvalidBool);
        } else {
            self.error(DiagnosticKind::ExpectedValue);
        }
    }

    /// `( number* )`
    fn parse_numbers(&mut self, expected: &str, note: &str) {
        if !self.at(SyntaxKind::ParenOpen) {
            self.error_with(DiagnosticKind::ExpectedValue, expected);
            return;
        }
        let open = self.open_delimiter();
        while self.at(SyntaxKind::Number) {
            self.bump();
        }
        self.close_delimiter();
        if !self.eat(SyntaxKind::ParenClose) {
            self.unclosed(DiagnosticKind::UnclosedParen, note, open);
        }
    }

    /// String value: `"..."`.
    pub(super) fn parse_str(&mut self) {
        if !self.at(SyntaxKind::DoubleQuote) {
            self.error(DiagnosticKind::ExpectedString);
            return;
        }
        self.open_node(SyntaxKind::Str);
        self.bump_quoted();
        self.close_node();
    }

    fn bump_quoted(&mut self) {
        self.bump();
        self.eat(SyntaxKind::StrVal);
        self.expect(SyntaxKind::DoubleQuote, DiagnosticKind::ExpectedString);
    }

    fn parse_selection(&mut self) {
        if !self.at(SyntaxKind::ParenOpen) {
            self.error_with(DiagnosticKind::ExpectedValue, "`(` followed by the options");
            return;
        }
        self.open_node(SyntaxKind::SelectionItems);
        let open = self.open_delimiter();
        while self.at(SyntaxKind::Id) {
            self.bump();
        }
        self.close_delimiter();
        let closed = self.eat(SyntaxKind::ParenClose);
        self.close_node();
        if !closed {
            self.unclosed(DiagnosticKind::UnclosedParen, "options started here", open);
            return;
        }

        self.parse_default_tag();
    }

    fn parse_default_tag(&mut self) {
        if self.at(SyntaxKind::Id) && !self.at_entry_start() {
            self.bump();
        } else {
            self.error_with(DiagnosticKind::ExpectedIdentifier, "default option");
        }
    }

    /// `{ entry* }`
    fn parse_block(&mut self) {
        if !self.at(SyntaxKind::BraceOpen) {
            self.error_with(DiagnosticKind::ExpectedValue, "`{`");
            return;
        }
        self.open_node(SyntaxKind::Block);
        let open = self.open_delimiter();

        while !self.done() && !self.at(SyntaxKind::BraceClose) {
            if self.at(SyntaxKind::Id) {
                self.parse_entry();
            } else {
                self.recover(DiagnosticKind::ExpectedIdentifier, ENTRY_RECOVERY);
            }
        }

        self.close_delimiter();
        if !self.eat(SyntaxKind::BraceClose) {
            self.unclosed(DiagnosticKind::UnclosedBlock, "set started here", open);
        }
        self.close_node();
    }

    /// `{{ (tag set { entry* } [description])* }} default`
    ///
    /// The doubled braces must touch; `{ {` opens a plain block instead.
    fn parse_selectable(&mut self) {
        if !self.at_pair(SyntaxKind::BraceOpen) {
            self.error_with(DiagnosticKind::ExpectedValue, "`{{`");
            return;
        }
        let open = self.open_delimiter();
        self.bump();

        let mut closed = false;
        while !self.done() {
            if self.at_pair(SyntaxKind::BraceClose) {
                self.bump_pair();
                closed = true;
                break;
            }
            if self.at(SyntaxKind::BraceClose) {
                break;
            }
            if self.at(SyntaxKind::Id) {
                self.parse_alternative();
            } else {
                self.recover(DiagnosticKind::ExpectedIdentifier, ENTRY_RECOVERY);
            }
        }
        self.close_delimiter();

        if !closed {
            self.unclosed(
                DiagnosticKind::UnclosedAlternatives,
                "alternatives started here",
                open,
            );
            self.eat(SyntaxKind::BraceClose);
        }

        self.parse_default_tag();
    }

    fn parse_alternative(&mut self) {
        self.open_node(SyntaxKind::Alternative);
        self.bump();
        if self.at_word("set") {
            self.bump();
        } else {
            self.error_with(DiagnosticKind::ExpectedType, "`set`");
        }
        if self.nest() {
            self.parse_block();
            self.unnest();
        }
        if self.at(SyntaxKind::DoubleQuote) {
            self.parse_description();
        }
        self.close_node();
    }

    /// `[ data ] * count`
    fn parse_array(&mut self) {
        if !self.at(SyntaxKind::BracketOpen) {
            self.error_with(DiagnosticKind::ExpectedValue, "`[`");
            return;
        }
        let open = self.open_delimiter();
        self.parse_data();
        self.close_delimiter();
        if !self.eat(SyntaxKind::BracketClose) {
            self.unclosed(DiagnosticKind::UnclosedBracket, "element started here", open);
            return;
        }
        if self.expect(SyntaxKind::Star, DiagnosticKind::ExpectedCount) {
            self.expect(SyntaxKind::Number, DiagnosticKind::ExpectedCount);
        }
    }

    /// `[description] flag*`
    fn parse_trailer(&mut self) {
        if self.at(SyntaxKind::DoubleQuote) {
            self.parse_description();
        }
        while self.at(SyntaxKind::Star) {
            self.parse_flag();
        }
    }

    fn parse_description(&mut self) {
        self.open_node(SyntaxKind::Description);
        self.bump_quoted();
        self.close_node();
    }

    fn parse_flag(&mut self) {
        self.open_node(SyntaxKind::Flag);
        self.bump();
        if self.at(SyntaxKind::Id) && !self.at_entry_start() {
            let name = self.text();
            if !FLAGS.contains(&name) {
                self.error_with(DiagnosticKind::UnknownFlag, name);
            }
            self.bump();
        } else {
            self.error(DiagnosticKind::ExpectedFlag);
        }
        self.close_node();
    }
}
