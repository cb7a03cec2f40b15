//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens in lowering.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};
use super::keywords::Keyword;

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Inherits, Inherits);
ast_node!(TypePath, TypePath);
ast_node!(Entry, Entry);
ast_node!(Description, Description);
ast_node!(Flag, Flag);
ast_node!(Str, Str);
ast_node!(Block, Block);
ast_node!(SelectionItems, SelectionItems);
ast_node!(Alternative, Alternative);

/// A type keyword with its arguments, description and flags.
///
/// One wrapper covers every `*Type` node kind; [`Data::kind`] tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Data(SyntaxNode);

impl Data {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        node.kind().is_data().then(|| Self(node))
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        &self.0
    }

    /// `None` for a keyword the table did not know.
    pub fn kind(&self) -> Option<Keyword> {
        Keyword::from_node_kind(self.0.kind())
    }

    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.ids().next()
    }

    /// Identifier after the keyword: the bool literal, or the default tag of
    /// a selection or selectable subset.
    pub fn word(&self) -> Option<SyntaxToken> {
        self.ids().nth(1)
    }

    pub fn numbers(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Number)
    }

    pub fn dims(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Dims)
    }

    pub fn str(&self) -> Option<Str> {
        self.0.children().find_map(Str::cast)
    }

    pub fn selection_items(&self) -> Option<SelectionItems> {
        self.0.children().find_map(SelectionItems::cast)
    }

    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    pub fn alternatives(&self) -> impl Iterator<Item = Alternative> + '_ {
        self.0.children().filter_map(Alternative::cast)
    }

    /// Element declaration of an array.
    pub fn element(&self) -> Option<Data> {
        self.0.children().find_map(Data::cast)
    }

    pub fn description(&self) -> Option<Description> {
        self.0.children().find_map(Description::cast)
    }

    pub fn flags(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.children().filter_map(Flag::cast)
    }

    fn ids(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Id)
    }
}

impl Root {
    /// First `inherits` clause; later ones are reported by the parser.
    pub fn inherits(&self) -> Option<Inherits> {
        self.0.children().find_map(Inherits::cast)
    }

    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.0.children().filter_map(Entry::cast)
    }
}

impl Inherits {
    pub fn path(&self) -> Option<TypePath> {
        self.0.children().find_map(TypePath::cast)
    }
}

impl TypePath {
    pub fn segments(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Id)
    }
}

impl Entry {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn data(&self) -> Option<Data> {
        self.0.children().find_map(Data::cast)
    }
}

impl Str {
    /// Text between the quotes.
    pub fn value(&self) -> String {
        tokens(&self.0)
            .find(|t| t.kind() == SyntaxKind::StrVal)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

impl Description {
    pub fn text(&self) -> String {
        tokens(&self.0)
            .find(|t| t.kind() == SyntaxKind::StrVal)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

impl Flag {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }
}

impl Block {
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.0.children().filter_map(Entry::cast)
    }
}

impl SelectionItems {
    pub fn items(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Id)
    }
}

impl Alternative {
    pub fn tag(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    pub fn description(&self) -> Option<Description> {
        self.0.children().find_map(Description::cast)
    }
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|it| it.into_token())
}
