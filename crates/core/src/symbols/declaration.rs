use grove_syntax::{NodeId, SourceRange, TypeName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle into a document's declaration arena.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclarationId(u32);

impl DeclarationId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Variable,
    Parameter,
    Method,
    Class,
    Field,
    Property,
    Import,
}

impl DeclarationKind {
    pub fn label(self) -> &'static str {
        match self {
            DeclarationKind::Variable => "variable",
            DeclarationKind::Parameter => "parameter",
            DeclarationKind::Method => "method",
            DeclarationKind::Class => "class",
            DeclarationKind::Field => "field",
            DeclarationKind::Property => "property",
            DeclarationKind::Import => "import",
        }
    }

    pub fn symbol_kind(self) -> lsp_types::SymbolKind {
        use lsp_types::SymbolKind;
        match self {
            DeclarationKind::Variable | DeclarationKind::Parameter => SymbolKind::VARIABLE,
            DeclarationKind::Method => SymbolKind::METHOD,
            DeclarationKind::Class => SymbolKind::CLASS,
            DeclarationKind::Field => SymbolKind::FIELD,
            DeclarationKind::Property => SymbolKind::PROPERTY,
            DeclarationKind::Import => SymbolKind::MODULE,
        }
    }
}

/// A named entity introduced by source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub id: DeclarationId,
    pub kind: DeclarationKind,
    pub name: String,
    /// Declaring node: the left-hand variable for local declarations.
    pub node: NodeId,
    pub range: SourceRange,
    /// `None` for dynamically typed (`def`) declarations.
    pub declared_type: Option<TypeName>,
    /// Owning class for fields, properties and methods.
    pub owner: Option<String>,
    pub initializer: Option<NodeId>,
}

impl Declaration {
    /// A declaration not yet stored; the registry assigns the id.
    pub fn new(
        kind: DeclarationKind,
        name: impl Into<String>,
        node: NodeId,
        range: SourceRange,
    ) -> Self {
        Self {
            id: DeclarationId(0),
            kind,
            name: name.into(),
            node,
            range,
            declared_type: None,
            owner: None,
            initializer: None,
        }
    }

    pub fn with_type(mut self, declared_type: Option<TypeName>) -> Self {
        self.declared_type = declared_type;
        self
    }

    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_initializer(mut self, initializer: Option<NodeId>) -> Self {
        self.initializer = initializer;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.declared_type.is_none()
    }
}

/// Outcome of resolving a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Declaration(DeclarationId),
    /// Non-strict fallback: the node itself, or an unregistered member node.
    Anchor(NodeId),
}

impl Resolution {
    pub fn declaration(self) -> Option<DeclarationId> {
        match self {
            Resolution::Declaration(id) => Some(id),
            Resolution::Anchor(_) => None,
        }
    }
}
