//! Lexical scope tree for one document.
//!
//! Scopes live in an arena; each has a parent and its own name map, and
//! lookup walks the chain outward. This sits alongside the flat registry so
//! that same-named locals in different methods do not collide.

use super::declaration::DeclarationId;
use grove_syntax::{NodeId, NodeRef};
use std::collections::HashMap;

pub type ScopeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Class(String),
    Method,
    Closure,
    Block,
    /// `for (x in xs)`: holds the loop variable.
    Loop,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub node: NodeId,
    symbols: HashMap<String, DeclarationId>,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<DeclarationId> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    node_to_scope: HashMap<NodeId, ScopeId>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_scope(
        &mut self,
        node: NodeId,
        parent: Option<ScopeId>,
        kind: ScopeKind,
    ) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope {
            id,
            parent,
            kind,
            node,
            symbols: HashMap::new(),
        });
        self.node_to_scope.insert(node, id);
        id
    }

    pub fn add_symbol(&mut self, scope: ScopeId, name: &str, declaration: DeclarationId) {
        if let Some(scope) = self.scopes.get_mut(scope) {
            scope.symbols.insert(name.to_string(), declaration);
        }
    }

    pub fn get(&self, scope: ScopeId) -> Option<&Scope> {
        self.scopes.get(scope)
    }

    /// Scope opened by this node, if it opens one.
    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.node_to_scope.get(&node).copied()
    }

    /// Innermost scope containing the node.
    pub fn enclosing_scope(&self, node: NodeRef<'_>) -> Option<ScopeId> {
        std::iter::once(node)
            .chain(node.ancestors())
            .find_map(|n| self.scope_of(n.id()))
    }

    pub fn lookup(&self, start: ScopeId, name: &str) -> Option<DeclarationId> {
        self.chain(start).find_map(|scope| scope.get(name))
    }

    pub fn find_enclosing_class(&self, start: ScopeId) -> Option<&str> {
        self.chain(start).find_map(|scope| match &scope.kind {
            ScopeKind::Class(name) => Some(name.as_str()),
            _ => None,
        })
    }

    fn chain(&self, start: ScopeId) -> impl Iterator<Item = &Scope> + '_ {
        std::iter::successors(self.scopes.get(start), |scope| {
            scope.parent.and_then(|p| self.scopes.get(p))
        })
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
