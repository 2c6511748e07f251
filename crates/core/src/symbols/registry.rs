//! Declaration storage.
//!
//! Each document owns a [`DocumentSymbols`] table: an arena of declarations
//! plus name-keyed indexes and the lexical scope tree. The
//! [`SymbolRegistry`] maps documents to their tables so documents can be
//! built and queried independently.

use super::declaration::{Declaration, DeclarationId, DeclarationKind};
use super::scope::ScopeTree;
use dashmap::DashMap;
use grove_syntax::{DocumentId, NodeId};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub struct DocumentSymbols {
    declarations: Vec<Declaration>,
    by_node: HashMap<NodeId, DeclarationId>,
    variables: IndexMap<String, DeclarationId>,
    parameters: IndexMap<String, DeclarationId>,
    methods: IndexMap<String, Vec<DeclarationId>>,
    classes: IndexMap<String, DeclarationId>,
    fields: IndexMap<(String, String), DeclarationId>,
    properties: IndexMap<(String, String), DeclarationId>,
    imports: IndexMap<String, DeclarationId>,
    scopes: ScopeTree,
}

impl DocumentSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, mut declaration: Declaration) -> DeclarationId {
        let id = DeclarationId::from_index(self.declarations.len());
        declaration.id = id;
        self.by_node.insert(declaration.node, id);
        self.declarations.push(declaration);
        id
    }

    fn member_key(declaration: &Declaration) -> (String, String) {
        (
            declaration.owner.clone().unwrap_or_default(),
            declaration.name.clone(),
        )
    }

    // --- Registration ---

    pub fn add_variable(&mut self, declaration: Declaration) -> DeclarationId {
        let name = declaration.name.clone();
        let id = self.push(declaration);
        self.variables.insert(name, id);
        id
    }

    pub fn add_parameter(&mut self, declaration: Declaration) -> DeclarationId {
        let name = declaration.name.clone();
        let id = self.push(declaration);
        self.parameters.insert(name, id);
        id
    }

    /// Overloads accumulate in insertion order.
    pub fn add_method(&mut self, declaration: Declaration) -> DeclarationId {
        let name = declaration.name.clone();
        let id = self.push(declaration);
        self.methods.entry(name).or_default().push(id);
        id
    }

    pub fn add_class(&mut self, declaration: Declaration) -> DeclarationId {
        let name = declaration.name.clone();
        let id = self.push(declaration);
        self.classes.insert(name, id);
        id
    }

    pub fn add_field(&mut self, declaration: Declaration) -> DeclarationId {
        let key = Self::member_key(&declaration);
        let id = self.push(declaration);
        self.fields.insert(key, id);
        id
    }

    pub fn add_property(&mut self, declaration: Declaration) -> DeclarationId {
        let key = Self::member_key(&declaration);
        let id = self.push(declaration);
        self.properties.insert(key, id);
        id
    }

    pub fn add_import(&mut self, declaration: Declaration) -> DeclarationId {
        let name = declaration.name.clone();
        let id = self.push(declaration);
        self.imports.insert(name, id);
        id
    }

    /// Dispatches on the declaration's kind.
    pub fn add(&mut self, declaration: Declaration) -> DeclarationId {
        match declaration.kind {
            DeclarationKind::Variable => self.add_variable(declaration),
            DeclarationKind::Parameter => self.add_parameter(declaration),
            DeclarationKind::Method => self.add_method(declaration),
            DeclarationKind::Class => self.add_class(declaration),
            DeclarationKind::Field => self.add_field(declaration),
            DeclarationKind::Property => self.add_property(declaration),
            DeclarationKind::Import => self.add_import(declaration),
        }
    }

    // --- Lookup ---

    pub fn declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        self.declarations.get(id.index())
    }

    /// Declaration introduced by this node, if any.
    pub fn declaration_for_node(&self, node: NodeId) -> Option<&Declaration> {
        self.by_node.get(&node).and_then(|id| self.declaration(*id))
    }

    fn lookup(&self, id: Option<&DeclarationId>) -> Option<&Declaration> {
        id.and_then(|id| self.declaration(*id))
    }

    pub fn find_variable(&self, name: &str) -> Option<&Declaration> {
        self.lookup(self.variables.get(name))
    }

    pub fn find_parameter(&self, name: &str) -> Option<&Declaration> {
        self.lookup(self.parameters.get(name))
    }

    pub fn find_methods(&self, name: &str) -> Vec<&Declaration> {
        self.methods
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|id| self.declaration(*id))
            .collect()
    }

    /// Exact match on the qualified name, then a simple-name match when it
    /// is unambiguous.
    pub fn find_class(&self, name: &str) -> Option<&Declaration> {
        if let Some(found) = self.lookup(self.classes.get(name)) {
            return Some(found);
        }
        let simple = simple_name(name);
        let mut matches = self
            .classes
            .iter()
            .filter(|(fqn, _)| simple_name(fqn) == simple);
        match (matches.next(), matches.next()) {
            (Some((_, id)), None) => self.declaration(*id),
            _ => None,
        }
    }

    pub fn find_field(&self, owner: &str, name: &str) -> Option<&Declaration> {
        self.lookup(self.fields.get(&(owner.to_string(), name.to_string())))
    }

    pub fn find_property(&self, owner: &str, name: &str) -> Option<&Declaration> {
        self.lookup(self.properties.get(&(owner.to_string(), name.to_string())))
    }

    /// Property first, then field, declared directly on `owner`.
    pub fn find_member(&self, owner: &str, name: &str) -> Option<&Declaration> {
        self.find_property(owner, name)
            .or_else(|| self.find_field(owner, name))
    }

    pub fn find_import(&self, name: &str) -> Option<&Declaration> {
        self.lookup(self.imports.get(name))
    }

    fn all<'a, I>(&'a self, ids: I) -> impl Iterator<Item = &'a Declaration> + 'a
    where
        I: Iterator<Item = &'a DeclarationId> + 'a,
    {
        ids.filter_map(|id| self.declaration(*id))
    }

    pub fn all_variables(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.all(self.variables.values())
    }

    pub fn all_parameters(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.all(self.parameters.values())
    }

    pub fn all_methods(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.all(self.methods.values().flatten())
    }

    pub fn all_classes(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.all(self.classes.values())
    }

    pub fn all_fields(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.all(self.fields.values())
    }

    pub fn all_properties(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.all(self.properties.values())
    }

    pub fn all_imports(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.all(self.imports.values())
    }

    /// Every declaration in registration order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub(crate) fn scopes_mut(&mut self) -> &mut ScopeTree {
        &mut self.scopes
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            variables: self.variables.len(),
            parameters: self.parameters.len(),
            methods: self.methods.values().map(Vec::len).sum(),
            classes: self.classes.len(),
            fields: self.fields.len(),
            properties: self.properties.len(),
            imports: self.imports.len(),
            scopes: self.scopes.len(),
        }
    }
}

fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Per-kind counts. Informational only.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub variables: usize,
    pub parameters: usize,
    pub methods: usize,
    pub classes: usize,
    pub fields: usize,
    pub properties: usize,
    pub imports: usize,
    pub scopes: usize,
}

impl RegistryStats {
    pub fn total(&self) -> usize {
        self.variables
            + self.parameters
            + self.methods
            + self.classes
            + self.fields
            + self.properties
            + self.imports
    }

    pub fn merge(mut self, other: RegistryStats) -> Self {
        self.variables += other.variables;
        self.parameters += other.parameters;
        self.methods += other.methods;
        self.classes += other.classes;
        self.fields += other.fields;
        self.properties += other.properties;
        self.imports += other.imports;
        self.scopes += other.scopes;
        self
    }
}

/// Concurrent map of per-document symbol tables.
///
/// Readers take an `Arc` snapshot; a rebuild installs a fresh table, so a
/// snapshot never observes a half-built document.
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    documents: DashMap<DocumentId, Arc<DocumentSymbols>>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self, document: &DocumentId) -> Option<Arc<DocumentSymbols>> {
        self.documents.get(document).map(|entry| Arc::clone(&entry))
    }

    pub fn install(&self, document: DocumentId, symbols: DocumentSymbols) -> Arc<DocumentSymbols> {
        let symbols = Arc::new(symbols);
        self.documents.insert(document, Arc::clone(&symbols));
        symbols
    }

    fn update<R>(&self, document: &DocumentId, f: impl FnOnce(&mut DocumentSymbols) -> R) -> R {
        let mut entry = self.documents.entry(document.clone()).or_default();
        f(Arc::make_mut(&mut entry))
    }

    pub fn add_variable(&self, document: &DocumentId, declaration: Declaration) -> DeclarationId {
        self.update(document, |t| t.add_variable(declaration))
    }

    pub fn add_parameter(&self, document: &DocumentId, declaration: Declaration) -> DeclarationId {
        self.update(document, |t| t.add_parameter(declaration))
    }

    pub fn add_method(&self, document: &DocumentId, declaration: Declaration) -> DeclarationId {
        self.update(document, |t| t.add_method(declaration))
    }

    pub fn add_class(&self, document: &DocumentId, declaration: Declaration) -> DeclarationId {
        self.update(document, |t| t.add_class(declaration))
    }

    pub fn add_field(&self, document: &DocumentId, declaration: Declaration) -> DeclarationId {
        self.update(document, |t| t.add_field(declaration))
    }

    pub fn add_property(&self, document: &DocumentId, declaration: Declaration) -> DeclarationId {
        self.update(document, |t| t.add_property(declaration))
    }

    pub fn add_import(&self, document: &DocumentId, declaration: Declaration) -> DeclarationId {
        self.update(document, |t| t.add_import(declaration))
    }

    pub fn declaration(&self, document: &DocumentId, id: DeclarationId) -> Option<Declaration> {
        self.documents
            .get(document)
            .and_then(|t| t.declaration(id).cloned())
    }

    pub fn find_variable(&self, document: &DocumentId, name: &str) -> Option<Declaration> {
        self.documents
            .get(document)
            .and_then(|t| t.find_variable(name).cloned())
    }

    pub fn find_methods(&self, document: &DocumentId, name: &str) -> Vec<Declaration> {
        self.documents
            .get(document)
            .map(|t| t.find_methods(name).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn find_class(&self, document: &DocumentId, name: &str) -> Option<Declaration> {
        self.documents
            .get(document)
            .and_then(|t| t.find_class(name).cloned())
    }

    pub fn find_field(
        &self,
        document: &DocumentId,
        owner: &str,
        name: &str,
    ) -> Option<Declaration> {
        self.documents
            .get(document)
            .and_then(|t| t.find_field(owner, name).cloned())
    }

    pub fn find_property(
        &self,
        document: &DocumentId,
        owner: &str,
        name: &str,
    ) -> Option<Declaration> {
        self.documents
            .get(document)
            .and_then(|t| t.find_property(owner, name).cloned())
    }

    pub fn find_import(&self, document: &DocumentId, name: &str) -> Option<Declaration> {
        self.documents
            .get(document)
            .and_then(|t| t.find_import(name).cloned())
    }

    pub fn clear(&self, document: &DocumentId) {
        self.documents.remove(document);
    }

    pub fn clear_all(&self) {
        self.documents.clear();
    }

    pub fn contains(&self, document: &DocumentId) -> bool {
        self.documents.contains_key(document)
    }

    pub fn stats(&self, document: &DocumentId) -> RegistryStats {
        self.documents
            .get(document)
            .map(|t| t.stats())
            .unwrap_or_default()
    }

    pub fn stats_total(&self) -> RegistryStats {
        self.documents
            .iter()
            .map(|entry| entry.value().stats())
            .fold(RegistryStats::default(), RegistryStats::merge)
    }
}
