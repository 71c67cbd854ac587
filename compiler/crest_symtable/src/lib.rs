use std::{collections::HashMap, hash::Hash};

/// Lexically scoped symbol table. The parser keeps one of these per
/// parse (never process-global) so independent parses cannot interfere,
/// and uses it to decide whether an identifier names a typedef'd type.
pub struct SymTable<T, V> {
    scopes: Vec<Scope<T, V>>,
}

impl<T: Hash + Eq, V: Clone> Default for SymTable<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq, V: Clone> SymTable<T, V> {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }

    /// Define a name in the innermost scope. Shadowing an outer scope is
    /// fine, a second definition in the same scope is not.
    pub fn define(&mut self, name: T, val: V) -> Result<(), SymbolError> {
        let scope = self
            .scopes
            .last_mut()
            .expect("symbol table has no root scope");

        if scope.get(&name).is_some() {
            return Err(SymbolError::AlreadyDefined);
        }

        scope.define(name, val);
        Ok(())
    }

    /// Innermost-out lookup
    pub fn lookup(&self, name: &T) -> Option<V> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn enter(&mut self) {
        self.scopes.push(Scope::new());
    }

    pub fn leave(&mut self) {
        assert!(self.scopes.len() > 1, "cannot leave the root scope");
        self.scopes.pop();
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

struct Scope<T, V> {
    inner: HashMap<T, V>,
}

impl<T: Hash + Eq, V: Clone> Scope<T, V> {
    fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    fn define(&mut self, name: T, val: V) {
        self.inner.insert(name, val);
    }

    fn get(&self, name: &T) -> Option<V> {
        self.inner.get(name).cloned()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SymbolError {
    AlreadyDefined,
}
