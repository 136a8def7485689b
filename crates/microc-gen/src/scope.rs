//! Scoped symbol table for the emitter.
//!
//! Scopes are pushed per function and per block; resolution walks from
//! the innermost scope outwards. Every binding pairs the stack-slot
//! address temporary with the stored value's IR type.

use crate::types::IrType;
use rustc_hash::FxHashMap;

/// A resolved variable: its slot address and storage kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    /// The `%tN` temporary holding the slot address.
    pub addr: String,
    /// The IR type stored in the slot.
    pub ty: IrType,
}

/// A stack of lexical scopes.
#[derive(Default)]
pub struct ScopeStack {
    scopes: Vec<FxHashMap<String, Binding>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new innermost scope.
    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Closes the innermost scope, dropping its bindings.
    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Binds `name` in the innermost scope, shadowing any outer binding.
    pub fn bind(&mut self, name: impl Into<String>, binding: Binding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), binding);
        }
    }

    /// Resolves `name` by walking scopes inner-to-outer.
    pub fn resolve(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(addr: &str, ty: IrType) -> Binding {
        Binding {
            addr: addr.to_string(),
            ty,
        }
    }

    #[test]
    fn test_bind_and_resolve() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.bind("x", binding("%t0", IrType::L));
        assert_eq!(scopes.resolve("x"), Some(&binding("%t0", IrType::L)));
        assert_eq!(scopes.resolve("y"), None);
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.bind("x", binding("%t0", IrType::L));
        scopes.push();
        scopes.bind("x", binding("%t1", IrType::D));
        assert_eq!(scopes.resolve("x").unwrap().addr, "%t1");
        scopes.pop();
        assert_eq!(scopes.resolve("x").unwrap().addr, "%t0");
    }

    #[test]
    fn test_outer_binding_visible_from_inner_scope() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.bind("x", binding("%t0", IrType::L));
        scopes.push();
        assert!(scopes.resolve("x").is_some());
    }

    #[test]
    fn test_pop_drops_bindings() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.push();
        scopes.bind("inner", binding("%t2", IrType::W));
        scopes.pop();
        assert_eq!(scopes.resolve("inner"), None);
        assert_eq!(scopes.depth(), 1);
    }
}
