//! Name-to-value mappings used for scopes, call frames and instance fields.

use ahash::RandomState;
use indexmap::IndexMap;

use crate::interpreter::value::Value;

/// A single flat scope. Mython has no nested lexical environments: the
/// global scope, each method call frame and each instance's fields are all
/// independent closures.
#[derive(Debug, Clone, Default)]
pub struct Closure {
    values: IndexMap<String, Value, RandomState>,
}

impl Closure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a binding's value.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    /// Create or overwrite a binding, returning the value it replaced.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    /// Remove a binding, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Binding names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_and_returns_previous() {
        let mut scope = Closure::new();
        assert!(scope.set("x", Value::Number(1)).is_none());
        let previous = scope.set("x", Value::Number(2));
        assert!(matches!(previous, Some(Value::Number(1))));
        assert!(matches!(scope.get("x"), Some(Value::Number(2))));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_names_keep_definition_order() {
        let mut scope = Closure::new();
        scope.set("b", Value::None);
        scope.set("a", Value::None);
        scope.set("c", Value::None);
        scope.remove("a");
        assert_eq!(scope.names().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_missing_binding() {
        let scope = Closure::new();
        assert!(scope.get("nope").is_none());
        assert!(!scope.contains("nope"));
        assert!(scope.is_empty());
    }
}
