//! Registered types and their reverse shape indices.

use crate::types::Type;
use fuzzyioc_analyzer::Shape;
use rustc_hash::FxHashMap;

/// Registered types in registration order, plus `name -> types` indices for
/// members and methods. Registering a type twice lists it twice.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    types: Vec<Type>,
    members_index: FxHashMap<String, Vec<Type>>,
    methods_index: FxHashMap<String, Vec<Type>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Append `ty` and index it under every name in `shape`.
    pub fn insert(&mut self, ty: &Type, shape: &Shape) {
        self.types.push(ty.clone());
        for member in &shape.members {
            self.members_index
                .entry(member.clone())
                .or_default()
                .push(ty.clone());
        }
        for method in &shape.methods {
            self.methods_index
                .entry(method.clone())
                .or_default()
                .push(ty.clone());
        }
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Types exposing member `name`, in registration order.
    pub fn members_for(&self, name: &str) -> &[Type] {
        self.members_index.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Types exposing method `name`, in registration order.
    pub fn methods_for(&self, name: &str) -> &[Type] {
        self.methods_index.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod registry_tests;
