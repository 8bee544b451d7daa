//! The resolver.

use crate::error::ContainerError;
use crate::matcher::{SatisfierMap, satisfy};
use crate::registry::Registry;
use crate::types::{Arguments, Instance, Type};
use fuzzyioc_analyzer::UsageRecord;
use fuzzyioc_common::limits::MAX_RESOLVE_DEPTH;
use smallvec::SmallVec;
use std::any::{Any, type_name};
use std::sync::Arc;
use tracing::{debug, debug_span};

/// Types on the active resolution path, outermost first.
type ResolveStack = SmallVec<[Type; 8]>;

/// Owns a registry and builds instances from it.
///
/// Nothing is cached between calls: every `resolve` constructs a fresh
/// dependency graph. Registration only parses and indexes; it never runs a
/// factory.
#[derive(Clone, Debug, Default)]
pub struct Container {
    registry: Registry,
}

impl Container {
    pub fn new() -> Self {
        Container::default()
    }

    /// Parse `ty`'s source, index its shape and append it to the registry.
    /// On error the registry is unchanged.
    pub fn register(&mut self, ty: &Type) -> Result<(), ContainerError> {
        let shape = ty.shape().map_err(|source| ContainerError::Analyze {
            type_name: ty.name().to_string(),
            source,
        })?;
        debug!(
            type_name = ty.name(),
            members = ?shape.members,
            methods = ?shape.methods,
            "registered type"
        );
        self.registry.insert(ty, &shape);
        Ok(())
    }

    /// Build an instance of `ty`, resolving its dependencies depth-first.
    pub fn resolve(&self, ty: &Type) -> Result<Instance, ContainerError> {
        let mut stack = ResolveStack::new();
        self.resolve_in(ty, &mut stack)
    }

    /// Like [`Container::resolve`], downcasting the instance to `T`.
    pub fn resolve_as<T: Any + Send + Sync>(&self, ty: &Type) -> Result<Arc<T>, ContainerError> {
        self.resolve(ty)?
            .downcast::<T>()
            .map_err(|_| ContainerError::InstanceType {
                type_name: ty.name().to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Registered types in registration order.
    pub fn types(&self) -> Vec<Type> {
        self.registry.types().to_vec()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// How `ty`'s constructor uses each of its parameters.
    pub fn analyze_usage(&self, ty: &Type) -> Result<UsageRecord, ContainerError> {
        ty.usage().map_err(|source| ContainerError::Analyze {
            type_name: ty.name().to_string(),
            source,
        })
    }

    /// The registered types that would satisfy each dependency of `ty`,
    /// without constructing anything.
    pub fn satisfiers(&self, ty: &Type) -> Result<SatisfierMap, ContainerError> {
        let record = self.analyze_usage(ty)?;
        satisfy(ty.name(), &record, &self.registry)
    }

    fn resolve_in(&self, ty: &Type, stack: &mut ResolveStack) -> Result<Instance, ContainerError> {
        if let Some(start) = stack.iter().position(|active| active == ty) {
            let path = stack[start..]
                .iter()
                .chain(std::iter::once(ty))
                .map(|t| t.name().to_string())
                .collect();
            return Err(ContainerError::CyclicDependency { path });
        }
        if stack.len() >= MAX_RESOLVE_DEPTH as usize {
            return Err(ContainerError::ResolutionTooDeep {
                depth: MAX_RESOLVE_DEPTH,
            });
        }

        let span = debug_span!("resolve", type_name = ty.name(), depth = stack.len());
        let _enter = span.enter();

        let record = self.analyze_usage(ty)?;
        let satisfiers = satisfy(ty.name(), &record, &self.registry)?;

        stack.push(ty.clone());
        let arguments = self.resolve_arguments(ty, &record, &satisfiers, stack);
        stack.pop();
        let arguments = arguments?;

        debug!(arguments = arguments.len(), "constructing");
        ty.construct(arguments)
            .map_err(|source| ContainerError::ConstructionFailed {
                type_name: ty.name().to_string(),
                source,
            })
    }

    fn resolve_arguments(
        &self,
        ty: &Type,
        record: &UsageRecord,
        satisfiers: &SatisfierMap,
        stack: &mut ResolveStack,
    ) -> Result<Arguments, ContainerError> {
        let mut values = Vec::with_capacity(record.len());
        for (parameter, usage) in record {
            let chosen = satisfiers.chosen(parameter).ok_or_else(|| {
                ContainerError::UnsatisfiedDependency {
                    type_name: ty.name().to_string(),
                    dependency: parameter.clone(),
                    methods: usage.methods.clone(),
                    members: usage.members.clone(),
                }
            })?;
            values.push(self.resolve_in(chosen, stack)?);
        }
        Ok(Arguments::new(values))
    }
}

#[cfg(test)]
#[path = "tests/container_tests.rs"]
mod container_tests;
