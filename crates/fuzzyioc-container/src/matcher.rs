//! Matching usage records against registered shapes.

use crate::error::ContainerError;
use crate::registry::Registry;
use crate::types::Type;
use fuzzyioc_analyzer::{Usage, UsageRecord};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

/// Satisfying types per dependency, in parameter order. The first type of
/// each list is the one the container builds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SatisfierMap {
    entries: IndexMap<String, Vec<Type>>,
}

impl SatisfierMap {
    /// Every type satisfying `dependency`, best first.
    pub fn get(&self, dependency: &str) -> Option<&[Type]> {
        self.entries.get(dependency).map(Vec::as_slice)
    }

    /// The designated satisfier of `dependency`.
    pub fn chosen(&self, dependency: &str) -> Option<&Type> {
        self.get(dependency).and_then(<[Type]>::first)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Vec<Type>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Registered types whose shape covers `usage`, in index order.
///
/// Method lookups and member lookups are each the concatenation of the index
/// lists for every requested name. When both kinds are requested a type must
/// appear in both; the result keeps method order and its repeats. A usage
/// with nothing requested matches nothing.
pub fn candidates(usage: &Usage, registry: &Registry) -> Vec<Type> {
    let method_candidates = usage
        .methods
        .iter()
        .flat_map(|name| registry.methods_for(name));
    let member_candidates = usage
        .members
        .iter()
        .flat_map(|name| registry.members_for(name));

    match (usage.methods.is_empty(), usage.members.is_empty()) {
        (false, false) => {
            let members: FxHashSet<&Type> = member_candidates.collect();
            method_candidates
                .filter(|ty| members.contains(ty))
                .cloned()
                .collect()
        }
        (false, true) => method_candidates.cloned().collect(),
        (true, false) => member_candidates.cloned().collect(),
        (true, true) => Vec::new(),
    }
}

/// Find satisfiers for every dependency of `type_name`. Fails on the first
/// dependency, in parameter order, that nothing satisfies.
pub fn satisfy(
    type_name: &str,
    record: &UsageRecord,
    registry: &Registry,
) -> Result<SatisfierMap, ContainerError> {
    let mut map = SatisfierMap::default();
    for (dependency, usage) in record {
        let found = candidates(usage, registry);
        if found.is_empty() {
            return Err(ContainerError::UnsatisfiedDependency {
                type_name: type_name.to_string(),
                dependency: dependency.clone(),
                methods: usage.methods.clone(),
                members: usage.members.clone(),
            });
        }
        debug!(
            type_name,
            dependency = dependency.as_str(),
            chosen = found[0].name(),
            candidates = found.len(),
            "dependency satisfied"
        );
        for other in &found[1..] {
            trace!(dependency = dependency.as_str(), candidate = other.name(), "passed over");
        }
        map.entries.insert(dependency.clone(), found);
    }
    Ok(map)
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod matcher_tests;
