//! Per-parameter usage records.
//!
//! The parameters of the first function in a source are its dependencies.
//! Every `dep.name` access anywhere in the source is attributed to `dep`:
//! as a method when the access is called (`dep.name()`), as a member
//! otherwise. `this.alias = dep` makes `this.alias.name` count for `dep` too.

use crate::ANONYMOUS_SOURCE;
use crate::error::AnalyzeError;
use crate::self_state::{is_callee, property_access, self_state_name};
use fuzzyioc_parser::{NodeArena, NodeIndex, SourceTree, syntax_kind_ext, walk};
use fuzzyioc_scanner::SyntaxKind;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::ops::Index;
use tracing::{debug, trace};

/// Names accessed on one dependency, in discovery order. Repeated accesses
/// are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Usage {
    pub members: Vec<String>,
    pub methods: Vec<String>,
}

impl Usage {
    /// No member read and no method call was observed.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.methods.is_empty()
    }
}

/// Usage of every constructor parameter, in declaration order.
///
/// Serializes as `{"dep": {"members": [...], "methods": [...]}, ...}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UsageRecord {
    entries: IndexMap<String, Usage>,
}

impl UsageRecord {
    fn with_parameters(parameters: &[String]) -> Self {
        UsageRecord {
            entries: parameters
                .iter()
                .map(|name| (name.clone(), Usage::default()))
                .collect(),
        }
    }

    pub fn get(&self, parameter: &str) -> Option<&Usage> {
        self.entries.get(parameter)
    }

    /// Parameter names in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Usage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for UsageRecord {
    type Output = Usage;

    /// Panics if `parameter` is not a parameter of the analyzed function.
    fn index(&self, parameter: &str) -> &Usage {
        &self.entries[parameter]
    }
}

impl<'a> IntoIterator for &'a UsageRecord {
    type Item = (&'a String, &'a Usage);
    type IntoIter = indexmap::map::Iter<'a, String, Usage>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Self-state aliases of dependencies: `this.alias = dep` maps `alias` to
/// `dep`. Only one level is tracked; `this.a = this.b` is not an alias.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: FxHashMap<String, String>,
}

impl AliasTable {
    /// The parameter `alias` stands for.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// The outermost function of a source and its parameter names.
struct Callable {
    index: NodeIndex,
    parameters: Vec<String>,
}

impl Callable {
    fn find(tree: &SourceTree) -> Result<Callable, AnalyzeError> {
        let arena = tree.arena();
        let index = walk::first_function_like(arena, tree.root()).ok_or_else(|| {
            AnalyzeError::NoCallableFound {
                file_name: tree.file_name().to_string(),
            }
        })?;

        let parameters: Vec<String> = arena
            .parameter_names(index)
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut seen = FxHashSet::default();
        for name in &parameters {
            if !seen.insert(name.as_str()) {
                return Err(AnalyzeError::DuplicateParameter {
                    file_name: tree.file_name().to_string(),
                    name: name.clone(),
                });
            }
        }

        Ok(Callable { index, parameters })
    }

    fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.as_str() == name)
            .map(String::as_str)
    }

    /// Resolve an identifier reference to one of this function's parameters.
    /// References inside a nested function that declares a parameter of the
    /// same name belong to that nested parameter.
    fn resolve_reference(&self, arena: &NodeArena, reference: NodeIndex) -> Option<&str> {
        let node = arena.get(reference)?;
        if !node.is_identifier() {
            return None;
        }
        let name = arena.identifier_text(reference)?;
        let parameter = self.parameter(name)?;
        let shadowed = arena
            .ancestors(reference)
            .filter(|&ancestor| ancestor != self.index)
            .any(|ancestor| {
                arena.get(ancestor).is_some_and(|n| n.is_function_like())
                    && arena.parameter_names(ancestor).contains(&name)
            });
        if shadowed { None } else { Some(parameter) }
    }
}

/// Parameter names of the first function-like node in `tree`.
pub fn extract_parameters(tree: &SourceTree) -> Result<Vec<String>, AnalyzeError> {
    Callable::find(tree).map(|callable| callable.parameters)
}

pub fn extract_parameters_source(source: &str) -> Result<Vec<String>, AnalyzeError> {
    let tree = SourceTree::parse(ANONYMOUS_SOURCE, source)?;
    extract_parameters(&tree)
}

/// Collect the self-state aliases of the first function's parameters.
pub fn alias_table(tree: &SourceTree) -> Result<AliasTable, AnalyzeError> {
    let callable = Callable::find(tree)?;
    Ok(collect_aliases(tree.arena(), tree.root(), &callable))
}

fn collect_aliases(arena: &NodeArena, root: NodeIndex, callable: &Callable) -> AliasTable {
    let mut table = AliasTable::default();
    walk::for_each_preorder(arena, root, |_, node| {
        if node.kind != syntax_kind_ext::BINARY_EXPRESSION {
            return;
        }
        let Some(binary) = arena.get_binary_expr(node) else {
            return;
        };
        if binary.operator_token != SyntaxKind::EqualsToken as u16 {
            return;
        }
        let Some(alias) = self_state_name(arena, binary.left) else {
            return;
        };
        if let Some(parameter) = callable.resolve_reference(arena, binary.right) {
            trace!(alias, parameter, "self-state alias");
            table
                .aliases
                .insert(alias.to_string(), parameter.to_string());
        }
    });
    table
}

/// The dependency an accessed object stands for: a parameter itself or a
/// self-state alias of one.
fn dependency_of<'a>(
    arena: &NodeArena,
    object: NodeIndex,
    callable: &'a Callable,
    aliases: &'a AliasTable,
) -> Option<&'a str> {
    if let Some(parameter) = callable.resolve_reference(arena, object) {
        return Some(parameter);
    }
    let alias = self_state_name(arena, object)?;
    aliases.get(alias)
}

/// Build the usage record of the first function in `tree`.
pub fn analyze_usage(tree: &SourceTree) -> Result<UsageRecord, AnalyzeError> {
    let arena = tree.arena();
    let callable = Callable::find(tree)?;
    let aliases = collect_aliases(arena, tree.root(), &callable);
    debug!(
        file = tree.file_name(),
        parameters = ?callable.parameters,
        aliases = ?aliases.aliases,
        "analyzing usage"
    );

    let mut record = UsageRecord::with_parameters(&callable.parameters);
    walk::for_each_preorder(arena, tree.root(), |idx, _| {
        let Some((object, name)) = property_access(arena, idx) else {
            return;
        };
        let Some(parameter) = dependency_of(arena, object, &callable, &aliases) else {
            return;
        };
        let Some(usage) = record.entries.get_mut(parameter) else {
            return;
        };
        if is_callee(arena, idx) {
            trace!(parameter, method = name, "method call");
            usage.methods.push(name.to_string());
        } else {
            trace!(parameter, member = name, "member read");
            usage.members.push(name.to_string());
        }
    });

    debug!(file = tree.file_name(), record = ?record, "usage analyzed");
    Ok(record)
}

pub fn analyze_usage_source(source: &str) -> Result<UsageRecord, AnalyzeError> {
    let tree = SourceTree::parse(ANONYMOUS_SOURCE, source)?;
    analyze_usage(&tree)
}

#[cfg(test)]
#[path = "tests/usage_tests.rs"]
mod usage_tests;
