//! Registrable types and the construction boundary.

use crate::error::FactoryError;
use fuzzyioc_analyzer::{AnalyzeError, Shape, UsageRecord, analyze_usage, extract_parameters, shape_of};
use fuzzyioc_parser::{ParseError, SourceTree};
use once_cell::sync::OnceCell;
use smallvec::SmallVec;
use std::any::{Any, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A constructed object.
pub type Instance = Arc<dyn Any + Send + Sync>;

type FactoryFn = dyn Fn(Arguments) -> Result<Instance, FactoryError> + Send + Sync;

/// Resolved dependency instances, in the constructor's parameter order.
#[derive(Clone, Default)]
pub struct Arguments {
    values: SmallVec<[Instance; 4]>,
}

impl Arguments {
    pub fn new(values: impl IntoIterator<Item = Instance>) -> Self {
        Arguments {
            values: values.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The untyped instance at `index`.
    pub fn instance(&self, index: usize) -> Result<&Instance, FactoryError> {
        self.values
            .get(index)
            .ok_or(FactoryError::MissingArgument { index })
    }

    /// The instance at `index`, downcast to `T`.
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, FactoryError> {
        Arc::clone(self.instance(index)?)
            .downcast::<T>()
            .map_err(|_| FactoryError::ArgumentType {
                index,
                expected: type_name::<T>(),
            })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.values.iter()
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("len", &self.values.len())
            .finish()
    }
}

struct TypeInner {
    name: String,
    source: String,
    factory: Box<FactoryFn>,
    /// Parsed once, on first use.
    tree: OnceCell<Result<SourceTree, ParseError>>,
}

/// A constructible definition: a name, the constructor source the analyzer
/// reads, and the factory that builds instances.
///
/// Clones share identity. Two `Type`s are equal only if one is a clone of
/// the other, even when name and source match.
#[derive(Clone)]
pub struct Type {
    inner: Arc<TypeInner>,
}

impl Type {
    pub fn new<F>(name: impl Into<String>, source: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Arguments) -> Result<Instance, FactoryError> + Send + Sync + 'static,
    {
        Type {
            inner: Arc::new(TypeInner {
                name: name.into(),
                source: source.into(),
                factory: Box::new(factory),
                tree: OnceCell::new(),
            }),
        }
    }

    /// A type whose factory ignores its arguments and hands out the same
    /// shared value every time.
    pub fn from_value<T: Any + Send + Sync>(
        name: impl Into<String>,
        source: impl Into<String>,
        value: T,
    ) -> Self {
        let value: Instance = Arc::new(value);
        Type::new(name, source, move |_| Ok(Arc::clone(&value)))
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn source(&self) -> &str {
        &self.inner.source
    }

    /// The parsed source, named after the type in diagnostics.
    pub fn tree(&self) -> Result<&SourceTree, ParseError> {
        self.inner
            .tree
            .get_or_init(|| SourceTree::parse(self.inner.name.clone(), self.inner.source.clone()))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn parameters(&self) -> Result<Vec<String>, AnalyzeError> {
        extract_parameters(self.tree()?)
    }

    pub fn usage(&self) -> Result<UsageRecord, AnalyzeError> {
        analyze_usage(self.tree()?)
    }

    pub fn shape(&self) -> Result<Shape, AnalyzeError> {
        Ok(shape_of(self.tree()?))
    }

    pub(crate) fn construct(&self, arguments: Arguments) -> Result<Instance, FactoryError> {
        (self.inner.factory)(arguments)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Type").field(&self.inner.name).finish()
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod types_tests;
