//! Structural dependency injection.
//!
//! A [`Type`] is a constructor source plus a factory. Registering a type
//! indexes the members and methods its source assigns to `this`; resolving a
//! type reads how its constructor uses each parameter and picks, per
//! parameter, the first registered type whose shape covers that usage.
//!
//! ```
//! use fuzzyioc_container::{Container, Instance, Type};
//! use std::sync::Arc;
//!
//! struct Greeter;
//! struct Page(Arc<Greeter>);
//!
//! let greeter = Type::from_value(
//!     "Greeter",
//!     "function Greeter() { this.greet = function () {}; }",
//!     Greeter,
//! );
//! let page = Type::new(
//!     "Page",
//!     "function Page(g) { g.greet(); }",
//!     |args| Ok(Arc::new(Page(args.get::<Greeter>(0)?)) as Instance),
//! );
//!
//! let mut container = Container::new();
//! container.register(&greeter)?;
//! let _page: Arc<Page> = container.resolve_as(&page)?;
//! # Ok::<(), fuzzyioc_container::ContainerError>(())
//! ```

pub mod container;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod types;

pub use container::Container;
pub use error::{ContainerError, FactoryError};
pub use matcher::{SatisfierMap, candidates, satisfy};
pub use registry::Registry;
pub use types::{Arguments, Instance, Type};
