#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub(crate) mod any;
pub(crate) mod component;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod field;
pub(crate) mod injectable;
pub(crate) mod instantiator;
pub(crate) mod resolver;

pub mod holder;

#[cfg(feature = "scan")]
pub mod scan;

#[doc(hidden)]
pub mod __private {
    pub use alloc::{boxed::Box, vec, vec::Vec};
}

pub use any::TypeInfo;
pub use component::{Component, Instance};
pub use config::{CircularDependencyStrategy, Configuration, ConfigurationBuilder, NoDependencyFoundStrategy, NonAccessibleFieldStrategy};
pub use container::{Container, ContainerBuilder};
pub use errors::{DependencyResolutionError, InstantiateErrorKind, RegisterErrorKind, ResolveErrorKind};
pub use field::{Field, FieldInfo};
pub use injectable::{Injectable, Interface};
pub use instantiator::Instantiator;
pub use resolver::{
    resolver_fn, ComponentScan, MappingResolver, MappingResolverBuilder, Resolver, ResolverFn, ScanningResolver,
    ScanningResolverBuilder,
};

#[cfg(feature = "macros")]
pub use wireup_macros::Injectable;
