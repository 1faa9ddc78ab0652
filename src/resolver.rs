mod mapping;
mod scanning;

use alloc::{boxed::Box, sync::Arc};

use crate::{any::TypeInfo, component::Instance};

pub use mapping::{MappingResolver, MappingResolverBuilder};
pub use scanning::{ComponentScan, ScanningResolver, ScanningResolverBuilder};

/// Looks up or constructs an instance for a requested type.
///
/// A resolver only constructs, it never injects fields: that's the container's job.
/// It answers `None` if it can't provide the type, including when a construction attempt fails.
pub trait Resolver: Send + Sync {
    fn resolve(&self, type_info: &TypeInfo) -> Option<Instance>;
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    #[inline]
    fn resolve(&self, type_info: &TypeInfo) -> Option<Instance> {
        (**self).resolve(type_info)
    }
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    #[inline]
    fn resolve(&self, type_info: &TypeInfo) -> Option<Instance> {
        (**self).resolve(type_info)
    }
}

#[inline]
#[must_use]
pub const fn resolver_fn<F>(f: F) -> ResolverFn<F>
where
    F: Fn(&TypeInfo) -> Option<Instance> + Send + Sync,
{
    ResolverFn { f }
}

/// Resolver backed by a closure, see [`resolver_fn`]
#[derive(Clone)]
pub struct ResolverFn<F> {
    f: F,
}

impl<F> Resolver for ResolverFn<F>
where
    F: Fn(&TypeInfo) -> Option<Instance> + Send + Sync,
{
    #[inline]
    fn resolve(&self, type_info: &TypeInfo) -> Option<Instance> {
        (self.f)(type_info)
    }
}
