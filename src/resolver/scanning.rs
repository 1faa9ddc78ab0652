use alloc::vec::Vec;
use tracing::{debug, debug_span};

use super::Resolver;
use crate::{
    any::TypeInfo,
    component::{Component, Instance},
};

/// Discovers the components carrying the injectable-component marker under the given roots.
///
/// The order of the returned components is the order the [`ScanningResolver`] tries them in.
pub trait ComponentScan {
    #[must_use]
    fn scan(&self, roots: &[&str]) -> Vec<Component>;
}

impl<F> ComponentScan for F
where
    F: Fn(&[&str]) -> Vec<Component>,
{
    #[inline]
    fn scan(&self, roots: &[&str]) -> Vec<Component> {
        self(roots)
    }
}

/// Resolver over a set of discovered components.
///
/// A requested type is provided by the component of that very type if there is one,
/// otherwise by the first component assignable to it, in discovery order.
/// A candidate that fails to construct is skipped in favour of the next one.
#[derive(Clone, Default)]
pub struct ScanningResolver {
    components: Vec<Component>,
}

impl ScanningResolver {
    #[inline]
    #[must_use]
    pub fn builder<'a>() -> ScanningResolverBuilder<'a> {
        ScanningResolverBuilder::new()
    }

    #[inline]
    #[must_use]
    pub fn from_components(components: impl IntoIterator<Item = Component>) -> Self {
        Self {
            components: components.into_iter().collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

impl Resolver for ScanningResolver {
    fn resolve(&self, type_info: &TypeInfo) -> Option<Instance> {
        let span = debug_span!("scanning_resolve", dependency = type_info.short_name());
        let _guard = span.enter();

        if let Some(component) = self.components.iter().find(|component| component.type_info() == *type_info) {
            debug!("Found component of the type");
            if let Some(instance) = component.instance(type_info) {
                return Some(instance);
            }
        }

        let instance = self
            .components
            .iter()
            .filter(|component| component.type_info() != *type_info && component.is_assignable_to(type_info))
            .find_map(|component| {
                debug!(implementation = component.type_info().short_name(), "Found assignable component");
                component.instance(type_info)
            });
        if instance.is_none() {
            debug!("No component found");
        }
        instance
    }
}

#[derive(Default)]
pub struct ScanningResolverBuilder<'a> {
    roots: Vec<&'a str>,
}

impl<'a> ScanningResolverBuilder<'a> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the roots to scan, replacing the previous ones
    #[inline]
    #[must_use]
    pub fn scan(mut self, roots: &[&'a str]) -> Self {
        self.roots = roots.to_vec();
        self
    }

    #[must_use]
    pub fn build_with<S: ComponentScan + ?Sized>(self, scanner: &S) -> ScanningResolver {
        let components = scanner.scan(&self.roots);
        debug!(roots = ?self.roots, count = components.len(), "Components scanned");

        ScanningResolver { components }
    }

    /// Builds the resolver over the components linked into the binary
    #[cfg(feature = "scan")]
    #[inline]
    #[must_use]
    pub fn build(self) -> ScanningResolver {
        self.build_with(&crate::scan::LinkedComponents)
    }
}
