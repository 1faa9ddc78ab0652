use alloc::collections::BTreeMap;
use tracing::{debug, debug_span, error};

use super::Resolver;
use crate::{
    any::TypeInfo,
    component::{Component, Instance},
    errors::RegisterErrorKind,
    injectable::Injectable,
    instantiator::Instantiator,
};

#[derive(Clone)]
enum MappingEntry {
    /// The type constructs itself
    SelfType(Component),
    /// The type is provided by another, concrete type
    Implementation(Component),
    /// The type is provided by a factory, called on every resolve
    Factory(Component),
}

impl MappingEntry {
    const fn kind(&self) -> &'static str {
        match self {
            MappingEntry::SelfType(_) => "self",
            MappingEntry::Implementation(_) => "implementation",
            MappingEntry::Factory(_) => "factory",
        }
    }

    const fn component(&self) -> &Component {
        match self {
            MappingEntry::SelfType(component) | MappingEntry::Implementation(component) | MappingEntry::Factory(component) => component,
        }
    }
}

/// Resolver with an explicit table of type to implementation or factory.
///
/// The table is filled by [`MappingResolverBuilder`] and never changes afterwards.
#[derive(Clone, Default)]
pub struct MappingResolver {
    entries: BTreeMap<TypeInfo, MappingEntry>,
}

impl MappingResolver {
    #[inline]
    #[must_use]
    pub fn builder() -> MappingResolverBuilder {
        MappingResolverBuilder::new()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, type_info: &TypeInfo) -> bool {
        self.entries.contains_key(type_info)
    }
}

impl Resolver for MappingResolver {
    fn resolve(&self, type_info: &TypeInfo) -> Option<Instance> {
        let span = debug_span!("mapping_resolve", dependency = type_info.short_name());
        let _guard = span.enter();

        let Some(entry) = self.entries.get(type_info) else {
            debug!("Not mapped");
            return None;
        };
        debug!(kind = entry.kind(), implementation = entry.component().type_info().short_name(), "Mapped");

        entry.component().instance(type_info)
    }
}

#[derive(Default)]
pub struct MappingResolverBuilder {
    entries: BTreeMap<TypeInfo, MappingEntry>,
}

impl MappingResolverBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps the component's type to a new instance of itself
    ///
    /// # Errors
    /// Returns [`RegisterErrorKind::NonInstantiable`] if the component is abstract
    pub fn register(mut self, component: Component) -> Result<Self, RegisterErrorKind> {
        check_instantiable(&component)?;

        self.entries.insert(component.type_info(), MappingEntry::SelfType(component));
        Ok(self)
    }

    /// Maps `I` to a new instance of the component
    ///
    /// # Errors
    /// - Returns [`RegisterErrorKind::NonInstantiable`] if the component is abstract
    /// - Returns [`RegisterErrorKind::NotAssignable`] if the component can't be provided as `I`
    pub fn register_as<I>(mut self, component: Component) -> Result<Self, RegisterErrorKind>
    where
        I: ?Sized + 'static,
    {
        check_instantiable(&component)?;
        let interface = check_assignable::<I>(&component)?;

        self.entries.insert(interface, MappingEntry::Implementation(component));
        Ok(self)
    }

    /// Maps `T` to a new instance of itself
    #[inline]
    #[must_use]
    pub fn register_type<T: Injectable>(mut self) -> Self {
        self.entries.insert(TypeInfo::of::<T>(), MappingEntry::SelfType(Component::of::<T>()));
        self
    }

    /// Maps `I` to a new instance of `T`
    ///
    /// # Errors
    /// Returns [`RegisterErrorKind::NotAssignable`] if `T` doesn't declare `I` in [`Injectable::interfaces`]
    /// and isn't `I` itself
    #[inline]
    pub fn register_impl<I, T>(self) -> Result<Self, RegisterErrorKind>
    where
        I: ?Sized + 'static,
        T: Injectable,
    {
        self.register_as::<I>(Component::of::<T>())
    }

    /// Maps `I` to whatever the factory produces, calling it on every resolve
    ///
    /// # Errors
    /// Returns [`RegisterErrorKind::NotAssignable`] if the produced type doesn't declare `I`
    /// in [`Injectable::interfaces`] and isn't `I` itself
    pub fn register_factory<I, Inst>(mut self, instantiator: Inst) -> Result<Self, RegisterErrorKind>
    where
        I: ?Sized + 'static,
        Inst: Instantiator,
    {
        let component = Component::from_instantiator(instantiator);
        let interface = check_assignable::<I>(&component)?;

        self.entries.insert(interface, MappingEntry::Factory(component));
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub fn build(self) -> MappingResolver {
        MappingResolver { entries: self.entries }
    }
}

fn check_assignable<I: ?Sized + 'static>(component: &Component) -> Result<TypeInfo, RegisterErrorKind> {
    let interface = TypeInfo::of::<I>();
    if component.is_assignable_to(&interface) {
        return Ok(interface);
    }

    let err = RegisterErrorKind::NotAssignable {
        implementation: component.type_info(),
        interface,
    };
    error!("{}", err);
    Err(err)
}

fn check_instantiable(component: &Component) -> Result<(), RegisterErrorKind> {
    if component.is_instantiable() {
        return Ok(());
    }

    let err = RegisterErrorKind::NonInstantiable {
        type_info: component.type_info(),
    };
    error!("{}", err);
    Err(err)
}
