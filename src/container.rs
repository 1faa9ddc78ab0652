use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::any::Any;
use tracing::{debug, debug_span, error, info_span, warn};

use crate::{
    any::TypeInfo,
    component::Instance,
    config::{CircularDependencyStrategy, Configuration, NoDependencyFoundStrategy, NonAccessibleFieldStrategy},
    errors::ResolveErrorKind,
    resolver::Resolver,
};

/// Types currently being resolved along the active call chain, innermost last
struct ResolutionPath(Vec<TypeInfo>);

impl ResolutionPath {
    #[inline]
    const fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    fn contains(&self, type_info: &TypeInfo) -> bool {
        self.0.contains(type_info)
    }

    #[inline]
    fn push(&mut self, type_info: TypeInfo) {
        self.0.push(type_info);
    }

    #[inline]
    fn pop(&mut self) {
        self.0.pop();
    }

    #[inline]
    fn innermost(&self) -> Option<TypeInfo> {
        self.0.last().copied()
    }

    #[inline]
    fn depth(&self) -> usize {
        self.0.len()
    }
}

/// IoC container.
///
/// Resolves a requested type with the first resolver that answers for it,
/// then recursively resolves and injects the injectable fields of the produced instance.
/// Nothing is cached between calls: every call builds a new object graph.
///
/// The container is a cheap handle, clones share the same resolvers and configuration.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    configuration: Configuration,
    resolvers: Box<[Box<dyn Resolver>]>,
}

impl Container {
    #[inline]
    #[must_use]
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Creates container with the default configuration.
    /// Resolvers are queried in the given order.
    #[inline]
    #[must_use]
    pub fn new(resolvers: impl IntoIterator<Item = Box<dyn Resolver>>) -> Self {
        Self::with_configuration(Configuration::default(), resolvers)
    }

    /// Creates container with the configuration.
    /// Resolvers are queried in the given order.
    #[inline]
    #[must_use]
    pub fn with_configuration(configuration: Configuration, resolvers: impl IntoIterator<Item = Box<dyn Resolver>>) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                configuration,
                resolvers: resolvers.into_iter().collect(),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn configuration(&self) -> Configuration {
        self.inner.configuration
    }

    /// Resolves `Dep` with its injectable fields wired.
    ///
    /// Returns `Ok(None)` if nothing provides `Dep` and
    /// [`NoDependencyFoundStrategy::ReturnAbsent`] is configured.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::NoDependencyResolved`] if nothing provides `Dep` or one of the dependencies
    ///   and [`NoDependencyFoundStrategy::Fail`] is configured
    /// - Returns [`ResolveErrorKind::CircularDependencyDetected`] on a circular dependency
    ///   if [`CircularDependencyStrategy::Fail`] is configured
    /// - Returns [`ResolveErrorKind::NonAccessibleField`] if a field refuses the injected value
    ///   and [`NonAccessibleFieldStrategy::Fail`] is configured
    pub fn resolve<Dep: ?Sized + 'static>(&self) -> Result<Option<Box<Dep>>, ResolveErrorKind> {
        let type_info = TypeInfo::of::<Dep>();

        let Some(dependency) = self.resolve_type(&type_info)? else {
            return Ok(None);
        };
        match dependency.downcast::<Box<Dep>>() {
            Ok(dependency) => Ok(Some(*dependency)),
            Err(_) => {
                warn!("Resolved value isn't a `Box<{}>`", type_info);
                self.absent(&type_info)
            }
        }
    }

    /// Erased version of [`Self::resolve`], the returned box holds a `Box<Dep>`
    ///
    /// # Errors
    /// Same as [`Self::resolve`]
    pub fn resolve_type(&self, type_info: &TypeInfo) -> Result<Option<Box<dyn Any>>, ResolveErrorKind> {
        let span = info_span!("resolve", dependency = type_info.name);
        let _guard = span.enter();

        let mut path = ResolutionPath::new();
        self.resolve_internal(type_info, &mut path)
    }
}

impl Container {
    fn resolve_internal(&self, type_info: &TypeInfo, path: &mut ResolutionPath) -> Result<Option<Box<dyn Any>>, ResolveErrorKind> {
        let span = debug_span!("resolve_internal", dependency = type_info.short_name(), depth = path.depth());
        let _guard = span.enter();

        let configuration = &self.inner.configuration;

        let Some(mut instance) = self.find_instance(type_info) else {
            return self.absent(type_info);
        };

        path.push(*type_info);

        for field in instance.fields().iter() {
            let field_info = field.info;

            if path.contains(&field_info.type_info) {
                match configuration.circular_dependency_strategy() {
                    CircularDependencyStrategy::Skip => {
                        warn!(field = %field_info, "Circular dependency, field skipped");
                        continue;
                    }
                    CircularDependencyStrategy::Fail => {
                        let err = ResolveErrorKind::CircularDependencyDetected {
                            type_info: path.innermost().unwrap_or(*type_info),
                        };
                        error!("{}", err);
                        return Err(err);
                    }
                }
            }

            let value = self.resolve_internal(&field_info.type_info, path)?;

            if field.assign(instance.value_mut(), value).is_ok() {
                debug!(field = %field_info, "Field injected");
                continue;
            }
            match configuration.non_accessible_field_strategy() {
                NonAccessibleFieldStrategy::Skip => {
                    warn!(field = %field_info, "Field isn't accessible, skipped");
                }
                NonAccessibleFieldStrategy::Fail => {
                    let err = ResolveErrorKind::NonAccessibleField { field: field_info };
                    error!("{}", err);
                    return Err(err);
                }
            }
        }

        path.pop();

        let implementation = instance.type_info();
        match instance.into_provided() {
            Some(dependency) => {
                debug!("Resolved");
                Ok(Some(dependency))
            }
            None => {
                warn!("Instance of {} can't be provided as {}", implementation, type_info);
                self.absent(type_info)
            }
        }
    }

    /// Asks the resolvers in order, the first one that answers wins.
    /// An instance provided as another type isn't an answer.
    fn find_instance(&self, type_info: &TypeInfo) -> Option<Instance> {
        self.inner.resolvers.iter().enumerate().find_map(|(index, resolver)| {
            let instance = resolver.resolve(type_info)?;
            if instance.provides() != *type_info {
                warn!(
                    resolver = index,
                    "Resolver provided {} instead of {}, ignored",
                    instance.provides(),
                    type_info
                );
                return None;
            }
            debug!(resolver = index, implementation = instance.type_info().short_name(), "Resolved by resolver");
            Some(instance)
        })
    }

    fn absent<T>(&self, type_info: &TypeInfo) -> Result<Option<T>, ResolveErrorKind> {
        match self.inner.configuration.no_dependency_found_strategy() {
            NoDependencyFoundStrategy::ReturnAbsent => {
                debug!("No resolver answered, absent");
                Ok(None)
            }
            NoDependencyFoundStrategy::Fail => {
                let err = ResolveErrorKind::NoDependencyResolved { type_info: *type_info };
                error!("{}", err);
                Err(err)
            }
        }
    }
}

#[derive(Default)]
pub struct ContainerBuilder {
    configuration: Configuration,
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ContainerBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Appends a resolver, it's queried after the ones added before it
    #[inline]
    #[must_use]
    pub fn resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    #[inline]
    #[must_use]
    pub fn build(self) -> Container {
        Container::with_configuration(self.configuration, self.resolvers)
    }
}
