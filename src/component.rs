use alloc::{boxed::Box, collections::BTreeMap, sync::Arc, vec::Vec};
use core::{
    any::Any,
    fmt::{self, Debug, Formatter},
};
use tracing::{debug, warn};

use crate::{
    any::TypeInfo,
    field::FieldDescriptor,
    injectable::{identity_cast, Cast, Injectable},
    instantiator::{boxed_instantiator, injectable_instantiator, BoxedInstantiator, Instantiator},
};

#[derive(Clone)]
struct Concrete {
    instantiator: BoxedInstantiator,
    fields: Arc<[FieldDescriptor]>,
    casts: BTreeMap<TypeInfo, Cast>,
}

/// Erased description of a type the resolvers can construct.
///
/// A component is either concrete ([`Component::of`]), carrying a constructor,
/// the injectable fields and the types it's assignable to,
/// or abstract ([`Component::abstract_of`]), describing an interface that can't be constructed.
#[derive(Clone)]
pub struct Component {
    type_info: TypeInfo,
    concrete: Option<Concrete>,
}

impl Debug for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type_info", &self.type_info)
            .field("instantiable", &self.is_instantiable())
            .finish_non_exhaustive()
    }
}

impl Component {
    /// Component constructed with [`Injectable::instantiate`]
    #[must_use]
    pub fn of<T: Injectable>() -> Self {
        Self::with_instantiator::<T>(injectable_instantiator::<T>())
    }

    /// Component constructed with the given factory instead of [`Injectable::instantiate`]
    #[must_use]
    pub fn from_instantiator<Inst: Instantiator>(instantiator: Inst) -> Self {
        Self::with_instantiator::<Inst::Provides>(boxed_instantiator(instantiator))
    }

    /// Component that can't be constructed, like a trait object
    #[must_use]
    pub fn abstract_of<T: ?Sized + 'static>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            concrete: None,
        }
    }

    fn with_instantiator<T: Injectable>(instantiator: BoxedInstantiator) -> Self {
        let type_info = TypeInfo::of::<T>();
        let fields = T::fields().into_iter().map(|field| field.descriptor).collect::<Vec<_>>();

        let mut casts = BTreeMap::new();
        casts.insert(type_info, identity_cast::<T>());
        for interface in T::interfaces() {
            casts.insert(interface.type_info, interface.cast);
        }

        Self {
            type_info,
            concrete: Some(Concrete {
                instantiator,
                fields: fields.into(),
                casts,
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    #[must_use]
    pub fn is_instantiable(&self) -> bool {
        self.concrete.is_some()
    }

    /// Checks if an instance of this component can be provided as `type_info`
    #[must_use]
    pub fn is_assignable_to(&self, type_info: &TypeInfo) -> bool {
        self.concrete.as_ref().is_some_and(|concrete| concrete.casts.contains_key(type_info))
    }

    /// Constructs a new instance provided as `requested`.
    ///
    /// Construction failures are logged and reported as `None`,
    /// same as an abstract component or a `requested` type it isn't assignable to.
    #[must_use]
    pub fn instance(&self, requested: &TypeInfo) -> Option<Instance> {
        let Some(Concrete {
            instantiator,
            fields,
            casts,
        }) = &self.concrete
        else {
            warn!(
                "Can't create a new instance of type {} with implementation {}, it's abstract",
                requested, self.type_info
            );
            return None;
        };
        let Some(cast) = casts.get(requested) else {
            warn!("Type {} isn't assignable to {}", self.type_info, requested);
            return None;
        };

        match instantiator() {
            Ok(value) => {
                debug!(implementation = self.type_info.short_name(), "Instance created");
                Some(Instance {
                    type_info: self.type_info,
                    provides: *requested,
                    value,
                    fields: fields.clone(),
                    cast: cast.clone(),
                })
            }
            Err(err) => {
                warn!(
                    "Can't create a new instance of type {} with implementation {}: {}",
                    requested, self.type_info, err
                );
                None
            }
        }
    }
}

/// A constructed object on its way through the container.
///
/// Holds the concrete value, which the container injects fields into,
/// and converts into the requested type once injection is done.
pub struct Instance {
    type_info: TypeInfo,
    provides: TypeInfo,
    value: Box<dyn Any>,
    fields: Arc<[FieldDescriptor]>,
    cast: Cast,
}

impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_info", &self.type_info)
            .field("provides", &self.provides)
            .finish_non_exhaustive()
    }
}

impl Instance {
    /// Wraps an already constructed value, provided as its own type
    #[must_use]
    pub fn of<T: Injectable>(value: T) -> Self {
        let type_info = TypeInfo::of::<T>();
        Self {
            type_info,
            provides: type_info,
            value: Box::new(value),
            fields: T::fields().into_iter().map(|field| field.descriptor).collect::<Vec<_>>().into(),
            cast: identity_cast::<T>(),
        }
    }

    /// Concrete type of the value
    #[inline]
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// Type the value is provided as
    #[inline]
    #[must_use]
    pub fn provides(&self) -> TypeInfo {
        self.provides
    }

    #[inline]
    #[must_use]
    pub(crate) fn fields(&self) -> Arc<[FieldDescriptor]> {
        self.fields.clone()
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut dyn Any {
        &mut *self.value
    }

    /// Converts into an erased `Box<Provides>`
    #[inline]
    pub(crate) fn into_provided(self) -> Option<Box<dyn Any>> {
        (self.cast)(self.value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{Component, Instance};
    use crate::{any::TypeInfo, errors::InstantiateErrorKind, injectable::Interface, Injectable};

    use alloc::{boxed::Box, vec, vec::Vec};
    use tracing_test::traced_test;

    trait Service {
        fn name(&self) -> &'static str;
    }

    trait OtherService {}

    struct ServiceImpl;

    impl Service for ServiceImpl {
        fn name(&self) -> &'static str {
            "ServiceImpl"
        }
    }

    impl Injectable for ServiceImpl {
        fn instantiate() -> Result<Self, InstantiateErrorKind> {
            Ok(Self)
        }

        fn interfaces() -> Vec<Interface<Self>> {
            vec![Interface::new::<dyn Service>(|this| this)]
        }
    }

    struct NoConstructor;

    impl Injectable for NoConstructor {
        fn instantiate() -> Result<Self, InstantiateErrorKind> {
            Err(anyhow::anyhow!("private constructor").into())
        }
    }

    #[test]
    #[traced_test]
    fn test_instance_as_interface() {
        let component = Component::of::<ServiceImpl>();
        let requested = TypeInfo::of::<dyn Service>();

        assert!(component.is_instantiable());
        assert!(component.is_assignable_to(&requested));
        assert!(!component.is_assignable_to(&TypeInfo::of::<dyn OtherService>()));

        let instance = component.instance(&requested).unwrap();
        assert_eq!(instance.type_info(), TypeInfo::of::<ServiceImpl>());
        assert_eq!(instance.provides(), requested);

        let service = instance.into_provided().unwrap().downcast::<Box<dyn Service>>().unwrap();
        assert_eq!(service.name(), "ServiceImpl");
    }

    #[test]
    #[traced_test]
    fn test_instance_absent() {
        assert!(Component::of::<ServiceImpl>()
            .instance(&TypeInfo::of::<dyn OtherService>())
            .is_none());

        let abstract_component = Component::abstract_of::<dyn Service>();
        assert!(!abstract_component.is_instantiable());
        assert!(abstract_component.instance(&TypeInfo::of::<dyn Service>()).is_none());

        assert!(Component::of::<NoConstructor>()
            .instance(&TypeInfo::of::<NoConstructor>())
            .is_none());
        assert!(logs_contain("private constructor"));
    }

    #[test]
    fn test_wrapped_instance() {
        let instance = Instance::of(ServiceImpl);

        assert_eq!(instance.provides(), TypeInfo::of::<ServiceImpl>());
        assert!(instance.into_provided().unwrap().downcast::<Box<ServiceImpl>>().is_ok());
    }
}
