use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::{any::Any, marker::PhantomData};

use crate::{any::TypeInfo, errors::InstantiateErrorKind, field::Field};

/// Converts an erased `Box<Concrete>` into an erased `Box<Requested>`.
/// Returns `None` if the value isn't of the expected concrete type.
pub(crate) type Cast = Arc<dyn Fn(Box<dyn Any>) -> Option<Box<dyn Any>> + Send + Sync>;

#[must_use]
pub(crate) fn identity_cast<T: 'static>() -> Cast {
    Arc::new(|value: Box<dyn Any>| value.downcast::<T>().ok().map(|value| Box::new(value) as Box<dyn Any>))
}

/// A concrete type the container can construct and inject fields into.
///
/// Usually implemented with `#[derive(Injectable)]`:
/// ```ignore
/// #[derive(Default, Injectable)]
/// #[injectable(implements(dyn Service))]
/// struct ServiceImpl {
///     #[inject]
///     repository: Option<Box<dyn Repository>>,
/// }
/// ```
pub trait Injectable: Sized + 'static {
    /// Creates an instance with every injectable field at its default value.
    ///
    /// # Errors
    /// Returns [`InstantiateErrorKind`] if the type can't be constructed,
    /// resolvers report such a type as absent.
    fn instantiate() -> Result<Self, InstantiateErrorKind>;

    /// Injectable fields in the order they are injected
    #[must_use]
    fn fields() -> Vec<Field<Self>> {
        Vec::new()
    }

    /// Types (usually trait objects) this type can be resolved as, besides itself
    #[must_use]
    fn interfaces() -> Vec<Interface<Self>> {
        Vec::new()
    }
}

/// Declares that `T` can be provided as the interface `I`
pub struct Interface<T> {
    pub(crate) type_info: TypeInfo,
    pub(crate) cast: Cast,
    _implementation: PhantomData<fn(T)>,
}

impl<T: 'static> Interface<T> {
    #[must_use]
    pub fn new<I>(upcast: fn(Box<T>) -> Box<I>) -> Self
    where
        I: ?Sized + 'static,
    {
        Self {
            type_info: TypeInfo::of::<I>(),
            cast: Arc::new(move |value: Box<dyn Any>| {
                value
                    .downcast::<T>()
                    .ok()
                    .map(|value| Box::new(upcast(value)) as Box<dyn Any>)
            }),
            _implementation: PhantomData,
        }
    }

    #[inline]
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }
}
