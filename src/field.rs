use alloc::{boxed::Box, sync::Arc};
use core::{
    any::Any,
    fmt::{self, Display, Formatter},
    marker::PhantomData,
};

use crate::any::TypeInfo;

/// Describes an injectable field: the type owning it, its name and the type injected into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub owner: TypeInfo,
    pub name: &'static str,
    pub type_info: TypeInfo,
}

impl Display for FieldInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.owner.short_name(), self.name, self.type_info.short_name())
    }
}

/// The assignment was refused by the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Refused;

type Setter = Arc<dyn Fn(&mut dyn Any, Option<Box<dyn Any>>) -> Result<(), Refused> + Send + Sync>;

/// Type-erased injectable field of some concrete type
#[derive(Clone)]
pub(crate) struct FieldDescriptor {
    pub(crate) info: FieldInfo,
    setter: Option<Setter>,
}

impl FieldDescriptor {
    #[inline]
    #[must_use]
    pub(crate) fn is_accessible(&self) -> bool {
        self.setter.is_some()
    }

    /// Writes `value` (an erased `Box<F>` or nothing) into the field of `owner`
    pub(crate) fn assign(&self, owner: &mut dyn Any, value: Option<Box<dyn Any>>) -> Result<(), Refused> {
        match &self.setter {
            Some(setter) => setter(owner, value),
            None => Err(Refused),
        }
    }
}

/// Injectable field accessor of `T`.
///
/// A field injected with a dependency `F` holds an `Option<Box<F>>`,
/// where `F` is either a concrete type or a trait object.
/// `None` is its default value and what an absent dependency is written as.
pub struct Field<T> {
    pub(crate) descriptor: FieldDescriptor,
    _owner: PhantomData<fn(T)>,
}

impl<T: 'static> Field<T> {
    /// Declares a writable field named `name`, written with `set`
    #[must_use]
    pub fn new<F>(name: &'static str, set: fn(&mut T, Option<Box<F>>)) -> Self
    where
        F: ?Sized + 'static,
    {
        let setter: Setter = Arc::new(move |owner: &mut dyn Any, value: Option<Box<dyn Any>>| {
            let owner = owner.downcast_mut::<T>().ok_or(Refused)?;
            let value = match value {
                Some(value) => Some(*value.downcast::<Box<F>>().map_err(|_| Refused)?),
                None => None,
            };
            set(owner, value);
            Ok(())
        });

        Self::with_setter::<F>(name, Some(setter))
    }

    /// Declares a field that is discovered but refuses every assignment
    #[must_use]
    pub fn readonly<F>(name: &'static str) -> Self
    where
        F: ?Sized + 'static,
    {
        Self::with_setter::<F>(name, None)
    }

    fn with_setter<F: ?Sized + 'static>(name: &'static str, setter: Option<Setter>) -> Self {
        Self {
            descriptor: FieldDescriptor {
                info: FieldInfo {
                    owner: TypeInfo::of::<T>(),
                    name,
                    type_info: TypeInfo::of::<F>(),
                },
                setter,
            },
            _owner: PhantomData,
        }
    }

    #[inline]
    #[must_use]
    pub fn info(&self) -> FieldInfo {
        self.descriptor.info
    }

    /// `false` for a field declared with [`Field::readonly`]
    #[inline]
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.descriptor.is_accessible()
    }
}
