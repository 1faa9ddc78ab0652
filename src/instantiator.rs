use alloc::{boxed::Box, sync::Arc};
use core::any::Any;
use tracing::debug;

use crate::{errors::InstantiateErrorKind, injectable::Injectable};

/// A zero-argument factory of an injectable type.
///
/// Implemented for every `Fn() -> Result<T, E>`, so closures can be registered directly:
/// ```ignore
/// MappingResolver::builder().register_factory::<dyn Service, _>(|| Ok::<_, InstantiateErrorKind>(ServiceImpl::new("hello")))?
/// ```
pub trait Instantiator: Send + Sync + 'static {
    type Provides: Injectable;
    type Error: Into<InstantiateErrorKind>;

    /// # Errors
    /// Returns the factory error, it's reported as an absent dependency by the resolver
    fn instantiate(&self) -> Result<Self::Provides, Self::Error>;
}

impl<F, Response, Err> Instantiator for F
where
    F: Fn() -> Result<Response, Err> + Send + Sync + 'static,
    Response: Injectable,
    Err: Into<InstantiateErrorKind>,
{
    type Provides = Response;
    type Error = Err;

    #[inline]
    fn instantiate(&self) -> Result<Self::Provides, Self::Error> {
        self()
    }
}

/// Produces an erased `Box<Provides>` on every call
pub(crate) type BoxedInstantiator = Arc<dyn Fn() -> Result<Box<dyn Any>, InstantiateErrorKind> + Send + Sync>;

#[must_use]
pub(crate) fn boxed_instantiator<Inst>(instantiator: Inst) -> BoxedInstantiator
where
    Inst: Instantiator,
{
    Arc::new(move || {
        let dependency = instantiator.instantiate().map_err(Into::into)?;

        debug!("Instantiated");

        Ok(Box::new(dependency) as _)
    })
}

/// Instantiator of a type through [`Injectable::instantiate`]
#[must_use]
pub(crate) fn injectable_instantiator<T: Injectable>() -> BoxedInstantiator {
    boxed_instantiator(T::instantiate)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{boxed_instantiator, injectable_instantiator, InstantiateErrorKind};
    use crate::injectable::Injectable;

    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicU8, Ordering};
    use tracing_test::traced_test;

    struct Request(bool);

    impl Injectable for Request {
        fn instantiate() -> Result<Self, InstantiateErrorKind> {
            Ok(Self(false))
        }
    }

    struct Broken;

    impl Injectable for Broken {
        fn instantiate() -> Result<Self, InstantiateErrorKind> {
            Err(anyhow::anyhow!("no usable constructor").into())
        }
    }

    #[test]
    #[traced_test]
    fn test_boxed_instantiator() {
        let call_count = Arc::new(AtomicU8::new(0));

        let instantiator = boxed_instantiator({
            let call_count = call_count.clone();
            move || {
                call_count.fetch_add(1, Ordering::SeqCst);
                Ok::<_, InstantiateErrorKind>(Request(true))
            }
        });

        let request_1 = instantiator().unwrap().downcast::<Request>().unwrap();
        let request_2 = instantiator().unwrap().downcast::<Request>().unwrap();

        assert!(request_1.0);
        assert!(request_2.0);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
        assert!(logs_contain("Instantiated"));
    }

    #[test]
    #[traced_test]
    fn test_injectable_instantiator() {
        let request = injectable_instantiator::<Request>()().unwrap();
        assert!(!request.downcast::<Request>().unwrap().0);

        assert!(injectable_instantiator::<Broken>()().is_err());
    }
}
