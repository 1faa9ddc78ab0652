mod container;
mod instantiate;
mod registry;

pub use container::ResolveErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use registry::RegisterErrorKind;

/// The dependency resolution error family.
///
/// Build-time registration failures and resolve-time failures are kept apart in
/// [`RegisterErrorKind`] and [`ResolveErrorKind`], this type unites them for callers
/// which handle both in one place.
#[derive(thiserror::Error, Debug)]
pub enum DependencyResolutionError {
    #[error(transparent)]
    Resolve(#[from] ResolveErrorKind),
    #[error(transparent)]
    Register(#[from] RegisterErrorKind),
}
