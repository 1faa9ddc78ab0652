/// Error of a constructor or a factory.
///
/// Resolvers never propagate it: the failure is logged and the type is reported as absent.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
