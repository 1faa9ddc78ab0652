use crate::{any::TypeInfo, field::FieldInfo};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveErrorKind {
    #[error("No dependency resolved for {type_info}")]
    NoDependencyResolved { type_info: TypeInfo },
    #[error("Circular dependency detected while resolving {type_info}")]
    CircularDependencyDetected { type_info: TypeInfo },
    #[error("Field {field} isn't accessible")]
    NonAccessibleField { field: FieldInfo },
}
