use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterErrorKind {
    #[error("Type {type_info} is not instantiable")]
    NonInstantiable { type_info: TypeInfo },
    #[error("Type {implementation} doesn't implement {interface}")]
    NotAssignable { implementation: TypeInfo, interface: TypeInfo },
}
