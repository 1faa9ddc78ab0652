/// What the container does when no resolver answers for a requested type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoDependencyFoundStrategy {
    /// The dependency is reported as absent
    #[default]
    ReturnAbsent,
    /// Resolution fails with [`crate::ResolveErrorKind::NoDependencyResolved`]
    Fail,
}

/// What the container does when a field's type is already being resolved on the current path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CircularDependencyStrategy {
    /// The field is left untouched
    #[default]
    Skip,
    /// Resolution fails with [`crate::ResolveErrorKind::CircularDependencyDetected`]
    Fail,
}

/// What the container does when an injectable field refuses the assignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NonAccessibleFieldStrategy {
    /// The field is left untouched
    #[default]
    Skip,
    /// Resolution fails with [`crate::ResolveErrorKind::NonAccessibleField`]
    Fail,
}

/// Config for a container
/// ## Fields
/// - `no_dependency_found_strategy`:
///   Applied when none of the resolvers produces an instance for a requested type.
/// - `circular_dependency_strategy`:
///   Applied when a field's type is already in progress on the resolution path.
/// - `non_accessible_field_strategy`:
///   Applied when a discovered injectable field can't be written.
///
/// All of them default to the non-failing variant.
/// The value can only be created with [`ConfigurationBuilder`] and is immutable afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Configuration {
    no_dependency_found_strategy: NoDependencyFoundStrategy,
    circular_dependency_strategy: CircularDependencyStrategy,
    non_accessible_field_strategy: NonAccessibleFieldStrategy,
}

impl Configuration {
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    #[inline]
    #[must_use]
    pub const fn no_dependency_found_strategy(&self) -> NoDependencyFoundStrategy {
        self.no_dependency_found_strategy
    }

    #[inline]
    #[must_use]
    pub const fn circular_dependency_strategy(&self) -> CircularDependencyStrategy {
        self.circular_dependency_strategy
    }

    #[inline]
    #[must_use]
    pub const fn non_accessible_field_strategy(&self) -> NonAccessibleFieldStrategy {
        self.non_accessible_field_strategy
    }
}

#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    configuration: Configuration,
}

impl ConfigurationBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn no_dependency_found_strategy(mut self, strategy: NoDependencyFoundStrategy) -> Self {
        self.configuration.no_dependency_found_strategy = strategy;
        self
    }

    #[inline]
    #[must_use]
    pub fn circular_dependency_strategy(mut self, strategy: CircularDependencyStrategy) -> Self {
        self.configuration.circular_dependency_strategy = strategy;
        self
    }

    #[inline]
    #[must_use]
    pub fn non_accessible_field_strategy(mut self, strategy: NonAccessibleFieldStrategy) -> Self {
        self.configuration.non_accessible_field_strategy = strategy;
        self
    }

    #[inline]
    #[must_use]
    pub fn build(self) -> Configuration {
        self.configuration
    }
}
