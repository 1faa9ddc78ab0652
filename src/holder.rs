//! Process-wide registry of containers by tag.
//!
//! For code that can't receive a [`Container`] as an argument, like framework callbacks.
//! Registering a tag again replaces the previous container.

use alloc::{collections::BTreeMap, string::String};
use parking_lot::RwLock;
use tracing::debug;

use crate::container::Container;

static CONTAINERS: RwLock<BTreeMap<String, Container>> = parking_lot::const_rwlock(BTreeMap::new());

/// Registers the container under the tag, returning the previously registered one
pub fn register(tag: impl Into<String>, container: Container) -> Option<Container> {
    let tag = tag.into();
    debug!(tag = tag.as_str(), "Container registered");

    CONTAINERS.write().insert(tag, container)
}

/// Looks up a container registered under the tag
#[must_use]
pub fn lookup(tag: &str) -> Option<Container> {
    CONTAINERS.read().get(tag).cloned()
}

/// Removes the container registered under the tag
pub fn unregister(tag: &str) -> Option<Container> {
    CONTAINERS.write().remove(tag)
}
