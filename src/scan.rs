//! Link-time registry of injectable components.
//!
//! Types derived with `#[injectable(component)]` add a [`ComponentEntry`] to [`COMPONENTS`],
//! [`LinkedComponents`] discovers them by module path.

use alloc::{collections::BTreeSet, vec::Vec};

use crate::{component::Component, resolver::ComponentScan};

pub use linkme::{self, distributed_slice};

/// A component together with the module it's declared in
pub struct ComponentEntry {
    pub module_path: &'static str,
    pub component: Component,
}

#[distributed_slice]
pub static COMPONENTS: [fn() -> ComponentEntry];

/// Scans [`COMPONENTS`].
///
/// A root selects the entries declared in the module of that path or in its submodules,
/// no roots select every entry.
/// The link order of the entries isn't stable, so the result is sorted by type name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedComponents;

impl LinkedComponents {
    #[must_use]
    pub(crate) fn scan_entries(entries: &[fn() -> ComponentEntry], roots: &[&str]) -> Vec<Component> {
        let mut seen = BTreeSet::new();
        let mut components = entries
            .iter()
            .map(|getter| getter())
            .filter(|entry| roots.is_empty() || roots.iter().any(|root| is_under(entry.module_path, root)))
            .map(|entry| entry.component)
            .filter(|component| seen.insert(component.type_info()))
            .collect::<Vec<_>>();

        components.sort_by(|a, b| a.type_info().name.cmp(b.type_info().name));
        components
    }
}

impl ComponentScan for LinkedComponents {
    #[inline]
    fn scan(&self, roots: &[&str]) -> Vec<Component> {
        Self::scan_entries(&COMPONENTS, roots)
    }
}

fn is_under(module_path: &str, root: &str) -> bool {
    module_path
        .strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

#[cfg(test)]
mod tests {
    use super::{is_under, ComponentEntry, LinkedComponents};
    use crate::{any::TypeInfo, component::Component, errors::InstantiateErrorKind, Injectable};

    struct Repository;

    impl Injectable for Repository {
        fn instantiate() -> Result<Self, InstantiateErrorKind> {
            Ok(Self)
        }
    }

    struct Handler;

    impl Injectable for Handler {
        fn instantiate() -> Result<Self, InstantiateErrorKind> {
            Ok(Self)
        }
    }

    fn repository() -> ComponentEntry {
        ComponentEntry {
            module_path: "app::storage",
            component: Component::of::<Repository>(),
        }
    }

    fn handler() -> ComponentEntry {
        ComponentEntry {
            module_path: "app::http::handlers",
            component: Component::of::<Handler>(),
        }
    }

    #[test]
    fn test_is_under() {
        assert!(is_under("app::storage", "app"));
        assert!(is_under("app::storage", "app::storage"));
        assert!(!is_under("application", "app"));
        assert!(!is_under("app", "app::storage"));
    }

    #[test]
    fn test_scan_entries() {
        let entries: [fn() -> ComponentEntry; 3] = [handler, repository, handler];

        let all = LinkedComponents::scan_entries(&entries, &[]);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].type_info(), TypeInfo::of::<Handler>());
        assert_eq!(all[1].type_info(), TypeInfo::of::<Repository>());

        let http = LinkedComponents::scan_entries(&entries, &["app::http"]);
        assert_eq!(http.len(), 1);
        assert_eq!(http[0].type_info(), TypeInfo::of::<Handler>());

        assert!(LinkedComponents::scan_entries(&entries, &["other"]).is_empty());
    }
}
