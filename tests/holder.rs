use std::thread;

use wireup::{
    holder, Configuration, Container, InstantiateErrorKind, Instance, Injectable, MappingResolver, NoDependencyFoundStrategy,
    ResolveErrorKind, TypeInfo,
};

struct Settings {
    name: &'static str,
}

impl Injectable for Settings {
    fn instantiate() -> Result<Self, InstantiateErrorKind> {
        Ok(Self { name: "default" })
    }
}

#[test]
fn test_lookup_from_another_thread() {
    let container = Container::builder()
        .resolver(MappingResolver::builder().register_type::<Settings>().build())
        .build();
    assert!(holder::register("holder-test-app", container).is_none());

    let name = thread::spawn(|| {
        let container = holder::lookup("holder-test-app").unwrap();
        container.resolve::<Settings>().unwrap().unwrap().name
    })
    .join()
    .unwrap();
    assert_eq!(name, "default");

    assert!(holder::lookup("holder-test-unknown").is_none());
}

#[test]
fn test_tags_are_independent() {
    holder::register(
        "holder-test-strict",
        Container::builder()
            .configuration(
                Configuration::builder()
                    .no_dependency_found_strategy(NoDependencyFoundStrategy::Fail)
                    .build(),
            )
            .build(),
    );
    holder::register(
        "holder-test-lenient",
        Container::builder()
            .resolver(wireup::resolver_fn(|type_info: &TypeInfo| {
                (*type_info == TypeInfo::of::<Settings>()).then(|| Instance::of(Settings { name: "wrapped" }))
            }))
            .build(),
    );

    let strict = holder::lookup("holder-test-strict").unwrap();
    assert_eq!(
        strict.resolve::<Settings>().err(),
        Some(ResolveErrorKind::NoDependencyResolved {
            type_info: TypeInfo::of::<Settings>()
        })
    );

    let lenient = holder::lookup("holder-test-lenient").unwrap();
    assert_eq!(lenient.resolve::<Settings>().unwrap().unwrap().name, "wrapped");
}
