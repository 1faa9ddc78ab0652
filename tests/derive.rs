use wireup::{
    Configuration, Container, Injectable, InstantiateErrorKind, MappingResolver, NonAccessibleFieldStrategy, ResolveErrorKind,
    TypeInfo,
};

#[derive(Default, Injectable)]
struct A {
    #[inject]
    b: Option<Box<B>>,
    c: Option<Box<C>>,
}

#[derive(Injectable)]
#[injectable(constructor = B::new)]
struct B {
    value: u8,
}

impl B {
    fn new() -> Result<Self, InstantiateErrorKind> {
        Ok(Self { value: 42 })
    }
}

#[derive(Default)]
struct C;

trait Service {
    fn value(&self) -> Option<u8>;
}

trait Named {
    fn name(&self) -> &'static str;
}

#[derive(Default, Injectable)]
#[injectable(implements(dyn Service, dyn Named))]
struct ServiceImpl {
    #[inject]
    b: Option<Box<B>>,
}

impl Service for ServiceImpl {
    fn value(&self) -> Option<u8> {
        self.b.as_ref().map(|b| b.value)
    }
}

impl Named for ServiceImpl {
    fn name(&self) -> &'static str {
        "ServiceImpl"
    }
}

#[derive(Default, Injectable)]
struct Consumer {
    #[inject]
    service: Option<Box<dyn Service>>,
    #[inject(readonly)]
    named: Option<Box<dyn Named>>,
}

#[derive(Injectable)]
#[injectable(constructor = Broken::new)]
struct Broken;

impl Broken {
    fn new() -> anyhow::Result<Self> {
        Err(anyhow::anyhow!("no usable constructor"))
    }
}

#[derive(Default, Injectable)]
struct Unit;

#[derive(Default, Injectable)]
struct Tuple(u8);

fn container(configuration: Configuration) -> Container {
    Container::builder()
        .configuration(configuration)
        .resolver(
            MappingResolver::builder()
                .register_impl::<dyn Service, ServiceImpl>()
                .and_then(|builder| builder.register_impl::<dyn Named, ServiceImpl>())
                .unwrap()
                .register_type::<A>()
                .register_type::<B>()
                .register_type::<Consumer>()
                .register_type::<Broken>()
                .register_type::<Unit>()
                .register_type::<Tuple>()
                .build(),
        )
        .build()
}

#[test]
fn test_fields() {
    let fields = <Consumer as Injectable>::fields();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].info().name, "service");
    assert_eq!(fields[0].info().type_info, TypeInfo::of::<dyn Service>());
    assert_eq!(fields[1].info().name, "named");
    assert_eq!(fields[1].info().owner, TypeInfo::of::<Consumer>());
    assert!(fields[0].is_writable());
    assert!(!fields[1].is_writable());

    assert!(<Unit as Injectable>::fields().is_empty());
    assert_eq!(<ServiceImpl as Injectable>::interfaces().len(), 2);
}

#[test]
fn test_resolve_injectable_fields_only() {
    let container = container(Configuration::default());

    let a = container.resolve::<A>().unwrap().unwrap();
    assert_eq!(a.b.as_ref().map(|b| b.value), Some(42));
    assert!(a.c.is_none());
}

#[test]
fn test_resolve_interface() {
    let container = container(Configuration::default());

    let service = container.resolve::<dyn Service>().unwrap().unwrap();
    assert_eq!(service.value(), Some(42));

    let consumer = container.resolve::<Consumer>().unwrap().unwrap();
    assert_eq!(consumer.service.as_ref().and_then(|service| service.value()), Some(42));
    assert!(consumer.named.is_none());
}

#[test]
fn test_readonly_field_fail() {
    let container = container(
        Configuration::builder()
            .non_accessible_field_strategy(NonAccessibleFieldStrategy::Fail)
            .build(),
    );

    let Err(ResolveErrorKind::NonAccessibleField { field }) = container.resolve::<Consumer>() else {
        panic!("expected non accessible field error");
    };
    assert_eq!(field.name, "named");
    assert_eq!(field.type_info, TypeInfo::of::<dyn Named>());
}

#[test]
fn test_failed_constructor_is_absent() {
    let container = container(Configuration::default());

    assert!(container.resolve::<Broken>().unwrap().is_none());
    assert!(container.resolve::<Unit>().unwrap().is_some());
    assert_eq!(container.resolve::<Tuple>().unwrap().map(|tuple| tuple.0), Some(0));
}
