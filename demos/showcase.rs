use wireup::{
    holder, CircularDependencyStrategy, Configuration, Container, Injectable, InstantiateErrorKind, MappingResolver,
    RegisterErrorKind, ResolveErrorKind, ScanningResolver,
};

mod repositories {
    use wireup::Injectable;

    pub trait UserRepo {
        fn create_user(&self, name: &str) -> String;
    }

    // Discovered by the scanning resolver, see `#[injectable(component)]`
    #[derive(Default, Injectable)]
    #[injectable(component, implements(dyn UserRepo))]
    pub struct PostgresUserRepo;

    impl UserRepo for PostgresUserRepo {
        fn create_user(&self, name: &str) -> String {
            format!("INSERT INTO users (name) VALUES ('{name}')")
        }
    }
}

mod cycle {
    use wireup::Injectable;

    #[derive(Default, Injectable)]
    #[injectable(component)]
    pub struct A {
        #[inject]
        pub c: Option<Box<C>>,
    }

    #[derive(Default, Injectable)]
    #[injectable(component)]
    pub struct C {
        #[inject]
        pub a: Option<Box<A>>,
    }
}

use repositories::UserRepo;

struct Config {
    greeting: &'static str,
}

impl Injectable for Config {
    fn instantiate() -> Result<Self, InstantiateErrorKind> {
        Ok(Self { greeting: "Hello" })
    }
}

#[derive(Default, Injectable)]
struct CreateUser {
    // Dependency without details about the specific implementation
    #[inject]
    repo: Option<Box<dyn UserRepo>>,
    #[inject]
    config: Option<Box<Config>>,
}

impl CreateUser {
    fn handle(&self, name: &str) {
        if let Some(config) = &self.config {
            println!("{}, {name}!", config.greeting);
        }
        if let Some(repo) = &self.repo {
            println!("{}", repo.create_user(name));
        }
    }
}

fn init_container() -> Result<Container, RegisterErrorKind> {
    let mapping_resolver = MappingResolver::builder()
        .register_type::<CreateUser>()
        .register_factory::<Config, _>(|| Ok::<_, InstantiateErrorKind>(Config { greeting: "Hi" }))?
        .build();

    // Resolvers are asked in order, the first one that answers wins
    let container = Container::builder()
        .configuration(
            Configuration::builder()
                .circular_dependency_strategy(CircularDependencyStrategy::Fail)
                .build(),
        )
        .resolver(mapping_resolver)
        .resolver(ScanningResolver::builder().scan(&[module_path!()]).build())
        .build();
    Ok(container)
}

fn main() {
    match init_container() {
        Ok(container) => {
            holder::register("app", container);
        }
        Err(err) => {
            println!("{err}");
            return;
        }
    }

    // Somewhere without access to the container
    let Some(container) = holder::lookup("app") else {
        return;
    };

    // Nothing is cached, every call builds a new object graph
    match container.resolve::<CreateUser>() {
        Ok(Some(interactor)) => interactor.handle("Alice"),
        Ok(None) => println!("CreateUser isn't resolved"),
        Err(err) => println!("{err}"),
    }

    // `C` injects `A` and `A` injects `C`
    match container.resolve::<cycle::C>() {
        Err(err @ ResolveErrorKind::CircularDependencyDetected { .. }) => println!("{err}"),
        Err(err) => println!("Unexpected error: {err}"),
        Ok(_) => println!("Cycle isn't detected"),
    }
}
