use tracing::info_span;

use crate::{
    assembly::Assembly,
    collection::ServiceCollection,
    errors::{OptionsErrorKind, SpeckyErrorKind},
    options::SpeckyOptions,
    registrar,
};

/// Scans declared specks and adds their descriptors to a [`ServiceCollection`].
///
/// Every call builds its own [`SpeckyOptions`], so calls with different options don't affect each other.
pub trait AddSpecks: ServiceCollection + Sized {
    /// Scans the entry assembly.
    ///
    /// # Errors
    /// See [`Self::add_specks_with_options`].
    #[inline]
    fn add_specks(self) -> Result<Self, SpeckyErrorKind> {
        self.add_specks_with_options(SpeckyOptions::new())
    }

    /// Scans a single assembly.
    ///
    /// # Errors
    /// See [`Self::add_specks_with_options`].
    #[inline]
    fn add_specks_from(self, assembly: Assembly) -> Result<Self, SpeckyErrorKind> {
        let mut options = SpeckyOptions::new();
        options.add_assembly(assembly)?;
        self.add_specks_with_options(options)
    }

    /// Scans what `configure` chooses.
    ///
    /// # Errors
    /// - Returns [`SpeckyErrorKind::Options`] with the error of `configure`
    /// - See [`Self::add_specks_with_options`]
    #[inline]
    fn add_specks_with<F>(self, configure: F) -> Result<Self, SpeckyErrorKind>
    where
        F: FnOnce(&mut SpeckyOptions) -> Result<(), OptionsErrorKind>,
    {
        let mut options = SpeckyOptions::new();
        configure(&mut options)?;
        self.add_specks_with_options(options)
    }

    /// Scans what `options` chooses. The entry assembly is used if no assembly was added.
    ///
    /// # Errors
    /// - Returns [`SpeckyErrorKind::NoScanTarget`] if no assembly was added, the entry assembly is empty and no configuration was added
    /// - Returns [`SpeckyErrorKind::NoConfigurations`] if only configurations are requested, but none were found
    /// - Returns [`SpeckyErrorKind::Register`] on the first declaration that can't be registered.
    ///   Descriptors added before it stay in the collection.
    fn add_specks_with_options(self, options: SpeckyOptions) -> Result<Self, SpeckyErrorKind>;
}

impl<C> AddSpecks for C
where
    C: ServiceCollection,
{
    fn add_specks_with_options(mut self, options: SpeckyOptions) -> Result<Self, SpeckyErrorKind> {
        let span = info_span!("add_specks");
        let _guard = span.enter();

        registrar::register(&mut self, options.resolve())?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::AddSpecks as _;
    use crate::{
        any::{TypeInfo, TypeShape},
        assembly::Assembly,
        collection::{ServiceDescriptor, Services},
        descriptor::TypeDescriptor,
        errors::{OptionsErrorKind, RegisterErrorKind, SpeckyErrorKind},
        lifetime::Lifetime::{Scoped, Singleton, Transient},
        options::SpeckyOptions,
        speck::Speck,
    };

    use alloc::{
        format,
        string::{String, ToString as _},
        vec::Vec,
    };
    use tracing_test::traced_test;

    trait FooId {}
    trait FooTime {}
    trait OkConfiguration {}
    trait Ok2Configuration {}
    trait InvalidConfiguration {}

    struct AFoo;
    struct BFoo;
    struct AFooId;
    struct AFooTime;
    struct BFooTime;

    fn a_foo() -> TypeShape {
        TypeShape::concrete::<AFoo>().implements::<dyn FooId>().implements::<dyn FooTime>()
    }

    fn b_foo() -> TypeShape {
        TypeShape::concrete::<BFoo>().implements::<dyn FooId>().implements::<dyn FooTime>()
    }

    fn a_foo_id() -> TypeShape {
        TypeShape::concrete::<AFooId>().implements::<dyn FooId>()
    }

    fn a_foo_time() -> TypeShape {
        TypeShape::concrete::<AFooTime>().implements::<dyn FooId>()
    }

    fn invalid_configuration() -> TypeDescriptor {
        TypeDescriptor::interface::<dyn InvalidConfiguration>()
            .configuration_option("Invalid")
            .property("a_foo", a_foo(), [Speck::singleton()])
            .property("a_foo_id", TypeShape::interface::<dyn FooId>(), [Speck::scoped()])
    }

    fn ok_configuration() -> TypeDescriptor {
        TypeDescriptor::interface::<dyn OkConfiguration>()
            .configuration_option("Ok")
            .property("a_foo", a_foo(), [Speck::singleton()])
            .property("a_foo_id", a_foo_id(), [Speck::scoped()])
    }

    fn ok2_configuration() -> TypeDescriptor {
        TypeDescriptor::interface::<dyn Ok2Configuration>()
            .configuration_option("Ok2")
            .property("a_foo_time", a_foo_time(), [Speck::transient()])
            .property("b_foo", b_foo(), [Speck::scoped()])
    }

    fn test_types() -> Assembly {
        Assembly::new("test_types")
            .with_descriptor(TypeDescriptor::new(a_foo()))
            .with_descriptor(
                TypeDescriptor::new(b_foo())
                    .speck(Speck::singleton().as_service::<dyn FooTime>())
                    .speck(Speck::scoped().as_service::<dyn FooId>()),
            )
            .with_descriptor(TypeDescriptor::new(a_foo_id()))
            .with_descriptor(TypeDescriptor::new(a_foo_time()).speck(Speck::singleton()))
            .with_descriptor(
                TypeDescriptor::concrete::<BFooTime>()
                    .implements::<dyn FooId>()
                    .speck(Speck::transient()),
            )
    }

    #[test]
    #[traced_test]
    fn test_scan_assembly() {
        let services = Services::new().add_specks_from(test_types()).unwrap();

        assert_eq!(services.len(), 4);
        assert!(services.contains::<dyn FooTime, BFoo>(Singleton));
        assert!(services.contains::<dyn FooId, BFoo>(Scoped));
        assert!(services.contains::<AFooTime, AFooTime>(Singleton));
        assert!(services.contains::<BFooTime, BFooTime>(Transient));
    }

    #[test]
    #[traced_test]
    fn test_invalid_configuration() {
        let result = Services::new().add_specks_with(|options| {
            options.add_configuration_descriptor(invalid_configuration())?;
            Ok(())
        });

        assert!(matches!(
            result,
            Err(SpeckyErrorKind::Register(RegisterErrorKind::InterfaceImplementation { .. }))
        ));
    }

    #[test]
    #[traced_test]
    fn test_invalid_option() {
        let result = Services::new().add_specks_with(|options| {
            options
                .add_configuration_descriptor(invalid_configuration())?
                .add_configuration_descriptor(ok_configuration())?
                .add_option("Invalid")?;
            Ok(())
        });

        assert!(matches!(
            result,
            Err(SpeckyErrorKind::Register(RegisterErrorKind::InterfaceImplementation { .. }))
        ));
    }

    #[test]
    #[traced_test]
    fn test_ok_options() {
        let services = Services::new()
            .add_specks_with(|options| {
                options
                    .add_configuration_descriptor(invalid_configuration())?
                    .add_configuration_descriptor(ok_configuration())?
                    .add_configuration_descriptor(ok2_configuration())?
                    .add_options(["Ok", "Ok2"])?;
                Ok(())
            })
            .unwrap();

        assert_eq!(services.len(), 4);
        assert!(services.contains::<AFoo, AFoo>(Singleton));
        assert!(services.contains::<AFooId, AFooId>(Scoped));
        assert!(services.contains::<AFooTime, AFooTime>(Transient));
        assert!(services.contains::<BFoo, BFoo>(Scoped));
    }

    #[test]
    #[traced_test]
    fn test_option_skips_whole_surface() {
        let services = Services::new()
            .add_specks_with(|options| {
                options
                    .add_configuration_descriptor(ok_configuration())?
                    .add_configuration_descriptor(ok2_configuration())?
                    .add_option("Ok2")?;
                Ok(())
            })
            .unwrap();

        assert_eq!(services.len(), 2);
        assert!(!services.contains::<AFoo, AFoo>(Singleton));
        assert!(!services.contains::<AFooId, AFooId>(Scoped));
    }

    #[test]
    #[traced_test]
    fn test_options_error_propagates() {
        let result = Services::new().add_specks_with(|options| {
            options.add_option("Ok")?.add_option("Ok")?;
            Ok(())
        });

        assert!(matches!(
            result,
            Err(SpeckyErrorKind::Options(OptionsErrorKind::DuplicateOption { .. }))
        ));
    }

    #[test]
    #[traced_test]
    fn test_calls_dont_share_options() {
        let first = Services::new()
            .add_specks_with(|options| {
                options
                    .add_configuration_descriptor(ok_configuration())?
                    .add_option("Ok")?;
                Ok(())
            })
            .unwrap();
        assert_eq!(first.len(), 2);

        // Neither the configuration nor the option of the first call is visible here
        let second = Services::new()
            .add_specks_with(|options| {
                options.add_assembly(test_types())?;
                Ok(())
            })
            .unwrap();
        assert_eq!(second.len(), 4);
        assert!(!second.contains::<AFoo, AFoo>(Singleton));

        // Adding the same configuration and option again doesn't fail with a duplicate error
        let third = Services::new()
            .add_specks_with(|options| {
                options
                    .add_configuration_descriptor(ok_configuration())?
                    .add_option("Ok")?;
                Ok(())
            })
            .unwrap();
        assert_eq!(first, third);
    }

    #[test]
    #[traced_test]
    fn test_configurations_only_discovers_surfaces() {
        let assembly = test_types().with_descriptor(ok_configuration()).with_descriptor(ok2_configuration());

        let mut options = SpeckyOptions::new();
        options.add_assembly(assembly).unwrap().add_option("Ok").unwrap().use_configurations_only(true);
        let services = Services::new().add_specks_with_options(options).unwrap();

        assert_eq!(services.len(), 2);
        assert!(services.contains::<AFoo, AFoo>(Singleton));
        assert!(services.contains::<AFooId, AFooId>(Scoped));
    }

    #[test]
    #[traced_test]
    fn test_configurations_only_without_surfaces() {
        let mut options = SpeckyOptions::new();
        options.add_assembly(test_types()).unwrap().use_configurations_only(true);

        let result = Services::new().add_specks_with_options(options);

        assert!(matches!(result, Err(SpeckyErrorKind::NoConfigurations)));
    }

    #[test]
    #[traced_test]
    fn test_surfaces_in_assembly_take_precedence() {
        let shadowing = TypeDescriptor::interface::<dyn OkConfiguration>()
            .configuration()
            .method("b_foo", b_foo(), [Speck::transient().as_service::<dyn FooTime>()]);
        let assembly = test_types().with_descriptor(shadowing);

        let services = Services::new().add_specks_from(assembly).unwrap();

        assert_eq!(services.len(), 4);
        assert!(services.contains::<dyn FooTime, BFoo>(Transient));
        assert!(!services.contains::<dyn FooTime, BFoo>(Singleton));
        assert_eq!(services.iter().next().map(|descriptor| descriptor.lifetime), Some(Transient));
    }

    #[test]
    #[traced_test]
    fn test_no_scan_target() {
        // Nothing is linked into the entry assembly of the unit tests
        let result = Services::new().add_specks();

        assert!(matches!(result, Err(SpeckyErrorKind::NoScanTarget)));
    }

    #[test]
    #[traced_test]
    fn test_chosen_empty_assembly() {
        let services = Vec::<ServiceDescriptor>::new().add_specks_from(Assembly::new("empty")).unwrap();
        assert!(services.is_empty());

        let services = Services::new()
            .add_specks_with(|options| {
                options.add_assembly(Assembly::new("chosen_but_empty"))?;
                Ok(())
            })
            .unwrap();
        assert!(services.is_empty());
    }

    #[test]
    #[traced_test]
    fn test_post_init() {
        let assembly = Assembly::new("post_init")
            .with_descriptor(TypeDescriptor::new(b_foo()).speck(Speck::singleton().as_service::<dyn FooId>().post_init()));

        let services = Services::new().add_specks_from(assembly).unwrap();

        assert_eq!(services.post_init_services(), [TypeInfo::of::<dyn FooId>()]);
    }
}
