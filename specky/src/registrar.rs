use alloc::{collections::BTreeSet, string::String, vec::Vec};
use tracing::debug;

use crate::{
    any::{TypeInfo, TypeShape},
    collection::{ServiceCollection, ServiceDescriptor},
    descriptor::{Member, MemberKind, TypeDescriptor},
    errors::{Location, RegisterErrorKind, SpeckyErrorKind},
    options::ResolvedOptions,
    speck::Speck,
};

pub(crate) struct Registrar<'a, C: ?Sized> {
    collection: &'a mut C,
    options: &'a BTreeSet<String>,
    /// Service types registered by configuration surfaces, they aren't registered again
    configuration_services: BTreeSet<TypeInfo>,
    scanned_surfaces: BTreeSet<TypeInfo>,
}

impl<'a, C> Registrar<'a, C>
where
    C: ServiceCollection + ?Sized,
{
    #[inline]
    pub(crate) fn new(collection: &'a mut C, options: &'a BTreeSet<String>) -> Self {
        Self {
            collection,
            options,
            configuration_services: BTreeSet::new(),
            scanned_surfaces: BTreeSet::new(),
        }
    }

    /// Registers the specks declared on the type itself.
    pub(crate) fn scan_type(&mut self, descriptor: &TypeDescriptor) -> Result<(), RegisterErrorKind> {
        let location = Location::of_type(descriptor.info());
        for speck in &descriptor.specks {
            let service = speck.service_or(descriptor.info());
            self.add_speck(service, &descriptor.shape, speck, location)?;
        }
        Ok(())
    }

    /// Registers the specks declared on the members of a configuration surface.
    ///
    /// Types which aren't configuration interfaces, surfaces filtered out by the active options
    /// and surfaces already scanned by this registrar are skipped.
    pub(crate) fn scan_configuration(&mut self, descriptor: &TypeDescriptor) -> Result<(), RegisterErrorKind> {
        let Some(configuration) = &descriptor.configuration else {
            return Ok(());
        };
        if !descriptor.shape.is_interface() {
            return Ok(());
        }
        if !self.options.is_empty() && !configuration.is_enabled_by(self.options.iter().map(String::as_str)) {
            debug!(
                "Configuration {} skipped, option {:?} isn't active",
                descriptor.info(),
                configuration.option
            );
            return Ok(());
        }
        if !self.scanned_surfaces.insert(descriptor.info()) {
            debug!("Configuration {} already scanned", descriptor.info());
            return Ok(());
        }

        debug!("Scanning configuration {}", descriptor.info());
        for kind in [MemberKind::Property, MemberKind::Field, MemberKind::Method] {
            for member in descriptor.members_of(kind) {
                self.scan_member(descriptor.info(), member)?;
            }
        }
        Ok(())
    }

    fn scan_member(&mut self, surface: TypeInfo, member: &Member) -> Result<(), RegisterErrorKind> {
        let location = Location::of_member(surface, member.name);
        for speck in &member.specks {
            if member.kind == MemberKind::Method && member.ty.is_unit() {
                return Err(RegisterErrorKind::VoidConfigurationMethod { location });
            }

            let service = speck.service_or(member.ty.info);
            self.add_speck(service, &member.ty, speck, location)?;
            self.configuration_services.insert(service);
        }
        Ok(())
    }

    /// Validates a single registration and hands it over to the collection.
    pub(crate) fn add_speck(
        &mut self,
        service: TypeInfo,
        implementation: &TypeShape,
        speck: &Speck,
        location: Location,
    ) -> Result<(), RegisterErrorKind> {
        if implementation.is_interface() {
            return Err(RegisterErrorKind::InterfaceImplementation {
                service,
                implementation: implementation.info,
                location,
            });
        }
        if !implementation.is_assignable_to(&service) {
            return Err(RegisterErrorKind::NotAssignable {
                service,
                implementation: implementation.info,
                location,
            });
        }
        if self.configuration_services.contains(&service) {
            debug!("Service {} already registered by a configuration, {} skipped", service, location);
            return Ok(());
        }

        let descriptor = ServiceDescriptor {
            service,
            implementation: implementation.info,
            lifetime: speck.lifetime,
            post_init: speck.post_init,
        };
        self.collection
            .add(descriptor)
            .map_err(|reason| RegisterErrorKind::Rejected {
                descriptor,
                location,
                reason,
            })?;

        debug!("Registered {} (declared at {})", descriptor, location);
        Ok(())
    }
}

/// Scans everything the options point at, configuration surfaces first.
pub(crate) fn register<C>(collection: &mut C, options: ResolvedOptions) -> Result<(), SpeckyErrorKind>
where
    C: ServiceCollection + ?Sized,
{
    if options.has_no_scan_target() {
        tracing::warn!("Nothing to scan: no assembly was added and the entry assembly is empty");
        return Err(SpeckyErrorKind::NoScanTarget);
    }

    let ResolvedOptions {
        assemblies,
        configurations,
        options,
        configurations_only,
        ..
    } = options;
    let mut registrar = Registrar::new(collection, &options);

    for configuration in &configurations {
        registrar.scan_configuration(configuration)?;
    }

    let types = assemblies.iter().flat_map(|assembly| assembly.types());
    let surfaces = types
        .clone()
        .filter(|descriptor| descriptor.is_configuration() && descriptor.shape.is_interface())
        .collect::<Vec<_>>();

    if configurations_only {
        if !configurations.is_empty() {
            return Ok(());
        }
        if surfaces.is_empty() {
            return Err(SpeckyErrorKind::NoConfigurations);
        }
        for surface in surfaces {
            registrar.scan_configuration(surface)?;
        }
        return Ok(());
    }

    for surface in surfaces {
        registrar.scan_configuration(surface)?;
    }
    for descriptor in types {
        registrar.scan_type(descriptor)?;
    }

    Ok(())
}
