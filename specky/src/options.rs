use alloc::{collections::BTreeSet, string::String, vec::Vec};

use crate::{
    any::TypeInfo,
    assembly::Assembly,
    descriptor::{Specky, TypeDescriptor},
    errors::OptionsErrorKind,
};

/// What a single `add_specks_*` call scans.
///
/// A fresh value is built for every call, so two calls never observe each other's choices.
///
/// ## Fields
/// - `assemblies`: assemblies to scan. If empty, the entry assembly is used.
/// - `configurations`: configuration surfaces to scan. Adding one switches to configurations only mode.
/// - `options`: active option filter. If empty, no surface is filtered out.
/// - `configurations_only`:
///   If `true`, only configuration surfaces are scanned.
///   Without explicit configurations, the surfaces are discovered in the assemblies.
#[derive(Debug, Clone, Default)]
pub struct SpeckyOptions {
    assemblies: Vec<Assembly>,
    configurations: Vec<TypeDescriptor>,
    options: BTreeSet<String>,
    configurations_only: bool,
}

impl SpeckyOptions {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns [`OptionsErrorKind::DuplicateAssembly`] if an assembly with the same name was already added.
    pub fn add_assembly(&mut self, assembly: Assembly) -> Result<&mut Self, OptionsErrorKind> {
        if self.assemblies.iter().any(|added| added.name() == assembly.name()) {
            return Err(OptionsErrorKind::DuplicateAssembly { name: assembly.name() });
        }
        self.assemblies.push(assembly);
        Ok(self)
    }

    /// # Errors
    /// Returns [`OptionsErrorKind::DuplicateAssembly`] on the first already added assembly.
    /// Assemblies before it stay added.
    pub fn add_assemblies(&mut self, assemblies: impl IntoIterator<Item = Assembly>) -> Result<&mut Self, OptionsErrorKind> {
        for assembly in assemblies {
            self.add_assembly(assembly)?;
        }
        Ok(self)
    }

    /// Adds an assembly made of the single type `T`.
    ///
    /// # Errors
    /// Returns [`OptionsErrorKind::DuplicateAssembly`] if `T` was already added this way.
    #[inline]
    pub fn add_type<T: Specky>(&mut self) -> Result<&mut Self, OptionsErrorKind> {
        self.add_assembly(Assembly::of::<T>())
    }

    /// # Errors
    /// See [`Self::add_configuration_descriptor`].
    #[inline]
    pub fn add_configuration<T: Specky>(&mut self) -> Result<&mut Self, OptionsErrorKind> {
        self.add_configuration_descriptor(T::type_descriptor())
    }

    /// # Errors
    /// - Returns [`OptionsErrorKind::NotAnInterface`] if the type isn't an interface
    /// - Returns [`OptionsErrorKind::MissingConfigurationMarker`] if the type isn't marked as a configuration
    /// - Returns [`OptionsErrorKind::DuplicateConfiguration`] if the type was already added
    pub fn add_configuration_descriptor(&mut self, descriptor: TypeDescriptor) -> Result<&mut Self, OptionsErrorKind> {
        let type_info = descriptor.info();
        if !descriptor.shape.is_interface() {
            return Err(OptionsErrorKind::NotAnInterface { type_info });
        }
        if !descriptor.is_configuration() {
            return Err(OptionsErrorKind::MissingConfigurationMarker { type_info });
        }
        if self.configurations.iter().any(|added| added.info() == type_info) {
            return Err(OptionsErrorKind::DuplicateConfiguration { type_info });
        }
        self.configurations.push(descriptor);
        self.configurations_only = true;
        Ok(self)
    }

    /// # Errors
    /// Returns [`OptionsErrorKind::DuplicateOption`] if the option was already added.
    pub fn add_option(&mut self, option: impl Into<String>) -> Result<&mut Self, OptionsErrorKind> {
        let option = option.into();
        if self.options.contains(&option) {
            return Err(OptionsErrorKind::DuplicateOption { option });
        }
        self.options.insert(option);
        Ok(self)
    }

    /// # Errors
    /// Returns [`OptionsErrorKind::DuplicateOption`] on the first already added option.
    pub fn add_options<I, O>(&mut self, options: I) -> Result<&mut Self, OptionsErrorKind>
    where
        I: IntoIterator<Item = O>,
        O: Into<String>,
    {
        for option in options {
            self.add_option(option)?;
        }
        Ok(self)
    }

    #[inline]
    pub fn use_configurations_only(&mut self, value: bool) -> &mut Self {
        self.configurations_only = value;
        self
    }

    pub fn clear(&mut self) {
        self.assemblies.clear();
        self.configurations.clear();
        self.options.clear();
        self.configurations_only = false;
    }

    #[inline]
    #[must_use]
    pub fn assemblies(&self) -> &[Assembly] {
        &self.assemblies
    }

    #[inline]
    #[must_use]
    pub fn configurations(&self) -> &[TypeDescriptor] {
        &self.configurations
    }

    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(option)
    }

    #[inline]
    #[must_use]
    pub fn has_option_filter(&self) -> bool {
        !self.options.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_configurations_only(&self) -> bool {
        self.configurations_only
    }

    #[inline]
    #[must_use]
    pub fn contains_configuration(&self, type_info: &TypeInfo) -> bool {
        self.configurations.iter().any(|added| added.info() == *type_info)
    }

    /// Splits the options into their parts, falling back to the entry assembly if no assembly was added.
    pub(crate) fn resolve(self) -> ResolvedOptions {
        let Self {
            mut assemblies,
            configurations,
            options,
            configurations_only,
        } = self;

        let entry_fallback = assemblies.is_empty();
        if entry_fallback {
            let entry = Assembly::entry();
            tracing::debug!("No assembly added, falling back to entry assembly with {} types", entry.len());
            assemblies.push(entry);
        }

        ResolvedOptions {
            assemblies,
            configurations,
            options,
            configurations_only,
            entry_fallback,
        }
    }
}

pub(crate) struct ResolvedOptions {
    pub(crate) assemblies: Vec<Assembly>,
    /// No assembly was added, `assemblies` holds only the entry assembly
    pub(crate) entry_fallback: bool,
    pub(crate) configurations: Vec<TypeDescriptor>,
    pub(crate) options: BTreeSet<String>,
    pub(crate) configurations_only: bool,
}

impl ResolvedOptions {
    #[inline]
    pub(crate) fn has_types(&self) -> bool {
        self.assemblies.iter().any(|assembly| !assembly.is_empty())
    }

    /// `true` if nothing was chosen and the entry assembly has nothing to offer either.
    #[inline]
    pub(crate) fn has_no_scan_target(&self) -> bool {
        self.entry_fallback && !self.has_types() && self.configurations.is_empty()
    }
}
