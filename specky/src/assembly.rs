use alloc::vec::Vec;

use crate::{
    descriptor::{Specky, TypeDescriptor},
    entry::__ENTRY_TYPES,
};

/// A named group of types to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    name: &'static str,
    types: Vec<TypeDescriptor>,
}

impl Assembly {
    pub const ENTRY_NAME: &'static str = "entry";

    #[inline]
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name, types: Vec::new() }
    }

    /// Types linked into the current binary by `#[derive(Specky)]` and [`crate::entry_type!`].
    #[must_use]
    pub fn entry() -> Self {
        Self {
            name: Self::ENTRY_NAME,
            types: __ENTRY_TYPES.iter().map(|getter| getter()).collect(),
        }
    }

    /// Assembly of a single type, named after it.
    #[inline]
    #[must_use]
    pub fn of<T: Specky>() -> Self {
        Self::new(core::any::type_name::<T>()).with::<T>()
    }

    #[inline]
    #[must_use]
    pub fn with<T: Specky>(self) -> Self {
        self.with_descriptor(T::type_descriptor())
    }

    #[inline]
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_descriptors(mut self, descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.types.extend(descriptors);
        self
    }

    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    #[must_use]
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }
}
