#![no_std]

extern crate alloc;

pub(crate) mod any;
pub(crate) mod assembly;
pub(crate) mod collection;
pub(crate) mod descriptor;
pub(crate) mod errors;
pub(crate) mod extensions;
pub(crate) mod lifetime;
pub(crate) mod options;
pub(crate) mod registrar;
pub(crate) mod speck;

pub mod entry;

pub use any::{TypeInfo, TypeKind, TypeShape};
pub use assembly::Assembly;
pub use collection::{ServiceCollection, ServiceDescriptor, Services};
pub use descriptor::{Configuration, Member, MemberKind, Specky, TypeDescriptor};
pub use errors::{Location, OptionsErrorKind, RegisterErrorKind, SpeckyErrorKind};
pub use extensions::AddSpecks;
pub use lifetime::Lifetime;
pub use options::SpeckyOptions;
pub use speck::Speck;

#[cfg(feature = "macros")]
pub use specky_macros::Specky;
