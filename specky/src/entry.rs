//! Link-time registry of the entry assembly.
//!
//! Every `#[derive(Specky)]` type and every [`entry_type!`](crate::entry_type) getter
//! linked into the final binary ends up in [`__ENTRY_TYPES`].

use crate::descriptor::TypeDescriptor;

pub use linkme::{self, distributed_slice};

#[distributed_slice]
pub static __ENTRY_TYPES: [fn() -> TypeDescriptor];

/// Adds a descriptor getter to the entry assembly.
///
/// Traits can't derive [`Specky`](crate::Specky), so configuration surfaces are usually registered this way.
///
/// ```ignore
/// fn ok_configuration() -> TypeDescriptor {
///     TypeDescriptor::interface::<dyn OkConfiguration>().configuration_option("Ok")
/// }
///
/// specky::entry_type!(OK_CONFIGURATION = ok_configuration);
/// ```
#[macro_export]
macro_rules! entry_type {
    ($name:ident = $getter:expr $(,)?) => {
        #[$crate::entry::distributed_slice($crate::entry::__ENTRY_TYPES)]
        #[linkme(crate = $crate::entry::linkme)]
        static $name: fn() -> $crate::TypeDescriptor = $getter;
    };
}
