use alloc::string::String;
use core::fmt::{self, Display, Formatter};

use crate::{any::TypeInfo, collection::ServiceDescriptor};

/// Declaration site of a speck: the declaring type and, for configuration surfaces, the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub declaring: TypeInfo,
    pub member: Option<&'static str>,
}

impl Location {
    #[inline]
    #[must_use]
    pub const fn of_type(declaring: TypeInfo) -> Self {
        Self { declaring, member: None }
    }

    #[inline]
    #[must_use]
    pub const fn of_member(declaring: TypeInfo, member: &'static str) -> Self {
        Self {
            declaring,
            member: Some(member),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.member {
            Some(member) => write!(f, "{}::{member}", self.declaring),
            None => write!(f, "{}", self.declaring),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RegisterErrorKind {
    #[error("`{tag}` is an unknown speck kind")]
    UnknownSpeckKind { tag: String },
    #[error("`{implementation}` can't be registered because it can't be assigned to `{service}` (declared at `{location}`)")]
    NotAssignable {
        service: TypeInfo,
        implementation: TypeInfo,
        location: Location,
    },
    #[error("`{implementation}` can't be registered as `{service}` because it is an interface (declared at `{location}`)")]
    InterfaceImplementation {
        service: TypeInfo,
        implementation: TypeInfo,
        location: Location,
    },
    #[error("Configuration method `{location}` returns `()`, it must return the type to register")]
    VoidConfigurationMethod { location: Location },
    #[error("Collection rejected `{descriptor}` (declared at `{location}`): {reason}")]
    Rejected {
        descriptor: ServiceDescriptor,
        location: Location,
        reason: anyhow::Error,
    },
}
