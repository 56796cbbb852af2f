use crate::{any::TypeInfo, errors::RegisterErrorKind, lifetime::Lifetime};

/// A request to register the declaring target with a lifetime.
///
/// ## Fields
/// - `lifetime`: lifetime of the registered service.
/// - `service`:
///   Service type the target is registered as.
///   If `None`, the implementation type itself is used.
/// - `post_init`:
///   If `true`, the service is expected to be resolved right after the container is built.
///   See [`crate::Services::init_post_specks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Speck {
    pub lifetime: Lifetime,
    pub service: Option<TypeInfo>,
    pub post_init: bool,
}

impl Speck {
    #[inline]
    #[must_use]
    pub const fn new(lifetime: Lifetime) -> Self {
        Self {
            lifetime,
            service: None,
            post_init: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn singleton() -> Self {
        Self::new(Lifetime::Singleton)
    }

    #[inline]
    #[must_use]
    pub const fn scoped() -> Self {
        Self::new(Lifetime::Scoped)
    }

    #[inline]
    #[must_use]
    pub const fn transient() -> Self {
        Self::new(Lifetime::Transient)
    }

    /// Builds a speck from a textual lifetime tag, e.g. one read from a manifest.
    ///
    /// # Errors
    /// Returns [`RegisterErrorKind::UnknownSpeckKind`] if the tag names no lifetime.
    #[inline]
    pub fn from_tag(tag: &str) -> Result<Self, RegisterErrorKind> {
        tag.parse().map(Self::new)
    }

    #[inline]
    #[must_use]
    pub fn as_service<S: ?Sized + 'static>(self) -> Self {
        self.with_service(TypeInfo::of::<S>())
    }

    #[inline]
    #[must_use]
    pub const fn with_service(mut self, service: TypeInfo) -> Self {
        self.service = Some(service);
        self
    }

    #[inline]
    #[must_use]
    pub const fn post_init(mut self) -> Self {
        self.post_init = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn service_or(&self, implementation: TypeInfo) -> TypeInfo {
        self.service.unwrap_or(implementation)
    }
}

impl Default for Speck {
    fn default() -> Self {
        Self::singleton()
    }
}
