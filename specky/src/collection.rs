use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use crate::{any::TypeInfo, lifetime::Lifetime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub service: TypeInfo,
    pub implementation: TypeInfo,
    pub lifetime: Lifetime,
    pub post_init: bool,
}

impl ServiceDescriptor {
    #[inline]
    #[must_use]
    pub const fn new(service: TypeInfo, implementation: TypeInfo, lifetime: Lifetime) -> Self {
        Self {
            service,
            implementation,
            lifetime,
            post_init: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn is<S: ?Sized + 'static, I: 'static>(&self, lifetime: Lifetime) -> bool {
        self.service == TypeInfo::of::<S>() && self.implementation == TypeInfo::of::<I>() && self.lifetime == lifetime
    }
}

impl Display for ServiceDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.service, self.implementation, self.lifetime)
    }
}

/// The host container, seen as a sink of service descriptors.
pub trait ServiceCollection {
    /// Adds a descriptor to the container.
    ///
    /// # Errors
    /// Implementations may reject a descriptor, for example when the container is already built.
    fn add(&mut self, descriptor: ServiceDescriptor) -> anyhow::Result<()>;
}

impl ServiceCollection for Vec<ServiceDescriptor> {
    #[inline]
    fn add(&mut self, descriptor: ServiceDescriptor) -> anyhow::Result<()> {
        self.push(descriptor);
        Ok(())
    }
}

impl<C> ServiceCollection for &mut C
where
    C: ServiceCollection + ?Sized,
{
    #[inline]
    fn add(&mut self, descriptor: ServiceDescriptor) -> anyhow::Result<()> {
        (**self).add(descriptor)
    }
}

/// In-memory [`ServiceCollection`], to be handed over to a container builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Services {
    descriptors: Vec<ServiceDescriptor>,
}

impl Services {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { descriptors: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, ServiceDescriptor> {
        self.descriptors.iter()
    }

    #[inline]
    #[must_use]
    pub fn contains<S: ?Sized + 'static, I: 'static>(&self, lifetime: Lifetime) -> bool {
        self.descriptors.iter().any(|descriptor| descriptor.is::<S, I>(lifetime))
    }

    /// Descriptors registered for the service type `S`, in registration order.
    pub fn for_service<S: ?Sized + 'static>(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        let service = TypeInfo::of::<S>();
        self.descriptors.iter().filter(move |descriptor| descriptor.service == service)
    }

    /// Service types flagged with `post_init`, each listed once.
    #[must_use]
    pub fn post_init_services(&self) -> Vec<TypeInfo> {
        let mut services = Vec::new();
        for descriptor in self.descriptors.iter().filter(|descriptor| descriptor.post_init) {
            if !services.contains(&descriptor.service) {
                services.push(descriptor.service);
            }
        }
        services
    }

    /// Calls `resolve` for every post-init service once the host container is built,
    /// so that those services are created eagerly.
    ///
    /// # Errors
    /// Returns the first error of `resolve`, remaining services are not resolved.
    pub fn init_post_specks<E>(&self, mut resolve: impl FnMut(TypeInfo) -> Result<(), E>) -> Result<(), E> {
        for service in self.post_init_services() {
            tracing::debug!("Post init: {}", service);
            resolve(service)?;
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<ServiceDescriptor> {
        self.descriptors
    }
}

impl ServiceCollection for Services {
    #[inline]
    fn add(&mut self, descriptor: ServiceDescriptor) -> anyhow::Result<()> {
        self.descriptors.push(descriptor);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Services {
    type Item = &'a ServiceDescriptor;
    type IntoIter = core::slice::Iter<'a, ServiceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Services {
    type Item = ServiceDescriptor;
    type IntoIter = alloc::vec::IntoIter<ServiceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.into_iter()
    }
}
