use alloc::{string::String, vec::Vec};

use crate::{
    any::{TypeInfo, TypeShape},
    speck::Speck,
};

/// Types which describe themselves for scanning.
///
/// Usually implemented with `#[derive(Specky)]`, which also proves every declared service type at compile time.
pub trait Specky: 'static {
    #[must_use]
    fn type_descriptor() -> TypeDescriptor;

    #[inline]
    #[must_use]
    fn type_shape() -> TypeShape {
        Self::type_descriptor().shape
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemberKind {
    Property,
    Field,
    Method,
}

impl MemberKind {
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            MemberKind::Property => "property",
            MemberKind::Field => "field",
            MemberKind::Method => "method",
        }
    }
}

/// Member of a configuration surface.
/// `ty` is the declared type of a property or field, or the return type of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: &'static str,
    pub kind: MemberKind,
    pub ty: TypeShape,
    pub specks: Vec<Speck>,
}

/// Marks an interface as a configuration surface.
///
/// If `option` is set, the surface is only scanned while no option filter is active
/// or the option is one of the active ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub option: Option<String>,
}

impl Configuration {
    #[inline]
    #[must_use]
    pub fn is_enabled_by<'a>(&self, mut active: impl Iterator<Item = &'a str>) -> bool {
        match &self.option {
            Some(option) => active.any(|active| active == option.as_str()),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub shape: TypeShape,
    pub specks: Vec<Speck>,
    pub configuration: Option<Configuration>,
    pub members: Vec<Member>,
}

impl TypeDescriptor {
    #[inline]
    #[must_use]
    pub fn new(shape: TypeShape) -> Self {
        Self {
            shape,
            specks: Vec::new(),
            configuration: None,
            members: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn concrete<T: 'static>() -> Self {
        Self::new(TypeShape::concrete::<T>())
    }

    #[inline]
    #[must_use]
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self::new(TypeShape::interface::<T>())
    }

    #[inline]
    #[must_use]
    pub fn info(&self) -> TypeInfo {
        self.shape.info
    }

    #[inline]
    #[must_use]
    pub fn implements<S: ?Sized + 'static>(mut self) -> Self {
        self.shape = self.shape.implements::<S>();
        self
    }

    #[inline]
    #[must_use]
    pub fn speck(mut self, speck: Speck) -> Self {
        self.specks.push(speck);
        self
    }

    #[inline]
    #[must_use]
    pub fn specks(mut self, specks: impl IntoIterator<Item = Speck>) -> Self {
        self.specks.extend(specks);
        self
    }

    /// Marks the type as a configuration surface without an option.
    #[inline]
    #[must_use]
    pub fn configuration(mut self) -> Self {
        self.configuration = Some(Configuration::default());
        self
    }

    /// Marks the type as a configuration surface, enabled by `option`.
    #[inline]
    #[must_use]
    pub fn configuration_option(mut self, option: impl Into<String>) -> Self {
        self.configuration = Some(Configuration {
            option: Some(option.into()),
        });
        self
    }

    #[inline]
    #[must_use]
    pub fn member(mut self, name: &'static str, kind: MemberKind, ty: TypeShape, specks: impl IntoIterator<Item = Speck>) -> Self {
        self.members.push(Member {
            name,
            kind,
            ty,
            specks: specks.into_iter().collect(),
        });
        self
    }

    #[inline]
    #[must_use]
    pub fn property(self, name: &'static str, ty: TypeShape, specks: impl IntoIterator<Item = Speck>) -> Self {
        self.member(name, MemberKind::Property, ty, specks)
    }

    #[inline]
    #[must_use]
    pub fn field(self, name: &'static str, ty: TypeShape, specks: impl IntoIterator<Item = Speck>) -> Self {
        self.member(name, MemberKind::Field, ty, specks)
    }

    #[inline]
    #[must_use]
    pub fn method(self, name: &'static str, returns: TypeShape, specks: impl IntoIterator<Item = Speck>) -> Self {
        self.member(name, MemberKind::Method, returns, specks)
    }

    #[inline]
    #[must_use]
    pub fn property_of<T: Specky>(self, name: &'static str, specks: impl IntoIterator<Item = Speck>) -> Self {
        self.property(name, T::type_shape(), specks)
    }

    #[inline]
    #[must_use]
    pub fn field_of<T: Specky>(self, name: &'static str, specks: impl IntoIterator<Item = Speck>) -> Self {
        self.field(name, T::type_shape(), specks)
    }

    #[inline]
    #[must_use]
    pub fn method_of<T: Specky>(self, name: &'static str, specks: impl IntoIterator<Item = Speck>) -> Self {
        self.method(name, T::type_shape(), specks)
    }

    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.configuration.is_some()
    }

    /// Members of the given kind in declaration order.
    pub fn members_of(&self, kind: MemberKind) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(move |member| member.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::{Configuration, MemberKind, Specky, TypeDescriptor};
    use crate::{any::TypeShape, speck::Speck};

    use alloc::string::ToString as _;

    trait OkConfiguration {}
    struct AFoo;
    struct AFooId;

    impl Specky for AFoo {
        fn type_descriptor() -> TypeDescriptor {
            TypeDescriptor::concrete::<Self>()
        }
    }

    #[test]
    fn test_members_keep_kind_order() {
        let descriptor = TypeDescriptor::interface::<dyn OkConfiguration>()
            .configuration_option("Ok")
            .method("make", TypeShape::concrete::<AFooId>(), [Speck::transient()])
            .property_of::<AFoo>("a_foo", [Speck::singleton()])
            .field("a_foo_id", TypeShape::concrete::<AFooId>(), [Speck::scoped()]);

        assert!(descriptor.is_configuration());
        assert_eq!(descriptor.members.len(), 3);
        assert_eq!(descriptor.members_of(MemberKind::Property).map(|member| member.name).collect::<alloc::vec::Vec<_>>(), ["a_foo"]);
        assert_eq!(descriptor.members_of(MemberKind::Method).count(), 1);
    }

    #[test]
    fn test_configuration_option_filter() {
        let with_option = Configuration {
            option: Some("Ok".to_string()),
        };
        assert!(with_option.is_enabled_by(["Ok2", "Ok"].into_iter()));
        assert!(!with_option.is_enabled_by(["Invalid"].into_iter()));

        let without_option = Configuration::default();
        assert!(!without_option.is_enabled_by(["Ok"].into_iter()));
    }
}
