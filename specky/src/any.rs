use alloc::{collections::BTreeSet, string::String};
use core::{
    any::{type_name, TypeId},
    cmp::Ordering,
    fmt::{self, Display, Formatter, Write},
};

#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_short_name(self.name, f)
    }
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub fn unit() -> Self {
        Self::of::<()>()
    }

    /// Type name with the module path of every path inside it removed,
    /// e.g. `(a::B, c::D<e::F>)` becomes `(B, D<F>)`.
    #[must_use]
    pub fn short_name(&self) -> String {
        let mut name = String::with_capacity(self.name.len());
        // Writing into a `String` can't fail
        let _ = write_short_name(self.name, &mut name);
        name
    }
}

fn write_short_name<W: Write + ?Sized>(name: &str, out: &mut W) -> fmt::Result {
    let mut rest = name;
    while !rest.is_empty() {
        let end = rest
            .find(|ch: char| !(ch.is_alphanumeric() || ch == '_' || ch == ':'))
            .unwrap_or(rest.len());
        let (path, tail) = rest.split_at(end);

        if path.is_empty() {
            let mut chars = tail.chars();
            if let Some(ch) = chars.next() {
                out.write_char(ch)?;
            }
            rest = chars.as_str();
            continue;
        }

        let segment = path.rfind("::").map_or(path, |pos| &path[pos + 2..]);
        out.write_str(segment)?;
        rest = tail;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A type that can be constructed and registered as an implementation.
    Concrete,
    /// A trait object; usable as a service type and as a configuration surface.
    Interface,
    /// `()`, the return type of a method that provides nothing.
    Unit,
}

/// Identity of a type plus everything needed to validate a registration against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeShape {
    pub info: TypeInfo,
    pub kind: TypeKind,
    pub assignable_to: BTreeSet<TypeInfo>,
}

impl TypeShape {
    #[inline]
    #[must_use]
    pub fn new(info: TypeInfo, kind: TypeKind) -> Self {
        Self {
            info,
            kind,
            assignable_to: BTreeSet::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn concrete<T: 'static>() -> Self {
        Self::new(TypeInfo::of::<T>(), TypeKind::Concrete)
    }

    #[inline]
    #[must_use]
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self::new(TypeInfo::of::<T>(), TypeKind::Interface)
    }

    #[inline]
    #[must_use]
    pub fn unit() -> Self {
        Self::new(TypeInfo::unit(), TypeKind::Unit)
    }

    /// Declares that values of this type can be handed out as `S`.
    /// The claim is not checked here, `#[derive(Specky)]` proves it at compile time.
    #[inline]
    #[must_use]
    pub fn implements<S: ?Sized + 'static>(self) -> Self {
        self.assignable(TypeInfo::of::<S>())
    }

    #[inline]
    #[must_use]
    pub fn assignable(mut self, service: TypeInfo) -> Self {
        self.assignable_to.insert(service);
        self
    }

    #[inline]
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    #[inline]
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.kind == TypeKind::Unit
    }

    #[inline]
    #[must_use]
    pub fn is_assignable_to(&self, service: &TypeInfo) -> bool {
        self.info == *service || self.assignable_to.contains(service)
    }
}
