use core::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::errors::RegisterErrorKind;

/// How long the container keeps an instance of a registered service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Lifetime {
    /// One instance for the whole container.
    #[default]
    Singleton,
    /// One instance per container scope.
    Scoped,
    /// A new instance on every request.
    Transient,
}

impl Lifetime {
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Lifetime::Singleton => "singleton",
            Lifetime::Scoped => "scoped",
            Lifetime::Transient => "transient",
        }
    }

    #[inline]
    #[must_use]
    pub const fn all() -> [Self; 3] {
        use Lifetime::{Scoped, Singleton, Transient};

        [Singleton, Scoped, Transient]
    }
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Lifetime {
    type Err = RegisterErrorKind;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|lifetime| lifetime.name().eq_ignore_ascii_case(tag))
            .ok_or_else(|| RegisterErrorKind::UnknownSpeckKind { tag: tag.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::Lifetime;
    use crate::errors::RegisterErrorKind;

    #[test]
    fn test_parse_tags() {
        assert_eq!("singleton".parse::<Lifetime>().unwrap(), Lifetime::Singleton);
        assert_eq!("Scoped".parse::<Lifetime>().unwrap(), Lifetime::Scoped);
        assert_eq!("TRANSIENT".parse::<Lifetime>().unwrap(), Lifetime::Transient);
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = "pooled".parse::<Lifetime>().unwrap_err();
        assert!(matches!(err, RegisterErrorKind::UnknownSpeckKind { ref tag } if tag == "pooled"));
    }

    #[test]
    fn test_default_is_singleton() {
        assert_eq!(Lifetime::default(), Lifetime::Singleton);
    }
}
