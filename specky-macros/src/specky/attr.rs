use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned as _,
    Attribute, Ident, Token, Type,
};

use crate::attr_parsing::{parse_assignment_attribute, parse_attrs, parse_flag_attribute, parse_optional_args, Combine};

pub(crate) mod kw {
    syn::custom_keyword!(post_init);
}

pub(crate) const LIFETIMES: [(&str, &str); 3] = [("singleton", "Singleton"), ("scoped", "Scoped"), ("transient", "Transient")];

/// Arguments of `#[singleton]`, `#[scoped]` and `#[transient]`.
#[derive(Default)]
pub(crate) struct SpeckArgs {
    pub(super) service: Option<(Token![as], Type)>,
    pub(super) post_init: Option<kw::post_init>,
}

impl Parse for SpeckArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();

        while !input.is_empty() {
            let lh = input.lookahead1();
            if lh.peek(Token![as]) {
                parse_assignment_attribute(input, &mut args.service)?;
            } else if lh.peek(kw::post_init) {
                parse_flag_attribute(input, &mut args.post_init)?;
            } else {
                return Err(lh.error());
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

pub(crate) struct Speck {
    /// Variant of `specky::Lifetime`
    pub(super) lifetime: Ident,
    pub(super) args: SpeckArgs,
}

/// Specks in declaration order.
pub(crate) fn parse_specks(attrs: &[Attribute]) -> syn::Result<Vec<Speck>> {
    let mut specks = Vec::new();
    for attr in attrs {
        let Some((_, variant)) = LIFETIMES.iter().find(|(name, _)| attr.path().is_ident(name)) else {
            continue;
        };
        let args = parse_optional_args::<SpeckArgs>(attr).map_err(|err| syn::Error::new_spanned(attr, err))?;
        specks.push(Speck {
            lifetime: Ident::new(variant, attr.path().span()),
            args,
        });
    }
    Ok(specks)
}

/// Arguments of `#[implements(...)]`, all of them are merged into one list.
pub(crate) struct ImplementsArgs {
    pub(super) services: Vec<Type>,
}

impl Parse for ImplementsArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let services = Punctuated::<Type, Token![,]>::parse_terminated(input)?;
        if services.is_empty() {
            return Err(input.error("expected at least one type"));
        }
        Ok(Self {
            services: services.into_iter().collect(),
        })
    }
}

impl Combine for ImplementsArgs {
    fn combine(mut self, other: Self) -> syn::Result<Self> {
        self.services.extend(other.services);
        Ok(self)
    }
}

pub(crate) fn parse_implements(attrs: &[Attribute]) -> syn::Result<Vec<Type>> {
    match parse_attrs::<ImplementsArgs>("implements", attrs) {
        Some(Ok(args)) => Ok(args.services),
        Some(Err((err, attr))) => Err(syn::Error::new_spanned(attr, err)),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_implements, parse_specks, SpeckArgs};

    use syn::{parse_quote, DeriveInput};

    #[test]
    fn test_speck_args() {
        let args = syn::parse_str::<SpeckArgs>("as = dyn FooId, post_init").unwrap();
        assert!(args.service.is_some());
        assert!(args.post_init.is_some());

        let args = syn::parse_str::<SpeckArgs>("").unwrap();
        assert!(args.service.is_none());
        assert!(args.post_init.is_none());
    }

    #[test]
    fn test_speck_args_errors() {
        let err = syn::parse_str::<SpeckArgs>("post_init, post_init").err().unwrap();
        assert_eq!(err.to_string(), "`post_init` specified more than once");

        assert!(syn::parse_str::<SpeckArgs>("as = AFoo, as = BFoo").is_err());
        assert!(syn::parse_str::<SpeckArgs>("finalizer = fin").is_err());
    }

    #[test]
    fn test_parse_specks_in_order() {
        let input: DeriveInput = parse_quote! {
            #[transient]
            #[implements(dyn FooId)]
            #[singleton(as = dyn FooTime)]
            #[implements(dyn FooTime)]
            struct BFoo;
        };

        let specks = parse_specks(&input.attrs).unwrap();
        let lifetimes = specks.iter().map(|speck| speck.lifetime.to_string()).collect::<Vec<_>>();
        assert_eq!(lifetimes, ["Transient", "Singleton"]);
        assert_eq!(parse_implements(&input.attrs).unwrap().len(), 2);
    }
}
