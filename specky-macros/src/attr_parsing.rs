use quote::ToTokens;
use syn::{
    parse::{Parse, ParseStream},
    Token,
};

fn duplicate_error<K: ToTokens>(kw: K) -> syn::Error {
    let kw_name = kw.to_token_stream().to_string();
    let msg = "` specified more than once";
    syn::Error::new_spanned(kw, ["`", &kw_name, msg].concat())
}

pub(crate) fn parse_assignment_attribute<K, T>(input: ParseStream<'_>, out: &mut Option<(K, T)>) -> syn::Result<()>
where
    K: Parse + ToTokens,
    T: Parse,
{
    let kw = input.parse()?;
    input.parse::<Token![=]>()?;
    let inner = input.parse()?;

    if out.is_some() {
        return Err(duplicate_error(kw));
    }

    *out = Some((kw, inner));

    Ok(())
}

pub(crate) fn parse_flag_attribute<K>(input: ParseStream<'_>, out: &mut Option<K>) -> syn::Result<()>
where
    K: Parse + ToTokens,
{
    let kw = input.parse()?;

    if out.is_some() {
        return Err(duplicate_error(kw));
    }

    *out = Some(kw);

    Ok(())
}

pub(crate) trait Combine: Sized {
    fn combine(self, other: Self) -> syn::Result<Self>;
}

/// Parses and combines every attribute named `ident`.
pub(crate) fn parse_attrs<T>(ident: &str, attrs: &[syn::Attribute]) -> Option<Result<T, (syn::Error, syn::Attribute)>>
where
    T: Combine + Parse,
{
    let mut iter = attrs
        .iter()
        .filter(|attr| attr.meta.path().is_ident(ident))
        .map(|attr| (attr, attr.parse_args::<T>()));

    let first = match iter.next() {
        Some((_, Ok(first))) => first,
        Some((attr, Err(err))) => return Some(Err((err, attr.clone()))),
        None => return None,
    };

    let result = iter.try_fold(first, |out, (attr, next_result)| match next_result {
        Ok(next) => out.combine(next).map_err(|err| (err, attr.clone())),
        Err(err) => Err((err, attr.clone())),
    });

    Some(result)
}

/// Parses an attribute which may be written without arguments, like `#[singleton]`.
pub(crate) fn parse_optional_args<T>(attr: &syn::Attribute) -> syn::Result<T>
where
    T: Parse + Default,
{
    match &attr.meta {
        syn::Meta::Path(_) => Ok(T::default()),
        syn::Meta::List(_) => attr.parse_args(),
        syn::Meta::NameValue(meta) => Err(syn::Error::new_spanned(meta, "expected `#[name]` or `#[name(...)]`")),
    }
}
