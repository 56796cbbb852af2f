mod attr;

use crate::specky::attr::{parse_implements, parse_specks, Speck};

use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned, ToTokens as _};
use syn::{spanned::Spanned as _, Data, DeriveInput, Error, Ident, Type};

fn generate_specks(specks: &[Speck]) -> TokenStream {
    let specks = specks.iter().map(|Speck { lifetime, args }| {
        let service = args.service.as_ref().map(|(_, ty)| {
            quote_spanned! { ty.span() => .as_service::<#ty>() }
        });
        let post_init = args.post_init.as_ref().map(|kw| {
            quote_spanned! { kw.span() => .post_init() }
        });
        quote! {
            .speck(::specky::Speck::new(::specky::Lifetime::#lifetime) #service #post_init)
        }
    });
    quote! { #( #specks )* }
}

/// Every service the type can be registered as, declared ones first, without duplicates.
fn collect_services<'a>(implements: &'a [Type], specks: &'a [Speck]) -> Vec<&'a Type> {
    let mut services: Vec<&Type> = Vec::new();
    let declared = specks.iter().filter_map(|speck| speck.args.service.as_ref().map(|(_, ty)| ty));
    for ty in implements.iter().chain(declared) {
        let tokens = ty.to_token_stream().to_string();
        if !services.iter().any(|added| added.to_token_stream().to_string() == tokens) {
            services.push(ty);
        }
    }
    services
}

fn generate_assignability_proof(ident: &Ident, services: &[&Type]) -> TokenStream {
    let asserts = services.iter().enumerate().map(|(i, ty)| {
        let fn_name = format_ident!("__assert_assignable_{}", i);
        quote_spanned! { ty.span() =>
            fn #fn_name(value: &#ident) -> &(#ty) {
                value
            }
        }
    });
    quote! {
        #[allow(dead_code, non_snake_case)]
        const _: () = {
            #( #asserts )*
        };
    }
}

fn generate_entry(ident: &Ident) -> TokenStream {
    let entry_name = format_ident!("__SPECKY_ENTRY_{}", ident.to_string().to_uppercase());
    quote_spanned! { ident.span() =>
        #[::specky::entry::distributed_slice(::specky::entry::__ENTRY_TYPES)]
        #[linkme(crate = ::specky::entry::linkme)]
        static #entry_name: fn() -> ::specky::TypeDescriptor = <#ident as ::specky::Specky>::type_descriptor;
    }
}

pub(crate) fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    if let Data::Union(data) = &input.data {
        return Err(Error::new_spanned(data.union_token, "#[derive(Specky)] can only be used on structs and enums"));
    }
    if !input.generics.params.is_empty() || input.generics.where_clause.is_some() {
        return Err(Error::new_spanned(&input.generics, "#[derive(Specky)] can't be used on generic types"));
    }

    let ident = &input.ident;
    let implements = parse_implements(&input.attrs)?;
    let specks = parse_specks(&input.attrs)?;
    let services = collect_services(&implements, &specks);

    let assignable = services.iter().map(|ty| {
        quote_spanned! { ty.span() => .implements::<#ty>() }
    });
    let specks_quote = generate_specks(&specks);
    let proof = generate_assignability_proof(ident, &services);
    let entry = generate_entry(ident);

    Ok(quote! {
        impl ::specky::Specky for #ident {
            fn type_descriptor() -> ::specky::TypeDescriptor {
                ::specky::TypeDescriptor::concrete::<Self>()
                    #( #assignable )*
                    #specks_quote
            }
        }

        #proof

        #entry
    })
}
