use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use std::env::var_os;
use syn::parse::Parse;

mod attr_parsing;
mod specky;

/// Implements `specky::Specky` for a struct or enum and links it into the entry assembly.
///
/// ```ignore
/// #[derive(Specky)]
/// #[implements(dyn FooId, dyn FooTime)]
/// #[singleton(as = dyn FooTime)]
/// #[scoped(as = dyn FooId, post_init)]
/// struct BFoo;
/// ```
#[proc_macro_derive(Specky, attributes(singleton, scoped, transient, implements))]
pub fn derive_specky(item: TokenStream) -> TokenStream {
    expand_with(item, specky::expand)
}

fn expand_with<F, I, K>(input: TokenStream, f: F) -> TokenStream
where
    F: FnOnce(I) -> syn::Result<K>,
    I: Parse,
    K: ToTokens,
{
    expand(syn::parse(input).and_then(f))
}

fn expand<T>(result: syn::Result<T>) -> TokenStream
where
    T: ToTokens,
{
    match result {
        Ok(tokens) => {
            let tokens = (quote! { #tokens }).into();
            if var_os("MACROS_DEBUG").is_some() {
                eprintln!("{tokens}");
            }
            tokens
        }
        Err(err) => err.into_compile_error().into(),
    }
}
