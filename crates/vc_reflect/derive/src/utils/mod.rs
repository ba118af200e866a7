use proc_macro2::TokenStream;

/// An empty token stream.
#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Pushes `err` into `errors`, combining it with earlier ones.
pub(crate) fn combine_error(errors: &mut Option<syn::Error>, err: syn::Error) {
    match errors {
        Some(prev) => prev.combine(err),
        None => *errors = Some(err),
    }
}
