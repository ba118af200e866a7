use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn type_meta_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::registry::TypeMeta
    }
}

#[inline]
pub(crate) fn get_type_meta_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::registry::GetTypeMeta
    }
}
