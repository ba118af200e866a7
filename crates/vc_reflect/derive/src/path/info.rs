use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn typed_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::info::Typed
    }
}

#[inline]
pub(crate) fn class_info_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::info::ClassInfo
    }
}

#[inline]
pub(crate) fn class_info_cell_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::info::ClassInfoCell
    }
}

#[inline]
pub(crate) fn field_info_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::info::FieldInfo
    }
}

#[inline]
pub(crate) fn field_origin_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::info::FieldOrigin
    }
}
