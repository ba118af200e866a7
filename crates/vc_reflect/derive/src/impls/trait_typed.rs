use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Typed`
///
/// `class_info_tokens` is an expression building the `ClassInfo`, it runs
/// once on first access.
pub(crate) fn impl_trait_typed(meta: &ReflectMeta, class_info_tokens: TokenStream) -> TokenStream {
    let vc_reflect_path = meta.vc_reflect_path();
    let typed_ = crate::path::typed_(vc_reflect_path);
    let class_info_ = crate::path::class_info_(vc_reflect_path);
    let class_info_cell_ = crate::path::class_info_cell_(vc_reflect_path);

    let ident = meta.ident();

    quote! {
        impl #typed_ for #ident {
            fn class_info() -> &'static #class_info_ {
                static CELL: #class_info_cell_ = #class_info_cell_::new();
                CELL.get_or_init(|| {
                    #class_info_tokens
                })
            }
        }
    }
}
