use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `GetTypeMeta` trait.
///
/// `constructor` is the name of the `TypeMeta` constructor,
/// `structure` or `enumeration`.
pub(crate) fn impl_trait_get_type_meta(meta: &ReflectMeta, constructor: TokenStream) -> TokenStream {
    let vc_reflect_path = meta.vc_reflect_path();
    let get_type_meta_ = crate::path::get_type_meta_(vc_reflect_path);
    let type_meta_ = crate::path::type_meta_(vc_reflect_path);

    let ident = meta.ident();

    quote! {
        impl #get_type_meta_ for #ident {
            #[inline]
            fn get_type_meta() -> #type_meta_ {
                #type_meta_::#constructor::<Self>()
            }
        }
    }
}
