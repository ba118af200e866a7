use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect` trait.
///
/// The methods shared by every kind are generated here, `kind_methods`
/// carries `field_at`, `set_field_at` and the kind specific overrides.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, kind_methods: TokenStream) -> TokenStream {
    let vc_reflect_path = meta.vc_reflect_path();
    let reflect_ = crate::path::reflect_(vc_reflect_path);
    let typed_ = crate::path::typed_(vc_reflect_path);
    let class_info_ = crate::path::class_info_(vc_reflect_path);
    let get_type_meta_ = crate::path::get_type_meta_(vc_reflect_path);
    let type_meta_ = crate::path::type_meta_(vc_reflect_path);
    let option_ = crate::path::option_();

    let partial_eq = match meta.attrs().partial_eq {
        Some(span) => quote_spanned! { span =>
            #[inline]
            fn reflect_partial_eq(&self, other: &dyn #reflect_) -> #option_<bool> {
                #option_::Some(match other.downcast_ref::<Self>() {
                    #option_::Some(other) => ::core::cmp::PartialEq::eq(self, other),
                    #option_::None => false,
                })
            }
        },
        None => crate::utils::empty(),
    };

    let hash = match meta.attrs().hash {
        Some(span) => {
            let reflect_hasher_ = crate::path::reflect_hasher_(vc_reflect_path);
            quote_spanned! { span =>
                fn reflect_hash(&self) -> #option_<u64> {
                    let mut hasher = #reflect_hasher_();
                    ::core::hash::Hash::hash(self, &mut hasher);
                    #option_::Some(::core::hash::Hasher::finish(&hasher))
                }
            }
        }
        None => crate::utils::empty(),
    };

    let ident = meta.ident();

    quote! {
        impl #reflect_ for #ident {
            #[inline]
            fn class_info(&self) -> &'static #class_info_ {
                <Self as #typed_>::class_info()
            }

            #[inline]
            fn type_meta(&self) -> #type_meta_ {
                <Self as #get_type_meta_>::get_type_meta()
            }

            #kind_methods

            #partial_eq

            #hash
        }
    }
}
