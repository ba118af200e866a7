use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectEnum;

/// Implement `Typed`, `Reflect`, `FromOrdinal` and `GetTypeMeta` for a
/// fieldless enum.
pub(crate) fn impl_enum(info: &ReflectEnum) -> TokenStream {
    let meta = info.meta();
    let vc_reflect_path = meta.vc_reflect_path();

    let class_info_ = crate::path::class_info_(vc_reflect_path);
    let field_error_ = crate::path::field_error_(vc_reflect_path);
    let value_ = crate::path::value_(vc_reflect_path);
    let from_ordinal_ = crate::path::from_ordinal_(vc_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(vc_reflect_path);
    let option_ = crate::path::option_();

    let name = meta.name_expression();
    let typed_impl = super::impl_trait_typed(meta, quote! { #class_info_::enumeration(#name) });

    let ordinal_arms = info.variants().iter().enumerate().map(|(ordinal, variant)| {
        let ordinal = ordinal as u32;
        quote! { Self::#variant => #ordinal, }
    });

    // An enum without variants has no values, `match *self {}` covers it.
    let ordinal_body = if info.variants().is_empty() {
        quote! { match *self {} }
    } else {
        quote! { #option_::Some(match *self { #(#ordinal_arms)* }) }
    };

    let kind_methods = quote! {
        #[inline]
        fn field_at(&self, id: usize) -> #macro_exports_::Result<#value_, #field_error_> {
            #macro_exports_::Result::Err(#field_error_::NoSuchField(id))
        }

        #[inline]
        fn set_field_at(
            &mut self,
            id: usize,
            _value: #value_,
        ) -> #macro_exports_::Result<(), #field_error_> {
            #macro_exports_::Result::Err(#field_error_::NoSuchField(id))
        }

        #[inline]
        fn ordinal(&self) -> #option_<u32> {
            #ordinal_body
        }
    };

    let reflect_impl = super::impl_trait_reflect(meta, kind_methods);

    let from_arms = info.variants().iter().enumerate().map(|(ordinal, variant)| {
        let ordinal = ordinal as u32;
        quote! { #ordinal => #option_::Some(Self::#variant), }
    });

    let ident = meta.ident();
    let from_ordinal_impl = quote! {
        impl #from_ordinal_ for #ident {
            fn from_ordinal(ordinal: u32) -> #option_<Self> {
                match ordinal {
                    #(#from_arms)*
                    _ => #option_::None,
                }
            }
        }
    };

    let get_type_meta_impl = super::impl_trait_get_type_meta(meta, quote! { enumeration });
    let auto_register = super::get_auto_register_impl(meta);

    quote! {
        #typed_impl

        #reflect_impl

        #from_ordinal_impl

        #get_type_meta_impl

        #auto_register
    }
}
