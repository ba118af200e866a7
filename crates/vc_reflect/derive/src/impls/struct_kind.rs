use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Implement `Typed`, `Reflect`, `Instantiate` and `GetTypeMeta` for a
/// struct with named fields or a unit struct.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let vc_reflect_path = meta.vc_reflect_path();

    let class_info_ = crate::path::class_info_(vc_reflect_path);
    let field_info_ = crate::path::field_info_(vc_reflect_path);
    let field_origin_ = crate::path::field_origin_(vc_reflect_path);
    let field_value_ = crate::path::field_value_(vc_reflect_path);
    let field_error_ = crate::path::field_error_(vc_reflect_path);
    let reflect_ = crate::path::reflect_(vc_reflect_path);
    let typed_ = crate::path::typed_(vc_reflect_path);
    let value_ = crate::path::value_(vc_reflect_path);
    let externalize_ = crate::path::externalize_(vc_reflect_path);
    let instantiate_ = crate::path::instantiate_(vc_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(vc_reflect_path);
    let option_ = crate::path::option_();
    let default_ = crate::path::default_();

    let name = meta.name_expression();
    let externalizable = meta.attrs().externalizable.is_some();

    // ---------------------------------------------------------------------
    // Typed

    let class_info_tokens = if externalizable {
        quote! { #class_info_::external(#name) }
    } else {
        let field_infos: Vec<TokenStream> = info
            .active_fields()
            .map(|field| {
                let ty = field.ty;
                let field_name = field.ident.to_string();
                quote! { #field_info_::new::<#ty>(#field_name) }
            })
            .collect();
        let with_fields = if field_infos.is_empty() {
            crate::utils::empty()
        } else {
            quote! { .with_fields([#(#field_infos),*]) }
        };
        let with_parent = info.parent().map(|parent| {
            let ty = parent.ty;
            quote! { .with_parent(<#ty as #typed_>::class_info()) }
        });
        quote! {
            #class_info_::structure(#name)
                #with_fields
                #with_parent
        }
    };

    let typed_impl = super::impl_trait_typed(meta, class_info_tokens);

    // ---------------------------------------------------------------------
    // Reflect

    let kind_methods = if externalizable {
        quote! {
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
            fn as_external(&self) -> #option_<&dyn #externalize_> {
                #option_::Some(self)
            }

            #[inline]
            fn as_external_mut(&mut self) -> #option_<&mut dyn #externalize_> {
                #option_::Some(self)
            }
        }
    } else {
        let read_arms = info.active_fields().enumerate().map(|(id, field)| {
            let ident = field.ident;
            quote! { #id => #macro_exports_::Result::Ok(#field_value_::to_value(&self.#ident)), }
        });
        let write_arms = info.active_fields().enumerate().map(|(id, field)| {
            let ident = field.ident;
            quote! {
                #id => {
                    self.#ident = #field_value_::from_value(&value)?;
                    #macro_exports_::Result::Ok(())
                }
            }
        });

        let (read_fallback, write_fallback) = match info.parent() {
            Some(parent) => {
                let ident = parent.ident;
                (
                    quote! {
                        match <Self as #typed_>::class_info().field_at(id).map(#field_info_::origin) {
                            #option_::Some(#field_origin_::Inherited(inner)) => {
                                #reflect_::field_at(&self.#ident, inner)
                            }
                            _ => #macro_exports_::Result::Err(#field_error_::NoSuchField(id)),
                        }
                    },
                    quote! {
                        match <Self as #typed_>::class_info().field_at(id).map(#field_info_::origin) {
                            #option_::Some(#field_origin_::Inherited(inner)) => {
                                #reflect_::set_field_at(&mut self.#ident, inner, value)
                            }
                            _ => #macro_exports_::Result::Err(#field_error_::NoSuchField(id)),
                        }
                    },
                )
            }
            None => (
                quote! { #macro_exports_::Result::Err(#field_error_::NoSuchField(id)) },
                quote! { #macro_exports_::Result::Err(#field_error_::NoSuchField(id)) },
            ),
        };

        quote! {
            fn field_at(&self, id: usize) -> #macro_exports_::Result<#value_, #field_error_> {
                match id {
                    #(#read_arms)*
                    _ => #read_fallback,
                }
            }

            #[allow(unused_variables, reason = "unit structs ignore the value")]
            fn set_field_at(
                &mut self,
                id: usize,
                value: #value_,
            ) -> #macro_exports_::Result<(), #field_error_> {
                match id {
                    #(#write_arms)*
                    _ => #write_fallback,
                }
            }
        }
    };

    let reflect_impl = super::impl_trait_reflect(meta, kind_methods);

    // ---------------------------------------------------------------------
    // Instantiate

    let ident = meta.ident();
    let bare = if info.is_unit() {
        quote! { Self }
    } else {
        let inits = info.fields().iter().map(|field| {
            let field_ident = field.ident;
            let ty = field.ty;
            if field.attrs.parent.is_some() {
                quote! { #field_ident: <#ty as #instantiate_>::instantiate_bare() }
            } else {
                quote! { #field_ident: <#ty as #default_>::default() }
            }
        });
        quote! { Self { #(#inits),* } }
    };

    let instantiate_impl = quote! {
        impl #instantiate_ for #ident {
            #[inline]
            fn instantiate_bare() -> Self {
                #bare
            }
        }
    };

    let get_type_meta_impl = super::impl_trait_get_type_meta(meta, quote! { structure });
    let auto_register = super::get_auto_register_impl(meta);

    quote! {
        #typed_impl

        #reflect_impl

        #instantiate_impl

        #get_type_meta_impl

        #auto_register
    }
}
