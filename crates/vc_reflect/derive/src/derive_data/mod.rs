//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod reflect_enum;
mod reflect_meta;
mod reflect_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};

pub(crate) use reflect_enum::ReflectEnum;
pub(crate) use reflect_meta::ReflectMeta;
pub(crate) use reflect_struct::ReflectStruct;

use syn::{Data, DeriveInput, Fields, spanned::Spanned};

/// The parsed input of `#[derive(Reflect)]`.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Enum(ReflectEnum<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "`Reflect` cannot be derived for generic types, \
                 a wire name must identify exactly one type",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = ReflectMeta::new(attrs, &input.ident);

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => {
                    ReflectStruct::new(meta, Some(&fields.named)).map(ReflectDerive::Struct)
                }
                Fields::Unit => ReflectStruct::new(meta, None).map(ReflectDerive::Struct),
                Fields::Unnamed(fields) => Err(syn::Error::new(
                    fields.span(),
                    "`Reflect` requires named fields, tuple structs are not supported",
                )),
            },
            Data::Enum(data) => ReflectEnum::new(meta, data).map(ReflectDerive::Enum),
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "`Reflect` cannot be derived for unions",
            )),
        }
    }
}
