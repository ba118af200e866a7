use proc_macro2::Span;
use syn::{Attribute, LitStr, spanned::Spanned};

use crate::REFLECT_ATTRIBUTE_NAME;

/// Attributes placed on the type, `#[reflect(...)]`.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `name = "..."`, the wire name.
    pub name: Option<LitStr>,
    /// `PartialEq`, the type implements `PartialEq`.
    pub partial_eq: Option<Span>,
    /// `Hash`, the type implements `Hash`.
    pub hash: Option<Span>,
    /// `externalizable`, the type implements `Externalize`.
    pub externalizable: Option<Span>,
    /// `auto_register`, submit the type to the automatic registry.
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let span = meta.path.span();
                if meta.path.is_ident("name") {
                    if out.name.is_some() {
                        return Err(meta.error("duplicate `name` attribute"));
                    }
                    out.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("PartialEq") || meta.path.is_ident("partial_eq") {
                    out.partial_eq = Some(span);
                } else if meta.path.is_ident("Hash") || meta.path.is_ident("hash") {
                    out.hash = Some(span);
                } else if meta.path.is_ident("externalizable") {
                    out.externalizable = Some(span);
                } else if meta.path.is_ident("auto_register") {
                    out.auto_register = Some(span);
                } else {
                    return Err(meta.error(
                        "unsupported attribute, expected one of \
                         `name`, `PartialEq`, `Hash`, `externalizable`, `auto_register`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(out)
    }
}
