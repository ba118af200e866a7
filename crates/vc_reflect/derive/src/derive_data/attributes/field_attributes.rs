use proc_macro2::Span;
use syn::{Attribute, spanned::Spanned};

use crate::REFLECT_ATTRIBUTE_NAME;

/// Attributes placed on a field, `#[reflect(...)]`.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `skip`, the field is transient.
    pub skip: Option<Span>,
    /// `parent`, the field embeds the parent struct.
    pub parent: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = Some(meta.path.span());
                } else if meta.path.is_ident("parent") {
                    out.parent = Some(meta.path.span());
                } else {
                    return Err(meta.error("unsupported attribute, expected `skip` or `parent`"));
                }
                Ok(())
            })?;
        }

        if let (Some(_), Some(span)) = (out.skip, out.parent) {
            return Err(syn::Error::new(span, "a parent field cannot be skipped"));
        }

        Ok(out)
    }
}
