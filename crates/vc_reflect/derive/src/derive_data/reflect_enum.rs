use syn::{DataEnum, Fields, Ident, spanned::Spanned};

use super::ReflectMeta;

/// A fieldless enum.
pub(crate) struct ReflectEnum<'a> {
    meta: ReflectMeta<'a>,
    variants: Vec<&'a Ident>,
}

impl<'a> ReflectEnum<'a> {
    pub fn new(meta: ReflectMeta<'a>, data: &'a DataEnum) -> syn::Result<Self> {
        if let Some(span) = meta.attrs().externalizable {
            return Err(syn::Error::new(span, "enums cannot be externalizable"));
        }

        let mut errors: Option<syn::Error> = None;
        let mut variants = Vec::with_capacity(data.variants.len());

        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                crate::utils::combine_error(
                    &mut errors,
                    syn::Error::new(
                        variant.fields.span(),
                        "`Reflect` only supports enums whose variants have no fields",
                    ),
                );
                continue;
            }
            variants.push(&variant.ident);
        }

        match errors {
            Some(err) => Err(err),
            None => Ok(Self { meta, variants }),
        }
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Variants in declaration order, the index is the ordinal.
    #[inline]
    pub fn variants(&self) -> &[&'a Ident] {
        &self.variants
    }
}
