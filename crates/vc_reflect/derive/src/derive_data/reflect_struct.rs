use syn::{Field, Ident, Token, Type, punctuated::Punctuated};

use super::{FieldAttributes, ReflectMeta};

/// A named field of a derived struct.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

/// A struct with named fields, or a unit struct.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
    is_unit: bool,
}

impl<'a> ReflectStruct<'a> {
    pub fn new(
        meta: ReflectMeta<'a>,
        fields: Option<&'a Punctuated<Field, Token![,]>>,
    ) -> syn::Result<Self> {
        let mut errors: Option<syn::Error> = None;
        let mut parsed = Vec::new();
        let mut parent_seen = false;

        for field in fields.into_iter().flatten() {
            let attrs = match FieldAttributes::parse_attrs(&field.attrs) {
                Ok(attrs) => attrs,
                Err(err) => {
                    crate::utils::combine_error(&mut errors, err);
                    continue;
                }
            };
            if let Some(span) = attrs.parent {
                if parent_seen {
                    crate::utils::combine_error(
                        &mut errors,
                        syn::Error::new(span, "at most one field can be the parent"),
                    );
                }
                parent_seen = true;
            }
            // Named fields always carry an ident.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            parsed.push(StructField {
                ident,
                ty: &field.ty,
                attrs,
            });
        }

        match errors {
            Some(err) => Err(err),
            None => Ok(Self {
                meta,
                fields: parsed,
                is_unit: fields.is_none(),
            }),
        }
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn is_unit(&self) -> bool {
        self.is_unit
    }

    /// All fields, in declaration order.
    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Fields exposed in the class info, in id order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields
            .iter()
            .filter(|f| f.attrs.skip.is_none() && f.attrs.parent.is_none())
    }

    #[inline]
    pub fn parent(&self) -> Option<&StructField<'a>> {
        self.fields.iter().find(|f| f.attrs.parent.is_some())
    }
}
