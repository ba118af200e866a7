use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Ident, Path};

use super::TypeAttributes;

/// Data shared by every kind of derived type.
pub(crate) struct ReflectMeta<'a> {
    vc_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("vc_reflect_path", &self.vc_reflect_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident) -> Self {
        Self {
            attrs,
            ident,
            vc_reflect_path: crate::path::vc_reflect(),
        }
    }

    #[inline]
    pub fn vc_reflect_path(&self) -> &Path {
        &self.vc_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    /// Generate the wire name expression.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// ::core::concat!(::core::module_path!(), "::", "Foo")
    /// ```
    pub fn name_expression(&self) -> TokenStream {
        match &self.attrs.name {
            Some(lit) => lit.to_token_stream(),
            None => {
                let ident = self.ident.to_string();
                quote! {
                    ::core::concat!(::core::module_path!(), "::", #ident)
                }
            }
        }
    }
}
