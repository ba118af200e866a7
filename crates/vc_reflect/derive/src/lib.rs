//! See following macros:
//!
//! - [`Reflect`]
//! - [`impl_auto_register`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Structural Reflection Derivation
///
/// `#[derive(Reflect)]` implements the following traits:
///
/// - `Typed`
/// - `Reflect`
/// - `GetTypeMeta`
/// - `Instantiate` (for `struct T { ... }` and `struct T;`)
/// - `FromOrdinal` (for `enum T { A, B, ... }`)
///
/// Tuple structs, enums with data and generic types are rejected.
///
/// ## Field Types
///
/// Every reflected field must implement `FieldValue`: the primitive
/// numbers, `bool`, `String`, `Uuid`, big numbers, `Vec`s of primitives,
/// `Obj` for any other object and `Option<T>` for a nullable `T`.
/// A field referring to another object should be an `Obj` (or
/// `Option<Obj>`), which keeps its identity through a round-trip.
///
/// A decoded struct starts from `Default::default()` of every field before
/// the stream assigns them, so all field types need `Default`. A nested
/// object without a natural default belongs in an `Option<Obj>`.
///
/// ## Field Attributes
///
/// ### Transient Fields
///
/// `#[reflect(skip)]` leaves a field out of the class info. It is never
/// written and keeps its `Default` after decoding.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Session {
///     user: String,
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ### Parent Structs
///
/// `#[reflect(parent)]` marks a field whose type is itself a derived struct.
/// Its fields are appended after the own fields, except those shadowed by
/// an own field of the same name. At most one parent is allowed.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Base { id: i64 }
///
/// #[derive(Reflect)]
/// struct Derived {
///     name: String,
///     #[reflect(parent)]
///     base: Base,
/// }
/// // fields: name, id
/// ```
///
/// ## Type Attributes
///
/// ### Wire Name
///
/// The name written to streams defaults to `module_path!()::Ident`.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(name = "org.example.Point")]
/// struct Point { /* ... */ }
/// ```
///
/// ### Standard Traits
///
/// If a type implements `PartialEq` or `Hash`, declare it so equality and
/// deduplication go through those implementations:
///
/// ```rust, ignore
/// #[derive(Reflect, PartialEq, Hash)]
/// #[reflect(PartialEq, Hash)]
/// struct Color { /* ... */ }
/// ```
///
/// ### Externalizable Types
///
/// `#[reflect(externalizable)]` hides the fields. The type must implement
/// `Externalize` and writes its own payload.
///
/// ### auto_register
///
/// `#[reflect(auto_register)]` submits the type to the automatic registry,
/// see `TypeRegistry::auto_register`. Without the `auto_register` feature
/// this attribute does nothing.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let reflect_derive = match derive_data::ReflectDerive::from_input(&ast) {
        Ok(data) => data,
        Err(err) => return err.into_compile_error().into(),
    };

    let impls = match &reflect_derive {
        derive_data::ReflectDerive::Struct(data) => impls::impl_struct(data),
        derive_data::ReflectDerive::Enum(data) => impls::impl_enum(data),
    };

    TokenStream::from(quote::quote! {
        const _: () = {
            #impls
        };
    })
}

/// Add the type to the automatic registry.
///
/// If the feature is not enabled, this macro will not do anything.
///
/// The type must be concrete (no uncertain generic parameters).
///
/// ## Example
///
/// ```ignore
/// impl_auto_register!(foo::Foo);
/// ```
///
/// This is not conflict with `reflect(auto_register)` attribute.
///
/// See: [`derive Reflect`](derive_reflect)
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return utils::empty().into();

    #[cfg(feature = "auto_register")]
    {
        let type_path = parse_macro_input!(_input as syn::Type);

        let vc_reflect_path = path::vc_reflect();
        let auto_register_ = path::auto_register_(&vc_reflect_path);

        TokenStream::from(quote::quote! {
            const _: () = {
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        <#type_path as #auto_register_::__RegisterType>::__register
                    )
                }
            };
        })
    }
}
