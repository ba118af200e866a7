// -----------------------------------------------------------------------------
// Modules

mod enum_kind;
mod struct_kind;

mod auto_register;
mod trait_get_type_meta;
mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use enum_kind::impl_enum;
pub(crate) use struct_kind::impl_struct;

use auto_register::get_auto_register_impl;
use trait_get_type_meta::impl_trait_get_type_meta;
use trait_reflect::impl_trait_reflect;
use trait_typed::impl_trait_typed;
