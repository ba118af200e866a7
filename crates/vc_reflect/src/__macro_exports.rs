//! Items used by the code generated from `vc_reflect_derive`.

pub use alloc::boxed::Box;
pub use core::result::Result;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::registry::{GetTypeMeta, TypeRegistry};

    pub use inventory;

    /// A registration function submitted through [`inventory`].
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Implemented for every [`GetTypeMeta`] type, so generated code only
    /// names the type.
    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: GetTypeMeta> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    // Runs with the other submissions, so the registry can tell that
    // `inventory` works on this platform.
    inventory::submit! {
        __AutoRegisterFunc(TypeRegistry::mark_auto_registered)
    }

    pub fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
