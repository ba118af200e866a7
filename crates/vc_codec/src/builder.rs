use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use vc_reflect::Obj;
use vc_reflect::info::ClassInfo;
use vc_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistryArc};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{ConfigError, Result};
use crate::serializer::Serializer;
use crate::tracker::ReferenceStrategy;
use crate::user::{DecodeFn, EncodeFn, UserCodecs, with_user_value};

/// Configures a [`Serializer`].
///
/// Everything set here is part of the contract between writer and reader:
/// both sides must use the same singletons, the same class list in the same
/// order and the same user codec ids.
///
/// # Examples
///
/// ```
/// use vc_codec::Serializer;
/// use vc_reflect::{Obj, derive::Reflect};
///
/// #[derive(Reflect)]
/// #[reflect(name = "demo.Point")]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let origin = Obj::from("origin");
/// let serializer = Serializer::builder()
///     .singletons([origin.clone()])
///     .register_class::<Point>()
///     .reference_linear()
///     .build()
///     .unwrap();
///
/// let back = serializer.clone_value(&Some(origin.clone())).unwrap().unwrap();
/// assert!(Obj::ptr_eq(&back, &origin));
///
/// let point = Some(Obj::from_reflect(Point { x: 1, y: 2 }));
/// assert_eq!(serializer.clone_value(&point).unwrap(), point);
/// ```
#[must_use]
pub struct SerializerBuilder {
    pub(crate) singletons: Vec<Obj>,
    pub(crate) classes: Vec<ClassInfo>,
    pub(crate) types: Vec<TypeMeta>,
    pub(crate) registry: Option<TypeRegistryArc>,
    pub(crate) strategy: ReferenceStrategy,
    pub(crate) unknown_type: Option<Box<dyn Fn(&TypeMeta)>>,
    pub(crate) user: UserCodecs,
}

impl Default for SerializerBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SerializerBuilder {
    /// A builder with no singletons, no classes, no user codecs and
    /// [`ReferenceStrategy::IdentityMap`].
    pub fn new() -> Self {
        Self {
            singletons: Vec::new(),
            classes: Vec::new(),
            types: Vec::new(),
            registry: None,
            strategy: ReferenceStrategy::default(),
            unknown_type: None,
            user: UserCodecs::default(),
        }
    }

    /// Appends objects written by index instead of by value.
    ///
    /// Singletons are matched by identity. Decoding yields the very same
    /// handles, so the reader must configure the same objects in the same
    /// order.
    pub fn singletons(mut self, singletons: impl IntoIterator<Item = Obj>) -> Self {
        self.singletons.extend(singletons);
        self
    }

    /// Appends `T` to the class catalog and registers it for decoding.
    ///
    /// The position in the catalog becomes the class id on the wire, so
    /// classes must be registered in the same order on both sides.
    pub fn register_class<T: GetTypeMeta>(mut self) -> Self {
        let meta = T::get_type_meta();
        self.classes.push(meta.class_info().clone());
        self.types.push(meta);
        self
    }

    /// Appends a class shape to the catalog, for example one persisted by an
    /// earlier build.
    ///
    /// A type with the same name must be registered by the time
    /// [`build`](Self::build) runs.
    pub fn register_class_info(mut self, info: ClassInfo) -> Self {
        self.classes.push(info);
        self
    }

    /// Makes `T` decodable without giving it a catalog id.
    pub fn register_type<T: GetTypeMeta>(mut self) -> Self {
        self.types.push(T::get_type_meta());
        self
    }

    /// Uses a shared registry instead of a private one.
    pub fn type_registry(mut self, registry: TypeRegistryArc) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Called the first time a structural type outside the catalog is
    /// written, once per type for the lifetime of the serializer.
    pub fn unknown_type_callback(mut self, f: impl Fn(&TypeMeta) + 'static) -> Self {
        self.unknown_type = Some(Box::new(f));
        self
    }

    #[inline]
    pub fn reference_strategy(mut self, strategy: ReferenceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// See [`ReferenceStrategy::Disabled`].
    #[inline]
    pub fn reference_disable(self) -> Self {
        self.reference_strategy(ReferenceStrategy::Disabled)
    }

    /// See [`ReferenceStrategy::Linear`].
    #[inline]
    pub fn reference_linear(self) -> Self {
        self.reference_strategy(ReferenceStrategy::Linear)
    }

    /// See [`ReferenceStrategy::IdentityMap`].
    #[inline]
    pub fn reference_identity_map(self) -> Self {
        self.reference_strategy(ReferenceStrategy::IdentityMap)
    }

    /// See [`ReferenceStrategy::EqualityMap`].
    #[inline]
    pub fn reference_equality_map(self) -> Self {
        self.reference_strategy(ReferenceStrategy::EqualityMap)
    }

    /// Writes every `T` with `f` under the user id `id`.
    ///
    /// `T` is a [`Reflect`](vc_reflect::Reflect) struct or the value of an
    /// [`Opaque`](vc_reflect::object::Opaque). A type can have one encoder.
    pub fn register_encoder<T: Any>(
        mut self,
        id: u32,
        f: impl Fn(&mut Encoder<'_>, &T) -> Result<()> + 'static,
    ) -> Result<Self, ConfigError> {
        let encode: EncodeFn = Box::new(move |enc: &mut Encoder<'_>, obj: &Obj| {
            with_user_value::<T>(obj, |value| f(enc, value))
        });
        self.user.add_encoder::<T>(id, encode)?;
        Ok(self)
    }

    /// Reads values written under the user id `id` with `f`.
    ///
    /// An id can have one decoder.
    pub fn register_decoder(
        mut self,
        id: u32,
        f: impl Fn(&mut Decoder<'_>) -> Result<Obj> + 'static,
    ) -> Result<Self, ConfigError> {
        let decode: DecodeFn = Box::new(f);
        self.user.add_decoder(id, decode)?;
        Ok(self)
    }

    /// Validates the configuration and creates the [`Serializer`].
    ///
    /// Fails when the encoder and decoder ids differ or a catalog class has
    /// no registered type.
    pub fn build(self) -> Result<Serializer, ConfigError> {
        self.user.validate()?;
        let registry = self.registry.clone().unwrap_or_default();
        self.fill_registry(&registry);

        let known = registry.read();
        if let Some(info) = self.classes.iter().find(|info| !known.contains_name(info.name())) {
            return Err(ConfigError::TypeNotRegistered {
                type_name: info.name().into(),
            });
        }
        drop(known);

        Ok(Serializer::new_internal(self, registry))
    }

    fn fill_registry(&self, registry: &TypeRegistryArc) {
        #[cfg(feature = "auto_register")]
        registry.write().auto_register();
        for meta in &self.types {
            registry.ensure(*meta);
        }
    }

    /// Like [`build`](Self::build) for a configuration that cannot fail.
    pub(crate) fn finish(self) -> Serializer {
        let registry = self.registry.clone().unwrap_or_default();
        self.fill_registry(&registry);
        Serializer::new_internal(self, registry)
    }
}
