use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::cell::RefCell;
use core::fmt;
use std::io::{Read, Write};

use vc_reflect::registry::{TypeMeta, TypeRegistryArc};
use vc_reflect::{Obj, Value};
use vc_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::builder::SerializerBuilder;
use crate::catalog::{ArrayCatalog, ClassCatalog, NoCatalog};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::tracker::ReferenceStrategy;
use crate::user::UserCodecs;

/// Writes object graphs to byte streams and reads them back.
///
/// A `Serializer` holds configuration only. Every call to
/// [`serialize`](Self::serialize) or [`deserialize`](Self::deserialize)
/// creates its own reference tracker and local class table, so streams do not
/// share state.
///
/// The default configuration tracks references by identity and has no
/// singletons, classes or user codecs. Use [`Serializer::builder`] for
/// anything else.
///
/// # Examples
///
/// ```
/// use vc_codec::Serializer;
/// use vc_reflect::Obj;
///
/// let serializer = Serializer::default();
///
/// let bytes = serializer.to_bytes(&Some(Obj::from(5))).unwrap();
/// assert_eq!(bytes.len(), 1);
///
/// let text = Some(Obj::from("Hello World"));
/// let bytes = serializer.to_bytes(&text).unwrap();
/// assert_eq!(serializer.from_bytes(&bytes).unwrap(), text);
/// ```
pub struct Serializer {
    strategy: ReferenceStrategy,
    singletons: Box<[Obj]>,
    singleton_ids: HashMap<usize, u32>,
    catalog: Box<dyn ClassCatalog>,
    registry: TypeRegistryArc,
    user: UserCodecs,
    unknown_type: Option<Box<dyn Fn(&TypeMeta)>>,
    notified: RefCell<HashSet<TypeId>>,
}

impl Default for Serializer {
    fn default() -> Self {
        SerializerBuilder::new().finish()
    }
}

impl Serializer {
    #[inline]
    pub fn builder() -> SerializerBuilder {
        SerializerBuilder::new()
    }

    pub(crate) fn new_internal(builder: SerializerBuilder, registry: TypeRegistryArc) -> Self {
        let mut singleton_ids = HashMap::with_capacity_and_hasher(
            builder.singletons.len(),
            FixedHashState,
        );
        for (index, obj) in builder.singletons.iter().enumerate() {
            let index = index as u32;
            if let Some(first) = singleton_ids.get(&obj.addr()) {
                log::warn!("Singleton {index} is the same object as singleton {first}, it is never written");
                continue;
            }
            singleton_ids.insert(obj.addr(), index);
        }

        let catalog: Box<dyn ClassCatalog> = if builder.classes.is_empty() {
            Box::new(NoCatalog)
        } else {
            Box::new(ArrayCatalog::new(builder.classes))
        };

        Self {
            strategy: builder.strategy,
            singletons: builder.singletons.into_boxed_slice(),
            singleton_ids,
            catalog,
            registry,
            user: builder.user,
            unknown_type: builder.unknown_type,
            notified: RefCell::new(HashSet::with_hasher(FixedHashState)),
        }
    }

    // -------------------------------------------------------------------------
    // Entry points

    /// Writes `value` and everything reachable from it to `sink`.
    ///
    /// The sink is not flushed.
    pub fn serialize<W: Write>(&self, mut sink: W, value: &Value) -> Result<()> {
        let mut encoder = Encoder::new(&mut sink, self);
        encoder.write_value(value)
    }

    /// Reads one value from `source`.
    ///
    /// Bytes after the value are left unread.
    pub fn deserialize<R: Read>(&self, mut source: R) -> Result<Value> {
        let mut decoder = Decoder::new(&mut source, self);
        decoder.read_value()
    }

    /// [`serialize`](Self::serialize) into a new buffer.
    pub fn to_bytes(&self, value: &Value) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.serialize(&mut bytes, value)?;
        Ok(bytes)
    }

    /// [`deserialize`](Self::deserialize) from a buffer.
    pub fn from_bytes(&self, mut bytes: &[u8]) -> Result<Value> {
        self.deserialize(&mut bytes)
    }

    /// A deep copy of `value` made by a serialization round-trip.
    ///
    /// Shared references and cycles are kept, singletons stay the same
    /// objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_codec::Serializer;
    /// use vc_reflect::object::{ListKind, ListObj};
    /// use vc_reflect::{Obj, Object};
    ///
    /// let list = Obj::new(Object::List(ListObj::new(ListKind::ArrayList)));
    /// if let Object::List(items) = list.object() {
    ///     items.push(Some(list.clone()));
    /// }
    ///
    /// let copy = Serializer::default().clone_value(&Some(list.clone())).unwrap().unwrap();
    /// assert!(!Obj::ptr_eq(&copy, &list));
    /// if let Object::List(items) = copy.object() {
    ///     let first = items.snapshot()[0].clone().unwrap();
    ///     assert!(Obj::ptr_eq(&first, &copy));
    /// }
    /// ```
    pub fn clone_value(&self, value: &Value) -> Result<Value> {
        let bytes = self.to_bytes(value)?;
        self.from_bytes(&bytes)
    }

    // -------------------------------------------------------------------------
    // Configuration

    #[inline]
    pub fn strategy(&self) -> ReferenceStrategy {
        self.strategy
    }

    #[inline]
    pub fn type_registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    #[inline]
    pub fn catalog(&self) -> &dyn ClassCatalog {
        &*self.catalog
    }

    #[inline]
    pub fn singletons(&self) -> &[Obj] {
        &self.singletons
    }

    #[inline]
    pub fn singleton(&self, index: u32) -> Option<&Obj> {
        self.singletons.get(index as usize)
    }

    #[inline]
    pub(crate) fn singleton_index(&self, obj: &Obj) -> Option<u32> {
        if self.singleton_ids.is_empty() {
            return None;
        }
        self.singleton_ids.get(&obj.addr()).copied()
    }

    #[inline]
    pub(crate) fn user_codecs(&self) -> &UserCodecs {
        &self.user
    }

    pub(crate) fn notify_unknown(&self, meta: &TypeMeta) {
        let Some(callback) = &self.unknown_type else {
            return;
        };
        let first = self.notified.borrow_mut().insert(meta.type_id());
        if first {
            callback(meta);
        }
    }
}

impl fmt::Debug for Serializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializer")
            .field("strategy", &self.strategy)
            .field("singletons", &self.singletons.len())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use vc_reflect::derive::Reflect;
    use vc_reflect::info::{ClassInfo, FieldInfo};
    use vc_reflect::object::{ListKind, ListObj, MapKind, MapObj, ObjectArray};
    use vc_reflect::{Externalize, FieldError, FieldValue, Obj, Object, Value};

    use crate::error::{ConfigError, SerialError};
    use crate::header;

    use super::Serializer;

    #[derive(Reflect)]
    #[reflect(name = "test.Point")]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Reflect)]
    #[reflect(name = "test.Base")]
    struct Base {
        id: i64,
    }

    #[derive(Reflect)]
    #[reflect(name = "test.Named")]
    struct Named {
        name: String,
        #[reflect(parent)]
        base: Base,
    }

    #[derive(Reflect)]
    #[reflect(name = "test.Light")]
    enum Light {
        Red,
        Green,
    }

    #[derive(Reflect)]
    #[reflect(name = "test.Celsius", externalizable)]
    struct Celsius {
        #[reflect(skip)]
        milli: i64,
    }

    impl Externalize for Celsius {
        fn write_external(&self) -> Vec<Value> {
            vec![Some(Obj::from(self.milli))]
        }

        fn read_external(&mut self, values: Vec<Value>) -> Result<(), FieldError> {
            let value = values.into_iter().next().flatten();
            self.milli = i64::from_value(&value)?;
            Ok(())
        }
    }

    struct Meters(f64);

    fn list(items: Vec<Value>) -> Obj {
        Obj::new(Object::List(ListObj::from_items(ListKind::ArrayList, items)))
    }

    fn items(obj: &Obj) -> Vec<Value> {
        match obj.object() {
            Object::List(list) => list.snapshot(),
            Object::ObjectArray(array) => array.snapshot(),
            other => panic!("not a sequence: {other:?}"),
        }
    }

    fn round_trip(serializer: &Serializer, obj: Obj) -> Obj {
        let bytes = serializer.to_bytes(&Some(obj)).unwrap();
        serializer.from_bytes(&bytes).unwrap().unwrap()
    }

    fn point(x: i32, y: i32) -> Obj {
        Obj::from_reflect(Point { x, y })
    }

    #[test]
    fn small_values_fit_in_the_header() {
        let serializer = Serializer::default();
        for i in -9..=16 {
            assert_eq!(serializer.to_bytes(&Some(Obj::from(i))).unwrap().len(), 1);
        }
        assert_eq!(serializer.to_bytes(&Some(Obj::from(""))).unwrap().len(), 1);
        assert_eq!(serializer.to_bytes(&None).unwrap(), [header::NULL]);
        assert_eq!(serializer.from_bytes(&[header::NULL]).unwrap(), None);
    }

    #[test]
    fn built_in_values_round_trip() {
        let serializer = Serializer::default();
        let values = [
            Obj::from("Hello World"),
            Obj::from(i64::MIN),
            Obj::from(-1.5_f64),
            Obj::from(vec![1_i32, 2, 3, 4]),
            Obj::from('\u{e9}'),
            Obj::date(1_700_000_000_000),
        ];
        for value in values {
            assert_eq!(round_trip(&serializer, value.clone()), value);
        }

        let map = MapObj::with_capacity(MapKind::HashMap, 1);
        map.insert(Some(Obj::from(1)), Some(Obj::from("one")));
        let map = Obj::new(Object::Map(map));
        assert_eq!(round_trip(&serializer, map.clone()), map);

        let ints = Obj::from(vec![1_i32, 2, 3, 4]);
        let array = ObjectArray::from_items("Object", vec![Some(ints), None]);
        let array = Obj::new(Object::ObjectArray(array));
        assert_eq!(round_trip(&serializer, array.clone()), array);
    }

    #[test]
    fn shared_references_depend_on_strategy() {
        let a = Obj::from("shared");
        let pair = list(vec![Some(a.clone()), Some(a)]);

        let identity = Serializer::default();
        let bytes = identity.to_bytes(&Some(pair.clone())).unwrap();
        // The list is position 0, the string position 1.
        assert_eq!(bytes[bytes.len() - 2..], [header::OBJECT_STACK, 0x81]);
        let back = items(&identity.from_bytes(&bytes).unwrap().unwrap());
        assert!(Obj::ptr_eq(back[0].as_ref().unwrap(), back[1].as_ref().unwrap()));

        let disabled = Serializer::builder().reference_disable().build().unwrap();
        let back = items(&round_trip(&disabled, pair));
        assert!(!Obj::ptr_eq(back[0].as_ref().unwrap(), back[1].as_ref().unwrap()));
        assert_eq!(back[0], back[1]);
    }

    #[test]
    fn cycles_are_rebuilt() {
        let array = Obj::new(Object::ObjectArray(ObjectArray::new("Object", 2)));
        if let Object::ObjectArray(inner) = array.object() {
            inner.set(0, Some(array.clone()));
            inner.set(1, Some(Obj::from(7)));
        }
        for serializer in [
            Serializer::default(),
            Serializer::builder().reference_linear().build().unwrap(),
            Serializer::builder().reference_equality_map().build().unwrap(),
        ] {
            let copy = round_trip(&serializer, array.clone());
            let back = items(&copy);
            assert!(Obj::ptr_eq(back[0].as_ref().unwrap(), &copy));
            assert_eq!(back[1], Some(Obj::from(7)));
        }
    }

    #[test]
    fn equality_map_merges_equal_values() {
        let pair = list(vec![Some(Obj::from(10_000)), Some(Obj::from(10_000))]);

        let identity = Serializer::default();
        let equality = Serializer::builder().reference_equality_map().build().unwrap();
        let plain = identity.to_bytes(&Some(pair.clone())).unwrap();
        let merged = equality.to_bytes(&Some(pair.clone())).unwrap();
        assert!(merged.len() < plain.len());

        let back = items(&equality.from_bytes(&merged).unwrap().unwrap());
        assert!(Obj::ptr_eq(back[0].as_ref().unwrap(), back[1].as_ref().unwrap()));
        let back = items(&identity.from_bytes(&plain).unwrap().unwrap());
        assert!(!Obj::ptr_eq(back[0].as_ref().unwrap(), back[1].as_ref().unwrap()));
    }

    #[test]
    fn singletons_are_written_by_index() {
        let first = Obj::from("first");
        let second = Obj::from("second");
        let serializer = Serializer::builder()
            .singletons([first, second.clone()])
            .build()
            .unwrap();

        let bytes = serializer.to_bytes(&Some(second.clone())).unwrap();
        assert_eq!(bytes, [header::SINGLETON, 0x81]);
        let back = serializer.from_bytes(&bytes).unwrap().unwrap();
        assert!(Obj::ptr_eq(&back, &second));

        // Equal content is not enough.
        let other = Obj::from("second");
        assert_ne!(serializer.to_bytes(&Some(other)).unwrap()[0], header::SINGLETON);

        assert!(matches!(
            serializer.from_bytes(&[header::SINGLETON, 0x82]),
            Err(SerialError::UnknownSingleton(2))
        ));
    }

    #[test]
    fn opaque_singletons_keep_identity() {
        let unit = Obj::opaque(Meters(1.0));
        let serializer = Serializer::builder()
            .singletons([unit.clone()])
            .build()
            .unwrap();

        let bytes = serializer.to_bytes(&Some(unit.clone())).unwrap();
        assert_eq!(bytes, [header::SINGLETON, 0x80]);

        let pair = list(vec![Some(unit.clone()), Some(unit.clone())]);
        for item in items(&round_trip(&serializer, pair)) {
            assert!(Obj::ptr_eq(&item.unwrap(), &unit));
        }

        // Without the singleton an opaque value has no codec.
        assert!(matches!(
            Serializer::default().to_bytes(&Some(unit)),
            Err(SerialError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn structs_round_trip() {
        let serializer = Serializer::builder()
            .register_type::<Point>()
            .register_type::<Named>()
            .register_type::<Light>()
            .register_type::<Celsius>()
            .build()
            .unwrap();

        let p = point(3, -4);
        assert_eq!(round_trip(&serializer, p.clone()), p);

        let named = Obj::from_reflect(Named {
            name: "n".into(),
            base: Base { id: 42 },
        });
        let back = round_trip(&serializer, named);
        let fields = back.with_struct(|n: &Named| (n.name.clone(), n.base.id));
        assert_eq!(fields, Some(("n".into(), 42)));

        let green = round_trip(&serializer, Obj::from_reflect(Light::Green));
        assert_eq!(green.with_struct(|l: &Light| matches!(l, Light::Green)), Some(true));

        let warm = round_trip(&serializer, Obj::from_reflect(Celsius { milli: 21_500 }));
        assert_eq!(warm.with_struct(|c: &Celsius| c.milli), Some(21_500));
    }

    #[test]
    fn embedded_class_info_is_written_once() {
        let serializer = Serializer::builder().register_type::<Point>().build().unwrap();
        let pair = list(vec![Some(point(1, 2)), Some(point(3, 4))]);
        let bytes = serializer.to_bytes(&Some(pair.clone())).unwrap();

        let embedded = bytes.iter().filter(|b| **b == header::POJO_CLASSINFO).count();
        assert_eq!(embedded, 1);
        assert_eq!(serializer.from_bytes(&bytes).unwrap(), Some(pair));
    }

    #[test]
    fn catalog_classes_are_written_by_id() {
        let open = Serializer::builder().register_type::<Point>().build().unwrap();
        let catalog = Serializer::builder().register_class::<Point>().build().unwrap();
        let value = Some(point(1, 2));

        let long = open.to_bytes(&value).unwrap();
        let short = catalog.to_bytes(&value).unwrap();
        assert_eq!(long[0], header::POJO_CLASSINFO);
        assert_eq!(short[..2], [header::POJO_RESOLVER, 0x80]);
        assert!(short.len() < long.len());
        assert_eq!(catalog.from_bytes(&short).unwrap(), value);
    }

    #[test]
    fn catalog_field_order_may_differ() {
        let reversed = ClassInfo::structure("test.Point").with_fields([
            FieldInfo::from_parts("y", "i32", true),
            FieldInfo::from_parts("x", "i32", true),
        ]);
        let serializer = Serializer::builder()
            .register_type::<Point>()
            .register_class_info(reversed)
            .build()
            .unwrap();
        let p = point(5, 6);
        assert_eq!(round_trip(&serializer, p.clone()), p);
    }

    #[test]
    fn unknown_type_callback_fires_once() {
        let calls = Rc::new(Cell::new(0_u32));
        let counter = calls.clone();
        let serializer = Serializer::builder()
            .unknown_type_callback(move |meta| {
                assert_eq!(meta.name(), "test.Point");
                counter.set(counter.get() + 1);
            })
            .build()
            .unwrap();

        serializer.to_bytes(&Some(point(1, 1))).unwrap();
        serializer.to_bytes(&Some(point(2, 2))).unwrap();
        assert_eq!(calls.get(), 1);

        // The written type became decodable.
        assert!(serializer.type_registry().read().contains_name("test.Point"));
    }

    #[test]
    fn unknown_type_callback_fires_per_type() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let serializer = Serializer::builder()
            .register_class::<Base>()
            .unknown_type_callback(move |meta| log.borrow_mut().push(meta.name()))
            .build()
            .unwrap();

        let value = Some(list(vec![
            Some(point(1, 2)),
            Some(Obj::from_reflect(Light::Red)),
            Some(point(3, 4)),
            Some(Obj::from_reflect(Base { id: 7 })),
        ]));
        serializer.to_bytes(&value).unwrap();
        serializer.to_bytes(&value).unwrap();

        // `test.Base` is in the catalog and never reported.
        assert_eq!(*seen.borrow(), ["test.Point", "test.Light"]);
    }

    #[test]
    fn large_maps_round_trip() {
        let map = MapObj::new(MapKind::HashMap);
        for i in 0..5_000i32 {
            map.insert(Some(Obj::from(i.to_string())), Some(Obj::from(i)));
        }
        let back = round_trip(&Serializer::default(), Obj::new(Object::Map(map)));
        let Object::Map(back) = back.object() else {
            panic!("expected a map");
        };
        assert_eq!(back.len(), 5_000);
        assert_eq!(back.entries()[0].0, Some(Obj::from("0")));
        assert_eq!(back.get(&Some(Obj::from("4999"))), Some(Some(Obj::from(4999))));
    }

    #[test]
    fn user_codecs_round_trip() {
        let serializer = Serializer::builder()
            .register_encoder::<Meters>(3, |enc, m| {
                use crate::io::WriteBytes;
                enc.write_f64(m.0)
            })
            .unwrap()
            .register_decoder(3, |dec| {
                use crate::io::ReadBytes;
                Ok(Obj::opaque(Meters(dec.read_f64()?)))
            })
            .unwrap()
            .build()
            .unwrap();

        let bytes = serializer.to_bytes(&Some(Obj::opaque(Meters(2.5)))).unwrap();
        assert_eq!(bytes[..2], [header::USER_DESER, 0x83]);
        let back = serializer.from_bytes(&bytes).unwrap().unwrap();
        let Object::Opaque(opaque) = back.object() else {
            panic!("expected an opaque value");
        };
        assert_eq!(opaque.downcast_ref::<Meters>().map(|m| m.0), Some(2.5));

        // Without an encoder the opaque value cannot be written.
        assert!(matches!(
            Serializer::default().to_bytes(&Some(Obj::opaque(Meters(1.0)))),
            Err(SerialError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn corrupt_streams_fail() {
        let serializer = Serializer::default();
        assert!(matches!(serializer.from_bytes(&[0]), Err(SerialError::ZeroHeader)));
        assert!(matches!(
            serializer.from_bytes(&[header::JAVA_SERIALIZATION]),
            Err(SerialError::ForeignFormat)
        ));

        let err = serializer.from_bytes(&[header::USER_DESER, 0x85]).unwrap_err();
        assert!(matches!(err, SerialError::UnknownUserHeader(5)));
        assert_eq!(err.to_string(), "No user deserializer defined for user header 5");

        assert!(matches!(
            serializer.from_bytes(&[header::POJO_CLASSINFO, 0x81]),
            Err(SerialError::ClassInfoOrder { expected: 0, found: 1 })
        ));
        assert!(matches!(
            serializer.from_bytes(&[header::OBJECT_STACK, 0x80]),
            Err(SerialError::BackReference(0))
        ));
        assert!(matches!(
            serializer.from_bytes(&[header::ARRAYLIST, 0x82, header::INT_1]),
            Err(SerialError::Io(_))
        ));
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        let twice = Serializer::builder()
            .register_encoder::<Meters>(1, |_, _| Ok(()))
            .unwrap()
            .register_encoder::<Meters>(2, |_, _| Ok(()));
        assert!(matches!(twice, Err(ConfigError::DuplicateEncoder { .. })));

        let twice = Serializer::builder()
            .register_decoder(1, |_| Ok(Obj::from(0)))
            .unwrap()
            .register_decoder(1, |_| Ok(Obj::from(0)));
        assert!(matches!(twice, Err(ConfigError::DuplicateDecoder(1))));

        let lonely = Serializer::builder()
            .register_encoder::<Meters>(1, |_, _| Ok(()))
            .unwrap()
            .build();
        assert!(matches!(lonely, Err(ConfigError::MismatchedUserCodecs)));

        let unknown = Serializer::builder()
            .register_class_info(ClassInfo::structure("test.Missing"))
            .build();
        assert_eq!(
            unknown.unwrap_err(),
            ConfigError::TypeNotRegistered {
                type_name: "test.Missing".into()
            }
        );
    }
}
