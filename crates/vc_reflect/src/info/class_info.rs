use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::{FieldInfo, FieldOrigin};
use crate::object::TypeName;

/// The shape of a serializable type.
///
/// Immutable once built. The same value describes a type in the registry,
/// in a configured catalog and in a stream.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::{ClassInfo, FieldInfo};
///
/// let base = ClassInfo::structure("demo.Base").with_fields([
///     FieldInfo::new::<i32>("id"),
///     FieldInfo::new::<String>("name"),
/// ]);
/// let info = ClassInfo::structure("demo.Derived")
///     .with_fields([FieldInfo::new::<String>("name"), FieldInfo::new::<i64>("size")])
///     .with_parent(&base);
///
/// // Own fields first, then parent fields that are not shadowed.
/// let names: Vec<&str> = info.fields().iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["name", "size", "id"]);
/// assert_eq!(info.index_of("id"), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassInfo {
    name: TypeName,
    fields: Box<[FieldInfo]>,
    is_enum: bool,
    externalizable: bool,
    object_stream: bool,
}

impl ClassInfo {
    /// A plain structure with no fields yet.
    #[inline]
    pub fn structure(name: impl Into<TypeName>) -> Self {
        Self::from_parts(name, Vec::new(), false, false, false)
    }

    /// A fieldless enumeration.
    #[inline]
    pub fn enumeration(name: impl Into<TypeName>) -> Self {
        Self::from_parts(name, Vec::new(), true, false, false)
    }

    /// A type that writes its own payload.
    #[inline]
    pub fn external(name: impl Into<TypeName>) -> Self {
        Self::from_parts(name, Vec::new(), false, true, false)
    }

    pub fn from_parts(
        name: impl Into<TypeName>,
        fields: Vec<FieldInfo>,
        is_enum: bool,
        externalizable: bool,
        object_stream: bool,
    ) -> Self {
        Self {
            name: name.into(),
            fields: fields.into_boxed_slice(),
            is_enum,
            externalizable,
            object_stream,
        }
    }

    /// Replace the own fields, numbering their origins in order.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldInfo>) -> Self {
        self.fields = fields
            .into_iter()
            .enumerate()
            .map(|(idx, field)| field.with_origin(FieldOrigin::Own(idx)))
            .collect();
        self
    }

    /// Append the fields of an embedded parent.
    ///
    /// Parent fields shadowed by an own field of the same name are skipped.
    pub fn with_parent(mut self, parent: &ClassInfo) -> Self {
        let mut fields = Vec::from(core::mem::take(&mut self.fields));
        for (idx, field) in parent.fields.iter().enumerate() {
            if fields.iter().any(|own| own.name() == field.name()) {
                continue;
            }
            fields.push(field.clone().with_origin(FieldOrigin::Inherited(idx)));
        }
        self.fields = fields.into_boxed_slice();
        self
    }

    /// The wire name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn name_cow(&self) -> &Cow<'static, str> {
        &self.name
    }

    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    #[inline]
    pub fn field_at(&self, id: usize) -> Option<&FieldInfo> {
        self.fields.get(id)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// The id of the first field named `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        self.is_enum
    }

    #[inline]
    pub fn is_externalizable(&self) -> bool {
        self.externalizable
    }

    #[inline]
    pub fn is_object_stream(&self) -> bool {
        self.object_stream
    }

    /// Values of this type carry no field list on the wire.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.externalizable || self.object_stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn origins_track_declaring_type() {
        let root = ClassInfo::structure("Root").with_fields([FieldInfo::new::<i32>("a")]);
        let mid = ClassInfo::structure("Mid")
            .with_fields([FieldInfo::new::<i32>("b"), FieldInfo::new::<i32>("a")])
            .with_parent(&root);
        assert_eq!(mid.field_len(), 2);

        let leaf = ClassInfo::structure("Leaf")
            .with_fields([FieldInfo::new::<String>("c")])
            .with_parent(&mid);
        let origins: Vec<FieldOrigin> = leaf.fields().iter().map(|f| f.origin()).collect();
        assert_eq!(
            origins,
            [
                FieldOrigin::Own(0),
                FieldOrigin::Inherited(0),
                FieldOrigin::Inherited(1),
            ]
        );
    }

    #[test]
    fn flags() {
        assert!(ClassInfo::enumeration("E").is_enum());
        assert!(ClassInfo::external("X").is_opaque());
        let stream = ClassInfo::from_parts("S", Vec::new(), false, false, true);
        assert!(stream.is_object_stream() && stream.is_opaque());
        assert!(!ClassInfo::structure("P").is_opaque());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn persists_as_json() {
        let info = ClassInfo::structure("demo.Point")
            .with_fields([FieldInfo::new::<i32>("x"), FieldInfo::new::<i32>("y")]);
        let json = serde_json::to_string(&info).unwrap();
        let back: ClassInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
