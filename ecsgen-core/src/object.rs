//! Generic schema object.
//!
//! A [`SchemaObject`] stores an ordered list of values per field id. Generated
//! code never inspects the map directly; it goes through three primitive
//! families selected by the value kind:
//!
//! - `add_<kind>(field, value)` appends a value under `field`
//! - `<kind>_count(field)` returns how many values of that kind are stored
//! - `index_<kind>(field, i)` reads the `i`-th value of that kind
//!
//! Repeated fields, options and maps are all expressed as "count, then indexed
//! access" on top of these primitives. Reading a missing index yields the
//! kind's default value, mirroring the behaviour of the wire format where an
//! absent singular field decodes as its zero value.

use crate::types::{EntityId, FieldId, ValueKind};
use std::collections::BTreeMap;

static EMPTY_OBJECT: SchemaObject = SchemaObject::new();

/// A single value stored in a schema object.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaValue {
    /// Boolean value.
    Bool(bool),
    /// Unsigned 32-bit value.
    Uint32(u32),
    /// Unsigned 64-bit value.
    Uint64(u64),
    /// Signed 32-bit value.
    Int32(i32),
    /// Signed 64-bit value.
    Int64(i64),
    /// Zigzag-encoded signed 32-bit value.
    Sint32(i32),
    /// Zigzag-encoded signed 64-bit value.
    Sint64(i64),
    /// Fixed-width unsigned 32-bit value.
    Fixed32(u32),
    /// Fixed-width unsigned 64-bit value.
    Fixed64(u64),
    /// Fixed-width signed 32-bit value.
    Sfixed32(i32),
    /// Fixed-width signed 64-bit value.
    Sfixed64(i64),
    /// 32-bit float value.
    Float(f32),
    /// 64-bit float value.
    Double(f64),
    /// String value.
    String(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Entity reference.
    EntityId(EntityId),
    /// Nested object.
    Object(SchemaObject),
}

impl SchemaValue {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Uint32(_) => ValueKind::Uint32,
            Self::Uint64(_) => ValueKind::Uint64,
            Self::Int32(_) => ValueKind::Int32,
            Self::Int64(_) => ValueKind::Int64,
            Self::Sint32(_) => ValueKind::Sint32,
            Self::Sint64(_) => ValueKind::Sint64,
            Self::Fixed32(_) => ValueKind::Fixed32,
            Self::Fixed64(_) => ValueKind::Fixed64,
            Self::Sfixed32(_) => ValueKind::Sfixed32,
            Self::Sfixed64(_) => ValueKind::Sfixed64,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::String(_) => ValueKind::String,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::EntityId(_) => ValueKind::EntityId,
            Self::Object(_) => ValueKind::Object,
        }
    }
}

/// Field-id keyed container of schema values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaObject {
    fields: BTreeMap<FieldId, FieldValues>,
}

/// Values of one field, plus the positions of each kind among them so that
/// indexed reads do not rescan the field.
#[derive(Debug, Clone, Default)]
struct FieldValues {
    values: Vec<SchemaValue>,
    positions: Vec<(ValueKind, Vec<usize>)>,
}

impl FieldValues {
    fn push(&mut self, value: SchemaValue) -> &mut SchemaValue {
        let kind = value.kind();
        let position = self.values.len();
        match self.positions.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, positions)) => positions.push(position),
            None => self.positions.push((kind, vec![position])),
        }
        self.values.push(value);
        &mut self.values[position]
    }

    fn of_kind(&self, kind: ValueKind) -> &[usize] {
        self.positions
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(&[], |(_, positions)| positions.as_slice())
    }
}

// Positions are derived from `values`.
impl PartialEq for FieldValues {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

macro_rules! copy_accessors {
    ($($variant:ident, $ty:ty, $add:ident, $count:ident, $index:ident;)*) => {
        $(
            #[doc = concat!("Appends a `", stringify!($ty), "` value under `field`.")]
            pub fn $add(&mut self, field: FieldId, value: $ty) {
                self.push_value(field, SchemaValue::$variant(value));
            }

            #[doc = concat!("Returns the number of `", stringify!($ty), "` values under `field`.")]
            #[must_use]
            pub fn $count(&self, field: FieldId) -> u32 {
                self.count_kind(field, ValueKind::$variant)
            }

            #[doc = concat!("Reads the `index`-th `", stringify!($ty), "` value under `field`.")]
            #[must_use]
            pub fn $index(&self, field: FieldId, index: u32) -> $ty {
                match self.nth_of_kind(field, ValueKind::$variant, index) {
                    Some(SchemaValue::$variant(value)) => *value,
                    _ => <$ty>::default(),
                }
            }
        )*
    };
}

impl SchemaObject {
    /// Creates an empty object.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Returns true if no field holds any value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if at least one value of any kind is stored under `field`.
    #[must_use]
    pub fn has_field(&self, field: FieldId) -> bool {
        self.fields
            .get(&field)
            .is_some_and(|field| !field.values.is_empty())
    }

    /// Returns the ids of all populated fields in ascending order.
    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.keys().copied()
    }

    /// Returns every value stored under `field`, in insertion order.
    #[must_use]
    pub fn values(&self, field: FieldId) -> &[SchemaValue] {
        self.fields
            .get(&field)
            .map_or(&[], |field| field.values.as_slice())
    }

    /// Appends a raw value under `field`.
    pub fn push_value(&mut self, field: FieldId, value: SchemaValue) {
        self.fields.entry(field).or_default().push(value);
    }

    /// Removes every value stored under `field`.
    pub fn clear_field(&mut self, field: FieldId) {
        self.fields.remove(&field);
    }

    /// Removes all fields.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    copy_accessors! {
        Bool, bool, add_bool, bool_count, index_bool;
        Uint32, u32, add_uint32, uint32_count, index_uint32;
        Uint64, u64, add_uint64, uint64_count, index_uint64;
        Int32, i32, add_int32, int32_count, index_int32;
        Int64, i64, add_int64, int64_count, index_int64;
        Sint32, i32, add_sint32, sint32_count, index_sint32;
        Sint64, i64, add_sint64, sint64_count, index_sint64;
        Fixed32, u32, add_fixed32, fixed32_count, index_fixed32;
        Fixed64, u64, add_fixed64, fixed64_count, index_fixed64;
        Sfixed32, i32, add_sfixed32, sfixed32_count, index_sfixed32;
        Sfixed64, i64, add_sfixed64, sfixed64_count, index_sfixed64;
        Float, f32, add_float, float_count, index_float;
        Double, f64, add_double, double_count, index_double;
        EntityId, EntityId, add_entity_id, entity_id_count, index_entity_id;
    }

    /// Appends a string value under `field`.
    pub fn add_string(&mut self, field: FieldId, value: &str) {
        self.push_value(field, SchemaValue::String(value.to_owned()));
    }

    /// Returns the number of string values under `field`.
    #[must_use]
    pub fn string_count(&self, field: FieldId) -> u32 {
        self.count_kind(field, ValueKind::String)
    }

    /// Reads the `index`-th string value under `field`.
    #[must_use]
    pub fn index_string(&self, field: FieldId, index: u32) -> String {
        match self.nth_of_kind(field, ValueKind::String, index) {
            Some(SchemaValue::String(value)) => value.clone(),
            _ => String::new(),
        }
    }

    /// Appends a bytes value under `field`.
    pub fn add_bytes(&mut self, field: FieldId, value: &[u8]) {
        self.push_value(field, SchemaValue::Bytes(value.to_vec()));
    }

    /// Returns the number of bytes values under `field`.
    #[must_use]
    pub fn bytes_count(&self, field: FieldId) -> u32 {
        self.count_kind(field, ValueKind::Bytes)
    }

    /// Reads the `index`-th bytes value under `field`.
    #[must_use]
    pub fn index_bytes(&self, field: FieldId, index: u32) -> Vec<u8> {
        match self.nth_of_kind(field, ValueKind::Bytes, index) {
            Some(SchemaValue::Bytes(value)) => value.clone(),
            _ => Vec::new(),
        }
    }

    /// Allocates a new child object under `field` and returns it for writing.
    pub fn add_object(&mut self, field: FieldId) -> &mut SchemaObject {
        let values = self.fields.entry(field).or_default();
        let SchemaValue::Object(object) = values.push(SchemaValue::Object(SchemaObject::new()))
        else {
            unreachable!("an object was pushed on the line above");
        };
        object
    }

    /// Returns the number of child objects under `field`.
    #[must_use]
    pub fn object_count(&self, field: FieldId) -> u32 {
        self.count_kind(field, ValueKind::Object)
    }

    /// Reads the `index`-th child object under `field`.
    ///
    /// Returns a shared empty object when the index is out of range.
    #[must_use]
    pub fn index_object(&self, field: FieldId, index: u32) -> &SchemaObject {
        match self.nth_of_kind(field, ValueKind::Object, index) {
            Some(SchemaValue::Object(object)) => object,
            _ => &EMPTY_OBJECT,
        }
    }

    fn count_kind(&self, field: FieldId, kind: ValueKind) -> u32 {
        let count = self
            .fields
            .get(&field)
            .map_or(0, |field| field.of_kind(kind).len());
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn nth_of_kind(&self, field: FieldId, kind: ValueKind, index: u32) -> Option<&SchemaValue> {
        let field = self.fields.get(&field)?;
        let position = *field.of_kind(kind).get(index as usize)?;
        field.values.get(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_add_count_index() {
        let mut object = SchemaObject::new();
        object.add_double(1, 1.5);
        object.add_double(1, -2.25);
        object.add_uint32(2, 7);

        assert_eq!(object.double_count(1), 2);
        assert_eq!(object.index_double(1, 0), 1.5);
        assert_eq!(object.index_double(1, 1), -2.25);
        assert_eq!(object.uint32_count(2), 1);
        assert_eq!(object.index_uint32(2, 0), 7);
    }

    #[test]
    fn test_missing_values_read_as_default() {
        let object = SchemaObject::new();
        assert_eq!(object.double_count(1), 0);
        assert_eq!(object.index_double(1, 0), 0.0);
        assert_eq!(object.index_string(1, 3), "");
        assert_eq!(object.index_entity_id(9, 0), EntityId(0));
        assert!(object.index_object(4, 0).is_empty());
    }

    #[test]
    fn test_counts_are_per_kind() {
        let mut object = SchemaObject::new();
        object.add_uint32(1, 3);
        object.add_string(1, "three");
        assert_eq!(object.uint32_count(1), 1);
        assert_eq!(object.string_count(1), 1);
        assert_eq!(object.object_count(1), 0);
        assert_eq!(object.index_string(1, 0), "three");
    }

    #[test]
    fn test_nested_objects() {
        let mut object = SchemaObject::new();
        {
            let entry = object.add_object(3);
            entry.add_string(1, "key");
            entry.add_int64(2, -9);
        }
        object.add_object(3).add_string(1, "other");

        assert_eq!(object.object_count(3), 2);
        let first = object.index_object(3, 0);
        assert_eq!(first.index_string(1, 0), "key");
        assert_eq!(first.index_int64(2, 0), -9);
        assert_eq!(object.index_object(3, 1).index_string(1, 0), "other");
    }

    #[test]
    fn test_has_field_and_clear() {
        let mut object = SchemaObject::new();
        assert!(!object.has_field(1));
        object.add_bool(1, true);
        object.add_bytes(2, &[1, 2, 3]);
        assert!(object.has_field(1));
        assert_eq!(object.field_ids().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(object.index_bytes(2, 0), vec![1, 2, 3]);

        object.clear_field(1);
        assert!(!object.has_field(1));
        object.clear();
        assert!(object.is_empty());
    }

    #[test]
    fn test_indexed_reads_follow_kind_positions() {
        let mut object = SchemaObject::new();
        for i in 0..100u32 {
            object.add_uint32(1, i);
            object.add_string(1, &i.to_string());
        }
        object.add_object(1).add_bool(1, true);

        assert_eq!(object.uint32_count(1), 100);
        assert_eq!(object.string_count(1), 100);
        assert_eq!(object.index_uint32(1, 57), 57);
        assert_eq!(object.index_string(1, 99), "99");
        assert_eq!(object.index_uint32(1, 100), 0);
        assert!(object.index_object(1, 0).index_bool(1, 0));
        assert_eq!(object.values(1).len(), 201);
    }

    #[test]
    fn test_extended_integer_kinds() {
        let mut object = SchemaObject::new();
        object.add_sint32(1, -5);
        object.add_sint64(2, -6);
        object.add_fixed32(3, 7);
        object.add_fixed64(4, 8);
        object.add_sfixed32(5, -9);
        object.add_sfixed64(6, -10);
        object.add_int32(1, 4);

        assert_eq!(object.sint32_count(1), 1);
        assert_eq!(object.int32_count(1), 1);
        assert_eq!(object.index_sint32(1, 0), -5);
        assert_eq!(object.index_sint64(2, 0), -6);
        assert_eq!(object.index_fixed32(3, 0), 7);
        assert_eq!(object.index_fixed64(4, 0), 8);
        assert_eq!(object.index_sfixed32(5, 0), -9);
        assert_eq!(object.index_sfixed64(6, 0), -10);
    }

    #[test]
    fn test_equality_ignores_insertion_bookkeeping() {
        let mut a = SchemaObject::new();
        a.add_uint32(1, 1);
        let mut b = SchemaObject::new();
        b.add_uint32(1, 1);
        assert_eq!(a, b);
        b.add_uint32(1, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(SchemaValue::Float(1.0).kind(), ValueKind::Float);
        assert_eq!(
            SchemaValue::Object(SchemaObject::new()).kind(),
            ValueKind::Object
        );
    }
}
