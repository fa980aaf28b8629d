//! Binary codec for schema objects.
//!
//! # Wire Format
//! ```text
//! object := fieldCount:u32 field*
//! field  := fieldId:u32 valueCount:u32 value*
//! value  := tag:u8 payload
//! ```
//!
//! Fixed-width payloads are little-endian; `sint32` / `sint64` values are
//! zigzag-mapped onto their unsigned width first. Strings and bytes carry a `u32`
//! length prefix; nested objects are encoded recursively. Field ids appear in
//! ascending order and values keep their insertion order, so encoding is
//! deterministic.

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::error::{Error, Result};
use crate::object::{SchemaObject, SchemaValue};
use crate::types::{EntityId, ValueKind};

/// Maximum object nesting accepted by the decoder.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Appends the encoded object to the buffer.
///
/// # Arguments
/// * `object` - Object to encode
/// * `buffer` - Destination buffer
pub fn encode_object<B: WriteBuffer + ?Sized>(object: &SchemaObject, buffer: &mut B) {
    let field_ids: Vec<_> = object.field_ids().collect();
    buffer.put_u32_le(len_u32(field_ids.len()));
    for field in field_ids {
        let values = object.values(field);
        buffer.put_u32_le(field);
        buffer.put_u32_le(len_u32(values.len()));
        for value in values {
            encode_value(value, buffer);
        }
    }
}

/// Encodes an object into a fresh byte vector.
#[must_use]
pub fn object_to_bytes(object: &SchemaObject) -> Vec<u8> {
    let mut buffer = Vec::new();
    encode_object(object, &mut buffer);
    buffer
}

/// Decodes a complete object from `bytes`.
///
/// # Errors
/// Returns an error if the buffer is truncated, contains an unknown value tag,
/// invalid UTF-8, nests too deeply, or has bytes left over.
pub fn decode_object(bytes: &[u8]) -> Result<SchemaObject> {
    let mut reader = ObjectReader::new(bytes);
    let object = reader.read_object()?;
    reader.finish()?;
    Ok(object)
}

fn encode_value<B: WriteBuffer + ?Sized>(value: &SchemaValue, buffer: &mut B) {
    buffer.put_u8(value.kind().tag());
    match value {
        SchemaValue::Bool(v) => buffer.put_u8(u8::from(*v)),
        SchemaValue::Uint32(v) => buffer.put_u32_le(*v),
        SchemaValue::Uint64(v) => buffer.put_u64_le(*v),
        SchemaValue::Int32(v) => buffer.put_i32_le(*v),
        SchemaValue::Int64(v) => buffer.put_i64_le(*v),
        SchemaValue::Sint32(v) => buffer.put_u32_le(zigzag_encode_32(*v)),
        SchemaValue::Sint64(v) => buffer.put_u64_le(zigzag_encode_64(*v)),
        SchemaValue::Fixed32(v) => buffer.put_u32_le(*v),
        SchemaValue::Fixed64(v) => buffer.put_u64_le(*v),
        SchemaValue::Sfixed32(v) => buffer.put_i32_le(*v),
        SchemaValue::Sfixed64(v) => buffer.put_i64_le(*v),
        SchemaValue::Float(v) => buffer.put_f32_le(*v),
        SchemaValue::Double(v) => buffer.put_f64_le(*v),
        SchemaValue::String(v) => {
            buffer.put_u32_le(len_u32(v.len()));
            buffer.put_bytes(v.as_bytes());
        }
        SchemaValue::Bytes(v) => {
            buffer.put_u32_le(len_u32(v.len()));
            buffer.put_bytes(v);
        }
        SchemaValue::EntityId(v) => buffer.put_u64_le(v.raw()),
        SchemaValue::Object(v) => encode_object(v, buffer),
    }
}

const fn zigzag_encode_32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

const fn zigzag_decode_32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

const fn zigzag_encode_64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

const fn zigzag_decode_64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Cursor decoding schema objects and length-prefixed sections.
#[derive(Debug)]
pub(crate) struct ObjectReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> ObjectReader<'a> {
    pub(crate) const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub(crate) const fn at(buffer: &'a [u8], offset: usize) -> Self {
        Self { buffer, offset }
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32> {
        self.buffer.ensure(self.offset, 4)?;
        let value = self.buffer.get_u32_le(self.offset);
        self.offset += 4;
        Ok(value)
    }

    pub(crate) fn read_object(&mut self) -> Result<SchemaObject> {
        self.read_object_at_depth(1)
    }

    /// Fails if any byte remains unread.
    pub(crate) fn finish(&self) -> Result<()> {
        let remaining = self.buffer.len().saturating_sub(self.offset);
        if remaining > 0 {
            return Err(Error::TrailingBytes { remaining });
        }
        Ok(())
    }

    fn read_object_at_depth(&mut self, depth: usize) -> Result<SchemaObject> {
        if depth > MAX_NESTING_DEPTH {
            return Err(Error::NestingTooDeep {
                max_depth: MAX_NESTING_DEPTH,
            });
        }

        let mut object = SchemaObject::new();
        let field_count = self.read_u32()?;
        for _ in 0..field_count {
            let field = self.read_u32()?;
            let value_count = self.read_u32()?;
            for _ in 0..value_count {
                let value = self.read_value(depth)?;
                object.push_value(field, value);
            }
        }
        Ok(object)
    }

    fn read_value(&mut self, depth: usize) -> Result<SchemaValue> {
        self.buffer.ensure(self.offset, 1)?;
        let tag_offset = self.offset;
        let tag = self.buffer.get_u8(tag_offset);
        self.offset += 1;

        let kind = ValueKind::from_tag(tag).ok_or(Error::InvalidValueTag {
            tag,
            offset: tag_offset,
        })?;
        if let Some(size) = kind.fixed_size() {
            self.buffer.ensure(self.offset, size)?;
        }

        let at = self.offset;
        let value = match kind {
            ValueKind::Bool => SchemaValue::Bool(self.buffer.get_u8(at) != 0),
            ValueKind::Uint32 => SchemaValue::Uint32(self.buffer.get_u32_le(at)),
            ValueKind::Uint64 => SchemaValue::Uint64(self.buffer.get_u64_le(at)),
            ValueKind::Int32 => SchemaValue::Int32(self.buffer.get_i32_le(at)),
            ValueKind::Int64 => SchemaValue::Int64(self.buffer.get_i64_le(at)),
            ValueKind::Sint32 => SchemaValue::Sint32(zigzag_decode_32(self.buffer.get_u32_le(at))),
            ValueKind::Sint64 => SchemaValue::Sint64(zigzag_decode_64(self.buffer.get_u64_le(at))),
            ValueKind::Fixed32 => SchemaValue::Fixed32(self.buffer.get_u32_le(at)),
            ValueKind::Fixed64 => SchemaValue::Fixed64(self.buffer.get_u64_le(at)),
            ValueKind::Sfixed32 => SchemaValue::Sfixed32(self.buffer.get_i32_le(at)),
            ValueKind::Sfixed64 => SchemaValue::Sfixed64(self.buffer.get_i64_le(at)),
            ValueKind::Float => SchemaValue::Float(self.buffer.get_f32_le(at)),
            ValueKind::Double => SchemaValue::Double(self.buffer.get_f64_le(at)),
            ValueKind::EntityId => SchemaValue::EntityId(EntityId(self.buffer.get_u64_le(at))),
            ValueKind::String => {
                let bytes = self.read_length_prefixed()?;
                let text = std::str::from_utf8(bytes)
                    .map_err(|_| Error::InvalidUtf8 { offset: at })?;
                return Ok(SchemaValue::String(text.to_owned()));
            }
            ValueKind::Bytes => return Ok(SchemaValue::Bytes(self.read_length_prefixed()?.to_vec())),
            ValueKind::Object => {
                return Ok(SchemaValue::Object(self.read_object_at_depth(depth + 1)?));
            }
        };
        self.offset += kind.fixed_size().unwrap_or(0);
        Ok(value)
    }

    fn read_length_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u32()? as usize;
        self.buffer.ensure(self.offset, len)?;
        let bytes = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }
}
