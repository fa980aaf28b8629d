//! Component and command payloads.
//!
//! Each payload pairs one or more [`SchemaObject`]s with the ids that address
//! it. Payloads encode as a [`PayloadHeader`] followed by the body:
//!
//! ```text
//! component data     := header fields
//! component update   := header fields events clearedCount:u32 clearedId:u32*
//! command request    := header object
//! command response   := header object
//! ```

use crate::buffer::WriteBuffer;
use crate::codec::{ObjectReader, encode_object};
use crate::error::{Error, Result};
use crate::header::{PayloadHeader, PayloadKind};
use crate::object::SchemaObject;
use crate::types::{CommandIndex, ComponentId, FieldId};

/// Full state of one component.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaComponentData {
    /// Component the data belongs to.
    pub component_id: ComponentId,
    /// Field values.
    pub fields: SchemaObject,
}

impl SchemaComponentData {
    /// Creates empty data for a component.
    #[must_use]
    pub const fn new(component_id: ComponentId) -> Self {
        Self {
            component_id,
            fields: SchemaObject::new(),
        }
    }

    /// Encodes the payload into bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        PayloadHeader::component(PayloadKind::ComponentData, self.component_id)
            .encode(&mut buffer);
        encode_object(&self.fields, &mut buffer);
        buffer
    }

    /// Decodes a payload produced by [`SchemaComponentData::encode`].
    ///
    /// # Errors
    /// Returns an error if the bytes are malformed or hold another payload kind.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (header, mut reader) = open(bytes, PayloadKind::ComponentData)?;
        let fields = reader.read_object()?;
        reader.finish()?;
        Ok(Self {
            component_id: header.component_id,
            fields,
        })
    }
}

/// Partial component state with events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaComponentUpdate {
    /// Component the update belongs to.
    pub component_id: ComponentId,
    /// Changed field values.
    pub fields: SchemaObject,
    /// Events keyed by event index.
    pub events: SchemaObject,
    /// Fields explicitly set to an empty value.
    pub cleared_fields: Vec<FieldId>,
}

impl SchemaComponentUpdate {
    /// Creates an empty update for a component.
    #[must_use]
    pub const fn new(component_id: ComponentId) -> Self {
        Self {
            component_id,
            fields: SchemaObject::new(),
            events: SchemaObject::new(),
            cleared_fields: Vec::new(),
        }
    }

    /// Records that `field` was set to an empty container.
    pub fn add_cleared_field(&mut self, field: FieldId) {
        if !self.cleared_fields.contains(&field) {
            self.cleared_fields.push(field);
        }
    }

    /// Returns true if `field` was set to an empty container.
    #[must_use]
    pub fn is_field_cleared(&self, field: FieldId) -> bool {
        self.cleared_fields.contains(&field)
    }

    /// Returns true if the update carries nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.events.is_empty() && self.cleared_fields.is_empty()
    }

    /// Encodes the payload into bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        PayloadHeader::component(PayloadKind::ComponentUpdate, self.component_id)
            .encode(&mut buffer);
        encode_object(&self.fields, &mut buffer);
        encode_object(&self.events, &mut buffer);
        let count = u32::try_from(self.cleared_fields.len()).unwrap_or(u32::MAX);
        buffer.put_u32_le(count);
        for field in &self.cleared_fields {
            buffer.put_u32_le(*field);
        }
        buffer
    }

    /// Decodes a payload produced by [`SchemaComponentUpdate::encode`].
    ///
    /// # Errors
    /// Returns an error if the bytes are malformed or hold another payload kind.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (header, mut reader) = open(bytes, PayloadKind::ComponentUpdate)?;
        let fields = reader.read_object()?;
        let events = reader.read_object()?;
        let cleared_count = reader.read_u32()?;
        let mut update = Self {
            component_id: header.component_id,
            fields,
            events,
            cleared_fields: Vec::new(),
        };
        for _ in 0..cleared_count {
            update.add_cleared_field(reader.read_u32()?);
        }
        reader.finish()?;
        Ok(update)
    }
}

macro_rules! command_payload {
    ($name:ident, $kind:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            /// Component owning the command.
            pub component_id: ComponentId,
            /// Command index within the component.
            pub command_index: CommandIndex,
            /// Payload object.
            pub object: SchemaObject,
        }

        impl $name {
            /// Creates an empty payload addressed to the command.
            #[must_use]
            pub const fn new(component_id: ComponentId, command_index: CommandIndex) -> Self {
                Self {
                    component_id,
                    command_index,
                    object: SchemaObject::new(),
                }
            }

            /// Encodes the payload into bytes.
            #[must_use]
            pub fn encode(&self) -> Vec<u8> {
                let mut buffer = Vec::new();
                PayloadHeader::command(PayloadKind::$kind, self.component_id, self.command_index)
                    .encode(&mut buffer);
                encode_object(&self.object, &mut buffer);
                buffer
            }

            /// Decodes an encoded payload of this kind.
            ///
            /// # Errors
            /// Returns an error if the bytes are malformed or hold another
            /// payload kind.
            pub fn decode(bytes: &[u8]) -> Result<Self> {
                let (header, mut reader) = open(bytes, PayloadKind::$kind)?;
                let object = reader.read_object()?;
                reader.finish()?;
                Ok(Self {
                    component_id: header.component_id,
                    command_index: header.command_index,
                    object,
                })
            }
        }
    };
}

command_payload!(
    SchemaCommandRequest,
    CommandRequest,
    "Request sent to a component command."
);
command_payload!(
    SchemaCommandResponse,
    CommandResponse,
    "Response returned by a component command."
);

fn open(bytes: &[u8], expected: PayloadKind) -> Result<(PayloadHeader, ObjectReader<'_>)> {
    let header = PayloadHeader::wrap(bytes, 0)?;
    if header.kind != expected {
        return Err(Error::InvalidPayloadKind {
            kind: header.kind as u8,
        });
    }
    Ok((header, ObjectReader::at(bytes, PayloadHeader::ENCODED_LENGTH)))
}
