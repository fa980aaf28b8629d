//! Payload envelope header.
//!
//! Every encoded component or command payload starts with a [`PayloadHeader`]
//! naming what follows and which component (and command) it addresses.

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::error::{Error, Result};
use crate::types::{CommandIndex, ComponentId};

/// Kind of payload following a [`PayloadHeader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PayloadKind {
    /// Full component state.
    ComponentData = 1,
    /// Partial component update with events.
    ComponentUpdate = 2,
    /// Command request.
    CommandRequest = 3,
    /// Command response.
    CommandResponse = 4,
}

impl PayloadKind {
    /// Decodes a payload kind from its wire byte.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPayloadKind`] for unknown bytes.
    pub const fn from_u8(kind: u8) -> Result<Self> {
        match kind {
            1 => Ok(Self::ComponentData),
            2 => Ok(Self::ComponentUpdate),
            3 => Ok(Self::CommandRequest),
            4 => Ok(Self::CommandResponse),
            _ => Err(Error::InvalidPayloadKind { kind }),
        }
    }

    /// Returns true for command payloads, which carry a command index.
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(self, Self::CommandRequest | Self::CommandResponse)
    }
}

/// Payload envelope header (9 bytes).
///
/// # Wire Format
/// ```text
/// +0: kind          (u8, 1 byte)
/// +1: componentId   (u32, 4 bytes)
/// +5: commandIndex  (u32, 4 bytes, zero for component payloads)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadHeader {
    /// What the payload contains.
    pub kind: PayloadKind,
    /// Addressed component id.
    pub component_id: ComponentId,
    /// Addressed command index.
    pub command_index: CommandIndex,
}

impl PayloadHeader {
    /// Encoded length of the header in bytes.
    pub const ENCODED_LENGTH: usize = 9;

    /// Creates a header for a component payload.
    ///
    /// # Arguments
    /// * `kind` - Payload kind
    /// * `component_id` - Addressed component id
    #[must_use]
    pub const fn component(kind: PayloadKind, component_id: ComponentId) -> Self {
        Self {
            kind,
            component_id,
            command_index: 0,
        }
    }

    /// Creates a header for a command payload.
    ///
    /// # Arguments
    /// * `kind` - Payload kind
    /// * `component_id` - Component owning the command
    /// * `command_index` - Command index within the component
    #[must_use]
    pub const fn command(
        kind: PayloadKind,
        component_id: ComponentId,
        command_index: CommandIndex,
    ) -> Self {
        Self {
            kind,
            component_id,
            command_index,
        }
    }

    /// Decodes the header at the given offset.
    ///
    /// # Arguments
    /// * `buffer` - Buffer to read from
    /// * `offset` - Byte offset to start reading
    ///
    /// # Errors
    /// Returns an error if the buffer is too short or the kind byte is unknown.
    pub fn wrap<B: ReadBuffer + ?Sized>(buffer: &B, offset: usize) -> Result<Self> {
        buffer.ensure(offset, Self::ENCODED_LENGTH)?;
        Ok(Self {
            kind: PayloadKind::from_u8(buffer.get_u8(offset))?,
            component_id: buffer.get_u32_le(offset + 1),
            command_index: buffer.get_u32_le(offset + 5),
        })
    }

    /// Appends the encoded header to the buffer.
    #[inline]
    pub fn encode<B: WriteBuffer + ?Sized>(&self, buffer: &mut B) {
        buffer.put_u8(self.kind as u8);
        buffer.put_u32_le(self.component_id);
        buffer.put_u32_le(self.command_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_header_encode_decode() {
        let mut buf: Vec<u8> = Vec::new();
        let header = PayloadHeader::command(PayloadKind::CommandRequest, 1001, 2);
        header.encode(&mut buf);
        assert_eq!(buf.len(), PayloadHeader::ENCODED_LENGTH);

        let decoded = PayloadHeader::wrap(&buf, 0).unwrap();
        assert_eq!(decoded, header);
        assert!(decoded.kind.is_command());
    }

    #[test]
    fn test_payload_header_wire_format() {
        let mut buf: Vec<u8> = Vec::new();
        PayloadHeader::component(PayloadKind::ComponentUpdate, 0x0102_0304).encode(&mut buf);
        assert_eq!(buf, vec![2, 0x04, 0x03, 0x02, 0x01, 0, 0, 0, 0]);
    }

    #[test]
    fn test_payload_header_errors() {
        let short = [1u8, 0, 0];
        assert!(matches!(
            PayloadHeader::wrap(&short[..], 0),
            Err(Error::BufferTooShort { .. })
        ));

        let bad_kind = [9u8, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            PayloadHeader::wrap(&bad_kind[..], 0),
            Err(Error::InvalidPayloadKind { kind: 9 })
        );
    }
}
