//! Error types for ecsgen runtime operations.

use crate::types::{CommandIndex, ComponentId};
use thiserror::Error;

/// Core error type for runtime dispatch and decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer is too short for the requested read.
    #[error("buffer too short: required {required} bytes, available {available} bytes")]
    BufferTooShort {
        /// Required buffer size in bytes.
        required: usize,
        /// Available buffer size in bytes.
        available: usize,
    },

    /// Payload carries a different component id than the decoder expects.
    #[error("component mismatch: expected {expected}, actual {actual}")]
    ComponentMismatch {
        /// Expected component id.
        expected: ComponentId,
        /// Actual component id found.
        actual: ComponentId,
    },

    /// Command payload addressed to a different (component, command) pair.
    #[error(
        "command mismatch: expected ({expected_component}, {expected_index}), actual ({actual_component}, {actual_index})"
    )]
    CommandMismatch {
        /// Expected component id.
        expected_component: ComponentId,
        /// Expected command index.
        expected_index: CommandIndex,
        /// Actual component id.
        actual_component: ComponentId,
        /// Actual command index.
        actual_index: CommandIndex,
    },

    /// No generated component is registered under the id.
    #[error("unknown component id {id}")]
    UnknownComponent {
        /// Component id.
        id: ComponentId,
    },

    /// No generated command is registered under the pair.
    #[error("unknown command {command_index} on component {component_id}")]
    UnknownCommand {
        /// Component id.
        component_id: ComponentId,
        /// Command index.
        command_index: CommandIndex,
    },

    /// Unknown value kind tag in an encoded object.
    #[error("invalid value tag {tag} at offset {offset}")]
    InvalidValueTag {
        /// Tag byte found.
        tag: u8,
        /// Byte offset of the tag.
        offset: usize,
    },

    /// Unknown payload kind in an encoded header.
    #[error("invalid payload kind {kind}")]
    InvalidPayloadKind {
        /// Kind byte found.
        kind: u8,
    },

    /// Invalid UTF-8 encoding in a string value.
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset where the string starts.
        offset: usize,
    },

    /// Encoded objects are nested deeper than the decoder allows.
    #[error("object nesting exceeds {max_depth} levels")]
    NestingTooDeep {
        /// Maximum nesting depth.
        max_depth: usize,
    },

    /// Bytes remain after a complete payload was decoded.
    #[error("{remaining} trailing bytes after payload")]
    TrailingBytes {
        /// Number of unread bytes.
        remaining: usize,
    },
}

/// Result type alias for ecsgen runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
