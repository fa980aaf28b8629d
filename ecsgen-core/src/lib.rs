//! # ecsgen Core
//!
//! Runtime types and traits targeted by code generated with `ecsgen-codegen`.
//!
//! This crate provides:
//! - [`SchemaObject`], the generic field-id keyed wire object every generated
//!   type serializes into
//! - [`Property`] and [`EventQueue`] for change-tracked component state
//! - Component, update and command traits implemented by generated code
//! - A compact binary codec for schema objects and component payloads
//! - Error types for runtime dispatch and decoding

pub mod buffer;
pub mod codec;
pub mod component;
pub mod error;
pub mod event;
pub mod header;
pub mod object;
pub mod payload;
pub mod property;
pub mod types;

pub use buffer::{ReadBuffer, WriteBuffer};
pub use codec::{MAX_NESTING_DEPTH, decode_object, encode_object, object_to_bytes};
pub use component::{
    AnyComponentData, AnyComponentUpdate, Command, Component, ComponentData, ComponentRegistrar,
    ComponentUpdate, GeneratedSchema, SchemaData,
};
pub use error::{Error, Result};
pub use event::EventQueue;
pub use header::{PayloadHeader, PayloadKind};
pub use object::{SchemaObject, SchemaValue};
pub use payload::{
    SchemaCommandRequest, SchemaCommandResponse, SchemaComponentData, SchemaComponentUpdate,
};
pub use property::Property;
pub use types::{CommandIndex, ComponentId, EntityId, FieldId, ValueKind};
