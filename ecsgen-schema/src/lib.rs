//! # ecsgen Schema
//!
//! Schema document model and resolver for ecsgen.
//!
//! This crate provides:
//! - JSON schema document parsing with located errors
//! - The recursive type model shared by all code generators
//! - Flat registries linked into a resolved intermediate representation
//! - Fail-fast validation of ids, names and references

pub mod document;
pub mod error;
pub mod ir;
pub mod parser;
pub mod types;
pub mod validation;

pub use document::SchemaDocument;
pub use error::{ParseError, SchemaError};
pub use ir::{
    CommandDef, ComponentDef, EventDef, FieldDef, Registry, SchemaIr, TypeDef, to_pascal_case,
};
pub use parser::{parse_document, parse_file};
pub use types::{BuiltInType, SchemaType};
pub use validation::{DIRTY_FLAG_MEMBER, ROOT_ITEM_NAMES, is_identifier, validate_registry};
