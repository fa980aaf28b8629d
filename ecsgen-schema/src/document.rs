//! Schema document records.
//!
//! One document is one JSON file describing the types and components of a
//! single package. Field names follow the camelCase layout of the input.

use serde::Deserialize;

/// A parsed schema document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    /// Dot-separated package name.
    pub package: String,
    /// Types declared in the package.
    #[serde(default)]
    pub type_definitions: Vec<TypeDefinition>,
    /// Components declared in the package.
    #[serde(default)]
    pub component_definitions: Vec<ComponentDefinition>,
}

/// A user type declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    /// Short type name.
    pub name: String,
    /// Package-qualified type name.
    pub qualified_name: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub field_definitions: Vec<FieldDefinition>,
}

/// A field declaration. Exactly one of the type shapes must be present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Field name.
    pub name: String,
    /// Field id (wire tag).
    pub number: u32,
    /// Plain value.
    #[serde(default)]
    pub singular_type: Option<TypeReference>,
    /// Optional value.
    #[serde(default)]
    pub option_type: Option<ValueTypeDefinition>,
    /// Repeated value.
    #[serde(default)]
    pub list_type: Option<ValueTypeDefinition>,
    /// Key/value map.
    #[serde(default)]
    pub map_type: Option<MapTypeDefinition>,
}

/// Element type of an option or list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueTypeDefinition {
    /// Element type.
    pub value_type: TypeReference,
}

/// Key and value types of a map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapTypeDefinition {
    /// Key type.
    pub key_type: TypeReference,
    /// Value type.
    pub value_type: TypeReference,
}

/// Reference to either a builtin or a user type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReference {
    /// Builtin type name.
    #[serde(default)]
    pub built_in_type: Option<String>,
    /// Qualified user type name.
    #[serde(default)]
    pub user_type: Option<String>,
}

/// Reference to a user type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTypeReference {
    /// Qualified user type name.
    pub user_type: String,
}

/// A component declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    /// Short component name.
    pub name: String,
    /// Globally unique component id.
    pub id: u32,
    /// Package-qualified component name.
    pub qualified_name: String,
    /// Data type of the component.
    pub data_definition: UserTypeReference,
    /// Events in declaration order.
    #[serde(default)]
    pub event_definitions: Vec<EventDefinition>,
    /// Commands in declaration order.
    #[serde(default)]
    pub command_definitions: Vec<CommandDefinition>,
}

/// An event declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefinition {
    /// Event name.
    pub name: String,
    /// Event index, used as the field id in update event objects.
    pub event_index: u32,
    /// Event payload type.
    #[serde(rename = "type")]
    pub event_type: UserTypeReference,
}

/// A command declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDefinition {
    /// Command name.
    pub name: String,
    /// Command index within the component.
    pub command_index: u32,
    /// Request payload type.
    pub request_type: UserTypeReference,
    /// Response payload type.
    pub response_type: UserTypeReference,
}
