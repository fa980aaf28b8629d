//! Error types for schema parsing and linking.

use ecsgen_core::{CommandIndex, ComponentId, FieldId};
use std::path::PathBuf;
use thiserror::Error;

/// Error type for schema document parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Malformed JSON or a record that does not match the document layout.
    #[error("invalid schema document {source_name} at JSON path {path}: {message}")]
    Json {
        /// Name of the input (file path or `<input>`).
        source_name: String,
        /// JSON path of the failure.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// A field declares none of the type shapes.
    #[error("field '{field}' has no type (expected singularType, optionType, listType or mapType)")]
    MissingTypeShape {
        /// Field location.
        field: String,
    },

    /// A field declares more than one type shape.
    #[error("field '{field}' declares more than one type shape")]
    ConflictingTypeShapes {
        /// Field location.
        field: String,
    },

    /// Unknown builtin type name.
    #[error("unknown builtin type '{name}' in {site}")]
    UnknownBuiltInType {
        /// Builtin type name.
        name: String,
        /// Referencing site.
        site: String,
    },

    /// A type reference names neither a builtin nor a user type.
    #[error("type reference in {site} names neither a builtInType nor a userType")]
    EmptyTypeReference {
        /// Referencing site.
        site: String,
    },

    /// Reading an input file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Error type for schema registration and linking.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Two types share a qualified name.
    #[error("duplicate type definition: '{name}'")]
    DuplicateType {
        /// Qualified name.
        name: String,
    },

    /// Two components share a qualified name.
    #[error("duplicate component definition: '{name}'")]
    DuplicateComponent {
        /// Qualified name.
        name: String,
    },

    /// Two components share a numeric id.
    #[error("duplicate component id {id}: '{first}' and '{second}'")]
    DuplicateComponentId {
        /// Component id.
        id: ComponentId,
        /// First component with the id.
        first: String,
        /// Second component with the id.
        second: String,
    },

    /// Two fields of a type share a field id.
    #[error("duplicate field id {id} in type '{type_name}'")]
    DuplicateFieldId {
        /// Qualified type name.
        type_name: String,
        /// Field id.
        id: FieldId,
    },

    /// Two events of a component share an event index.
    #[error("duplicate event index {index} in component '{component}'")]
    DuplicateEventIndex {
        /// Qualified component name.
        component: String,
        /// Event index.
        index: u32,
    },

    /// Two commands of a component share a command index.
    #[error("duplicate command index {index} in component '{component}'")]
    DuplicateCommandIndex {
        /// Qualified component name.
        component: String,
        /// Command index.
        index: CommandIndex,
    },

    /// Two generated items of a package would share a Rust name.
    #[error("generated item '{name}' is defined twice in package '{package}'")]
    DuplicateItemName {
        /// Package name.
        package: String,
        /// Rust item name.
        name: String,
    },

    /// Two members of a generated struct would share a name.
    #[error("member '{name}' is declared twice in {owner}")]
    DuplicateMemberName {
        /// Type or component declaring the member.
        owner: String,
        /// Member name.
        name: String,
    },

    /// A qualified name is not the package followed by the short name.
    #[error("qualified name '{qualified_name}' does not match package '{package}' and name '{name}'")]
    QualifiedNameMismatch {
        /// Declared package.
        package: String,
        /// Declared short name.
        name: String,
        /// Declared qualified name.
        qualified_name: String,
    },

    /// A reference names a type that does not exist.
    #[error("unresolved type '{name}' referenced by {site}")]
    UnresolvedReference {
        /// Missing qualified name.
        name: String,
        /// Referencing site.
        site: String,
    },

    /// A type is the data type of two components.
    #[error("type '{type_name}' is the data type of both '{first}' and '{second}'")]
    SharedDataType {
        /// Qualified type name.
        type_name: String,
        /// First component.
        first: String,
        /// Second component.
        second: String,
    },

    /// A package segment or declared name is not a valid identifier.
    #[error("invalid {kind} name '{name}'")]
    InvalidName {
        /// What the name belongs to.
        kind: String,
        /// Offending name.
        name: String,
    },

    /// A map key is not a hashable scalar.
    #[error("invalid map key '{key}' in {site}: keys must be bool, integer, string, bytes or EntityId")]
    InvalidMapKey {
        /// Key type.
        key: String,
        /// Referencing site.
        site: String,
    },
}

impl ParseError {
    /// Creates an unknown builtin type error.
    pub fn unknown_builtin(name: impl Into<String>, site: impl Into<String>) -> Self {
        Self::UnknownBuiltInType {
            name: name.into(),
            site: site.into(),
        }
    }

    /// Creates an IO error for a file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl SchemaError {
    /// Creates an unresolved reference error.
    pub fn unresolved(name: impl Into<String>, site: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            name: name.into(),
            site: site.into(),
        }
    }

    /// Creates a duplicate item name error.
    pub fn duplicate_item(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateItemName {
            package: package.into(),
            name: name.into(),
        }
    }
}
