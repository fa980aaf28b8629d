//! Schema type model.
//!
//! [`SchemaType`] is the recursive shape of a field, event or command payload:
//! a builtin scalar, a reference to a user type, or an option, list or map
//! wrapping further shapes.

use std::fmt;

/// Builtin scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInType {
    /// Boolean.
    Bool,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Signed 32-bit integer, zigzag encoded on the wire.
    Sint32,
    /// Signed 64-bit integer, zigzag encoded on the wire.
    Sint64,
    /// Unsigned 32-bit integer, fixed width on the wire.
    Fixed32,
    /// Unsigned 64-bit integer, fixed width on the wire.
    Fixed64,
    /// Signed 32-bit integer, fixed width on the wire.
    Sfixed32,
    /// Signed 64-bit integer, fixed width on the wire.
    Sfixed64,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// UTF-8 string.
    String,
    /// Raw bytes.
    Bytes,
    /// Entity reference.
    EntityId,
}

impl BuiltInType {
    /// Every builtin type, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Bool,
        Self::Uint32,
        Self::Uint64,
        Self::Int32,
        Self::Int64,
        Self::Sint32,
        Self::Sint64,
        Self::Fixed32,
        Self::Fixed64,
        Self::Sfixed32,
        Self::Sfixed64,
        Self::Float,
        Self::Double,
        Self::String,
        Self::Bytes,
        Self::EntityId,
    ];

    /// Parses a builtin type from its schema name.
    #[must_use]
    pub fn from_schema_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::Bool),
            "uint32" => Some(Self::Uint32),
            "uint64" => Some(Self::Uint64),
            "int32" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            "sint32" => Some(Self::Sint32),
            "sint64" => Some(Self::Sint64),
            "fixed32" => Some(Self::Fixed32),
            "fixed64" => Some(Self::Fixed64),
            "sfixed32" => Some(Self::Sfixed32),
            "sfixed64" => Some(Self::Sfixed64),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "string" => Some(Self::String),
            "bytes" => Some(Self::Bytes),
            "EntityId" => Some(Self::EntityId),
            _ => None,
        }
    }

    /// Returns the schema name of this type.
    #[must_use]
    pub const fn schema_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::EntityId => "EntityId",
        }
    }

    /// Returns the Rust type name for this builtin.
    ///
    /// `EntityId` is the runtime crate's type and must be qualified by the
    /// caller.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Uint32 => "u32",
            Self::Uint64 => "u64",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Sint32 | Self::Sfixed32 => "i32",
            Self::Sint64 | Self::Sfixed64 => "i64",
            Self::Fixed32 => "u32",
            Self::Fixed64 => "u64",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::String => "String",
            Self::Bytes => "Vec<u8>",
            Self::EntityId => "EntityId",
        }
    }

    /// Returns the method group selecting the `SchemaObject` primitives
    /// (`add_<group>`, `index_<group>`, `<group>_count`).
    #[must_use]
    pub const fn method_group(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::EntityId => "entity_id",
        }
    }

    /// Returns true if values are passed to writers by copy.
    #[must_use]
    pub const fn is_copy(&self) -> bool {
        !matches!(self, Self::String | Self::Bytes)
    }

    /// Returns true if the Rust type implements `Eq + Hash`.
    #[must_use]
    pub const fn is_hashable(&self) -> bool {
        !matches!(self, Self::Float | Self::Double)
    }
}

impl fmt::Display for BuiltInType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_name())
    }
}

/// Recursive type shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaType {
    /// Builtin scalar.
    Scalar(BuiltInType),
    /// Reference to a user type by qualified name.
    Reference(String),
    /// Optional value.
    Option(Box<SchemaType>),
    /// Repeated value.
    List(Box<SchemaType>),
    /// Key/value map.
    Map(Box<SchemaType>, Box<SchemaType>),
}

impl SchemaType {
    /// Creates an option of `inner`.
    #[must_use]
    pub fn option(inner: SchemaType) -> Self {
        Self::Option(Box::new(inner))
    }

    /// Creates a list of `inner`.
    #[must_use]
    pub fn list(inner: SchemaType) -> Self {
        Self::List(Box::new(inner))
    }

    /// Creates a map from `key` to `value`.
    #[must_use]
    pub fn map(key: SchemaType, value: SchemaType) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Creates a reference to a user type.
    #[must_use]
    pub fn reference(qualified_name: impl Into<String>) -> Self {
        Self::Reference(qualified_name.into())
    }

    /// Returns true for option, list and map shapes.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Option(_) | Self::List(_) | Self::Map(..))
    }

    /// Returns true if the shape can be used as a `HashMap` key.
    #[must_use]
    pub fn is_valid_map_key(&self) -> bool {
        match self {
            Self::Scalar(builtin) => builtin.is_hashable(),
            _ => false,
        }
    }

    /// Collects every user type referenced by this shape, outermost first.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Scalar(_) => {}
            Self::Reference(name) => names.push(name),
            Self::Option(inner) | Self::List(inner) => inner.collect_references(names),
            Self::Map(key, value) => {
                key.collect_references(names);
                value.collect_references(names);
            }
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(builtin) => write!(f, "{builtin}"),
            Self::Reference(name) => f.write_str(name),
            Self::Option(inner) => write!(f, "option<{inner}>"),
            Self::List(inner) => write!(f, "list<{inner}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
        }
    }
}
