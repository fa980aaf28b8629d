//! Identifier types and value kinds shared by the runtime and generated code.

/// Numeric component identifier, globally unique within a schema.
pub type ComponentId = u32;

/// Wire tag locating a field inside a [`crate::SchemaObject`].
pub type FieldId = u32;

/// Index of a command within its owning component.
pub type CommandIndex = u32;

/// Reference to an entity in the runtime world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Creates a new entity id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// Kind of a value stored in a schema object.
///
/// Every builtin schema type maps onto exactly one kind; the kind selects the
/// typed accessor family (`add_*`, `index_*`, `*_count`) and the wire tag used
/// by the binary codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
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
    /// Zigzag-encoded signed 32-bit integer.
    Sint32,
    /// Zigzag-encoded signed 64-bit integer.
    Sint64,
    /// Fixed-width unsigned 32-bit integer.
    Fixed32,
    /// Fixed-width unsigned 64-bit integer.
    Fixed64,
    /// Fixed-width signed 32-bit integer.
    Sfixed32,
    /// Fixed-width signed 64-bit integer.
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
    /// Nested schema object.
    Object,
}

impl ValueKind {
    /// Returns the wire tag for this kind.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Bool => 1,
            Self::Uint32 => 2,
            Self::Uint64 => 3,
            Self::Int32 => 4,
            Self::Int64 => 5,
            Self::Float => 6,
            Self::Double => 7,
            Self::String => 8,
            Self::Bytes => 9,
            Self::EntityId => 10,
            Self::Object => 11,
            Self::Sint32 => 12,
            Self::Sint64 => 13,
            Self::Fixed32 => 14,
            Self::Fixed64 => 15,
            Self::Sfixed32 => 16,
            Self::Sfixed64 => 17,
        }
    }

    /// Looks up a kind by its wire tag.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Bool),
            2 => Some(Self::Uint32),
            3 => Some(Self::Uint64),
            4 => Some(Self::Int32),
            5 => Some(Self::Int64),
            6 => Some(Self::Float),
            7 => Some(Self::Double),
            8 => Some(Self::String),
            9 => Some(Self::Bytes),
            10 => Some(Self::EntityId),
            11 => Some(Self::Object),
            12 => Some(Self::Sint32),
            13 => Some(Self::Sint64),
            14 => Some(Self::Fixed32),
            15 => Some(Self::Fixed64),
            16 => Some(Self::Sfixed32),
            17 => Some(Self::Sfixed64),
            _ => None,
        }
    }

    /// Returns the size of the fixed-width payload, or `None` for
    /// length-prefixed kinds.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Bool => Some(1),
            Self::Uint32
            | Self::Int32
            | Self::Sint32
            | Self::Fixed32
            | Self::Sfixed32
            | Self::Float => Some(4),
            Self::Uint64
            | Self::Int64
            | Self::Sint64
            | Self::Fixed64
            | Self::Sfixed64
            | Self::Double
            | Self::EntityId => Some(8),
            Self::String | Self::Bytes | Self::Object => None,
        }
    }
}
