//! Intermediate representation for code generation.
//!
//! Documents are collected into a flat [`Registry`] (types and components by
//! qualified name, in encounter order). [`Registry::link`] validates every
//! cross-reference and promotes each component's data type, producing an
//! immutable [`SchemaIr`] that code generation reads.

use crate::document::SchemaDocument;
use crate::error::SchemaError;
use crate::parser::field_type;
use crate::types::SchemaType;
use crate::validation::validate_registry;
use ecsgen_core::{CommandIndex, ComponentId, FieldId};
use indexmap::IndexMap;
use tracing::debug;

/// A user type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    /// Dot-separated package.
    pub package: String,
    /// Short name.
    pub name: String,
    /// Package-qualified name.
    pub qualified_name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
    /// Qualified name of the component using this type as its data type.
    pub data_component: Option<String>,
    /// Events attached by the owning component.
    pub events: Vec<EventDef>,
}

impl TypeDef {
    /// Returns true if the type was promoted to a component's data type.
    #[must_use]
    pub fn is_data_type(&self) -> bool {
        self.data_component.is_some()
    }
}

/// A field of a user type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Wire tag.
    pub id: FieldId,
    /// Type shape.
    pub ty: SchemaType,
    /// Set when the owning type is a component's data type.
    pub is_data_property: bool,
}

/// A component event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDef {
    /// Event name.
    pub name: String,
    /// Event index.
    pub index: u32,
    /// Payload shape.
    pub ty: SchemaType,
}

/// A component command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDef {
    /// Command name.
    pub name: String,
    /// Command index.
    pub index: CommandIndex,
    /// Request shape.
    pub request: SchemaType,
    /// Response shape.
    pub response: SchemaType,
}

/// A component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDef {
    /// Dot-separated package.
    pub package: String,
    /// Short name.
    pub name: String,
    /// Package-qualified name.
    pub qualified_name: String,
    /// Globally unique id.
    pub id: ComponentId,
    /// Qualified name of the data type.
    pub data_type: String,
    /// Events in declaration order.
    pub events: Vec<EventDef>,
    /// Commands in declaration order.
    pub commands: Vec<CommandDef>,
}

impl ComponentDef {
    /// Returns the name of the generated update struct.
    #[must_use]
    pub fn update_name(&self) -> String {
        format!("{}Update", self.name)
    }

    /// Returns the name of the generated marker for a command.
    #[must_use]
    pub fn command_struct_name(&self, command: &CommandDef) -> String {
        format!("{}{}", self.name, to_pascal_case(&command.name))
    }
}

/// Flat collection of parsed, unlinked definitions.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: IndexMap<String, TypeDef>,
    components: IndexMap<String, ComponentDef>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every type and component of a document.
    ///
    /// # Errors
    /// Returns an error if a field type is invalid or a qualified name is
    /// already registered.
    pub fn add_document(&mut self, document: &SchemaDocument) -> Result<(), SchemaError> {
        for type_def in &document.type_definitions {
            let mut fields = Vec::with_capacity(type_def.field_definitions.len());
            for field in &type_def.field_definitions {
                let site = format!(
                    "field '{}' of type '{}'",
                    field.name, type_def.qualified_name
                );
                fields.push(FieldDef {
                    name: field.name.clone(),
                    id: field.number,
                    ty: field_type(field, &site)?,
                    is_data_property: false,
                });
            }

            if self.types.contains_key(&type_def.qualified_name) {
                return Err(SchemaError::DuplicateType {
                    name: type_def.qualified_name.clone(),
                });
            }
            debug!(name = %type_def.qualified_name, "registered type");
            self.types.insert(
                type_def.qualified_name.clone(),
                TypeDef {
                    package: document.package.clone(),
                    name: type_def.name.clone(),
                    qualified_name: type_def.qualified_name.clone(),
                    fields,
                    data_component: None,
                    events: Vec::new(),
                },
            );
        }

        for component in &document.component_definitions {
            if self.components.contains_key(&component.qualified_name) {
                return Err(SchemaError::DuplicateComponent {
                    name: component.qualified_name.clone(),
                });
            }

            let events = component
                .event_definitions
                .iter()
                .map(|event| EventDef {
                    name: event.name.clone(),
                    index: event.event_index,
                    ty: SchemaType::reference(&event.event_type.user_type),
                })
                .collect();
            let commands = component
                .command_definitions
                .iter()
                .map(|command| CommandDef {
                    name: command.name.clone(),
                    index: command.command_index,
                    request: SchemaType::reference(&command.request_type.user_type),
                    response: SchemaType::reference(&command.response_type.user_type),
                })
                .collect();

            debug!(name = %component.qualified_name, id = component.id, "registered component");
            self.components.insert(
                component.qualified_name.clone(),
                ComponentDef {
                    package: document.package.clone(),
                    name: component.name.clone(),
                    qualified_name: component.qualified_name.clone(),
                    id: component.id,
                    data_type: component.data_definition.user_type.clone(),
                    events,
                    commands,
                },
            );
        }

        Ok(())
    }

    /// Returns registered types in encounter order.
    #[must_use]
    pub fn types(&self) -> &IndexMap<String, TypeDef> {
        &self.types
    }

    /// Returns registered components in encounter order.
    #[must_use]
    pub fn components(&self) -> &IndexMap<String, ComponentDef> {
        &self.components
    }

    /// Validates cross-references and promotes component data types.
    ///
    /// # Errors
    /// Returns the first validation failure; see [`validate_registry`].
    pub fn link(self) -> Result<SchemaIr, SchemaError> {
        validate_registry(&self)?;

        let Self {
            mut types,
            components,
        } = self;

        for component in components.values() {
            let data_type = types.get_mut(&component.data_type).ok_or_else(|| {
                SchemaError::unresolved(
                    &component.data_type,
                    format!("data type of component '{}'", component.qualified_name),
                )
            })?;
            data_type.data_component = Some(component.qualified_name.clone());
            data_type.events = component.events.clone();
            for field in &mut data_type.fields {
                field.is_data_property = true;
            }
            debug!(
                component = %component.qualified_name,
                data_type = %component.data_type,
                "promoted data type"
            );
        }

        Ok(SchemaIr { types, components })
    }
}

/// Linked, immutable schema ready for code generation.
#[derive(Debug, Clone, Default)]
pub struct SchemaIr {
    types: IndexMap<String, TypeDef>,
    components: IndexMap<String, ComponentDef>,
}

impl SchemaIr {
    /// Registers and links a set of documents.
    ///
    /// # Errors
    /// Returns the first registration or link failure.
    pub fn from_documents<'a>(
        documents: impl IntoIterator<Item = &'a SchemaDocument>,
    ) -> Result<Self, SchemaError> {
        let mut registry = Registry::new();
        for document in documents {
            registry.add_document(document)?;
        }
        registry.link()
    }

    /// Iterates over types in encounter order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Iterates over components in encounter order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentDef> {
        self.components.values()
    }

    /// Gets a type by qualified name.
    #[must_use]
    pub fn get_type(&self, qualified_name: &str) -> Option<&TypeDef> {
        self.types.get(qualified_name)
    }

    /// Gets a component by qualified name.
    #[must_use]
    pub fn get_component(&self, qualified_name: &str) -> Option<&ComponentDef> {
        self.components.get(qualified_name)
    }

    /// Gets the data type of a component.
    #[must_use]
    pub fn data_type(&self, component: &ComponentDef) -> Option<&TypeDef> {
        self.types.get(&component.data_type)
    }

    /// Number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Dense 0-based index of a component id, in encounter order.
    #[must_use]
    pub fn unique_index(&self, id: ComponentId) -> Option<usize> {
        self.components.values().position(|component| component.id == id)
    }
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}
