//! Root registry generation.
//!
//! The root module of the output tree holds everything keyed by component id:
//! the dense index table, the `ComponentData` / `ComponentUpdate` sum types
//! and the `Schema` marker dispatching commands. All tables follow component
//! encounter order.

use crate::command::CommandGenerator;
use crate::error::CodegenError;
use crate::names::{Paths, id_literal, variant_ident};
use ecsgen_schema::{ComponentDef, SchemaIr};
use proc_macro2::TokenStream;
use quote::quote;

/// Generates the root registries of a schema.
pub struct GlobalGenerator<'a> {
    ir: &'a SchemaIr,
    paths: &'a Paths,
}

struct Entry<'a> {
    component: &'a ComponentDef,
    variant: proc_macro2::Ident,
    id: proc_macro2::Literal,
    path: TokenStream,
    data: TokenStream,
    update: TokenStream,
}

impl<'a> GlobalGenerator<'a> {
    /// Creates a new global generator.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, paths: &'a Paths) -> Self {
        Self { ir, paths }
    }

    fn entries(&self) -> Result<Vec<Entry<'a>>, CodegenError> {
        self.ir
            .components()
            .map(|component| {
                let data_type = self.ir.data_type(component).ok_or_else(|| {
                    CodegenError::UnknownType {
                        type_name: component.data_type.clone(),
                        site: format!("component '{}'", component.qualified_name),
                    }
                })?;
                Ok(Entry {
                    component,
                    variant: variant_ident(component.id),
                    id: id_literal(component.id),
                    path: self.paths.item(&component.package, &component.name),
                    data: self.paths.qualified(&data_type.qualified_name),
                    update: self
                        .paths
                        .item(&component.package, &component.update_name()),
                })
            })
            .collect()
    }

    /// Generates the root module items.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownType`] if a component's data type is
    /// missing from the schema.
    pub fn generate(&self) -> Result<TokenStream, CodegenError> {
        let entries = self.entries()?;
        let index_table = self.index_table(&entries);
        let data_enum = self.data_enum(&entries);
        let update_enum = self.update_enum(&entries);
        let schema = self.schema_marker(&entries);

        Ok(quote! {
            #index_table
            #data_enum
            #update_enum
            #schema
        })
    }

    fn index_table(&self, entries: &[Entry<'_>]) -> TokenStream {
        let count = entries.len();
        let component_id = self.paths.runtime_item("ComponentId");
        let ids = entries.iter().map(|e| &e.id);
        let indices = 0..count;

        quote! {
            /// Number of generated components.
            pub const GENERATED_NUMBER_OF_COMPONENTS: usize = #count;

            /// Dense 0-based index of a component id, in schema encounter order.
            #[must_use]
            pub const fn component_unique_index(component_id: #component_id) -> ::std::option::Option<usize> {
                match component_id {
                    #(#ids => ::std::option::Option::Some(#indices),)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    }

    fn data_enum(&self, entries: &[Entry<'_>]) -> TokenStream {
        let runtime = self.paths.runtime();
        let variants = entries.iter().map(|e| {
            let (variant, data) = (&e.variant, &e.data);
            quote!(#variant(#data))
        });
        let id_arms = entries.iter().map(|e| {
            let (variant, path) = (&e.variant, &e.path);
            quote!(Self::#variant(_) => <#path as #runtime::Component>::ID,)
        });
        let deserialize_arms = entries.iter().map(|e| {
            let (variant, id, data) = (&e.variant, &e.id, &e.data);
            quote! {
                #id => ::std::result::Result::Ok(Self::#variant(
                    <#data as #runtime::ComponentData>::deserialize_data(data)?
                )),
            }
        });
        let serialize_arms = entries.iter().map(|e| {
            let (variant, data) = (&e.variant, &e.data);
            quote!(Self::#variant(ref data) => <#data as #runtime::ComponentData>::serialize_data(data),)
        });
        let apply_arms = entries.iter().map(|e| {
            let (variant, data) = (&e.variant, &e.data);
            quote! {
                (Self::#variant(data), ComponentUpdate::#variant(update)) => {
                    <#data as #runtime::ComponentData>::apply_update(data, update);
                }
            }
        });

        quote! {
            /// Data of any generated component.
            #[derive(Debug, Clone, PartialEq)]
            pub enum ComponentData {
                #(#variants,)*
            }

            impl #runtime::AnyComponentData for ComponentData {
                type Update = ComponentUpdate;

                fn component_id(&self) -> #runtime::ComponentId {
                    match *self {
                        #(#id_arms)*
                    }
                }

                fn deserialize(data: &#runtime::SchemaComponentData) -> #runtime::Result<Self> {
                    match data.component_id {
                        #(#deserialize_arms)*
                        id => ::std::result::Result::Err(#runtime::Error::UnknownComponent { id }),
                    }
                }

                fn serialize(&self) -> #runtime::SchemaComponentData {
                    match *self {
                        #(#serialize_arms)*
                    }
                }

                #[allow(unreachable_patterns)]
                fn apply_update(&mut self, update: &ComponentUpdate) {
                    match (self, update) {
                        #(#apply_arms)*
                        _ => {}
                    }
                }
            }
        }
    }

    fn update_enum(&self, entries: &[Entry<'_>]) -> TokenStream {
        let runtime = self.paths.runtime();
        let variants = entries.iter().map(|e| {
            let (variant, update) = (&e.variant, &e.update);
            quote!(#variant(#update))
        });
        let id_arms = entries.iter().map(|e| {
            let (variant, path) = (&e.variant, &e.path);
            quote!(Self::#variant(_) => <#path as #runtime::Component>::ID,)
        });
        let deserialize_arms = entries.iter().map(|e| {
            let (variant, id, update) = (&e.variant, &e.id, &e.update);
            quote! {
                #id => ::std::result::Result::Ok(Self::#variant(
                    <#update as #runtime::ComponentUpdate>::deserialize_update(update)?
                )),
            }
        });
        let serialize_arms = entries.iter().map(|e| {
            let (variant, update) = (&e.variant, &e.update);
            quote!(Self::#variant(ref update) => <#update as #runtime::ComponentUpdate>::serialize_update(update),)
        });

        quote! {
            /// Update of any generated component.
            #[derive(Debug, Clone, PartialEq)]
            pub enum ComponentUpdate {
                #(#variants,)*
            }

            impl #runtime::AnyComponentUpdate for ComponentUpdate {
                fn component_id(&self) -> #runtime::ComponentId {
                    match *self {
                        #(#id_arms)*
                    }
                }

                fn deserialize(update: &#runtime::SchemaComponentUpdate) -> #runtime::Result<Self> {
                    match update.component_id {
                        #(#deserialize_arms)*
                        id => ::std::result::Result::Err(#runtime::Error::UnknownComponent { id }),
                    }
                }

                fn serialize(&self) -> #runtime::SchemaComponentUpdate {
                    match *self {
                        #(#serialize_arms)*
                    }
                }
            }
        }
    }

    fn schema_marker(&self, entries: &[Entry<'_>]) -> TokenStream {
        let runtime = self.paths.runtime();
        let commands: Vec<_> = entries
            .iter()
            .flat_map(|e| {
                e.component
                    .commands
                    .iter()
                    .map(|command| CommandGenerator::new(e.component, command, self.paths))
            })
            .collect();
        let request_arms = commands.iter().map(|c| c.request_arm());
        let response_arms = commands.iter().map(|c| c.response_arm());
        let registrations = entries.iter().map(|e| {
            let path = &e.path;
            quote!(registrar.register_component::<#path>();)
        });

        quote! {
            /// Root of the generated schema.
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct Schema;

            impl #runtime::GeneratedSchema for Schema {
                const NUMBER_OF_COMPONENTS: usize = GENERATED_NUMBER_OF_COMPONENTS;
                type ComponentData = ComponentData;
                type ComponentUpdate = ComponentUpdate;

                fn unique_index(component_id: #runtime::ComponentId) -> ::std::option::Option<usize> {
                    component_unique_index(component_id)
                }

                fn deserialize_command_request(
                    request: &#runtime::SchemaCommandRequest,
                ) -> #runtime::Result<::std::boxed::Box<dyn ::std::any::Any>> {
                    match (request.component_id, request.command_index) {
                        #(#request_arms)*
                        (component_id, command_index) => ::std::result::Result::Err(
                            #runtime::Error::UnknownCommand { component_id, command_index },
                        ),
                    }
                }

                fn deserialize_command_response(
                    response: &#runtime::SchemaCommandResponse,
                ) -> #runtime::Result<::std::boxed::Box<dyn ::std::any::Any>> {
                    match (response.component_id, response.command_index) {
                        #(#response_arms)*
                        (component_id, command_index) => ::std::result::Result::Err(
                            #runtime::Error::UnknownCommand { component_id, command_index },
                        ),
                    }
                }

                fn register_components<R: #runtime::ComponentRegistrar>(registrar: &mut R) {
                    #(#registrations)*
                }
            }
        }
    }
}
