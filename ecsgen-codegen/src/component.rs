//! Component generation.
//!
//! A component produces:
//! - the read struct `<Name>` holding plain values of the data type's fields
//! - the update struct `<Name>Update`, every field optional plus one list per event
//! - `Component`, `ComponentData` and `ComponentUpdate` impls
//! - snapshot conversion from the read struct into the data type
//! - one marker per command

use crate::command::CommandGenerator;
use crate::event::EventGenerator;
use crate::field::FieldGenerator;
use crate::names::{Paths, id_literal, ident};
use ecsgen_schema::{ComponentDef, TypeDef};
use proc_macro2::TokenStream;
use quote::quote;

/// Generates the items of one component.
pub struct ComponentGenerator<'a> {
    component: &'a ComponentDef,
    data_type: &'a TypeDef,
    paths: &'a Paths,
}

impl<'a> ComponentGenerator<'a> {
    /// Creates a new component generator.
    ///
    /// # Arguments
    /// * `component` - Component to generate
    /// * `data_type` - The component's linked data type
    /// * `paths` - Resolved output paths
    #[must_use]
    pub fn new(component: &'a ComponentDef, data_type: &'a TypeDef, paths: &'a Paths) -> Self {
        Self {
            component,
            data_type,
            paths,
        }
    }

    fn fields(&self) -> Vec<FieldGenerator<'a>> {
        self.data_type
            .fields
            .iter()
            .map(|field| FieldGenerator::new(field, self.paths))
            .collect()
    }

    fn events(&self) -> Vec<EventGenerator<'a>> {
        self.component
            .events
            .iter()
            .map(|event| EventGenerator::new(event, self.paths))
            .collect()
    }

    fn commands(&self) -> Vec<CommandGenerator<'a>> {
        self.component
            .commands
            .iter()
            .map(|command| CommandGenerator::new(self.component, command, self.paths))
            .collect()
    }

    /// Generates every item of the component.
    #[must_use]
    pub fn generate(&self) -> TokenStream {
        let read_struct = self.read_struct();
        let update_struct = self.update_struct();
        let component_impl = self.component_impl();
        let snapshot = self.snapshot_conversion();
        let data_impl = self.data_impl();
        let update_impl = self.update_impl();
        let markers = self.commands().into_iter().map(|c| c.marker());

        quote! {
            #read_struct
            #update_struct
            #component_impl
            #snapshot
            #data_impl
            #update_impl
            #(#markers)*
        }
    }

    fn read_struct(&self) -> TokenStream {
        let name = ident(&self.component.name);
        let members = self.fields().into_iter().map(|f| f.plain_member());
        let doc = format!(
            " Component `{}` (id {}).",
            self.component.qualified_name, self.component.id
        );
        let commands = self.commands();
        let getters = if commands.is_empty() {
            TokenStream::new()
        } else {
            let getters = commands.iter().map(|c| c.getter());
            quote! {
                impl #name {
                    #(#getters)*
                }
            }
        };

        quote! {
            #[doc = #doc]
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct #name {
                #(#members,)*
            }

            #getters
        }
    }

    fn update_struct(&self) -> TokenStream {
        let update = ident(&self.component.update_name());
        let fields = self.fields().into_iter().map(|f| f.update_member());
        let events = self.events().into_iter().map(|e| e.update_member());
        let doc = format!(
            " Changes to component `{}`; the default value changes nothing.",
            self.component.qualified_name
        );

        quote! {
            #[doc = #doc]
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct #update {
                #(#fields,)*
                #(#events,)*
            }
        }
    }

    fn component_impl(&self) -> TokenStream {
        let name = ident(&self.component.name);
        let update = ident(&self.component.update_name());
        let data = self.paths.qualified(&self.data_type.qualified_name);
        let id = id_literal(self.component.id);
        let component_trait = self.paths.runtime_item("Component");
        let component_id = self.paths.runtime_item("ComponentId");

        quote! {
            impl #component_trait for #name {
                const ID: #component_id = #id;
                type Data = #data;
                type Update = #update;

                fn into_data(self) -> #data {
                    ::std::convert::From::from(self)
                }
            }
        }
    }

    fn snapshot_conversion(&self) -> TokenStream {
        let name = ident(&self.component.name);
        let data = self.paths.qualified(&self.data_type.qualified_name);
        let fields = self.fields().into_iter().map(|f| f.snapshot_to_data());
        let events = self.events().into_iter().map(|e| e.initial_member());

        quote! {
            impl ::std::convert::From<#name> for #data {
                fn from(value: #name) -> Self {
                    Self {
                        #(#fields,)*
                        is_dirty: false,
                        #(#events,)*
                    }
                }
            }
        }
    }

    fn data_impl(&self) -> TokenStream {
        let name = ident(&self.component.name);
        let update = ident(&self.component.update_name());
        let data = self.paths.qualified(&self.data_type.qualified_name);
        let data_trait = self.paths.runtime_item("ComponentData");
        let component_trait = self.paths.runtime_item("Component");
        let update_payload = self.paths.runtime_item("SchemaComponentUpdate");
        let fields = self.fields();
        let events = self.events();

        let apply_fields = fields.iter().map(|f| f.apply_update());
        let apply_events = events.iter().map(|e| e.apply_update());
        let dirty = fields.iter().map(|f| f.is_dirty());
        let staged = events.iter().map(|e| e.has_staged());
        let flush_fields = fields.iter().map(|f| f.flush_dirty());
        let flush_events = events.iter().map(|e| e.flush_staged());
        let clear_events = events.iter().map(|e| e.clear_received());

        quote! {
            impl #data_trait for #data {
                type Component = #name;

                fn apply_update(&mut self, update: &#update) {
                    #(#apply_fields)*
                    #(#apply_events)*
                }

                fn has_pending_changes(&self) -> bool {
                    false #(|| #dirty)* #(|| #staged)*
                }

                fn flush_update(&mut self) -> #update_payload {
                    let mut update = #update_payload::new(<#name as #component_trait>::ID);
                    #(#flush_fields)*
                    #(#flush_events)*
                    update
                }

                fn make_dirty(&mut self) {
                    self.is_dirty = true;
                }

                fn take_dirty(&mut self) -> bool {
                    ::std::mem::take(&mut self.is_dirty)
                }

                fn cleanup_after_frame(&mut self) {
                    #(#clear_events)*
                }
            }
        }
    }

    fn update_impl(&self) -> TokenStream {
        let name = ident(&self.component.name);
        let update = ident(&self.component.update_name());
        let update_trait = self.paths.runtime_item("ComponentUpdate");
        let update_payload = self.paths.runtime_item("SchemaComponentUpdate");
        let fields = self.fields();
        let events = self.events();

        let read_fields = fields.iter().map(|f| f.read_update_member());
        let read_events = events.iter().map(|e| e.read_update_member());
        let write_fields = fields.iter().map(|f| f.write_update_member());
        let write_events = events.iter().map(|e| e.write_update_member());
        let contains = events.iter().map(|e| e.update_contains_events());

        quote! {
            impl #update_trait for #update {
                type Component = #name;

                fn read_update(update: &#update_payload) -> Self {
                    Self {
                        #(#read_fields,)*
                        #(#read_events,)*
                    }
                }

                fn write_update(&self, update: &mut #update_payload) {
                    #(#write_fields)*
                    #(#write_events)*
                }

                fn contains_events(&self) -> bool {
                    false #(|| #contains)*
                }
            }
        }
    }
}
