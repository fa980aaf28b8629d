//! Command marker generation.

use crate::names::{Paths, id_literal, ident};
use crate::schema_type::SchemaTypeCode;
use ecsgen_schema::{CommandDef, ComponentDef};
use proc_macro2::TokenStream;
use quote::quote;

/// Generates the marker, getter and dispatch arms of a command.
pub struct CommandGenerator<'a> {
    component: &'a ComponentDef,
    command: &'a CommandDef,
    paths: &'a Paths,
}

impl<'a> CommandGenerator<'a> {
    /// Creates a new command generator.
    #[must_use]
    pub fn new(component: &'a ComponentDef, command: &'a CommandDef, paths: &'a Paths) -> Self {
        Self {
            component,
            command,
            paths,
        }
    }

    /// Zero-size marker struct and its `Command` impl.
    #[must_use]
    pub fn marker(&self) -> TokenStream {
        let marker = ident(&self.component.command_struct_name(self.command));
        let component = ident(&self.component.name);
        let request = self.command.request.rust_type(self.paths);
        let response = self.command.response.rust_type(self.paths);
        let index = id_literal(self.command.index);
        let command_trait = self.paths.runtime_item("Command");
        let command_index = self.paths.runtime_item("CommandIndex");
        let doc = format!(
            " Command `{}` of `{}` (index {}).",
            self.command.name, self.component.qualified_name, self.command.index
        );

        quote! {
            #[doc = #doc]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct #marker;

            impl #command_trait for #marker {
                type Component = #component;
                type Request = #request;
                type Response = #response;
                const COMMAND_INDEX: #command_index = #index;
            }
        }
    }

    /// Associated function on the component read struct returning the marker.
    #[must_use]
    pub fn getter(&self) -> TokenStream {
        let name = ident(&self.command.name);
        let marker = ident(&self.component.command_struct_name(self.command));
        quote! {
            #[must_use]
            pub fn #name() -> #marker {
                #marker
            }
        }
    }

    /// Match arm dispatching a request on (component id, command index).
    #[must_use]
    pub fn request_arm(&self) -> TokenStream {
        self.dispatch_arm(quote!(deserialize_request), quote!(request))
    }

    /// Match arm dispatching a response on (component id, command index).
    #[must_use]
    pub fn response_arm(&self) -> TokenStream {
        self.dispatch_arm(quote!(deserialize_response), quote!(response))
    }

    fn dispatch_arm(&self, method: TokenStream, payload: TokenStream) -> TokenStream {
        let marker = self
            .paths
            .item(&self.component.package, &self.component.command_struct_name(self.command));
        let component_id = id_literal(self.component.id);
        let index = id_literal(self.command.index);
        let command_trait = self.paths.runtime_item("Command");
        quote! {
            (#component_id, #index) => ::std::result::Result::Ok(
                ::std::boxed::Box::new(<#marker as #command_trait>::#method(#payload)?)
                    as ::std::boxed::Box<dyn ::std::any::Any>
            ),
        }
    }
}
