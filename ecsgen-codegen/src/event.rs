//! Per-event code fragments.
//!
//! Events travel as a repeated value keyed by the event index in the events
//! object of a component update.

use crate::names::{Paths, ident};
use crate::schema_type::SchemaTypeCode;
use ecsgen_schema::{EventDef, SchemaType};
use proc_macro2::{Ident, TokenStream};
use quote::quote;

/// Generates the fragments an event contributes to its component.
pub struct EventGenerator<'a> {
    event: &'a EventDef,
    paths: &'a Paths,
    list: SchemaType,
}

impl<'a> EventGenerator<'a> {
    /// Creates a new event generator.
    #[must_use]
    pub fn new(event: &'a EventDef, paths: &'a Paths) -> Self {
        Self {
            event,
            paths,
            list: SchemaType::list(event.ty.clone()),
        }
    }

    fn name(&self) -> Ident {
        ident(&self.event.name)
    }

    fn doc(&self) -> String {
        format!(" `{}` events (index {}).", self.event.ty, self.event.index)
    }

    /// Queue member of the component data struct.
    #[must_use]
    pub fn data_member(&self) -> TokenStream {
        let name = self.name();
        let ty = self.event.ty.rust_type(self.paths);
        let queue = self.paths.runtime_item("EventQueue");
        let doc = self.doc();
        quote! {
            #[doc = #doc]
            pub #name: #queue<#ty>
        }
    }

    /// List member of the component update struct.
    #[must_use]
    pub fn update_member(&self) -> TokenStream {
        let name = self.name();
        let ty = self.list.rust_type(self.paths);
        let doc = self.doc();
        quote! {
            #[doc = #doc]
            pub #name: #ty
        }
    }

    /// Initializer for an empty queue.
    #[must_use]
    pub fn initial_member(&self) -> TokenStream {
        let name = self.name();
        let queue = self.paths.runtime_item("EventQueue");
        quote!(#name: #queue::new())
    }

    /// Statement appending every received event of the update.
    #[must_use]
    pub fn apply_update(&self) -> TokenStream {
        let name = self.name();
        quote! {
            for value in &update.#name {
                self.#name.add_event(::std::clone::Clone::clone(value));
            }
        }
    }

    /// Initializer reading the update's events.
    #[must_use]
    pub fn read_update_member(&self) -> TokenStream {
        let name = self.name();
        let read = self.list.deserialize_code(
            self.paths,
            &quote!(update.events),
            self.event.index,
            &quote!(0),
        );
        quote!(#name: #read)
    }

    /// Statement writing the update's events.
    #[must_use]
    pub fn write_update_member(&self) -> TokenStream {
        let name = self.name();
        self.list.serialize_code(
            self.paths,
            &quote!(update.events),
            self.event.index,
            &quote!(&self.#name),
        )
    }

    /// Statements serializing staged events, then clearing them.
    #[must_use]
    pub fn flush_staged(&self) -> TokenStream {
        let name = self.name();
        let write = self.list.serialize_code(
            self.paths,
            &quote!(update.events),
            self.event.index,
            &quote!(self.#name.staged()),
        );
        quote! {
            #write
            self.#name.clear_staged();
        }
    }

    /// Expression testing for staged events.
    #[must_use]
    pub fn has_staged(&self) -> TokenStream {
        let name = self.name();
        quote!(self.#name.has_staged())
    }

    /// Expression testing an update for events.
    #[must_use]
    pub fn update_contains_events(&self) -> TokenStream {
        let name = self.name();
        quote!(!self.#name.is_empty())
    }

    /// Statement dropping received events.
    #[must_use]
    pub fn clear_received(&self) -> TokenStream {
        let name = self.name();
        quote!(self.#name.clear();)
    }
}
