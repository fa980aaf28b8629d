//! User type generation.

use crate::event::EventGenerator;
use crate::field::FieldGenerator;
use crate::names::{Paths, ident};
use ecsgen_schema::TypeDef;
use proc_macro2::TokenStream;
use quote::quote;

/// Generates the struct and `SchemaData` impl of a user type.
///
/// A type promoted to a component's data type gets `Property` members, an
/// aggregate dirty flag and one event queue per component event.
pub struct TypeGenerator<'a> {
    type_def: &'a TypeDef,
    paths: &'a Paths,
}

impl<'a> TypeGenerator<'a> {
    /// Creates a new type generator.
    #[must_use]
    pub fn new(type_def: &'a TypeDef, paths: &'a Paths) -> Self {
        Self { type_def, paths }
    }

    fn fields(&self) -> impl Iterator<Item = FieldGenerator<'a>> + '_ {
        self.type_def
            .fields
            .iter()
            .map(|field| FieldGenerator::new(field, self.paths))
    }

    fn events(&self) -> impl Iterator<Item = EventGenerator<'a>> + '_ {
        self.type_def
            .events
            .iter()
            .map(|event| EventGenerator::new(event, self.paths))
    }

    /// Generates the type's items.
    #[must_use]
    pub fn generate(&self) -> TokenStream {
        let name = ident(&self.type_def.name);
        let schema_data = self.paths.runtime_item("SchemaData");
        let schema_object = self.paths.runtime_item("SchemaObject");
        let read_fields: Vec<_> = self.fields().map(|f| f.read_member()).collect();
        let write_fields: Vec<_> = self.fields().map(|f| f.write_member()).collect();

        let (doc, members, extra_init) = if self.type_def.is_data_type() {
            let owner = self.type_def.data_component.as_deref().unwrap_or_default();
            let doc = format!(
                " Data of component `{owner}`, generated from `{}`.",
                self.type_def.qualified_name
            );
            let fields = self.fields().map(|f| f.data_member());
            let events: Vec<_> = self.events().map(|e| e.data_member()).collect();
            let members = quote! {
                #(#fields,)*
                /// Aggregate dirty flag of the component.
                pub is_dirty: bool,
                #(#events,)*
            };
            let event_init = self.events().map(|e| e.initial_member());
            let extra_init = quote! {
                is_dirty: false,
                #(#event_init,)*
            };
            (doc, members, extra_init)
        } else {
            let doc = format!(" Generated from `{}`.", self.type_def.qualified_name);
            let fields = self.fields().map(|f| f.plain_member());
            (doc, quote!(#(#fields,)*), TokenStream::new())
        };

        quote! {
            #[doc = #doc]
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct #name {
                #members
            }

            impl #schema_data for #name {
                fn deserialize(object: &#schema_object) -> Self {
                    Self {
                        #(#read_fields,)*
                        #extra_init
                    }
                }

                fn serialize(&self, object: &mut #schema_object) {
                    #(#write_fields)*
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use ecsgen_schema::{BuiltInType, EventDef, FieldDef, SchemaType};

    fn vector3(promoted: bool) -> TypeDef {
        let field = |name: &str, id| FieldDef {
            name: name.to_string(),
            id,
            ty: SchemaType::Scalar(BuiltInType::Double),
            is_data_property: promoted,
        };
        TypeDef {
            package: "foo.bar".to_string(),
            name: "Vector3".to_string(),
            qualified_name: "foo.bar.Vector3".to_string(),
            fields: vec![field("x", 1), field("y", 2), field("z", 3)],
            data_component: promoted.then(|| "foo.bar.Position".to_string()),
            events: if promoted {
                vec![EventDef {
                    name: "moved".to_string(),
                    index: 1,
                    ty: SchemaType::reference("foo.bar.Moved"),
                }]
            } else {
                Vec::new()
            },
        }
    }

    fn generate(type_def: &TypeDef) -> syn::File {
        let paths = Paths::from_config(&GeneratorConfig::default()).unwrap();
        syn::parse2(TypeGenerator::new(type_def, &paths).generate()).expect("type should parse")
    }

    fn struct_fields(file: &syn::File) -> Vec<String> {
        let syn::Item::Struct(item) = &file.items[0] else {
            panic!("first item should be the struct");
        };
        item.fields
            .iter()
            .map(|f| f.ident.as_ref().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_plain_type() {
        let file = generate(&vector3(false));
        assert_eq!(file.items.len(), 2);
        assert_eq!(struct_fields(&file), ["x", "y", "z"]);
    }

    #[test]
    fn test_data_type_has_dirty_flag_and_queues() {
        let file = generate(&vector3(true));
        assert_eq!(struct_fields(&file), ["x", "y", "z", "is_dirty", "moved"]);

        let code = quote::ToTokens::to_token_stream(&file).to_string().replace(' ', "");
        assert!(code.contains("x:::ecsgen_core::Property::new(object.index_double(1,0))"));
        assert!(code.contains("is_dirty:false"));
        assert!(code.contains("moved:::ecsgen_core::EventQueue::new()"));
    }

    #[test]
    fn test_empty_type() {
        let empty = TypeDef {
            package: "p".to_string(),
            name: "Empty".to_string(),
            qualified_name: "p.Empty".to_string(),
            fields: Vec::new(),
            data_component: None,
            events: Vec::new(),
        };
        let file = generate(&empty);
        assert!(struct_fields(&file).is_empty());
    }
}
