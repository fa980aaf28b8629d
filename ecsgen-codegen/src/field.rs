//! Per-field code fragments.

use crate::names::{Paths, id_literal, ident};
use crate::schema_type::SchemaTypeCode;
use ecsgen_schema::FieldDef;
use proc_macro2::{Ident, TokenStream};
use quote::quote;

/// Generates the fragments a field contributes to its type and component.
pub struct FieldGenerator<'a> {
    field: &'a FieldDef,
    paths: &'a Paths,
}

impl<'a> FieldGenerator<'a> {
    /// Creates a new field generator.
    #[must_use]
    pub fn new(field: &'a FieldDef, paths: &'a Paths) -> Self {
        Self { field, paths }
    }

    fn name(&self) -> Ident {
        ident(&self.field.name)
    }

    fn doc(&self) -> String {
        format!(" `{}` (field {}).", self.field.ty, self.field.id)
    }

    /// Member of a plain struct or component read struct.
    #[must_use]
    pub fn plain_member(&self) -> TokenStream {
        let name = self.name();
        let ty = self.field.ty.rust_type(self.paths);
        let doc = self.doc();
        quote! {
            #[doc = #doc]
            pub #name: #ty
        }
    }

    /// Member of a component data struct, wrapped in a dirty-tracking cell.
    #[must_use]
    pub fn data_member(&self) -> TokenStream {
        let name = self.name();
        let ty = self.field.ty.rust_type(self.paths);
        let property = self.paths.runtime_item("Property");
        let doc = self.doc();
        quote! {
            #[doc = #doc]
            pub #name: #property<#ty>
        }
    }

    /// Member of a component update struct; `None` leaves the field untouched.
    #[must_use]
    pub fn update_member(&self) -> TokenStream {
        let name = self.name();
        let ty = self.field.ty.rust_type(self.paths);
        let doc = self.doc();
        quote! {
            #[doc = #doc]
            pub #name: ::std::option::Option<#ty>
        }
    }

    /// Initializer reading the field from `object`.
    #[must_use]
    pub fn read_member(&self) -> TokenStream {
        let name = self.name();
        let read = self.read_code(&quote!(object));
        if self.field.is_data_property {
            let property = self.paths.runtime_item("Property");
            quote!(#name: #property::new(#read))
        } else {
            quote!(#name: #read)
        }
    }

    /// Statement writing the field into `object`.
    #[must_use]
    pub fn write_member(&self) -> TokenStream {
        let name = self.name();
        let value = if self.field.is_data_property {
            quote!(self.#name.get())
        } else {
            quote!(&self.#name)
        };
        let write = self
            .field
            .ty
            .serialize_code(self.paths, &quote!(object), self.field.id, &quote!(value));
        quote! {
            {
                let value = #value;
                #write
            }
        }
    }

    /// Initializer reading an update field; present when stored or cleared.
    #[must_use]
    pub fn read_update_member(&self) -> TokenStream {
        let name = self.name();
        let id = id_literal(self.field.id);
        let holder = quote!(update.fields);
        let count = self.field.ty.count_code(&holder, self.field.id);
        let read = self.read_code(&holder);
        quote! {
            #name: if #count > 0 || update.is_field_cleared(#id) {
                ::std::option::Option::Some(#read)
            } else {
                ::std::option::Option::None
            }
        }
    }

    /// Statement writing a set update field into `update`.
    #[must_use]
    pub fn write_update_member(&self) -> TokenStream {
        let name = self.name();
        let write = self.write_into_update(&quote!(value));
        quote! {
            if let ::std::option::Option::Some(value) = &self.#name {
                #write
            }
        }
    }

    /// Statement overwriting the live value when the update sets it.
    #[must_use]
    pub fn apply_update(&self) -> TokenStream {
        let name = self.name();
        let property = self.paths.runtime_item("Property");
        quote! {
            if let ::std::option::Option::Some(value) = &update.#name {
                self.#name = #property::new(::std::clone::Clone::clone(value));
            }
        }
    }

    /// Statement serializing the field into `update` if it is dirty.
    #[must_use]
    pub fn flush_dirty(&self) -> TokenStream {
        let name = self.name();
        let write = self.write_into_update(&quote!(value));
        quote! {
            if self.#name.take_dirty() {
                let value = self.#name.get();
                #write
            }
        }
    }

    /// Expression testing the field's dirty bit.
    #[must_use]
    pub fn is_dirty(&self) -> TokenStream {
        let name = self.name();
        quote!(self.#name.is_dirty())
    }

    /// Initializer converting a read struct member into a data member.
    #[must_use]
    pub fn snapshot_to_data(&self) -> TokenStream {
        let name = self.name();
        quote!(#name: ::std::convert::Into::into(value.#name))
    }

    fn read_code(&self, holder: &TokenStream) -> TokenStream {
        self.field
            .ty
            .deserialize_code(self.paths, holder, self.field.id, &quote!(0))
    }

    // Writes `value` into `update.fields`; an empty container is recorded as
    // cleared so that the receiver still sees the field as set.
    fn write_into_update(&self, value: &TokenStream) -> TokenStream {
        let holder = quote!(update.fields);
        let write = self
            .field
            .ty
            .serialize_code(self.paths, &holder, self.field.id, value);
        if self.field.ty.is_container() {
            let id = id_literal(self.field.id);
            quote! {
                #write
                if !update.fields.has_field(#id) {
                    update.add_cleared_field(#id);
                }
            }
        } else {
            write
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use ecsgen_schema::{BuiltInType, SchemaType};

    fn paths() -> Paths {
        Paths::from_config(&GeneratorConfig::default()).unwrap()
    }

    fn field(ty: SchemaType, is_data_property: bool) -> FieldDef {
        FieldDef {
            name: "speed".to_string(),
            id: 2,
            ty,
            is_data_property,
        }
    }

    fn compact(tokens: TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    #[test]
    fn test_members() {
        let paths = paths();
        let def = field(SchemaType::Scalar(BuiltInType::Float), true);
        let generator = FieldGenerator::new(&def, &paths);
        assert!(compact(generator.plain_member()).ends_with("pubspeed:f32"));
        assert!(compact(generator.data_member()).ends_with("pubspeed:::ecsgen_core::Property<f32>"));
        assert!(
            compact(generator.update_member()).ends_with("pubspeed:::std::option::Option<f32>")
        );
    }

    #[test]
    fn test_read_member_wraps_data_property() {
        let paths = paths();
        let plain = field(SchemaType::Scalar(BuiltInType::Float), false);
        assert_eq!(
            compact(FieldGenerator::new(&plain, &paths).read_member()),
            "speed:object.index_float(2,0)"
        );

        let data = field(SchemaType::Scalar(BuiltInType::Float), true);
        assert_eq!(
            compact(FieldGenerator::new(&data, &paths).read_member()),
            "speed:::ecsgen_core::Property::new(object.index_float(2,0))"
        );
    }

    #[test]
    fn test_write_member_reads_through_property() {
        let paths = paths();
        let data = field(SchemaType::Scalar(BuiltInType::Float), true);
        let code = compact(FieldGenerator::new(&data, &paths).write_member());
        assert!(code.contains("letvalue=self.speed.get();"));
        assert!(code.contains("object.add_float(2,*value);"));
    }

    #[test]
    fn test_update_read_honours_cleared_fields() {
        let paths = paths();
        let def = field(SchemaType::list(SchemaType::Scalar(BuiltInType::Uint32)), true);
        let code = compact(FieldGenerator::new(&def, &paths).read_update_member());
        assert!(code.starts_with("speed:ifupdate.fields.uint32_count(2)>0||update.is_field_cleared(2){"));
    }

    #[test]
    fn test_container_write_records_cleared_field() {
        let paths = paths();
        let list = field(SchemaType::list(SchemaType::Scalar(BuiltInType::Uint32)), true);
        let code = compact(FieldGenerator::new(&list, &paths).flush_dirty());
        assert!(code.starts_with("ifself.speed.take_dirty(){"));
        assert!(code.contains("update.add_cleared_field(2);"));

        let scalar = field(SchemaType::Scalar(BuiltInType::Uint32), true);
        let code = compact(FieldGenerator::new(&scalar, &paths).write_update_member());
        assert!(!code.contains("add_cleared_field"));
    }

    #[test]
    fn test_apply_update_resets_dirty_bit() {
        let paths = paths();
        let def = field(SchemaType::Scalar(BuiltInType::String), true);
        let code = compact(FieldGenerator::new(&def, &paths).apply_update());
        assert!(code.contains(
            "self.speed=::ecsgen_core::Property::new(::std::clone::Clone::clone(value));"
        ));
    }

    #[test]
    fn test_keyword_field_name() {
        let paths = paths();
        let mut def = field(SchemaType::Scalar(BuiltInType::Bool), false);
        def.name = "type".to_string();
        assert!(compact(FieldGenerator::new(&def, &paths).plain_member()).ends_with("pubr#type:bool"));
    }
}
