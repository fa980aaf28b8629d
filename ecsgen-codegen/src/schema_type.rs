//! Code fragments for one [`SchemaType`].
//!
//! Every fragment works against a holder expression of type `SchemaObject`
//! (taken by reference for reads, by mutable reference for writes). Values
//! passed to [`SchemaTypeCode::serialize_code`] are expressions yielding a
//! reference to the Rust value.

use crate::names::{Paths, id_literal};
use ecsgen_core::FieldId;
use ecsgen_schema::{BuiltInType, SchemaType};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Serialize, deserialize and count logic of a schema type shape.
pub trait SchemaTypeCode {
    /// Rust type of the shape.
    fn rust_type(&self, paths: &Paths) -> TokenStream;

    /// Expression reading the value stored at `index` of `field_id`.
    ///
    /// Options, lists and maps read every stored value and ignore `index`.
    fn deserialize_code(
        &self,
        paths: &Paths,
        holder: &TokenStream,
        field_id: FieldId,
        index: &TokenStream,
    ) -> TokenStream;

    /// Statement writing the value referenced by `value` under `field_id`.
    fn serialize_code(
        &self,
        paths: &Paths,
        holder: &TokenStream,
        field_id: FieldId,
        value: &TokenStream,
    ) -> TokenStream;

    /// Expression counting the values stored under `field_id`.
    fn count_code(&self, holder: &TokenStream, field_id: FieldId) -> TokenStream;
}

fn builtin_rust_type(builtin: BuiltInType, paths: &Paths) -> TokenStream {
    match builtin {
        BuiltInType::Bool => quote!(bool),
        BuiltInType::Uint32 => quote!(u32),
        BuiltInType::Uint64 => quote!(u64),
        BuiltInType::Int32 => quote!(i32),
        BuiltInType::Int64 => quote!(i64),
        BuiltInType::Sint32 | BuiltInType::Sfixed32 => quote!(i32),
        BuiltInType::Sint64 | BuiltInType::Sfixed64 => quote!(i64),
        BuiltInType::Fixed32 => quote!(u32),
        BuiltInType::Fixed64 => quote!(u64),
        BuiltInType::Float => quote!(f32),
        BuiltInType::Double => quote!(f64),
        BuiltInType::String => quote!(::std::string::String),
        BuiltInType::Bytes => quote!(::std::vec::Vec<u8>),
        BuiltInType::EntityId => paths.runtime_item("EntityId"),
    }
}

impl SchemaTypeCode for SchemaType {
    fn rust_type(&self, paths: &Paths) -> TokenStream {
        match self {
            Self::Scalar(builtin) => builtin_rust_type(*builtin, paths),
            Self::Reference(name) => paths.qualified(name),
            Self::Option(inner) => {
                let inner = inner.rust_type(paths);
                quote!(::std::option::Option<#inner>)
            }
            Self::List(inner) => {
                let inner = inner.rust_type(paths);
                quote!(::std::vec::Vec<#inner>)
            }
            Self::Map(key, value) => {
                let key = key.rust_type(paths);
                let value = value.rust_type(paths);
                quote!(::std::collections::HashMap<#key, #value>)
            }
        }
    }

    fn deserialize_code(
        &self,
        paths: &Paths,
        holder: &TokenStream,
        field_id: FieldId,
        index: &TokenStream,
    ) -> TokenStream {
        let id = id_literal(field_id);
        match self {
            Self::Scalar(builtin) => {
                let method = format_ident!("index_{}", builtin.method_group());
                quote!(#holder.#method(#id, #index))
            }
            Self::Reference(name) => {
                let path = paths.qualified(name);
                let data = paths.runtime_item("SchemaData");
                quote!(<#path as #data>::deserialize(#holder.index_object(#id, #index)))
            }
            Self::Option(inner) => {
                let count = inner.count_code(holder, field_id);
                let value = inner.deserialize_code(paths, holder, field_id, &quote!(0));
                quote! {
                    if #count > 0 {
                        ::std::option::Option::Some(#value)
                    } else {
                        ::std::option::Option::None
                    }
                }
            }
            Self::List(inner) => {
                let count = inner.count_code(holder, field_id);
                let value = inner.deserialize_code(paths, holder, field_id, &quote!(i));
                quote! {
                    {
                        let count = #count;
                        let mut list = ::std::vec::Vec::with_capacity(count as usize);
                        for i in 0..count {
                            list.push(#value);
                        }
                        list
                    }
                }
            }
            Self::Map(key, value) => {
                let entry = quote!(entry);
                let key = key.deserialize_code(paths, &entry, 1, &quote!(0));
                let value = value.deserialize_code(paths, &entry, 2, &quote!(0));
                quote! {
                    {
                        let count = #holder.object_count(#id);
                        let mut map = ::std::collections::HashMap::with_capacity(count as usize);
                        for i in 0..count {
                            let entry = #holder.index_object(#id, i);
                            map.insert(#key, #value);
                        }
                        map
                    }
                }
            }
        }
    }

    fn serialize_code(
        &self,
        paths: &Paths,
        holder: &TokenStream,
        field_id: FieldId,
        value: &TokenStream,
    ) -> TokenStream {
        let id = id_literal(field_id);
        match self {
            Self::Scalar(builtin) => {
                let method = format_ident!("add_{}", builtin.method_group());
                if builtin.is_copy() {
                    quote!(#holder.#method(#id, *#value);)
                } else {
                    quote!(#holder.#method(#id, #value);)
                }
            }
            Self::Reference(name) => {
                let path = paths.qualified(name);
                let data = paths.runtime_item("SchemaData");
                quote!(<#path as #data>::serialize(#value, #holder.add_object(#id));)
            }
            Self::Option(inner) => {
                let write = inner.serialize_code(paths, holder, field_id, &quote!(item));
                quote! {
                    if let ::std::option::Option::Some(item) = #value {
                        #write
                    }
                }
            }
            Self::List(inner) => {
                let write = inner.serialize_code(paths, holder, field_id, &quote!(item));
                quote! {
                    for item in #value {
                        #write
                    }
                }
            }
            Self::Map(key, value_type) => {
                let entry = quote!(entry);
                let write_key = key.serialize_code(paths, &entry, 1, &quote!(key));
                let write_value = value_type.serialize_code(paths, &entry, 2, &quote!(item));
                quote! {
                    for (key, item) in #value {
                        let entry = #holder.add_object(#id);
                        #write_key
                        #write_value
                    }
                }
            }
        }
    }

    fn count_code(&self, holder: &TokenStream, field_id: FieldId) -> TokenStream {
        let id = id_literal(field_id);
        match self {
            Self::Scalar(builtin) => {
                let method = format_ident!("{}_count", builtin.method_group());
                quote!(#holder.#method(#id))
            }
            Self::Reference(_) | Self::Map(..) => quote!(#holder.object_count(#id)),
            Self::Option(inner) | Self::List(inner) => inner.count_code(holder, field_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;

    fn paths() -> Paths {
        Paths::from_config(&GeneratorConfig::default()).unwrap()
    }

    fn compact(tokens: TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    fn holder() -> TokenStream {
        quote!(object)
    }

    #[test]
    fn test_rust_types() {
        let paths = paths();
        assert_eq!(
            compact(SchemaType::Scalar(BuiltInType::Double).rust_type(&paths)),
            "f64"
        );
        assert_eq!(
            compact(SchemaType::list(SchemaType::Scalar(BuiltInType::EntityId)).rust_type(&paths)),
            "::std::vec::Vec<::ecsgen_core::EntityId>"
        );
        assert_eq!(
            compact(
                SchemaType::map(
                    SchemaType::Scalar(BuiltInType::String),
                    SchemaType::option(SchemaType::reference("a.b.C"))
                )
                .rust_type(&paths)
            ),
            "::std::collections::HashMap<::std::string::String,::std::option::Option<crate::generated::a::b::C>>"
        );
    }

    #[test]
    fn test_scalar_fragments() {
        let paths = paths();
        let ty = SchemaType::Scalar(BuiltInType::Uint32);
        assert_eq!(
            compact(ty.deserialize_code(&paths, &holder(), 3, &quote!(0))),
            "object.index_uint32(3,0)"
        );
        assert_eq!(
            compact(ty.serialize_code(&paths, &holder(), 3, &quote!(value))),
            "object.add_uint32(3,*value);"
        );
        assert_eq!(compact(ty.count_code(&holder(), 3)), "object.uint32_count(3)");
    }

    #[test]
    fn test_wire_variant_integers() {
        let paths = paths();
        let sint = SchemaType::Scalar(BuiltInType::Sint32);
        assert_eq!(compact(sint.rust_type(&paths)), "i32");
        assert_eq!(
            compact(sint.serialize_code(&paths, &holder(), 4, &quote!(value))),
            "object.add_sint32(4,*value);"
        );
        let fixed = SchemaType::Scalar(BuiltInType::Fixed64);
        assert_eq!(compact(fixed.rust_type(&paths)), "u64");
        assert_eq!(
            compact(fixed.deserialize_code(&paths, &holder(), 5, &quote!(0))),
            "object.index_fixed64(5,0)"
        );
        assert_eq!(
            compact(SchemaType::Scalar(BuiltInType::Sfixed32).count_code(&holder(), 6)),
            "object.sfixed32_count(6)"
        );
    }

    #[test]
    fn test_string_passes_reference() {
        let paths = paths();
        let ty = SchemaType::Scalar(BuiltInType::String);
        assert_eq!(
            compact(ty.serialize_code(&paths, &holder(), 1, &quote!(value))),
            "object.add_string(1,value);"
        );
    }

    #[test]
    fn test_entity_id_method_group() {
        let paths = paths();
        let ty = SchemaType::Scalar(BuiltInType::EntityId);
        assert_eq!(
            compact(ty.deserialize_code(&paths, &holder(), 2, &quote!(i))),
            "object.index_entity_id(2,i)"
        );
    }

    #[test]
    fn test_reference_uses_child_object() {
        let paths = paths();
        let ty = SchemaType::reference("foo.Vec3");
        assert_eq!(
            compact(ty.deserialize_code(&paths, &holder(), 4, &quote!(0))),
            "<crate::generated::foo::Vec3as::ecsgen_core::SchemaData>::deserialize(object.index_object(4,0))"
        );
        assert_eq!(compact(ty.count_code(&holder(), 4)), "object.object_count(4)");
    }

    #[test]
    fn test_option_checks_count_before_reading() {
        let paths = paths();
        let ty = SchemaType::option(SchemaType::Scalar(BuiltInType::Float));
        let code = compact(ty.deserialize_code(&paths, &holder(), 5, &quote!(0)));
        assert!(code.starts_with("ifobject.float_count(5)>0{"));
        assert!(code.contains("::std::option::Option::None"));
        assert_eq!(compact(ty.count_code(&holder(), 5)), "object.float_count(5)");
    }

    #[test]
    fn test_map_uses_entry_slots() {
        let paths = paths();
        let ty = SchemaType::map(
            SchemaType::Scalar(BuiltInType::Uint32),
            SchemaType::Scalar(BuiltInType::String),
        );
        let read = compact(ty.deserialize_code(&paths, &holder(), 6, &quote!(0)));
        assert!(read.contains("letentry=object.index_object(6,i);"));
        assert!(read.contains("map.insert(entry.index_uint32(1,0),entry.index_string(2,0));"));

        let write = compact(ty.serialize_code(&paths, &holder(), 6, &quote!(value)));
        assert!(write.contains("letentry=object.add_object(6);"));
        assert!(write.contains("entry.add_uint32(1,*key);"));
        assert!(write.contains("entry.add_string(2,item);"));
    }

    #[test]
    fn test_generated_fragments_parse() {
        let paths = paths();
        let shapes = [
            SchemaType::option(SchemaType::reference("a.B")),
            SchemaType::list(SchemaType::Scalar(BuiltInType::Bytes)),
            SchemaType::map(
                SchemaType::Scalar(BuiltInType::EntityId),
                SchemaType::reference("a.B"),
            ),
        ];
        for ty in shapes {
            let read = ty.deserialize_code(&paths, &holder(), 1, &quote!(0));
            syn::parse2::<syn::Expr>(read).expect("read fragment should parse");
            let write = ty.serialize_code(&paths, &holder(), 1, &quote!(value));
            syn::parse2::<syn::Block>(quote!({ #write })).expect("write fragment should parse");
        }
    }
}
