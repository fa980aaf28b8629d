//! Schema document parser.
//!
//! Turns JSON text into [`SchemaDocument`] records and document type
//! references into [`SchemaType`] shapes.

use crate::document::{FieldDefinition, SchemaDocument, TypeReference};
use crate::error::ParseError;
use crate::types::{BuiltInType, SchemaType};
use std::path::Path;

/// Parses a schema document from a string.
///
/// # Arguments
/// * `json` - JSON document content
///
/// # Errors
/// Returns [`ParseError::Json`] with the JSON path of the failure if the
/// content is malformed or does not match the document layout.
pub fn parse_document(json: &str) -> Result<SchemaDocument, ParseError> {
    parse_named(json, "<input>")
}

/// Reads and parses a schema document from a file.
///
/// # Errors
/// Returns [`ParseError::Io`] if the file cannot be read, or
/// [`ParseError::Json`] if its content is invalid.
pub fn parse_file(path: impl AsRef<Path>) -> Result<SchemaDocument, ParseError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| ParseError::io(path, e))?;
    parse_named(&json, &path.display().to_string())
}

fn parse_named(json: &str, source_name: &str) -> Result<SchemaDocument, ParseError> {
    let de = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(de).map_err(|err| ParseError::Json {
        source_name: source_name.to_string(),
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Converts a field declaration into its type shape.
///
/// # Arguments
/// * `field` - Field declaration
/// * `site` - Description of the field used in error messages
///
/// # Errors
/// Returns an error if the field declares no shape, several shapes, or an
/// invalid type reference.
pub fn field_type(field: &FieldDefinition, site: &str) -> Result<SchemaType, ParseError> {
    let shapes = [
        field.singular_type.is_some(),
        field.option_type.is_some(),
        field.list_type.is_some(),
        field.map_type.is_some(),
    ];
    if shapes.iter().filter(|present| **present).count() > 1 {
        return Err(ParseError::ConflictingTypeShapes {
            field: site.to_string(),
        });
    }

    if let Some(singular) = &field.singular_type {
        type_reference(singular, site)
    } else if let Some(option) = &field.option_type {
        Ok(SchemaType::option(type_reference(&option.value_type, site)?))
    } else if let Some(list) = &field.list_type {
        Ok(SchemaType::list(type_reference(&list.value_type, site)?))
    } else if let Some(map) = &field.map_type {
        Ok(SchemaType::map(
            type_reference(&map.key_type, site)?,
            type_reference(&map.value_type, site)?,
        ))
    } else {
        Err(ParseError::MissingTypeShape {
            field: site.to_string(),
        })
    }
}

/// Converts a builtin-or-user type reference into a type shape.
///
/// # Errors
/// Returns an error if the builtin name is unknown or the reference is empty.
pub fn type_reference(reference: &TypeReference, site: &str) -> Result<SchemaType, ParseError> {
    match (&reference.built_in_type, &reference.user_type) {
        (Some(name), _) => BuiltInType::from_schema_name(name)
            .map(SchemaType::Scalar)
            .ok_or_else(|| ParseError::unknown_builtin(name, site)),
        (None, Some(user_type)) => Ok(SchemaType::reference(user_type)),
        (None, None) => Err(ParseError::EmptyTypeReference {
            site: site.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITION_SCHEMA: &str = r#"{
        "package": "foo.bar",
        "typeDefinitions": [
            {
                "name": "Vector3",
                "qualifiedName": "foo.bar.Vector3",
                "fieldDefinitions": [
                    { "name": "x", "number": 1, "singularType": { "builtInType": "double" } },
                    { "name": "y", "number": 2, "singularType": { "builtInType": "double" } },
                    { "name": "z", "number": 3, "singularType": { "builtInType": "double" } }
                ]
            }
        ],
        "componentDefinitions": [
            {
                "name": "Position",
                "id": 1,
                "qualifiedName": "foo.bar.Position",
                "dataDefinition": { "userType": "foo.bar.Vector3" },
                "eventDefinitions": [],
                "commandDefinitions": []
            }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = parse_document(POSITION_SCHEMA).expect("Failed to parse");
        assert_eq!(doc.package, "foo.bar");
        assert_eq!(doc.type_definitions.len(), 1);
        assert_eq!(doc.type_definitions[0].field_definitions.len(), 3);
        assert_eq!(doc.component_definitions[0].id, 1);
        assert_eq!(
            doc.component_definitions[0].data_definition.user_type,
            "foo.bar.Vector3"
        );
    }

    #[test]
    fn test_missing_arrays_default_to_empty() {
        let doc = parse_document(r#"{ "package": "empty" }"#).expect("Failed to parse");
        assert!(doc.type_definitions.is_empty());
        assert!(doc.component_definitions.is_empty());
    }

    #[test]
    fn test_parse_error_has_json_path() {
        let json = r#"{ "package": "p", "typeDefinitions": [ { "name": "T", "qualifiedName": "p.T",
            "fieldDefinitions": [ { "name": "x", "number": "one" } ] } ] }"#;
        let err = parse_document(json).unwrap_err();
        match err {
            ParseError::Json { path, .. } => {
                assert_eq!(path, "typeDefinitions[0].fieldDefinitions[0].number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_document("{ not json"),
            Err(ParseError::Json { .. })
        ));
    }

    #[test]
    fn test_field_type_shapes() {
        let json = r#"{ "package": "p", "typeDefinitions": [ { "name": "T", "qualifiedName": "p.T",
            "fieldDefinitions": [
                { "name": "a", "number": 1, "optionType": { "valueType": { "builtInType": "uint32" } } },
                { "name": "b", "number": 2, "listType": { "valueType": { "userType": "p.U" } } },
                { "name": "c", "number": 3, "mapType": { "keyType": { "builtInType": "string" },
                                                         "valueType": { "builtInType": "EntityId" } } }
            ] } ] }"#;
        let doc = parse_document(json).expect("Failed to parse");
        let fields = &doc.type_definitions[0].field_definitions;

        assert_eq!(
            field_type(&fields[0], "a").unwrap(),
            SchemaType::option(SchemaType::Scalar(BuiltInType::Uint32))
        );
        assert_eq!(
            field_type(&fields[1], "b").unwrap(),
            SchemaType::list(SchemaType::reference("p.U"))
        );
        assert_eq!(
            field_type(&fields[2], "c").unwrap(),
            SchemaType::map(
                SchemaType::Scalar(BuiltInType::String),
                SchemaType::Scalar(BuiltInType::EntityId)
            )
        );
    }

    #[test]
    fn test_field_type_errors() {
        let field = FieldDefinition {
            name: "x".to_string(),
            number: 1,
            singular_type: None,
            option_type: None,
            list_type: None,
            map_type: None,
        };
        assert!(matches!(
            field_type(&field, "x"),
            Err(ParseError::MissingTypeShape { .. })
        ));

        let unknown = TypeReference {
            built_in_type: Some("int8".to_string()),
            user_type: None,
        };
        assert!(matches!(
            type_reference(&unknown, "x"),
            Err(ParseError::UnknownBuiltInType { .. })
        ));
        assert!(matches!(
            type_reference(&TypeReference::default(), "x"),
            Err(ParseError::EmptyTypeReference { .. })
        ));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/nonexistent/schema.json").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
