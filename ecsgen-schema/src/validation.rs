//! Registry validation.
//!
//! Every check fails fast with the first offending definition, so that code
//! generation only ever sees a fully resolved schema.

use crate::error::SchemaError;
use crate::ir::{ComponentDef, Registry, TypeDef};
use crate::types::SchemaType;
use std::collections::{HashMap, HashSet};

/// Member every component data struct declares besides its fields and events.
pub const DIRTY_FLAG_MEMBER: &str = "is_dirty";

/// Items the root module of the generated tree defines itself.
pub const ROOT_ITEM_NAMES: [&str; 5] = [
    "GENERATED_NUMBER_OF_COMPONENTS",
    "component_unique_index",
    "ComponentData",
    "ComponentUpdate",
    "Schema",
];

/// Validates a registry before linking.
///
/// Checks, in order:
/// - package and item names are valid Rust identifiers
/// - qualified names are the package followed by the short name
/// - component ids are unique
/// - field ids are unique within each type
/// - event and command indices are unique within each component
/// - every referenced user type exists
/// - map keys are hashable scalars
/// - no type is the data type of two components
/// - no two generated items of a package share a name
/// - no two members of a generated struct share a name
///
/// # Errors
/// Returns the first [`SchemaError`] found.
pub fn validate_registry(registry: &Registry) -> Result<(), SchemaError> {
    validate_names(registry)?;
    validate_component_ids(registry)?;
    for type_def in registry.types().values() {
        validate_type(registry, type_def)?;
    }
    for component in registry.components().values() {
        validate_component(registry, component)?;
    }
    validate_data_types(registry)?;
    validate_item_names(registry)?;
    validate_member_names(registry)?;
    Ok(())
}

/// Returns true if `name` is a plain ASCII identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_identifier(kind: &str, name: &str) -> Result<(), SchemaError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            kind: kind.to_string(),
            name: name.to_string(),
        })
    }
}

fn check_package(package: &str) -> Result<(), SchemaError> {
    for segment in package.split('.') {
        if !is_identifier(segment) {
            return Err(SchemaError::InvalidName {
                kind: "package".to_string(),
                name: package.to_string(),
            });
        }
    }
    Ok(())
}

fn check_qualified_name(package: &str, name: &str, qualified_name: &str) -> Result<(), SchemaError> {
    let matches = qualified_name
        .strip_prefix(package)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|rest| rest == name);
    if matches {
        Ok(())
    } else {
        Err(SchemaError::QualifiedNameMismatch {
            package: package.to_string(),
            name: name.to_string(),
            qualified_name: qualified_name.to_string(),
        })
    }
}

fn validate_names(registry: &Registry) -> Result<(), SchemaError> {
    for type_def in registry.types().values() {
        check_package(&type_def.package)?;
        check_identifier("type", &type_def.name)?;
        check_qualified_name(&type_def.package, &type_def.name, &type_def.qualified_name)?;
        for field in &type_def.fields {
            check_identifier("field", &field.name)?;
        }
    }
    for component in registry.components().values() {
        check_package(&component.package)?;
        check_identifier("component", &component.name)?;
        check_qualified_name(&component.package, &component.name, &component.qualified_name)?;
        for event in &component.events {
            check_identifier("event", &event.name)?;
        }
        for command in &component.commands {
            check_identifier("command", &command.name)?;
        }
    }
    Ok(())
}

fn validate_component_ids(registry: &Registry) -> Result<(), SchemaError> {
    let mut seen: HashMap<_, &str> = HashMap::new();
    for component in registry.components().values() {
        if let Some(first) = seen.insert(component.id, &component.qualified_name) {
            return Err(SchemaError::DuplicateComponentId {
                id: component.id,
                first: first.to_string(),
                second: component.qualified_name.clone(),
            });
        }
    }
    Ok(())
}

fn validate_type(registry: &Registry, type_def: &TypeDef) -> Result<(), SchemaError> {
    let mut seen_ids = HashSet::new();
    for field in &type_def.fields {
        if !seen_ids.insert(field.id) {
            return Err(SchemaError::DuplicateFieldId {
                type_name: type_def.qualified_name.clone(),
                id: field.id,
            });
        }
        let site = format!(
            "field '{}' of type '{}'",
            field.name, type_def.qualified_name
        );
        validate_shape(registry, &field.ty, &site)?;
    }
    Ok(())
}

fn validate_component(registry: &Registry, component: &ComponentDef) -> Result<(), SchemaError> {
    if !registry.types().contains_key(&component.data_type) {
        return Err(SchemaError::unresolved(
            &component.data_type,
            format!("data type of component '{}'", component.qualified_name),
        ));
    }

    let mut seen_events = HashSet::new();
    for event in &component.events {
        if !seen_events.insert(event.index) {
            return Err(SchemaError::DuplicateEventIndex {
                component: component.qualified_name.clone(),
                index: event.index,
            });
        }
        let site = format!(
            "event '{}' of component '{}'",
            event.name, component.qualified_name
        );
        validate_shape(registry, &event.ty, &site)?;
    }

    let mut seen_commands = HashSet::new();
    for command in &component.commands {
        if !seen_commands.insert(command.index) {
            return Err(SchemaError::DuplicateCommandIndex {
                component: component.qualified_name.clone(),
                index: command.index,
            });
        }
        let site = format!(
            "command '{}' of component '{}'",
            command.name, component.qualified_name
        );
        validate_shape(registry, &command.request, &site)?;
        validate_shape(registry, &command.response, &site)?;
    }
    Ok(())
}

fn validate_shape(registry: &Registry, ty: &SchemaType, site: &str) -> Result<(), SchemaError> {
    match ty {
        SchemaType::Scalar(_) => Ok(()),
        SchemaType::Reference(name) => {
            if registry.types().contains_key(name) {
                Ok(())
            } else {
                Err(SchemaError::unresolved(name, site))
            }
        }
        SchemaType::Option(inner) | SchemaType::List(inner) => validate_shape(registry, inner, site),
        SchemaType::Map(key, value) => {
            if !key.is_valid_map_key() {
                return Err(SchemaError::InvalidMapKey {
                    key: key.to_string(),
                    site: site.to_string(),
                });
            }
            validate_shape(registry, value, site)
        }
    }
}

fn validate_data_types(registry: &Registry) -> Result<(), SchemaError> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for component in registry.components().values() {
        if let Some(first) = owners.insert(&component.data_type, &component.qualified_name) {
            return Err(SchemaError::SharedDataType {
                type_name: component.data_type.clone(),
                first: first.to_string(),
                second: component.qualified_name.clone(),
            });
        }
    }
    Ok(())
}

fn validate_item_names(registry: &Registry) -> Result<(), SchemaError> {
    let mut items: HashSet<(String, String)> = HashSet::new();
    let mut claim = |package: &str, name: String| -> Result<(), SchemaError> {
        if items.insert((package.to_string(), name.clone())) {
            Ok(())
        } else {
            Err(SchemaError::duplicate_item(package, name))
        }
    };

    for name in ROOT_ITEM_NAMES {
        claim("", name.to_string())?;
    }

    let mut modules: HashSet<(String, String)> = HashSet::new();
    let packages = registry
        .types()
        .values()
        .map(|t| t.package.as_str())
        .chain(registry.components().values().map(|c| c.package.as_str()));
    for package in packages {
        let mut parent = String::new();
        for segment in package.split('.') {
            modules.insert((parent.clone(), segment.to_string()));
            if !parent.is_empty() {
                parent.push('.');
            }
            parent.push_str(segment);
        }
    }
    for (parent, segment) in modules {
        claim(&parent, segment)?;
    }

    for type_def in registry.types().values() {
        claim(&type_def.package, type_def.name.clone())?;
    }
    for component in registry.components().values() {
        claim(&component.package, component.name.clone())?;
        claim(&component.package, component.update_name())?;
        for command in &component.commands {
            claim(&component.package, component.command_struct_name(command))?;
        }
    }
    Ok(())
}

// Struct members of the generated code: a type's fields; a data type's fields,
// dirty flag and its component's events; an update's fields and events.
fn validate_member_names(registry: &Registry) -> Result<(), SchemaError> {
    for type_def in registry.types().values() {
        let owner = format!("type '{}'", type_def.qualified_name);
        let mut members = HashSet::new();
        for field in &type_def.fields {
            claim_member(&mut members, &owner, &field.name)?;
        }
    }

    for component in registry.components().values() {
        let Some(data_type) = registry.types().get(&component.data_type) else {
            continue;
        };
        let owner = format!(
            "component '{}' (data type '{}')",
            component.qualified_name, data_type.qualified_name
        );
        let mut members = HashSet::new();
        claim_member(&mut members, &owner, DIRTY_FLAG_MEMBER)?;
        for field in &data_type.fields {
            claim_member(&mut members, &owner, &field.name)?;
        }
        for event in &component.events {
            claim_member(&mut members, &owner, &event.name)?;
        }
    }
    Ok(())
}

fn claim_member<'a>(
    members: &mut HashSet<&'a str>,
    owner: &str,
    name: &'a str,
) -> Result<(), SchemaError> {
    if members.insert(name) {
        Ok(())
    } else {
        Err(SchemaError::DuplicateMemberName {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::SchemaIr;
    use crate::parser::parse_document;

    fn link(json: &str) -> Result<SchemaIr, SchemaError> {
        let document = parse_document(json).expect("Failed to parse");
        SchemaIr::from_documents([&document])
    }

    #[test]
    fn test_valid_schema() {
        let result = link(
            r#"{ "package": "foo.bar",
                "typeDefinitions": [ { "name": "Vector3", "qualifiedName": "foo.bar.Vector3", "fieldDefinitions": [
                    { "name": "x", "number": 1, "singularType": { "builtInType": "double" } } ] } ],
                "componentDefinitions": [ { "name": "Position", "id": 1, "qualifiedName": "foo.bar.Position",
                    "dataDefinition": { "userType": "foo.bar.Vector3" } } ] }"#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_unresolved_field_reference() {
        let err = link(
            r#"{ "package": "p", "typeDefinitions": [ { "name": "T", "qualifiedName": "p.T", "fieldDefinitions": [
                { "name": "other", "number": 1, "optionType": { "valueType": { "userType": "p.Missing" } } } ] } ] }"#,
        )
        .unwrap_err();
        match err {
            SchemaError::UnresolvedReference { name, site } => {
                assert_eq!(name, "p.Missing");
                assert_eq!(site, "field 'other' of type 'p.T'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unresolved_data_type() {
        let err = link(
            r#"{ "package": "p", "componentDefinitions": [ { "name": "C", "id": 1, "qualifiedName": "p.C",
                "dataDefinition": { "userType": "p.Nope" } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedReference { name, .. } if name == "p.Nope"));
    }

    #[test]
    fn test_duplicate_component_id() {
        let err = link(
            r#"{ "package": "p",
                "typeDefinitions": [ { "name": "A", "qualifiedName": "p.A" }, { "name": "B", "qualifiedName": "p.B" } ],
                "componentDefinitions": [
                    { "name": "CA", "id": 7, "qualifiedName": "p.CA", "dataDefinition": { "userType": "p.A" } },
                    { "name": "CB", "id": 7, "qualifiedName": "p.CB", "dataDefinition": { "userType": "p.B" } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DuplicateComponentId { id: 7, .. }
        ));
    }

    #[test]
    fn test_duplicate_field_id() {
        let err = link(
            r#"{ "package": "p", "typeDefinitions": [ { "name": "T", "qualifiedName": "p.T", "fieldDefinitions": [
                { "name": "a", "number": 1, "singularType": { "builtInType": "bool" } },
                { "name": "b", "number": 1, "singularType": { "builtInType": "bool" } } ] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldId { id: 1, .. }));
    }

    #[test]
    fn test_shared_data_type() {
        let err = link(
            r#"{ "package": "p",
                "typeDefinitions": [ { "name": "A", "qualifiedName": "p.A" } ],
                "componentDefinitions": [
                    { "name": "CA", "id": 1, "qualifiedName": "p.CA", "dataDefinition": { "userType": "p.A" } },
                    { "name": "CB", "id": 2, "qualifiedName": "p.CB", "dataDefinition": { "userType": "p.A" } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::SharedDataType { .. }));
    }

    #[test]
    fn test_invalid_map_key() {
        let err = link(
            r#"{ "package": "p", "typeDefinitions": [ { "name": "T", "qualifiedName": "p.T", "fieldDefinitions": [
                { "name": "m", "number": 1, "mapType": { "keyType": { "builtInType": "double" },
                                                         "valueType": { "builtInType": "string" } } } ] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidMapKey { key, .. } if key == "double"));
    }

    #[test]
    fn test_duplicate_event_and_command_index() {
        let err = link(
            r#"{ "package": "p",
                "typeDefinitions": [ { "name": "A", "qualifiedName": "p.A" } ],
                "componentDefinitions": [ { "name": "C", "id": 1, "qualifiedName": "p.C",
                    "dataDefinition": { "userType": "p.A" },
                    "eventDefinitions": [
                        { "name": "e1", "eventIndex": 1, "type": { "userType": "p.A" } },
                        { "name": "e2", "eventIndex": 1, "type": { "userType": "p.A" } } ] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateEventIndex { index: 1, .. }));

        let err = link(
            r#"{ "package": "p",
                "typeDefinitions": [ { "name": "A", "qualifiedName": "p.A" } ],
                "componentDefinitions": [ { "name": "C", "id": 1, "qualifiedName": "p.C",
                    "dataDefinition": { "userType": "p.A" },
                    "commandDefinitions": [
                        { "name": "go", "commandIndex": 2, "requestType": { "userType": "p.A" }, "responseType": { "userType": "p.A" } },
                        { "name": "stop", "commandIndex": 2, "requestType": { "userType": "p.A" }, "responseType": { "userType": "p.A" } } ] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateCommandIndex { index: 2, .. }));
    }

    #[test]
    fn test_generated_name_clash() {
        let err = link(
            r#"{ "package": "p",
                "typeDefinitions": [ { "name": "A", "qualifiedName": "p.A" }, { "name": "CUpdate", "qualifiedName": "p.CUpdate" } ],
                "componentDefinitions": [ { "name": "C", "id": 1, "qualifiedName": "p.C",
                    "dataDefinition": { "userType": "p.A" } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateItemName { name, .. } if name == "CUpdate"));
    }

    #[test]
    fn test_package_clashes_with_root_item() {
        let err = link(r#"{ "package": "Schema", "typeDefinitions": [ { "name": "T", "qualifiedName": "Schema.T" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateItemName { name, .. } if name == "Schema"));
    }

    #[test]
    fn test_invalid_package_name() {
        let err = link(r#"{ "package": "foo..bar", "typeDefinitions": [ { "name": "T", "qualifiedName": "foo.T" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName { kind, .. } if kind == "package"));
    }

    #[test]
    fn test_duplicate_field_name() {
        let err = link(
            r#"{ "package": "p", "typeDefinitions": [ { "name": "T", "qualifiedName": "p.T", "fieldDefinitions": [
                { "name": "hit", "number": 1, "singularType": { "builtInType": "bool" } },
                { "name": "hit", "number": 3, "singularType": { "builtInType": "uint32" } } ] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateMemberName { name, .. } if name == "hit"));
    }

    #[test]
    fn test_dirty_flag_name_reserved_on_data_type() {
        let schema = r#"{ "package": "p",
            "typeDefinitions": [ { "name": "D", "qualifiedName": "p.D", "fieldDefinitions": [
                { "name": "is_dirty", "number": 2, "singularType": { "builtInType": "bool" } } ] } ],
            "componentDefinitions": [ { "name": "C", "id": 1, "qualifiedName": "p.C",
                "dataDefinition": { "userType": "p.D" } } ] }"#;
        let err = link(schema).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateMemberName { name, .. } if name == "is_dirty"));

        // Plain types keep the name available.
        let plain = r#"{ "package": "p", "typeDefinitions": [ { "name": "D", "qualifiedName": "p.D", "fieldDefinitions": [
            { "name": "is_dirty", "number": 2, "singularType": { "builtInType": "bool" } } ] } ] }"#;
        assert!(link(plain).is_ok());
    }

    #[test]
    fn test_event_name_clashes_with_data_field() {
        let err = link(
            r#"{ "package": "p",
                "typeDefinitions": [
                    { "name": "D", "qualifiedName": "p.D", "fieldDefinitions": [
                        { "name": "hit", "number": 1, "singularType": { "builtInType": "uint32" } } ] },
                    { "name": "Hit", "qualifiedName": "p.Hit" } ],
                "componentDefinitions": [ { "name": "C", "id": 1, "qualifiedName": "p.C",
                    "dataDefinition": { "userType": "p.D" },
                    "eventDefinitions": [ { "name": "hit", "eventIndex": 1, "type": { "userType": "p.Hit" } } ] } ] }"#,
        )
        .unwrap_err();
        match err {
            SchemaError::DuplicateMemberName { owner, name } => {
                assert_eq!(name, "hit");
                assert_eq!(owner, "component 'p.C' (data type 'p.D')");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_qualified_name_must_match_package_and_name() {
        let err = link(
            r#"{ "package": "foo", "typeDefinitions": [ { "name": "Inner", "qualifiedName": "foo.Outer.Inner" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::QualifiedNameMismatch { qualified_name, .. } if qualified_name == "foo.Outer.Inner"
        ));

        let err = link(
            r#"{ "package": "foo", "typeDefinitions": [ { "name": "A", "qualifiedName": "foo.A" } ],
                "componentDefinitions": [ { "name": "C", "id": 1, "qualifiedName": "foobar.C",
                    "dataDefinition": { "userType": "foo.A" } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::QualifiedNameMismatch { name, .. } if name == "C"));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Vector3"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("fire_cannon"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("_"));
        assert!(!is_identifier("3d"));
        assert!(!is_identifier("a-b"));
    }
}
