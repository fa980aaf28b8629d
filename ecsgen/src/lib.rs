//! # ecsgen
//!
//! Schema-driven Rust code generator for entity-component runtimes.
//!
//! ecsgen reads schema documents describing user types and components
//! (fields, events and commands) and emits one Rust module per schema
//! package, plus root registries keyed by component id.
//!
//! ## Features
//!
//! - **Typed components** - Read, update and data structs per component
//! - **Dirty tracking** - `Property` fields flushed into minimal updates
//! - **Events and commands** - Staged event queues and typed command markers
//! - **Deterministic output** - Same schema, same files, byte for byte
//!
//! ## Quick Start
//!
//! ```ignore
//! use ecsgen::generate_dir;
//!
//! let written = generate_dir("schema".as_ref(), "src/generated".as_ref())?;
//! println!("wrote {} modules", written.len());
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime traits and types used by generated code
//! - [`schema`] - Schema document parsing, linking and validation
//! - [`codegen`] - Rust code generation from linked schemas

pub mod discover;

/// Runtime traits and types used by generated code.
pub mod core {
    pub use ecsgen_core::*;
}

/// Schema document parsing, linking and validation.
pub mod schema {
    pub use ecsgen_schema::*;
}

/// Rust code generation from linked schemas.
pub mod codegen {
    pub use ecsgen_codegen::*;
}

pub use discover::discover_schemas;
pub use ecsgen_codegen::{CodegenError, GeneratorConfig};

use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Generates modules for every schema document found under `input_dir`.
///
/// # Returns
/// The written file paths, root module first.
///
/// # Errors
/// Returns an error if discovery, parsing, linking or writing fails.
pub fn generate_dir(input_dir: &Path, output_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    generate_dir_with_config(input_dir, output_dir, GeneratorConfig::default())
}

/// Same as [`generate_dir`] with explicit generator settings.
///
/// # Errors
/// Returns an error if discovery, parsing, linking or writing fails.
pub fn generate_dir_with_config(
    input_dir: &Path,
    output_dir: &Path,
    config: GeneratorConfig,
) -> anyhow::Result<Vec<PathBuf>> {
    let inputs = discover_schemas(input_dir)?;
    if inputs.is_empty() {
        warn!(input_dir = %input_dir.display(), "no schema documents found");
    } else {
        info!(count = inputs.len(), input_dir = %input_dir.display(), "discovered schema documents");
    }
    Ok(ecsgen_codegen::generate_from_files(&inputs, output_dir, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{
        "package": "foo.bar",
        "typeDefinitions": [
            {
                "name": "Vector3",
                "qualifiedName": "foo.bar.Vector3",
                "fieldDefinitions": [
                    { "name": "x", "number": 1, "singularType": { "builtInType": "double" } }
                ]
            }
        ],
        "componentDefinitions": [
            {
                "name": "Position",
                "id": 1,
                "qualifiedName": "foo.bar.Position",
                "dataDefinition": { "userType": "foo.bar.Vector3" }
            }
        ]
    }"#;

    #[test]
    fn test_generate_dir() {
        let input = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("position.json"), SCHEMA).unwrap();
        let output = tempfile::tempdir().unwrap();

        let written = generate_dir(input.path(), output.path()).unwrap();
        assert_eq!(written.len(), 3);
        assert!(output.path().join("foo/bar/mod.rs").is_file());
    }

    #[test]
    fn test_generate_empty_dir_writes_root_only() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let written = generate_dir(input.path(), output.path()).unwrap();
        assert_eq!(written, vec![output.path().join("mod.rs")]);
    }

    #[test]
    fn test_generate_dir_reports_bad_document() {
        let input = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("broken.json"), "{ not json").unwrap();
        let output = tempfile::tempdir().unwrap();

        assert!(generate_dir(input.path(), output.path()).is_err());
    }

    #[test]
    fn test_error_chain_prints_cause_once() {
        let input = tempfile::tempdir().unwrap();
        std::fs::write(
            input.path().join("dangling.json"),
            r#"{
                "package": "foo",
                "typeDefinitions": [{
                    "name": "Ship",
                    "qualifiedName": "foo.Ship",
                    "fieldDefinitions": [
                        {"name": "hull", "number": 1, "singularType": {"userType": "foo.Missing"}}
                    ]
                }]
            }"#,
        )
        .unwrap();
        let output = tempfile::tempdir().unwrap();

        let err = generate_dir(input.path(), output.path()).unwrap_err();
        let rendered = format!("{err:#}");
        assert_eq!(rendered.matches("foo.Missing").count(), 1, "{rendered}");
    }
}
