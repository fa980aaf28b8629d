//! # ecsgen Codegen
//!
//! Rust code generation from ecsgen schema documents.
//!
//! This crate provides:
//! - Serialize, deserialize and count code for every schema type shape
//! - Struct, update and trait impl generation for types and components
//! - Root registries keyed by component id, with command dispatch
//! - A module tree mirroring schema packages, flushed as one file per package
//! - Build script integration

pub mod build;
pub mod command;
pub mod component;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod generator;
pub mod global;
pub mod names;
pub mod output_tree;
pub mod render;
pub mod schema_type;
pub mod user_type;

pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use generator::Generator;
pub use output_tree::OutputTree;
pub use schema_type::SchemaTypeCode;

use ecsgen_schema::{SchemaDocument, SchemaIr};
use std::path::{Path, PathBuf};
use tracing::info;

/// Generates Rust modules from parsed schema documents.
///
/// # Arguments
/// * `documents` - Every schema document of the project
/// * `out_dir` - Directory receiving the module tree
/// * `config` - Generator settings
///
/// # Returns
/// The written file paths, root module first.
///
/// # Errors
/// Returns `CodegenError` if linking, generation or writing fails.
pub fn generate_from_documents(
    documents: &[SchemaDocument],
    out_dir: &Path,
    config: GeneratorConfig,
) -> Result<Vec<PathBuf>, CodegenError> {
    let ir = SchemaIr::from_documents(documents)?;
    Generator::new(&ir, config)?.generate(out_dir)
}

/// Generates Rust modules from schema document files.
///
/// # Arguments
/// * `paths` - Schema JSON files
/// * `out_dir` - Directory receiving the module tree
/// * `config` - Generator settings
///
/// # Returns
/// The written file paths, root module first.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, linking, generation or
/// writing fails.
pub fn generate_from_files<P: AsRef<Path>>(
    paths: &[P],
    out_dir: &Path,
    config: GeneratorConfig,
) -> Result<Vec<PathBuf>, CodegenError> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let document = ecsgen_schema::parse_file(path)?;
        info!(path = %path.display(), package = %document.package, "parsed schema document");
        documents.push(document);
    }
    generate_from_documents(&documents, out_dir, config)
}
