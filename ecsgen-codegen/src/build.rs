//! Build script integration.
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR").unwrap());
//!     ecsgen_codegen::build::generate(&["schema/game.json"], &out_dir.join("generated"))
//!         .expect("schema generation failed");
//! }
//! ```

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use std::path::{Path, PathBuf};

/// Generates modules with default settings and asks cargo to rerun the
/// build script when an input changes.
///
/// # Errors
/// Returns `CodegenError` if generation fails.
pub fn generate<P: AsRef<Path>>(
    inputs: &[P],
    out_dir: &Path,
) -> Result<Vec<PathBuf>, CodegenError> {
    generate_with_config(inputs, out_dir, GeneratorConfig::default())
}

/// Same as [`generate`] with explicit settings.
///
/// # Errors
/// Returns `CodegenError` if generation fails.
pub fn generate_with_config<P: AsRef<Path>>(
    inputs: &[P],
    out_dir: &Path,
    config: GeneratorConfig,
) -> Result<Vec<PathBuf>, CodegenError> {
    for line in rerun_directives(inputs) {
        println!("{line}");
    }
    crate::generate_from_files(inputs, out_dir, config)
}

/// `cargo:rerun-if-changed` lines for the given inputs.
#[must_use]
pub fn rerun_directives<P: AsRef<Path>>(inputs: &[P]) -> Vec<String> {
    inputs
        .iter()
        .map(|input| format!("cargo:rerun-if-changed={}", input.as_ref().display()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rerun_directives() {
        let lines = rerun_directives(&["schema/a.json", "schema/b.json"]);
        assert_eq!(
            lines,
            [
                "cargo:rerun-if-changed=schema/a.json",
                "cargo:rerun-if-changed=schema/b.json"
            ]
        );
    }

    #[test]
    fn test_generate_from_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("empty.json");
        std::fs::write(
            &schema,
            r#"{ "package": "demo", "typeDefinitions": [ { "name": "Unit", "qualifiedName": "demo.Unit" } ] }"#,
        )
        .unwrap();

        let out = dir.path().join("generated");
        let written = generate(&[&schema], &out).unwrap();
        assert_eq!(written, vec![out.join("mod.rs"), out.join("demo").join("mod.rs")]);
    }

    #[test]
    fn test_missing_input_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate(&[dir.path().join("missing.json")], dir.path()).unwrap_err();
        assert!(matches!(err, CodegenError::Parse(_)));
    }
}
