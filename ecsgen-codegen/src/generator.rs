//! Main code generator.

use crate::component::ComponentGenerator;
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::global::GlobalGenerator;
use crate::names::Paths;
use crate::output_tree::OutputTree;
use crate::user_type::TypeGenerator;
use ecsgen_schema::SchemaIr;
use std::path::{Path, PathBuf};
use tracing::info;

/// Renders a linked schema into an output tree.
pub struct Generator<'a> {
    ir: &'a SchemaIr,
    config: GeneratorConfig,
    paths: Paths,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given schema.
    ///
    /// # Errors
    /// Returns [`CodegenError::InvalidConfig`] if the configuration is invalid.
    pub fn new(ir: &'a SchemaIr, config: GeneratorConfig) -> Result<Self, CodegenError> {
        config.validate()?;
        let paths = Paths::from_config(&config)?;
        Ok(Self { ir, config, paths })
    }

    /// Returns the generator settings.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Renders every type and component once, then the root registries.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownType`] if a component's data type is
    /// missing from the schema.
    pub fn build_tree(&self) -> Result<OutputTree, CodegenError> {
        let mut tree = OutputTree::new();

        for type_def in self.ir.types() {
            tree.write_type(type_def, TypeGenerator::new(type_def, &self.paths).generate());
        }

        for component in self.ir.components() {
            let data_type = self.ir.data_type(component).ok_or_else(|| {
                CodegenError::UnknownType {
                    type_name: component.data_type.clone(),
                    site: format!("component '{}'", component.qualified_name),
                }
            })?;
            let code = ComponentGenerator::new(component, data_type, &self.paths).generate();
            tree.write_component(component, code);
        }

        tree.write_root(GlobalGenerator::new(self.ir, &self.paths).generate()?);
        Ok(tree)
    }

    /// Generates the schema and writes it under `out_dir`.
    ///
    /// # Returns
    /// The written file paths, root module first.
    ///
    /// # Errors
    /// Returns an error if generation fails or a file cannot be written.
    pub fn generate(&self, out_dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let tree = self.build_tree()?;
        info!(
            types = self.ir.types().count(),
            components = self.ir.component_count(),
            modules = tree.module_count(),
            "generated schema"
        );
        let written = tree.flush(out_dir, &self.config)?;
        info!(files = written.len(), out_dir = %out_dir.display(), "wrote generated modules");
        Ok(written)
    }
}
