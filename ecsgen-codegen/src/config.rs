//! Generator configuration.

use crate::error::CodegenError;

/// Default module path the generated tree is mounted at.
pub const DEFAULT_ROOT_MODULE: &str = "crate::generated";

/// Default path of the runtime support crate.
pub const DEFAULT_RUNTIME_CRATE: &str = "::ecsgen_core";

/// Default file name written for each module node.
pub const DEFAULT_MODULE_FILE_NAME: &str = "mod.rs";

/// Code generation settings.
///
/// # Example
/// ```
/// use ecsgen_codegen::GeneratorConfig;
///
/// let config = GeneratorConfig::new()
///     .with_root_module("crate::schema")
///     .with_runtime_crate("::ecsgen::core");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Path at which the output root is mounted in the consuming crate.
    pub root_module: String,
    /// Path of the runtime crate the generated code targets.
    pub runtime_crate: String,
    /// File name written for every module node.
    pub module_file_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root_module: DEFAULT_ROOT_MODULE.to_string(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            module_file_name: DEFAULT_MODULE_FILE_NAME.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the module path the output root is mounted at.
    #[must_use]
    pub fn with_root_module(mut self, path: impl Into<String>) -> Self {
        self.root_module = path.into();
        self
    }

    /// Sets the runtime crate path.
    #[must_use]
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Sets the file name written for each module node.
    #[must_use]
    pub fn with_module_file_name(mut self, name: impl Into<String>) -> Self {
        self.module_file_name = name.into();
        self
    }

    /// Returns true if child modules can be declared without `#[path]`.
    #[must_use]
    pub fn uses_default_module_layout(&self) -> bool {
        self.module_file_name == DEFAULT_MODULE_FILE_NAME
    }

    /// Checks every setting.
    ///
    /// # Errors
    /// Returns [`CodegenError::InvalidConfig`] if a path does not parse as a
    /// Rust path or the module file name is not a plain `.rs` file name.
    pub fn validate(&self) -> Result<(), CodegenError> {
        self.root_path()?;
        self.runtime_path()?;

        let name = &self.module_file_name;
        if !name.ends_with(".rs") || name.len() <= 3 || name.contains(['/', '\\']) {
            return Err(CodegenError::invalid_config(format!(
                "module file name '{name}' must be a plain .rs file name"
            )));
        }
        Ok(())
    }

    /// Parses the root module path.
    ///
    /// # Errors
    /// Returns [`CodegenError::InvalidConfig`] if the path is not valid.
    pub fn root_path(&self) -> Result<syn::Path, CodegenError> {
        parse_path("root module", &self.root_module)
    }

    /// Parses the runtime crate path.
    ///
    /// # Errors
    /// Returns [`CodegenError::InvalidConfig`] if the path is not valid.
    pub fn runtime_path(&self) -> Result<syn::Path, CodegenError> {
        parse_path("runtime crate", &self.runtime_crate)
    }
}

fn parse_path(what: &str, path: &str) -> Result<syn::Path, CodegenError> {
    syn::parse_str::<syn::Path>(path).map_err(|e| {
        CodegenError::invalid_config(format!("{what} '{path}' is not a Rust path: {e}"))
    })
}
