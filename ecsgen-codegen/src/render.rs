//! Rendering of module nodes to source text.

use crate::config::GeneratorConfig;
use crate::names::ident;
use proc_macro2::TokenStream;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by ecsgen. Do not edit.";

/// Lints silenced for generated modules.
const MODULE_ALLOWS: &str =
    "#![allow(dead_code, unused_variables, unused_mut, non_camel_case_types, non_snake_case, clippy::all)]";

/// Renders one module file.
///
/// # Arguments
/// * `items` - Generated items, in the order they were written
/// * `children` - Names of the immediate child modules
/// * `config` - Generator settings
#[must_use]
pub fn render_module(items: &[TokenStream], children: &[&str], config: &GeneratorConfig) -> String {
    let mut output = String::new();
    output.push_str(GENERATED_HEADER);
    output.push_str("\n\n");
    output.push_str(MODULE_ALLOWS);
    output.push_str("\n\n");

    for child in children {
        output.push_str(&module_declaration(child, config));
        output.push('\n');
    }
    if !children.is_empty() {
        output.push('\n');
    }

    for item in items {
        output.push_str(&item.to_string());
        output.push_str("\n\n");
    }

    output
}

fn module_declaration(name: &str, config: &GeneratorConfig) -> String {
    let module = ident(name);
    if config.uses_default_module_layout() {
        format!("pub mod {module};")
    } else {
        format!(
            "#[path = \"{name}/{}\"]\npub mod {module};",
            config.module_file_name
        )
    }
}
