//! Rust naming for generated items.
//!
//! Schema names are used verbatim where possible. Keywords become raw
//! identifiers, and the few names that cannot be raw (`self`, `super`,
//! `crate`, `Self`) get a trailing underscore.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use ecsgen_core::{ComponentId, FieldId};
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

const NON_RAW_KEYWORDS: &[&str] = &["self", "super", "crate", "Self"];

/// Returns the name an identifier is written with, minus any `r#` prefix.
#[must_use]
pub fn sanitize(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Creates an identifier for a schema name.
#[must_use]
pub fn ident(name: &str) -> Ident {
    let name = sanitize(name);
    if KEYWORDS.contains(&name.as_str()) {
        Ident::new_raw(&name, Span::call_site())
    } else {
        Ident::new(&name, Span::call_site())
    }
}

/// Enum variant for a component in the root registries.
#[must_use]
pub fn variant_ident(id: ComponentId) -> Ident {
    format_ident!("Component{}", id)
}

/// Unsuffixed integer literal for a field id, event index or command index.
#[must_use]
pub fn id_literal(id: FieldId) -> Literal {
    Literal::u32_unsuffixed(id)
}

/// Resolved paths the generated code refers to.
#[derive(Debug, Clone)]
pub struct Paths {
    root: TokenStream,
    runtime: TokenStream,
}

impl Paths {
    /// Resolves the paths of a configuration.
    ///
    /// # Errors
    /// Returns [`CodegenError::InvalidConfig`] if a configured path is invalid.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, CodegenError> {
        let root = config.root_path()?;
        let runtime = config.runtime_path()?;
        Ok(Self {
            root: quote!(#root),
            runtime: quote!(#runtime),
        })
    }

    /// Path of the runtime crate.
    #[must_use]
    pub fn runtime(&self) -> &TokenStream {
        &self.runtime
    }

    /// Path of an item of the runtime crate.
    #[must_use]
    pub fn runtime_item(&self, name: &str) -> TokenStream {
        let runtime = &self.runtime;
        let name = ident(name);
        quote!(#runtime::#name)
    }

    /// Absolute path of a generated item, from its package and name.
    #[must_use]
    pub fn item(&self, package: &str, name: &str) -> TokenStream {
        let root = &self.root;
        let segments = package.split('.').filter(|s| !s.is_empty()).map(ident);
        let name = ident(name);
        quote!(#root #(::#segments)* ::#name)
    }

    /// Absolute path of a user type, from its qualified name.
    #[must_use]
    pub fn qualified(&self, qualified_name: &str) -> TokenStream {
        match qualified_name.rsplit_once('.') {
            Some((package, name)) => self.item(package, name),
            None => {
                let root = &self.root;
                let name = ident(qualified_name);
                quote!(#root::#name)
            }
        }
    }
}
