//! Output module tree.
//!
//! One node per package segment. A node owns the items generated for its
//! package and its child nodes; the root additionally owns the registry
//! code. Nothing touches the filesystem until [`OutputTree::flush`].

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::names::sanitize;
use crate::render::render_module;
use ecsgen_schema::{ComponentDef, TypeDef};
use proc_macro2::TokenStream;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default)]
struct Node {
    items: Vec<TokenStream>,
    children: BTreeMap<String, Node>,
}

impl Node {
    fn count(&self) -> usize {
        1 + self.children.values().map(Node::count).sum::<usize>()
    }
}

/// Tree of generated modules keyed by package segment.
#[derive(Debug, Default)]
pub struct OutputTree {
    root: Node,
}

impl OutputTree {
    /// Creates an empty tree holding only the root module.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a type's generated items to its package node.
    pub fn write_type(&mut self, type_def: &TypeDef, code: TokenStream) {
        debug!(name = %type_def.qualified_name, "writing type");
        self.append(&type_def.package, code);
    }

    /// Appends a component's generated items to its package node.
    pub fn write_component(&mut self, component: &ComponentDef, code: TokenStream) {
        debug!(name = %component.qualified_name, "writing component");
        self.append(&component.package, code);
    }

    /// Appends items to the root module.
    pub fn write_root(&mut self, code: TokenStream) {
        self.root.items.push(code);
    }

    /// Appends items to the node of a dot-separated package, creating the
    /// node and its ancestors if absent.
    pub fn append(&mut self, package: &str, code: TokenStream) {
        let mut node = &mut self.root;
        for segment in package.split('.').filter(|s| !s.is_empty()) {
            node = node.children.entry(sanitize(segment)).or_default();
        }
        node.items.push(code);
    }

    /// Number of module nodes, the root included.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.root.count()
    }

    /// Module paths of every node, parent before children.
    #[must_use]
    pub fn module_paths(&self) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        collect_paths(&self.root, &mut Vec::new(), &mut paths);
        paths
    }

    /// Renders every node to source text, parent before children.
    ///
    /// Each entry holds the file path relative to the output directory and
    /// the file content.
    #[must_use]
    pub fn render(&self, config: &GeneratorConfig) -> Vec<(PathBuf, String)> {
        let mut files = Vec::with_capacity(self.module_count());
        render_node(&self.root, PathBuf::new(), config, &mut files);
        files
    }

    /// Writes one file per node under `out_dir`, creating directories as
    /// needed.
    ///
    /// # Returns
    /// The written file paths, parent before children.
    ///
    /// # Errors
    /// Returns [`CodegenError::Io`] naming the directory or file that could
    /// not be written.
    pub fn flush(
        &self,
        out_dir: &Path,
        config: &GeneratorConfig,
    ) -> Result<Vec<PathBuf>, CodegenError> {
        let mut written = Vec::with_capacity(self.module_count());
        for (relative, content) in self.render(config) {
            let path = out_dir.join(&relative);
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir).map_err(|e| CodegenError::io(dir, e))?;
            }
            std::fs::write(&path, content).map_err(|e| CodegenError::io(&path, e))?;
            debug!(path = %path.display(), "wrote module");
            written.push(path);
        }
        Ok(written)
    }
}

fn collect_paths(node: &Node, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    out.push(prefix.clone());
    for (name, child) in &node.children {
        prefix.push(name.clone());
        collect_paths(child, prefix, out);
        prefix.pop();
    }
}

fn render_node(
    node: &Node,
    dir: PathBuf,
    config: &GeneratorConfig,
    out: &mut Vec<(PathBuf, String)>,
) {
    let children: Vec<&str> = node.children.keys().map(String::as_str).collect();
    let content = render_module(&node.items, &children, config);
    out.push((dir.join(&config.module_file_name), content));
    for (name, child) in &node.children {
        render_node(child, dir.join(name), config, out);
    }
}
