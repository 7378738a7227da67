//! Caller-facing view model

use serde::Serialize;

use crate::arguments::ArgumentMap;
use crate::config::DocsConfig;
use crate::naming::underscored_to_upper_camel;
use crate::pipeline::{SchemaData, SchemaRequest};
use crate::source::schema_file_name;
use crate::tree::NamespaceNode;

/// Everything a template or renderer needs for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaView {
    pub component_set: String,
    pub version: String,
    pub segments: Vec<String>,
    pub class_name: String,
    /// Last path segment, the component's leaf label on component pages
    pub name: Option<String>,
    /// Dotted element name the path resolves to, e.g. `form.select`
    pub element_name: String,
    pub is_file: bool,
    pub tree: NamespaceNode,
    pub arguments: ArgumentMap,
    pub doc_comment: String,
    pub namespace_url: String,
    pub namespace_name: String,
    pub namespace_alias: String,
    pub extension_name: String,
    pub markdown_blacklisted: bool,
    /// Index readme of the component set, only on the index view
    pub readme: Option<String>,
    pub component_sets: Vec<String>,
    pub schema_file: String,
}

impl SchemaView {
    pub fn assemble(
        request: &SchemaRequest,
        data: SchemaData,
        docs: &DocsConfig,
        readme: Option<String>,
    ) -> Self {
        let is_file = data.is_file();
        let component_set = &request.component_set;

        Self {
            component_set: component_set.clone(),
            version: request.version.clone(),
            segments: request.segments.as_slice().to_vec(),
            class_name: request.class_name(),
            name: request.segments.last().map(str::to_string),
            element_name: request.segments.element_name(),
            is_file,
            tree: data.tree,
            arguments: data.arguments,
            doc_comment: data.doc_comment,
            namespace_url: data.target_namespace,
            namespace_name: namespace_name(component_set, docs),
            namespace_alias: namespace_alias(component_set, docs),
            extension_name: underscored_to_upper_camel(component_set),
            markdown_blacklisted: docs.is_markdown_blacklisted(component_set),
            readme,
            component_sets: docs.sorted_component_sets(),
            schema_file: schema_file_name(component_set, &request.version),
        }
    }
}

/// Lowercased component set without underscores, then mapped
pub fn namespace_name(component_set: &str, docs: &DocsConfig) -> String {
    let name = component_set.replace('_', "").to_lowercase();
    docs.extension_key_to_namespace_map
        .get(&name)
        .cloned()
        .unwrap_or(name)
}

/// Component set without underscores, unless the raw component set is mapped
pub fn namespace_alias(component_set: &str, docs: &DocsConfig) -> String {
    docs.extension_key_to_namespace_map
        .get(component_set)
        .cloned()
        .unwrap_or_else(|| component_set.replace('_', ""))
}
