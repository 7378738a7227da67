//! Read-through documentation pipeline
//!
//! One request runs start to finish: resolved-data cache, schema fetch,
//! parse, tree (from its own cache when possible), resolution, argument
//! extraction and documentation merge, then both caches are written.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::arguments::{ArgumentMap, extract_arguments};
use crate::cache::{CacheKeys, SchemaCache};
use crate::config::{Config, DocsConfig};
use crate::error::{Result, SchemakerError};
use crate::markdown::DocMerger;
use crate::resolver::{PathSegments, resolve};
use crate::schema::{SchemaDocument, SchemaElement};
use crate::source::{FileSchemaSource, FileSupplementalDocs, SchemaSource, SupplementalDocs};
use crate::tree::{NamespaceNode, build_tree};
use crate::view::SchemaView;

/// Version used when a request names none
pub const DEFAULT_VERSION: &str = "master";

/// A normalized documentation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRequest {
    pub component_set: String,
    pub version: String,
    pub segments: PathSegments,
    /// Base URL for argument cross references; not part of any cache key
    pub request_url: String,
}

impl SchemaRequest {
    pub fn new(
        component_set: impl Into<String>,
        version: Option<String>,
        segments: PathSegments,
    ) -> Self {
        let version = version
            .filter(|version| !version.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        Self {
            component_set: component_set.into(),
            version,
            segments,
            request_url: String::new(),
        }
    }

    pub fn with_request_url(mut self, request_url: impl Into<String>) -> Self {
        self.request_url = request_url.into();
        self
    }

    /// Build a request from raw caller input, filling gaps from `docs`
    pub fn from_parts<I, S>(
        component_set: Option<String>,
        version: Option<String>,
        segments: I,
        docs: &DocsConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let component_set = component_set
            .filter(|set| !set.trim().is_empty())
            .or_else(|| docs.default_component_set.clone())
            .ok_or_else(|| {
                SchemakerError::InvalidRequest(
                    "no component set given and none configured as default".to_string(),
                )
            })?;

        let version = version
            .filter(|version| !version.trim().is_empty())
            .unwrap_or_else(|| docs.default_version.clone());

        let segments = PathSegments::new(segments)?;

        Ok(Self::new(component_set, Some(version), segments).with_request_url(&docs.request_url))
    }

    pub fn class_name(&self) -> String {
        self.segments.class_name()
    }

    pub fn cache_keys(&self) -> CacheKeys {
        CacheKeys::new(&self.component_set, &self.version, &self.segments)
    }
}

/// Everything derived from the schema for one request; cached as a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaData {
    pub tree: NamespaceNode,
    pub node: Option<SchemaElement>,
    pub arguments: ArgumentMap,
    pub doc_comment: String,
    pub target_namespace: String,
}

impl SchemaData {
    /// Whether the request resolved to a single component
    pub fn is_file(&self) -> bool {
        self.node.is_some()
    }
}

pub struct DocumentationPipeline {
    source: Arc<dyn SchemaSource>,
    docs: Arc<dyn SupplementalDocs>,
    cache: SchemaCache,
    merger: DocMerger,
}

impl DocumentationPipeline {
    pub fn new(
        source: Arc<dyn SchemaSource>,
        docs: Arc<dyn SupplementalDocs>,
        cache: SchemaCache,
        merger: DocMerger,
    ) -> Self {
        Self {
            source,
            docs,
            cache,
            merger,
        }
    }

    /// File-backed pipeline over the configured directories and cache
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(FileSchemaSource::new(&config.docs.xsd_storage_path)),
            Arc::new(FileSupplementalDocs::new(&config.docs.docs_root)),
            SchemaCache::from_config(&config.cache),
            DocMerger::new(config.docs.legacy_alert_rewrite),
        )
    }

    /// Resolve a request, reading through both caches.
    ///
    /// Only source and parse failures are errors; an unresolved path yields
    /// data without a node.
    pub async fn schema_data(&self, request: &SchemaRequest) -> Result<SchemaData> {
        let keys = request.cache_keys();

        if let Some(data) = self.cache.resolved(&keys).await {
            return Ok(data);
        }

        debug!(
            component_set = request.component_set.as_str(),
            version = request.version.as_str();
            "Building schema data"
        );

        let raw = self
            .source
            .fetch(&request.component_set, &request.version)
            .await?;
        let document = SchemaDocument::parse(&raw)?;

        let tree = match self.cache.tree(&keys).await {
            Some(tree) => tree,
            None => {
                let tree = build_tree(&document.elements);
                self.cache.store_tree(&keys, &tree).await;
                tree
            }
        };

        let node = if request.segments.is_empty() {
            None
        } else {
            resolve(&document, &request.segments).cloned()
        };

        let (arguments, doc_comment) = match &node {
            Some(node) => self.describe(request, node).await,
            None => {
                if !request.segments.is_empty() {
                    debug!("No component at {}", request.class_name());
                }
                (ArgumentMap::new(), String::new())
            }
        };

        let data = SchemaData {
            tree,
            node,
            arguments,
            doc_comment,
            target_namespace: document.target_namespace,
        };

        self.cache.store_resolved(&keys, &data).await;

        Ok(data)
    }

    /// Resolve a request and assemble the caller-facing view
    pub async fn view(&self, request: &SchemaRequest, docs: &DocsConfig) -> Result<SchemaView> {
        let data = self.schema_data(request).await?;

        let index_readme = if request.segments.is_empty() {
            self.docs.index_readme(&request.component_set).await
        } else {
            None
        };

        Ok(SchemaView::assemble(request, data, docs, index_readme))
    }

    async fn describe(&self, request: &SchemaRequest, node: &SchemaElement) -> (ArgumentMap, String) {
        let class_name = request.class_name();

        let extracted = extract_arguments(
            node,
            &request.component_set,
            &class_name,
            self.docs.as_ref(),
            &self.merger,
            &request.request_url,
        )
        .await;

        let doc_comment = match self
            .docs
            .lookup(&request.component_set, &class_name, None)
            .await
        {
            Some(readme) => {
                self.merger
                    .merge_supplemental(&node.documentation, &readme, &request.request_url)
            }
            None => node.documentation.clone(),
        };

        (extracted.definitions, doc_comment)
    }
}
