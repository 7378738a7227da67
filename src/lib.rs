//! # schemaker Library
//!
//! Browsable documentation for view helper components declared in an XSD
//! schema: parsing, namespace trees, path resolution, argument extraction and
//! supplemental markdown merging behind a two-tier cache.

pub mod arguments;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod resolver;
pub mod schema;
pub mod source;
pub mod tree;
pub mod view;

pub use arguments::{ArgumentDefinition, ArgumentMap, ExtractedArguments, extract_arguments};
pub use cache::{
    CacheKeys, CacheMetadata, CacheStore, DiskStore, MemoryStore, SchemaCache, TieredStore,
    sanitize,
};
pub use cli::{Cli, OutputFormat, VerbosityLevel};
pub use config::{Config, ConfigError, ConfigManager, DocsConfig, EnvProvider};
pub use error::{CacheError, ExtractionError, ParseError, SchemakerError, SourceError};
pub use markdown::DocMerger;
pub use output::Output;
pub use pipeline::{DocumentationPipeline, SchemaData, SchemaRequest};
pub use resolver::{MAX_SEGMENTS, PathSegments, resolve};
pub use schema::{SchemaAttribute, SchemaDocument, SchemaElement};
pub use source::{FileSchemaSource, FileSupplementalDocs, SchemaSource, SupplementalDocs};
pub use tree::{NamespaceNode, build_tree};
pub use view::SchemaView;
