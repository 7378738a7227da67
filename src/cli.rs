use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only the requested component
    Quiet,
    /// Standard documentation output
    #[default]
    Normal,
    /// Include the full namespace tree on component pages
    Verbose,
}

/// Output format selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable documentation
    Human,
    /// The full view model as JSON
    Json,
}

/// Browse view helper documentation generated from XSD schemas
#[derive(Parser, Debug, Clone)]
#[command(name = "schemaker")]
#[command(about = "Render browsable documentation for view helpers described by an XSD schema")]
#[command(version)]
pub struct Cli {
    /// Component set (extension key) to document
    #[arg(help = "Component set to document, e.g. 'vhs'")]
    pub component_set: Option<String>,

    /// Namespace path below the view helper root
    #[arg(help = "Path segments, e.g. 'Form SelectViewHelper' (at most five)")]
    pub segments: Vec<String>,

    /// Schema version
    #[arg(short = 's', long = "schema-version", help = "Schema version [default: master]")]
    pub schema_version: Option<String>,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Directory holding `<component set>-<version>.xsd` files
    #[arg(long = "xsd-dir")]
    pub xsd_dir: Option<PathBuf>,

    /// Root directory of supplemental markdown
    #[arg(long = "docs-dir")]
    pub docs_dir: Option<PathBuf>,

    /// Cache directory for derived documentation
    #[arg(long = "cache-dir")]
    pub cache_dir: Option<PathBuf>,

    /// Cache TTL in hours
    #[arg(long = "cache-ttl")]
    pub cache_ttl: Option<u64>,

    /// Keep the cache in memory only
    #[arg(long = "no-disk-cache")]
    pub no_disk_cache: bool,

    /// URL used for argument cross references
    #[arg(long = "url")]
    pub url: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    /// Enable quiet mode
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Segments as optional values, ready for `PathSegments::new`
    pub fn path_segments(&self) -> impl Iterator<Item = Option<String>> + '_ {
        self.segments.iter().map(|segment| Some(segment.clone()))
    }
}
