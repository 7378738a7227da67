use crate::cli::{Cli, OutputFormat, VerbosityLevel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable error: {0}")]
    Environment(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Longest accepted disk TTL (100 years)
pub const MAX_TTL_HOURS: u64 = 100 * 365 * 24;

/// Longest accepted memory TTL (100 years)
pub const MAX_MEMORY_TTL_SECONDS: u64 = MAX_TTL_HOURS * 3600;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub docs: DocsConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
}

/// Documentation settings handed to the pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocsConfig {
    /// Component sets offered for browsing; empty when none are configured
    pub component_sets: Vec<String>,
    /// Component set used when a request names none
    pub default_component_set: Option<String>,
    /// Version used when a request names none
    pub default_version: String,
    /// Directory holding `<component set>-<version>.xsd` files
    pub xsd_storage_path: PathBuf,
    /// Root of the per-component-set supplemental markdown directories
    pub docs_root: PathBuf,
    /// Component set -> namespace alias used in templates (`vhs` -> `v`)
    pub extension_key_to_namespace_map: HashMap<String, String>,
    /// Component sets whose markdown should not be rendered
    pub markdown_blacklist: Vec<String>,
    /// Run the legacy doubled-fence alert rewrite on component docs
    pub legacy_alert_rewrite: bool,
    /// Base URL for argument cross references
    pub request_url: String,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory path
    pub directory: PathBuf,
    /// Time-to-live for disk entries in hours
    pub ttl_hours: u64,
    /// Maximum number of entries in memory cache
    pub max_memory_entries: u64,
    /// Memory cache TTL in seconds
    pub memory_ttl_seconds: u64,
    /// Persist entries on disk in addition to memory
    pub disk_enabled: bool,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormatConfig,
    /// Verbose output
    pub verbose: bool,
    /// Quiet mode
    pub quiet: bool,
}

/// Output format configuration (serializable version of CLI OutputFormat)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormatConfig {
    Human,
    Json,
}

impl From<OutputFormat> for OutputFormatConfig {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputFormatConfig::Human,
            OutputFormat::Json => OutputFormatConfig::Json,
        }
    }
}

impl From<OutputFormatConfig> for OutputFormat {
    fn from(format: OutputFormatConfig) -> Self {
        match format {
            OutputFormatConfig::Human => OutputFormat::Human,
            OutputFormatConfig::Json => OutputFormat::Json,
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        let extension_key_to_namespace_map = [
            ("fluid", "f"),
            ("vhs", "v"),
            ("fluidwidget", "w"),
            ("fluidbackend", "be"),
        ]
        .into_iter()
        .map(|(key, alias)| (key.to_string(), alias.to_string()))
        .collect();

        Self {
            component_sets: vec![],
            default_component_set: None,
            default_version: "master".to_string(),
            xsd_storage_path: PathBuf::from("schemas"),
            docs_root: PathBuf::from("docs"),
            extension_key_to_namespace_map,
            markdown_blacklist: vec!["fluid".to_string(), "news".to_string()],
            legacy_alert_rewrite: true,
            request_url: String::new(),
        }
    }
}

impl DocsConfig {
    /// Configured component sets in ascending order
    pub fn sorted_component_sets(&self) -> Vec<String> {
        let mut sets = self.component_sets.clone();
        sets.sort();
        sets.dedup();
        sets
    }

    pub fn is_markdown_blacklisted(&self, component_set: &str) -> bool {
        self.markdown_blacklist
            .iter()
            .any(|entry| entry == component_set)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("schemaker"),
            ttl_hours: 24,
            max_memory_entries: 1000,
            memory_ttl_seconds: 3600, // 1 hour
            disk_enabled: true,
        }
    }
}

impl CacheConfig {
    /// Disk entry lifetime, clamped to [`MAX_TTL_HOURS`]
    pub fn disk_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.min(MAX_TTL_HOURS) * 3600)
    }

    /// Memory entry lifetime, clamped to [`MAX_MEMORY_TTL_SECONDS`]
    pub fn memory_ttl(&self) -> Duration {
        Duration::from_secs(self.memory_ttl_seconds.min(MAX_MEMORY_TTL_SECONDS))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormatConfig::Human,
            verbose: false,
            quiet: false,
        }
    }
}

impl OutputConfig {
    pub fn verbosity(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Configuration manager for loading and merging configurations
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with precedence: file -> environment -> CLI
    pub async fn load_config(cli: &Cli) -> Result<Config> {
        Self::load_config_with(&SystemEnvProvider, cli).await
    }

    /// Load configuration reading environment overrides from `env`
    pub async fn load_config_with(env: &impl EnvProvider, cli: &Cli) -> Result<Config> {
        let mut config = Config::default();

        if let Some(config_path) = &cli.config {
            let file_config = Self::load_from_file(config_path).await?;
            config = Self::merge_configs(config, file_config);
        } else if let Some(found_config) = Self::find_config_file().await? {
            config = Self::merge_configs(config, found_config);
        }

        config = Self::apply_environment_overrides_with(env, config)?;

        // CLI arguments have the highest precedence
        config = Self::merge_with_cli(config, cli);

        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub async fn load_from_file(path: &Path) -> Result<Config> {
        let content = tokio::fs::read_to_string(path).await?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = toml::from_str::<Config>(&content) {
                    Ok(config)
                } else {
                    Ok(serde_json::from_str(&content)?)
                }
            }
        }
    }

    /// Find configuration file in standard locations
    pub async fn find_config_file() -> Result<Option<Config>> {
        let config_names = [
            "schemaker.toml",
            "schemaker.json",
            ".schemaker.toml",
            ".schemaker.json",
        ];

        // Check current directory first
        for name in &config_names {
            let path = PathBuf::from(name);
            if path.exists() {
                return Ok(Some(Self::load_from_file(&path).await?));
            }
        }

        // Check user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let app_config_dir = config_dir.join("schemaker");
            for name in &config_names {
                let path = app_config_dir.join(name);
                if path.exists() {
                    return Ok(Some(Self::load_from_file(&path).await?));
                }
            }
        }

        Ok(None)
    }

    /// Apply environment variable overrides with a custom environment provider
    pub fn apply_environment_overrides_with(
        env: &impl EnvProvider,
        mut config: Config,
    ) -> Result<Config> {
        // Documentation settings
        if let Some(path) = env.get("SCHEMAKER_XSD_PATH") {
            config.docs.xsd_storage_path = PathBuf::from(path);
        }

        if let Some(path) = env.get("SCHEMAKER_DOCS_ROOT") {
            config.docs.docs_root = PathBuf::from(path);
        }

        if let Some(component_set) = env.get("SCHEMAKER_DEFAULT_COMPONENT_SET") {
            config.docs.default_component_set = Some(component_set);
        }

        if let Some(version) = env.get("SCHEMAKER_DEFAULT_VERSION") {
            config.docs.default_version = version;
        }

        if let Some(sets) = env.get("SCHEMAKER_COMPONENT_SETS") {
            config.docs.component_sets = split_list(&sets);
        }

        // Cache settings
        if let Some(cache_dir) = env.get("SCHEMAKER_CACHE_DIR") {
            config.cache.directory = PathBuf::from(cache_dir);
        }

        if let Some(cache_ttl) = env.get("SCHEMAKER_CACHE_TTL") {
            config.cache.ttl_hours = cache_ttl.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid SCHEMAKER_CACHE_TTL value: {}", cache_ttl))
            })?;
        }

        // Output settings
        if let Some(verbose) = env.get("SCHEMAKER_VERBOSE") {
            config.output.verbose = verbose.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid SCHEMAKER_VERBOSE value: {}", verbose))
            })?;
        }

        if let Some(quiet) = env.get("SCHEMAKER_QUIET") {
            config.output.quiet = quiet.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid SCHEMAKER_QUIET value: {}", quiet))
            })?;
        }

        if let Some(format) = env.get("SCHEMAKER_FORMAT") {
            config.output.format = match format.to_lowercase().as_str() {
                "human" => OutputFormatConfig::Human,
                "json" => OutputFormatConfig::Json,
                _ => {
                    return Err(ConfigError::Environment(format!(
                        "Invalid SCHEMAKER_FORMAT value: {}",
                        format
                    )));
                }
            };
        }

        Ok(config)
    }

    /// Merge CLI arguments with configuration (CLI takes precedence)
    pub fn merge_with_cli(mut config: Config, cli: &Cli) -> Config {
        // Documentation settings
        if let Some(xsd_dir) = &cli.xsd_dir {
            config.docs.xsd_storage_path = xsd_dir.clone();
        }
        if let Some(docs_dir) = &cli.docs_dir {
            config.docs.docs_root = docs_dir.clone();
        }
        if let Some(url) = &cli.url {
            config.docs.request_url = url.clone();
        }

        // Cache settings
        if let Some(cache_dir) = &cli.cache_dir {
            config.cache.directory = cache_dir.clone();
        }
        if let Some(cache_ttl) = cli.cache_ttl {
            config.cache.ttl_hours = cache_ttl;
        }
        if cli.no_disk_cache {
            config.cache.disk_enabled = false;
        }

        // Output settings
        if let Some(format) = cli.format {
            config.output.format = format.into();
        }
        if cli.verbose {
            config.output.verbose = true;
            config.output.quiet = false;
        }
        if cli.quiet {
            config.output.quiet = true;
            config.output.verbose = false;
        }

        config
    }

    /// Merge two configurations (second takes precedence for non-empty values)
    pub fn merge_configs(mut base: Config, override_config: Config) -> Config {
        // Documentation settings
        if !override_config.docs.component_sets.is_empty() {
            base.docs.component_sets = override_config.docs.component_sets;
        }
        if override_config.docs.default_component_set.is_some() {
            base.docs.default_component_set = override_config.docs.default_component_set;
        }
        base.docs.default_version = override_config.docs.default_version;
        base.docs.xsd_storage_path = override_config.docs.xsd_storage_path;
        base.docs.docs_root = override_config.docs.docs_root;
        if !override_config.docs.extension_key_to_namespace_map.is_empty() {
            base.docs.extension_key_to_namespace_map =
                override_config.docs.extension_key_to_namespace_map;
        }
        base.docs.markdown_blacklist = override_config.docs.markdown_blacklist;
        base.docs.legacy_alert_rewrite = override_config.docs.legacy_alert_rewrite;
        if !override_config.docs.request_url.is_empty() {
            base.docs.request_url = override_config.docs.request_url;
        }

        base.cache = override_config.cache;
        base.output = override_config.output;

        base
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        // Validate documentation settings
        if config.docs.default_version.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Default version must not be empty".to_string(),
            ));
        }

        let blank_set = config
            .docs
            .component_sets
            .iter()
            .chain(config.docs.default_component_set.iter())
            .any(|set| set.trim().is_empty());
        if blank_set {
            return Err(ConfigError::Validation(
                "Component set identifiers must not be blank".to_string(),
            ));
        }

        // Validate cache settings
        if config.cache.ttl_hours == 0 {
            return Err(ConfigError::Validation(
                "Cache TTL must be greater than 0".to_string(),
            ));
        }

        if config.cache.ttl_hours > MAX_TTL_HOURS {
            return Err(ConfigError::Validation(format!(
                "Cache TTL must be at most {} hours",
                MAX_TTL_HOURS
            )));
        }

        if config.cache.memory_ttl_seconds == 0 {
            return Err(ConfigError::Validation(
                "Memory cache TTL must be greater than 0".to_string(),
            ));
        }

        if config.cache.memory_ttl_seconds > MAX_MEMORY_TTL_SECONDS {
            return Err(ConfigError::Validation(format!(
                "Memory cache TTL must be at most {} seconds",
                MAX_MEMORY_TTL_SECONDS
            )));
        }

        if config.cache.max_memory_entries == 0 {
            return Err(ConfigError::Validation(
                "Cache memory entries must be greater than 0".to_string(),
            ));
        }

        // Validate output settings
        if config.output.verbose && config.output.quiet {
            return Err(ConfigError::Validation(
                "Cannot enable both verbose and quiet modes".to_string(),
            ));
        }

        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Mock environment variable provider for testing
    #[derive(Default)]
    struct MockEnvProvider {
        vars: HashMap<String, String>,
    }

    impl MockEnvProvider {
        fn new() -> Self {
            Self {
                vars: HashMap::new(),
            }
        }

        fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
            self.vars.insert(key.into(), value.into());
        }
    }

    impl EnvProvider for MockEnvProvider {
        fn get(&self, key: &str) -> Option<String> {
            self.vars.get(key).cloned()
        }
    }

    #[tokio::test]
    async fn test_default_config() {
        let config = Config::default();

        assert!(config.docs.component_sets.is_empty());
        assert_eq!(config.docs.default_component_set, None);
        assert_eq!(config.docs.default_version, "master");
        assert_eq!(
            config.docs.extension_key_to_namespace_map.get("vhs"),
            Some(&"v".to_string())
        );
        assert!(config.docs.is_markdown_blacklisted("fluid"));
        assert!(config.docs.is_markdown_blacklisted("news"));
        assert!(!config.docs.is_markdown_blacklisted("vhs"));
        assert!(config.docs.legacy_alert_rewrite);

        // Cache directory should be set to default path
        assert!(
            config
                .cache
                .directory
                .to_string_lossy()
                .contains("schemaker")
        );
        assert_eq!(config.cache.ttl_hours, 24);
        assert!(config.cache.disk_enabled);

        assert_eq!(config.output.format, OutputFormatConfig::Human);
        assert_eq!(config.output.verbosity(), VerbosityLevel::Normal);
    }

    #[tokio::test]
    async fn test_load_toml_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let toml_content = r#"
[docs]
component_sets = ["vhs", "flux"]
default_component_set = "vhs"
default_version = "2.0.0"
xsd_storage_path = "/srv/schemas"
docs_root = "/srv/extensions"
markdown_blacklist = ["news"]
legacy_alert_rewrite = false

[docs.extension_key_to_namespace_map]
vhs = "v"
flux = "flux"

[cache]
directory = "/tmp/cache"
ttl_hours = 48

[output]
format = "json"
verbose = true
"#;

        fs::write(&config_path, toml_content).unwrap();

        let config = ConfigManager::load_from_file(&config_path).await.unwrap();

        assert_eq!(config.docs.component_sets, vec!["vhs", "flux"]);
        assert_eq!(config.docs.default_component_set.as_deref(), Some("vhs"));
        assert_eq!(config.docs.default_version, "2.0.0");
        assert_eq!(config.docs.xsd_storage_path, PathBuf::from("/srv/schemas"));
        assert_eq!(config.docs.docs_root, PathBuf::from("/srv/extensions"));
        assert_eq!(config.docs.markdown_blacklist, vec!["news"]);
        assert!(!config.docs.legacy_alert_rewrite);
        assert_eq!(config.docs.extension_key_to_namespace_map.len(), 2);

        assert_eq!(config.cache.directory, PathBuf::from("/tmp/cache"));
        assert_eq!(config.cache.ttl_hours, 48);
        // Missing fields fall back to defaults
        assert_eq!(config.cache.max_memory_entries, 1000);

        assert_eq!(config.output.format, OutputFormatConfig::Json);
        assert!(config.output.verbose);
        assert!(!config.output.quiet);
    }

    #[tokio::test]
    async fn test_load_json_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let json_content = r#"{
  "docs": {
    "component_sets": ["news"],
    "request_url": "https://example.com/schema"
  },
  "cache": {
    "disk_enabled": false
  }
}"#;

        fs::write(&config_path, json_content).unwrap();

        let config = ConfigManager::load_from_file(&config_path).await.unwrap();

        assert_eq!(config.docs.component_sets, vec!["news"]);
        assert_eq!(config.docs.request_url, "https://example.com/schema");
        assert_eq!(config.docs.default_version, "master");
        assert!(!config.cache.disk_enabled);
    }

    #[tokio::test]
    async fn test_unsupported_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "docs: {}").unwrap();

        let result = ConfigManager::load_from_file(&config_path).await;
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[docs\ncomponent_sets = ").unwrap();

        let result = ConfigManager::load_from_file(&config_path).await;
        assert!(matches!(result, Err(ConfigError::TomlParsing(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let mut mock_env = MockEnvProvider::new();
        mock_env.set("SCHEMAKER_XSD_PATH", "/env/schemas");
        mock_env.set("SCHEMAKER_DOCS_ROOT", "/env/docs");
        mock_env.set("SCHEMAKER_DEFAULT_COMPONENT_SET", "vhs");
        mock_env.set("SCHEMAKER_COMPONENT_SETS", "vhs, flux,,news");
        mock_env.set("SCHEMAKER_CACHE_DIR", "/env/cache");
        mock_env.set("SCHEMAKER_CACHE_TTL", "72");
        mock_env.set("SCHEMAKER_VERBOSE", "true");
        mock_env.set("SCHEMAKER_FORMAT", "JSON");

        let config =
            ConfigManager::apply_environment_overrides_with(&mock_env, Config::default()).unwrap();

        assert_eq!(config.docs.xsd_storage_path, PathBuf::from("/env/schemas"));
        assert_eq!(config.docs.docs_root, PathBuf::from("/env/docs"));
        assert_eq!(config.docs.default_component_set.as_deref(), Some("vhs"));
        assert_eq!(config.docs.component_sets, vec!["vhs", "flux", "news"]);
        assert_eq!(config.cache.directory, PathBuf::from("/env/cache"));
        assert_eq!(config.cache.ttl_hours, 72);
        assert!(config.output.verbose);
        assert_eq!(config.output.format, OutputFormatConfig::Json);
    }

    #[test]
    fn test_invalid_environment_values() {
        let mut mock_env = MockEnvProvider::new();
        mock_env.set("SCHEMAKER_CACHE_TTL", "soon");

        let result = ConfigManager::apply_environment_overrides_with(&mock_env, Config::default());
        assert!(matches!(result, Err(ConfigError::Environment(_))));

        let mut mock_env = MockEnvProvider::new();
        mock_env.set("SCHEMAKER_FORMAT", "yaml");

        let result = ConfigManager::apply_environment_overrides_with(&mock_env, Config::default());
        assert!(matches!(result, Err(ConfigError::Environment(_))));
    }

    #[test]
    fn test_merge_with_cli() {
        use clap::Parser;

        let cli = Cli::try_parse_from([
            "schemaker",
            "--xsd-dir",
            "/cli/schemas",
            "--docs-dir",
            "/cli/docs",
            "--url",
            "https://docs.example.com/vhs",
            "--cache-ttl",
            "36",
            "--no-disk-cache",
            "--format",
            "json",
            "--verbose",
            "vhs",
        ])
        .unwrap();

        let config = ConfigManager::merge_with_cli(Config::default(), &cli);

        assert_eq!(config.docs.xsd_storage_path, PathBuf::from("/cli/schemas"));
        assert_eq!(config.docs.docs_root, PathBuf::from("/cli/docs"));
        assert_eq!(config.docs.request_url, "https://docs.example.com/vhs");
        assert_eq!(config.cache.ttl_hours, 36);
        assert!(!config.cache.disk_enabled);
        assert_eq!(config.output.format, OutputFormatConfig::Json);
        assert_eq!(config.output.verbosity(), VerbosityLevel::Verbose);
    }

    #[test]
    fn test_merge_configs() {
        let mut base = Config::default();
        base.docs.component_sets = vec!["vhs".to_string()];
        base.docs.request_url = "https://base".to_string();

        let mut override_config = Config::default();
        override_config.docs.default_version = "1.0.0".to_string();
        override_config.cache.ttl_hours = 2;

        let merged = ConfigManager::merge_configs(base, override_config);

        // Empty values in the override keep the base
        assert_eq!(merged.docs.component_sets, vec!["vhs"]);
        assert_eq!(merged.docs.request_url, "https://base");
        assert_eq!(merged.docs.default_version, "1.0.0");
        assert_eq!(merged.cache.ttl_hours, 2);
    }

    #[test]
    fn test_config_validation() {
        assert!(ConfigManager::validate_config(&Config::default()).is_ok());

        let mut config = Config::default();
        config.docs.default_version = " ".to_string();
        assert!(ConfigManager::validate_config(&config).is_err());

        let mut config = Config::default();
        config.docs.component_sets = vec!["vhs".to_string(), "".to_string()];
        assert!(ConfigManager::validate_config(&config).is_err());

        let mut config = Config::default();
        config.cache.ttl_hours = 0;
        assert!(ConfigManager::validate_config(&config).is_err());

        let mut config = Config::default();
        config.cache.max_memory_entries = 0;
        assert!(ConfigManager::validate_config(&config).is_err());

        let mut config = Config::default();
        config.output.verbose = true;
        config.output.quiet = true;
        assert!(ConfigManager::validate_config(&config).is_err());
    }

    #[test]
    fn test_sorted_component_sets() {
        let mut docs = DocsConfig::default();
        assert!(docs.sorted_component_sets().is_empty());

        docs.component_sets = vec!["vhs".into(), "flux".into(), "vhs".into()];
        assert_eq!(docs.sorted_component_sets(), vec!["flux", "vhs"]);
    }

    #[test]
    fn test_cache_ttl_duration() {
        let config = Config::default();
        assert_eq!(config.cache.disk_ttl(), Duration::from_secs(24 * 3600));
        assert_eq!(config.cache.memory_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_out_of_range_ttls_are_rejected() {
        let mut config = Config::default();
        config.cache.ttl_hours = MAX_TTL_HOURS;
        assert!(ConfigManager::validate_config(&config).is_ok());

        config.cache.ttl_hours = u64::MAX / 1000;
        assert!(matches!(
            ConfigManager::validate_config(&config),
            Err(ConfigError::Validation(_))
        ));

        let mut config = Config::default();
        config.cache.memory_ttl_seconds = u64::MAX;
        assert!(matches!(
            ConfigManager::validate_config(&config),
            Err(ConfigError::Validation(_))
        ));

        let mut config = Config::default();
        config.cache.memory_ttl_seconds = 0;
        assert!(ConfigManager::validate_config(&config).is_err());
    }

    #[test]
    fn test_huge_ttls_are_clamped() {
        let mut config = Config::default();
        config.cache.ttl_hours = u64::MAX / 1000;
        config.cache.memory_ttl_seconds = u64::MAX;

        assert_eq!(
            config.cache.disk_ttl(),
            Duration::from_secs(MAX_TTL_HOURS * 3600)
        );
        assert_eq!(
            config.cache.memory_ttl(),
            Duration::from_secs(MAX_MEMORY_TTL_SECONDS)
        );
    }

    #[tokio::test]
    async fn test_load_config_with_explicit_file() {
        use clap::Parser;

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("schemaker.toml");
        fs::write(&config_path, "[docs]\ndefault_component_set = \"flux\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "schemaker",
            "--config",
            config_path.to_str().unwrap(),
            "--quiet",
        ])
        .unwrap();

        let mut mock_env = MockEnvProvider::new();
        mock_env.set("SCHEMAKER_DEFAULT_VERSION", "3.0.0");

        let config = ConfigManager::load_config_with(&mock_env, &cli).await.unwrap();

        assert_eq!(config.docs.default_component_set.as_deref(), Some("flux"));
        assert_eq!(config.docs.default_version, "3.0.0");
        assert_eq!(config.output.verbosity(), VerbosityLevel::Quiet);
    }
}
