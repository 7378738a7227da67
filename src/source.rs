//! Schema sources and supplemental documentation lookups
//!
//! Both are external collaborators of the pipeline and sit behind traits so
//! the pipeline can be exercised without touching real storage.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};

use crate::error::SourceError;

/// Supplies raw schema bytes for a component set and version
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn fetch(&self, component_set: &str, version: &str) -> Result<Vec<u8>, SourceError>;
}

/// Looks up hand-written markdown for components and their arguments.
///
/// Absence is never an error: `None` means there is nothing to merge.
#[async_trait]
pub trait SupplementalDocs: Send + Sync {
    /// Markdown for a component (`argument == None`) or one of its arguments
    async fn lookup(
        &self,
        component_set: &str,
        class_name: &str,
        argument: Option<&str>,
    ) -> Option<String>;

    /// Markdown shown on the index view of a component set
    async fn index_readme(&self, _component_set: &str) -> Option<String> {
        None
    }
}

/// File name of a stored schema, `<component set>-<version>.xsd`
pub fn schema_file_name(component_set: &str, version: &str) -> String {
    format!("{}-{}.xsd", component_set, version)
}

/// Reads schemas from a storage directory
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    storage_path: PathBuf,
}

impl FileSchemaSource {
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
        }
    }

    /// Path of a stored schema; `None` when either part is not a plain file name
    pub fn schema_path(&self, component_set: &str, version: &str) -> Option<PathBuf> {
        if !is_plain_name(component_set) || !is_plain_name(version) {
            return None;
        }
        Some(
            self.storage_path
                .join(schema_file_name(component_set, version)),
        )
    }
}

#[async_trait]
impl SchemaSource for FileSchemaSource {
    async fn fetch(&self, component_set: &str, version: &str) -> Result<Vec<u8>, SourceError> {
        let Some(path) = self.schema_path(component_set, version) else {
            return Err(SourceError::NotFound {
                path: PathBuf::from(schema_file_name(component_set, version)),
            });
        };
        debug!("Reading schema {}", path.display());

        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound { path: path.clone() },
            _ => SourceError::Io {
                path: path.clone(),
                source: e,
            },
        })
    }
}

/// Reads supplemental markdown from per-component-set directories.
///
/// Layout below `<root>/<component set>/`:
///
/// - `Documentation/Classes/ViewHelpers/<class>/README.md`
/// - `Documentation/Classes/ViewHelpers/<class>/Arguments/<argument>.md`
/// - `Classes/ViewHelpers/README.md` for the index view
#[derive(Debug, Clone)]
pub struct FileSupplementalDocs {
    root: PathBuf,
}

impl FileSupplementalDocs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the markdown file for a component or argument.
    ///
    /// `None` when any part would step outside the component set directory.
    pub fn markdown_path(
        &self,
        component_set: &str,
        class_name: &str,
        argument: Option<&str>,
    ) -> Option<PathBuf> {
        if !is_plain_name(component_set) || class_name.is_empty() {
            return None;
        }
        if !class_name.split('/').all(is_plain_name) {
            return None;
        }

        let mut path = self
            .root
            .join(component_set)
            .join("Documentation/Classes/ViewHelpers")
            .join(class_name);

        match argument {
            Some(argument) if is_plain_name(argument) => {
                path.push("Arguments");
                path.push(format!("{}.md", argument));
            }
            Some(_) => return None,
            None => path.push("README.md"),
        }

        Some(path)
    }
}

#[async_trait]
impl SupplementalDocs for FileSupplementalDocs {
    async fn lookup(
        &self,
        component_set: &str,
        class_name: &str,
        argument: Option<&str>,
    ) -> Option<String> {
        let path = self.markdown_path(component_set, class_name, argument)?;
        read_optional(&path).await
    }

    async fn index_readme(&self, component_set: &str) -> Option<String> {
        if !is_plain_name(component_set) {
            return None;
        }
        let path = self
            .root
            .join(component_set)
            .join("Classes/ViewHelpers/README.md");
        read_optional(&path).await
    }
}

async fn read_optional(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Ignoring unreadable markdown {}: {}", path.display(), e);
            None
        }
    }
}

/// A single normal path component: no separators, no `.` or `..`
fn is_plain_name(value: &str) -> bool {
    let mut components = Path::new(value).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !value.contains(['/', '\\'])
}
