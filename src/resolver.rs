//! Path resolution
//!
//! Maps request path segments such as `["Form", "SelectViewHelper"]` back to
//! the schema element they were generated from (`form.select`).

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemakerError};
use crate::naming::{VIEW_HELPER_SUFFIX, leaf_name, lower_first, upper_first};
use crate::schema::{SchemaDocument, SchemaElement};

/// Maximum namespace depth below the view helper root
pub const MAX_SEGMENTS: usize = 5;

/// Ordered path components of a request; empty means the index view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegments(Vec<String>);

impl PathSegments {
    /// Build from caller input, dropping absent and blank segments.
    ///
    /// Fails when more than [`MAX_SEGMENTS`] segments remain.
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .flatten()
            .map(Into::into)
            .filter(|segment: &String| !segment.trim().is_empty())
            .collect();

        if segments.len() > MAX_SEGMENTS {
            return Err(SchemakerError::InvalidRequest(format!(
                "at most {} path segments are supported, got {}",
                MAX_SEGMENTS,
                segments.len()
            )));
        }

        Ok(Self(segments))
    }

    /// Segments addressing the leaf generated for a dotted element name
    pub fn for_element_name(name: &str) -> Result<Self> {
        let mut parts: Vec<&str> = name.split('.').filter(|part| !part.is_empty()).collect();
        let last = parts.pop().map(leaf_name);
        let segments = parts
            .into_iter()
            .map(upper_first)
            .chain(last)
            .map(Some);
        Self::new(segments)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Segments joined with `/`, the layout used for documentation files
    pub fn class_name(&self) -> String {
        self.0.join("/")
    }

    /// Segments concatenated without a separator, as used in cache keys
    pub fn concatenated(&self) -> String {
        self.0.concat()
    }

    /// The dotted element name these segments point at
    pub fn element_name(&self) -> String {
        let joined = self
            .0
            .iter()
            .map(|segment| lower_first(segment))
            .collect::<Vec<_>>()
            .join(".");

        // The suffix is dropped by length, whatever the last segment ends with
        let suffix_len = VIEW_HELPER_SUFFIX.chars().count();
        let keep = joined.chars().count().saturating_sub(suffix_len);
        joined.chars().take(keep).collect()
    }
}

/// Find the element addressed by `segments`.
///
/// `None` is the regular outcome for folder paths and unknown names.
pub fn resolve<'a>(document: &'a SchemaDocument, segments: &PathSegments) -> Option<&'a SchemaElement> {
    let name = segments.element_name();
    document.elements.iter().find(|element| element.name == name)
}
