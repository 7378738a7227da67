//! Argument extraction
//!
//! Turns the attributes of a resolved [`SchemaElement`] into typed
//! [`ArgumentDefinition`]s, merging per-argument supplemental markdown.

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::markdown::DocMerger;
use crate::schema::{AttributeUse, SchemaAttribute, SchemaElement};
use crate::source::SupplementalDocs;

/// One documented argument of a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub required: bool,
    pub default: Option<String>,
    pub description: String,
}

/// Arguments by name, in declaration order
pub type ArgumentMap = IndexMap<String, ArgumentDefinition>;

/// Extraction output together with the conditions recovered along the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArguments {
    pub definitions: ArgumentMap,
    pub recovered: Vec<ExtractionError>,
}

/// Type of an attribute: the override verbatim, else the declared type
/// without its namespace prefix
pub fn argument_type(attribute: &SchemaAttribute) -> String {
    match &attribute.type_override {
        Some(type_override) => type_override.clone(),
        None => attribute
            .declared_type
            .rsplit(':')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Required signal from the attribute's complex-type wrapper
pub fn required_by_wrapper(attribute: &SchemaAttribute) -> Result<bool, ExtractionError> {
    attribute
        .wrapper
        .as_ref()
        .and_then(|wrapper| wrapper.wildcard.as_ref())
        .map(|wildcard| wildcard.is_mandatory())
        .ok_or_else(|| ExtractionError::MissingWrapper {
            attribute: attribute.name.clone(),
        })
}

/// Build the argument map for `node`.
///
/// A later attribute with an already seen name replaces the earlier
/// definition but keeps its position.
pub async fn extract_arguments(
    node: &SchemaElement,
    component_set: &str,
    class_name: &str,
    docs: &dyn SupplementalDocs,
    merger: &DocMerger,
    request_url: &str,
) -> ExtractedArguments {
    let mut extracted = ExtractedArguments::default();

    for attribute in &node.attributes {
        let wrapper_required = match required_by_wrapper(attribute) {
            Ok(required) => required,
            Err(e) => {
                warn!("{}: {}", node.name, e);
                extracted.recovered.push(e);
                false
            }
        };
        let required = wrapper_required || attribute.usage == AttributeUse::Required;

        let description = match docs
            .lookup(component_set, class_name, Some(&attribute.name))
            .await
        {
            Some(markdown) => merger.merge_argument(&attribute.documentation, &markdown, request_url),
            None => attribute.documentation.clone(),
        };

        extracted.definitions.insert(
            attribute.name.clone(),
            ArgumentDefinition {
                name: attribute.name.clone(),
                type_name: argument_type(attribute),
                required,
                default: attribute.default.clone(),
                description,
            },
        );
    }

    extracted
}
