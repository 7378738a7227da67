//! Schema parsing
//!
//! Turns the raw bytes of a view helper schema (`.xsd`) into a [`SchemaDocument`]:
//! one [`SchemaElement`] per `element` declaration and one [`SchemaAttribute`] per
//! nested `attribute` declaration. Only the subset of XSD used by view helper
//! schemas is modeled.

use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Parsed representation of a schema source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDocument {
    /// Element declarations in document order
    pub elements: Vec<SchemaElement>,
    /// The root element's `targetNamespace`, empty when absent
    pub target_namespace: String,
}

/// One declared component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaElement {
    /// Dotted name, e.g. `form.select`
    pub name: String,
    /// Every `attribute` declared below this element, in document order
    pub attributes: Vec<SchemaAttribute>,
    /// Text of the element's own `documentation`, empty when absent
    pub documentation: String,
    /// The first `complexType` child, if the element has one
    pub wrapper: Option<ComplexTypeWrapper>,
}

/// One argument declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAttribute {
    pub name: String,
    /// Declared type exactly as written, e.g. `xsd:string`
    pub declared_type: String,
    /// Namespaced `type` attribute (e.g. `php:type`) overriding the declared type
    pub type_override: Option<String>,
    pub default: Option<String>,
    pub usage: AttributeUse,
    pub documentation: String,
    /// The `complexType` this attribute is declared directly in
    pub wrapper: Option<ComplexTypeWrapper>,
}

/// The `use` marker of an attribute declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeUse {
    #[default]
    Optional,
    Required,
}

impl AttributeUse {
    fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            Some("required") => AttributeUse::Required,
            _ => AttributeUse::Optional,
        }
    }
}

/// A `complexType` that owns attribute declarations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplexTypeWrapper {
    /// The first `any` wildcard below the complex type
    pub wildcard: Option<Wildcard>,
}

/// An `any` wildcard particle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wildcard {
    /// Raw `minOccurs` value, `None` when not given
    pub min_occurs: Option<String>,
}

impl Wildcard {
    /// Whether `minOccurs` demands at least one occurrence.
    ///
    /// An absent, empty or zero value is treated as optional.
    pub fn is_mandatory(&self) -> bool {
        match self.min_occurs.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(value) => value
                .parse::<u64>()
                .map(|count| count > 0)
                .unwrap_or(value != "0"),
        }
    }
}

impl SchemaDocument {
    /// Parse raw schema bytes.
    ///
    /// Control bytes are stripped first (see [`strip_control_bytes`]); anything that
    /// is not well-formed UTF-8 XML afterwards fails with [`ParseError::Malformed`].
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        let filtered = strip_control_bytes(raw);
        let source = std::str::from_utf8(&filtered)
            .map_err(|e| ParseError::malformed(format!("schema is not valid UTF-8: {}", e)))?;

        let document = Document::parse(source)
            .map_err(|e| ParseError::malformed(format!("XML: {}", e)))?;

        let root = document.root_element();
        let target_namespace = root.attribute("targetNamespace").unwrap_or("").to_string();

        let elements = root
            .descendants()
            .filter(|node| is_named(node, "element"))
            .filter_map(|node| read_element(&node))
            .collect();

        Ok(Self {
            elements,
            target_namespace,
        })
    }

    /// Dotted names of all elements, in document order
    pub fn element_names(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|element| element.name.as_str())
    }
}

/// Remove control bytes other than carriage return, line feed and tab.
///
/// Bytes at or above 0x80 are kept so multi-byte UTF-8 sequences survive.
pub fn strip_control_bytes(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .copied()
        .filter(|&byte| matches!(byte, b'\t' | b'\n' | b'\r') || !(byte < 0x20 || byte == 0x7f))
        .collect()
}

fn read_element(node: &Node) -> Option<SchemaElement> {
    // `ref` declarations carry no name and describe no component of their own
    let name = node.attribute("name")?.to_string();

    let documentation = node
        .descendants()
        .find(|candidate| is_named(candidate, "documentation") && owned_by(candidate, node))
        .map(|doc| text_content(&doc))
        .unwrap_or_default();

    let wrapper = node
        .children()
        .find(|child| is_named(child, "complexType"))
        .map(|complex_type| read_wrapper(&complex_type));

    let attributes = node
        .descendants()
        .filter(|candidate| is_named(candidate, "attribute"))
        .filter_map(|attribute| read_attribute(&attribute))
        .collect();

    Some(SchemaElement {
        name,
        attributes,
        documentation,
        wrapper,
    })
}

fn read_attribute(node: &Node) -> Option<SchemaAttribute> {
    let name = node.attribute("name")?.to_string();

    let type_override = node
        .attributes()
        .find(|attr| attr.name() == "type" && attr.namespace().is_some())
        .map(|attr| attr.value().to_string());

    let documentation = node
        .descendants()
        .find(|candidate| is_named(candidate, "documentation"))
        .map(|doc| text_content(&doc))
        .unwrap_or_default();

    let wrapper = node
        .parent_element()
        .filter(|parent| is_named(parent, "complexType"))
        .map(|complex_type| read_wrapper(&complex_type));

    Some(SchemaAttribute {
        name,
        declared_type: node.attribute("type").unwrap_or("").to_string(),
        type_override,
        default: node.attribute("default").map(str::to_string),
        usage: AttributeUse::from_marker(node.attribute("use")),
        documentation,
        wrapper,
    })
}

fn read_wrapper(node: &Node) -> ComplexTypeWrapper {
    let wildcard = node
        .descendants()
        .find(|candidate| is_named(candidate, "any"))
        .map(|any| Wildcard {
            min_occurs: any.attribute("minOccurs").map(str::to_string),
        });

    ComplexTypeWrapper { wildcard }
}

/// Element tag comparison by local name, whatever prefix the schema binds XSD to
fn is_named(node: &Node, local_name: &str) -> bool {
    node.is_element() && node.tag_name().name() == local_name
}

/// Whether `node` belongs to `owner` directly rather than to a nested
/// attribute or element declaration
fn owned_by(node: &Node, owner: &Node) -> bool {
    for ancestor in node.ancestors().skip(1) {
        if ancestor == *owner {
            return true;
        }
        if is_named(&ancestor, "attribute") || is_named(&ancestor, "element") {
            return false;
        }
    }
    false
}

fn text_content(node: &Node) -> String {
    node.descendants()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}
