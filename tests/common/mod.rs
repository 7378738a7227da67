//! Shared fixtures and hand-written collaborators for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use schemaker::{
    CacheStore, DocMerger, DocumentationPipeline, MemoryStore, SchemaCache, SchemaSource,
    SourceError, SupplementalDocs,
};

pub const VHS_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:php="http://www.php.net/"
            targetNamespace="http://typo3.org/ns/FluidTYPO3/Vhs/ViewHelpers">
  <xsd:element name="form.select">
    <xsd:annotation>
      <xsd:documentation><![CDATA[Renders a select box]]></xsd:documentation>
    </xsd:annotation>
    <xsd:complexType mixed="true">
      <xsd:sequence>
        <xsd:any minOccurs="0" maxOccurs="1"/>
      </xsd:sequence>
      <xsd:attribute type="xsd:string" name="name" use="required">
        <xsd:annotation>
          <xsd:documentation>Name of the input field</xsd:documentation>
        </xsd:annotation>
      </xsd:attribute>
      <xsd:attribute type="xsd:anySimpleType" php:type="array" name="options" default="NULL">
        <xsd:annotation>
          <xsd:documentation>Options of the select box</xsd:documentation>
        </xsd:annotation>
      </xsd:attribute>
    </xsd:complexType>
  </xsd:element>
  <xsd:element name="form.radio">
    <xsd:complexType>
      <xsd:sequence>
        <xsd:any minOccurs="1"/>
      </xsd:sequence>
      <xsd:attribute type="xsd:boolean" name="checked"/>
    </xsd:complexType>
  </xsd:element>
  <xsd:element name="format.json.encode">
    <xsd:complexType>
      <xsd:attribute type="xsd:mixed" name="value"/>
    </xsd:complexType>
  </xsd:element>
  <xsd:element name="link"/>
</xsd:schema>"#;

/// Element names declared in [`VHS_SCHEMA`], in document order
pub const VHS_ELEMENTS: [&str; 4] = ["form.select", "form.radio", "format.json.encode", "link"];

/// Schema source serving fixed documents and recording every fetch
#[derive(Default)]
pub struct RecordingSource {
    schemas: HashMap<(String, String), Vec<u8>>,
    fetches: Mutex<Vec<(String, String)>>,
}

impl RecordingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, component_set: &str, version: &str, schema: &str) -> Self {
        self.schemas.insert(
            (component_set.to_string(), version.to_string()),
            schema.as_bytes().to_vec(),
        );
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    pub fn fetches(&self) -> Vec<(String, String)> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchemaSource for RecordingSource {
    async fn fetch(&self, component_set: &str, version: &str) -> Result<Vec<u8>, SourceError> {
        self.fetches
            .lock()
            .unwrap()
            .push((component_set.to_string(), version.to_string()));

        self.schemas
            .get(&(component_set.to_string(), version.to_string()))
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                path: format!("{}-{}.xsd", component_set, version).into(),
            })
    }
}

/// Supplemental documentation held in memory
#[derive(Default)]
pub struct InMemoryDocs {
    entries: HashMap<(String, String, Option<String>), String>,
    index: HashMap<String, String>,
}

impl InMemoryDocs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, component_set: &str, class_name: &str, markdown: &str) -> Self {
        self.entries.insert(
            (component_set.to_string(), class_name.to_string(), None),
            markdown.to_string(),
        );
        self
    }

    pub fn with_argument(
        mut self,
        component_set: &str,
        class_name: &str,
        argument: &str,
        markdown: &str,
    ) -> Self {
        self.entries.insert(
            (
                component_set.to_string(),
                class_name.to_string(),
                Some(argument.to_string()),
            ),
            markdown.to_string(),
        );
        self
    }

    pub fn with_index(mut self, component_set: &str, markdown: &str) -> Self {
        self.index
            .insert(component_set.to_string(), markdown.to_string());
        self
    }
}

#[async_trait]
impl SupplementalDocs for InMemoryDocs {
    async fn lookup(
        &self,
        component_set: &str,
        class_name: &str,
        argument: Option<&str>,
    ) -> Option<String> {
        self.entries
            .get(&(
                component_set.to_string(),
                class_name.to_string(),
                argument.map(str::to_string),
            ))
            .cloned()
    }

    async fn index_readme(&self, component_set: &str) -> Option<String> {
        self.index.get(component_set).cloned()
    }
}

pub fn memory_store() -> Arc<dyn CacheStore> {
    Arc::new(MemoryStore::new(1000, Duration::from_secs(300)))
}

pub fn pipeline_with(
    source: Arc<RecordingSource>,
    docs: InMemoryDocs,
    store: Arc<dyn CacheStore>,
) -> DocumentationPipeline {
    DocumentationPipeline::new(
        source,
        Arc::new(docs),
        SchemaCache::new(store),
        DocMerger::default(),
    )
}

/// Lay out schema and markdown files the way the file-backed collaborators expect
pub fn write_project(root: &Path) {
    let schemas = root.join("schemas");
    std::fs::create_dir_all(&schemas).unwrap();
    std::fs::write(schemas.join("vhs-master.xsd"), VHS_SCHEMA).unwrap();

    let class_dir = root.join("docs/vhs/Documentation/Classes/ViewHelpers/Form/SelectViewHelper");
    std::fs::create_dir_all(class_dir.join("Arguments")).unwrap();
    std::fs::write(
        class_dir.join("README.md"),
        "```warning\nOptions must be unique\n```\nSee Arguments/options.md",
    )
    .unwrap();
    std::fs::write(class_dir.join("Arguments/options.md"), "Keys become values").unwrap();

    let index_dir = root.join("docs/vhs/Classes/ViewHelpers");
    std::fs::create_dir_all(&index_dir).unwrap();
    std::fs::write(index_dir.join("README.md"), "# VHS view helpers").unwrap();
}
