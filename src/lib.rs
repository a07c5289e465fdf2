//! ooxml-rels - Typed model and codec for OOXML package relationships
//!
//! Licensed under AGPL-3.0

pub mod catalog;
pub mod manifest;
pub mod relationship;
pub mod relationships;
pub mod schema;

// Re-export main types
pub use catalog::{SchemaCatalog, CATALOG_ENTRIES};
pub use manifest::{part_directory, rels_part_path, ManifestReader, ManifestWriter};
pub use relationship::{RawRelationship, Relationship};
pub use relationships::Relationships;
pub use schema::{KnownSchema, SchemaTraits, SchemaType};

/// Reads a `.rels` part and decodes it against the global catalog.
pub fn read_relationships(xml: &str) -> Result<Relationships> {
    let records = ManifestReader::new().read_str(xml)?;
    Ok(Relationships::from_records_global(&records))
}

/// Encodes against the global catalog and renders a `.rels` part.
pub fn write_relationships(relationships: &Relationships) -> Result<String> {
    let records = relationships.to_records(SchemaCatalog::global());
    ManifestWriter::new().write(&records)
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Relationship element is missing the {attribute} attribute")]
    MissingAttribute { attribute: &'static str },

    #[error("Unknown schema tag: {0}")]
    UnknownTag(String),

    #[error("Catalog inconsistency: {0}")]
    CatalogInconsistency(String),
}
