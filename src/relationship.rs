use crate::catalog::SchemaCatalog;
use crate::schema::SchemaType;
use compact_str::CompactString;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Separator between archive path segments.
pub const PATH_SEPARATOR: char = '/';

/// One relationship exactly as it appears in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRelationship {
    pub id: CompactString,
    #[serde(rename = "type")]
    pub type_uri: String,
    pub target: CompactString,
}

impl RawRelationship {
    pub fn new(id: &str, type_uri: &str, target: &str) -> Self {
        Self {
            id: CompactString::from(id),
            type_uri: type_uri.to_string(),
            target: CompactString::from(target),
        }
    }
}

/// A decoded relationship entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: CompactString,
    pub schema_type: SchemaType,
    pub target: CompactString,
}

impl Relationship {
    /// Decodes against the global catalog.
    pub fn new(id: &str, type_uri: &str, target: &str) -> Self {
        Self::with_catalog(id, type_uri, target, SchemaCatalog::global())
    }

    pub fn with_catalog(id: &str, type_uri: &str, target: &str, catalog: &SchemaCatalog) -> Self {
        Self {
            id: CompactString::from(id),
            schema_type: catalog.resolve(type_uri),
            target: CompactString::from(target),
        }
    }

    pub fn from_raw(raw: &RawRelationship, catalog: &SchemaCatalog) -> Self {
        Self {
            id: raw.id.clone(),
            schema_type: catalog.resolve(&raw.type_uri),
            target: raw.target.clone(),
        }
    }

    pub fn to_raw(&self, catalog: &SchemaCatalog) -> RawRelationship {
        RawRelationship {
            id: self.id.clone(),
            type_uri: catalog.canonical_uri(&self.schema_type).to_string(),
            target: self.target.clone(),
        }
    }

    pub fn to_raw_global(&self) -> RawRelationship {
        self.to_raw(SchemaCatalog::global())
    }

    /// Archive path of the target when the manifest lives under `root`.
    ///
    /// Root-anchored targets are returned as written. `..` segments are kept.
    pub fn resolve_path(&self, root: &str) -> String {
        if self.target.starts_with(PATH_SEPARATOR) {
            return self.target.to_string();
        }
        let mut path = String::with_capacity(root.len() + 1 + self.target.len());
        path.push_str(root);
        path.push(PATH_SEPARATOR);
        path.push_str(&self.target);
        path
    }
}

impl Serialize for Relationship {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Relationship", 3)?;
        state.serialize_field("id", self.id.as_str())?;
        state.serialize_field("type", self.schema_type.name())?;
        state.serialize_field("target", self.target.as_str())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KnownSchema;
    use pretty_assertions::assert_eq;

    const WORKSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

    #[test]
    fn test_resolve_relative_path() {
        let rel = Relationship::new("rId1", WORKSHEET, "sheet1.xml");
        assert_eq!(rel.resolve_path("xl/worksheets"), "xl/worksheets/sheet1.xml");
    }

    #[test]
    fn test_resolve_rooted_path() {
        let rel = Relationship::new("rId1", WORKSHEET, "/xl/sheet1.xml");
        assert_eq!(rel.resolve_path("xl/worksheets"), "/xl/sheet1.xml");
    }

    #[test]
    fn test_resolve_keeps_parent_segments() {
        let rel = Relationship::new("rId3", "urn:image", "../media/image1.png");
        assert_eq!(rel.resolve_path("xl/drawings"), "xl/drawings/../media/image1.png");
    }

    #[test]
    fn test_decode_and_encode() {
        let catalog = SchemaCatalog::global();
        let raw = RawRelationship::new("rId1", WORKSHEET, "worksheets/sheet1.xml");
        let rel = Relationship::from_raw(&raw, catalog);
        assert_eq!(rel.schema_type, SchemaType::Known(KnownSchema::Worksheet));
        assert_eq!(rel.to_raw(catalog), raw);

        let raw = RawRelationship::new("rId2", "http://customschemas.contoso.com/foo", "x.xml");
        let rel = Relationship::from_raw(&raw, catalog);
        assert_eq!(rel.schema_type.unknown_schema(), Some("http://customschemas.contoso.com/foo"));
        assert_eq!(rel.to_raw_global(), raw);
    }

    #[test]
    fn test_serialize_renders_tag_name_or_uri() {
        let known = Relationship::new("rId1", WORKSHEET, "worksheets/sheet1.xml");
        let unknown = Relationship::new("rId2", "urn:custom", "custom.xml");
        assert_eq!(
            serde_json::to_value(&known).unwrap(),
            serde_json::json!({"id": "rId1", "type": "worksheet", "target": "worksheets/sheet1.xml"})
        );
        assert_eq!(
            serde_json::to_value(&unknown).unwrap(),
            serde_json::json!({"id": "rId2", "type": "urn:custom", "target": "custom.xml"})
        );
    }

    #[test]
    fn test_raw_record_uses_type_key() {
        let raw = RawRelationship::new("rId1", WORKSHEET, "sheet1.xml");
        let json = serde_json::to_string(&raw).unwrap();
        assert!(json.contains("\"type\":"));
        let back: RawRelationship = serde_json::from_str(&json).unwrap();
        assert_eq!(back, raw);
    }
}
