//! Bidirectional table between schema URIs and known tags.

use crate::schema::{KnownSchema, SchemaType};
use crate::{Error, Result};
use ahash::AHashMap;
use compact_str::CompactString;
use once_cell::sync::Lazy;

/// Registered type URIs. Adding a tag means adding exactly one row here.
pub static CATALOG_ENTRIES: &[(KnownSchema, &str)] = &[
    (KnownSchema::Worksheet, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet"),
    (KnownSchema::Chartsheet, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chartsheet"),
    (KnownSchema::SharedStrings, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings"),
    (KnownSchema::Styles, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles"),
    (KnownSchema::Theme, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme"),
    (KnownSchema::CalcChain, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/calcChain"),
    (KnownSchema::OfficeDocument, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument"),
    (KnownSchema::ExtendedProperties, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties"),
    (KnownSchema::CoreProperties, "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties"),
    (KnownSchema::CorePropertiesLegacy, "http://schemas.openxmlformats.org/officedocument/2006/relationships/metadata/core-properties"),
    (KnownSchema::Connections, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/connections"),
    (KnownSchema::PivotCache, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/pivotCacheDefinition"),
    (KnownSchema::MetadataThumbnail, "http://schemas.openxmlformats.org/package/2006/relationships/metadata/thumbnail"),
    (KnownSchema::CustomProperties, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/custom-properties"),
    (KnownSchema::ExternalLink, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/externalLink"),
    (KnownSchema::CustomXml, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/customXml"),
    (KnownSchema::Person, "http://schemas.microsoft.com/office/2017/10/relationships/person"),
    (KnownSchema::WebExtensionTaskPanes, "http://schemas.microsoft.com/office/2011/relationships/webextensiontaskpanes"),
    (KnownSchema::WpsCustomData, "http://www.wps.cn/officeDocument/2013/wpsCustomData"),
    (KnownSchema::SheetMetadata, "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sheetMetadata"),
    (KnownSchema::RichDataStructure, "http://schemas.microsoft.com/office/2017/06/relationships/rdRichValueStructure"),
    (KnownSchema::RichDataTypes, "http://schemas.microsoft.com/office/2017/06/relationships/rdRichValueTypes"),
    (KnownSchema::RichDataValue, "http://schemas.microsoft.com/office/2017/06/relationships/rdRichValue"),
    (KnownSchema::RichDataWebImage, "http://schemas.microsoft.com/office/2020/07/relationships/rdRichValueWebImage"),
    (KnownSchema::ClassificationLabels, "http://schemas.microsoft.com/office/2020/02/relationships/classificationlabels"),
];

static GLOBAL: Lazy<SchemaCatalog> = Lazy::new(|| {
    match SchemaCatalog::build(CATALOG_ENTRIES.iter().copied()) {
        Ok(catalog) => catalog,
        Err(e) => panic!("static relationship catalog is invalid: {e}"),
    }
});

pub struct SchemaCatalog {
    by_uri: AHashMap<CompactString, KnownSchema>,
    by_tag: AHashMap<KnownSchema, CompactString>,
    order: Vec<KnownSchema>,
}

impl SchemaCatalog {
    /// Builds both directions at once. A URI or tag that appears twice is
    /// rejected here rather than resolved arbitrarily on encode.
    pub fn build<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (KnownSchema, &'a str)>,
    {
        let entries = entries.into_iter();
        let (lower, _) = entries.size_hint();
        let mut by_uri = AHashMap::with_capacity(lower);
        let mut by_tag = AHashMap::with_capacity(lower);
        let mut order = Vec::with_capacity(lower);

        for (tag, uri) in entries {
            let uri = CompactString::from(uri);
            if let Some(previous) = by_uri.insert(uri.clone(), tag) {
                return Err(Error::CatalogInconsistency(format!(
                    "URI {uri} registered for both {previous} and {tag}"
                )));
            }
            if let Some(previous) = by_tag.insert(tag, uri.clone()) {
                return Err(Error::CatalogInconsistency(format!(
                    "tag {tag} registered under both {previous} and {uri}"
                )));
            }
            order.push(tag);
        }

        tracing::debug!(entries = order.len(), "built relationship schema catalog");
        Ok(Self { by_uri, by_tag, order })
    }

    /// Process-wide catalog over [`CATALOG_ENTRIES`].
    pub fn global() -> &'static SchemaCatalog {
        &GLOBAL
    }

    /// Never fails: URIs outside the table come back as [`SchemaType::Unknown`].
    /// Matching is exact and case-sensitive.
    pub fn resolve(&self, uri: &str) -> SchemaType {
        match self.by_uri.get(uri) {
            Some(tag) => SchemaType::Known(*tag),
            None => {
                tracing::debug!(uri, "unrecognised relationship type");
                SchemaType::Unknown(uri.to_string())
            }
        }
    }

    pub fn try_canonical_uri<'a>(&'a self, schema: &'a SchemaType) -> Result<&'a str> {
        match schema {
            SchemaType::Known(tag) => self
                .by_tag
                .get(tag)
                .map(CompactString::as_str)
                .ok_or_else(|| {
                    Error::CatalogInconsistency(format!("no URI registered for {tag}"))
                }),
            SchemaType::Unknown(uri) => Ok(uri.as_str()),
        }
    }

    /// URI to write back for `schema`.
    ///
    /// # Panics
    ///
    /// If `schema` is a known tag this catalog has no row for. The global
    /// catalog covers every tag.
    pub fn canonical_uri<'a>(&'a self, schema: &'a SchemaType) -> &'a str {
        match self.try_canonical_uri(schema) {
            Ok(uri) => uri,
            Err(e) => panic!("{e}"),
        }
    }

    #[inline]
    pub fn contains_uri(&self, uri: &str) -> bool {
        self.by_uri.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// (tag, URI) pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (KnownSchema, &str)> + '_ {
        self.order
            .iter()
            .filter_map(|tag| self.by_tag.get(tag).map(|uri| (*tag, uri.as_str())))
    }
}

impl std::fmt::Debug for SchemaCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
