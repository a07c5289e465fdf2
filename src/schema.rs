//! Relationship schema types.
//!
//! A relationship's `Type` attribute is an open-ended URI. The handful that
//! the format registry defines are modelled as [`KnownSchema`] tags; anything
//! else is carried verbatim in [`SchemaType::Unknown`] so it survives a
//! decode/encode round trip.

use crate::{Error, Result};
use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

/// Prefix of the dated vendor extension paths (`.../office/2020/...`).
pub const MODERN_VENDOR_SEGMENT: &str = "schemas.microsoft.com/office/20";

bitflags! {
    /// Classification bits attached to every known tag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SchemaTraits: u8 {
        const WORKSHEET = 1 << 0;
        const MODERN_FEATURE = 1 << 1;
        const DOCUMENT_PROPERTIES = 1 << 2;
        const RICH_DATA = 1 << 3;
        const VENDOR = 1 << 4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KnownSchema {
    Worksheet,
    Chartsheet,
    SharedStrings,
    Styles,
    Theme,
    CalcChain,
    OfficeDocument,
    ExtendedProperties,
    CoreProperties,
    /// Core properties under the lower-case `officedocument` namespace some
    /// producers emit.
    CorePropertiesLegacy,
    Connections,
    PivotCache,
    MetadataThumbnail,
    CustomProperties,
    ExternalLink,
    CustomXml,
    Person,
    WebExtensionTaskPanes,
    WpsCustomData,
    SheetMetadata,
    RichDataStructure,
    RichDataTypes,
    RichDataValue,
    RichDataWebImage,
    ClassificationLabels,
}

impl KnownSchema {
    pub const ALL: [KnownSchema; 25] = [
        KnownSchema::Worksheet,
        KnownSchema::Chartsheet,
        KnownSchema::SharedStrings,
        KnownSchema::Styles,
        KnownSchema::Theme,
        KnownSchema::CalcChain,
        KnownSchema::OfficeDocument,
        KnownSchema::ExtendedProperties,
        KnownSchema::CoreProperties,
        KnownSchema::CorePropertiesLegacy,
        KnownSchema::Connections,
        KnownSchema::PivotCache,
        KnownSchema::MetadataThumbnail,
        KnownSchema::CustomProperties,
        KnownSchema::ExternalLink,
        KnownSchema::CustomXml,
        KnownSchema::Person,
        KnownSchema::WebExtensionTaskPanes,
        KnownSchema::WpsCustomData,
        KnownSchema::SheetMetadata,
        KnownSchema::RichDataStructure,
        KnownSchema::RichDataTypes,
        KnownSchema::RichDataValue,
        KnownSchema::RichDataWebImage,
        KnownSchema::ClassificationLabels,
    ];

    /// Tag name used when rendering a known type.
    pub const fn name(self) -> &'static str {
        match self {
            KnownSchema::Worksheet => "worksheet",
            KnownSchema::Chartsheet => "chartsheet",
            KnownSchema::SharedStrings => "sharedStrings",
            KnownSchema::Styles => "styles",
            KnownSchema::Theme => "theme",
            KnownSchema::CalcChain => "calcChain",
            KnownSchema::OfficeDocument => "officeDocument",
            KnownSchema::ExtendedProperties => "extendedProperties",
            KnownSchema::CoreProperties => "coreProperties",
            KnownSchema::CorePropertiesLegacy => "corePropertiesLegacy",
            KnownSchema::Connections => "connections",
            KnownSchema::PivotCache => "pivotCache",
            KnownSchema::MetadataThumbnail => "metadataThumbnail",
            KnownSchema::CustomProperties => "customProperties",
            KnownSchema::ExternalLink => "externalLink",
            KnownSchema::CustomXml => "customXml",
            KnownSchema::Person => "person",
            KnownSchema::WebExtensionTaskPanes => "webExtensionTaskPanes",
            KnownSchema::WpsCustomData => "wpsCustomData",
            KnownSchema::SheetMetadata => "sheetMetadata",
            KnownSchema::RichDataStructure => "richDataStructure",
            KnownSchema::RichDataTypes => "richDataTypes",
            KnownSchema::RichDataValue => "richDataValue",
            KnownSchema::RichDataWebImage => "richDataWebImage",
            KnownSchema::ClassificationLabels => "classificationLabels",
        }
    }

    pub const fn traits(self) -> SchemaTraits {
        match self {
            KnownSchema::Worksheet | KnownSchema::Chartsheet => SchemaTraits::WORKSHEET,
            KnownSchema::ExtendedProperties
            | KnownSchema::CoreProperties
            | KnownSchema::CorePropertiesLegacy
            | KnownSchema::CustomProperties => SchemaTraits::DOCUMENT_PROPERTIES,
            KnownSchema::Person | KnownSchema::ClassificationLabels => {
                SchemaTraits::MODERN_FEATURE.union(SchemaTraits::VENDOR)
            }
            KnownSchema::RichDataStructure
            | KnownSchema::RichDataTypes
            | KnownSchema::RichDataWebImage => SchemaTraits::MODERN_FEATURE
                .union(SchemaTraits::RICH_DATA)
                .union(SchemaTraits::VENDOR),
            KnownSchema::RichDataValue => SchemaTraits::RICH_DATA.union(SchemaTraits::VENDOR),
            KnownSchema::WebExtensionTaskPanes
            | KnownSchema::WpsCustomData
            | KnownSchema::SheetMetadata => SchemaTraits::VENDOR,
            _ => SchemaTraits::empty(),
        }
    }
}

impl fmt::Display for KnownSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KnownSchema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        KnownSchema::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| Error::UnknownTag(s.to_string()))
    }
}

/// Semantic type of a relationship target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaType {
    Known(KnownSchema),
    /// A type URI the catalog does not recognise, kept as written.
    Unknown(String),
}

impl SchemaType {
    #[inline]
    pub fn is_known(&self) -> bool {
        matches!(self, SchemaType::Known(_))
    }

    #[inline]
    pub fn known(&self) -> Option<KnownSchema> {
        match self {
            SchemaType::Known(tag) => Some(*tag),
            SchemaType::Unknown(_) => None,
        }
    }

    /// The wrapped URI of an unrecognised type.
    pub fn unknown_schema(&self) -> Option<&str> {
        match self {
            SchemaType::Known(_) => None,
            SchemaType::Unknown(uri) => Some(uri.as_str()),
        }
    }

    pub fn is_worksheet_related(&self) -> bool {
        self.has_trait(SchemaTraits::WORKSHEET)
    }

    /// Office features introduced by newer vendor extensions. Unknown URIs
    /// qualify when they live under a dated vendor path.
    pub fn is_modern_office_feature(&self) -> bool {
        match self {
            SchemaType::Known(tag) => tag.traits().contains(SchemaTraits::MODERN_FEATURE),
            SchemaType::Unknown(uri) => uri.contains(MODERN_VENDOR_SEGMENT),
        }
    }

    pub fn is_document_properties(&self) -> bool {
        self.has_trait(SchemaTraits::DOCUMENT_PROPERTIES)
    }

    pub fn is_rich_data(&self) -> bool {
        self.has_trait(SchemaTraits::RICH_DATA)
    }

    /// Vendor extension or vendor metadata tags. Unknown types are never
    /// classified.
    pub fn is_vendor_extension(&self) -> bool {
        self.has_trait(SchemaTraits::VENDOR)
    }

    /// Tag name for known types, the raw URI otherwise.
    pub fn name(&self) -> &str {
        match self {
            SchemaType::Known(tag) => tag.name(),
            SchemaType::Unknown(uri) => uri.as_str(),
        }
    }

    fn has_trait(&self, flag: SchemaTraits) -> bool {
        self.known()
            .map(|tag| tag.traits().contains(flag))
            .unwrap_or(false)
    }
}

impl From<KnownSchema> for SchemaType {
    fn from(tag: KnownSchema) -> Self {
        SchemaType::Known(tag)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODERN: [KnownSchema; 5] = [
        KnownSchema::ClassificationLabels,
        KnownSchema::RichDataStructure,
        KnownSchema::RichDataTypes,
        KnownSchema::RichDataWebImage,
        KnownSchema::Person,
    ];

    #[test]
    fn test_known_predicates() {
        let sheet = SchemaType::from(KnownSchema::Worksheet);
        assert!(sheet.is_known());
        assert_eq!(sheet.unknown_schema(), None);
        assert_eq!(sheet.known(), Some(KnownSchema::Worksheet));

        let other = SchemaType::Unknown("urn:x".to_string());
        assert!(!other.is_known());
        assert_eq!(other.unknown_schema(), Some("urn:x"));
        assert_eq!(other.known(), None);
    }

    #[test]
    fn test_worksheet_related_only_for_sheets() {
        for tag in KnownSchema::ALL {
            let expected = matches!(tag, KnownSchema::Worksheet | KnownSchema::Chartsheet);
            assert_eq!(SchemaType::Known(tag).is_worksheet_related(), expected, "{tag}");
        }
        let unknown = SchemaType::Unknown("http://example.com/worksheet".to_string());
        assert!(!unknown.is_worksheet_related());
    }

    #[test]
    fn test_modern_feature_fixed_set() {
        for tag in KnownSchema::ALL {
            assert_eq!(
                SchemaType::Known(tag).is_modern_office_feature(),
                MODERN.contains(&tag),
                "{tag}"
            );
        }
    }

    #[test]
    fn test_modern_feature_unknown_uri() {
        let dated = SchemaType::Unknown(
            "http://schemas.microsoft.com/office/2022/11/relationships/FeaturePropertyBag".into(),
        );
        assert!(dated.is_modern_office_feature());

        let legacy = SchemaType::Unknown(
            "http://schemas.microsoft.com/office/relationships/something".into(),
        );
        assert!(!legacy.is_modern_office_feature());

        let foreign = SchemaType::Unknown("http://customschemas.contoso.com/foo".into());
        assert!(!foreign.is_modern_office_feature());
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            SchemaType::Known(KnownSchema::Styles),
            SchemaType::Known(KnownSchema::Styles)
        );
        assert_ne!(
            SchemaType::Known(KnownSchema::Styles),
            SchemaType::Known(KnownSchema::Theme)
        );
        assert_eq!(
            SchemaType::Unknown("a".into()),
            SchemaType::Unknown("a".into())
        );
        assert_ne!(
            SchemaType::Unknown("a".into()),
            SchemaType::Unknown("b".into())
        );
    }

    #[test]
    fn test_tag_names_parse_back() {
        for tag in KnownSchema::ALL {
            assert_eq!(tag.name().parse::<KnownSchema>().unwrap(), tag);
        }
        assert!(matches!(
            "Worksheet".parse::<KnownSchema>(),
            Err(Error::UnknownTag(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(SchemaType::from(KnownSchema::CalcChain).to_string(), "calcChain");
        assert_eq!(SchemaType::Unknown("urn:a".into()).to_string(), "urn:a");
    }

    #[test]
    fn test_document_properties() {
        assert!(SchemaType::from(KnownSchema::CorePropertiesLegacy).is_document_properties());
        assert!(!SchemaType::from(KnownSchema::Styles).is_document_properties());
    }

    #[test]
    fn test_rich_data_tags() {
        let rich: Vec<_> = KnownSchema::ALL
            .into_iter()
            .filter(|tag| SchemaType::Known(*tag).is_rich_data())
            .collect();
        assert_eq!(
            rich,
            vec![
                KnownSchema::RichDataStructure,
                KnownSchema::RichDataTypes,
                KnownSchema::RichDataValue,
                KnownSchema::RichDataWebImage,
            ]
        );
        assert!(!SchemaType::Unknown("urn:rdRichValue".into()).is_rich_data());
    }

    #[test]
    fn test_vendor_tags() {
        for tag in [
            KnownSchema::Person,
            KnownSchema::WebExtensionTaskPanes,
            KnownSchema::WpsCustomData,
            KnownSchema::SheetMetadata,
            KnownSchema::RichDataValue,
            KnownSchema::ClassificationLabels,
        ] {
            assert!(SchemaType::Known(tag).is_vendor_extension(), "{tag}");
        }
        assert!(!SchemaType::from(KnownSchema::Worksheet).is_vendor_extension());
        assert!(!SchemaType::Unknown("http://www.wps.cn/x".into()).is_vendor_extension());
    }
}
