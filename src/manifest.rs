//! Reading and writing `.rels` manifest parts.

use crate::relationship::RawRelationship;
use crate::{Error, Result};
use compact_str::CompactString;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::path::Path;

/// Namespace of the `<Relationships>` root element.
pub const RELATIONSHIPS_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

const RELS_DIR: &str = "_rels";
const RELS_EXT: &str = ".rels";

pub struct ManifestReader {
    strict: bool,
}

impl Default for ManifestReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestReader {
    pub fn new() -> Self {
        Self { strict: true }
    }

    /// In lenient mode elements missing `Id`, `Type` or `Target` are skipped.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<RawRelationship>> {
        let content = std::fs::read(path)?;
        self.read_bytes(&content)
    }

    pub fn read_bytes(&self, data: &[u8]) -> Result<Vec<RawRelationship>> {
        // Skip BOM if present
        let data = if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
            &data[3..]
        } else {
            data
        };

        let text = std::str::from_utf8(data)
            .map_err(|_| Error::Parse("Invalid UTF-8 in relationships part".to_string()))?;
        self.read_str(text)
    }

    pub fn read_str(&self, xml: &str) -> Result<Vec<RawRelationship>> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut saw_root = false;
        let mut in_root = false;
        let mut depth = 0usize;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    if depth == 0 && e.local_name().as_ref() == b"Relationships" {
                        saw_root = true;
                        in_root = true;
                    } else if let Some(record) = self.read_child(e, depth, in_root)? {
                        records.push(record);
                    }
                    depth += 1;
                }
                Event::Empty(ref e) => {
                    if depth == 0 && e.local_name().as_ref() == b"Relationships" {
                        saw_root = true;
                    } else if let Some(record) = self.read_child(e, depth, in_root)? {
                        records.push(record);
                    }
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        in_root = false;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(Error::Parse("missing <Relationships> root element".to_string()));
        }
        Ok(records)
    }

    /// Only `Relationship` elements directly under the root are records.
    fn read_child(
        &self,
        e: &BytesStart<'_>,
        depth: usize,
        in_root: bool,
    ) -> Result<Option<RawRelationship>> {
        if e.local_name().as_ref() != b"Relationship" {
            return Ok(None);
        }
        if !in_root || depth != 1 {
            tracing::warn!(depth, "ignoring relationship element outside the root");
            return Ok(None);
        }
        self.read_element(e)
    }

    fn read_element(&self, e: &BytesStart<'_>) -> Result<Option<RawRelationship>> {
        let mut id = None;
        let mut type_uri = None;
        let mut target = None;

        for attr in e.attributes() {
            let attr = attr?;
            match attr.key.local_name().as_ref() {
                b"Id" => id = Some(CompactString::from(attr.unescape_value()?.as_ref())),
                b"Type" => type_uri = Some(attr.unescape_value()?.into_owned()),
                b"Target" => target = Some(CompactString::from(attr.unescape_value()?.as_ref())),
                _ => {
                    let name = String::from_utf8_lossy(attr.key.as_ref());
                    let value = attr.unescape_value()?;
                    tracing::warn!(
                        attribute = %name,
                        %value,
                        "discarding unsupported relationship attribute"
                    );
                }
            }
        }

        match (id, type_uri, target) {
            (Some(id), Some(type_uri), Some(target)) => {
                Ok(Some(RawRelationship { id, type_uri, target }))
            }
            (id, type_uri, _) => {
                let attribute = if id.is_none() {
                    "Id"
                } else if type_uri.is_none() {
                    "Type"
                } else {
                    "Target"
                };
                if self.strict {
                    return Err(Error::MissingAttribute { attribute });
                }
                tracing::warn!(?id, attribute, "skipping incomplete relationship element");
                Ok(None)
            }
        }
    }
}

pub struct ManifestWriter {
    indent: Option<usize>,
}

impl Default for ManifestWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestWriter {
    pub fn new() -> Self {
        Self { indent: None }
    }

    pub fn with_indent(mut self, spaces: usize) -> Self {
        self.indent = Some(spaces);
        self
    }

    pub fn write(&self, records: &[RawRelationship]) -> Result<String> {
        let buffer = Vec::with_capacity(128 + records.len() * 160);
        let mut writer = match self.indent {
            Some(spaces) => Writer::new_with_indent(buffer, b' ', spaces),
            None => Writer::new(buffer),
        };

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut root = BytesStart::new("Relationships");
        root.push_attribute(("xmlns", RELATIONSHIPS_NAMESPACE));
        if records.is_empty() {
            writer.write_event(Event::Empty(root))?;
        } else {
            writer.write_event(Event::Start(root))?;
            for record in records {
                let mut element = BytesStart::new("Relationship");
                element.push_attribute(escaped_attribute("Id", &record.id));
                element.push_attribute(escaped_attribute("Type", &record.type_uri));
                element.push_attribute(escaped_attribute("Target", &record.target));
                writer.write_event(Event::Empty(element))?;
            }
            writer.write_event(Event::End(BytesEnd::new("Relationships")))?;
        }

        String::from_utf8(writer.into_inner())
            .map_err(|e| Error::Parse(format!("manifest is not UTF-8: {e}")))
    }
}

/// Attribute with markup and whitespace escaped. A raw tab, newline or carriage
/// return would be normalised to a space by other XML readers.
fn escaped_attribute<'a>(key: &'a str, value: &str) -> Attribute<'a> {
    let mut escaped = String::with_capacity(value.len());
    for c in escape(value).chars() {
        match c {
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            _ => escaped.push(c),
        }
    }
    Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(escaped.into_bytes()),
    }
}

/// Manifest part describing `part`: `xl/workbook.xml` -> `xl/_rels/workbook.xml.rels`.
pub fn rels_part_path(part: &str) -> String {
    let part = part.trim_start_matches('/');
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/{RELS_DIR}/{file}{RELS_EXT}"),
        None => format!("{RELS_DIR}/{part}{RELS_EXT}"),
    }
}

/// Directory that relative targets in `part`'s manifest resolve against.
pub fn part_directory(part: &str) -> &str {
    let part = part.trim_start_matches('/');
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}
