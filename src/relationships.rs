use crate::catalog::SchemaCatalog;
use crate::relationship::{RawRelationship, Relationship};
use crate::schema::SchemaType;
use serde::Serialize;

/// Relationships of one manifest, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Relationships {
    items: Vec<Relationship>,
}

impl Relationships {
    pub fn new(items: Vec<Relationship>) -> Self {
        Self { items }
    }

    pub fn from_records<'a, I>(records: I, catalog: &SchemaCatalog) -> Self
    where
        I: IntoIterator<Item = &'a RawRelationship>,
    {
        let items = records
            .into_iter()
            .map(|raw| {
                let rel = Relationship::from_raw(raw, catalog);
                tracing::trace!(id = %rel.id, schema = %rel.schema_type, "decoded relationship");
                rel
            })
            .collect();
        Self { items }
    }

    pub fn from_records_global<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RawRelationship>,
    {
        Self::from_records(records, SchemaCatalog::global())
    }

    pub fn to_records(&self, catalog: &SchemaCatalog) -> Vec<RawRelationship> {
        self.items.iter().map(|rel| rel.to_raw(catalog)).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Relationship> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[Relationship] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relationship> {
        self.items.iter()
    }

    /// First entry carrying `id`. Ids are not checked for uniqueness.
    pub fn find(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|rel| rel.id == id)
    }

    pub fn of_type<'a>(
        &'a self,
        schema: &'a SchemaType,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.items.iter().filter(move |rel| &rel.schema_type == schema)
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Relationship> + '_ {
        self.items
            .iter()
            .filter(|rel| rel.schema_type.is_worksheet_related())
    }

    pub fn unknown(&self) -> impl Iterator<Item = &Relationship> + '_ {
        self.items.iter().filter(|rel| !rel.schema_type.is_known())
    }

    pub fn into_vec(self) -> Vec<Relationship> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Relationships {
    type Item = &'a Relationship;
    type IntoIter = std::slice::Iter<'a, Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Relationships {
    type Item = Relationship;
    type IntoIter = std::vec::IntoIter<Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Relationship> for Relationships {
    fn from_iter<I: IntoIterator<Item = Relationship>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
