//! Core value types shared by the reader, renderer and writer.

use std::collections::BTreeMap;

/// One interaction line from the source file, fields unquoted but otherwise verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRecord {
    pub atc1_code: String,
    pub name1: String,
    pub atc2_code: String,
    pub name2: String,
    pub info: String,
    pub mechanism: String,
    pub effect: String,
    pub measures: String,
    pub risk_grade: String,
}

impl InteractionRecord {
    /// The nine fields in source-file order.
    pub fn fields(&self) -> [&str; 9] {
        [
            &self.atc1_code,
            &self.name1,
            &self.atc2_code,
            &self.name2,
            &self.info,
            &self.mechanism,
            &self.effect,
            &self.measures,
            &self.risk_grade,
        ]
    }
}

/// Records grouped by their ATC1 key.
///
/// Keys are stored as they appear in the source and iterate in
/// lexicographic order; records keep file order within a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionGroup {
    groups: BTreeMap<String, Vec<InteractionRecord>>,
}

impl InteractionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: InteractionRecord) {
        self.groups
            .entry(record.atc1_code.clone())
            .or_default()
            .push(record);
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total records across all keys.
    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, key: &str) -> Option<&[InteractionRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[InteractionRecord])> {
        self.groups
            .iter()
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }
}

impl FromIterator<InteractionRecord> for InteractionGroup {
    fn from_iter<I: IntoIterator<Item = InteractionRecord>>(iter: I) -> Self {
        let mut group = InteractionGroup::new();
        for record in iter {
            group.push(record);
        }
        group
    }
}

/// One row of `interactionsdb`, minus the generated `_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub atc1: String,
    pub name1: String,
    pub atc2: String,
    pub name2: String,
    pub content: String,
}
