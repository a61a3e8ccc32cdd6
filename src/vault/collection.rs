//! The in-memory vault: an ordered multiset of records.

use super::record::Record;

/// Records kept sorted by [`Record::key`].  Records with equal keys are
/// all kept, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vault {
    records: Vec<Record>,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert after any records with an equal key.
    pub fn insert(&mut self, record: Record) -> usize {
        let at = self
            .records
            .partition_point(|existing| existing.key() <= record.key());
        self.records.insert(at, record);
        at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Record> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Records whose service or login contains `keyword`, ignoring
    /// case.  An empty keyword matches everything.
    pub fn search<'a>(&'a self, keyword: &str) -> impl Iterator<Item = (usize, &'a Record)> + 'a {
        let needle = keyword.to_lowercase();
        self.records.iter().enumerate().filter(move |(_, record)| {
            [&record.service, &record.login]
                .iter()
                .any(|field| String::from_utf8_lossy(field).to_lowercase().contains(&needle))
        })
    }
}

impl FromIterator<Record> for Vault {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut vault = Vault::new();
        vault.extend(iter);
        vault
    }
}

impl Extend<Record> for Vault {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl IntoIterator for Vault {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Vault {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
