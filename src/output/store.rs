use crate::crawler::PageRecord;

/// Append-only, in-memory collection of page records for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    records: Vec<PageRecord>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record; records keep fetch order
    pub fn append(&mut self, record: PageRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
