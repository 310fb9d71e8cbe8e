//! Ordered column set of the data file and the mapping between entries and rows.

use crate::models::entry::{Entry, TEXT, TIMESTAMP, is_base_column};
use csv::StringRecord;

/// Column names in header order. A well-formed data file starts with
/// `timestamp,text`; later columns appear in the order they were introduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::base()
    }
}

impl Schema {
    pub fn base() -> Self {
        Self {
            columns: vec![TIMESTAMP.to_string(), TEXT.to_string()],
        }
    }

    /// Schema of a single-entry file: base columns plus the entry's own fields.
    pub fn for_entry(entry: &Entry) -> Self {
        let mut schema = Self::base();
        let extra: Vec<String> = entry.extra_fields().map(|(k, _)| k.to_string()).collect();
        schema.extend(&extra);
        schema
    }

    pub fn from_header(header: &StringRecord) -> Self {
        let columns = header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                // spreadsheet exports may prepend a BOM to the first cell
                if i == 0 {
                    name.trim_start_matches('\u{feff}').to_string()
                } else {
                    name.to_string()
                }
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Columns `entry` needs that this schema lacks: missing base columns
    /// first, then the entry's extra fields in name order.
    pub fn missing_for(&self, entry: &Entry) -> Vec<String> {
        [TIMESTAMP, TEXT]
            .into_iter()
            .chain(entry.extra_fields().map(|(k, _)| k))
            .filter(|name| !self.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Append new columns, skipping any already present.
    pub fn extend(&mut self, names: &[String]) {
        for name in names {
            if !self.contains(name) {
                self.columns.push(name.clone());
            }
        }
    }

    pub fn header(&self) -> StringRecord {
        StringRecord::from(self.columns.clone())
    }

    /// Row for `entry` in column order; absent fields become empty cells.
    pub fn row_for(&self, entry: &Entry) -> Vec<String> {
        self.columns
            .iter()
            .map(|col| match col.as_str() {
                TIMESTAMP => entry.timestamp.clone(),
                TEXT => entry.text.clone(),
                other => entry.fields.get(other).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// Entry from a row; short rows are padded, long rows truncated.
    pub fn entry_from(&self, record: &StringRecord) -> Entry {
        let mut entry = Entry::new("", "");
        for (i, col) in self.columns.iter().enumerate() {
            let value = record.get(i).unwrap_or("");
            match col.as_str() {
                TIMESTAMP => entry.timestamp = value.to_string(),
                TEXT => entry.text = value.to_string(),
                other if !value.is_empty() && !is_base_column(other) => {
                    entry.fields.insert(other.to_string(), value.to_string());
                }
                _ => {}
            }
        }
        entry
    }

    /// Bring a row to exactly the header width.
    pub fn normalize(&self, record: &StringRecord) -> StringRecord {
        (0..self.columns.len())
            .map(|i| record.get(i).unwrap_or(""))
            .collect()
    }
}
