use crate::utils::get_timestamp;
use serde::Serialize;
use std::collections::BTreeMap;

/// Column holding the entry timestamp.
pub const TIMESTAMP: &str = "timestamp";
/// Column holding the entry text.
pub const TEXT: &str = "text";
/// Column flagging an entry as a task (`1`).
pub const TASK: &str = "task";
/// Column flagging a task as completed (`1`).
pub const COMPLETED: &str = "completed";

/// One timestamped journal line plus any extra columns.
///
/// Extra fields with an empty value are equivalent to absent ones: the
/// store writes missing fields as empty cells and drops empty cells when
/// reading rows back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub timestamp: String,
    pub text: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Entry {
    pub fn new(timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            text: text.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Entry stamped with the current local time.
    pub fn now(text: impl Into<String>) -> Self {
        Self::new(get_timestamp(), text)
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.insert(name.into(), value.to_string());
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            TIMESTAMP => Some(&self.timestamp),
            TEXT => Some(&self.text),
            _ => self
                .fields
                .get(name)
                .map(String::as_str)
                .filter(|v| !v.is_empty()),
        }
    }

    /// Numeric value of a flag column (`task`, `completed`, ...).
    ///
    /// Accepts `1` as well as `1.0`, which spreadsheet tools tend to write back.
    pub fn field_as_int(&self, name: &str) -> Option<i64> {
        let raw = self.field(name)?.trim();
        raw.parse::<i64>().ok().or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
    }

    pub fn is_task(&self) -> bool {
        self.field_as_int(TASK) == Some(1)
    }

    pub fn is_completed(&self) -> bool {
        self.field_as_int(COMPLETED) == Some(1)
    }

    /// Heartbeat entries carry no text.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// Extra fields that actually carry a value, in column-name order.
    pub fn extra_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(k, v)| !v.is_empty() && !is_base_column(k))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

pub fn is_base_column(name: &str) -> bool {
    name == TIMESTAMP || name == TEXT
}

/// An entry together with its current row index in the data file.
///
/// The position is only meaningful until the next rewrite of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub position: usize,
    #[serde(flatten)]
    pub entry: Entry,
}
