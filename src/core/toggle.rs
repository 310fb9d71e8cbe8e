use crate::errors::{AppError, AppResult};
use crate::models::checkbox;
use crate::store::EntryStore;

/// What `toggle` should act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleTarget {
    /// Row position as shown by `list`.
    Position(usize),
    /// Most recent checkbox whose text contains this (case-insensitive).
    Pattern(String),
}

impl ToggleTarget {
    pub fn parse(arg: &str) -> Option<Self> {
        let arg = arg.trim();
        if arg.is_empty() {
            return None;
        }
        match arg.parse::<usize>() {
            Ok(p) if arg.bytes().all(|b| b.is_ascii_digit()) => Some(Self::Position(p)),
            _ => Some(Self::Pattern(arg.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    pub position: usize,
    pub checked: bool,
    pub content: String,
}

pub struct ToggleLogic;

impl ToggleLogic {
    pub fn apply(store: &EntryStore, target: &ToggleTarget) -> AppResult<Toggled> {
        let records = store.read(None);

        let (position, text) = match target {
            ToggleTarget::Position(p) => {
                let rec = records
                    .iter()
                    .find(|r| r.position == *p)
                    .ok_or(AppError::InvalidPosition(*p))?;
                if !checkbox::is_checkbox(&rec.entry.text) {
                    return Err(AppError::NotACheckbox(*p));
                }
                (rec.position, rec.entry.text.clone())
            }
            ToggleTarget::Pattern(pattern) => {
                let needle = pattern.to_lowercase();
                let rec = records
                    .iter()
                    .rev()
                    .find(|r| {
                        checkbox::is_checkbox(&r.entry.text)
                            && r.entry.text.to_lowercase().contains(&needle)
                    })
                    .ok_or_else(|| {
                        AppError::EntryNotFound(format!("no checkbox matching '{}'", pattern))
                    })?;
                (rec.position, rec.entry.text.clone())
            }
        };

        let new_text = checkbox::toggle(&text).ok_or(AppError::NotACheckbox(position))?;
        if !store.update(position, &new_text) {
            return Err(AppError::WriteFailed(format!("toggle of entry #{}", position)));
        }

        let cb = checkbox::parse(&new_text).ok_or(AppError::NotACheckbox(position))?;
        Ok(Toggled {
            position,
            checked: cb.checked,
            content: cb.content.to_string(),
        })
    }
}
