//! Checkbox items embedded in entry text:
//! `- [ ] open item`, `- [x] done item` (`X` is accepted too).

use regex::Regex;
use std::sync::LazyLock;

static CHECKBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s*\[([ xX])\]\s*(.*?)$").expect("checkbox pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkbox<'a> {
    pub checked: bool,
    pub content: &'a str,
}

pub fn parse(text: &str) -> Option<Checkbox<'_>> {
    let caps = CHECKBOX_RE.captures(text)?;
    let mark = caps.get(1)?.as_str();
    let content = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some(Checkbox {
        checked: mark.eq_ignore_ascii_case("x"),
        content,
    })
}

pub fn is_checkbox(text: &str) -> bool {
    parse(text).is_some()
}

pub fn unchecked(content: &str) -> String {
    format!("- [ ] {}", content)
}

pub fn checked(content: &str) -> String {
    format!("- [x] {}", content)
}

/// Flip the mark; `None` when `text` is not a checkbox.
/// The result is normalised to `- [x] content` / `- [ ] content`.
pub fn toggle(text: &str) -> Option<String> {
    let cb = parse(text)?;
    Some(if cb.checked {
        unchecked(cb.content)
    } else {
        checked(cb.content)
    })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub checked: usize,
}

impl Summary {
    pub fn unchecked(&self) -> usize {
        self.total - self.checked
    }

    /// Completion percentage rounded to one decimal.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.checked as f64 / self.total as f64 * 1000.0).round() / 10.0
    }
}

pub fn summarize<'a>(texts: impl IntoIterator<Item = &'a str>) -> Summary {
    texts
        .into_iter()
        .filter_map(parse)
        .fold(Summary::default(), |mut s, cb| {
            s.total += 1;
            if cb.checked {
                s.checked += 1;
            }
            s
        })
}
