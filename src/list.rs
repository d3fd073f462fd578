//! Derives the visible notes for a query and sort mode.
//! Pure and synchronous; debouncing the query is the caller's job.

use crate::note::{Note, cmp_timestamps};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Pinned,
    Newest,
    Oldest,
    Az,
    Za,
}

impl SortMode {
    pub const ALL: [SortMode; 5] =
        [SortMode::Pinned, SortMode::Newest, SortMode::Oldest, SortMode::Az, SortMode::Za];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Pinned => "pinned",
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::Az => "az",
            SortMode::Za => "za",
        }
    }

    pub fn compare(self, a: &Note, b: &Note) -> Ordering {
        match self {
            SortMode::Pinned => b
                .pinned
                .cmp(&a.pinned)
                .then_with(|| cmp_timestamps(&b.updated_at, &a.updated_at)),
            SortMode::Newest => cmp_timestamps(&b.updated_at, &a.updated_at),
            SortMode::Oldest => cmp_timestamps(&a.updated_at, &b.updated_at),
            SortMode::Az => collate(&a.title, &b.title),
            SortMode::Za => collate(&b.title, &a.title),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown sort mode: {s} (use pinned|newest|oldest|az|za)"))
    }
}

pub fn derive(notes: &[Note], query: &str, sort: SortMode) -> Vec<Note> {
    let q = query.to_lowercase();
    let mut visible: Vec<Note> = notes.iter().filter(|n| n.matches(&q)).cloned().collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

/// Title ordering close to a default-locale collation. Letters compare by
/// base form first, ignoring accents and case; then unaccented sorts before
/// accented, and a lowercase form before its uppercase twin. Only identical
/// strings compare equal.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| a.chars().map(invert_case).cmp(b.chars().map(invert_case)))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn invert_case(c: char) -> char {
    if c.is_ascii_uppercase() {
        c.to_ascii_lowercase()
    } else if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else {
        c
    }
}
