#![forbid(unsafe_code)]

//! Case folding applied before similarity scoring.

use std::borrow::Cow;

/// Whether text is compared as-is or lowercased first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseFolding {
    /// Compare the strings exactly as given.
    Sensitive,
    /// Lowercase both sides (full Unicode lowercase mapping).
    #[default]
    Insensitive,
}

impl CaseFolding {
    /// `Sensitive` when `case_sensitive` is set, `Insensitive` otherwise.
    #[must_use]
    pub fn from_flag(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::Sensitive
        } else {
            Self::Insensitive
        }
    }
}

/// Apply `policy` to `text`, borrowing when nothing changes.
#[must_use]
pub fn fold(text: &str, policy: CaseFolding) -> Cow<'_, str> {
    match policy {
        CaseFolding::Sensitive => Cow::Borrowed(text),
        CaseFolding::Insensitive => {
            // Titlecase letters such as U+01C5 lowercase without being
            // `is_uppercase`, so ask the mapping itself.
            if text
                .chars()
                .any(|c| c.to_lowercase().ne(std::iter::once(c)))
            {
                Cow::Owned(text.to_lowercase())
            } else {
                Cow::Borrowed(text)
            }
        }
    }
}
