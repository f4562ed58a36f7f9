//! Keyword filter used to pick payment-related messages out of the inbox.
//!
//! A body matches when it contains at least one keyword as a substring.
//! Matching is case-sensitive unless the filter was built with
//! [`KeywordFilter::case_insensitive`], in which case ASCII letters are folded
//! the same way SQLite's `LIKE` folds them.

use crate::error::{Error, Result};

/// Keywords of the default payment heuristic, in selection order.
pub const PAYMENT_KEYWORDS: [&str; 4] = ["Rs.", "INR", "paid to", "sent to"];

const LIKE_ESCAPE: char = '\\';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
    case_sensitive: bool,
}

impl KeywordFilter {
    /// Build a case-sensitive filter. Duplicates are dropped, first occurrence wins.
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.into();
            if keyword.is_empty() {
                return Err(Error::config("filter keyword must not be empty"));
            }
            if !unique.contains(&keyword) {
                unique.push(keyword);
            }
        }
        if unique.is_empty() {
            return Err(Error::config("filter needs at least one keyword"));
        }
        Ok(Self {
            keywords: unique,
            case_sensitive: true,
        })
    }

    /// The `Rs.` / `INR` / `paid to` / `sent to` heuristic.
    pub fn payment() -> Self {
        Self {
            keywords: PAYMENT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            case_sensitive: true,
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches(&self, body: &str) -> bool {
        if self.case_sensitive {
            self.keywords.iter().any(|k| body.contains(k.as_str()))
        } else {
            let folded = body.to_ascii_lowercase();
            self.keywords
                .iter()
                .any(|k| folded.contains(&k.to_ascii_lowercase()))
        }
    }

    /// SQL selection over `column` plus its positional arguments.
    ///
    /// `LIKE` ignores ASCII case, so in case-sensitive mode the selection is a
    /// superset of [`matches`](Self::matches) and callers re-check each body.
    pub fn like_selection(&self, column: &str) -> (String, Vec<String>) {
        let clause = format!("{} LIKE ? ESCAPE '{}'", column, LIKE_ESCAPE);
        let selection = vec![clause; self.keywords.len()].join(" OR ");
        let args = self
            .keywords
            .iter()
            .map(|k| format!("%{}%", escape_like(k)))
            .collect();
        (format!("({})", selection), args)
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::payment()
    }
}

fn escape_like(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if c == LIKE_ESCAPE || c == '%' || c == '_' {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}
