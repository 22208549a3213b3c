use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;

/// Description used whenever metadata cannot be retrieved
pub const NO_DESCRIPTION: &str = "No description available";

/// Lowercased search words, derived once from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    words: Vec<String>,
}

impl SearchQuery {
    /// Build a query from raw terms. Returns `None` when no word remains
    /// after splitting on whitespace.
    pub fn parse<S: AsRef<str>>(terms: &[S]) -> Option<Self> {
        let words: Vec<String> = terms
            .iter()
            .flat_map(|term| term.as_ref().split_whitespace())
            .map(str::to_lowercase)
            .collect();

        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_multi_word(&self) -> bool {
        self.words.len() > 1
    }

    /// Words joined by single spaces
    pub fn joined(&self) -> String {
        self.words.join(" ")
    }

    /// True when `name`, lowercased, equals the whole query
    pub fn is_exact(&self, name: &str) -> bool {
        name.to_lowercase() == self.joined()
    }

    /// Number of distinct query words found in `name`
    pub fn match_score(&self, name: &str) -> usize {
        let lower = name.to_lowercase();
        let mut seen: Vec<&str> = Vec::with_capacity(self.words.len());
        for word in &self.words {
            if !seen.contains(&word.as_str()) && lower.contains(word.as_str()) {
                seen.push(word);
            }
        }
        seen.len()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// One ranked package and its (possibly placeholder) description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub name: String,
    pub score: usize,
    pub exact: bool,
    pub description: String,
}

impl MatchResult {
    pub fn new(name: String, query: &SearchQuery) -> Self {
        Self {
            score: query.match_score(&name),
            exact: query.is_exact(&name),
            name,
            description: NO_DESCRIPTION.to_string(),
        }
    }
}

/// Filter and order package names against a query, keeping at most `count`.
///
/// Exact matches come first in listing order. The rest are sorted by name
/// for single-word queries, or by descending match score then name for
/// multi-word queries. A name qualifies if it contains any query word.
pub fn rank<S: AsRef<str>>(names: &[S], query: &SearchQuery, count: usize) -> Vec<String> {
    let joined = query.joined();
    let mut exact = Vec::new();
    let mut partial: Vec<(usize, String, &str)> = Vec::new();

    for name in names {
        let name = name.as_ref();
        let lower = name.to_lowercase();
        let score = query.match_score(name);
        if score == 0 {
            continue;
        }
        if lower == joined {
            exact.push(name.to_string());
        } else {
            partial.push((score, lower, name));
        }
    }

    if query.is_multi_word() {
        partial.sort_by(|a, b| {
            Reverse(a.0)
                .cmp(&Reverse(b.0))
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| a.2.cmp(b.2))
        });
    } else {
        partial.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.2.cmp(b.2)));
    }

    exact
        .into_iter()
        .chain(partial.into_iter().map(|(_, _, name)| name.to_string()))
        .take(count)
        .collect()
}
