//! The shareable address of the current loadout

use serde::{Deserialize, Serialize};

/// How a new query is written into the location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryMode {
    /// Overwrite the current entry
    #[default]
    Replace,
    /// Keep the previous address in the history
    Push,
}

/// Path plus query string, with a back-stack of earlier addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: String,
    /// Earlier (path, query) pairs, oldest first
    history: Vec<(String, String)>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            query: String::new(),
            history: Vec::new(),
        }
    }
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a full URL, a path with a query, or a bare query string.
    ///
    /// Fragments are discarded.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let input = input.split_once('#').map_or(input, |(before, _)| before);

        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, query),
            // `skills=...&perks=...` with no `?`
            None if input.contains('=') => ("", input),
            None => (input, ""),
        };

        Self {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query: query.to_string(),
            history: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string without the leading `?`
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Full address as it would appear in an address bar
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    /// Swap the query without adding a history entry
    pub fn replace(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Record the current address, then switch to the new query
    pub fn push(&mut self, query: impl Into<String>) {
        let previous = (self.path.clone(), std::mem::take(&mut self.query));
        self.history.push(previous);
        self.query = query.into();
    }

    pub fn apply(&mut self, mode: HistoryMode, query: impl Into<String>) {
        match mode {
            HistoryMode::Replace => self.replace(query),
            HistoryMode::Push => self.push(query),
        }
    }

    /// Number of entries including the current one
    pub fn history_len(&self) -> usize {
        self.history.len() + 1
    }

    /// Return to the previous address. Returns false at the oldest entry.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some((path, query)) => {
                self.path = path;
                self.query = query;
                true
            }
            None => false,
        }
    }
}
