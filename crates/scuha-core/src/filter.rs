//! Filter and search predicates over the catalog

use std::fmt;

use crate::catalog::{Catalog, GameRecord};

/// Filter value that matches every game
pub const ALL: &str = "all";

/// Active filter from the filter bar. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    /// Matches a tag or a category name
    Value(String),
}

impl Filter {
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Filter::All
        } else {
            Filter::Value(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => ALL,
            Filter::Value(v) => v,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text search, stored lower-cased
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(text: &str) -> Self {
        Self(text.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn matches_filter(game: &GameRecord, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Value(value) => game.has_tag(value) || game.category.as_str() == value,
    }
}

pub fn matches_search(game: &GameRecord, term: &SearchTerm) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.as_str();
    game.title.to_lowercase().contains(needle)
        || game.description.to_lowercase().contains(needle)
        || game.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

/// Games passing both the filter and the search, in catalog order
pub fn filter_records(catalog: &Catalog, filter: &Filter, term: &SearchTerm) -> Vec<GameRecord> {
    catalog
        .records()
        .iter()
        .filter(|g| matches_filter(g, filter) && matches_search(g, term))
        .cloned()
        .collect()
}

/// Number of games a filter would show with an empty search
pub fn count_matching(catalog: &Catalog, filter: &Filter) -> usize {
    catalog.records().iter().filter(|g| matches_filter(g, filter)).count()
}
