//! The static game catalog

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Top-level classification of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Action,
    Puzzle,
    Arcade,
    Strategy,
    Racing,
    Rpg,
    Sports,
    Adventure,
}

impl Category {
    /// Name used in filter values and stored data
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Action => "action",
            Category::Puzzle => "puzzle",
            Category::Arcade => "arcade",
            Category::Strategy => "strategy",
            Category::Racing => "racing",
            Category::Rpg => "rpg",
            Category::Sports => "sports",
            Category::Adventure => "adventure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single playable game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Thumbnail shown on the card
    pub image: String,
    /// Location of the playable build
    pub src: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Category,
    /// 0.0 to 5.0
    pub rating: f32,
    pub players: u32,
    /// 1 (easy) to 5 (hard)
    pub difficulty: u8,
}

impl GameRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Immutable, ordered list of games with unique ids
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<GameRecord>,
}

impl Catalog {
    pub fn new(records: Vec<GameRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for record in &records {
            if record.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// The games shipped with the site
    pub fn builtin() -> Self {
        Self {
            records: builtin_games(),
        }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&GameRecord> {
        self.records.iter().find(|g| g.id == id)
    }

    /// Values for the filter bar: "all", then every tag and category in the
    /// order they first appear.
    pub fn filter_options(&self) -> Vec<String> {
        let mut options = vec![crate::filter::ALL.to_string()];
        for record in &self.records {
            let values = record
                .tags
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(record.category.as_str()));
            for value in values {
                if !options.iter().any(|o| o == value) {
                    options.push(value.to_string());
                }
            }
        }
        options
    }

    /// Look up ids in order, skipping any the catalog no longer has
    pub fn resolve<'a, I>(&self, ids: I) -> Vec<GameRecord>
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter()
            .filter_map(|id| self.get(id))
            .cloned()
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn game(
    id: &str,
    title: &str,
    description: &str,
    image: &str,
    src: &str,
    tags: &[&str],
    category: Category,
    rating: f32,
    players: u32,
    difficulty: u8,
) -> GameRecord {
    GameRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        src: src.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        category,
        rating,
        players,
        difficulty,
    }
}

fn builtin_games() -> Vec<GameRecord> {
    vec![
        game(
            "2048",
            "2048",
            "Merge blocks to accumulate the highest number block",
            "../files/2048/thumb.png",
            "../files/2048/index.html",
            &["action", "adventure"],
            Category::Action,
            4.5,
            2340,
            3,
        ),
        game(
            "1v1.space",
            "1v1.Space",
            "1v1SPACE, similar to 1v1.LOL, an entertaining battle royale browser game.",
            "../files/1v1space/splash.png",
            "../files/1v1space/index.html",
            &["puzzle", "brain"],
            Category::Puzzle,
            4.8,
            1850,
            4,
        ),
        game(
            "slope",
            "Slope",
            "Slopein Around Slope Yah Woo!",
            "../files/slope/slope4.jpeg",
            "../files/slope/",
            &["racing", "arcade"],
            Category::Arcade,
            4.3,
            3420,
            3,
        ),
    ]
}
