//! Display model for a game card

use crate::catalog::GameRecord;
use crate::error::CardError;

pub const MAX_STARS: u8 = 5;
pub const DIFFICULTY_LEVELS: usize = 5;

/// Rating broken down into star glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    pub fn from_rating(rating: f32) -> Self {
        let clamped = rating.clamp(0.0, MAX_STARS as f32);
        let full = clamped.floor() as u8;
        let half = full < MAX_STARS && clamped - full as f32 >= 0.5;
        let empty = MAX_STARS - full - half as u8;
        Self { full, half, empty }
    }
}

/// Everything the view needs to draw one card
#[derive(Debug, Clone, PartialEq)]
pub struct CardModel {
    pub record: GameRecord,
    pub favorited: bool,
    pub stars: StarRating,
    /// `true` for each lit difficulty dot
    pub difficulty_dots: [bool; DIFFICULTY_LEVELS],
    pub players_label: String,
}

impl CardModel {
    pub fn build(record: &GameRecord, favorited: bool) -> Result<Self, CardError> {
        if !record.rating.is_finite() || !(0.0..=MAX_STARS as f32).contains(&record.rating) {
            return Err(CardError::RatingOutOfRange {
                id: record.id.clone(),
                rating: record.rating,
            });
        }
        if !(1..=DIFFICULTY_LEVELS as u8).contains(&record.difficulty) {
            return Err(CardError::DifficultyOutOfRange {
                id: record.id.clone(),
                difficulty: record.difficulty,
            });
        }

        let mut difficulty_dots = [false; DIFFICULTY_LEVELS];
        for dot in difficulty_dots.iter_mut().take(record.difficulty as usize) {
            *dot = true;
        }

        Ok(Self {
            record: record.clone(),
            favorited,
            stars: StarRating::from_rating(record.rating),
            difficulty_dots,
            players_label: format_player_count(record.players),
        })
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }
}

/// Compact player count: 950, 2.3K, 1.2M
pub fn format_player_count(players: u32) -> String {
    fn compact(value: f64, suffix: &str) -> String {
        let text = format!("{:.1}", value);
        let text = text.strip_suffix(".0").unwrap_or(&text);
        format!("{}{}", text, suffix)
    }

    if players >= 1_000_000 {
        compact(players as f64 / 1_000_000.0, "M")
    } else if players >= 1_000 {
        compact(players as f64 / 1_000.0, "K")
    } else {
        players.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_star_breakdown() {
        assert_eq!(StarRating::from_rating(4.5), StarRating { full: 4, half: true, empty: 0 });
        assert_eq!(StarRating::from_rating(4.3), StarRating { full: 4, half: false, empty: 1 });
        assert_eq!(StarRating::from_rating(5.0), StarRating { full: 5, half: false, empty: 0 });
        assert_eq!(StarRating::from_rating(0.0), StarRating { full: 0, half: false, empty: 5 });
    }

    #[test]
    fn test_player_count_format() {
        assert_eq!(format_player_count(950), "950");
        assert_eq!(format_player_count(2340), "2.3K");
        assert_eq!(format_player_count(3420), "3.4K");
        assert_eq!(format_player_count(1000), "1K");
        assert_eq!(format_player_count(1_500_000), "1.5M");
    }

    #[test]
    fn test_build_card() {
        let catalog = Catalog::builtin();
        let card = CardModel::build(catalog.get("1v1.space").unwrap(), true).unwrap();
        assert!(card.favorited);
        assert_eq!(card.difficulty_dots, [true, true, true, true, false]);
        assert_eq!(card.players_label, "1.9K");
        assert_eq!(card.id(), "1v1.space");
    }

    #[test]
    fn test_bad_records_rejected() {
        let mut record = Catalog::builtin().records()[0].clone();
        record.rating = 7.5;
        assert!(matches!(
            CardModel::build(&record, false),
            Err(CardError::RatingOutOfRange { .. })
        ));

        record.rating = 4.0;
        record.difficulty = 0;
        assert!(matches!(
            CardModel::build(&record, false),
            Err(CardError::DifficultyOutOfRange { .. })
        ));
    }
}
