//! Catalog manager: owns the browsing state and turns user events into render commands
//!
//! Every event handler runs the whole pipeline (filter, reset, first batch)
//! synchronously and returns the commands for the view to apply in order.
//! Card insertions are staggered by the view; each pending card carries the
//! generation it was produced in, and [`CatalogManager::commit`] refuses
//! cards from a generation that a newer filter or search has replaced.
//! Accepted cards are placed by their position in the results, so batches
//! whose timers overlap still end up in result order.

use std::collections::{BTreeSet, HashSet};

use crate::card::CardModel;
use crate::catalog::{Catalog, GameRecord};
use crate::config::CatalogConfig;
use crate::filter::{filter_records, Filter, SearchTerm};
use crate::pagination::Paginator;
use crate::persist::{KeyValueStore, Persistence};

/// State of the "load more" button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreControl {
    Hidden,
    /// `next` is how many cards the next click will add
    Visible { next: usize },
}

/// A card waiting for its staggered insertion
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCard {
    pub generation: u64,
    /// Index of the card's game in the filtered results
    pub position: usize,
    pub delay_ms: u32,
    pub card: CardModel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Remove every card and the empty-state message
    ClearGrid,
    InsertCard(PendingCard),
    /// Filter and search matched nothing
    ShowEmptyState,
    LoadMore(LoadMoreControl),
    /// Update one card's favorite marker in place
    FavoriteChanged { id: String, favorited: bool },
    /// Hand the game to the launcher
    Launch(GameRecord),
    /// Warm the cache for a game's playable build
    Prefetch(String),
}

pub struct CatalogManager<S> {
    catalog: Catalog,
    config: CatalogConfig,
    filter: Filter,
    search: SearchTerm,
    pager: Paginator,
    persistence: Persistence<S>,
    generation: u64,
    /// Result positions committed to the grid in this generation
    placed: BTreeSet<usize>,
    prefetched: HashSet<String>,
}

impl<S: KeyValueStore> CatalogManager<S> {
    pub fn new(catalog: Catalog, store: S, config: CatalogConfig) -> Self {
        let persistence = Persistence::new(store, &config);
        let mut pager = Paginator::new(config.batch_size);
        pager.replace(filter_records(&catalog, &Filter::All, &SearchTerm::default()));
        Self {
            catalog,
            config,
            filter: Filter::All,
            search: SearchTerm::default(),
            pager,
            persistence,
            generation: 0,
            placed: BTreeSet::new(),
            prefetched: HashSet::new(),
        }
    }

    /// First render of the page
    pub fn init(&mut self) -> Vec<RenderCommand> {
        tracing::info!("Catalog ready with {} games", self.catalog.len());
        self.recompute()
    }

    pub fn set_search(&mut self, text: &str) -> Vec<RenderCommand> {
        self.search = SearchTerm::new(text);
        self.recompute()
    }

    pub fn clear_search(&mut self) -> Vec<RenderCommand> {
        self.set_search("")
    }

    /// Make `value` the single active filter ("all" clears it)
    pub fn select_filter(&mut self, value: &str) -> Vec<RenderCommand> {
        self.filter = Filter::parse(value);
        self.recompute()
    }

    pub fn load_more(&mut self) -> Vec<RenderCommand> {
        tracing::debug!(
            "Loading more: {} of {} shown",
            self.pager.rendered_count(),
            self.pager.len()
        );
        self.batch_commands()
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Vec<RenderCommand> {
        if self.catalog.get(id).is_none() {
            tracing::warn!("Favorite toggled for unknown game: {}", id);
            return Vec::new();
        }
        let favorited = self.persistence.toggle_favorite(id);
        tracing::debug!("Favorite {} -> {}", id, favorited);
        vec![RenderCommand::FavoriteChanged {
            id: id.to_string(),
            favorited,
        }]
    }

    pub fn play(&mut self, id: &str) -> Vec<RenderCommand> {
        let Some(record) = self.catalog.get(id).cloned() else {
            tracing::warn!("Play requested for unknown game: {}", id);
            return Vec::new();
        };
        self.persistence.record_played(id);
        tracing::info!("Playing game: {}", record.title);
        vec![RenderCommand::Launch(record)]
    }

    /// Prefetch a game's build the first time its card is hovered
    pub fn preload(&mut self, id: &str) -> Vec<RenderCommand> {
        let Some(record) = self.catalog.get(id) else {
            tracing::warn!("Preload requested for unknown game: {}", id);
            return Vec::new();
        };
        if !self.prefetched.insert(record.id.clone()) {
            return Vec::new();
        }
        vec![RenderCommand::Prefetch(record.src.clone())]
    }

    /// Accept a staggered card when its timer fires. Returns the grid index to
    /// insert it at, or `None` for cards produced before the latest
    /// filter/search change. The favorite flag is refreshed in case it was
    /// toggled while the card was pending.
    pub fn commit(&mut self, pending: PendingCard) -> Option<(usize, CardModel)> {
        if pending.generation != self.generation {
            tracing::debug!(
                "Dropping stale card {} (generation {} < {})",
                pending.card.id(),
                pending.generation,
                self.generation
            );
            return None;
        }
        if !self.placed.insert(pending.position) {
            tracing::debug!("Card {} already placed", pending.card.id());
            return None;
        }
        let index = self.placed.range(..pending.position).count();
        let mut card = pending.card;
        card.favorited = self.persistence.is_favorite(card.id());
        Some((index, card))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn active_filter(&self) -> &Filter {
        &self.filter
    }

    pub fn search_term(&self) -> &SearchTerm {
        &self.search
    }

    pub fn filter_options(&self) -> Vec<String> {
        self.catalog.filter_options()
    }

    pub fn results(&self) -> &[GameRecord] {
        self.pager.results()
    }

    pub fn result_count(&self) -> usize {
        self.pager.len()
    }

    pub fn rendered_count(&self) -> usize {
        self.pager.rendered_count()
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.persistence.is_favorite(id)
    }

    /// Favorited games in the order they were favorited
    pub fn favorite_games(&self) -> Vec<GameRecord> {
        self.catalog.resolve(self.persistence.favorites())
    }

    /// Played games, most recent first
    pub fn recently_played_games(&self) -> Vec<GameRecord> {
        self.catalog.resolve(self.persistence.recently_played())
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    fn recompute(&mut self) -> Vec<RenderCommand> {
        self.generation += 1;
        self.placed.clear();
        let results = filter_records(&self.catalog, &self.filter, &self.search);
        tracing::debug!(
            "Filter '{}' search '{}' matched {} games",
            self.filter,
            self.search.as_str(),
            results.len()
        );
        self.pager.replace(results);

        let mut commands = vec![RenderCommand::ClearGrid];
        commands.extend(self.batch_commands());
        if self.pager.is_empty() {
            commands.push(RenderCommand::ShowEmptyState);
        }
        commands
    }

    fn load_more_control(&self) -> LoadMoreControl {
        if self.pager.has_more() {
            LoadMoreControl::Visible {
                next: self.pager.next_batch_len(),
            }
        } else {
            LoadMoreControl::Hidden
        }
    }

    fn batch_commands(&mut self) -> Vec<RenderCommand> {
        let first = self.pager.rendered_count();
        let batch = self.pager.next_batch().to_vec();
        let mut commands = Vec::with_capacity(batch.len() + 1);
        for (index, record) in batch.iter().enumerate() {
            match CardModel::build(record, self.persistence.is_favorite(&record.id)) {
                Ok(card) => commands.push(RenderCommand::InsertCard(PendingCard {
                    generation: self.generation,
                    position: first + index,
                    delay_ms: stagger_delay(index, self.config.stagger_ms),
                    card,
                })),
                Err(e) => tracing::error!("Skipping card: {}", e),
            }
        }
        commands.push(RenderCommand::LoadMore(self.load_more_control()));
        commands
    }
}

/// Delay for the `index`-th card of a batch, saturating instead of overflowing
fn stagger_delay(index: usize, stagger_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(stagger_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::persist::MemoryStore;

    fn manager() -> CatalogManager<MemoryStore> {
        CatalogManager::new(Catalog::builtin(), MemoryStore::new(), CatalogConfig::default())
    }

    fn manager_with_batch(batch_size: usize) -> CatalogManager<MemoryStore> {
        let config = CatalogConfig {
            batch_size,
            ..CatalogConfig::default()
        };
        CatalogManager::new(Catalog::builtin(), MemoryStore::new(), config)
    }

    fn pending(commands: &[RenderCommand]) -> Vec<PendingCard> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::InsertCard(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    fn inserted_ids(commands: &[RenderCommand]) -> Vec<String> {
        pending(commands).into_iter().map(|p| p.card.record.id).collect()
    }

    fn empty_signals(commands: &[RenderCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::ShowEmptyState))
            .count()
    }

    fn load_more_state(commands: &[RenderCommand]) -> Option<LoadMoreControl> {
        commands.iter().rev().find_map(|c| match c {
            RenderCommand::LoadMore(state) => Some(*state),
            _ => None,
        })
    }

    #[test]
    fn test_init_renders_first_batch() {
        let mut m = manager();
        let commands = m.init();
        assert_eq!(commands[0], RenderCommand::ClearGrid);
        assert_eq!(inserted_ids(&commands), vec!["2048", "1v1.space", "slope"]);
        assert_eq!(load_more_state(&commands), Some(LoadMoreControl::Hidden));
        assert_eq!(empty_signals(&commands), 0);
        assert_eq!(m.rendered_count(), 3);
    }

    #[test]
    fn test_insertions_are_staggered() {
        let mut m = manager();
        let delays: Vec<u32> = pending(&m.init()).iter().map(|p| p.delay_ms).collect();
        assert_eq!(delays, vec![0, 100, 200]);
    }

    #[test]
    fn test_search_slope() {
        let mut m = manager();
        m.init();
        let commands = m.set_search("SLOPE");
        assert_eq!(inserted_ids(&commands), vec!["slope"]);
        assert_eq!(m.search_term().as_str(), "slope");
        assert_eq!(m.result_count(), 1);
    }

    #[test]
    fn test_zero_results_signal_empty_state_once() {
        let mut m = manager();
        m.init();
        let commands = m.set_search("no such game");
        assert_eq!(empty_signals(&commands), 1);
        assert!(inserted_ids(&commands).is_empty());
        assert_eq!(load_more_state(&commands), Some(LoadMoreControl::Hidden));

        let commands = m.clear_search();
        assert_eq!(empty_signals(&commands), 0);
        assert_eq!(inserted_ids(&commands).len(), 3);
    }

    #[test]
    fn test_filter_selection_is_exclusive() {
        let mut m = manager();
        m.init();
        m.select_filter("puzzle");
        let commands = m.select_filter("racing");
        assert_eq!(m.active_filter(), &Filter::Value("racing".to_string()));
        assert_eq!(inserted_ids(&commands), vec!["slope"]);

        let commands = m.select_filter("all");
        assert_eq!(m.active_filter(), &Filter::All);
        assert_eq!(inserted_ids(&commands).len(), 3);
    }

    #[test]
    fn test_filter_and_search_combine() {
        let mut m = manager();
        m.init();
        m.select_filter("action");
        let commands = m.set_search("slope");
        assert_eq!(empty_signals(&commands), 1);
    }

    #[test]
    fn test_load_more_pages_through_results() {
        let mut m = manager_with_batch(2);
        let commands = m.init();
        assert_eq!(inserted_ids(&commands), vec!["2048", "1v1.space"]);
        assert_eq!(
            load_more_state(&commands),
            Some(LoadMoreControl::Visible { next: 1 })
        );
        assert!(m.has_more());

        let commands = m.load_more();
        assert!(!commands.contains(&RenderCommand::ClearGrid));
        assert_eq!(inserted_ids(&commands), vec!["slope"]);
        assert_eq!(load_more_state(&commands), Some(LoadMoreControl::Hidden));

        let commands = m.load_more();
        assert!(inserted_ids(&commands).is_empty());
        assert_eq!(m.rendered_count(), 3);
    }

    #[test]
    fn test_filter_change_resets_pagination() {
        let mut m = manager_with_batch(1);
        m.init();
        m.load_more();
        assert_eq!(m.rendered_count(), 2);
        m.set_search("e");
        assert_eq!(m.rendered_count(), 1);
    }

    #[test]
    fn test_stale_cards_are_dropped() {
        let mut m = manager_with_batch(1);
        let old = pending(&m.init());
        let more = pending(&m.load_more());
        let new = pending(&m.set_search("slope"));

        for card in old.into_iter().chain(more) {
            assert!(m.commit(card).is_none());
        }
        let committed: Vec<(usize, CardModel)> =
            new.into_iter().filter_map(|p| m.commit(p)).collect();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].0, 0);
        assert_eq!(committed[0].1.id(), "slope");
    }

    #[test]
    fn test_force_completing_all_insertions_shows_latest_state() {
        let mut m = manager();
        let mut queue = Vec::new();
        let mut grid: Vec<String> = Vec::new();

        for commands in [m.init(), m.select_filter("puzzle"), m.set_search("1v1")] {
            for command in commands {
                match command {
                    RenderCommand::ClearGrid => grid.clear(),
                    RenderCommand::InsertCard(p) => queue.push(p),
                    _ => {}
                }
            }
        }
        // Timers fire late, after every event has been handled
        for p in queue {
            if let Some((index, card)) = m.commit(p) {
                grid.insert(index, card.id().to_string());
            }
        }
        assert_eq!(grid, vec!["1v1.space"]);
    }

    #[test]
    fn test_toggle_favorite_updates_one_card() {
        let mut m = manager();
        m.init();
        let generation = m.generation();

        let commands = m.toggle_favorite("slope");
        assert_eq!(
            commands,
            vec![RenderCommand::FavoriteChanged {
                id: "slope".to_string(),
                favorited: true
            }]
        );
        assert_eq!(m.generation(), generation);
        assert_eq!(m.store().raw("scuha_favorites"), Some(r#"["slope"]"#));

        m.toggle_favorite("slope");
        assert!(!m.is_favorite("slope"));
        assert_eq!(m.store().raw("scuha_favorites"), Some("[]"));
    }

    #[test]
    fn test_commit_refreshes_favorite_flag() {
        let mut m = manager();
        let cards = pending(&m.init());
        m.toggle_favorite("2048");
        let (_, card) = m.commit(cards[0].clone()).unwrap();
        assert!(card.favorited);
    }

    #[test]
    fn test_overlapping_batches_keep_result_order() {
        let mut m = manager_with_batch(2);
        let first = pending(&m.init());
        let second = pending(&m.load_more());
        assert_eq!(first[1].delay_ms, 100);
        assert_eq!(second[0].delay_ms, 0);

        // The second batch's first timer fires before the first batch finishes
        let mut grid: Vec<String> = Vec::new();
        for p in [second[0].clone(), first[0].clone(), first[1].clone()] {
            let (index, card) = m.commit(p).unwrap();
            grid.insert(index, card.id().to_string());
        }
        let expected: Vec<String> = m.results().iter().map(|g| g.id.clone()).collect();
        assert_eq!(grid, expected);
    }

    #[test]
    fn test_card_committed_once() {
        let mut m = manager();
        let cards = pending(&m.init());
        assert!(m.commit(cards[0].clone()).is_some());
        assert!(m.commit(cards[0].clone()).is_none());
    }

    #[test]
    fn test_huge_stagger_saturates() {
        let config = CatalogConfig::from_json(r#"{"stagger_ms": 3000000000}"#).unwrap();
        let mut m = CatalogManager::new(Catalog::builtin(), MemoryStore::new(), config);
        let delays: Vec<u32> = pending(&m.init()).iter().map(|p| p.delay_ms).collect();
        assert_eq!(delays, vec![0, 3_000_000_000, u32::MAX]);
    }

    #[test]
    fn test_cards_show_saved_favorites() {
        let store = MemoryStore::new().with_entry("scuha_favorites", r#"["slope"]"#);
        let mut m = CatalogManager::new(Catalog::builtin(), store, CatalogConfig::default());
        let cards = pending(&m.init());
        let flags: Vec<bool> = cards.iter().map(|p| p.card.favorited).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn test_play_records_history_and_launches() {
        let mut m = manager();
        m.init();
        let commands = m.play("2048");
        assert!(matches!(&commands[..], [RenderCommand::Launch(g)] if g.id == "2048"));

        m.play("slope");
        m.play("2048");
        let recent: Vec<String> = m.recently_played_games().into_iter().map(|g| g.id).collect();
        assert_eq!(recent, vec!["2048", "slope"]);
        assert_eq!(
            m.store().raw("scuha_recent_games"),
            Some(r#"["2048","slope"]"#)
        );
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut m = manager();
        m.init();
        assert!(m.play("missing").is_empty());
        assert!(m.toggle_favorite("missing").is_empty());
        assert!(m.preload("missing").is_empty());
        assert!(m.recently_played_games().is_empty());
        assert!(m.favorite_games().is_empty());
    }

    #[test]
    fn test_preload_once_per_game() {
        let mut m = manager();
        assert_eq!(
            m.preload("slope"),
            vec![RenderCommand::Prefetch("../files/slope/".to_string())]
        );
        assert!(m.preload("slope").is_empty());
    }

    #[test]
    fn test_favorite_games_in_favorited_order() {
        let mut m = manager();
        m.toggle_favorite("slope");
        m.toggle_favorite("2048");
        let ids: Vec<String> = m.favorite_games().into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["slope", "2048"]);
    }

    #[test]
    fn test_malformed_record_skipped_not_batch() {
        let mut games = Catalog::builtin().records().to_vec();
        games[1].difficulty = 9;
        games.push(GameRecord {
            id: "extra".to_string(),
            category: Category::Sports,
            ..games[0].clone()
        });
        let catalog = Catalog::new(games).unwrap();
        let mut m = CatalogManager::new(catalog, MemoryStore::new(), CatalogConfig::default());
        let commands = m.init();
        assert_eq!(inserted_ids(&commands), vec!["2048", "slope", "extra"]);
        assert_eq!(m.rendered_count(), 4);
    }
}
