//! Bridge between the catalog manager and the view
//!
//! The manager lives in a local `StoredValue`; components call the event
//! methods here, and the returned render commands are applied to signals.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use scuha_core::filter::count_matching;
use scuha_core::{
    CardModel, Catalog, CatalogConfig, CatalogManager, Filter, GameRecord, LoadMoreControl,
    PendingCard, RenderCommand,
};

use crate::launch::{self, LAUNCH_DELAY_MS};
use crate::storage::BrowserStore;

type Manager = CatalogManager<BrowserStore>;

/// Copyable handle passed to every component
#[derive(Clone, Copy)]
pub struct CatalogHandle {
    manager: StoredValue<Manager, LocalStorage>,
    /// Cards currently in the grid, in insertion order
    pub cards: RwSignal<Vec<CardModel>>,
    pub empty: RwSignal<bool>,
    pub load_more: RwSignal<LoadMoreControl>,
    pub search: RwSignal<String>,
    pub active_filter: RwSignal<String>,
    /// Filter values with how many games each one matches
    pub filter_options: RwSignal<Vec<(String, usize)>>,
    pub favorites: RwSignal<Vec<GameRecord>>,
    pub recent: RwSignal<Vec<GameRecord>>,
    /// Game whose launch is pending
    pub launching: RwSignal<Option<String>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog, store: BrowserStore, config: CatalogConfig) -> Self {
        let manager = CatalogManager::new(catalog, store, config);
        let filter_options = manager
            .filter_options()
            .into_iter()
            .map(|value| {
                let count = count_matching(manager.catalog(), &Filter::parse(&value));
                (value, count)
            })
            .collect();
        let active_filter = manager.active_filter().to_string();

        Self {
            manager: StoredValue::new_local(manager),
            cards: RwSignal::new(Vec::new()),
            empty: RwSignal::new(false),
            load_more: RwSignal::new(LoadMoreControl::Hidden),
            search: RwSignal::new(String::new()),
            active_filter: RwSignal::new(active_filter),
            filter_options: RwSignal::new(filter_options),
            favorites: RwSignal::new(Vec::new()),
            recent: RwSignal::new(Vec::new()),
            launching: RwSignal::new(None),
        }
    }

    pub fn init(self) {
        self.dispatch(|m| m.init());
        self.refresh_lists();
    }

    pub fn set_search(self, text: String) {
        self.search.set(text.clone());
        self.dispatch(move |m| m.set_search(&text));
    }

    pub fn clear_search(self) {
        self.search.set(String::new());
        self.dispatch(|m| m.clear_search());
    }

    pub fn select_filter(self, value: String) {
        self.active_filter.set(value.clone());
        self.dispatch(move |m| m.select_filter(&value));
    }

    pub fn load_more(self) {
        self.dispatch(|m| m.load_more());
    }

    pub fn toggle_favorite(self, id: String) {
        self.dispatch(move |m| m.toggle_favorite(&id));
    }

    pub fn play(self, id: String) {
        self.dispatch(move |m| m.play(&id));
    }

    pub fn preload(self, id: String) {
        self.dispatch(move |m| m.preload(&id));
    }

    fn dispatch(self, event: impl FnOnce(&mut Manager) -> Vec<RenderCommand>) {
        match self.manager.try_update_value(event) {
            Some(commands) => self.apply(commands),
            None => tracing::error!("Catalog manager was disposed"),
        }
    }

    fn apply(self, commands: Vec<RenderCommand>) {
        for command in commands {
            match command {
                RenderCommand::ClearGrid => {
                    self.cards.set(Vec::new());
                    self.empty.set(false);
                }
                RenderCommand::InsertCard(pending) => self.schedule(pending),
                RenderCommand::ShowEmptyState => self.empty.set(true),
                RenderCommand::LoadMore(state) => self.load_more.set(state),
                RenderCommand::FavoriteChanged { id, favorited } => {
                    self.cards.update(|cards| {
                        if let Some(card) = cards.iter_mut().find(|c| c.id() == id) {
                            card.favorited = favorited;
                        }
                    });
                    self.refresh_lists();
                }
                RenderCommand::Launch(game) => {
                    self.refresh_lists();
                    let launching = self.launching;
                    launching.set(Some(game.id.clone()));
                    Timeout::new(LAUNCH_DELAY_MS, move || {
                        if let Err(e) = launch::launch(&game) {
                            tracing::error!("Could not launch {}: {}", game.id, e);
                            launching.set(None);
                        }
                    })
                    .forget();
                }
                RenderCommand::Prefetch(src) => {
                    if let Err(e) = launch::prefetch(&src) {
                        tracing::warn!("Could not prefetch {}: {}", src, e);
                    }
                }
            }
        }
    }

    /// Insert a card after its stagger delay, unless a newer filter or search
    /// has replaced the batch it belongs to
    fn schedule(self, pending: PendingCard) {
        let manager = self.manager;
        let cards = self.cards;
        Timeout::new(pending.delay_ms, move || {
            if let Some((index, card)) = manager.try_update_value(|m| m.commit(pending)).flatten() {
                cards.update(|c| c.insert(index.min(c.len()), card));
            }
        })
        .forget();
    }

    fn refresh_lists(self) {
        if let Some((favorites, recent)) = self
            .manager
            .try_with_value(|m| (m.favorite_games(), m.recently_played_games()))
        {
            self.favorites.set(favorites);
            self.recent.set(recent);
        }
    }
}
