//! Sidebar component with filters, favorites and play history

use leptos::prelude::*;
use scuha_core::GameRecord;
use crate::controller::CatalogHandle;

/// "racing" -> "Racing", "all" -> "All Games"
fn filter_label(value: &str) -> String {
    if value == scuha_core::filter::ALL {
        return "All Games".to_string();
    }
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[component]
pub fn Sidebar(catalog: CatalogHandle) -> impl IntoView {
    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2>"Categories"</h2>
            </div>
            <nav class="filter-list">
                <For
                    each=move || catalog.filter_options.get()
                    key=|(value, _)| value.clone()
                    let:option
                >
                    <FilterItem value=option.0 count=option.1 catalog=catalog />
                </For>
            </nav>

            <div class="sidebar-header">
                <h2>"Favorites"</h2>
            </div>
            <nav class="shelf-list">
                <For
                    each=move || catalog.favorites.get()
                    key=|g| g.id.clone()
                    let:game
                >
                    <ShelfItem game=game catalog=catalog />
                </For>
                {move || catalog.favorites.get().is_empty().then(|| view! {
                    <div class="empty-shelf">"No favorites yet"</div>
                })}
            </nav>

            <div class="sidebar-header">
                <h2>"Recently Played"</h2>
            </div>
            <nav class="shelf-list">
                <For
                    each=move || catalog.recent.get()
                    key=|g| g.id.clone()
                    let:game
                >
                    <ShelfItem game=game catalog=catalog />
                </For>
                {move || catalog.recent.get().is_empty().then(|| view! {
                    <div class="empty-shelf">"Nothing played yet"</div>
                })}
            </nav>
        </aside>
    }
}

#[component]
fn FilterItem(value: String, count: usize, catalog: CatalogHandle) -> impl IntoView {
    let label = filter_label(&value);
    let value_for_click = value.clone();

    view! {
        <button
            class="filter-btn"
            class:active=move || catalog.active_filter.get() == value
            on:click=move |_| catalog.select_filter(value_for_click.clone())
        >
            <span class="filter-name">{label}</span>
            {(count > 0).then(|| view! {
                <span class="filter-count">{count}</span>
            })}
        </button>
    }
}

#[component]
fn ShelfItem(game: GameRecord, catalog: CatalogHandle) -> impl IntoView {
    let id = game.id.clone();

    view! {
        <button
            class="shelf-item"
            title=game.description.clone()
            on:click=move |_| catalog.play(id.clone())
        >
            <span class="shelf-name">{game.title}</span>
        </button>
    }
}
