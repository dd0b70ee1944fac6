//! Game grid with staggered cards and a "load more" button

use leptos::prelude::*;
use scuha_core::card::DIFFICULTY_LEVELS;
use scuha_core::{CardModel, LoadMoreControl, StarRating};
use crate::controller::CatalogHandle;

#[component]
pub fn GameGrid(catalog: CatalogHandle) -> impl IntoView {
    view! {
        <main class="game-content">
            <div class="game-grid" id="projectsGrid">
                <For
                    each=move || catalog.cards.get()
                    key=|card| card.id().to_string()
                    let:card
                >
                    <GameCard card=card catalog=catalog />
                </For>
                <Show when=move || catalog.empty.get()>
                    <div class="empty-state">
                        <h3>"No Games Found"</h3>
                        <p>"Try adjusting your search terms or filters"</p>
                    </div>
                </Show>
            </div>
            {move || match catalog.load_more.get() {
                LoadMoreControl::Hidden => None,
                LoadMoreControl::Visible { next } => Some(view! {
                    <button
                        class="load-more-btn"
                        id="loadMoreBtn"
                        on:click=move |_| catalog.load_more()
                    >
                        {format!("Load {} More Games", next)}
                    </button>
                }),
            }}
        </main>
    }
}

/// Split `text` into (segment, is_match) pieces for a lower-cased `query`.
/// Offsets come from the lower-cased title, so nothing is highlighted when
/// lower-casing changes any character's byte length.
fn highlight_segments<'a>(text: &'a str, query: &str) -> Vec<(&'a str, bool)> {
    let same_width = text
        .chars()
        .all(|c| c.to_lowercase().map(char::len_utf8).sum::<usize>() == c.len_utf8());
    if query.is_empty() || !same_width {
        return vec![(text, false)];
    }

    let text_lower = text.to_lowercase();
    let mut segments = Vec::new();
    let mut last_end = 0;

    for (start, _) in text_lower.match_indices(query) {
        if start > last_end {
            segments.push((&text[last_end..start], false));
        }
        segments.push((&text[start..start + query.len()], true));
        last_end = start + query.len();
    }

    if last_end < text.len() {
        segments.push((&text[last_end..], false));
    }
    segments
}

/// Highlight occurrences of the search term in a title
fn highlight_matches(text: &str, query: &str) -> AnyView {
    let parts = highlight_segments(text, query)
        .into_iter()
        .map(|(segment, matched)| {
            if matched {
                view! { <span class="search-highlight">{segment.to_string()}</span> }.into_any()
            } else {
                view! { <>{segment.to_string()}</> }.into_any()
            }
        })
        .collect::<Vec<_>>();

    view! { <>{parts}</> }.into_any()
}

fn star_glyphs(stars: StarRating) -> String {
    let mut glyphs = "★".repeat(stars.full as usize);
    if stars.half {
        glyphs.push('⯪');
    }
    glyphs.push_str(&"☆".repeat(stars.empty as usize));
    glyphs
}

#[component]
fn GameCard(card: CardModel, catalog: CatalogHandle) -> impl IntoView {
    let game = card.record.clone();
    let id = game.id.clone();
    let first_char = game.title.chars().next().unwrap_or('?').to_string();
    let (image_failed, set_image_failed) = signal(false);

    let id_for_play = id.clone();
    let id_for_favorite = id.clone();
    let id_for_hover = id.clone();
    let id_for_launching = id.clone();
    let id_for_marker = id.clone();
    let title_for_highlight = game.title.clone();

    // Favorite state follows the grid entry so toggles update this card in place
    let favorited = move || {
        catalog.cards.with(|cards| {
            cards
                .iter()
                .find(|c| c.id() == id_for_marker)
                .map(|c| c.favorited)
                .unwrap_or(false)
        })
    };

    let on_favorite = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        catalog.toggle_favorite(id_for_favorite.clone());
    };

    let dots = (0..DIFFICULTY_LEVELS)
        .map(|i| {
            let lit = card.difficulty_dots[i];
            view! { <div class="difficulty-dot" class:active=lit></div> }
        })
        .collect::<Vec<_>>();

    view! {
        <div
            class="project-card fade-in-up"
            data-game-id=id.clone()
            class:launching=move || catalog.launching.get().as_deref() == Some(id_for_launching.as_str())
            on:click=move |_| catalog.play(id_for_play.clone())
            on:mouseenter=move |_| catalog.preload(id_for_hover.clone())
        >
            <div class="project-image">
                {move || if image_failed.get() {
                    view! { <div class="cover-placeholder">{first_char.clone()}</div> }.into_any()
                } else {
                    view! {
                        <img
                            src=game.image.clone()
                            alt=game.title.clone()
                            loading="lazy"
                            on:error=move |_| set_image_failed.set(true)
                        />
                    }.into_any()
                }}
                <div class="category-badge">{card.record.category.as_str()}</div>
                <button
                    class="favorite-btn"
                    class:favorited=favorited
                    title="Toggle favorite"
                    on:click=on_favorite
                >
                    "♥"
                </button>
                <div class="difficulty-indicator">{dots}</div>
            </div>
            <div class="project-content">
                <h3 class="project-title">
                    {move || highlight_matches(&title_for_highlight, &catalog.search.get().to_lowercase())}
                </h3>
                <p class="project-description">{card.record.description.clone()}</p>
                <div class="project-tags">
                    {card.record.tags.iter().map(|tag| view! {
                        <span class="project-tag">{tag.clone()}</span>
                    }).collect::<Vec<_>>()}
                </div>
                <div class="project-meta">
                    <div class="project-rating">
                        <span class="stars">{star_glyphs(card.stars)}</span>
                        <span>{format!("{:.1}", card.record.rating)}</span>
                    </div>
                    <div class="project-players">
                        <span>{card.players_label.clone()}</span>
                        " players"
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_segments_case_insensitive() {
        assert_eq!(
            highlight_segments("Slope Slope", "slo"),
            vec![("Slo", true), ("pe ", false), ("Slo", true), ("pe", false)]
        );
    }

    #[test]
    fn test_highlight_segments_empty_query() {
        assert_eq!(highlight_segments("2048", ""), vec![("2048", false)]);
    }

    #[test]
    fn test_highlight_segments_width_changing_title() {
        // 'İ' grows and the Kelvin sign shrinks when lower-cased; the total
        // length matches but the offsets do not
        let title = "İİ\u{212A}ing";
        assert_eq!(title.len(), title.to_lowercase().len());
        assert_eq!(highlight_segments(title, "ing"), vec![(title, false)]);
    }
}
