use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use crate::controller::CatalogHandle;
use crate::error::RenderError;

#[component]
pub fn Toolbar(catalog: CatalogHandle) -> impl IntoView {
    let search_ref = NodeRef::<html::Input>::new();

    let focus_search = move || -> Result<(), RenderError> {
        let input = search_ref.get_untracked().ok_or(RenderError::MissingTarget("search input"))?;
        input.focus()?;
        Ok(())
    };

    // F3 or Ctrl+F jumps to the search box instead of the browser's find bar
    let _ = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "F3" || (ev.ctrl_key() && ev.key() == "f") {
            ev.prevent_default();
            if let Err(e) = focus_search() {
                tracing::warn!("Could not focus search: {}", e);
            }
        }
    });

    view! {
        <header class="toolbar">
            <div class="toolbar-left">
                <img src="/assets/logo.svg" alt="Scuha" class="app-logo" />
                <h1 class="app-title">"Scuha Arcade"</h1>
            </div>
            <div class="toolbar-center">
                <div class="search-box">
                    <input
                        type="text"
                        id="searchInput"
                        placeholder="Search games..."
                        node_ref=search_ref
                        prop:value=move || catalog.search.get()
                        on:input=move |ev| catalog.set_search(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Escape" {
                                catalog.clear_search();
                            }
                        }
                    />
                    <Show when=move || !catalog.search.get().is_empty()>
                        <button
                            class="search-clear"
                            on:click=move |_| catalog.clear_search()
                            title="Clear search"
                        >
                            "×"
                        </button>
                    </Show>
                </div>
            </div>
            <div class="toolbar-right">
                <span class="result-count">
                    {move || {
                        let shown = catalog.cards.get().len();
                        format!("{} shown", shown)
                    }}
                </span>
            </div>
        </header>
    }
}
