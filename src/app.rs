use leptos::prelude::*;
use scuha_core::Catalog;

use crate::components::{GameGrid, Sidebar, Toolbar};
use crate::config::load_config;
use crate::controller::CatalogHandle;
use crate::storage::BrowserStore;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    let catalog = CatalogHandle::new(Catalog::builtin(), BrowserStore::open(), config);
    catalog.init();

    view! {
        <div class="app-container">
            <Toolbar catalog=catalog />
            <div class="main-content">
                <Sidebar catalog=catalog />
                <GameGrid catalog=catalog />
            </div>
            <footer class="build-info">
                {format!("Build {} ({})", env!("BUILD_HASH"), env!("BUILD_TIMESTAMP"))}
            </footer>
        </div>
    }
}
