mod sidebar;
mod game_grid;
mod toolbar;

pub use sidebar::Sidebar;
pub use game_grid::GameGrid;
pub use toolbar::Toolbar;
