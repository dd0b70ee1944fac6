//! Play-launch and prefetch hooks

use scuha_core::GameRecord;

use crate::error::RenderError;

/// Pause before navigating so the card's pressed animation is visible
pub const LAUNCH_DELAY_MS: u32 = 150;

/// Navigate to the game's playable build
pub fn launch(game: &GameRecord) -> Result<(), RenderError> {
    let window = web_sys::window().ok_or(RenderError::MissingTarget("window"))?;
    tracing::info!("Launching {} at {}", game.id, game.src);
    window.location().set_href(&game.src)?;
    Ok(())
}

/// Add `<link rel="prefetch">` for a game's build to the document head
pub fn prefetch(href: &str) -> Result<(), RenderError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(RenderError::MissingTarget("document"))?;
    let head = document.head().ok_or(RenderError::MissingTarget("document head"))?;

    let link = document.create_element("link")?;
    link.set_attribute("rel", "prefetch")?;
    link.set_attribute("href", href)?;
    head.append_child(&link)?;
    tracing::debug!("Prefetching {}", href);
    Ok(())
}
