mod card_grid;
mod filter_bar;
mod lightbox;
mod status_bar;

pub use card_grid::render_card_grid;
pub use filter_bar::render_filter_bar;
pub use lightbox::{close_rect, panel_rect, render_lightbox, LightboxImage};
pub use status_bar::render_status_bar;
