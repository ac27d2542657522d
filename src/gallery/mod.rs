//! Gallery interaction logic: category/search filtering and the lightbox.
//!
//! Everything here is host-agnostic. A host feeds [`GalleryEvent`]s into
//! [`GalleryController::dispatch`] and renders whatever the controller wrote
//! into its [`Document`](crate::document::Document).

mod controller;
mod filter;
mod lightbox;

pub use controller::{GalleryController, GalleryEvent, Key, Propagation};
pub use filter::{
    compute_visible, matches_category, matches_search, Card, FilterState, ALL_CATEGORIES,
};
pub use lightbox::{Lightbox, Overlay, Step, HINT_TEXT, OPEN_CLASS};
