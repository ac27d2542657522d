use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use super::state::AppState;
use crate::gallery::GalleryEvent;

/// Handle a mouse event against the hit areas saved by the last render
pub fn handle_mouse(event: MouseEvent, state: &mut AppState) {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_left_click(event.column, event.row, state),
        MouseEventKind::ScrollUp if !state.lightbox_open() => state.move_up(),
        MouseEventKind::ScrollDown if !state.lightbox_open() => state.move_down(),
        _ => {}
    }
}

fn handle_left_click(col: u16, row: u16, state: &mut AppState) {
    if state.lightbox_open() {
        let overlay = state.gallery.lightbox().overlay();
        let event = if contains(state.hit_areas.close, col, row) {
            GalleryEvent::CloseControl
        } else if contains(state.hit_areas.panel, col, row) {
            GalleryEvent::OverlayClick {
                target: overlay.panel,
            }
        } else {
            // Backdrop
            GalleryEvent::OverlayClick {
                target: overlay.root,
            }
        };
        debug!(col, row, ?event, "lightbox click");
        state.dispatch(event);
        return;
    }

    state.clear_status_message();

    if let Some(category) = button_at(col, row, state) {
        state.dispatch(GalleryEvent::ActivateFilter { category });
    } else if let Some(index) = card_at(col, row, state) {
        state.select_card(index);
        state.dispatch(GalleryEvent::ActivateCard { index });
    }
}

fn button_at(col: u16, row: u16, state: &AppState) -> Option<String> {
    state
        .hit_areas
        .buttons
        .iter()
        .find(|(rect, _)| contains(*rect, col, row))
        .map(|(_, category)| category.clone())
}

fn card_at(col: u16, row: u16, state: &AppState) -> Option<usize> {
    state
        .hit_areas
        .cards
        .iter()
        .find(|(rect, _)| contains(*rect, col, row))
        .map(|(_, index)| *index)
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}
