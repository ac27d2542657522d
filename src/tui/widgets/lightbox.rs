use std::path::Path;
use std::sync::{Mutex, OnceLock};

use image::DynamicImage;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use ratatui_image::{picker::Picker, protocol::StatefulProtocol, FilterType, Resize, StatefulImage};
use tracing::{debug, warn};

use crate::document::Document;
use crate::tui::colors::{FOCUS_COLOR, HEADER_COLOR, HELP_TEXT};
use crate::tui::state::AppState;

const SIDE_WIDTH: u16 = 30;

// Global picker (created once, thread-safe)
static PICKER: OnceLock<Mutex<Option<Picker>>> = OnceLock::new();

fn get_picker_mutex() -> &'static Mutex<Option<Picker>> {
    PICKER.get_or_init(|| {
        Mutex::new(Picker::from_termios().ok().map(|mut picker| {
            picker.guess_protocol();
            picker
        }))
    })
}

/// Create a stateful protocol for the current terminal
fn create_protocol(image: DynamicImage) -> Option<Box<dyn StatefulProtocol>> {
    let mut picker_guard = get_picker_mutex().lock().ok()?;
    let picker = picker_guard.as_mut()?;
    Some(picker.new_resize_protocol(image))
}

/// Decoded lightbox image. `protocol` is `None` when decoding failed or the
/// terminal has no graphics support.
pub struct LightboxImage {
    pub source: String,
    pub protocol: Option<Box<dyn StatefulProtocol>>,
}

impl LightboxImage {
    fn load(library_path: &Path, source: &str) -> Self {
        let path = library_path.join(source);
        let protocol = match image::open(&path) {
            Ok(image) => create_protocol(image),
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to decode lightbox image");
                None
            }
        };
        debug!(source, loaded = protocol.is_some(), "lightbox image");
        Self {
            source: source.to_string(),
            protocol,
        }
    }
}

/// Centered panel covering most of the screen
pub fn panel_rect(area: Rect) -> Rect {
    let width = area.width.saturating_mul(4) / 5;
    let height = area.height.saturating_mul(4) / 5;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Close glyph position on the panel's top border
pub fn close_rect(panel: Rect) -> Rect {
    if panel.width < 5 {
        return Rect::default();
    }
    Rect::new(panel.x + panel.width - 4, panel.y, 3, 1)
}

/// Render the overlay from the document's lightbox nodes. Records panel and
/// close hit areas.
pub fn render_lightbox(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let overlay = state.gallery.lightbox().overlay();
    let (source, title, category, hint) = {
        let doc = state.document();
        let hint = doc
            .query_by_class("hint")
            .first()
            .map(|&n| doc.text(n))
            .unwrap_or_default();
        (
            doc.attribute(overlay.image, "src").unwrap_or_default(),
            doc.text(overlay.title),
            doc.text(overlay.category),
            hint,
        )
    };

    let panel = panel_rect(area);
    let close = close_rect(panel);
    state.hit_areas.panel = panel;
    state.hit_areas.close = close;

    frame.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(FOCUS_COLOR))
        .title(" Image preview ")
        .title_style(Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);
    frame.render_widget(
        Paragraph::new("[✕]").style(Style::default().fg(HEADER_COLOR)),
        close,
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDE_WIDTH)])
        .split(inner);
    let image_area = chunks[0];
    let side_area = chunks[1];

    render_image(frame, image_area, state, &source);

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(category, Style::default().fg(HELP_TEXT))),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(HELP_TEXT))),
    ];
    let side = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::LEFT).border_style(Style::default().fg(HELP_TEXT)));
    frame.render_widget(side, side_area);
}

fn render_image(frame: &mut Frame, area: Rect, state: &mut AppState, source: &str) {
    let stale = state
        .lightbox_image
        .as_ref()
        .map(|img| img.source != source)
        .unwrap_or(true);
    if stale {
        state.lightbox_image = Some(LightboxImage::load(&state.library_path, source));
    }

    match state.lightbox_image.as_mut().and_then(|img| img.protocol.as_mut()) {
        Some(protocol) => {
            let image_widget =
                StatefulImage::new(None).resize(Resize::Fit(Some(FilterType::Lanczos3)));
            frame.render_stateful_widget(image_widget, area, protocol);
        }
        None => {
            let placeholder = Paragraph::new(format!("Preview unavailable\n\n{}", source))
                .style(Style::default().fg(HELP_TEXT))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, area);
        }
    }
}
