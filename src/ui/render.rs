use crate::app::App;
use crate::ui::colors::ColorPalette;
use crate::ui::{content, footer, header, menu, modal, popup};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 22;

pub fn render(f: &mut Frame, app: &mut App) {
    let palette = ColorPalette::newsroom();

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    header::render(f, app, vertical_chunks[0], &palette);

    // Body: optional sidebar on the left, news on the right
    let body = if app.sidebar_open {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(vertical_chunks[1]);
        menu::render(f, app, chunks[0], &palette);
        chunks[1]
    } else {
        vertical_chunks[1]
    };
    content::render(f, app, body, &palette);

    footer::render(f, app, vertical_chunks[2], &palette);

    if let Some(detail) = app.modal.as_ref() {
        modal::render(f, detail, &palette);
    }
    if app.settings_popup.is_some() {
        popup::render_settings(f, app, &palette);
    } else if app.loading {
        popup::render_loading(f, &palette);
    }
}
