mod cards;
mod headline;
mod list;
mod shared;

use crate::app::{App, View};
use crate::ui::colors::ColorPalette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
    Frame,
};

pub const HEADLINE_HEIGHT: u16 = 9;

pub fn render(f: &mut Frame, app: &mut App, area: Rect, palette: &ColorPalette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADLINE_HEIGHT), Constraint::Min(0)])
        .split(area);

    app.grid_columns = cards::columns_for_width(chunks[1].width);
    let app = &*app;

    if app.loading {
        headline::render_loading(f, app, chunks[0], palette);
        f.render_widget(Block::default().borders(Borders::ALL), chunks[1]);
        return;
    }

    if let Some(notice) = app.notice.as_ref() {
        headline::render_notice(f, notice, chunks[0], palette);
        shared::render_error_message(f, chunks[1], notice, palette);
        return;
    }

    match app.headline() {
        Some(article) => headline::render(f, article, app.selected == 0, chunks[0], palette),
        None => headline::render_loading(f, app, chunks[0], palette),
    }

    if app.headline().is_some() && app.grid_articles().is_empty() {
        shared::render_empty_state(f, chunks[1], "Latest", "No more news to show.");
        return;
    }

    match app.view {
        View::Grid => cards::render(f, app, chunks[1], palette),
        View::List => list::render(f, app, chunks[1], palette),
    }
}
