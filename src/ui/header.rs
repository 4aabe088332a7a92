use crate::app::App;
use crate::ui::colors::ColorPalette;
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect, palette: &ColorPalette) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let mut left = vec![
        Span::styled(
            "NEWSDESK",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            Local::now().format("%A, %B %-d, %Y").to_string(),
            Style::default().fg(palette.muted),
        ),
    ];
    if app.config.demo {
        left.push(Span::raw("  "));
        left.push(Span::styled("[demo feed]", Style::default().fg(palette.accent)));
    }
    f.render_widget(Paragraph::new(Line::from(left)), chunks[0]);

    let last_update = app
        .last_update
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let (dot_color, status_text) = status_label(app, palette);
    let right = Line::from(vec![
        Span::styled("Updated ", Style::default().fg(palette.muted)),
        Span::raw(last_update),
        Span::raw("  "),
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::raw(status_text),
    ]);
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), chunks[1]);
}

fn status_label(app: &App, palette: &ColorPalette) -> (Color, &'static str) {
    match app.status.as_ref() {
        _ if app.status_checking => (palette.muted, "Checking..."),
        Some(status) if status.connected() => (palette.positive, "Connected"),
        Some(_) => (palette.error, "API key needed"),
        None => (palette.muted, "Unknown"),
    }
}
