use crate::app::{App, InputMode};
use crate::ui::colors::ColorPalette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect, palette: &ColorPalette) {
    if app.input_mode == InputMode::Search {
        let line = Line::from(vec![
            Span::styled(
                "Search: ",
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{}_", app.search_input)),
            Span::styled(
                "   Enter=search  Esc=cancel",
                Style::default().fg(palette.muted),
            ),
        ]);
        f.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }

    let mut spans = Vec::new();
    if let Some(flash) = app.flash.as_ref() {
        spans.push(Span::styled(
            format!("{} ", flash),
            Style::default().fg(palette.accent),
        ));
        spans.push(Span::raw("| "));
    }

    let hints: &[(&str, &str)] = if app.modal.is_some() {
        &[("a", "=AI analysis "), ("Esc", "=close")]
    } else {
        &[
            ("←→↑↓", "=select "),
            ("Enter", "=open "),
            ("1-6/Tab", "=category "),
            ("/", "=search "),
            ("v", "=view "),
            ("b", "=sidebar "),
            ("s", "=settings "),
            ("r", "=refresh "),
        ]
    };
    for (idx, (key, label)) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("| "));
        }
        spans.push(Span::styled(*key, Style::default().fg(palette.accent)));
        spans.push(Span::raw(*label));
    }
    if app.modal.is_none() {
        spans.push(Span::raw("| "));
        spans.push(Span::styled("q", Style::default().fg(palette.error)));
        spans.push(Span::raw("=quit"));
    }

    f.render_widget(
        Paragraph::new(vec![Line::from(spans)])
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center),
        area,
    );
}
