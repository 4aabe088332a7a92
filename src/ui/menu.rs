use crate::app::App;
use crate::category::Category;
use crate::ui::colors::ColorPalette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect, palette: &ColorPalette) {
    let mut lines = Vec::new();

    for (idx, category) in Category::ALL.iter().enumerate() {
        let is_selected = app.category == *category;
        let prefix = if is_selected { "> " } else { "  " };

        let style = if is_selected {
            Style::default()
                .fg(palette.selected_fg)
                .bg(palette.selected_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let padded = format!("{prefix}{} {}", idx + 1, category.label());
        lines.push(Line::from(Span::styled(padded, style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("View: ", Style::default().fg(palette.muted)),
        Span::styled(
            app.view.label(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    if !app.search_query.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Search: ", Style::default().fg(palette.muted)),
            Span::raw(app.search_query.clone()),
        ]));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Categories")
                    .title_alignment(Alignment::Center),
            )
            .alignment(Alignment::Left),
        area,
    );
}
