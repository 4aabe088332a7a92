use crate::app::App;
use crate::ui::colors::ColorPalette;
use crate::ui::content::shared;
use crate::ui::utils::format_relative_time;
use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect, palette: &ColorPalette) {
    let block = Block::default().borders(Borders::ALL).title("Latest");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let now = Utc::now();
    let visible = inner.height.max(1) as usize;
    let selected_grid_index = app.selected.saturating_sub(1);
    let skip = (selected_grid_index + 1).saturating_sub(visible);

    let lines: Vec<Line> = app
        .grid_articles()
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible)
        .map(|(idx, article)| {
            let selected = app.selected == shared::filtered_index(idx);
            let marker = if selected { "> " } else { "  " };
            let title_style = if selected {
                Style::default()
                    .fg(palette.selected_fg)
                    .bg(palette.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("[{}] ", article.category_label()),
                    Style::default().fg(palette.category(&article.category_code)),
                ),
                Span::styled(article.title.clone(), title_style),
                Span::styled(
                    format!(
                        "  {} | {}",
                        article.source,
                        format_relative_time(article.published_at, now)
                    ),
                    Style::default().fg(palette.muted),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
