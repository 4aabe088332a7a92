use crate::app::App;
use crate::models::Article;
use crate::ui::colors::ColorPalette;
use crate::ui::content::shared;
use crate::ui::utils::{format_relative_time, keyword_tags, truncate_chars};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const CARD_HEIGHT: u16 = 9;
const MAX_CARD_TAGS: usize = 2;

pub fn columns_for_width(width: u16) -> usize {
    if width >= 105 {
        3
    } else if width >= 70 {
        2
    } else {
        1
    }
}

/// First grid row to draw so the selected card stays on screen.
pub fn first_visible_row(selected_grid_index: usize, columns: usize, visible_rows: usize) -> usize {
    let selected_row = selected_grid_index / columns.max(1);
    let visible_rows = visible_rows.max(1);
    if selected_row >= visible_rows {
        selected_row + 1 - visible_rows
    } else {
        0
    }
}

pub fn render(f: &mut Frame, app: &App, area: Rect, palette: &ColorPalette) {
    let block = Block::default().borders(Borders::ALL).title("Latest");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let articles = app.grid_articles();
    let columns = app.grid_columns.max(1);
    let visible_rows = ((inner.height / CARD_HEIGHT) as usize).max(1);
    let selected_grid_index = app.selected.saturating_sub(1);
    let first_row = first_visible_row(selected_grid_index, columns, visible_rows);

    let mut row_constraints: Vec<Constraint> =
        (0..visible_rows).map(|_| Constraint::Length(CARD_HEIGHT)).collect();
    row_constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(inner);

    let column_constraints: Vec<Constraint> = (0..columns)
        .map(|_| Constraint::Ratio(1, columns as u32))
        .collect();
    let now = Utc::now();

    for (row_offset, row_area) in rows.iter().take(visible_rows).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints.clone())
            .split(*row_area);
        for (col, cell) in cells.iter().enumerate() {
            let grid_index = (first_row + row_offset) * columns + col;
            let Some(article) = articles.get(grid_index) else {
                return;
            };
            let selected = app.selected == shared::filtered_index(grid_index);
            render_card(f, article, selected, *cell, palette, now);
        }
    }
}

fn render_card(
    f: &mut Frame,
    article: &Article,
    selected: bool,
    area: Rect,
    palette: &ColorPalette,
    now: DateTime<Utc>,
) {
    let block = shared::card_block("", selected, palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let summary_budget = (inner.width as usize).saturating_mul(3);
    let body = vec![
        Line::from(vec![
            Span::styled(
                article.category_label(),
                Style::default()
                    .fg(palette.category(&article.category_code))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format_relative_time(article.published_at, now),
                Style::default().fg(palette.muted),
            ),
        ]),
        Line::styled(
            article.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            truncate_chars(&article.summary, summary_budget),
            Style::default().fg(palette.muted),
        ),
    ];
    f.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }), parts[0]);

    let footer = Line::from(vec![
        Span::styled(article.source.clone(), Style::default().fg(palette.accent)),
        Span::raw("  "),
        Span::styled(
            keyword_tags(&article.keywords, MAX_CARD_TAGS),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(footer), parts[1]);
}
