use crate::app::App;
use crate::loader::Notice;
use crate::models::Article;
use crate::ui::banner;
use crate::ui::colors::ColorPalette;
use crate::ui::content::shared;
use crate::ui::utils::format_relative_time;
use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, article: &Article, selected: bool, area: Rect, palette: &ColorPalette) {
    let mut lines = vec![Line::from(vec![Span::styled(
        format!(" {} ", article.category_label()),
        Style::default()
            .fg(palette.selected_fg)
            .bg(palette.category(&article.category_code))
            .add_modifier(Modifier::BOLD),
    )])];
    lines.push(Line::styled(
        article.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::styled(
        article.summary.clone(),
        Style::default().fg(palette.muted),
    ));

    let mut meta = vec![
        Span::styled(article.source.clone(), Style::default().fg(palette.accent)),
        Span::raw("  "),
        Span::styled(
            format_relative_time(article.published_at, Utc::now()),
            Style::default().fg(palette.muted),
        ),
    ];
    if let Some(image) = article.image.as_ref() {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(
            format!("[image] {}", image),
            Style::default().fg(palette.muted),
        ));
    }
    lines.push(Line::from(meta));

    f.render_widget(
        Paragraph::new(lines)
            .block(shared::card_block("Headline", selected, palette))
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_notice(f: &mut Frame, notice: &Notice, area: Rect, palette: &ColorPalette) {
    let lines = vec![
        Line::from(Span::styled(
            " Notice ",
            Style::default()
                .fg(palette.selected_fg)
                .bg(palette.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::styled(
            notice.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(notice.message.clone(), Style::default().fg(palette.muted)),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Headline"))
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_loading(f: &mut Frame, app: &App, area: Rect, palette: &ColorPalette) {
    f.render_widget(
        Paragraph::new(banner::render_animated_banner(app, palette))
            .block(Block::default().borders(Borders::ALL).title("Headline")),
        area,
    );
}
