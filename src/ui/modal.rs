use crate::app::{AnalysisPanel, DetailModal};
use crate::models::{AnalysisResult, Sentiment};
use crate::ui::colors::ColorPalette;
use crate::ui::popup::{create_centered_popup, create_popup_block};
use crate::ui::utils::{format_relative_time, keyword_tags};
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

const AI_PANEL_HEIGHT: u16 = 12;
const SPINNER: &[&str] = &["|", "/", "-", "\\"];

pub fn render(f: &mut Frame, detail: &DetailModal, palette: &ColorPalette) {
    let area = f.size();
    let popup_area = create_centered_popup(
        area,
        area.width.saturating_mul(4) / 5,
        area.height.saturating_mul(4) / 5,
    );
    let block = create_popup_block(" Article ", palette.primary);
    let inner = block.inner(popup_area);
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(AI_PANEL_HEIGHT)])
        .split(inner);

    render_article(f, detail, chunks[0], palette);
    render_analysis(f, &detail.analysis, chunks[1], palette);
}

fn render_article(f: &mut Frame, detail: &DetailModal, area: Rect, palette: &ColorPalette) {
    let article = &detail.article;
    let summary = if article.summary.trim().is_empty() {
        "No summary available.".to_string()
    } else {
        article.summary.clone()
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", article.category_label()),
            Style::default()
                .fg(palette.selected_fg)
                .bg(palette.category(&article.category_code))
                .add_modifier(Modifier::BOLD),
        )),
        Line::styled(
            article.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::styled(article.source.clone(), Style::default().fg(palette.accent)),
            Span::raw("  "),
            Span::styled(
                format_relative_time(article.published_at, Utc::now()),
                Style::default().fg(palette.muted),
            ),
        ]),
        Line::from(""),
        Line::from(summary),
    ];
    if let Some(original) = article.original_title.as_ref() {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("Original: {}", original),
            Style::default().fg(palette.muted),
        ));
    }
    lines.push(Line::from(""));
    if !article.keywords.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Keywords: ", Style::default().fg(palette.muted)),
            Span::raw(keyword_tags(&article.keywords, article.keywords.len())),
        ]));
    }
    let link = if article.url.is_empty() { "-" } else { &article.url };
    lines.push(Line::from(vec![
        Span::styled("Link: ", Style::default().fg(palette.muted)),
        Span::styled(
            link.to_string(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ]));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_analysis(f: &mut Frame, panel: &AnalysisPanel, area: Rect, palette: &ColorPalette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("AI analysis (summary + sentiment)");
    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        AnalysisPanel::Idle => f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("Press "),
                Span::styled("a", Style::default().fg(palette.accent)),
                Span::raw(" to summarize this article and score its sentiment."),
            ])),
            inner,
        ),
        AnalysisPanel::Running => {
            let frame = (Utc::now().timestamp_subsec_millis() / 250) as usize % SPINNER.len();
            f.render_widget(
                Paragraph::new(format!("{} Analyzing...", SPINNER[frame]))
                    .style(Style::default().fg(palette.primary)),
                inner,
            );
        }
        AnalysisPanel::Failed(message) => f.render_widget(
            Paragraph::new(vec![
                Line::styled(
                    format!("Analysis failed: {}", message),
                    Style::default().fg(palette.error),
                ),
                Line::styled("Press a to try again", Style::default().fg(palette.muted)),
            ])
            .wrap(Wrap { trim: true }),
            inner,
        ),
        AnalysisPanel::Done(result) => render_result(f, result, inner, palette),
    }
}

fn render_result(f: &mut Frame, result: &AnalysisResult, area: Rect, palette: &ColorPalette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(result.summary.clone()).wrap(Wrap { trim: true }),
        chunks[0],
    );
    f.render_widget(
        sentiment_gauge("Positive", result.positive, palette.positive),
        chunks[1],
    );
    f.render_widget(
        sentiment_gauge("Negative", result.negative, palette.negative),
        chunks[2],
    );

    let badge_color = match result.sentiment {
        Sentiment::Positive => palette.positive,
        Sentiment::Negative => palette.negative,
        Sentiment::Neutral => palette.muted,
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Overall: ", Style::default().fg(palette.muted)),
            Span::styled(
                format!(" {} ", result.sentiment.label()),
                Style::default()
                    .fg(palette.selected_fg)
                    .bg(badge_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ])),
        chunks[3],
    );
}

fn sentiment_gauge(label: &str, value: u8, color: ratatui::style::Color) -> Gauge<'static> {
    Gauge::default()
        .gauge_style(Style::default().fg(color))
        .percent(u16::from(value.min(100)))
        .label(format!("{} {}%", label, value))
}
