use crate::loader::Notice;
use crate::ui::colors::ColorPalette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Index into `App::filtered` for the n-th grid article.
pub fn filtered_index(grid_index: usize) -> usize {
    grid_index + 1
}

pub fn render_error_message(f: &mut Frame, area: Rect, notice: &Notice, palette: &ColorPalette) {
    let lines = vec![
        Line::from(""),
        Line::styled(
            notice.title.clone(),
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(notice.message.clone()),
        Line::from(""),
        Line::styled("Press r to retry", Style::default().fg(palette.muted)),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Latest"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_empty_state(f: &mut Frame, area: Rect, title: &str, message: &str) {
    f.render_widget(
        Paragraph::new(message)
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Center),
        area,
    );
}

pub fn card_block<'a>(title: &'a str, selected: bool, palette: &ColorPalette) -> Block<'a> {
    let border = if selected {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}
