use crate::app::App;
use crate::settings::{self, SettingsField};
use crate::ui::colors::ColorPalette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn create_centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

pub fn create_popup_block(title: &str, primary_color: Color) -> Block {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(primary_color))
        .title(title)
        .title_style(
            Style::default()
                .fg(primary_color)
                .add_modifier(Modifier::BOLD),
        )
}

pub fn render_loading(f: &mut Frame, palette: &ColorPalette) {
    let popup_area = create_centered_popup(f.size(), 40, 5);
    let block = create_popup_block(" Loading ", palette.primary);
    let inner = block.inner(popup_area);

    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);
    f.render_widget(
        Paragraph::new("Fetching news...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White)),
        inner,
    );
}

pub fn render_settings(f: &mut Frame, app: &App, palette: &ColorPalette) {
    let Some(form) = app.settings_popup.as_ref() else {
        return;
    };
    let popup_area = create_centered_popup(f.size(), 80, 16);
    let block = create_popup_block(" Settings ", palette.primary);
    let inner = block.inner(popup_area);

    let field_style = |field: SettingsField| {
        if form.focus == field {
            Style::default()
                .fg(palette.selected_fg)
                .bg(palette.selected_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let language_label = format!(
        "< {} ({}) >",
        settings::language_name(&form.language).unwrap_or("Unknown"),
        form.language
    );

    let (status_color, status_text) = match app.status.as_ref() {
        _ if app.status_checking => (palette.muted, "Checking API keys...".to_string()),
        Some(status) if status.news_key_valid => (
            palette.positive,
            if status.has_user_news_key {
                "Using your NewsAPI key".to_string()
            } else {
                "Using the default NewsAPI key".to_string()
            },
        ),
        Some(status) if status.has_user_news_key => {
            (palette.error, "Your NewsAPI key was rejected".to_string())
        }
        Some(_) => (palette.error, "Enter a NewsAPI key".to_string()),
        None => (palette.muted, String::new()),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("NewsAPI key: ", Style::default().fg(palette.muted)),
            Span::styled(
                format!("{}_", form.display_key()),
                field_style(SettingsField::ApiKey),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Language:    ", Style::default().fg(palette.muted)),
            Span::styled(language_label, field_style(SettingsField::Language)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("● ", Style::default().fg(status_color)),
            Span::raw(status_text),
        ]),
    ];
    if let Some(status) = app.status.as_ref() {
        lines.push(Line::styled(
            status.message.clone(),
            Style::default().fg(palette.muted),
        ));
    }
    if let Some(flash) = app.flash.as_ref() {
        lines.push(Line::styled(flash.clone(), Style::default().fg(palette.error)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("You can also set ", Style::default().fg(Color::White)),
        Span::styled(
            "$NEWS_API_KEY",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" as environment variable", Style::default().fg(Color::White)),
    ]));
    lines.push(Line::styled(
        "Tab=field  ←/→=language  Ctrl+R=show key  Ctrl+U=clear key  Enter=save  Esc=close",
        Style::default().fg(palette.primary),
    ));

    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_popup_is_clamped_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(create_centered_popup(area, 40, 5), Rect::new(0, 2, 30, 5));
        assert_eq!(create_centered_popup(area, 10, 4), Rect::new(10, 3, 10, 4));
    }
}
