use crate::app::App;
use crate::ui::colors::ColorPalette;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

const ASCII_LINES: &[&str] = &[
    " _   _  _____ __        __ ____   ____   _____  ____   _  __",
    "| \\ | || ____|\\ \\      / // ___| |  _ \\ | ____|/ ___| | |/ /",
    "|  \\| ||  _|   \\ \\ /\\ / / \\___ \\ | | | ||  _|  \\___ \\ | ' /",
    "| |\\  || |___   \\ V  V /   ___) || |_| || |___  ___) || . \\",
    "|_| \\_||_____|   \\_/\\_/   |____/ |____/ |_____||____/ |_|\\_\\",
];

const CHUNK_WIDTH: usize = 8;
const TOTAL_CHUNKS: usize = 8; // N, E, W, S, D, E, S, K
const FRAMES_PER_CHUNK: u32 = 3;

/// Banner with one chunk of letters hopping up a row, advanced by `app.animation_frame`.
pub fn render_animated_banner(app: &App, palette: &ColorPalette) -> Vec<Line<'static>> {
    let normal_style = Style::default().fg(palette.primary);
    let bold_style = Style::default()
        .fg(palette.primary)
        .add_modifier(Modifier::BOLD);

    let current_chunk_idx = (app.animation_frame / FRAMES_PER_CHUNK) as usize % TOTAL_CHUNKS;
    let chunk_start = current_chunk_idx * CHUNK_WIDTH;
    let chunk_end = chunk_start + CHUNK_WIDTH;

    let mut text = Vec::new();

    for (line_idx, original_line) in ASCII_LINES.iter().enumerate() {
        let below: Vec<char> = ASCII_LINES
            .get(line_idx + 1)
            .map(|l| l.chars().collect())
            .unwrap_or_default();
        let mut spans = Vec::new();
        let mut current_span = String::new();
        let mut current_style = normal_style;

        for (char_idx, original_char) in original_line.chars().enumerate() {
            let in_chunk = char_idx >= chunk_start && char_idx < chunk_end;

            let (ch, style) = match below.get(char_idx) {
                Some(&below_char) if in_chunk && !below_char.is_whitespace() => {
                    (below_char, bold_style)
                }
                _ if in_chunk && !original_char.is_whitespace() => (' ', normal_style),
                _ => (original_char, normal_style),
            };

            if current_style != style && !current_span.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current_span), current_style));
            }
            current_style = style;
            current_span.push(ch);
        }

        if !current_span.is_empty() {
            spans.push(Span::styled(current_span, current_style));
        }
        text.push(Line::from(spans));
    }

    text
}
