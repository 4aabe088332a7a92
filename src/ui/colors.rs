use crate::category::Category;
use ratatui::style::Color;

pub struct ColorPalette {
    pub primary: Color,
    pub accent: Color,
    pub error: Color,
    pub muted: Color,
    pub positive: Color,
    pub negative: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
}

impl ColorPalette {
    pub fn newsroom() -> Self {
        Self {
            // Press blue
            primary: Color::Rgb(0x25, 0x63, 0xEB),
            accent: Color::Cyan,
            error: Color::Rgb(0xEF, 0x44, 0x44),
            muted: Color::Gray,
            positive: Color::Rgb(0x22, 0xC5, 0x5E),
            negative: Color::Rgb(0xEF, 0x44, 0x44),
            selected_bg: Color::Rgb(0x25, 0x63, 0xEB),
            selected_fg: Color::White,
        }
    }

    /// Badge colour for a category code; unknown codes use the accent.
    pub fn category(&self, code: &str) -> Color {
        match Category::from_code(code) {
            Some(Category::Tech) => Color::Rgb(0x8B, 0x5C, 0xF6),
            Some(Category::Economy) => Color::Rgb(0xF5, 0x9E, 0x0B),
            Some(Category::Politics) => Color::Rgb(0xEC, 0x48, 0x99),
            Some(Category::World) => Color::Rgb(0x14, 0xB8, 0xA6),
            Some(Category::Sports) => Color::Rgb(0x22, 0xC5, 0x5E),
            Some(Category::All) | None => self.accent,
        }
    }
}
