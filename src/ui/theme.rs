use ratatui::style::{Color, Style};

use crate::preferences::Theme;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub positive: Color,
    pub negative: Color,
    pub curve: Color,
    pub bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Yellow,
                highlight: Color::Cyan,
                positive: Color::Green,
                negative: Color::Red,
                curve: Color::Cyan,
                bg: Color::Reset,
            },
            Theme::Light => Self {
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Magenta,
                highlight: Color::Blue,
                positive: Color::Green,
                negative: Color::Red,
                curve: Color::Blue,
                bg: Color::White,
            },
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn label(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn signed(&self, value: f64) -> Style {
        if value > 0.0 {
            Style::default().fg(self.positive)
        } else if value < 0.0 {
            Style::default().fg(self.negative)
        } else {
            self.text()
        }
    }
}
