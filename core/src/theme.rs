use colored::Color;
use codeiv_webclient::Difficulty;

use crate::config::ThemeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeSettings {
    pub dark: bool,
}

impl From<ThemeConfig> for ThemeSettings {
    fn from(c: ThemeConfig) -> Self {
        Self { dark: c.dark }
    }
}

impl ThemeSettings {
    /// >= 90 green, >= 70 yellow, otherwise red.
    pub fn score_color(&self, score: u8) -> Color {
        match (score, self.dark) {
            (90.., false) => Color::Green,
            (90.., true) => Color::BrightGreen,
            (70..=89, false) => Color::Yellow,
            (70..=89, true) => Color::BrightYellow,
            (_, false) => Color::Red,
            (_, true) => Color::BrightRed,
        }
    }

    pub fn difficulty_color(&self, d: Difficulty) -> Color {
        use Difficulty::*;
        match d {
            Easy => self.score_color(100),
            Medium => self.score_color(80),
            Hard => self.score_color(0),
        }
    }

    pub fn low_time_color(&self) -> Color {
        self.score_color(0)
    }

    pub fn accent(&self) -> Color {
        if self.dark {
            Color::BrightBlue
        } else {
            Color::Blue
        }
    }
}
