use coinchart_core::Sentiment;
use egui::{Color32, Visuals};

const GREEN: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);
const RED: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn toggle(&mut self) {
        self.dark = !self.dark;
    }

    pub fn visuals(self) -> Visuals {
        if self.dark {
            Visuals::dark()
        } else {
            Visuals::light()
        }
    }

    /// Label for the toggle button, naming the mode it switches to
    pub fn toggle_label(self) -> &'static str {
        if self.dark {
            "☀ Light"
        } else {
            "🌙 Dark"
        }
    }

    pub fn sentiment_color(self, sentiment: Sentiment) -> Color32 {
        match sentiment {
            Sentiment::Affirmative => GREEN,
            Sentiment::Warning => RED,
            Sentiment::Neutral => {
                if self.dark {
                    Color32::LIGHT_GRAY
                } else {
                    Color32::DARK_GRAY
                }
            }
        }
    }

    /// Line color for the price chart
    pub fn chart_color(self, sentiment: Sentiment) -> Color32 {
        match sentiment {
            Sentiment::Neutral => Color32::from_rgb(0x34, 0x98, 0xdb),
            other => self.sentiment_color(other),
        }
    }
}
