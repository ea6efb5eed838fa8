//! Plain actionable control
//!
//! A rail or chip button: a label that does one thing on confirm. Favorite
//! chips use the accent flag to stand apart from rail buttons.

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub struct Button {
    label: String,
    /// Render with the favorite accent color
    accent: bool,
    pub focused: bool,
    pub frame: Rect,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            accent: false,
            focused: false,
            frame: Rect::default(),
        }
    }

    pub fn accented(label: impl Into<String>) -> Self {
        Self {
            accent: true,
            ..Self::new(label)
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> u16 {
        UnicodeWidthStr::width(self.label.as_str()) as u16 + 4
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let label_color = if self.accent {
            theme.favorite
        } else {
            theme.control_value
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.control_border(self.focused)));
        let text = Paragraph::new(self.label.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(label_color))
            .block(block);
        f.render_widget(text, self.frame);
    }
}
