//! Boolean-toggle control
//!
//! A rail control that flips on confirm, no editing mode.

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub struct Toggle {
    label: &'static str,
    pub on: bool,
    pub focused: bool,
    pub frame: Rect,
}

impl Toggle {
    pub fn new(label: &'static str, on: bool) -> Self {
        Self {
            label,
            on,
            focused: false,
            frame: Rect::default(),
        }
    }

    /// Flip the switch; returns the new state.
    pub fn flip(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    fn value(&self) -> &'static str {
        if self.on {
            "on"
        } else {
            "off"
        }
    }

    pub fn width(&self) -> u16 {
        UnicodeWidthStr::width(self.label).max(3) as u16 + 4
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let value_color = if self.on {
            theme.bullish
        } else {
            theme.control_label
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.label)
            .title_style(Style::default().fg(theme.control_label))
            .border_style(Style::default().fg(theme.control_border(self.focused)));
        let text = Paragraph::new(self.value())
            .alignment(Alignment::Center)
            .style(Style::default().fg(value_color))
            .block(block);
        f.render_widget(text, self.frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_returns_new_state() {
        let mut toggle = Toggle::new("Auto", false);
        assert!(toggle.flip());
        assert!(toggle.on);
        assert!(!toggle.flip());
        assert!(!toggle.on);
    }
}
