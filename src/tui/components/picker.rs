//! Enumerable-choice control
//!
//! A rail control holding one selected option out of a fixed list. Confirm
//! opens it for editing; while open, up/down walk the list and confirm
//! commits (Esc restores the value it opened with).

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub struct Picker {
    label: &'static str,
    options: Vec<String>,
    selected: usize,
    /// Selection to restore when editing is cancelled
    restore: usize,
    pub focused: bool,
    pub editing: bool,
    pub frame: Rect,
}

impl Picker {
    pub fn new(label: &'static str, options: Vec<String>) -> Self {
        Self {
            label,
            options,
            selected: 0,
            restore: 0,
            focused: false,
            editing: false,
            frame: Rect::default(),
        }
    }

    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Jump to an option by value. Unknown values are ignored.
    /// Returns whether the selection changed.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|option| option == value) {
            Some(index) if index != self.selected => {
                self.selected = index;
                true
            }
            _ => false,
        }
    }

    /// Walk the list while editing; clamps at both ends.
    pub fn step(&mut self, delta: i64) {
        let last = self.options.len().saturating_sub(1) as i64;
        self.selected = (self.selected as i64 + delta).clamp(0, last) as usize;
    }

    pub fn begin_editing(&mut self) {
        self.restore = self.selected;
        self.editing = true;
    }

    /// Close the editor keeping the current selection. Returns whether the
    /// value differs from the one editing started with.
    pub fn commit(&mut self) -> bool {
        self.editing = false;
        self.selected != self.restore
    }

    pub fn cancel(&mut self) {
        self.selected = self.restore;
        self.editing = false;
    }

    /// Rail width for this control: widest option or label, plus borders
    /// and padding.
    pub fn width(&self) -> u16 {
        let widest = self
            .options
            .iter()
            .map(|option| UnicodeWidthStr::width(option.as_str()))
            .max()
            .unwrap_or(0);
        let label_width = UnicodeWidthStr::width(self.label);
        widest.max(label_width) as u16 + 4
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let border = if self.editing {
            theme.control_editing
        } else {
            theme.control_border(self.focused)
        };
        let value_color = if self.editing {
            theme.control_editing
        } else {
            theme.control_value
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.label)
            .title_style(Style::default().fg(theme.control_label))
            .border_style(Style::default().fg(border));
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

    fn picker() -> Picker {
        Picker::new(
            "Symbol",
            vec!["BTC-USD".into(), "ETH-USD".into(), "SOL-USD".into()],
        )
    }

    #[test]
    fn test_step_clamps_at_both_ends() {
        let mut picker = picker();
        picker.step(-1);
        assert_eq!(picker.value(), "BTC-USD");

        picker.step(1);
        picker.step(1);
        picker.step(1);
        assert_eq!(picker.value(), "SOL-USD");
    }

    #[test]
    fn test_cancel_restores_opening_value() {
        let mut picker = picker();
        picker.begin_editing();
        picker.step(2);
        assert_eq!(picker.value(), "SOL-USD");

        picker.cancel();
        assert_eq!(picker.value(), "BTC-USD");
        assert!(!picker.editing);
    }

    #[test]
    fn test_commit_reports_change() {
        let mut picker = picker();
        picker.begin_editing();
        picker.step(1);
        assert!(picker.commit());

        picker.begin_editing();
        assert!(!picker.commit());
    }

    #[test]
    fn test_select_value() {
        let mut picker = picker();
        assert!(picker.select_value("ETH-USD"));
        assert_eq!(picker.value(), "ETH-USD");

        assert!(!picker.select_value("ETH-USD"));
        assert!(!picker.select_value("XRP-USD"));
        assert_eq!(picker.value(), "ETH-USD");
    }
}
