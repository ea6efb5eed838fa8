//! Numeric-input control
//!
//! A rail control holding an integer inside a fixed range. Confirm opens it
//! for editing; while open, up/down move by one step and confirm commits
//! (Esc restores the value it opened with).

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub struct Stepper {
    label: &'static str,
    value: i64,
    min: i64,
    max: i64,
    step: i64,
    /// Value to restore when editing is cancelled
    restore: i64,
    pub focused: bool,
    pub editing: bool,
    pub frame: Rect,
}

impl Stepper {
    pub fn new(label: &'static str, min: i64, max: i64, step: i64, value: i64) -> Self {
        Self {
            label,
            value: value.clamp(min, max),
            min,
            max,
            step,
            restore: value.clamp(min, max),
            focused: false,
            editing: false,
            frame: Rect::default(),
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn set_value(&mut self, value: i64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Move by whole steps while editing; clamps at the range ends.
    pub fn adjust(&mut self, delta: i64) {
        self.set_value(self.value + delta * self.step);
    }

    pub fn begin_editing(&mut self) {
        self.restore = self.value;
        self.editing = true;
    }

    /// Close the editor keeping the current value. Returns whether it
    /// differs from the one editing started with.
    pub fn commit(&mut self) -> bool {
        self.editing = false;
        self.value != self.restore
    }

    pub fn cancel(&mut self) {
        self.value = self.restore;
        self.editing = false;
    }

    pub fn width(&self) -> u16 {
        let value_width = self.max.to_string().len();
        let label_width = UnicodeWidthStr::width(self.label);
        value_width.max(label_width) as u16 + 4
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
        let text = Paragraph::new(self.value.to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(value_color))
            .block(block);
        f.render_widget(text, self.frame);
    }
}
