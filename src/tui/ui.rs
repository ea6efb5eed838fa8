// UI rendering logic
//
// Layout happens through the scene (which pins every control's frame for
// the navigator), then each panel renders into its area. The focus hint is
// drawn last so it overlays whatever sits under it.

use super::app::App;
use super::components::status_bar;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Fresh frames first: navigation between two draws must resolve
    // against what is actually on screen
    app.scene.layout(f.area());

    render_title(f, app.scene.title_area(), app);
    app.scene.render(f, &app.theme);
    app.chart.render(f, app.scene.chart_area(), &app.theme);
    status_bar::render(f, app.scene.status_area(), app);

    render_focus_guide(f, app);
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let live = if app.scene.auto_refresh_on() {
        "  ● live"
    } else {
        ""
    };
    let title = Paragraph::new(format!(" ▶ telly{}", live)).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(title, area);
}

/// Render the focus hint next to the focused element
///
/// Anchored just right of the element's frame, top-aligned, and clamped
/// onto the screen. Uses `Clear` so the hint is readable on top of
/// whatever it covers.
fn render_focus_guide(f: &mut Frame, app: &App) {
    let guide = app.nav.guide();
    if !guide.is_visible() {
        return;
    }

    let area = f.area();
    let text = guide.text();
    let anchor = guide.anchor();

    // 1 line of text, 2 chars padding each side, plus the border
    let width = (UnicodeWidthStr::width(text) as u16 + 4).min(area.width);
    let height = 3u16.min(area.height);

    let mut x = anchor.right().saturating_add(2);
    let mut y = anchor.y;
    if x.saturating_add(width) > area.right() {
        x = area.right().saturating_sub(width);
    }
    if y.saturating_add(height) > area.bottom() {
        y = area.bottom().saturating_sub(height);
    }

    let hint_area = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.hint_border));
    let hint = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.hint_text))
        .block(block);

    f.render_widget(Clear, hint_area);
    f.render_widget(hint, hint_area);
}
