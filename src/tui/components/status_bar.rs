// Status bar component
//
// Renders the remote key help plus the live subscription state at the
// bottom: symbol, last price, auto-refresh cadence, last update time. The
// key help follows the input layer, so while a control is open for editing
// it explains the editing keys instead of navigation.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: key help and full subscription state
/// - Narrow: subscription state only
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);

    let price = match app.chart.last_close() {
        Some(price) if price >= 1000.0 => format!(" {price:.0}"),
        Some(price) if price >= 10.0 => format!(" {price:.2}"),
        Some(price) => format!(" {price:.4}"),
        None => String::new(),
    };

    let refresh = if app.scene.auto_refresh_on() {
        format!("auto {}s", app.scene.interval_secs())
    } else {
        "manual".to_string()
    };

    let updated = match app.chart.last_update() {
        Some(at) => format!(" │ upd {}", at.format("%H:%M:%S")),
        None => String::new(),
    };

    let market = format!("{}{} │ {}{}", app.scene.symbol(), price, refresh, updated);

    let status_text = if bp.at_least(Breakpoint::Wide) {
        let help = if app.scene.is_editing() {
            "↑↓ adjust │ ⏎ commit │ esc cancel"
        } else {
            "↑↓←→ move │ ⏎ select │ f pin │ x unpin │ q quit"
        };
        format!(" {help} │ {market}")
    } else {
        format!(" {market}")
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
