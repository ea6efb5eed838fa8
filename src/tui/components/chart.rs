//! Candlestick chart panel
//!
//! Draws OHLC candles as one terminal column each: a heavy bar for the
//! open/close body and a light bar for the high/low wick, colored by
//! candle direction. The newest candles win when the series is wider than
//! the panel. The panel is display-only and never focusable; it just shows
//! whatever the feed last delivered.

use crate::feed::{Candle, Timeframe};
use crate::theme::Theme;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BODY: char = '┃';
const WICK: char = '│';

pub struct ChartPanel {
    symbol: String,
    timeframe: Timeframe,
    candles: Vec<Candle>,
    last_update: Option<DateTime<Utc>>,
}

impl ChartPanel {
    pub fn new(symbol: String, timeframe: Timeframe) -> Self {
        Self {
            symbol,
            timeframe,
            candles: Vec::new(),
            last_update: None,
        }
    }

    /// Replace the whole series after a (re)subscribe.
    pub fn set_snapshot(&mut self, symbol: String, timeframe: Timeframe, candles: Vec<Candle>) {
        self.symbol = symbol;
        self.timeframe = timeframe;
        self.candles = candles;
        self.last_update = Some(Utc::now());
    }

    /// Append one live candle, keeping at most `keep` of them.
    pub fn push_candle(&mut self, candle: Candle, keep: usize) {
        self.candles.push(candle);
        if self.candles.len() > keep {
            let excess = self.candles.len() - keep;
            self.candles.drain(..excess);
        }
        self.last_update = Some(Utc::now());
    }

    pub fn last_close(&self) -> Option<f64> {
        self.candles.last().map(|candle| candle.close)
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let title = format!(" {} · {} ", self.symbol, self.timeframe.label());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().fg(theme.title))
            .border_style(Style::default().fg(theme.border));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if self.candles.is_empty() {
            let placeholder = Paragraph::new("waiting for market data")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.axis));
            f.render_widget(placeholder, inner);
            return;
        }
        if inner.height < 2 || inner.width == 0 {
            return;
        }

        let visible = visible_tail(&self.candles, inner.width as usize);
        let low = visible.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let high = visible
            .iter()
            .map(|c| c.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let rows = inner.height;

        let buf = f.buffer_mut();
        for (i, candle) in visible.iter().enumerate() {
            let x = inner.x + i as u16;
            let color = if candle.is_bullish() {
                theme.bullish
            } else {
                theme.bearish
            };

            let wick_top = price_row(candle.high, low, high, rows);
            let wick_bottom = price_row(candle.low, low, high, rows);
            let body_top = price_row(candle.open.max(candle.close), low, high, rows);
            let body_bottom = price_row(candle.open.min(candle.close), low, high, rows);

            for row in wick_top..=wick_bottom {
                let glyph = if (body_top..=body_bottom).contains(&row) {
                    BODY
                } else {
                    WICK
                };
                buf[(x, inner.y + row)].set_char(glyph).set_fg(color);
            }
        }

        // Range labels drawn over the leftmost columns
        let axis_style = Style::default().fg(theme.axis);
        buf.set_string(inner.x, inner.y, format_price(high), axis_style);
        buf.set_string(
            inner.x,
            inner.y + rows - 1,
            format_price(low),
            axis_style,
        );
    }
}

/// Newest slice of the series that fits into `width` columns.
fn visible_tail(candles: &[Candle], width: usize) -> &[Candle] {
    let skip = candles.len().saturating_sub(width);
    &candles[skip..]
}

/// Map a price into a row index, 0 at the top of the panel.
fn price_row(price: f64, low: f64, high: f64, rows: u16) -> u16 {
    let span = (high - low).max(f64::EPSILON);
    let t = ((price - low) / span).clamp(0.0, 1.0);
    let steps = f64::from(rows - 1);
    (steps - t * steps).round() as u16
}

fn format_price(price: f64) -> String {
    if price >= 1000.0 {
        format!("{price:.0}")
    } else if price >= 10.0 {
        format!("{price:.2}")
    } else {
        format!("{price:.4}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            time: Utc::now(),
            open,
            high,
            low,
            close,
        }
    }

    #[test]
    fn test_price_row_maps_range_onto_rows() {
        // 10 rows covering 100..200: extremes land on the edges
        assert_eq!(price_row(200.0, 100.0, 200.0, 10), 0);
        assert_eq!(price_row(100.0, 100.0, 200.0, 10), 9);
        // Midpoint rounds to the nearer row
        assert_eq!(price_row(150.0, 100.0, 200.0, 11), 5);
    }

    #[test]
    fn test_price_row_flat_range_does_not_divide_by_zero() {
        assert_eq!(price_row(50.0, 50.0, 50.0, 8), 7);
    }

    #[test]
    fn test_visible_tail_keeps_newest() {
        let candles: Vec<Candle> = (0..10)
            .map(|i| candle(f64::from(i), f64::from(i) + 1.0, f64::from(i) - 1.0, f64::from(i)))
            .collect();

        let tail = visible_tail(&candles, 4);
        assert_eq!(tail.len(), 4);
        assert_eq!(tail[0].open, 6.0);

        let all = visible_tail(&candles, 100);
        assert_eq!(all.len(), 10);
    }

    #[test]
    fn test_push_candle_trims_to_keep() {
        let mut panel = ChartPanel::new("BTC-USD".to_string(), Timeframe::M1);
        panel.set_snapshot(
            "BTC-USD".to_string(),
            Timeframe::M1,
            (0..5).map(|i| candle(f64::from(i), 1.0, 0.0, 1.0)).collect(),
        );

        panel.push_candle(candle(9.0, 10.0, 8.0, 9.5), 5);
        assert_eq!(panel.candles.len(), 5);
        assert_eq!(panel.last_close(), Some(9.5));
        // Oldest candle dropped
        assert_eq!(panel.candles[0].open, 1.0);
    }

    #[test]
    fn test_format_price_precision_scales() {
        assert_eq!(format_price(64123.7), "64124");
        assert_eq!(format_price(38.456), "38.46");
        assert_eq!(format_price(0.1412), "0.1412");
    }
}
