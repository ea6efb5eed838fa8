// Synthetic market data feed
//
// A background task that plays the role of an exchange: it owns a seeded
// random-walk generator and answers subscription commands with candle
// snapshots, then keeps appending candles while auto-refresh is on. The
// event loop talks to it over channels only, so the TUI never blocks on
// data generation and the feed can be shut down like any other task.
//
// Walks are seeded per symbol: watching the same symbol twice replays the
// same market, which keeps demo sessions reproducible.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

/// Symbols offered by the dashboard.
pub const SYMBOLS: &[&str] = &[
    "BTC-USD", "ETH-USD", "SOL-USD", "DOGE-USD", "AVAX-USD", "LINK-USD",
];

/// Candle interval offered by the timeframe picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    H1,
    H4,
    D1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 6] = [
        Timeframe::M1,
        Timeframe::M5,
        Timeframe::M15,
        Timeframe::H1,
        Timeframe::H4,
        Timeframe::D1,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tf| tf.label() == label)
    }

    /// Wall-clock span of one candle.
    pub fn step(self) -> chrono::Duration {
        match self {
            Timeframe::M1 => chrono::Duration::minutes(1),
            Timeframe::M5 => chrono::Duration::minutes(5),
            Timeframe::M15 => chrono::Duration::minutes(15),
            Timeframe::H1 => chrono::Duration::hours(1),
            Timeframe::H4 => chrono::Duration::hours(4),
            Timeframe::D1 => chrono::Duration::days(1),
        }
    }
}

/// One OHLC candle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Commands from the event loop to the feed task.
#[derive(Debug)]
pub enum FeedCommand {
    /// Replace the subscription and answer with a fresh snapshot.
    Watch {
        symbol: String,
        timeframe: Timeframe,
        count: usize,
    },
    /// Advance the market by one candle and resend the full series.
    Refresh,
    /// Reconfigure the auto-refresh timer.
    AutoRefresh { enabled: bool, every: Duration },
}

/// Events from the feed task to the event loop. Each carries its
/// subscription so the app can drop events that raced a re-subscribe.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Snapshot {
        symbol: String,
        timeframe: Timeframe,
        candles: Vec<Candle>,
    },
    Candle {
        symbol: String,
        timeframe: Timeframe,
        candle: Candle,
    },
}

/// Seeded geometric random walk producing OHLC candles.
struct RandomWalk {
    rng: StdRng,
    last_close: f64,
}

impl RandomWalk {
    fn for_symbol(symbol: &str) -> Self {
        let seed = symbol
            .bytes()
            .fold(0u64, |acc, byte| acc.wrapping_mul(31).wrapping_add(u64::from(byte)));
        Self {
            rng: StdRng::seed_from_u64(seed),
            last_close: base_price(symbol),
        }
    }

    fn next_candle(&mut self, time: DateTime<Utc>) -> Candle {
        let open = self.last_close;
        // Per-candle move within +/-1.5%; prices stay strictly positive
        let drift = self.rng.gen_range(-0.015..0.016);
        let close = open * (1.0 + drift);
        let wiggle = (open * 0.004).max(1e-9);
        let high = open.max(close) + self.rng.gen_range(0.0..wiggle);
        let low = open.min(close) - self.rng.gen_range(0.0..wiggle.min(open.min(close) * 0.5));
        self.last_close = close;
        Candle {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// A series of `count` candles ending at the current time.
    fn series(&mut self, timeframe: Timeframe, count: usize) -> Vec<Candle> {
        let step = timeframe.step();
        let start = Utc::now() - step * count as i32;
        (0..count)
            .map(|i| self.next_candle(start + step * (i as i32 + 1)))
            .collect()
    }
}

fn base_price(symbol: &str) -> f64 {
    match symbol {
        "BTC-USD" => 64000.0,
        "ETH-USD" => 3400.0,
        "SOL-USD" => 180.0,
        "DOGE-USD" => 0.14,
        "AVAX-USD" => 38.0,
        "LINK-USD" => 15.0,
        _ => 100.0,
    }
}

/// Live state of the current subscription inside the feed task.
struct FeedState {
    walk: RandomWalk,
    symbol: String,
    timeframe: Timeframe,
    count: usize,
    series: Vec<Candle>,
}

impl FeedState {
    fn open(symbol: String, timeframe: Timeframe, count: usize) -> Self {
        let mut walk = RandomWalk::for_symbol(&symbol);
        let series = walk.series(timeframe, count);
        Self {
            walk,
            symbol,
            timeframe,
            count,
            series,
        }
    }

    /// Append the next candle, trimming the series to the subscribed count.
    fn advance(&mut self) -> Candle {
        let next_time = self
            .series
            .last()
            .map(|candle| candle.time + self.timeframe.step())
            .unwrap_or_else(Utc::now);
        let candle = self.walk.next_candle(next_time);
        self.series.push(candle);
        if self.series.len() > self.count {
            let excess = self.series.len() - self.count;
            self.series.drain(..excess);
        }
        candle
    }

    fn snapshot(&self) -> FeedEvent {
        FeedEvent::Snapshot {
            symbol: self.symbol.clone(),
            timeframe: self.timeframe,
            candles: self.series.clone(),
        }
    }
}

/// Run the feed task until shutdown or until the app side hangs up.
pub async fn run(
    mut commands: mpsc::Receiver<FeedCommand>,
    events: mpsc::Sender<FeedEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut state: Option<FeedState> = None;
    let mut auto_enabled = false;
    let mut ticker = tokio::time::interval(Duration::from_secs(5));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                tracing::info!("Feed received shutdown signal");
                return;
            }

            command = commands.recv() => {
                let Some(command) = command else {
                    return;
                };
                match command {
                    FeedCommand::Watch { symbol, timeframe, count } => {
                        tracing::info!(%symbol, timeframe = timeframe.label(), count, "Opening feed subscription");
                        let fresh = FeedState::open(symbol, timeframe, count);
                        if events.send(fresh.snapshot()).await.is_err() {
                            return;
                        }
                        state = Some(fresh);
                    }
                    FeedCommand::Refresh => {
                        if let Some(state) = state.as_mut() {
                            state.advance();
                            if events.send(state.snapshot()).await.is_err() {
                                return;
                            }
                        }
                    }
                    FeedCommand::AutoRefresh { enabled, every } => {
                        auto_enabled = enabled;
                        // interval() fires immediately; start one period out
                        ticker = tokio::time::interval_at(
                            tokio::time::Instant::now() + every,
                            every,
                        );
                        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                        tracing::debug!(enabled, every_secs = every.as_secs(), "Auto-refresh reconfigured");
                    }
                }
            }

            _ = ticker.tick(), if auto_enabled && state.is_some() => {
                if let Some(state) = state.as_mut() {
                    let candle = state.advance();
                    let event = FeedEvent::Candle {
                        symbol: state.symbol.clone(),
                        timeframe: state.timeframe,
                        candle,
                    };
                    if events.send(event).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_has_count_candles_in_time_order() {
        let mut walk = RandomWalk::for_symbol("BTC-USD");
        let series = walk.series(Timeframe::M5, 30);

        assert_eq!(series.len(), 30);
        for pair in series.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, chrono::Duration::minutes(5));
        }
    }

    #[test]
    fn test_candles_are_well_formed() {
        let mut walk = RandomWalk::for_symbol("ETH-USD");
        for candle in walk.series(Timeframe::M1, 100) {
            assert!(candle.high >= candle.open.max(candle.close));
            assert!(candle.low <= candle.open.min(candle.close));
            assert!(candle.low > 0.0);
        }
    }

    #[test]
    fn test_walk_is_continuous() {
        let mut walk = RandomWalk::for_symbol("SOL-USD");
        let series = walk.series(Timeframe::M1, 20);
        for pair in series.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
        }
    }

    #[test]
    fn test_walk_is_deterministic_per_symbol() {
        let mut first = RandomWalk::for_symbol("BTC-USD");
        let mut second = RandomWalk::for_symbol("BTC-USD");
        let a = first.next_candle(Utc::now());
        let b = second.next_candle(a.time);

        assert_eq!(a.open, b.open);
        assert_eq!(a.close, b.close);

        let mut other = RandomWalk::for_symbol("DOGE-USD");
        assert_ne!(other.next_candle(a.time).close, a.close);
    }

    #[test]
    fn test_advance_trims_series_to_count() {
        let mut state = FeedState::open("BTC-USD".to_string(), Timeframe::M1, 5);
        assert_eq!(state.series.len(), 5);

        let before_last = state.series.last().copied().unwrap();
        state.advance();
        state.advance();

        assert_eq!(state.series.len(), 5);
        // Newest candle continues the walk past the old tail
        assert!(state.series.last().unwrap().time > before_last.time);
    }

    #[test]
    fn test_timeframe_labels_roundtrip() {
        for timeframe in Timeframe::ALL {
            assert_eq!(Timeframe::parse(timeframe.label()), Some(timeframe));
        }
        assert_eq!(Timeframe::parse("7w"), None);
    }

    #[test]
    fn test_timeframe_step() {
        assert_eq!(Timeframe::M15.step(), chrono::Duration::minutes(15));
        assert_eq!(Timeframe::D1.step(), chrono::Duration::days(1));
    }
}
