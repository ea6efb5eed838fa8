// Configuration for the dashboard
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/telly/config.toml)
// 3. Built-in defaults (lowest priority)

use crate::feed::{Timeframe, SYMBOLS};
use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Candle count bounds for the rail stepper and config validation
pub const MIN_CANDLES: u16 = 20;
pub const MAX_CANDLES: u16 = 200;

/// Auto-refresh cadences offered by the interval picker, in seconds
pub const REFRESH_CHOICES: [u64; 4] = [2, 5, 10, 30];

/// Log file rotation cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    /// Parse a config value; unknown values fall back to daily
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "hourly" => LogRotation::Hourly,
            "never" => LogRotation::Never,
            _ => LogRotation::Daily,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Write JSON log files (stdout belongs to the TUI, so file logs are
    /// the only place logs go)
    pub file_enabled: bool,

    /// Directory for log files
    pub dir: PathBuf,

    /// Rotation cadence for log files
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: true,
            dir: PathBuf::from("./logs"),
            rotation: LogRotation::Daily,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Symbol shown on startup
    pub symbol: String,

    /// Candle interval shown on startup
    pub timeframe: Timeframe,

    /// Number of candles to subscribe for
    pub candles: u16,

    /// Whether auto-refresh starts enabled
    pub auto_refresh: bool,

    /// Auto-refresh cadence in seconds (snapped to REFRESH_CHOICES)
    pub refresh_secs: u64,

    /// Theme name: "auto", "dracula", "nord", "gruvbox"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    dir: Option<String>,
    rotation: Option<String>,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    symbol: Option<String>,
    timeframe: Option<String>,
    candles: Option<u16>,
    auto_refresh: Option<bool>,
    refresh_secs: Option<u64>,
    theme: Option<String>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/telly/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("telly").join("config.toml"))
    }

    /// Create config template if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r#"# telly configuration
# Uncomment and modify options as needed

# Theme: auto, dracula, nord, gruvbox
# theme = "auto"

# Symbol shown on startup
# symbol = "BTC-USD"

# Candle interval: 1m, 5m, 15m, 1h, 4h, 1d
# timeframe = "1m"

# Candles per chart (20-200)
# candles = 60

# Auto-refresh the chart (toggle at runtime from the rail)
# auto_refresh = true

# Auto-refresh cadence in seconds: 2, 5, 10 or 30
# refresh_secs = 5

# Logging configuration
# [logging]
# level = "info"        # trace, debug, info, warn, error (RUST_LOG env var overrides this)
# file_enabled = true   # JSON log files (stdout belongs to the TUI)
# dir = "./logs"        # Log file directory (TELLY_LOG_DIR env var overrides this)
# rotation = "daily"    # hourly, daily, never
"#;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# telly configuration

# Theme: auto, dracula, nord, gruvbox
theme = "{theme}"

# Symbol shown on startup
symbol = "{symbol}"

# Candle interval: 1m, 5m, 15m, 1h, 4h, 1d
timeframe = "{timeframe}"

# Candles per chart (20-200)
candles = {candles}

# Auto-refresh the chart
auto_refresh = {auto_refresh}

# Auto-refresh cadence in seconds: 2, 5, 10 or 30
refresh_secs = {refresh_secs}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
dir = "{log_dir}"
rotation = "{rotation}"
"#,
            theme = self.theme,
            symbol = self.symbol,
            timeframe = self.timeframe.label(),
            candles = self.candles,
            auto_refresh = self.auto_refresh,
            refresh_secs = self.refresh_secs,
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            log_dir = self.logging.dir.display(),
            rotation = self.logging.rotation.as_str(),
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Theme: env > file > default
        let theme = std::env::var("TELLY_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or_else(|| "auto".to_string());

        // Symbol: env > file > default, validated against the catalog
        let symbol = std::env::var("TELLY_SYMBOL")
            .ok()
            .or(file.symbol)
            .unwrap_or_else(|| SYMBOLS[0].to_string());
        let symbol = if SYMBOLS.contains(&symbol.as_str()) {
            symbol
        } else {
            eprintln!("Warning: Unknown symbol {symbol:?}, using {}", SYMBOLS[0]);
            SYMBOLS[0].to_string()
        };

        // Timeframe: file > default
        let timeframe = match file.timeframe {
            Some(label) => Timeframe::parse(&label).unwrap_or_else(|| {
                eprintln!("Warning: Unknown timeframe {label:?}, using 1m");
                Timeframe::M1
            }),
            None => Timeframe::M1,
        };

        // Candle count: file > default, clamped to the stepper range
        let candles = file
            .candles
            .unwrap_or(60)
            .clamp(MIN_CANDLES, MAX_CANDLES);

        let auto_refresh = file.auto_refresh.unwrap_or(true);

        // Cadence snaps to the values the interval picker offers
        let refresh_secs = nearest_refresh_choice(file.refresh_secs.unwrap_or(5));

        // Logging settings: env for the dir, file for the rest
        // (RUST_LOG env var handled in logging init)
        let file_logging = file.logging.unwrap_or_default();
        let dir = std::env::var("TELLY_LOG_DIR")
            .ok()
            .or(file_logging.dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./logs"));
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or_else(|| "info".to_string()),
            file_enabled: file_logging.file_enabled.unwrap_or(true),
            dir,
            rotation: file_logging
                .rotation
                .map(|value| LogRotation::parse(&value))
                .unwrap_or(LogRotation::Daily),
        };

        Self {
            symbol,
            timeframe,
            candles,
            auto_refresh,
            refresh_secs,
            theme,
            logging,
        }
    }
}

/// Snap an arbitrary cadence to the nearest offered choice
fn nearest_refresh_choice(secs: u64) -> u64 {
    REFRESH_CHOICES
        .into_iter()
        .min_by_key(|choice| choice.abs_diff(secs))
        .unwrap_or(5)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol: SYMBOLS[0].to_string(),
            timeframe: Timeframe::M1,
            candles: 60,
            auto_refresh: true,
            refresh_secs: 5,
            theme: "auto".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_consistent() {
        let config = Config::default();
        assert!(SYMBOLS.contains(&config.symbol.as_str()));
        assert!((MIN_CANDLES..=MAX_CANDLES).contains(&config.candles));
        assert!(REFRESH_CHOICES.contains(&config.refresh_secs));
    }

    #[test]
    fn test_nearest_refresh_choice() {
        assert_eq!(nearest_refresh_choice(1), 2);
        assert_eq!(nearest_refresh_choice(5), 5);
        assert_eq!(nearest_refresh_choice(7), 5);
        assert_eq!(nearest_refresh_choice(9), 10);
        assert_eq!(nearest_refresh_choice(3600), 30);
    }

    #[test]
    fn test_rotation_parse_falls_back_to_daily() {
        assert_eq!(LogRotation::parse("hourly"), LogRotation::Hourly);
        assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
        assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    }

    #[test]
    fn test_to_toml_stays_parseable() {
        let config = Config::default();
        let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();

        assert_eq!(parsed.symbol.as_deref(), Some("BTC-USD"));
        assert_eq!(parsed.timeframe.as_deref(), Some("1m"));
        assert_eq!(parsed.candles, Some(60));
        assert_eq!(parsed.auto_refresh, Some(true));
        let logging = parsed.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("info"));
        assert_eq!(logging.rotation.as_deref(), Some("daily"));
    }

    #[test]
    fn test_partial_file_config_parses() {
        let parsed: FileConfig = toml::from_str("theme = \"nord\"\n").unwrap();
        assert_eq!(parsed.theme.as_deref(), Some("nord"));
        assert!(parsed.symbol.is_none());
        assert!(parsed.logging.is_none());
    }
}
