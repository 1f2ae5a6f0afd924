use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_DATA_PATH: &str = "data/tips.csv";
pub const DEFAULT_WEATHER_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Everything the process needs that is fixed at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub weather_url: String,
    pub weather_timeout: Duration,
    /// Worked days per month shown next to the actual count.
    pub target_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: 8080,
            latitude: 53.47,
            longitude: 14.50,
            timezone: "Europe/Warsaw".to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            weather_timeout: Duration::from_secs(5),
            target_days: 22,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            port: parsed(&lookup, "PORT", defaults.port),
            latitude: parsed(&lookup, "TIPS_LATITUDE", defaults.latitude),
            longitude: parsed(&lookup, "TIPS_LONGITUDE", defaults.longitude),
            timezone: lookup("TIPS_TIMEZONE").unwrap_or(defaults.timezone),
            weather_url: lookup("TIPS_WEATHER_URL").unwrap_or(defaults.weather_url),
            weather_timeout: Duration::from_secs(parsed(
                &lookup,
                "TIPS_WEATHER_TIMEOUT_SECS",
                defaults.weather_timeout.as_secs(),
            )),
            target_days: parsed(&lookup, "TIPS_TARGET_DAYS", defaults.target_days),
        }
    }
}

fn parsed<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid value for {key}: {value:?}");
            default
        }),
        None => default,
    }
}
