use crate::config::Config;
use crate::models::WeatherReading;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("weather service answered with status {0}")]
    Status(u16),
    #[error("weather service returned no value for the day")]
    MissingValue,
}

/// Same-day weather for the configured location.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn lookup(&self, date: NaiveDate) -> Result<WeatherReading, WeatherError>;
}

/// Looks the day up, substituting the unknown reading on any failure.
pub async fn lookup_or_unknown(weather: &dyn WeatherLookup, date: NaiveDate) -> WeatherReading {
    match weather.lookup(date).await {
        Ok(reading) => reading,
        Err(err) => {
            warn!("weather for {date} unavailable: {err}");
            WeatherReading::UNKNOWN
        }
    }
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: ArchiveDaily,
}

#[derive(Debug, Deserialize)]
struct ArchiveDaily {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

/// Open-Meteo historical archive client.
pub struct OpenMeteoArchive {
    client: Client,
    url: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
}

impl OpenMeteoArchive {
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(config.weather_timeout).build()?;
        Ok(Self {
            client,
            url: config.weather_url.clone(),
            latitude: config.latitude,
            longitude: config.longitude,
            timezone: config.timezone.clone(),
        })
    }

    fn query(&self, date: NaiveDate) -> Vec<(&'static str, String)> {
        let day = date.format("%Y-%m-%d").to_string();
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("start_date", day.clone()),
            ("end_date", day),
            ("daily", "temperature_2m_max,precipitation_sum".to_string()),
            ("timezone", self.timezone.clone()),
        ]
    }
}

#[async_trait]
impl WeatherLookup for OpenMeteoArchive {
    async fn lookup(&self, date: NaiveDate) -> Result<WeatherReading, WeatherError> {
        let response = self
            .client
            .get(&self.url)
            .query(&self.query(date))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body: ArchiveResponse = response.json().await?;
        reading_from(body.daily)
    }
}

fn reading_from(daily: ArchiveDaily) -> Result<WeatherReading, WeatherError> {
    let temperature = daily.temperature_2m_max.first().copied().flatten();
    let precipitation = daily.precipitation_sum.first().copied().flatten();
    if temperature.is_none() && precipitation.is_none() {
        return Err(WeatherError::MissingValue);
    }
    Ok(WeatherReading {
        temperature,
        precipitation,
    })
}
