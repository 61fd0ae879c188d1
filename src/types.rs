/// Типы данных для обучения модели

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const KEY: &str = "key";
pub const FARE_AMOUNT: &str = "fare_amount";
pub const PICKUP_DATETIME: &str = "pickup_datetime";
pub const PICKUP_LONGITUDE: &str = "pickup_longitude";
pub const PICKUP_LATITUDE: &str = "pickup_latitude";
pub const DROPOFF_LONGITUDE: &str = "dropoff_longitude";
pub const DROPOFF_LATITUDE: &str = "dropoff_latitude";
pub const PASSENGER_COUNT: &str = "passenger_count";

/// Одна поездка из CSV. Пустые ячейки читаются как `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub key: String,
    pub fare_amount: Option<f64>,
    #[serde(deserialize_with = "deserialize_pickup_datetime")]
    pub pickup_datetime: Option<DateTime<Utc>>,
    pub pickup_longitude: Option<f64>,
    pub pickup_latitude: Option<f64>,
    pub dropoff_longitude: Option<f64>,
    pub dropoff_latitude: Option<f64>,
    pub passenger_count: Option<i64>,
}

impl Ride {
    pub fn is_complete(&self) -> bool {
        self.fare_amount.is_some()
            && self.pickup_datetime.is_some()
            && self.pickup_longitude.is_some()
            && self.pickup_latitude.is_some()
            && self.dropoff_longitude.is_some()
            && self.dropoff_latitude.is_some()
            && self.passenger_count.is_some()
    }
}

/// Формат выгрузки: `2013-07-06 17:18:00 UTC`, RFC 3339 тоже принимается
pub fn parse_pickup_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let naive = raw.strip_suffix(" UTC").unwrap_or(raw);
    if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn deserialize_pickup_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_pickup_datetime(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid pickup_datetime '{}'", s))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    #[serde(default = "default_data_path")]
    pub data_path: String,
    #[serde(default = "default_nrows")]
    pub nrows: Option<usize>,
    #[serde(default = "default_test_size")]
    pub test_size: f64, // доля валидации, 0.0..1.0
    #[serde(default)]
    pub random_state: Option<u64>,
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32, // Нью-Йорк, зимнее время
}

fn default_data_path() -> String { "raw_data/train.csv".to_string() }
fn default_nrows() -> Option<usize> { Some(10_000) }
fn default_test_size() -> f64 { 0.15 }
fn default_utc_offset_hours() -> i32 { -5 }

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            nrows: default_nrows(),
            test_size: default_test_size(),
            random_state: None,
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}
