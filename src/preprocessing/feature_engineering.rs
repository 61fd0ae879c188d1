//! Feature engineering: расстояние поездки и календарные признаки

use chrono::{Datelike, FixedOffset, Timelike};
use ndarray::Array2;

use crate::data::Frame;
use crate::error::{PipelineError, Result};
use crate::preprocessing::Step;
use crate::types::{
    DROPOFF_LATITUDE, DROPOFF_LONGITUDE, PICKUP_DATETIME, PICKUP_LATITUDE, PICKUP_LONGITUDE,
};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Расстояние по большой окружности, км
pub fn haversine_km(start_lat: f64, start_lon: f64, end_lat: f64, end_lon: f64) -> f64 {
    let (lat1, lat2) = (start_lat.to_radians(), end_lat.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (end_lon - start_lon).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Четыре колонки координат -> одна колонка `distance`
#[derive(Debug, Clone)]
pub struct DistanceTransformer {
    pub start_lat: String,
    pub start_lon: String,
    pub end_lat: String,
    pub end_lon: String,
}

impl Default for DistanceTransformer {
    fn default() -> Self {
        Self {
            start_lat: PICKUP_LATITUDE.to_string(),
            start_lon: PICKUP_LONGITUDE.to_string(),
            end_lat: DROPOFF_LATITUDE.to_string(),
            end_lon: DROPOFF_LONGITUDE.to_string(),
        }
    }
}

impl DistanceTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_columns(&self) -> [&str; 4] {
        [
            self.start_lat.as_str(),
            self.start_lon.as_str(),
            self.end_lat.as_str(),
            self.end_lon.as_str(),
        ]
    }
}

impl Step for DistanceTransformer {
    type Input = Frame;
    type Output = Array2<f64>;
    type State = ();

    // Ничего не выучивает, только проверяет схему
    fn fit(&self, input: &Frame) -> Result<()> {
        for name in self.input_columns() {
            input.float(name)?;
        }
        Ok(())
    }

    fn apply(&self, input: &Frame, _: &()) -> Result<Array2<f64>> {
        let start_lat = input.float(&self.start_lat)?;
        let start_lon = input.float(&self.start_lon)?;
        let end_lat = input.float(&self.end_lat)?;
        let end_lon = input.float(&self.end_lon)?;

        let mut features = Array2::zeros((input.n_rows(), 1));
        for i in 0..input.n_rows() {
            features[[i, 0]] = haversine_km(start_lat[i], start_lon[i], end_lat[i], end_lon[i]);
        }
        Ok(features)
    }
}

/// Временная метка -> `dow`, `hour`, `month`, `year` в локальном времени
#[derive(Debug, Clone)]
pub struct TimeFeaturesEncoder {
    pub time_column: String,
    utc_offset_secs: i32,
}

impl TimeFeaturesEncoder {
    pub const FEATURES: [&'static str; 4] = ["dow", "hour", "month", "year"];

    pub fn new(time_column: impl Into<String>) -> Self {
        Self {
            time_column: time_column.into(),
            utc_offset_secs: -5 * 3600,
        }
    }

    pub fn with_utc_offset_hours(mut self, hours: i32) -> Result<Self> {
        self.utc_offset_secs = hours.saturating_mul(3600);
        self.offset()?;
        Ok(self)
    }

    fn offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_secs).ok_or_else(|| {
            PipelineError::InvalidParameter(format!(
                "UTC offset out of range: {} seconds",
                self.utc_offset_secs
            ))
        })
    }
}

impl Default for TimeFeaturesEncoder {
    fn default() -> Self {
        Self::new(PICKUP_DATETIME)
    }
}

impl Step for TimeFeaturesEncoder {
    type Input = Frame;
    type Output = Array2<i64>;
    type State = ();

    fn fit(&self, input: &Frame) -> Result<()> {
        self.offset()?;
        input.timestamp(&self.time_column).map(|_| ())
    }

    fn apply(&self, input: &Frame, _: &()) -> Result<Array2<i64>> {
        let offset = self.offset()?;
        let timestamps = input.timestamp(&self.time_column)?;

        let mut features = Array2::zeros((timestamps.len(), Self::FEATURES.len()));
        for (i, ts) in timestamps.iter().enumerate() {
            let local = ts.with_timezone(&offset);
            features[[i, 0]] = local.weekday().num_days_from_monday() as i64;
            features[[i, 1]] = local.hour() as i64;
            features[[i, 2]] = local.month() as i64;
            features[[i, 3]] = local.year() as i64;
        }
        Ok(features)
    }
}
