//! Загрузка и очистка поездок

use std::path::Path;

use ndarray::Array1;

use crate::data::frame::{Column, Frame};
use crate::error::{PipelineError, Result};
use crate::types::*;

/// Читает поездки из CSV; `nrows` ограничивает число прочитанных строк
pub fn get_data<P: AsRef<Path>>(path: P, nrows: Option<usize>) -> Result<Vec<Ride>> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

    let limit = nrows.unwrap_or(usize::MAX);
    let rides = rdr
        .deserialize::<Ride>()
        .take(limit)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::info!("Loaded {} rides from {}", rides.len(), path.display());
    Ok(rides)
}

/// Удаляет неполные строки и строки с координатами/суммами вне допустимых границ
pub fn clean_data(rides: Vec<Ride>) -> Vec<Ride> {
    let before = rides.len();
    let cleaned: Vec<Ride> = rides.into_iter().filter(is_valid_ride).collect();

    let dropped = before - cleaned.len();
    if dropped > 0 {
        tracing::warn!("Dropped {} of {} rides during cleaning", dropped, before);
    }
    cleaned
}

fn is_valid_ride(ride: &Ride) -> bool {
    let (
        Some(fare),
        Some(_),
        Some(pickup_lon),
        Some(pickup_lat),
        Some(dropoff_lon),
        Some(dropoff_lat),
        Some(passengers),
    ) = (
        ride.fare_amount,
        ride.pickup_datetime,
        ride.pickup_longitude,
        ride.pickup_latitude,
        ride.dropoff_longitude,
        ride.dropoff_latitude,
        ride.passenger_count,
    )
    else {
        return false;
    };

    // Нулевые координаты = не записано
    if dropoff_lat == 0.0 && dropoff_lon == 0.0 {
        return false;
    }
    if pickup_lat == 0.0 && pickup_lon == 0.0 {
        return false;
    }

    (0.0..=4000.0).contains(&fare)
        && (0..8).contains(&passengers)
        && (40.0..=42.0).contains(&pickup_lat)
        && (-74.3..=-72.9).contains(&pickup_lon)
        && (40.0..=42.0).contains(&dropoff_lat)
        && (-74.0..=-72.9).contains(&dropoff_lon)
}

/// Признаки (все колонки кроме `fare_amount`) и целевая переменная
pub fn split_features_target(rides: &[Ride]) -> Result<(Frame, Array1<f64>)> {
    let target = required(rides, FARE_AMOUNT, |r| r.fare_amount)?;

    let frame = Frame::new()
        .with_column(KEY, Column::Text(rides.iter().map(|r| r.key.clone()).collect()))?
        .with_column(
            PICKUP_DATETIME,
            Column::Timestamp(required(rides, PICKUP_DATETIME, |r| r.pickup_datetime)?),
        )?
        .with_column(
            PICKUP_LONGITUDE,
            Column::Float(required(rides, PICKUP_LONGITUDE, |r| r.pickup_longitude)?),
        )?
        .with_column(
            PICKUP_LATITUDE,
            Column::Float(required(rides, PICKUP_LATITUDE, |r| r.pickup_latitude)?),
        )?
        .with_column(
            DROPOFF_LONGITUDE,
            Column::Float(required(rides, DROPOFF_LONGITUDE, |r| r.dropoff_longitude)?),
        )?
        .with_column(
            DROPOFF_LATITUDE,
            Column::Float(required(rides, DROPOFF_LATITUDE, |r| r.dropoff_latitude)?),
        )?
        .with_column(
            PASSENGER_COUNT,
            Column::Float(required(rides, PASSENGER_COUNT, |r| {
                r.passenger_count.map(|p| p as f64)
            })?),
        )?;

    Ok((frame, Array1::from_vec(target)))
}

fn required<T>(rides: &[Ride], column: &str, get: impl Fn(&Ride) -> Option<T>) -> Result<Vec<T>> {
    rides
        .iter()
        .enumerate()
        .map(|(row, ride)| {
            get(ride).ok_or_else(|| PipelineError::MissingValue {
                column: column.to_string(),
                row,
            })
        })
        .collect()
}
