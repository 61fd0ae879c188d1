use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::NamedTempFile;

use taxifare_model::{
    clean_data, get_data, haversine_km, split_features_target, train_test_split, PipelineError,
    Ride, Trainer, TrainerConfig, TrainerState,
};

fn synthetic_ride(rng: &mut StdRng, i: usize) -> Ride {
    let start = Utc.with_ymd_and_hms(2014, 3, 1, 0, 0, 0).unwrap();
    let (plat, plon) = (rng.gen_range(40.70..40.85), rng.gen_range(-73.99..-73.93));
    let (dlat, dlon) = (rng.gen_range(40.70..40.85), rng.gen_range(-73.99..-73.93));

    Ride {
        key: format!("ride-{}", i),
        fare_amount: Some(2.0 * haversine_km(plat, plon, dlat, dlon) + 5.0),
        pickup_datetime: Some(start + Duration::minutes(rng.gen_range(0..500_000))),
        pickup_longitude: Some(plon),
        pickup_latitude: Some(plat),
        dropoff_longitude: Some(dlon),
        dropoff_latitude: Some(dlat),
        passenger_count: Some(rng.gen_range(1..5)),
    }
}

fn write_rides(rides: &[Ride]) -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    let mut writer = csv::Writer::from_path(file.path()).expect("Failed to open CSV writer");
    for ride in rides {
        writer.serialize(ride).expect("Failed to write ride");
    }
    writer.flush().expect("Failed to flush CSV");
    file
}

#[test]
fn trains_from_csv_and_reports_small_rmse() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut rides: Vec<Ride> = (0..120).map(|i| synthetic_ride(&mut rng, i)).collect();

    // мусор, который должен уйти на очистке
    rides[3].dropoff_latitude = None;
    rides[10].pickup_latitude = Some(0.0);
    rides[10].pickup_longitude = Some(0.0);
    rides[20].passenger_count = Some(9);
    rides[30].fare_amount = Some(-2.5);

    let file = write_rides(&rides);
    let config = TrainerConfig {
        data_path: file.path().display().to_string(),
        random_state: Some(17),
        ..TrainerConfig::default()
    };

    let loaded = get_data(&config.data_path, config.nrows).unwrap();
    assert_eq!(loaded.len(), 120);
    assert_eq!(loaded[0], rides[0]);

    let cleaned = clean_data(loaded);
    assert_eq!(cleaned.len(), 116);

    let (x, y) = split_features_target(&cleaned).unwrap();
    let mut split_rng = StdRng::seed_from_u64(config.random_state.unwrap());
    let split = train_test_split(&x, &y, config.test_size, &mut split_rng).unwrap();
    assert_eq!(split.x_val.n_rows(), 18);

    let mut trainer = Trainer::with_config(&split.x_train, &split.y_train, config);
    trainer.set_pipeline().unwrap();
    trainer.run().unwrap();
    assert_eq!(trainer.state(), TrainerState::Fitted);

    let rmse = trainer.evaluate(&split.x_val, &split.y_val).unwrap();
    assert!((0.0..0.5).contains(&rmse), "rmse = {}", rmse);
}

#[test]
fn empty_file_after_cleaning_cannot_be_split() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut rides: Vec<Ride> = (0..5).map(|i| synthetic_ride(&mut rng, i)).collect();
    for ride in &mut rides {
        ride.fare_amount = Some(5000.0);
    }

    let file = write_rides(&rides);
    let cleaned = clean_data(get_data(file.path(), None).unwrap());
    assert!(cleaned.is_empty());

    let (x, y) = split_features_target(&cleaned).unwrap();
    let err = train_test_split(&x, &y, 0.15, &mut rng).unwrap_err();
    assert!(matches!(err, PipelineError::InsufficientData(_)));
}
