/// Обучение модели стоимости поездки: загрузка -> очистка -> split -> fit -> RMSE

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use taxifare_model::{
    clean_data, get_data, split_features_target, train_test_split, Trainer, TrainerConfig,
};

fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = TrainerConfig::default();
    if let Ok(path) = std::env::var("TAXIFARE_DATA_PATH") {
        config.data_path = path;
    }
    tracing::info!("Training with {:?}", config);

    // Загрузка и очистка
    let df = get_data(&config.data_path, config.nrows)
        .with_context(|| format!("failed to load rides from {}", config.data_path))?;
    let df = clean_data(df);

    // Признаки и целевая переменная
    let (x, y) = split_features_target(&df)?;

    // Отложенная выборка
    let mut rng: Box<dyn RngCore> = match config.random_state {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let split = train_test_split(&x, &y, config.test_size, &mut rng)?;

    let mut trainer = Trainer::with_config(&split.x_train, &split.y_train, config);
    trainer.set_pipeline()?;
    trainer.run()?;

    // evaluate печатает само значение RMSE
    let _rmse = trainer.evaluate(&split.x_val, &split.y_val)?;

    println!("rmse");
    Ok(())
}
