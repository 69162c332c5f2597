use log::LevelFilter;
use musika_core::config::LoggingConfig;

/// Install the `env_logger` backend.
///
/// The configured level is the baseline; `RUST_LOG` directives are applied on
/// top of it.
pub fn init(config: &LoggingConfig) {
    let mut builder = env_logger::Builder::new();
    match config.level.parse::<LevelFilter>() {
        Ok(level) => {
            builder.filter_level(level);
        }
        Err(_) => {
            builder.parse_filters(&config.level);
        }
    }
    builder.parse_default_env();

    if builder.try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}
