use super::config::CONFIG;
use log::LevelFilter;

static LOG_ENV: &str = "DISKFILL_LOG";

fn level(log_level: usize) -> LevelFilter {
    match log_level {
        #[cfg(debug_assertions)]
        0 => LevelFilter::Trace,
        #[cfg(not(debug_assertions))]
        0 => LevelFilter::Debug,
        1 => LevelFilter::Debug,
        2 => LevelFilter::Info,
        3 => LevelFilter::Warn,
        4 => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

// setup logger and panic handler
//
// DISKFILL_LOG takes env_logger filter syntax and wins over config.log_level
pub fn init() {
    let config = CONFIG.get().unwrap();

    let mut builder = env_logger::Builder::new();
    builder
        .filter_module("diskfill", level(config.log_level))
        .format_timestamp_millis()
        .parse_env(LOG_ENV);
    builder.try_init().ok();

    // a panicking filler only takes itself down, the pool reports it
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_panic(info);
        log::error!(
            "Panic in {} at {}",
            std::thread::current().name().unwrap_or("<unnamed>"),
            info.location().map(|x| x.to_string()).unwrap_or_default()
        );
    }));
}
