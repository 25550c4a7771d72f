use std::error::Error;

use log::LevelFilter;
use spacewarp_core::LogLevel;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Level used until the global config has been read.
const STARTUP_LEVEL: LogLevel = LogLevel::Info;

/// Handle on the installed subscriber's filter.
pub struct LoggingHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LoggingHandle {
    /// Switch to the level from the global config. A `RUST_LOG` filter is
    /// left as it is.
    pub fn apply_level(&self, level: LogLevel) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.from_env {
            // The core narrows the facade to the configured level; RUST_LOG decides instead
            log::set_max_level(LevelFilter::Trace);
            return Ok(());
        }
        self.filter.reload(level_filter(level))?;
        log::set_max_level(level.to_level_filter());
        Ok(())
    }
}

fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.to_level_filter().to_string().to_lowercase())
}

/// Install the global subscriber and route `log` records into it.
///
/// Runs before anything else so the global config load is logged too.
/// `RUST_LOG` wins when set; otherwise Info is used until
/// [`LoggingHandle::apply_level`] is called. Output goes to stderr so stdout
/// stays machine readable.
pub fn init_logging() -> Result<LoggingHandle, Box<dyn Error + Send + Sync>> {
    tracing_log::LogTracer::init()?;

    let from_env = std::env::var("RUST_LOG").is_ok();
    let filter = if from_env {
        EnvFilter::from_default_env()
    } else {
        level_filter(STARTUP_LEVEL)
    };
    let (filter, handle) = reload::Layer::new(filter);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true));
    tracing::subscriber::set_global_default(subscriber)?;

    // LogTracer::init lets everything through; narrow it again
    if !from_env {
        log::set_max_level(STARTUP_LEVEL.to_level_filter());
    }
    Ok(LoggingHandle {
        filter: handle,
        from_env,
    })
}
