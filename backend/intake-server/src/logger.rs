use crate::error::{Result as ServerErrorResult, ServerError};

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

fn palette() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

/// One line per record: RFC 3339 timestamp, level, target, message.
/// `colors` is None for file output and non-TTY stdout.
fn line_format(
    colors: Option<ColoredLevelConfig>,
) -> impl Fn(fern::FormatCallback, &std::fmt::Arguments, &log::Record) + Sync + Send + 'static {
    move |out, message, record| {
        let level = match colors {
            Some(colors) => colors.color(record.level()).to_string(),
            None => record.level().to_string(),
        };
        out.finish(format_args!(
            "{} {level:<5} [{}] {message}",
            humantime::format_rfc3339_seconds(SystemTime::now()),
            record.target(),
        ))
    }
}

/// Install the process-wide logger.
///
/// With `log_file` set, records go to that file (append, plain format);
/// otherwise to stdout, colored when `colored` is set.
pub fn initialize(
    level: intake_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let dispatch = Dispatch::new().level(level.0);

    let dispatch = match log_file {
        Some(ref path) => {
            let file = fern::log_file(path).map_err(|e| ServerError::Logger {
                message: format!("Failed to open log file {}: {}", path.display(), e),
            })?;
            dispatch.format(line_format(None)).chain(file)
        }
        None if colored => dispatch
            .format(line_format(Some(palette())))
            .chain(std::io::stdout()),
        None => dispatch.format(line_format(None)).chain(std::io::stdout()),
    };

    dispatch.apply().map_err(|e| ServerError::Logger {
        message: format!("Failed to initialize logger: {e}"),
    })?;

    match log_file {
        Some(path) => info!("Logger initialized: level={:?}, file={}", level.0, path.display()),
        None => info!("Logger initialized: level={:?}, stdout", level.0),
    }

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}
