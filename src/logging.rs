// Logging setup and conditional logging macros - the macros are only active in debug builds

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE: &str = "wordle-duel.log";

/// Where the TUI sends log records, since it owns the terminal.
#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("wordle-duel").join(LOG_FILE))
}

/// Installs the global logger. `RUST_LOG` overrides the default `warn` filter.
///
/// With `to_file` set, records are appended to `log_file_path()` instead of stderr.
/// Calling this twice is harmless; the second call does nothing.
pub fn init(to_file: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if to_file {
        route_to_file(&mut builder, log_file_path());
    }

    let _ = builder.try_init();
}

/// Points `builder` at the log file, or silences it when there is no usable file.
/// The TUI owns the terminal, so nothing may fall through to stderr.
fn route_to_file(builder: &mut env_logger::Builder, path: Option<PathBuf>) {
    let Some(path) = path else {
        silence(builder);
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("Could not open log file '{}': {e}", path.display());
            silence(builder);
        }
    }
}

fn silence(builder: &mut env_logger::Builder) {
    builder.filter_level(log::LevelFilter::Off);
    builder.target(env_logger::Target::Pipe(Box::new(io::sink())));
}
