//! Stderr logger for the `minijs` binary.
//!
//! Records from the `minijs::console` target are the interpreter echoing
//! `console.log` lines; they get their own prefix so they stand out from
//! pipeline tracing.

use log::{LevelFilter, Log, Metadata, Record};

pub const CONSOLE_TARGET: &str = "minijs::console";

pub struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{}", format_record(record));
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    if record.target() == CONSOLE_TARGET {
        return format!("[console] {}", record.args());
    }

    let location = match (record.file(), record.line()) {
        (Some(file), Some(line)) => format!("{file}:{line}"),
        (Some(file), None) => file.to_string(),
        (None, _) => String::from("unknown location"),
    };
    format!(
        "[{level}][{target}][{location}] {message}",
        level = record.level(),
        target = record.target(),
        message = record.args()
    )
}

/// Level for a `-v` count: warnings by default, then info, debug, trace
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    static LOGGER: StderrLogger = StderrLogger;
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
