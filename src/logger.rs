//! JSON structured logging implementation for abogus

use crate::signature::defaults::{ENV_LOG_LEVEL, ENV_LOG_PATH};
use chrono::{Local, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

/// JSON logger implementation
#[derive(Debug)]
pub struct JsonLogger {
    level: Level,
    target_file: Mutex<Option<std::fs::File>>,
}

/// Split a level string into (json?, level), e.g. "json:debug" or "warn"
pub fn parse_level_spec(level_str: &str) -> (bool, &str) {
    if let Some(stripped) = level_str.strip_prefix("json:") {
        (true, stripped)
    } else if level_str == "json" {
        (true, "info")
    } else {
        (false, level_str)
    }
}

/// Level filter for a level name; unknown names fall back to `Info`
pub fn level_filter(level: &str) -> LevelFilter {
    match level {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

impl JsonLogger {
    /// Create a new JSON logger
    pub fn new(level: Level, log_path: Option<String>) -> Self {
        let target_file = if let Some(path) = log_path {
            OpenOptions::new().create(true).append(true).open(path).ok()
        } else {
            None
        };

        JsonLogger {
            level,
            target_file: Mutex::new(target_file),
        }
    }

    /// Initialize the logger with specified level and source
    pub fn init_with_level(level_str: &str, source: &str) -> (String, String) {
        let log_path = env::var(ENV_LOG_PATH).ok();
        let (use_json, actual_level) = parse_level_spec(level_str);

        if !use_json {
            let result = env_logger::Builder::new()
                .filter_level(level_filter(actual_level))
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "[{} {} {}] {}",
                        Local::now().format("%Y-%m-%dT%H:%M:%S"),
                        record.level(),
                        record.target(),
                        record.args()
                    )
                })
                .try_init();
            if let Err(e) = result {
                eprintln!("Failed to initialize logger: {e}");
            }
            return (actual_level.to_string(), source.to_string());
        }

        let level = match level_filter(actual_level).to_level() {
            Some(level) => level,
            None => {
                log::set_max_level(LevelFilter::Off);
                return (actual_level.to_string(), source.to_string());
            }
        };

        let logger = Box::new(JsonLogger::new(level, log_path));

        if let Err(e) = log::set_boxed_logger(logger) {
            eprintln!("Failed to initialize JSON logger: {e}");
            return (actual_level.to_string(), source.to_string());
        }

        log::set_max_level(level.to_level_filter());
        (actual_level.to_string(), source.to_string())
    }

    /// Initialize from ABOGUS_LOG_LEVEL, defaulting to warnings only
    pub fn init() {
        let log_level = env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| "warn".to_string());
        Self::init_with_level(&log_level, ENV_LOG_LEVEL);
    }

    fn entry(record: &Record<'_>) -> String {
        let log_entry = json!({
            "@timestamp": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            "@level": record.level().to_string().to_lowercase(),
            "@message": record.args().to_string(),
            "@module": record.target(),
            "@pid": std::process::id(),
            "@file": record.file().unwrap_or("unknown"),
            "@line": record.line().unwrap_or(0),
        });
        format!("{}\n", serde_json::to_string(&log_entry).unwrap_or_default())
    }
}

impl Log for JsonLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = Self::entry(record);

        // Write to file or stderr
        if let Ok(mut file_guard) = self.target_file.lock() {
            if let Some(ref mut file) = *file_guard {
                let _ = file.write_all(line.as_bytes());
                let _ = file.flush();
                return;
            }
        }
        let _ = io::stderr().write_all(line.as_bytes());
        let _ = io::stderr().flush();
    }

    fn flush(&self) {
        if let Ok(mut file_guard) = self.target_file.lock() {
            if let Some(ref mut file) = *file_guard {
                let _ = file.flush();
            }
        }
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_spec() {
        assert_eq!(parse_level_spec("json:debug"), (true, "debug"));
        assert_eq!(parse_level_spec("json"), (true, "info"));
        assert_eq!(parse_level_spec("trace"), (false, "trace"));
    }

    #[test]
    fn test_level_filter_fallback() {
        assert_eq!(level_filter("error"), LevelFilter::Error);
        assert_eq!(level_filter("off"), LevelFilter::Off);
        assert_eq!(level_filter("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_entry_is_json_line() {
        let entry = JsonLogger::entry(
            &Record::builder()
                .args(format_args!("token ready"))
                .level(Level::Info)
                .target("abogus::signature")
                .build(),
        );
        assert!(entry.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(entry.trim_end()).unwrap();
        assert_eq!(value["@message"], "token ready");
        assert_eq!(value["@level"], "info");
        assert_eq!(value["@module"], "abogus::signature");
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = JsonLogger::new(Level::Warn, None);
        let debug = Metadata::builder().level(Level::Debug).build();
        let error = Metadata::builder().level(Level::Error).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&error));
    }
}
