use crate::library::logger::interface::{LogLevel, Logger};
use chrono::{DateTime, FixedOffset, Utc};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: FixedOffset,
    min_level: LogLevel,
}

impl LoggerConsole {
    pub fn new(timezone: FixedOffset, min_level: LogLevel) -> Self {
        Self {
            namespace: None,
            timezone,
            min_level,
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn format_line(&self, now: DateTime<Utc>, level: LogLevel, message: &str) -> String {
        let local_time = now.with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %I:%M:%S%.3f %p");
        match &self.namespace {
            Some(namespace) => format!("[{}] {} {}: {}", formatted, level.tag(), namespace, message),
            None => format!("[{}] {} {}", formatted, level.tag(), message),
        }
    }
}

impl Logger for LoggerConsole {
    fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let line = self.format_line(Utc::now(), level, message);
        match level {
            LogLevel::Warn | LogLevel::Error => eprintln!("{}", line),
            LogLevel::Debug | LogLevel::Info => println!("{}", line),
        }
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerConsole {
            namespace: Some(new_namespace),
            timezone: self.timezone,
            min_level: self.min_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line_uses_timezone_and_namespace() {
        let logger = LoggerConsole {
            namespace: Some("pipeline:classify".to_string()),
            timezone: FixedOffset::west_opt(7 * 3600).unwrap(),
            min_level: LogLevel::Info,
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 20, 30, 0).unwrap();

        let line = logger.format_line(now, LogLevel::Info, "predicted Cardboard");

        assert_eq!(
            line,
            "[2024-03-01 01:30:00.000 PM] INFO pipeline:classify: predicted Cardboard"
        );
    }

    #[test]
    fn test_format_line_without_namespace() {
        let logger = LoggerConsole::new(FixedOffset::east_opt(0).unwrap(), LogLevel::Debug);
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 0).unwrap();

        let line = logger.format_line(now, LogLevel::Warn, "slow decode");

        assert_eq!(line, "[2024-03-01 09:05:00.000 AM] WARN slow decode");
    }

    #[test]
    fn test_min_level_filters_debug() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let quiet = LoggerConsole::new(utc, LogLevel::Info);
        let verbose = LoggerConsole::new(utc, LogLevel::Debug).with_namespace("pipeline");

        assert!(!quiet.enabled(LogLevel::Debug));
        assert!(quiet.enabled(LogLevel::Info));
        assert!(quiet.enabled(LogLevel::Error));
        assert!(LoggerConsole::new(utc, LogLevel::Debug).enabled(LogLevel::Debug));
        verbose.debug("running fake on tensor [1, 224, 224, 3]");
    }
}
