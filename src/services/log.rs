use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

pub const ACTIVITY_LOG: &str = "activity.log";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub domain: Option<String>,
    pub event: String,
    pub details: Option<String>,
}

/// Append-only journal of driver runs, one line per run.
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new(data_dir: &Path) -> crate::Result<Self> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            log_path: data_dir.join(ACTIVITY_LOG),
        })
    }

    pub fn log(
        &self,
        level: LogLevel,
        domain: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            domain: domain.map(|d| d.to_string()),
            event: event.to_string(),
            details: details.map(|d| d.to_string()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        let level_str = match entry.level {
            LogLevel::Info => "OK ",
            LogLevel::Error => "ERR",
        };

        let domain_str = entry.domain.as_deref().unwrap_or("*");
        let details_str = entry.details.as_deref().unwrap_or("");

        writeln!(
            file,
            "{} {} {} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            level_str,
            entry.event,
            domain_str,
            details_str
        )?;

        Ok(())
    }

    /// Most recent first.
    pub fn read_logs(&self, errors_only: bool) -> crate::Result<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let file = fs::File::open(&self.log_path)?;
        let reader = BufReader::new(file);
        let mut matching_lines = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if errors_only && !line.contains(" ERR ") {
                continue;
            }
            matching_lines.push(line);
        }

        matching_lines.reverse();
        Ok(matching_lines)
    }

    pub fn info(&self, domain: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.log(LogLevel::Info, domain, event, details)
    }

    pub fn error(&self, domain: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.log(LogLevel::Error, domain, event, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_and_reads_back_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let logger = ActivityLogger::new(dir.path()).unwrap();
        logger.info(Some("www.gamespot.com"), "collect", Some("2 pages")).unwrap();
        logger.error(None, "extract", Some("failed in 3ms")).unwrap();

        let all = logger.read_logs(false).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].contains("extract * failed in 3ms"));
        assert!(all[1].contains("collect www.gamespot.com 2 pages"));

        let errors = logger.read_logs(true).unwrap();
        assert_eq!(errors.len(), 1);
    }
}
