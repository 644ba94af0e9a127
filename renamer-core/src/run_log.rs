use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Append-only, timestamped record of what a run did to each file.
/// A disabled log ignores every call.
pub struct RunLog {
    file: Option<File>,
}

impl RunLog {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        Ok(Self { file: Some(file) })
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn log(&mut self, message: &str) -> Result<()> {
        if let Some(ref mut file) = self.file {
            writeln!(
                file,
                "[{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                message
            )?;
            file.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_appends_timestamped_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("rename.log");

        let mut log = RunLog::open(&path).unwrap();
        log.log("first").unwrap();
        log.log("second").unwrap();
        drop(log);

        let mut log = RunLog::open(&path).unwrap();
        log.log("third").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] first"));
        assert!(lines[2].ends_with("] third"));
    }

    #[test]
    fn test_disabled_log_is_noop() {
        let mut log = RunLog::disabled();
        log.log("nothing").unwrap();
    }
}
