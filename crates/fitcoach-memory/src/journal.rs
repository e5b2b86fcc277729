//! File-backed log journal storing one JSON record per line.

use crate::error::MemoryError;
use fitcoach_protocol::{LogId, LogRecord};
use log::{debug, info};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// JSONL journal of log records.
#[derive(Debug, Clone)]
pub struct FileLogJournal {
    /// Journal file path.
    path: PathBuf,
}

impl FileLogJournal {
    /// Open a journal at `path`, creating parent directories.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        info!("opened log journal (path={})", path.display());
        Ok(Self { path })
    }

    /// Journal file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path to the temporary rewrite file.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Append a record.
    pub fn append(&self, record: &LogRecord) -> Result<(), MemoryError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}")?;
        debug!(
            "journaled log (id={}, type={}, content_len={})",
            record.id,
            record.log_type,
            record.content.len()
        );
        Ok(())
    }

    /// Load every record in file order. A missing file is an empty journal.
    ///
    /// When the same id appears more than once the last line wins, at the
    /// position of the first.
    pub fn load(&self) -> Result<Vec<LogRecord>, MemoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = OpenOptions::new().read(true).open(&self.path)?;
        let reader = BufReader::new(file);
        let mut records: Vec<LogRecord> = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: LogRecord =
                serde_json::from_str(&line).map_err(|err| MemoryError::CorruptLine {
                    line: index + 1,
                    message: err.to_string(),
                })?;
            match records.iter_mut().find(|existing| existing.id == record.id) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        }
        debug!(
            "loaded log journal (path={}, records={})",
            self.path.display(),
            records.len()
        );
        Ok(records)
    }

    /// Remove a record by id, rewriting the file. Returns whether it existed.
    pub fn remove(&self, id: LogId) -> Result<bool, MemoryError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_records(&records)?;
        info!("removed log from journal (id={})", id);
        Ok(true)
    }

    /// Rewrite the journal atomically.
    fn write_records(&self, records: &[LogRecord]) -> Result<(), MemoryError> {
        let temp_path = self.temp_path();
        {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&temp_path)?;
            for record in records {
                let line = serde_json::to_string(record)?;
                writeln!(file, "{line}")?;
            }
        }
        std::fs::rename(temp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_protocol::LogType;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_journal_loads_empty() {
        let temp = tempdir().expect("tempdir");
        let journal = FileLogJournal::new(temp.path().join("logs.jsonl")).expect("journal");
        assert_eq!(journal.load().expect("load"), Vec::new());
    }

    #[test]
    fn append_then_load_preserves_order() {
        let temp = tempdir().expect("tempdir");
        let journal =
            FileLogJournal::new(temp.path().join("nested").join("logs.jsonl")).expect("journal");
        let first = LogRecord::new(LogType::Workout, "leg day, doms 3", None);
        let second = LogRecord::new(LogType::Metrics, "71.4kg", None);
        journal.append(&first).expect("append first");
        journal.append(&second).expect("append second");

        let records = journal.load().expect("load");
        assert_eq!(records, vec![first, second]);
    }

    #[test]
    fn remove_rewrites_without_record() {
        let temp = tempdir().expect("tempdir");
        let journal = FileLogJournal::new(temp.path().join("logs.jsonl")).expect("journal");
        let keep = LogRecord::new(LogType::Nutrition, "oats", None);
        let drop = LogRecord::new(LogType::Workout, "rows", None);
        journal.append(&keep).expect("append");
        journal.append(&drop).expect("append");

        assert!(journal.remove(drop.id).expect("remove"));
        assert!(!journal.remove(drop.id).expect("remove again"));
        assert_eq!(journal.load().expect("load"), vec![keep]);
        assert!(!journal.temp_path().exists());
    }

    #[test]
    fn rewrite_replaces_stale_temp_file_in_place() {
        let temp = tempdir().expect("tempdir");
        let journal = FileLogJournal::new(temp.path().join("logs.jsonl")).expect("journal");
        let keep = LogRecord::new(LogType::Recovery, "foam rolling", None);
        let drop = LogRecord::new(LogType::Workout, "deadlifts", None);
        journal.append(&keep).expect("append");
        journal.append(&drop).expect("append");
        std::fs::write(journal.temp_path(), "left over from an interrupted rewrite\n")
            .expect("write stale temp");

        assert!(journal.remove(drop.id).expect("remove"));
        assert!(journal.path().exists());
        assert!(!journal.temp_path().exists());
        assert_eq!(journal.load().expect("load"), vec![keep.clone()]);

        journal.append(&drop).expect("append again");
        assert_eq!(journal.load().expect("reload"), vec![keep, drop]);
    }

    #[test]
    fn repeated_id_keeps_last_version() {
        let temp = tempdir().expect("tempdir");
        let journal = FileLogJournal::new(temp.path().join("logs.jsonl")).expect("journal");
        let original = LogRecord::new(LogType::Workout, "squats", None);
        let mut edited = original.clone();
        edited.content = "squats, doms 5".to_string();
        journal.append(&original).expect("append");
        journal.append(&edited).expect("append");

        assert_eq!(journal.load().expect("load"), vec![edited]);
    }

    #[test]
    fn corrupt_line_reports_position() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("logs.jsonl");
        std::fs::write(&path, "\nnot json\n").expect("write");
        let journal = FileLogJournal::new(&path).expect("journal");
        let err = journal.load().unwrap_err();
        assert!(matches!(err, MemoryError::CorruptLine { line: 2, .. }));
    }
}
